use nalgebra::DVector;

/// Clip bound on the normalized potential psi/Vt before exponentiation.
///
/// Guards the exponential against floating-point overflow at large |psi|;
/// within the physically swept range the clip is inactive.
pub const ETA_CLIP: f64 = 40.0;

/// Boltzmann carrier statistics with clipped exponentials.
///
/// Electron and hole densities are referenced to the intrinsic concentration:
/// n = ni * exp(psi/Vt), p = ni * exp(-psi/Vt). At psi = 0 the carrier terms
/// cancel exactly and the charge density reduces to q * doping, independent
/// of ni.
#[derive(Debug, Clone, Copy)]
pub struct CarrierModel {
    /// Elementary charge [C].
    pub q: f64,
    /// Thermal voltage kB*T/q [V].
    pub thermal_voltage: f64,
    /// Intrinsic carrier concentration [m^-3].
    pub ni: f64,
}

impl CarrierModel {
    pub fn new(q: f64, thermal_voltage: f64, ni: f64) -> Self {
        Self {
            q,
            thermal_voltage,
            ni,
        }
    }

    /// Volumetric charge density rho(psi) [C/m^3], one value per node.
    pub fn charge_density(&self, psi: &DVector<f64>, net_doping: &[f64]) -> DVector<f64> {
        DVector::from_fn(psi.len(), |i, _| {
            let eta_n = (psi[i] / self.thermal_voltage).clamp(-ETA_CLIP, ETA_CLIP);
            let eta_p = (-psi[i] / self.thermal_voltage).clamp(-ETA_CLIP, ETA_CLIP);
            let n = self.ni * eta_n.exp();
            let p = self.ni * eta_p.exp();
            self.q * (p - n + net_doping[i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn charge_neutral_at_zero_potential() {
        // n and p cancel algebraically at psi = 0, for any ni.
        let doping = vec![0.0, -1e21, 5e20, 1e22];
        for ni in [1e10, 1e16, 7.3e19] {
            let model = CarrierModel::new(1.602e-19, 0.0259, ni);
            let psi = DVector::zeros(doping.len());
            let rho = model.charge_density(&psi, &doping);
            for (r, d) in rho.iter().zip(&doping) {
                assert_eq!(*r, 1.602e-19 * d);
            }
        }
    }

    #[test]
    fn clip_caps_the_exponential() {
        let model = CarrierModel::new(1.602e-19, 0.0259, 1e16);
        let doping = vec![0.0];
        // |psi|/Vt far beyond the clip bound: density must equal the capped value.
        let rho = model.charge_density(&DVector::from_element(1, -100.0), &doping);
        let capped = 1.602e-19 * 1e16 * (ETA_CLIP.exp() - (-ETA_CLIP).exp());
        assert_relative_eq!(rho[0], capped, max_relative = 1e-12);
    }

    #[test]
    fn accumulation_sign_follows_potential() {
        let model = CarrierModel::new(1.602e-19, 0.0259, 1e16);
        let doping = vec![0.0, 0.0];
        let rho = model.charge_density(&DVector::from_vec(vec![-0.2, 0.2]), &doping);
        assert!(rho[0] > 0.0); // holes accumulate at negative potential
        assert!(rho[1] < 0.0); // electrons at positive potential
    }
}
