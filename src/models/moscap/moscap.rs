use crate::discretization::generator::build_layered_mesh;
use crate::discretization::mesh::Mesh;
use crate::error::{ConfigError, SolverError};
use crate::numerics::poisson::solve_poisson;
use crate::numerics::relaxation::{DampedFixedPoint, IterationOutcome};
use crate::physics::charge::CarrierModel;
use crate::physics::doping::{DopingProfile, Polarity};
use nalgebra::DVector;

/// Physical constants and material parameters, passed explicitly so that
/// independent sweeps never share module state.
#[derive(Debug, Clone, Copy)]
pub struct MoscapParams {
    /// Temperature [K].
    pub temperature: f64,
    /// Elementary charge [C].
    pub q: f64,
    /// Boltzmann constant [J/K].
    pub kb: f64,
    /// Vacuum permittivity [F/m].
    pub eps0: f64,
    /// Relative permittivity of the oxide (SiO2).
    pub eps_ox_rel: f64,
    /// Relative permittivity of the semiconductor (Si).
    pub eps_si_rel: f64,
    /// Intrinsic carrier concentration [m^-3].
    pub ni: f64,
}

impl Default for MoscapParams {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            q: 1.602e-19,
            kb: 1.380649e-23,
            eps0: 8.854e-12,
            eps_ox_rel: 3.9,
            eps_si_rel: 11.7,
            ni: 1e16,
        }
    }
}

impl MoscapParams {
    /// Thermal voltage kB*T/q [V], about 0.0259 V at 300 K.
    pub fn thermal_voltage(&self) -> f64 {
        self.kb * self.temperature / self.q
    }

    pub fn eps_ox(&self) -> f64 {
        self.eps_ox_rel * self.eps0
    }

    pub fn eps_si(&self) -> f64 {
        self.eps_si_rel * self.eps0
    }
}

/// A metal-oxide-semiconductor capacitor stack: mesh, doping and carrier
/// statistics. Immutable for the duration of a sweep.
pub struct MoscapDevice {
    pub mesh: Mesh,
    pub doping: DopingProfile,
    pub params: MoscapParams,
    pub oxide_thickness: f64,
    carrier: CarrierModel,
}

impl MoscapDevice {
    pub fn new(
        polarity: Polarity,
        oxide_thickness: f64,
        semiconductor_thickness: f64,
        doping_magnitude: f64,
        num_nodes: usize,
        params: MoscapParams,
    ) -> Result<Self, ConfigError> {
        let mesh = build_layered_mesh(
            oxide_thickness,
            semiconductor_thickness,
            num_nodes,
            params.eps_ox(),
            params.eps_si(),
        )?;
        let doping = DopingProfile::uniform(&mesh, doping_magnitude, polarity)?;
        let carrier = CarrierModel::new(params.q, params.thermal_voltage(), params.ni);

        Ok(Self {
            mesh,
            doping,
            params,
            oxide_thickness,
            carrier,
        })
    }

    /// Oxide capacitance per unit area, eps_ox / tox [F/m^2].
    pub fn oxide_capacitance(&self) -> f64 {
        self.params.eps_ox() / self.oxide_thickness
    }

    /// Mobile plus fixed charge density for a given potential [C/m^3].
    pub fn charge_density(&self, psi: &DVector<f64>) -> DVector<f64> {
        self.carrier.charge_density(psi, self.doping.as_slice())
    }

    /// Initial potential guess: the linear Poisson solution with the
    /// doping-only charge (carriers at psi = 0) and grounded boundaries.
    pub fn equilibrium_guess(&self) -> Result<DVector<f64>, SolverError> {
        let rho = DVector::from_iterator(
            self.mesh.num_nodes(),
            self.doping.as_slice().iter().map(|d| self.params.q * d),
        );
        solve_poisson(&self.mesh, &rho, 0.0, 0.0)
    }

    /// Self-consistent potential at one gate bias: damped fixed-point loop
    /// alternating charge evaluation and the linear Poisson solve, with
    /// psi(0) = vg and psi(L) = 0.
    pub fn solve_at_bias(
        &self,
        gate_voltage: f64,
        initial: DVector<f64>,
        solver: &DampedFixedPoint,
    ) -> Result<IterationOutcome, SolverError> {
        solver.run(initial, |psi| {
            let rho = self.charge_density(psi);
            solve_poisson(&self.mesh, &rho, gate_voltage, 0.0)
        })
    }
}
