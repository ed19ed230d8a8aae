use super::moscap::{MoscapDevice, MoscapParams};
use crate::error::{ConfigError, Error};
use crate::numerics::relaxation::DampedFixedPoint;
use crate::numerics::{gradient, trapezoid};
use crate::physics::doping::Polarity;

/// Unit identity: 1 F/m^2 = 100 uF/cm^2.
pub const F_PER_M2_TO_UF_PER_CM2: f64 = 100.0;

/// An ascending gate-voltage sweep sampled at `points` evenly spaced values.
#[derive(Debug, Clone, Copy)]
pub struct VoltageSweep {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl VoltageSweep {
    pub fn new(start: f64, stop: f64, points: usize) -> Result<Self, ConfigError> {
        if points < 2 {
            return Err(ConfigError::DegenerateSweep(points));
        }
        Ok(Self {
            start,
            stop,
            points,
        })
    }

    pub fn step(&self) -> f64 {
        (self.stop - self.start) / (self.points - 1) as f64
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.points)
            .map(|i| self.start + (self.stop - self.start) * i as f64 / (self.points - 1) as f64)
            .collect()
    }
}

/// One extracted C-V sample with its convergence diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct CvPoint {
    /// Gate voltage [V].
    pub gate_voltage: f64,
    /// Capacitance [uF/cm^2].
    pub capacitance: f64,
    /// Integrated semiconductor sheet charge [C/m^2].
    pub sheet_charge: f64,
    /// False if the fixed-point loop exhausted its budget at this bias; the
    /// values are then best-effort rather than fully self-consistent.
    pub converged: bool,
    pub iterations: u32,
}

/// The durable output of one gate-voltage sweep.
#[derive(Debug, Clone, Default)]
pub struct CvCurve {
    pub points: Vec<CvPoint>,
}

impl CvCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn gate_voltages(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.gate_voltage).collect()
    }

    pub fn capacitances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.capacitance).collect()
    }

    pub fn all_converged(&self) -> bool {
        self.points.iter().all(|p| p.converged)
    }

    pub fn total_iterations(&self) -> u32 {
        self.points.iter().map(|p| p.iterations).sum()
    }
}

/// Gate-voltage sweep driver.
///
/// Biases are processed in the order given (ascending by construction of
/// [`VoltageSweep`]); each point warm-starts from the previous converged
/// potential, which is what lets the deeper-bias points converge at all
/// within the iteration budget.
pub struct CvSweepEngine<'a> {
    device: &'a MoscapDevice,
    solver: DampedFixedPoint,
    /// Continuation between sweep points. Disabling it cold-starts every
    /// point from the equilibrium guess; used for comparison in tests.
    pub warm_start: bool,
    pub logging: bool,
}

impl<'a> CvSweepEngine<'a> {
    pub fn new(device: &'a MoscapDevice, solver: DampedFixedPoint) -> Self {
        Self {
            device,
            solver,
            warm_start: true,
            logging: false,
        }
    }

    pub fn run(&self, sweep: &VoltageSweep) -> Result<CvCurve, Error> {
        let first_si = self.device.mesh.first_semiconductor_node();
        let dx = self.device.mesh.spacing;

        let equilibrium = self.device.equilibrium_guess()?;
        let mut psi = equilibrium.clone();

        let mut samples = Vec::with_capacity(sweep.points);
        for vg in sweep.values() {
            if !self.warm_start {
                psi = equilibrium.clone();
            }

            let outcome = self.device.solve_at_bias(vg, psi, &self.solver)?;
            psi = outcome.solution;

            let rho = self.device.charge_density(&psi);
            let sheet_charge = trapezoid(&rho.as_slice()[first_si..], dx);

            if self.logging {
                println!(
                    "Vg = {vg:+.3} V | iters = {:>3} | converged = {} | Qs = {:+.4e} C/m^2",
                    outcome.iterations, outcome.converged, sheet_charge
                );
            }

            samples.push((vg, sheet_charge, outcome.converged, outcome.iterations));
        }

        // C = -dQs/dVg, converted to uF/cm^2. Non-converged samples still
        // carry numeric values, so the differentiation never fails.
        let charges: Vec<f64> = samples.iter().map(|s| s.1).collect();
        let slope = gradient(&charges, sweep.step());

        let points = samples
            .iter()
            .zip(&slope)
            .map(|(&(vg, qs, converged, iterations), &dq)| CvPoint {
                gate_voltage: vg,
                capacitance: -dq * F_PER_M2_TO_UF_PER_CM2,
                sheet_charge: qs,
                converged,
                iterations,
            })
            .collect();

        Ok(CvCurve { points })
    }
}

/// Complete configuration for one C-V extraction. Everything a run needs is
/// in here; two configs never share state.
#[derive(Debug, Clone)]
pub struct CvConfig {
    pub polarity: Polarity,
    /// Oxide thickness [m].
    pub oxide_thickness: f64,
    /// Semiconductor thickness [m].
    pub semiconductor_thickness: f64,
    /// Substrate doping magnitude [m^-3].
    pub doping: f64,
    pub sweep: VoltageSweep,
    pub num_nodes: usize,
    pub params: MoscapParams,
    pub max_iterations: u32,
    pub damping: f64,
    pub tolerance: f64,
}

impl CvConfig {
    pub fn new(
        polarity: Polarity,
        oxide_thickness: f64,
        semiconductor_thickness: f64,
        doping: f64,
        sweep: VoltageSweep,
    ) -> Self {
        let solver = DampedFixedPoint::default();
        Self {
            polarity,
            oxide_thickness,
            semiconductor_thickness,
            doping,
            sweep,
            num_nodes: 401,
            params: MoscapParams::default(),
            max_iterations: solver.max_iterations,
            damping: solver.damping,
            tolerance: solver.tolerance,
        }
    }

    pub fn device(&self) -> Result<MoscapDevice, ConfigError> {
        MoscapDevice::new(
            self.polarity,
            self.oxide_thickness,
            self.semiconductor_thickness,
            self.doping,
            self.num_nodes,
            self.params,
        )
    }

    pub fn solver(&self) -> DampedFixedPoint {
        DampedFixedPoint {
            max_iterations: self.max_iterations,
            damping: self.damping,
            tolerance: self.tolerance,
        }
    }
}

/// Primary entry point: build the device for `config` and extract its C-V
/// curve over the configured gate-voltage sweep.
pub fn compute_cv(config: &CvConfig) -> Result<CvCurve, Error> {
    let device = config.device()?;
    let engine = CvSweepEngine::new(&device, config.solver());
    engine.run(&config.sweep)
}
