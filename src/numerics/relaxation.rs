use crate::error::SolverError;
use nalgebra::DVector;

/// Damped fixed-point (Picard) iteration.
///
/// Each step evaluates a full update `u_new = map(u)`, applies the damped
/// correction `u += damping * (u_new - u)`, and stops once the undamped
/// correction norm max|u_new - u| drops below the tolerance.
pub struct DampedFixedPoint {
    pub max_iterations: u32,
    /// Under-relaxation factor in (0, 1].
    pub damping: f64,
    pub tolerance: f64,
}

impl Default for DampedFixedPoint {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            damping: 0.1,
            tolerance: 1e-6,
        }
    }
}

/// Terminal state of one fixed-point run. Budget exhaustion is a soft
/// failure: the caller still receives the best-effort solution.
#[derive(Debug)]
pub struct IterationOutcome {
    pub solution: DVector<f64>,
    pub converged: bool,
    pub iterations: u32,
    pub final_error: f64,
}

impl DampedFixedPoint {
    pub fn run<F>(&self, initial: DVector<f64>, mut map: F) -> Result<IterationOutcome, SolverError>
    where
        F: FnMut(&DVector<f64>) -> Result<DVector<f64>, SolverError>,
    {
        let mut u = initial;
        let mut error = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let proposed = map(&u)?;
            let delta = proposed - &u;
            error = delta.amax();
            u += delta * self.damping;

            if error < self.tolerance {
                return Ok(IterationOutcome {
                    solution: u,
                    converged: true,
                    iterations: iteration,
                    final_error: error,
                });
            }
        }

        Ok(IterationOutcome {
            solution: u,
            converged: false,
            iterations: self.max_iterations,
            final_error: error,
        })
    }
}
