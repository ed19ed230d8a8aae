use thiserror::Error;

/// Invalid device or sweep configuration, rejected before any solve starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("oxide thickness must be positive, got {0:.3e} m")]
    NonPositiveOxideThickness(f64),

    #[error("semiconductor thickness must be positive, got {0:.3e} m")]
    NonPositiveSemiconductorThickness(f64),

    #[error("doping concentration must be positive, got {0:.3e} m^-3")]
    NonPositiveDoping(f64),

    #[error("mesh needs at least 3 nodes for the interior stencil, got {0}")]
    TooFewNodes(usize),

    #[error("voltage sweep needs at least 2 points, got {0}")]
    DegenerateSweep(usize),
}

/// Fatal numerical failure inside a linear solve.
///
/// Iteration-budget exhaustion is deliberately not represented here: a
/// non-converged sweep point is reported through its `converged` flag, not
/// through an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("singular tridiagonal system: zero pivot at row {0}")]
    SingularSystem(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type Result<T> = std::result::Result<T, Error>;
