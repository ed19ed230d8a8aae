//! 1D MOS capacitor electrostatics and C-V extraction.
//!
//! The crate couples a variable-permittivity Poisson solver with
//! voltage-dependent carrier statistics in a damped fixed-point loop, then
//! sweeps the gate voltage to extract capacitance by numerical
//! differentiation of the integrated sheet charge.

pub mod discretization;
pub mod error;
pub mod models;
pub mod numerics;
pub mod physics;
pub mod processing;

pub use error::{ConfigError, Error, Result, SolverError};
pub use models::moscap::cv::{compute_cv, CvConfig, CvCurve, CvPoint, VoltageSweep};
pub use models::moscap::family::{compute_cv_family, FamilyEntry, SweptParameter, SweptValue};
pub use models::moscap::moscap::{MoscapDevice, MoscapParams};
pub use physics::doping::Polarity;
