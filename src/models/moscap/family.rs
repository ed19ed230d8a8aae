use super::cv::{compute_cv, CvConfig, CvCurve};
use crate::error::Result;
use crate::physics::doping::Polarity;
use rayon::prelude::*;
use std::fmt;

/// Secondary parameter swept across repeated C-V extractions.
#[derive(Debug, Clone)]
pub enum SweptParameter {
    /// Substrate doping magnitudes [m^-3].
    Doping(Vec<f64>),
    /// Oxide thicknesses [m].
    OxideThickness(Vec<f64>),
    /// Device polarities.
    Polarity(Vec<Polarity>),
}

/// The swept value attached to one family entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweptValue {
    Doping(f64),
    OxideThickness(f64),
    Polarity(Polarity),
}

impl fmt::Display for SweptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweptValue::Doping(v) => write!(f, "N = {v:.1e} m^-3"),
            SweptValue::OxideThickness(v) => write!(f, "tox = {v:.1e} m"),
            SweptValue::Polarity(p) => write!(f, "{p}"),
        }
    }
}

/// One curve of a comparative C-V family.
#[derive(Debug, Clone)]
pub struct FamilyEntry {
    pub value: SweptValue,
    pub curve: CvCurve,
}

/// Repeat the C-V extraction of `base` once per swept value, in the order
/// given. Every run owns a disjoint device and potential, so the entries are
/// dispatched in parallel and collected back in input order.
pub fn compute_cv_family(base: &CvConfig, swept: &SweptParameter) -> Result<Vec<FamilyEntry>> {
    let runs: Vec<(SweptValue, CvConfig)> = match swept {
        SweptParameter::Doping(values) => values
            .iter()
            .map(|&v| {
                let mut config = base.clone();
                config.doping = v;
                (SweptValue::Doping(v), config)
            })
            .collect(),
        SweptParameter::OxideThickness(values) => values
            .iter()
            .map(|&v| {
                let mut config = base.clone();
                config.oxide_thickness = v;
                (SweptValue::OxideThickness(v), config)
            })
            .collect(),
        SweptParameter::Polarity(values) => values
            .iter()
            .map(|&p| {
                let mut config = base.clone();
                config.polarity = p;
                (SweptValue::Polarity(p), config)
            })
            .collect(),
    };

    runs.into_par_iter()
        .map(|(value, config)| {
            let curve = compute_cv(&config)?;
            Ok(FamilyEntry { value, curve })
        })
        .collect()
}
