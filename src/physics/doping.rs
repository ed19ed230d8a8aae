use crate::discretization::mesh::{Mesh, Region};
use crate::error::ConfigError;
use std::fmt;

/// Device polarity. The solver itself never branches on this: polarity is
/// expressed entirely through the sign of the net doping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// p-type substrate (net acceptor doping, Nd - Na < 0).
    Nmos,
    /// n-type substrate (net donor doping, Nd - Na > 0).
    Pmos,
}

impl Polarity {
    /// Sign applied to the doping magnitude, donors positive.
    pub fn doping_sign(&self) -> f64 {
        match self {
            Polarity::Nmos => -1.0,
            Polarity::Pmos => 1.0,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Nmos => write!(f, "nmos"),
            Polarity::Pmos => write!(f, "pmos"),
        }
    }
}

/// Net fixed charge concentration per mesh node (Nd - Na, donors positive)
/// [m^-3]. Zero at oxide nodes, constant magnitude in the semiconductor.
pub struct DopingProfile {
    pub net_concentration: Vec<f64>,
}

impl DopingProfile {
    pub fn uniform(mesh: &Mesh, magnitude: f64, polarity: Polarity) -> Result<Self, ConfigError> {
        if magnitude <= 0.0 {
            return Err(ConfigError::NonPositiveDoping(magnitude));
        }

        let signed = polarity.doping_sign() * magnitude;
        let net_concentration = mesh
            .nodes
            .iter()
            .map(|node| match node.region {
                Region::Oxide => 0.0,
                Region::Semiconductor => signed,
            })
            .collect();

        Ok(Self { net_concentration })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.net_concentration
    }
}
