use super::mesh::{Mesh, Node, Region};
use crate::error::ConfigError;

/// Build the uniform oxide/semiconductor stack mesh.
///
/// Nodes span [0, tox + tsi]; nodes with position < tox are tagged
/// [`Region::Oxide`] and carry `eps_ox`, the rest are [`Region::Semiconductor`]
/// with `eps_si`.
pub fn build_layered_mesh(
    oxide_thickness: f64,
    semiconductor_thickness: f64,
    num_nodes: usize,
    eps_ox: f64,
    eps_si: f64,
) -> Result<Mesh, ConfigError> {
    if oxide_thickness <= 0.0 {
        return Err(ConfigError::NonPositiveOxideThickness(oxide_thickness));
    }
    if semiconductor_thickness <= 0.0 {
        return Err(ConfigError::NonPositiveSemiconductorThickness(
            semiconductor_thickness,
        ));
    }
    // Three nodes minimum: the interior stencil needs both neighbors.
    if num_nodes < 3 {
        return Err(ConfigError::TooFewNodes(num_nodes));
    }

    let length = oxide_thickness + semiconductor_thickness;
    let spacing = length / (num_nodes - 1) as f64;

    let nodes = (0..num_nodes)
        .map(|i| {
            let position = i as f64 * length / (num_nodes - 1) as f64;
            let (region, permittivity) = if position < oxide_thickness {
                (Region::Oxide, eps_ox)
            } else {
                (Region::Semiconductor, eps_si)
            };
            Node {
                position,
                region,
                permittivity,
            }
        })
        .collect();

    Ok(Mesh { nodes, spacing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_spacing_and_regions() {
        let mesh = build_layered_mesh(3e-9, 97e-9, 401, 3.45e-11, 1.04e-10).unwrap();
        assert_eq!(mesh.num_nodes(), 401);
        assert_relative_eq!(mesh.spacing, 100e-9 / 400.0, max_relative = 1e-12);
        assert_relative_eq!(mesh.length(), 100e-9, max_relative = 1e-12);

        // Region boundary is a single crossing at the oxide offset.
        let first_si = mesh.first_semiconductor_node();
        assert!(first_si > 0 && first_si < mesh.num_nodes());
        for (i, node) in mesh.nodes.iter().enumerate() {
            if i < first_si {
                assert_eq!(node.region, Region::Oxide);
                assert_relative_eq!(node.permittivity, 3.45e-11);
            } else {
                assert_eq!(node.region, Region::Semiconductor);
                assert_relative_eq!(node.permittivity, 1.04e-10);
            }
        }
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            build_layered_mesh(0.0, 97e-9, 401, 1.0, 1.0),
            Err(ConfigError::NonPositiveOxideThickness(_))
        ));
        assert!(matches!(
            build_layered_mesh(3e-9, -1e-9, 401, 1.0, 1.0),
            Err(ConfigError::NonPositiveSemiconductorThickness(_))
        ));
        assert!(matches!(
            build_layered_mesh(3e-9, 97e-9, 2, 1.0, 1.0),
            Err(ConfigError::TooFewNodes(2))
        ));
    }
}
