use super::tridiagonal::Tridiagonal;
use crate::discretization::mesh::Mesh;
use crate::error::SolverError;
use nalgebra::DVector;

/// Solve the linear Poisson equation d/dx(eps(x) dpsi/dx) = -rho(x) on the
/// mesh, for a fixed charge density and Dirichlet boundary potentials.
///
/// Interior rows use the three-point stencil
///   -eps_{i-1/2}/dx^2 * psi_{i-1}
///   + (eps_{i+1/2} + eps_{i-1/2})/dx^2 * psi_i
///   - eps_{i+1/2}/dx^2 * psi_{i+1} = rho_i
/// with half-node permittivities taken as the arithmetic mean of the adjacent
/// node values (the harmonic mean would be the flux-exact choice at the
/// dielectric step). Boundary rows are identity rows enforcing the boundary
/// values exactly.
pub fn solve_poisson(
    mesh: &Mesh,
    rho: &DVector<f64>,
    psi_left: f64,
    psi_right: f64,
) -> Result<DVector<f64>, SolverError> {
    let n = mesh.num_nodes();
    debug_assert_eq!(rho.len(), n);

    let dx2 = mesh.spacing * mesh.spacing;
    let mut system = Tridiagonal::zeros(n);
    let mut rhs = DVector::zeros(n);

    for i in 1..n - 1 {
        let eps_plus = 0.5 * (mesh.nodes[i].permittivity + mesh.nodes[i + 1].permittivity);
        let eps_minus = 0.5 * (mesh.nodes[i - 1].permittivity + mesh.nodes[i].permittivity);
        system.sub[i] = -eps_minus / dx2;
        system.diag[i] = (eps_plus + eps_minus) / dx2;
        system.sup[i] = -eps_plus / dx2;
        rhs[i] = rho[i];
    }

    // Dirichlet rows override any stencil contribution.
    system.diag[0] = 1.0;
    system.sup[0] = 0.0;
    rhs[0] = psi_left;
    system.sub[n - 1] = 0.0;
    system.diag[n - 1] = 1.0;
    rhs[n - 1] = psi_right;

    system.solve(&rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::generator::build_layered_mesh;
    use approx::assert_relative_eq;

    fn uniform_mesh(n: usize) -> Mesh {
        // Same permittivity on both layers: effectively a single dielectric.
        build_layered_mesh(0.5e-7, 0.5e-7, n, 1e-10, 1e-10).unwrap()
    }

    #[test]
    fn zero_charge_gives_linear_interpolation() {
        let mesh = uniform_mesh(101);
        let rho = DVector::zeros(101);
        let psi = solve_poisson(&mesh, &rho, 1.5, -0.5).unwrap();

        let length = mesh.length();
        for (i, node) in mesh.nodes.iter().enumerate() {
            let exact = 1.5 + (-0.5 - 1.5) * node.position / length;
            assert_relative_eq!(psi[i], exact, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn boundary_values_are_exact() {
        let mesh = build_layered_mesh(3e-9, 97e-9, 51, 3.45e-11, 1.04e-10).unwrap();
        let rho = DVector::from_element(51, 2.5e3);
        let psi = solve_poisson(&mesh, &rho, 0.37, -0.12).unwrap();
        assert_eq!(psi[0], 0.37);
        assert_eq!(psi[50], -0.12);
    }

    #[test]
    fn uniform_charge_gives_parabola() {
        // d/dx(eps dpsi/dx) = -rho with psi(0)=psi(L)=0 has the exact solution
        // psi(x) = rho/(2 eps) * x * (L - x).
        let mesh = uniform_mesh(201);
        let eps = 1e-10;
        let rho_val = 1e4;
        let rho = DVector::from_element(201, rho_val);
        let psi = solve_poisson(&mesh, &rho, 0.0, 0.0).unwrap();

        let length = mesh.length();
        for (i, node) in mesh.nodes.iter().enumerate() {
            let exact = rho_val / (2.0 * eps) * node.position * (length - node.position);
            assert_relative_eq!(psi[i], exact, epsilon = 1e-9 * rho_val / eps * length * length);
        }
    }
}
