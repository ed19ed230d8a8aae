use crate::error::SolverError;
use nalgebra::DVector;

/// A tridiagonal linear system, stored as three bands of equal length.
///
/// `sub[0]` and `sup[n-1]` are unused padding so every band indexes by row.
pub struct Tridiagonal {
    pub sub: Vec<f64>,
    pub diag: Vec<f64>,
    pub sup: Vec<f64>,
}

impl Tridiagonal {
    pub fn zeros(n: usize) -> Self {
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Thomas algorithm, O(n). Fails with [`SolverError::SingularSystem`] on a
    /// vanishing or non-finite pivot.
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>, SolverError> {
        let n = self.len();
        debug_assert_eq!(rhs.len(), n);

        let mut sup_prime = vec![0.0; n];
        let mut rhs_prime = vec![0.0; n];

        let mut pivot = self.diag[0];
        if !pivot.is_finite() || pivot.abs() < f64::MIN_POSITIVE {
            return Err(SolverError::SingularSystem(0));
        }
        sup_prime[0] = self.sup[0] / pivot;
        rhs_prime[0] = rhs[0] / pivot;

        for i in 1..n {
            pivot = self.diag[i] - self.sub[i] * sup_prime[i - 1];
            if !pivot.is_finite() || pivot.abs() < f64::MIN_POSITIVE {
                return Err(SolverError::SingularSystem(i));
            }
            sup_prime[i] = self.sup[i] / pivot;
            rhs_prime[i] = (rhs[i] - self.sub[i] * rhs_prime[i - 1]) / pivot;
        }

        let mut solution = DVector::zeros(n);
        solution[n - 1] = rhs_prime[n - 1];
        for i in (0..n - 1).rev() {
            solution[i] = rhs_prime[i] - sup_prime[i] * solution[i + 1];
        }

        Ok(solution)
    }
}
