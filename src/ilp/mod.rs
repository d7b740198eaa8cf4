use crate::linalg::{Matrix, Vector};
use crate::{E, I};

pub mod augment;
pub mod path;
pub mod phase1;
pub mod solver;

/// An n-fold integer program:
///
/// ```text
/// max  c^T x
/// s.t. A x = b
///      l <= x <= u,  x integer
/// ```
///
/// where `A` is the implicit `(r + n·s) × (n·t)` block matrix
///
/// ```text
/// [ A_0  A_1  ...  A_{n-1} ]
/// [ B_0                    ]
/// [      B_1               ]
/// [           ...          ]
/// [                B_{n-1} ]
/// ```
///
/// with shared blocks `A_i` of shape `r × t` and block-local blocks `B_i` of
/// shape `s × t`. `A` is never materialized; products and element access
/// dispatch into the blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFold {
    pub n: I,
    pub r: I,
    pub s: I,
    pub t: I,
    /// Lower bounds on the variables, length `n·t`.
    pub l: Vector,
    /// Upper bounds on the variables, length `n·t`.
    pub u: Vector,
    /// Objective function coefficients, length `n·t`.
    pub c: Vector,
    /// Right-hand side: `r` shared entries, then `s` entries per block.
    pub b: Vector,
    /// Shared-constraint coefficients, one `r × t` matrix per block.
    pub a_blocks: Vec<Matrix>,
    /// Block-local constraint coefficients, one `s × t` matrix per block.
    pub b_blocks: Vec<Matrix>,
}

impl NFold {
    /// Allocates an all-zero instance of the given sizes.
    pub fn new(n: I, r: I, s: I, t: I) -> Self {
        debug_assert!(n >= 1 && s >= 1 && t >= 1);
        Self {
            n,
            r,
            s,
            t,
            l: Vector::zeros(n * t),
            u: Vector::zeros(n * t),
            c: Vector::zeros(n * t),
            b: Vector::zeros(r + n * s),
            a_blocks: vec![Matrix::zeros(r, t); n],
            b_blocks: vec![Matrix::zeros(s, t); n],
        }
    }

    /// Returns the number of variables (columns of `A`).
    pub fn n_vars(&self) -> I {
        self.n * self.t
    }

    /// Returns the number of constraints (rows of `A`).
    pub fn n_cons(&self) -> I {
        self.r + self.n * self.s
    }

    /// Block-wise product `A·x`.
    pub fn apply(&self, x: &Vector) -> Vector {
        debug_assert_eq!(x.len(), self.n_vars());
        let mut res = Vector::zeros(self.n_cons());
        for i in 0..self.n {
            let block = x.segment(i * self.t, self.t);
            let shared = self.a_blocks[i].mul_slice(block);
            for (row, v) in shared.iter().enumerate() {
                res[row] += v;
            }
            res.set_segment(
                self.r + i * self.s,
                self.b_blocks[i].mul_slice(block).as_slice(),
            );
        }
        res
    }

    /// Entry of the implicit dense matrix at `(row, col)`.
    pub fn element(&self, row: I, col: I) -> E {
        debug_assert!(row < self.n_cons());
        debug_assert!(col < self.n_vars());

        if row < self.r {
            return self.a_blocks[col / self.t][(row, col % self.t)];
        }
        let block_row = (row - self.r) / self.s;
        if col >= block_row * self.t && col < (block_row + 1) * self.t {
            self.b_blocks[block_row][((row - self.r) % self.s, col % self.t)]
        } else {
            0
        }
    }

    /// Largest absolute coefficient over all `A_i` and `B_i`.
    pub fn delta(&self) -> E {
        self.a_blocks
            .iter()
            .chain(self.b_blocks.iter())
            .map(Matrix::max_abs)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// n=2, r=1, s=1, t=2 with distinct entries in every block.
    fn sample() -> NFold {
        let mut x = NFold::new(2, 1, 1, 2);
        x.a_blocks[0] = Matrix::from_rows(vec![vec![1, 2]]);
        x.a_blocks[1] = Matrix::from_rows(vec![vec![3, 4]]);
        x.b_blocks[0] = Matrix::from_rows(vec![vec![5, 6]]);
        x.b_blocks[1] = Matrix::from_rows(vec![vec![7, 8]]);
        x
    }

    #[test]
    fn test_apply_blockwise() {
        let x = sample();
        let v = Vector::from_vec(vec![1, 1, 1, 1]);

        // Shared row sums both A blocks; local rows see only their block.
        assert_eq!(x.apply(&v).as_slice(), &[1 + 2 + 3 + 4, 5 + 6, 7 + 8]);
    }

    #[test]
    fn test_element_matches_dense_expansion() {
        let x = sample();
        let dense = [
            [1, 2, 3, 4], // shared row
            [5, 6, 0, 0], // B_0
            [0, 0, 7, 8], // B_1
        ];
        for row in 0..x.n_cons() {
            for col in 0..x.n_vars() {
                assert_eq!(x.element(row, col), dense[row][col], "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_element_agrees_with_apply() {
        let x = sample();
        let v = Vector::from_vec(vec![2, -1, 0, 3]);
        let product = x.apply(&v);

        for row in 0..x.n_cons() {
            let expected: E = (0..x.n_vars()).map(|col| x.element(row, col) * v[col]).sum();
            assert_eq!(product[row], expected);
        }
    }

    #[test]
    fn test_delta() {
        assert_eq!(sample().delta(), 8);
        assert_eq!(NFold::new(1, 0, 1, 1).delta(), 0);
    }
}
