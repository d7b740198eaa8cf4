use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::BuildHasherDefault;

use derive_more::{Display, Error};
use rustc_hash::FxHasher;

use crate::ilp::NFold;
use crate::ilp::path::{NO_PARENT, PathStore};
use crate::linalg::{Matrix, Vector};
use crate::{E, I};

/// One layer of the search DAG: residual key to (best prefix weight, index
/// of the path-store node holding the last chosen value).
///
/// The hasher is seedless so the iteration order, and with it the
/// first-inserter tie-break, is identical from run to run.
type Frontier = HashMap<Vector, (E, I), BuildHasherDefault<FxHasher>>;

/// Longest-path solver for the augmentation IP
///
/// ```text
/// max  c^T y
/// s.t. A y = 0
///      l <= y <= u,  y integer
/// ```
///
/// over an implicit layered DAG with one layer per variable. A node is a
/// residual vector of length `r + s`: the shared-row sums accumulated across
/// all blocks so far, followed by the current block's local-row sums. Once a
/// block's last column is chosen its `B` rows can never change again, so only
/// transitions that close them at zero survive the block boundary.
pub struct AugmentationIp<'a> {
    x: &'a NFold,
    nodes: PathStore,
}

impl<'a> AugmentationIp<'a> {
    pub fn new(x: &'a NFold) -> Self {
        Self {
            x,
            nodes: PathStore::new(),
        }
    }

    /// Returns a maximum-weight vector `y` with `A·y = 0` and `l <= y <= u`,
    /// or `None` when no path reaches the zero residual.
    pub fn solve(&mut self, l: &Vector, u: &Vector) -> Option<Vector> {
        let x = self.x;
        debug_assert_eq!(l.len(), x.n_vars());
        debug_assert_eq!(u.len(), x.n_vars());

        self.nodes.clear();
        let root = self.nodes.add(0, NO_PARENT);

        let mut curr = Frontier::default();
        curr.insert(Vector::zeros(x.r + x.s), (0, root));

        for block in 0..x.n {
            let m = Matrix::vstack(&x.a_blocks[block], &x.b_blocks[block]);
            let steps: Vec<Vector> = (0..x.t).map(|col| m.column(col)).collect();

            for col in 0..x.t {
                let j = block * x.t + col;
                let closing = col == x.t - 1;
                let mut next = Frontier::default();

                for (key, &(weight, node)) in &curr {
                    let mut found = 0;
                    for y in l[j]..=u[j] {
                        let mut candidate = key.clone();
                        candidate.add_scaled(y, &steps[col]);

                        // The B block is fixed after its last column, so any
                        // local residue left here can never be repaired.
                        if closing && !candidate.tail(x.s).iter().all(|&v| v == 0) {
                            continue;
                        }

                        let candidate_weight = weight + x.c[j] * y;
                        match next.entry(candidate) {
                            Entry::Vacant(entry) => {
                                entry.insert((candidate_weight, self.nodes.add(y, node)));
                                found += 1;
                            }
                            Entry::Occupied(mut entry) => {
                                // Longest path wins; on a tie the first
                                // inserter keeps the slot.
                                if entry.get().0 < candidate_weight {
                                    self.nodes.remove(entry.get().1, false);
                                    entry.insert((candidate_weight, self.nodes.add(y, node)));
                                    found += 1;
                                }
                            }
                        }
                    }

                    // Dead end: free the node so its exclusive ancestors go too.
                    if found == 0 {
                        self.nodes.remove(node, true);
                    }
                }

                curr = next;
            }
        }

        let &(_, node) = curr.get(&Vector::zeros(x.r + x.s))?;
        let path = self.nodes.path(node);
        debug_assert_eq!(path.len(), x.n_vars());
        Some(Vector::from_vec(path))
    }
}

/// Errors from the elementary-bound computation.
#[derive(Debug, Display, Error, PartialEq)]
pub enum BoundError {
    #[display("elementary augmentation bound overflows the element type")]
    Overflow,
}

/// A closed-form upper bound on the entries of any elementary augmenting
/// vector, `(2·(r + s)·Δ + 1)^((r + s + 1)²)`.
///
/// Deliberately conservative: it dominates the published norm bounds for
/// n-fold Graver elements, and an overestimate only loosens the clamp. For
/// all but tiny shapes it overflows, which callers treat as "do not clamp".
pub fn elementary_bound(x: &NFold) -> Result<E, BoundError> {
    let rs = (x.r + x.s) as E;
    let exponent = u32::try_from((x.r + x.s + 1) * (x.r + x.s + 1))
        .map_err(|_| BoundError::Overflow)?;
    let base = rs
        .checked_mul(2)
        .and_then(|v| v.checked_mul(x.delta()))
        .and_then(|v| v.checked_add(1))
        .ok_or(BoundError::Overflow)?;
    base.checked_pow(exponent).ok_or(BoundError::Overflow)
}
