//! Construction of the auxiliary program whose optimum decides feasibility.
//!
//! The original variables are shifted by `l` so the auxiliary search starts
//! from zero, and one slack column per constraint row absorbs the shifted
//! right-hand side. Slacks cost their magnitude, so driving the objective to
//! zero is exactly driving every slack to zero, which is exactly finding a
//! feasible point of the original program.

use crate::ilp::NFold;
use crate::linalg::Vector;

/// Builds the auxiliary n-fold of sizes `(n, r, s, t + r + s)` together with
/// its trivially feasible starting vector.
///
/// Per block `i`, the widened `A'_i` is `[A_i | I_r·[i = 0] | 0]` and the
/// widened `B'_i` is `[B_i | 0 | I_s]`: the `r` shared slacks live in block 0
/// only, the `s` local slacks in every block. Bounds span from each slack's
/// target to zero (and `0..u − l` for the original columns), and every slack
/// carries cost `−sgn` of its target, so the auxiliary optimum is `0` exactly
/// when the original program is feasible.
pub fn auxiliary(x: &NFold) -> (NFold, Vector) {
    let (n, r, s, t) = (x.n, x.r, x.s, x.t);
    let width = t + r + s;
    let mut aux = NFold::new(n, r, s, width);

    for i in 0..n {
        aux.a_blocks[i].set_block(0, 0, &x.a_blocks[i]);
        if i == 0 {
            aux.a_blocks[i].set_identity(0, t, r);
        }
        aux.b_blocks[i].set_block(0, 0, &x.b_blocks[i]);
        aux.b_blocks[i].set_identity(0, t + r, s);
    }

    // Right-hand side after shifting the variables by l.
    aux.b = &x.b - &x.apply(&x.l);

    let span = &x.u - &x.l;
    for i in 0..n {
        aux.l.set_segment(i * width, span.segment(i * t, t));
        if i == 0 {
            aux.l.set_segment(t, aux.b.head(r));
        }
        aux.l.set_segment(i * width + t + r, aux.b.segment(r + i * s, s));
    }
    aux.u = aux.l.cwise_max(0);
    aux.l = aux.l.cwise_min(0);

    for j in 0..r {
        aux.c[t + j] = -aux.b[j].signum();
    }
    for i in 0..n {
        for j in 0..s {
            aux.c[i * width + t + r + j] = -aux.b[r + i * s + j].signum();
        }
    }

    let mut init = Vector::zeros(n * width);
    init.set_segment(t, aux.b.head(r));
    for i in 0..n {
        init.set_segment(i * width + t + r, aux.b.segment(r + i * s, s));
    }

    debug_assert_eq!(aux.apply(&init), aux.b);
    (aux, init)
}

/// Extracts the original-space solution from a zero-cost auxiliary optimum:
/// drop the slack columns and undo the shift by `l`.
pub fn project(x: &NFold, y: &Vector) -> Vector {
    let width = x.t + x.r + x.s;
    debug_assert_eq!(y.len(), x.n * width);

    let mut res = Vector::zeros(x.n_vars());
    for i in 0..x.n {
        res.set_segment(i * x.t, y.segment(i * width, x.t));
    }
    &res + &x.l
}
