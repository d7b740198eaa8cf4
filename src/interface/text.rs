//! Whitespace-separated text format for n-fold instances.
//!
//! The stream carries, in order: the sizes `n r s t`, the vectors `l`, `u`,
//! `b`, `c`, then the matrices `A_0 … A_{n−1}` and `B_0 … B_{n−1}` in
//! row-major order. Line breaks are free-form; any whitespace separates
//! tokens.

use std::io::{self, Read, Write};

use problemo::{Problem, common::IntoCommonProblem};

use crate::ilp::NFold;
use crate::linalg::{Matrix, Vector};
use crate::{E, I};

fn next_value<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<E, Problem> {
    let token = tokens
        .next()
        .ok_or_else(|| format!("Unexpected end of input while reading {}", what).gloss())?;
    token
        .parse::<E>()
        .map_err(|_| format!("Invalid integer '{}' while reading {}", token, what).gloss())
}

fn next_size<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
    minimum: I,
) -> Result<I, Problem> {
    let value = next_value(tokens, what)?;
    let size = I::try_from(value)
        .map_err(|_| format!("Size {} must be non-negative, got {}", what, value).gloss())?;
    if size < minimum {
        return Err(format!("Size {} must be at least {}, got {}", what, minimum, size).gloss());
    }
    Ok(size)
}

fn read_vector<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    len: I,
    what: &str,
) -> Result<Vector, Problem> {
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        data.push(next_value(tokens, what)?);
    }
    Ok(Vector::from_vec(data))
}

fn read_matrix<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    rows: I,
    cols: I,
    what: &str,
) -> Result<Matrix, Problem> {
    let mut out = Matrix::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            out[(r, c)] = next_value(tokens, what)?;
        }
    }
    Ok(out)
}

/// Parses an instance from `input`, validating sizes and bound ordering.
pub fn read_instance<R: Read>(mut input: R) -> Result<NFold, Problem> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|e| format!("Failed to read input: {}", e).gloss())?;
    let mut tokens = text.split_whitespace();

    let n = next_size(&mut tokens, "n", 1)?;
    let r = next_size(&mut tokens, "r", 0)?;
    let s = next_size(&mut tokens, "s", 1)?;
    let t = next_size(&mut tokens, "t", 1)?;

    let mut x = NFold::new(n, r, s, t);
    x.l = read_vector(&mut tokens, n * t, "l")?;
    x.u = read_vector(&mut tokens, n * t, "u")?;
    x.b = read_vector(&mut tokens, r + n * s, "b")?;
    x.c = read_vector(&mut tokens, n * t, "c")?;
    for i in 0..n {
        x.a_blocks[i] = read_matrix(&mut tokens, r, t, "A")?;
    }
    for i in 0..n {
        x.b_blocks[i] = read_matrix(&mut tokens, s, t, "B")?;
    }

    for j in 0..x.n_vars() {
        if x.l[j] > x.u[j] {
            return Err(format!(
                "Lower bound {} exceeds upper bound {} at variable {}",
                x.l[j], x.u[j], j
            )
            .gloss());
        }
    }

    Ok(x)
}

/// Writes the objective value, a newline, then the solution in reading order.
pub fn write_solution<W: Write>(out: &mut W, solution: &Vector, objective: E) -> io::Result<()> {
    writeln!(out, "{}", objective)?;
    writeln!(out, "{}", solution)
}
