use nfold::ilp::NFold;
use nfold::ilp::augment::AugmentationIp;
use nfold::ilp::solver::NFoldSolver;
use nfold::linalg::{Matrix, Vector};
use nfold::{SolverHooks, SolverState};

fn main() {
    divan::main();
}

/// Shared budget spread over `n` blocks whose local rows force equal pairs.
fn coupled_instance(n: usize) -> NFold {
    let mut x = NFold::new(n, 1, 1, 2);
    x.u = Vector::from_vec(vec![5; 2 * n]);
    x.c = Vector::from_vec((0..2 * n).map(|j| 1 + (j % 2) as i64).collect());
    let mut b = vec![0; 1 + n];
    b[0] = 2 * n as i64;
    x.b = Vector::from_vec(b);
    for i in 0..n {
        x.a_blocks[i] = Matrix::from_rows(vec![vec![1, 1]]);
        x.b_blocks[i] = Matrix::from_rows(vec![vec![1, -1]]);
    }
    x
}

#[divan::bench(args = [2, 4, 8])]
fn solve_coupled(n: usize) {
    let x = coupled_instance(divan::black_box(n));
    let mut state = SolverState::new(Vector::zeros(x.n_vars()));
    let status = NFoldSolver::new(&x).solve(&mut state, &mut SolverHooks::silent());
    divan::black_box((status, state.get_objective()));
}

#[divan::bench(args = [2, 4, 8])]
fn augmentation_step(n: usize) {
    let x = coupled_instance(divan::black_box(n));
    let l = Vector::from_vec(vec![-5; x.n_vars()]);
    let u = Vector::from_vec(vec![5; x.n_vars()]);
    divan::black_box(AugmentationIp::new(&x).solve(&l, &u));
}
