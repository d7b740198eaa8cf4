use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use nfold::callback::NoOpCallback;
use nfold::ilp::solver::NFoldSolver;
use nfold::interface::text;
use nfold::linalg::Vector;
use nfold::terminators::InterruptTerminator;
use nfold::{SolverHooks, SolverState, Status};

fn main() -> ExitCode {
    let x = match text::read_instance(io::stdin().lock()) {
        Ok(x) => x,
        Err(problem) => {
            eprintln!("Invalid input: {:?}", problem);
            return ExitCode::FAILURE;
        }
    };

    let mut state = SolverState::new(Vector::zeros(x.n_vars()));
    let mut hooks = SolverHooks {
        callback: NoOpCallback.into(),
        terminator: InterruptTerminator::new().into(),
    };

    match NFoldSolver::new(&x).solve(&mut state, &mut hooks) {
        Status::Optimal => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            if text::write_solution(&mut out, state.get_solution(), state.get_objective())
                .and_then(|_| out.flush())
                .is_err()
            {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Status::Infeasible => {
            println!("No solution exists");
            ExitCode::FAILURE
        }
        status => {
            eprintln!("Search stopped early: {:?}", status);
            ExitCode::FAILURE
        }
    }
}
