use problemo::Problem;

use crate::callback::{Callbacks, NoOpCallback};
use crate::linalg::Vector;
use crate::terminators::{MultipleTerminators, Terminators};

/// Element type for all instance data: bounds, costs, coefficients, and the
/// objective. The solver is purely integral; there is no floating-point
/// fallback anywhere.
pub type E = i64;
pub type I = usize;

pub mod callback;
pub mod ilp;
pub mod interface;
pub mod linalg;
pub mod terminators;

#[cfg(test)]
pub mod tests;

/// Status codes for optimization solvers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Status {
    #[default]
    /// The solver is still running.
    InProgress,
    /// An optimal solution was found.
    Optimal,
    /// The problem is infeasible.
    Infeasible,
    /// The solver stopped due to a time limit.
    TimeLimit,
    /// The solver stopped due to an iteration limit.
    IterationLimit,
    /// The solver was interrupted (e.g., by user or signal).
    Interrupted,
}

/// Trait for iterative optimization solvers.
///
/// Provides a standard interface for algorithms that proceed by repeated
/// iteration. The iterate lives in the [`SolverState`]; hooks observe each
/// iteration and may stop the run early.
pub trait Solver {
    /// Run the solver until convergence or until a hook fires.
    fn solve(
        &mut self,
        state: &mut SolverState,
        hooks: &mut SolverHooks,
    ) -> Result<Status, Problem>;
}

/// Mutable state threaded through a solve: the incumbent solution, its
/// objective value, the iteration count, and the termination status.
#[derive(Debug, Clone)]
pub struct SolverState {
    status: Status,
    nit: usize,
    z: Vector,
    objective: E,
}

impl SolverState {
    pub fn new(z: Vector) -> Self {
        Self {
            status: Status::InProgress,
            nit: 0,
            z,
            objective: 0,
        }
    }

    pub fn get_status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// The current incumbent. Feasible whenever the status is not
    /// [`Status::Infeasible`] and a solve has run.
    pub fn get_solution(&self) -> &Vector {
        &self.z
    }

    pub fn get_objective(&self) -> E {
        self.objective
    }

    /// Number of augmentation steps performed so far.
    pub fn iterations(&self) -> usize {
        self.nit
    }
}

/// Per-iteration observation and termination hooks consulted by the driver.
pub struct SolverHooks {
    pub callback: Callbacks,
    pub terminator: Terminators,
}

impl SolverHooks {
    /// Hooks that never report and never stop the solver.
    pub fn silent() -> Self {
        Self {
            callback: NoOpCallback.into(),
            terminator: MultipleTerminators::new(Vec::new()).into(),
        }
    }
}
