use enum_dispatch::enum_dispatch;

use crate::SolverState;

/// Hook invoked once per solver iteration for logging or monitoring.
#[enum_dispatch]
pub trait Callback {
    /// Called once before the first iteration.
    fn init(&mut self, _state: &SolverState) {}

    /// Called after each improving iteration with the current solver state.
    fn call(&mut self, state: &SolverState);
}

/// A callback that does nothing. Use when no per-iteration output is needed.
#[derive(Debug, Default)]
pub struct NoOpCallback;

impl Callback for NoOpCallback {
    fn call(&mut self, _state: &SolverState) {
        // Do nothing
    }
}

/// Prints each new incumbent objective to stderr, keeping stdout free for
/// the result itself.
#[derive(Debug, Default)]
pub struct ProgressOutput;

impl Callback for ProgressOutput {
    fn init(&mut self, _state: &SolverState) {
        eprintln!("| {:>6} | {:>20} |", "iter", "objective");
    }

    fn call(&mut self, state: &SolverState) {
        eprintln!(
            "| {:>6} | {:>20} |",
            state.iterations(),
            state.get_objective()
        );
    }
}

/// Available callbacks, dispatched without boxing.
#[enum_dispatch(Callback)]
pub enum Callbacks {
    NoOp(NoOpCallback),
    Progress(ProgressOutput),
}
