//! Terminators for controlling and interrupting long-running solves.
//!
//! This module provides several implementations of the [`Terminator`] trait:
//! - [`InterruptTerminator`]: Responds to Ctrl-C (SIGINT) or programmatic interrupts.
//! - [`TimeOutTerminator`]: Terminates after a specified time limit.
//! - [`IterationLimitTerminator`]: Terminates after a fixed number of augmentation steps.
//! - [`MultipleTerminators`]: Combines multiple terminators.
//!
//! # Note
//! [`InterruptTerminator`] installs a global signal handler and **can only be
//! constructed once** per process. Attempting to create multiple instances
//! will result in a panic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use enum_dispatch::enum_dispatch;

use crate::{SolverState, Status};

#[enum_dispatch]
pub trait Terminator {
    fn initialize(&mut self) {}

    /// Consulted once per iteration; a `Some` stops the solver with that
    /// status and the current incumbent preserved.
    fn terminate(&mut self, state: &SolverState) -> Option<Status>;
}

/// Terminator that responds to Ctrl-C (SIGINT) or programmatic interrupts.
///
/// # Note
/// Only one instance of `InterruptTerminator` can be constructed per process,
/// as it installs a global signal handler. Creating more than one will panic.
pub struct InterruptTerminator {
    interrupted: Arc<AtomicBool>,
}

impl InterruptTerminator {
    pub fn new() -> Self {
        let interrupted = Arc::new(AtomicBool::new(false));
        ctrlc::set_handler({
            let interrupted_clone = interrupted.clone();
            move || {
                interrupted_clone.store(true, Ordering::SeqCst);
            }
        })
        .expect("Error setting Ctrl-C handler");
        Self { interrupted }
    }

    pub fn interrupt(&mut self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}

impl Terminator for InterruptTerminator {
    fn terminate(&mut self, _state: &SolverState) -> Option<Status> {
        if self.interrupted.load(Ordering::SeqCst) {
            Some(Status::Interrupted)
        } else {
            None
        }
    }
}

/// Terminator that triggers after a specified number of seconds.
pub struct TimeOutTerminator {
    max_time_secs: u64,
    start_time: Instant,
}

impl TimeOutTerminator {
    pub fn new(max_time_secs: u64) -> Self {
        Self {
            max_time_secs,
            start_time: Instant::now(),
        }
    }
}

impl Terminator for TimeOutTerminator {
    fn initialize(&mut self) {
        self.start_time = Instant::now();
    }

    fn terminate(&mut self, _state: &SolverState) -> Option<Status> {
        if self.start_time.elapsed().as_secs() >= self.max_time_secs {
            Some(Status::TimeLimit)
        } else {
            None
        }
    }
}

/// Terminator that triggers after a fixed number of augmentation steps.
pub struct IterationLimitTerminator {
    max_iterations: usize,
}

impl IterationLimitTerminator {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Terminator for IterationLimitTerminator {
    fn terminate(&mut self, state: &SolverState) -> Option<Status> {
        if state.iterations() >= self.max_iterations {
            Some(Status::IterationLimit)
        } else {
            None
        }
    }
}

/// Terminator that combines multiple terminators and triggers if any of them do.
pub struct MultipleTerminators {
    terminators: Vec<Terminators>,
}

impl MultipleTerminators {
    pub fn new(terminators: Vec<Terminators>) -> Self {
        Self { terminators }
    }
}

impl Terminator for MultipleTerminators {
    fn initialize(&mut self) {
        for terminator in &mut self.terminators {
            terminator.initialize();
        }
    }

    fn terminate(&mut self, state: &SolverState) -> Option<Status> {
        for terminator in &mut self.terminators {
            if let Some(status) = terminator.terminate(state) {
                return Some(status);
            }
        }
        None
    }
}

/// Available terminators, dispatched without boxing.
#[enum_dispatch(Terminator)]
pub enum Terminators {
    Interrupt(InterruptTerminator),
    TimeOut(TimeOutTerminator),
    IterationLimit(IterationLimitTerminator),
    Multiple(MultipleTerminators),
}
