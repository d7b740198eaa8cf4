use problemo::Problem;

use crate::callback::Callback;
use crate::ilp::augment::AugmentationIp;
use crate::ilp::{NFold, phase1};
use crate::linalg::Vector;
use crate::terminators::Terminator;
use crate::{E, Solver, SolverHooks, SolverState, Status};

/// Fixed-point augmentation driver for an [`NFold`] instance.
///
/// Each iteration solves the augmentation IP over the residual bounds
/// `[l − z, u − z]`. Its result `y` satisfies `A·y = 0`, so `z + y` stays
/// feasible; the incumbent is replaced whenever that strictly improves the
/// objective. The bound box is finite and the objective integral, so the
/// loop reaches its fixed point after finitely many strict improvements.
pub struct NFoldSolver<'a> {
    x: &'a NFold,
    aug: AugmentationIp<'a>,
    known_best: Option<E>,
}

impl<'a> NFoldSolver<'a> {
    pub fn new(x: &'a NFold) -> Self {
        Self {
            x,
            aug: AugmentationIp::new(x),
            known_best: None,
        }
    }

    /// Stop as soon as the incumbent reaches `weight`.
    ///
    /// Used when only the existence of a solution of that value matters, as
    /// in the feasibility phase, where the auxiliary optimum is known to be
    /// zero whenever the original instance is feasible.
    pub fn with_known_best(mut self, weight: E) -> Self {
        self.known_best = Some(weight);
        self
    }

    /// Decides feasibility and, if feasible, maximizes.
    ///
    /// The incoming iterate in `state` is ignored: phase one fabricates an
    /// auxiliary instance whose trivial solution either proves the original
    /// infeasible or projects to a feasible starting point for phase two.
    /// On return `state` holds the final status, and on success the optimal
    /// solution and objective.
    pub fn solve(&mut self, state: &mut SolverState, hooks: &mut SolverHooks) -> Status {
        let (aux, start) = phase1::auxiliary(self.x);
        let mut aux_state = SolverState::new(start);
        let status = NFoldSolver::new(&aux)
            .with_known_best(0)
            .augment(&mut aux_state, hooks);

        if aux_state.objective != 0 {
            // Stopped short of zero: either a proof of infeasibility or an
            // early termination before the question was settled.
            state.status = match status {
                Status::Optimal => Status::Infeasible,
                other => other,
            };
            return state.status;
        }

        let z = phase1::project(self.x, aux_state.get_solution());
        debug_assert_eq!(self.x.apply(&z), self.x.b);

        state.z = z;
        state.nit = 0;
        self.augment(state, hooks)
    }

    /// Runs the augmentation loop from the feasible incumbent in `state`
    /// until no strictly improving step exists or a hook fires.
    pub fn augment(&mut self, state: &mut SolverState, hooks: &mut SolverHooks) -> Status {
        debug_assert_eq!(self.x.apply(&state.z), self.x.b);

        state.status = Status::InProgress;
        state.objective = state.z.dot(&self.x.c);
        hooks.callback.init(state);
        hooks.terminator.initialize();

        loop {
            state.nit += 1;

            let Some(candidate) = self.step(&state.z) else {
                break;
            };
            debug_assert_eq!(self.x.apply(&candidate), self.x.b);

            let weight = candidate.dot(&self.x.c);
            debug_assert!(weight > state.objective);
            state.z = candidate;
            state.objective = weight;
            hooks.callback.call(state);

            if self.known_best == Some(weight) {
                break;
            }
            if let Some(status) = hooks.terminator.terminate(state) {
                state.status = status;
                return status;
            }
        }

        state.status = Status::Optimal;
        state.status
    }

    /// One augmentation step: the best zero-sum direction inside
    /// `[l − z, u − z]`, applied to `z`. Returns `None` at a fixed point.
    #[cfg(not(feature = "scaling"))]
    fn step(&mut self, z: &Vector) -> Option<Vector> {
        let l = &self.x.l - z;
        let u = &self.x.u - z;

        let y = self.aug.solve(&l, &u)?;
        debug_assert!(self.x.apply(&y).is_zero());

        let candidate = z + &y;
        (candidate.dot(&self.x.c) > z.dot(&self.x.c)).then_some(candidate)
    }

    /// One augmentation step under bit-scaled step lengths.
    ///
    /// Sweeps `λ = 2^i` downwards and returns the first `z + λ·y` that
    /// strictly improves; `λ = 1` is always tried last, so a fixed point
    /// here is a fixed point of the plain search as well. When the
    /// elementary bound fits the element type, the per-coordinate bounds
    /// are clamped to it.
    #[cfg(feature = "scaling")]
    fn step(&mut self, z: &Vector) -> Option<Vector> {
        use crate::ilp::augment::elementary_bound;
        use crate::linalg::ops::{div_ceil, div_floor};

        let clamp = elementary_bound(self.x).ok();
        let gamma = (&self.x.u - &self.x.l).norm_inf().max(1);
        let max_bit = 64 - (gamma as u64).leading_zeros();
        let objective = z.dot(&self.x.c);

        for bit in (0..max_bit).rev() {
            let lambda = 1 << bit;

            let mut l = Vec::with_capacity(z.len());
            let mut u = Vec::with_capacity(z.len());
            for j in 0..z.len() {
                let mut low = div_ceil(self.x.l[j] - z[j], lambda);
                let mut high = div_floor(self.x.u[j] - z[j], lambda);
                if let Some(bound) = clamp {
                    low = low.max(-bound);
                    high = high.min(bound);
                }
                l.push(low);
                u.push(high);
            }

            let Some(y) = self.aug.solve(&Vector::from_vec(l), &Vector::from_vec(u)) else {
                continue;
            };
            debug_assert!(self.x.apply(&y).is_zero());

            let candidate = z + &y.scaled(lambda);
            if candidate.dot(&self.x.c) > objective {
                return Some(candidate);
            }
        }

        None
    }
}

impl Solver for NFoldSolver<'_> {
    /// The full two-phase pipeline behind the common solver interface.
    fn solve(
        &mut self,
        state: &mut SolverState,
        hooks: &mut SolverHooks,
    ) -> Result<Status, Problem> {
        Ok(NFoldSolver::solve(self, state, hooks))
    }
}
