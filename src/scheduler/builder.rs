use std::fmt::Debug;

use rand::{
    rngs::{OsRng, StdRng},
    RngCore, SeedableRng,
};

use super::Scheduler;
use crate::time::SimTime;

/// A builder for a scheduler instance.
///
/// Schedulers are independently lifetimed: any number of them may coexist in
/// one process, each with its own clock, pending set and RNG.
#[must_use]
pub struct Builder {
    pub(super) start_time: SimTime,
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl Builder {
    /// Creates a new unconfigured builder.
    ///
    /// # Panics
    ///
    /// Panics if no RNG can be built.
    pub fn new() -> Builder {
        Builder {
            start_time: SimTime::ZERO,
            rng: Box::new(StdRng::from_rng(OsRng).expect("Failed to create RNG")),
        }
    }

    /// Creates a `Builder` with a static seeded RNG.
    ///
    /// Two schedulers built from the same seed, driving the same model,
    /// produce identical runs.
    pub fn seeded(seed: u64) -> Builder {
        Builder {
            start_time: SimTime::ZERO,
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    ///
    /// Sets the simulation time the scheduler is seeded at, i.e. the value of
    /// [`current_time`](Scheduler::current_time) before the first dispatch.
    ///
    pub fn start_time(mut self, time: SimTime) -> Self {
        self.start_time = time;
        self
    }

    ///
    /// Builds a new [`Scheduler`] instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use simsched::prelude::*;
    ///
    /// let sched = Builder::seeded(1)
    ///     .start_time(SimTime::from(10.0))
    ///     .build();
    /// assert_eq!(sched.current_time(), SimTime::from(10.0));
    /// ```
    #[must_use]
    pub fn build(self) -> Scheduler {
        Scheduler::from_builder(self)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder").finish()
    }
}
