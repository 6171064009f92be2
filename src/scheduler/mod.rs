//!
//! Central primitives for driving a discrete event simulation.
//!

use crate::time::{Duration, SimTime};
use rand::{
    distributions::{Distribution, Standard},
    Rng, RngCore,
};
use std::collections::BinaryHeap;
use std::fmt::{Debug, Display};
use std::sync::{Mutex, MutexGuard, PoisonError};

mod action;
pub use self::action::*;

mod builder;
pub use self::builder::*;

mod error;
pub use self::error::*;

mod event;
pub use self::event::{EventHandle, EventId};
use self::event::EventNode;

mod sequencer;
use self::sequencer::Sequencer;

///
/// The observable lifecycle of a [`Scheduler`].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed, nothing dispatched yet; the clock reads the seed time.
    Seeded,
    /// Inside the dispatch loop; at least one event has been dispatched.
    Running,
    /// Terminal: the pending set ran dry while draining.
    Exhausted,
}

/// Where "now" comes from.
///
/// Before the first dispatch the clock reads the seed time; no action is
/// attached to that state, so there is nothing that could ever execute at
/// seed. Afterwards the most recently extracted event defines the clock.
#[derive(Debug, Clone, Copy)]
enum Current {
    Seeded { at: SimTime },
    Dispatching { id: EventId, due: SimTime },
}

impl Current {
    fn time(&self) -> SimTime {
        match *self {
            Current::Seeded { at } => at,
            Current::Dispatching { due, .. } => due,
        }
    }
}

/// State guarded by the scheduler's single lock. Creation-number assignment,
/// insertion and extraction all happen under this lock, so a partially
/// applied insert is never observable.
struct Inner {
    pending: BinaryHeap<EventNode>,
    current: Current,
    exhausted: bool,

    // Bookkeeping, not scheduling-relevant.
    scheduled: u64,
    dispatched: u64,
    reset_at: SimTime,
}

///
/// The central management point of a discrete event simulation: owns the
/// pending event set, the simulated clock and the dispatch loop.
///
/// # Usage
///
/// Model code hands units of work to the scheduler via
/// [`schedule`](Scheduler::schedule); a driver then calls
/// [`run`](Scheduler::run), which repeatedly extracts the minimum-ordered
/// pending event, advances the clock to its due time and executes its
/// [`Action`]. Events are dispatched by ascending due time; ties are broken
/// by descending priority, then by creation order.
///
/// ```
/// use simsched::prelude::*;
///
/// let sched = Scheduler::new();
///
/// sched.schedule(
///     action("first", |s: &Scheduler| {
///         // Re-entrant scheduling: runs 2s after this event.
///         s.schedule(action("second", |_: &Scheduler| {}), Duration::from_secs(2))
///             .unwrap();
///     }),
///     Duration::from_secs(1),
/// ).unwrap();
///
/// assert_eq!(sched.run(), RunError::OutOfEvents);
/// assert_eq!(sched.current_time(), SimTime::from(3.0));
/// assert_eq!(sched.num_events_dispatched(), 2);
/// ```
///
/// # Threading
///
/// The dispatch loop itself is single-threaded and non-preemptive: one action
/// runs to completion before the next event is considered. `schedule` however
/// may be called from any thread at any time, typically through an
/// `Arc<Scheduler>` shared with producer threads, and also from inside a
/// currently executing action. All queue mutations are serialized behind one
/// lock, which is never held while an action executes.
///
pub struct Scheduler {
    inner: Mutex<Inner>,
    seq: Sequencer,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Scheduler {
    ///
    /// Creates a scheduler seeded at [`SimTime::ZERO`] with an entropy-seeded
    /// RNG. Use the [`Builder`] for reproducible or offset runs.
    ///
    #[must_use]
    pub fn new() -> Scheduler {
        Builder::new().build()
    }

    pub(crate) fn from_builder(builder: Builder) -> Scheduler {
        Scheduler {
            inner: Mutex::new(Inner {
                pending: BinaryHeap::with_capacity(64),
                current: Current::Seeded {
                    at: builder.start_time,
                },
                exhausted: false,

                scheduled: 0,
                dispatched: 0,
                reset_at: builder.start_time,
            }),
            seq: Sequencer::new(),
            rng: Mutex::new(builder.rng),
        }
    }

    // The queue lock is only ever held across short internal sections and
    // never while an action executes, so a poisoned lock still guards a
    // consistent pending set.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    ///
    /// Schedules `action` to execute `delay` after the current simulation
    /// time, with priority 0. See
    /// [`schedule_with_priority`](Scheduler::schedule_with_priority).
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the due time is not representable.
    ///
    pub fn schedule<A>(&self, action: A, delay: Duration) -> Result<EventHandle, ScheduleError>
    where
        A: Action + 'static,
    {
        self.schedule_with_priority(action, delay, 0)
    }

    ///
    /// Schedules `action` to execute `delay` after the current simulation
    /// time. Among events due at the same time, higher `priority` dispatches
    /// earlier; equal priorities dispatch in creation order.
    ///
    /// Safe to call from any thread while the dispatch loop is running, and
    /// from inside a currently executing action. The returned
    /// [`EventHandle`] identifies the event for diagnostics; scheduled
    /// events cannot be cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DueOverflow`] if `current_time + delay`
    /// exceeds the representable time domain. A rejected event is never
    /// enqueued.
    ///
    pub fn schedule_with_priority<A>(
        &self,
        action: A,
        delay: Duration,
        priority: i32,
    ) -> Result<EventHandle, ScheduleError>
    where
        A: Action + 'static,
    {
        let action: Box<dyn Action> = Box::new(action);

        let handle = {
            let mut inner = self.lock();
            let due = inner
                .current
                .time()
                .checked_add(delay)
                .ok_or(ScheduleError::DueOverflow)?;

            let node = EventNode {
                due,
                priority,
                id: EventId(self.seq.next()),
                action,
            };
            let handle = node.handle();

            inner.pending.push(node);
            inner.scheduled += 1;
            handle
        };

        tracing::trace!(event = %handle, "scheduled");
        Ok(handle)
    }

    ///
    /// Schedules `action` with a delay given in seconds, with priority 0.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDelay`] if `secs` is negative,
    /// non-finite or too large for the time domain, and
    /// [`ScheduleError::DueOverflow`] if the resulting due time is not
    /// representable.
    ///
    pub fn schedule_in_secs<A>(&self, action: A, secs: f64) -> Result<EventHandle, ScheduleError>
    where
        A: Action + 'static,
    {
        self.schedule_in_secs_with_priority(action, secs, 0)
    }

    ///
    /// Schedules `action` with a delay given in seconds and an explicit
    /// priority. See [`schedule_in_secs`](Scheduler::schedule_in_secs).
    ///
    /// # Errors
    ///
    /// See [`schedule_in_secs`](Scheduler::schedule_in_secs).
    ///
    pub fn schedule_in_secs_with_priority<A>(
        &self,
        action: A,
        secs: f64,
        priority: i32,
    ) -> Result<EventHandle, ScheduleError>
    where
        A: Action + 'static,
    {
        let delay = Duration::try_from_secs_f64(secs).map_err(|_| ScheduleError::InvalidDelay)?;
        self.schedule_with_priority(action, delay, priority)
    }

    ///
    /// Returns the current simulation time: the due time of the most recently
    /// dispatched event, or the seed time before the first dispatch.
    ///
    #[must_use]
    pub fn current_time(&self) -> SimTime {
        self.lock().current.time()
    }

    ///
    /// Returns the id of the event currently (or most recently) dispatched,
    /// or `None` before the first dispatch.
    ///
    #[must_use]
    pub fn current_event(&self) -> Option<EventId> {
        match self.lock().current {
            Current::Seeded { .. } => None,
            Current::Dispatching { id, .. } => Some(id),
        }
    }

    ///
    /// Returns the simulation time at which statistics were last reset.
    ///
    #[must_use]
    pub fn last_reset(&self) -> SimTime {
        self.lock().reset_at
    }

    ///
    /// Returns the lifecycle state of this scheduler.
    ///
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        let inner = self.lock();
        if inner.exhausted {
            SchedulerState::Exhausted
        } else {
            match inner.current {
                Current::Seeded { .. } => SchedulerState::Seeded,
                Current::Dispatching { .. } => SchedulerState::Running,
            }
        }
    }

    ///
    /// Returns the number of events that were scheduled on this scheduler
    /// since the last statistics reset.
    ///
    #[must_use]
    pub fn num_events_scheduled(&self) -> u64 {
        self.lock().scheduled
    }

    ///
    /// Returns the number of events that were dispatched on this scheduler
    /// since the last statistics reset.
    ///
    #[must_use]
    pub fn num_events_dispatched(&self) -> u64 {
        self.lock().dispatched
    }

    ///
    /// Returns the number of events currently pending.
    ///
    #[must_use]
    pub fn num_events_pending(&self) -> usize {
        self.lock().pending.len()
    }

    ///
    /// Resets the statistics counters and stamps the reset with the current
    /// simulation time. Pending events and the clock are unaffected.
    ///
    pub fn reset_statistics(&self) {
        let mut inner = self.lock();
        inner.reset_at = inner.current.time();
        inner.scheduled = 0;
        inner.dispatched = 0;
    }

    ///
    /// Dispatches the next pending event: extracts the minimum-ordered event,
    /// advances the clock to its due time and executes its action. This is
    /// the only point at which simulation time changes.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::OutOfEvents`] if the pending set is empty. The
    /// scheduler is exhausted from then on; further calls keep returning the
    /// error without dispatching anything.
    ///
    pub fn step(&self) -> Result<EventId, RunError> {
        let node = {
            let mut inner = self.lock();
            if inner.exhausted {
                return Err(RunError::OutOfEvents);
            }
            let Some(node) = inner.pending.pop() else {
                inner.exhausted = true;
                return Err(RunError::OutOfEvents);
            };

            inner.current = Current::Dispatching {
                id: node.id,
                due: node.due,
            };
            inner.dispatched += 1;
            node
        };

        let EventNode { id, due, action, .. } = node;
        tracing::trace!(event = %id, time = %due, "dispatching");

        // The lock is released: the action may re-enter `schedule`, and
        // producer threads may insert concurrently.
        action.execute(self);

        Ok(id)
    }

    ///
    /// Drains the pending event set, dispatching one event per iteration in
    /// the order described on [`schedule_with_priority`](Scheduler::schedule_with_priority).
    ///
    /// The loop never completes normally. It ends when the pending set runs
    /// dry, and hands the terminal [`RunError`] back as a value; deciding
    /// whether that is a model bug or an acceptable end is up to the driver.
    ///
    pub fn run(&self) -> RunError {
        tracing::info!(time = %self.current_time(), "simulation starting");

        loop {
            if let Err(err) = self.step() {
                tracing::warn!(
                    time = %self.current_time(),
                    dispatched = self.num_events_dispatched(),
                    "simulation ended: {err}"
                );
                return err;
            }
        }
    }

    ///
    /// Generates a random instance of type T with a Standard distribution,
    /// using the RNG bound to this scheduler.
    ///
    #[must_use]
    pub fn random<T>(&self) -> T
    where
        Standard: Distribution<T>,
    {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen()
    }

    ///
    /// Generates a random instance of type T with a distribution of type D,
    /// using the RNG bound to this scheduler.
    ///
    pub fn sample<T, D>(&self, distr: D) -> T
    where
        D: Distribution<T>,
    {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.sample(distr)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}

impl Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        write!(
            f,
            "Scheduler {{ time: {} dispatched: {} enqueued: {} }}",
            inner.current.time(),
            inner.dispatched,
            inner.pending.len()
        )
    }
}

impl Display for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
