#![allow(clippy::needless_doctest_main)]
//!
//! The temporal core of a discrete event simulation.
//!
//! This crate provides a [`Scheduler`](crate::scheduler::Scheduler) that advances
//! a simulated clock by repeatedly extracting and executing the next due unit of
//! work from a pending event set. Events may be created up front, from inside a
//! currently executing action, or from other threads while the dispatch loop is
//! draining the queue. In all cases the dispatch order is a strict total order:
//! events are executed by ascending due time, ties are broken by descending
//! priority, and remaining ties by creation order.
//!
//! # Building a simple event simulation
//!
//! Actions implement the [`Action`](crate::scheduler::Action) trait, or are built
//! from closures via [`action`](crate::scheduler::action). Scheduling an action
//! places it in the pending set at `current_time + delay`; running the scheduler
//! drains the set until it is empty.
//!
//! ```
//! use simsched::prelude::*;
//!
//! let sched = Scheduler::new();
//!
//! sched.schedule(
//!     action("say hello", |s: &Scheduler| {
//!         println!("hello at t = {}", s.current_time());
//!     }),
//!     Duration::from_secs(1),
//! ).unwrap();
//!
//! // The pending set runs dry after the one event, which ends the run.
//! assert_eq!(sched.run(), RunError::OutOfEvents);
//! assert_eq!(sched.current_time(), SimTime::from(1.0));
//! ```
//!
//! The run loop never completes normally: a simulation either schedules new
//! work forever, or the pending set empties and [`run`](crate::scheduler::Scheduler::run)
//! returns [`RunError::OutOfEvents`](crate::scheduler::RunError) to the driver.
//! Tearing the simulation down before that point is the driver's decision,
//! made outside of this crate.
//!
//! # Reproducibility
//!
//! Each scheduler owns its own seedable RNG (see
//! [`Builder::seeded`](crate::scheduler::Builder::seeded)), so two runs with the
//! same seed and the same model produce identical event orders and identical
//! random draws. There is no process-global state: independent schedulers can
//! coexist in one process, e.g. in parallel test cases.
//!

pub mod prelude;

pub mod scheduler;
pub mod time;
