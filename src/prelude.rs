//!
//! A module for importing commonly used items.
//!

pub use crate::scheduler::{
    action, Action, Builder, EventHandle, EventId, RunError, ScheduleError, Scheduler,
    SchedulerState,
};
pub use crate::time::{Duration, SimTime};
