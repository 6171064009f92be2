use super::Scheduler;

///
/// A unit of work carried by a scheduled event.
///
/// Actions are supplied by simulation model code and consumed opaquely by the
/// [`Scheduler`]: once the event carrying an action becomes due, the scheduler
/// invokes [`execute`](Action::execute) exactly once, on the dispatch thread,
/// and the action runs to completion before the next event is considered.
///
/// The scheduler is passed by reference into `execute`, so an action may
/// schedule follow-up work on the owning scheduler, including at the very
/// time it is itself executing at.
///
/// A panic inside `execute` propagates out of the dispatch loop untouched;
/// the scheduler performs no retry and no rollback.
///
pub trait Action: Send {
    ///
    /// A human readable description of the work item, used for diagnostics
    /// only.
    ///
    fn description(&self) -> String;

    ///
    /// Performs the side effect of this action. Consumes the action, since
    /// an event is dispatched at most once.
    ///
    fn execute(self: Box<Self>, scheduler: &Scheduler);
}

///
/// Creates an [`Action`] from a description and a closure.
///
/// # Examples
///
/// ```
/// use simsched::prelude::*;
///
/// let sched = Scheduler::new();
/// sched.schedule(
///     action("ping", |s: &Scheduler| println!("ping at {}", s.current_time())),
///     Duration::from_secs(2),
/// ).unwrap();
/// ```
///
pub fn action<F>(description: impl Into<String>, effect: F) -> impl Action
where
    F: FnOnce(&Scheduler) + Send,
{
    FnAction {
        description: description.into(),
        effect,
    }
}

struct FnAction<F> {
    description: String,
    effect: F,
}

impl<F> Action for FnAction<F>
where
    F: FnOnce(&Scheduler) + Send,
{
    fn description(&self) -> String {
        self.description.clone()
    }

    fn execute(self: Box<Self>, scheduler: &Scheduler) {
        (self.effect)(scheduler);
    }
}
