use simsched::prelude::*;

#[test]
fn run_without_events_is_out_of_events_immediately() {
    let sched = Scheduler::new();
    assert_eq!(sched.state(), SchedulerState::Seeded);

    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(sched.state(), SchedulerState::Exhausted);
    assert_eq!(sched.current_time(), SimTime::ZERO);
    assert_eq!(sched.num_events_dispatched(), 0);
}

#[test]
fn exhaustion_is_terminal() {
    let sched = Scheduler::new();
    sched
        .schedule(action("only", |_: &Scheduler| {}), Duration::from_secs(1))
        .unwrap();

    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(sched.num_events_dispatched(), 1);
    assert_eq!(sched.state(), SchedulerState::Exhausted);

    // Further steps keep failing without dispatching anything.
    assert_eq!(sched.step(), Err(RunError::OutOfEvents));
    assert_eq!(sched.num_events_dispatched(), 1);
    assert_eq!(sched.current_time(), SimTime::from(1.0));
}

#[test]
fn scheduling_after_exhaustion_is_inert() {
    let sched = Scheduler::new();
    assert_eq!(sched.run(), RunError::OutOfEvents);

    sched
        .schedule(
            action("late", |_: &Scheduler| panic!("must never be dispatched")),
            Duration::ZERO,
        )
        .unwrap();
    assert_eq!(sched.state(), SchedulerState::Exhausted);
    assert_eq!(sched.num_events_pending(), 1);

    assert_eq!(sched.step(), Err(RunError::OutOfEvents));
    assert_eq!(sched.num_events_pending(), 1);
    assert_eq!(sched.num_events_dispatched(), 0);
}

#[test]
fn state_machine_walkthrough() {
    let sched = Scheduler::new();
    assert_eq!(sched.state(), SchedulerState::Seeded);

    sched
        .schedule(action("a", |_: &Scheduler| {}), Duration::from_secs(1))
        .unwrap();
    sched
        .schedule(action("b", |_: &Scheduler| {}), Duration::from_secs(2))
        .unwrap();
    // Scheduling alone does not start the run.
    assert_eq!(sched.state(), SchedulerState::Seeded);

    sched.step().unwrap();
    assert_eq!(sched.state(), SchedulerState::Running);
    sched.step().unwrap();
    assert_eq!(sched.state(), SchedulerState::Running);

    assert_eq!(sched.step(), Err(RunError::OutOfEvents));
    assert_eq!(sched.state(), SchedulerState::Exhausted);
}

#[test]
fn start_time_offsets_the_seed() {
    let sched = Builder::seeded(1).start_time(SimTime::from(10.0)).build();
    assert_eq!(sched.current_time(), SimTime::from(10.0));
    assert_eq!(sched.last_reset(), SimTime::from(10.0));

    let handle = sched
        .schedule(action("later", |_: &Scheduler| {}), Duration::from_secs(12))
        .unwrap();
    assert_eq!(handle.due(), SimTime::from(22.0));

    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(sched.current_time(), SimTime::from(22.0));
}

#[test]
fn invalid_delays_are_rejected_at_the_call_site() {
    let sched = Scheduler::new();

    for secs in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            sched
                .schedule_in_secs(action("rejected", |_: &Scheduler| {}), secs)
                .unwrap_err(),
            ScheduleError::InvalidDelay
        );
    }

    // Rejected events are never enqueued.
    assert_eq!(sched.num_events_pending(), 0);
    assert_eq!(sched.num_events_scheduled(), 0);

    // A valid f64 delay passes through.
    let handle = sched
        .schedule_in_secs(action("accepted", |_: &Scheduler| {}), 1.5)
        .unwrap();
    assert_eq!(handle.due(), SimTime::from(1.5));
}

#[test]
fn due_time_overflow_is_rejected() {
    let sched = Builder::seeded(1).start_time(SimTime::MAX).build();
    assert_eq!(
        sched
            .schedule(action("beyond", |_: &Scheduler| {}), Duration::from_secs(1))
            .unwrap_err(),
        ScheduleError::DueOverflow
    );
    assert_eq!(sched.num_events_pending(), 0);
}

#[test]
fn statistics_reset_stamps_the_current_time() {
    let sched = Scheduler::new();
    assert_eq!(sched.last_reset(), SimTime::ZERO);

    for delay in [1, 2, 3] {
        sched
            .schedule(action("noop", |_: &Scheduler| {}), Duration::from_secs(delay))
            .unwrap();
    }
    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(sched.num_events_scheduled(), 3);
    assert_eq!(sched.num_events_dispatched(), 3);

    sched.reset_statistics();
    assert_eq!(sched.num_events_scheduled(), 0);
    assert_eq!(sched.num_events_dispatched(), 0);
    assert_eq!(sched.last_reset(), SimTime::from(3.0));
}

#[test]
fn independent_schedulers_coexist() {
    let a = Builder::seeded(1).build();
    let b = Builder::seeded(2).start_time(SimTime::from(100.0)).build();

    a.schedule(action("a", |_: &Scheduler| {}), Duration::from_secs(1))
        .unwrap();
    assert_eq!(a.run(), RunError::OutOfEvents);

    // Running one scheduler leaves the other untouched.
    assert_eq!(a.current_time(), SimTime::from(1.0));
    assert_eq!(b.current_time(), SimTime::from(100.0));
    assert_eq!(b.state(), SchedulerState::Seeded);
}
