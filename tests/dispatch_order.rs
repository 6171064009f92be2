use simsched::prelude::*;
use std::sync::{Arc, Mutex};

type Log<T> = Arc<Mutex<Vec<T>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn recorder<T: Send + 'static>(log: &Log<T>, value: T) -> impl Action {
    let log = Arc::clone(log);
    action("record", move |_: &Scheduler| {
        log.lock().unwrap().push(value);
    })
}

fn time_recorder(log: &Log<SimTime>) -> impl Action {
    let log = Arc::clone(log);
    action("record time", move |s: &Scheduler| {
        log.lock().unwrap().push(s.current_time());
    })
}

#[test]
fn priorities_break_ties_at_equal_due() {
    init_tracing();

    let sched = Scheduler::new();
    let log: Log<i32> = Arc::default();

    for priority in [5, 1, 10] {
        sched
            .schedule_in_secs_with_priority(recorder(&log, priority), 0.0, priority)
            .unwrap();
    }

    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(*log.lock().unwrap(), vec![10, 5, 1]);
    // All three events were due at the seed time, so the clock never moved.
    assert_eq!(sched.current_time(), SimTime::ZERO);
}

#[test]
fn due_times_order_the_dispatch() {
    init_tracing();

    let sched = Scheduler::new();
    let log: Log<SimTime> = Arc::default();

    for delay in [5, 1, 3] {
        sched
            .schedule(time_recorder(&log), Duration::from_secs(delay))
            .unwrap();
    }

    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(
        *log.lock().unwrap(),
        vec![SimTime::from(1.0), SimTime::from(3.0), SimTime::from(5.0)]
    );
    assert_eq!(sched.current_time(), SimTime::from(5.0));
}

#[test]
fn creation_order_breaks_full_ties() {
    init_tracing();

    let sched = Scheduler::new();
    let log: Log<&'static str> = Arc::default();

    sched
        .schedule_with_priority(recorder(&log, "first"), Duration::from_secs(1), 7)
        .unwrap();
    sched
        .schedule_with_priority(recorder(&log, "second"), Duration::from_secs(1), 7)
        .unwrap();

    assert_eq!(sched.run(), RunError::OutOfEvents);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn dispatch_sequence_is_totally_ordered() {
    init_tracing();

    const N: usize = 256;

    let sched = Builder::seeded(123).build();
    let log: Log<(SimTime, i32, usize)> = Arc::default();

    for k in 0..N {
        // Coarse delays and few priority levels force plenty of ties.
        let delay = Duration::from_secs(u64::from(sched.random::<u8>() % 8));
        let priority = i32::from(sched.random::<u8>() % 3);

        let log = Arc::clone(&log);
        sched
            .schedule_with_priority(
                action(format!("event {k}"), move |s: &Scheduler| {
                    log.lock().unwrap().push((s.current_time(), priority, k));
                }),
                delay,
                priority,
            )
            .unwrap();
    }

    assert_eq!(sched.run(), RunError::OutOfEvents);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), N);
    for pair in log.windows(2) {
        let (t0, p0, k0) = pair[0];
        let (t1, p1, k1) = pair[1];

        assert!(t0 <= t1, "dispatch times must be non-decreasing");
        if t0 == t1 {
            assert!(p0 >= p1, "priorities must be non-increasing at equal due");
            if p0 == p1 {
                assert!(k0 < k1, "creation order must break full ties");
            }
        }
    }
}

#[test]
fn current_time_never_decreases() {
    init_tracing();

    let sched = Builder::seeded(7).build();
    for _ in 0..64 {
        let delay = Duration::from_millis(u64::from(sched.random::<u16>() % 500));
        sched
            .schedule(action("noop", |_: &Scheduler| {}), delay)
            .unwrap();
    }

    loop {
        let before = sched.current_time();
        match sched.step() {
            Ok(_) => assert!(sched.current_time() >= before),
            Err(RunError::OutOfEvents) => break,
        }
    }
    assert_eq!(sched.num_events_dispatched(), 64);
}

#[test]
fn identical_runs_produce_identical_sequences() {
    init_tracing();

    fn run_once() -> Vec<(SimTime, usize)> {
        let sched = Builder::seeded(999).build();
        let log: Log<(SimTime, usize)> = Arc::default();

        for k in 0..64 {
            let delay = Duration::from_millis(u64::from(sched.random::<u16>()));
            let log = Arc::clone(&log);
            sched
                .schedule(
                    action(format!("event {k}"), move |s: &Scheduler| {
                        log.lock().unwrap().push((s.current_time(), k));
                    }),
                    delay,
                )
                .unwrap();
        }

        assert_eq!(sched.run(), RunError::OutOfEvents);
        let log = log.lock().unwrap();
        log.clone()
    }

    assert_eq!(run_once(), run_once());
}
