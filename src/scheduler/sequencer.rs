use std::sync::atomic::{AtomicU64, Ordering};

///
/// The source of the strictly increasing creation numbers attached to
/// every scheduled event.
///
/// The counter starts at 1 and is bumped atomically, so no two calls to
/// [`next`](Sequencer::next) ever return the same value, regardless of the
/// calling thread. The values are used only as the final ordering tie-break
/// and are never exposed for business logic.
///
#[derive(Debug)]
pub(crate) struct Sequencer {
    next: AtomicU64,
}

impl Sequencer {
    pub(crate) const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Issues the next creation number. The fetch-add is the single point
    /// of mutation.
    pub(crate) fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
