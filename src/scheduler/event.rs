use super::Action;
use crate::time::SimTime;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

///
/// A runtime unique identifier for a scheduled event.
///
/// Ids are issued in creation order, strictly increasing over the lifetime
/// of a scheduler. They serve as the final ordering tie-break and as a
/// diagnostic label, nothing more.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub(crate) u64);

impl EventId {
    /// The raw creation number.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

///
/// An entry of the pending event set: an immutable pairing of a due time,
/// a priority, a creation number and the action to execute on dispatch.
///
/// The ordering key `(due, -priority, id)` never changes after construction.
///
pub(crate) struct EventNode {
    pub(crate) due: SimTime,
    pub(crate) priority: i32,
    pub(crate) id: EventId,
    pub(crate) action: Box<dyn Action>,
}

impl EventNode {
    pub(crate) fn handle(&self) -> EventHandle {
        EventHandle {
            id: self.id,
            due: self.due,
            priority: self.priority,
            description: self.action.description(),
        }
    }
}

impl PartialEq for EventNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventNode {}

impl PartialOrd for EventNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventNode {
    // Inverted, so that the std max-heap yields the minimum element:
    // earliest due time first, then highest priority, then lowest id.
    // Ids are unique, so distinct nodes never compare equal.
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| other.priority.cmp(&self.priority))
            .then_with(|| self.id.cmp(&other.id))
            .reverse()
    }
}

impl Debug for EventNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventNode")
            .field("due", &self.due)
            .field("priority", &self.priority)
            .field("id", &self.id)
            .field("action", &self.action.description())
            .finish()
    }
}

///
/// A diagnostic handle to a scheduled event, returned by
/// [`Scheduler::schedule`](super::Scheduler::schedule).
///
/// The handle captures the event's identity and description at scheduling
/// time. It carries no capability: there is no cancellation of a scheduled
/// event.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventHandle {
    id: EventId,
    due: SimTime,
    priority: i32,
    description: String,
}

impl EventHandle {
    /// The creation number of the event.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// The absolute simulation time the event is due at.
    #[must_use]
    pub fn due(&self) -> SimTime {
        self.due
    }

    /// The dispatch priority; higher runs earlier among equal due times.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The description of the scheduled action.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for EventHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' due {} (priority {})",
            self.id, self.description, self.due, self.priority
        )
    }
}
