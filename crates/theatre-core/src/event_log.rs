use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::event::DvdEvent;

/// Maximum number of events retained in the ring buffer.
const EVENT_LOG_CAPACITY: usize = 200;

/// A timestamped event entry.
pub type EventEntry = (DateTime<Utc>, DvdEvent);

/// Bounded ring buffer of recent playback events.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<EventEntry>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    /// Push a new event, evicting the oldest if at capacity.
    pub fn push(&mut self, event: DvdEvent) {
        if self.entries.len() >= EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((Utc::now(), event));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent event, if any.
    pub fn last(&self) -> Option<&EventEntry> {
        self.entries.back()
    }

    /// Return a snapshot of all entries (newest last).
    pub fn snapshot(&self) -> Vec<EventEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut log = EventLog::new();
        for n in 0..(EVENT_LOG_CAPACITY as u16 + 5) {
            log.push(DvdEvent::Chapter { number: n });
        }

        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        let snapshot = log.snapshot();
        assert_eq!(snapshot[0].1, DvdEvent::Chapter { number: 5 });
        assert_eq!(
            log.last().map(|(_, e)| e.clone()),
            Some(DvdEvent::Chapter {
                number: EVENT_LOG_CAPACITY as u16 + 4
            })
        );
    }

    #[test]
    fn test_timestamps_are_ordered() {
        let mut log = EventLog::default();
        assert!(log.is_empty());
        log.push(DvdEvent::Title { number: 1 });
        log.push(DvdEvent::Title { number: 2 });

        let snapshot = log.snapshot();
        assert!(snapshot[0].0 <= snapshot[1].0);
    }
}
