//! Bounded in-memory activity feed.
//!
//! Keeps the most recent noteworthy outcomes (loads, mutations, failures) in
//! a fixed-capacity ring so the console can show recent activity without the
//! feed growing without bound. This complements the tracing pipeline; it is
//! user-facing state, not diagnostics.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// One feed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Fixed-capacity ring of recent activity, oldest first.
#[derive(Debug, Clone)]
pub struct LogFeed {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogFeed {
    /// Creates a feed holding at most `capacity` entries; zero is clamped
    /// to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest when at capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at: Utc::now(),
            message: message.into(),
        });
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_evicts_oldest_at_capacity() {
        let mut feed = LogFeed::new(3);
        for i in 0..5 {
            feed.push(format!("event {i}"));
        }
        assert_eq!(feed.len(), 3);
        let messages: Vec<&str> = feed.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut feed = LogFeed::new(0);
        feed.push("only");
        feed.push("kept");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.entries().next().unwrap().message, "kept");
    }
}
