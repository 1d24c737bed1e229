//! Time-ordered fan reminder queue.
//!
//! Reminders are popped as they are delivered, so each is emitted at most
//! once. Reminders sharing an hour are delivered in the order they were added.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::models::{Artist, FanReminder, PerformanceId, ReminderNotice};

#[derive(Debug, Clone)]
struct QueuedReminder {
    seq: u64,
    reminder: FanReminder,
}

impl QueuedReminder {
    fn key(&self) -> (i64, u64) {
        (self.reminder.reminder_time, self.seq)
    }
}

impl PartialEq for QueuedReminder {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedReminder {}

impl PartialOrd for QueuedReminder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedReminder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-priority queue of reminders by reminder hour.
#[derive(Debug, Clone, Default)]
pub struct ReminderQueue {
    heap: BinaryHeap<Reverse<QueuedReminder>>,
    next_seq: u64,
}

impl ReminderQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reminder for `reminder_time`.
    pub fn add(
        &mut self,
        fan_id: impl Into<String>,
        performance: PerformanceId,
        artist: Arc<Artist>,
        reminder_time: i64,
    ) {
        let queued = QueuedReminder {
            seq: self.next_seq,
            reminder: FanReminder::new(fan_id, performance, artist, reminder_time),
        };
        self.next_seq += 1;
        self.heap.push(Reverse(queued));
    }

    /// Removes and returns every reminder due at or before `current_time`,
    /// ascending by reminder hour.
    pub fn process_due(&mut self, current_time: i64) -> Vec<ReminderNotice> {
        let mut due = Vec::new();
        while self
            .heap
            .peek()
            .is_some_and(|Reverse(q)| q.reminder.reminder_time <= current_time)
        {
            if let Some(Reverse(q)) = self.heap.pop() {
                due.push(q.reminder.into_notice());
            }
        }
        due
    }

    /// Hour of the earliest pending reminder.
    pub fn next_due(&self) -> Option<i64> {
        self.heap.peek().map(|Reverse(q)| q.reminder.reminder_time)
    }

    /// Number of pending reminders.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no reminders are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_with(entries: &[(&str, &str, i64)]) -> ReminderQueue {
        let mut queue = ReminderQueue::new();
        for (i, &(fan, artist, hour)) in entries.iter().enumerate() {
            queue.add(
                fan,
                PerformanceId::new(i as u64),
                Arc::new(Artist::new(artist, "Pop", 1)),
                hour,
            );
        }
        queue
    }

    fn hours(notices: &[ReminderNotice]) -> Vec<i64> {
        notices.iter().map(|n| n.reminder_time).collect()
    }

    #[test]
    fn test_processes_in_steps() {
        let mut queue = queue_with(&[
            ("Fan_003", "PopQueen", 21),
            ("Fan_001", "RockStar", 13),
            ("Fan_002", "DJ_Elec", 15),
        ]);

        let first = queue.process_due(13);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].fan_id, "Fan_001");
        assert_eq!(first[0].artist_name, "RockStar");

        let second = queue.process_due(16);
        assert_eq!(hours(&second), vec![15]);
        assert_eq!(second[0].fan_id, "Fan_002");

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(21));
    }

    #[test]
    fn test_never_reemits() {
        let mut queue = queue_with(&[("a", "X", 5), ("b", "Y", 6)]);
        assert_eq!(queue.process_due(10).len(), 2);
        assert!(queue.process_due(10).is_empty());
        assert!(queue.process_due(3).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ascending_with_stable_ties() {
        let mut queue = queue_with(&[
            ("late", "X", 9),
            ("tie1", "X", 4),
            ("early", "X", 1),
            ("tie2", "X", 4),
        ]);
        let due = queue.process_due(100);
        let fans: Vec<&str> = due.iter().map(|n| n.fan_id.as_str()).collect();
        assert_eq!(fans, vec!["early", "tie1", "tie2", "late"]);
    }

    #[test]
    fn test_nothing_due() {
        let mut queue = queue_with(&[("a", "X", 20)]);
        assert!(queue.process_due(19).is_empty());
        assert_eq!(queue.len(), 1);
        assert!(ReminderQueue::new().process_due(100).is_empty());
    }
}
