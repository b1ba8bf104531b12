use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

struct Entry<E> {
    due: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // reversed: BinaryHeap is a max-heap, earliest entry must surface first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending timers on a virtual timeline. Entries with the same due time
/// fire in the order they were scheduled.
pub struct TimerQueue<E> {
    heap: BinaryHeap<Entry<E>>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule_at(&mut self, due: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due, seq, event });
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|entry| entry.due)
    }

    /// Removes the earliest timer if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, E)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|entry| (entry.due, entry.event))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_at(ms(300), "c");
        queue.schedule_at(ms(100), "a");
        queue.schedule_at(ms(200), "b");

        assert_eq!(queue.next_deadline(), Some(ms(100)));
        assert_eq!(queue.pop_due(ms(1000)), Some((ms(100), "a")));
        assert_eq!(queue.pop_due(ms(1000)), Some((ms(200), "b")));
        assert_eq!(queue.pop_due(ms(1000)), Some((ms(300), "c")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_at(ms(1500), "first");
        queue.schedule_at(ms(1500), "second");

        assert_eq!(queue.pop_due(ms(1500)).map(|(_, e)| e), Some("first"));
        assert_eq!(queue.pop_due(ms(1500)).map(|(_, e)| e), Some("second"));
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TimerQueue::new();
        queue.schedule_at(ms(3000), ());
        assert_eq!(queue.pop_due(ms(2999)), None);
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(ms(3000)).is_some());
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut queue = TimerQueue::new();
        queue.schedule_at(ms(10), 1);
        queue.schedule_at(ms(20), 2);
        queue.clear();
        assert_eq!(queue.next_deadline(), None);
        assert_eq!(queue.pop_due(ms(100)), None);
    }
}
