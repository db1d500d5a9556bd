//! Cooperative timer queue driven by simulated time.
//!
//! Nothing here sleeps. The host moves the clock forward and pops whatever
//! has come due, in due order; tasks due at the same instant run in the order
//! they were scheduled.

use std::collections::BTreeMap;

/// Handle returned by `schedule_*`, used to cancel a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    due_ms: i64,
    seq: u64,
}

impl TaskHandle {
    pub fn due_ms(&self) -> i64 {
        self.due_ms
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: i64,
    next_seq: u64,
    queue: BTreeMap<(i64, u64), T>,
}

impl<T> Scheduler<T> {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> i64 {
        self.now_ms
    }

    /// Move the clock forward without running anything. Never moves backwards.
    pub fn set_now(&mut self, now_ms: i64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn schedule_at(&mut self, due_ms: i64, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due_ms, seq), task);
        TaskHandle { due_ms, seq }
    }

    pub fn schedule_in(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        let due = self.now_ms.saturating_add(delay_ms as i64);
        self.schedule_at(due, task)
    }

    /// Remove a pending task. Returns it if it had not run yet.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.queue.remove(&(handle.due_ms, handle.seq))
    }

    /// Pop the earliest task due at or before `until_ms`, advancing the clock
    /// to that task's due time.
    pub fn pop_due(&mut self, until_ms: i64) -> Option<T> {
        let (&(due_ms, seq), _) = self.queue.iter().next()?;
        if due_ms > until_ms {
            return None;
        }
        let task = self.queue.remove(&(due_ms, seq))?;
        self.set_now(due_ms);
        Some(task)
    }

    pub fn next_due(&self) -> Option<i64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.queue.values()
    }
}
