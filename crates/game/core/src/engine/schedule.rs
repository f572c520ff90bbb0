use crate::config::Millis;

/// Identifies one scheduled task for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry<T> {
    due: Millis,
    handle: TaskHandle,
    task: T,
}

/// Virtual-clock task list owned by a battle session.
///
/// Tasks run in `(due, scheduling order)` order. Nothing here reads a real
/// clock: the owner passes `now` in and pops whatever has become due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduler<T> {
    next_handle: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` to run `delay` after `now`.
    pub fn schedule(&mut self, now: Millis, delay: Millis, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            due: now.saturating_add(delay),
            handle,
            task,
        });
        handle
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    /// Cancels every pending task matching `predicate`. Returns how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(&entry.task));
        before - self.entries.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<Millis> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.handle))
            .map(|(index, _)| index)?;
        let entry = self.entries.remove(index);
        Some((entry.due, entry.task))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending tasks with their due times, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Millis, &T)> {
        self.entries.iter().map(|entry| (entry.due, &entry.task))
    }
}
