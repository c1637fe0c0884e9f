//! Cancellable timed tasks
//!
//! Replaces browser timeouts/intervals with an explicit queue driven by the
//! frame clock. Every task is addressed by a handle so a run can cancel its
//! pending work when it ends; a cancelled task never fires.

/// Work the run state machine can defer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Advance the pre-run countdown
    CountdownStep,
    /// Launch the next projectile
    Spawn,
    /// One second of run time elapsed
    ClockTick,
}

/// Handle returned by [`Scheduler::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// A task that came due
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub handle: TaskHandle,
    pub task: Task,
    /// Time the task was scheduled for (ms), used to chain follow-ups without drift
    pub at: f64,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    at: f64,
}

/// Time-ordered task queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Sorted by `at`, ties in scheduling order
    entries: Vec<Entry>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at time `at` (ms)
    pub fn schedule(&mut self, at: f64, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        // Insert after every entry due at or before `at` to keep FIFO ties
        let idx = self.entries.partition_point(|e| e.at <= at);
        self.entries.insert(idx, Entry { handle, task, at });
        handle
    }

    /// Cancel a pending task; false if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Pop the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<Fired> {
        if self.entries.first().is_some_and(|e| e.at <= now) {
            let e = self.entries.remove(0);
            Some(Fired {
                handle: e.handle,
                task: e.task,
                at: e.at,
            })
        } else {
            None
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule(300.0, Task::Spawn);
        s.schedule(100.0, Task::ClockTick);
        s.schedule(200.0, Task::CountdownStep);

        assert!(s.pop_due(50.0).is_none());
        let order: Vec<Task> = std::iter::from_fn(|| s.pop_due(1000.0))
            .map(|f| f.task)
            .collect();
        assert_eq!(order, vec![Task::ClockTick, Task::CountdownStep, Task::Spawn]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        let a = s.schedule(100.0, Task::Spawn);
        let b = s.schedule(100.0, Task::ClockTick);
        assert_eq!(s.pop_due(100.0).map(|f| f.handle), Some(a));
        assert_eq!(s.pop_due(100.0).map(|f| f.handle), Some(b));
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let spawn = s.schedule(100.0, Task::Spawn);
        let tick = s.schedule(200.0, Task::ClockTick);
        assert!(s.cancel(spawn));
        assert!(!s.cancel(spawn));
        assert!(!s.is_pending(spawn));
        assert!(s.is_pending(tick));

        let fired = s.pop_due(1000.0).expect("clock tick due");
        assert_eq!(fired.task, Task::ClockTick);
        assert_eq!(fired.at, 200.0);
        assert!(s.pop_due(1000.0).is_none());
    }

    #[test]
    fn test_fired_handle_cannot_be_cancelled() {
        let mut s = Scheduler::new();
        let h = s.schedule(0.0, Task::CountdownStep);
        assert!(s.pop_due(0.0).is_some());
        assert!(!s.cancel(h));
    }

    #[test]
    fn test_clear() {
        let mut s = Scheduler::new();
        s.schedule(1.0, Task::Spawn);
        s.schedule(2.0, Task::Spawn);
        assert_eq!(s.len(), 2);
        s.clear();
        assert!(s.pop_due(f64::MAX).is_none());
    }
}
