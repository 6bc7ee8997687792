/// Handle returned by [`Scheduler::schedule`], used to cancel the task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    handle: TaskHandle,
    due_at: f64,
    task: T,
}

/// One-shot deferred tasks driven by an external clock.
///
/// Nothing runs on its own: the owner calls [`Scheduler::take_due`] from its
/// event loop and applies whatever comes back. Times are in seconds.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_handle: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at: f64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(Scheduled { handle, due_at, task });
        handle
    }

    /// Returns the task if it had not fired yet
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let index = self.tasks.iter().position(|s| s.handle == handle)?;
        Some(self.tasks.remove(index).task)
    }

    /// Remove and return every task due at or before `now`, in scheduling order
    pub fn take_due(&mut self, now: f64) -> Vec<T> {
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|s| s.due_at <= now);
        self.tasks = pending;
        due.into_iter().map(|s| s.task).collect()
    }

    /// Earliest due time, for hosts that want to request a repaint
    pub fn next_due(&self) -> Option<f64> {
        self.tasks.iter().map(|s| s.due_at).min_by(f64::total_cmp)
    }
}
