use std::collections::VecDeque;

use tokio::sync::Mutex;

use crate::error::QueueEmptyError;
use crate::task::Task;

/// Shared FIFO of pending tasks, the only mutable state workers share.
///
/// Populated once before the pool starts and drained monotonically. `take`
/// removes the head under a single lock, so the emptiness check and the
/// removal are one atomic step: two workers can never both claim the last
/// task.
#[derive(Debug, Default)]
pub struct WorkQueue {
  items: Mutex<VecDeque<Task>>,
}

impl WorkQueue {
  pub fn new() -> Self {
    WorkQueue::default()
  }

  pub fn from_tasks(tasks: Vec<Task>) -> Self {
    WorkQueue {
      items: Mutex::new(tasks.into()),
    }
  }

  /// Append a task at the tail.
  pub async fn push(&self, task: Task) {
    self.items.lock().await.push_back(task);
  }

  pub async fn len(&self) -> usize {
    self.items.lock().await.len()
  }

  /// Non-blocking emptiness check, safe to call from any worker.
  pub async fn is_empty(&self) -> bool {
    self.items.lock().await.is_empty()
  }

  /// Remove and return the head task. An empty queue reports
  /// [`QueueEmptyError`], which callers treat as the drain signal.
  pub async fn take(&self) -> Result<Task, QueueEmptyError> {
    self.items.lock().await.pop_front().ok_or(QueueEmptyError)
  }
}
