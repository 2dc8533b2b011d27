use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::QueueEmptyError;
use crate::handlers::TaskHandlers;
use crate::queue::WorkQueue;

/// Where a worker is in its life cycle. `Finished` is terminal: the worker
/// observed an empty queue on a take attempt and will not iterate again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
  Running,
  Finished,
}

/// A named consumer loop over the shared queue. The queue and the
/// collaborators are injected at construction; the worker owns no task
/// beyond the one it is currently executing.
pub struct Worker<H> {
  name: Arc<str>,
  queue: Arc<WorkQueue>,
  handlers: Arc<H>,
  state: WorkerState,
}

impl<H: TaskHandlers> Worker<H> {
  pub fn new(name: &str, queue: Arc<WorkQueue>, handlers: Arc<H>) -> Self {
    Worker {
      name: Arc::from(name),
      queue,
      handlers,
      state: WorkerState::Running,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn state(&self) -> WorkerState {
    self.state
  }

  /// One iteration of the consumer loop: take the next task, execute it in
  /// this worker's own frame, report the outcome. An empty queue flips the
  /// worker to `Finished`; a failed task is logged and the worker keeps
  /// running.
  pub async fn advance(&mut self) -> WorkerState {
    if self.state == WorkerState::Finished {
      return WorkerState::Finished;
    }

    let task = match self.queue.take().await {
      Ok(task) => task,
      // The drain signal, not a failure.
      Err(QueueEmptyError) => {
        info!("Worker {} finished as there are no more tasks", self.name);
        self.state = WorkerState::Finished;
        return WorkerState::Finished;
      }
    };

    let started = Instant::now();
    match task.execute(self.handlers.as_ref()).await {
      Ok(output) => info!(
        "Worker {} completed task: {} (elapsed {:.2}s)",
        self.name,
        output,
        started.elapsed().as_secs_f64()
      ),
      Err(error) => warn!(
        "Worker {} failed {:?} task: {}",
        self.name, task.kind, error
      ),
    }

    WorkerState::Running
  }

  /// Drive the loop until the queue is drained.
  pub async fn run(&mut self) {
    info!("Worker {} starting to run tasks", self.name);
    while self.advance().await == WorkerState::Running {}
  }
}
