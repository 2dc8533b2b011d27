use std::sync::Arc;

use futures_util::future::join_all;
use tokio::time::Instant;
use tracing::info;

use crate::error::PoolError;
use crate::handlers::TaskHandlers;
use crate::queue::WorkQueue;
use crate::task::Task;
use crate::worker::{Worker, WorkerState};

/// How the pool advances its workers. One engine, three disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingModel {
  /// Each worker runs to full completion before the next one starts. No
  /// interleaving at all; the correctness baseline.
  Serial,
  /// One logical thread advancing every worker one step at a time in
  /// round-robin order. Workers interleave but never overlap: the single
  /// yield point per task is deliberate, so I/O waits still serialize.
  Cooperative,
  /// Every worker runs as an independent tokio task. An I/O wait suspends
  /// only the issuing worker while the others keep pulling from the queue.
  Concurrent,
}

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
  // Number of workers draining the queue. At least one.
  pub workers: usize,
  // Scheduling discipline used to drive them.
  pub model: SchedulingModel,
}

/// Owns the queue and the workers. `run` is the single completion barrier:
/// it returns only once every worker has observed the empty queue.
pub struct Pool<H> {
  config: PoolConfig,
  queue: Arc<WorkQueue>,
  handlers: Arc<H>,
}

impl<H: TaskHandlers + Send + Sync + 'static> Pool<H> {
  /// Build the queue, populate it with `tasks` in order, and prepare the
  /// collaborators every worker will share.
  pub fn new(config: PoolConfig, handlers: H, tasks: Vec<Task>) -> Self {
    Pool {
      config,
      queue: Arc::new(WorkQueue::from_tasks(tasks)),
      handlers: Arc::new(handlers),
    }
  }

  fn workers(&self) -> Vec<Worker<H>> {
    (1..=self.config.workers)
      .map(|n| {
        Worker::new(
          &format!("worker-{n}"),
          self.queue.clone(),
          self.handlers.clone(),
        )
      })
      .collect()
  }

  /// Drive every worker to `Finished` under the configured model. Fails
  /// only if a worker loop itself crashes under the concurrent model;
  /// individual task failures never surface here.
  pub async fn run(&self) -> Result<(), PoolError> {
    let started = Instant::now();

    match self.config.model {
      SchedulingModel::Serial => self.run_serial().await,
      SchedulingModel::Cooperative => self.run_cooperative().await,
      SchedulingModel::Concurrent => self.run_concurrent().await?,
    }

    info!(
      "All workers finished (total elapsed {:.2}s)",
      started.elapsed().as_secs_f64()
    );

    Ok(())
  }

  async fn run_serial(&self) {
    for mut worker in self.workers() {
      worker.run().await;
    }
  }

  async fn run_cooperative(&self) {
    let mut workers = self.workers();
    for worker in &workers {
      info!("Worker {} starting to run tasks", worker.name());
    }

    // Round-robin: advance each worker one step, drop the finished ones,
    // loop until none remain.
    while !workers.is_empty() {
      let mut still_running = Vec::with_capacity(workers.len());
      for mut worker in workers {
        if worker.advance().await == WorkerState::Running {
          still_running.push(worker);
        }
      }
      workers = still_running;
    }
  }

  async fn run_concurrent(&self) -> Result<(), PoolError> {
    let (names, handles): (Vec<_>, Vec<_>) = self
      .workers()
      .into_iter()
      .map(|mut worker| {
        let name = worker.name().to_string();
        (name, tokio::spawn(async move { worker.run().await }))
      })
      .unzip();

    // Wait-for-all barrier: join every worker even if one of them crashed,
    // then surface the first crash.
    let mut failure = None;
    for (name, joined) in names.into_iter().zip(join_all(handles).await) {
      if let Err(source) = joined {
        failure.get_or_insert(PoolError::Barrier {
          worker: name,
          source,
        });
      }
    }

    match failure {
      Some(error) => Err(error),
      None => Ok(()),
    }
  }
}
