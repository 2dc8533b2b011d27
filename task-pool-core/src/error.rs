use thiserror::Error;

/// Returned by `WorkQueue::take` when no task remains. This is the normal
/// drain signal a worker terminates on, not a failure.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no tasks left in the queue")]
pub struct QueueEmptyError;

/// A collaborator failure while executing a single task. Caught at the
/// worker loop, logged with the task identity, never fatal to the pool.
#[derive(Debug, Error)]
pub enum TaskError {
  #[error("GET {url} failed: {source}")]
  Fetch {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("could not read {filename}: {source}")]
  FileRead {
    filename: String,
    #[source]
    source: std::io::Error,
  },

  #[error("factorial is not defined for negative input {number}")]
  NegativeInput { number: i64 },

  #[error("factorial of {number} does not fit in a u128")]
  Overflow { number: i64 },

  #[error("task is missing argument `{name}`")]
  MissingArg { name: &'static str },

  #[error("task argument `{name}` has the wrong type")]
  BadArg { name: &'static str },
}

/// A worker loop itself crashed, as opposed to a task failing inside it.
/// Surfaces from the concurrent model's wait-for-all barrier and aborts the
/// whole run.
#[derive(Debug, Error)]
pub enum PoolError {
  #[error("worker {worker} crashed before draining the queue: {source}")]
  Barrier {
    worker: String,
    #[source]
    source: tokio::task::JoinError,
  },
}
