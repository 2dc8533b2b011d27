//! A shared FIFO of heterogeneous tasks drained by a pool of named workers
//! under serial, cooperative, or truly concurrent scheduling.

pub mod error;
pub mod handlers;
pub mod pool;
pub mod queue;
pub mod task;
pub mod worker;

#[cfg(test)]
mod testing;

pub use error::{PoolError, QueueEmptyError, TaskError};
pub use pool::{Pool, PoolConfig, SchedulingModel};
pub use queue::WorkQueue;
pub use task::{Task, TaskKind, TaskOutput};
pub use worker::{Worker, WorkerState};
