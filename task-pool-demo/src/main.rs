use clap::{Parser, ValueEnum};
use task_pool_core::handlers::LiveHandlers;
use task_pool_core::pool::{Pool, PoolConfig, SchedulingModel};
use task_pool_core::task::Task;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    /// Workers run one after another; the correctness baseline.
    Serial,
    /// Round-robin interleaving on one thread; no real overlap.
    Cooperative,
    /// True concurrency: I/O-bound tasks overlap across workers.
    Concurrent,
}

impl From<Model> for SchedulingModel {
    fn from(model: Model) -> Self {
        match model {
            Model::Serial => SchedulingModel::Serial,
            Model::Cooperative => SchedulingModel::Cooperative,
            Model::Concurrent => SchedulingModel::Concurrent,
        }
    }
}

/// Drain a queue of web fetches, file reads and factorials with a pool of
/// workers. Run it with `--model serial --workers 1`, then `--workers 2`,
/// then `--model cooperative` and finally `--model concurrent` to see the
/// total elapsed time collapse only at the last step.
#[derive(Debug, Parser)]
struct Args {
    /// Scheduling discipline for the pool.
    #[arg(long, value_enum, default_value = "concurrent")]
    model: Model,

    /// Number of workers draining the queue.
    #[arg(long, default_value_t = 2)]
    workers: usize,
}

fn demo_tasks() -> Vec<Task> {
    vec![
        Task::network_fetch("https://weather.com/"),
        Task::file_read("task-pool-demo/data/textfile1.txt"),
        Task::cpu_compute(30),
        Task::network_fetch("http://yahoo.com"),
        Task::network_fetch("http://linkedin.com"),
        Task::network_fetch("https://www.dropbox.com"),
        Task::network_fetch("http://microsoft.com"),
        Task::cpu_compute(33),
        Task::network_fetch("http://facebook.com"),
        Task::file_read("task-pool-demo/data/textfile2.txt"),
        Task::network_fetch("https://www.target.com/"),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = PoolConfig {
        workers: args.workers.max(1),
        model: args.model.into(),
    };

    info!(
        "Draining {} tasks with {} workers under the {:?} model",
        demo_tasks().len(),
        config.workers,
        config.model
    );

    let pool = Pool::new(config, LiveHandlers::new(), demo_tasks());
    pool.run().await?;

    Ok(())
}
