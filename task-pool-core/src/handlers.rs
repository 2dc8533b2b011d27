use std::future::Future;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::yield_now;

use crate::error::TaskError;

/// The three collaborator contracts the engine dispatches into. Injected
/// into every worker, so tests can substitute recording or failing
/// implementations for the real network and filesystem.
pub trait TaskHandlers {
  /// HTTP GET returning the response body. Unreachable hosts and non-2xx
  /// statuses propagate as errors; there are no retries.
  fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String, TaskError>> + Send;

  /// Number of lines in a local file.
  fn count_lines(&self, filename: &str) -> impl Future<Output = Result<usize, TaskError>> + Send;

  /// n! for non-negative n, yielding to the scheduler periodically so a
  /// long computation cannot starve the other workers.
  fn factorial(&self, number: i64) -> impl Future<Output = Result<u128, TaskError>> + Send;
}

// How many multiplication steps a factorial runs between yield points.
const YIELD_EVERY: u128 = 10;

/// Shared by the live and test collaborators: iterative factorial with a
/// cooperative checkpoint every `YIELD_EVERY` steps.
pub(crate) async fn factorial(number: i64) -> Result<u128, TaskError> {
  if number < 0 {
    return Err(TaskError::NegativeInput { number });
  }

  let mut value: u128 = 1;
  for step in 2..=number as u128 {
    value = value
      .checked_mul(step)
      .ok_or(TaskError::Overflow { number })?;
    if step % YIELD_EVERY == 0 {
      yield_now().await;
    }
  }

  Ok(value)
}

/// Production collaborators backed by the real network and filesystem.
pub struct LiveHandlers {
  client: reqwest::Client,
}

impl LiveHandlers {
  pub fn new() -> Self {
    LiveHandlers {
      client: reqwest::Client::new(),
    }
  }
}

impl Default for LiveHandlers {
  fn default() -> Self {
    LiveHandlers::new()
  }
}

impl TaskHandlers for LiveHandlers {
  async fn fetch_page(&self, url: &str) -> Result<String, TaskError> {
    let wrap = |source| TaskError::Fetch {
      url: url.to_string(),
      source,
    };

    let response = self.client.get(url).send().await.map_err(wrap)?;
    let response = response.error_for_status().map_err(wrap)?;
    response.text().await.map_err(wrap)
  }

  async fn count_lines(&self, filename: &str) -> Result<usize, TaskError> {
    let wrap = |source| TaskError::FileRead {
      filename: filename.to_string(),
      source,
    };

    let file = File::open(filename).await.map_err(wrap)?;
    let mut lines = BufReader::new(file).lines();

    let mut count = 0;
    while lines.next_line().await.map_err(wrap)?.is_some() {
      count += 1;
    }

    Ok(count)
  }

  async fn factorial(&self, number: i64) -> Result<u128, TaskError> {
    factorial(number).await
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[tokio::test]
  async fn factorial_of_small_numbers() {
    assert_eq!(factorial(0).await.unwrap(), 1);
    assert_eq!(factorial(1).await.unwrap(), 1);
    assert_eq!(factorial(5).await.unwrap(), 120);
    assert_eq!(factorial(20).await.unwrap(), 2_432_902_008_176_640_000);
  }

  #[tokio::test]
  async fn factorial_rejects_negative_input() {
    let error = factorial(-3).await.unwrap_err();
    assert!(matches!(error, TaskError::NegativeInput { number: -3 }));
  }

  // 34! still fits in a u128, 35! does not.
  #[tokio::test]
  async fn factorial_reports_overflow() {
    assert!(factorial(34).await.is_ok());
    let error = factorial(35).await.unwrap_err();
    assert!(matches!(error, TaskError::Overflow { number: 35 }));
  }

  #[tokio::test]
  async fn count_lines_counts_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "first").unwrap();
    writeln!(file, "second").unwrap();
    writeln!(file, "third").unwrap();

    let handlers = LiveHandlers::new();
    let path = file.path().to_str().unwrap();
    assert_eq!(handlers.count_lines(path).await.unwrap(), 3);
  }

  #[tokio::test]
  async fn count_lines_reports_missing_files() {
    let handlers = LiveHandlers::new();
    let error = handlers.count_lines("definitely-missing.txt").await.unwrap_err();
    match error {
      TaskError::FileRead { filename, source } => {
        assert_eq!(filename, "definitely-missing.txt");
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
      }
      other => panic!("expected a file-read error, got {other:?}"),
    }
  }
}
