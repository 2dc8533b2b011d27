//! Collaborator doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::TaskError;
use crate::handlers::{self, TaskHandlers};

/// Records every collaborator call in order, optionally sleeps to simulate
/// I/O, and fails file reads whose name starts with `missing`.
pub(crate) struct RecordingHandlers {
  io_delay: Duration,
  page_body: String,
  calls: Mutex<Vec<String>>,
  results: Mutex<Vec<String>>,
  completed: AtomicUsize,
}

impl RecordingHandlers {
  pub(crate) fn new() -> Self {
    RecordingHandlers {
      io_delay: Duration::ZERO,
      page_body: "<html>a page body</html>".to_string(),
      calls: Mutex::new(Vec::new()),
      results: Mutex::new(Vec::new()),
      completed: AtomicUsize::new(0),
    }
  }

  pub(crate) fn with_io_delay(io_delay: Duration) -> Self {
    RecordingHandlers {
      io_delay,
      ..RecordingHandlers::new()
    }
  }

  pub(crate) fn with_page_body(self, page_body: String) -> Self {
    RecordingHandlers { page_body, ..self }
  }

  /// Every call in the order the collaborators received them, which under
  /// the serial and cooperative models is exactly the dequeue order.
  pub(crate) fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  /// Successful outcomes in completion order.
  pub(crate) fn results(&self) -> Vec<String> {
    self.results.lock().unwrap().clone()
  }

  pub(crate) fn completed(&self) -> usize {
    self.completed.load(Ordering::SeqCst)
  }

  fn record_call(&self, call: String) {
    self.calls.lock().unwrap().push(call);
  }

  fn record_result(&self, result: String) {
    self.results.lock().unwrap().push(result);
    self.completed.fetch_add(1, Ordering::SeqCst);
  }
}

impl TaskHandlers for RecordingHandlers {
  async fn fetch_page(&self, url: &str) -> Result<String, TaskError> {
    self.record_call(format!("fetch:{url}"));
    sleep(self.io_delay).await;
    self.record_result(format!("fetch:{url} = ok"));
    Ok(self.page_body.clone())
  }

  async fn count_lines(&self, filename: &str) -> Result<usize, TaskError> {
    self.record_call(format!("read:{filename}"));
    sleep(self.io_delay).await;

    if filename.starts_with("missing") {
      return Err(TaskError::FileRead {
        filename: filename.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
      });
    }

    self.record_result(format!("read:{filename} = 3"));
    Ok(3)
  }

  async fn factorial(&self, number: i64) -> Result<u128, TaskError> {
    self.record_call(format!("factorial:{number}"));
    let value = handlers::factorial(number).await?;
    self.record_result(format!("factorial:{number} = {value}"));
    Ok(value)
  }
}

/// Panics on any call. Exercises the concurrent barrier's crash path, where
/// a worker loop dies instead of catching a task failure.
pub(crate) struct PanickingHandlers;

impl TaskHandlers for PanickingHandlers {
  async fn fetch_page(&self, _url: &str) -> Result<String, TaskError> {
    panic!("collaborator crashed");
  }

  async fn count_lines(&self, _filename: &str) -> Result<usize, TaskError> {
    panic!("collaborator crashed");
  }

  async fn factorial(&self, _number: i64) -> Result<u128, TaskError> {
    panic!("collaborator crashed");
  }
}
