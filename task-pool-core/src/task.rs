use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::error::TaskError;
use crate::handlers::TaskHandlers;

/// What kind of work a task performs. Fixed at construction time so
/// execution can dispatch with a plain `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
  NetworkFetch,
  FileRead,
  CpuCompute,
}

/// A single named argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
  Text(String),
  Number(i64),
}

/// Named arguments for a task, interpreted by the handler for its kind.
#[derive(Debug, Clone, Default)]
pub struct TaskArgs(HashMap<&'static str, ArgValue>);

impl TaskArgs {
  pub fn new() -> Self {
    TaskArgs::default()
  }

  pub fn with(mut self, name: &'static str, value: ArgValue) -> Self {
    self.0.insert(name, value);
    self
  }

  pub fn text(&self, name: &'static str) -> Result<&str, TaskError> {
    match self.0.get(name) {
      Some(ArgValue::Text(value)) => Ok(value),
      Some(_) => Err(TaskError::BadArg { name }),
      None => Err(TaskError::MissingArg { name }),
    }
  }

  pub fn number(&self, name: &'static str) -> Result<i64, TaskError> {
    match self.0.get(name) {
      Some(ArgValue::Number(value)) => Ok(*value),
      Some(_) => Err(TaskError::BadArg { name }),
      None => Err(TaskError::MissingArg { name }),
    }
  }
}

/// One unit of schedulable work: a kind plus the named arguments its handler
/// expects. Immutable once enqueued and consumed by exactly one worker;
/// failed tasks are never re-enqueued.
#[derive(Debug, Clone)]
pub struct Task {
  pub kind: TaskKind,
  pub args: TaskArgs,
}

impl Task {
  pub fn new(kind: TaskKind, args: TaskArgs) -> Self {
    Task { kind, args }
  }

  pub fn network_fetch(url: &str) -> Self {
    Task::new(
      TaskKind::NetworkFetch,
      TaskArgs::new().with("url", ArgValue::Text(url.to_string())),
    )
  }

  pub fn file_read(filename: &str) -> Self {
    Task::new(
      TaskKind::FileRead,
      TaskArgs::new().with("filename", ArgValue::Text(filename.to_string())),
    )
  }

  pub fn cpu_compute(number: i64) -> Self {
    Task::new(
      TaskKind::CpuCompute,
      TaskArgs::new().with("number", ArgValue::Number(number)),
    )
  }

  /// Run this task through the collaborator matching its kind. Arguments
  /// are read, never mutated.
  pub async fn execute<H: TaskHandlers>(&self, handlers: &H) -> Result<TaskOutput, TaskError> {
    match self.kind {
      TaskKind::NetworkFetch => {
        let url = self.args.text("url")?;
        let body = handlers.fetch_page(url).await?;
        Ok(TaskOutput::Page {
          url: url.to_string(),
          snippet: snippet_of(&body),
        })
      }
      TaskKind::FileRead => {
        let filename = self.args.text("filename")?;
        let lines = handlers.count_lines(filename).await?;
        Ok(TaskOutput::LineCount {
          filename: filename.to_string(),
          lines,
        })
      }
      TaskKind::CpuCompute => {
        let number = self.args.number("number")?;
        let value = handlers.factorial(number).await?;
        Ok(TaskOutput::Factorial { value })
      }
    }
  }
}

// Page bodies are huge; only the first 50 characters are worth reporting.
const SNIPPET_LEN: usize = 50;

fn snippet_of(body: &str) -> String {
  body.trim().chars().take(SNIPPET_LEN).collect()
}

/// The kind-tagged result of a completed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutput {
  Page { url: String, snippet: String },
  LineCount { filename: String, lines: usize },
  Factorial { value: u128 },
}

impl Display for TaskOutput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TaskOutput::Page { url, snippet } => write!(f, "url = {url}, text = {snippet}"),
      TaskOutput::LineCount { filename, lines } => {
        write!(f, "filename = {filename}, line_count = {lines}")
      }
      TaskOutput::Factorial { value } => write!(f, "factorial = {value}"),
    }
  }
}
