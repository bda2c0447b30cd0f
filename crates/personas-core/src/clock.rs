//! Wall-clock source for `createTime` / `updateTime` stamps.

use chrono::Local;

/// Format of every timestamp the manager writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Supplies the timestamp string written on insert and update.
pub trait Clock: Send + Sync {
  fn now(&self) -> String;
}

/// Local wall-clock time, second precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> String { Local::now().format(TIMESTAMP_FORMAT).to_string() }
}
