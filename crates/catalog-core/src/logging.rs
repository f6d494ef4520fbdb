use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Upper bound on entries a single view keeps around.
pub const MAX_LOG_ENTRIES: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            message,
        }
    }
}

pub trait Loggable {
    fn add_log(&mut self, message: String);
    fn get_logs(&self) -> &VecDeque<LogEntry>;
}

/// Appends to a bounded log, dropping the oldest entry once full.
pub(crate) fn push_bounded(logs: &mut VecDeque<LogEntry>, message: String) {
    while logs.len() >= MAX_LOG_ENTRIES {
        logs.pop_front();
    }
    logs.push_back(LogEntry::new(message));
}
