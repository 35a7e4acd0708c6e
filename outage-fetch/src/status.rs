//! Per-attempt console status lines.
//!
//! The executor reports every attempt through a [`StatusSink`]. The text of
//! these lines is part of the tool's observable output, so it is built in
//! one place.

use std::sync::{Mutex, PoisonError};

use reqwest::StatusCode;

/// Receiver for status lines.
pub trait StatusSink: Send + Sync {
    /// Emits one line (without trailing newline).
    fn emit(&self, line: &str);
}

/// Writes status lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Collects status lines in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Everything emitted so far, newline-terminated, as one string.
    pub fn output(&self) -> String {
        self.lines().iter().map(|l| format!("{l}\n")).collect()
    }
}

impl StatusSink for RecordingSink {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

// ============================================================================
// Message Text
// ============================================================================

/// Standard reason phrase for a status code.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

/// `200 OK`
pub fn success_line(status: StatusCode) -> String {
    format!("{} {}", status.as_u16(), reason_phrase(status))
}

/// `Server returned 500: Internal Server Error... Retrying... 1/5`
pub fn retry_line(status: StatusCode, retry: u32, max_retries: u32) -> String {
    format!(
        "Server returned {}: {}... Retrying... {retry}/{max_retries}",
        status.as_u16(),
        reason_phrase(status)
    )
}

/// `Error (404: Not Found)`
pub fn error_line(status: StatusCode) -> String {
    format!("Error ({}: {})", status.as_u16(), reason_phrase(status))
}
