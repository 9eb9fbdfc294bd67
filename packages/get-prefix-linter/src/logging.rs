//! Logging module for get-prefix-linter
//!
//! Provides structured logging of lint runs to a file in JSON Lines format
//! for later analysis.

use crate::models::{LintResult, Severity};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_SOURCE_LINE: usize = 200;

/// A single log entry representing one lint run
#[derive(Debug, Serialize, Deserialize)]
pub struct LintLogEntry {
    /// Unix timestamp of when the lint was run
    pub timestamp: u64,
    /// ISO 8601 formatted date string
    pub datetime: String,
    /// Total number of files scanned
    pub files_scanned: usize,
    /// Files that could not be read or parsed
    pub files_failed: usize,
    /// Total number of violations found
    pub total_violations: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    /// Violations fixed in place (fix mode only)
    pub fixes_applied: usize,
    /// Individual violations
    pub violations: Vec<ViolationLogEntry>,
    /// Run mode (check, fix)
    pub run_mode: String,
    /// Enabled rules for this run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_rules: Option<Vec<String>>,
}

/// Log entry for a single violation
#[derive(Debug, Serialize, Deserialize)]
pub struct ViolationLogEntry {
    pub rule_id: String,
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub severity: String,
    pub message: String,
    pub fixable: bool,
    /// Source line content (truncated if too long)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl LintLogEntry {
    /// Create a new log entry from lint results
    pub fn from_results(
        results: &[LintResult],
        run_mode: &str,
        fixes_applied: usize,
        enabled_rules: Option<Vec<String>>,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut violations = Vec::new();
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut info_count = 0;

        for result in results {
            for v in &result.violations {
                match v.severity {
                    Severity::Error => error_count += 1,
                    Severity::Warning => warning_count += 1,
                    Severity::Info => info_count += 1,
                }

                let source_line = read_source_line(&v.file_path, v.line);
                violations.push(ViolationLogEntry {
                    rule_id: v.rule_id.clone(),
                    file_path: v.file_path.clone(),
                    line: v.line,
                    column: v.column,
                    severity: v.severity.to_string(),
                    message: v.message.clone(),
                    fixable: v.is_fixable(),
                    source_line: if source_line.is_empty() {
                        None
                    } else {
                        Some(truncate_source_line(&source_line, MAX_SOURCE_LINE))
                    },
                });
            }
        }

        Self {
            timestamp,
            datetime: format_datetime(timestamp),
            files_scanned: results.len(),
            files_failed: results.iter().filter(|r| r.error.is_some()).count(),
            total_violations: violations.len(),
            error_count,
            warning_count,
            info_count,
            fixes_applied,
            violations,
            run_mode: run_mode.to_string(),
            enabled_rules,
        }
    }
}

/// Logger that writes lint runs to a file
pub struct LintLogger {
    writer: BufWriter<File>,
    log_path: String,
}

impl LintLogger {
    /// Create a new logger that writes to the specified file
    /// If the file exists, it will be appended to; otherwise created
    pub fn new(log_path: &str) -> std::io::Result<Self> {
        let path = Path::new(log_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            log_path: log_path.to_string(),
        })
    }

    /// Append one run to the file
    pub fn log(&mut self, entry: &LintLogEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }

    /// Get the path of the log file
    pub fn log_path(&self) -> &str {
        &self.log_path
    }
}

/// Format a unix timestamp as ISO 8601 datetime string
fn format_datetime(timestamp: u64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

/// Read a specific line from a file
pub fn read_source_line(file_path: &str, line_num: usize) -> String {
    if let Ok(content) = std::fs::read_to_string(file_path) {
        content
            .lines()
            .nth(line_num.saturating_sub(1))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    } else {
        String::new()
    }
}

/// Truncate source line if too long
fn truncate_source_line(line: &str, max_len: usize) -> String {
    if line.len() > max_len {
        let mut end = max_len;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &line[..end])
    } else {
        line.to_string()
    }
}
