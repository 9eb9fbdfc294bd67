//! Core data models for the get-prefix-linter

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Half-open byte range `[start, end)` into a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn of(node: &Node<'_>) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &ByteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A violation detected by a lint rule
#[derive(Debug, Clone)]
pub struct Violation {
    pub rule_id: String,
    pub message: String,
    pub range: ByteRange,
    /// 1-indexed line, filled in once the file's source is known
    pub line: usize,
    /// 1-indexed byte column
    pub column: usize,
    pub file_path: String,
    pub severity: Severity,
    pub fix: Option<Fix>,
}

/// An automatic fix for a violation
#[derive(Debug, Clone)]
pub struct Fix {
    pub description: String,
    pub edits: Vec<Edit>,
}

/// A single textual replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub range: ByteRange,
    pub replacement: String,
}

/// Severity level of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Violation {
    /// Create a new violation without a fix
    pub fn new(
        rule_id: String,
        message: String,
        range: ByteRange,
        file_path: String,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id,
            message,
            range,
            line: 0,
            column: 0,
            file_path,
            severity,
            fix: None,
        }
    }

    /// Create a new violation with a fix
    pub fn with_fix(
        rule_id: String,
        message: String,
        range: ByteRange,
        file_path: String,
        severity: Severity,
        fix: Fix,
    ) -> Self {
        Self {
            fix: Some(fix),
            ..Self::new(rule_id, message, range, file_path, severity)
        }
    }

    /// Byte offset of the start of the violation
    pub fn offset(&self) -> usize {
        self.range.start
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }

    /// Resolve `line` and `column` against the file's source
    pub fn locate(&mut self, source: &str) {
        let offset = self.range.start.min(source.len());
        let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
        self.line = crate::directives::offset_to_line(source, offset);
        self.column = offset - line_start + 1;
    }
}

impl Edit {
    pub fn new(range: ByteRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Context passed to each rule for checking
pub struct RuleContext<'a> {
    pub node: Node<'a>,
    pub file_path: &'a str,
    pub source: &'a str,
}

/// Result of linting a single file
#[derive(Debug, Default)]
pub struct LintResult {
    pub file_path: String,
    pub violations: Vec<Violation>,
    pub error: Option<String>,
}

impl LintResult {
    pub fn new(file_path: String) -> Self {
        Self {
            file_path,
            violations: Vec::new(),
            error: None,
        }
    }

    pub fn with_error(file_path: String, error: String) -> Self {
        Self {
            file_path,
            violations: Vec::new(),
            error: Some(error),
        }
    }

    pub fn has_fixes(&self) -> bool {
        self.violations.iter().any(Violation::is_fixable)
    }
}
