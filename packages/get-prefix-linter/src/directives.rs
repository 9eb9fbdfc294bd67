//! Inline disable comment parsing
//!
//! Supports RuboCop-style comments to switch rules off:
//! - `def get_user(id) # rubocop:disable Naming/MethodNameGetPrefix` - this line only
//! - `# rubocop:disable Naming/MethodNameGetPrefix` on its own line - until the
//!   matching `# rubocop:enable` (or the end of the file)
//! - `# rubocop:todo ...` behaves like `disable`
//!
//! A directive may name a rule, a whole department (`Naming`) or `all`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*rubocop\s*:\s*(disable|enable|todo)\b\s*([A-Za-z0-9_/,\s]*)").unwrap()
});

/// A line range (inclusive, 1-indexed) in which a rule is switched off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisabledRange {
    pub name: String,
    pub start: usize,
    /// `None` when the file never re-enables the rule
    pub end: Option<usize>,
}

impl DisabledRange {
    fn contains(&self, line: usize) -> bool {
        line >= self.start && self.end.map_or(true, |end| line <= end)
    }
}

/// Parsed disable directives for a file
#[derive(Debug, Default)]
pub struct DisableDirectives {
    /// Trailing comments: line -> names disabled on that line only
    pub line_disables: HashMap<usize, HashSet<String>>,
    /// Standalone disable/enable pairs
    pub ranges: Vec<DisabledRange>,
}

impl DisableDirectives {
    /// Parse directives from source code
    pub fn parse(source: &str) -> Self {
        let mut directives = DisableDirectives::default();
        let mut open: HashMap<String, usize> = HashMap::new();

        for (line_num, line) in source.lines().enumerate() {
            let line_number = line_num + 1;

            let caps = match DIRECTIVE_REGEX.captures(line) {
                Some(caps) => caps,
                None => continue,
            };

            let whole = caps.get(0).map_or(0, |m| m.start());
            let standalone = line[..whole].trim().is_empty();
            let action = &caps[1];
            let names: Vec<String> = caps
                .get(2)
                .map(|m| m.as_str())
                .unwrap_or("")
                .split(',')
                .filter_map(|s| s.split_whitespace().next())
                .map(str::to_string)
                .collect();

            match (action, standalone) {
                ("enable", _) => {
                    for name in &names {
                        if name == "all" {
                            for (n, start) in open.drain() {
                                directives.close(n, start, line_number);
                            }
                        } else if let Some(start) = open.remove(name) {
                            directives.close(name.clone(), start, line_number);
                        }
                    }
                }
                (_, true) => {
                    for name in names {
                        open.entry(name).or_insert(line_number);
                    }
                }
                (_, false) => {
                    directives
                        .line_disables
                        .entry(line_number)
                        .or_default()
                        .extend(names);
                }
            }
        }

        for (name, start) in open {
            directives.ranges.push(DisabledRange {
                name,
                start,
                end: None,
            });
        }

        directives
    }

    fn close(&mut self, name: String, start: usize, end: usize) {
        self.ranges.push(DisabledRange {
            name,
            start,
            end: Some(end),
        });
    }

    /// Check if a rule is disabled at a given line
    pub fn is_suppressed(&self, line: usize, rule_id: &str) -> bool {
        if let Some(names) = self.line_disables.get(&line) {
            if names.iter().any(|n| names_rule(n, rule_id)) {
                return true;
            }
        }

        self.ranges
            .iter()
            .any(|r| r.contains(line) && names_rule(&r.name, rule_id))
    }
}

/// Whether a directive name refers to `rule_id`
fn names_rule(name: &str, rule_id: &str) -> bool {
    name == "all"
        || name == rule_id
        || rule_id
            .strip_prefix(name)
            .map_or(false, |rest| rest.starts_with('/'))
}

/// Convert byte offset to line number (1-indexed)
pub fn offset_to_line(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
