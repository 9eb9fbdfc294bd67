//! get-prefix-linter: flags `get_`-prefixed Ruby methods that take arguments
//!
//! `def get_user(id)` is reported with `user_for` / `find_user` as suggested
//! names and can be auto-fixed to `def user_for(id)`. Zero-argument accessors
//! and methods that wrap an HTTP GET are left alone.

pub mod config;
pub mod definition;
pub mod directives;
pub mod logging;
pub mod models;
pub mod rules;
pub mod utils;

use directives::DisableDirectives;
use models::{Edit, LintResult, RuleContext, Violation};
use rayon::prelude::*;
use rules::base::LintRule;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};
use walkdir::WalkDir;

/// Parse Ruby source into a syntax tree
pub fn parse_ruby(source: &str) -> Result<Tree, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_ruby::LANGUAGE.into())
        .map_err(|e| format!("Failed to load Ruby grammar: {}", e))?;
    parser
        .parse(source, None)
        .ok_or_else(|| "Parser returned no tree".to_string())
}

/// Lint a single file and return the results
pub fn lint_file(file_path: &Path, rules: &[Box<dyn LintRule>]) -> LintResult {
    let path_str = file_path.to_string_lossy().to_string();

    let source = match std::fs::read_to_string(file_path) {
        Ok(s) => s,
        Err(e) => return LintResult::with_error(path_str, format!("Failed to read file: {}", e)),
    };

    lint_source(&path_str, &source, rules)
}

/// Lint source code and return the results
pub fn lint_source(file_path: &str, source: &str, rules: &[Box<dyn LintRule>]) -> LintResult {
    let tree = match parse_ruby(source) {
        Ok(tree) => tree,
        Err(e) => return LintResult::with_error(file_path.to_string(), e),
    };

    if let Some(error) = utils::first_error_node(tree.root_node()) {
        let line = error.start_position().row + 1;
        return LintResult::with_error(
            file_path.to_string(),
            format!("Parse error: syntax error near line {}", line),
        );
    }

    let directives = DisableDirectives::parse(source);
    let mut result = LintResult::new(file_path.to_string());

    check_node_recursive(
        tree.root_node(),
        file_path,
        source,
        rules,
        &directives,
        &mut result.violations,
    );

    result
}

fn check_node_recursive(
    node: Node<'_>,
    file_path: &str,
    source: &str,
    rules: &[Box<dyn LintRule>],
    directives: &DisableDirectives,
    violations: &mut Vec<Violation>,
) {
    let context = RuleContext {
        node,
        file_path,
        source,
    };

    for rule in rules {
        for mut v in rule.check(&context) {
            v.locate(source);
            if !directives.is_suppressed(v.line, &v.rule_id) {
                violations.push(v);
            }
        }
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    for child in children {
        check_node_recursive(child, file_path, source, rules, directives, violations);
    }
}

fn is_ruby_file(path: &Path) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| utils::RUBY_EXTENSIONS.contains(&e));
    let by_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| utils::RUBY_FILE_NAMES.contains(&n));
    by_extension || by_name
}

/// Collect Ruby files from paths
pub fn collect_ruby_files(paths: &[String], exclude_patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        let p = Path::new(path);
        if p.is_file() {
            if is_ruby_file(p) {
                files.push(p.to_path_buf());
            }
        } else if p.is_dir() {
            for entry in WalkDir::new(p)
                .into_iter()
                .filter_entry(|e| {
                    let relative = e.path().strip_prefix(p).unwrap_or(e.path());
                    !should_exclude(relative, exclude_patterns)
                })
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_ruby_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        }
    }

    files
}

fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        // Either a trailing path (`db/schema.rb`) or any single component (`vendor`)
        path.ends_with(pattern)
            || path
                .components()
                .any(|c| c.as_os_str().to_str() == Some(pattern.as_str()))
    })
}

/// Lint multiple files in parallel
pub fn lint_files_parallel(files: &[PathBuf], rules: &[Box<dyn LintRule>]) -> Vec<LintResult> {
    files
        .par_iter()
        .map(|file| lint_file(file, rules))
        .collect()
}

/// Apply the fixes attached to `violations` to `source`.
///
/// Edits are applied back to front; an edit overlapping one already applied
/// is skipped. Returns the new source and the number of violations fixed.
pub fn apply_fixes(source: &str, violations: &[Violation]) -> (String, usize) {
    let mut fixes: Vec<&[Edit]> = violations
        .iter()
        .filter_map(|v| v.fix.as_ref())
        .map(|f| f.edits.as_slice())
        .filter(|edits| !edits.is_empty())
        .collect();
    fixes.sort_by_key(|edits| std::cmp::Reverse(edits.iter().map(|e| e.range.start).min()));

    let mut output = source.to_string();
    let mut applied: Vec<Edit> = Vec::new();
    let mut fixed = 0;

    for edits in fixes {
        let in_bounds = edits
            .iter()
            .all(|e| e.range.start <= e.range.end && e.range.end <= source.len());
        let clashes = edits
            .iter()
            .any(|e| applied.iter().any(|a| a.range.overlaps(&e.range)));
        if !in_bounds || clashes {
            continue;
        }

        let mut sorted = edits.to_vec();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.range.start));
        for edit in &sorted {
            output.replace_range(edit.range.start..edit.range.end, &edit.replacement);
        }
        applied.extend(sorted);
        fixed += 1;
    }

    (output, fixed)
}

/// Rewrite a linted file on disk with its fixes applied.
///
/// Returns the number of violations fixed; the file is left untouched when
/// there is nothing to fix.
pub fn write_fixes(result: &LintResult) -> std::io::Result<usize> {
    if !result.has_fixes() {
        return Ok(0);
    }

    let source = std::fs::read_to_string(&result.file_path)?;
    let (fixed_source, fixed) = apply_fixes(&source, &result.violations);
    if fixed > 0 {
        std::fs::write(&result.file_path, fixed_source)?;
    }
    Ok(fixed)
}
