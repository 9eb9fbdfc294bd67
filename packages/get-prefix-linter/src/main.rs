//! get-prefix-linter CLI

use clap::Parser;
use colored::*;
use get_prefix_linter::{
    collect_ruby_files, config, lint_files_parallel,
    logging::{read_source_line, LintLogEntry, LintLogger},
    models::{LintResult, Severity},
    rules, write_fixes,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "get-prefix-linter")]
#[command(version, about = "Flags get_-prefixed Ruby methods that take arguments")]
struct Args {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    paths: Vec<String>,

    /// Enable specific rules (comma-separated, or "ALL")
    #[arg(long, value_delimiter = ',')]
    enable: Vec<String>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Exclude paths matching patterns
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    output_format: String,

    /// Rename offending definitions in place
    #[arg(long)]
    fix: bool,

    /// Use this config file instead of searching for .get-prefix-linter.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore the configuration file
    #[arg(long)]
    no_config: bool,

    /// Append a JSON line describing this run to the given file
    #[arg(long)]
    log_file: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = if args.no_config {
        None
    } else {
        config::load_config(args.config.as_deref())
    };

    let (enabled_rules, exclude_patterns) = config::merge_config(
        config.as_ref(),
        &args.enable,
        &args.disable,
        &args.exclude,
    );

    if args.verbose {
        eprintln!("Enabled rules: {:?}", enabled_rules);
        eprintln!("Exclude patterns: {:?}", exclude_patterns);
    }

    let all_rules = rules::get_enabled_rules(enabled_rules.as_deref());

    if args.verbose {
        eprintln!(
            "Active rules: {}",
            all_rules
                .iter()
                .map(|r| r.rule_id())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let files = collect_ruby_files(&args.paths, &exclude_patterns);

    if args.verbose {
        eprintln!("Found {} Ruby files", files.len());
    }

    if files.is_empty() {
        eprintln!("No Ruby files found");
        return ExitCode::SUCCESS;
    }

    let mut results = lint_files_parallel(&files, &all_rules);

    let mut fixes_applied = 0;
    if args.fix {
        for result in &mut results {
            match write_fixes(result) {
                Ok(0) => {}
                Ok(n) => {
                    fixes_applied += n;
                    if args.verbose {
                        eprintln!("Fixed {} offense(s) in {}", n, result.file_path);
                    }
                    result.violations.retain(|v| !v.is_fixable());
                }
                Err(e) => {
                    eprintln!("{}: failed to write fixes: {}", result.file_path.red(), e);
                }
            }
        }
    }

    if let Some(log_path) = &args.log_file {
        let run_mode = if args.fix { "fix" } else { "check" };
        let entry = LintLogEntry::from_results(&results, run_mode, fixes_applied, enabled_rules.clone());
        match LintLogger::new(log_path).and_then(|mut logger| logger.log(&entry)) {
            Ok(()) => {
                if args.verbose {
                    eprintln!("Logged run to {}", log_path);
                }
            }
            Err(e) => eprintln!("Failed to write log {}: {}", log_path, e),
        }
    }

    match args.output_format.as_str() {
        "json" => print_json(&results),
        _ => print_text_grouped(&results),
    }

    let total: usize = results.iter().map(|r| r.violations.len()).sum();
    if fixes_applied > 0 {
        eprintln!("\nFixed {} offense(s).", fixes_applied);
    }
    if total > 0 {
        let fixable = results
            .iter()
            .flat_map(|r| &r.violations)
            .filter(|v| v.is_fixable())
            .count();
        eprintln!(
            "\nFound {} offense(s), {} auto-fixable{}",
            total,
            fixable,
            if fixable > 0 && !args.fix { " (run with --fix)" } else { "" }
        );
    } else if args.verbose {
        eprintln!("\nNo offenses found.");
    }

    if total > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Rule info with description and fix suggestion
struct RuleInfo {
    name: &'static str,
    description: &'static str,
    fix: &'static str,
}

fn get_rule_info(rule_id: &str) -> RuleInfo {
    match rule_id {
        "Naming/MethodNameGetPrefix" => RuleInfo {
            name: "Method Name Get Prefix",
            description: "A method that takes arguments is named `get_*`; it looks up or builds something from its arguments and is not an accessor.",
            fix: "Rename it to `<name>_for` or `find_<name>`: `user_for(id)` or `find_user(id)` instead of `get_user(id)`.",
        },
        _ => RuleInfo {
            name: "Unknown Rule",
            description: "Unknown rule violation.",
            fix: "Check the documentation for more information.",
        },
    }
}

/// Violation info for grouping
struct ViolationInfo {
    file_path: String,
    line: usize,
    column: usize,
    message: String,
    source_line: String,
}

fn print_text_grouped(results: &[LintResult]) {
    let mut grouped: BTreeMap<String, (Severity, Vec<ViolationInfo>)> = BTreeMap::new();

    for result in results {
        if let Some(error) = &result.error {
            eprintln!("{}: {}", result.file_path.red(), error);
            continue;
        }

        for v in &result.violations {
            grouped
                .entry(v.rule_id.clone())
                .or_insert_with(|| (v.severity, Vec::new()))
                .1
                .push(ViolationInfo {
                    file_path: v.file_path.clone(),
                    line: v.line,
                    column: v.column,
                    message: v.message.clone(),
                    source_line: read_source_line(&v.file_path, v.line),
                });
        }
    }

    for (rule_id, (severity, violations)) in &grouped {
        let rule_info = get_rule_info(rule_id);
        let count = violations.len();

        let header_color = match severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };

        println!(
            "\n{} {} - {} ({} occurrence{})",
            header_color,
            rule_id.cyan().bold(),
            rule_info.name.white().bold(),
            count,
            if count == 1 { "" } else { "s" }
        );
        println!("{}", "-".repeat(80).dimmed());
        println!("  {} {}", "What:".bright_white(), rule_info.description);
        println!("  {}  {}", "Fix:".bright_green(), rule_info.fix);
        println!();

        for v in violations {
            println!(
                "    {}:{}:{}",
                v.file_path.dimmed(),
                v.line.to_string().yellow(),
                v.column
            );
            println!("      {}", v.message);
            if !v.source_line.is_empty() {
                println!("      {}", v.source_line.bright_white());
            }
        }
    }
}

fn print_json(results: &[LintResult]) {
    let mut grouped: BTreeMap<String, Vec<serde_json::Value>> = BTreeMap::new();

    for result in results {
        for v in &result.violations {
            grouped
                .entry(v.rule_id.clone())
                .or_default()
                .push(serde_json::json!({
                    "file": v.file_path,
                    "line": v.line,
                    "column": v.column,
                    "range": v.range,
                    "severity": v.severity.to_string(),
                    "message": v.message,
                    "fix": v.fix.as_ref().map(|f| serde_json::json!({
                        "description": f.description,
                        "edits": f.edits,
                    })),
                    "source": read_source_line(&v.file_path, v.line),
                }));
        }
    }

    let errors: Vec<serde_json::Value> = results
        .iter()
        .filter_map(|r| {
            r.error
                .as_ref()
                .map(|e| serde_json::json!({ "file": r.file_path, "error": e }))
        })
        .collect();

    let rules: Vec<serde_json::Value> = grouped
        .into_iter()
        .map(|(rule_id, violations)| {
            let rule_info = get_rule_info(&rule_id);
            serde_json::json!({
                "rule": rule_id,
                "name": rule_info.name,
                "description": rule_info.description,
                "fix": rule_info.fix,
                "count": violations.len(),
                "violations": violations,
            })
        })
        .collect();

    let output = serde_json::json!({ "rules": rules, "errors": errors });
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
