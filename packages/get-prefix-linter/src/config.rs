//! Configuration loading for get-prefix-linter
//!
//! Loads configuration from a `.get-prefix-linter.toml` file found in the
//! current directory or one of its parents.

use crate::rules::get_all_rule_ids;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".get-prefix-linter.toml";

/// Paths that are never linted
const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".bundle",
    "vendor",
    "node_modules",
    "tmp",
    "log",
    "coverage",
];

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Rules to enable (empty means all rules, or use ["ALL"])
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rules to disable
    #[serde(default)]
    pub disable: Vec<String>,

    /// Paths to exclude from linting
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Find the config file starting from a path and walking up
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Load configuration from an explicit file, or from the nearest config file
/// above the current directory
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p.to_path_buf(),
        Some(_) => return None,
        None => find_config_file(&std::env::current_dir().ok()?)?,
    };

    let content = std::fs::read_to_string(&config_path).ok()?;
    toml::from_str(&content).ok()
}

fn all_rules_except(disabled: &[String]) -> Vec<String> {
    get_all_rule_ids()
        .into_iter()
        .filter(|r| !disabled.contains(r))
        .collect()
}

fn resolve_enabled(enable: &[String], disable: &[String]) -> Option<Vec<String>> {
    if enable.iter().any(|e| e == "ALL") {
        Some(all_rules_except(disable))
    } else if !enable.is_empty() {
        Some(
            enable
                .iter()
                .filter(|r| !disable.contains(r))
                .cloned()
                .collect(),
        )
    } else if !disable.is_empty() {
        Some(all_rules_except(disable))
    } else {
        None
    }
}

/// Merge command line arguments with config file settings
/// CLI arguments take precedence
pub fn merge_config(
    config: Option<&Config>,
    cli_enable: &[String],
    cli_disable: &[String],
    cli_exclude: &[String],
) -> (Option<Vec<String>>, Vec<String>) {
    let mut enable = None;
    let mut exclude = vec![];

    if let Some(cfg) = config {
        enable = resolve_enabled(&cfg.enable, &cfg.disable);
        exclude.extend(cfg.exclude.iter().cloned());
    }

    if !cli_enable.is_empty() || !cli_disable.is_empty() {
        enable = resolve_enabled(cli_enable, cli_disable);
    }

    exclude.extend(cli_exclude.iter().cloned());

    for default in DEFAULT_EXCLUDES {
        if !exclude.iter().any(|e| e == default) {
            exclude.push(default.to_string());
        }
    }

    (enable, exclude)
}
