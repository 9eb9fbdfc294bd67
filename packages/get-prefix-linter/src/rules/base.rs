//! Base trait for all lint rules

use crate::models::{RuleContext, Violation};

/// Base trait that all lint rules must implement
pub trait LintRule: Send + Sync {
    /// The unique identifier for this rule (e.g., "Naming/MethodNameGetPrefix")
    fn rule_id(&self) -> &str;

    /// Short description of what the rule checks
    fn description(&self) -> &str;

    /// Perform the lint check on a single syntax node
    fn check(&self, context: &RuleContext) -> Vec<Violation>;
}
