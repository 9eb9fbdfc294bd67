//! Lint rules for get-prefix-linter

pub mod base;

// Rule implementations
pub mod get_prefix;

use base::LintRule;

/// Get all available rules
pub fn get_all_rules() -> Vec<Box<dyn LintRule>> {
    vec![Box::new(get_prefix::MethodNameGetPrefixRule::new())]
}

/// Get all available rule IDs
pub fn get_all_rule_ids() -> Vec<String> {
    get_all_rules()
        .iter()
        .map(|rule| rule.rule_id().to_string())
        .collect()
}

/// Get rules filtered by enabled IDs
pub fn get_enabled_rules(enabled_ids: Option<&[String]>) -> Vec<Box<dyn LintRule>> {
    let all_rules = get_all_rules();

    match enabled_ids {
        Some(ids) => all_rules
            .into_iter()
            .filter(|rule| ids.iter().any(|id| id == rule.rule_id()))
            .collect(),
        None => all_rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_loaded() {
        let rule_ids = get_all_rule_ids();
        assert_eq!(rule_ids, vec!["Naming/MethodNameGetPrefix".to_string()]);
    }

    #[test]
    fn test_get_enabled_rules() {
        let enabled = vec!["Naming/MethodNameGetPrefix".to_string()];
        assert_eq!(get_enabled_rules(Some(&enabled)).len(), 1);
        let nothing: Vec<String> = Vec::new();
        assert!(get_enabled_rules(Some(&nothing)).is_empty());
        assert_eq!(get_enabled_rules(None).len(), 1);
    }
}
