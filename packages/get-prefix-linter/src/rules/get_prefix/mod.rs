//! Naming/MethodNameGetPrefix
//!
//! Methods that take arguments should not be named `get_*`: `get_user(id)`
//! reads better as `user_for(id)` or `find_user(id)`. Zero-argument `get_*`
//! methods are treated as plain accessors and left alone, and so are methods
//! that are really HTTP GET wrappers (see [`suppressor`]).
//!
//! The check runs as four stages over one definition at a time:
//! [`matcher`] selects candidates, [`suppressor`] drops false positives,
//! [`suggester`] builds the message and [`rewriter`] produces the fix.

pub mod matcher;
pub mod rewriter;
pub mod suggester;
pub mod suppressor;

pub use self::rule::MethodNameGetPrefixRule;

mod rule {
    use crate::definition::Definition;
    use crate::models::{Fix, RuleContext, Severity, Violation};
    use crate::rules::base::LintRule;

    use super::rewriter::{rename, RenameOutcome};
    use super::{matcher, suggester, suppressor};

    pub struct MethodNameGetPrefixRule;

    impl MethodNameGetPrefixRule {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for MethodNameGetPrefixRule {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LintRule for MethodNameGetPrefixRule {
        fn rule_id(&self) -> &str {
            "Naming/MethodNameGetPrefix"
        }

        fn description(&self) -> &str {
            "Methods with arguments should not use the get_ prefix"
        }

        fn check(&self, context: &RuleContext) -> Vec<Violation> {
            let definition = match Definition::from_node(context.node, context.source) {
                Some(d) => d,
                None => return Vec::new(),
            };

            if !matcher::matches(&definition)
                || suppressor::suppress(&definition, context.file_path)
            {
                return Vec::new();
            }

            let suggestion = suggester::suggest(definition.name);
            let message = suggestion.message();

            let violation = match rename(&definition, &definition.sibling_names()) {
                RenameOutcome::Applied(edit) => Violation::with_fix(
                    self.rule_id().to_string(),
                    message,
                    definition.name_range,
                    context.file_path.to_string(),
                    Severity::Warning,
                    Fix {
                        description: format!(
                            "Rename `{}` to `{}`",
                            definition.name, edit.replacement
                        ),
                        edits: vec![edit],
                    },
                ),
                RenameOutcome::SkippedDueToCollision { .. } => Violation::new(
                    self.rule_id().to_string(),
                    message,
                    definition.name_range,
                    context.file_path.to_string(),
                    Severity::Warning,
                ),
            };

            vec![violation]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleContext, Violation};
    use crate::parse_ruby;
    use crate::rules::base::LintRule;
    use crate::utils::descendants;

    fn check_code(code: &str, file_path: &str) -> Vec<Violation> {
        let tree = parse_ruby(code).unwrap();
        let rule = MethodNameGetPrefixRule::new();
        let mut violations = Vec::new();

        for node in descendants(tree.root_node()) {
            let context = RuleContext {
                node,
                file_path,
                source: code,
            };
            violations.extend(rule.check(&context));
        }

        violations
    }

    #[test]
    fn test_reports_name_token() {
        let code = "def get_user(id)\n  User.find(id)\nend\n";
        let violations = check_code(code, "app/models/user.rb");

        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(&code[v.range.start..v.range.end], "get_user");
        assert!(v.message.contains("`user_for` or `find_user`"));

        let fix = v.fix.as_ref().unwrap();
        assert_eq!(fix.edits.len(), 1);
        assert_eq!(fix.edits[0].replacement, "user_for");
        assert_eq!(fix.edits[0].range, v.range);
    }

    #[test]
    fn test_accessor_not_reported() {
        let code = "def get_user\n  @user\nend\n";
        assert!(check_code(code, "app/models/user.rb").is_empty());
    }

    #[test]
    fn test_http_wrapper_not_reported() {
        let code = "def get_user(id)\n  connection.get(\"/users/#{id}\")\nend\n";
        assert!(check_code(code, "app/models/user.rb").is_empty());
    }

    #[test]
    fn test_collision_reports_without_fix() {
        let code = r#"
class UserService
  def user_for(id)
  end

  def get_user(id)
  end
end
"#;
        let violations = check_code(code, "app/services/user_service.rb");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].fix.is_none());
    }

    #[test]
    fn test_nested_definitions() {
        let code = r#"
class UserService
  def get_user(id)
    def helper_method
    end
  end
end
"#;
        let violations = check_code(code, "app/services/user_service.rb");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("user_for"));
    }
}
