//! Candidate selection

use crate::definition::Definition;

pub const GET_PREFIX: &str = "get_";

/// Whether a definition is a candidate violation: `get_` followed by at least
/// one character, and at least one parameter of any kind.
pub fn matches(definition: &Definition<'_>) -> bool {
    has_get_prefix(definition.name) && !definition.parameters.is_empty()
}

pub fn has_get_prefix(name: &str) -> bool {
    name.strip_prefix(GET_PREFIX)
        .map_or(false, |rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::definitions;
    use crate::parse_ruby;

    fn first_matches(source: &str) -> bool {
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);
        matches(&defs[0])
    }

    #[test]
    fn test_prefix_shape() {
        assert!(has_get_prefix("get_user"));
        assert!(has_get_prefix("get_x"));
        assert!(!has_get_prefix("get_"));
        assert!(!has_get_prefix("get"));
        assert!(!has_get_prefix("getuser"));
        assert!(!has_get_prefix("forget_user"));
        assert!(!has_get_prefix("Get_user"));
    }

    #[test]
    fn test_any_parameter_kind_matches() {
        assert!(first_matches("def get_user(id)\nend\n"));
        assert!(first_matches("def get_user(id:, name:)\nend\n"));
        assert!(first_matches("def get_user(&block)\nend\n"));
        assert!(first_matches("def get_users(*ids)\nend\n"));
        assert!(first_matches("def get_user(**options)\nend\n"));
        assert!(first_matches("def self.get_user(id)\nend\n"));
    }

    #[test]
    fn test_accessor_exempt() {
        assert!(!first_matches("def get_user\n  @user\nend\n"));
        assert!(!first_matches("def get_user()\n  @user\nend\n"));
    }

    #[test]
    fn test_other_names_ignored() {
        assert!(!first_matches("def user_for(id)\nend\n"));
        assert!(!first_matches("def get(id)\nend\n"));
    }
}
