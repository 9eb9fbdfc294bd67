//! Auto-fix edits
//!
//! Only the name token of the declaration is replaced. Call sites are never
//! touched, in this file or any other.

use super::suggester::suggest;
use crate::definition::Definition;
use crate::models::Edit;

/// Result of trying to rename a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Applied(Edit),
    /// Another method of the same namespace already uses the new name
    SkippedDueToCollision { name: String },
}

/// Edit replacing the name token with the `_for` form
pub fn rewrite(definition: &Definition<'_>) -> Edit {
    Edit::new(definition.name_range, suggest(definition.name).for_form)
}

/// Like [`rewrite`], but refuses to shadow an existing sibling method
pub fn rename(definition: &Definition<'_>, siblings: &[&str]) -> RenameOutcome {
    let edit = rewrite(definition);
    if siblings.contains(&edit.replacement.as_str()) {
        RenameOutcome::SkippedDueToCollision {
            name: edit.replacement,
        }
    } else {
        RenameOutcome::Applied(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::definitions;
    use crate::models::ByteRange;
    use crate::parse_ruby;

    #[test]
    fn test_rewrite_name_token_only() {
        let source = "def get_user(id)\n  User.find(id)\nend\n";
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);

        let edit = rewrite(&defs[0]);
        assert_eq!(edit.range, ByteRange::new(4, 12));
        assert_eq!(edit.replacement, "user_for");

        let fixed = format!(
            "{}{}{}",
            &source[..edit.range.start],
            edit.replacement,
            &source[edit.range.end..]
        );
        assert_eq!(fixed, "def user_for(id)\n  User.find(id)\nend\n");
    }

    #[test]
    fn test_rename_collision() {
        let source = "def user_for(id)\nend\n\ndef get_user(id)\nend\n";
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);
        let get_user = &defs[1];

        assert_eq!(
            rename(get_user, &get_user.sibling_names()),
            RenameOutcome::SkippedDueToCollision {
                name: "user_for".to_string()
            }
        );
        assert!(matches!(
            rename(get_user, &["find_user"]),
            RenameOutcome::Applied(_)
        ));
    }
}
