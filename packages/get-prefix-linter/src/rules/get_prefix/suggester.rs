//! Replacement names for a `get_` method

use super::matcher::GET_PREFIX;

/// Trailing method-name characters that must stay at the end of the name
const NAME_SIGILS: &[char] = &['?', '!', '='];

/// The two names offered in place of `get_<remainder>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// `<remainder>_for`, used by the auto-fix
    pub for_form: String,
    /// `find_<remainder>`
    pub find_form: String,
}

impl Suggestion {
    pub fn message(&self) -> String {
        format!(
            "Avoid using `get_` prefix for methods with arguments. \
             Consider using `{}` or `{}` instead.",
            self.for_form, self.find_form
        )
    }
}

/// Derive the suggestion from the method name.
///
/// A trailing `?`, `!` or `=` is kept at the end of both forms, so
/// `get_user!` becomes `user_for!` / `find_user!`.
pub fn suggest(name: &str) -> Suggestion {
    let remainder = name.strip_prefix(GET_PREFIX).unwrap_or(name);
    let stem = remainder.trim_end_matches(NAME_SIGILS);
    let sigil = &remainder[stem.len()..];

    Suggestion {
        for_form: format!("{}_for{}", stem, sigil),
        find_form: format!("find_{}{}", stem, sigil),
    }
}
