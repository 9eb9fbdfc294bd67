//! Utility functions for syntax tree analysis

use tree_sitter::Node;

/// Source text covered by a node
pub fn node_text<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// All named descendants of `node` in pre-order, `node` included
pub fn descendants<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut out = Vec::new();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        out.push(current);
        let mut cursor = current.walk();
        let children: Vec<_> = current.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    out
}

/// Fully qualified name of a constant reference such as `Net::HTTP::Get`.
///
/// Returns `None` for anything that is not a plain constant path. A leading
/// `::` (top-level lookup) is dropped.
pub fn qualified_constant_name(node: &Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "constant" => Some(node_text(node, source).to_string()),
        "scope_resolution" => {
            let name = node.child_by_field_name("name")?;
            if name.kind() != "constant" {
                return None;
            }
            let name = node_text(&name, source);
            match node.child_by_field_name("scope") {
                Some(scope) => {
                    let scope = qualified_constant_name(&scope, source)?;
                    Some(format!("{}::{}", scope, name))
                }
                None => Some(name.to_string()),
            }
        }
        _ => None,
    }
}

/// First node in the tree that failed to parse
pub fn first_error_node<'a>(root: Node<'a>) -> Option<Node<'a>> {
    if !root.has_error() {
        return None;
    }
    descendants(root)
        .into_iter()
        .find(|n| n.is_error() || n.is_missing())
        .or(Some(root))
}

/// Ruby file extensions picked up when walking directories
pub const RUBY_EXTENSIONS: &[&str] = &["rb", "rake", "gemspec", "ru"];

/// Extension-less Ruby files recognized by name
pub const RUBY_FILE_NAMES: &[&str] = &["Gemfile", "Rakefile", "Guardfile", "Capfile"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ruby;

    #[test]
    fn test_qualified_constant_name() {
        let source = "Net::HTTP::Get.new(uri)\n::Faraday.get(url)\nHTTP.get(url)\n";
        let tree = parse_ruby(source).unwrap();
        let receivers: Vec<String> = descendants(tree.root_node())
            .into_iter()
            .filter(|n| n.kind() == "call")
            .filter_map(|n| n.child_by_field_name("receiver"))
            .filter_map(|r| qualified_constant_name(&r, source))
            .collect();

        assert_eq!(receivers, vec!["Net::HTTP::Get", "Faraday", "HTTP"]);
    }

    #[test]
    fn test_first_error_node() {
        let tree = parse_ruby("def ok(a)\nend\n").unwrap();
        assert!(first_error_node(tree.root_node()).is_none());

        let tree = parse_ruby("def broken(a\n").unwrap();
        assert!(first_error_node(tree.root_node()).is_some());
    }
}
