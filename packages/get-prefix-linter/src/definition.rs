//! Ruby method definitions as seen by the rules
//!
//! A [`Definition`] is an immutable view over a `def` (or `def self.`) node of
//! the parsed tree: its name, its parameters tagged by kind, the nodes making
//! up its body and the byte ranges of the name token and of the header.

use crate::models::ByteRange;
use crate::utils::{descendants, node_text};
use tree_sitter::Node;

/// Node kinds that declare a method
const DEFINITION_KINDS: &[&str] = &["method", "singleton_method"];

/// Node kinds that open a new method namespace
const SCOPE_KINDS: &[&str] = &["class", "module", "singleton_class", "program"];

/// Kind of a method parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// `a`, `a = 1`, `(a, b)`
    Positional,
    /// `a:`, `a: 1`
    Keyword,
    /// `&block`, `&`
    Block,
    /// `*args`, `*`
    Splat,
    /// `**opts`, `**`, `**nil`
    DoubleSplat,
    /// `...`
    Forward,
}

impl ParameterKind {
    fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "identifier" | "optional_parameter" | "destructured_parameter" => {
                Some(Self::Positional)
            }
            "keyword_parameter" => Some(Self::Keyword),
            "block_parameter" => Some(Self::Block),
            "splat_parameter" => Some(Self::Splat),
            "hash_splat_parameter" | "hash_splat_nil" => Some(Self::DoubleSplat),
            "forward_parameter" => Some(Self::Forward),
            _ => None,
        }
    }
}

/// A single declared parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub kind: ParameterKind,
    pub text: &'a str,
}

/// A parsed method declaration
#[derive(Debug, Clone)]
pub struct Definition<'a> {
    pub name: &'a str,
    pub parameters: Vec<Parameter<'a>>,
    /// Top-level nodes of the method body (empty for an empty method)
    pub body: Vec<Node<'a>>,
    pub name_range: ByteRange,
    pub header_range: ByteRange,
    node: Node<'a>,
    source: &'a str,
}

impl<'a> Definition<'a> {
    /// Build a definition from a `method` or `singleton_method` node
    pub fn from_node(node: Node<'a>, source: &'a str) -> Option<Self> {
        if !DEFINITION_KINDS.contains(&node.kind()) {
            return None;
        }

        let name_node = node.child_by_field_name("name")?;
        let params_node = node.child_by_field_name("parameters");
        let object_node = node.child_by_field_name("object");

        let parameters = match params_node {
            Some(params) => {
                let mut cursor = params.walk();
                let parameters: Vec<Parameter<'a>> = params
                    .named_children(&mut cursor)
                    .filter_map(|p| {
                        ParameterKind::from_node_kind(p.kind()).map(|kind| Parameter {
                            kind,
                            text: node_text(&p, source),
                        })
                    })
                    .collect();
                parameters
            }
            None => Vec::new(),
        };

        let mut cursor = node.walk();
        let body: Vec<Node<'a>> = node
            .named_children(&mut cursor)
            .filter(|child| {
                *child != name_node && Some(*child) != params_node && Some(*child) != object_node
            })
            .collect();

        let header_end = params_node.unwrap_or(name_node).end_byte();

        Some(Self {
            name: node_text(&name_node, source),
            parameters,
            body,
            name_range: ByteRange::of(&name_node),
            header_range: ByteRange::new(node.start_byte(), header_end),
            node,
            source,
        })
    }

    /// Whether this is a `def self.name` / `def obj.name` declaration
    pub fn is_singleton(&self) -> bool {
        self.node.kind() == "singleton_method"
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Every named node inside the body, in source order
    pub fn body_descendants(&self) -> Vec<Node<'a>> {
        self.body.iter().flat_map(|n| descendants(*n)).collect()
    }

    /// Names of the other methods declared in the same namespace.
    ///
    /// The namespace is the nearest enclosing class, module, singleton class
    /// or the file itself. Only declarations of the same flavour (instance vs
    /// singleton) are returned since they cannot clash with each other.
    pub fn sibling_names(&self) -> Vec<&'a str> {
        let scope = enclosing_scope(self.node);
        let mut names = Vec::new();
        let mut stack = vec![scope];

        while let Some(current) = stack.pop() {
            let mut cursor = current.walk();
            let children: Vec<Node<'a>> = current.named_children(&mut cursor).collect();
            for child in children {
                if SCOPE_KINDS.contains(&child.kind()) {
                    continue;
                }
                if child != self.node && child.kind() == self.node.kind() {
                    if let Some(name) = child.child_by_field_name("name") {
                        names.push(node_text(&name, self.source));
                    }
                }
                stack.push(child);
            }
        }

        names
    }
}

fn enclosing_scope(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if SCOPE_KINDS.contains(&parent.kind()) {
            return parent;
        }
        current = parent;
    }
    current
}

/// All method definitions in a tree, in source order
pub fn definitions<'a>(root: Node<'a>, source: &'a str) -> Vec<Definition<'a>> {
    descendants(root)
        .into_iter()
        .filter_map(|n| Definition::from_node(n, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ruby;

    fn kinds(source: &str) -> Vec<ParameterKind> {
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);
        defs[0].parameters.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn test_name_and_ranges() {
        let source = "def get_user(id)\n  User.find(id)\nend\n";
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);

        assert_eq!(defs.len(), 1);
        let def = &defs[0];
        assert_eq!(def.name, "get_user");
        assert_eq!(def.name_range, ByteRange::new(4, 12));
        assert_eq!(&source[def.header_range.start..def.header_range.end], "def get_user(id)");
        assert_eq!(def.parameters.len(), 1);
        assert_eq!(def.parameters[0].text, "id");
        assert!(!def.is_singleton());
    }

    #[test]
    fn test_parameter_kinds() {
        use ParameterKind::*;

        assert_eq!(kinds("def get_a(a, b = 1)\nend\n"), vec![Positional, Positional]);
        assert_eq!(kinds("def get_a(id:, name: nil)\nend\n"), vec![Keyword, Keyword]);
        assert_eq!(kinds("def get_a(&block)\nend\n"), vec![Block]);
        assert_eq!(kinds("def get_a(*ids)\nend\n"), vec![Splat]);
        assert_eq!(kinds("def get_a(**options)\nend\n"), vec![DoubleSplat]);
        assert_eq!(kinds("def get_a(...)\nend\n"), vec![Forward]);
        assert!(kinds("def get_a\nend\n").is_empty());
    }

    #[test]
    fn test_bare_parameters() {
        use ParameterKind::*;
        assert_eq!(kinds("def get_a id, &blk\nend\n"), vec![Positional, Block]);
    }

    #[test]
    fn test_singleton_definition() {
        let source = "class A\n  def self.get_user(id)\n  end\nend\n";
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);

        assert_eq!(defs.len(), 1);
        assert!(defs[0].is_singleton());
        assert_eq!(defs[0].name, "get_user");
        assert!(defs[0].body.is_empty());
    }

    #[test]
    fn test_body_excludes_header() {
        let source = "def get_user(id = default_id)\n  find(id)\nend\n";
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);

        let calls: Vec<&str> = defs[0]
            .body_descendants()
            .into_iter()
            .filter(|n| n.kind() == "call")
            .map(|n| node_text(&n, source))
            .collect();
        assert_eq!(calls, vec!["find(id)"]);
    }

    #[test]
    fn test_sibling_names() {
        let source = r#"
class UserService
  def user_for(id)
  end

  private def get_user(id)
  end

  def self.other_for(id)
  end

  class Nested
    def hidden_for(id)
    end
  end
end

def top_level_for(id)
end
"#;
        let tree = parse_ruby(source).unwrap();
        let defs = definitions(tree.root_node(), source);
        let get_user = defs.iter().find(|d| d.name == "get_user").unwrap();

        let siblings = get_user.sibling_names();
        assert_eq!(siblings, vec!["user_for"]);
    }
}
