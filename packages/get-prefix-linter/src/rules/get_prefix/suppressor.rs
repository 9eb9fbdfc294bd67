//! False-positive suppression
//!
//! A `get_` method with arguments is left alone when it is really a thin
//! wrapper around an HTTP GET. Two signal families are OR-ed:
//!
//! - body signals: any `.get(...)` call with an explicit receiver, or the
//!   construction of a GET request class (`Net::HTTP::Get.new(uri)`);
//! - path signals: a bare, receiverless `get(...)` call inside a file that
//!   looks like API client code (`clients/`, `controllers/`, `api/` or a file
//!   name containing `client`).
//!
//! Only call nodes of the syntax tree are inspected, so comments and string
//! contents never trigger suppression. Receivers are not typed: any `.get`
//! counts, and the rule accepts the resulting false negatives.

use crate::definition::Definition;
use crate::utils::{node_text, qualified_constant_name};
use std::path::Path;

/// Directory names that mark API client code
pub const CLIENT_DIRECTORIES: &[&str] = &["clients", "controllers", "api"];

/// File name fragment that marks API client code
pub const CLIENT_FILE_MARKER: &str = "client";

/// Final constant segment of a GET request class, e.g. `Net::HTTP::Get`
const GET_REQUEST_CLASS: &str = "Get";

/// HTTP evidence found in a method body
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HttpSignals {
    /// `recv.get(...)` on any receiver
    pub qualified_get: bool,
    /// receiverless `get(...)`
    pub bare_get: bool,
    /// `Namespace::Get.new(...)`, whether or not it is later sent with `.request`
    pub get_request: bool,
}

impl HttpSignals {
    pub fn collect(definition: &Definition<'_>) -> Self {
        let source = definition.source();
        let mut signals = HttpSignals::default();

        for node in definition.body_descendants() {
            if node.kind() != "call" {
                continue;
            }
            let method = match node.child_by_field_name("method") {
                Some(m) => node_text(&m, source),
                None => continue,
            };
            let receiver = node.child_by_field_name("receiver");

            match (method, receiver) {
                ("get", Some(_)) => signals.qualified_get = true,
                ("get", None) => signals.bare_get = true,
                ("new", Some(recv)) => {
                    if is_get_request_class(&recv, source) {
                        signals.get_request = true;
                    }
                }
                _ => {}
            }
        }

        signals
    }

    /// Body evidence that needs no help from the file path
    pub fn performs_http_get(&self) -> bool {
        self.qualified_get || self.get_request
    }
}

fn is_get_request_class(receiver: &tree_sitter::Node<'_>, source: &str) -> bool {
    if receiver.kind() != "scope_resolution" {
        return false;
    }
    qualified_constant_name(receiver, source)
        .and_then(|name| name.rsplit("::").next().map(|last| last == GET_REQUEST_CLASS))
        .unwrap_or(false)
}

/// Whether the file path looks like API/HTTP client code
pub fn is_client_path(file_path: &str) -> bool {
    let normalized = file_path.replace('\\', "/");
    let path = Path::new(&normalized);

    let in_client_dir = path.parent().map_or(false, |dir| {
        dir.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map_or(false, |s| CLIENT_DIRECTORIES.contains(&s))
        })
    });

    let client_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.to_lowercase().contains(CLIENT_FILE_MARKER));

    in_client_dir || client_file
}

/// Whether a matched candidate must not be reported
pub fn suppress(definition: &Definition<'_>, file_path: &str) -> bool {
    let signals = HttpSignals::collect(definition);
    signals.performs_http_get() || (signals.bare_get && is_client_path(file_path))
}
