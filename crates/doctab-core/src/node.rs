// Dweve DocTab - Document to Table Bridge
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The parsed-document node model.
//!
//! A [`Node`] is the generic in-memory representation of one parsed
//! document: a tree of raw-text scalars, ordered sequences, and key-ordered
//! mappings. Nodes carry no type information; typing happens in the
//! inference and coercion engines.

/// A node in a parsed document tree.
///
/// Pure structure: no coercion logic lives here. Nodes are immutable once
/// produced by the grammar parser.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// A scalar with its raw source text.
    Scalar(String),
    /// An ordered sequence of nodes.
    Sequence(Vec<Node>),
    /// An ordered list of key/node pairs. Keys are unique within one
    /// mapping; source order is preserved.
    Mapping(Vec<(String, Node)>),
}

impl Node {
    /// Create a scalar node.
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    /// Create a sequence node.
    pub fn sequence(elements: Vec<Node>) -> Self {
        Self::Sequence(elements)
    }

    /// Create a mapping node.
    pub fn mapping(entries: Vec<(String, Node)>) -> Self {
        Self::Mapping(entries)
    }

    /// Returns true if this node is a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns true if this node is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns true if this node is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// The raw text of a scalar node. Defined only on scalars.
    pub fn scalar_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The ordered elements of a sequence node.
    pub fn elements(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The ordered entries of a mapping node.
    pub fn entries(&self) -> Option<&[(String, Node)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping entry by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// A short name for the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Total number of nodes in this tree, including this one.
    pub fn count_nodes(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Sequence(items) => 1 + items.iter().map(Node::count_nodes).sum::<usize>(),
            Self::Mapping(entries) => {
                1 + entries.iter().map(|(_, v)| v.count_nodes()).sum::<usize>()
            }
        }
    }

    /// Canonical text form of this node.
    ///
    /// A top-level scalar renders as its raw text; compound nodes render in
    /// inline flow form. This is the universal to-string fallback: every
    /// node has a canonical text form, so coercion to a string type never
    /// fails.
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            _ => self.flow_text(),
        }
    }

    fn flow_text(&self) -> String {
        match self {
            Self::Scalar(s) => flow_scalar(s),
            Self::Sequence(items) => {
                let inner: Vec<String> = items.iter().map(Node::flow_text).collect();
                format!("[{}]", inner.join(", "))
            }
            Self::Mapping(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", flow_scalar(k), v.flow_text()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

/// Quote a scalar for inline flow rendering when its text would collide
/// with flow syntax.
fn flow_scalar(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.contains([',', '[', ']', '{', '}', ':', '\n']);
    if needs_quotes {
        format!("'{}'", s.replace('\'', "''"))
    } else {
        s.to_string()
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mapping() -> Node {
        Node::mapping(vec![
            ("name".to_string(), Node::scalar("Alice")),
            ("age".to_string(), Node::scalar("30")),
        ])
    }

    // ==================== Kind predicate tests ====================

    #[test]
    fn test_is_scalar() {
        assert!(Node::scalar("x").is_scalar());
        assert!(!Node::sequence(vec![]).is_scalar());
        assert!(!Node::mapping(vec![]).is_scalar());
    }

    #[test]
    fn test_is_sequence() {
        assert!(Node::sequence(vec![]).is_sequence());
        assert!(!Node::scalar("x").is_sequence());
    }

    #[test]
    fn test_is_mapping() {
        assert!(Node::mapping(vec![]).is_mapping());
        assert!(!Node::scalar("x").is_mapping());
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(Node::scalar("x").kind_name(), "scalar");
        assert_eq!(Node::sequence(vec![]).kind_name(), "sequence");
        assert_eq!(Node::mapping(vec![]).kind_name(), "mapping");
    }

    // ==================== Accessor tests ====================

    #[test]
    fn test_scalar_text() {
        assert_eq!(Node::scalar("hello").scalar_text(), Some("hello"));
        assert_eq!(Node::sequence(vec![]).scalar_text(), None);
        assert_eq!(Node::mapping(vec![]).scalar_text(), None);
    }

    #[test]
    fn test_elements_preserves_order() {
        let node = Node::sequence(vec![Node::scalar("1"), Node::scalar("2"), Node::scalar("3")]);
        let elements = node.elements().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].scalar_text(), Some("1"));
        assert_eq!(elements[2].scalar_text(), Some("3"));
    }

    #[test]
    fn test_entries_preserves_source_order() {
        let node = sample_mapping();
        let entries = node.entries().unwrap();
        assert_eq!(entries[0].0, "name");
        assert_eq!(entries[1].0, "age");
    }

    #[test]
    fn test_get() {
        let node = sample_mapping();
        assert_eq!(node.get("age").unwrap().scalar_text(), Some("30"));
        assert!(node.get("missing").is_none());
        assert!(Node::scalar("x").get("key").is_none());
    }

    // ==================== count_nodes tests ====================

    #[test]
    fn test_count_nodes_scalar() {
        assert_eq!(Node::scalar("x").count_nodes(), 1);
    }

    #[test]
    fn test_count_nodes_nested() {
        let node = Node::mapping(vec![(
            "items".to_string(),
            Node::sequence(vec![Node::scalar("a"), Node::scalar("b")]),
        )]);
        // mapping + sequence + 2 scalars
        assert_eq!(node.count_nodes(), 4);
    }

    #[test]
    fn test_count_nodes_empty_compounds() {
        assert_eq!(Node::sequence(vec![]).count_nodes(), 1);
        assert_eq!(Node::mapping(vec![]).count_nodes(), 1);
    }

    // ==================== Canonical text tests ====================

    #[test]
    fn test_canonical_text_scalar_is_raw() {
        assert_eq!(Node::scalar("hello world").canonical_text(), "hello world");
        assert_eq!(Node::scalar("").canonical_text(), "");
    }

    #[test]
    fn test_canonical_text_sequence() {
        let node = Node::sequence(vec![Node::scalar("1"), Node::scalar("2")]);
        assert_eq!(node.canonical_text(), "[1, 2]");
    }

    #[test]
    fn test_canonical_text_mapping() {
        let node = sample_mapping();
        assert_eq!(node.canonical_text(), "{name: Alice, age: 30}");
    }

    #[test]
    fn test_canonical_text_quotes_colliding_scalars() {
        let node = Node::sequence(vec![Node::scalar("a, b"), Node::scalar("plain")]);
        assert_eq!(node.canonical_text(), "['a, b', plain]");
    }

    #[test]
    fn test_canonical_text_empty_compounds() {
        assert_eq!(Node::sequence(vec![]).canonical_text(), "[]");
        assert_eq!(Node::mapping(vec![]).canonical_text(), "{}");
    }

    #[test]
    fn test_display_matches_canonical_text() {
        let node = sample_mapping();
        assert_eq!(format!("{}", node), node.canonical_text());
    }

    #[test]
    fn test_node_clone_and_equality() {
        let node = sample_mapping();
        assert_eq!(node.clone(), node);
        assert_ne!(node, Node::scalar("x"));
    }
}
