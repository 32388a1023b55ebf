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

//! YAML document extraction.
//!
//! The grammar parser is `serde_yaml`; this module turns its values into
//! the crate-neutral [`Node`] model. Scalars are carried as raw text: a
//! YAML boolean becomes `"true"`/`"false"`, a null becomes `"~"`, numbers
//! keep their literal rendering. Typing is the inference/coercion engines'
//! job, not the parser's.

use doctab_core::{Node, TableError, TableResult};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

/// Parse raw bytes into an ordered sequence of document trees.
///
/// This is the parser boundary: with `ignore_errors` set, undecodable or
/// malformed input yields an empty document sequence instead of an error.
/// An empty or comment-only input is not an error either way; it simply
/// produces no documents.
pub fn extract_documents(bytes: &[u8], ignore_errors: bool) -> TableResult<Vec<Node>> {
    match parse_bytes(bytes) {
        Ok(documents) => Ok(documents),
        Err(_) if ignore_errors => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Parse raw bytes into document trees, reporting syntax errors.
pub fn parse_bytes(bytes: &[u8]) -> TableResult<Vec<Node>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| TableError::syntax(format!("input is not valid UTF-8: {}", e)))?;
    parse_str(text)
}

/// Parse a string holding zero or more `---`-separated documents.
pub fn parse_str(text: &str) -> TableResult<Vec<Node>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = YamlValue::deserialize(document).map_err(syntax_error)?;
        documents.push(value_to_node(&value));
    }
    Ok(documents)
}

fn syntax_error(e: serde_yaml::Error) -> TableError {
    let err = TableError::syntax(e.to_string());
    match e.location() {
        Some(location) => err.with_context(format!(
            "line {}, column {}",
            location.line(),
            location.column()
        )),
        None => err,
    }
}

fn value_to_node(value: &YamlValue) -> Node {
    match value {
        YamlValue::Null => Node::scalar("~"),
        YamlValue::Bool(b) => Node::scalar(if *b { "true" } else { "false" }),
        YamlValue::Number(n) => Node::scalar(n.to_string()),
        YamlValue::String(s) => Node::scalar(s.clone()),
        YamlValue::Sequence(items) => Node::sequence(items.iter().map(value_to_node).collect()),
        YamlValue::Mapping(map) => Node::mapping(
            map.iter()
                .map(|(key, value)| (key_text(key), value_to_node(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => value_to_node(&tagged.value),
    }
}

/// Mapping keys are carried as strings; non-string scalar keys are
/// stringified through the same raw-text rules as scalar nodes.
fn key_text(key: &YamlValue) -> String {
    value_to_node(key).canonical_text()
}
