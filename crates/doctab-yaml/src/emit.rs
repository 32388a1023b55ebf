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

//! The emission engine: typed values back to document text.
//!
//! Rendering is the inverse of coercion. The base rendering is controlled
//! by [`EmitStyle`] (block or flow); the layout wrappers sit on top:
//!
//! - [`emit_value`] — bare value
//! - [`emit_sequence_item`] — one element of an enclosing block sequence
//! - [`DocumentStream`] — a `---`-separated multi-document stream
//!
//! Emitted text is re-parseable: strings are quoted whenever re-parsing
//! would change their type or structure, so parse-then-coerce under the
//! original target type reproduces the input value.

use doctab_core::{classify_scalar, is_null_text, TargetType, Value};
use serde_yaml::Value as YamlValue;

/// Rendering style for the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStyle {
    /// Multi-line, indented.
    Block,
    /// Inline, bracketed.
    Flow,
}

/// Spaces per nesting level in block style.
const SPACES_PER_INDENT: usize = 2;

/// Marker prefixed to a block sequence item. Continuation lines are
/// re-indented by this marker's width.
const SEQUENCE_MARKER: &str = "- ";

/// Separator line between documents in a block stream.
const DOCUMENT_SEPARATOR: &str = "---";

/// Render a value as a bare document body.
pub fn emit_value(value: &Value, style: EmitStyle) -> String {
    render(value, style)
}

/// Render a value as a single item of an enclosing block sequence.
///
/// The first line gets the item marker; every continuation line is
/// re-indented by the marker's width so nested structure stays valid
/// inside the enclosing sequence.
pub fn emit_sequence_item(value: &Value, style: EmitStyle) -> String {
    prefix_marker(&render(value, style))
}

/// Emitter for a multi-document stream.
///
/// The first document renders unchanged; every subsequent document is
/// prefixed with a separator line, but only in block style. Flow documents
/// are self-terminating and never separator-prefixed.
#[derive(Debug)]
pub struct DocumentStream {
    style: EmitStyle,
    emitted: usize,
}

impl DocumentStream {
    /// Create a stream emitter with the given base style.
    pub fn new(style: EmitStyle) -> Self {
        Self { style, emitted: 0 }
    }

    /// Number of documents emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Render the next document in the stream.
    pub fn emit_next(&mut self, value: &Value) -> String {
        let base = render(value, self.style);
        let text = if self.emitted > 0 && self.style == EmitStyle::Block {
            format!("{}\n{}", DOCUMENT_SEPARATOR, base)
        } else {
            base
        };
        self.emitted += 1;
        text
    }
}

fn render(value: &Value, style: EmitStyle) -> String {
    match style {
        EmitStyle::Flow => render_flow(value),
        EmitStyle::Block => render_block(value),
    }
}

fn render_flow(value: &Value) -> String {
    match value {
        Value::Varchar(s) => quote_string(s),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(render_flow).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Struct(fields) => {
            let inner: Vec<String> = fields
                .iter()
                .map(|(name, value)| format!("{}: {}", quote_string(name), render_flow(value)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        scalar => scalar.to_string(),
    }
}

fn render_block(value: &Value) -> String {
    match value {
        Value::List(items) if !items.is_empty() => {
            let lines: Vec<String> = items
                .iter()
                .map(|item| prefix_marker(&render_block(item)))
                .collect();
            lines.join("\n")
        }
        Value::Struct(fields) if !fields.is_empty() => {
            let lines: Vec<String> = fields
                .iter()
                .map(|(name, value)| render_block_field(name, value))
                .collect();
            lines.join("\n")
        }
        // Scalars and empty compounds are single-line in either style.
        other => render_flow(other),
    }
}

fn render_block_field(name: &str, value: &Value) -> String {
    let key = quote_string(name);
    match value {
        Value::List(items) if !items.is_empty() => {
            format!("{}:\n{}", key, indent_lines(&render_block(value)))
        }
        Value::Struct(fields) if !fields.is_empty() => {
            format!("{}:\n{}", key, indent_lines(&render_block(value)))
        }
        other => format!("{}: {}", key, render_flow(other)),
    }
}

fn prefix_marker(body: &str) -> String {
    let continuation = " ".repeat(SEQUENCE_MARKER.len());
    let mut out = String::with_capacity(body.len() + SEQUENCE_MARKER.len());
    for (i, line) in body.lines().enumerate() {
        if i == 0 {
            out.push_str(SEQUENCE_MARKER);
        } else {
            out.push('\n');
            out.push_str(&continuation);
        }
        out.push_str(line);
    }
    out
}

fn indent_lines(body: &str) -> String {
    let pad = " ".repeat(SPACES_PER_INDENT);
    body.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Characters that must go through the escaped double-quote form:
/// controls, the Unicode line separators some parsers treat as line
/// breaks, and the code points the document character set excludes.
fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
}

/// Quote a string scalar if emitting it plain would change its meaning.
fn quote_string(s: &str) -> String {
    if s.chars().any(needs_escape) {
        double_quoted(s)
    } else if needs_quoting(s) {
        format!("'{}'", s.replace('\'', "''"))
    } else {
        s.to_string()
    }
}

fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || is_null_text(s) {
        return true;
    }
    // A plain rendering must re-read as this exact string, not as some
    // other literal (boolean spelling, number, date) or as structure.
    if classify_scalar(s) != TargetType::Varchar {
        return true;
    }
    if !reparses_as_plain_string(s) {
        return true;
    }
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return true;
    }
    let first = s.chars().next().unwrap_or(' ');
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return true;
    }
    // Flow context delimiters, and patterns that start a key or comment.
    s.contains([',', '[', ']', '{', '}']) || s.contains(": ") || s.ends_with(':') || s.contains(" #")
}

fn reparses_as_plain_string(s: &str) -> bool {
    match serde_yaml::from_str::<YamlValue>(s) {
        Ok(YamlValue::String(parsed)) => parsed == s,
        _ => false,
    }
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
