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

//! The value coercion engine.
//!
//! [`coerce`] converts a [`Node`] into a typed [`Value`] under a target
//! type. The `ignore_errors` read option arrives here as an explicit
//! [`ErrorPolicy`] parameter: under [`ErrorPolicy::Nullify`] a failed
//! coercion yields [`Value::Null`] instead of an error.

use crate::error::{TableError, TableResult};
use crate::infer::{
    is_null_text, parse_boolean_text, parse_date_text, parse_double_text, parse_integer_text,
    parse_timestamp_text,
};
use crate::node::Node;
use crate::types::TargetType;
use crate::value::Value;

/// How coercion failures are handled.
///
/// Configuration errors are never subject to this policy; it governs
/// per-row parse failures and kind mismatches only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Raise a coercion error.
    Fail,
    /// Produce a null value.
    Nullify,
}

impl ErrorPolicy {
    /// Map the `ignore_errors` flag onto a policy.
    pub fn from_ignore_errors(ignore_errors: bool) -> Self {
        if ignore_errors {
            Self::Nullify
        } else {
            Self::Fail
        }
    }
}

/// Coerce a node to a target type.
///
/// - Any node coerces to `VARCHAR` via its canonical text form; this never
///   fails.
/// - Scalars parse under the target leaf grammar; null spellings coerce to
///   null under every target except `VARCHAR`.
/// - Sequences coerce element-wise against a list's element type; an empty
///   sequence is an empty list, not null.
/// - Mappings project onto a struct's declared fields: missing keys become
///   null fields, undeclared keys are dropped.
/// - Anything else is a kind mismatch, handled per the policy.
pub fn coerce(node: &Node, target: &TargetType, policy: ErrorPolicy) -> TableResult<Value> {
    match target {
        TargetType::Varchar => Ok(coerce_to_varchar(node)),
        TargetType::List(element) => match node {
            Node::Sequence(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(coerce(item, element, policy)?);
                }
                Ok(Value::List(values))
            }
            Node::Scalar(text) if is_null_text(text.trim()) => Ok(Value::Null),
            _ => kind_mismatch(node, target, policy),
        },
        TargetType::Struct(fields) => match node {
            Node::Mapping(_) => {
                let mut values = Vec::with_capacity(fields.len());
                for (name, field_type) in fields {
                    let value = match node.get(name) {
                        Some(child) => coerce(child, field_type, policy)
                            .map_err(|e| e.with_context(format!("field '{}'", name)))?,
                        None => Value::Null,
                    };
                    values.push((name.clone(), value));
                }
                Ok(Value::Struct(values))
            }
            Node::Scalar(text) if is_null_text(text.trim()) => Ok(Value::Null),
            _ => kind_mismatch(node, target, policy),
        },
        leaf => match node {
            Node::Scalar(text) => coerce_scalar(text, leaf, policy),
            _ => kind_mismatch(node, target, policy),
        },
    }
}

/// The universal string fallback: always succeeds, for any node kind.
fn coerce_to_varchar(node: &Node) -> Value {
    Value::Varchar(node.canonical_text())
}

fn coerce_scalar(text: &str, target: &TargetType, policy: ErrorPolicy) -> TableResult<Value> {
    let trimmed = text.trim();
    if is_null_text(trimmed) {
        return Ok(Value::Null);
    }

    let parsed = match target {
        TargetType::Boolean => parse_boolean_text(trimmed).map(Value::Boolean),
        TargetType::TinyInt => parse_integer_in_range(trimmed, i8::MIN as i64, i8::MAX as i64),
        TargetType::SmallInt => parse_integer_in_range(trimmed, i16::MIN as i64, i16::MAX as i64),
        TargetType::Integer => parse_integer_in_range(trimmed, i32::MIN as i64, i32::MAX as i64),
        TargetType::BigInt => parse_integer_text(trimmed).map(Value::Integer),
        TargetType::Double => parse_integer_text(trimmed)
            .map(|n| n as f64)
            .or_else(|| parse_double_text(trimmed))
            .map(Value::Double),
        TargetType::Date => parse_date_text(trimmed).map(Value::Date),
        TargetType::Timestamp => parse_timestamp_text(trimmed)
            .or_else(|| parse_date_text(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0)))
            .map(Value::Timestamp),
        // Varchar and compounds are dispatched before reaching here.
        _ => None,
    };

    match parsed {
        Some(value) => Ok(value),
        None => match policy {
            ErrorPolicy::Nullify => Ok(Value::Null),
            ErrorPolicy::Fail => Err(TableError::coercion(format!(
                "cannot parse '{}' as {}",
                trimmed, target
            ))),
        },
    }
}

fn parse_integer_in_range(text: &str, min: i64, max: i64) -> Option<Value> {
    let n = parse_integer_text(text)?;
    if n < min || n > max {
        return None;
    }
    Some(Value::Integer(n))
}

fn kind_mismatch(node: &Node, target: &TargetType, policy: ErrorPolicy) -> TableResult<Value> {
    match policy {
        ErrorPolicy::Nullify => Ok(Value::Null),
        ErrorPolicy::Fail => Err(TableError::coercion(format!(
            "cannot coerce {} node to {}",
            node.kind_name(),
            target
        ))),
    }
}
