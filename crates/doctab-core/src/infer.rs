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

//! The type inference ladder.
//!
//! [`infer_type`] determines the narrowest well-defined [`TargetType`] for
//! a node. Scalar classification runs a fixed-priority ladder over the raw
//! text:
//!
//! 1. Boolean spellings (`true`/`false`/`yes`/`no`/`on`/`off`)
//! 2. Integer literal (fits `i64`)
//! 3. Floating-point literal (requires a decimal point or exponent)
//! 4. Date (`%Y-%m-%d`)
//! 5. Timestamp (recognized format set)
//! 6. String (the universal fallback)
//!
//! First match wins; a token matching several grammars is classified by the
//! earliest. Inference is pure and total: it never fails, because every
//! scalar has at least the string fallback.

use crate::node::Node;
use crate::types::TargetType;
use crate::value::TIMESTAMP_PARSE_FORMATS;
use chrono::{NaiveDate, NaiveDateTime};

/// Infer the target type of a node.
///
/// - Scalars run the literal ladder above.
/// - Sequences whose elements all infer the same type become a list of that
///   type; disagreement (or emptiness) degrades the element type to string.
/// - Mappings become a struct with per-key inference in source order.
pub fn infer_type(node: &Node) -> TargetType {
    match node {
        Node::Scalar(text) => classify_scalar(text),
        Node::Sequence(elements) => {
            let mut element_type: Option<TargetType> = None;
            for element in elements {
                let inferred = infer_type(element);
                match &element_type {
                    None => element_type = Some(inferred),
                    Some(existing) if *existing == inferred => {}
                    Some(_) => return TargetType::list_of(TargetType::Varchar),
                }
            }
            TargetType::list_of(element_type.unwrap_or(TargetType::Varchar))
        }
        Node::Mapping(entries) => TargetType::Struct(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), infer_type(value)))
                .collect(),
        ),
    }
}

/// Classify raw scalar text under the literal ladder.
///
/// Null spellings classify as string: null pins no type, and string is the
/// lossless fallback.
pub fn classify_scalar(text: &str) -> TargetType {
    let text = text.trim();
    if is_null_text(text) {
        return TargetType::Varchar;
    }
    if parse_boolean_text(text).is_some() {
        return TargetType::Boolean;
    }
    if parse_integer_text(text).is_some() {
        return TargetType::BigInt;
    }
    if parse_double_text(text).is_some() {
        return TargetType::Double;
    }
    if parse_date_text(text).is_some() {
        return TargetType::Date;
    }
    if parse_timestamp_text(text).is_some() {
        return TargetType::Timestamp;
    }
    TargetType::Varchar
}

/// Returns true for the recognized null spellings.
pub fn is_null_text(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

/// Match the recognized boolean spellings.
pub fn parse_boolean_text(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

/// Parse an integer literal: optional sign, decimal digits, fits `i64`.
pub fn parse_integer_text(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let digits = match bytes.first() {
        Some(b'+') | Some(b'-') => &bytes[1..],
        _ => bytes,
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Parse a floating-point literal.
///
/// Requires a decimal point or exponent (a bare digit run is integer
/// territory), plus the document spellings for the non-finite values.
pub fn parse_double_text(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "inf" | "+inf" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" | "-inf" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" | "nan" => return Some(f64::NAN),
        _ => {}
    }

    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'+') | Some(b'-') | Some(b'.') | Some(b'0'..=b'9') => {}
        _ => return None,
    }
    if !bytes
        .iter()
        .all(|&b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    if !bytes.iter().any(u8::is_ascii_digit) {
        return None;
    }
    let has_point = memchr::memchr(b'.', bytes).is_some();
    let has_exponent = memchr::memchr2(b'e', b'E', bytes).is_some();
    if !has_point && !has_exponent {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Parse a date literal.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, crate::value::DATE_FORMAT).ok()
}

/// Parse a timestamp literal against the recognized format set.
pub fn parse_timestamp_text(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
