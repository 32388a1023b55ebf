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

//! The target type system for typed-table projection.
//!
//! [`TargetType`] describes how a node is projected into a typed column or
//! field. Types round-trip through a string type-name grammar
//! ([`std::str::FromStr`] / [`std::fmt::Display`]) because explicit column
//! declarations arrive as name/type-name string pairs:
//!
//! - leaf names: `BOOLEAN`, `TINYINT`, `SMALLINT`, `INTEGER`, `BIGINT`,
//!   `DOUBLE`, `VARCHAR`, `DATE`, `TIMESTAMP` (plus common aliases such as
//!   `BOOL`, `INT`, `STRING`, `DATETIME`)
//! - lists: `T[]`, e.g. `INTEGER[]`
//! - structs: `STRUCT(name T, ...)`, e.g. `STRUCT(id BIGINT, tags VARCHAR[])`

use crate::error::{TableError, TableResult};
use std::fmt;
use std::str::FromStr;

/// The type a node is coerced into.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    /// Boolean value.
    Boolean,
    /// 8-bit signed integer.
    TinyInt,
    /// 16-bit signed integer.
    SmallInt,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    BigInt,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string. The universal fallback: every node coerces to it.
    Varchar,
    /// Calendar date.
    Date,
    /// Date and time of day, no timezone.
    Timestamp,
    /// Homogeneous ordered list. One element type applies to every element.
    List(Box<TargetType>),
    /// Ordered named fields. Field names are unique and order-significant.
    Struct(Vec<(String, TargetType)>),
}

impl TargetType {
    /// Returns true for non-compound types.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Struct(_))
    }

    /// Shorthand for a list of this type.
    pub fn list_of(element: TargetType) -> Self {
        Self::List(Box::new(element))
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::TinyInt => write!(f, "TINYINT"),
            Self::SmallInt => write!(f, "SMALLINT"),
            Self::Integer => write!(f, "INTEGER"),
            Self::BigInt => write!(f, "BIGINT"),
            Self::Double => write!(f, "DOUBLE"),
            Self::Varchar => write!(f, "VARCHAR"),
            Self::Date => write!(f, "DATE"),
            Self::Timestamp => write!(f, "TIMESTAMP"),
            Self::List(element) => write!(f, "{}[]", element),
            Self::Struct(fields) => {
                write!(f, "STRUCT(")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", name, ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl FromStr for TargetType {
    type Err = TableError;

    fn from_str(s: &str) -> TableResult<Self> {
        parse_type_name(s)
    }
}

/// Parse a type name string into a [`TargetType`].
///
/// Unparseable names are configuration errors: they arrive from explicit
/// column declarations and are rejected at schema-resolution time, before
/// any row is coerced.
pub fn parse_type_name(s: &str) -> TableResult<TargetType> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TableError::configuration("empty type name"));
    }

    // List suffix binds last: "STRUCT(a INTEGER)[]" is a list of structs.
    if let Some(element) = s.strip_suffix("[]") {
        return Ok(TargetType::list_of(parse_type_name(element)?));
    }

    let upper = s.to_ascii_uppercase();
    if upper.starts_with("STRUCT(") && upper.ends_with(')') {
        return parse_struct_body(&s["STRUCT(".len()..s.len() - 1]);
    }

    match upper.as_str() {
        "BOOLEAN" | "BOOL" => Ok(TargetType::Boolean),
        "TINYINT" | "INT1" => Ok(TargetType::TinyInt),
        "SMALLINT" | "INT2" => Ok(TargetType::SmallInt),
        "INTEGER" | "INT" | "INT4" => Ok(TargetType::Integer),
        "BIGINT" | "INT8" | "LONG" => Ok(TargetType::BigInt),
        "DOUBLE" | "FLOAT8" => Ok(TargetType::Double),
        "VARCHAR" | "STRING" | "TEXT" => Ok(TargetType::Varchar),
        "DATE" => Ok(TargetType::Date),
        "TIMESTAMP" | "DATETIME" => Ok(TargetType::Timestamp),
        _ => Err(TableError::configuration(format!(
            "unrecognized type name '{}'",
            s
        ))),
    }
}

fn parse_struct_body(body: &str) -> TableResult<TargetType> {
    let mut fields: Vec<(String, TargetType)> = Vec::new();

    for field in split_top_level(body) {
        let field = field.trim();
        if field.is_empty() {
            return Err(TableError::configuration(
                "empty field in STRUCT type declaration",
            ));
        }
        let (name, ty_name) = match field.split_once(char::is_whitespace) {
            Some(parts) => parts,
            None => {
                return Err(TableError::configuration(format!(
                    "STRUCT field '{}' is missing a type",
                    field
                )));
            }
        };
        let name = name.trim();
        if fields.iter().any(|(existing, _)| existing == name) {
            return Err(TableError::configuration(format!(
                "duplicate STRUCT field name '{}'",
                name
            )));
        }
        let ty = parse_type_name(ty_name)?;
        fields.push((name.to_string(), ty));
    }

    if fields.is_empty() {
        return Err(TableError::configuration(
            "STRUCT type declaration has no fields",
        ));
    }
    Ok(TargetType::Struct(fields))
}

/// Split on commas at parenthesis depth zero, so nested STRUCT field lists
/// stay intact.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < s.len() || !parts.is_empty() || !s.trim().is_empty() {
        parts.push(&s[start..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // ==================== Leaf parsing tests ====================

    #[test]
    fn test_parse_leaf_names() {
        assert_eq!(parse_type_name("BOOLEAN").unwrap(), TargetType::Boolean);
        assert_eq!(parse_type_name("TINYINT").unwrap(), TargetType::TinyInt);
        assert_eq!(parse_type_name("SMALLINT").unwrap(), TargetType::SmallInt);
        assert_eq!(parse_type_name("INTEGER").unwrap(), TargetType::Integer);
        assert_eq!(parse_type_name("BIGINT").unwrap(), TargetType::BigInt);
        assert_eq!(parse_type_name("DOUBLE").unwrap(), TargetType::Double);
        assert_eq!(parse_type_name("VARCHAR").unwrap(), TargetType::Varchar);
        assert_eq!(parse_type_name("DATE").unwrap(), TargetType::Date);
        assert_eq!(parse_type_name("TIMESTAMP").unwrap(), TargetType::Timestamp);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_type_name("varchar").unwrap(), TargetType::Varchar);
        assert_eq!(parse_type_name("Integer").unwrap(), TargetType::Integer);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse_type_name("BOOL").unwrap(), TargetType::Boolean);
        assert_eq!(parse_type_name("INT").unwrap(), TargetType::Integer);
        assert_eq!(parse_type_name("INT8").unwrap(), TargetType::BigInt);
        assert_eq!(parse_type_name("STRING").unwrap(), TargetType::Varchar);
        assert_eq!(parse_type_name("TEXT").unwrap(), TargetType::Varchar);
        assert_eq!(parse_type_name("DATETIME").unwrap(), TargetType::Timestamp);
        assert_eq!(parse_type_name("FLOAT8").unwrap(), TargetType::Double);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_type_name("  BIGINT  ").unwrap(), TargetType::BigInt);
    }

    // ==================== Compound parsing tests ====================

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_type_name("INTEGER[]").unwrap(),
            TargetType::list_of(TargetType::Integer)
        );
    }

    #[test]
    fn test_parse_nested_list() {
        assert_eq!(
            parse_type_name("VARCHAR[][]").unwrap(),
            TargetType::list_of(TargetType::list_of(TargetType::Varchar))
        );
    }

    #[test]
    fn test_parse_struct() {
        let ty = parse_type_name("STRUCT(name VARCHAR, age INTEGER)").unwrap();
        assert_eq!(
            ty,
            TargetType::Struct(vec![
                ("name".to_string(), TargetType::Varchar),
                ("age".to_string(), TargetType::Integer),
            ])
        );
    }

    #[test]
    fn test_parse_nested_struct() {
        let ty = parse_type_name("STRUCT(id BIGINT, inner STRUCT(x DOUBLE, y DOUBLE))").unwrap();
        match ty {
            TargetType::Struct(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].0, "inner");
                assert!(matches!(fields[1].1, TargetType::Struct(_)));
            }
            other => panic!("expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_of_struct() {
        let ty = parse_type_name("STRUCT(a INTEGER)[]").unwrap();
        assert!(matches!(ty, TargetType::List(_)));
    }

    // ==================== Error cases ====================

    #[test]
    fn test_parse_unknown_name_is_configuration_error() {
        let err = parse_type_name("WIDGET").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_parse_empty_name() {
        assert!(parse_type_name("").is_err());
        assert!(parse_type_name("   ").is_err());
    }

    #[test]
    fn test_parse_empty_struct() {
        assert!(parse_type_name("STRUCT()").is_err());
    }

    #[test]
    fn test_parse_struct_field_missing_type() {
        assert!(parse_type_name("STRUCT(name)").is_err());
    }

    #[test]
    fn test_parse_struct_duplicate_field() {
        assert!(parse_type_name("STRUCT(a INTEGER, a VARCHAR)").is_err());
    }

    // ==================== Display round-trip tests ====================

    #[test]
    fn test_display_leaf_names() {
        assert_eq!(TargetType::BigInt.to_string(), "BIGINT");
        assert_eq!(TargetType::Varchar.to_string(), "VARCHAR");
    }

    #[test]
    fn test_display_compound() {
        assert_eq!(
            TargetType::list_of(TargetType::Integer).to_string(),
            "INTEGER[]"
        );
        let ty = TargetType::Struct(vec![
            ("name".to_string(), TargetType::Varchar),
            ("tags".to_string(), TargetType::list_of(TargetType::Varchar)),
        ]);
        assert_eq!(ty.to_string(), "STRUCT(name VARCHAR, tags VARCHAR[])");
    }

    #[test]
    fn test_type_name_round_trip() {
        let cases = [
            "BOOLEAN",
            "TINYINT",
            "SMALLINT",
            "INTEGER",
            "BIGINT",
            "DOUBLE",
            "VARCHAR",
            "DATE",
            "TIMESTAMP",
            "INTEGER[]",
            "VARCHAR[][]",
            "STRUCT(name VARCHAR, age INTEGER)",
            "STRUCT(id BIGINT, inner STRUCT(x DOUBLE, y DOUBLE), tags VARCHAR[])",
        ];
        for case in cases {
            let ty = parse_type_name(case).unwrap();
            assert_eq!(ty.to_string(), case);
            assert_eq!(parse_type_name(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn test_from_str_trait() {
        let ty: TargetType = "BIGINT".parse().unwrap();
        assert_eq!(ty, TargetType::BigInt);
    }

    #[test]
    fn test_is_leaf() {
        assert!(TargetType::Boolean.is_leaf());
        assert!(TargetType::Varchar.is_leaf());
        assert!(!TargetType::list_of(TargetType::Varchar).is_leaf());
        assert!(!TargetType::Struct(vec![("a".to_string(), TargetType::Integer)]).is_leaf());
    }
}
