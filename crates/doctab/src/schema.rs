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

//! Resolved table schemas.
//!
//! A [`Schema`] is resolved exactly once per read — from the caller's
//! explicit columns, else from the first row, else the single-column
//! string fallback — and is immutable afterwards. Resolution is a pure
//! function of its inputs; nothing fills caller-provided collections.

use doctab_core::{infer_type, parse_type_name, Node, TableError, TableResult, TargetType};

/// Column name used when rows are not mappings and for the empty-input
/// fallback schema.
pub const FALLBACK_COLUMN: &str = "value";

/// The resolved schema of a row batch: parallel ordered column names and
/// target types. Names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    names: Vec<String>,
    types: Vec<TargetType>,
}

impl Schema {
    /// Build a schema from parallel name/type sequences.
    pub fn new(names: Vec<String>, types: Vec<TargetType>) -> TableResult<Self> {
        if names.is_empty() {
            return Err(TableError::configuration("schema has no columns"));
        }
        if names.len() != types.len() {
            return Err(TableError::configuration(format!(
                "schema has {} names but {} types",
                names.len(),
                types.len()
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(TableError::configuration("empty column name"));
            }
            if names[..i].contains(name) {
                return Err(TableError::configuration(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }
        Ok(Self { names, types })
    }

    /// Resolve a schema from explicit (name, type-name) declarations.
    ///
    /// Every type name must parse; failures are configuration errors
    /// carrying the column name.
    pub fn from_declared(columns: &[(String, String)]) -> TableResult<Self> {
        if columns.is_empty() {
            return Err(TableError::configuration(
                "columns must declare at least one column",
            ));
        }
        let mut names = Vec::with_capacity(columns.len());
        let mut types = Vec::with_capacity(columns.len());
        for (name, type_name) in columns {
            if type_name.trim().is_empty() {
                return Err(TableError::configuration(format!(
                    "column '{}' has an empty type name",
                    name
                )));
            }
            let ty = parse_type_name(type_name)
                .map_err(|e| e.with_context(format!("column '{}'", name)))?;
            names.push(name.clone());
            types.push(ty);
        }
        Self::new(names, types)
    }

    /// Resolve a schema from the first row of a batch.
    ///
    /// Mapping rows contribute one column per key in source order;
    /// anything else becomes a single [`FALLBACK_COLUMN`]. With
    /// auto-detection off every column is a string.
    pub fn infer_from_node(node: &Node, auto_detect: bool) -> Self {
        let infer = |node: &Node| {
            if auto_detect {
                infer_type(node)
            } else {
                TargetType::Varchar
            }
        };
        match node.entries() {
            Some(entries) if !entries.is_empty() => Self {
                names: entries.iter().map(|(key, _)| key.clone()).collect(),
                types: entries.iter().map(|(_, value)| infer(value)).collect(),
            },
            _ => Self {
                names: vec![FALLBACK_COLUMN.to_string()],
                types: vec![infer(node)],
            },
        }
    }

    /// The single-column string schema used when there is no input to
    /// infer from.
    pub fn fallback() -> Self {
        Self {
            names: vec![FALLBACK_COLUMN.to_string()],
            types: vec![TargetType::Varchar],
        }
    }

    /// Ordered column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Ordered column types, parallel to [`Schema::names`].
    pub fn types(&self) -> &[TargetType] {
        &self.types
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Iterate columns as (name, type) pairs.
    pub fn columns(&self) -> impl Iterator<Item = (&String, &TargetType)> {
        self.names.iter().zip(self.types.iter())
    }
}
