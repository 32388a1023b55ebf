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

//! Read configuration.
//!
//! [`ReadOptions`] is resolved once per read operation. Malformed
//! configuration (empty column lists, bad type names, a non-positive size
//! limit) is a configuration error raised at schema-resolution time,
//! before any row is coerced, and is never suppressed by `ignore_errors`.

use doctab_core::{TableError, TableResult};

/// Default per-row node budget.
///
/// Bounds the memory one row may pin, protecting against pathological
/// documents. High enough for large real-world rows; tighten it for
/// untrusted input.
pub const DEFAULT_MAXIMUM_OBJECT_SIZE: usize = 16_777_216;

/// Options for one read operation.
///
/// # Examples
///
/// ```rust
/// use doctab::ReadOptions;
///
/// // Auto-detection with default limits
/// let options = ReadOptions::default();
/// assert!(options.auto_detect);
///
/// // Explicit columns force auto-detection off
/// let options = ReadOptions::builder()
///     .column("name", "VARCHAR")
///     .column("age", "INTEGER")
///     .build();
/// assert!(!options.effective_auto_detect());
/// ```
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Explicit column declarations as ordered (name, type-name) pairs.
    /// Mutually exclusive with auto-detection.
    pub columns: Option<Vec<(String, String)>>,
    /// Infer column types from the first row. Ignored when explicit
    /// columns are declared.
    pub auto_detect: bool,
    /// Tolerate per-document/per-file errors: failed coercions become
    /// null, malformed files are skipped.
    pub ignore_errors: bool,
    /// Maximum number of nodes a single row may hold. Must be positive.
    pub maximum_object_size: usize,
    /// Treat input as a stream of `---`-separated documents. When
    /// disabled, a multi-document input is a syntax error.
    pub multi_document: bool,
    /// Expand a root-level sequence into one row per element instead of
    /// one row holding the whole sequence.
    pub expand_root_sequence: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            columns: None,
            auto_detect: true,
            ignore_errors: false,
            maximum_object_size: DEFAULT_MAXIMUM_OBJECT_SIZE,
            multi_document: true,
            expand_root_sequence: true,
        }
    }
}

impl ReadOptions {
    /// Creates a new builder for `ReadOptions`.
    pub fn builder() -> ReadOptionsBuilder {
        ReadOptionsBuilder::new()
    }

    /// Whether auto-detection is actually in effect: explicit columns
    /// force it off regardless of the flag.
    pub fn effective_auto_detect(&self) -> bool {
        self.columns.is_none() && self.auto_detect
    }

    /// Validate the configuration. Called once at the start of every read.
    pub fn validate(&self) -> TableResult<()> {
        if self.maximum_object_size == 0 {
            return Err(TableError::configuration(
                "maximum_object_size must be positive",
            ));
        }
        if let Some(columns) = &self.columns {
            if columns.is_empty() {
                return Err(TableError::configuration(
                    "columns must declare at least one column",
                ));
            }
        }
        Ok(())
    }
}

/// Builder for [`ReadOptions`].
///
/// # Examples
///
/// ```rust
/// use doctab::ReadOptions;
///
/// let options = ReadOptions::builder()
///     .ignore_errors(true)
///     .maximum_object_size(100_000)
///     .multi_document(false)
///     .build();
/// assert!(options.ignore_errors);
/// ```
#[derive(Debug, Clone)]
pub struct ReadOptionsBuilder {
    options: ReadOptions,
}

impl ReadOptionsBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            options: ReadOptions::default(),
        }
    }

    /// Append one explicit column declaration.
    pub fn column(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.options
            .columns
            .get_or_insert_with(Vec::new)
            .push((name.into(), type_name.into()));
        self
    }

    /// Replace the explicit column declarations.
    pub fn columns(mut self, columns: Vec<(String, String)>) -> Self {
        self.options.columns = Some(columns);
        self
    }

    /// Enable or disable auto type detection.
    pub fn auto_detect(mut self, auto_detect: bool) -> Self {
        self.options.auto_detect = auto_detect;
        self
    }

    /// Enable or disable error tolerance.
    pub fn ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.options.ignore_errors = ignore_errors;
        self
    }

    /// Set the per-row node budget.
    pub fn maximum_object_size(mut self, size: usize) -> Self {
        self.options.maximum_object_size = size;
        self
    }

    /// Enable or disable multi-document streams.
    pub fn multi_document(mut self, multi_document: bool) -> Self {
        self.options.multi_document = multi_document;
        self
    }

    /// Enable or disable root-sequence expansion.
    pub fn expand_root_sequence(mut self, expand: bool) -> Self {
        self.options.expand_root_sequence = expand;
        self
    }

    /// Builds the `ReadOptions`.
    pub fn build(self) -> ReadOptions {
        self.options
    }
}

impl Default for ReadOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
