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

//! Error types for document-to-table operations.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during a read or convert operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed configuration (column declaration, size limit, type name).
    /// Always fatal; never suppressed by `ignore_errors`.
    Configuration,
    /// Malformed document text.
    Syntax,
    /// A node could not be converted to its target type.
    Coercion,
    /// No input files, or all documents filtered out.
    NoInput,
    /// Resource limit exceeded.
    Limit,
    /// I/O error (file operations).
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "ConfigurationError"),
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Coercion => write!(f, "CoercionError"),
            Self::NoInput => write!(f, "NoInputError"),
            Self::Limit => write!(f, "LimitError"),
            Self::Io => write!(f, "IoError"),
        }
    }
}

/// An error raised while reading documents into rows or coercing values.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TableError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Additional context (e.g., "column 'age'" or "line 3, column 7").
    pub context: Option<String>,
}

impl TableError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn coercion(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Coercion, message)
    }

    pub fn no_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoInput, message)
    }

    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Limit, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    /// Returns true if this error is fatal even under `ignore_errors`.
    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}

/// Result type for document-to-table operations.
pub type TableResult<T> = Result<T, TableError>;
