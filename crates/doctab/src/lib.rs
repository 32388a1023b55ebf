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

//! # DocTab - Document to Table Bridge
//!
//! DocTab ingests semi-structured documents (trees of scalars, sequences,
//! and mappings) and exposes them as rows of a typed table, and serializes
//! typed values back into document form.
//!
//! ## Quick Start
//!
//! ```rust
//! use doctab::{read_str, ReadOptions};
//!
//! let yaml = "name: Alice\nage: 30\n---\nname: Bob\n";
//! let batch = read_str(yaml, &ReadOptions::default()).unwrap();
//!
//! assert_eq!(batch.schema().names()[0], "name");
//! assert_eq!(batch.schema().names()[1], "age");
//!
//! let rows = batch.rows().unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0][1], doctab::Value::Integer(30));
//! assert!(rows[1][1].is_null()); // Bob has no age
//! ```
//!
//! ## Explicit columns
//!
//! ```rust
//! use doctab::{read_str, ReadOptions, Value};
//!
//! let options = ReadOptions::builder()
//!     .column("name", "VARCHAR")
//!     .column("age", "INTEGER")
//!     .build();
//! let batch = read_str("name: Alice\nage: 30\n", &options).unwrap();
//! assert_eq!(
//!     batch.row(0).unwrap(),
//!     vec![Value::Varchar("Alice".to_string()), Value::Integer(30)]
//! );
//! ```
//!
//! ## Emission
//!
//! ```rust
//! use doctab::{emit_sequence_item, EmitStyle, Value};
//!
//! let value = Value::List(vec![
//!     Value::Varchar("x".to_string()),
//!     Value::Varchar("y".to_string()),
//! ]);
//! assert_eq!(emit_sequence_item(&value, EmitStyle::Block), "- - x\n  - y");
//! ```
//!
//! ## Modules
//!
//! - [`doctab_core`] (re-exported): node model, type system, inference and
//!   coercion engines
//! - [`doctab_yaml`] (re-exported): YAML extraction and emission
//! - [`ReadOptions`] / [`Schema`] / [`RowBatch`]: the table layer

mod options;
mod reader;
mod schema;

// Core data model and engines
pub use doctab_core::{
    classify_scalar, coerce, format_double, infer_type, is_null_text, parse_type_name,
    ErrorKind, ErrorPolicy, Node, TableError, TableResult, TargetType, Value, DATE_FORMAT,
    TIMESTAMP_FORMAT, TIMESTAMP_PARSE_FORMATS,
};

// YAML frontend
pub use doctab_yaml::{
    emit_sequence_item, emit_value, extract_documents, parse_bytes, parse_str, DocumentStream,
    EmitStyle,
};

// Table layer
pub use options::{ReadOptions, ReadOptionsBuilder, DEFAULT_MAXIMUM_OBJECT_SIZE};
pub use reader::{read_bytes, read_files, read_str, RowBatch};
pub use schema::{Schema, FALLBACK_COLUMN};
