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

//! Core data model and engines for DocTab.
//!
//! This crate holds the format-independent pieces of the document-to-table
//! bridge:
//!
//! - [`Node`]: the generic parsed-document tree (scalar/sequence/mapping)
//! - [`TargetType`]: the typed-table type system, round-tripping through a
//!   string type-name grammar
//! - [`infer_type`]: the type inference ladder
//! - [`coerce`]: the value coercion engine, with `ignore_errors` threaded
//!   explicitly as an [`ErrorPolicy`]
//! - [`TableError`]: the shared error taxonomy
//!
//! Document-grammar specifics (parsing raw bytes into nodes, emitting typed
//! values back out as text) live in the frontend crates.

mod coerce;
mod error;
mod infer;
mod node;
mod types;
mod value;

pub use coerce::{coerce, ErrorPolicy};
pub use error::{ErrorKind, TableError, TableResult};
pub use infer::{
    classify_scalar, infer_type, is_null_text, parse_boolean_text, parse_date_text,
    parse_double_text, parse_integer_text, parse_timestamp_text,
};
pub use node::Node;
pub use types::{parse_type_name, TargetType};
pub use value::{format_double, Value, DATE_FORMAT, TIMESTAMP_FORMAT, TIMESTAMP_PARSE_FORMATS};
