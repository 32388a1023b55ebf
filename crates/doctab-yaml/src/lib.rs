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

//! YAML frontend for DocTab.
//!
//! Two directions:
//!
//! - **Extraction** ([`extract_documents`], [`parse_str`]): raw bytes →
//!   ordered [`doctab_core::Node`] trees, one per document in the stream.
//!   `serde_yaml` is the grammar parser; scalars are carried as raw text
//!   and typing is left to the inference/coercion engines.
//! - **Emission** ([`emit_value`], [`emit_sequence_item`],
//!   [`DocumentStream`]): typed [`doctab_core::Value`]s → YAML text under a
//!   block or flow [`EmitStyle`], with re-parseable quoting.
//!
//! # Examples
//!
//! ```rust
//! use doctab_core::{coerce, infer_type, ErrorPolicy};
//! use doctab_yaml::parse_str;
//!
//! let docs = parse_str("name: Alice\nage: 30\n").unwrap();
//! let target = infer_type(&docs[0]);
//! let value = coerce(&docs[0], &target, ErrorPolicy::Fail).unwrap();
//! assert_eq!(value.as_struct().unwrap()[1].0, "age");
//! ```

mod emit;
mod parse;

pub use emit::{emit_sequence_item, emit_value, DocumentStream, EmitStyle};
pub use parse::{extract_documents, parse_bytes, parse_str};
