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

//! The document reader: files or text in, typed rows out.
//!
//! Extraction runs per file and touches no shared state; with several
//! files the work fans out over a rayon pool (above a serial threshold,
//! small batches stay serial to avoid pool overhead) and results are
//! reassembled by original file index, so row order always follows
//! caller-supplied file order, never completion order.
//!
//! The schema is resolved once, after batch assembly, and is read-only
//! from then on; [`RowBatch`] only projects rows through the coercion
//! engine.

use crate::options::ReadOptions;
use crate::schema::Schema;
use doctab_core::{coerce, ErrorPolicy, Node, TableError, TableResult, Value};
use doctab_yaml::extract_documents;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Minimum number of files before extraction fans out over the thread
/// pool; below this, serial processing avoids the pool overhead.
const PARALLEL_FILE_THRESHOLD: usize = 8;

/// A batch of source rows with their resolved schema.
///
/// Created by the `read_*` functions. The schema is fixed at creation;
/// row access projects the stored nodes through the coercion engine under
/// the read's error policy.
#[derive(Debug, Clone)]
pub struct RowBatch {
    schema: Schema,
    rows: Vec<Node>,
    policy: ErrorPolicy,
}

impl RowBatch {
    /// The resolved schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows in the batch.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the batch holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The source node backing a row.
    pub fn source_row(&self, index: usize) -> Option<&Node> {
        self.rows.get(index)
    }

    /// Project one row into typed column values.
    pub fn row(&self, index: usize) -> TableResult<Vec<Value>> {
        let node = self.rows.get(index).ok_or_else(|| {
            TableError::coercion(format!(
                "row index {} out of range ({} rows)",
                index,
                self.rows.len()
            ))
        })?;
        project_row(node, &self.schema, self.policy)
    }

    /// Project every row in order.
    pub fn rows(&self) -> TableResult<Vec<Vec<Value>>> {
        self.rows
            .iter()
            .map(|node| project_row(node, &self.schema, self.policy))
            .collect()
    }
}

/// Project a source node onto the schema.
///
/// Mapping rows project per column by key; missing keys become null and
/// undeclared keys are dropped. Non-mapping rows coerce whole against a
/// single-column schema and are a kind mismatch against a wider one.
fn project_row(node: &Node, schema: &Schema, policy: ErrorPolicy) -> TableResult<Vec<Value>> {
    if node.is_mapping() {
        schema
            .columns()
            .map(|(name, ty)| match node.get(name) {
                Some(child) => coerce(child, ty, policy)
                    .map_err(|e| e.with_context(format!("column '{}'", name))),
                None => Ok(Value::Null),
            })
            .collect()
    } else if schema.column_count() == 1 {
        let name = &schema.names()[0];
        let value = coerce(node, &schema.types()[0], policy)
            .map_err(|e| e.with_context(format!("column '{}'", name)))?;
        Ok(vec![value])
    } else {
        match policy {
            ErrorPolicy::Nullify => Ok(vec![Value::Null; schema.column_count()]),
            ErrorPolicy::Fail => Err(TableError::coercion(format!(
                "cannot project {} node onto {} columns",
                node.kind_name(),
                schema.column_count()
            ))),
        }
    }
}

/// Read a batch from in-memory text.
pub fn read_str(input: &str, options: &ReadOptions) -> TableResult<RowBatch> {
    read_bytes(input.as_bytes(), options)
}

/// Read a batch from raw bytes.
pub fn read_bytes(bytes: &[u8], options: &ReadOptions) -> TableResult<RowBatch> {
    options.validate()?;
    let declared = declared_schema(options)?;
    let rows = extract_rows(bytes, options)?;
    assemble(rows, declared, options)
}

/// Read a batch from an ordered list of files.
///
/// Files are processed independently (in parallel above a small
/// threshold) and reassembled in caller order. Per-file errors are fatal
/// unless `ignore_errors` is set, in which case the file is skipped.
pub fn read_files(paths: &[PathBuf], options: &ReadOptions) -> TableResult<RowBatch> {
    options.validate()?;
    let declared = declared_schema(options)?;

    if paths.is_empty() && !options.ignore_errors {
        return Err(TableError::no_input("no input files"));
    }

    let per_file: Vec<TableResult<Vec<Node>>> = if paths.len() < PARALLEL_FILE_THRESHOLD {
        paths.iter().map(|path| extract_file(path, options)).collect()
    } else {
        paths
            .par_iter()
            .map(|path| extract_file(path, options))
            .collect()
    };

    let mut rows = Vec::new();
    for result in per_file {
        match result {
            Ok(file_rows) => rows.extend(file_rows),
            Err(_) if options.ignore_errors => continue,
            Err(e) => return Err(e),
        }
    }
    assemble(rows, declared, options)
}

fn declared_schema(options: &ReadOptions) -> TableResult<Option<Schema>> {
    match &options.columns {
        Some(columns) => Schema::from_declared(columns).map(Some),
        None => Ok(None),
    }
}

fn extract_file(path: &Path, options: &ReadOptions) -> TableResult<Vec<Node>> {
    let bytes = std::fs::read(path)
        .map_err(|e| TableError::io(format!("cannot read '{}': {}", path.display(), e)))?;
    extract_rows(&bytes, options)
}

/// Extract the row nodes of one input: parse the document stream, apply
/// root-sequence expansion, and enforce the per-row node budget.
fn extract_rows(bytes: &[u8], options: &ReadOptions) -> TableResult<Vec<Node>> {
    let documents = extract_documents(bytes, options.ignore_errors)?;

    if !options.multi_document && documents.len() > 1 {
        if options.ignore_errors {
            return Ok(Vec::new());
        }
        return Err(TableError::syntax(format!(
            "input contains {} documents but multi_document is disabled",
            documents.len()
        )));
    }

    let mut rows = Vec::new();
    for document in documents {
        let document_rows = match document {
            Node::Sequence(elements) if options.expand_root_sequence => elements,
            other => vec![other],
        };
        for row in document_rows {
            let size = row.count_nodes();
            if size > options.maximum_object_size {
                if options.ignore_errors {
                    continue;
                }
                return Err(TableError::limit(format!(
                    "row holds {} nodes, exceeding maximum_object_size {}",
                    size, options.maximum_object_size
                )));
            }
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Resolve the schema against the assembled rows and seal the batch.
fn assemble(
    rows: Vec<Node>,
    declared: Option<Schema>,
    options: &ReadOptions,
) -> TableResult<RowBatch> {
    if rows.is_empty() && !options.ignore_errors {
        return Err(TableError::no_input("input produced no rows"));
    }
    let schema = match declared {
        Some(schema) => schema,
        None => match rows.first() {
            Some(first) => Schema::infer_from_node(first, options.effective_auto_detect()),
            None => Schema::fallback(),
        },
    };
    Ok(RowBatch {
        schema,
        rows,
        policy: ErrorPolicy::from_ignore_errors(options.ignore_errors),
    })
}
