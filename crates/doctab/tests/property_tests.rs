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

//! Property-based tests for the inference, coercion, and emission engines.
//!
//! These verify the core invariants across randomly generated inputs:
//! inference totality and determinism, the emit/parse/coerce round-trip
//! law, and `ignore_errors` monotonicity.

use doctab::{
    coerce, emit_value, infer_type, parse_str, read_str, EmitStyle, ErrorPolicy, Node,
    ReadOptions, TargetType, Value,
};
use proptest::prelude::*;

/// Generate arbitrary scalar text, weighted toward literal-shaped tokens.
fn arb_scalar_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        any::<f64>().prop_map(|f| f.to_string()),
        Just("true".to_string()),
        Just("yes".to_string()),
        Just("off".to_string()),
        Just("~".to_string()),
        Just("2024-06-01".to_string()),
        Just("2024-06-01 10:00:00".to_string()),
        ".*",
    ]
}

/// Generate a small node tree.
fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = arb_scalar_text().prop_map(Node::scalar);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::sequence),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|entries| {
                // Mapping keys are unique by construction in real parses.
                let mut seen = Vec::new();
                let mut unique = Vec::new();
                for (key, value) in entries {
                    if !seen.contains(&key) {
                        seen.push(key.clone());
                        unique.push((key, value));
                    }
                }
                Node::mapping(unique)
            }),
        ]
    })
}

fn arb_date() -> impl Strategy<Value = chrono::NaiveDate> {
    (1970i32..2200, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_timestamp() -> impl Strategy<Value = chrono::NaiveDateTime> {
    (arb_date(), 0u32..24, 0u32..60, 0u32..60, prop_oneof![Just(0u32), Just(250_000_000u32)])
        .prop_map(|(date, h, m, s, nano)| date.and_hms_nano_opt(h, m, s, nano).unwrap())
}

/// Generate a leaf target type together with a value of that type.
fn arb_leaf_typed_value() -> impl Strategy<Value = (TargetType, Value)> {
    prop_oneof![
        any::<bool>().prop_map(|b| (TargetType::Boolean, Value::Boolean(b))),
        any::<i64>().prop_map(|n| (TargetType::BigInt, Value::Integer(n))),
        (-1.0e12f64..1.0e12).prop_map(|f| (TargetType::Double, Value::Double(f))),
        ".*".prop_map(|s| (TargetType::Varchar, Value::Varchar(s))),
        arb_date().prop_map(|d| (TargetType::Date, Value::Date(d))),
        arb_timestamp().prop_map(|t| (TargetType::Timestamp, Value::Timestamp(t))),
    ]
}

/// Generate a target type together with a value of that type, including
/// lists and structs over the leaves.
fn arb_typed_value() -> impl Strategy<Value = (TargetType, Value)> {
    prop_oneof![
        arb_leaf_typed_value(),
        // Homogeneous list of one leaf shape
        (arb_leaf_typed_value(), 0usize..4).prop_map(|((ty, value), n)| {
            (
                TargetType::list_of(ty),
                Value::List(vec![value; n]),
            )
        }),
        // Small struct over two leaf shapes
        (arb_leaf_typed_value(), arb_leaf_typed_value()).prop_map(|((ty_a, a), (ty_b, b))| {
            (
                TargetType::Struct(vec![
                    ("first".to_string(), ty_a),
                    ("second".to_string(), ty_b),
                ]),
                Value::Struct(vec![
                    ("first".to_string(), a),
                    ("second".to_string(), b),
                ]),
            )
        }),
    ]
}

/// Small valid inputs for whole-pipeline properties.
fn arb_simple_yaml() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name: Alice\nage: 30\n".to_string()),
        Just("a: yes\nb: 10\n---\na: no\nb: 11\n".to_string()),
        Just("- 1\n- 2\n- 3\n".to_string()),
        Just("user:\n  name: Bob\n  tags: [x, y]\n".to_string()),
        Just("count: 42\nactive: true\nratio: 3.5\n".to_string()),
        Just("d: 2024-06-01\nt: 2024-06-01 10:00:00\n".to_string()),
    ]
}

proptest! {
    /// Inference terminates and never fails, for any node shape.
    #[test]
    fn prop_inference_is_total(node in arb_node()) {
        let _ = infer_type(&node);
    }

    /// Inference is a pure function of the node.
    #[test]
    fn prop_inference_is_deterministic(node in arb_node()) {
        prop_assert_eq!(infer_type(&node), infer_type(&node));
    }

    /// Every node coerces to its own inferred type under the strict policy.
    #[test]
    fn prop_coerce_under_inferred_type_succeeds(node in arb_node()) {
        let target = infer_type(&node);
        let result = coerce(&node, &target, ErrorPolicy::Fail);
        prop_assert!(result.is_ok(), "failed for {:?}: {:?}", target, result.err());
    }

    /// Coercion to string never fails, for any node and either policy.
    #[test]
    fn prop_string_fallback_is_total(node in arb_node()) {
        prop_assert!(coerce(&node, &TargetType::Varchar, ErrorPolicy::Fail).is_ok());
    }

    /// The round-trip law: emitted text re-parses and re-coerces to an
    /// equal value, in both styles.
    #[test]
    fn prop_round_trip((target, value) in arb_typed_value()) {
        for style in [EmitStyle::Block, EmitStyle::Flow] {
            let text = emit_value(&value, style);
            let docs = parse_str(&text).unwrap();
            prop_assert_eq!(docs.len(), 1, "text: {:?}", text);
            let back = coerce(&docs[0], &target, ErrorPolicy::Fail).unwrap();
            prop_assert_eq!(&back, &value, "text: {:?}", text);
        }
    }

    /// Emission is idempotent through a parse/coerce cycle: emitting the
    /// round-tripped value reproduces the same text.
    #[test]
    fn prop_emission_idempotent((target, value) in arb_typed_value()) {
        for style in [EmitStyle::Block, EmitStyle::Flow] {
            let text = emit_value(&value, style);
            let docs = parse_str(&text).unwrap();
            let back = coerce(&docs[0], &target, ErrorPolicy::Fail).unwrap();
            prop_assert_eq!(emit_value(&back, style), text);
        }
    }

    /// Anything that reads cleanly with ignore_errors off reads
    /// identically with it on.
    #[test]
    fn prop_ignore_errors_is_monotone(yaml in arb_simple_yaml()) {
        let strict = read_str(&yaml, &ReadOptions::default()).unwrap();
        let lenient = read_str(
            &yaml,
            &ReadOptions::builder().ignore_errors(true).build(),
        ).unwrap();
        prop_assert_eq!(strict.schema(), lenient.schema());
        prop_assert_eq!(strict.rows().unwrap(), lenient.rows().unwrap());
    }

    /// Reading never panics on arbitrary input text, with or without
    /// error tolerance.
    #[test]
    fn prop_read_never_panics(input in ".*") {
        let _ = read_str(&input, &ReadOptions::default());
        let _ = read_str(&input, &ReadOptions::builder().ignore_errors(true).build());
    }
}
