//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Size tier ordering
//! - Structural diff behavior under no-op, added, removed, and unknown-size edits
//! - Robustness of the textual scanners
//! - Unowned changed lines always escalating

use crate::diff::compare_warehouses;
use crate::document::DataProduct;
use crate::engine::evaluate;
use crate::hunks::{parse_hunks, to_ranges};
use crate::model::{ChangedFile, ReviewModel};
use crate::rules::{Rule, RuleSet, WarehouseRule};
use crate::policy::WarehousePolicy;
use crate::sections::SectionScanner;
use crate::sizes::{WarehouseSize, is_decrease};
use crate::test_support::data_product;
use mrguard_types::{Decision, RepoPath};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_size() -> impl Strategy<Value = WarehouseSize> {
    prop::sample::select(WarehouseSize::ALL.to_vec())
}

/// Labels outside the tier table, including case variants of real ones.
fn arb_unknown_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("small".to_string()),
        Just("X-LARGE".to_string()),
        Just("".to_string()),
        "[A-Z]{7,12}".prop_filter("must not be a known tier", |s| {
            WarehouseSize::from_label(s).is_none()
        }),
    ]
}

fn arb_type() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}"
}

fn arb_document() -> impl Strategy<Value = DataProduct> {
    prop::collection::vec((arb_type(), arb_size()), 0..8).prop_map(|entries| {
        let pairs: Vec<(String, &str)> = entries
            .into_iter()
            .map(|(t, s)| (t, s.label()))
            .collect();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(t, s)| (t.as_str(), *s)).collect();
        data_product(&refs)
    })
}

fn path() -> RepoPath {
    RepoPath::new("dataproducts/x/product.yaml")
}

// ============================================================================
// Size ordering
// ============================================================================

proptest! {
    /// Swapping the direction of a change flips its classification.
    #[test]
    fn decrease_is_antisymmetric(a in arb_size(), b in arb_size()) {
        let forward = is_decrease(a.label(), b.label()).expect("known labels rank");
        let backward = is_decrease(b.label(), a.label()).expect("known labels rank");
        if a == b {
            prop_assert!(!forward);
        } else {
            prop_assert_eq!(forward, !backward);
        }
    }

    /// Unknown labels on either side never classify.
    #[test]
    fn unknown_labels_never_classify(known in arb_size(), unknown in arb_unknown_label()) {
        prop_assert_eq!(is_decrease(known.label(), &unknown), None);
        prop_assert_eq!(is_decrease(&unknown, known.label()), None);
    }
}

// ============================================================================
// Structural diff
// ============================================================================

proptest! {
    /// Diffing a document against itself yields nothing.
    #[test]
    fn diff_against_self_is_empty(doc in arb_document()) {
        prop_assert!(compare_warehouses(&path(), &doc, &doc).is_empty());
    }

    /// Types present on only one side never produce a change.
    #[test]
    fn added_or_removed_types_are_ignored(size in arb_size()) {
        let empty = data_product(&[]);
        let one = data_product(&[("only_here", size.label())]);
        prop_assert!(compare_warehouses(&path(), &empty, &one).is_empty());
        prop_assert!(compare_warehouses(&path(), &one, &empty).is_empty());
    }

    /// An unknown size on either side suppresses the change record.
    #[test]
    fn unknown_size_suppresses_change(size in arb_size(), unknown in arb_unknown_label()) {
        let known = data_product(&[("user", size.label())]);
        let odd = data_product(&[("user", unknown.as_str())]);
        prop_assert!(compare_warehouses(&path(), &known, &odd).is_empty());
        prop_assert!(compare_warehouses(&path(), &odd, &known).is_empty());
    }

    /// A change is emitted exactly when sizes differ, with the right direction.
    #[test]
    fn modified_type_is_reported(a in arb_size(), b in arb_size()) {
        let old = data_product(&[("user", a.label())]);
        let new = data_product(&[("user", b.label())]);
        let changes = compare_warehouses(&path(), &old, &new);
        if a == b {
            prop_assert!(changes.is_empty());
        } else {
            prop_assert_eq!(changes.len(), 1);
            prop_assert_eq!(changes[0].is_decrease, a > b);
        }
    }
}

// ============================================================================
// Scanners
// ============================================================================

proptest! {
    #[test]
    fn hunk_parser_never_panics(input in ".*") {
        let _ = parse_hunks(&input);
    }

    #[test]
    fn hunk_sides_count_their_own_markers(body in prop::collection::vec(0u8..3, 0..40)) {
        let mut diff = String::from("@@ -1 +1 @@\n");
        for kind in &body {
            diff.push_str(match kind {
                0 => " keep\n",
                1 => "+add\n",
                _ => "-drop\n",
            });
        }
        let lines = parse_hunks(&diff).expect("has a hunk header");
        prop_assert_eq!(lines.added.len(), body.iter().filter(|k| **k == 1).count());
        prop_assert_eq!(lines.removed.len(), body.iter().filter(|k| **k == 2).count());
    }

    #[test]
    fn section_scanner_ranges_are_single_valid_lines(input in "(([a-z_ -]{0,12}:?[a-z ]{0,6})\n){0,20}") {
        let scanner = SectionScanner::new(&["warehouses", "service_account"]);
        let line_count = input.lines().count() as u32;
        for r in scanner.scan(&path(), &input) {
            prop_assert!(r.start_line >= 1);
            prop_assert_eq!(r.start_line, r.end_line);
            prop_assert!(r.end_line <= line_count);
        }
    }

    /// Compressed ranges cover exactly the input lines.
    #[test]
    fn ranges_round_trip_lines(lines in prop::collection::btree_set(1u32..200, 0..40)) {
        let ranges = to_ranges(&path(), &lines);
        let back: BTreeSet<u32> = ranges.iter().flat_map(|r| r.lines()).collect();
        prop_assert_eq!(back, lines);
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].end_line + 1 < pair[1].start_line);
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

proptest! {
    /// Any changed line outside the warehouse marker forces manual review.
    #[test]
    fn unowned_change_forces_manual_review(extra in 4u32..30) {
        let text = "name: x\nkind: y\nwarehouses:\n- type: user\n  size: SMALL\n";
        let rule = WarehouseRule::new(WarehousePolicy::default(), None);
        prop_assert_eq!(rule.owned_ranges(&path(), text).len(), 1);

        let mut set = RuleSet::new();
        set.register(Box::new(rule)).expect("register");
        let model = ReviewModel {
            files: vec![ChangedFile::new(path(), text, &[extra])],
        };
        let report = evaluate(&model, &set, "test");
        prop_assert_eq!(report.decision, Decision::ManualReview);
        prop_assert!(!report.files[0].unowned.is_empty());
    }
}
