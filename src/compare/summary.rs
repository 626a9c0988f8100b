//! Summary Aggregator
//!
//! Reduces the full comparison result list into totals, per-kind counts,
//! and calculated-field statistics in a single pass.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::metadata::ItemKind;

use super::types::{ComparisonResult, ComparisonStatus};

/// Per-kind status breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub missing_in_source: usize,
    pub missing_in_target: usize,
}

/// Calculated-field specific statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedFieldSummary {
    pub matched: usize,
    pub mismatched: usize,
    /// Mismatches caused specifically by a formula divergence
    pub formula_differences: usize,
}

/// Summary statistics for one comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_items: usize,
    pub matched_count: usize,
    pub mismatched_count: usize,
    pub missing_in_source_count: usize,
    pub missing_in_target_count: usize,
    /// Initialized for every kind, so consumers can index without
    /// existence checks even when a kind contributed no results
    pub by_kind: HashMap<ItemKind, KindSummary>,
    pub calculated_fields: CalculatedFieldSummary,
}

/// Reduce a result list into summary statistics
pub fn summarize(results: &[ComparisonResult]) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total_items: 0,
        matched_count: 0,
        mismatched_count: 0,
        missing_in_source_count: 0,
        missing_in_target_count: 0,
        by_kind: ItemKind::ALL
            .iter()
            .map(|kind| (*kind, KindSummary::default()))
            .collect(),
        calculated_fields: CalculatedFieldSummary::default(),
    };

    for result in results {
        summary.total_items += 1;
        let kind_summary = summary.by_kind.entry(result.kind).or_default();
        kind_summary.total += 1;

        match result.status {
            ComparisonStatus::Match => {
                summary.matched_count += 1;
                kind_summary.matched += 1;
            }
            ComparisonStatus::Mismatch => {
                summary.mismatched_count += 1;
                kind_summary.mismatched += 1;
            }
            ComparisonStatus::MissingInSource => {
                summary.missing_in_source_count += 1;
                kind_summary.missing_in_source += 1;
            }
            ComparisonStatus::MissingInTarget => {
                summary.missing_in_target_count += 1;
                kind_summary.missing_in_target += 1;
            }
        }

        if result.kind == ItemKind::CalculatedField {
            match result.status {
                ComparisonStatus::Match => summary.calculated_fields.matched += 1,
                ComparisonStatus::Mismatch => {
                    summary.calculated_fields.mismatched += 1;
                    if result
                        .differences
                        .iter()
                        .any(|d| d.is_calculation_difference)
                    {
                        summary.calculated_fields.formula_differences += 1;
                    }
                }
                _ => {}
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::types::{PropertyDifference, Severity};
    use uuid::Uuid;

    fn result(kind: ItemKind, status: ComparisonStatus) -> ComparisonResult {
        ComparisonResult {
            id: Uuid::new_v4(),
            kind,
            item_name: "item".to_string(),
            item_key: Uuid::new_v4().to_string(),
            parent_name: None,
            status,
            severity: Severity::Info,
            differences: vec![],
            source_item: None,
            target_item: None,
        }
    }

    #[test]
    fn test_all_kinds_initialized_even_when_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.by_kind.len(), 17);
        for kind in ItemKind::ALL {
            assert_eq!(summary.by_kind[&kind], KindSummary::default());
        }
    }

    #[test]
    fn test_totals_invariant() {
        let results = vec![
            result(ItemKind::Module, ComparisonStatus::Match),
            result(ItemKind::Module, ComparisonStatus::Mismatch),
            result(ItemKind::Field, ComparisonStatus::MissingInSource),
            result(ItemKind::Role, ComparisonStatus::MissingInTarget),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.total_items, results.len());
        let by_kind_total: usize = summary.by_kind.values().map(|s| s.total).sum();
        assert_eq!(by_kind_total, summary.total_items);

        for kind_summary in summary.by_kind.values() {
            assert_eq!(
                kind_summary.total,
                kind_summary.matched
                    + kind_summary.mismatched
                    + kind_summary.missing_in_source
                    + kind_summary.missing_in_target
            );
        }
    }

    #[test]
    fn test_calculated_field_statistics() {
        let mut formula_mismatch =
            result(ItemKind::CalculatedField, ComparisonStatus::Mismatch);
        formula_mismatch.differences.push(PropertyDifference {
            property_name: "calculationFormula".to_string(),
            source_value: "a".to_string(),
            target_value: "b".to_string(),
            is_calculation_difference: true,
        });

        let mut plain_mismatch = result(ItemKind::CalculatedField, ComparisonStatus::Mismatch);
        plain_mismatch.differences.push(PropertyDifference {
            property_name: "description".to_string(),
            source_value: "a".to_string(),
            target_value: "b".to_string(),
            is_calculation_difference: false,
        });

        let results = vec![
            result(ItemKind::CalculatedField, ComparisonStatus::Match),
            formula_mismatch,
            plain_mismatch,
            result(ItemKind::Field, ComparisonStatus::Mismatch),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.calculated_fields.matched, 1);
        assert_eq!(summary.calculated_fields.mismatched, 2);
        assert_eq!(summary.calculated_fields.formula_differences, 1);
    }
}
