//! Severity Classifier
//!
//! Assigns a severity to each comparison result from entity kind, status,
//! and the attached differences. Total function with a fixed priority
//! order: calculation differences first, then key properties, then the
//! status default.

use crate::metadata::ItemKind;

use super::types::{ComparisonStatus, PropertyDifference, Severity};

/// Kinds whose absence silently breaks behavior: formula and automation
/// logic. A missing item of these kinds is always critical.
const ESSENTIAL_KINDS: &[ItemKind] = &[
    ItemKind::CalculatedField,
    ItemKind::DdeRule,
    ItemKind::DdeAction,
];

/// Structurally significant properties: a mismatch here warrants a
/// warning even when nothing else changed.
const KEY_PROPERTIES: &[&str] = &[
    "name",
    "alias",
    "isRequired",
    "isKey",
    "isEnabled",
    "fieldType",
];

/// Severity for one comparison result
pub fn classify(
    kind: ItemKind,
    status: ComparisonStatus,
    differences: &[PropertyDifference],
) -> Severity {
    match status {
        ComparisonStatus::Match => Severity::Info,
        ComparisonStatus::MissingInSource | ComparisonStatus::MissingInTarget => {
            if ESSENTIAL_KINDS.contains(&kind) {
                Severity::Critical
            } else {
                Severity::Warning
            }
        }
        ComparisonStatus::Mismatch => {
            if differences.iter().any(|d| d.is_calculation_difference) {
                Severity::Critical
            } else if differences
                .iter()
                .any(|d| KEY_PROPERTIES.contains(&d.property_name.as_str()))
            {
                Severity::Warning
            } else {
                Severity::Info
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(property: &str, calculation: bool) -> PropertyDifference {
        PropertyDifference {
            property_name: property.to_string(),
            source_value: "a".to_string(),
            target_value: "b".to_string(),
            is_calculation_difference: calculation,
        }
    }

    #[test]
    fn test_match_is_always_info() {
        for kind in ItemKind::ALL {
            assert_eq!(classify(kind, ComparisonStatus::Match, &[]), Severity::Info);
        }
    }

    #[test]
    fn test_missing_essential_kind_is_critical() {
        for status in [
            ComparisonStatus::MissingInSource,
            ComparisonStatus::MissingInTarget,
        ] {
            assert_eq!(
                classify(ItemKind::CalculatedField, status, &[]),
                Severity::Critical
            );
            assert_eq!(classify(ItemKind::DdeRule, status, &[]), Severity::Critical);
            assert_eq!(classify(ItemKind::DdeAction, status, &[]), Severity::Critical);
            assert_eq!(classify(ItemKind::Module, status, &[]), Severity::Warning);
            assert_eq!(classify(ItemKind::Report, status, &[]), Severity::Warning);
        }
    }

    #[test]
    fn test_calculation_difference_outranks_key_property() {
        let diffs = vec![diff("isRequired", false), diff("calculationFormula", true)];
        assert_eq!(
            classify(ItemKind::CalculatedField, ComparisonStatus::Mismatch, &diffs),
            Severity::Critical
        );
    }

    #[test]
    fn test_key_property_mismatch_is_warning() {
        let diffs = vec![diff("isRequired", false)];
        assert_eq!(
            classify(ItemKind::Field, ComparisonStatus::Mismatch, &diffs),
            Severity::Warning
        );
    }

    #[test]
    fn test_ordinary_mismatch_is_info() {
        let diffs = vec![diff("description", false)];
        assert_eq!(
            classify(ItemKind::Field, ComparisonStatus::Mismatch, &diffs),
            Severity::Info
        );
    }
}
