//! Property Differ
//!
//! Enumerates property-level differences between a matched pair, walking
//! the per-kind compile-time property table. Environment-local
//! identifiers never appear in that table, so they can never flood the
//! report. Calculated-field formulas get a dedicated comparison path so
//! downstream classification and rendering can treat them specially.

use serde_json::json;
use tracing::debug;

use crate::metadata::MetadataItem;

use super::normalize::{display, normalize, normalize_with_order};
use super::types::{CompareConfig, PropertyDifference};

/// All property differences between a matched pair, in table order
pub fn diff_pair(
    config: &CompareConfig,
    source: &MetadataItem,
    target: &MetadataItem,
) -> Vec<PropertyDifference> {
    if source.kind() != target.kind() {
        // The matcher pairs within one kind; a cross-kind pair means the
        // caller mixed collections. Nothing sensible to compare.
        debug!(
            source = source.kind().label(),
            target = target.kind().label(),
            "refusing to diff items of different kinds"
        );
        return Vec::new();
    }

    let order_sensitive = config.order_sensitive_kinds.contains(&source.kind());
    let mut differences = Vec::new();

    let source_props = source.comparable_properties();
    let target_props = target.comparable_properties();

    // Same kind, same static table: the two lists are aligned.
    for ((name, source_value), (_, target_value)) in
        source_props.iter().zip(target_props.iter())
    {
        let source_norm = normalize_with_order(source_value, order_sensitive);
        let target_norm = normalize_with_order(target_value, order_sensitive);
        if source_norm != target_norm {
            differences.push(PropertyDifference {
                property_name: (*name).to_string(),
                source_value: display(source_value),
                target_value: display(target_value),
                is_calculation_difference: false,
            });
        }
    }

    if let (MetadataItem::CalculatedField(s), MetadataItem::CalculatedField(t)) = (source, target)
    {
        let source_formula = json!(s.calculation_formula);
        let target_formula = json!(t.calculation_formula);
        if normalize(&source_formula) != normalize(&target_formula) {
            differences.push(PropertyDifference {
                property_name: "calculationFormula".to_string(),
                source_value: display(&source_formula),
                target_value: display(&target_formula),
                // Only a divergence between two live formulas counts as a
                // calculation difference; a one-sided calculated flag
                // already surfaces through the isCalculated property.
                is_calculation_difference: s.is_calculated && t.is_calculated,
            });
        }
    }

    differences
}
