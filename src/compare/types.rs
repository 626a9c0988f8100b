//! Comparison result types
//!
//! Shared shapes produced by the comparison engine and consumed by
//! exporters and calling applications.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metadata::{ItemKind, MetadataItem};

/// Outcome of comparing one item identity across the two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// Present on both sides with no property differences
    Match,
    /// Present on both sides with at least one property difference
    Mismatch,
    /// Present only in the target snapshot
    MissingInSource,
    /// Present only in the source snapshot
    MissingInTarget,
}

/// Severity assigned to a comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// One named-property mismatch between a matched pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDifference {
    pub property_name: String,
    /// Formatted source-side value, un-normalized for display
    pub source_value: String,
    /// Formatted target-side value, un-normalized for display
    pub target_value: String,
    /// Set when this is a calculated-field formula divergence
    pub is_calculation_difference: bool,
}

/// A single item in the comparison report
///
/// One result per item identity; a mismatching pair carries its full
/// difference list rather than fanning out into one result per property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub id: Uuid,
    pub kind: ItemKind,
    pub item_name: String,
    /// The stable identifier the matcher keyed this item by
    pub item_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub status: ComparisonStatus,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<PropertyDifference>,
    /// Contributing items, kept for downstream export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_item: Option<MetadataItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_item: Option<MetadataItem>,
}

/// Identity strategy used to pair items across snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Pair by the stable cross-environment GUID (exact matching)
    #[default]
    Guid,
    /// Pair by lower-cased trimmed name plus parent name, for
    /// deployments where GUIDs are unavailable or untrusted
    CompositeKey,
}

/// Engine configuration for one comparison run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareConfig {
    pub strategy: MatchStrategy,
    /// Kinds whose array-valued properties compare order-sensitively.
    /// Empty by default: ordering differences in GUID lists are noise.
    #[serde(default)]
    pub order_sensitive_kinds: HashSet<ItemKind>,
}
