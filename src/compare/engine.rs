//! Comparison Orchestrator
//!
//! Runs matching, property diffing, and severity classification across
//! every entity-kind collection of two snapshots, concatenating the
//! per-kind results in a fixed order.
//!
//! The engine is synchronous and side-effect-free: it mutates no shared
//! state, performs no I/O, and is safe to invoke concurrently. One kind's
//! comparison can never abort another's.

use tracing::{debug, info};
use uuid::Uuid;

use crate::metadata::{ItemKind, MetadataItem, MetadataSnapshot};

use super::classify::classify;
use super::differ::diff_pair;
use super::matcher::match_items;
use super::summary::{summarize, ComparisonSummary};
use super::types::{CompareConfig, ComparisonResult, ComparisonStatus, PropertyDifference};

/// The engine that compares two metadata snapshots
#[derive(Debug, Clone, Default)]
pub struct CompareEngine {
    config: CompareConfig,
}

impl CompareEngine {
    /// Create an engine with default configuration (GUID matching,
    /// order-insensitive arrays)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit configuration
    pub fn with_config(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two snapshots and return all per-item results
    pub fn compare(
        &self,
        source: &MetadataSnapshot,
        target: &MetadataSnapshot,
    ) -> Vec<ComparisonResult> {
        info!(
            source = %source.environment.display_name,
            target = %target.environment.display_name,
            strategy = ?self.config.strategy,
            "comparing metadata snapshots"
        );

        let mut results = Vec::new();
        for kind in ItemKind::ALL {
            let source_items = source.collection(kind);
            let target_items = target.collection(kind);
            self.compare_kind(kind, &source_items, &target_items, &mut results);
        }

        info!(results = results.len(), "comparison complete");
        results
    }

    /// Compare two snapshots and also aggregate the summary
    pub fn compare_with_summary(
        &self,
        source: &MetadataSnapshot,
        target: &MetadataSnapshot,
    ) -> (Vec<ComparisonResult>, ComparisonSummary) {
        let results = self.compare(source, target);
        let summary = summarize(&results);
        (results, summary)
    }

    fn compare_kind(
        &self,
        kind: ItemKind,
        source_items: &[MetadataItem],
        target_items: &[MetadataItem],
        results: &mut Vec<ComparisonResult>,
    ) {
        if source_items.is_empty() && target_items.is_empty() {
            return;
        }

        debug!(
            kind = kind.label(),
            source = source_items.len(),
            target = target_items.len(),
            "comparing collection"
        );

        let outcome = match_items(kind, source_items, target_items, self.config.strategy);

        for (key, source_item, target_item) in outcome.paired {
            let differences = diff_pair(&self.config, source_item, target_item);
            let status = if differences.is_empty() {
                ComparisonStatus::Match
            } else {
                ComparisonStatus::Mismatch
            };
            results.push(self.build_result(
                kind,
                key,
                status,
                differences,
                Some(source_item),
                Some(target_item),
            ));
        }

        for (key, source_item) in outcome.source_only {
            results.push(self.build_result(
                kind,
                key,
                ComparisonStatus::MissingInTarget,
                Vec::new(),
                Some(source_item),
                None,
            ));
        }

        for (key, target_item) in outcome.target_only {
            results.push(self.build_result(
                kind,
                key,
                ComparisonStatus::MissingInSource,
                Vec::new(),
                None,
                Some(target_item),
            ));
        }
    }

    fn build_result(
        &self,
        kind: ItemKind,
        key: String,
        status: ComparisonStatus,
        differences: Vec<PropertyDifference>,
        source_item: Option<&MetadataItem>,
        target_item: Option<&MetadataItem>,
    ) -> ComparisonResult {
        // Either side works for display fields; prefer the source.
        let display_item = source_item.or(target_item).expect("one side always present");
        let severity = classify(kind, status, &differences);

        ComparisonResult {
            id: Uuid::new_v4(),
            kind,
            item_name: display_item.name().to_string(),
            item_key: key,
            parent_name: display_item.parent_name().map(str::to_string),
            status,
            severity,
            differences,
            source_item: source_item.cloned(),
            target_item: target_item.cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::types::Severity;
    use crate::environment::Environment;
    use crate::metadata::{Field, FieldType, Module};

    fn environment(name: &str) -> Environment {
        Environment::new(name, "https://archer.test", "Default")
    }

    fn module(guid: Uuid, name: &str) -> Module {
        Module {
            id: 1,
            guid,
            name: name.to_string(),
            alias: None,
            description: None,
            level_id: 100,
            is_subform: false,
            parent_module_id: None,
            field_count: 10,
        }
    }

    fn field(guid: Uuid, name: &str, is_required: bool) -> Field {
        Field {
            id: 5,
            guid,
            name: name.to_string(),
            alias: None,
            description: None,
            module_id: 1,
            module_name: "Risks".to_string(),
            module_guid: Uuid::NAMESPACE_OID,
            field_type: FieldType::Text,
            is_required,
            is_key: false,
            is_calculated: false,
            max_length: None,
            default_value: None,
            related_values_list_id: None,
            related_values_list_guid: None,
        }
    }

    fn snapshot(name: &str) -> MetadataSnapshot {
        MetadataSnapshot::new(environment(name))
    }

    #[test]
    fn test_identical_snapshots_all_match() {
        let mut source = snapshot("A");
        source.modules = vec![module(Uuid::new_v4(), "Risks")];
        source.fields = vec![field(Uuid::new_v4(), "Priority", true)];
        let target = MetadataSnapshot {
            environment: environment("B"),
            ..source.clone()
        };

        let results = CompareEngine::new().compare(&source, &target);
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| r.status == ComparisonStatus::Match && r.severity == Severity::Info));
    }

    #[test]
    fn test_straightforward_mismatch_scenario() {
        let guid = Uuid::new_v4();
        let mut source = snapshot("A");
        source.fields = vec![field(guid, "Priority", true)];
        let mut target = snapshot("B");
        target.fields = vec![field(guid, "Priority", false)];

        let results = CompareEngine::new().compare(&source, &target);
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.status, ComparisonStatus::Mismatch);
        assert_eq!(result.item_key, guid.to_string());
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].property_name, "isRequired");
        assert_eq!(result.differences[0].source_value, "Yes");
        assert_eq!(result.differences[0].target_value, "No");
        // isRequired is a key property: mismatch classifies as Warning.
        assert_eq!(result.severity, Severity::Warning);
    }

    #[test]
    fn test_formula_divergence_is_critical() {
        use crate::metadata::CalculatedField;

        let guid = Uuid::new_v4();
        let calc = |formula: &str| CalculatedField {
            id: 7,
            guid,
            name: "Risk Rating".to_string(),
            alias: None,
            description: None,
            module_id: 1,
            module_name: "Risks".to_string(),
            module_guid: Uuid::NAMESPACE_OID,
            field_type: FieldType::Calculated,
            is_required: false,
            is_key: false,
            is_calculated: true,
            max_length: None,
            default_value: None,
            calculation_formula: Some(formula.to_string()),
            calculation_return_type: Some("Text".to_string()),
            calculation_source_fields: vec![],
        };

        let mut source = snapshot("A");
        source.calculated_fields = vec![calc(r#"IF([Status]="Open",1,0)"#)];
        let mut target = snapshot("B");
        target.calculated_fields = vec![calc(r#"IF([Status]="Open",1,0) /* note */"#)];

        let (results, summary) = CompareEngine::new().compare_with_summary(&source, &target);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ComparisonStatus::Mismatch);
        assert_eq!(results[0].severity, Severity::Critical);
        assert!(results[0].differences[0].is_calculation_difference);
        assert_eq!(summary.calculated_fields.formula_differences, 1);
    }

    #[test]
    fn test_missing_in_target_scenario() {
        let mut source = snapshot("A");
        source.modules = vec![module(Uuid::new_v4(), "Risks")];
        let target = snapshot("B");

        let results = CompareEngine::new().compare(&source, &target);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ComparisonStatus::MissingInTarget);
        assert_eq!(results[0].item_name, "Risks");
    }

    #[test]
    fn test_missing_symmetry_under_swapped_arguments() {
        let shared = Uuid::new_v4();
        let mut a = snapshot("A");
        a.modules = vec![module(shared, "Shared"), module(Uuid::new_v4(), "OnlyInA")];
        let mut b = snapshot("B");
        b.modules = vec![module(shared, "Shared"), module(Uuid::new_v4(), "OnlyInB")];

        let engine = CompareEngine::new();
        let forward = engine.compare(&a, &b);
        let backward = engine.compare(&b, &a);

        let count = |results: &[ComparisonResult], status: ComparisonStatus| {
            results.iter().filter(|r| r.status == status).count()
        };
        assert_eq!(
            count(&forward, ComparisonStatus::MissingInTarget),
            count(&backward, ComparisonStatus::MissingInSource)
        );
        assert_eq!(
            count(&forward, ComparisonStatus::MissingInSource),
            count(&backward, ComparisonStatus::MissingInTarget)
        );

        let forward_missing: Vec<&str> = forward
            .iter()
            .filter(|r| r.status == ComparisonStatus::MissingInTarget)
            .map(|r| r.item_name.as_str())
            .collect();
        let backward_missing: Vec<&str> = backward
            .iter()
            .filter(|r| r.status == ComparisonStatus::MissingInSource)
            .map(|r| r.item_name.as_str())
            .collect();
        assert_eq!(forward_missing, backward_missing);
    }

    #[test]
    fn test_empty_against_populated_yields_all_missing() {
        let empty = snapshot("A");
        let mut populated = snapshot("B");
        populated.modules = vec![
            module(Uuid::new_v4(), "Risks"),
            module(Uuid::new_v4(), "Incidents"),
            module(Uuid::new_v4(), "Policies"),
        ];

        let results = CompareEngine::new().compare(&empty, &populated);
        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|r| r.status == ComparisonStatus::MissingInSource));
    }

    #[test]
    fn test_kind_order_is_fixed() {
        let guid_a = Uuid::new_v4();
        let guid_b = Uuid::new_v4();
        let mut source = snapshot("A");
        source.fields = vec![field(guid_a, "Priority", true)];
        source.modules = vec![module(guid_b, "Risks")];
        let target = MetadataSnapshot {
            environment: environment("B"),
            ..source.clone()
        };

        let results = CompareEngine::new().compare(&source, &target);
        // Modules compare before fields regardless of struct field order.
        assert_eq!(results[0].kind, ItemKind::Module);
        assert_eq!(results[1].kind, ItemKind::Field);
    }

    #[test]
    fn test_totals_invariant_via_summary() {
        let shared = Uuid::new_v4();
        let mut source = snapshot("A");
        source.modules = vec![module(shared, "Shared"), module(Uuid::new_v4(), "Gone")];
        source.fields = vec![field(Uuid::new_v4(), "Priority", true)];
        let mut target = snapshot("B");
        target.modules = vec![module(shared, "Shared")];

        let (results, summary) = CompareEngine::new().compare_with_summary(&source, &target);
        assert_eq!(summary.total_items, results.len());
        let by_kind_total: usize = summary.by_kind.values().map(|s| s.total).sum();
        assert_eq!(by_kind_total, summary.total_items);
    }
}
