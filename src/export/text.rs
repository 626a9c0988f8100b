//! Text report export
//!
//! Human-readable hierarchical report: run header, summary block, then
//! per-kind sections listing everything that is not a clean match.

use std::fmt::Write;

use crate::compare::{ComparisonResult, ComparisonStatus, ComparisonSummary};
use crate::metadata::{ItemKind, MetadataSnapshot};

/// Render a full comparison run as plain text
pub fn render_text_report(
    source: &MetadataSnapshot,
    target: &MetadataSnapshot,
    results: &[ComparisonResult],
    summary: &ComparisonSummary,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Archer Metadata Comparison Report");
    let _ = writeln!(out, "=================================");
    let _ = writeln!(
        out,
        "Source: {} ({})",
        source.environment.display_name, source.environment.instance_name
    );
    let _ = writeln!(
        out,
        "Target: {} ({})",
        target.environment.display_name, target.environment.instance_name
    );
    let _ = writeln!(out, "Source checksum: {}", source.checksum);
    let _ = writeln!(out, "Target checksum: {}", target.checksum);
    let _ = writeln!(out);

    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "-------");
    let _ = writeln!(out, "Total items:       {}", summary.total_items);
    let _ = writeln!(out, "Matched:           {}", summary.matched_count);
    let _ = writeln!(out, "Mismatched:        {}", summary.mismatched_count);
    let _ = writeln!(out, "Missing in source: {}", summary.missing_in_source_count);
    let _ = writeln!(out, "Missing in target: {}", summary.missing_in_target_count);
    let _ = writeln!(
        out,
        "Calculated fields: {} matched, {} mismatched ({} formula differences)",
        summary.calculated_fields.matched,
        summary.calculated_fields.mismatched,
        summary.calculated_fields.formula_differences
    );
    let _ = writeln!(out);

    for kind in ItemKind::ALL {
        let kind_results: Vec<&ComparisonResult> = results
            .iter()
            .filter(|r| r.kind == kind && r.status != ComparisonStatus::Match)
            .collect();
        if kind_results.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{} ({} findings)", kind.label(), kind_results.len());
        for result in kind_results {
            let status = match result.status {
                ComparisonStatus::Match => "Match",
                ComparisonStatus::Mismatch => "Mismatch",
                ComparisonStatus::MissingInSource => "Missing in source",
                ComparisonStatus::MissingInTarget => "Missing in target",
            };
            let parent = result
                .parent_name
                .as_deref()
                .map(|p| format!(" [{p}]"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} {}{} - {} ({:?})",
                status, result.item_name, parent, result.item_key, result.severity
            );
            for diff in &result.differences {
                let marker = if diff.is_calculation_difference {
                    " (calculation)"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    "    {}{}: \"{}\" -> \"{}\"",
                    diff.property_name, marker, diff.source_value, diff.target_value
                );
            }
        }
        let _ = writeln!(out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{summarize, CompareEngine};
    use crate::environment::Environment;
    use crate::metadata::Module;
    use uuid::Uuid;

    fn snapshot(name: &str, modules: Vec<Module>) -> MetadataSnapshot {
        let mut snapshot =
            MetadataSnapshot::new(Environment::new(name, "https://archer.test", "Default"));
        snapshot.modules = modules;
        snapshot.finalize();
        snapshot
    }

    fn module(guid: Uuid, name: &str, field_count: u32) -> Module {
        Module {
            id: 1,
            guid,
            name: name.to_string(),
            alias: None,
            description: None,
            level_id: 100,
            is_subform: false,
            parent_module_id: None,
            field_count,
        }
    }

    #[test]
    fn test_report_contains_header_summary_and_findings() {
        let shared = Uuid::new_v4();
        let source = snapshot(
            "Dev",
            vec![
                module(shared, "Risks", 10),
                module(Uuid::new_v4(), "Only In Dev", 5),
            ],
        );
        let target = snapshot("Prod", vec![module(shared, "Risks", 12)]);

        let (results, summary) = CompareEngine::new().compare_with_summary(&source, &target);
        let report = render_text_report(&source, &target, &results, &summary);

        assert!(report.contains("Source: Dev"));
        assert!(report.contains("Target: Prod"));
        assert!(report.contains("Total items:       2"));
        assert!(report.contains("Module (2 findings)"));
        assert!(report.contains("Missing in target Only In Dev"));
        assert!(report.contains("fieldCount"));
    }

    #[test]
    fn test_clean_run_has_no_finding_sections() {
        let shared = Uuid::new_v4();
        let source = snapshot("Dev", vec![module(shared, "Risks", 10)]);
        let target = snapshot("Prod", vec![module(shared, "Risks", 10)]);

        let (results, _) = CompareEngine::new().compare_with_summary(&source, &target);
        let summary = summarize(&results);
        let report = render_text_report(&source, &target, &results, &summary);

        assert!(!report.contains("findings"));
        assert!(report.contains("Matched:           1"));
    }
}
