//! CSV export
//!
//! Flat comparison export: one row per result, with mismatches flattened
//! to one row per property difference. The flattening is purely a
//! presentation concern; the engine's per-item results and counts are
//! untouched.

use crate::compare::ComparisonResult;

const HEADER: &str =
    "Type,Item Name,Identifier,Parent,Status,Severity,Property,Source Value,Target Value,Calculation Difference";

/// Render results as RFC 4180 CSV
pub fn results_to_csv(results: &[ComparisonResult]) -> String {
    let mut out = String::with_capacity(results.len() * 96);
    out.push_str(HEADER);
    out.push('\n');

    for result in results {
        let prefix = [
            result.kind.label().to_string(),
            result.item_name.clone(),
            result.item_key.clone(),
            result.parent_name.clone().unwrap_or_default(),
            format!("{:?}", result.status),
            format!("{:?}", result.severity),
        ];

        if result.differences.is_empty() {
            push_row(&mut out, &prefix, &["", "", "", ""]);
        } else {
            for diff in &result.differences {
                push_row(
                    &mut out,
                    &prefix,
                    &[
                        &diff.property_name,
                        &diff.source_value,
                        &diff.target_value,
                        if diff.is_calculation_difference {
                            "Yes"
                        } else {
                            "No"
                        },
                    ],
                );
            }
        }
    }

    out
}

fn push_row(out: &mut String, prefix: &[String], rest: &[&str]) {
    let mut first = true;
    for cell in prefix.iter().map(String::as_str).chain(rest.iter().copied()) {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape(cell));
    }
    out.push('\n');
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
