//! Item Matcher
//!
//! Pairs items across two snapshots of the same entity kind using a
//! stable identity key: the cross-environment GUID, or a composite
//! name-based key when GUIDs are untrusted.

use std::collections::HashMap;

use tracing::warn;

use crate::metadata::{ItemKind, MetadataItem};

use super::types::MatchStrategy;

/// Partition of two item collections by stable identity
///
/// Every item of either side lands in exactly one bucket. Iteration
/// order follows snapshot order: source order for `paired` and
/// `source_only`, target order for `target_only`.
#[derive(Debug, Default)]
pub struct MatchOutcome<'a> {
    pub paired: Vec<(String, &'a MetadataItem, &'a MetadataItem)>,
    pub source_only: Vec<(String, &'a MetadataItem)>,
    pub target_only: Vec<(String, &'a MetadataItem)>,
}

/// Identity key for one item under the chosen strategy
pub fn identity_key(item: &MetadataItem, strategy: MatchStrategy) -> String {
    match strategy {
        MatchStrategy::Guid => item.guid().to_string(),
        MatchStrategy::CompositeKey => composite_key(item),
    }
}

/// Lower-cased trimmed name, prefixed with the parent name for kinds
/// that nest under another item
fn composite_key(item: &MetadataItem) -> String {
    let base = item.name().trim().to_lowercase();
    if item.kind() == ItemKind::SecurityParameter {
        // Security parameters may be instance-global
        return format!("{}::{}", item.parent_name().unwrap_or("global"), base);
    }
    match item.parent_name() {
        Some(parent) => format!("{parent}::{base}"),
        None => base,
    }
}

/// Items of one side keyed by identity, preserving first-seen order
struct KeyedItems<'a> {
    order: Vec<String>,
    by_key: HashMap<String, &'a MetadataItem>,
}

impl<'a> KeyedItems<'a> {
    fn build(kind: ItemKind, items: &'a [MetadataItem], strategy: MatchStrategy) -> Self {
        let mut order = Vec::with_capacity(items.len());
        let mut by_key = HashMap::with_capacity(items.len());

        for item in items {
            let key = identity_key(item, strategy);
            if by_key.insert(key.clone(), item).is_some() {
                // Last-inserted wins; the key keeps its first-seen position.
                warn!(
                    kind = kind.label(),
                    key = %key,
                    "duplicate stable identifier in snapshot, keeping last"
                );
            } else {
                order.push(key);
            }
        }

        Self { order, by_key }
    }
}

/// Partition source and target items of one kind by stable identity
pub fn match_items<'a>(
    kind: ItemKind,
    source: &'a [MetadataItem],
    target: &'a [MetadataItem],
    strategy: MatchStrategy,
) -> MatchOutcome<'a> {
    let source_keyed = KeyedItems::build(kind, source, strategy);
    let target_keyed = KeyedItems::build(kind, target, strategy);

    let mut outcome = MatchOutcome::default();

    for key in &source_keyed.order {
        let source_item = source_keyed.by_key[key];
        match target_keyed.by_key.get(key).copied() {
            Some(target_item) => outcome.paired.push((key.clone(), source_item, target_item)),
            None => outcome.source_only.push((key.clone(), source_item)),
        }
    }

    for key in &target_keyed.order {
        if !source_keyed.by_key.contains_key(key) {
            outcome.target_only.push((key.clone(), target_keyed.by_key[key]));
        }
    }

    outcome
}
