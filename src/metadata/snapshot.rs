//! Metadata snapshot
//!
//! A full typed capture of one environment's configuration metadata at a
//! point in time. Immutable once collected; the comparison engine only
//! ever reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::environment::Environment;

use super::items::{
    CalculatedField, Dashboard, DataFeed, DdeAction, DdeRule, Field, IView, Layout, MetadataItem,
    Module, Notification, Report, Role, Schedule, SecurityParameter, ValuesList, ValuesListValue,
    Workspace,
};
use super::kinds::ItemKind;

/// Complete metadata snapshot for one environment
///
/// Every collection defaults to empty on deserialization, so a snapshot
/// missing a collection (deselected during collection, or produced by an
/// older caller) still compares cleanly instead of failing the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSnapshot {
    pub id: Uuid,
    pub environment: Environment,
    pub version: u64,
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub calculated_fields: Vec<CalculatedField>,
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub values_lists: Vec<ValuesList>,
    #[serde(default)]
    pub values_list_values: Vec<ValuesListValue>,
    #[serde(default)]
    pub dde_rules: Vec<DdeRule>,
    #[serde(default)]
    pub dde_actions: Vec<DdeAction>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub dashboards: Vec<Dashboard>,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
    #[serde(default)]
    pub iviews: Vec<IView>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub security_parameters: Vec<SecurityParameter>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub data_feeds: Vec<DataFeed>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub checksum: String,
}

impl MetadataSnapshot {
    /// Create an empty snapshot for an environment
    pub fn new(environment: Environment) -> Self {
        Self {
            id: Uuid::new_v4(),
            environment,
            version: 0,
            collected_at: Utc::now(),
            modules: Vec::new(),
            fields: Vec::new(),
            calculated_fields: Vec::new(),
            layouts: Vec::new(),
            values_lists: Vec::new(),
            values_list_values: Vec::new(),
            dde_rules: Vec::new(),
            dde_actions: Vec::new(),
            reports: Vec::new(),
            dashboards: Vec::new(),
            workspaces: Vec::new(),
            iviews: Vec::new(),
            roles: Vec::new(),
            security_parameters: Vec::new(),
            notifications: Vec::new(),
            data_feeds: Vec::new(),
            schedules: Vec::new(),
            checksum: String::new(),
        }
    }

    /// All items of one kind, wrapped for the engine
    pub fn collection(&self, kind: ItemKind) -> Vec<MetadataItem> {
        fn wrap<T: Clone + Into<MetadataItem>>(items: &[T]) -> Vec<MetadataItem> {
            items.iter().cloned().map(Into::into).collect()
        }

        match kind {
            ItemKind::Module => wrap(&self.modules),
            ItemKind::Field => wrap(&self.fields),
            ItemKind::CalculatedField => wrap(&self.calculated_fields),
            ItemKind::Layout => wrap(&self.layouts),
            ItemKind::ValuesList => wrap(&self.values_lists),
            ItemKind::ValuesListValue => wrap(&self.values_list_values),
            ItemKind::DdeRule => wrap(&self.dde_rules),
            ItemKind::DdeAction => wrap(&self.dde_actions),
            ItemKind::Report => wrap(&self.reports),
            ItemKind::Dashboard => wrap(&self.dashboards),
            ItemKind::Workspace => wrap(&self.workspaces),
            ItemKind::IView => wrap(&self.iviews),
            ItemKind::Role => wrap(&self.roles),
            ItemKind::SecurityParameter => wrap(&self.security_parameters),
            ItemKind::Notification => wrap(&self.notifications),
            ItemKind::DataFeed => wrap(&self.data_feeds),
            ItemKind::Schedule => wrap(&self.schedules),
        }
    }

    /// Total number of items across all collections
    pub fn item_count(&self) -> usize {
        ItemKind::ALL
            .iter()
            .map(|kind| self.collection(*kind).len())
            .sum()
    }

    /// Compute a content checksum over all collections
    ///
    /// Hash input is sorted, so two snapshots holding the same items in a
    /// different order produce the same checksum.
    pub fn compute_checksum(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for kind in ItemKind::ALL {
            for item in self.collection(kind) {
                lines.push(format!("{:?}:{}:{}", kind, item.guid(), item.name()));
            }
        }
        lines.sort();

        let mut hasher = Sha256::new();
        for line in &lines {
            hasher.update(line.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// Recompute and store the content checksum
    pub fn finalize(&mut self) {
        self.checksum = self.compute_checksum();
    }
}
