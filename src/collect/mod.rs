//! Metadata Collection
//!
//! The boundary between the comparison engine and whatever produces
//! snapshots. The engine never collects anything itself; callers hand it
//! two fully materialized snapshots obtained through a [`MetadataSource`].

pub mod mock;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::CompareResult;
use crate::metadata::MetadataSnapshot;

pub use mock::MockMetadataService;

/// Progress callback: (message, percent complete)
pub type ProgressCallback<'a> = &'a (dyn Fn(&str, u8) + Send + Sync);

/// Per-kind inclusion flags plus an optional module scope filter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionOptions {
    pub include_modules: bool,
    pub include_fields: bool,
    pub include_calculated_fields: bool,
    pub include_layouts: bool,
    pub include_values_lists: bool,
    pub include_values_list_values: bool,
    pub include_dde_rules: bool,
    pub include_dde_actions: bool,
    pub include_reports: bool,
    pub include_dashboards: bool,
    pub include_workspaces: bool,
    pub include_iviews: bool,
    pub include_roles: bool,
    pub include_security_parameters: bool,
    pub include_notifications: bool,
    pub include_data_feeds: bool,
    pub include_schedules: bool,
    /// When non-empty, restrict collection to these modules (by local id)
    pub selected_module_ids: Vec<i64>,
}

impl Default for CollectionOptions {
    /// The defaults users actually run with: everything except the two
    /// high-volume child collections
    fn default() -> Self {
        Self {
            include_modules: true,
            include_fields: true,
            include_calculated_fields: true,
            include_layouts: true,
            include_values_lists: true,
            include_values_list_values: false,
            include_dde_rules: true,
            include_dde_actions: false,
            include_reports: true,
            include_dashboards: true,
            include_workspaces: true,
            include_iviews: true,
            include_roles: true,
            include_security_parameters: true,
            include_notifications: true,
            include_data_feeds: true,
            include_schedules: true,
            selected_module_ids: Vec::new(),
        }
    }
}

impl CollectionOptions {
    /// Every collection enabled, no module filter
    pub fn all() -> Self {
        Self {
            include_values_list_values: true,
            include_dde_actions: true,
            ..Self::default()
        }
    }
}

/// A producer of metadata snapshots for one environment
///
/// Implementations may fetch concurrently and take as long as they need;
/// the engine only sees the finished snapshot. Deselected collections
/// must come back empty, not missing.
pub trait MetadataSource {
    fn collect(
        &self,
        environment: &Environment,
        options: &CollectionOptions,
    ) -> impl std::future::Future<Output = CompareResult<MetadataSnapshot>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_skip_high_volume_children() {
        let options = CollectionOptions::default();
        assert!(options.include_modules);
        assert!(options.include_fields);
        assert!(!options.include_values_list_values);
        assert!(!options.include_dde_actions);
        assert!(options.selected_module_ids.is_empty());
    }

    #[test]
    fn test_all_enables_everything() {
        let options = CollectionOptions::all();
        assert!(options.include_values_list_values);
        assert!(options.include_dde_actions);
    }

    #[test]
    fn test_options_deserialize_with_missing_flags() {
        let options: CollectionOptions =
            serde_json::from_str(r#"{"includeFields":false}"#).unwrap();
        assert!(!options.include_fields);
        assert!(options.include_modules);
    }
}
