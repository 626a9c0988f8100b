//! Metadata item model
//!
//! One struct per Archer entity kind, plus the `MetadataItem` enum the
//! engine operates on. Every item carries an environment-local numeric id
//! (never compared), a stable GUID (the cross-environment identity), a
//! display name, and kind-specific attributes.
//!
//! Each kind exposes its comparable properties as an explicit, ordered
//! list known at compile time. Environment-local identifiers (`id`,
//! `module_id`, `rule_id`, raw id arrays, ...) are excluded by
//! construction: they are simply never listed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::kinds::ItemKind;

/// Archer field data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    NumericField,
    DateField,
    ValuesList,
    CrossReference,
    Attachment,
    Image,
    ExternalLinks,
    UsersGroups,
    RecordPermissions,
    TrackingField,
    SubForm,
    RelatedRecords,
    History,
    SchedulerField,
    Matrix,
    IpAddress,
    Calculated,
}

impl FieldType {
    /// Display name as shown in the Archer UI
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::NumericField => "Numeric",
            FieldType::DateField => "Date",
            FieldType::ValuesList => "Values List",
            FieldType::CrossReference => "Cross-Reference",
            FieldType::Attachment => "Attachment",
            FieldType::Image => "Image",
            FieldType::ExternalLinks => "External Links",
            FieldType::UsersGroups => "Users/Groups",
            FieldType::RecordPermissions => "Record Permissions",
            FieldType::TrackingField => "Tracking",
            FieldType::SubForm => "Sub-Form",
            FieldType::RelatedRecords => "Related Records",
            FieldType::History => "History Log",
            FieldType::SchedulerField => "Scheduler",
            FieldType::Matrix => "Matrix",
            FieldType::IpAddress => "IP Address",
            FieldType::Calculated => "Calculated",
        }
    }
}

/// Archer report flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    Statistical,
    CardReport,
    RecordSearch,
    QuickSearch,
}

/// Application (module) definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub level_id: i64,
    pub is_subform: bool,
    pub parent_module_id: Option<i64>,
    pub field_count: u32,
}

impl Module {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("isSubform", json!(self.is_subform)),
            ("fieldCount", json!(self.field_count)),
        ]
    }
}

/// Field definition within a module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub module_id: i64,
    pub module_name: String,
    pub module_guid: Uuid,
    pub field_type: FieldType,
    pub is_required: bool,
    pub is_key: bool,
    pub is_calculated: bool,
    pub max_length: Option<u32>,
    pub default_value: Option<String>,
    pub related_values_list_id: Option<i64>,
    pub related_values_list_guid: Option<Uuid>,
}

impl Field {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
            ("fieldType", json!(self.field_type)),
            ("isRequired", json!(self.is_required)),
            ("isKey", json!(self.is_key)),
            ("isCalculated", json!(self.is_calculated)),
            ("maxLength", json!(self.max_length)),
            ("defaultValue", json!(self.default_value)),
            ("relatedValuesListGuid", json!(self.related_values_list_guid)),
        ]
    }
}

/// Calculated field definition
///
/// Shares the field shape and additionally carries the formula. The
/// formula itself is compared by the differ's dedicated calculation path,
/// not through this property list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedField {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub module_id: i64,
    pub module_name: String,
    pub module_guid: Uuid,
    pub field_type: FieldType,
    pub is_required: bool,
    pub is_key: bool,
    pub is_calculated: bool,
    pub max_length: Option<u32>,
    pub default_value: Option<String>,
    pub calculation_formula: Option<String>,
    pub calculation_return_type: Option<String>,
    pub calculation_source_fields: Vec<Uuid>,
}

impl CalculatedField {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
            ("fieldType", json!(self.field_type)),
            ("isRequired", json!(self.is_required)),
            ("isKey", json!(self.is_key)),
            ("isCalculated", json!(self.is_calculated)),
            ("maxLength", json!(self.max_length)),
            ("defaultValue", json!(self.default_value)),
            ("calculationReturnType", json!(self.calculation_return_type)),
            ("calculationSourceFields", json!(self.calculation_source_fields)),
        ]
    }
}

/// Layout definition for a module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub module_id: i64,
    pub module_name: String,
    pub module_guid: Uuid,
    pub is_default: bool,
    /// Environment-local field ids, excluded from comparison
    pub field_ids: Vec<i64>,
    /// Stable field GUIDs, compared as an order-independent set
    pub field_guids: Vec<Uuid>,
}

impl Layout {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
            ("isDefault", json!(self.is_default)),
            ("fieldGuids", json!(self.field_guids)),
        ]
    }
}

/// Values list definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesList {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub values_count: u32,
    pub is_hierarchical: bool,
}

impl ValuesList {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("valuesCount", json!(self.values_count)),
            ("isHierarchical", json!(self.is_hierarchical)),
        ]
    }
}

/// A single value within a values list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesListValue {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub values_list_id: i64,
    pub values_list_guid: Uuid,
    pub values_list_name: String,
    pub numeric_value: i32,
    pub sort_order: i32,
    pub parent_value_id: Option<i64>,
    pub is_selectable: bool,
}

impl ValuesListValue {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("valuesListName", json!(self.values_list_name)),
            ("valuesListGuid", json!(self.values_list_guid)),
            ("numericValue", json!(self.numeric_value)),
            ("sortOrder", json!(self.sort_order)),
            ("isSelectable", json!(self.is_selectable)),
        ]
    }
}

/// Data driven event rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdeRule {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub module_id: i64,
    pub module_name: String,
    pub module_guid: Uuid,
    pub is_enabled: bool,
    pub trigger_type: String,
    pub condition_logic: Option<String>,
    pub actions_count: u32,
}

impl DdeRule {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
            ("isEnabled", json!(self.is_enabled)),
            ("triggerType", json!(self.trigger_type)),
            ("conditionLogic", json!(self.condition_logic)),
            ("actionsCount", json!(self.actions_count)),
        ]
    }
}

/// Data driven event action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdeAction {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub rule_id: i64,
    pub rule_guid: Uuid,
    pub rule_name: String,
    pub action_type: String,
    pub order: i32,
}

impl DdeAction {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("ruleName", json!(self.rule_name)),
            ("ruleGuid", json!(self.rule_guid)),
            ("actionType", json!(self.action_type)),
            ("order", json!(self.order)),
        ]
    }
}

/// Saved report definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub report_type: ReportType,
    pub module_id: Option<i64>,
    pub module_name: Option<String>,
    pub module_guid: Option<Uuid>,
    pub is_shared: bool,
    pub owner: String,
}

impl Report {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("reportType", json!(self.report_type)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
            ("isShared", json!(self.is_shared)),
            ("owner", json!(self.owner)),
        ]
    }
}

/// Dashboard definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub iviews_count: u32,
    pub iview_guids: Vec<Uuid>,
    pub is_shared: bool,
    pub owner: String,
}

impl Dashboard {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("iViewsCount", json!(self.iviews_count)),
            ("iViewGuids", json!(self.iview_guids)),
            ("isShared", json!(self.is_shared)),
            ("owner", json!(self.owner)),
        ]
    }
}

/// Workspace definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub dashboards_count: u32,
    pub dashboard_guids: Vec<Uuid>,
    pub order: i32,
}

impl Workspace {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("dashboardsCount", json!(self.dashboards_count)),
            ("dashboardGuids", json!(self.dashboard_guids)),
            ("order", json!(self.order)),
        ]
    }
}

/// iView (dashboard panel) definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IView {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub iview_type: String,
    pub report_id: Option<i64>,
    pub report_name: Option<String>,
}

impl IView {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("iViewType", json!(self.iview_type)),
            ("reportName", json!(self.report_name)),
        ]
    }
}

/// Access role definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub users_count: u32,
    pub groups_count: u32,
    pub is_system_role: bool,
    /// Permission GUIDs, compared as an order-independent set
    pub permission_guids: Vec<Uuid>,
}

impl Role {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("usersCount", json!(self.users_count)),
            ("groupsCount", json!(self.groups_count)),
            ("isSystemRole", json!(self.is_system_role)),
            ("permissionGuids", json!(self.permission_guids)),
        ]
    }
}

/// Security parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityParameter {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub security_type: String,
    pub module_id: Option<i64>,
    pub module_name: Option<String>,
    pub module_guid: Option<Uuid>,
}

impl SecurityParameter {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("securityType", json!(self.security_type)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
        ]
    }
}

/// Notification template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub module_id: i64,
    pub module_name: String,
    pub module_guid: Uuid,
    pub is_enabled: bool,
    pub trigger_type: String,
}

impl Notification {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("moduleName", json!(self.module_name)),
            ("moduleGuid", json!(self.module_guid)),
            ("isEnabled", json!(self.is_enabled)),
            ("triggerType", json!(self.trigger_type)),
        ]
    }
}

/// Data feed definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFeed {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub feed_type: String,
    pub target_module_id: i64,
    pub target_module_name: String,
    pub target_module_guid: Uuid,
    pub is_enabled: bool,
    pub schedule: Option<String>,
}

impl DataFeed {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("feedType", json!(self.feed_type)),
            ("targetModuleName", json!(self.target_module_name)),
            ("targetModuleGuid", json!(self.target_module_guid)),
            ("isEnabled", json!(self.is_enabled)),
            ("schedule", json!(self.schedule)),
        ]
    }
}

/// Job schedule definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub guid: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub schedule_type: String,
    pub frequency: String,
    pub cron_expression: Option<String>,
    pub is_enabled: bool,
    pub last_run_date: Option<DateTime<Utc>>,
    pub next_run_date: Option<DateTime<Utc>>,
}

impl Schedule {
    fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name)),
            ("alias", json!(self.alias)),
            ("description", json!(self.description)),
            ("scheduleType", json!(self.schedule_type)),
            ("frequency", json!(self.frequency)),
            ("cronExpression", json!(self.cron_expression)),
            ("isEnabled", json!(self.is_enabled)),
            ("lastRunDate", json!(self.last_run_date)),
            ("nextRunDate", json!(self.next_run_date)),
        ]
    }
}

/// Any Archer metadata item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MetadataItem {
    Module(Module),
    Field(Field),
    CalculatedField(CalculatedField),
    Layout(Layout),
    ValuesList(ValuesList),
    ValuesListValue(ValuesListValue),
    DdeRule(DdeRule),
    DdeAction(DdeAction),
    Report(Report),
    Dashboard(Dashboard),
    Workspace(Workspace),
    IView(IView),
    Role(Role),
    SecurityParameter(SecurityParameter),
    Notification(Notification),
    DataFeed(DataFeed),
    Schedule(Schedule),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            MetadataItem::Module($inner) => $body,
            MetadataItem::Field($inner) => $body,
            MetadataItem::CalculatedField($inner) => $body,
            MetadataItem::Layout($inner) => $body,
            MetadataItem::ValuesList($inner) => $body,
            MetadataItem::ValuesListValue($inner) => $body,
            MetadataItem::DdeRule($inner) => $body,
            MetadataItem::DdeAction($inner) => $body,
            MetadataItem::Report($inner) => $body,
            MetadataItem::Dashboard($inner) => $body,
            MetadataItem::Workspace($inner) => $body,
            MetadataItem::IView($inner) => $body,
            MetadataItem::Role($inner) => $body,
            MetadataItem::SecurityParameter($inner) => $body,
            MetadataItem::Notification($inner) => $body,
            MetadataItem::DataFeed($inner) => $body,
            MetadataItem::Schedule($inner) => $body,
        }
    };
}

impl MetadataItem {
    /// Entity kind of this item
    pub fn kind(&self) -> ItemKind {
        match self {
            MetadataItem::Module(_) => ItemKind::Module,
            MetadataItem::Field(_) => ItemKind::Field,
            MetadataItem::CalculatedField(_) => ItemKind::CalculatedField,
            MetadataItem::Layout(_) => ItemKind::Layout,
            MetadataItem::ValuesList(_) => ItemKind::ValuesList,
            MetadataItem::ValuesListValue(_) => ItemKind::ValuesListValue,
            MetadataItem::DdeRule(_) => ItemKind::DdeRule,
            MetadataItem::DdeAction(_) => ItemKind::DdeAction,
            MetadataItem::Report(_) => ItemKind::Report,
            MetadataItem::Dashboard(_) => ItemKind::Dashboard,
            MetadataItem::Workspace(_) => ItemKind::Workspace,
            MetadataItem::IView(_) => ItemKind::IView,
            MetadataItem::Role(_) => ItemKind::Role,
            MetadataItem::SecurityParameter(_) => ItemKind::SecurityParameter,
            MetadataItem::Notification(_) => ItemKind::Notification,
            MetadataItem::DataFeed(_) => ItemKind::DataFeed,
            MetadataItem::Schedule(_) => ItemKind::Schedule,
        }
    }

    /// Environment-local numeric id (never compared)
    pub fn local_id(&self) -> i64 {
        dispatch!(self, item => item.id)
    }

    /// Stable cross-environment GUID
    pub fn guid(&self) -> Uuid {
        dispatch!(self, item => item.guid)
    }

    /// Display name
    pub fn name(&self) -> &str {
        dispatch!(self, item => item.name.as_str())
    }

    /// Alias, if configured
    pub fn alias(&self) -> Option<&str> {
        dispatch!(self, item => item.alias.as_deref())
    }

    /// Display name of the owning item, for kinds that have one
    pub fn parent_name(&self) -> Option<&str> {
        match self {
            MetadataItem::Field(f) => Some(f.module_name.as_str()),
            MetadataItem::CalculatedField(f) => Some(f.module_name.as_str()),
            MetadataItem::Layout(l) => Some(l.module_name.as_str()),
            MetadataItem::ValuesListValue(v) => Some(v.values_list_name.as_str()),
            MetadataItem::DdeRule(r) => Some(r.module_name.as_str()),
            MetadataItem::DdeAction(a) => Some(a.rule_name.as_str()),
            MetadataItem::Notification(n) => Some(n.module_name.as_str()),
            MetadataItem::SecurityParameter(s) => s.module_name.as_deref(),
            _ => None,
        }
    }

    /// Ordered list of comparable properties for this item's kind.
    ///
    /// Local ids, the kind discriminator, and the matching GUID are never
    /// present. Calculated formulas are compared by the differ's dedicated
    /// path and are likewise absent here.
    pub fn comparable_properties(&self) -> Vec<(&'static str, Value)> {
        dispatch!(self, item => item.comparable_properties())
    }
}

macro_rules! impl_from_item {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for MetadataItem {
            fn from(item: $ty) -> Self {
                MetadataItem::$variant(item)
            }
        })*
    };
}

impl_from_item! {
    Module => Module,
    Field => Field,
    CalculatedField => CalculatedField,
    Layout => Layout,
    ValuesList => ValuesList,
    ValuesListValue => ValuesListValue,
    DdeRule => DdeRule,
    DdeAction => DdeAction,
    Report => Report,
    Dashboard => Dashboard,
    Workspace => Workspace,
    IView => IView,
    Role => Role,
    SecurityParameter => SecurityParameter,
    Notification => Notification,
    DataFeed => DataFeed,
    Schedule => Schedule,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_module() -> Module {
        Module {
            id: 42,
            guid: Uuid::new_v4(),
            name: "Risk Register".to_string(),
            alias: Some("Risk_Register".to_string()),
            description: None,
            level_id: 101,
            is_subform: false,
            parent_module_id: None,
            field_count: 18,
        }
    }

    #[test]
    fn test_local_ids_never_listed_as_properties() {
        let item = MetadataItem::from(sample_module());
        let names: Vec<&str> = item
            .comparable_properties()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert!(!names.contains(&"id"));
        assert!(!names.contains(&"levelId"));
        assert!(!names.contains(&"parentModuleId"));
        assert!(!names.contains(&"guid"));
        assert!(!names.contains(&"type"));
    }

    #[test]
    fn test_kind_accessor_matches_variant() {
        let item = MetadataItem::from(sample_module());
        assert_eq!(item.kind(), ItemKind::Module);
        assert_eq!(item.local_id(), 42);
        assert_eq!(item.name(), "Risk Register");
        assert_eq!(item.parent_name(), None);
    }

    #[test]
    fn test_serde_tags_items_by_kind() {
        let item = MetadataItem::from(sample_module());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "Module");
        assert_eq!(value["name"], "Risk Register");
    }
}
