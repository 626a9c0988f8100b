//! Mock metadata service
//!
//! Generates realistic Archer metadata without touching a live instance.
//! Fully deterministic: the same seed produces the same snapshot, and the
//! source/target sides of one seed share stable GUIDs so cross-environment
//! matching behaves like a real deployment. Never shares state with the
//! engine.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

use crate::environment::Environment;
use crate::error::CompareResult;
use crate::metadata::{
    CalculatedField, Dashboard, DataFeed, DdeAction, DdeRule, Field, FieldType, IView, Layout,
    MetadataSnapshot, Module, Notification, Report, ReportType, Role, Schedule, SecurityParameter,
    ValuesList, ValuesListValue, Workspace,
};

use super::{CollectionOptions, MetadataSource, ProgressCallback};

/// Namespace for deriving stable mock GUIDs
static MOCK_NAMESPACE: Lazy<Uuid> =
    Lazy::new(|| Uuid::new_v5(&Uuid::NAMESPACE_OID, b"archer-compare/mock"));

const MODULE_NAMES: [&str; 5] = [
    "Incident Management",
    "Risk Register",
    "Policy Management",
    "Vendor Assessment",
    "Business Continuity",
];

const FIELD_NAMES: [&str; 25] = [
    "Record ID",
    "Title",
    "Description",
    "Status",
    "Priority",
    "Owner",
    "Created Date",
    "Due Date",
    "Risk Score",
    "Impact",
    "Likelihood",
    "Control Effectiveness",
    "Residual Risk",
    "Comments",
    "Attachments",
    "Related Records",
    "Approval Status",
    "Reviewer",
    "Last Modified",
    "Category",
    "Sub-Category",
    "Department",
    "Location",
    "Compliance Status",
    "Audit Trail",
];

const FIELD_TYPES: [FieldType; 7] = [
    FieldType::Text,
    FieldType::NumericField,
    FieldType::DateField,
    FieldType::ValuesList,
    FieldType::CrossReference,
    FieldType::Attachment,
    FieldType::UsersGroups,
];

const CALCULATION_FORMULAS: [&str; 10] = [
    r#"IF([Status]="Open", "Active", "Closed")"#,
    r#"DATEDIFF([Due Date], NOW(), "days")"#,
    "[Impact] * [Likelihood]",
    r#"IF([Risk Score] > 15, "High", IF([Risk Score] > 8, "Medium", "Low"))"#,
    r#"CONCATENATE([First Name], " ", [Last Name])"#,
    "SUM([Related Records].[Amount])",
    "COUNT([Related Records])",
    r#"IF(ISBLANK([Owner]), "Unassigned", [Owner])"#,
    "AVERAGE([Related Records].[Score])",
    "MAX([Related Records].[Date])",
];

const VALUES_LIST_NAMES: [&str; 10] = [
    "Status",
    "Priority",
    "Risk Level",
    "Department",
    "Region",
    "Category",
    "Impact Level",
    "Likelihood",
    "Control Type",
    "Frequency",
];

const VALUE_NAMES: [&str; 5] = ["Low", "Medium", "High", "Critical", "N/A"];

/// With mismatches enabled, field identities beyond this index are
/// environment-local: each side gets its own GUIDs and the comparison
/// reports them missing.
const SHARED_FIELD_LIMIT: usize = 35;

/// Which side of a comparison this service generates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
    Source,
    Target,
}

/// Deterministic generator of Archer metadata snapshots
#[derive(Debug, Clone)]
pub struct MockMetadataService {
    seed: u64,
    side: SnapshotSide,
    introduce_mismatches: bool,
    introduce_formula_differences: bool,
}

impl MockMetadataService {
    /// Service for the source side of a comparison
    pub fn source(seed: u64) -> Self {
        Self {
            seed,
            side: SnapshotSide::Source,
            introduce_mismatches: false,
            introduce_formula_differences: false,
        }
    }

    /// Service for the target side of a comparison
    pub fn target(seed: u64) -> Self {
        Self {
            side: SnapshotSide::Target,
            ..Self::source(seed)
        }
    }

    /// Mutate selected target-side values so comparisons report mismatches
    pub fn with_mismatches(mut self, on: bool) -> Self {
        self.introduce_mismatches = on;
        self
    }

    /// Mutate selected target-side calculation formulas
    pub fn with_formula_differences(mut self, on: bool) -> Self {
        self.introduce_formula_differences = on;
        self
    }

    /// Collect a snapshot, reporting progress per collection step
    pub async fn collect_with_progress(
        &self,
        environment: &Environment,
        options: &CollectionOptions,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> CompareResult<MetadataSnapshot> {
        debug!(
            environment = %environment.display_name,
            seed = self.seed,
            side = ?self.side,
            "generating mock metadata"
        );

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut snapshot = MetadataSnapshot::new(environment.clone());

        let mut modules = self.generate_modules();
        if !options.selected_module_ids.is_empty() {
            modules.retain(|m| options.selected_module_ids.contains(&(m.id % 1000)));
        }

        let (fields, calculated_fields) = self.generate_fields(&modules, &mut rng);
        let layouts = self.generate_layouts(&modules, &fields);
        let values_lists = self.generate_values_lists();
        let values_list_values = self.generate_values_list_values(&values_lists);
        let dde_rules = self.generate_dde_rules(&modules, &mut rng);
        let dde_actions = self.generate_dde_actions(&dde_rules);

        let enabled = [
            options.include_modules,
            options.include_fields,
            options.include_calculated_fields,
            options.include_layouts,
            options.include_values_lists,
            options.include_values_list_values,
            options.include_dde_rules,
            options.include_dde_actions,
            options.include_reports,
            options.include_dashboards,
            options.include_workspaces,
            options.include_iviews,
            options.include_roles,
            options.include_security_parameters,
            options.include_notifications,
            options.include_data_feeds,
            options.include_schedules,
        ];
        let total_steps = enabled.iter().filter(|on| **on).count().max(1);
        let mut current_step = 0usize;
        let mut report = |enabled: bool, what: &str| {
            if enabled {
                current_step += 1;
                if let Some(callback) = on_progress {
                    let percent = (current_step * 100 / total_steps) as u8;
                    callback(
                        &format!("Collecting {what} from {}...", environment.display_name),
                        percent,
                    );
                }
            }
        };

        if options.include_modules {
            snapshot.modules = modules.clone();
        }
        report(options.include_modules, "modules");
        if options.include_fields {
            snapshot.fields = fields;
        }
        report(options.include_fields, "fields");
        if options.include_calculated_fields {
            snapshot.calculated_fields = calculated_fields;
        }
        report(options.include_calculated_fields, "calculated fields");
        if options.include_layouts {
            snapshot.layouts = layouts;
        }
        report(options.include_layouts, "layouts");
        if options.include_values_lists {
            snapshot.values_lists = values_lists;
        }
        report(options.include_values_lists, "values lists");
        if options.include_values_list_values {
            snapshot.values_list_values = values_list_values;
        }
        report(options.include_values_list_values, "values list values");
        if options.include_dde_rules {
            snapshot.dde_rules = dde_rules;
        }
        report(options.include_dde_rules, "DDE rules");
        if options.include_dde_actions {
            snapshot.dde_actions = dde_actions;
        }
        report(options.include_dde_actions, "DDE actions");
        if options.include_reports {
            snapshot.reports = self.generate_reports(&modules);
        }
        report(options.include_reports, "reports");
        if options.include_dashboards {
            snapshot.dashboards = self.generate_dashboards();
        }
        report(options.include_dashboards, "dashboards");
        if options.include_workspaces {
            snapshot.workspaces = self.generate_workspaces();
        }
        report(options.include_workspaces, "workspaces");
        if options.include_iviews {
            snapshot.iviews = self.generate_iviews();
        }
        report(options.include_iviews, "iViews");
        if options.include_roles {
            snapshot.roles = self.generate_roles();
        }
        report(options.include_roles, "roles");
        if options.include_security_parameters {
            snapshot.security_parameters = self.generate_security_parameters();
        }
        report(options.include_security_parameters, "security parameters");
        if options.include_notifications {
            snapshot.notifications = self.generate_notifications(&modules);
        }
        report(options.include_notifications, "notifications");
        if options.include_data_feeds {
            snapshot.data_feeds = self.generate_data_feeds(&modules);
        }
        report(options.include_data_feeds, "data feeds");
        if options.include_schedules {
            snapshot.schedules = self.generate_schedules();
        }
        report(options.include_schedules, "schedules");

        snapshot.finalize();
        Ok(snapshot)
    }

    /// Stable GUID shared across both sides of this seed
    fn stable_guid(&self, label: &str) -> Uuid {
        Uuid::new_v5(&MOCK_NAMESPACE, format!("{}:{}", self.seed, label).as_bytes())
    }

    /// GUID unique to this side, so the other side reports it missing
    fn side_guid(&self, label: &str) -> Uuid {
        Uuid::new_v5(
            &MOCK_NAMESPACE,
            format!("{}:{:?}:{}", self.seed, self.side, label).as_bytes(),
        )
    }

    /// Local numeric ids deliberately differ between sides; the engine
    /// must never surface that.
    fn local_id(&self, base: i64) -> i64 {
        match self.side {
            SnapshotSide::Source => base,
            SnapshotSide::Target => base + 1000,
        }
    }

    fn is_target_with_mismatches(&self) -> bool {
        self.side == SnapshotSide::Target && self.introduce_mismatches
    }

    fn run_date(&self, offset_days: i64) -> DateTime<Utc> {
        let base = 1_750_000_000 + (self.seed as i64 % 86_400);
        DateTime::<Utc>::from_timestamp(base + offset_days * 86_400, 0).unwrap_or_default()
    }

    fn generate_modules(&self) -> Vec<Module> {
        MODULE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Module {
                id: self.local_id(i as i64 + 1),
                guid: self.stable_guid(&format!("module:{i}")),
                name: name.to_string(),
                alias: Some(name.replace(' ', "_")),
                description: Some(format!("{name} application for GRC management")),
                level_id: self.local_id(100 + i as i64),
                is_subform: i == 4,
                parent_module_id: (i == 4).then(|| self.local_id(1)),
                field_count: 15 + i as u32 * 3,
            })
            .collect()
    }

    fn generate_fields(
        &self,
        modules: &[Module],
        rng: &mut StdRng,
    ) -> (Vec<Field>, Vec<CalculatedField>) {
        let mut fields = Vec::new();
        let mut calculated = Vec::new();
        let mut field_index = 0usize;

        for module in modules {
            let fields_per_module = 8 + rng.gen_range(0..5usize);

            for i in 0..fields_per_module {
                // Last two fields of each module are calculated.
                let is_calculated = i >= fields_per_module - 2;
                let guid = if field_index < SHARED_FIELD_LIMIT || !self.introduce_mismatches {
                    self.stable_guid(&format!("field:{field_index}"))
                } else {
                    self.side_guid(&format!("field:{field_index}"))
                };
                let name = FIELD_NAMES[i % FIELD_NAMES.len()].to_string();
                let alias = module
                    .alias
                    .as_ref()
                    .map(|a| format!("{a}_{}", name.replace(' ', "_")));

                if is_calculated {
                    let mut formula =
                        CALCULATION_FORMULAS[i % CALCULATION_FORMULAS.len()].to_string();
                    // Of the two calculated fields per module, exactly one
                    // sits on an even index, so the knob always bites.
                    if self.side == SnapshotSide::Target
                        && self.introduce_formula_differences
                        && i % 2 == 0
                    {
                        formula = format!("{} /* modified */", formula.replace("IF(", "IIF("));
                    }
                    calculated.push(CalculatedField {
                        id: self.local_id(field_index as i64 + 1),
                        guid,
                        name,
                        alias,
                        description: Some(format!("Calculated field for {}", module.name)),
                        module_id: module.id,
                        module_name: module.name.clone(),
                        module_guid: module.guid,
                        field_type: FieldType::Calculated,
                        is_required: false,
                        is_key: false,
                        is_calculated: true,
                        max_length: None,
                        default_value: None,
                        calculation_formula: Some(formula),
                        calculation_return_type: Some("Text".to_string()),
                        calculation_source_fields: vec![
                            self.stable_guid("field:0"),
                            self.stable_guid("field:1"),
                        ],
                    });
                } else {
                    let field_type = FIELD_TYPES[field_index % FIELD_TYPES.len()];
                    let mut is_required = i < 3;
                    if self.is_target_with_mismatches() && field_index % 10 == 4 {
                        is_required = !is_required;
                    }
                    fields.push(Field {
                        id: self.local_id(field_index as i64 + 1),
                        guid,
                        name,
                        alias,
                        description: Some(format!(
                            "{} for {}",
                            FIELD_NAMES[i % FIELD_NAMES.len()],
                            module.name
                        )),
                        module_id: module.id,
                        module_name: module.name.clone(),
                        module_guid: module.guid,
                        field_type,
                        is_required,
                        is_key: i == 0,
                        is_calculated: false,
                        max_length: (field_type == FieldType::Text).then_some(500),
                        default_value: None,
                        related_values_list_id: (field_type == FieldType::ValuesList)
                            .then(|| self.local_id(1)),
                        related_values_list_guid: (field_type == FieldType::ValuesList)
                            .then(|| self.stable_guid("values_list:0")),
                    });
                }

                field_index += 1;
            }
        }

        (fields, calculated)
    }

    fn generate_layouts(&self, modules: &[Module], fields: &[Field]) -> Vec<Layout> {
        modules
            .iter()
            .enumerate()
            .map(|(i, module)| {
                let module_fields: Vec<&Field> =
                    fields.iter().filter(|f| f.module_id == module.id).collect();
                Layout {
                    id: self.local_id(i as i64 + 1),
                    guid: self.stable_guid(&format!("layout:{i}")),
                    name: format!("{} Default Layout", module.name),
                    alias: module.alias.as_ref().map(|a| format!("{a}_default_layout")),
                    description: Some(format!("Default layout for {}", module.name)),
                    module_id: module.id,
                    module_name: module.name.clone(),
                    module_guid: module.guid,
                    is_default: true,
                    field_ids: module_fields.iter().map(|f| f.id).collect(),
                    field_guids: module_fields.iter().map(|f| f.guid).collect(),
                }
            })
            .collect()
    }

    fn generate_values_lists(&self) -> Vec<ValuesList> {
        VALUES_LIST_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = if self.is_target_with_mismatches() && i >= 8 {
                    format!("{name} (Updated)")
                } else {
                    name.to_string()
                };
                ValuesList {
                    id: self.local_id(i as i64 + 1),
                    guid: self.stable_guid(&format!("values_list:{i}")),
                    name: name.clone(),
                    alias: Some(name.replace(' ', "_")),
                    description: Some(format!("{name} values list")),
                    values_count: 5 + i as u32,
                    is_hierarchical: i > 5,
                }
            })
            .collect()
    }

    fn generate_values_list_values(&self, lists: &[ValuesList]) -> Vec<ValuesListValue> {
        let mut values = Vec::new();
        let mut value_id = 1i64;

        for (list_index, list) in lists.iter().enumerate() {
            for (i, name) in VALUE_NAMES
                .iter()
                .take(list.values_count.min(5) as usize)
                .enumerate()
            {
                values.push(ValuesListValue {
                    id: self.local_id(value_id),
                    guid: self.stable_guid(&format!("vlv:{list_index}:{i}")),
                    name: name.to_string(),
                    alias: None,
                    description: None,
                    values_list_id: list.id,
                    values_list_guid: list.guid,
                    values_list_name: list.name.clone(),
                    numeric_value: i as i32 + 1,
                    sort_order: i as i32,
                    parent_value_id: None,
                    is_selectable: true,
                });
                value_id += 1;
            }
        }

        values
    }

    fn generate_dde_rules(&self, modules: &[Module], rng: &mut StdRng) -> Vec<DdeRule> {
        let mut rules = Vec::new();
        let mut rule_index = 0i64;

        for module in modules {
            let rules_per_module = 2 + rng.gen_range(0..3usize);

            for i in 0..rules_per_module {
                let is_enabled = if self.is_target_with_mismatches() {
                    i % 2 == 0
                } else {
                    true
                };
                rules.push(DdeRule {
                    id: self.local_id(rule_index + 1),
                    guid: self.stable_guid(&format!("dde_rule:{rule_index}")),
                    name: format!("{} Rule {}", module.name, i + 1),
                    alias: module.alias.as_ref().map(|a| format!("{a}_rule_{}", i + 1)),
                    description: Some(format!("Data driven event rule for {}", module.name)),
                    module_id: module.id,
                    module_name: module.name.clone(),
                    module_guid: module.guid,
                    is_enabled,
                    trigger_type: if i % 2 == 0 { "OnSave" } else { "OnCreate" }.to_string(),
                    condition_logic: Some(r#"[Status] = "Active""#.to_string()),
                    actions_count: 1 + i as u32,
                });
                rule_index += 1;
            }
        }

        rules
    }

    fn generate_dde_actions(&self, rules: &[DdeRule]) -> Vec<DdeAction> {
        let mut actions = Vec::new();
        let mut action_index = 0i64;

        for rule in rules {
            for i in 0..rule.actions_count as i64 {
                actions.push(DdeAction {
                    id: self.local_id(action_index + 1),
                    guid: self.stable_guid(&format!("dde_action:{action_index}")),
                    name: format!("{} Action {}", rule.name, i + 1),
                    alias: rule.alias.as_ref().map(|a| format!("{a}_action_{}", i + 1)),
                    description: Some(format!("Action for {}", rule.name)),
                    rule_id: rule.id,
                    rule_guid: rule.guid,
                    rule_name: rule.name.clone(),
                    action_type: if i % 2 == 0 {
                        "SetFieldValue"
                    } else {
                        "SendNotification"
                    }
                    .to_string(),
                    order: i as i32,
                });
                action_index += 1;
            }
        }

        actions
    }

    fn generate_reports(&self, modules: &[Module]) -> Vec<Report> {
        modules
            .iter()
            .enumerate()
            .map(|(i, module)| Report {
                id: self.local_id(i as i64 + 1),
                guid: self.stable_guid(&format!("report:{i}")),
                name: format!("{} Summary Report", module.name),
                alias: module.alias.as_ref().map(|a| format!("{a}_summary_report")),
                description: Some(format!("Summary report for {}", module.name)),
                report_type: ReportType::Statistical,
                module_id: Some(module.id),
                module_name: Some(module.name.clone()),
                module_guid: Some(module.guid),
                is_shared: true,
                owner: "admin".to_string(),
            })
            .collect()
    }

    fn generate_dashboards(&self) -> Vec<Dashboard> {
        [("Executive Dashboard", 5u32), ("Risk Overview", 3)]
            .iter()
            .enumerate()
            .map(|(i, (name, iviews_count))| Dashboard {
                id: self.local_id(i as i64 + 1),
                guid: self.stable_guid(&format!("dashboard:{i}")),
                name: name.to_string(),
                alias: Some(name.to_lowercase().replace(' ', "_")),
                description: Some(format!("{name} dashboard")),
                iviews_count: *iviews_count,
                iview_guids: (0..2).map(|j| self.stable_guid(&format!("iview:{j}"))).collect(),
                is_shared: true,
                owner: "admin".to_string(),
            })
            .collect()
    }

    fn generate_workspaces(&self) -> Vec<Workspace> {
        vec![Workspace {
            id: self.local_id(1),
            guid: self.stable_guid("workspace:0"),
            name: "GRC Workspace".to_string(),
            alias: Some("grc_workspace".to_string()),
            description: Some("Main GRC workspace".to_string()),
            dashboards_count: 2,
            dashboard_guids: (0..2)
                .map(|i| self.stable_guid(&format!("dashboard:{i}")))
                .collect(),
            order: 1,
        }]
    }

    fn generate_iviews(&self) -> Vec<IView> {
        [("Risk Heat Map", "Chart"), ("Incident Trend", "LineChart")]
            .iter()
            .enumerate()
            .map(|(i, (name, iview_type))| IView {
                id: self.local_id(i as i64 + 1),
                guid: self.stable_guid(&format!("iview:{i}")),
                name: name.to_string(),
                alias: Some(name.to_lowercase().replace(' ', "_")),
                description: None,
                iview_type: iview_type.to_string(),
                report_id: Some(self.local_id(1)),
                report_name: Some(format!("{} Summary Report", MODULE_NAMES[0])),
            })
            .collect()
    }

    fn generate_roles(&self) -> Vec<Role> {
        [
            ("Administrator", "Full system access", 3u32, 1u32, true),
            ("Risk Manager", "Risk management access", 10, 2, false),
            ("Auditor", "Read-only audit access", 5, 1, false),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, description, users, groups, is_system))| {
            // Both sides hold the same permission set; ordering differs by
            // side and must not show up as a mismatch.
            let mut permission_guids: Vec<Uuid> = (0..4)
                .map(|j| self.stable_guid(&format!("permission:{i}:{j}")))
                .collect();
            if self.side == SnapshotSide::Target {
                permission_guids.reverse();
            }
            Role {
                id: self.local_id(i as i64 + 1),
                guid: self.stable_guid(&format!("role:{i}")),
                name: name.to_string(),
                alias: Some(name.to_lowercase().replace(' ', "_")),
                description: Some(description.to_string()),
                users_count: *users,
                groups_count: *groups,
                is_system_role: *is_system,
                permission_guids,
            }
        })
        .collect()
    }

    fn generate_security_parameters(&self) -> Vec<SecurityParameter> {
        vec![SecurityParameter {
            id: self.local_id(1),
            guid: self.stable_guid("security_parameter:0"),
            name: "Record-Level Security".to_string(),
            alias: Some("record_level_security".to_string()),
            description: Some("Record-level access control".to_string()),
            security_type: "RecordPermissions".to_string(),
            module_id: None,
            module_name: None,
            module_guid: None,
        }]
    }

    fn generate_notifications(&self, modules: &[Module]) -> Vec<Notification> {
        modules
            .iter()
            .take(3)
            .enumerate()
            .map(|(i, module)| Notification {
                id: self.local_id(i as i64 + 1),
                guid: self.stable_guid(&format!("notification:{i}")),
                name: format!("{} Alert", module.name),
                alias: module.alias.as_ref().map(|a| format!("{a}_alert")),
                description: Some(format!("Alert notification for {}", module.name)),
                module_id: module.id,
                module_name: module.name.clone(),
                module_guid: module.guid,
                is_enabled: true,
                trigger_type: "OnCreate".to_string(),
            })
            .collect()
    }

    fn generate_data_feeds(&self, modules: &[Module]) -> Vec<DataFeed> {
        let Some(module) = modules.first() else {
            return Vec::new();
        };
        vec![DataFeed {
            id: self.local_id(1),
            guid: self.stable_guid("data_feed:0"),
            name: "Vulnerability Import".to_string(),
            alias: Some("vulnerability_import".to_string()),
            description: Some("Import vulnerability data".to_string()),
            feed_type: "Import".to_string(),
            target_module_id: module.id,
            target_module_name: module.name.clone(),
            target_module_guid: module.guid,
            is_enabled: true,
            schedule: Some("Daily at 2:00 AM".to_string()),
        }]
    }

    fn generate_schedules(&self) -> Vec<Schedule> {
        vec![Schedule {
            id: self.local_id(1),
            guid: self.stable_guid("schedule:0"),
            name: "Daily Report Schedule".to_string(),
            alias: Some("daily_report".to_string()),
            description: Some("Daily report generation".to_string()),
            schedule_type: "Report".to_string(),
            frequency: "Daily".to_string(),
            cron_expression: Some("0 6 * * *".to_string()),
            is_enabled: true,
            last_run_date: Some(self.run_date(0)),
            next_run_date: Some(self.run_date(1)),
        }]
    }
}

impl MetadataSource for MockMetadataService {
    async fn collect(
        &self,
        environment: &Environment,
        options: &CollectionOptions,
    ) -> CompareResult<MetadataSnapshot> {
        self.collect_with_progress(environment, options, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{CompareEngine, ComparisonStatus};

    fn environment(name: &str) -> Environment {
        Environment::new(name, "https://archer.test", "Default")
    }

    #[tokio::test]
    async fn test_same_seed_is_reproducible() {
        let service = MockMetadataService::source(7);
        let env = environment("Dev");
        let options = CollectionOptions::all();

        let a = service.collect(&env, &options).await.unwrap();
        let b = service.collect(&env, &options).await.unwrap();
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a.item_count(), b.item_count());
    }

    #[tokio::test]
    async fn test_sides_share_stable_guids() {
        let env = environment("Dev");
        let options = CollectionOptions::all();
        let source = MockMetadataService::source(7)
            .collect(&env, &options)
            .await
            .unwrap();
        let target = MockMetadataService::target(7)
            .collect(&env, &options)
            .await
            .unwrap();

        assert_eq!(source.modules[0].guid, target.modules[0].guid);
        // Local ids deliberately differ between sides.
        assert_ne!(source.modules[0].id, target.modules[0].id);
    }

    #[tokio::test]
    async fn test_clean_sides_produce_all_matches() {
        let env = environment("Dev");
        let options = CollectionOptions::all();
        let source = MockMetadataService::source(11)
            .collect(&env, &options)
            .await
            .unwrap();
        let target = MockMetadataService::target(11)
            .collect(&env, &options)
            .await
            .unwrap();

        // Local ids and permission ordering differ between sides, but
        // with no mismatch knobs every item pairs up cleanly.
        let results = CompareEngine::new().compare(&source, &target);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.status == ComparisonStatus::Match));
    }

    #[tokio::test]
    async fn test_mismatch_knob_produces_mismatches_and_missing() {
        let env = environment("Dev");
        let options = CollectionOptions::all();
        let source = MockMetadataService::source(11)
            .collect(&env, &options)
            .await
            .unwrap();
        let target = MockMetadataService::target(11)
            .with_mismatches(true)
            .collect(&env, &options)
            .await
            .unwrap();

        let results = CompareEngine::new().compare(&source, &target);
        let has = |status: ComparisonStatus| results.iter().any(|r| r.status == status);
        assert!(has(ComparisonStatus::Mismatch));
        assert!(has(ComparisonStatus::MissingInSource));
        assert!(has(ComparisonStatus::MissingInTarget));
    }

    #[tokio::test]
    async fn test_formula_knob_produces_calculation_differences() {
        let env = environment("Dev");
        let options = CollectionOptions::all();
        let source = MockMetadataService::source(3)
            .collect(&env, &options)
            .await
            .unwrap();
        let target = MockMetadataService::target(3)
            .with_formula_differences(true)
            .collect(&env, &options)
            .await
            .unwrap();

        let results = CompareEngine::new().compare(&source, &target);
        assert!(results.iter().any(|r| r
            .differences
            .iter()
            .any(|d| d.is_calculation_difference)));
    }

    #[tokio::test]
    async fn test_deselected_collections_come_back_empty() {
        let env = environment("Dev");
        let options = CollectionOptions {
            include_fields: false,
            include_schedules: false,
            ..CollectionOptions::all()
        };
        let snapshot = MockMetadataService::source(5)
            .collect(&env, &options)
            .await
            .unwrap();

        assert!(snapshot.fields.is_empty());
        assert!(snapshot.schedules.is_empty());
        assert!(!snapshot.modules.is_empty());
    }

    #[tokio::test]
    async fn test_module_filter_restricts_children() {
        let env = environment("Dev");
        let options = CollectionOptions {
            selected_module_ids: vec![1],
            ..CollectionOptions::all()
        };
        let snapshot = MockMetadataService::source(5)
            .collect(&env, &options)
            .await
            .unwrap();

        assert_eq!(snapshot.modules.len(), 1);
        assert!(snapshot.fields.iter().all(|f| f.module_id == 1));
    }

    #[tokio::test]
    async fn test_progress_reaches_one_hundred_percent() {
        use std::sync::Mutex;

        let env = environment("Dev");
        let seen: Mutex<Vec<u8>> = Mutex::new(Vec::new());
        let callback = |_message: &str, percent: u8| {
            seen.lock().unwrap().push(percent);
        };

        MockMetadataService::source(9)
            .collect_with_progress(
                &env,
                &CollectionOptions::all(),
                Some(&callback as ProgressCallback<'_>),
            )
            .await
            .unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 17);
        assert_eq!(*seen.last().unwrap(), 100);
    }
}
