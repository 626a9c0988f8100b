//! Entity kinds
//!
//! The closed set of Archer metadata categories the engine compares.

use serde::{Deserialize, Serialize};

/// Categories of Archer configuration metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Module,
    Field,
    CalculatedField,
    Layout,
    ValuesList,
    ValuesListValue,
    DdeRule,
    DdeAction,
    Report,
    Dashboard,
    Workspace,
    IView,
    Role,
    SecurityParameter,
    Notification,
    DataFeed,
    Schedule,
}

impl ItemKind {
    /// All kinds, in the fixed order the orchestrator compares them
    pub const ALL: [ItemKind; 17] = [
        ItemKind::Module,
        ItemKind::Field,
        ItemKind::CalculatedField,
        ItemKind::Layout,
        ItemKind::ValuesList,
        ItemKind::ValuesListValue,
        ItemKind::DdeRule,
        ItemKind::DdeAction,
        ItemKind::Report,
        ItemKind::Dashboard,
        ItemKind::Workspace,
        ItemKind::IView,
        ItemKind::Role,
        ItemKind::SecurityParameter,
        ItemKind::Notification,
        ItemKind::DataFeed,
        ItemKind::Schedule,
    ];

    /// Human-readable label for reports and exports
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Module => "Module",
            ItemKind::Field => "Field",
            ItemKind::CalculatedField => "Calculated Field",
            ItemKind::Layout => "Layout",
            ItemKind::ValuesList => "Values List",
            ItemKind::ValuesListValue => "Values List Value",
            ItemKind::DdeRule => "DDE Rule",
            ItemKind::DdeAction => "DDE Action",
            ItemKind::Report => "Report",
            ItemKind::Dashboard => "Dashboard",
            ItemKind::Workspace => "Workspace",
            ItemKind::IView => "iView",
            ItemKind::Role => "Role",
            ItemKind::SecurityParameter => "Security Parameter",
            ItemKind::Notification => "Notification",
            ItemKind::DataFeed => "Data Feed",
            ItemKind::Schedule => "Schedule",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
