//! Metadata Model
//!
//! The typed data model for Archer configuration metadata:
//! - Entity kinds (the 17 closed categories)
//! - Per-kind item definitions with compile-time property tables
//! - Environment snapshots (the engine's sole input)

pub mod items;
pub mod kinds;
pub mod snapshot;

pub use items::{
    CalculatedField, Dashboard, DataFeed, DdeAction, DdeRule, Field, FieldType, IView, Layout,
    MetadataItem, Module, Notification, Report, ReportType, Role, Schedule, SecurityParameter,
    ValuesList, ValuesListValue, Workspace,
};
pub use kinds::ItemKind;
pub use snapshot::MetadataSnapshot;
