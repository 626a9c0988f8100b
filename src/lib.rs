//! archer-compare - Archer Metadata Comparison Engine
//!
//! Compares the configuration metadata of two RSA Archer GRC environments
//! and produces a classified, per-property difference report.
//!
//! The pipeline:
//! - Collect: a [`collect::MetadataSource`] produces one immutable
//!   [`metadata::MetadataSnapshot`] per environment
//! - Compare: the [`compare::CompareEngine`] matches items by stable
//!   identity, diffs their properties, and classifies severity
//! - Summarize: totals and per-kind counts over the full result list
//! - Export: CSV and text renderings of the results
//!
//! The engine itself is synchronous and side-effect-free: given two
//! snapshots it runs to completion with no I/O, no shared state, and no
//! fatal error path.

pub mod collect;
pub mod compare;
pub mod environment;
pub mod error;
pub mod export;
pub mod metadata;
pub mod store;

pub use collect::{CollectionOptions, MetadataSource, MockMetadataService};
pub use compare::{
    CompareConfig, CompareEngine, ComparisonResult, ComparisonStatus, ComparisonSummary,
    MatchStrategy, PropertyDifference, Severity,
};
pub use environment::Environment;
pub use error::{CompareError, CompareResult};
pub use metadata::{ItemKind, MetadataItem, MetadataSnapshot};
pub use store::SnapshotStore;
