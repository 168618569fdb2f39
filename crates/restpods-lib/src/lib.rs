//! Restarting pods report library
//!
//! This crate provides the core functionality for:
//! - Converting cluster pod state into report snapshots
//! - Classifying restarted, not-ready and abnormal containers
//! - Time-zone normalization and look-back period filtering
//! - Console rendering and CSV export of the aggregated report

pub mod classifier;
pub mod error;
pub mod export;
pub mod models;
pub mod render;
pub mod report;
pub mod source;
pub mod time;

pub use classifier::{Classification, ContainerClassifier};
pub use error::{ReportError, SourceError};
pub use export::ReportExporter;
pub use models::*;
pub use render::{OutputFormat, RenderOptions, ReportRenderer};
pub use report::{filter_by_period, ReportBuilder};
pub use source::{KubePodSource, PodSource, StaticPodSource};
pub use time::{TimeNormalizer, DEFAULT_TIME_ZONE};
