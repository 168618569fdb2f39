//! CLI commands

pub mod report;
