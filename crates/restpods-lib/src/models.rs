//! Core data models for the restarting pods report

use chrono::{DateTime, NaiveDateTime, Utc};
use k8s_openapi::api::core::v1::{ContainerStatus as K8sContainerStatus, Pod};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Reason reported when a container has no termination information
pub const NO_REASON: &str = "N/A";

/// Coarse pod lifecycle phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    Running,
    Succeeded,
    Pending,
    Failed,
    #[default]
    Unknown,
    /// Any phase string the cluster reports that is not one of the above
    Other(String),
}

impl Phase {
    /// Parse a phase string, ignoring case
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "running" => Phase::Running,
            "succeeded" => Phase::Succeeded,
            "pending" => Phase::Pending,
            "failed" => Phase::Failed,
            "unknown" => Phase::Unknown,
            _ => Phase::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Running => "Running",
            Phase::Succeeded => "Succeeded",
            Phase::Pending => "Pending",
            Phase::Failed => "Failed",
            Phase::Unknown => "Unknown",
            Phase::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Phase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Last termination event of a container
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminationInfo {
    pub finished_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
}

/// Status of a single container as reported by the cluster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerStatus {
    pub name: String,
    pub restart_count: u32,
    pub ready: bool,
    pub last_termination: Option<TerminationInfo>,
    /// Start time of the current run, present while the container is running
    pub current_started_at: Option<DateTime<Utc>>,
}

/// Snapshot of a pod's identity, phase and container statuses
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PodSnapshot {
    pub name: String,
    pub namespace: String,
    pub phase: Phase,
    pub containers: Vec<ContainerStatus>,
}

impl From<&K8sContainerStatus> for ContainerStatus {
    fn from(status: &K8sContainerStatus) -> Self {
        let last_termination = status
            .last_state
            .as_ref()
            .and_then(|s| s.terminated.as_ref())
            .map(|t| TerminationInfo {
                finished_at: t.finished_at.as_ref().map(|time| time.0),
                reason: t.reason.clone(),
            });

        let current_started_at = status
            .state
            .as_ref()
            .and_then(|s| s.running.as_ref())
            .and_then(|r| r.started_at.as_ref())
            .map(|time| time.0);

        Self {
            name: status.name.clone(),
            restart_count: status.restart_count.max(0) as u32,
            ready: status.ready,
            last_termination,
            current_started_at,
        }
    }
}

impl From<&Pod> for PodSnapshot {
    fn from(pod: &Pod) -> Self {
        let status = pod.status.as_ref();

        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            phase: status
                .and_then(|s| s.phase.as_deref())
                .map(Phase::parse)
                .unwrap_or_default(),
            containers: status
                .and_then(|s| s.container_statuses.as_ref())
                .map(|list| list.iter().map(ContainerStatus::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// A restarted container on a running pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartRecord {
    pub pod: String,
    pub namespace: String,
    pub container: String,
    pub restart_count: u32,
    pub ready: bool,
    /// Wall-clock time in the report time zone, offset removed
    pub terminated_at: NaiveDateTime,
    pub reason: String,
}

/// A container that is not ready, identified by its pod
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NotReadyContainer {
    pub namespace: String,
    pub pod: String,
    pub container: String,
}

/// A pod whose phase is neither Running nor Succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningEntry {
    pub pod_name: String,
    pub phase: Phase,
}

/// Aggregated result of classifying a pod collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AggregatedReport {
    pub restart_records: Vec<RestartRecord>,
    /// Distinct not-ready containers, in first-seen order
    pub not_ready: Vec<NotReadyContainer>,
    pub warnings: Vec<WarningEntry>,
}

impl AggregatedReport {
    pub fn is_empty(&self) -> bool {
        self.restart_records.is_empty() && self.not_ready.is_empty() && self.warnings.is_empty()
    }

    pub fn not_ready_count(&self) -> usize {
        self.not_ready.len()
    }
}

/// Kubernetes pod list document, as produced by `kubectl get pods -o json`
#[derive(Debug, Clone, Deserialize)]
pub struct PodListDocument {
    #[serde(default)]
    pub items: Vec<Pod>,
}
