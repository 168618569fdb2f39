//! Per-pod container classification
//!
//! Restart detection only applies to running pods. A pod in any other phase
//! except Succeeded is itself the anomaly and is reported once at pod level.

use crate::models::{
    ContainerStatus, NotReadyContainer, Phase, PodSnapshot, RestartRecord, WarningEntry,
    NO_REASON,
};
use crate::time::TimeNormalizer;
use tracing::{debug, warn};

/// Result of classifying a single pod
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub restart_records: Vec<RestartRecord>,
    pub not_ready: Vec<NotReadyContainer>,
    pub warning: Option<WarningEntry>,
}

/// Decides which containers of a pod belong in the report
pub struct ContainerClassifier<'a> {
    normalizer: &'a TimeNormalizer,
}

impl<'a> ContainerClassifier<'a> {
    pub fn new(normalizer: &'a TimeNormalizer) -> Self {
        Self { normalizer }
    }

    /// Classify one pod
    pub fn classify(&self, pod: &PodSnapshot) -> Classification {
        let mut result = Classification::default();

        match pod.phase {
            Phase::Running => {
                for container in pod.containers.iter().filter(|c| c.restart_count > 0) {
                    if !container.ready {
                        result.not_ready.push(NotReadyContainer {
                            namespace: pod.namespace.clone(),
                            pod: pod.name.clone(),
                            container: container.name.clone(),
                        });
                    }
                    if let Some(record) = self.restart_record(pod, container) {
                        result.restart_records.push(record);
                    }
                }
            }
            Phase::Succeeded => {}
            _ => {
                debug!(pod = %pod.name, phase = %pod.phase, "Pod in abnormal phase");
                result.warning = Some(WarningEntry {
                    pod_name: pod.name.clone(),
                    phase: pod.phase.clone(),
                });
            }
        }

        result
    }

    fn restart_record(
        &self,
        pod: &PodSnapshot,
        container: &ContainerStatus,
    ) -> Option<RestartRecord> {
        let termination = container.last_termination.as_ref();

        let Some(timestamp) = termination
            .and_then(|t| t.finished_at)
            .or(container.current_started_at)
        else {
            warn!(
                pod = %pod.name,
                container = %container.name,
                "Restarted container has no termination or start time, skipping"
            );
            return None;
        };

        let reason = termination
            .and_then(|t| t.reason.clone())
            .unwrap_or_else(|| NO_REASON.to_string());

        Some(RestartRecord {
            pod: pod.name.clone(),
            namespace: pod.namespace.clone(),
            container: container.name.clone(),
            restart_count: container.restart_count,
            ready: container.ready,
            terminated_at: self.normalizer.normalize(timestamp),
            reason,
        })
    }
}
