//! Report aggregation and look-back period filtering

use crate::classifier::ContainerClassifier;
use crate::models::{AggregatedReport, PodSnapshot, RestartRecord};
use crate::time::TimeNormalizer;
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Builds an [`AggregatedReport`] from a pod collection
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    normalizer: TimeNormalizer,
}

impl ReportBuilder {
    pub fn new(normalizer: TimeNormalizer) -> Self {
        Self { normalizer }
    }

    /// Classify every pod in input order and aggregate the results
    pub fn build(&self, pods: &[PodSnapshot]) -> AggregatedReport {
        let classifier = ContainerClassifier::new(&self.normalizer);
        let mut report = AggregatedReport::default();

        for pod in pods {
            let classification = classifier.classify(pod);

            report.restart_records.extend(classification.restart_records);
            for container in classification.not_ready {
                if !report.not_ready.contains(&container) {
                    report.not_ready.push(container);
                }
            }
            report.warnings.extend(classification.warning);
        }

        debug!(
            pods = pods.len(),
            restarts = report.restart_records.len(),
            not_ready = report.not_ready.len(),
            warnings = report.warnings.len(),
            "Report built"
        );

        report
    }
}

/// Records terminated strictly after `today - period_days`, in report order
pub fn filter_by_period(
    report: &AggregatedReport,
    period_days: u32,
    today: NaiveDate,
) -> Vec<&RestartRecord> {
    let begin = today
        .checked_sub_days(Days::new(u64::from(period_days)))
        .unwrap_or(NaiveDate::MIN);

    report
        .restart_records
        .iter()
        .filter(|record| record.terminated_at.date() > begin)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContainerStatus, NotReadyContainer, Phase, TerminationInfo, WarningEntry, NO_REASON,
    };
    use chrono::{TimeZone, Utc};

    fn running_pod(name: &str, containers: Vec<ContainerStatus>) -> PodSnapshot {
        PodSnapshot {
            name: name.to_string(),
            namespace: "default".to_string(),
            phase: Phase::Running,
            containers,
        }
    }

    fn restarted(name: &str, ready: bool, finished: (i32, u32, u32)) -> ContainerStatus {
        ContainerStatus {
            name: name.to_string(),
            restart_count: 1,
            ready,
            last_termination: Some(TerminationInfo {
                finished_at: Some(
                    Utc.with_ymd_and_hms(finished.0, finished.1, finished.2, 12, 0, 0)
                        .unwrap(),
                ),
                reason: Some("OOMKilled".to_string()),
            }),
            current_started_at: None,
        }
    }

    fn record_on(date: NaiveDate) -> RestartRecord {
        RestartRecord {
            pod: "web-1".to_string(),
            namespace: "default".to_string(),
            container: "app".to_string(),
            restart_count: 1,
            ready: true,
            terminated_at: date.and_hms_opt(8, 30, 0).unwrap(),
            reason: NO_REASON.to_string(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_empty_input() {
        let report = ReportBuilder::default().build(&[]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_build_aggregates_in_order() {
        let pods = vec![
            running_pod("a", vec![restarted("app", false, (2024, 1, 1))]),
            PodSnapshot {
                name: "crash-1".to_string(),
                namespace: "default".to_string(),
                phase: Phase::Failed,
                containers: vec![],
            },
            running_pod(
                "b",
                vec![restarted("worker", true, (2024, 1, 2)), restarted("app", false, (2024, 1, 3))],
            ),
        ];

        let report = ReportBuilder::default().build(&pods);

        let pods_in_order: Vec<_> = report.restart_records.iter().map(|r| r.pod.as_str()).collect();
        assert_eq!(pods_in_order, vec!["a", "b", "b"]);
        let not_ready: Vec<_> = report
            .not_ready
            .iter()
            .map(|c| (c.pod.as_str(), c.container.as_str()))
            .collect();
        assert_eq!(not_ready, vec![("a", "app"), ("b", "app")]);
        assert_eq!(
            report.warnings,
            vec![WarningEntry {
                pod_name: "crash-1".to_string(),
                phase: Phase::Failed,
            }]
        );
    }

    #[test]
    fn test_replicas_sharing_container_name_counted_separately() {
        let pods: Vec<_> = ["web-1", "web-2", "web-3"]
            .iter()
            .map(|name| running_pod(name, vec![restarted("app", false, (2024, 1, 1))]))
            .collect();

        let report = ReportBuilder::default().build(&pods);

        assert_eq!(report.restart_records.len(), 3);
        assert_eq!(report.not_ready_count(), 3);
        assert_eq!(
            report.not_ready[2],
            NotReadyContainer {
                namespace: "default".to_string(),
                pod: "web-3".to_string(),
                container: "app".to_string(),
            }
        );
    }

    #[test]
    fn test_same_container_listed_twice_counted_once() {
        let pod = running_pod("web-1", vec![restarted("app", false, (2024, 1, 1))]);
        let report = ReportBuilder::default().build(&[pod.clone(), pod]);

        assert_eq!(report.restart_records.len(), 2);
        assert_eq!(report.not_ready_count(), 1);
    }

    #[test]
    fn test_build_is_idempotent() {
        let pods = vec![
            running_pod("a", vec![restarted("app", false, (2024, 1, 1))]),
            running_pod("b", vec![restarted("db", true, (2024, 2, 1))]),
        ];
        let builder = ReportBuilder::default();
        assert_eq!(builder.build(&pods), builder.build(&pods));
    }

    #[test]
    fn test_filter_is_strictly_after_begin() {
        let today = ymd(2024, 3, 10);
        let report = AggregatedReport {
            restart_records: vec![
                record_on(ymd(2024, 3, 7)),
                record_on(ymd(2024, 3, 8)),
                record_on(ymd(2024, 3, 9)),
                record_on(ymd(2024, 3, 10)),
            ],
            ..Default::default()
        };

        let kept: Vec<_> = filter_by_period(&report, 2, today)
            .iter()
            .map(|r| r.terminated_at.date())
            .collect();
        assert_eq!(kept, vec![ymd(2024, 3, 9), ymd(2024, 3, 10)]);
    }

    #[test]
    fn test_zero_period_excludes_yesterday_and_today() {
        let report = AggregatedReport {
            restart_records: vec![record_on(ymd(2024, 3, 9)), record_on(ymd(2024, 3, 10))],
            ..Default::default()
        };

        assert!(filter_by_period(&report, 0, ymd(2024, 3, 10)).is_empty());
    }

    #[test]
    fn test_filter_is_monotonic_in_period() {
        let today = ymd(2024, 3, 10);
        let report = AggregatedReport {
            restart_records: (0..30)
                .map(|offset| record_on(today - Days::new(offset)))
                .collect(),
            ..Default::default()
        };

        for shorter in 0..20u32 {
            for longer in shorter + 1..25 {
                let small = filter_by_period(&report, shorter, today);
                let large = filter_by_period(&report, longer, today);
                assert!(small.len() <= large.len());
                assert!(small.iter().all(|r| large.contains(r)));
            }
        }
    }

    #[test]
    fn test_huge_period_keeps_everything() {
        let report = AggregatedReport {
            restart_records: vec![record_on(ymd(1999, 1, 1))],
            ..Default::default()
        };
        assert_eq!(filter_by_period(&report, u32::MAX, ymd(2024, 3, 10)).len(), 1);
    }
}
