//! SLA metrics computation.
//!
//! Metrics are derived purely from stored escalation timestamps and
//! priorities over a rolling window. The computation performs no writes, so
//! it can be re-run at any time against the same rows.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use upline_db::models::{Escalation, EscalationPriority, EscalationStatus};

use crate::error::ApiResult;
use crate::models::{MetricsPeriod, OverallMetrics, PrioritySlaMetrics, SlaMetricsResponse};
use crate::policy::SlaPolicy;

/// Rolling window the metrics cover, in days.
pub const METRICS_WINDOW_DAYS: i64 = 30;

/// Service computing SLA compliance over the rolling window.
pub struct SlaMetricsService {
    pool: PgPool,
    sla: SlaPolicy,
}

impl SlaMetricsService {
    /// Create a new metrics service with the given SLA configuration.
    #[must_use]
    pub fn new(pool: PgPool, sla: SlaPolicy) -> Self {
        Self { pool, sla }
    }

    /// Compute the metrics summary for the last 30 days.
    pub async fn compute(&self) -> ApiResult<SlaMetricsResponse> {
        let to = Utc::now();
        let from = to - Duration::days(METRICS_WINDOW_DAYS);
        let rows = Escalation::list_created_since(&self.pool, from).await?;
        Ok(compute_sla_metrics(&rows, &self.sla, from, to))
    }
}

/// Derive the metrics summary from escalation rows.
///
/// Acknowledgment SLA is met when the escalation was acknowledged no later
/// than creation plus the acknowledgment window; resolution SLA when it was
/// resolved no later than creation plus the priority's resolution window.
/// Both comparisons are inclusive.
#[must_use]
pub fn compute_sla_metrics(
    rows: &[Escalation],
    sla: &SlaPolicy,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> SlaMetricsResponse {
    let count_status =
        |status: EscalationStatus| rows.iter().filter(|e| e.status == status).count() as i64;
    let count_priority =
        |priority: EscalationPriority| rows.iter().filter(|e| e.priority == priority).count() as i64;

    let resolution_seconds: Vec<i64> = rows
        .iter()
        .filter_map(|e| e.resolved_at.map(|r| (r - e.created_at).num_seconds()))
        .collect();
    let avg_resolution_hours = if resolution_seconds.is_empty() {
        None
    } else {
        let total: i64 = resolution_seconds.iter().sum();
        Some(total as f64 / resolution_seconds.len() as f64 / 3600.0)
    };

    let mut per_priority = Vec::new();
    for priority in EscalationPriority::ALL {
        let of_priority: Vec<&Escalation> =
            rows.iter().filter(|e| e.priority == priority).collect();
        if of_priority.is_empty() {
            continue;
        }
        let total = of_priority.len() as i64;

        let acknowledgment_met = of_priority
            .iter()
            .filter(|e| {
                e.acknowledged_at
                    .is_some_and(|a| a <= sla.acknowledgment_deadline(e.created_at))
            })
            .count() as i64;

        let resolution_met = of_priority
            .iter()
            .filter(|e| {
                match (e.resolved_at, sla.resolution_deadline(priority, e.created_at)) {
                    (Some(resolved), Some(deadline)) => resolved <= deadline,
                    _ => false,
                }
            })
            .count() as i64;

        per_priority.push(PrioritySlaMetrics {
            priority,
            total,
            acknowledgment_met,
            acknowledgment_compliance: acknowledgment_met as f64 / total as f64,
            resolution_met,
            resolution_compliance: resolution_met as f64 / total as f64,
        });
    }

    SlaMetricsResponse {
        overall: OverallMetrics {
            total: rows.len() as i64,
            open: count_status(EscalationStatus::Open),
            in_progress: count_status(EscalationStatus::InProgress),
            resolved: count_status(EscalationStatus::Resolved),
            closed: count_status(EscalationStatus::Closed),
            critical: count_priority(EscalationPriority::Critical),
            high: count_priority(EscalationPriority::High),
            avg_resolution_hours,
        },
        sla: per_priority,
        period: MetricsPeriod {
            days: (to - from).num_days(),
            from,
            to,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn escalation(
        priority: EscalationPriority,
        status: EscalationStatus,
        created_at: DateTime<Utc>,
        acknowledged_at: Option<DateTime<Utc>>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Escalation {
        Escalation {
            id: Uuid::new_v4(),
            feedback_id: Uuid::new_v4(),
            level: 1,
            escalated_to: "custodian@ictgovernance.gov".to_string(),
            escalated_to_role: "Technology Custodian".to_string(),
            escalation_reason: "test".to_string(),
            status,
            priority,
            category: "policy".to_string(),
            acknowledged_at,
            resolved_at,
            resolution_notes: None,
            parent_escalation_id: None,
            escalated_to_escalation_id: None,
            created_at,
        }
    }

    #[test]
    fn test_empty_window() {
        let to = Utc::now();
        let from = to - Duration::days(METRICS_WINDOW_DAYS);
        let metrics = compute_sla_metrics(&[], &SlaPolicy::default(), from, to);

        assert_eq!(metrics.overall.total, 0);
        assert_eq!(metrics.overall.avg_resolution_hours, None);
        assert!(metrics.sla.is_empty());
        assert_eq!(metrics.period.days, METRICS_WINDOW_DAYS);
    }

    #[test]
    fn test_priorities_without_rows_are_omitted() {
        let to = Utc::now();
        let from = to - Duration::days(METRICS_WINDOW_DAYS);
        let rows = vec![escalation(
            EscalationPriority::High,
            EscalationStatus::Open,
            from + Duration::days(1),
            None,
            None,
        )];

        let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);
        assert_eq!(metrics.sla.len(), 1);
        assert_eq!(metrics.sla[0].priority, EscalationPriority::High);
        assert_eq!(metrics.sla[0].acknowledgment_met, 0);
        assert_eq!(metrics.sla[0].resolution_met, 0);
    }

    #[test]
    fn test_avg_resolution_hours() {
        let to = Utc::now();
        let from = to - Duration::days(METRICS_WINDOW_DAYS);
        let created = from + Duration::days(1);
        let rows = vec![
            // Resolved in 2 hours.
            escalation(
                EscalationPriority::Medium,
                EscalationStatus::Resolved,
                created,
                None,
                Some(created + Duration::hours(2)),
            ),
            // Resolved in 4 hours.
            escalation(
                EscalationPriority::Medium,
                EscalationStatus::Resolved,
                created,
                None,
                Some(created + Duration::hours(4)),
            ),
            // Unresolved rows do not contribute.
            escalation(
                EscalationPriority::Medium,
                EscalationStatus::Open,
                created,
                None,
                None,
            ),
        ];

        let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);
        let avg = metrics.overall.avg_resolution_hours.unwrap();
        assert!((avg - 3.0).abs() < f64::EPSILON, "expected 3.0, got {avg}");
    }
}
