//! SLA compliance computation tests, including the inclusive-boundary
//! behavior at exactly the target window.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use upline_api_escalations::policy::SlaPolicy;
use upline_api_escalations::services::{compute_sla_metrics, METRICS_WINDOW_DAYS};
use upline_db::models::{Escalation, EscalationPriority, EscalationStatus};

fn window() -> (DateTime<Utc>, DateTime<Utc>) {
    let to = Utc::now();
    (to - Duration::days(METRICS_WINDOW_DAYS), to)
}

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
fn test_critical_acknowledged_and_resolved_within_windows() {
    // Created at T, acknowledged at T+10min, resolved at T+90min.
    // Acknowledgment target is 15min, Critical resolution target is 2h:
    // both SLAs are met.
    let (from, to) = window();
    let t = from + Duration::days(1);
    let rows = vec![escalation(
        EscalationPriority::Critical,
        EscalationStatus::Resolved,
        t,
        Some(t + Duration::minutes(10)),
        Some(t + Duration::minutes(90)),
    )];

    let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);

    let critical = &metrics.sla[0];
    assert_eq!(critical.priority, EscalationPriority::Critical);
    assert_eq!(critical.total, 1);
    assert_eq!(critical.acknowledgment_met, 1);
    assert_eq!(critical.resolution_met, 1);
    assert!((critical.acknowledgment_compliance - 1.0).abs() < f64::EPSILON);
    assert!((critical.resolution_compliance - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_acknowledgment_after_window_misses_sla() {
    let (from, to) = window();
    let t = from + Duration::days(1);
    let rows = vec![escalation(
        EscalationPriority::Critical,
        EscalationStatus::InProgress,
        t,
        Some(t + Duration::minutes(16)),
        None,
    )];

    let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);
    assert_eq!(metrics.sla[0].acknowledgment_met, 0);
}

#[test]
fn test_low_priority_resolution_boundary_is_inclusive() {
    // Resolved exactly at T+72h counts as met; one second later does not.
    let (from, to) = window();
    let t = from + Duration::days(1);

    let exactly_on_target = escalation(
        EscalationPriority::Low,
        EscalationStatus::Resolved,
        t,
        None,
        Some(t + Duration::hours(72)),
    );
    let one_second_late = escalation(
        EscalationPriority::Low,
        EscalationStatus::Resolved,
        t,
        None,
        Some(t + Duration::hours(72) + Duration::seconds(1)),
    );

    let metrics = compute_sla_metrics(
        &[exactly_on_target, one_second_late],
        &SlaPolicy::default(),
        from,
        to,
    );

    let low = metrics
        .sla
        .iter()
        .find(|m| m.priority == EscalationPriority::Low)
        .unwrap();
    assert_eq!(low.total, 2);
    assert_eq!(low.resolution_met, 1);
    assert!((low.resolution_compliance - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_acknowledgment_boundary_is_inclusive() {
    let (from, to) = window();
    let t = from + Duration::days(1);
    let rows = vec![escalation(
        EscalationPriority::Medium,
        EscalationStatus::InProgress,
        t,
        Some(t + Duration::minutes(15)),
        None,
    )];

    let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);
    assert_eq!(metrics.sla[0].acknowledgment_met, 1);
}

#[test]
fn test_unacknowledged_and_unresolved_rows_miss_both_slas() {
    let (from, to) = window();
    let t = from + Duration::days(2);
    let rows = vec![escalation(
        EscalationPriority::High,
        EscalationStatus::Open,
        t,
        None,
        None,
    )];

    let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);
    assert_eq!(metrics.sla[0].acknowledgment_met, 0);
    assert_eq!(metrics.sla[0].resolution_met, 0);
    assert!((metrics.sla[0].acknowledgment_compliance).abs() < f64::EPSILON);
}

#[test]
fn test_overall_counts_by_status_and_priority() {
    let (from, to) = window();
    let t = from + Duration::days(1);
    let rows = vec![
        escalation(
            EscalationPriority::Critical,
            EscalationStatus::Open,
            t,
            None,
            None,
        ),
        escalation(
            EscalationPriority::Critical,
            EscalationStatus::InProgress,
            t,
            Some(t + Duration::minutes(5)),
            None,
        ),
        escalation(
            EscalationPriority::High,
            EscalationStatus::Resolved,
            t,
            Some(t + Duration::minutes(5)),
            Some(t + Duration::hours(1)),
        ),
        escalation(
            EscalationPriority::Medium,
            EscalationStatus::Closed,
            t,
            None,
            Some(t + Duration::hours(3)),
        ),
        escalation(
            EscalationPriority::Low,
            EscalationStatus::Escalated,
            t,
            None,
            None,
        ),
    ];

    let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);

    assert_eq!(metrics.overall.total, 5);
    assert_eq!(metrics.overall.open, 1);
    assert_eq!(metrics.overall.in_progress, 1);
    assert_eq!(metrics.overall.resolved, 1);
    assert_eq!(metrics.overall.closed, 1);
    assert_eq!(metrics.overall.critical, 2);
    assert_eq!(metrics.overall.high, 1);

    // Two rows carry resolution timestamps: 1h and 3h, mean of 2h.
    let avg = metrics.overall.avg_resolution_hours.unwrap();
    assert!((avg - 2.0).abs() < 1e-9, "expected 2.0, got {avg}");
}

#[test]
fn test_computation_is_pure_and_repeatable() {
    let (from, to) = window();
    let t = from + Duration::days(1);
    let rows = vec![escalation(
        EscalationPriority::High,
        EscalationStatus::Resolved,
        t,
        Some(t + Duration::minutes(10)),
        Some(t + Duration::hours(4)),
    )];

    let sla = SlaPolicy::default();
    let first = compute_sla_metrics(&rows, &sla, from, to);
    let second = compute_sla_metrics(&rows, &sla, from, to);
    assert_eq!(first, second);
}

#[test]
fn test_priority_groups_ordered_highest_first() {
    let (from, to) = window();
    let t = from + Duration::days(1);
    let rows = vec![
        escalation(
            EscalationPriority::Low,
            EscalationStatus::Open,
            t,
            None,
            None,
        ),
        escalation(
            EscalationPriority::Critical,
            EscalationStatus::Open,
            t,
            None,
            None,
        ),
        escalation(
            EscalationPriority::Medium,
            EscalationStatus::Open,
            t,
            None,
            None,
        ),
    ];

    let metrics = compute_sla_metrics(&rows, &SlaPolicy::default(), from, to);
    let order: Vec<EscalationPriority> = metrics.sla.iter().map(|m| m.priority).collect();
    assert_eq!(
        order,
        vec![
            EscalationPriority::Critical,
            EscalationPriority::Medium,
            EscalationPriority::Low
        ]
    );
}

#[test]
fn test_period_reports_the_window() {
    let (from, to) = window();
    let metrics = compute_sla_metrics(&[], &SlaPolicy::default(), from, to);
    assert_eq!(metrics.period.days, 30);
    assert_eq!(metrics.period.from, from);
    assert_eq!(metrics.period.to, to);
}
