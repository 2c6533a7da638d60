//! Response models for the SLA metrics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use upline_db::models::EscalationPriority;

/// Counts and averages over the metrics window.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    /// Escalations created in the window.
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
    /// Escalations of Critical priority.
    pub critical: i64,
    /// Escalations of High priority.
    pub high: i64,
    /// Mean time to resolution in hours, over escalations with a resolution
    /// timestamp. `None` when nothing resolved in the window.
    pub avg_resolution_hours: Option<f64>,
}

/// SLA compliance for one priority.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySlaMetrics {
    pub priority: EscalationPriority,
    /// Escalations of this priority in the window.
    pub total: i64,
    /// Count acknowledged within the acknowledgment window.
    pub acknowledgment_met: i64,
    /// `acknowledgment_met / total`.
    pub acknowledgment_compliance: f64,
    /// Count resolved within the priority's resolution window.
    pub resolution_met: i64,
    /// `resolution_met / total`.
    pub resolution_compliance: f64,
}

/// The concrete window the metrics were computed over.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPeriod {
    pub days: i64,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Full SLA metrics summary.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlaMetricsResponse {
    pub overall: OverallMetrics,
    /// Per-priority compliance, highest priority first. Priorities with no
    /// escalations in the window are omitted.
    pub sla: Vec<PrioritySlaMetrics>,
    pub period: MetricsPeriod,
}
