//! Escalation engine and metrics services.

pub mod escalation_service;
pub mod sla_metrics_service;

pub use escalation_service::{ActionOutcome, EscalationDetail, EscalationService};
pub use sla_metrics_service::{compute_sla_metrics, SlaMetricsService, METRICS_WINDOW_DAYS};
