//! Request and response models for the escalations API.

pub mod escalation;
pub mod metrics;

pub use escalation::{
    ActivityResponse, CreateEscalationRequest, CreateEscalationResponse, EscalationAction,
    EscalationActionRequest, EscalationActionResponse, EscalationDetailResponse,
    EscalationListItem, EscalationResponse, ListEscalationsQuery,
};
pub use metrics::{MetricsPeriod, OverallMetrics, PrioritySlaMetrics, SlaMetricsResponse};
