//! OpenAPI document assembly.

use axum::Json;
use utoipa::OpenApi;

use upline_api_escalations::handlers::escalations;
use upline_api_escalations::models::{
    ActivityResponse, CreateEscalationRequest, CreateEscalationResponse, EscalationActionRequest,
    EscalationActionResponse, EscalationDetailResponse, EscalationListItem, EscalationResponse,
    MetricsPeriod, OverallMetrics, PrioritySlaMetrics, SlaMetricsResponse,
};
use upline_db::models::{ActivityType, EscalationPriority, EscalationStatus};

/// OpenAPI documentation for the escalations API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Upline Escalations API",
        description = "Feedback escalation workflow: leveled routing, SLA tracking, and audit trail"
    ),
    paths(
        escalations::list_escalations,
        escalations::get_escalation,
        escalations::apply_escalation_action,
        escalations::create_escalation,
        escalations::get_sla_metrics,
    ),
    components(schemas(
        CreateEscalationRequest,
        EscalationActionRequest,
        EscalationResponse,
        EscalationListItem,
        ActivityResponse,
        EscalationDetailResponse,
        CreateEscalationResponse,
        EscalationActionResponse,
        SlaMetricsResponse,
        OverallMetrics,
        PrioritySlaMetrics,
        MetricsPeriod,
        EscalationStatus,
        EscalationPriority,
        ActivityType,
    )),
    tags(
        (name = "Escalations", description = "Feedback escalation management")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
