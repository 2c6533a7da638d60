//! Escalation endpoint handlers.
//!
//! Thin layer over the engine: resolve the actor, validate the payload
//! shape, delegate, and map the result onto the wire models.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use upline_db::models::EscalationFilter;

use crate::error::ApiResult;
use crate::extract::ActorId;
use crate::models::{
    CreateEscalationRequest, CreateEscalationResponse, EscalationActionRequest,
    EscalationActionResponse, EscalationDetailResponse, EscalationListItem, ListEscalationsQuery,
    SlaMetricsResponse,
};
use crate::router::EscalationsState;

/// List escalations with optional filters.
///
/// Supports filtering by `status`, `priority`, and numeric `level`, with
/// limit/offset pagination. Rows come back most recent first; an empty
/// result is an empty array, never an error.
#[utoipa::path(
    get,
    path = "/escalations",
    tag = "Escalations",
    params(ListEscalationsQuery),
    responses(
        (status = 200, description = "Escalations matching the filters", body = [EscalationListItem]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_escalations(
    State(state): State<EscalationsState>,
    Query(query): Query<ListEscalationsQuery>,
) -> ApiResult<Json<Vec<EscalationListItem>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let filter = EscalationFilter {
        status: query.status,
        priority: query.priority,
        level: query.level,
    };

    let rows = state.escalation_service.list(&filter, limit, offset).await?;
    Ok(Json(rows.into_iter().map(EscalationListItem::from).collect()))
}

/// Get one escalation with its feedback fields and full activity log.
#[utoipa::path(
    get,
    path = "/escalations/{id}",
    tag = "Escalations",
    params(
        ("id" = Uuid, Path, description = "Escalation ID")
    ),
    responses(
        (status = 200, description = "Merged escalation view", body = EscalationDetailResponse),
        (status = 404, description = "Escalation not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_escalation(
    State(state): State<EscalationsState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<EscalationDetailResponse>> {
    let detail = state.escalation_service.get(id).await?;
    Ok(Json(EscalationDetailResponse::from_parts(
        detail.escalation,
        &detail.feedback,
        detail.activities,
    )))
}

/// Apply a lifecycle action to an escalation.
///
/// Body: `{ action, notes?, assignedTo? }` where `action` is one of
/// `acknowledge`, `assign`, `resolve`, `escalate`, `close`.
#[utoipa::path(
    post,
    path = "/escalations/{id}/action",
    tag = "Escalations",
    params(
        ("id" = Uuid, Path, description = "Escalation ID")
    ),
    request_body = EscalationActionRequest,
    responses(
        (status = 200, description = "Action applied", body = EscalationActionResponse),
        (status = 400, description = "Missing action field or unrecognized action"),
        (status = 404, description = "Escalation not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn apply_escalation_action(
    State(state): State<EscalationsState>,
    Path(id): Path<Uuid>,
    ActorId(actor): ActorId,
    Json(req): Json<EscalationActionRequest>,
) -> ApiResult<Json<EscalationActionResponse>> {
    req.validate()?;

    let outcome = state
        .escalation_service
        .apply_action(&actor, id, &req)
        .await?;

    Ok(Json(EscalationActionResponse {
        success: true,
        message: outcome.message,
        escalation_id: outcome.escalation_id,
        new_status: outcome.new_status,
    }))
}

/// Create an escalation for a feedback submission.
#[utoipa::path(
    post,
    path = "/escalations",
    tag = "Escalations",
    request_body = CreateEscalationRequest,
    responses(
        (status = 200, description = "Escalation created", body = CreateEscalationResponse),
        (status = 400, description = "Missing required field"),
        (status = 404, description = "Feedback submission not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_escalation(
    State(state): State<EscalationsState>,
    ActorId(actor): ActorId,
    Json(req): Json<CreateEscalationRequest>,
) -> ApiResult<Json<CreateEscalationResponse>> {
    req.validate()?;

    let escalation = state.escalation_service.create(&actor, &req).await?;

    Ok(Json(CreateEscalationResponse {
        success: true,
        escalation_id: escalation.id,
        escalation: escalation.into(),
    }))
}

/// SLA compliance summary over the rolling 30-day window.
#[utoipa::path(
    get,
    path = "/escalations/metrics",
    tag = "Escalations",
    responses(
        (status = 200, description = "SLA metrics summary", body = SlaMetricsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sla_metrics(
    State(state): State<EscalationsState>,
) -> ApiResult<Json<SlaMetricsResponse>> {
    let metrics = state.sla_metrics_service.compute().await?;
    Ok(Json(metrics))
}
