//! Router configuration for the escalations API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::handlers::escalations;
use crate::policy::{EscalationMatrix, SlaPolicy};
use crate::services::{EscalationService, SlaMetricsService};

/// Shared state for escalation handlers.
#[derive(Clone)]
pub struct EscalationsState {
    pub escalation_service: Arc<EscalationService>,
    pub sla_metrics_service: Arc<SlaMetricsService>,
}

impl EscalationsState {
    /// Build the state from a pool and the injected policy tables.
    #[must_use]
    pub fn new(pool: PgPool, matrix: EscalationMatrix, sla: SlaPolicy) -> Self {
        Self {
            escalation_service: Arc::new(EscalationService::new(pool.clone(), matrix)),
            sla_metrics_service: Arc::new(SlaMetricsService::new(pool, sla)),
        }
    }
}

/// Create the escalations API router.
///
/// Routes are relative; the application nests them under `/escalations`.
pub fn escalations_router(pool: PgPool, matrix: EscalationMatrix, sla: SlaPolicy) -> Router {
    let state = EscalationsState::new(pool, matrix, sla);

    Router::new()
        .route("/", get(escalations::list_escalations))
        .route("/", post(escalations::create_escalation))
        .route("/metrics", get(escalations::get_sla_metrics))
        .route("/:id", get(escalations::get_escalation))
        .route("/:id/action", post(escalations::apply_escalation_action))
        .with_state(state)
}
