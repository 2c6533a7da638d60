//! Escalation activity log model.
//!
//! Append-only audit trail. Rows are created once per engine action and
//! never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ActivityType;

/// One audit trail entry for an escalation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EscalationActivity {
    /// Unique identifier.
    pub id: Uuid,

    /// The escalation this entry belongs to.
    pub escalation_id: Uuid,

    /// The action that produced this entry.
    pub activity_type: ActivityType,

    /// Human-readable summary of the action.
    pub description: String,

    /// Identity of the actor who performed the action.
    pub performed_by: String,

    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
}

impl EscalationActivity {
    /// Fetch the full activity log for an escalation, most recent first.
    pub async fn find_by_escalation(
        pool: &sqlx::PgPool,
        escalation_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM escalation_activity_log
            WHERE escalation_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(escalation_id)
        .fetch_all(pool)
        .await
    }
}
