//! Escalation model.
//!
//! One row per feedback item per escalation level. A feedback item has at
//! most one active escalation at a time; escalating produces a successor row
//! at the next level and terminates the current one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{EscalationPriority, EscalationStatus};

/// A tracked handling unit for one feedback item at one level.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Escalation {
    /// Unique identifier.
    pub id: Uuid,

    /// The feedback submission this escalation tracks.
    pub feedback_id: Uuid,

    /// Escalation matrix level (1-based, increases per lineage).
    pub level: i32,

    /// Recipient identity assigned at this level.
    pub escalated_to: String,

    /// Role assigned at this level.
    pub escalated_to_role: String,

    /// Why the item was escalated.
    pub escalation_reason: String,

    /// Current state of this escalation.
    pub status: EscalationStatus,

    /// Priority inherited from the feedback submission.
    pub priority: EscalationPriority,

    /// Category inherited from the feedback submission.
    pub category: String,

    /// When the assigned recipient acknowledged the escalation.
    pub acknowledged_at: Option<DateTime<Utc>>,

    /// When the escalation was resolved or closed.
    pub resolved_at: Option<DateTime<Utc>>,

    /// Notes recorded at resolution or close.
    pub resolution_notes: Option<String>,

    /// The escalation this one was produced from, if any.
    pub parent_escalation_id: Option<Uuid>,

    /// The successor escalation this one produced, if any.
    pub escalated_to_escalation_id: Option<Uuid>,

    /// When the escalation was created.
    pub created_at: DateTime<Utc>,
}

/// Filter options for listing escalations.
#[derive(Debug, Clone, Default)]
pub struct EscalationFilter {
    pub status: Option<EscalationStatus>,
    pub priority: Option<EscalationPriority>,
    pub level: Option<i32>,
}

/// An escalation row joined with the subject of its feedback submission.
#[derive(Debug, Clone, FromRow)]
pub struct EscalationListRow {
    #[sqlx(flatten)]
    pub escalation: Escalation,
    pub subject: String,
}

impl Escalation {
    /// Find an escalation by ID.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM escalations
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List escalations with filtering and pagination, most recent first.
    pub async fn list(
        pool: &sqlx::PgPool,
        filter: &EscalationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EscalationListRow>, sqlx::Error> {
        let mut query = String::from(
            "SELECT e.*, f.subject AS subject \
             FROM escalations e \
             JOIN feedback_submissions f ON f.id = e.feedback_id \
             WHERE TRUE",
        );
        let mut param_count = 0;

        if filter.status.is_some() {
            param_count += 1;
            query.push_str(&format!(" AND e.status = ${param_count}"));
        }
        if filter.priority.is_some() {
            param_count += 1;
            query.push_str(&format!(" AND e.priority = ${param_count}"));
        }
        if filter.level.is_some() {
            param_count += 1;
            query.push_str(&format!(" AND e.level = ${param_count}"));
        }

        query.push_str(&format!(
            " ORDER BY e.created_at DESC LIMIT ${} OFFSET ${}",
            param_count + 1,
            param_count + 2
        ));

        let mut q = sqlx::query_as::<_, EscalationListRow>(&query);

        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(priority) = filter.priority {
            q = q.bind(priority);
        }
        if let Some(level) = filter.level {
            q = q.bind(level);
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Fetch all escalations created at or after `from`, for metrics.
    pub async fn list_created_since(
        pool: &sqlx::PgPool,
        from: DateTime<Utc>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM escalations
            WHERE created_at >= $1
            ORDER BY created_at DESC
            ",
        )
        .bind(from)
        .fetch_all(pool)
        .await
    }
}
