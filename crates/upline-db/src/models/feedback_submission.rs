//! Feedback submission model.
//!
//! Submissions are created by the portal's feedback form and mutated by the
//! escalation engine as escalations are created and resolved. Rows are never
//! hard-deleted; terminal states are reached through status transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{EscalationPriority, FeedbackStatus};

/// A free-text issue reported by a user.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// Unique identifier.
    pub id: Uuid,

    /// Short summary of the issue.
    pub subject: String,

    /// Full description.
    pub description: String,

    /// Reporter name; null for anonymous submissions.
    pub contact_name: Option<String>,

    /// Reporter email; null for anonymous submissions.
    pub contact_email: Option<String>,

    /// Feedback category (policy, app-catalog, process, ...).
    pub category: String,

    /// Priority assigned at intake.
    pub priority: EscalationPriority,

    /// Current lifecycle status.
    pub status: FeedbackStatus,

    /// Level of the currently active escalation, if any.
    pub escalation_level: Option<i32>,

    /// Recipient of the currently active escalation, if any.
    pub assigned_to: Option<String>,

    /// When the feedback was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackSubmission {
    /// Find a submission by ID.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM feedback_submissions
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
