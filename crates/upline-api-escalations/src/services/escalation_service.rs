//! Escalation engine.
//!
//! Creates escalations, applies lifecycle actions, and keeps the activity
//! trail and feedback cascade consistent. Every mutation runs in a single
//! transaction, and the escalation row is locked for the duration of an
//! action so concurrent actions against one escalation serialize.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use upline_db::models::{
    ActivityType, Escalation, EscalationActivity, EscalationFilter, EscalationListRow,
    EscalationPriority, EscalationStatus, FeedbackStatus, FeedbackSubmission,
};

use crate::error::{ApiEscalationsError, ApiResult};
use crate::models::{CreateEscalationRequest, EscalationAction, EscalationActionRequest};
use crate::policy::EscalationMatrix;

/// Result of applying an action to an escalation.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// The escalation the action was applied to.
    pub escalation_id: Uuid,
    /// Status after the action.
    pub new_status: EscalationStatus,
    /// Human-readable summary for the caller.
    pub message: String,
}

/// An escalation with its linked feedback and ordered activity log.
#[derive(Debug, Clone)]
pub struct EscalationDetail {
    pub escalation: Escalation,
    pub feedback: FeedbackSubmission,
    pub activities: Vec<EscalationActivity>,
}

/// Create input with every required field present.
#[derive(Debug, Clone)]
pub struct ValidatedCreate {
    pub feedback_id: Uuid,
    pub level: i32,
    pub escalated_to: String,
    pub escalated_to_role: String,
    pub reason: String,
    pub priority: Option<EscalationPriority>,
    pub category: Option<String>,
}

/// Check required create fields, naming the first missing one.
pub fn validate_create(req: &CreateEscalationRequest) -> ApiResult<ValidatedCreate> {
    let feedback_id = req.feedback_id.ok_or_else(|| missing("feedbackId"))?;
    let level = req
        .escalation_level
        .ok_or_else(|| missing("escalationLevel"))?;
    let escalated_to = required_text(req.escalated_to.as_deref(), "escalatedTo")?;
    let escalated_to_role = required_text(req.escalated_to_role.as_deref(), "escalatedToRole")?;
    let reason = required_text(req.escalation_reason.as_deref(), "escalationReason")?;

    Ok(ValidatedCreate {
        feedback_id,
        level,
        escalated_to,
        escalated_to_role,
        reason,
        priority: req.priority,
        category: req.category.clone(),
    })
}

fn missing(field: &str) -> ApiEscalationsError {
    ApiEscalationsError::Validation(format!("{field} is required"))
}

fn required_text(value: Option<&str>, field: &str) -> ApiResult<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(field))
}

/// Fields for a new escalation row.
struct NewEscalation {
    id: Uuid,
    feedback_id: Uuid,
    level: i32,
    escalated_to: String,
    escalated_to_role: String,
    reason: String,
    priority: EscalationPriority,
    category: String,
    parent_escalation_id: Option<Uuid>,
}

/// The escalation state machine.
pub struct EscalationService {
    pool: PgPool,
    matrix: EscalationMatrix,
}

impl EscalationService {
    /// Create a new escalation service with the given matrix configuration.
    #[must_use]
    pub fn new(pool: PgPool, matrix: EscalationMatrix) -> Self {
        Self { pool, matrix }
    }

    /// The matrix this engine routes against.
    #[must_use]
    pub fn matrix(&self) -> &EscalationMatrix {
        &self.matrix
    }

    /// Create a root escalation for a feedback submission.
    ///
    /// Inserts the escalation, writes its `Created` activity entry, and
    /// stamps the feedback row's escalation level and assignee, all in one
    /// transaction.
    pub async fn create(
        &self,
        actor: &str,
        req: &CreateEscalationRequest,
    ) -> ApiResult<Escalation> {
        let input = validate_create(req)?;

        if !self.matrix.contains(input.level) {
            return Err(ApiEscalationsError::Validation(format!(
                "escalationLevel {} is not defined in the escalation matrix (max {})",
                input.level,
                self.matrix.max_level()
            )));
        }

        let feedback = FeedbackSubmission::find_by_id(&self.pool, input.feedback_id)
            .await?
            .ok_or(ApiEscalationsError::FeedbackNotFound(input.feedback_id))?;

        let priority = input.priority.unwrap_or(feedback.priority);
        let category = input
            .category
            .clone()
            .unwrap_or_else(|| feedback.category.clone());

        let mut tx = self.pool.begin().await?;

        let escalation = insert_escalation(
            &mut tx,
            NewEscalation {
                id: Uuid::new_v4(),
                feedback_id: input.feedback_id,
                level: input.level,
                escalated_to: input.escalated_to,
                escalated_to_role: input.escalated_to_role,
                reason: input.reason,
                priority,
                category,
                parent_escalation_id: None,
            },
        )
        .await?;

        log_activity(
            &mut tx,
            escalation.id,
            ActivityType::Created,
            &format!(
                "Escalation created at Level {} for {} ({})",
                escalation.level, escalation.escalated_to, escalation.escalated_to_role
            ),
            actor,
        )
        .await?;

        cascade_feedback_assignment(&mut tx, &escalation).await?;

        tx.commit().await?;

        info!(
            escalation_id = %escalation.id,
            feedback_id = %escalation.feedback_id,
            level = escalation.level,
            actor = %actor,
            "Escalation created"
        );
        Ok(escalation)
    }

    /// Apply a lifecycle action to an escalation.
    ///
    /// The status update, any cascading feedback update, and the activity
    /// log append commit together or not at all.
    pub async fn apply_action(
        &self,
        actor: &str,
        id: Uuid,
        req: &EscalationActionRequest,
    ) -> ApiResult<ActionOutcome> {
        let action_str = req
            .action
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("action"))?;

        let action: EscalationAction = action_str.parse().map_err(|()| {
            ApiEscalationsError::InvalidAction(format!("Unrecognized action: {action_str}"))
        })?;

        let notes = req
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let assignee = if action == EscalationAction::Assign {
            Some(required_text(req.assigned_to.as_deref(), "assignedTo")?)
        } else {
            None
        };

        let mut tx = self.pool.begin().await?;

        // Lock the row for the duration of the transaction.
        let escalation: Escalation =
            sqlx::query_as("SELECT * FROM escalations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(ApiEscalationsError::EscalationNotFound(id))?;

        let outcome = match action {
            EscalationAction::Acknowledge => self.acknowledge(&mut tx, &escalation, actor).await?,
            EscalationAction::Assign => {
                // Presence was checked above.
                let assignee = assignee
                    .ok_or_else(|| ApiEscalationsError::Internal("assignee missing".to_string()))?;
                self.assign(&mut tx, &escalation, &assignee, actor).await?
            }
            EscalationAction::Resolve => self.resolve(&mut tx, &escalation, notes, actor).await?,
            EscalationAction::Escalate => self.escalate(&mut tx, &escalation, notes, actor).await?,
            EscalationAction::Close => self.close(&mut tx, &escalation, notes, actor).await?,
        };

        tx.commit().await?;

        info!(
            escalation_id = %id,
            action = action.as_str(),
            actor = %actor,
            new_status = %outcome.new_status,
            "Escalation action applied"
        );
        Ok(outcome)
    }

    /// Fetch one escalation with its feedback fields and activity log.
    pub async fn get(&self, id: Uuid) -> ApiResult<EscalationDetail> {
        let escalation = Escalation::find_by_id(&self.pool, id)
            .await?
            .ok_or(ApiEscalationsError::EscalationNotFound(id))?;

        let feedback = FeedbackSubmission::find_by_id(&self.pool, escalation.feedback_id)
            .await?
            .ok_or(ApiEscalationsError::FeedbackNotFound(escalation.feedback_id))?;

        let activities = EscalationActivity::find_by_escalation(&self.pool, id).await?;

        Ok(EscalationDetail {
            escalation,
            feedback,
            activities,
        })
    }

    /// List escalations, most recent first. Empty results are not an error.
    pub async fn list(
        &self,
        filter: &EscalationFilter,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<EscalationListRow>> {
        Escalation::list(&self.pool, filter, limit, offset)
            .await
            .map_err(Into::into)
    }

    async fn acknowledge(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escalation: &Escalation,
        actor: &str,
    ) -> ApiResult<ActionOutcome> {
        let now = Utc::now();
        sqlx::query("UPDATE escalations SET acknowledged_at = $2, status = $3 WHERE id = $1")
            .bind(escalation.id)
            .bind(now)
            .bind(EscalationStatus::InProgress)
            .execute(&mut **tx)
            .await?;

        log_activity(
            tx,
            escalation.id,
            ActivityType::Acknowledged,
            &format!("Acknowledged by {actor}"),
            actor,
        )
        .await?;

        Ok(ActionOutcome {
            escalation_id: escalation.id,
            new_status: EscalationStatus::InProgress,
            message: "Escalation acknowledged".to_string(),
        })
    }

    async fn assign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escalation: &Escalation,
        assignee: &str,
        actor: &str,
    ) -> ApiResult<ActionOutcome> {
        sqlx::query("UPDATE escalations SET escalated_to = $2 WHERE id = $1")
            .bind(escalation.id)
            .bind(assignee)
            .execute(&mut **tx)
            .await?;

        log_activity(
            tx,
            escalation.id,
            ActivityType::Assigned,
            &format!("Assigned to {assignee}"),
            actor,
        )
        .await?;

        Ok(ActionOutcome {
            escalation_id: escalation.id,
            // Assignment does not move the state machine.
            new_status: escalation.status,
            message: format!("Escalation assigned to {assignee}"),
        })
    }

    async fn resolve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escalation: &Escalation,
        notes: Option<&str>,
        actor: &str,
    ) -> ApiResult<ActionOutcome> {
        let now = Utc::now();
        sqlx::query(
            "UPDATE escalations SET resolved_at = $2, resolution_notes = $3, status = $4 \
             WHERE id = $1",
        )
        .bind(escalation.id)
        .bind(now)
        .bind(notes)
        .bind(EscalationStatus::Resolved)
        .execute(&mut **tx)
        .await?;

        sqlx::query("UPDATE feedback_submissions SET status = $2 WHERE id = $1")
            .bind(escalation.feedback_id)
            .bind(FeedbackStatus::Resolved)
            .execute(&mut **tx)
            .await?;

        log_activity(
            tx,
            escalation.id,
            ActivityType::Resolved,
            &format!("Resolved by {actor}"),
            actor,
        )
        .await?;

        Ok(ActionOutcome {
            escalation_id: escalation.id,
            new_status: EscalationStatus::Resolved,
            message: "Escalation resolved".to_string(),
        })
    }

    async fn escalate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escalation: &Escalation,
        notes: Option<&str>,
        actor: &str,
    ) -> ApiResult<ActionOutcome> {
        let next_level = escalation.level + 1;
        let entry = self.matrix.lookup(next_level).ok_or_else(|| {
            ApiEscalationsError::InvalidAction(format!(
                "No escalation level above Level {} is available",
                escalation.level
            ))
        })?;

        let reason = notes
            .map(str::to_string)
            .unwrap_or_else(|| format!("Escalated from Level {}", escalation.level));

        let successor = insert_escalation(
            tx,
            NewEscalation {
                id: Uuid::new_v4(),
                feedback_id: escalation.feedback_id,
                level: next_level,
                escalated_to: entry.assignee.clone(),
                escalated_to_role: entry.role.clone(),
                reason,
                priority: escalation.priority,
                category: escalation.category.clone(),
                parent_escalation_id: Some(escalation.id),
            },
        )
        .await?;

        sqlx::query(
            "UPDATE escalations SET status = $2, escalated_to_escalation_id = $3 WHERE id = $1",
        )
        .bind(escalation.id)
        .bind(EscalationStatus::Escalated)
        .bind(successor.id)
        .execute(&mut **tx)
        .await?;

        log_activity(
            tx,
            escalation.id,
            ActivityType::Escalated,
            &format!("Escalated to Level {} ({})", next_level, entry.role),
            actor,
        )
        .await?;

        // The successor starts its own audit trail.
        log_activity(
            tx,
            successor.id,
            ActivityType::Created,
            &format!(
                "Escalation created at Level {} for {} ({})",
                successor.level, successor.escalated_to, successor.escalated_to_role
            ),
            actor,
        )
        .await?;

        cascade_feedback_assignment(tx, &successor).await?;

        Ok(ActionOutcome {
            escalation_id: escalation.id,
            new_status: EscalationStatus::Escalated,
            message: format!("Escalated to Level {} ({})", next_level, entry.role),
        })
    }

    async fn close(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        escalation: &Escalation,
        notes: Option<&str>,
        actor: &str,
    ) -> ApiResult<ActionOutcome> {
        let now = Utc::now();
        sqlx::query(
            "UPDATE escalations SET resolved_at = $2, resolution_notes = $3, status = $4 \
             WHERE id = $1",
        )
        .bind(escalation.id)
        .bind(now)
        .bind(notes)
        .bind(EscalationStatus::Closed)
        .execute(&mut **tx)
        .await?;

        log_activity(
            tx,
            escalation.id,
            ActivityType::Closed,
            &format!("Closed by {actor}"),
            actor,
        )
        .await?;

        Ok(ActionOutcome {
            escalation_id: escalation.id,
            new_status: EscalationStatus::Closed,
            message: "Escalation closed".to_string(),
        })
    }
}

async fn insert_escalation(
    tx: &mut Transaction<'_, Postgres>,
    new: NewEscalation,
) -> Result<Escalation, sqlx::Error> {
    sqlx::query_as(
        r"
        INSERT INTO escalations (
            id, feedback_id, level, escalated_to, escalated_to_role,
            escalation_reason, status, priority, category, parent_escalation_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        ",
    )
    .bind(new.id)
    .bind(new.feedback_id)
    .bind(new.level)
    .bind(&new.escalated_to)
    .bind(&new.escalated_to_role)
    .bind(&new.reason)
    .bind(EscalationStatus::Open)
    .bind(new.priority)
    .bind(&new.category)
    .bind(new.parent_escalation_id)
    .fetch_one(&mut **tx)
    .await
}

async fn log_activity(
    tx: &mut Transaction<'_, Postgres>,
    escalation_id: Uuid,
    activity_type: ActivityType,
    description: &str,
    actor: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO escalation_activity_log (id, escalation_id, activity_type, description, performed_by)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(Uuid::new_v4())
    .bind(escalation_id)
    .bind(activity_type)
    .bind(description)
    .bind(actor)
    .execute(&mut **tx)
    .await
    .map(|_| ())
}

/// Point the feedback row at its currently active escalation.
async fn cascade_feedback_assignment(
    tx: &mut Transaction<'_, Postgres>,
    escalation: &Escalation,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        UPDATE feedback_submissions
        SET escalation_level = $2,
            assigned_to = $3,
            status = CASE WHEN status IN ('resolved', 'closed') THEN status ELSE 'escalated' END
        WHERE id = $1
        ",
    )
    .bind(escalation.feedback_id)
    .bind(escalation.level)
    .bind(&escalation.escalated_to)
    .execute(&mut **tx)
    .await
    .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateEscalationRequest;

    fn full_request() -> CreateEscalationRequest {
        CreateEscalationRequest {
            feedback_id: Some(Uuid::new_v4()),
            escalation_level: Some(1),
            escalated_to: Some("custodian@ictgovernance.gov".to_string()),
            escalated_to_role: Some("Technology Custodian".to_string()),
            escalation_reason: Some("No response to feedback".to_string()),
            priority: None,
            category: None,
        }
    }

    #[test]
    fn test_validate_create_accepts_full_request() {
        let validated = validate_create(&full_request()).unwrap();
        assert_eq!(validated.level, 1);
        assert_eq!(validated.escalated_to_role, "Technology Custodian");
    }

    #[test]
    fn test_validate_create_names_missing_field() {
        let cases = [
            (
                CreateEscalationRequest {
                    feedback_id: None,
                    ..full_request()
                },
                "feedbackId",
            ),
            (
                CreateEscalationRequest {
                    escalation_level: None,
                    ..full_request()
                },
                "escalationLevel",
            ),
            (
                CreateEscalationRequest {
                    escalated_to: None,
                    ..full_request()
                },
                "escalatedTo",
            ),
            (
                CreateEscalationRequest {
                    escalated_to_role: None,
                    ..full_request()
                },
                "escalatedToRole",
            ),
            (
                CreateEscalationRequest {
                    escalation_reason: None,
                    ..full_request()
                },
                "escalationReason",
            ),
        ];

        for (req, field) in cases {
            let err = validate_create(&req).unwrap_err();
            match err {
                ApiEscalationsError::Validation(msg) => {
                    assert_eq!(msg, format!("{field} is required"));
                }
                other => panic!("expected Validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_create_rejects_blank_text() {
        let req = CreateEscalationRequest {
            escalation_reason: Some("   ".to_string()),
            ..full_request()
        };
        let err = validate_create(&req).unwrap_err();
        assert!(matches!(err, ApiEscalationsError::Validation(ref msg)
            if msg == "escalationReason is required"));
    }

    #[test]
    fn test_validate_create_trims_text_fields() {
        let req = CreateEscalationRequest {
            escalated_to: Some("  ops@example.gov  ".to_string()),
            ..full_request()
        };
        let validated = validate_create(&req).unwrap();
        assert_eq!(validated.escalated_to, "ops@example.gov");
    }
}
