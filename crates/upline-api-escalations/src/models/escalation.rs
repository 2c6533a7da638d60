//! Request and response models for escalation endpoints.
//!
//! Wire field names follow the portal's camelCase convention.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use upline_db::models::{
    ActivityType, Escalation, EscalationActivity, EscalationListRow, EscalationPriority,
    EscalationStatus, FeedbackSubmission,
};

/// Actions the engine accepts against an existing escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationAction {
    Acknowledge,
    Assign,
    Resolve,
    Escalate,
    Close,
}

impl EscalationAction {
    /// Wire name of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acknowledge => "acknowledge",
            Self::Assign => "assign",
            Self::Resolve => "resolve",
            Self::Escalate => "escalate",
            Self::Close => "close",
        }
    }

    /// The activity entry type recorded for this action.
    #[must_use]
    pub fn activity_type(&self) -> ActivityType {
        match self {
            Self::Acknowledge => ActivityType::Acknowledged,
            Self::Assign => ActivityType::Assigned,
            Self::Resolve => ActivityType::Resolved,
            Self::Escalate => ActivityType::Escalated,
            Self::Close => ActivityType::Closed,
        }
    }
}

impl FromStr for EscalationAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "acknowledge" => Ok(Self::Acknowledge),
            "assign" => Ok(Self::Assign),
            "resolve" => Ok(Self::Resolve),
            "escalate" => Ok(Self::Escalate),
            "close" => Ok(Self::Close),
            _ => Err(()),
        }
    }
}

/// Request to create an escalation.
///
/// Required fields are optional at the type level so missing ones can be
/// rejected with a message naming the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEscalationRequest {
    /// The feedback submission to escalate.
    pub feedback_id: Option<Uuid>,

    /// Initial escalation level; must exist in the escalation matrix.
    #[validate(range(min = 1, message = "Escalation level must be at least 1"))]
    pub escalation_level: Option<i32>,

    /// Recipient identity the escalation is assigned to.
    #[validate(length(max = 255, message = "escalatedTo must be at most 255 characters"))]
    pub escalated_to: Option<String>,

    /// Role the escalation is assigned to.
    #[validate(length(max = 255, message = "escalatedToRole must be at most 255 characters"))]
    pub escalated_to_role: Option<String>,

    /// Why the feedback is being escalated.
    #[validate(length(max = 2000, message = "escalationReason must be at most 2000 characters"))]
    pub escalation_reason: Option<String>,

    /// Priority override; defaults to the feedback submission's priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<EscalationPriority>,

    /// Category override; defaults to the feedback submission's category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request to apply an action to an escalation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscalationActionRequest {
    /// One of `acknowledge`, `assign`, `resolve`, `escalate`, `close`.
    pub action: Option<String>,

    /// Notes recorded with the action (resolution notes, escalate reason).
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    /// New recipient; required when action is `assign`.
    #[validate(length(max = 255, message = "assignedTo must be at most 255 characters"))]
    pub assigned_to: Option<String>,
}

/// Query parameters for listing escalations.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEscalationsQuery {
    /// Filter by escalation status.
    pub status: Option<EscalationStatus>,
    /// Filter by priority.
    pub priority: Option<EscalationPriority>,
    /// Filter by numeric escalation level.
    pub level: Option<i32>,
    /// Page size (default 50, max 100).
    pub limit: Option<i64>,
    /// Page offset (default 0).
    pub offset: Option<i64>,
}

/// An escalation as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscalationResponse {
    pub id: Uuid,
    pub feedback_id: Uuid,
    pub level: i32,
    pub escalated_to: String,
    pub escalated_to_role: String,
    pub escalation_reason: String,
    pub status: EscalationStatus,
    pub priority: EscalationPriority,
    pub category: String,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_notes: Option<String>,
    pub parent_escalation_id: Option<Uuid>,
    pub escalated_to_escalation_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Escalation> for EscalationResponse {
    fn from(e: Escalation) -> Self {
        Self {
            id: e.id,
            feedback_id: e.feedback_id,
            level: e.level,
            escalated_to: e.escalated_to,
            escalated_to_role: e.escalated_to_role,
            escalation_reason: e.escalation_reason,
            status: e.status,
            priority: e.priority,
            category: e.category,
            acknowledged_at: e.acknowledged_at,
            resolved_at: e.resolved_at,
            resolution_notes: e.resolution_notes,
            parent_escalation_id: e.parent_escalation_id,
            escalated_to_escalation_id: e.escalated_to_escalation_id,
            created_at: e.created_at,
        }
    }
}

/// A listing row: escalation fields plus the feedback subject.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscalationListItem {
    #[serde(flatten)]
    pub escalation: EscalationResponse,
    /// Subject of the linked feedback submission.
    pub subject: String,
}

impl From<EscalationListRow> for EscalationListItem {
    fn from(row: EscalationListRow) -> Self {
        Self {
            escalation: row.escalation.into(),
            subject: row.subject,
        }
    }
}

/// One activity log entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: Uuid,
    pub activity_type: ActivityType,
    pub description: String,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<EscalationActivity> for ActivityResponse {
    fn from(a: EscalationActivity) -> Self {
        Self {
            id: a.id,
            activity_type: a.activity_type,
            description: a.description,
            performed_by: a.performed_by,
            created_at: a.created_at,
        }
    }
}

/// Merged view of an escalation, selected feedback fields, and the full
/// activity log (most recent first).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscalationDetailResponse {
    #[serde(flatten)]
    pub escalation: EscalationResponse,
    pub subject: String,
    pub description: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub activities: Vec<ActivityResponse>,
}

impl EscalationDetailResponse {
    /// Assemble the merged view from its parts.
    #[must_use]
    pub fn from_parts(
        escalation: Escalation,
        feedback: &FeedbackSubmission,
        activities: Vec<EscalationActivity>,
    ) -> Self {
        Self {
            escalation: escalation.into(),
            subject: feedback.subject.clone(),
            description: feedback.description.clone(),
            contact_name: feedback.contact_name.clone(),
            contact_email: feedback.contact_email.clone(),
            submitted_at: feedback.submitted_at,
            activities: activities.into_iter().map(ActivityResponse::from).collect(),
        }
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEscalationResponse {
    pub success: bool,
    pub escalation_id: Uuid,
    pub escalation: EscalationResponse,
}

/// Response to a successful action.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscalationActionResponse {
    pub success: bool,
    pub message: String,
    pub escalation_id: Uuid,
    pub new_status: EscalationStatus,
}
