//! Shared enums for the escalation schema.
//!
//! Postgres values are snake_case; wire names keep the portal's capitalized
//! spelling (`"In Progress"`, `"Critical"`, ...).

use serde::{Deserialize, Serialize};

/// Lifecycle states of an escalation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "escalation_status", rename_all = "snake_case")]
pub enum EscalationStatus {
    /// Newly created, awaiting acknowledgment.
    Open,
    /// Acknowledged by the assigned recipient.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Resolved with notes. Terminal.
    Resolved,
    /// Closed without resolving the linked feedback. Terminal.
    Closed,
    /// Superseded by a higher-level escalation. Terminal for this record.
    Escalated,
}

impl EscalationStatus {
    /// Terminal states accept no further transitions in the UI, though the
    /// engine itself stays total over actions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed | Self::Escalated)
    }
}

impl std::fmt::Display for EscalationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Closed => write!(f, "Closed"),
            Self::Escalated => write!(f, "Escalated"),
        }
    }
}

/// Priority inherited from the feedback submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "escalation_priority", rename_all = "snake_case")]
pub enum EscalationPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl EscalationPriority {
    /// All priorities in severity order, highest first.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];
}

impl std::fmt::Display for EscalationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Status of a feedback submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "feedback_status", rename_all = "snake_case")]
pub enum FeedbackStatus {
    /// Received and not yet escalated.
    Submitted,
    /// At least one escalation is tracking it.
    Escalated,
    /// Resolved through an escalation. Terminal.
    Resolved,
    /// Closed without resolution. Terminal.
    Closed,
}

/// Audit trail entry types, one per engine action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "escalation_activity_type", rename_all = "snake_case")]
pub enum ActivityType {
    Created,
    Acknowledged,
    Assigned,
    Resolved,
    Escalated,
    Closed,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Acknowledged => write!(f, "Acknowledged"),
            Self::Assigned => write!(f, "Assigned"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Escalated => write!(f, "Escalated"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let open = EscalationStatus::Open;
        let json = serde_json::to_string(&open).unwrap();
        assert_eq!(json, "\"Open\"");

        let in_progress = EscalationStatus::InProgress;
        let json = serde_json::to_string(&in_progress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let restored: EscalationStatus = serde_json::from_str(&json).unwrap();
        assert!(matches!(restored, EscalationStatus::InProgress));
    }

    #[test]
    fn test_all_statuses_serialization() {
        let statuses = vec![
            (EscalationStatus::Open, "\"Open\""),
            (EscalationStatus::InProgress, "\"In Progress\""),
            (EscalationStatus::Resolved, "\"Resolved\""),
            (EscalationStatus::Closed, "\"Closed\""),
            (EscalationStatus::Escalated, "\"Escalated\""),
        ];

        for (status, expected) in statuses {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, expected, "Serialization mismatch for {status:?}");
        }
    }

    #[test]
    fn test_status_is_terminal() {
        assert!(!EscalationStatus::Open.is_terminal());
        assert!(!EscalationStatus::InProgress.is_terminal());
        assert!(EscalationStatus::Resolved.is_terminal());
        assert!(EscalationStatus::Closed.is_terminal());
        assert!(EscalationStatus::Escalated.is_terminal());
    }

    #[test]
    fn test_priority_serialization() {
        let critical = EscalationPriority::Critical;
        let json = serde_json::to_string(&critical).unwrap();
        assert_eq!(json, "\"Critical\"");

        let restored: EscalationPriority = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(restored, EscalationPriority::Low);
    }

    #[test]
    fn test_priority_severity_order() {
        let mut priorities = vec![EscalationPriority::Low, EscalationPriority::Critical];
        priorities.sort();
        assert_eq!(priorities[0], EscalationPriority::Critical);
    }

    #[test]
    fn test_activity_type_serialization() {
        let created = ActivityType::Created;
        let json = serde_json::to_string(&created).unwrap();
        assert_eq!(json, "\"Created\"");
        assert_eq!(ActivityType::Acknowledged.to_string(), "Acknowledged");
    }

    #[test]
    fn test_feedback_status_serialization() {
        let json = serde_json::to_string(&FeedbackStatus::Resolved).unwrap();
        assert_eq!(json, "\"Resolved\"");
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(EscalationStatus::InProgress.to_string(), "In Progress");
        assert_eq!(
            serde_json::to_string(&EscalationStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
    }
}
