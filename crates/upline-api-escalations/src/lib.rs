//! Escalation management API for the upline governance portal.
//!
//! Tracks feedback submissions through a leveled escalation matrix: each
//! escalation is owned by one role/recipient, moves through
//! `Open -> In Progress -> Resolved | Closed | Escalated`, and leaves an
//! append-only activity trail. SLA compliance is computed over a rolling
//! 30-day window.
//!
//! # Endpoints
//!
//! - `GET /escalations` - filtered, paginated listing
//! - `GET /escalations/{id}` - merged view with feedback fields and activity log
//! - `POST /escalations/{id}/action` - acknowledge / assign / resolve / escalate / close
//! - `POST /escalations` - create a root escalation
//! - `GET /escalations/metrics` - SLA compliance summary

pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod router;
pub mod services;

pub use error::{ApiEscalationsError, ApiResult, ErrorResponse};
pub use extract::ActorId;
pub use policy::{EscalationMatrix, MatrixEntry, SlaPolicy};
pub use router::{escalations_router, EscalationsState};
pub use services::{EscalationService, SlaMetricsService};
