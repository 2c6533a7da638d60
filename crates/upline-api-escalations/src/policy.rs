//! Escalation matrix and SLA policy configuration.
//!
//! Both tables are immutable once constructed and are injected into the
//! engine at startup, so deployments and tests can supply their own.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use upline_db::models::EscalationPriority;

/// One level of the escalation matrix: who owns escalations at that level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEntry {
    /// Governance role responsible at this level.
    pub role: String,
    /// Identity that receives escalations at this level.
    pub assignee: String,
}

impl MatrixEntry {
    #[must_use]
    pub fn new(role: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            assignee: assignee.into(),
        }
    }
}

/// Level to role/assignee lookup table bounding how far an item can escalate.
#[derive(Debug, Clone)]
pub struct EscalationMatrix {
    entries: BTreeMap<i32, MatrixEntry>,
}

impl EscalationMatrix {
    /// Build a matrix from explicit level entries.
    #[must_use]
    pub fn new(entries: BTreeMap<i32, MatrixEntry>) -> Self {
        Self { entries }
    }

    /// Look up the role and assignee for a level.
    ///
    /// Total over all inputs: levels outside the configured range return
    /// `None`, which the engine converts into the "no higher escalation
    /// level available" failure.
    #[must_use]
    pub fn lookup(&self, level: i32) -> Option<&MatrixEntry> {
        self.entries.get(&level)
    }

    /// Whether a level is defined in the matrix.
    #[must_use]
    pub fn contains(&self, level: i32) -> bool {
        self.entries.contains_key(&level)
    }

    /// Highest defined level, or 0 for an empty matrix.
    #[must_use]
    pub fn max_level(&self) -> i32 {
        self.entries.keys().max().copied().unwrap_or(0)
    }
}

impl Default for EscalationMatrix {
    /// The standard five-level governance chain.
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            1,
            MatrixEntry::new("Technology Custodian", "custodian@ictgovernance.gov"),
        );
        entries.insert(
            2,
            MatrixEntry::new("Technology Steward", "steward@ictgovernance.gov"),
        );
        entries.insert(
            3,
            MatrixEntry::new("Domain Owner", "domain-owner@ictgovernance.gov"),
        );
        entries.insert(
            4,
            MatrixEntry::new("ICT Governance Council", "governance-council@ictgovernance.gov"),
        );
        entries.insert(
            5,
            MatrixEntry::new("Executive Leadership", "executive@ictgovernance.gov"),
        );
        Self { entries }
    }
}

/// Time-bound response and resolution commitments, varying by priority.
#[derive(Debug, Clone)]
pub struct SlaPolicy {
    acknowledgment_target: Duration,
    resolution_targets: BTreeMap<EscalationPriority, Duration>,
}

impl SlaPolicy {
    /// Build a policy from an acknowledgment window and per-priority
    /// resolution windows.
    #[must_use]
    pub fn new(
        acknowledgment_target: Duration,
        resolution_targets: BTreeMap<EscalationPriority, Duration>,
    ) -> Self {
        Self {
            acknowledgment_target,
            resolution_targets,
        }
    }

    /// Acknowledgment window, identical for all priorities.
    #[must_use]
    pub fn acknowledgment_target(&self) -> Duration {
        self.acknowledgment_target
    }

    /// Resolution window for a priority, if one is configured.
    #[must_use]
    pub fn resolution_target(&self, priority: EscalationPriority) -> Option<Duration> {
        self.resolution_targets.get(&priority).copied()
    }

    /// Latest time an escalation created at `created_at` can be acknowledged
    /// within SLA.
    #[must_use]
    pub fn acknowledgment_deadline(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + self.acknowledgment_target
    }

    /// Latest time an escalation created at `created_at` can be resolved
    /// within SLA for its priority.
    #[must_use]
    pub fn resolution_deadline(
        &self,
        priority: EscalationPriority,
        created_at: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        self.resolution_target(priority).map(|t| created_at + t)
    }
}

impl Default for SlaPolicy {
    /// 15 minute acknowledgment across the board; resolution windows of
    /// 2h / 8h / 24h / 72h by priority.
    fn default() -> Self {
        let mut resolution_targets = BTreeMap::new();
        resolution_targets.insert(EscalationPriority::Critical, Duration::hours(2));
        resolution_targets.insert(EscalationPriority::High, Duration::hours(8));
        resolution_targets.insert(EscalationPriority::Medium, Duration::hours(24));
        resolution_targets.insert(EscalationPriority::Low, Duration::hours(72));
        Self {
            acknowledgment_target: Duration::minutes(15),
            resolution_targets,
        }
    }
}
