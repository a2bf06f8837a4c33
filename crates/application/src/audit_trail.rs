use std::str::FromStr;
use std::sync::Arc;

use backoffice_core::{AppError, AppResult};
use backoffice_domain::AuditEntry;
use tracing::warn;

use crate::AuditRepository;

/// What happens when the audit insert fails after the primary write landed.
///
/// The two writes are independent calls; neither policy rolls back the
/// primary write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditPolicy {
    /// Log the failure and report the mutation as saved.
    #[default]
    BestEffort,
    /// Report the failure to the caller as an error.
    Required,
}

impl AuditPolicy {
    /// Returns the configuration value for this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BestEffort => "best_effort",
            Self::Required => "required",
        }
    }
}

impl FromStr for AuditPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "best_effort" => Ok(Self::BestEffort),
            "required" => Ok(Self::Required),
            _ => Err(AppError::Validation(format!(
                "audit policy must be 'best_effort' or 'required', got '{value}'"
            ))),
        }
    }
}

/// Result of the audit step of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The audit entry was stored.
    Recorded,
    /// The audit insert failed and the policy absorbed it.
    Dropped,
}

/// Value produced by a mutation handler together with its audit outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReceipt<T> {
    /// Mutation result, e.g. the inserted row.
    pub value: T,
    /// Outcome of the audit insert.
    pub audit: AuditOutcome,
}

/// Secondary audit write applied after every mutation.
#[derive(Clone)]
pub struct AuditTrail {
    repository: Arc<dyn AuditRepository>,
    policy: AuditPolicy,
}

impl AuditTrail {
    /// Creates an audit trail over a repository.
    #[must_use]
    pub fn new(repository: Arc<dyn AuditRepository>, policy: AuditPolicy) -> Self {
        Self { repository, policy }
    }

    /// Returns the configured policy.
    #[must_use]
    pub fn policy(&self) -> AuditPolicy {
        self.policy
    }

    /// Appends an entry according to the policy.
    pub async fn record(&self, entry: AuditEntry) -> AppResult<AuditOutcome> {
        let reference_id = entry.reference_id.clone();
        match self.repository.append_entry(entry).await {
            Ok(()) => Ok(AuditOutcome::Recorded),
            Err(error) => match self.policy {
                AuditPolicy::BestEffort => {
                    warn!(%reference_id, %error, "audit entry dropped after successful write");
                    Ok(AuditOutcome::Dropped)
                }
                AuditPolicy::Required => Err(error),
            },
        }
    }

    /// Appends an entry and wraps the mutation value in a receipt.
    pub async fn seal<T>(&self, value: T, entry: AuditEntry) -> AppResult<MutationReceipt<T>> {
        let audit = self.record(entry).await?;
        Ok(MutationReceipt { value, audit })
    }
}
