use std::sync::Arc;

use backoffice_core::{AppResult, UserIdentity};
use backoffice_domain::{
    AuditEntry, AuditKind, Employee, EmployeeChanges, EmployeeDraft, ListFilter, ListPage,
    PageRequest, RecordId, RecordStatus, UserRef,
};
use tracing::info;

use crate::{AuditTrail, MutationReceipt, RecordRepository};

/// Mutation handlers and list reads for HR employee records.
#[derive(Clone)]
pub struct EmployeeService {
    repository: Arc<dyn RecordRepository<Employee>>,
    audit: AuditTrail,
}

impl EmployeeService {
    /// Creates a new employee service.
    #[must_use]
    pub fn new(repository: Arc<dyn RecordRepository<Employee>>, audit: AuditTrail) -> Self {
        Self { repository, audit }
    }

    /// Returns the repository list fetches go through.
    #[must_use]
    pub fn records(&self) -> &dyn RecordRepository<Employee> {
        self.repository.as_ref()
    }

    /// Reads one page of employees.
    pub async fn list(&self, filter: &ListFilter, page: PageRequest) -> AppResult<ListPage<Employee>> {
        self.repository.list(filter, page).await
    }

    /// Reads one employee.
    pub async fn find(&self, employee_id: &RecordId) -> AppResult<Option<Employee>> {
        self.repository.find(employee_id).await
    }

    /// Inserts an employee and records who added it.
    pub async fn create(
        &self,
        actor: &UserIdentity,
        mut draft: EmployeeDraft,
    ) -> AppResult<MutationReceipt<Employee>> {
        if draft.added_by.is_none() {
            draft.added_by = Some(UserRef {
                id: actor.subject().to_owned(),
                name: actor.email_handle().to_owned(),
                avatar_url: None,
            });
        }

        let employee = self.repository.create(draft).await?;
        info!(employee_id = %employee.id, "employee created");

        let entry = AuditEntry::new(
            employee.id.clone(),
            AuditKind::Employee,
            format!("Added employee \"{}\"", employee.full_name()),
            actor.subject(),
        );
        self.audit.seal(employee, entry).await
    }

    /// Writes the changed fields of an employee.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        employee_id: &RecordId,
        changes: EmployeeChanges,
    ) -> AppResult<MutationReceipt<EmployeeChanges>> {
        self.repository
            .update(employee_id, changes.clone())
            .await?;

        let entry = AuditEntry::new(
            employee_id.clone(),
            AuditKind::Employee,
            "Updated employee details",
            actor.subject(),
        );
        self.audit.seal(changes, entry).await
    }

    /// Writes a new lifecycle status.
    pub async fn set_status(
        &self,
        actor: &UserIdentity,
        employee_id: &RecordId,
        status: RecordStatus,
    ) -> AppResult<MutationReceipt<RecordStatus>> {
        self.repository.set_status(employee_id, status).await?;
        info!(%employee_id, status = status.as_str(), "employee status changed");

        let entry = AuditEntry::new(
            employee_id.clone(),
            AuditKind::Employee,
            format!("Marked employee as {}", status.as_str()),
            actor.subject(),
        );
        self.audit.seal(status, entry).await
    }
}
