use serde::{Deserialize, Serialize};

use crate::listing::{ListedRecord, RecordId, RecordStatus};

/// Department reference resolved alongside an employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRef {
    /// Department row id.
    pub id: RecordId,
    /// Department display name.
    pub name: String,
}

/// User reference resolved alongside a row, e.g. who added it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// User row id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Public avatar URL, when uploaded.
    pub avatar_url: Option<String>,
}

/// Employee row mirrored from the HR tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Row id.
    pub id: RecordId,
    /// Given name.
    pub firstname: String,
    /// Middle name, possibly empty.
    pub middlename: String,
    /// Family name.
    pub lastname: String,
    /// Job position.
    pub position: String,
    /// Daily rate.
    pub rate: f64,
    /// Department the employee belongs to.
    pub department: Option<DepartmentRef>,
    /// Lifecycle status.
    pub status: RecordStatus,
    /// User who created the row.
    pub added_by: Option<UserRef>,
}

impl Employee {
    /// Returns "first middle last" with empty parts skipped.
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            self.firstname.as_str(),
            self.middlename.as_str(),
            self.lastname.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Validated employee payload for inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    /// Given name.
    pub firstname: String,
    /// Middle name, possibly empty.
    pub middlename: String,
    /// Family name.
    pub lastname: String,
    /// Job position.
    pub position: String,
    /// Daily rate.
    pub rate: f64,
    /// Department picked in the form.
    pub department: Option<DepartmentRef>,
    /// Creating user, filled in by the mutation handler.
    pub added_by: Option<UserRef>,
}

/// Changed employee fields for updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeChanges {
    /// New given name.
    pub firstname: Option<String>,
    /// New middle name.
    pub middlename: Option<String>,
    /// New family name.
    pub lastname: Option<String>,
    /// New position.
    pub position: Option<String>,
    /// New rate.
    pub rate: Option<f64>,
    /// New department; `Some(None)` clears it.
    pub department: Option<Option<DepartmentRef>>,
}

impl EmployeeChanges {
    /// Returns whether no field changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.middlename.is_none()
            && self.lastname.is_none()
            && self.position.is_none()
            && self.rate.is_none()
            && self.department.is_none()
    }
}

impl ListedRecord for Employee {
    type Draft = EmployeeDraft;
    type Changes = EmployeeChanges;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> Option<RecordStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        [
            self.firstname.as_str(),
            self.middlename.as_str(),
            self.lastname.as_str(),
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(keyword))
    }

    fn apply_changes(&mut self, changes: &Self::Changes) {
        if let Some(firstname) = &changes.firstname {
            self.firstname.clone_from(firstname);
        }
        if let Some(middlename) = &changes.middlename {
            self.middlename.clone_from(middlename);
        }
        if let Some(lastname) = &changes.lastname {
            self.lastname.clone_from(lastname);
        }
        if let Some(position) = &changes.position {
            self.position.clone_from(position);
        }
        if let Some(rate) = changes.rate {
            self.rate = rate;
        }
        if let Some(department) = &changes.department {
            self.department.clone_from(department);
        }
    }

    fn from_draft(record_id: RecordId, draft: Self::Draft) -> Self {
        Self {
            id: record_id,
            firstname: draft.firstname,
            middlename: draft.middlename,
            lastname: draft.lastname,
            position: draft.position,
            rate: draft.rate,
            department: draft.department,
            status: RecordStatus::Active,
            added_by: draft.added_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::listing::{ListFilter, ListedRecord, RecordId, RecordStatus};

    use super::{DepartmentRef, Employee, EmployeeChanges, EmployeeDraft};

    fn employee() -> Employee {
        let Ok(id) = RecordId::new("emp-1") else {
            panic!("valid record id");
        };

        Employee::from_draft(
            id,
            EmployeeDraft {
                firstname: "Ana".to_owned(),
                middlename: String::new(),
                lastname: "Reyes".to_owned(),
                position: "Welder".to_owned(),
                rate: 610.0,
                department: None,
                added_by: None,
            },
        )
    }

    #[test]
    fn drafts_start_active() {
        assert_eq!(employee().status, RecordStatus::Active);
    }

    #[test]
    fn full_name_skips_empty_middle_name() {
        assert_eq!(employee().full_name(), "Ana Reyes");
    }

    #[test]
    fn keyword_matches_names_case_insensitively() {
        let filter = ListFilter {
            keyword: "REY".to_owned(),
            ..ListFilter::active()
        };
        assert!(filter.matches(&employee()));

        let filter = ListFilter {
            keyword: "welder".to_owned(),
            ..ListFilter::active()
        };
        assert!(!filter.matches(&employee()));
    }

    #[test]
    fn apply_changes_only_touches_provided_fields() {
        let mut record = employee();
        record.apply_changes(&EmployeeChanges {
            rate: Some(700.0),
            ..EmployeeChanges::default()
        });

        assert_eq!(record.rate, 700.0);
        assert_eq!(record.firstname, "Ana");
        assert_eq!(record.position, "Welder");
    }

    #[test]
    fn department_can_be_cleared() {
        let mut record = employee();
        let Ok(department_id) = RecordId::new("dep-1") else {
            panic!("valid record id");
        };
        record.department = Some(DepartmentRef {
            id: department_id,
            name: "Yard".to_owned(),
        });

        record.apply_changes(&EmployeeChanges::default());
        assert!(record.department.is_some());

        record.apply_changes(&EmployeeChanges {
            department: Some(None),
            ..EmployeeChanges::default()
        });
        assert_eq!(record.department, None);
    }
}
