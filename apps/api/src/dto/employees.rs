use backoffice_application::EmployeeForm;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::{DepartmentRef, Employee, ListPage, RecordId, UserRef};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Department reference.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/department-payload.ts"
)]
pub struct DepartmentPayload {
    pub id: String,
    pub name: String,
}

impl From<DepartmentRef> for DepartmentPayload {
    fn from(value: DepartmentRef) -> Self {
        Self {
            id: value.id.as_str().to_owned(),
            name: value.name,
        }
    }
}

/// User who created a row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-ref-response.ts"
)]
pub struct UserRefResponse {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<UserRef> for UserRefResponse {
    fn from(value: UserRef) -> Self {
        Self {
            id: value.id,
            name: value.name,
            avatar_url: value.avatar_url,
        }
    }
}

/// API representation of an employee.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-response.ts"
)]
pub struct EmployeeResponse {
    pub id: String,
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub full_name: String,
    pub position: String,
    pub rate: f64,
    pub department: Option<DepartmentPayload>,
    pub status: String,
    pub added_by: Option<UserRefResponse>,
}

impl From<Employee> for EmployeeResponse {
    fn from(value: Employee) -> Self {
        Self {
            full_name: value.full_name(),
            id: value.id.as_str().to_owned(),
            firstname: value.firstname,
            middlename: value.middlename,
            lastname: value.lastname,
            position: value.position,
            rate: value.rate,
            department: value.department.map(DepartmentPayload::from),
            status: value.status.as_str().to_owned(),
            added_by: value.added_by.map(UserRefResponse::from),
        }
    }
}

/// One page of employees.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-page-response.ts"
)]
pub struct EmployeePageResponse {
    pub records: Vec<EmployeeResponse>,
    pub total: u64,
}

impl From<ListPage<Employee>> for EmployeePageResponse {
    fn from(value: ListPage<Employee>) -> Self {
        Self {
            records: value.records.into_iter().map(EmployeeResponse::from).collect(),
            total: value.total,
        }
    }
}

/// Employee form as typed by the user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-request.ts"
)]
pub struct EmployeeRequest {
    pub firstname: String,
    #[serde(default)]
    pub middlename: String,
    pub lastname: String,
    pub position: String,
    pub rate: String,
    #[serde(default)]
    pub department: Option<DepartmentPayload>,
}

impl EmployeeRequest {
    pub fn into_form(self) -> AppResult<EmployeeForm> {
        let department = self
            .department
            .map(|department| -> Result<DepartmentRef, AppError> {
                Ok(DepartmentRef {
                    id: RecordId::new(department.id)?,
                    name: department.name,
                })
            })
            .transpose()?;

        Ok(EmployeeForm {
            firstname: self.firstname,
            middlename: self.middlename,
            lastname: self.lastname,
            position: self.position,
            rate: self.rate,
            department,
        })
    }
}
