use std::str::FromStr;

use backoffice_core::AppResult;
use backoffice_domain::{
    AccessAssignment, AccessMember, Capability, RecordId, SystemAccessSettings,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// User listed under a capability.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-member-payload.ts"
)]
pub struct AccessMemberPayload {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Members of one capability.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-assignment-payload.ts"
)]
pub struct AccessAssignmentPayload {
    pub capability: String,
    /// Settings page caption; ignored on input.
    #[serde(default)]
    pub label: String,
    pub members: Vec<AccessMemberPayload>,
}

impl From<AccessAssignment> for AccessAssignmentPayload {
    fn from(value: AccessAssignment) -> Self {
        Self {
            capability: value.capability.as_str().to_owned(),
            label: value.capability.label().to_owned(),
            members: value
                .members
                .into_iter()
                .map(|member| AccessMemberPayload {
                    id: member.user_id,
                    name: member.name,
                })
                .collect(),
        }
    }
}

/// The `system_access` settings row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/system-access-response.ts"
)]
pub struct SystemAccessResponse {
    pub id: Option<String>,
    pub assignments: Vec<AccessAssignmentPayload>,
}

impl From<SystemAccessSettings> for SystemAccessResponse {
    fn from(value: SystemAccessSettings) -> Self {
        Self {
            id: value.id.map(|id| id.as_str().to_owned()),
            assignments: value
                .assignments
                .into_iter()
                .map(AccessAssignmentPayload::from)
                .collect(),
        }
    }
}

/// Edited settings; `id` is the stored row id when one exists.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-system-access-request.ts"
)]
pub struct SaveSystemAccessRequest {
    pub id: Option<String>,
    pub assignments: Vec<AccessAssignmentPayload>,
}

impl SaveSystemAccessRequest {
    pub fn into_settings(self) -> AppResult<SystemAccessSettings> {
        let id = self.id.map(RecordId::new).transpose()?;
        let mut settings = SystemAccessSettings::new(id, Vec::new());

        for assignment in self.assignments {
            let capability = Capability::from_str(assignment.capability.as_str())?;
            let members = assignment
                .members
                .into_iter()
                .map(|member| AccessMember {
                    user_id: member.id,
                    name: member.name,
                })
                .collect();
            settings.replace_assignment(capability, members);
        }

        Ok(settings)
    }
}
