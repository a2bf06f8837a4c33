use backoffice_application::AccountForm;
use backoffice_domain::{ListPage, UserAccount};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a user account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-account-response.ts"
)]
pub struct UserAccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub status: String,
}

impl From<UserAccount> for UserAccountResponse {
    fn from(value: UserAccount) -> Self {
        Self {
            id: value.id.as_str().to_owned(),
            name: value.name,
            email: value.email,
            avatar_url: value.avatar_url,
            status: value.status.as_str().to_owned(),
        }
    }
}

/// One page of user accounts.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-account-page-response.ts"
)]
pub struct UserAccountPageResponse {
    pub records: Vec<UserAccountResponse>,
    pub total: u64,
}

impl From<ListPage<UserAccount>> for UserAccountPageResponse {
    fn from(value: ListPage<UserAccount>) -> Self {
        Self {
            records: value
                .records
                .into_iter()
                .map(UserAccountResponse::from)
                .collect(),
            total: value.total,
        }
    }
}

/// Incoming display name change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-account-profile-request.ts"
)]
pub struct UpdateAccountProfileRequest {
    pub name: String,
}

impl From<UpdateAccountProfileRequest> for AccountForm {
    fn from(value: UpdateAccountProfileRequest) -> Self {
        Self { name: value.name }
    }
}

/// Query string of the avatar upload; the body carries the raw file.
#[derive(Debug, Deserialize)]
pub struct AvatarUploadQuery {
    pub file_name: String,
}

/// Public URL of the stored profile photo.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/avatar-response.ts"
)]
pub struct AvatarResponse {
    pub avatar_url: String,
}
