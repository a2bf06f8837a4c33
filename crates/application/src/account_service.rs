use std::sync::Arc;

use backoffice_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use backoffice_domain::{
    AccountChanges, AuditEntry, AuditKind, ListFilter, ListPage, ObjectPath, PageRequest,
    RecordId, RecordStatus, UserAccount,
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{AuditTrail, MutationReceipt, ObjectStorage, RecordRepository};

/// Profile photo selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    /// MIME type sent to the object store.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Returns a fresh, upper-case reference code for stored files.
#[must_use]
pub fn generate_reference_code() -> String {
    let stamp = Utc::now().format("%y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{stamp}{}", &suffix[..6]).to_uppercase()
}

/// Account profile and employee-account operations.
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn RecordRepository<UserAccount>>,
    storage: Arc<dyn ObjectStorage>,
    audit: AuditTrail,
}

impl AccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(
        accounts: Arc<dyn RecordRepository<UserAccount>>,
        storage: Arc<dyn ObjectStorage>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            accounts,
            storage,
            audit,
        }
    }

    /// Returns the repository list fetches go through.
    #[must_use]
    pub fn records(&self) -> &dyn RecordRepository<UserAccount> {
        self.accounts.as_ref()
    }

    /// Reads one page of accounts.
    pub async fn list(
        &self,
        filter: &ListFilter,
        page: PageRequest,
    ) -> AppResult<ListPage<UserAccount>> {
        self.accounts.list(filter, page).await
    }

    /// Reads one account.
    pub async fn find(&self, account_id: &RecordId) -> AppResult<UserAccount> {
        self.accounts
            .find(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account '{account_id}' does not exist")))
    }

    /// Writes a new display name.
    pub async fn update_profile(
        &self,
        actor: &UserIdentity,
        account_id: &RecordId,
        name: NonEmptyString,
    ) -> AppResult<MutationReceipt<AccountChanges>> {
        let changes = AccountChanges {
            name: Some(name.into()),
            avatar_url: None,
        };
        self.accounts.update(account_id, changes.clone()).await?;

        let entry = AuditEntry::new(
            account_id.clone(),
            AuditKind::Account,
            "Updated account name",
            actor.subject(),
        );
        self.audit.seal(changes, entry).await
    }

    /// Writes a new lifecycle status.
    pub async fn set_status(
        &self,
        actor: &UserIdentity,
        account_id: &RecordId,
        status: RecordStatus,
    ) -> AppResult<MutationReceipt<RecordStatus>> {
        self.accounts.set_status(account_id, status).await?;
        info!(%account_id, status = status.as_str(), "account status changed");

        let entry = AuditEntry::new(
            account_id.clone(),
            AuditKind::Account,
            format!("Marked account as {}", status.as_str()),
            actor.subject(),
        );
        self.audit.seal(status, entry).await
    }

    /// Replaces the profile photo and returns its public URL.
    ///
    /// The file name is checked first; only then is every object already
    /// stored under the account's avatar folder removed and the new file
    /// uploaded.
    pub async fn replace_avatar(
        &self,
        actor: &UserIdentity,
        account_id: &RecordId,
        upload: AvatarUpload,
    ) -> AppResult<MutationReceipt<String>> {
        let extension = upload
            .file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension)
            .filter(|extension| !extension.is_empty())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "avatar file '{}' has no extension",
                    upload.file_name
                ))
            })?;
        let path = ObjectPath::new(
            ObjectPath::USER_AVATAR,
            account_id.as_str(),
            format!("{}.{extension}", generate_reference_code()),
        )?;

        let folder = ObjectPath::folder(ObjectPath::USER_AVATAR, account_id.as_str());
        let existing = self.storage.list(folder.as_str()).await?;
        if !existing.is_empty() {
            let paths: Vec<String> = existing
                .iter()
                .map(|name| format!("{folder}/{name}"))
                .collect();
            debug!(%account_id, count = paths.len(), "removing previous avatars");
            self.storage.remove(&paths).await?;
        }

        self.storage
            .upload(&path, upload.bytes, upload.content_type.as_str(), true)
            .await?;

        let avatar_url = self.storage.public_url(&path);
        self.accounts
            .update(
                account_id,
                AccountChanges {
                    name: None,
                    avatar_url: Some(avatar_url.clone()),
                },
            )
            .await?;

        let entry = AuditEntry::new(
            account_id.clone(),
            AuditKind::Account,
            "Updated profile photo",
            actor.subject(),
        );
        self.audit.seal(avatar_url, entry).await
    }
}
