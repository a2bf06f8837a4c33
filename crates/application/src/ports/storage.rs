use async_trait::async_trait;

use backoffice_core::AppResult;
use backoffice_domain::ObjectPath;

/// Port for the binary object store.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Lists file names directly under a `<category>/<owner-id>` folder.
    async fn list(&self, folder: &str) -> AppResult<Vec<String>>;

    /// Removes objects by full path in one call.
    async fn remove(&self, paths: &[String]) -> AppResult<()>;

    /// Uploads bytes to a path, replacing an existing object when `upsert` is set.
    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> AppResult<()>;

    /// Returns the public URL of an object.
    fn public_url(&self, path: &ObjectPath) -> String;
}
