use std::collections::BTreeMap;

use async_trait::async_trait;
use backoffice_application::ObjectStorage;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::ObjectPath;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory bucket keyed by full object path.
#[derive(Debug)]
pub struct InMemoryObjectStorage {
    public_base_url: String,
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl InMemoryObjectStorage {
    /// Creates an empty bucket whose public URLs start with `public_base_url`.
    #[must_use]
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_owned(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns every stored path in lexical order.
    pub async fn paths(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    /// Returns the content type and size of a stored object.
    pub async fn describe(&self, path: &str) -> Option<(String, usize)> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|object| (object.content_type.clone(), object.bytes.len()))
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn list(&self, folder: &str) -> AppResult<Vec<String>> {
        let prefix = format!("{}/", folder.trim_end_matches('/'));
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .filter_map(|path| path.strip_prefix(prefix.as_str()))
            .filter(|name| !name.contains('/'))
            .map(str::to_owned)
            .collect())
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> AppResult<()> {
        let key = path.to_string();
        let mut objects = self.objects.write().await;
        if !upsert && objects.contains_key(&key) {
            return Err(AppError::Conflict(format!("object '{key}' already exists")));
        }

        objects.insert(
            key,
            StoredObject {
                bytes,
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        format!("{}/{path}", self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use backoffice_application::ObjectStorage;
    use backoffice_domain::ObjectPath;

    use super::InMemoryObjectStorage;

    fn avatar(owner: &str, file_name: &str) -> ObjectPath {
        let Ok(path) = ObjectPath::new(ObjectPath::USER_AVATAR, owner, file_name) else {
            panic!("valid object path");
        };
        path
    }

    #[tokio::test]
    async fn list_returns_direct_children_only() {
        let storage = InMemoryObjectStorage::new("https://cdn.test/public/rdt/");
        for (owner, name) in [("u-1", "a.png"), ("u-1", "b.jpg"), ("u-2", "c.png")] {
            let uploaded = storage
                .upload(&avatar(owner, name), vec![1, 2], "image/png", false)
                .await;
            assert!(uploaded.is_ok());
        }

        let listed = storage.list("user_avatar/u-1").await.unwrap_or_default();
        assert_eq!(listed, vec!["a.png".to_owned(), "b.jpg".to_owned()]);
    }

    #[tokio::test]
    async fn upload_without_upsert_refuses_to_overwrite() {
        let storage = InMemoryObjectStorage::new("https://cdn.test");
        let path = avatar("u-1", "a.png");

        assert!(storage.upload(&path, vec![1], "image/png", false).await.is_ok());
        assert!(storage.upload(&path, vec![2], "image/png", false).await.is_err());
        assert!(storage.upload(&path, vec![3, 4], "image/png", true).await.is_ok());
        assert_eq!(
            storage.describe("user_avatar/u-1/a.png").await,
            Some(("image/png".to_owned(), 2))
        );
    }

    #[tokio::test]
    async fn public_url_joins_base_and_path() {
        let storage = InMemoryObjectStorage::new("https://cdn.test/public/rdt/");
        assert_eq!(
            storage.public_url(&avatar("u-9", "x.webp")),
            "https://cdn.test/public/rdt/user_avatar/u-9/x.webp"
        );
    }
}
