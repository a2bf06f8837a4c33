use async_trait::async_trait;
use backoffice_application::ObjectStorage;
use backoffice_core::{AppError, AppResult};
use backoffice_domain::ObjectPath;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const LIST_PAGE_LIMIT: u32 = 100;

/// Object storage adapter for a bucket exposed over the storage REST API.
#[derive(Clone)]
pub struct HttpObjectStorage {
    http_client: reqwest::Client,
    base_url: Url,
    bucket: String,
    service_key: String,
}

#[derive(Debug, Serialize)]
struct ListObjectsRequest<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u32,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
}

#[derive(Debug, Serialize)]
struct RemoveObjectsRequest<'a> {
    prefixes: &'a [String],
}

impl HttpObjectStorage {
    /// Creates a storage adapter for one bucket.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        mut base_url: Url,
        bucket: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(path.as_str());
        }

        Self {
            http_client,
            base_url,
            bucket: bucket.into(),
            service_key: service_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Internal(format!("invalid storage endpoint '{path}': {error}"))
        })
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(self.service_key.as_str())
            .header("apikey", self.service_key.as_str())
    }

    async fn send(&self, builder: reqwest::RequestBuilder, action: &str) -> AppResult<reqwest::Response> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("failed to {action}: {error}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(AppError::Conflict(format!("failed to {action}: {body}")));
        }

        Err(AppError::Internal(format!(
            "failed to {action}: storage responded with {status}: {body}"
        )))
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn list(&self, folder: &str) -> AppResult<Vec<String>> {
        let url = self.endpoint(format!("storage/v1/object/list/{}", self.bucket).as_str())?;
        let request = self.http_client.post(url).json(&ListObjectsRequest {
            prefix: folder,
            limit: LIST_PAGE_LIMIT,
            offset: 0,
        });

        let objects: Vec<ListedObject> = self
            .send(request, "list storage objects")
            .await?
            .json()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to decode storage listing: {error}"))
            })?;

        Ok(objects.into_iter().map(|object| object.name).collect())
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let url = self.endpoint(format!("storage/v1/object/{}", self.bucket).as_str())?;
        let request = self
            .http_client
            .delete(url)
            .json(&RemoveObjectsRequest { prefixes: paths });
        self.send(request, "remove storage objects").await?;

        debug!(count = paths.len(), "removed storage objects");
        Ok(())
    }

    async fn upload(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> AppResult<()> {
        let url = self.endpoint(format!("storage/v1/object/{}/{path}", self.bucket).as_str())?;
        let request = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);
        self.send(request, "upload storage object").await?;

        debug!(%path, "uploaded storage object");
        Ok(())
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        format!(
            "{}storage/v1/object/public/{}/{path}",
            self.base_url, self.bucket
        )
    }
}

#[cfg(test)]
mod tests {
    use backoffice_application::ObjectStorage;
    use backoffice_domain::ObjectPath;
    use url::Url;

    use super::HttpObjectStorage;

    #[test]
    fn public_url_points_at_the_public_bucket_route() {
        let Ok(base_url) = Url::parse("https://project.storage.test") else {
            panic!("valid url");
        };
        let storage = HttpObjectStorage::new(reqwest::Client::new(), base_url, "rdt", "key");
        let Ok(path) = ObjectPath::new(ObjectPath::USER_AVATAR, "u-1", "ABC.png") else {
            panic!("valid path");
        };

        assert_eq!(
            storage.public_url(&path),
            "https://project.storage.test/storage/v1/object/public/rdt/user_avatar/u-1/ABC.png"
        );
    }

    #[test]
    fn base_path_is_kept_when_joining_endpoints() {
        let Ok(base_url) = Url::parse("https://gateway.test/supabase") else {
            panic!("valid url");
        };
        let storage = HttpObjectStorage::new(reqwest::Client::new(), base_url, "rdt", "key");

        let endpoint = storage.endpoint("storage/v1/object/rdt");
        assert_eq!(
            endpoint.map(|url| url.to_string()).unwrap_or_default(),
            "https://gateway.test/supabase/storage/v1/object/rdt"
        );
    }
}
