use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use backoffice_application::AuditPolicy;
use backoffice_core::{AppError, OrgId};
use backoffice_domain::AdminAllowList;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub base_url: Url,
    pub bucket: String,
    pub service_key: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    /// Shared secret the session proxy sends with every forwarded request.
    pub proxy_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub org_id: OrgId,
    pub administrators: AdminAllowList,
    pub storage: StorageConfig,
    pub audit_policy: AuditPolicy,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let proxy_secret = required_non_empty_env("PROXY_SHARED_SECRET")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let org_id = uuid::Uuid::parse_str(required_non_empty_env("ORG_ID")?.trim())
            .map(OrgId::from_uuid)
            .map_err(|error| AppError::Validation(format!("invalid ORG_ID: {error}")))?;

        let administrators =
            AdminAllowList::parse(env::var("SUPER_ADMINS").unwrap_or_default().as_str());

        let storage_url = required_non_empty_env("STORAGE_URL")?;
        let storage = StorageConfig {
            base_url: Url::parse(storage_url.trim())
                .map_err(|error| AppError::Validation(format!("invalid STORAGE_URL: {error}")))?,
            bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "rdt".to_owned()),
            service_key: required_non_empty_env("STORAGE_SERVICE_KEY")?,
        };

        let audit_policy = env::var("AUDIT_POLICY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| AuditPolicy::from_str(value.trim()))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            proxy_secret,
            api_host,
            api_port,
            org_id,
            administrators,
            storage,
            audit_policy,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
