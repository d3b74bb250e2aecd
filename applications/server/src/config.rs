/// Server and consumer configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,

    #[serde(default = "default_queue")]
    pub queue: QueueSettings,

    #[serde(default = "default_mail")]
    pub mail: MailSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_access_token_age_secs")]
    pub access_token_age_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_like_count_ttl_secs")]
    pub like_count_ttl_secs: u64,

    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueSettings {
    /// Broker database; the catalog database when unset
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_export_queue")]
    pub export_queue: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_lease_secs")]
    pub lease_secs: u64,

    #[serde(default = "default_reconnect_backoff_secs")]
    pub reconnect_backoff_secs: u64,

    /// Deliveries attempted before a failing export is dropped
    #[serde(default = "default_max_deliveries")]
    pub max_deliveries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    Outbox,
    Relay,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailSettings {
    #[serde(default = "default_transport")]
    pub transport: MailTransport,

    #[serde(default = "default_from")]
    pub from: String,

    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,

    #[serde(default)]
    pub relay_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        // Override with environment variables, e.g. OPENMUSIC_AUTH__JWT_SECRET
        settings = settings.add_source(
            config::Environment::with_prefix("OPENMUSIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate everything the API server needs
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set OPENMUSIC_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.cache.like_count_ttl_secs == 0 {
            return Err(ServerError::Config(
                "cache.like_count_ttl_secs must be positive".to_string(),
            ));
        }

        self.validate_worker()
    }

    /// Validate the queue and mail sections, all the consumer needs
    pub fn validate_worker(&self) -> Result<()> {
        if self.queue.reconnect_backoff_secs == 0 {
            return Err(ServerError::Config(
                "queue.reconnect_backoff_secs must be positive".to_string(),
            ));
        }

        if self.queue.max_deliveries == 0 {
            return Err(ServerError::Config(
                "queue.max_deliveries must be at least 1".to_string(),
            ));
        }

        if self.mail.transport == MailTransport::Relay && self.mail.relay_url.is_none() {
            return Err(ServerError::Config(
                "mail.relay_url is required for the relay transport".to_string(),
            ));
        }

        Ok(())
    }

    pub fn queue_url(&self) -> &str {
        self.queue
            .url
            .as_deref()
            .unwrap_or(&self.storage.database_url)
    }

    pub fn like_count_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.like_count_ttl_secs)
    }

    pub fn lease(&self) -> Duration {
        Duration::from_secs(self.queue.lease_secs)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/openmusic.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        access_token_age_secs: default_access_token_age_secs(),
    }
}

fn default_access_token_age_secs() -> u64 {
    3600
}

fn default_cache() -> CacheSettings {
    CacheSettings {
        like_count_ttl_secs: default_like_count_ttl_secs(),
        max_capacity: default_max_capacity(),
    }
}

fn default_like_count_ttl_secs() -> u64 {
    1800
}

fn default_max_capacity() -> u64 {
    10_000
}

fn default_queue() -> QueueSettings {
    QueueSettings {
        url: None,
        export_queue: default_export_queue(),
        poll_interval_ms: default_poll_interval_ms(),
        lease_secs: default_lease_secs(),
        reconnect_backoff_secs: default_reconnect_backoff_secs(),
        max_deliveries: default_max_deliveries(),
    }
}

fn default_export_queue() -> String {
    openmusic_core::types::EXPORT_QUEUE.to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_lease_secs() -> u64 {
    300
}

fn default_reconnect_backoff_secs() -> u64 {
    5
}

fn default_max_deliveries() -> u32 {
    1
}

fn default_mail() -> MailSettings {
    MailSettings {
        transport: default_transport(),
        from: default_from(),
        outbox_dir: default_outbox_dir(),
        relay_url: None,
    }
}

fn default_transport() -> MailTransport {
    MailTransport::Outbox
}

fn default_from() -> String {
    "OpenMusic API".to_string()
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("./data/outbox")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            cache: default_cache(),
            queue: default_queue(),
            mail: default_mail(),
        }
    }
}
