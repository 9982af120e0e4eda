use serde::Deserialize;

/// Configuration options for the supplier intake service.
///
/// Loaded from an optional `config.yaml` next to the binary, with
/// `APP__`-prefixed environment variables taking precedence
/// (e.g. `APP__DATABASE_URL`, `APP__SMTP__HOST`).
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub database_url: String,
    pub storage: StorageConfig,
    pub smtp: SmtpConfig,
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// Which object-storage backend holds uploaded files.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// S3 or an S3-compatible provider (custom endpoint, path-style keys).
    S3 {
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    },
    /// Local filesystem, served from `base_url`.
    Local { base_path: String, base_url: String },
}

/// SMTP transport settings for outgoing notification email.
#[derive(Clone, Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upgrade the connection with STARTTLS instead of plain SMTP.
    #[serde(default = "default_true")]
    pub starttls: bool,
}

/// Sender and recipient addresses for submission notifications.
#[derive(Clone, Debug, Deserialize)]
pub struct NotificationConfig {
    pub from: String,
    pub internal_recipients: Vec<String>,
}

/// Per-client submission throttling.
#[derive(Clone, Debug, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_submissions")]
    pub max_submissions: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_submissions: default_max_submissions(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_max_submissions() -> u32 {
    3
}

fn default_window_secs() -> u64 {
    3600
}
