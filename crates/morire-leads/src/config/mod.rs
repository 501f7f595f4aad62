use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_REGISTRATION_TABLE: &str = "registrations";
pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_RECIPIENT_LABEL: &str = "Admin";
pub const DEFAULT_INQUIRY_LATENCY_MS: u64 = 1500;
pub const DEFAULT_CONFIRMATION_REDIRECT_SECS: u64 = 4;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: Option<StoreConfig>,
    pub notifier: Option<NotifierConfig>,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let store = StoreConfig::from_env()?;
        if store.is_none() && environment == AppEnvironment::Production {
            return Err(ConfigError::MissingVar("SUPABASE_URL"));
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            store,
            notifier: NotifierConfig::from_env()?,
            site: SiteConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Supabase (PostgREST) record store holding registrations.
#[derive(Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
}

impl StoreConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(base_url) = optional_var("SUPABASE_URL") else {
            return Ok(None);
        };
        let api_key =
            optional_var("SUPABASE_ANON_KEY").ok_or(ConfigError::MissingVar("SUPABASE_ANON_KEY"))?;
        let table = optional_var("SUPABASE_TABLE")
            .unwrap_or_else(|| DEFAULT_REGISTRATION_TABLE.to_string());

        Ok(Some(Self {
            base_url,
            api_key,
            table,
        }))
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

/// EmailJS template used to alert staff about a new lead.
#[derive(Clone)]
pub struct NotifierConfig {
    pub api_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub recipient_label: String,
}

impl NotifierConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let service_id = optional_var("EMAILJS_SERVICE_ID");
        let template_id = optional_var("EMAILJS_TEMPLATE_ID");
        let public_key = optional_var("EMAILJS_PUBLIC_KEY");

        let (service_id, template_id, public_key) = match (service_id, template_id, public_key) {
            (None, None, None) => return Ok(None),
            (Some(service), Some(template), Some(key)) => (service, template, key),
            (None, _, _) => return Err(ConfigError::MissingVar("EMAILJS_SERVICE_ID")),
            (_, None, _) => return Err(ConfigError::MissingVar("EMAILJS_TEMPLATE_ID")),
            (_, _, None) => return Err(ConfigError::MissingVar("EMAILJS_PUBLIC_KEY")),
        };

        Ok(Some(Self {
            api_url: optional_var("EMAILJS_API_URL")
                .unwrap_or_else(|| DEFAULT_EMAILJS_API_URL.to_string()),
            service_id,
            template_id,
            public_key,
            private_key: optional_var("EMAILJS_PRIVATE_KEY"),
            recipient_label: optional_var("NOTIFY_RECIPIENT_LABEL")
                .unwrap_or_else(|| DEFAULT_RECIPIENT_LABEL.to_string()),
        }))
    }
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("api_url", &self.api_url)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"<redacted>")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("recipient_label", &self.recipient_label)
            .finish()
    }
}

/// Timings for the visitor-facing flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteConfig {
    pub inquiry_latency: Duration,
    pub confirmation_redirect: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            inquiry_latency: Duration::from_millis(DEFAULT_INQUIRY_LATENCY_MS),
            confirmation_redirect: Duration::from_secs(DEFAULT_CONFIRMATION_REDIRECT_SECS),
        }
    }
}

impl SiteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let inquiry_latency_ms = parse_u64("INQUIRY_LATENCY_MS", DEFAULT_INQUIRY_LATENCY_MS)?;
        let redirect_secs = parse_u64(
            "CONFIRMATION_REDIRECT_SECS",
            DEFAULT_CONFIRMATION_REDIRECT_SECS,
        )?;

        Ok(Self {
            inquiry_latency: Duration::from_millis(inquiry_latency_ms),
            confirmation_redirect: Duration::from_secs(redirect_secs),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber(name)),
        None => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar(&'static str),
    InvalidNumber(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar(name) => write!(f, "{name} must be set"),
            ConfigError::InvalidNumber(name) => {
                write!(f, "{name} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingVar(_)
            | ConfigError::InvalidNumber(_) => None,
        }
    }
}
