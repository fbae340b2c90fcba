use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,

    #[serde(default = "default_true")]
    pub run_migrations: bool,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub session_secret: String,

    #[serde(default = "default_session_expiration")]
    pub session_expiration_minutes: i64,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default)]
    pub admin_username: Option<String>,

    #[serde(default)]
    pub admin_password: Option<String>,

    /// Zero keeps rendered pages until a write invalidates them.
    #[serde(default = "default_page_cache_ttl")]
    pub page_cache_ttl_secs: u64,

    #[serde(default)]
    pub skill_search_case_sensitive: bool,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Site".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_max_db_connections() -> u32 {
    10
}
fn default_true() -> bool {
    true
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_session_expiration() -> i64 {
    8 * 60
}
fn default_login_path() -> String {
    "/login".to_string()
}
fn default_page_cache_ttl() -> u64 {
    300
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            database_url: String::new(),
            max_db_connections: default_max_db_connections(),
            run_migrations: true,
            cors_allowed_origins: default_cors_origins(),
            session_secret: String::new(),
            session_expiration_minutes: default_session_expiration(),
            login_path: default_login_path(),
            admin_username: None,
            admin_password: None,
            page_cache_ttl_secs: default_page_cache_ttl(),
            skill_search_case_sensitive: false,
            log_format: default_log_format(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.session_secret.len() < 32 {
            errors.push("SESSION_SECRET must be at least 32 characters");
        }
        if self.session_expiration_minutes <= 0 {
            errors.push("SESSION_EXPIRATION_MINUTES must be positive");
        }
        if !self.login_path.starts_with('/') || self.login_path.starts_with("/admin") {
            errors.push("LOGIN_PATH must be an absolute path outside /admin");
        }
        if self.admin_username.is_some() != self.admin_password.is_some() {
            errors.push("ADMIN_USERNAME and ADMIN_PASSWORD must be set together");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn page_cache_ttl(&self) -> Option<std::time::Duration> {
        match self.page_cache_ttl_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }

    /// Seed credentials for the back office account, when both are configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("max_db_connections", &self.max_db_connections)
            .field("run_migrations", &self.run_migrations)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("session_secret", &self.session_secret.redact())
            .field("session_expiration_minutes", &self.session_expiration_minutes)
            .field("login_path", &self.login_path)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "[REDACTED]"))
            .field("page_cache_ttl_secs", &self.page_cache_ttl_secs)
            .field("skill_search_case_sensitive", &self.skill_search_case_sensitive)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl From<&AppConfig> for SessionKeys {
    fn from(config: &AppConfig) -> Self {
        let secret = Zeroizing::new(config.session_secret.clone());

        SessionKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/portfolio".into(),
            session_secret: "a_session_secret_that_is_long_enough_123".into(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn accepts_a_complete_configuration() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn rejects_short_session_secret() {
        let config = AppConfig {
            session_secret: "short".into(),
            ..valid_config()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("SESSION_SECRET"));
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let config = AppConfig {
            env: AppEnvironment::Production,
            ..valid_config()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            env: AppEnvironment::Production,
            cors_allowed_origins: vec!["https://example.com".into()],
            ..valid_config()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn admin_credentials_must_come_in_pairs() {
        let config = AppConfig {
            admin_username: Some("admin".into()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
        assert!(config.admin_credentials().is_none());
    }

    #[test]
    fn login_path_cannot_live_under_admin() {
        let config = AppConfig {
            login_path: "/admin/login".into(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn splits_comma_separated_origins() {
        let config = AppConfig {
            cors_allowed_origins: vec!["https://a.dev, https://b.dev".into(), " ".into()],
            ..valid_config()
        };
        assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn zero_ttl_disables_expiry() {
        let config = AppConfig {
            page_cache_ttl_secs: 0,
            ..valid_config()
        };
        assert!(config.page_cache_ttl().is_none());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = AppConfig {
            admin_username: Some("admin".into()),
            admin_password: Some("Sup3r$ecretPassw0rd".into()),
            ..valid_config()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("Sup3r$ecretPassw0rd"));
        assert!(!debug.contains("a_session_secret_that_is_long_enough_123"));
    }
}
