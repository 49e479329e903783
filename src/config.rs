use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub app_env: String,
    pub db_max_connections: u32,

    // Startup
    pub auto_migrate: bool,
    pub seed_employees: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            server_addr: text("SERVER_ADDR", "127.0.0.1:8080"),
            app_env: text("APP_ENV", "development"),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            auto_migrate: parsed(&lookup, "AUTO_MIGRATE", true)?,
            seed_employees: parsed(&lookup, "SEED_EMPLOYEES", 0)?,
            log_dir: text("LOG_DIR", "logs"),
        })
    }

    /// Swagger UI is only served in development.
    pub fn swagger_enabled(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
