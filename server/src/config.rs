//! Configuration loaded from environment variables with sensible
//! defaults. A `.env` file is honored in development via `dotenvy`.

use std::env;
use std::path::PathBuf;
use tnt_mailer::SmtpConfig;
use tnt_pipeline::{CompanyIdentity, PipelineConfig};
use tnt_store::PostgresConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PostgreSQL` settings.
    pub postgres: PostgresConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// SMTP settings; `None` routes email to the console mailer.
    pub smtp: Option<SmtpConfig>,
    /// Confirmation-pipeline settings.
    pub pipeline: PipelineConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Prometheus exporter host.
    pub metrics_host: String,
    /// Prometheus exporter port.
    pub metrics_port: u16,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let postgres_defaults = PostgresConfig::default();
        let pipeline_defaults = PipelineConfig::default();
        let company_defaults = CompanyIdentity::default();

        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
            host,
            port: env_parse("SMTP_PORT", 587),
            username: env::var("SMTP_USERNAME").unwrap_or_default(),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
        });

        Self {
            postgres: PostgresConfig {
                url: env::var("DATABASE_URL").unwrap_or(postgres_defaults.url),
                max_connections: env_parse(
                    "DATABASE_MAX_CONNECTIONS",
                    postgres_defaults.max_connections,
                ),
                min_connections: env_parse(
                    "DATABASE_MIN_CONNECTIONS",
                    postgres_defaults.min_connections,
                ),
                connect_timeout: env_parse(
                    "DATABASE_CONNECT_TIMEOUT",
                    postgres_defaults.connect_timeout,
                ),
                idle_timeout: env_parse("DATABASE_IDLE_TIMEOUT", postgres_defaults.idle_timeout),
            },
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_parse("PORT", 8080),
                metrics_host: env::var("METRICS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                metrics_port: env_parse("METRICS_PORT", 9090),
            },
            smtp,
            pipeline: PipelineConfig {
                from_email: env::var("DEFAULT_FROM_EMAIL").unwrap_or(pipeline_defaults.from_email),
                operator_email: match env::var("HOST_EMAIL") {
                    Ok(value) if value.is_empty() => None,
                    Ok(value) => Some(value),
                    Err(_) => pipeline_defaults.operator_email,
                },
                assets_dir: env::var("ASSETS_DIR")
                    .map_or(pipeline_defaults.assets_dir, PathBuf::from),
                company: CompanyIdentity {
                    name: env::var("COMPANY_NAME").unwrap_or(company_defaults.name),
                    url: env::var("COMPANY_URL").unwrap_or(company_defaults.url),
                },
            },
        }
    }
}
