use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

/// Secret shipped as the default; start-up warns when it is still in use.
pub const DEFAULT_JWT_SECRET: &str = "replace-this-with-a-secure-key";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a user directly in the database
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "Admin")]
        name: String,
        #[arg(long, default_value = "admin")]
        role: String,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
    pub limits: LimitsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub uploads_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
    pub request_timeout_secs: u64,
    pub timeout_disabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `text` or `json`.
    pub format: String,
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl AppConfig {
    pub fn load() -> Result<(Self, Cli), config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<(Self, Cli), config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let config = Self::from_cli(&cli)?;
        Ok((config, cli))
    }

    /// Builds the layered configuration: defaults, file, environment, then CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("security.jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("security.token_ttl_minutes", 60 * 24)?
            .set_default("storage.database_url", "sqlite://fms.db")?
            .set_default("storage.max_connections", 5)?
            .set_default("storage.uploads_dir", "uploads/logos")?
            .set_default("limits.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("limits.request_timeout_secs", 30)?
            .set_default("limits.timeout_disabled", false)?
            .set_default("log.format", "text")?
            .set_default("log.filter", "info")?;

        // An explicit file must exist; ./config.* is picked up when present.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. FMS_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("FMS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(secret) = env::var("FMS_SECRET_KEY") {
            if !secret.trim().is_empty() {
                builder = builder.set_override("security.jwt_secret", secret)?;
            }
        }

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = &cli.database_url {
            builder = builder.set_override("storage.database_url", url.as_str())?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn uses_default_secret(&self) -> bool {
        self.security.jwt_secret == DEFAULT_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_admin_subcommand_defaults() {
        let cli = Cli::try_parse_from([
            "fms",
            "create-admin",
            "--email",
            "root@example.com",
            "--password",
            "hunter22",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::CreateAdmin {
                email: "root@example.com".to_string(),
                password: "hunter22".to_string(),
                name: "Admin".to_string(),
                role: "admin".to_string(),
            })
        );
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["fms"]).unwrap();
        assert!(cli.command.is_none());
    }
}
