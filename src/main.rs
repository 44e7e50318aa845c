//! FMS server entry point.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fms::AppState;
use fms::auth::hash_password;
use fms::config::{AppConfig, Command, LogConfig};
use fms::db::Database;
use fms::db::models::Role;
use fms::db::repository::UserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let (config, cli) = match AppConfig::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.log);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = AppState::new(config).await?;
            fms::server::start_server(state).await
        }
        Command::CreateAdmin {
            email,
            password,
            name,
            role,
        } => create_admin(&config, &email, &password, &name, &role).await,
    }
}

/// Initialize tracing (M-LOG-STRUCTURED). `RUST_LOG` wins over `log.filter`.
fn init_tracing(log: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if log.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn create_admin(
    config: &AppConfig,
    email: &str,
    password: &str,
    name: &str,
    role: &str,
) -> anyhow::Result<()> {
    let role: Role = role.parse().map_err(anyhow::Error::msg)?;

    let db = Database::connect(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await
    .context("failed to open database")?;

    let password_hash = hash_password(password)?;
    let Some(user) = UserRepository::create(db.pool(), name, email, &password_hash, role).await?
    else {
        println!("User already exists with that email.");
        return Ok(());
    };

    info!(name: "user.created", email = %user.email, role = %role, "User created");
    println!("Created {role} user {}", user.email);
    Ok(())
}
