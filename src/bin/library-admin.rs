//! Administrative commands for the library server

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use library_server::{
    config::AppConfig, repository::Repository, services::employees::EmployeesService,
};

#[derive(Parser)]
#[command(name = "library-admin", version, about = "Library server administration")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the first employee account, or reset its password
    InitAdmin {
        /// Admin username
        #[arg(long)]
        username: String,
        /// Admin password
        #[arg(long, env = "LIBRARY_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        /// Database URL (defaults to the server configuration)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::InitAdmin {
            username,
            password,
            database_url,
        } => {
            if username.is_empty() || password.is_empty() {
                anyhow::bail!("--username and --password must not be empty");
            }

            let url = match database_url {
                Some(url) => url,
                None => {
                    let config = AppConfig::read().context("unable to load configuration")?;
                    config.database.url
                }
            };

            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(&url)
                .await
                .context("unable to connect to postgres")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("unable to run database migrations")?;

            let employees = EmployeesService::new(Repository::new(pool.clone()));
            let id = employees
                .init_admin(&username, &password)
                .await
                .context("unable to initialize admin")?;

            pool.close().await;
            println!("admin user initialized successfully ({})", id);
        }
    }

    Ok(())
}
