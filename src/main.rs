use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod auth;
mod config;
mod import;
mod models;
mod password;
mod reader;
mod report;
mod store;

#[derive(Parser)]
#[command(name = "member-import")]
#[command(about = "Bulk member importer with optional auth provisioning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a CSV export for problems without touching the store
    Validate {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Import members from a CSV export
    Import {
        #[arg(long)]
        csv: PathBuf,
        /// Skip auth provisioning, import member rows only
        #[arg(long)]
        skip_auth: bool,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { csv } => {
            let users = reader::read_users(&csv)?;
            println!("📂 Read {} users from {}.", users.len(), csv.display());

            let issues = reader::validate_users(&users);
            if issues.is_empty() {
                println!("✅ No issues found.");
            } else {
                for issue in &issues {
                    println!("❌ Row {} [{}]: {}", issue.row, issue.field, issue.message);
                }
                println!(
                    "Found {} issues across {} users.",
                    issues.len(),
                    users.len()
                );
            }
        }
        Commands::Import {
            csv,
            skip_auth,
            yes,
        } => {
            let config = config::Config::from_env()?;

            let users = reader::read_users(&csv)?;
            println!("📂 Read {} users from {}.", users.len(), csv.display());

            let auth_client = if skip_auth {
                None
            } else {
                let auth_config = config.auth.as_ref().context(
                    "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set, or pass --skip-auth",
                )?;
                Some(auth::AdminAuthClient::new(auth_config)?)
            };

            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await
                .context("failed to connect to Postgres")?;
            let store = store::PgMemberStore::new(pool);

            let mut reporter = report::ConsoleReporter;
            let outcome = if yes {
                import::run(
                    &store,
                    auth_client.as_ref(),
                    &users,
                    &mut import::AutoConfirm,
                    &mut reporter,
                )
                .await?
            } else {
                import::run(
                    &store,
                    auth_client.as_ref(),
                    &users,
                    &mut report::StdinPrompt,
                    &mut reporter,
                )
                .await?
            };

            match outcome {
                import::ImportOutcome::Aborted => {
                    println!("❌ Import cancelled, nothing was written.");
                }
                import::ImportOutcome::Completed(stats) => {
                    print!("{}", report::render_summary(&stats));
                    if let Some(advisory) = report::render_advisory(&stats) {
                        print!("{advisory}");
                    }
                }
            }
        }
    }

    Ok(())
}
