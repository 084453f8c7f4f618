use clap::{Parser, Subcommand};
use serde_json::json;

use crate::auth::hash_password;
use crate::config::AppConfig;
use crate::database::{run_migrations, seed::seed_demo_data, DatabaseManager};

#[derive(Parser)]
#[command(name = "agency")]
#[command(about = "Agency CLI - server and database administration for the Agency API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve,

    #[command(about = "Apply the database schema")]
    Migrate,

    #[command(about = "Insert the default admin and starter services if absent")]
    Seed,

    #[command(about = "Print a bcrypt hash for a password")]
    HashPassword {
        #[arg(help = "Plaintext password to hash")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::HashPassword { password } => {
            let hash = hash_password(&password)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "hash": hash }))?);
            } else {
                println!("{}", hash);
            }
        }
        Commands::Serve => {
            let config = AppConfig::load()?;
            crate::server::serve(config).await?;
        }
        Commands::Migrate => {
            let config = AppConfig::load()?;
            let pool = DatabaseManager::connect(&config.database).await?;
            run_migrations(&pool).await?;
            print_message(cli.json, "Schema is up to date")?;
        }
        Commands::Seed => {
            let config = AppConfig::load()?;
            let pool = DatabaseManager::connect(&config.database).await?;
            run_migrations(&pool).await?;
            let report = seed_demo_data(&pool).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "✓ Seed complete (admin created: {}, services created: {})",
                    report.admin_created, report.services_created
                );
            }
        }
    }

    Ok(())
}

fn print_message(as_json: bool, message: &str) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&json!({ "message": message }))?);
    } else {
        println!("✓ {}", message);
    }
    Ok(())
}
