use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Manage the expenses schema")]
struct Args {
    /// Database to migrate (any sea-orm URL).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./budget.db?mode=rwc")]
    database_url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Apply every pending migration (default).
    Up,
    /// Roll back the last applied migration.
    Down,
    /// Drop all tables and re-apply every migration.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let db = Database::connect(&args.database_url).await?;

    match args.command.unwrap_or(Command::Up) {
        Command::Up => migration::Migrator::up(&db, None).await?,
        Command::Down => migration::Migrator::down(&db, Some(1)).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
