use clap::Parser;
use engine::ExpenseUseCase;
use migration::{Migrator, MigratorTrait};
use settings::{Args, Database, Settings};

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = Settings::new(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budget_manager={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    tracing::info!("Using {:?} storage", server.database);
    let use_case = build_use_case(&server.database).await?;

    let addr = format!("{}:{}", server.bind, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.inspect_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
    })?;

    server::run_with_listener(use_case, listener)
        .await
        .inspect_err(|err| tracing::error!("server failed: {err}"))?;

    Ok(())
}

async fn build_use_case(database: &Database) -> error::Result<ExpenseUseCase> {
    let Some(url) = database.url() else {
        return Ok(ExpenseUseCase::builder().build());
    };

    let db = sea_orm::Database::connect(url).await?;
    Migrator::up(&db, None).await?;
    Ok(ExpenseUseCase::builder().database(db).build())
}
