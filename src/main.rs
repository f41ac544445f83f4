use anyhow::Context;
use clap::Parser;
use parking_board::utils::error::ErrorSeverity;
use parking_board::utils::logger;
use parking_board::{
    build_router, BoardConfig, CliConfig, Command, Fixture, ParkingBoard, ParkingError, Seeder,
    SqliteRepository,
};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet; the config decides its format.
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    logger::init_logger(
        cli.verbose,
        config.logging.level.as_deref(),
        cli.log_format(&config),
    );
    tracing::info!("Starting parking-board");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let outcome = match &cli.command {
        Command::Serve { .. } => serve(&config).await,
        Command::Seed { fixture, reset, .. } => seed(&config, fixture, *reset).await,
    };

    if let Err(e) = outcome {
        match e.downcast::<ParkingError>() {
            Ok(err) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
                let code = exit_code(&err);
                if code > 0 {
                    std::process::exit(code);
                }
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn exit_code(err: &ParkingError) -> i32 {
    match err.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn serve(config: &BoardConfig) -> anyhow::Result<()> {
    let repository = SqliteRepository::open(config.database_path())?;
    repository.ping().await?;
    tracing::info!("Database connection established ({})", config.database_path());

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let router = build_router(Arc::new(ParkingBoard::new(repository)));
    parking_board::http::serve(listener, router)
        .await
        .context("server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn seed(config: &BoardConfig, fixture_path: &Path, reset: bool) -> anyhow::Result<()> {
    tracing::info!("📁 Loading fixture from: {}", fixture_path.display());
    let fixture = Fixture::from_file(fixture_path)?;

    let repository = SqliteRepository::open(config.database_path())?;
    let report = Seeder::new(repository).seed(&fixture, reset).await?;

    println!(
        "✅ Seeded {} lots and {} spaces into {}",
        report.lots_created,
        report.spaces_created,
        config.database_path()
    );
    Ok(())
}
