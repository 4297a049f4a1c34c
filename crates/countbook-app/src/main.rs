// countbook entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, not terminal)
// 4. Open the database and run the command

use countbook_app::app;
use countbook_app::cli::Cli;
use countbook_app::config::{self, LoggingConfig};
use countbook_store::PitchDatabase;

use anyhow::Context;
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config().context("failed to load configuration")?;

    init_tracing(&config.logging)?;
    info!("countbook starting up");

    let db_path = cli.db.clone().unwrap_or_else(|| config.db_path.clone());
    let mut db = PitchDatabase::open(&db_path).context("failed to open database")?;
    info!("Database opened at {}", db_path);

    let output = app::run(cli.command, &mut db, &config)?;
    println!("{output}");

    info!("countbook finished");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::path::Path::new(&logging.dir);
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("countbook.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
