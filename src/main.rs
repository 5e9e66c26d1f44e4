use clap::Parser;
use color_eyre::Result;
use tracing::info;
use weeknotes::cli::{Cli, Commands};
use weeknotes::server::{self, AppState};
use weeknotes::utils::expand_path;
use weeknotes::{Config, Database, Profile, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(&expand_path(path), profile)?,
        None => Config::load_with_profile(profile)?,
    };

    logging::init(&config.log_filter)?;

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;
    info!(path = %db_path.display(), ?profile, "database opened");

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            let listener = server::bind(&addr).await?;
            server::serve(listener, AppState::new(db, config.week_start)).await?;
        }
        Commands::Add { text, date, category } => {
            weeknotes::cli::handle_add(text, date, category, &db)?;
        }
        Commands::Weeks => {
            weeknotes::cli::handle_weeks(&db, config.week_start)?;
        }
    }

    Ok(())
}
