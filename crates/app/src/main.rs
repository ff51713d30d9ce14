use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_app::config::DungeonConfig;
use dungeon_app::format_seed;
use dungeon_app::seed::{choose_seed, generate_runtime_seed};
use dungeon_app::session::{RacingSource, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Explore a freshly generated dungeon: find the sword, defeat the enemy,
/// take the key and reach the stairs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rows of every dungeon; asked interactively when unset
    #[arg(long)]
    rows: Option<usize>,
    /// Columns of every dungeon; asked interactively when unset
    #[arg(long)]
    columns: Option<usize>,
    /// Generation workers raced per dungeon
    #[arg(short, long)]
    workers: Option<usize>,
    /// Run seed, for repeatable dungeons
    #[arg(short, long)]
    seed: Option<u64>,
    /// Give up after this many generation attempts per worker
    #[arg(long)]
    max_attempts: Option<u32>,
    /// Config file to use instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> DungeonConfig {
        DungeonConfig {
            rows: self.rows,
            columns: self.columns,
            workers: self.workers,
            seed: self.seed,
            max_attempts: self.max_attempts,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_file_config(explicit: Option<&Path>) -> Result<DungeonConfig> {
    match explicit {
        Some(path) => DungeonConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => match DungeonConfig::default_path() {
            Some(path) => DungeonConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config file: {}", path.display())),
            None => Ok(DungeonConfig::default()),
        },
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let file_config = load_file_config(args.config.as_deref())?;
    let file_seed = file_config.seed;
    let settings = file_config
        .overridden_by(args.overrides())
        .resolve()
        .context("Invalid dungeon settings")?;
    let seed = choose_seed(args.seed, file_seed, generate_runtime_seed());
    info!(
        seed = %format_seed(seed.value()),
        source = seed.source(),
        workers = settings.workers,
        "starting session"
    );

    let source = RacingSource::new(settings.workers, seed.value(), settings.budget);
    let mut session =
        Session::new(io::stdin().lock(), io::stdout().lock(), source, settings.dimensions);
    let summary = session.run()?;

    info!(rounds = summary.rounds, wins = summary.wins, losses = summary.losses, "session over");
    Ok(())
}
