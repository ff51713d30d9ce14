use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dungeon_core::mapgen::{generate_seeded, inspect, race_generation};
use dungeon_core::{CellKind, Dimensions, GeneratedLevel, GenerationBudget, Grid, Pos};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a solvable dungeon and print it with its statistics
    Generate {
        #[arg(short, long, default_value_t = 6)]
        rows: usize,
        #[arg(short, long, default_value_t = 6)]
        columns: usize,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Race this many workers; a single worker is fully deterministic
        #[arg(short, long, default_value_t = 1)]
        workers: usize,
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Also write the JSON export to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the reachability check on a layout file in the rendered text form
    Inspect {
        layout: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct GatingCell {
    kind: CellKind,
    pos: Pos,
}

#[derive(Serialize)]
struct LevelExport {
    rows: usize,
    columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    worker: Option<usize>,
    solvable: bool,
    explored: usize,
    fingerprint: String,
    gating: Vec<GatingCell>,
    layout: Vec<String>,
}

impl LevelExport {
    fn from_level(level: &GeneratedLevel) -> Self {
        let original = level.original();
        let report = inspect(original);
        Self {
            rows: original.rows(),
            columns: original.columns(),
            seed: None,
            attempts: None,
            worker: None,
            solvable: report.solvable,
            explored: report.explored,
            fingerprint: format!("0x{:016x}", level.fingerprint()),
            gating: level
                .gating_positions()
                .into_iter()
                .map(|(kind, pos)| GatingCell { kind, pos })
                .collect(),
            layout: original.to_string().lines().map(str::to_owned).collect(),
        }
    }

    fn print_report(&self) {
        println!("{}", self.layout.join("\n"));
        println!();
        println!("Size: {}x{}", self.rows, self.columns);
        if let Some(seed) = self.seed {
            println!("Seed: {seed}");
        }
        if let (Some(attempts), Some(worker)) = (self.attempts, self.worker) {
            println!("Attempts: {attempts} (worker {worker})");
        }
        println!("Solvable: {}", self.solvable);
        println!("Explored: {} cell(s)", self.explored);
        println!("Fingerprint: {}", self.fingerprint);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn emit(export: &LevelExport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(export).context("Failed to serialize level")?;
        println!("{text}");
    } else {
        export.print_report();
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Generate { rows, columns, seed, workers, max_attempts, json, output } => {
            let dimensions = Dimensions::new(rows, columns)?;
            let budget =
                max_attempts.map_or(GenerationBudget::Unbounded, GenerationBudget::Attempts);
            let generation = if workers == 1 {
                generate_seeded(dimensions, seed, budget)
            } else {
                race_generation(dimensions, workers, seed, budget)
            }
            .context("Generation failed")?;
            info!(
                attempts = generation.attempts,
                worker = generation.worker,
                "generation finished"
            );

            let mut export = LevelExport::from_level(&generation.level);
            export.seed = Some(seed);
            export.attempts = Some(generation.attempts);
            export.worker = Some(generation.worker);

            if let Some(path) = output {
                let text =
                    serde_json::to_string_pretty(&export).context("Failed to serialize level")?;
                fs::write(&path, text)
                    .with_context(|| format!("Failed to write level file: {}", path.display()))?;
                info!(path = %path.display(), "level written");
            }
            emit(&export, json)
        }
        Command::Inspect { layout, json } => {
            let text = fs::read_to_string(&layout)
                .with_context(|| format!("Failed to read layout file: {}", layout.display()))?;
            let grid: Grid<CellKind> = text
                .parse()
                .with_context(|| format!("Failed to parse layout file: {}", layout.display()))?;
            emit(&LevelExport::from_level(&GeneratedLevel::from_layout(grid)), json)
        }
    }
}
