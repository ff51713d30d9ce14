use anyhow::{Context, Result, ensure};
use clap::Parser;
use dungeon_core::mapgen::{GenerationBudget, generate_seeded, mix_seed_stream};
use dungeon_core::{CellKind, Dimensions, Direction, Game, GameStatus, Tile};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Levels to generate and walk
    #[arg(short, long, default_value_t = 100)]
    levels: u64,
    /// Random moves tried per level
    #[arg(long, default_value_t = 200)]
    steps: u32,
    #[arg(short, long, default_value_t = 5)]
    rows: usize,
    #[arg(short, long, default_value_t = 5)]
    columns: usize,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn check_invariants(game: &Game) -> Result<()> {
    let grid = game.grid();
    let player = game.player();

    ensure!(grid.count(Tile::Marker) == 1, "exactly one marker expected:\n{grid}");
    ensure!(grid[player.pos] == Tile::Marker, "marker is not under the player:\n{grid}");
    ensure!(game.original()[player.pos] != CellKind::Wall, "player inside a wall");
    for kind in CellKind::GATING {
        ensure!(grid.count(Tile::Cell(kind)) <= 1, "{kind:?} duplicated:\n{grid}");
    }
    if game.status() == GameStatus::Won {
        ensure!(player.has_key, "won without the key");
        ensure!(game.original()[player.pos] == CellKind::Stairs, "won away from the stairs");
    }
    ensure!(player.done == (game.status() != GameStatus::Ongoing), "done flag out of sync");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let dimensions = Dimensions::new(args.rows, args.columns)?;

    println!(
        "Starting fuzz harness on seed {} for {} level(s) of {} step(s)...",
        args.seed, args.levels, args.steps
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let (mut won, mut lost, mut unfinished) = (0_u64, 0_u64, 0_u64);

    for index in 0..args.levels {
        let level_seed = mix_seed_stream(args.seed, index);
        let generation = generate_seeded(dimensions, level_seed, GenerationBudget::Unbounded)
            .with_context(|| format!("generation failed for level seed {level_seed}"))?;
        let original = generation.level.original().clone();
        let mut game = Game::new(generation.level);

        for _ in 0..args.steps {
            let before = game.render();
            let turn = game.step(choose(&mut rng, &Direction::SEARCH_ORDER));
            check_invariants(&game)
                .with_context(|| format!("invariant broken on level seed {level_seed}"))?;
            ensure!(turn.moved || turn.board == before, "board changed without a move");
            if turn.status != GameStatus::Ongoing {
                break;
            }
        }
        ensure!(game.original() == &original, "original layout was modified");

        match game.status() {
            GameStatus::Won => won += 1,
            GameStatus::Lost => lost += 1,
            GameStatus::Ongoing => unfinished += 1,
        }
    }

    println!("Won: {won}, lost: {lost}, unfinished: {unfinished}");
    println!("Fuzzing completed successfully.");
    Ok(())
}
