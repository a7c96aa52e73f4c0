use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use judge::{play_game, GameResult, GameSetup, Recorder, RegionConfig};
use pursuit::{visualize_graph, GraphEditor, GridGraph, PlacementOrder, PursuerCount};
use pursuit_bots::{ColumnGuardStrategy, GreedyChaser, PursuerControl, RandomWalker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Two pursuers sweeping the region column by column
    ColumnGuard,
    /// Every pursuer walks straight towards the evader
    Greedy,
}

#[derive(Parser)]
struct Args {
    /// Number of rows of the grid
    #[arg(long, default_value_t = 8)]
    rows: usize,

    /// Number of columns of the grid
    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Remove this many random border cells from the grid, keeping it connected
    #[arg(long, default_value_t = 0)]
    erode: usize,

    /// Load the region from this JSON file instead (overrides --rows, --cols and --erode)
    #[arg(long)]
    region: Option<PathBuf>,

    /// The pursuers' strategy
    #[arg(long, value_enum, default_value_t = Strategy::ColumnGuard)]
    strategy: Strategy,

    /// Number of pursuers, 1 or 2 (the column guard strategy needs 2)
    #[arg(long, default_value_t = 2)]
    pursuers: usize,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Turns after which the evader is considered to have escaped
    #[arg(long, default_value_t = 500)]
    max_turns: usize,

    /// Record the snapshots of each game as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Score {
    captures: usize,
    escapes: usize,
    illegal_moves: usize,
    capture_turns: usize,
}

fn build_region(args: &Args, rng: &mut StdRng) -> anyhow::Result<GridGraph> {
    if let Some(path) = &args.region {
        return RegionConfig::load(path)?.build();
    }
    let mut editor = GraphEditor::new(args.rows, args.cols)?;
    let removed = editor.erode_randomly(rng, args.erode);
    if removed < args.erode {
        warn!(requested = args.erode, removed, "Could not erode as many cells as requested");
    }
    Ok(editor.finish())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let pursuer_count = PursuerCount::try_from(args.pursuers)?;
    if args.strategy == Strategy::ColumnGuard && pursuer_count != PursuerCount::Two {
        anyhow::bail!("The column guard strategy needs two pursuers");
    }

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory.clone() {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let graph = build_region(&args, &mut rng)?;
    info!(nodes = graph.len(), "Region ready");
    debug!("\n{}", visualize_graph(&graph, &[]));

    let setup = GameSetup {
        pursuers: pursuer_count,
        order: PlacementOrder::EvaderFirst,
        max_turns: args.max_turns,
    };
    let mut pursuers: Box<dyn PursuerControl> = match args.strategy {
        Strategy::ColumnGuard => Box::new(ColumnGuardStrategy::new()),
        Strategy::Greedy => Box::new(GreedyChaser::from_seed(rng.gen())),
    };
    let mut evader = RandomWalker::from_seed(rng.gen());

    let mut score = Score::default();
    for game_idx in 0..args.num_games {
        match play_game(
            graph.clone(),
            setup,
            pursuers.as_mut(),
            &mut evader,
            &mut recorder,
        )? {
            GameResult::Captured { pursuer, turns } => {
                debug!(game_idx, pursuer, turns, "Captured");
                score.captures += 1;
                score.capture_turns += turns;
            }
            GameResult::Escaped { turns } => {
                debug!(game_idx, turns, "Escaped");
                score.escapes += 1;
            }
            GameResult::IllegalMoveBy { role, err } => {
                info!(%role, game_idx, "Illegal move");
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                score.illegal_moves += 1;
            }
        }
    }

    let mean_capture_turn = if score.captures > 0 {
        format!("{:.1}", score.capture_turns as f64 / score.captures as f64)
    } else {
        String::from("N/A")
    };
    eprintln!(
        "End result:\n- {} captures (mean turn {})\n- {} escapes\n- {} illegal moves",
        score.captures, mean_capture_turn, score.escapes, score.illegal_moves
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
