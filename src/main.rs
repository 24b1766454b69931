//! Othello AI command-line front end.
//!
//! ## Usage
//!
//! - `othello-ai` - Show a demo
//! - `othello-ai session` - Play through the text session on stdin/stdout
//! - `othello-ai selfplay` - Let two engines play a full game
//! - `othello-ai demo` - Compare both search variants on the opening

use std::io;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use othello_ai::constants::{DEFAULT_DEPTH, MAX_DEPTH};
use othello_ai::engine::Engine;
use othello_ai::game::GameState;
use othello_ai::heuristic::Strategy;
use othello_ai::playout::{RandomPlayer, play_engines, play_game};
use othello_ai::search::{Algorithm, Searcher};
use othello_ai::session::Session;

/// Othello AI: Minimax and alpha-beta search engine
#[derive(Parser)]
#[command(name = "othello-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info", global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine through the text session on stdin
    Session {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Let two players play a complete game
    Selfplay {
        /// Search variant for Black
        #[arg(long, value_enum, default_value_t = Algorithm::Minimax)]
        black: Algorithm,

        /// Search variant for White
        #[arg(long, value_enum, default_value_t = Algorithm::AlphaBeta)]
        white: Algorithm,

        /// Heuristic for Black
        #[arg(long, value_enum, default_value_t = Strategy::PieceCounter)]
        black_strategy: Strategy,

        /// Heuristic for White
        #[arg(long, value_enum, default_value_t = Strategy::PieceCounter)]
        white_strategy: Strategy,

        /// Search depth in plies for both engines
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,

        /// Board width and height
        #[arg(long, default_value_t = 8)]
        size: usize,

        /// Replace White by a random player seeded with this value
        #[arg(long)]
        random_white: Option<u64>,
    },
    /// Show the engine's choice on the opening with both search variants
    Demo {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Search variant
    #[arg(short, long, value_enum, default_value_t = Algorithm::AlphaBeta)]
    algorithm: Algorithm,

    /// Heuristic used to score positions
    #[arg(short, long, value_enum, default_value_t = Strategy::PieceCounter)]
    strategy: Strategy,

    /// Search depth in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
}

impl EngineArgs {
    fn build(&self) -> anyhow::Result<Engine> {
        build_engine(self.algorithm, self.strategy, self.depth)
    }
}

fn build_engine(algorithm: Algorithm, strategy: Strategy, depth: u32) -> anyhow::Result<Engine> {
    if !(1..=MAX_DEPTH).contains(&depth) {
        bail!("search depth must be within 1..={MAX_DEPTH}, got {depth}");
    }
    Ok(Engine::new(algorithm)
        .with_strategy(strategy.evaluator())
        .with_depth(depth))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.log_level);

    match cli.command {
        Some(Commands::Session { engine }) => {
            let mut session = Session::with_engine(engine.build()?);
            session
                .run(io::stdin().lock(), io::stdout())
                .context("session I/O failed")?;
        }
        Some(Commands::Selfplay {
            black,
            white,
            black_strategy,
            white_strategy,
            depth,
            size,
            random_white,
        }) => {
            let game = GameState::with_size(size, size)?;
            let mut black = build_engine(black, black_strategy, depth)?;
            let record = match random_white {
                Some(seed) => {
                    let mut white = RandomPlayer::with_seed(seed);
                    play_game(game, &mut black, &mut white)?
                }
                None => {
                    let mut white = build_engine(white, white_strategy, depth)?;
                    play_engines(game, &mut black, &mut white)?
                }
            };

            for (i, m) in record.moves.iter().enumerate() {
                println!("{:>3}. {:<5} {} nodes {}", i + 1, m.player, m.pos, m.nodes);
            }
            println!("\n{}", record.final_state);
            match record.winner() {
                Some(winner) => println!("{winner} wins ({} passes)", record.passes),
                None => println!("tie ({} passes)", record.passes),
            }
        }
        Some(Commands::Demo { engine }) => run_demo(engine.build()?, engine.strategy)?,
        None => {
            let strategy = Strategy::PieceCounter;
            run_demo(build_engine(Algorithm::AlphaBeta, strategy, DEFAULT_DEPTH)?, strategy)?
        }
    }

    Ok(())
}

fn run_demo(mut engine: Engine, strategy: Strategy) -> anyhow::Result<()> {
    println!("Othello AI: Minimax with alpha-beta pruning\n");

    let game = GameState::new();
    println!("{game}");
    println!("Legal moves: {:?}\n", game.possible_moves());

    let pos = engine.select_move(&game)?;
    println!(
        "{} chooses {pos} after {} simulated moves",
        engine.algorithm(),
        engine.positions_visited_last_move()
    );

    for line in compare_variants(&game, strategy, engine.depth()) {
        println!("{line}");
    }
    Ok(())
}

/// Search `game` with both variants and the given heuristic, one report line
/// per variant.
fn compare_variants(game: &GameState, strategy: Strategy, depth: u32) -> Vec<String> {
    let mut evaluator = strategy.evaluator();
    evaluator.configure(game.current_player(), game.opponent_player());
    [Algorithm::Minimax, Algorithm::AlphaBeta]
        .into_iter()
        .map(|algorithm| {
            let mut searcher = Searcher::new(evaluator.as_ref(), game.current_player());
            let result = searcher.run(algorithm, game, depth);
            info!(%algorithm, %strategy, score = result.score, nodes = searcher.nodes(), "search");
            format!(
                "{algorithm:<9} score {:>4} nodes {:>4} cutoffs {}",
                result.score,
                searcher.nodes(),
                searcher.cutoffs()
            )
        })
        .collect()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
