use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use mailbox_chess::engines::engine_minimax::MinimaxEngine;
use mailbox_chess::engines::engine_trait::{Engine, GoParams};
use mailbox_chess::game::session::{GameMode, GameSession, MoveOutcome, SessionConfig};
use mailbox_chess::game_state::chess_rules::{DEFAULT_SEARCH_DEPTH, STARTING_POSITION_FEN};
use mailbox_chess::game_state::game_state::GameState;
use mailbox_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use mailbox_chess::move_generation::perft::{perft, perft_divide, perft_multi_threaded};
use mailbox_chess::utils::render_game_state::render_game_state;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mailbox chess rules engine and minimax player", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(short, long)]
        depth: u8,
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        /// Print per-root-move counts
        #[arg(long)]
        divide: bool,
        /// Count root moves on worker threads when greater than 1
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Search a position and print the chosen move
    Bestmove {
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: u8,
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 1)]
        threads: usize,
        /// Stop searching after this many milliseconds
        #[arg(long)]
        movetime: Option<u64>,
    },
    /// Let the engine play a game and print every position
    Selfplay {
        /// hvh, ai-black, ai-white or ai-both
        #[arg(long, default_value = "ai-both")]
        mode: GameMode,
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: u8,
        #[arg(long, default_value_t = 80)]
        max_plies: u32,
        /// Seed for the random fallback picker
        #[arg(long)]
        seed: Option<u64>,
        /// Sleep for the configured think delay before each engine move
        #[arg(long)]
        think: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    match args.command {
        Command::Perft {
            depth,
            fen,
            divide,
            threads,
        } => run_perft(&fen, depth, divide, threads),
        Command::Bestmove {
            depth,
            fen,
            threads,
            movetime,
        } => run_bestmove(&fen, depth, threads, movetime),
        Command::Selfplay {
            mode,
            depth,
            max_plies,
            seed,
            think,
        } => run_selfplay(mode, depth, max_plies, seed, think),
    }
}

fn parse_position(fen: &str) -> Result<GameState> {
    GameState::from_fen(fen).with_context(|| format!("could not set up position '{fen}'"))
}

fn run_perft(fen: &str, depth: u8, divide: bool, threads: usize) -> Result<()> {
    let game_state = parse_position(fen)?;
    let started = Instant::now();

    if divide {
        let mut total = 0;
        for (mv, counts) in perft_divide(&LegalMoveGenerator, &game_state, depth) {
            println!("{mv}: {}", counts.nodes);
            total += counts.nodes;
        }
        println!("\nNodes searched: {total}");
        return Ok(());
    }

    let counts = if threads > 1 {
        perft_multi_threaded(Arc::new(LegalMoveGenerator), &game_state, depth)
    } else {
        perft(&LegalMoveGenerator, &game_state, depth)
    };
    let elapsed = started.elapsed();

    println!("{counts:#?}");
    info!(
        "perft depth {depth}: {} nodes in {:.3}s",
        counts.nodes,
        elapsed.as_secs_f64()
    );
    Ok(())
}

fn run_bestmove(fen: &str, depth: u8, threads: usize, movetime: Option<u64>) -> Result<()> {
    let game_state = parse_position(fen)?;
    let params = GoParams {
        depth: Some(depth),
        movetime_ms: movetime,
        threads: Some(threads),
    };

    let output = MinimaxEngine::new().choose_move(&game_state, &params)?;
    for line in &output.info_lines {
        println!("{line}");
    }
    match output.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    Ok(())
}

fn run_selfplay(mode: GameMode, depth: u8, max_plies: u32, seed: Option<u64>, think: bool) -> Result<()> {
    let config = SessionConfig {
        mode,
        search_depth: depth,
        seed,
        ..SessionConfig::default()
    };
    let mut session = GameSession::new(config);
    println!("{}\n", render_game_state(session.game_state()));

    for _ in 0..max_plies {
        if !session.status().engine_to_move() {
            break;
        }
        if think {
            thread::sleep(session.config().think_delay);
        }

        if let MoveOutcome::Applied { mv, status } = session.play_engine_move()? {
            println!("{mv}  {status}");
            println!("{}\n", render_game_state(session.game_state()));
        }
    }

    println!("{}", session.status());
    Ok(())
}
