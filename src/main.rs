//! Mailbox Chess - command line driver
//!
//! Usage:
//!     mailbox_chess [--layout <LAYOUT>] [--moves e2-e4,e7-e5] [--depth 3]
//!
//! Builds a position, replays the given moves, then prints the board and the
//! engine's choice for the side to move. Set `RUST_LOG=debug` to see root
//! move scores.

use clap::Parser;
use log::{info, warn};

use mailbox_chess::notation::parse_move;
use mailbox_chess::{
    Color, EngineConfig, EngineResult, MobilityMode, MoveGenerator, Position, SearchEngine,
    STARTING_LAYOUT,
};

#[derive(Parser, Debug)]
#[command(name = "mailbox_chess", about = "Search a chess position for the best move")]
struct Args {
    /// Piece placement, rank 8 first
    #[arg(long, default_value = STARTING_LAYOUT)]
    layout: String,

    /// Side to move before any replayed moves: white or black
    #[arg(long, default_value = "white", value_parser = parse_color)]
    color: Color,

    /// Comma separated moves to play first, e.g. e2-e4,e7-e5
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Search depth in plies
    #[arg(long, default_value_t = EngineConfig::default().depth)]
    depth: u32,

    /// Mobility term: per-square or per-side
    #[arg(long, default_value = "per-square")]
    mobility: MobilityMode,

    /// Disable alpha-beta cutoffs
    #[arg(long)]
    no_pruning: bool,
}

fn parse_color(text: &str) -> Result<Color, String> {
    match text.to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(Color::White),
        "black" | "b" => Ok(Color::Black),
        other => Err(format!("unknown color '{other}'")),
    }
}

fn run(args: Args) -> EngineResult<()> {
    let config = EngineConfig {
        depth: args.depth,
        mobility: args.mobility,
        alpha_beta: !args.no_pruning,
    };
    config.validate()?;

    let mut position = Position::from_layout(&args.layout)?;
    let generator = MoveGenerator::new();
    let mut color = args.color;

    for text in &args.moves {
        let bare = parse_move(text, color)?;
        let mut mv = generator.resolve(&mut position, &bare).inspect_err(|err| {
            warn!("rejected {text} for {color}: {err}");
        })?;
        position.apply(&mut mv)?;
        color = color.opponent();
    }
    position.update_attacked_fields();

    println!("{position}");
    println!();

    let mut engine = SearchEngine::new(config);
    let outcome = engine.find_best_move(&mut position, config.depth, color)?;
    info!(
        "depth {} nodes {} score {}",
        config.depth, outcome.nodes, outcome.score
    );
    println!("{color} plays {} (score {})", outcome.best_move, outcome.score);

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
