//! Colorfall: a flood-fill match puzzle in the terminal.
//!
//! ## Usage
//!
//! - `colorfall` - Play a demo game with a scripted player
//! - `colorfall play` - Read commands from stdin (see `console`)
//! - `colorfall demo --greedy` - Demo with the greedy player

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use colorfall::autoplay::{Strategy, play_out};
use colorfall::config::SessionConfig;
use colorfall::console::Console;
use colorfall::constants::{DEFAULT_COLORS, DEFAULT_COLS, DEFAULT_MOVES, DEFAULT_ROWS};
use colorfall::hud::Hud;
use colorfall::palette::Palette;
use colorfall::session::Session;

/// Colorfall: a flood-fill match puzzle
#[derive(Parser)]
#[command(name = "colorfall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Log every move to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GameArgs {
    /// Number of rows
    #[arg(long, global = true, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of columns
    #[arg(long, global = true, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Move budget
    #[arg(long, global = true, default_value_t = DEFAULT_MOVES)]
    moves: u32,

    /// Number of distinct colors
    #[arg(long, global = true, default_value_t = DEFAULT_COLORS)]
    colors: u32,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pause after each match and before game over, in milliseconds
    #[arg(long, global = true, default_value_t = 0)]
    delay_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin and answer on stdout
    Play,
    /// Let a scripted player play one game
    Demo {
        /// Always pick the largest group instead of a random cell
        #[arg(long)]
        greedy: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let session = build_session(&cli.game)?;

    match cli.command {
        Some(Commands::Play) => {
            let mut console = Console::new(session);
            console.run().context("console I/O failed")?;
        }
        Some(Commands::Demo { greedy }) => run_demo(session, greedy, cli.game.seed)?,
        None => run_demo(session, false, cli.game.seed)?,
    }
    Ok(())
}

fn build_session(args: &GameArgs) -> Result<Session<Palette, Hud>> {
    let delay = Duration::from_millis(args.delay_ms);
    let config = SessionConfig::new(args.rows, args.cols, args.moves)
        .context("invalid grid settings")?
        .with_delays(delay, delay);

    let mut palette = Palette::uniform(args.colors).context("invalid palette")?;
    if let Some(seed) = args.seed {
        palette = palette.with_seed(seed);
    }

    Ok(Session::new(config, palette)?.with_sink(Hud::new()))
}

fn run_demo(mut session: Session<Palette, Hud>, greedy: bool, seed: Option<u64>) -> Result<()> {
    println!("Colorfall\n");

    session.start();
    println!("{}", session.grid());
    for line in session.sink_mut().drain() {
        println!("{line}");
    }

    let strategy = if greedy { Strategy::Greedy } else { Strategy::Random };
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let summary = play_out(&mut session, strategy, &mut rng)?;

    for line in session.sink_mut().drain() {
        println!("{line}");
    }
    println!("\n{}", session.grid());
    println!(
        "{:?} player: {} moves, final score {}",
        strategy,
        summary.moves.len(),
        summary.final_score
    );
    Ok(())
}
