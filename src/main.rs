//! Knight-Tour: search for knight's tours by exploring move orders.
//!
//! ## Usage
//!
//! - `knight-tour explore --x 0 --y 7` - Best move order for one starting cell
//! - `knight-tour sweep` - Best move order for every starting cell
//! - `knight-tour tour --x 0 --y 7 --comb 13` - Run one search and print the board

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use knight_tour::constants::{
    COMBINATIONS, DEFAULT_BOARD_SIZE, DEFAULT_COMBINATIONS, MAX_TRIES, MAX_WORKERS,
};
use knight_tour::error::TourError;
use knight_tour::explore::{ExploreConfig, explore_board, explore_starting_cell};
use knight_tour::moves::move_order;
use knight_tour::search::{SearchLimits, SearchStatus, knight_tour, knight_tour_recursive};

/// Knight-Tour: backtracking knight's tour search
#[derive(Parser)]
#[command(name = "knight-tour")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Try many move orders from one starting cell and report the best
    Explore {
        #[arg(long)]
        x: usize,
        #[arg(long)]
        y: usize,
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Explore every starting cell of the board
    Sweep {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Run a single search and print the board
    Tour {
        #[arg(long)]
        x: usize,
        #[arg(long)]
        y: usize,
        /// Combination index selecting the move order
        #[arg(long, default_value_t = 0)]
        comb: u32,
        /// Use the recursive search instead of the iterative one
        #[arg(long)]
        recursive: bool,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, default_value_t = MAX_TRIES)]
        max_tries: u64,
    },
}

#[derive(Args)]
struct BatchArgs {
    /// Number of combination indices to try per starting cell
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_COMBINATIONS,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(COMBINATIONS))
    )]
    combinations: u32,
    /// Maximum number of concurrent searches
    #[arg(short, long, default_value_t = MAX_WORKERS)]
    workers: usize,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    #[arg(long, default_value_t = MAX_TRIES)]
    max_tries: u64,
    /// Seed for the dispatch order
    #[arg(long)]
    seed: Option<u64>,
}

impl BatchArgs {
    fn config(&self) -> ExploreConfig {
        ExploreConfig {
            board_size: self.size,
            max_workers: self.workers,
            limits: SearchLimits::with_max_tries(self.max_tries),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Explore { x, y, batch } => {
            let report = explore_starting_cell((x, y), batch.combinations, &batch.config())
                .with_context(|| format!("exploring [{x}, {y}]"))?;
            println!("{report}");
        }
        Commands::Sweep { batch } => {
            let reports =
                explore_board(batch.combinations, &batch.config()).context("sweeping board")?;
            for report in reports {
                println!("{report}");
            }
        }
        Commands::Tour {
            x,
            y,
            comb,
            recursive,
            size,
            max_tries,
        } => run_tour(x, y, comb, recursive, size, max_tries)?,
    }

    Ok(())
}

fn run_tour(
    x: usize,
    y: usize,
    comb: u32,
    recursive: bool,
    size: usize,
    max_tries: u64,
) -> Result<()> {
    if size == 0 {
        return Err(TourError::InvalidBoardSize.into());
    }
    if x >= size || y >= size {
        return Err(TourError::StartOutOfBounds { x, y, size }.into());
    }

    let order = move_order(comb);
    let limits = SearchLimits::with_max_tries(max_tries);
    let result = if recursive {
        knight_tour_recursive(size, (x, y), &order, &limits)
    } else {
        knight_tour(size, (x, y), &order, &limits)
    };

    match result.status {
        SearchStatus::Solved => println!("found a solution at {x}, {y} in {} tries", result.tries),
        SearchStatus::Dead => println!("no tour from {x}, {y} ({} tries)", result.tries),
        SearchStatus::BudgetExceeded => {
            println!("gave up at {x}, {y} after {} tries", result.tries)
        }
    }
    print!("{}", result.board);

    if result.found() {
        result.board.verify_tour().context("search returned an invalid tour")?;
    }
    Ok(())
}

fn init_logging(debug: bool) {
    use std::io::Write;

    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .init();
}
