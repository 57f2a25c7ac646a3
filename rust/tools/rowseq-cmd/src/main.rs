use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod commands;
mod utils;

use utils::ElementType;

#[derive(Parser)]
#[command(name = "rowseq-cmd")]
#[command(about = "Command-line utility for generating arithmetic sequences")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single sequence and print its elements
    Generate {
        /// Element type of the sequence
        #[arg(long = "type", value_enum)]
        element_type: ElementType,

        /// First element (integer, YYYY-MM-DD date or "YYYY-MM-DD HH:MM:SS[.fff]" timestamp)
        #[arg(long, allow_hyphen_values = true)]
        start: String,

        /// Inclusive upper (or lower, when counting down) bound
        #[arg(long, allow_hyphen_values = true)]
        stop: String,

        /// Step: an integer for bigint, an interval such as 1d, 12h, 30s or 250ms otherwise
        #[arg(long, allow_hyphen_values = true)]
        step: Option<String>,
    },

    /// Generate one sequence per row of a CSV file with start,stop[,step] columns
    Batch {
        /// Source CSV file (with a header row)
        #[arg(short, long)]
        file: String,

        /// Element type of the start and stop columns
        #[arg(long = "type", value_enum)]
        element_type: ElementType,

        /// Abort on the first row that cannot be generated
        #[arg(long)]
        fail_fast: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            element_type,
            start,
            stop,
            step,
        } => commands::generate::run(element_type, start, stop, step),
        Commands::Batch {
            file,
            element_type,
            fail_fast,
        } => commands::batch::run(file, element_type, fail_fast),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
