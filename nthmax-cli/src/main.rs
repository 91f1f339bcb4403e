use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// N-th maximum queries over spreadsheet files
#[derive(Parser)]
#[command(name = "nthmax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory that relative file paths are resolved against
    #[arg(short, long, env = "NTHMAX_BASE_DIR", global = true)]
    base_dir: Option<PathBuf>,

    /// Skip text, boolean and error cells in column A instead of failing
    #[arg(short, long, global = true)]
    skip_non_numeric: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the N-th largest number in the first column of the first sheet
    Query {
        /// Spreadsheet file (xlsx, xlsm, xlsb, xls or ods)
        file: PathBuf,

        /// Position of the requested maximum (1 = largest)
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the N largest numbers in the first column, largest first
    Top {
        /// Spreadsheet file (xlsx, xlsm, xlsb, xls or ods)
        file: PathBuf,

        /// How many values to list
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Display information about the first column of a spreadsheet
    Info {
        /// Spreadsheet file (xlsx, xlsm, xlsb, xls or ods)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let service = commands::build_service(cli.base_dir, cli.skip_non_numeric);

    match cli.command {
        Commands::Query { file, n, json } => commands::query::run(&service, file, n, json),
        Commands::Top { file, n, json } => commands::top::run(&service, file, n, json),
        Commands::Info { file } => commands::info::run(&service, file),
    }
}
