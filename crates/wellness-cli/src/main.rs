mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use commands::emergency::EmergencyCommand;
use commands::journal::JournalCommand;
use commands::mortgage::{AmortizationArgs, ClosingCostsArgs, MortgageArgs};
use commands::yoga::YogaCommand;
use config::AppContext;

/// Home costs, journaling, emergency preparedness and yoga practice
#[derive(Parser)]
#[command(
    name = "wellness",
    version,
    about = "Home costs, journaling, emergency preparedness and yoga practice",
    long_about = "A personal wellness toolkit: a decimal-precision home ownership cost \
                  calculator, a private journal with mood insights, emergency supply \
                  checklists and a yoga progression log. Data lives as JSON documents \
                  in a local data directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding the stored JSON documents (or WELLNESS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment breakdown, closing costs and cost projections
    Mortgage(MortgageArgs),
    /// Month-by-month (or yearly) amortization schedule
    Amortization(AmortizationArgs),
    /// Itemised closing costs and cash to close
    ClosingCosts(ClosingCostsArgs),
    /// Journal entries
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Emergency supply, first aid and food checklists
    #[command(subcommand)]
    Emergency(EmergencyCommand),
    /// Yoga practice log and pose progression
    #[command(subcommand)]
    Yoga(YogaCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = match AppContext::new(cli.config.as_deref(), cli.data_dir.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args, &ctx),
        Commands::Amortization(args) => commands::mortgage::run_amortization(args),
        Commands::ClosingCosts(args) => commands::mortgage::run_closing_costs(args, &ctx),
        Commands::Journal(cmd) => commands::journal::run_journal(cmd, &ctx),
        Commands::Emergency(cmd) => commands::emergency::run_emergency(cmd, &ctx),
        Commands::Yoga(cmd) => commands::yoga::run_yoga(cmd, &ctx),
        Commands::Version => {
            println!("wellness {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
