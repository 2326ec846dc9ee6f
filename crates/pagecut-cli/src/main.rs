//! CLI application for splitting, extracting, and merging PDF files.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, info, merge, split, text};

/// pagecut - Split, extract, and merge PDF pages
#[derive(Parser)]
#[command(name = "pagecut")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into two files at a page boundary
    Split(split::SplitArgs),

    /// Extract selected pages into a new PDF
    Extract(extract::ExtractArgs),

    /// Merge multiple PDFs into one
    Merge(merge::MergeArgs),

    /// Show page count and document metadata
    Info(info::InfoArgs),

    /// Extract embedded text
    Text(text::TextArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Split(args) => split::run(args, cli.config.as_deref()),
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Merge(args) => merge::run(args, cli.config.as_deref()),
        Commands::Info(args) => info::run(args),
        Commands::Text(args) => text::run(args),
        Commands::Config(args) => config::run(args),
    }
}
