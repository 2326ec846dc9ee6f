//! Split command - divide a PDF into two files at a page boundary.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::debug;

use pagecut_core::PdfFileSplitter;

/// Arguments for the split command.
#[derive(Args)]
pub struct SplitArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Page index to split at; pages before it go to the first output
    #[arg(short = 'a', long = "at")]
    breakpoint: usize,

    /// Base name for the two outputs (default: input name + "_split")
    #[arg(short, long)]
    stem: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable confirmation
    Text,
    /// JSON result records
    Json,
}

pub fn run(args: SplitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let stem = args.stem.clone().unwrap_or_else(|| {
        let base = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        format!("{}_split", base)
    });

    let mut splitter = PdfFileSplitter::new(&args.input)?.with_compress(config.output.compress);
    debug!("document has {} pages", splitter.page_count());

    splitter.split(args.breakpoint)?;

    let dir = args.input.parent().unwrap_or_else(|| Path::new(""));
    for index in 1..=2 {
        super::check_overwrite(&dir.join(format!("{}_{}.pdf", stem, index)), &config)?;
    }

    let outputs = splitter.write(&stem)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
        OutputFormat::Text => {
            for output in &outputs {
                println!(
                    "{} Wrote {} pages to {}",
                    style("✓").green(),
                    output.page_count,
                    output.path.display()
                );
            }
        }
    }

    Ok(())
}
