//! Text command - extract embedded text from a PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use pagecut_core::SourceDocument;

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: TextArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let source = SourceDocument::open(&args.input)?;
    let text = source.extract_text()?;

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from the PDF");
    }

    if let Some(output) = &args.output {
        fs::write(output, &text)?;
        println!(
            "{} Text written to {}",
            style("✓").green(),
            output.display()
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}
