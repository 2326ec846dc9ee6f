//! Info command - page count and document metadata.

use std::path::PathBuf;

use clap::Args;
use console::style;

use pagecut_core::SourceDocument;

use super::split::OutputFormat;

/// Arguments for the info command.
#[derive(Args)]
pub struct InfoArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let source = SourceDocument::open(&args.input)?;
    let info = source.info();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            println!("{}", style(args.input.display()).bold());
            println!("Pages: {}", info.page_count);
            if let Some(title) = &info.title {
                println!("Title: {}", title);
            }
            if let Some(author) = &info.author {
                println!("Author: {}", author);
            }
            if let Some(producer) = &info.producer {
                println!("Producer: {}", producer);
            }
            if let Some(created) = &info.created {
                println!("Created: {}", created);
            }
        }
    }

    Ok(())
}
