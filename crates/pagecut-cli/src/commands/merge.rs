//! Merge command - concatenate PDFs into a single document.

use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use pagecut_core::{DocumentAssembler, SourceDocument};

/// Arguments for the merge command.
#[derive(Args)]
pub struct MergeArgs {
    /// Input PDF files, in output order
    #[arg(required = true, num_args = 2..)]
    inputs: Vec<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(args: MergeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    super::check_overwrite(&args.output, &config)?;

    for input in &args.inputs {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut assembler = DocumentAssembler::new().with_compress(config.output.compress);
    for input in &args.inputs {
        let source = SourceDocument::open(input)?;
        debug!(
            "appending {} pages from {}",
            source.page_count(),
            input.display()
        );
        assembler.append_pages(&source, source.page_ids())?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let written = assembler.write_to(&args.output)?;

    println!(
        "{} Merged {} files into {} ({} pages)",
        style("✓").green(),
        args.inputs.len(),
        args.output.display(),
        written
    );

    Ok(())
}
