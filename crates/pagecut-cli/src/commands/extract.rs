//! Extract command - pull selected pages into a new PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use pagecut_core::{DocumentAssembler, SourceDocument, even_pages, odd_pages, parse_page_selection};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Pages to extract, 1-based (e.g. "1,3,5-7,10-")
    #[arg(short, long, conflicts_with_all = ["odd", "even"])]
    pages: Option<String>,

    /// Extract pages 1, 3, 5, ...
    #[arg(long, conflicts_with = "even")]
    odd: bool,

    /// Extract pages 2, 4, 6, ...
    #[arg(long)]
    even: bool,

    /// Output file (default: input name + "_extract.pdf")
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let source = SourceDocument::open(&args.input)?;
    let page_count = source.page_count();
    debug!("document has {} pages", page_count);

    let selection = if let Some(spec) = &args.pages {
        parse_page_selection(spec, page_count)?
    } else if args.odd {
        odd_pages(page_count)
    } else if args.even {
        even_pages(page_count)
    } else {
        anyhow::bail!("Nothing to extract: pass --pages, --odd, or --even");
    };

    let output = args.output.clone().unwrap_or_else(|| {
        let base = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        args.input.with_file_name(format!("{}_extract.pdf", base))
    });
    super::check_overwrite(&output, &config)?;

    let selected = selection
        .iter()
        .map(|&index| source.page_id(index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut assembler = DocumentAssembler::new().with_compress(config.output.compress);
    assembler.append_pages(&source, &selected)?;
    let written = assembler.write_to(&output)?;

    println!(
        "{} Wrote {} pages to {}",
        style("✓").green(),
        written,
        output.display()
    );

    Ok(())
}
