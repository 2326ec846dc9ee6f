//! Two-way PDF splitting at a page boundary.

use std::path::{Path, PathBuf};

use lopdf::ObjectId;
use serde::Serialize;
use tracing::{debug, info};

use crate::assembler::DocumentAssembler;
use crate::document::SourceDocument;
use crate::error::{Result, SplitError};

/// Splits a source PDF into two new documents at a caller-chosen page index.
///
/// Pages `[0, breakpoint)` go to the first output and pages
/// `[breakpoint, page_count)` to the second, in document order. Outputs are
/// written next to the source as `<stem>_1.pdf` and `<stem>_2.pdf`.
#[derive(Debug)]
pub struct PdfFileSplitter {
    path: PathBuf,
    source: SourceDocument,
    parts: Option<[Vec<ObjectId>; 2]>,
    compress: bool,
}

/// One written output document.
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutput {
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of pages it holds.
    pub page_count: usize,
}

impl PdfFileSplitter {
    /// Open and validate the source document.
    ///
    /// The extension is checked before any file I/O, then existence, then
    /// the document is parsed. A failed construction leaves nothing behind.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if extension != "pdf" {
            return Err(SplitError::NotAPdf(path).into());
        }
        if !path.exists() {
            return Err(SplitError::SourceNotFound(path).into());
        }

        let source = SourceDocument::open(&path)?;
        debug!("opened {} ({} pages)", path.display(), source.page_count());

        Ok(Self {
            path,
            source,
            parts: None,
            compress: true,
        })
    }

    /// Enable or disable compression of the written outputs.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn page_count(&self) -> usize {
        self.source.page_count()
    }

    /// Partition the pages at `breakpoint` (0-based).
    ///
    /// `0` and `page_count` are valid and yield one empty output; anything
    /// past `page_count` is rejected rather than clamped. Calling `split`
    /// again replaces any earlier partition.
    pub fn split(&mut self, breakpoint: usize) -> Result<()> {
        let page_count = self.source.page_count();
        if breakpoint > page_count {
            return Err(SplitError::BreakpointOutOfRange {
                breakpoint,
                page_count,
            }
            .into());
        }

        let pages = self.source.page_ids();
        let prefix = pages[..breakpoint].to_vec();
        let suffix = pages[breakpoint..].to_vec();
        debug!(
            "split at {}: {} + {} pages",
            breakpoint,
            prefix.len(),
            suffix.len()
        );

        self.parts = Some([prefix, suffix]);
        Ok(())
    }

    /// Serialize both partitions next to the source document.
    ///
    /// The two writes are independent: a failure on the second leaves the
    /// first output on disk. May be called repeatedly; each call
    /// re-serializes and overwrites.
    pub fn write(&self, stem: &str) -> Result<[SplitOutput; 2]> {
        let parts = self.parts.as_ref().ok_or(SplitError::SplitNotCalled)?;

        let first = self.write_part(&parts[0], stem, 1)?;
        let second = self.write_part(&parts[1], stem, 2)?;
        Ok([first, second])
    }

    fn write_part(&self, pages: &[ObjectId], stem: &str, index: usize) -> Result<SplitOutput> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        let path = dir.join(format!("{}_{}.pdf", stem, index));

        let mut assembler = DocumentAssembler::new().with_compress(self.compress);
        assembler.append_pages(&self.source, pages)?;
        let page_count = assembler.write_to(&path)?;

        info!("wrote {} pages to {}", page_count, path.display());
        Ok(SplitOutput { path, page_count })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::PagecutError;
    use crate::testpdf;

    fn sample(dir: &Path, name: &str, pages: u32) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, testpdf::bytes(pages)).unwrap();
        path
    }

    fn page_count_of(path: &Path) -> usize {
        lopdf::Document::load(path).unwrap().get_pages().len()
    }

    #[test]
    fn splits_into_prefix_and_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample(dir.path(), "book.pdf", 5);

        let mut splitter = PdfFileSplitter::new(&input).unwrap();
        assert_eq!(splitter.page_count(), 5);

        splitter.split(2).unwrap();
        let outputs = splitter.write("book_split").unwrap();

        assert_eq!(outputs[0].page_count, 2);
        assert_eq!(outputs[1].page_count, 3);
        assert_eq!(outputs[0].path, dir.path().join("book_split_1.pdf"));
        assert_eq!(outputs[1].path, dir.path().join("book_split_2.pdf"));
        assert_eq!(page_count_of(&outputs[0].path), 2);
        assert_eq!(page_count_of(&outputs[1].path), 3);

        // Concatenated outputs reproduce the original page order
        let part1 = lopdf::Document::load(&outputs[0].path).unwrap();
        let part2 = lopdf::Document::load(&outputs[1].path).unwrap();
        assert_eq!(testpdf::page_marker(&part1, 0), "Page 1");
        assert_eq!(testpdf::page_marker(&part1, 1), "Page 2");
        assert_eq!(testpdf::page_marker(&part2, 0), "Page 3");
        assert_eq!(testpdf::page_marker(&part2, 2), "Page 5");
    }

    #[test]
    fn breakpoint_zero_and_page_count_are_valid() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample(dir.path(), "doc.pdf", 3);

        let mut splitter = PdfFileSplitter::new(&input).unwrap();

        splitter.split(0).unwrap();
        let outputs = splitter.write("empty_prefix").unwrap();
        assert_eq!(outputs[0].page_count, 0);
        assert_eq!(outputs[1].page_count, 3);

        splitter.split(3).unwrap();
        let outputs = splitter.write("empty_suffix").unwrap();
        assert_eq!(outputs[0].page_count, 3);
        assert_eq!(outputs[1].page_count, 0);
        assert_eq!(page_count_of(&outputs[1].path), 0);
    }

    #[test]
    fn rejects_breakpoint_past_the_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample(dir.path(), "doc.pdf", 3);

        let mut splitter = PdfFileSplitter::new(&input).unwrap();
        let err = splitter.split(4).unwrap_err();
        assert!(matches!(
            err,
            PagecutError::Split(SplitError::BreakpointOutOfRange {
                breakpoint: 4,
                page_count: 3
            })
        ));
    }

    #[test]
    fn rejects_wrong_extension_before_touching_disk() {
        // The path does not exist; the extension check must win.
        let err = PdfFileSplitter::new("no_such_file.txt").unwrap_err();
        assert!(matches!(
            err,
            PagecutError::Split(SplitError::NotAPdf(_))
        ));
    }

    #[test]
    fn rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let err = PdfFileSplitter::new(&path).unwrap_err();
        assert!(matches!(
            err,
            PagecutError::Split(SplitError::SourceNotFound(_))
        ));
    }

    #[test]
    fn write_before_split_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample(dir.path(), "doc.pdf", 3);

        let splitter = PdfFileSplitter::new(&input).unwrap();
        let err = splitter.write("doc_split").unwrap_err();
        assert!(matches!(
            err,
            PagecutError::Split(SplitError::SplitNotCalled)
        ));
        assert!(!dir.path().join("doc_split_1.pdf").exists());
    }

    #[test]
    fn resplit_discards_earlier_partition() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample(dir.path(), "doc.pdf", 5);

        let mut splitter = PdfFileSplitter::new(&input).unwrap();
        splitter.split(1).unwrap();
        splitter.split(4).unwrap();
        let outputs = splitter.write("doc_split").unwrap();

        assert_eq!(outputs[0].page_count, 4);
        assert_eq!(outputs[1].page_count, 1);
        assert_eq!(page_count_of(&outputs[0].path), 4);
    }

    #[test]
    fn write_overwrites_previous_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample(dir.path(), "doc.pdf", 4);

        let mut splitter = PdfFileSplitter::new(&input).unwrap();
        splitter.split(1).unwrap();
        splitter.write("doc_split").unwrap();

        splitter.split(3).unwrap();
        let outputs = splitter.write("doc_split").unwrap();
        assert_eq!(page_count_of(&outputs[0].path), 3);
        assert_eq!(page_count_of(&outputs[1].path), 1);
    }
}
