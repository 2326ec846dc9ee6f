//! Error types for the pagecut-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pagecut library.
#[derive(Error, Debug)]
pub enum PagecutError {
    /// PDF document error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Split workflow error.
    #[error("split error: {0}")]
    Split(#[from] SplitError),

    /// Page selection error.
    #[error("page selection error: {0}")]
    Selection(#[from] SelectionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to reading and writing PDF documents.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to serialize a document to disk.
    #[error("failed to write PDF to {}: {}", .path.display(), .reason)]
    Write { path: PathBuf, reason: String },

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page index requested.
    #[error("invalid page index: {0}")]
    InvalidPage(usize),
}

/// Errors raised by the split workflow around the document layer.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The supplied path does not have a .pdf extension.
    #[error("not a PDF file: {}", .0.display())]
    NotAPdf(PathBuf),

    /// The supplied path does not exist on disk.
    #[error("no PDF found at {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The breakpoint lies outside the document.
    #[error("breakpoint {breakpoint} is out of range for a document with {page_count} pages")]
    BreakpointOutOfRange {
        breakpoint: usize,
        page_count: usize,
    },

    /// `write` was called before `split`.
    #[error("split must be called before write")]
    SplitNotCalled,
}

/// Errors related to parsing page selections such as `1,3,5-7,10-`.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// A component of the selection is not a number.
    #[error("invalid page number: '{0}'")]
    InvalidNumber(String),

    /// A range is malformed (no start, or more than one dash).
    #[error("invalid range syntax: '{0}'")]
    InvalidRange(String),

    /// A range runs backwards.
    #[error("invalid range '{0}': start is after end")]
    ReversedRange(String),

    /// Page numbers are 1-based.
    #[error("page numbers must be >= 1")]
    PageZero,

    /// A page lies beyond the end of the document.
    #[error("page {page} is beyond document end ({page_count} pages)")]
    OutOfRange { page: usize, page_count: usize },

    /// The selection matched no pages.
    #[error("selection matches no pages")]
    Empty,
}

/// Result type for the pagecut library.
pub type Result<T> = std::result::Result<T, PagecutError>;
