//! Source document handle built on lopdf and pdf-extract.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;
use tracing::debug;

use crate::error::PdfError;

/// Result type for document-level operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A read-only handle to an opened, paginated PDF document.
///
/// The underlying document is never mutated; pages are copied out of it by
/// [`crate::assembler::DocumentAssembler`].
#[derive(Debug)]
pub struct SourceDocument {
    path: Option<PathBuf>,
    document: Document,
    raw_data: Vec<u8>,
    page_ids: Vec<ObjectId>,
}

/// Metadata read from a document's Info dictionary.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    /// Number of pages.
    pub page_count: usize,
    /// Document title, if set.
    pub title: Option<String>,
    /// Document author, if set.
    pub author: Option<String>,
    /// Producing application, if set.
    pub producer: Option<String>,
    /// Creation date string as stored in the document.
    pub created: Option<String>,
}

impl SourceDocument {
    /// Open and parse a document from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .map_err(|e| PdfError::Parse(format!("failed to read {}: {}", path.display(), e)))?;
        let mut source = Self::from_bytes(&data)?;
        source.path = Some(path.to_path_buf());
        Ok(source)
    }

    /// Parse a document from an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // Keep decrypted bytes around for pdf_extract
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_ids: Vec<ObjectId> = doc.page_iter().collect();
        if page_ids.is_empty() {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_ids.len());
        Ok(Self {
            path: None,
            document: doc,
            raw_data,
            page_ids,
        })
    }

    /// Path the document was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page object ids in document order; index 0 is the first page.
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    /// Object id of the page at `index` (0-based).
    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(PdfError::InvalidPage(index))
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    /// Read the Info dictionary, if the document carries one.
    pub fn info(&self) -> DocumentInfo {
        let mut info = DocumentInfo {
            page_count: self.page_count(),
            title: None,
            author: None,
            producer: None,
            created: None,
        };

        if let Ok(obj) = self.document.trailer.get(b"Info") {
            if let Ok((_, Object::Dictionary(dict))) = self.document.dereference(obj) {
                info.title = info_string(&self.document, dict, b"Title");
                info.author = info_string(&self.document, dict, b"Author");
                info.producer = info_string(&self.document, dict, b"Producer");
                info.created = info_string(&self.document, dict, b"CreationDate");
            }
        }

        info
    }

    /// Extract the document's embedded text.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

fn info_string(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = dict.get(key).ok()?;
    let (_, value) = doc.dereference(value).ok()?;
    match value {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

/// Info-dictionary strings are either PDFDocEncoding (treated as latin-ish
/// bytes here) or UTF-16BE with a BOM.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testpdf;

    #[test]
    fn loads_pages_in_document_order() {
        let source = SourceDocument::from_bytes(&testpdf::bytes(4)).unwrap();
        assert_eq!(source.page_count(), 4);
        assert_eq!(source.page_ids().len(), 4);
        assert!(source.path().is_none());
    }

    #[test]
    fn rejects_garbage_input() {
        let err = SourceDocument::from_bytes(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn rejects_zero_page_document() {
        let err = SourceDocument::from_bytes(&testpdf::bytes(0)).unwrap_err();
        assert!(matches!(err, PdfError::NoPages));
    }

    #[test]
    fn reads_info_dictionary() {
        let data = testpdf::bytes_with_title(2, "Pride and Prejudice");
        let source = SourceDocument::from_bytes(&data).unwrap();

        let info = source.info();
        assert_eq!(info.page_count, 2);
        assert_eq!(info.title.as_deref(), Some("Pride and Prejudice"));
        assert_eq!(info.producer.as_deref(), Some("pagecut tests"));
        assert_eq!(info.author, None);
    }

    #[test]
    fn info_is_empty_without_dictionary() {
        let source = SourceDocument::from_bytes(&testpdf::bytes(1)).unwrap();
        let info = source.info();
        assert_eq!(info.title, None);
        assert_eq!(info.page_count, 1);
    }

    #[test]
    fn decodes_utf16_info_strings() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Stolz und Vorurteil".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_pdf_string(&bytes), "Stolz und Vorurteil");
    }
}
