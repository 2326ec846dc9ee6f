//! Builds new PDF documents from pages of existing ones.
//!
//! Construction by whitelist: every appended page has its object closure
//! copied into the output document under fresh ids, and a new page tree and
//! catalog are attached on save. Page-tree back-edges (`Parent`) are not
//! followed, so the source's tree nodes and sibling pages stay behind;
//! inheritable page attributes are materialized onto each copied page first.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use crate::document::SourceDocument;
use crate::error::PdfError;

type Result<T> = std::result::Result<T, PdfError>;

/// Attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Accumulates page references and serializes them into a new document.
pub struct DocumentAssembler {
    document: Document,
    page_ids: Vec<ObjectId>,
    compress: bool,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            page_ids: Vec::new(),
            compress: true,
        }
    }

    /// Enable or disable stream compression on save.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Copy the given pages of `source`, in the given order, into the
    /// document under construction.
    pub fn append_pages(&mut self, source: &SourceDocument, pages: &[ObjectId]) -> Result<()> {
        let doc = source.document();

        // Materialize inherited attributes before walking the object graph;
        // the source page tree itself is not copied.
        let mut patched: HashMap<ObjectId, Dictionary> = HashMap::with_capacity(pages.len());
        for &page_id in pages {
            patched.insert(page_id, materialized_page(doc, page_id)?);
        }

        let mut needed: HashSet<ObjectId> = pages.iter().copied().collect();
        for dict in patched.values() {
            collect_from_dict(doc, dict, &mut needed)?;
        }

        // Deterministic id assignment
        let mut ordered: Vec<ObjectId> = needed.into_iter().collect();
        ordered.sort_unstable();

        let mut id_map: HashMap<ObjectId, ObjectId> = HashMap::with_capacity(ordered.len());
        let mut next_id = self.document.max_id + 1;
        for &old_id in &ordered {
            id_map.insert(old_id, (next_id, 0));
            next_id += 1;
        }
        self.document.max_id = next_id - 1;

        for &old_id in &ordered {
            let mut object = match patched.get(&old_id) {
                Some(dict) => Object::Dictionary(dict.clone()),
                None => doc
                    .get_object(old_id)
                    .map_err(|e| PdfError::Parse(e.to_string()))?
                    .clone(),
            };
            remap_references(&mut object, &id_map);
            self.document.objects.insert(id_map[&old_id], object);
        }

        for page_id in pages {
            self.page_ids.push(id_map[page_id]);
        }

        trace!(
            "appended {} pages ({} objects copied)",
            pages.len(),
            ordered.len()
        );
        Ok(())
    }

    /// Build the page tree and catalog, then save to `path` (truncating any
    /// existing file).
    ///
    /// An assembler with no pages writes a structurally valid zero-page
    /// document. Returns the number of pages written.
    pub fn write_to(mut self, path: &Path) -> Result<usize> {
        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect();
        let page_count = kids.len();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_count as i64));
        let pages_id = self.document.add_object(pages_dict);

        for page_id in &self.page_ids {
            if let Some(Object::Dictionary(page_dict)) = self.document.objects.get_mut(page_id) {
                page_dict.set("Parent", Object::Reference(pages_id));
            }
        }

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = self.document.add_object(catalog);

        self.document.trailer.set("Root", Object::Reference(catalog_id));
        self.document
            .trailer
            .set("Size", Object::Integer(self.document.max_id as i64 + 1));

        if self.compress {
            self.document.compress();
        }

        self.document.save(path).map_err(|e| PdfError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("wrote {} pages to {}", page_count, path.display());
        Ok(page_count)
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Clone a leaf page dictionary with its inherited attributes filled in and
/// its `Parent` entry dropped; the output document re-parents it on save.
fn materialized_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let object = doc
        .get_object(page_id)
        .map_err(|e| PdfError::Parse(e.to_string()))?;
    let Object::Dictionary(dict) = object else {
        return Err(PdfError::Parse(format!(
            "object {} {} is not a page dictionary",
            page_id.0, page_id.1
        )));
    };

    let mut page = dict.clone();
    page.remove(b"Parent");
    for key in INHERITABLE {
        if page.get(key).is_err() {
            if let Some(value) = inherited_attribute(doc, dict, key) {
                page.set(key, value);
            }
        }
    }
    Ok(page)
}

/// Walk the page-tree ancestors of `dict` looking for `key`.
fn inherited_attribute(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") else {
        return None;
    };
    lookup_attribute(doc, *parent_id, key)
}

fn lookup_attribute(doc: &Document, node_id: ObjectId, key: &[u8]) -> Option<Object> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };
    if let Ok(value) = dict.get(key) {
        return Some(value.clone());
    }
    if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
        return lookup_attribute(doc, *parent_id, key);
    }
    None
}

fn collect_closure(doc: &Document, obj_id: ObjectId, visited: &mut HashSet<ObjectId>) -> Result<()> {
    if obj_id == (0, 0) || !visited.insert(obj_id) {
        return Ok(());
    }
    let object = doc
        .get_object(obj_id)
        .map_err(|e| PdfError::Parse(e.to_string()))?;
    collect_from(doc, object, visited)
}

fn collect_from(doc: &Document, object: &Object, visited: &mut HashSet<ObjectId>) -> Result<()> {
    match object {
        Object::Reference(id) => collect_closure(doc, *id, visited)?,
        Object::Array(items) => {
            for item in items {
                collect_from(doc, item, visited)?;
            }
        }
        Object::Dictionary(dict) => collect_from_dict(doc, dict, visited)?,
        Object::Stream(stream) => collect_from_dict(doc, &stream.dict, visited)?,
        _ => {}
    }
    Ok(())
}

fn collect_from_dict(
    doc: &Document,
    dict: &Dictionary,
    visited: &mut HashSet<ObjectId>,
) -> Result<()> {
    for (key, value) in dict.iter() {
        // Page-tree back-edge; the output document grows its own tree.
        if key.as_slice() == b"Parent" {
            continue;
        }
        collect_from(doc, value, visited)?;
    }
    Ok(())
}

fn remap_references(object: &mut Object, id_map: &HashMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(&new_id) = id_map.get(id) {
                *id = new_id;
            }
        }
        Object::Array(items) => {
            for item in items {
                remap_references(item, id_map);
            }
        }
        Object::Dictionary(dict) => remap_dict(dict, id_map),
        Object::Stream(stream) => remap_dict(&mut stream.dict, id_map),
        _ => {}
    }
}

fn remap_dict(dict: &mut Dictionary, id_map: &HashMap<ObjectId, ObjectId>) {
    let keys: Vec<Vec<u8>> = dict.iter().map(|(k, _)| k.clone()).collect();
    for key in keys {
        if let Ok(value) = dict.get_mut(&key) {
            remap_references(value, id_map);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testpdf;

    fn reload(path: &Path) -> Document {
        Document::load(path).unwrap()
    }

    #[test]
    fn copies_a_page_subset() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("subset.pdf");

        let source = SourceDocument::from_bytes(&testpdf::bytes(5)).unwrap();
        let pages = source.page_ids();

        let mut assembler = DocumentAssembler::new();
        assembler
            .append_pages(&source, &[pages[0], pages[2], pages[4]])
            .unwrap();
        assert_eq!(assembler.page_count(), 3);

        let written = assembler.write_to(&out).unwrap();
        assert_eq!(written, 3);
        assert_eq!(reload(&out).get_pages().len(), 3);
    }

    #[test]
    fn preserves_page_order_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ordered.pdf");

        let source = SourceDocument::from_bytes(&testpdf::bytes(4)).unwrap();
        let pages = source.page_ids();

        let mut assembler = DocumentAssembler::new();
        assembler.append_pages(&source, &pages[1..]).unwrap();
        assembler.write_to(&out).unwrap();

        let doc = reload(&out);
        assert_eq!(testpdf::page_marker(&doc, 0), "Page 2");
        assert_eq!(testpdf::page_marker(&doc, 1), "Page 3");
        assert_eq!(testpdf::page_marker(&doc, 2), "Page 4");
    }

    #[test]
    fn concatenates_multiple_sources() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("merged.pdf");

        let first = SourceDocument::from_bytes(&testpdf::bytes(2)).unwrap();
        let second = SourceDocument::from_bytes(&testpdf::bytes(3)).unwrap();

        let mut assembler = DocumentAssembler::new();
        assembler.append_pages(&first, first.page_ids()).unwrap();
        assembler.append_pages(&second, second.page_ids()).unwrap();
        let written = assembler.write_to(&out).unwrap();

        assert_eq!(written, 5);
        let doc = reload(&out);
        assert_eq!(doc.get_pages().len(), 5);
        assert_eq!(testpdf::page_marker(&doc, 2), "Page 1");
    }

    #[test]
    fn writes_a_valid_zero_page_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.pdf");

        let written = DocumentAssembler::new().write_to(&out).unwrap();
        assert_eq!(written, 0);

        let doc = reload(&out);
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn materializes_inherited_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("inherited.pdf");

        // MediaBox and Resources live on the Pages node only.
        let source = SourceDocument::from_bytes(&testpdf::bytes_inherited(3)).unwrap();
        let pages = source.page_ids();

        let mut assembler = DocumentAssembler::new();
        assembler.append_pages(&source, &pages[..1]).unwrap();
        assembler.write_to(&out).unwrap();

        let doc = reload(&out);
        let page_id = doc.page_iter().next().unwrap();
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        assert!(page.get(b"MediaBox").is_ok());
        assert!(page.get(b"Resources").is_ok());
    }

    #[test]
    fn uncompressed_output_keeps_plain_streams() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plain.pdf");

        let source = SourceDocument::from_bytes(&testpdf::bytes(1)).unwrap();
        let mut assembler = DocumentAssembler::new().with_compress(false);
        assembler.append_pages(&source, source.page_ids()).unwrap();
        assembler.write_to(&out).unwrap();

        let doc = reload(&out);
        assert_eq!(testpdf::page_marker(&doc, 0), "Page 1");
    }
}
