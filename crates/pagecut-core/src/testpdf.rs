//! In-memory PDF fixtures for tests. Page `i` (0-based) carries the text
//! marker `Page i+1` in its content stream.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

fn page_content(index: u32) -> Vec<u8> {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
            ),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    format!("Page {}", index + 1).into_bytes(),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    content.encode().unwrap()
}

fn media_box() -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ])
}

fn build(num_pages: u32, inherited: bool, title: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "F1",
            Object::Reference(font_id),
        )])),
    )]));

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), page_content(i)));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        if !inherited {
            page.set("MediaBox", media_box());
            page.set("Resources", Object::Reference(resources_id));
        }
        page_ids.push(doc.add_object(page));
    }

    let mut pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    if inherited {
        pages.set("MediaBox", media_box());
        pages.set("Resources", Object::Reference(resources_id));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if let Some(title) = title {
        let info_id = doc.add_object(Dictionary::from_iter(vec![
            (
                "Title",
                Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
            ),
            (
                "Producer",
                Object::String(b"pagecut tests".to_vec(), StringFormat::Literal),
            ),
        ]));
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A document with `num_pages` pages and per-page MediaBox/Resources.
pub fn bytes(num_pages: u32) -> Vec<u8> {
    build(num_pages, false, None)
}

/// Like [`bytes`], plus an Info dictionary with a title and producer.
pub fn bytes_with_title(num_pages: u32, title: &str) -> Vec<u8> {
    build(num_pages, false, Some(title))
}

/// MediaBox and Resources live on the Pages node only, so leaf pages must
/// inherit them.
pub fn bytes_inherited(num_pages: u32) -> Vec<u8> {
    build(num_pages, true, None)
}

/// Decode the content stream of page `index` (0-based) and return its text
/// marker, e.g. `Page 3`.
pub fn page_marker(doc: &Document, index: usize) -> String {
    let page_ids: Vec<ObjectId> = doc.page_iter().collect();
    let page = doc.get_object(page_ids[index]).unwrap().as_dict().unwrap();
    let contents = page.get(b"Contents").unwrap();
    let (_, contents) = doc.dereference(contents).unwrap();
    let Object::Stream(stream) = contents else {
        panic!("page {} has no content stream", index);
    };
    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let text = String::from_utf8_lossy(&data);
    let start = text.find("(Page ").expect("marker missing");
    let end = text[start..].find(')').unwrap() + start;
    text[start + 1..end].to_string()
}
