//! Test PDF construction helpers.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// A piece of text drawn at an absolute position.
pub struct Placed {
    pub text: String,
    pub x: i64,
    pub y: i64,
}

/// Contents of one test page.
#[derive(Default)]
pub struct PageSpec {
    /// Lines drawn top to bottom, each in its own text object
    pub lines: Vec<String>,
    /// Text drawn at fixed positions, e.g. table cells
    pub placed: Vec<Placed>,
    /// Reference an image XObject from the page
    pub image: bool,
}

impl PageSpec {
    pub fn text(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self) -> Self {
        self.image = true;
        self
    }

    /// A grid of cells, one row every 20 points, columns 200 points apart.
    pub fn grid(rows: &[&[&str]]) -> Self {
        let mut placed = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                placed.push(Placed {
                    text: cell.to_string(),
                    x: 72 + 200 * c as i64,
                    y: 700 - 20 * r as i64,
                });
            }
        }
        Self {
            placed,
            ..Default::default()
        }
    }
}

fn text_object(text: &str, x: i64, y: i64) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    page: &PageSpec,
) -> ObjectId {
    let mut operations = Vec::new();
    for (i, line) in page.lines.iter().enumerate() {
        operations.extend(text_object(line, 72, 750 - 16 * i as i64));
    }
    for cell in &page.placed {
        operations.extend(text_object(&cell.text, cell.x, cell.y));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("content encodes"),
    ));

    let mut resources = dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    };
    if page.image {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![0x80],
        ));
        resources.set("XObject", dictionary! { "Im1" => image_id });
    }

    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources,
    })
}

/// Build a document from page specs, with an optional Info title.
pub fn build_pdf(pages: &[PageSpec], title: Option<&str>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|page| add_page(&mut doc, pages_id, font_id, page).into())
        .collect();
    let count = kids.len() as i64;

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Author" => Object::string_literal("Test Suite"),
            "Producer" => Object::string_literal("lopdf"),
        });
        doc.trailer.set("Info", info_id);
    }

    doc
}

/// Write a document built from `pages` to `path`.
pub fn write_pdf(path: &Path, pages: &[PageSpec], title: Option<&str>) {
    let mut doc = build_pdf(pages, title);
    doc.save(path).expect("test PDF is written");
}

/// Write a single-page text PDF.
pub fn write_text_pdf(path: &Path, lines: &[&str]) {
    write_pdf(path, &[PageSpec::text(lines)], None);
}

/// Serialize a document to bytes.
pub fn pdf_bytes(pages: &[PageSpec], title: Option<&str>) -> Vec<u8> {
    let mut doc = build_pdf(pages, title);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("test PDF is serialized");
    bytes
}

/// Read a written artifact back as JSON.
pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("artifact exists");
    serde_json::from_str(&text).expect("artifact is valid JSON")
}
