//! Positioned text spans from page content streams.
//!
//! Only the text-positioning operators are interpreted; the spans feed the
//! raw table grid detector, which needs to know where each run of text
//! starts on the page.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Text kerning (in 1/1000 text space units) above which a TJ adjustment
/// is treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A run of text drawn at one position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
        }
    }
}

/// Decode the content stream of `page_id` into positioned spans.
pub fn extract_spans(
    doc: &LopdfDocument,
    page_id: lopdf::ObjectId,
    content: &[u8],
) -> Result<Vec<TextSpan>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;
    let content =
        lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut spans = Vec::new();
    let mut font_name: Vec<u8> = Vec::new();
    let mut font_size = DEFAULT_FONT_SIZE;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in content.operations {
        let text = match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix.begin_text();
                None
            }
            "ET" => {
                in_text_block = false;
                None
            }
            "Tf" if op.operands.len() >= 2 => {
                if let Object::Name(name) = &op.operands[0] {
                    font_name = name.clone();
                }
                font_size = get_number(&op.operands[1]).unwrap_or(DEFAULT_FONT_SIZE);
                None
            }
            "TL" if !op.operands.is_empty() => {
                matrix.leading = get_number(&op.operands[0]).unwrap_or(0.0);
                None
            }
            "Td" | "TD" if op.operands.len() >= 2 => {
                let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                if op.operator == "TD" {
                    matrix.leading = -ty;
                }
                matrix.translate(tx, ty);
                None
            }
            "Tm" if op.operands.len() >= 6 => {
                let n = |i: usize, default: f32| get_number(&op.operands[i]).unwrap_or(default);
                matrix.set(n(0, 1.0), n(1, 0.0), n(2, 0.0), n(3, 1.0), n(4, 0.0), n(5, 0.0));
                None
            }
            "T*" => {
                matrix.next_line();
                None
            }
            "Tj" if in_text_block => match op.operands.first() {
                Some(Object::String(bytes, _)) => {
                    Some(decode_with_font(doc, &fonts, &font_name, bytes))
                }
                _ => None,
            },
            "TJ" if in_text_block => match op.operands.first() {
                Some(Object::Array(items)) => Some(decode_tj_array(doc, &fonts, &font_name, items)),
                _ => None,
            },
            "'" | "\"" => {
                matrix.next_line();
                let idx = if op.operator == "\"" { 2 } else { 0 };
                match op.operands.get(idx) {
                    Some(Object::String(bytes, _)) if in_text_block => {
                        Some(decode_with_font(doc, &fonts, &font_name, bytes))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(text) = text {
            if !text.trim().is_empty() {
                let (x, y) = matrix.position();
                spans.push(TextSpan::new(text, x, y, font_size * matrix.scale()));
            }
        }
    }

    Ok(spans)
}

fn decode_tj_array(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    font_name: &[u8],
    items: &[Object],
) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_with_font(doc, fonts, font_name, bytes));
            }
            Object::Integer(_) | Object::Real(_) => {
                let adjustment = -get_number(item).unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Decode a string operand with the current font's encoding, falling back
/// to UTF-16BE/UTF-8/Latin-1 guessing when the font has none.
fn decode_with_font(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    font_name: &[u8],
    bytes: &[u8],
) -> String {
    if let Some(font) = fonts.get(font_name) {
        if let Ok(encoding) = font.get_font_encoding(doc) {
            if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                return text;
            }
        }
    }
    decode_text_simple(bytes)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Text matrix plus the text leading, which is part of the text state and
/// survives `BT`.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn begin_text(&mut self) {
        *self = Self {
            leading: self.leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            leading: self.leading,
        };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_text_matrix_translate_and_next_line() {
        let mut m = TextMatrix::default();
        m.leading = 12.0;
        m.set(2.0, 0.0, 0.0, 2.0, 100.0, 700.0);
        m.translate(10.0, -5.0);
        assert_eq!(m.position(), (120.0, 690.0));
        m.next_line();
        assert_eq!(m.position(), (120.0, 666.0));
        assert_eq!(m.scale(), 2.0);
    }

    #[test]
    fn test_next_line_without_leading_stays_put() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 700.0);
        m.next_line();
        assert_eq!(m.position(), (72.0, 700.0));
    }

    #[test]
    fn test_leading_survives_begin_text() {
        let mut m = TextMatrix::default();
        m.leading = 20.0;
        m.translate(72.0, 700.0);
        m.begin_text();
        assert_eq!(m.position(), (0.0, 0.0));
        assert_eq!(m.leading, 20.0);
    }

    fn spans_for(operations: Vec<Operation>) -> Vec<TextSpan> {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.clone()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );

        extract_spans(&doc, page_id, &content).unwrap()
    }

    fn show(text: &str) -> Operation {
        Operation::new("Tj", vec![Object::string_literal(text)])
    }

    #[test]
    fn test_tl_sets_line_step() {
        let spans = spans_for(vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![20.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            show("first"),
            Operation::new("T*", vec![]),
            show("second"),
            Operation::new("'", vec![Object::string_literal("third")]),
            Operation::new("ET", vec![]),
        ]);

        let ys: Vec<f32> = spans.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![700.0, 680.0, 660.0]);
        assert!(spans.iter().all(|s| s.x == 72.0));
    }

    #[test]
    fn test_td_upper_sets_leading() {
        let spans = spans_for(vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("TD", vec![0.into(), (-14).into()]),
            show("first"),
            Operation::new("T*", vec![]),
            show("second"),
            Operation::new("ET", vec![]),
        ]);

        let ys: Vec<f32> = spans.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![686.0, 672.0]);
    }
}
