//! PDF fragment source backed by lopdf.
//!
//! Walks each page's content stream, tracking the text matrix and the
//! current font, and emits one [`TextFragment`] per text-showing operator.
//! Vertical positions are normalized against the page height so that 0.0 is
//! the top of the page, matching the fragment contract.

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::TextFragment;

use super::FragmentSource;

const DEFAULT_PAGE_WIDTH: f32 = 612.0;
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Fragment source that extracts styled text runs from PDF files.
#[derive(Debug, Default)]
pub struct PdfFragmentSource;

impl PdfFragmentSource {
    pub fn new() -> Self {
        Self
    }

    fn extract_document(&self, doc: &LopdfDocument) -> Result<Vec<TextFragment>> {
        let mut fragments = Vec::new();
        for (page_num, page_id) in doc.get_pages() {
            match extract_page_fragments(doc, page_num, page_id) {
                Ok(mut page_fragments) => fragments.append(&mut page_fragments),
                Err(e) => {
                    // A broken page degrades the outline; it does not abort
                    // the document.
                    log::warn!("skipping page {}: {}", page_num, e);
                }
            }
        }
        log::debug!("extracted {} fragments", fragments.len());
        Ok(fragments)
    }
}

impl FragmentSource for PdfFragmentSource {
    fn name(&self) -> &str {
        "pdf"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn extract(&self, path: &Path) -> Result<Vec<TextFragment>> {
        let doc = LopdfDocument::load(path)?;
        self.extract_document(&doc)
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<Vec<TextFragment>> {
        let doc = LopdfDocument::load_mem(data)?;
        self.extract_document(&doc)
    }
}

fn extract_page_fragments(
    doc: &LopdfDocument,
    page_num: u32,
    page_id: ObjectId,
) -> Result<Vec<TextFragment>> {
    let (_, page_height) = page_dimensions(doc, page_id);
    let fonts = doc.get_page_fonts(page_id).unwrap_or_default();

    let content_data = page_content(doc, page_id)?;
    let content = lopdf::content::Content::decode(&content_data)
        .map_err(|e| Error::Source(format!("page {}: {}", page_num, e)))?;

    let mut fragments = Vec::new();
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;
    let mut current_font_name: Vec<u8> = Vec::new();
    let mut current_font_size = DEFAULT_FONT_SIZE;
    let mut current_is_bold = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(name) = &op.operands[0] {
                        current_font_name = name.clone();
                        current_is_bold = fonts
                            .get(name.as_slice())
                            .map(|f| font_is_bold(f))
                            .unwrap_or(false);
                    }
                    current_font_size =
                        as_number(&op.operands[1]).unwrap_or(DEFAULT_FONT_SIZE);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        as_number(&op.operands[0]).unwrap_or(1.0),
                        as_number(&op.operands[1]).unwrap_or(0.0),
                        as_number(&op.operands[2]).unwrap_or(0.0),
                        as_number(&op.operands[3]).unwrap_or(1.0),
                        as_number(&op.operands[4]).unwrap_or(0.0),
                        as_number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if !in_text_block {
                    continue;
                }
                let text = if op.operator == "TJ" {
                    decode_tj_array(doc, &fonts, &current_font_name, op.operands.first())
                } else {
                    match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            decode_with_font(doc, &fonts, &current_font_name, bytes)
                        }
                        _ => String::new(),
                    }
                };
                push_fragment(
                    &mut fragments,
                    text,
                    &matrix,
                    current_font_size,
                    current_is_bold,
                    page_num,
                    page_height,
                );
            }
            "'" | "\"" => {
                matrix.next_line();
                if !in_text_block {
                    continue;
                }
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                    let text =
                        decode_with_font(doc, &fonts, &current_font_name, bytes);
                    push_fragment(
                        &mut fragments,
                        text,
                        &matrix,
                        current_font_size,
                        current_is_bold,
                        page_num,
                        page_height,
                    );
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

fn push_fragment(
    fragments: &mut Vec<TextFragment>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    is_bold: bool,
    page: u32,
    page_height: f32,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    // PDF y grows upward from the bottom edge; the fragment contract wants
    // 0.0 at the top.
    let y_position = (1.0 - y / page_height).clamp(0.0, 1.0);
    fragments.push(TextFragment::new(
        text,
        font_size * matrix.scale(),
        is_bold,
        page,
        y_position,
        x,
    ));
}

fn page_dimensions(doc: &LopdfDocument, page_id: ObjectId) -> (f32, f32) {
    if let Ok(page_dict) = doc.get_dictionary(page_id) {
        if let Ok(media_box) = page_dict.get(b"MediaBox") {
            if let Ok(array) = media_box.as_array() {
                if array.len() >= 4 {
                    let width = array[2].as_float().unwrap_or(DEFAULT_PAGE_WIDTH);
                    let height = array[3].as_float().unwrap_or(DEFAULT_PAGE_HEIGHT);
                    return (width, height);
                }
            }
        }
    }
    (DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT)
}

fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc.get_dictionary(page_id)?;
    let contents = page_dict.get(b"Contents")?;

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return Ok(s.decompressed_content()?);
            }
            Err(Error::Source("invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.decompressed_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::Source("invalid content stream".to_string())),
    }
}

fn font_is_bold(font_dict: &lopdf::Dictionary) -> bool {
    let base_font = font_dict
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|n| String::from_utf8_lossy(n).to_lowercase())
        .unwrap_or_default();
    base_font.contains("bold") || base_font.contains("black") || base_font.contains("heavy")
}

fn decode_with_font(
    doc: &LopdfDocument,
    fonts: &std::collections::BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    font_name: &[u8],
    bytes: &[u8],
) -> String {
    if let Some(font_dict) = fonts.get(font_name) {
        if let Ok(enc) = font_dict.get_font_encoding(doc) {
            if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                return text;
            }
        }
    }
    decode_text_simple(bytes)
}

/// Decode a TJ operand array: strings interleaved with kerning adjustments
/// in thousandths of text-space units. A large negative adjustment stands in
/// for an encoded word space.
fn decode_tj_array(
    doc: &LopdfDocument,
    fonts: &std::collections::BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    font_name: &[u8],
    operand: Option<&Object>,
) -> String {
    const SPACE_THRESHOLD: f32 = 200.0;

    let Some(Object::Array(items)) = operand else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_with_font(doc, fonts, font_name, bytes));
            }
            Object::Integer(n) => {
                if -(*n as f32) > SPACE_THRESHOLD && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
            Object::Real(n) => {
                if -n > SPACE_THRESHOLD && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Text decoding fallback when the font carries no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// PDF text matrix state, reduced to what fragment extraction needs.
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
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
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL operator would override this, but fragment
        // positions only need to be ordered, not exact.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
