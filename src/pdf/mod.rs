//! # PDF Surface
//!
//! A [`Surface`] that writes a PDF 1.7 file. Drawing calls are translated
//! straight into content-stream operators for the current page; nothing is
//! buffered as an intermediate display list.
//!
//! Navigation is what makes a planner PDF useful on a tablet, so every page
//! id passed to [`Surface::begin_page`] becomes a named destination, and
//! every [`Surface::link`] becomes a `/Link` annotation pointing at one by
//! name. A link to a name that no page registered is dropped when the file
//! is written.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog (with /Dests), page tree
//! 3 0 obj ... endobj  <- fonts, then per page: content stream, page
//! ...                 <- link annotations, destinations, info
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Only the standard 14 fonts are used (Helvetica, Times, Courier families)
//! with WinAnsiEncoding. Text widths come from
//! [`estimate_text_width`], so alignment and shrink-to-fit are approximate.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;
use serde::{Deserialize, Serialize};

use crate::error::GridplanError;
use crate::grid::SurfaceRect;
use crate::model::{LineStyle, TextAlign, TextWrap};
use crate::style::Color;
use crate::surface::{estimate_text_width, Stroke, Surface, TextOptions};

/// Bezier control-point factor for approximating a quarter circle.
const KAPPA: f64 = 0.5522847498;

/// Line height as a multiple of font size for wrapped text.
const LINE_HEIGHT: f64 = 1.2;

/// Smallest size shrink-to-fit will go down to.
const MIN_FONT_SIZE: f64 = 3.0;

/// Document metadata written to the PDF info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

struct PdfPage {
    content: String,
    links: Vec<(SurfaceRect, String)>,
    /// Open `q` blocks from rotations not yet popped.
    saves: usize,
}

impl PdfPage {
    fn new() -> Self {
        Self {
            content: String::new(),
            links: Vec::new(),
            saves: 0,
        }
    }
}

/// Tracks allocated PDF objects during writing.
struct PdfObject {
    data: Vec<u8>,
}

pub struct PdfSurface {
    width: f64,
    height: f64,
    pages: Vec<PdfPage>,
    /// Named destination -> page index.
    destinations: HashMap<String, usize>,
    /// Base font names in resource order (`/F0`, `/F1`, ...).
    fonts: Vec<&'static str>,
}

impl PdfSurface {
    /// A surface whose pages are `width × height` points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
            destinations: HashMap::new(),
            fonts: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the finished document.
    pub fn finish(mut self, metadata: &Metadata) -> Result<Vec<u8>, GridplanError> {
        if self.pages.is_empty() {
            return Err(GridplanError::Render("document has no pages".to_string()));
        }
        for page in &mut self.pages {
            while page.saves > 0 {
                page.content.push_str("Q\n");
                page.saves -= 1;
            }
        }

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then content streams and pages
        let mut objects: Vec<PdfObject> = (0..3).map(|_| PdfObject { data: vec![] }).collect();

        let font_ids: Vec<usize> = self
            .fonts
            .iter()
            .map(|name| {
                let id = objects.len();
                let dict = if matches!(*name, "Symbol" | "ZapfDingbats") {
                    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{name} >>")
                } else {
                    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{name} /Encoding /WinAnsiEncoding >>")
                };
                objects.push(PdfObject { data: dict.into_bytes() });
                id
            })
            .collect();
        let font_resources: String = font_ids
            .iter()
            .enumerate()
            .map(|(i, id)| format!("/F{i} {id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");

        // Content streams first, page objects reserved so destinations can
        // point at them.
        let mut page_obj_ids = Vec::with_capacity(self.pages.len());
        let mut content_ids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let compressed = compress_to_vec_zlib(page.content.as_bytes(), 6);
            let mut data: Vec<u8> = Vec::new();
            let _ = write!(
                data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            data.extend_from_slice(&compressed);
            data.extend_from_slice(b"\nendstream");
            content_ids.push(objects.len());
            objects.push(PdfObject { data });

            page_obj_ids.push(objects.len());
            objects.push(PdfObject { data: vec![] });
        }

        for (idx, page) in self.pages.iter().enumerate() {
            let mut annot_ids = Vec::new();
            for (rect, dest) in &page.links {
                if !self.destinations.contains_key(dest) {
                    tracing::warn!(destination = dest.as_str(), page = idx, "dropping link to unknown destination");
                    continue;
                }
                annot_ids.push(objects.len());
                let annot = format!(
                    "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] /Border [0 0 0] /Dest {} >>",
                    rect.x,
                    rect.bottom(),
                    rect.right(),
                    rect.y,
                    pdf_name(dest)
                );
                objects.push(PdfObject { data: annot.into_bytes() });
            }

            let annots = if annot_ids.is_empty() {
                String::new()
            } else {
                let refs: Vec<String> = annot_ids.iter().map(|id| format!("{id} 0 R")).collect();
                format!(" /Annots [{}]", refs.join(" "))
            };
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >>{} >>",
                self.width, self.height, content_ids[idx], font_resources, annots
            );
            objects[page_obj_ids[idx]].data = page_dict.into_bytes();
        }

        // Named destinations, sorted for deterministic output
        let dests_id = objects.len();
        let mut names: Vec<(&String, &usize)> = self.destinations.iter().collect();
        names.sort();
        let mut dests = String::from("<< ");
        for (name, page_idx) in names {
            let _ = write!(dests, "{} [{} 0 R /Fit] ", pdf_name(name), page_obj_ids[*page_idx]);
        }
        dests.push_str(">>");
        objects.push(PdfObject { data: dests.into_bytes() });

        objects[1].data = format!("<< /Type /Catalog /Pages 2 0 R /Dests {dests_id} 0 R >>").into_bytes();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = if metadata.title.is_some() || metadata.author.is_some() || metadata.subject.is_some() {
            let id = objects.len();
            let mut info = String::from("<< ");
            if let Some(ref title) = metadata.title {
                let _ = write!(info, "/Title ({}) ", escape_pdf_string(title));
            }
            if let Some(ref author) = metadata.author {
                let _ = write!(info, "/Author ({}) ", escape_pdf_string(author));
            }
            if let Some(ref subject) = metadata.subject {
                let _ = write!(info, "/Subject ({}) ", escape_pdf_string(subject));
            }
            info.push_str("/Producer (Gridplan) >>");
            objects.push(PdfObject { data: info.into_bytes() });
            Some(id)
        } else {
            None
        };

        tracing::debug!(
            pages = self.pages.len(),
            objects = objects.len(),
            "writing pdf"
        );
        Ok(serialize(&objects, info_obj_id))
    }

    fn page(&mut self) -> &mut PdfPage {
        if self.pages.is_empty() {
            self.pages.push(PdfPage::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn font_index(&mut self, options: &TextOptions) -> usize {
        let name = base_font(&options.font_family, options.bold, options.italic);
        match self.fonts.iter().position(|f| *f == name) {
            Some(i) => i,
            None => {
                self.fonts.push(name);
                self.fonts.len() - 1
            }
        }
    }

    fn write_stroke_state(stream: &mut String, stroke: &Stroke) {
        let _ = write!(
            stream,
            "{:.3} {:.3} {:.3} RG\n{:.2} w\n",
            stroke.color.r, stroke.color.g, stroke.color.b, stroke.width
        );
        match stroke.style {
            LineStyle::Solid => stream.push_str("[] 0 d\n"),
            LineStyle::Dashed => {
                let dash = (stroke.width * 6.0).max(2.0);
                let _ = write!(stream, "[{:.2} {:.2}] 0 d\n", dash, dash * 0.66);
            }
            LineStyle::Dotted => {
                let gap = (stroke.width * 3.0).max(1.0);
                let _ = write!(stream, "1 J\n[0 {:.2}] 0 d\n", gap);
            }
        }
    }
}

impl Surface for PdfSurface {
    fn begin_page(&mut self, id: Option<&str>) {
        self.pages.push(PdfPage::new());
        if let Some(id) = id {
            let index = self.pages.len() - 1;
            if self.destinations.insert(id.to_string(), index).is_some() {
                tracing::warn!(destination = id, "page id registered twice, last page wins");
            }
        }
    }

    fn fill_rect(&mut self, rect: SurfaceRect, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        let stream = &mut self.page().content;
        let _ = write!(
            stream,
            "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
            color.r,
            color.g,
            color.b,
            rect.x,
            rect.bottom(),
            rect.width,
            rect.height
        );
    }

    fn stroke_rect(&mut self, rect: SurfaceRect, stroke: &Stroke) {
        let stream = &mut self.page().content;
        stream.push_str("q\n");
        Self::write_stroke_state(stream, stroke);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} re\nS\nQ\n",
            rect.x,
            rect.bottom(),
            rect.width,
            rect.height
        );
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
        let (x, y) = center;
        let r = radius;
        let k = r * KAPPA;
        let stream = &mut self.page().content;
        let _ = write!(stream, "q\n{:.3} {:.3} {:.3} rg\n", color.r, color.g, color.b);
        let _ = write!(stream, "{:.2} {:.2} m\n", x + r, y);
        let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n", x + r, y + k, x + k, y + r, x, y + r);
        let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n", x - k, y + r, x - r, y + k, x - r, y);
        let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n", x - r, y - k, x - k, y - r, x, y - r);
        let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n", x + k, y - r, x + r, y - k, x + r, y);
        stream.push_str("f\nQ\n");
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        if stroke.width <= 0.0 {
            return;
        }
        let stream = &mut self.page().content;
        stream.push_str("q\n");
        Self::write_stroke_state(stream, stroke);
        let _ = write!(
            stream,
            "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
            from.0, from.1, to.0, to.1
        );
    }

    fn text(&mut self, rect: SurfaceRect, text: &str, options: &TextOptions) {
        if text.is_empty() || options.font_size <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let font = self.font_index(options);

        let mut size = options.font_size;
        let lines: Vec<String> = match options.wrap {
            TextWrap::Wrap => wrap_lines(text, rect.width, size, options.bold),
            TextWrap::Clip => vec![text.to_string()],
            TextWrap::ShrinkToFit => {
                let natural = estimate_text_width(text, size, options.bold);
                if natural > rect.width && natural > 0.0 {
                    size = (size * rect.width / natural).max(MIN_FONT_SIZE);
                }
                size = size.min(rect.height.max(MIN_FONT_SIZE));
                vec![text.to_string()]
            }
        };

        let leading = size * LINE_HEIGHT;
        let block = leading * (lines.len() as f64 - 1.0) + size;
        let (_, mid_y) = rect.center();
        // First baseline: centre the block, then drop by the cap height
        let first_baseline = mid_y + block / 2.0 - size * 0.78;

        let stream = &mut self.page().content;
        stream.push_str("q\n");
        if options.wrap == TextWrap::Clip {
            let _ = write!(
                stream,
                "{:.2} {:.2} {:.2} {:.2} re W n\n",
                rect.x,
                rect.bottom(),
                rect.width,
                rect.height
            );
        }
        let c = options.color;
        let _ = write!(stream, "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n", c.r, c.g, c.b, font, size);

        for (i, line) in lines.iter().enumerate() {
            let width = estimate_text_width(line, size, options.bold);
            let x = match options.align {
                TextAlign::Left => rect.x,
                TextAlign::Center => rect.x + (rect.width - width) / 2.0,
                TextAlign::Right => rect.right() - width,
            };
            let y = first_baseline - i as f64 * leading;
            let _ = write!(
                stream,
                "1 0 0 1 {:.2} {:.2} Tm\n({}) Tj\n",
                x,
                y,
                encode_winansi(line)
            );
        }
        stream.push_str("ET\nQ\n");
    }

    fn push_rotation(&mut self, pivot: (f64, f64), degrees: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (px, py) = pivot;
        // translate(pivot) · rotate · translate(-pivot)
        let tx = px - cos * px + sin * py;
        let ty = py - sin * px - cos * py;
        let page = self.page();
        page.saves += 1;
        let _ = write!(
            page.content,
            "q\n{:.5} {:.5} {:.5} {:.5} {:.2} {:.2} cm\n",
            cos, sin, -sin, cos, tx, ty
        );
    }

    fn pop_transform(&mut self) {
        let page = self.page();
        if page.saves > 0 {
            page.saves -= 1;
            page.content.push_str("Q\n");
        }
    }

    fn link(&mut self, rect: SurfaceRect, destination: &str) {
        self.page().links.push((rect, destination.to_string()));
    }
}

/// Map a family and variant to one of the standard 14 font names.
fn base_font(family: &str, bold: bool, italic: bool) -> &'static str {
    match (family.to_ascii_lowercase().as_str(), bold, italic) {
        ("times" | "times-roman" | "serif", false, false) => "Times-Roman",
        ("times" | "times-roman" | "serif", true, false) => "Times-Bold",
        ("times" | "times-roman" | "serif", false, true) => "Times-Italic",
        ("times" | "times-roman" | "serif", true, true) => "Times-BoldItalic",
        ("courier" | "monospace", false, false) => "Courier",
        ("courier" | "monospace", true, false) => "Courier-Bold",
        ("courier" | "monospace", false, true) => "Courier-Oblique",
        ("courier" | "monospace", true, true) => "Courier-BoldOblique",
        ("symbol", _, _) => "Symbol",
        ("zapfdingbats", _, _) => "ZapfDingbats",
        (_, false, false) => "Helvetica",
        (_, true, false) => "Helvetica-Bold",
        (_, false, true) => "Helvetica-Oblique",
        (_, true, true) => "Helvetica-BoldOblique",
    }
}

/// Greedy word wrap against the estimated width. Honours explicit newlines.
fn wrap_lines(text: &str, width: f64, size: f64, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && estimate_text_width(&candidate, size, bold) > width {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}

/// Escape special characters in a PDF string.
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// Encode text as an escaped WinAnsi literal string body.
fn encode_winansi(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte, for the characters a
/// planner realistically prints.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // euro
        0x2026 => Some(0x85), // ellipsis
        0x2022 => Some(0x95), // bullet
        0x2013 => Some(0x96), // en dash
        0x2014 => Some(0x97), // em dash
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2122 => Some(0x99), // trade mark
        _ => None,
    }
}

/// Encode a destination id as a PDF name object.
fn pdf_name(name: &str) -> String {
    let mut out = String::from("/");
    for b in name.bytes() {
        match b {
            b'!'..=b'~'
                if !matches!(b, b'#' | b'/' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'%') =>
            {
                out.push(b as char)
            }
            _ => {
                let _ = write!(out, "#{:02X}", b);
            }
        }
    }
    out
}

/// Serialize all objects into the final PDF byte stream.
fn serialize(objects: &[PdfObject], info_obj_id: Option<usize>) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (i, obj) in objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        let _ = write!(output, "{} 0 obj\n", i);
        output.extend_from_slice(&obj.data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 {}\n", objects.len());
    let _ = write!(output, "0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(output, "{:010} 00000 n \n", offset);
    }

    let _ = write!(output, "trailer\n<< /Size {} /Root 1 0 R", objects.len());
    if let Some(info_id) = info_obj_id {
        let _ = write!(output, " /Info {} 0 R", info_id);
    }
    let _ = write!(output, " >>\nstartxref\n{}\n%%EOF\n", xref_offset);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(bytes: &[u8], needle: &str) -> bool {
        bytes.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    fn options() -> TextOptions {
        TextOptions {
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
            bold: false,
            italic: false,
            color: Color::BLACK,
            align: TextAlign::Left,
            wrap: TextWrap::Clip,
        }
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string("Hello (World)"), "Hello \\(World\\)");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_empty_surface_is_an_error() {
        let surface = PdfSurface::new(600.0, 800.0);
        assert!(matches!(
            surface.finish(&Metadata::default()),
            Err(GridplanError::Render(_))
        ));
    }

    #[test]
    fn test_single_page_is_valid_pdf() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.begin_page(Some("index"));
        surface.fill_rect(SurfaceRect::new(10.0, 790.0, 100.0, 20.0), Color::gray(0.9));
        let bytes = surface.finish(&Metadata::default()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, "%%EOF"));
        assert!(contains(&bytes, "xref"));
        assert!(contains(&bytes, "/Dests"));
        assert!(contains(&bytes, "/index ["));
        assert!(contains(&bytes, "/FlateDecode"));
    }

    #[test]
    fn test_links_become_annotations_by_name() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.begin_page(Some("year"));
        surface.link(SurfaceRect::new(0.0, 800.0, 50.0, 20.0), "month-01");
        surface.link(SurfaceRect::new(0.0, 780.0, 50.0, 20.0), "missing");
        surface.begin_page(Some("month-01"));
        let bytes = surface.finish(&Metadata::default()).unwrap();

        assert!(contains(&bytes, "/Subtype /Link /Rect [0.00 780.00 50.00 800.00]"));
        assert!(contains(&bytes, "/Dest /month-01"));
        assert!(!contains(&bytes, "/Dest /missing"));
        assert!(contains(&bytes, "/Count 2"));
    }

    #[test]
    fn test_metadata_in_pdf() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.begin_page(None);
        let metadata = Metadata {
            title: Some("Planner (2026)".to_string()),
            author: Some("Gridplan".to_string()),
            subject: None,
        };
        let bytes = surface.finish(&metadata).unwrap();
        assert!(contains(&bytes, "/Title (Planner \\(2026\\))"));
        assert!(contains(&bytes, "/Author (Gridplan)"));
    }

    #[test]
    fn test_fonts_registered_once_per_variant() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.begin_page(None);
        let rect = SurfaceRect::new(0.0, 800.0, 100.0, 20.0);
        surface.text(rect, "a", &options());
        surface.text(rect, "b", &options());
        surface.text(rect, "c", &TextOptions { bold: true, ..options() });
        assert_eq!(surface.fonts, vec!["Helvetica", "Helvetica-Bold"]);

        let bytes = surface.finish(&Metadata::default()).unwrap();
        assert!(contains(&bytes, "/BaseFont /Helvetica-Bold"));
    }

    #[test]
    fn test_unbalanced_rotation_closed_on_finish() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.begin_page(None);
        surface.push_rotation((10.0, 10.0), 90.0);
        surface.pop_transform();
        surface.pop_transform();
        assert_eq!(surface.pages[0].saves, 0);
        surface.push_rotation((10.0, 10.0), 45.0);
        assert_eq!(surface.pages[0].saves, 1);
        assert!(surface.finish(&Metadata::default()).is_ok());
    }

    #[test]
    fn test_rotation_matrix_about_pivot() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.push_rotation((10.0, 20.0), 90.0);
        // 90°: (x, y) -> (-(y - 20) + 10, (x - 10) + 20)
        assert!(surface.pages[0]
            .content
            .contains("0.00000 1.00000 -1.00000 0.00000 30.00 10.00 cm"));
    }

    #[test]
    fn test_drawing_before_begin_page_opens_one() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.fill_circle((5.0, 5.0), 1.0, Color::BLACK);
        assert_eq!(surface.page_count(), 1);
    }

    #[test]
    fn test_text_in_empty_rect_is_skipped() {
        let mut surface = PdfSurface::new(600.0, 800.0);
        surface.begin_page(None);
        let options = TextOptions {
            wrap: TextWrap::ShrinkToFit,
            ..options()
        };
        surface.text(SurfaceRect::new(10.0, 700.0, 0.0, 20.0), "Hidden", &options);
        assert!(surface.pages[0].content.is_empty());
        assert!(surface.fonts.is_empty());
    }

    #[test]
    fn test_wrap_lines_breaks_on_width() {
        let lines = wrap_lines("one two three four", 40.0, 10.0, false);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "one two three four");
        assert_eq!(wrap_lines("a\nb", 500.0, 10.0, false), vec!["a", "b"]);
    }

    #[test]
    fn test_pdf_name_escapes_delimiters() {
        assert_eq!(pdf_name("week-01"), "/week-01");
        assert_eq!(pdf_name("a b/c"), "/a#20b#2Fc");
    }

    #[test]
    fn test_base_font_mapping() {
        assert_eq!(base_font("Helvetica", true, false), "Helvetica-Bold");
        assert_eq!(base_font("Times", false, true), "Times-Italic");
        assert_eq!(base_font("Unknown", false, false), "Helvetica");
    }

    #[test]
    fn test_winansi_encoding() {
        assert_eq!(encode_winansi("a(b)"), "a\\(b\\)");
        assert_eq!(encode_winansi("–"), "\\226");
        assert_eq!(encode_winansi("日"), "?");
    }
}
