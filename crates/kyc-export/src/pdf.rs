//! Minimal PDF 1.4 writer for image-per-page documents
//!
//! Every page holds exactly one uncompressed RGB image. Object layout:
//!
//! | Object | Content |
//! |--------|---------|
//! | 1 | Catalog |
//! | 2 | Page tree |
//! | 3 | Document info |
//! | 4 + 3n | Page n |
//! | 5 + 3n | Content stream of page n |
//! | 6 + 3n | Image of page n |

use crate::error::ExportError;
use crate::layout::{PageSize, Placement, POINTS_PER_MM};
use crate::raster::RasterImage;
use chrono::{DateTime, Utc};
use std::path::Path;

const FIRST_PAGE_OBJECT: usize = 4;
const OBJECTS_PER_PAGE: usize = 3;

#[derive(Debug, Clone)]
struct ImagePage {
    image: RasterImage,
    placement: Placement,
}

/// Paged document of captured images
#[derive(Debug, Clone)]
pub struct PdfDocument {
    page_size: PageSize,
    title: Option<String>,
    created: DateTime<Utc>,
    pages: Vec<ImagePage>,
}

impl PdfDocument {
    /// Create an empty document
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            title: None,
            created: Utc::now(),
            pages: Vec::new(),
        }
    }

    /// Set the document title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Page size of every page
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Append a page showing `image` at `placement`
    pub fn add_image_page(&mut self, image: RasterImage, placement: Placement) {
        self.pages.push(ImagePage { image, placement });
    }

    /// Number of pages
    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has no pages
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Serialize to PDF bytes
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = PdfWriter::default();
        out.raw(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        out.object(1, "<< /Type /Catalog /Pages 2 0 R >>");

        let kids: Vec<String> = (0..self.pages.len())
            .map(|n| format!("{} 0 R", page_object(n)))
            .collect();
        out.object(
            2,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                self.pages.len()
            ),
        );

        let mut info = format!(
            "<< /Producer (kyc-export {}) /CreationDate (D:{}Z)",
            crate::VERSION,
            self.created.format("%Y%m%d%H%M%S")
        );
        if let Some(title) = &self.title {
            info.push_str(&format!(" /Title ({})", escape_text(title)));
        }
        info.push_str(" >>");
        out.object(3, &info);

        let (page_w, page_h) = (self.page_size.width_pt(), self.page_size.height_pt());
        for (n, page) in self.pages.iter().enumerate() {
            let page_id = page_object(n);
            let (content_id, image_id) = (page_id + 1, page_id + 2);

            out.object(
                page_id,
                &format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {page_w:.2} {page_h:.2}] \
                     /Resources << /XObject << /Im0 {image_id} 0 R >> >> /Contents {content_id} 0 R >>"
                ),
            );

            let p = page.placement;
            let (w, h) = (p.width_mm * POINTS_PER_MM, p.height_mm * POINTS_PER_MM);
            let x = p.x_mm * POINTS_PER_MM;
            // PDF origin is bottom-left
            let y = page_h - (p.y_mm * POINTS_PER_MM) - h;
            let content = format!("q {w:.2} 0 0 {h:.2} {x:.2} {y:.2} cm /Im0 Do Q");
            out.stream(content_id, "", content.as_bytes());

            let image = &page.image;
            out.stream(
                image_id,
                &format!(
                    "/Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceRGB /BitsPerComponent 8 ",
                    image.width(),
                    image.height()
                ),
                image.pixels(),
            );
        }

        out.finish()
    }

    /// Write the document to `path`
    ///
    /// # Errors
    /// `ExportError::Io` if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()).map_err(|e| ExportError::io_error(path, e))
    }
}

fn page_object(n: usize) -> usize {
    FIRST_PAGE_OBJECT + n * OBJECTS_PER_PAGE
}

fn escape_text(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii)
        .flat_map(|c| match c {
            '(' | ')' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}

/// Byte buffer that tracks object offsets for the xref table
#[derive(Default)]
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buf.len()));
        self.raw(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, dict: &str, data: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.raw(format!("{id} 0 obj\n<< {dict}/Length {} >>\nstream\n", data.len()).as_bytes());
        self.raw(data);
        self.raw(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_at = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root 1 0 R /Info 3 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        ));
        self.raw(xref.as_bytes());
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fit_to_page;
    use crate::raster::Rgb;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    fn page(width: u32, height: u32) -> (RasterImage, Placement) {
        let image = RasterImage::filled(width, height, Rgb::WHITE).unwrap();
        let placement = fit_to_page(width, height, PageSize::A4);
        (image, placement)
    }

    #[test]
    fn empty_document_is_still_well_formed() {
        let bytes = PdfDocument::new(PageSize::A4).to_bytes();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, "/Count 0"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn one_object_triple_per_page() {
        let mut doc = PdfDocument::new(PageSize::A4).with_title("Forms (draft)");
        let (a, pa) = page(4, 2);
        let (b, pb) = page(2, 8);
        doc.add_image_page(a, pa);
        doc.add_image_page(b, pb);
        assert_eq!(doc.page_count(), 2);

        let bytes = doc.to_bytes();
        assert!(contains(&bytes, "/Kids [4 0 R 7 0 R] /Count 2"));
        assert!(contains(&bytes, "/MediaBox [0 0 595.28 841.89]"));
        assert!(contains(&bytes, "/Width 4 /Height 2"));
        assert!(contains(&bytes, "/Width 2 /Height 8"));
        assert!(contains(&bytes, "/Title (Forms \\(draft\\))"));
        assert!(contains(&bytes, "xref\n0 10\n"));
    }

    #[test]
    fn wide_image_is_drawn_at_top() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let (image, placement) = page(2, 1);
        doc.add_image_page(image, placement);

        // 210 x 105 mm at the top edge → y = 841.89 - 297.64
        let bytes = doc.to_bytes();
        assert!(contains(&bytes, "q 595.28 0 0 297.64 0.00 544.25 cm /Im0 Do Q"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let (image, placement) = page(1, 1);
        doc.add_image_page(image, placement);
        let bytes = doc.to_bytes();

        let text = String::from_utf8_lossy(&bytes);
        let xref = text.rfind("\nxref\n").unwrap() + 1;
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take(6)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.into_iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        PdfDocument::new(PageSize::A4).save(&path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));

        let missing = dir.path().join("nope").join("out.pdf");
        assert!(matches!(
            PdfDocument::new(PageSize::A4).save(&missing),
            Err(ExportError::Io { .. })
        ));
    }
}
