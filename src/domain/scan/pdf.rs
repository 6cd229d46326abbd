//! Minimal multi-page PDF assembly for exported scans.
//!
//! Each raster becomes one full-bleed A4 page backed by a zlib-compressed
//! `/FlateDecode` DeviceRGB image XObject. The writer emits objects in a
//! fixed numbering scheme (catalog, page tree, then a page/content/image
//! triple per raster) so cross references can be computed in one pass.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use thiserror::Error;

use super::raster::Raster;

/// A4 page size in PostScript points.
const PAGE_WIDTH_PT: &str = "595.28";
const PAGE_HEIGHT_PT: &str = "841.89";

/// Errors raised while rendering a PDF.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdfError {
    #[error("cannot render a PDF with no pages")]
    Empty,
    #[error("image stream compression failed: {message}")]
    Compression { message: String },
}

fn page_object_id(index: usize) -> usize {
    3 + index * 3
}

fn content_object_id(index: usize) -> usize {
    4 + index * 3
}

fn image_object_id(index: usize) -> usize {
    5 + index * 3
}

/// Render one full-bleed A4 page per raster.
pub fn render_pdf(pages: &[Raster]) -> Result<Vec<u8>, PdfError> {
    if pages.is_empty() {
        return Err(PdfError::Empty);
    }

    let mut buffer = Vec::new();
    let mut offsets = Vec::with_capacity(2 + pages.len() * 3);
    buffer.extend_from_slice(b"%PDF-1.4\n");

    append_object(
        &mut buffer,
        &mut offsets,
        1,
        b"<< /Type /Catalog /Pages 2 0 R >>",
    );

    let kids = (0..pages.len())
        .map(|index| format!("{} 0 R", page_object_id(index)))
        .collect::<Vec<_>>()
        .join(" ");
    append_object(
        &mut buffer,
        &mut offsets,
        2,
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()).as_bytes(),
    );

    for (index, page) in pages.iter().enumerate() {
        append_page(&mut buffer, &mut offsets, index, page)?;
    }

    let xref_offset = buffer.len();
    append_xref(&mut buffer, &offsets);
    buffer.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            offsets.len() + 1
        )
        .as_bytes(),
    );
    Ok(buffer)
}

fn append_page(
    buffer: &mut Vec<u8>,
    offsets: &mut Vec<usize>,
    index: usize,
    page: &Raster,
) -> Result<(), PdfError> {
    let page_dict = format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT} {PAGE_HEIGHT_PT}] \
         /Contents {content} 0 R /Resources << /XObject << /Im{index} {image} 0 R >> >> >>",
        content = content_object_id(index),
        image = image_object_id(index),
    );
    append_object(buffer, offsets, page_object_id(index), page_dict.as_bytes());

    // Scale the unit image square to cover the whole page.
    let content = format!("q\n{PAGE_WIDTH_PT} 0 0 {PAGE_HEIGHT_PT} 0 0 cm\n/Im{index} Do\nQ\n");
    append_stream(
        buffer,
        offsets,
        content_object_id(index),
        "",
        content.as_bytes(),
    );

    let image_dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode ",
        page.width(),
        page.height(),
    );
    let compressed = compress_pixels(page.pixels())?;
    append_stream(
        buffer,
        offsets,
        image_object_id(index),
        &image_dict,
        &compressed,
    );
    Ok(())
}

fn append_object(buffer: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize, body: &[u8]) {
    debug_assert_eq!(id, offsets.len() + 1, "objects must be appended in order");
    offsets.push(buffer.len());
    buffer.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    buffer.extend_from_slice(body);
    buffer.extend_from_slice(b"\nendobj\n");
}

fn append_stream(
    buffer: &mut Vec<u8>,
    offsets: &mut Vec<usize>,
    id: usize,
    dict_entries: &str,
    stream: &[u8],
) {
    debug_assert_eq!(id, offsets.len() + 1, "objects must be appended in order");
    offsets.push(buffer.len());
    buffer.extend_from_slice(
        format!(
            "{id} 0 obj\n<< {dict_entries}/Length {} >>\nstream\n",
            stream.len()
        )
        .as_bytes(),
    );
    buffer.extend_from_slice(stream);
    buffer.extend_from_slice(b"\nendstream\nendobj\n");
}

fn append_xref(buffer: &mut Vec<u8>, offsets: &[usize]) {
    buffer.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    buffer.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        buffer.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
}

fn compress_pixels(pixels: &[u8]) -> Result<Vec<u8>, PdfError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(pixels)
        .map_err(|error| PdfError::Compression {
            message: error.to_string(),
        })?;
    encoder.finish().map_err(|error| PdfError::Compression {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use flate2::read::ZlibDecoder;

    fn page(marker: u8) -> Raster {
        Raster::from_pixels(2, 2, vec![marker; 12]).expect("valid raster")
    }

    fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
        haystack[from..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|position| position + from)
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        find(haystack, needle.as_bytes(), 0).is_some()
    }

    #[test]
    fn rejects_empty_page_list() {
        assert_eq!(render_pdf(&[]), Err(PdfError::Empty));
    }

    #[test]
    fn wraps_document_in_header_and_eof() {
        let pdf = render_pdf(&[page(1)]).expect("render");
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn declares_one_page_per_raster() {
        let pdf = render_pdf(&[page(1), page(2), page(3)]).expect("render");
        assert!(contains(&pdf, "/Count 3"));
        assert!(contains(&pdf, "/Kids [3 0 R 6 0 R 9 0 R]"));
        assert!(contains(&pdf, "/Im0 Do"));
        assert!(contains(&pdf, "/Im2 Do"));
    }

    #[test]
    fn pages_are_a4_full_bleed() {
        let pdf = render_pdf(&[page(1)]).expect("render");
        assert!(contains(&pdf, "/MediaBox [0 0 595.28 841.89]"));
        assert!(contains(&pdf, "595.28 0 0 841.89 0 0 cm"));
    }

    #[test]
    fn startxref_points_at_the_xref_table() {
        let pdf = render_pdf(&[page(1), page(2)]).expect("render");
        let start = find(&pdf, b"startxref\n", 0).expect("startxref keyword") + "startxref\n".len();
        let end = find(&pdf, b"\n", start).expect("offset line end");
        let offset: usize = std::str::from_utf8(&pdf[start..end])
            .expect("utf8 offset")
            .parse()
            .expect("numeric offset");
        assert!(pdf[offset..].starts_with(b"xref\n"));
    }

    #[test]
    fn xref_offsets_point_at_their_objects() {
        let pages = [page(1), page(2)];
        let pdf = render_pdf(&pages).expect("render");
        let table = find(&pdf, b"xref\n0 9\n", 0).expect("xref header for 9 entries");
        let mut cursor = table + "xref\n0 9\n".len() + 20;
        for id in 1..=8 {
            let entry = std::str::from_utf8(&pdf[cursor..cursor + 20]).expect("utf8 entry");
            let offset: usize = entry[..10].parse().expect("entry offset");
            let marker = format!("{id} 0 obj\n");
            assert!(
                pdf[offset..].starts_with(marker.as_bytes()),
                "entry {id} points at {offset}"
            );
            cursor += 20;
        }
    }

    #[test]
    fn image_streams_decode_back_to_the_pixels() {
        let raster = Raster::from_pixels(2, 1, vec![10, 20, 30, 40, 50, 60]).expect("raster");
        let pdf = render_pdf(std::slice::from_ref(&raster)).expect("render");

        let dict_start = find(&pdf, b"/Filter /FlateDecode /Length ", 0).expect("image dict");
        let length_start = dict_start + "/Filter /FlateDecode /Length ".len();
        let length_end = find(&pdf, b" >>", length_start).expect("dict end");
        let length: usize = std::str::from_utf8(&pdf[length_start..length_end])
            .expect("utf8 length")
            .parse()
            .expect("numeric length");
        let data_start = find(&pdf, b"stream\n", length_start).expect("stream keyword") + "stream\n".len();

        let mut decoder = ZlibDecoder::new(&pdf[data_start..data_start + length]);
        let mut pixels = Vec::new();
        decoder.read_to_end(&mut pixels).expect("valid zlib stream");
        assert_eq!(pixels, raster.pixels());
    }

    #[test]
    fn image_dimensions_match_the_raster() {
        let raster = Raster::new(3, 5).expect("raster");
        let pdf = render_pdf(std::slice::from_ref(&raster)).expect("render");
        assert!(contains(&pdf, "/Width 3 /Height 5"));
    }
}
