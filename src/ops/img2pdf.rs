//! `img2pdf`: pack one JPEG or PNG into a one-page PDF.
//!
//! JPEG is a PDF-native filter (`DCTDecode`), so the compressed file bytes
//! are embedded untouched — no decode/re-encode generation loss and no size
//! blow-up. PNG has no PDF filter equivalent; it is decoded to raw RGB and
//! left to the document-level flate pass.

use crate::error::ConvertError;
use crate::ops::ensure_exists;
use crate::pdf::{self, DocumentBuilder};
use image::GenericImageView;
use lopdf::{dictionary, Stream};
use std::path::Path;
use tracing::{debug, info};

/// Convert `input` (JPEG or PNG) into a single-page PDF at `output`,
/// page sized to the image at 1 px = 1 pt.
///
/// Returns the image dimensions in pixels.
pub fn image_to_pdf(input: &Path, output: &Path) -> Result<(u32, u32), ConvertError> {
    ensure_exists(input)?;
    let bytes = std::fs::read(input).map_err(|e| ConvertError::UnsupportedImage {
        path: input.to_path_buf(),
        detail: e.to_string(),
    })?;

    let format = image::guess_format(&bytes).map_err(|e| ConvertError::UnsupportedImage {
        path: input.to_path_buf(),
        detail: e.to_string(),
    })?;

    let xobject = match format {
        image::ImageFormat::Jpeg => jpeg_xobject(input, bytes)?,
        image::ImageFormat::Png => png_xobject(input, &bytes)?,
        other => {
            return Err(ConvertError::UnsupportedImage {
                path: input.to_path_buf(),
                detail: format!("{other:?} is not supported"),
            })
        }
    };
    let (width, height) = xobject.1;

    let mut builder = DocumentBuilder::new();
    builder.add_image_page(xobject.0, width, height)?;
    let mut doc = builder.finish();
    pdf::save_document(&mut doc, output)?;

    info!(
        "packed {} ({}x{} px) -> {}",
        input.display(),
        width,
        height,
        output.display()
    );
    Ok((width, height))
}

/// JPEG passthrough: original bytes under a `DCTDecode` filter.
fn jpeg_xobject(path: &Path, bytes: Vec<u8>) -> Result<(Stream, (u32, u32)), ConvertError> {
    // Decode only to learn dimensions and colour layout; the stream keeps
    // the untouched file bytes.
    let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg).map_err(
        |e| ConvertError::UnsupportedImage {
            path: path.to_path_buf(),
            detail: e.to_string(),
        },
    )?;
    let (width, height) = img.dimensions();
    let colorspace = match img.color() {
        image::ColorType::L8 | image::ColorType::L16 => "DeviceGray",
        _ => "DeviceRGB",
    };
    debug!("JPEG passthrough: {width}x{height} {colorspace}");

    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => colorspace,
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        bytes,
    );
    Ok((stream, (width, height)))
}

/// PNG: decode to raw RGB8; document-level compression flates it on save.
fn png_xobject(path: &Path, bytes: &[u8]) -> Result<(Stream, (u32, u32)), ConvertError> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png).map_err(
        |e| ConvertError::UnsupportedImage {
            path: path.to_path_buf(),
            detail: e.to_string(),
        },
    )?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("PNG decoded: {width}x{height} -> raw RGB");

    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb.into_raw(),
    );
    Ok((stream, (width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_fixture(dir: &Path, w: u32, h: u32) -> std::path::PathBuf {
        let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 30, 30]));
        let path = dir.join("fixture.png");
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn png_becomes_one_page_pdf_sized_to_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = png_fixture(dir.path(), 40, 25);
        let output = dir.path().join("out.pdf");

        let (w, h) = image_to_pdf(&input, &output).unwrap();
        assert_eq!((w, h), (40, 25));

        let doc = pdf::open_document(&output).unwrap();
        assert_eq!(pdf::page_count(&doc), 1);
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn missing_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = image_to_pdf(
            Path::new("/no/such/image.png"),
            &dir.path().join("out.pdf"),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("not_an_image.png");
        std::fs::write(&input, b"definitely not pixels").unwrap();
        let err = image_to_pdf(&input, &dir.path().join("out.pdf")).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedImage { .. }));
    }
}
