//! Conversion of cropped page images into one-page PDF documents

use super::reader::POINTS_PER_INCH;
use crate::error::{Error, Result};
use crate::margin::Raster;
use pdfium_render::prelude::*;

/// Physical page size in points for an image of `width` x `height` pixels
/// printed at `dpi`
pub fn page_size_points(width: u32, height: u32, dpi: u32) -> (f32, f32) {
    let points_per_pixel = POINTS_PER_INCH / dpi as f32;
    (
        width as f32 * points_per_pixel,
        height as f32 * points_per_pixel,
    )
}

fn assemble_error(e: PdfiumError) -> Error {
    Error::Assemble {
        reason: e.to_string(),
    }
}

/// Build a single-page PDF whose page is exactly covered by `raster`.
///
/// The page size follows the raster's pixel size at `dpi`, so a page rendered
/// and cropped at 300 DPI keeps its physical scale.
pub fn image_to_pdf(pdfium: &Pdfium, raster: &Raster, dpi: u32) -> Result<Vec<u8>> {
    let (width, height) = page_size_points(raster.width(), raster.height(), dpi);
    let (width, height) = (PdfPoints::new(width), PdfPoints::new(height));

    let mut document = pdfium.create_new_pdf().map_err(assemble_error)?;

    {
        let mut page = document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::new_custom(width, height))
            .map_err(assemble_error)?;

        let object = PdfPageImageObject::new_with_size(&document, raster.as_image(), width, height)
            .map_err(assemble_error)?;

        page.objects_mut()
            .add_image_object(object)
            .map_err(assemble_error)?;
    }

    document.save_to_bytes().map_err(assemble_error)
}
