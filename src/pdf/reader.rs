//! Source document access and page rendering through PDFium

use crate::error::{Error, Result};
use crate::margin::Raster;
use crate::source::check_pdf_header;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// PDF user space unit: 1/72 inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Fallback locations tried when no library directory is configured
const PDFIUM_SEARCH_DIRS: [&str; 2] = ["./", "/opt/pdfium/lib"];

/// Bind the PDFium shared library.
///
/// With an explicit directory only that directory is tried. Otherwise the
/// current directory, `/opt/pdfium/lib` and finally the system library path
/// are searched in that order.
pub fn bind_pdfium(lib_dir: Option<&Path>) -> Result<Pdfium> {
    let bindings = match lib_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
            PDFIUM_SEARCH_DIRS[0],
        ))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                PDFIUM_SEARCH_DIRS[1],
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Error::Startup {
        reason: format!("Failed to initialize PDFium: {}", e),
    })?;

    Ok(Pdfium::new(bindings))
}

/// Scale factor that turns page points into pixels at `dpi`
pub fn render_scale(dpi: u32) -> f32 {
    dpi as f32 / POINTS_PER_INCH
}

/// An open input document. The PDFium handle is released on drop.
pub struct SourceDocument<'a> {
    document: PdfDocument<'a>,
    path: PathBuf,
}

impl<'a> SourceDocument<'a> {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(pdfium: &'a Pdfium, path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(Error::InputNotFound {
                path: path.display().to_string(),
            });
        }

        let data = std::fs::read(path)?;
        check_pdf_header(path, &data)?;

        let document = pdfium
            .load_pdf_from_byte_vec(data, None)
            .map_err(|e| Self::map_open_error(path, e))?;

        Ok(Self {
            document,
            path: path.to_path_buf(),
        })
    }

    fn map_open_error(path: &Path, err: PdfiumError) -> Error {
        let reason = match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                "PDF is password protected".to_string()
            }
            other => other.to_string(),
        };
        Error::Open {
            path: path.display().to_string(),
            reason,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    /// Render the page at 0-based `index` to a raster at `dpi`
    pub fn render_page(&self, index: u32, dpi: u32) -> Result<Raster> {
        let page_num = index + 1;
        let pages = self.document.pages();
        let page = pages
            .get(index as u16)
            .map_err(|e| Error::Render {
                page: page_num,
                reason: format!("Failed to get page: {}", e),
            })?;

        let config = PdfRenderConfig::new()
            .scale_page_by_factor(render_scale(dpi))
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| Error::Render {
                page: page_num,
                reason: e.to_string(),
            })?;

        let raster = Raster::from_image(without_alpha(bitmap.as_image()));
        if raster.width() == 0 || raster.height() == 0 {
            return Err(Error::Render {
                page: page_num,
                reason: "page rendered to an empty bitmap".to_string(),
            });
        }

        Ok(raster)
    }
}

/// Rendered pages are opaque; keep them as RGB so no soft mask is staged
fn without_alpha(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    }
}
