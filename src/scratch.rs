//! Scratch storage for cropped page images
//!
//! Each run gets its own temporary directory. Pages are written as
//! `page_NNNN.png` with the render DPI stored in the pHYs chunk so the page
//! size can be recovered when the PDF is rebuilt. The directory is removed
//! when the store is dropped, whichever way the pipeline exits.

use crate::error::{Error, Result};
use crate::margin::{ColorMode, Raster};
use image::DynamicImage;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "pdf-trim-";
const METERS_PER_INCH: f64 = 0.0254;

/// Convert dots-per-inch to the pixels-per-meter unit PNG stores
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Convert PNG pixels-per-meter back to dots-per-inch
pub fn ppm_to_dpi(ppm: u32) -> u32 {
    (ppm as f64 * METERS_PER_INCH).round() as u32
}

/// A page image read back from scratch storage
#[derive(Debug, Clone)]
pub struct ScratchPage {
    pub raster: Raster,
    /// Resolution from the pHYs chunk, if present and in meters
    pub dpi: Option<u32>,
}

/// Per-run temporary directory holding one PNG per page
#[derive(Debug)]
pub struct ScratchStore {
    dir: TempDir,
    pages: Vec<PathBuf>,
}

impl ScratchStore {
    /// Create a fresh directory under `root`, or under the OS temp dir
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        tracing::debug!(path = %dir.path().display(), "created scratch directory");

        Ok(Self {
            dir,
            pages: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// File name for a 0-based page index
    pub fn page_file_name(index: usize) -> String {
        format!("page_{:04}.png", index)
    }

    /// Write a cropped page and remember it in page order
    pub fn write_page(&mut self, index: usize, raster: &Raster, dpi: u32) -> Result<&Path> {
        let path = self.dir.path().join(Self::page_file_name(index));
        write_png(&path, raster, dpi)?;
        self.pages.push(path);
        Ok(self.pages[self.pages.len() - 1].as_path())
    }

    /// Paths of every written page, in the order they were written
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    /// Remove the directory now and report failures. Dropping the store
    /// also removes it, but silently.
    pub fn close(self) -> Result<()> {
        tracing::debug!(path = %self.dir.path().display(), "removing scratch directory");
        self.dir.close().map_err(Error::Io)
    }
}

/// Encode a raster as 8-bit PNG with the given resolution in pHYs
pub fn write_png(path: &Path, raster: &Raster, dpi: u32) -> Result<()> {
    let (width, height) = raster.dimensions();
    let file = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(match raster.mode() {
        ColorMode::Gray => png::ColorType::Grayscale,
        ColorMode::Rgb => png::ColorType::Rgb,
        ColorMode::Rgba => png::ColorType::Rgba,
    });
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = dpi_to_ppm(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(raster.samples())?;
    writer.finish()?;
    Ok(())
}

/// Decode a scratch PNG together with its stored resolution
pub fn read_png(path: &Path) -> Result<ScratchPage> {
    let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let dpi = reader
        .info()
        .pixel_dims
        .filter(|dims| matches!(dims.unit, png::Unit::Meter))
        .map(|dims| ppm_to_dpi(dims.xppu));

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    let (width, height) = (frame.width, frame.height);
    let image = match frame.color_type {
        png::ColorType::Grayscale => {
            image::GrayImage::from_raw(width, height, buf).map(DynamicImage::ImageLuma8)
        }
        png::ColorType::GrayscaleAlpha => {
            image::GrayAlphaImage::from_raw(width, height, buf).map(DynamicImage::ImageLumaA8)
        }
        png::ColorType::Rgb => {
            image::RgbImage::from_raw(width, height, buf).map(DynamicImage::ImageRgb8)
        }
        png::ColorType::Rgba => {
            image::RgbaImage::from_raw(width, height, buf).map(DynamicImage::ImageRgba8)
        }
        png::ColorType::Indexed => None,
    }
    .ok_or_else(|| Error::Encode {
        reason: format!("unexpected PNG layout in {}", path.display()),
    })?;

    Ok(ScratchPage {
        raster: Raster::from_image(image),
        dpi,
    })
}
