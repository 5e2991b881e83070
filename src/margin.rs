//! Margin detection and cropping for rendered pages
//!
//! The background color is the pixel at (0,0). Every sample is compared with
//! that color, the difference is pushed through a fixed noise floor, and the
//! smallest rectangle holding every surviving pixel becomes the crop box.

use image::{DynamicImage, GenericImageView};

// ============================================================================
// Noise floor
// ============================================================================

/// Divisor applied to the summed difference (`diff + diff`)
pub const NOISE_SCALE: f32 = 2.0;

/// Offset added after scaling; negative values suppress faint differences
pub const NOISE_OFFSET: f32 = -100.0;

/// Add two difference samples with scale and offset, clamped to `0..=255`.
///
/// With both operands set to the same difference this reduces to
/// `diff - 100`, so a sample has to differ from the background by more than
/// 100 levels before it counts as content.
fn add_scaled(a: u8, b: u8, scale: f32, offset: f32) -> u8 {
    let value = (a as f32 + b as f32) / scale + offset;
    value.clamp(0.0, 255.0) as u8
}

#[inline]
fn is_content(sample: u8, background: u8) -> bool {
    let diff = sample.abs_diff(background);
    add_scaled(diff, diff, NOISE_SCALE, NOISE_OFFSET) > 0
}

// ============================================================================
// Raster types
// ============================================================================

/// Pixel layout of a raster, picked from the rendered bitmap's channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 8-bit single channel
    Gray,
    /// 8-bit RGB
    Rgb,
    /// 8-bit RGB with alpha
    Rgba,
}

impl ColorMode {
    /// 4 channels map to RGBA, 3 to RGB, anything else to grayscale
    pub fn from_channel_count(channels: u8) -> Self {
        match channels {
            4 => ColorMode::Rgba,
            3 => ColorMode::Rgb,
            _ => ColorMode::Gray,
        }
    }

    /// Samples per pixel
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

/// Content rectangle in pixel coordinates. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    fn include(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x + 1);
        self.bottom = self.bottom.max(y + 1);
    }
}

/// A rendered page held as 8-bit gray, RGB or RGBA samples
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    /// Normalize any decoded or rendered image into one of the three
    /// supported 8-bit layouts.
    pub fn from_image(image: DynamicImage) -> Self {
        let image = match ColorMode::from_channel_count(image.color().channel_count()) {
            ColorMode::Rgba => DynamicImage::ImageRgba8(image.into_rgba8()),
            ColorMode::Rgb => DynamicImage::ImageRgb8(image.into_rgb8()),
            ColorMode::Gray => DynamicImage::ImageLuma8(image.into_luma8()),
        };
        Self { image }
    }

    pub fn mode(&self) -> ColorMode {
        ColorMode::from_channel_count(self.image.color().channel_count())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw interleaved samples, row-major
    pub fn samples(&self) -> &[u8] {
        self.image.as_bytes()
    }

    /// Color of the pixel at (0,0), one entry per channel
    pub fn background(&self) -> &[u8] {
        &self.samples()[..self.mode().channels()]
    }

    /// Copy out the region covered by `bbox`
    pub fn crop(&self, bbox: BoundingBox) -> Self {
        Self {
            image: self
                .image
                .crop_imm(bbox.left, bbox.top, bbox.width(), bbox.height()),
        }
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

// ============================================================================
// Detection
// ============================================================================

/// Find the smallest box containing every pixel that differs from the
/// background by more than the noise floor. `None` for uniform rasters.
pub fn content_bbox(raster: &Raster) -> Option<BoundingBox> {
    let width = raster.width() as usize;
    if width == 0 || raster.height() == 0 {
        return None;
    }

    let channels = raster.mode().channels();
    let background = raster.background();
    let mut bbox: Option<BoundingBox> = None;

    for (index, pixel) in raster.samples().chunks_exact(channels).enumerate() {
        let differs = pixel
            .iter()
            .zip(background)
            .any(|(&sample, &bg)| is_content(sample, bg));
        if !differs {
            continue;
        }

        let x = (index % width) as u32;
        let y = (index / width) as u32;
        match bbox.as_mut() {
            Some(b) => b.include(x, y),
            None => {
                bbox = Some(BoundingBox {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                })
            }
        }
    }

    bbox
}

/// Crop a raster to its content. Uniform rasters come back untouched.
pub fn trim(raster: Raster) -> Raster {
    trim_with_bbox(raster).0
}

/// Same as [`trim`], also returning the box that was applied
pub fn trim_with_bbox(raster: Raster) -> (Raster, Option<BoundingBox>) {
    match content_bbox(&raster) {
        Some(bbox) => (raster.crop(bbox), Some(bbox)),
        None => (raster, None),
    }
}
