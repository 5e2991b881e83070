//! pdf-trim library
//!
//! Removes uniform white margins from every page of a PDF:
//! - `margin`: content bounding-box detection and cropping
//! - `pdf`: page rendering (PDFium) and output assembly (qpdf)
//! - `scratch`: per-run temporary storage for cropped page images
//! - `pipeline`: the end-to-end run over one document

pub mod cli;
pub mod config;
pub mod error;
pub mod margin;
pub mod pdf;
pub mod pipeline;
pub mod scratch;
pub mod source;

pub use cli::Cli;
pub use config::{TrimConfig, DEFAULT_DPI};
pub use error::{Error, Result};
pub use margin::{content_bbox, trim, BoundingBox, ColorMode, Raster};
pub use pipeline::{process, process_with, PageReport, TrimReport};
pub use source::default_output_path;
