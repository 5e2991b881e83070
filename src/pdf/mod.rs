//! PDF processing layer
//!
//! PDFium opens and renders the source and wraps cropped images as one-page
//! documents; qpdf concatenates those pages and writes the compacted output.

mod qpdf;
mod reader;
mod writer;

pub use qpdf::{page_count, PdfAssembler};
pub use reader::{bind_pdfium, render_scale, SourceDocument, POINTS_PER_INCH};
pub use writer::{image_to_pdf, page_size_points};
