//! Page pipeline: render, trim, stage, rebuild
//!
//! Pages are handled one at a time in document order. The source handle and
//! the scratch directory are owned by the running call and released when it
//! returns, on success and on every error path.

use crate::config::TrimConfig;
use crate::error::Result;
use crate::margin::{self, BoundingBox};
use crate::pdf::{bind_pdfium, image_to_pdf, PdfAssembler, SourceDocument};
use crate::scratch::{read_png, ScratchStore};
use crate::source::resolve_input;
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};

/// Outcome for a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// 0-based page index
    pub index: u32,
    /// Rendered size in pixels
    pub original_size: (u32, u32),
    /// Size after trimming in pixels
    pub trimmed_size: (u32, u32),
    /// Detected content box, `None` for blank pages
    pub bbox: Option<BoundingBox>,
}

impl PageReport {
    pub fn was_trimmed(&self) -> bool {
        self.original_size != self.trimmed_size
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct TrimReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dpi: u32,
    pub pages: Vec<PageReport>,
    /// Output file size in bytes
    pub output_size: u64,
}

impl TrimReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn trimmed_count(&self) -> usize {
        self.pages.iter().filter(|p| p.was_trimmed()).count()
    }
}

/// Bind PDFium and run the pipeline
pub fn process(config: &TrimConfig) -> Result<TrimReport> {
    let pdfium = bind_pdfium(config.pdfium_lib_dir())?;
    process_with(&pdfium, config)
}

/// Run the pipeline with an already bound PDFium instance
pub fn process_with(pdfium: &Pdfium, config: &TrimConfig) -> Result<TrimReport> {
    config.validate()?;
    let input = resolve_input(&config.input)?;

    tracing::info!(
        input = %input.source_name,
        output = %config.output.display(),
        dpi = config.dpi,
        "trimming PDF"
    );

    let source = SourceDocument::open(pdfium, &input.path)?;
    let mut scratch = ScratchStore::create(config.scratch_root())?;

    let pages = render_pages(&source, &mut scratch, config.dpi)?;
    assemble_output(pdfium, &scratch, config.dpi, &config.output)?;

    if let Err(e) = scratch.close() {
        tracing::warn!(error = %e, "failed to remove scratch directory");
    }

    let output_size = std::fs::metadata(&config.output)?.len();
    tracing::info!(
        pages = pages.len(),
        output_size,
        "saved {}",
        config.output.display()
    );

    Ok(TrimReport {
        input: input.path,
        output: config.output.clone(),
        dpi: config.dpi,
        pages,
        output_size,
    })
}

/// Render, trim and stage every page of `source` in order
fn render_pages(
    source: &SourceDocument<'_>,
    scratch: &mut ScratchStore,
    dpi: u32,
) -> Result<Vec<PageReport>> {
    let page_count = source.page_count();
    if page_count == 0 {
        tracing::warn!(path = %source.path().display(), "document has no pages");
    }

    let mut reports = Vec::with_capacity(page_count as usize);
    for index in 0..page_count {
        let raster = source.render_page(index, dpi)?;
        let original_size = raster.dimensions();

        let (trimmed, bbox) = margin::trim_with_bbox(raster);
        let trimmed_size = trimmed.dimensions();

        scratch.write_page(index as usize, &trimmed, dpi)?;

        tracing::debug!(
            page = index + 1,
            ?original_size,
            ?trimmed_size,
            ?bbox,
            "page trimmed"
        );

        reports.push(PageReport {
            index,
            original_size,
            trimmed_size,
            bbox,
        });
    }

    Ok(reports)
}

/// Rebuild the output from the staged images, one page per image
fn assemble_output(
    pdfium: &Pdfium,
    scratch: &ScratchStore,
    fallback_dpi: u32,
    output: &Path,
) -> Result<()> {
    let mut assembler = PdfAssembler::new();

    for path in scratch.pages() {
        let page = read_png(path)?;
        let dpi = page.dpi.unwrap_or(fallback_dpi);
        let single = image_to_pdf(pdfium, &page.raster, dpi)?;
        assembler.append_document(&single)?;
    }

    tracing::debug!(pages = assembler.page_count(), "writing output document");
    assembler.save(output)
}
