//! Output document assembly and compaction through qpdf

use crate::error::{Error, Result};
use qpdf::{ObjectStreamMode, QPdf};
use std::path::Path;

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    Error::Assemble {
        reason: e.to_string(),
    }
}

/// Collects pages from one-page documents into a new output document.
///
/// Sources are kept alive until the output is written because qpdf copies
/// foreign stream data lazily.
pub struct PdfAssembler {
    dest: QPdf,
    sources: Vec<QPdf>,
    page_count: u32,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAssembler {
    /// Start from an empty document
    pub fn new() -> Self {
        Self {
            dest: QPdf::empty(),
            sources: Vec::new(),
            page_count: 0,
        }
    }

    /// Append every page of `data` to the end of the output, in order.
    /// Returns the number of pages added.
    pub fn append_document(&mut self, data: &[u8]) -> Result<u32> {
        let source = QPdf::read_from_memory(data).map_err(|e| Error::Assemble {
            reason: format!("Failed to read page document: {}", e),
        })?;

        let pages = source.get_pages().map_err(map_qpdf_error)?;
        for page in &pages {
            let copied = self.dest.copy_from_foreign(page);
            self.dest.add_page(&copied, false).map_err(map_qpdf_error)?;
        }

        let added = pages.len() as u32;
        self.page_count += added;
        self.sources.push(source);
        Ok(added)
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Write the output with unreferenced objects dropped, streams
    /// compressed, content normalized and object streams generated.
    pub fn save(self, path: &Path) -> Result<()> {
        let mut writer = self.dest.writer();
        writer
            .object_stream_mode(ObjectStreamMode::Generate)
            .compress_streams(true)
            .normalize_content(true)
            .preserve_unreferenced_objects(false)
            .preserve_encryption(false);

        writer.write(path).map_err(|e| Error::Save {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Get the page count of a PDF held in memory
pub fn page_count(data: &[u8]) -> Result<u32> {
    let qpdf = QPdf::read_from_memory(data).map_err(map_qpdf_error)?;
    qpdf.get_num_pages().map_err(map_qpdf_error)
}
