//! Run configuration

use crate::error::{Error, Result};
use crate::source::default_output_path;
use std::path::{Path, PathBuf};

/// Default rendering resolution
pub const DEFAULT_DPI: u32 = 300;

/// Settings for one trimming run
#[derive(Debug, Clone)]
pub struct TrimConfig {
    /// Source PDF
    pub input: PathBuf,
    /// Destination PDF (default: `<stem>_cortado<ext>` next to the input)
    pub output: PathBuf,
    /// Rendering resolution in dots per inch (default: 300)
    pub dpi: u32,
    /// Directory containing the PDFium shared library
    pub pdfium_lib_dir: Option<PathBuf>,
    /// Parent directory for scratch storage (default: OS temp dir)
    pub scratch_root: Option<PathBuf>,
}

impl TrimConfig {
    /// Configuration with defaults derived from the input path
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_path(&input);
        Self {
            input,
            output,
            dpi: DEFAULT_DPI,
            pdfium_lib_dir: None,
            scratch_root: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_pdfium_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdfium_lib_dir = Some(dir.into());
        self
    }

    pub fn with_scratch_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(dir.into());
        self
    }

    pub fn pdfium_lib_dir(&self) -> Option<&Path> {
        self.pdfium_lib_dir.as_deref()
    }

    pub fn scratch_root(&self) -> Option<&Path> {
        self.scratch_root.as_deref()
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::InvalidConfig {
                reason: "dpi must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrimConfig::new("docs/report.pdf");
        assert_eq!(config.dpi, 300);
        assert_eq!(config.output, PathBuf::from("docs/report_cortado.pdf"));
        assert!(config.pdfium_lib_dir().is_none());
        assert!(config.scratch_root().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters_override_defaults() {
        let config = TrimConfig::new("a.pdf")
            .with_output("b.pdf")
            .with_dpi(150)
            .with_pdfium_lib_dir("/opt/pdfium/lib")
            .with_scratch_root("/var/tmp");

        assert_eq!(config.output, PathBuf::from("b.pdf"));
        assert_eq!(config.dpi, 150);
        assert_eq!(config.pdfium_lib_dir(), Some(Path::new("/opt/pdfium/lib")));
        assert_eq!(config.scratch_root(), Some(Path::new("/var/tmp")));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let result = TrimConfig::new("a.pdf").with_dpi(0).validate();
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_output_may_overwrite_input() {
        assert!(TrimConfig::new("a.pdf").with_output("a.pdf").validate().is_ok());
        assert!(TrimConfig::new("./a.pdf").with_output("a.pdf").validate().is_ok());
    }
}
