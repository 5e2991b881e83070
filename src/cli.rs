//! Command-line arguments

use crate::config::{TrimConfig, DEFAULT_DPI};
use clap::Parser;
use std::path::PathBuf;

/// Remove white margins from every page of a PDF
#[derive(Parser, Debug)]
#[command(name = "pdf-trim", version, about, long_about = None)]
pub struct Cli {
    /// Input PDF file
    pub input: PathBuf,

    /// Output PDF file [default: <input>_cortado.pdf]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rendering resolution in DPI
    #[arg(short, long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// Directory containing the PDFium shared library
    #[arg(long, env = "PDFIUM_LIB_DIR")]
    pub pdfium_lib: Option<PathBuf>,

    /// Do not print the per-page summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Build the run configuration from parsed arguments
    pub fn to_config(&self) -> TrimConfig {
        let mut config = TrimConfig::new(&self.input).with_dpi(self.dpi);
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if let Some(dir) = &self.pdfium_lib {
            config = config.with_pdfium_lib_dir(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pdf-trim", "report.pdf"]).unwrap();
        let config = cli.to_config();

        assert_eq!(config.input, PathBuf::from("report.pdf"));
        assert_eq!(config.output, PathBuf::from("report_cortado.pdf"));
        assert_eq!(config.dpi, 300);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_short_flags() {
        let cli =
            Cli::try_parse_from(["pdf-trim", "in.pdf", "-o", "out.pdf", "-d", "150", "-q"]).unwrap();
        let config = cli.to_config();

        assert_eq!(config.output, PathBuf::from("out.pdf"));
        assert_eq!(config.dpi, 150);
        assert!(cli.quiet);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "pdf-trim",
            "in.pdf",
            "--output",
            "cropped.pdf",
            "--dpi",
            "600",
            "--pdfium-lib",
            "/opt/pdfium/lib",
        ])
        .unwrap();
        let config = cli.to_config();

        assert_eq!(config.output, PathBuf::from("cropped.pdf"));
        assert_eq!(config.dpi, 600);
        assert_eq!(config.pdfium_lib_dir, Some(PathBuf::from("/opt/pdfium/lib")));
    }

    #[test]
    fn test_rejects_zero_and_non_numeric_dpi() {
        assert!(Cli::try_parse_from(["pdf-trim", "in.pdf", "-d", "0"]).is_err());
        assert!(Cli::try_parse_from(["pdf-trim", "in.pdf", "-d", "high"]).is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["pdf-trim"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
