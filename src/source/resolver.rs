//! Input path resolution and output naming

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the input stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_cortado";

/// PDF readers accept the `%PDF` marker anywhere in this many leading bytes
const HEADER_SEARCH_LEN: usize = 1024;

/// Input file that has been checked to exist
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub source_name: String,
}

/// Resolve the input path, failing before any work if it is not a file
pub fn resolve_input<P: AsRef<Path>>(path: P) -> Result<ResolvedInput> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.display().to_string(),
        });
    }

    Ok(ResolvedInput {
        path: path.to_path_buf(),
        source_name: path.display().to_string(),
    })
}

/// Check the `%PDF` header so obviously wrong files fail with a clear message.
///
/// Leading bytes such as a byte order mark or blank lines are tolerated.
pub fn check_pdf_header(path: &Path, data: &[u8]) -> Result<()> {
    let head = &data[..data.len().min(HEADER_SEARCH_LEN)];
    if !head.windows(4).any(|w| w == b"%PDF") {
        return Err(Error::Open {
            path: path.display().to_string(),
            reason: "Not a valid PDF file".to_string(),
        });
    }
    Ok(())
}

/// `<dir>/<stem>_cortado<.ext>` for the given input
///
/// The extension is the part after the last dot of the file name; dot-files
/// such as `.hidden` have no extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let Some(stem) = input.file_stem() else {
        let mut name = input.as_os_str().to_os_string();
        name.push(OUTPUT_SUFFIX);
        return PathBuf::from(name);
    };

    let mut name = OsString::from(stem);
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("report.pdf", "report_cortado.pdf")]
    #[case("docs/report.pdf", "docs/report_cortado.pdf")]
    #[case("/abs/path/Scan 01.PDF", "/abs/path/Scan 01_cortado.PDF")]
    #[case("archive.tar.pdf", "archive.tar_cortado.pdf")]
    #[case("noext", "noext_cortado")]
    #[case(".hidden", ".hidden_cortado")]
    fn test_default_output_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(default_output_path(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn test_resolve_input_not_found() {
        let result = resolve_input("/nonexistent/path/file.pdf");
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_resolve_input_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_input(dir.path());
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_resolve_input_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.pdf");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();

        let resolved = resolve_input(&path).unwrap();
        assert_eq!(resolved.path, path);
        assert!(resolved.source_name.ends_with("in.pdf"));
    }

    #[test]
    fn test_check_pdf_header() {
        let path = Path::new("x.pdf");
        assert!(check_pdf_header(path, b"%PDF-1.4 ...").is_ok());
        assert!(matches!(
            check_pdf_header(path, b"Hello World"),
            Err(Error::Open { .. })
        ));
        assert!(check_pdf_header(path, b"%P").is_err());
        assert!(check_pdf_header(path, b"").is_err());
    }

    #[rstest]
    #[case(b"\xEF\xBB\xBF%PDF-1.4\n".to_vec())]
    #[case(b"\r\n%PDF-1.4\n".to_vec())]
    #[case(b"\n\n  %PDF-1.7\n".to_vec())]
    fn test_check_pdf_header_allows_leading_bytes(#[case] data: Vec<u8>) {
        assert!(check_pdf_header(Path::new("x.pdf"), &data).is_ok());
    }

    #[test]
    fn test_check_pdf_header_only_searches_leading_bytes() {
        let path = Path::new("x.pdf");
        let mut data = vec![b' '; HEADER_SEARCH_LEN - 4];
        data.extend_from_slice(b"%PDF-1.4\n");
        assert!(check_pdf_header(path, &data).is_ok());

        let mut late = vec![b' '; HEADER_SEARCH_LEN];
        late.extend_from_slice(b"%PDF-1.4\n");
        assert!(matches!(
            check_pdf_header(path, &late),
            Err(Error::Open { .. })
        ));
    }
}
