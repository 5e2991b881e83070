//! Input resolution

pub mod resolver;

pub use resolver::{
    check_pdf_header, default_output_path, resolve_input, ResolvedInput, OUTPUT_SUFFIX,
};
