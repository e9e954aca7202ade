//! Pascal VOC to Label Studio converter
//!
//! This library converts Pascal VOC XML annotations (pixel coordinates) into
//! Label Studio JSON tasks with rectangle labels in percent coordinates.

pub mod annotation;
pub mod config;
pub mod conversion;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod io;
pub mod report;
pub mod types;
pub mod utils;
pub mod xml;

// Re-export commonly used types and functions
pub use annotation::build_annotation;
pub use config::Args;
pub use conversion::{convert_document, convert_file, convert_files, process_directory, Conversion, FileOutcome};
pub use error::ConvertError;
pub use extract::extract;
pub use report::{LogReporter, NullReporter, Reporter};
pub use types::{AnnotationDocument, Extraction, ImageSize, NormalizedBox, ProcessingStats, SkipReason};
pub use xml::XmlValue;
