use std::path::PathBuf;

/// Errors raised while converting a single annotation file.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    #[error("Missing required node `{0}`")]
    MissingNode(String),

    #[error("Field `{field}` is not an integer: {value:?}")]
    InvalidInteger { field: String, value: String },

    #[error("Image size has a zero dimension (height {height}, width {width})")]
    ZeroDimension { height: u32, width: u32 },

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Attach the path of the file being processed.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ConvertError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
