use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("mapping file not found: {path}")]
    MappingNotFound { path: String },

    #[error("target file not found: {path}")]
    TargetNotFound { path: String },

    #[error("No gallery cards found in #{gallery_id}")]
    NoCardsFound { gallery_id: String },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Mapping parse error: {0}")]
    MappingParseError(#[from] serde_json::Error),

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or unreadable inputs, bad configuration.
    Input,
    /// The document does not have the expected gallery shape.
    Structural,
    /// Filesystem failure while writing.
    System,
}

impl GalleryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GalleryError::MappingNotFound { .. }
            | GalleryError::TargetNotFound { .. }
            | GalleryError::ReadError { .. }
            | GalleryError::MappingParseError(_)
            | GalleryError::ConfigValidationError { .. }
            | GalleryError::InvalidConfigValueError { .. } => ErrorCategory::Input,
            GalleryError::NoCardsFound { .. } => ErrorCategory::Structural,
            GalleryError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Structural => 1,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GalleryError::MappingNotFound { path } => format!("Mapping file not found: {}", path),
            GalleryError::TargetNotFound { path } => format!("Target file not found: {}", path),
            GalleryError::NoCardsFound { gallery_id } => {
                format!("No gallery cards found in #{}", gallery_id)
            }
            GalleryError::MappingParseError(e) => format!("Mapping file is not valid JSON: {}", e),
            GalleryError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GalleryError::MappingNotFound { .. } => "Check the mapping path passed as the first argument",
            GalleryError::TargetNotFound { .. } => "Pass the HTML file to edit with --file",
            GalleryError::NoCardsFound { .. } => {
                "Check that the document has a gallery section with a grid of card elements, or adjust the layout file"
            }
            GalleryError::ReadError { .. } => "Check that the file is readable UTF-8 text",
            GalleryError::MappingParseError(_) => {
                "The mapping must look like {\"items\": [{\"position\": 1, \"title\": \"...\"}]}"
            }
            GalleryError::ConfigValidationError { .. }
            | GalleryError::InvalidConfigValueError { .. } => "Fix the reported option or layout key",
            GalleryError::IoError(_) => "Check file permissions and free disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
