use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    FileNotFoundError { path: String },

    #[error("Permission denied reading {path}")]
    PermissionDeniedError { path: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No image found at {url}")]
    NoImageError { url: String },

    #[error("Unsupported content type {content_type} at {url}")]
    UnsupportedContentError { url: String, content_type: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Chart rendering error: {message}")]
    ChartError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    FileSystem,
    Data,
    Input,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LabError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LabError::HttpError(_)
            | LabError::NoImageError { .. }
            | LabError::UnsupportedContentError { .. } => ErrorCategory::Network,
            LabError::IoError(_)
            | LabError::FileNotFoundError { .. }
            | LabError::PermissionDeniedError { .. } => ErrorCategory::FileSystem,
            LabError::CsvError(_)
            | LabError::SerializationError(_)
            | LabError::ProcessingError { .. } => ErrorCategory::Data,
            LabError::InvalidInputError { .. } => ErrorCategory::Input,
            LabError::ChartError { .. } => ErrorCategory::Rendering,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LabError::NoImageError { .. } | LabError::UnsupportedContentError { .. } => {
                ErrorSeverity::Low
            }
            LabError::HttpError(_) | LabError::InvalidInputError { .. } => ErrorSeverity::Medium,
            LabError::FileNotFoundError { .. }
            | LabError::PermissionDeniedError { .. }
            | LabError::CsvError(_)
            | LabError::ProcessingError { .. }
            | LabError::ChartError { .. } => ErrorSeverity::High,
            LabError::IoError(_) | LabError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LabError::HttpError(e) if e.is_timeout() => {
                "The request timed out. Check your connection and retry".to_string()
            }
            LabError::HttpError(_) => {
                "Check the URL and your network connection, then retry".to_string()
            }
            LabError::FileNotFoundError { path } => {
                format!(
                    "Check that '{}' exists and the filename is spelled correctly",
                    path
                )
            }
            LabError::PermissionDeniedError { path } => {
                format!("Check the read permissions on '{}'", path)
            }
            LabError::InvalidInputError { field, .. } => {
                format!("Re-enter a valid value for {}", field)
            }
            LabError::NoImageError { .. } => {
                "Try a URL that points directly at an image file".to_string()
            }
            LabError::UnsupportedContentError { .. } => {
                "Only image and HTML URLs are supported".to_string()
            }
            LabError::CsvError(_) => {
                "Check that the CSV file has the expected header row and numeric columns"
                    .to_string()
            }
            LabError::ChartError { .. } => {
                "Check that the output directory is writable, or rerun with --no-charts"
                    .to_string()
            }
            LabError::IoError(_) => "Check disk space and file permissions".to_string(),
            LabError::SerializationError(_) | LabError::ProcessingError { .. } => {
                "Rerun with --verbose to see the failing step".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LabError::InvalidInputError { reason, .. } => {
                format!("Invalid input: {}", reason)
            }
            LabError::FileNotFoundError { path } => {
                format!("The file '{}' does not exist", path)
            }
            LabError::PermissionDeniedError { path } => {
                format!("You don't have permission to read '{}'", path)
            }
            other => other.to_string(),
        }
    }

    /// Map a raw filesystem error onto the lab-specific variants so each
    /// failure mode keeps its own user-facing message.
    pub fn from_read_error(err: std::io::Error, path: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => LabError::FileNotFoundError {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => LabError::PermissionDeniedError {
                path: path.to_string(),
            },
            _ => LabError::IoError(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mapping() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "nope");
        match LabError::from_read_error(not_found, "missing.txt") {
            LabError::FileNotFoundError { path } => assert_eq!(path, "missing.txt"),
            other => panic!("unexpected variant: {:?}", other),
        }

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            LabError::from_read_error(denied, "secret.txt"),
            LabError::PermissionDeniedError { .. }
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Interrupted, "hm");
        assert!(matches!(
            LabError::from_read_error(other, "x"),
            LabError::IoError(_)
        ));
    }

    #[test]
    fn test_severity_and_category() {
        let err = LabError::NoImageError {
            url: "http://example.com".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Network);

        let err = LabError::FileNotFoundError {
            path: "input.txt".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.category(), ErrorCategory::FileSystem);
    }
}
