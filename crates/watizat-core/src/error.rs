use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatizatError {
    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },

    #[error("Select at least one category")]
    NoCategorySelected,

    #[error("Maximum of {max} categories reached")]
    SelectionLimitExceeded { max: usize },

    #[error("Image {index} is too large ({size} bytes) - maximum is {max} bytes")]
    ImageTooLarge { index: usize, size: usize, max: usize },

    #[error("Invalid image payload {index}: expected a base64 data URI")]
    InvalidImage { index: usize },

    #[error("Registration step {step} is incomplete: {reason}")]
    IncompleteStep { step: u8, reason: String },

    #[error("Unknown value '{value}' for {kind}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Not authenticated - pass --token, set WATIZAT_TOKEN or run `watizat login`")]
    NotAuthenticated,

    #[error("API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data source available: {0}")]
    NoData(String),

    #[error("Failed to parse config: {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatizatError>;

impl WatizatError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingField { .. }
            | Self::NoCategorySelected
            | Self::ImageTooLarge { .. }
            | Self::InvalidImage { .. }
            | Self::IncompleteStep { .. }
            | Self::UnknownValue { .. } => 2,
            Self::SelectionLimitExceeded { .. } => 3,
            Self::Http { .. } | Self::Transport(_) | Self::NoData(_) => 4,
            Self::NotAuthenticated => 5,
            _ => 1,
        }
    }

    /// Validation failures are detected before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(self.exit_code(), 2 | 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(WatizatError::NoCategorySelected.exit_code(), 2);
        assert_eq!(
            WatizatError::SelectionLimitExceeded { max: 3 }.exit_code(),
            3
        );
        assert_eq!(
            WatizatError::Http {
                status: 500,
                message: "boom".to_string()
            }
            .exit_code(),
            4
        );
        assert_eq!(WatizatError::NotAuthenticated.exit_code(), 5);
        assert_eq!(
            WatizatError::ConfigKeyNotFound {
                key: "x".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(WatizatError::MissingField { field: "title" }.is_validation());
        assert!(WatizatError::SelectionLimitExceeded { max: 3 }.is_validation());
        assert!(!WatizatError::NotAuthenticated.is_validation());
    }
}
