use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cannot parse amount {raw:?} (digits left: {stripped:?}): {source}")]
    AmountParseError {
        raw: String,
        stripped: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Amount {raw:?} (digits left: {stripped:?}) is too large to represent")]
    AmountOutOfRangeError { raw: String, stripped: String },

    #[error("Malformed artifact: {message}")]
    ArtifactError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl NormalizeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_)
            | Self::AmountParseError { .. }
            | Self::AmountOutOfRangeError { .. }
            | Self::ArtifactError { .. } => ErrorCategory::Data,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Maps severity to the process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::SerializationError(e) => format!("Input is not valid disbursement JSON: {}", e),
            Self::AmountParseError { raw, .. } => {
                format!("Amount {:?} is not a number", raw)
            }
            Self::AmountOutOfRangeError { raw, .. } => {
                format!("Amount {:?} is too large", raw)
            }
            Self::ArtifactError { message } => format!("Output artifact is malformed: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the input file exists and the output directory is writable",
            Self::SerializationError(_) => {
                "The input must be an object with a 'data' array of records carrying Constituency, category, Sub category and Amount"
            }
            Self::AmountParseError { .. } | Self::AmountOutOfRangeError { .. } => {
                "Fix the Amount field in the input; after removing currency symbols and separators it must contain at most one decimal point"
            }
            Self::ArtifactError { .. } => "Regenerate the artifact from the source data",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
