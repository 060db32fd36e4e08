use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Directory not found at {path}")]
    DirectoryNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    /// The exporter ran but reported a failure; `message` is its own text.
    #[error("{message}")]
    ExportFailed { message: String },

    #[error("failed to launch exporter `{program}`: {source}")]
    ExporterUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// True for errors raised before any conversion is attempted.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            ConvertError::DirectoryNotFound { .. }
                | ConvertError::ConfigError { .. }
                | ConvertError::ConfigValidationError { .. }
                | ConvertError::InvalidConfigValueError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::DirectoryNotFound { .. } => {
                "Check --model-dir (or PT2ONNX_MODEL_DIR) points at an existing directory"
            }
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            ConvertError::ExporterUnavailable { .. } => {
                "Install ultralytics (pip install ultralytics) or point --command at the exporter"
            }
            ConvertError::ExportFailed { .. } => {
                "Check that the checkpoint is a valid YOLO model for the installed ultralytics version"
            }
            ConvertError::IoError(_) => "Check file permissions and available disk space",
            ConvertError::SerializationError(_) => "Check the report path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
