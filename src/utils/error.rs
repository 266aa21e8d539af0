use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Dataset archive not found: {path}")]
    FileNotFound { path: String },

    #[error("Archive contains no files: {path}")]
    EmptyArchive { path: String },

    #[error("Dataset is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Chart rendering failed: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EdaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EdaError::FileNotFound { .. } | EdaError::EmptyArchive { .. } | EdaError::ZipError(_) => {
                ErrorCategory::Input
            }
            EdaError::CsvError(_)
            | EdaError::MissingColumn { .. }
            | EdaError::ProcessingError { .. } => ErrorCategory::Data,
            EdaError::ConfigValidationError { .. }
            | EdaError::InvalidConfigValueError { .. }
            | EdaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EdaError::SerializationError(_) | EdaError::RenderError { .. } => ErrorCategory::Output,
            EdaError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EdaError::FileNotFound { .. } => {
                "Download the dataset first: kaggle datasets download -d shivamb/netflix-shows"
                    .to_string()
            }
            EdaError::EmptyArchive { .. } | EdaError::ZipError(_) => {
                "Re-download the archive; it should contain a single CSV file".to_string()
            }
            EdaError::MissingColumn { column } => format!(
                "Make sure the CSV header contains '{}' (required: date_added, release_year, country, listed_in)",
                column
            ),
            EdaError::CsvError(_) => {
                "Check that the dataset is valid CSV and release_year holds integers".to_string()
            }
            EdaError::ConfigValidationError { field, .. }
            | EdaError::InvalidConfigValueError { field, .. }
            | EdaError::MissingConfigError { field } => {
                format!("Fix '{}' in the config file or command line flags", field)
            }
            EdaError::RenderError { .. } | EdaError::SerializationError(_) => {
                "Try a different output format with --output-formats".to_string()
            }
            EdaError::ProcessingError { .. } => "Run again with --verbose for details".to_string(),
            EdaError::IoError(_) => {
                "Check file permissions and free disk space for the output path".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not open the dataset: {}", self),
            ErrorCategory::Data => format!("The dataset could not be analysed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not produce the results: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

/// 將任意繪圖錯誤轉成 RenderError
pub(crate) fn render_error<E: std::fmt::Display>(err: E) -> EdaError {
    EdaError::RenderError {
        message: err.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, EdaError>;
