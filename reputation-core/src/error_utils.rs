use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::DataSource(e) => {
                error!("Data source error details: {:?}", e);
            }
            CoreError::Storage(e) => {
                error!("Storage error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::DataSource(e) => e.is_retryable(),
            CoreError::Storage(e) => e.is_retryable(),
            CoreError::Config(_) => false,
            CoreError::Export { .. } | CoreError::OpenLink { .. } => true,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::DataSource(e) => e.user_friendly_message(),
            CoreError::Storage(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Export { path, .. } => {
                format!("Could not write the export to {}.", path)
            }
            CoreError::OpenLink { url, .. } => {
                format!("Could not open {} in a browser.", url)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::DataSource(_) => "DATA_SOURCE".to_string(),
            CoreError::Storage(_) => "STORAGE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Export { .. } => "EXPORT".to_string(),
            CoreError::OpenLink { .. } => "OPEN_LINK".to_string(),
        }
    }
}

impl ErrorExt for DataSourceError {
    fn log_error(&self) -> &Self {
        error!("DataSourceError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("DataSourceError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        // Never retried automatically; the user may search again.
        true
    }

    fn user_friendly_message(&self) -> String {
        self.display_message()
    }

    fn error_code(&self) -> String {
        match self {
            DataSourceError::Rejected { .. } => "SOURCE_REJECTED".to_string(),
            DataSourceError::Unavailable { .. } => "SOURCE_UNAVAILABLE".to_string(),
        }
    }
}

impl ErrorExt for StorageError {
    fn log_error(&self) -> &Self {
        error!("StorageError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("StorageError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Io { .. })
    }

    fn user_friendly_message(&self) -> String {
        match self {
            StorageError::Io { .. } => {
                "Saved searches could not be written to disk. Please try again.".to_string()
            }
            StorageError::Serialization { .. } => {
                "Saved searches could not be encoded.".to_string()
            }
            StorageError::Unavailable { .. } => {
                "Saved-search storage is unavailable.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            StorageError::Io { .. } => "STORAGE_IO".to_string(),
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION".to_string(),
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
            _ => "Configuration error occurred. Please check your settings.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::Unreadable { .. } => "CONFIG_UNREADABLE".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
            if error.is_retryable() {
                info!("The operation can be repeated");
            }
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
