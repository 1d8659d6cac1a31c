use thiserror::Error;

/// Message shown when a data source rejects without saying why.
pub const DEFAULT_FETCH_ERROR: &str = "Failed to fetch results";

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export failed: {path}: {reason}")]
    Export { path: String, reason: String },

    #[error("Could not open {url}: {source}")]
    OpenLink {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataSourceError {
    /// The source refused the request. The message is shown to the user verbatim.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Data source unavailable: {source_name}")]
    Unavailable { source_name: String },
}

impl DataSourceError {
    pub fn rejected(message: impl Into<String>) -> Self {
        DataSourceError::Rejected {
            message: message.into(),
        }
    }

    /// Text for the status area.
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_FETCH_ERROR.to_string()
        } else {
            message
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for key {key} could not be (de)serialized: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not read configuration file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
