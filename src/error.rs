use thiserror::Error;

/// Main error type for the price machine.
/// Aggregates errors from various sources including standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum PriceMachineError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    // Ingestion module errors
    #[error("{0}")]
    DiscoveryError(#[from] crate::ingest::discovery::DiscoveryError),

    #[error("{0}")]
    HeaderError(#[from] crate::ingest::header::HeaderError),

    #[error("{0}")]
    RecordError(#[from] crate::catalog::record::RecordError),

    #[error("{0}")]
    DecodeError(#[from] crate::ingest::DecodeError),

    // Configuration and report errors
    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("{0}")]
    ReportError(#[from] crate::report::ReportError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, PriceMachineError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| PriceMachineError::WithContextError(format!("{}: {}", message, e)))
    }
}
