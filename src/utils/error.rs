use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParkingError {
    #[error("Parking lot {lot_id} not found")]
    NotFound { lot_id: i64 },

    #[error("Storage error: {0}")]
    StorageError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Fixture error: {message}")]
    FixtureError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Domain,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl ParkingError {
    pub fn not_found(lot_id: i64) -> Self {
        Self::NotFound { lot_id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Domain,
            Self::StorageError(_) | Self::StorageUnavailable { .. } | Self::IoError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::FixtureError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Domain => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Check the lot id; inactive lots are hidden from the dashboard",
            Self::StorageError(_) | Self::StorageUnavailable { .. } => {
                "Check that the database file exists and is writable"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file and CLI flags",
            Self::FixtureError { .. } => "Fix the fixture file and run the seed command again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { lot_id } => format!("No parking lot with id {lot_id}"),
            Self::StorageError(_) | Self::StorageUnavailable { .. } => {
                format!("The parking database could not be read: {self}")
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParkingError>;
