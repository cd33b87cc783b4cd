use thiserror::Error;

#[derive(Error, Debug)]
pub enum SorteoError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid input: {message}")]
    InvalidInputError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Participant sheet has no '{column}' column")]
    MissingColumnError { column: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("SMS gateway rejected the message (HTTP {status}): {body}")]
    SmsGatewayError { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SorteoError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInputError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::SmsGatewayError { .. } => ErrorCategory::Network,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::InvalidInputError { .. }
            | Self::MissingColumnError { .. }
            | Self::ValidationError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient: running again later may succeed.
            Self::ApiError(_) | Self::SmsGatewayError { .. } => ErrorSeverity::Medium,
            Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => {
                "The remote service did not answer in time".to_string()
            }
            Self::ApiError(_) => "Could not reach a remote service".to_string(),
            Self::SmsGatewayError { status, .. } => {
                format!("The SMS gateway refused the request (HTTP {})", status)
            }
            Self::CsvError(_) | Self::MissingColumnError { .. } => {
                format!("The participant sheet could not be read: {}", self)
            }
            Self::InvalidInputError { message } => {
                format!("The drawing cannot be made: {}", message)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check the network connection and the source/gateway URLs",
            Self::SmsGatewayError { .. } => {
                "Verify SMS_CHEF_API_KEY and that the sending device is online"
            }
            Self::CsvError(_) | Self::MissingColumnError { .. } => {
                "Make sure the sheet is exported as CSV and the column names match --name-column/--phone-column"
            }
            Self::InvalidInputError { .. } => {
                "The sheet needs at least two participants with distinct names"
            }
            Self::ValidationError { .. } => "Fix the offending row in the participant sheet",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the command line flags, .env file or TOML config",
            Self::SerializationError(_) => "The gateway returned an unexpected response format",
            Self::IoError(_) => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SorteoError>;
