use homesync_api::models::RangeError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email and password cannot be empty")]
    EmptyCredentials,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("{0} must be a number")]
    NotNumeric(String),

    #[error("Invalid temperature range: min value must be less than max value")]
    InvalidTemperatureRange,

    #[error("Invalid humidity range: min value must be less than max value")]
    InvalidHumidityRange,

    #[error("Invalid light range: min value must be less than max value")]
    InvalidLightRange,
}

impl From<RangeError> for ValidationError {
    fn from(error: RangeError) -> Self {
        match error {
            RangeError::Temperature => ValidationError::InvalidTemperatureRange,
            RangeError::Humidity => ValidationError::InvalidHumidityRange,
            RangeError::Light => ValidationError::InvalidLightRange,
        }
    }
}
