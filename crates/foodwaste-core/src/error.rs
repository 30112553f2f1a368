use thiserror::Error;

/// Errors raised while loading process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("environment variable {0} is set but empty")]
    EmptyEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when user-supplied search parameters are rejected before
/// any network call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("ZIP code must not be empty")]
    EmptyZip,

    #[error("invalid latitude \"{0}\": expected a decimal number between -90 and 90")]
    InvalidLatitude(String),

    #[error("invalid longitude \"{0}\": expected a decimal number between -180 and 180")]
    InvalidLongitude(String),

    #[error("invalid radius \"{0}\": expected a positive number of kilometres")]
    InvalidRadius(String),

    #[error("store ID must not be empty")]
    EmptyStoreId,

    #[error("invalid store ID \"{0}\": must not contain '/', '?', '#' or whitespace")]
    InvalidStoreId(String),
}
