use thiserror::Error;

/// Invalid flag, config or endpoint values. Always fatal before the first request.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing endpoint (set --endpoint or provide it in the config file).")]
    MissingEndpoint,
    #[error("Invalid endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported endpoint scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[error("Endpoint '{value}' has no host.")]
    EndpointWithoutHost { value: String },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be at least 1.")]
    NotPositive,
    #[error("Invalid number '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
