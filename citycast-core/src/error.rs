//! Failure taxonomy of a single search.
//!
//! Every variant is terminal for the current attempt and renders as exactly one
//! human-readable line through its `Display` impl.

use thiserror::Error;

/// Environment variable holding the OpenWeatherMap credential.
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("API Key is missing. Set OPENWEATHERMAP_API_KEY and try again.")]
    MissingCredential,

    #[error("Could not find weather data for \"{city}\". Please check spelling.")]
    NotFound { city: String },

    #[error("Invalid API Key. Please check your configuration.")]
    InvalidCredential,

    #[error("Server Error: {status}. Please try again later.")]
    Server { status: u16 },

    /// `detail` is kept for diagnostics only.
    #[error("Network Error: Could not reach the weather service.")]
    Network { detail: String },

    #[error("An unexpected error occurred: {message}")]
    Unexpected { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Empty city or missing credential, caught before any network attempt.
    InputOrConfig,
    NotFound,
    Auth,
    Server,
    Connectivity,
    UnexpectedLocal,
}

/// How a request to the weather service went wrong, before it is phrased for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The service answered with a non-success status.
    Status(u16),
    /// The request went out but no complete response came back.
    NoResponse(String),
    /// Anything else: building the request, or decoding a successful body.
    Setup(String),
}

impl SearchError {
    /// Classify a failed fetch for `city`.
    pub fn from_failure(city: &str, failure: FetchFailure) -> Self {
        match failure {
            FetchFailure::Status(404) => SearchError::NotFound { city: city.to_string() },
            FetchFailure::Status(401) => SearchError::InvalidCredential,
            FetchFailure::Status(status) => SearchError::Server { status },
            FetchFailure::NoResponse(detail) => SearchError::Network { detail },
            FetchFailure::Setup(message) => SearchError::Unexpected { message },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::EmptyCity | SearchError::MissingCredential => ErrorCategory::InputOrConfig,
            SearchError::NotFound { .. } => ErrorCategory::NotFound,
            SearchError::InvalidCredential => ErrorCategory::Auth,
            SearchError::Server { .. } => ErrorCategory::Server,
            SearchError::Network { .. } => ErrorCategory::Connectivity,
            SearchError::Unexpected { .. } => ErrorCategory::UnexpectedLocal,
        }
    }
}
