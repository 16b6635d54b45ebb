//! Errors raised while talking to the proxy and geolocation services.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Creating the HTTP client failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} to {url} failed: {source}")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Reading the response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Decoding {what} response failed: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered, but with an `error` field of its own.
    #[error("{service} API response error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },
}

impl WeatherError {
    /// Network-level failure, as opposed to a bad or unexpected answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Client(_) | Self::Request { .. } | Self::Body { .. })
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
