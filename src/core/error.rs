//! Error types shared by the fetcher and the aggregator

use thiserror::Error;

/// Failure of a single rate request. The aggregator recovers from these by
/// skipping the affected date.
#[derive(Debug, Error)]
pub enum RequestFailed {
    #[error("Error status: {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Connection error {url}: {reason}")]
    Connection { url: String, reason: String },
    #[error("Invalid JSON body from {url}: {reason}")]
    InvalidBody { url: String, reason: String },
}

impl RequestFailed {
    pub fn url(&self) -> &str {
        match self {
            RequestFailed::Status { url, .. }
            | RequestFailed::Connection { url, .. }
            | RequestFailed::InvalidBody { url, .. } => url,
        }
    }
}

/// A response did not carry a usable quote for a requested currency.
#[derive(Debug, Error)]
#[error("No usable {currency} rate for {date}: {reason}")]
pub struct ExtractionError {
    pub date: String,
    pub currency: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_messages() {
        let err = RequestFailed::Status {
            status: 503,
            url: "http://localhost/x".to_string(),
        };
        assert_eq!(err.to_string(), "Error status: 503 for http://localhost/x");
        assert_eq!(err.url(), "http://localhost/x");

        let err = RequestFailed::Connection {
            url: "http://bad".to_string(),
            reason: "dns error".to_string(),
        };
        assert_eq!(err.to_string(), "Connection error http://bad: dns error");
    }
}
