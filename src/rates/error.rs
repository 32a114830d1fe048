use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("No rate available for {0}")]
    UnknownCurrency(String),

    #[error("Rate source has no data for base {0}")]
    UnknownBase(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Rate source error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl RateError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, base: &str, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => RateError::UnknownBase(base.to_string()),
            429 => RateError::RateLimited,
            500..=599 => RateError::ServerError(truncated),
            _ => RateError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_known_codes() {
        let err = RateError::from_status(reqwest::StatusCode::NOT_FOUND, "XXX", "");
        assert!(matches!(err, RateError::UnknownBase(_)));

        let err = RateError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "PLN", "");
        assert!(matches!(err, RateError::RateLimited));

        let err = RateError::from_status(reqwest::StatusCode::BAD_GATEWAY, "PLN", "boom");
        assert!(matches!(err, RateError::ServerError(_)));
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = RateError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "PLN", &body);
        let msg = err.to_string();
        assert!(msg.len() < 600);
        assert!(msg.contains("truncated"));
    }
}
