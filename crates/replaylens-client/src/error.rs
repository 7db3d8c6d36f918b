use std::borrow::Cow;

use replaylens_model::ModelError;

use crate::TransportError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum FetchError {
    #[display("{_0}")]
    #[from]
    Transport(TransportError),
    #[display("Failed to fetch match analysis ({status}): {body}")]
    Status {
        status: u16,
        #[error(not(source))]
        body: String,
    },
    #[display("Failed to fetch heroes ({status})")]
    HeroStatus { status: u16 },
    #[display("304 Not Modified received without cached data")]
    NotModifiedWithoutCache,
    #[display("invalid match analysis: {_0}")]
    #[from]
    Analysis(ModelError),
    #[display("invalid hero list: {_0}")]
    Heroes(serde_json::Error),
}

impl FetchError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::classify(&self.to_string())
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        user_message(&self.to_string()).into_owned()
    }
}

/// Coarse kind of a failure, derived from its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ErrorCategory {
    #[display("not found")]
    NotFound,
    #[display("timeout")]
    Timeout,
    #[display("server unavailable")]
    ServerUnavailable,
    #[display("error")]
    Generic,
}

impl ErrorCategory {
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        let has = |needle: &str| message.contains(needle);
        if has("not found") || has("404") {
            Self::NotFound
        } else if has("timeout") {
            Self::Timeout
        } else if has("server") || has("502") || has("503") {
            Self::ServerUnavailable
        } else {
            Self::Generic
        }
    }
}

/// Rewrites a technical failure message for display.
///
/// Messages without a known pattern are returned unchanged.
#[must_use]
pub fn user_message(message: &str) -> Cow<'_, str> {
    let has = |needle: &str| message.contains(needle);
    let friendly = if has("Replay URL not found") {
        "This match replay is not available. It may not have been uploaded yet, or the match ID may be incorrect."
    } else if has("502") || has("Bad Gateway") {
        "The parser service is temporarily unavailable. Please try again in a moment."
    } else if has("503") || has("Service Unavailable") {
        "The service is temporarily unavailable. Please try again shortly."
    } else if has("timeout") {
        "The request took too long to complete. The server may be busy, please try again."
    } else if has("404") || has("not found") {
        return Cow::Borrowed(message);
    } else if has("Network error") {
        "Unable to connect to the server. Please check your internet connection and try again."
    } else {
        return Cow::Borrowed(message);
    };
    Cow::Borrowed(friendly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            ErrorCategory::classify("Match Not Found"),
            ErrorCategory::NotFound
        );
        assert_eq!(
            ErrorCategory::classify("Failed to fetch match analysis (404): nope"),
            ErrorCategory::NotFound
        );
        assert_eq!(
            ErrorCategory::classify("request timeout"),
            ErrorCategory::Timeout
        );
        assert_eq!(
            ErrorCategory::classify("Internal Server Error"),
            ErrorCategory::ServerUnavailable
        );
        assert_eq!(
            ErrorCategory::classify("(503)"),
            ErrorCategory::ServerUnavailable
        );
        assert_eq!(ErrorCategory::classify("bad json"), ErrorCategory::Generic);
    }

    #[test]
    fn test_user_messages() {
        assert!(user_message("Replay URL not found for 1").starts_with("This match replay"));
        assert!(user_message("(502) Bad Gateway").starts_with("The parser service"));
        assert!(user_message("Service Unavailable").starts_with("The service is"));
        assert!(user_message("request timeout: x").starts_with("The request took"));
        assert_eq!(user_message("match 9 not found"), "match 9 not found");
        assert!(user_message("Network error: refused").starts_with("Unable to connect"));
        assert_eq!(user_message("something odd"), "something odd");
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: 502,
            body: "upstream".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch match analysis (502): upstream"
        );

        assert_eq!(err.category(), ErrorCategory::ServerUnavailable);
    }
}
