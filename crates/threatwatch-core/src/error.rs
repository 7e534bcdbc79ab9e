use thiserror::Error;

/// Result type alias for threatwatch operations
pub type Result<T> = std::result::Result<T, ThreatError>;

/// Errors that can occur while fetching or analyzing threat data
#[derive(Error, Debug)]
pub enum ThreatError {
    /// HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection to the feed failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Feed answered with a non-success status
    #[error("feed returned HTTP {code} for {url}")]
    Status {
        /// HTTP status code
        code: u16,
        /// URL that was requested
        url: String,
    },

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response was JSON but not shaped like a threat feed
    #[error("unexpected feed shape: {0}")]
    UnexpectedShape(String),

    /// A held record is not a JSON object
    #[error("threat record {index} is not an object")]
    InvalidRecord {
        /// Position of the record in the threat set
        index: usize,
    },

    /// A held record carries a severity that is not a number
    #[error("threat record {index} has non-numeric severity: {found}")]
    InvalidSeverity {
        /// Position of the record in the threat set
        index: usize,
        /// The offending value, rendered as JSON
        found: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ThreatError {
    /// Returns true if the error happened on the way to or from the feed.
    ///
    /// Transport failures are reported as an unsuccessful fetch; every other
    /// error is propagated to the caller.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Connection(_) | Self::Timeout(_) | Self::Status { .. }
        )
    }

    /// Returns the HTTP status code if the feed answered with an error status
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Attach a record position to a severity or record error.
    #[must_use]
    pub(crate) fn at_index(self, index: usize) -> Self {
        match self {
            Self::InvalidRecord { .. } => Self::InvalidRecord { index },
            Self::InvalidSeverity { found, .. } => Self::InvalidSeverity { index, found },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(ThreatError::Http("boom".into()).is_transport());
        assert!(ThreatError::Connection("refused".into()).is_transport());
        assert!(ThreatError::Timeout(30).is_transport());
        assert!(ThreatError::Status { code: 503, url: "http://x".into() }.is_transport());

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!ThreatError::Json(json).is_transport());
        assert!(!ThreatError::UnexpectedShape("list".into()).is_transport());
        assert!(!ThreatError::InvalidRecord { index: 0 }.is_transport());
    }

    #[test]
    fn test_status_code() {
        let err = ThreatError::Status { code: 404, url: "http://x".into() };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(ThreatError::Timeout(5).status_code(), None);
    }

    #[test]
    fn test_at_index_rewrites_position() {
        let err = ThreatError::InvalidSeverity { index: 0, found: "\"high\"".into() }.at_index(3);
        assert!(matches!(err, ThreatError::InvalidSeverity { index: 3, .. }));
        assert_eq!(err.to_string(), "threat record 3 has non-numeric severity: \"high\"");
    }
}
