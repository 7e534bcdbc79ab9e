//! Client configuration types.

use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for the HTTP feed client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout covering connect, send and body read
    pub timeout: Duration,

    /// Value of the User-Agent header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in whole seconds, ignoring zero
    #[must_use]
    pub const fn timeout_secs(self, secs: u64) -> Self {
        if secs == 0 {
            self
        } else {
            self.timeout(Duration::from_secs(secs))
        }
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!("threatwatch/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("threatwatch/"));
    }

    #[test]
    fn test_zero_timeout_keeps_default() {
        assert_eq!(ClientConfig::new().timeout_secs(0).timeout, DEFAULT_TIMEOUT);
        assert_eq!(ClientConfig::new().timeout_secs(5).timeout, Duration::from_secs(5));
    }
}
