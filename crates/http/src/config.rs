//! Client configuration loaded from the environment.

use std::time::Duration;

/// Default timeout for [`JsonClient::fetch`](crate::JsonClient::fetch).
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;

/// Default overall timeout applied by the underlying reqwest client.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("snipkit/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`JsonClient`](crate::JsonClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Timer raced against the request in `fetch`
    pub fetch_timeout: Duration,
    /// Hard limit reqwest applies to every request, including JSON calls
    pub client_timeout: Duration,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            client_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Create config from environment variables.
    ///
    /// Uses `SNIPKIT_HTTP_TIMEOUT_MS`, `SNIPKIT_HTTP_CLIENT_TIMEOUT_SECS` and
    /// `SNIPKIT_USER_AGENT`, falling back to defaults if unset or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let fetch_timeout = parse_u64(&lookup, "SNIPKIT_HTTP_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.fetch_timeout);
        let client_timeout = parse_u64(&lookup, "SNIPKIT_HTTP_CLIENT_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.client_timeout);
        let user_agent = lookup("SNIPKIT_USER_AGENT")
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        Self {
            fetch_timeout,
            client_timeout,
            user_agent,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_client_timeout(mut self, timeout: Duration) -> Self {
        self.client_timeout = timeout;
        self
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid numeric setting");
            None
        }
    }
}
