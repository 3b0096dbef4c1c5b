//! Client configuration.

use std::time::Duration;

/// Where the server lives and how long to wait for it.
///
/// Passed explicitly to [`crate::TodoClient`] and [`crate::OpExecutor`];
/// there is no process-wide session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL of the server, e.g. `http://localhost:5000`. The resource map
    /// is fetched from here.
    pub root_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_ROOT_URL: &'static str = "http://localhost:5000";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into().trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the resource map, `{root}/`.
    pub fn resources_url(&self) -> String {
        format!("{}/", self.root_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT_URL)
    }
}
