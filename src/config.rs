//! Client configuration.

/// Base URL of the information system.
pub const DEFAULT_BASE_URL: &str = "https://is.muni.cz";

/// Settings used to build the HTTP client behind a `Connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the IS, without a trailing slash.
    pub base_url: String,
    /// Optional proxy URL (e.g., "http://proxy:8080" or "socks5://proxy:1080").
    pub proxy: Option<String>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Point the client at a different IS instance.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            user_agent: concat!("isapi/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
