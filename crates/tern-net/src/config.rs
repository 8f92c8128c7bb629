//! Fetcher configuration.

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = concat!("tern/", env!("CARGO_PKG_VERSION"));

/// Redirect depth at which a chain is abandoned.
pub const MAX_REDIRECTS: u8 = 10;

/// Settings shared by every request a [`Fetcher`](crate::Fetcher) makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
    /// A redirect that would reach this depth fails the fetch instead of
    /// being followed.
    pub max_redirects: u8,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            max_redirects: MAX_REDIRECTS,
        }
    }
}

impl FetchConfig {
    /// Replace the User-Agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
