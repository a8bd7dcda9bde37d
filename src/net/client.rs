//! Outbound HTTP client construction.

use reqwest::{redirect, Client};
use std::time::Duration;

const USER_AGENT: &str = concat!("npm-cdn-gateway/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects followed for a single upstream GET.
pub const MAX_REDIRECTS: usize = 10;

/// Build a client with a total per-request deadline and a connect deadline.
/// Redirects are followed, so CDN aliases resolve transparently.
pub fn build_client(timeout: Duration, connect_timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .build()
}
