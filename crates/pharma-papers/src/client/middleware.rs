//! Middleware stack for the HTTP client (retries with exponential backoff).

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

/// Wrap a reqwest client with transient-failure retries.
///
/// With `max_retries == 0` the retry layer is left out entirely so a failing
/// endpoint costs exactly one request.
pub(crate) fn with_retries(client: Client, max_retries: u32) -> ClientWithMiddleware {
    if max_retries == 0 {
        return ClientBuilder::new(client).build();
    }

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
        .build_with_max_retries(max_retries);

    ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}
