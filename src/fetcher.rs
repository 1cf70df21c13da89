//! The fetcher: request the endpoint, report its status, then report the first
//! few keys of its JSON body.

use crate::{
    config::{Config, RedirectPolicy},
    keys::{self, KeyList},
    transport, Error,
};
use http::{Response, Uri};
use once_cell::sync::Lazy;
use std::{fmt, io::Write};

static USER_AGENT: Lazy<String> = Lazy::new(|| {
    format!(
        "curl/{} keyfetch/{}",
        curl::Version::get().version(),
        env!("CARGO_PKG_VERSION")
    )
});

/// A builder for [`Fetcher`] instances that differ from the default.
///
/// ```
/// use keyfetch::{config::RedirectPolicy, Fetcher};
///
/// let fetcher = Fetcher::builder()
///     .endpoint("http://127.0.0.1:8080/status")
///     .key_limit(3)
///     .redirect_policy(RedirectPolicy::None)
///     .build()?;
///
/// assert_eq!(fetcher.config().key_limit(), 3);
/// # Ok::<(), keyfetch::Error>(())
/// ```
#[derive(Debug)]
pub struct FetcherBuilder {
    config: Config,
    error: Option<Error>,
}

impl Default for FetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FetcherBuilder {
    /// Create a new builder. All settings start out with the values used by
    /// the executable.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            error: None,
        }
    }

    /// Set the URI to request. It must be absolute.
    pub fn endpoint<U>(mut self, endpoint: U) -> Self
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        if self.error.is_none() {
            match Uri::try_from(endpoint) {
                Ok(uri) if uri.scheme().is_some() && uri.authority().is_some() => {
                    self.config.endpoint = uri;
                }
                Ok(uri) => {
                    self.error = Some(Error::InvalidUri(format!(
                        "endpoint `{}` is not an absolute URI",
                        uri
                    )));
                }
                Err(e) => {
                    self.error = Some(Error::InvalidHttpFormat(e.into()));
                }
            }
        }

        self
    }

    /// Set how many top-level keys are reported.
    pub fn key_limit(mut self, limit: usize) -> Self {
        self.config.key_limit = limit;
        self
    }

    /// Set the policy for following redirects.
    pub fn redirect_policy(mut self, policy: RedirectPolicy) -> Self {
        self.config.redirect_policy = policy;
        self
    }

    /// Enable or disable decoding of compressed response bodies.
    pub fn automatic_decompression(mut self, enable: bool) -> Self {
        self.config.automatic_decompression = enable;
        self
    }

    /// Build the fetcher, or return the first error from configuring it.
    pub fn build(self) -> Result<Fetcher, Error> {
        if let Some(e) = self.error {
            return Err(e);
        }

        tracing::debug!(
            endpoint = %self.config.endpoint,
            features = env!("KEYFETCH_FEATURES"),
            "fetcher configured"
        );

        Ok(Fetcher {
            config: self.config,
        })
    }
}

/// Fetches one JSON endpoint and reports on it.
///
/// The default fetcher requests `https://api.github.com` and reports up to
/// five keys, which is exactly what [`run`](crate::run) does.
pub struct Fetcher {
    config: Config,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Create a fetcher with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn builder() -> FetcherBuilder {
        FetcherBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send the GET request and wait for the complete response.
    ///
    /// The status code is not inspected; any response the server sends is
    /// returned as-is.
    pub fn fetch(&self) -> Result<Response<Vec<u8>>, Error> {
        tracing::debug!(endpoint = %self.config.endpoint, "sending GET request");

        let response = transport::get(&self.config, &USER_AGENT)?;

        tracing::debug!(
            status = response.status().as_u16(),
            body_len = response.body().len(),
            "received response"
        );

        Ok(response)
    }

    /// Fetch the endpoint and write the report to `out`.
    ///
    /// The `Status:` line is written and flushed before the body is parsed, so
    /// it is visible even when the body turns out not to be a JSON object.
    /// Nothing is written if the request itself fails.
    pub fn run_with<W: Write>(&self, mut out: W) -> Result<(), Error> {
        let response = self.fetch()?;

        writeln!(out, "Status: {}", response.status().as_u16())?;
        out.flush()?;

        let keys = self.report_keys(response.body())?;

        writeln!(out, "Some keys: {}", keys)?;
        out.flush()?;

        Ok(())
    }

    fn report_keys(&self, body: &[u8]) -> Result<KeyList, Error> {
        let value = keys::parse_body(body)?;

        keys::top_level_keys(&value, self.config.key_limit)
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("endpoint", &self.config.endpoint)
            .field("key_limit", &self.config.key_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Fetcher: Send, Sync);

    #[test]
    fn user_agent_names_curl_and_crate() {
        assert!(USER_AGENT.starts_with("curl/"));
        assert!(USER_AGENT.ends_with(concat!(" keyfetch/", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn relative_endpoint_is_rejected() {
        let result = Fetcher::builder().endpoint("/just/a/path").build();

        assert!(matches!(result, Err(Error::InvalidUri(_))));
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        let result = Fetcher::builder().endpoint("http://exa mple.com").build();

        assert!(matches!(result, Err(Error::InvalidHttpFormat(_))));
    }

    #[test]
    fn first_error_wins() {
        let result = Fetcher::builder()
            .endpoint("relative")
            .endpoint("http://example.org")
            .build();

        assert!(matches!(result, Err(Error::InvalidUri(_))));
    }
}
