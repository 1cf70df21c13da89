//! Fetch a JSON API endpoint and print a short report about it.
//!
//! The whole job is a single blocking GET to `https://api.github.com`,
//! followed by two lines on standard output:
//!
//! ```text
//! Status: 200
//! Some keys: ['current_user_url', 'current_user_authorizations_html_url', 'authorizations_url', 'code_search_url', 'commit_search_url']
//! ```
//!
//! The status code is reported whatever it is. The keys are the first (up to)
//! five top-level keys of the response body, in the order the server sent them.
//!
//! # Errors
//!
//! Nothing is retried or recovered. A failed transfer returns an [`Error`]
//! before anything is printed; a body that is not a JSON object returns an
//! [`Error`] after the `Status:` line has already been printed.
//!
//! # Logging
//!
//! Events are emitted with [tracing] (and forwarded to [log] records), so
//! whichever subscriber or logger the caller installs will receive them. The
//! `keyfetch` binary uses `env_logger`, enabled with `RUST_LOG`.
//!
//! [log]: https://docs.rs/log
//! [tracing]: https://docs.rs/tracing

pub mod config;
pub mod keys;

mod error;
mod fetcher;
mod transport;

pub use crate::{
    error::Error,
    fetcher::{Fetcher, FetcherBuilder},
    keys::KeyList,
};

/// Fetch `https://api.github.com` and print its status and first keys to
/// standard output.
///
/// ```no_run
/// keyfetch::run()?;
/// # Ok::<(), keyfetch::Error>(())
/// ```
pub fn run() -> Result<(), Error> {
    let stdout = std::io::stdout();

    Fetcher::new().run_with(stdout.lock())
}
