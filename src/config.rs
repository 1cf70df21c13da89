//! Options controlling how the endpoint is fetched and how much of the body is
//! reported.
//!
//! The executable always uses [`Config::default`]; the other values only exist
//! so that the same fetch logic can be pointed at a local server.

use http::Uri;

/// The endpoint the executable fetches.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com";

/// How many top-level keys are printed.
pub const DEFAULT_KEY_LIMIT: usize = 5;

/// Describes a policy for handling server redirects.
///
/// The default is to follow up to 30 redirects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirectPolicy {
    /// Do not apply any special treatment to redirect responses. The redirect
    /// response itself is reported.
    None,
    /// Follow all redirects automatically.
    Follow,
    /// Follow redirects automatically up to a maximum number of redirects.
    Limit(u32),
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        RedirectPolicy::Limit(30)
    }
}

/// Settings for a single fetch.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) endpoint: Uri,
    pub(crate) key_limit: usize,
    pub(crate) redirect_policy: RedirectPolicy,
    pub(crate) automatic_decompression: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Uri::from_static(DEFAULT_ENDPOINT),
            key_limit: DEFAULT_KEY_LIMIT,
            redirect_policy: RedirectPolicy::default(),
            automatic_decompression: true,
        }
    }
}

impl Config {
    /// The URI that will be requested.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Maximum number of keys reported.
    pub fn key_limit(&self) -> usize {
        self.key_limit
    }

    pub fn redirect_policy(&self) -> RedirectPolicy {
        self.redirect_policy
    }

    pub fn automatic_decompression(&self) -> bool {
        self.automatic_decompression
    }
}
