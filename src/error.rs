//! Types for error handling.

use std::{error::Error as StdError, fmt, io};

/// All possible types of errors that can be returned from keyfetch.
#[derive(Debug)]
pub enum Error {
    /// A problem occurred with the local certificate.
    BadClientCertificate(Option<String>),
    /// The server certificate could not be validated.
    BadServerCertificate(Option<String>),
    /// Failed to connect to the server.
    ConnectFailed,
    /// Couldn't resolve host name.
    CouldntResolveHost,
    /// Couldn't resolve proxy host name.
    CouldntResolveProxy,
    /// An unrecognized error thrown by curl.
    Curl(String),
    /// Unrecognized or bad content encoding returned by the server.
    InvalidContentEncoding(Option<String>),
    /// Validation error when constructing the request or parsing the response.
    InvalidHttpFormat(http::Error),
    /// The endpoint is not a valid absolute URI.
    InvalidUri(String),
    /// An I/O error, usually while writing output.
    Io(io::Error),
    /// The response body is not valid JSON.
    Json(serde_json::Error),
    /// The response body is valid JSON, but not an object with keys.
    NotAnObject,
    /// The server did not send a response.
    NoResponse,
    /// An error occurred while reading the response body.
    ResponseBodyError(Option<String>),
    /// Failed to connect over a secure socket.
    SSLConnectFailed(Option<String>),
    /// An error ocurred in the secure socket engine.
    SSLEngineError(Option<String>),
    /// The transfer took longer than curl allowed.
    Timeout,
    /// Number of redirects hit the maximum amount.
    TooManyRedirects,
}

impl Error {
    /// Returns true if the error happened before a response was received.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::BadClientCertificate(_)
                | Error::BadServerCertificate(_)
                | Error::ConnectFailed
                | Error::CouldntResolveHost
                | Error::CouldntResolveProxy
                | Error::Curl(_)
                | Error::NoResponse
                | Error::SSLConnectFailed(_)
                | Error::SSLEngineError(_)
                | Error::Timeout
                | Error::TooManyRedirects
        )
    }

    fn message(&self) -> &str {
        match self {
            Error::BadClientCertificate(Some(e)) => e,
            Error::BadServerCertificate(Some(e)) => e,
            Error::ConnectFailed => "failed to connect to the server",
            Error::CouldntResolveHost => "couldn't resolve host name",
            Error::CouldntResolveProxy => "couldn't resolve proxy host name",
            Error::Curl(e) => e,
            Error::InvalidContentEncoding(Some(e)) => e,
            Error::InvalidUri(e) => e,
            Error::NotAnObject => "response body is not a JSON object",
            Error::NoResponse => "server did not send a response",
            Error::ResponseBodyError(Some(e)) => e,
            Error::SSLConnectFailed(Some(e)) => e,
            Error::SSLEngineError(Some(e)) => e,
            Error::Timeout => "request took longer than the configured timeout",
            Error::TooManyRedirects => "max redirect limit exceeded",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidHttpFormat(e) => write!(f, "invalid HTTP message: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "invalid JSON in response body: {}", e),
            _ => f.write_str(self.message()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidHttpFormat(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<curl::Error> for Error {
    fn from(error: curl::Error) -> Error {
        let extra = || error.extra_description().map(str::to_owned);

        if error.is_ssl_certproblem() || error.is_ssl_cacert_badfile() {
            Error::BadClientCertificate(extra())
        } else if error.is_peer_failed_verification() || error.is_ssl_cacert() {
            Error::BadServerCertificate(extra())
        } else if error.is_couldnt_connect() {
            Error::ConnectFailed
        } else if error.is_couldnt_resolve_host() {
            Error::CouldntResolveHost
        } else if error.is_couldnt_resolve_proxy() {
            Error::CouldntResolveProxy
        } else if error.is_bad_content_encoding() || error.is_conv_failed() {
            Error::InvalidContentEncoding(extra())
        } else if error.is_got_nothing() {
            Error::NoResponse
        } else if error.is_write_error() || error.is_partial_file() || error.is_recv_error() {
            Error::ResponseBodyError(extra())
        } else if error.is_ssl_connect_error() {
            Error::SSLConnectFailed(extra())
        } else if error.is_ssl_engine_initfailed()
            || error.is_ssl_engine_notfound()
            || error.is_ssl_engine_setfailed()
        {
            Error::SSLEngineError(extra())
        } else if error.is_operation_timedout() {
            Error::Timeout
        } else if error.is_too_many_redirects() {
            Error::TooManyRedirects
        } else {
            Error::Curl(error.description().to_owned())
        }
    }
}

#[doc(hidden)]
impl From<http::Error> for Error {
    fn from(error: http::Error) -> Error {
        Error::InvalidHttpFormat(error)
    }
}

#[doc(hidden)]
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        match error.kind() {
            io::ErrorKind::ConnectionRefused => Error::ConnectFailed,
            io::ErrorKind::TimedOut => Error::Timeout,
            _ => Error::Io(error),
        }
    }
}

#[doc(hidden)]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Error: Send, Sync, StdError);

    #[test]
    fn curl_codes_are_classified() {
        let cases = [
            (curl_sys::CURLE_COULDNT_CONNECT, "ConnectFailed"),
            (curl_sys::CURLE_COULDNT_RESOLVE_HOST, "CouldntResolveHost"),
            (curl_sys::CURLE_OPERATION_TIMEDOUT, "Timeout"),
            (curl_sys::CURLE_TOO_MANY_REDIRECTS, "TooManyRedirects"),
            (curl_sys::CURLE_GOT_NOTHING, "NoResponse"),
        ];

        for (code, expected) in cases {
            let error = Error::from(curl::Error::new(code));
            assert!(format!("{:?}", error).starts_with(expected), "{:?}", error);
            assert!(error.is_network());
        }
    }

    #[test]
    fn json_errors_keep_their_source() {
        let json_error = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let error = Error::from(json_error);

        assert!(!error.is_network());
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("invalid JSON in response body"));
    }

    #[test]
    fn refused_io_errors_become_connect_failures() {
        let error = Error::from(io::Error::from(io::ErrorKind::ConnectionRefused));

        assert!(matches!(error, Error::ConnectFailed));
    }
}
