//! A single blocking GET transfer on a curl easy handle.

use crate::{
    config::{Config, RedirectPolicy},
    Error,
};
use curl::easy::{Easy2, Handler, List, WriteError};
use http::{Response, StatusCode, Version};
use std::{mem, str};

/// Perform a GET request for the configured endpoint and collect the complete
/// response, blocking the current thread until the transfer finishes.
pub(crate) fn get(config: &Config, user_agent: &str) -> Result<Response<Vec<u8>>, Error> {
    let mut easy = Easy2::new(Collector::default());

    easy.signal(false)?;
    easy.get(true)?;
    easy.url(&config.endpoint().to_string())?;
    easy.useragent(user_agent)?;

    match config.redirect_policy() {
        RedirectPolicy::None => {
            easy.follow_location(false)?;
        }
        RedirectPolicy::Follow => {
            easy.follow_location(true)?;
        }
        RedirectPolicy::Limit(max) => {
            easy.follow_location(true)?;
            easy.max_redirections(max)?;
        }
    }

    // An empty string enables every encoding curl was built with.
    if config.automatic_decompression() {
        easy.accept_encoding("")?;
    }

    let mut headers = List::new();
    headers.append("Accept: */*")?;
    easy.http_headers(headers)?;

    easy.perform()?;

    let response_code = easy.response_code()?;
    let collector = mem::take(easy.get_mut());

    collector.into_response(response_code)
}

/// The head of the most recent response seen during a transfer. Each redirect
/// hop (or interim `100 Continue`) starts a new head.
#[derive(Debug, Default)]
struct Head {
    version: Version,
    status: Option<StatusCode>,
    headers: Vec<(String, String)>,
}

/// Receives callbacks from curl and incrementally collects a response.
#[derive(Debug, Default)]
struct Collector {
    head: Head,
    body: Vec<u8>,
}

impl Collector {
    fn into_response(self, response_code: u32) -> Result<Response<Vec<u8>>, Error> {
        let status = match self.head.status {
            Some(status) => status,
            None => u16::try_from(response_code)
                .ok()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .ok_or(Error::NoResponse)?,
        };

        let mut builder = Response::builder()
            .status(status)
            .version(self.head.version);

        for (name, value) in &self.head.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        Ok(builder.body(self.body)?)
    }
}

impl Handler for Collector {
    // Gets called by curl for each line of data in the HTTP response header.
    fn header(&mut self, data: &[u8]) -> bool {
        let line = match str::from_utf8(data) {
            Ok(line) => line,
            Err(_) => {
                tracing::trace!("skipping non-UTF-8 header line");
                return true;
            }
        };

        tracing::trace!(line = line.trim_end(), "header");

        if let Some((version, status)) = parse_status_line(line) {
            self.head = Head {
                version,
                status: Some(status),
                headers: Vec::new(),
            };
        } else if let Some((name, value)) = parse_header(line) {
            self.head.headers.push((name.to_owned(), value.to_owned()));
        }

        true
    }

    // Gets called by curl when bytes from the response body are received.
    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        self.body.extend_from_slice(data);
        Ok(data.len())
    }
}

fn parse_status_line(line: &str) -> Option<(Version, StatusCode)> {
    let mut parts = line.split_whitespace();

    let version = match parts.next()? {
        "HTTP/3" => Version::HTTP_3,
        "HTTP/2" | "HTTP/2.0" => Version::HTTP_2,
        "HTTP/1.1" => Version::HTTP_11,
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/0.9" => Version::HTTP_09,
        _ => return None,
    };

    let status = parts.next()?.parse::<StatusCode>().ok()?;

    Some((version, status))
}

fn parse_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();

    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }

    Some((name, value.trim()))
}
