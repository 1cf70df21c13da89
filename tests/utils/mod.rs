#![allow(dead_code)]

use keyfetch::{Error, Fetcher};
use std::sync::Once;

pub fn logging() {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// A fetcher with the executable's settings, pointed at `url` instead.
pub fn fetcher(url: impl AsRef<str>) -> Fetcher {
    logging();

    Fetcher::builder().endpoint(url.as_ref()).build().unwrap()
}

/// Run the fetcher against `url`, returning the outcome and everything that
/// was written before it finished.
pub fn report(url: impl AsRef<str>) -> (Result<(), Error>, String) {
    let mut out = Vec::new();
    let result = fetcher(url).run_with(&mut out);

    (result, String::from_utf8(out).unwrap())
}
