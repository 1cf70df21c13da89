//! A tiny mock HTTP server that lets tests choose the response keyfetch
//! receives and inspect the request it sent.

mod mock;
mod pool;
mod request;
mod responder;
mod response;

pub use mock::{Builder, Mock};
pub use request::Request;
pub use responder::Responder;
pub use response::Response;

use std::net::{SocketAddr, TcpListener};

/// Get an HTTP URL on the loopback interface where nothing is listening, so
/// connecting to it is refused.
pub fn refused_url() -> String {
    let addr: SocketAddr = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .unwrap();

    format!("http://{}/", addr)
}

/// Macro to define a mock server answering every request the same way.
///
/// ```ignore
/// let m = mock! {
///     status: 404,
///     body: r#"{"message":"Not Found"}"#,
///     headers {
///         "content-type": "application/json",
///     }
/// };
/// ```
#[macro_export]
macro_rules! mock {
    ($($inner:tt)*) => {{
        let mut response = $crate::Response::default();

        $crate::__mock_response!(response $($inner)*);

        $crate::Mock::new(move |_: &$crate::Request| Some(response.clone()))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mock_response {
    ($response:ident status: $status:expr, $($tail:tt)*) => {
        $response.status_code = $status as u16;

        $crate::__mock_response!($response $($tail)*);
    };

    ($response:ident body: $body:expr, $($tail:tt)*) => {
        $response = $response.with_body($body);

        $crate::__mock_response!($response $($tail)*);
    };

    ($response:ident headers {
        $(
            $name:literal: $value:expr,
        )*
    } $($tail:tt)*) => {
        $(
            $response.headers.push(($name.to_string(), $value.to_string()));
        )*

        $crate::__mock_response!($response $($tail)*);
    };

    ($response:ident) => {};
}
