use testserver::mock;

mod utils;

#[test]
fn sends_a_plain_get() {
    let m = mock! {
        body: "{}",
    };

    utils::fetcher(m.url()).fetch().unwrap();

    let request = m.request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "/");
    request.expect_empty_body();
    assert_eq!(m.requests_received(), 1);
}

#[test]
fn accept_header_is_sent() {
    let m = mock! {
        body: "{}",
    };

    utils::fetcher(m.url()).fetch().unwrap();

    m.request().expect_header("accept", "*/*");
}

#[test]
fn user_agent_contains_expected_format() {
    let m = mock! {
        body: "{}",
    };

    utils::fetcher(m.url()).fetch().unwrap();

    m.request()
        .expect_header_regex("user-agent", r"^curl/\S+ keyfetch/\S+$");
}

#[test]
fn query_string_of_endpoint_is_kept() {
    let m = mock! {
        body: "{}",
    };

    utils::fetcher(format!("{}search?q=rust", m.url())).fetch().unwrap();

    assert_eq!(m.request().url, "/search?q=rust");
}
