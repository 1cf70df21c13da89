use test_case::test_case;
use testserver::mock;

mod utils;

#[test_case(200)]
#[test_case(201)]
#[test_case(202)]
#[test_case(400)]
#[test_case(401)]
#[test_case(403)]
#[test_case(404)]
#[test_case(418)]
#[test_case(429)]
#[test_case(451)]
#[test_case(500)]
#[test_case(503)]
fn status_code_is_reported_verbatim(status: u16) {
    let m = mock! {
        status: status,
        body: r#"{"ok":false}"#,
    };

    let response = utils::fetcher(m.url()).fetch().unwrap();

    assert_eq!(response.status(), status);
    assert_eq!(m.requests().len(), 1);

    let (result, out) = utils::report(m.url());

    result.unwrap();
    assert_eq!(out, format!("Status: {}\nSome keys: ['ok']\n", status));
}
