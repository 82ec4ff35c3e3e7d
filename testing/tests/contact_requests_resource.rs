use xing_api::ContactRequestsResource;
use xing_api_testing::{MockResponse, ResourceTestCase};

async fn setup() -> ResourceTestCase<ContactRequestsResource> {
    ResourceTestCase::setup().await
}

#[tokio::test]
async fn test_list_contact_requests() {
    let case = setup().await;
    case.server.enqueue(MockResponse::new().with_json_body(
        r#"{
            "contact_requests": {
                "total": 2,
                "items": [
                    {"sender_id": "1_abcdef", "received_at": "2016-05-10T12:00:00Z"},
                    {"sender_id": "2_ghijkl"}
                ]
            }
        }"#,
    ));

    let response = case
        .resource
        .list_contact_requests("me", Some(10), Some(20))
        .execute()
        .await
        .expect("list_contact_requests failed");

    assert!(response.is_success());
    let requests = &response.body().expect("body must exist").contact_requests;
    assert_eq!(requests.total, 2);
    assert_eq!(requests.items.len(), 2);
    assert_eq!(requests.items[0].sender_id, "1_abcdef");

    let recorded = case.server.take_request().expect("request must be recorded");
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/v1/users/me/contact_requests?limit=10&offset=20");
    assert_eq!(recorded.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_list_contact_requests_without_paging() {
    let case = setup().await;
    case.server.enqueue(
        MockResponse::new().with_json_body(r#"{"contact_requests": {"total": 0, "items": []}}"#),
    );

    let response = case
        .resource
        .list_contact_requests("me", None, None)
        .execute()
        .await
        .expect("list_contact_requests failed");

    assert_eq!(response.body().unwrap().contact_requests.total, 0);
    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.path, "/v1/users/me/contact_requests");
}

#[tokio::test]
async fn test_send_contact_request() {
    let case = setup().await;
    case.assert_void_spec(case.resource.send_contact_request("123_abc", Some("Hi there"))).await;

    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/v1/users/123_abc/contact_requests");
    assert_eq!(recorded.body_utf8(), "message=Hi+there");
}

#[tokio::test]
async fn test_send_contact_request_without_message() {
    let case = setup().await;
    case.assert_void_spec(case.resource.send_contact_request("123_abc", None)).await;

    let recorded = case.server.take_request().unwrap();
    assert!(recorded.body.is_empty());
}

#[tokio::test]
async fn test_accept_contact_request() {
    let case = setup().await;
    case.assert_void_spec(case.resource.accept_contact_request("me", "123_abc")).await;

    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.method, "PUT");
    assert_eq!(recorded.path, "/v1/users/me/contact_requests/123_abc/accept");
}

#[tokio::test]
async fn test_decline_contact_request() {
    let case = setup().await;
    case.assert_void_spec(case.resource.decline_contact_request("me", "123_abc")).await;

    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.method, "DELETE");
    assert_eq!(recorded.path, "/v1/users/me/contact_requests/123_abc");
}

#[tokio::test]
async fn test_decline_contact_request_error_body() {
    let case = setup().await;
    case.server.enqueue(
        MockResponse::new()
            .with_status(404)
            .with_json_body(r#"{"error_name": "CONTACT_REQUEST_NOT_FOUND", "message": "Not found"}"#),
    );

    let response = case
        .resource
        .decline_contact_request("me", "999_zzz")
        .execute()
        .await
        .expect("decline_contact_request failed");

    assert!(!response.is_success());
    assert_eq!(response.code(), 404);
    let error = response.error_body().expect("error body must be decoded");
    assert_eq!(error.error_name.as_deref(), Some("CONTACT_REQUEST_NOT_FOUND"));
}
