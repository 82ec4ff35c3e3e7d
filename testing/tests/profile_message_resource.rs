use xing_api::ProfileMessageResource;
use xing_api_testing::{MockResponse, ResourceTestCase};

#[tokio::test]
async fn test_get_profile_message() {
    let case = ResourceTestCase::<ProfileMessageResource>::setup().await;
    case.server.enqueue(MockResponse::new().with_json_body(
        r#"{"profile_message": {"message": "Looking for new challenges", "updated_at": "2016-04-01T09:00:00Z"}}"#,
    ));

    let response = case
        .resource
        .get_profile_message("me")
        .execute()
        .await
        .expect("get_profile_message failed");

    let message = &response.body().expect("body must exist").profile_message;
    assert_eq!(message.message.as_deref(), Some("Looking for new challenges"));
    assert_eq!(message.updated_at.as_deref(), Some("2016-04-01T09:00:00Z"));

    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.path, "/v1/users/me/profile_message");
}

#[tokio::test]
async fn test_get_profile_message_encodes_user_id() {
    let case = ResourceTestCase::<ProfileMessageResource>::setup().await;
    case.server
        .enqueue(MockResponse::new().with_json_body(r#"{"profile_message": {"message": null}}"#));

    let response = case
        .resource
        .get_profile_message("12 34")
        .execute()
        .await
        .unwrap();

    assert!(response.body().unwrap().profile_message.message.is_none());
    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.path, "/v1/users/12%2034/profile_message");
}

#[tokio::test]
async fn test_update_profile_message() {
    let case = ResourceTestCase::<ProfileMessageResource>::setup().await;
    case.assert_void_spec(case.resource.update_profile_message("Open to work", false)).await;

    let recorded = case.server.take_request().unwrap();
    assert_eq!(recorded.method, "PUT");
    assert_eq!(recorded.path, "/v1/users/me/profile_message");
    assert_eq!(
        recorded.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(recorded.body_utf8(), "message=Open+to+work&public=false");
}
