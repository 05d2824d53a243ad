use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_database_connected_when_ready(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(
        body.get("database").and_then(|v| v.as_str()),
        Some("connected")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_row_ids_in_the_database(ctx: &TestContext) {
    let id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO stories (title, voice) VALUES ('Defaults', 'Puck') RETURNING id",
    )
    .fetch_one(&ctx.pool)
    .await
    .unwrap();

    assert!(!id.is_nil());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/api/stories").await.unwrap();
    response.assert_header_exists("x-request-id");

    // errors carry it too
    let response = ctx.client.get("/api/stories/not-a-story").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_each_request_its_own_id(ctx: &TestContext) {
    let first = ctx.client.get("/health").await.unwrap();
    let second = ctx.client.get("/health").await.unwrap();

    assert_ne!(first.header("x-request-id"), second.header("x-request-id"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &TestContext) {
    let mut futures = Vec::new();
    for _ in 0..10 {
        let client = ctx.client.clone();
        futures.push(async move { client.get("/health").await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
    }
}
