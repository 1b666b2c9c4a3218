//! HTTP-level tests for the prompt endpoints.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use promptsmith::{web_server, PromptAssembler, QuestionSchema};
use serde_json::{json, Value};

fn server(schema: QuestionSchema) -> TestServer {
    let assembler = PromptAssembler::new(schema).unwrap();
    TestServer::new(web_server::router(assembler)).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_start_returns_questions() {
    let server = server(QuestionSchema::Classic);

    let response = server
        .post("/prompt")
        .json(&json!({ "mode": "start", "idea": "  a smart water bottle " }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "need_more_info");
    assert_eq!(body["idea"], "a smart water bottle");
    assert_eq!(body["questions"].as_array().unwrap().len(), 7);
}

#[test_log::test(tokio::test)]
async fn test_mode_defaults_to_start() {
    let server = server(QuestionSchema::Classic);

    let response = server.post("/prompt").json(&json!({ "idea": "podcast" })).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "need_more_info");
}

#[test_log::test(tokio::test)]
async fn test_complete_renders_prompt() {
    let server = server(QuestionSchema::Classic);

    let response = server
        .post("/prompt")
        .json(&json!({
            "mode": "COMPLETE",
            "idea": "a smart water bottle",
            "answers": { "tone": "energetic", "audience": "runners", "unknown": "x" }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "done");

    let prompt = body["prompt"].as_str().unwrap();
    let bullets: Vec<&str> = prompt.lines().filter(|l| l.starts_with("- ")).collect();
    assert!(prompt.contains("Core idea: a smart water bottle"));
    assert_eq!(bullets, vec!["- Target audience: runners", "- Tone/voice: energetic"]);
}

#[test_log::test(tokio::test)]
async fn test_complete_twice_is_identical() {
    let server = server(QuestionSchema::Classic);
    let request = json!({
        "mode": "complete",
        "idea": "meal planner",
        "answers": { "outcome": "weekly plan", "length": "one page" }
    });

    let first: Value = server.post("/prompt").json(&request).await.json();
    let second: Value = server.post("/prompt").json(&request).await.json();
    assert_eq!(first["prompt"], second["prompt"]);
}

#[test_log::test(tokio::test)]
async fn test_errors_are_ordinary_responses() {
    let server = server(QuestionSchema::Classic);

    let empty = server
        .post("/prompt")
        .json(&json!({ "mode": "start", "idea": "   " }))
        .await;
    empty.assert_status_ok();
    let body: Value = empty.json();
    assert_eq!(body["status"], "error");
    assert!(!body["message"].as_str().unwrap().is_empty());

    let missing = server.post("/prompt").json(&json!({ "mode": "complete" })).await;
    missing.assert_status_ok();
    assert_eq!(missing.json::<Value>()["status"], "error");

    let bad_mode = server
        .post("/prompt")
        .json(&json!({ "mode": "publish", "idea": "blog" }))
        .await;
    bad_mode.assert_status_ok();
    assert_eq!(
        bad_mode.json::<Value>(),
        json!({ "status": "error", "message": "Invalid mode. Use 'start' or 'complete'." })
    );
}

#[test_log::test(tokio::test)]
async fn test_wrong_body_shape_is_bad_request() {
    let server = server(QuestionSchema::Classic);

    let response = server
        .post("/prompt")
        .json(&json!({ "idea": ["not", "a", "string"] }))
        .expect_failure()
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["status"], "error");
}

#[test_log::test(tokio::test)]
async fn test_extended_schema_questions() {
    let server = server(QuestionSchema::Extended);

    let body: Value = server
        .post("/prompt")
        .json(&json!({ "idea": "newsletter" }))
        .await
        .json();

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 12);
    assert_eq!(questions[0], json!({ "key": "goal", "label": "Goal" }));

    let health: Value = server.get("/").await.json();
    assert_eq!(health["schema"], "extended");
}

#[test_log::test(tokio::test)]
async fn test_legacy_generate() {
    let server = server(QuestionSchema::Classic);

    let body: Value = server
        .post("/generate")
        .json(&json!({ "idea": " tide pools " }))
        .await
        .json();
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("explore the following idea in depth: 'tide pools'."));

    let body: Value = server.post("/generate").json(&json!({ "idea": "" })).await.json();
    assert_eq!(body["prompt"], "Please provide an idea to generate a prompt.");
}

#[test_log::test(tokio::test)]
async fn test_cors_is_permissive() {
    let server = server(QuestionSchema::Classic);

    let response = server
        .get("/")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://example.com"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}
