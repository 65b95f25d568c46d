use adf_guard::Redactor;
use adf_portal::{router, Pipeline, RetryPolicy};
use adf_search::{LinkSearch, SearchOutcome};
use adf_solver::{ChatCompletion, ChatRequest, GeneratorConfig, Role, SolutionGenerator, SolveError};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct StaticSearch {
    links: Vec<String>,
    queries: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl LinkSearch for StaticSearch {
    async fn search(&self, query: &str, limit: usize) -> adf_search::Result<SearchOutcome> {
        self.queries.lock().unwrap().push(query.to_string());
        let links: Vec<String> = self.links.iter().take(limit).cloned().collect();
        let found = links.len();
        Ok(SearchOutcome::new(links, found))
    }
}

struct ScriptedChat {
    reply: Mutex<Option<adf_solver::Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, request: &ChatRequest) -> adf_solver::Result<String> {
        if let Some(prompt) = request.content_of(Role::User) {
            self.prompts.lock().unwrap().push(prompt.to_string());
        }
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(SolveError::EmptyCompletion))
    }
}

struct Harness {
    app: Router,
    search: Arc<StaticSearch>,
    chat: Arc<ScriptedChat>,
}

fn harness(links: &[&str], reply: adf_solver::Result<String>) -> Harness {
    let search = Arc::new(StaticSearch {
        links: links.iter().map(|l| l.to_string()).collect(),
        queries: Mutex::new(vec![]),
    });
    let chat = Arc::new(ScriptedChat {
        reply: Mutex::new(Some(reply)),
        prompts: Mutex::new(vec![]),
    });
    let pipeline = Pipeline::new(
        Redactor::default(),
        search.clone(),
        SolutionGenerator::new(chat.clone(), GeneratorConfig::default()),
        3,
        RetryPolicy::None,
    );
    Harness {
        app: router(Arc::new(pipeline)),
        search,
        chat,
    }
}

fn submit(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_get_renders_form() {
    let h = harness(&[], Ok("unused".into()));
    let response = h
        .app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Azure Data Factory Support Portal"));
    assert!(page.contains("Get Solution"));
}

#[tokio::test]
async fn test_health() {
    let h = harness(&[], Ok("unused".into()));
    let response = h
        .app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_submission_redacts_and_renders() {
    let h = harness(
        &["https://learn.microsoft.com/a", "https://stackoverflow.com/q/1"],
        Ok("Use a **managed identity**.".into()),
    );
    // "My SSN is 123-45-6789, email me at a@b.com"
    let response = h
        .app
        .oneshot(submit(
            "issue=My+SSN+is+123-45-6789%2C+email+me+at+a%40b.com",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Suggested Solution"));
    assert!(page.contains("<strong>managed identity</strong>"));
    assert!(page.contains("href=\"https://stackoverflow.com/q/1\""));

    let queries = h.search.queries.lock().unwrap();
    assert_eq!(
        queries.as_slice(),
        ["My SSN is [REDACTED-SSN], email me at [REDACTED-EMAIL]"]
    );
    let prompts = h.chat.prompts.lock().unwrap();
    assert!(!prompts[0].contains("123-45-6789"));
    assert!(!prompts[0].contains("a@b.com"));
}

#[tokio::test]
async fn test_blank_submission_is_ignored() {
    let h = harness(&["https://x"], Ok("unused".into()));
    let response = h.app.oneshot(submit("issue=+++")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(!page.contains("Suggested Solution"));
    assert!(h.search.queries.lock().unwrap().is_empty());
    assert!(h.chat.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_field_is_ignored() {
    let h = harness(&[], Ok("unused".into()));
    let response = h.app.oneshot(submit("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.chat.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_completion_failure_shows_notice() {
    let h = harness(
        &["https://learn.microsoft.com/a"],
        Err(SolveError::Unauthorized {
            status: 401,
            message: "bad key".into(),
        }),
    );
    let response = h.app.oneshot(submit("issue=Trigger+not+firing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let page = body_text(response).await;
    assert!(page.contains("temporarily unavailable"));
    assert!(!page.contains("Suggested Solution"));
    assert!(!page.contains("https://learn.microsoft.com/a"));
}

#[tokio::test]
async fn test_model_html_is_escaped() {
    let h = harness(&[], Ok("Run <script>alert(1)</script> now".into()));
    let response = h.app.oneshot(submit("issue=help")).await.unwrap();

    let page = body_text(response).await;
    assert!(page.contains("&lt;script&gt;"));
    assert!(!page.contains("<script>alert"));
}
