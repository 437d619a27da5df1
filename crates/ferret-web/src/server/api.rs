//! REST API endpoints — chat, raw chat, tool and resource listings.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use super::AppState;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/raw", post(chat_raw))
        .route("/tools", get(list_tools))
        .route("/resources", get(list_resources))
}

#[derive(Deserialize)]
struct ChatBody {
    message: String,
}

async fn chat(State(state): State<Arc<AppState>>, Json(body): Json<ChatBody>) -> ApiResult {
    respond(&state, &body.message, true).await
}

async fn chat_raw(State(state): State<Arc<AppState>>, Json(body): Json<ChatBody>) -> ApiResult {
    respond(&state, &body.message, false).await
}

async fn respond(state: &AppState, message: &str, sanitize: bool) -> ApiResult {
    match state.agent.process_request(message, sanitize).await {
        Ok(response) => Ok(Json(json!({ "response": response }))),
        Err(e) => {
            error!("Chat request failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": e.to_string() })),
            ))
        }
    }
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "tools": state.agent.tools() }))
}

async fn list_resources(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "resources": state.agent.resources() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router;
    use ferret_core::{Agent, Config, OllamaBackend};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct TestApp {
        base: String,
        _workspace: tempfile::TempDir,
        _backend: MockServer,
    }

    async fn spawn_app(template: ResponseTemplate) -> TestApp {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(template)
            .mount(&backend)
            .await;

        let workspace = tempfile::tempdir().unwrap();
        let config = Config {
            base_url: backend.uri(),
            model: "test-model".into(),
            request_timeout_secs: 5,
            project_root: workspace.path().to_path_buf(),
            ..Config::default()
        };
        let agent = Agent::new(config.clone(), OllamaBackend::new(&config).unwrap()).unwrap();
        let app = router(Arc::new(AppState { agent }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestApp {
            base: format!("http://{}", addr),
            _workspace: workspace,
            _backend: backend,
        }
    }

    fn model_says(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "response": text }))
    }

    async fn post_chat(app: &TestApp, route: &str, message: &str) -> (u16, Value) {
        let resp = reqwest::Client::new()
            .post(format!("{}{}", app.base, route))
            .json(&json!({ "message": message }))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_chat_runs_tool_and_sanitizes() {
        let app = spawn_app(model_says("USE_TOOL:calculate:15*7+3")).await;
        let (status, body) = post_chat(&app, "/chat", "what is 15*7+3?").await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "response": "108" }));
    }

    #[tokio::test]
    async fn test_chat_raw_keeps_tag() {
        let app = spawn_app(model_says("USE_TOOL:get_weather:Lisbon")).await;
        let (status, body) = post_chat(&app, "/chat/raw", "weather?").await;
        assert_eq!(status, 200);
        assert_eq!(body["response"], "WEATHER: Lisbon - Sunny, 22°C");
    }

    #[tokio::test]
    async fn test_backend_failure_is_500_with_detail() {
        let app = spawn_app(ResponseTemplate::new(500).set_body_string("boom")).await;
        let (status, body) = post_chat(&app, "/chat", "hi").await;
        assert_eq!(status, 500);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Model backend error"), "got {detail}");
    }

    #[tokio::test]
    async fn test_list_tools() {
        let app = spawn_app(model_says("unused")).await;
        let body: Value = reqwest::get(format!("{}/tools", app.base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 10);
        assert!(tools.iter().any(|t| t["name"] == "calculate"
            && t["description"] == "Perform mathematical calculations"));
    }

    #[tokio::test]
    async fn test_list_resources() {
        let app = spawn_app(model_says("unused")).await;
        let body: Value = reqwest::get(format!("{}/resources", app.base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let resources = body["resources"].as_array().unwrap();
        assert_eq!(resources.len(), 3);
        assert!(resources.iter().any(|r| r["uri"] == "file://sample.txt"
            && r["mime_type"] == "text/plain"));
    }

    #[tokio::test]
    async fn test_missing_message_is_rejected() {
        let app = spawn_app(model_says("unused")).await;
        let resp = reqwest::Client::new()
            .post(format!("{}/chat", app.base))
            .json(&json!({ "text": "wrong field" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 422);
    }
}
