use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use services::{
    AnalysisError, AnalysisService, AnthropicClient, CredentialCheck, LanguageModel,
    LanguageModelConfig, LanguageModelError, LocalGateway, StudyGateway,
};
use study_core::analysis::AnalysisRequest;
use study_core::model::{Accuracy, Language};

struct ScriptedModel {
    reply: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

fn ready_request() -> AnalysisRequest {
    AnalysisRequest {
        topic: "Photosynthesis".into(),
        student_name: "Mia".into(),
        school_grade: "7".into(),
        accuracy: Accuracy::Basic,
        language: Language::English,
        bullet_points: "- light\n- chlorophyll".into(),
        prepared_text: "notes".into(),
        spoken_text: "Plants use light and chlorophyll.".into(),
    }
}

#[tokio::test]
async fn pretty_printed_reply_becomes_feedback() {
    let model = ScriptedModel::new(
        "{\n  \"success\": true,\n  \"message\": \"Both facts covered.\nWell done.\",\n  \"details\": \"none missing\"\n}",
    );
    let service = AnalysisService::new(Some(model.clone() as Arc<dyn LanguageModel>));

    let result = service.analyze(&ready_request()).await.unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Both facts covered.\nWell done.");
    assert_eq!(result.details.as_deref(), Some("none missing"));

    assert_eq!(model.calls(), 1);
    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].contains("Mia"));
    assert!(prompts[0].contains("- chlorophyll"));
    assert!(!prompts[0].contains("notes"));
}

#[tokio::test]
async fn missing_input_never_reaches_the_model() {
    let model = ScriptedModel::new("{}");
    let service = AnalysisService::new(Some(model.clone() as Arc<dyn LanguageModel>));

    let mut request = ready_request();
    request.spoken_text = String::new();
    let err = service.analyze(&request).await.unwrap_err();
    assert!(matches!(err, AnalysisError::MissingInput(_)));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn unconfigured_service_wins_over_missing_input() {
    let service = AnalysisService::new(None);
    let err = service.analyze(&AnalysisRequest::default()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::NotConfigured));
}

#[tokio::test]
async fn non_object_reply_is_a_contract_failure() {
    let model = ScriptedModel::new("[1, 2, 3]");
    let gateway = LocalGateway::new(
        CredentialCheck::default(),
        Arc::new(AnalysisService::new(Some(model as Arc<dyn LanguageModel>))),
    );

    let feedback = gateway.analyze(&ready_request()).await;
    assert!(!feedback.success);
    assert_eq!(feedback.message, "Error analyzing response");
    assert!(feedback.details.is_some());
}

async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

#[tokio::test]
async fn anthropic_client_sends_key_and_reads_first_text_block() {
    let seen = Arc::new(Mutex::new(None::<(HeaderMap, Value)>));
    let capture = Arc::clone(&seen);
    let router = Router::new().route(
        "/v1/messages",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let capture = Arc::clone(&capture);
            async move {
                *capture.lock().unwrap() = Some((headers, body));
                Json(json!({
                    "content": [
                        {"type": "tool_use", "id": "x"},
                        {"type": "text", "text": "{\"success\":false,\"message\":\"Missing fact\"}"}
                    ]
                }))
            }
        }),
    );
    let base_url = serve_stub(router).await;

    let mut config = LanguageModelConfig::new("secret-key");
    config.base_url = base_url;
    config.model = "test-model".into();
    let client = AnthropicClient::new(config);

    let reply = client.complete("hello").await.unwrap();
    assert_eq!(reply, "{\"success\":false,\"message\":\"Missing fact\"}");

    let (headers, body) = seen.lock().unwrap().take().unwrap();
    assert_eq!(headers["x-api-key"], "secret-key");
    assert_eq!(headers["anthropic-version"], "2023-06-01");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["messages"][0]["content"], "hello");
}

#[tokio::test]
async fn anthropic_client_reports_error_status() {
    let router = Router::new().route(
        "/v1/messages",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let mut config = LanguageModelConfig::new("k");
    config.base_url = serve_stub(router).await;
    let client = AnthropicClient::new(config);

    match client.complete("hi").await {
        Err(LanguageModelError::HttpStatus { status, body }) => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
