/// OpenAI and Serper clients against mock HTTP servers
use std::sync::Arc;

use axum::http::StatusCode;
use keyword_trend_insights::providers::{
    http_client, ChatRequest, LanguageModel, OpenAiClient, OpenAiConfig, ProviderError,
    SerperClient, SerperConfig, WebSearch,
};
use keyword_trend_insights::{InsightService, TrendInsightsServer, YearMonth};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

fn openai(mock_server: &MockServer, api_key: Option<&str>) -> OpenAiClient {
    OpenAiClient::new(
        http_client(None).expect("Failed to build client"),
        OpenAiConfig {
            api_key: api_key.map(str::to_string),
            base_url: format!("{}/v1", mock_server.uri()),
            model: "test-model".to_string(),
            max_tokens: 256,
        },
    )
}

fn serper(mock_server: &MockServer, api_key: Option<&str>) -> SerperClient {
    SerperClient::new(
        http_client(None).expect("Failed to build client"),
        SerperConfig {
            api_key: api_key.map(str::to_string),
            endpoint: format!("{}/search", mock_server.uri()),
        },
    )
}

fn chat() -> ChatRequest {
    ChatRequest {
        system: "system".to_string(),
        user: "user".to_string(),
        json_output: true,
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[cfg(test)]
mod provider_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_openai_completion() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "max_tokens": 256,
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"ok\": true}")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let content = openai(&mock_server, Some("test-key"))
            .complete(&chat())
            .await
            .expect("completion should succeed");
        assert_eq!(content, "{\"ok\": true}");
    }

    #[tokio::test]
    async fn test_openai_error_message_with_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "code": "rate_limit_exceeded"}
            })))
            .mount(&mock_server)
            .await;

        let result = openai(&mock_server, Some("test-key")).complete(&chat()).await;
        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "[rate_limit_exceeded] Rate limit reached");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_openai_missing_content_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let result = openai(&mock_server, Some("test-key")).complete(&chat()).await;
        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_openai_without_key_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = openai(&mock_server, None).complete(&chat()).await;
        assert!(matches!(result, Err(ProviderError::MissingCredential(_))));
    }

    #[tokio::test]
    async fn test_serper_search_summary() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("x-api-key", "serper-key"))
            .and(body_partial_json(json!({
                "q": "부가세 2025년 7월 트렌드 이슈",
                "gl": "kr",
                "hl": "ko",
                "num": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    {"title": "부가세 신고 기간", "snippet": "7월 25일까지"},
                    {"title": "제목만 있는 결과"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let summary = serper(&mock_server, Some("serper-key"))
            .search("부가세", YearMonth::new(2025, 7).unwrap())
            .await;
        assert_eq!(summary, "1. 부가세 신고 기간\n7월 25일까지\n\n2. 제목만 있는 결과");
    }

    #[tokio::test]
    async fn test_serper_failure_degrades_to_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let summary = serper(&mock_server, Some("serper-key"))
            .search("부가세", YearMonth::new(2025, 7).unwrap())
            .await;
        assert_eq!(summary, "");

        Mock::given(method("POST"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let broken = SerperClient::new(
            http_client(None).unwrap(),
            SerperConfig {
                api_key: Some("serper-key".to_string()),
                endpoint: format!("{}/broken", mock_server.uri()),
            },
        );
        assert_eq!(broken.search("부가세", YearMonth::new(2025, 7).unwrap()).await, "");
    }

    #[tokio::test]
    async fn test_end_to_end_insight_with_mock_providers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(&model_answer(&["알바", "부가세"]))),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let insights = InsightService::new(
            Arc::new(openai(&mock_server, Some("test-key"))),
            Arc::new(serper(&mock_server, Some("serper-key"))),
        );
        let app = TrendInsightsServer::new(dataset(), insights).router();

        let response = app
            .oneshot(post_json(
                "/api/ai-insight",
                &json!({"keywords": ["부가세", "알바"], "year": 2025, "month": 7}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["keywordInsights"][0]["keyword"], "부가세");
        assert_eq!(body["keywordInsights"][0]["strategy"], "부가세 strategy");
        assert_eq!(body["keywordInsights"][1]["keyword"], "알바");
        assert_eq!(body["comparison"], "joint comparison");
    }

    #[tokio::test]
    async fn test_end_to_end_without_openai_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let insights = InsightService::new(
            Arc::new(openai(&mock_server, None)),
            Arc::new(serper(&mock_server, Some("serper-key"))),
        );
        let app = TrendInsightsServer::new(dataset(), insights).router();

        let response = app
            .oneshot(post_json(
                "/api/ai-insight",
                &json!({"keywords": ["부가세"], "year": 2025, "month": 7}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
