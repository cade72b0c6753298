/// HTTP API tests driven through the router without a socket
use std::sync::Arc;

use axum::http::StatusCode;
use keyword_trend_insights::http::create_router;
use serde_json::json;
use tower::ServiceExt;

use crate::common::*;

#[cfg(test)]
mod api_integration_tests {
    use super::*;

    fn app() -> axum::Router {
        let model = Arc::new(StubModel::answering(&model_answer(&["부가세", "알바"])));
        let search = Arc::new(StubSearch::new(""));
        create_router(server_with(model, search))
    }

    #[tokio::test]
    async fn test_health_and_version() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["keywords"], 4);

        let response = app().oneshot(get("/version")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_ranking() {
        let response = app()
            .oneshot(get("/api/keywords/ranking?year=2025&month=7&limit=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["period"], "2025-07");
        assert_eq!(body["total"], 4);
        let ranking = body["ranking"].as_array().unwrap();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0]["keyword"], "부가세");
        assert_eq!(ranking[0]["growth"], 400.0);
        assert_eq!(ranking[0]["category"], "sidejob");
        assert_eq!(ranking[0]["rank"], 1);
        assert_eq!(body["defaultSelection"], json!(["부가세", "알바"]));
    }

    #[tokio::test]
    async fn test_ranking_rejects_bad_month() {
        let response = app()
            .oneshot(get("/api/keywords/ranking?year=2025&month=13"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("13"));
    }

    #[tokio::test]
    async fn test_ranking_rejects_malformed_query() {
        let response = app()
            .oneshot(get("/api/keywords/ranking?month=july"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_growth_for_keyword() {
        let response = app()
            .oneshot(get("/api/keywords/growth?keyword=%EB%B6%80%EA%B0%80%EC%84%B8&year=2025&month=7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["keyword"], "부가세");
        assert_eq!(body["volume"], 5000);
        assert_eq!(body["previousMonths"].as_array().unwrap().len(), 6);
        assert_eq!(body["previousMonths"][5]["month"], "2025.07");
    }

    #[tokio::test]
    async fn test_growth_unknown_keyword_is_404() {
        let response = app()
            .oneshot(get("/api/keywords/growth?keyword=nothing&year=2025&month=7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_classify() {
        let response = app()
            .oneshot(get("/api/keywords/classify?keyword=%EC%8B%A4%EB%B9%84"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["category"], "insurance");
        assert_eq!(body["categoryLabel"], "보험");
    }

    #[tokio::test]
    async fn test_trends() {
        let uri = "/api/trends?keywords=%EB%B6%80%EA%B0%80%EC%84%B8,%EC%95%8C%EB%B0%94&year=2025&month=7&range=6";
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["range"], 6);
        let points = body["points"].as_array().unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(points[5]["month"], "2025.07");
        assert_eq!(points[5]["values"][0]["volume"], 5000);
        assert_eq!(points[5]["values"][1]["keyword"], "알바");
        assert_eq!(body["demographics"]["malePercent"], 44.5);
        assert_eq!(body["demographics"]["femalePercent"], 55.5);
    }

    #[tokio::test]
    async fn test_trends_reject_unsupported_range() {
        let response = app()
            .oneshot(get("/api/trends?keywords=a&year=2025&month=7&range=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ai_insight_rejects_bad_body() {
        let response = app()
            .oneshot(post_json("/api/ai-insight", &json!({"keywords": "부가세"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}
