mod search;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &feedmill_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new(request_id, "internal_error", "database query failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/search", get(search::search_articles))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match feedmill_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::search::ArticleItem;
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use feedmill_core::ArticleRecord;
    use tower::ServiceExt;

    #[test]
    fn article_item_is_serializable() {
        // Proves the type compiles and serde works — no DB needed.
        let item = ArticleItem {
            id: 1,
            title: "RBI cuts repo rate".to_string(),
            link: "https://news.example.com/rbi-cut".to_string(),
            summary: "The central bank cut rates.".to_string(),
            published: Some(Utc::now()),
            source: "Banking - news.example.com".to_string(),
            tags: "banking, RBI".to_string(),
            sentiment_score: 5,
            entities: "RBI".to_string(),
            actions: Some("cut".to_string()),
        };
        let json = serde_json::to_string(&item).expect("serialize");
        assert!(json.contains("\"sentiment_score\":5"));
        assert!(json.contains("\"link\":\"https://news.example.com/rbi-cut\""));
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn seed_article(link: &str, title: &str, summary: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            link: link.to_string(),
            summary: summary.to_string(),
            published: Some(Utc::now()),
            source: "Banking - news.example.com".to_string(),
            tags: "banking, RBI".to_string(),
            sentiment_score: 4,
            entities: "RBI".to_string(),
            actions: Some("cut".to_string()),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn search_returns_matching_articles(pool: sqlx::PgPool) {
        feedmill_db::upsert_article(
            &pool,
            &seed_article("https://x/1", "RBI cuts repo rate", "Surprise rate cut."),
        )
        .await
        .expect("seed article");
        feedmill_db::upsert_article(
            &pool,
            &seed_article("https://x/2", "Startup raises funds", "A fintech round."),
        )
        .await
        .expect("seed article");

        let app = build_app(AppState { pool });
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/search?q=rbi")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["link"].as_str(), Some("https://x/1"));
        assert!(json["meta"]["request_id"].is_string());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn search_rejects_short_queries(pool: sqlx::PgPool) {
        let app = build_app(AppState { pool });
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/search?q=a")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn search_without_query_param_is_rejected(pool: sqlx::PgPool) {
        let app = build_app(AppState { pool });
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/search")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn search_caps_results_at_twenty(pool: sqlx::PgPool) {
        for i in 0..30 {
            feedmill_db::upsert_article(
                &pool,
                &seed_article(
                    &format!("https://x/{i}"),
                    "Bank bulletin",
                    "Daily banking digest.",
                ),
            )
            .await
            .expect("seed article");
        }

        let app = build_app(AppState { pool });
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/search?q=bank")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"].as_array().map(Vec::len), Some(20));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_reports_ok_with_live_database(pool: sqlx::PgPool) {
        let app = build_app(AppState { pool });
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
    }
}
