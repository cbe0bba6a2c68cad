use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Hard cap on rows returned by one search.
pub(super) const MAX_RESULTS: i64 = 20;

/// Minimum number of characters in a usable query.
pub(super) const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Serialize)]
pub(super) struct ArticleItem {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    pub tags: String,
    pub sentiment_score: i32,
    pub entities: String,
    pub actions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

/// Reject queries too short to mean anything.
///
/// Returns the trimmed query on success.
pub(super) fn validate_query(raw: Option<&str>) -> Result<&str, &'static str> {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err("query must be at least 2 characters");
    }
    Ok(trimmed)
}

pub(super) async fn search_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ArticleItem>>>, ApiError> {
    let q = validate_query(query.q.as_deref())
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let rows = feedmill_db::search_articles(&state.pool, q, MAX_RESULTS)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ArticleItem {
            id: row.id,
            title: row.title,
            link: row.link,
            summary: row.summary,
            published: row.published,
            source: row.source,
            tags: row.tags,
            sentiment_score: row.sentiment_score,
            entities: row.entities,
            actions: row.actions,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
