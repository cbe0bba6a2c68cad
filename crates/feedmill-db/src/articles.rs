//! Database operations for the `articles` table.

use chrono::{DateTime, Utc};
use feedmill_core::ArticleRecord;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    /// Comma-joined tag set, e.g. `"banking, RBI, finance"`.
    pub tags: String,
    /// Star rating on the 1–5 scale.
    pub sentiment_score: i32,
    /// Comma-joined entity set.
    pub entities: String,
    /// Comma-joined verb lemmas; `NULL` for runs without action extraction.
    pub actions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts an enriched article keyed on `link`.
///
/// A conflict on `link` refreshes only the derived fields (`tags`,
/// `sentiment_score`, `entities`, `actions`) and `updated_at`; the
/// originally stored `title`, `summary`, `published`, and `source` are
/// left untouched.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_article(pool: &PgPool, article: &ArticleRecord) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO articles \
             (title, link, summary, published, source, tags, sentiment_score, entities, actions) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (link) DO UPDATE SET \
             tags            = EXCLUDED.tags, \
             sentiment_score = EXCLUDED.sentiment_score, \
             entities        = EXCLUDED.entities, \
             actions         = EXCLUDED.actions, \
             updated_at      = NOW() \
         RETURNING id",
    )
    .bind(&article.title)
    .bind(&article.link)
    .bind(&article.summary)
    .bind(article.published)
    .bind(&article.source)
    .bind(&article.tags)
    .bind(article.sentiment_score)
    .bind(&article.entities)
    .bind(article.actions.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Case-insensitive substring search over `title` and `summary`, newest first.
///
/// Rows with a `NULL` publication date sort last; ties break on `id`
/// descending so pagination-free output is stable.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_articles(
    pool: &PgPool,
    query: &str,
    limit: i64,
) -> Result<Vec<ArticleRow>, DbError> {
    let pattern = format!("%{query}%");
    let rows = sqlx::query_as::<_, ArticleRow>(
        "SELECT id, title, link, summary, published, source, tags, sentiment_score, \
                entities, actions, created_at, updated_at \
         FROM articles \
         WHERE title ILIKE $1 OR summary ILIKE $1 \
         ORDER BY published DESC NULLS LAST, id DESC \
         LIMIT $2",
    )
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch one article by its unique link.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_article_by_link(pool: &PgPool, link: &str) -> Result<Option<ArticleRow>, DbError> {
    let row = sqlx::query_as::<_, ArticleRow>(
        "SELECT id, title, link, summary, published, source, tags, sentiment_score, \
                entities, actions, created_at, updated_at \
         FROM articles \
         WHERE link = $1",
    )
    .bind(link)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Total number of stored articles.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_articles(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
