//! Offline unit tests for feedmill-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use feedmill_core::{AppConfig, Environment};
use feedmill_db::{ArticleRow, PoolConfig};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        feeds_path: PathBuf::from("./config/feeds.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        embed_url: "http://localhost:8080".to_string(),
        sentiment_url: "http://localhost:8081".to_string(),
        annotate_url: "http://localhost:8082".to_string(),
        model_request_timeout_secs: 30,
        feed_request_timeout_secs: 20,
        feed_user_agent: "ua".to_string(),
        max_retries: 3,
        retry_backoff_base_secs: 2,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ArticleRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn article_row_has_expected_fields() {
    use chrono::Utc;

    let row = ArticleRow {
        id: 1_i64,
        title: "RBI cuts repo rate".to_string(),
        link: "https://news.example.com/rbi-cut".to_string(),
        summary: "The central bank cut rates.".to_string(),
        published: Some(Utc::now()),
        source: "Banking - news.example.com".to_string(),
        tags: "banking, RBI, finance".to_string(),
        sentiment_score: 5_i32,
        entities: "RBI".to_string(),
        actions: Some("cut, announce".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.sentiment_score, 5);
    assert!(row.published.is_some());
    assert_eq!(row.actions.as_deref(), Some("cut, announce"));
}
