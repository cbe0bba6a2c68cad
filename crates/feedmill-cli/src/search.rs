//! The search command: query stored articles from the terminal.

const MAX_RESULTS: i64 = 20;

/// Print articles whose title or summary matches `query`, newest first.
pub async fn run(pool: &sqlx::PgPool, query: &str) -> anyhow::Result<()> {
    let trimmed = query.trim();
    if trimmed.chars().count() < 2 {
        anyhow::bail!("query must be at least 2 characters");
    }

    let rows = feedmill_db::search_articles(pool, trimmed, MAX_RESULTS).await?;
    if rows.is_empty() {
        println!("no articles matched '{trimmed}'");
        return Ok(());
    }

    for row in rows {
        let published = row
            .published
            .map_or_else(|| "unknown date".to_string(), |p| p.to_rfc3339());
        println!("[{published}] {} ({} stars)", row.title, row.sentiment_score);
        println!("  {}", row.link);
        println!("  source: {} | tags: {}", row.source, row.tags);
    }

    Ok(())
}
