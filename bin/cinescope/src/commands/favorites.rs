//! Favorites commands.

use std::path::Path;

use anyhow::Result;
use cinescope_client::{ContentItem, MediaType, ToggleOutcome};

use super::session;

/// List favorites (table or JSON).
pub async fn list(output_json: bool, config_path: &Path, session_path: &Path) -> Result<()> {
    let sync = session::restore(config_path, session_path).await?;

    let mut records = sync.favorites();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if output_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No favorites.");
        return Ok(());
    }

    println!("{:<10} {:<6} {:<6} {}", "TMDB ID", "TYPE", "RATING", "TITLE");
    for r in &records {
        let rating = r
            .vote_average
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<10} {:<6} {:<6} {}", r.tmdb_id, r.media_type, rating, r.title);
    }
    Ok(())
}

/// Add a favorite.
pub async fn add(
    tmdb_id: i64,
    title: &str,
    media_type: &str,
    poster: Option<String>,
    rating: Option<f64>,
    released: Option<String>,
    config_path: &Path,
    session_path: &Path,
) -> Result<()> {
    let media_type: MediaType = media_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let sync = session::restore(config_path, session_path).await?;
    if sync.is_favorite(tmdb_id) {
        println!("Already in favorites.");
        return Ok(());
    }

    let item = ContentItem {
        tmdb_id,
        title: title.to_string(),
        media_type,
        poster_path: poster,
        vote_average: rating,
        release_date: released,
    };
    match sync.toggle(&item).await? {
        ToggleOutcome::Added(record) => {
            println!("Favorite added: {} ({}).", record.title, record.tmdb_id);
        }
        other => println!("Nothing added ({:?}).", other),
    }
    Ok(())
}

/// Remove a favorite by TMDb id.
pub async fn rm(tmdb_id: i64, config_path: &Path, session_path: &Path) -> Result<()> {
    let sync = session::restore(config_path, session_path).await?;
    if !sync.is_favorite(tmdb_id) {
        println!("Not in favorites.");
        return Ok(());
    }

    let record = sync
        .favorites()
        .into_iter()
        .find(|r| r.tmdb_id == tmdb_id)
        .ok_or_else(|| anyhow::anyhow!("favorite missing from the hydrated set"))?;

    match sync.toggle(&ContentItem::from_record(&record)).await? {
        ToggleOutcome::Removed => println!("Favorite removed."),
        other => println!("Nothing removed ({:?}).", other),
    }
    Ok(())
}

/// Ask the server whether an id is favorited.
pub async fn check(tmdb_id: i64, config_path: &Path, session_path: &Path) -> Result<()> {
    let sync = session::restore(config_path, session_path).await?;
    if sync.check_remote(tmdb_id).await? {
        println!("{} is favorited.", tmdb_id);
    } else {
        println!("{} is not favorited.", tmdb_id);
    }
    Ok(())
}
