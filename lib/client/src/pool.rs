//! Catalog payload normalization and the content pool.
//!
//! The upstream catalog shapes movie and TV payloads differently.
//! They are resolved into one [`ContentItem`] shape here, at the
//! boundary; nothing downstream branches on payload shape again.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::{AddFavorite, FavoriteRecord};

// ── Media type ──

/// What kind of catalog entry an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("media type must be 'movie' or 'tv', got '{}'", other)),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Catalog entries ──

/// One raw catalog payload as the upstream search/list endpoints
/// return it. Movies carry `title`/`release_date`; shows carry
/// `name`/`first_air_date`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Movie {
        id: i64,
        title: String,
        #[serde(default)]
        poster_path: Option<String>,
        #[serde(default)]
        vote_average: Option<f64>,
        #[serde(default)]
        release_date: Option<String>,
    },
    Show {
        id: i64,
        name: String,
        #[serde(default)]
        poster_path: Option<String>,
        #[serde(default)]
        vote_average: Option<f64>,
        #[serde(default)]
        first_air_date: Option<String>,
    },
}

/// A catalog entry normalized to a single shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub tmdb_id: i64,
    pub title: String,
    pub media_type: MediaType,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
}

impl ContentItem {
    /// Resolve one raw payload. Shape branching happens here and
    /// nowhere deeper.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        match entry {
            CatalogEntry::Movie {
                id,
                title,
                poster_path,
                vote_average,
                release_date,
            } => Self {
                tmdb_id: *id,
                title: title.clone(),
                media_type: MediaType::Movie,
                poster_path: poster_path.clone(),
                vote_average: *vote_average,
                release_date: release_date.clone(),
            },
            CatalogEntry::Show {
                id,
                name,
                poster_path,
                vote_average,
                first_air_date,
            } => Self {
                tmdb_id: *id,
                title: name.clone(),
                media_type: MediaType::Tv,
                poster_path: poster_path.clone(),
                vote_average: *vote_average,
                release_date: first_air_date.clone(),
            },
        }
    }

    /// Rebuild the display item from a stored favorite, for views
    /// that start from the favorite list instead of the catalog. The
    /// server only stores valid media types, so the fallback arm is
    /// unreachable in practice.
    pub fn from_record(record: &FavoriteRecord) -> Self {
        Self {
            tmdb_id: record.tmdb_id,
            title: record.title.clone(),
            media_type: record.media_type.parse().unwrap_or(MediaType::Movie),
            poster_path: record.poster_path.clone(),
            vote_average: record.vote_average,
            release_date: record.release_date.clone(),
        }
    }

    /// Build the add-favorite payload for this item.
    pub fn to_add_request(&self) -> AddFavorite {
        AddFavorite {
            tmdb_id: self.tmdb_id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            media_type: self.media_type.as_str().to_string(),
            vote_average: self.vote_average,
            release_date: self.release_date.clone(),
        }
    }
}

// ── Content pool ──

/// Accumulating id-keyed pool of every catalog item the session has
/// seen. Items are inserted or refreshed, never evicted; favorites
/// views render from here without a per-item catalog fetch.
#[derive(Debug, Default)]
pub struct ContentPool {
    items: HashMap<i64, ContentItem>,
}

impl ContentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page of catalog results. A re-seen id keeps its
    /// single pool slot and takes the latest payload. Each entry costs
    /// one map probe, so a merge is O(page size) regardless of how big
    /// the pool has grown.
    ///
    /// Returns how many entries were new to the pool.
    pub fn merge_page(&mut self, entries: &[CatalogEntry]) -> usize {
        let mut added = 0;
        for entry in entries {
            let item = ContentItem::from_entry(entry);
            if self.items.insert(item.tmdb_id, item).is_none() {
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, tmdb_id: i64) -> Option<&ContentItem> {
        self.items.get(&tmdb_id)
    }

    pub fn contains(&self, tmdb_id: i64) -> bool {
        self.items.contains_key(&tmdb_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
