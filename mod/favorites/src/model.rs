use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// Kind of catalog item a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Favorite
// ---------------------------------------------------------------------------

/// A user's saved reference to one catalog item.
///
/// Display fields are denormalized at save time so list views render
/// without re-querying the upstream catalog. A favorite is never
/// updated in place: it is created by add and destroyed by remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    /// Record id (UUIDv4, no dashes). Remove is keyed on this, not on
    /// the catalog id.
    pub id: String,

    /// Owning user.
    pub user_id: String,

    /// Upstream catalog id of the movie or show.
    pub tmdb_id: i64,

    // --- denormalized display snapshot ---
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Request body for `POST /favorites`.
///
/// tmdb_id, title, and media_type are required; they are optional in
/// the type so the service can answer a missing field with the 400
/// envelope instead of a body-extractor rejection. media_type arrives
/// as a raw string and is normalized exactly once, here at the
/// boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_roundtrip() {
        assert_eq!(MediaType::parse("movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::parse("tv"), Some(MediaType::Tv));
        assert_eq!(MediaType::parse("book"), None);
        assert_eq!(MediaType::Movie.as_str(), "movie");
        assert_eq!(MediaType::Tv.to_string(), "tv");
    }

    #[test]
    fn test_media_type_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&MediaType::Movie).unwrap(), "\"movie\"");
        let t: MediaType = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(t, MediaType::Tv);
    }
}
