use serde::{Deserialize, Serialize};

/// Links to an artist's pages outside of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// An artist as nested inside a track payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Artist {
    /// Public profile URL, when the payload carries one.
    pub fn profile_url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }
}

/// A track returned by the API. Only the fields this tool reads are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: String,
    pub name: String,
    // Partial payloads may omit artists entirely
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl Track {
    pub fn first_artist(&self) -> Option<&Artist> {
        self.artists.first()
    }

    /// Artist names joined with `", "` in the order the API lists them.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Body of `GET v1/me/top/tracks`.
#[derive(Debug, Default, Deserialize)]
pub struct TopTracksPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

/// Body of `GET v1/artists/{id}/top-tracks`.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistTopTracks {
    #[serde(default)]
    pub tracks: Vec<Track>,
}
