use log::{debug, warn};
use rspotify::model::ArtistId;

use crate::clients::{
    api::{ApiClient, Method},
    entities::{ArtistTopTracks, TopTracksPage, Track},
    errors::{Error, Result},
};

/// Artist whose tracks are left out of the top tracks unless configured otherwise.
pub const DEFAULT_EXCLUDED_ARTIST: &str = "6mdiAmATAx73kdxrNrnlao";
pub const DEFAULT_MARKET: &str = "BR";
pub const DEFAULT_LIMIT: u32 = 5;

/// Listening-history window the API computes top tracks over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TimeRange {
    /// Roughly the last four weeks
    ShortTerm,
    /// Roughly the last six months
    MediumTerm,
    /// Several years of history
    #[default]
    LongTerm,
}

impl TimeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Fixed query parameters for both retrieval calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub time_range: TimeRange,
    pub limit: u32,
    pub market: String,
    /// Tracks featuring any of these artists are dropped from the top tracks.
    pub excluded_artists: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            time_range: TimeRange::default(),
            limit: DEFAULT_LIMIT,
            market: DEFAULT_MARKET.to_string(),
            excluded_artists: vec![DEFAULT_EXCLUDED_ARTIST.to_string()],
        }
    }
}

// Artist ids are base62 strings; rspotify performs the same check it applies to its own calls
pub(crate) fn validate_artist_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidArtistId(id.to_string()));
    }
    ArtistId::from_id(id)
        .map(|_| ())
        .map_err(|_| Error::InvalidArtistId(id.to_string()))
}

/// Token to send, or an empty one when none is configured.
///
/// An empty token is not rejected locally; the API answers 401 instead.
pub fn token_or_empty(token: Option<String>) -> String {
    token.unwrap_or_else(|| {
        warn!("SPOTIFY_TOKEN is not set, requests will be sent without a valid credential");
        String::new()
    })
}

pub struct SpotifyClient {
    api: ApiClient,
    options: QueryOptions,
}

impl SpotifyClient {
    pub fn new(api: ApiClient, options: QueryOptions) -> Result<Self> {
        for id in &options.excluded_artists {
            validate_artist_id(id)?;
        }
        if options.market.is_empty() {
            return Err(Error::ConfigurationError("Market must not be empty".into()));
        }
        Ok(SpotifyClient { api, options })
    }

    // Create a SpotifyClient from environment variables, falling back to an empty token
    pub fn try_default() -> Result<Self> {
        let token = match std::env::var("SPOTIFY_TOKEN") {
            Ok(token) => Some(token),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => return Err(e.into()),
        };
        SpotifyClient::new(ApiClient::with_token(token_or_empty(token)), QueryOptions::default())
    }

    /// True when any of the track's artists links to an excluded artist profile.
    pub fn is_excluded(&self, track: &Track) -> bool {
        track.artists.iter().any(|artist| {
            artist.profile_url().is_some_and(|url| {
                self.options
                    .excluded_artists
                    .iter()
                    .any(|excluded| url.contains(excluded.as_str()))
            })
        })
    }

    // Fetch the caller's top tracks, minus tracks by excluded artists
    pub async fn get_top_tracks(&self) -> Result<Vec<Track>> {
        let endpoint = format!(
            "v1/me/top/tracks?time_range={}&limit={}",
            self.options.time_range.as_str(),
            self.options.limit
        );
        let page: TopTracksPage = self.api.fetch(&endpoint, Method::GET).await?;
        let fetched = page.items.len();

        let tracks: Vec<Track> = page
            .items
            .into_iter()
            .filter(|t| !self.is_excluded(t))
            .collect();
        debug!(
            "Fetched {fetched} top tracks, {} left after exclusions",
            tracks.len()
        );
        Ok(tracks)
    }

    // Fetch an artist's own top tracks in the configured market, unfiltered
    pub async fn get_artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        validate_artist_id(artist_id)?;
        let endpoint = format!(
            "v1/artists/{artist_id}/top-tracks?market={}",
            self.options.market
        );
        let body: ArtistTopTracks = self.api.fetch(&endpoint, Method::GET).await?;
        debug!("Fetched {} top tracks for artist {artist_id}", body.tracks.len());
        Ok(body.tracks)
    }
}
