/// Authenticated HTTP access to the Web API
pub mod api;
/// Data entities for tracks and artists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify top-track retrieval
pub mod spotify;

pub use api::{ApiClient, ReqwestTransport, Transport};
pub use spotify::SpotifyClient;
