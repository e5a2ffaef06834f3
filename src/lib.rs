//! Toptracks - Print your Spotify top tracks and what their artists are known for
//!
//! This library fetches the caller's top tracks from the Spotify Web API, drops
//! tracks by excluded artists and looks up the top tracks of each remaining
//! track's lead artist.

/// Client modules for interacting with the Spotify Web API
pub mod clients;
/// Assembling and rendering the console report
pub mod report;
