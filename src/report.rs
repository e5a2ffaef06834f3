use std::io::Write;
use std::pin::pin;

use colored::Colorize;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use log::{debug, info, warn};

use crate::clients::{
    entities::{Artist, Track},
    errors::Result,
    spotify::SpotifyClient,
};

/// What to do when one artist's top tracks cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it.
    #[default]
    Abort,
    /// Record the failure in the report and move on to the next artist.
    Continue,
}

/// Console styling for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colored: bool,
}

impl Palette {
    pub fn colored() -> Self {
        Palette { colored: true }
    }

    pub fn plain() -> Self {
        Palette { colored: false }
    }

    fn header(self, text: &str) -> String {
        if self.colored {
            text.magenta().to_string()
        } else {
            text.to_string()
        }
    }

    fn item(self, text: &str) -> String {
        if self.colored {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn failure(self, text: &str) -> String {
        if self.colored {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::colored()
    }
}

// Configuration for the Reporter struct
pub struct Config {
    pub spotify: SpotifyClient,
    pub policy: FailurePolicy,
    pub palette: Palette,
}

pub struct ConfigBuilder {
    spotify: Option<SpotifyClient>,
    policy: Option<FailurePolicy>,
    palette: Option<Palette>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            spotify: None,
            policy: None,
            palette: None,
        }
    }

    pub fn spotify(mut self, spotify: SpotifyClient) -> Self {
        self.spotify = Some(spotify);
        self
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn build(self) -> Result<Config> {
        let spotify = match self.spotify {
            Some(s) => s,
            None => SpotifyClient::try_default()?,
        };
        Ok(Config {
            spotify,
            policy: self.policy.unwrap_or_default(),
            palette: self.palette.unwrap_or_default(),
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of looking up one artist's top tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Tracks(Vec<Track>),
    /// Only produced under [`FailurePolicy::Continue`].
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSection {
    pub artist: Artist,
    pub outcome: SectionOutcome,
}

/// Everything the console report shows, fetched but not yet rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub top_tracks: Vec<Track>,
    /// One section per top track that has an artist, in top-track order.
    pub sections: Vec<ArtistSection>,
}

pub fn render_top_tracks<W: Write>(out: &mut W, palette: Palette, tracks: &[Track]) -> Result<()> {
    writeln!(out, "{}", palette.header("Top Tracks:"))?;
    for track in tracks {
        let line = if track.artists.is_empty() {
            track.name.clone()
        } else {
            format!("{} by {}", track.name, track.artist_names())
        };
        writeln!(out, "- {}", palette.item(&line))?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn render_section<W: Write>(out: &mut W, palette: Palette, section: &ArtistSection) -> Result<()> {
    let header = format!("Top tracks by {}:", section.artist.name);
    writeln!(out, "{}", palette.header(&header))?;
    match &section.outcome {
        SectionOutcome::Tracks(tracks) => {
            for track in tracks {
                writeln!(out, "- {}", palette.item(&track.name))?;
            }
        }
        SectionOutcome::Failed(reason) => {
            let line = format!("could not fetch top tracks: {reason}");
            writeln!(out, "! {}", palette.failure(&line))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

pub fn render_report<W: Write>(out: &mut W, palette: Palette, report: &Report) -> Result<()> {
    render_top_tracks(out, palette, &report.top_tracks)?;
    for section in &report.sections {
        render_section(out, palette, section)?;
    }
    Ok(())
}

// Only the first listed artist of a track gets a section
fn lead_artist(track: &Track) -> Option<&Artist> {
    let artist = track.first_artist();
    if artist.is_none() {
        warn!("Track {:?} has no artists, skipping its artist section", track.name);
    }
    artist
}

// The main Reporter struct that fetches and prints the top tracks report
pub struct Reporter {
    config: Config,
}

impl Reporter {
    pub fn new(config: Config) -> Self {
        Reporter { config }
    }

    async fn artist_section(&self, artist: &Artist) -> Result<ArtistSection> {
        debug!("Fetching top tracks by {} ...", artist.name);
        let outcome = match self.config.spotify.get_artist_top_tracks(&artist.id).await {
            Ok(tracks) => SectionOutcome::Tracks(tracks),
            Err(e) if self.config.policy == FailurePolicy::Continue => {
                warn!("Error fetching top tracks by {}: {e}", artist.name);
                SectionOutcome::Failed(e.to_string())
            }
            Err(e) => return Err(e),
        };
        Ok(ArtistSection {
            artist: artist.clone(),
            outcome,
        })
    }

    // Requests are issued one at a time; `then` waits for each lookup before starting the next
    fn sections<'a>(
        &'a self,
        tracks: &'a [Track],
    ) -> impl Stream<Item = Result<ArtistSection>> + 'a {
        stream::iter(tracks.iter().filter_map(lead_artist))
            .then(move |artist| self.artist_section(artist))
    }

    /// Fetch the whole report without printing anything.
    pub async fn assemble(&self) -> Result<Report> {
        let top_tracks = self.config.spotify.get_top_tracks().await?;
        let sections = self.sections(&top_tracks).try_collect::<Vec<_>>().await?;
        Ok(Report {
            top_tracks,
            sections,
        })
    }

    /// Print the report to `out`, writing each artist section as soon as it is fetched.
    ///
    /// On failure, lines written so far stay in `out`.
    pub async fn print_top_tracks<W: Write>(&self, out: &mut W) -> Result<()> {
        info!("Fetching top tracks ...");
        let palette = self.config.palette;
        let top_tracks = self.config.spotify.get_top_tracks().await?;
        render_top_tracks(out, palette, &top_tracks)?;
        out.flush()?;

        let mut sections = pin!(self.sections(&top_tracks));
        while let Some(section) = sections.next().await {
            render_section(out, palette, &section?)?;
            out.flush()?;
        }
        info!("Report completed for {} top tracks", top_tracks.len());
        Ok(())
    }
}
