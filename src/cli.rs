use clap::Parser;
use log::info;
use toptracks::clients::{
    api::{ApiClient, DEFAULT_BASE_URL, ReqwestTransport},
    errors::Result,
    spotify::{
        DEFAULT_EXCLUDED_ARTIST, DEFAULT_LIMIT, DEFAULT_MARKET, QueryOptions, SpotifyClient,
        TimeRange, token_or_empty,
    },
};
use toptracks::report::{Config, ConfigBuilder, FailurePolicy, Palette, Reporter};

#[derive(Parser, Debug)]
#[command(name = "toptracks")]
#[command(version, about = "Print your Spotify top tracks and the top tracks of their artists", long_about = None)]
struct Cli {
    /// Bearer token used for every request
    #[arg(long, env = "SPOTIFY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Web API host, useful to point at a local stub
    #[arg(long, env = "SPOTIFY_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Leave out top tracks featuring this artist (repeatable)
    #[arg(
        long = "exclude-artist",
        value_name = "ID",
        env = "TOPTRACKS_EXCLUDED_ARTISTS",
        value_delimiter = ',',
        default_value = DEFAULT_EXCLUDED_ARTIST
    )]
    excluded_artists: Vec<String>,

    /// Do not exclude any artist, overriding --exclude-artist and its env var
    #[arg(long)]
    include_all: bool,

    /// Market used for the artists' top tracks
    #[arg(long, default_value = DEFAULT_MARKET)]
    market: String,

    /// Number of top tracks to fetch
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,

    /// Listening-history window for the top tracks
    #[arg(long, value_enum, default_value_t = TimeRange::LongTerm)]
    time_range: TimeRange,

    /// Keep printing the remaining artists when one lookup fails
    #[arg(long)]
    keep_going: bool,

    /// Print plain text without ANSI colours
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let token = token_or_empty(self.token);
        let api = ApiClient::new(Box::new(ReqwestTransport::default()), self.base_url, token);
        let options = QueryOptions {
            time_range: self.time_range,
            limit: self.limit,
            market: self.market,
            excluded_artists: if self.include_all {
                Vec::new()
            } else {
                self.excluded_artists
            },
        };

        ConfigBuilder::new()
            .spotify(SpotifyClient::new(api, options)?)
            .policy(if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            })
            .palette(if self.no_color {
                Palette::plain()
            } else {
                Palette::colored()
            })
            .build()
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    info!("Building config ...");
    let reporter = Reporter::new(cli.into_config()?);
    let mut out = std::io::stdout();
    reporter.print_top_tracks(&mut out).await
}
