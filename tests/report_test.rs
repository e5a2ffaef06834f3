mod common;

use common::{FakeTransport, TOP_TRACKS_URL, artist_url};
use serde_json::{Value, json};
use toptracks::clients::errors::Error;
use toptracks::report::{
    ConfigBuilder, FailurePolicy, Palette, Reporter, SectionOutcome, render_report,
};

fn top_tracks_body() -> Value {
    json!({ "items": [
        { "name": "Track 1", "artists": [
            { "id": "artist1", "name": "Artist 1" },
            { "id": "guest", "name": "Guest" }
        ] },
        { "name": "Track 2", "artists": [{ "id": "artist2", "name": "Artist 2" }] }
    ] })
}

fn reporter(transport: &FakeTransport, policy: FailurePolicy) -> Reporter {
    let config = ConfigBuilder::new()
        .spotify(transport.client())
        .policy(policy)
        .palette(Palette::plain())
        .build()
        .unwrap();
    Reporter::new(config)
}

#[tokio::test]
async fn prints_top_tracks_then_each_lead_artist() {
    let transport = FakeTransport::default()
        .respond(TOP_TRACKS_URL, top_tracks_body())
        .respond(artist_url("artist1"), json!({ "tracks": [{ "name": "A1" }, { "name": "A2" }] }))
        .respond(artist_url("artist2"), json!({ "tracks": [{ "name": "B1" }] }));

    let mut out = Vec::new();
    reporter(&transport, FailurePolicy::Abort)
        .print_top_tracks(&mut out)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Top Tracks:\n\
         - Track 1 by Artist 1, Guest\n\
         - Track 2 by Artist 2\n\
         \n\
         Top tracks by Artist 1:\n\
         - A1\n\
         - A2\n\
         \n\
         Top tracks by Artist 2:\n\
         - B1\n\
         \n"
    );
    // The guest artist is never looked up
    assert_eq!(
        transport.urls(),
        [
            TOP_TRACKS_URL.to_string(),
            artist_url("artist1"),
            artist_url("artist2")
        ]
    );
}

#[tokio::test]
async fn failure_keeps_already_printed_lines() {
    let transport = FakeTransport::default()
        .respond(TOP_TRACKS_URL, top_tracks_body())
        .fail(artist_url("artist1"), 500)
        .respond(artist_url("artist2"), json!({ "tracks": [{ "name": "B1" }] }));

    let mut out = Vec::new();
    let err = reporter(&transport, FailurePolicy::Abort)
        .print_top_tracks(&mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 500, .. }));
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Top Tracks:\n"));
    assert!(!text.contains("Artist 2:"));
    assert_eq!(transport.urls().len(), 2);
}

#[tokio::test]
async fn top_tracks_failure_prints_nothing() {
    let transport = FakeTransport::default().fail(TOP_TRACKS_URL, 401);

    let mut out = Vec::new();
    let result = reporter(&transport, FailurePolicy::Continue)
        .print_top_tracks(&mut out)
        .await;

    assert!(result.is_err());
    assert!(out.is_empty());
}

#[tokio::test]
async fn keep_going_reports_failed_artists_inline() {
    let transport = FakeTransport::default()
        .respond(TOP_TRACKS_URL, top_tracks_body())
        .fail(artist_url("artist1"), 503)
        .respond(artist_url("artist2"), json!({ "tracks": [{ "name": "B1" }] }));

    let report = reporter(&transport, FailurePolicy::Continue)
        .assemble()
        .await
        .unwrap();

    assert_eq!(report.sections.len(), 2);
    assert!(matches!(report.sections[0].outcome, SectionOutcome::Failed(_)));
    assert_eq!(report.sections[1].artist.name, "Artist 2");

    let mut out = Vec::new();
    render_report(&mut out, Palette::plain(), &report).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Top tracks by Artist 1:\n! could not fetch top tracks: "));
    assert!(text.ends_with("Top tracks by Artist 2:\n- B1\n\n"));
}

#[tokio::test]
async fn tracks_without_artists_get_no_section() {
    let transport = FakeTransport::default()
        .respond(
            TOP_TRACKS_URL,
            json!({ "items": [
                { "name": "Untitled" },
                { "name": "Track 2", "artists": [{ "id": "artist2", "name": "Artist 2" }] }
            ] }),
        )
        .respond(artist_url("artist2"), json!({ "tracks": [] }));

    let report = reporter(&transport, FailurePolicy::Abort)
        .assemble()
        .await
        .unwrap();

    assert_eq!(report.top_tracks.len(), 2);
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].outcome, SectionOutcome::Tracks(Vec::new()));
}

#[tokio::test]
async fn empty_top_tracks_render_header_only() {
    let transport = FakeTransport::default().respond(TOP_TRACKS_URL, json!({ "items": [] }));

    let mut out = Vec::new();
    reporter(&transport, FailurePolicy::Abort)
        .print_top_tracks(&mut out)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Top Tracks:\n\n");
}
