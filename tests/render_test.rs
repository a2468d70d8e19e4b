use std::collections::BTreeMap;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use spotstats::error::RenderError;
use spotstats::render::{
    ImageEmbedder, Profile, RenderRequest, Renderer, Section, SectionLayout, data_uri,
};
use spotstats::types::{Item, StatsSnapshot, TimeRange};

// Embeds every URL except the ones containing "broken"
#[derive(Clone, Default)]
struct StubEmbedder {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ImageEmbedder for StubEmbedder {
    async fn embed(&self, url: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("broken") {
            return None;
        }
        Some(data_uri("image/png", url.as_bytes()))
    }
}

fn renderer(profile: Profile) -> Renderer {
    Renderer::new(profile, StubEmbedder::default())
}

fn count_cards(svg: &str) -> usize {
    svg.matches(r#"<g class="card""#).count()
}

fn rank_marker(rank: usize) -> String {
    format!(r#"class="rank" text-anchor="middle">{}</text>"#, rank)
}

fn artists(n: usize) -> Vec<Item> {
    (1..=n)
        .map(|i| {
            Item::artist(
                &format!("Artist {}", i),
                Some("rock"),
                Some(&format!("https://img.example/{}.jpg", i)),
            )
        })
        .collect()
}

fn snapshot() -> StatsSnapshot {
    let mut top_artists = BTreeMap::new();
    top_artists.insert(
        TimeRange::ShortTerm,
        vec![
            Item::artist("A", Some("pop"), Some("http://x/a.jpg")),
            Item::artist("B", None, None),
        ],
    );
    top_artists.insert(TimeRange::LongTerm, artists(7));

    let mut top_songs = BTreeMap::new();
    top_songs.insert(
        TimeRange::ShortTerm,
        vec![Item::song("Recent Song", "Someone", None)],
    );
    top_songs.insert(
        TimeRange::LongTerm,
        vec![
            Item::song("Old Song", "Old Band", Some("https://img.example/old.jpg")),
            Item::song("Broken Cover", "Old Band", Some("https://img.example/broken.jpg")),
        ],
    );

    let last_albums = (1..=5)
        .map(|i| Item::album(&format!("Album {}", i), "Band"))
        .collect();

    StatsSnapshot {
        top_artists,
        top_songs,
        last_albums,
    }
}

#[tokio::test]
async fn test_render_two_artists_detailed() {
    let request = RenderRequest::new("artists", Some("short_term")).unwrap();
    let svg = renderer(Profile::Detailed).render(&snapshot(), &request).await;

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>\n"));
    assert!(svg.contains("My Recent Top Artists"));
    assert!(svg.contains("Last 4 weeks"));

    assert_eq!(count_cards(&svg), 2);
    assert!(svg.contains(&rank_marker(1)));
    assert!(svg.contains(&rank_marker(2)));
    assert!(!svg.contains(&rank_marker(3)));

    // First card references the remote URL, second falls back to a placeholder
    assert!(svg.contains(r#"href="http://x/a.jpg""#));
    assert_eq!(svg.matches(r#"class="placeholder""#).count(), 1);
    assert!(svg.contains(">No Image</text>"));

    assert!(svg.contains(">pop</text>"));
    assert!(svg.contains(">N/A</text>"));
    assert!(svg.contains("Generated by spotstats"));
}

#[tokio::test]
async fn test_render_two_artists_compact() {
    let embedder = StubEmbedder::default();
    let calls = Arc::clone(&embedder.calls);
    let renderer = Renderer::new(Profile::Compact, embedder);

    let request = RenderRequest::new("artists", None).unwrap();
    let svg = renderer.render(&snapshot(), &request).await;

    assert_eq!(count_cards(&svg), 2);
    let expected = data_uri("image/png", b"http://x/a.jpg");
    assert!(svg.contains(&format!(r#"href="{}""#, expected)));
    assert!(!svg.contains("http://x/a.jpg\""));

    // Placeholder without the label, and no footer
    assert_eq!(svg.matches(r#"class="placeholder""#).count(), 1);
    assert!(!svg.contains("No Image"));
    assert!(!svg.contains("Generated by"));

    // Only the item with an image is fetched
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_detailed_never_embeds() {
    let embedder = StubEmbedder::default();
    let calls = Arc::clone(&embedder.calls);
    let renderer = Renderer::new(Profile::Detailed, embedder);

    for (_, svg) in renderer.render_all(&snapshot()).await {
        assert!(!svg.contains("data:image"));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_embed_renders_placeholder() {
    let request = RenderRequest::of(Section::Songs, Some(TimeRange::LongTerm));
    let svg = renderer(Profile::Compact).render(&snapshot(), &request).await;

    assert_eq!(count_cards(&svg), 2);
    assert!(svg.contains(&data_uri("image/png", b"https://img.example/old.jpg")));
    assert_eq!(svg.matches(r#"class="placeholder""#).count(), 1);

    // The placeholder belongs to the second card
    let placeholder = svg.find(r#"class="placeholder""#).unwrap();
    assert!(placeholder > svg.find(&rank_marker(2)).unwrap());
}

#[tokio::test]
async fn test_item_count_is_capped() {
    let snapshot = snapshot();

    for profile in [Profile::Detailed, Profile::Compact] {
        let renderer = renderer(profile);

        let svg = renderer
            .render(&snapshot, &RenderRequest::new("artists", Some("long_term")).unwrap())
            .await;
        assert_eq!(count_cards(&svg), 5);
        assert!(svg.contains("Artist 5"));
        assert!(!svg.contains("Artist 6"));

        let svg = renderer
            .render(&snapshot, &RenderRequest::new("albums", None).unwrap())
            .await;
        assert_eq!(count_cards(&svg), 3);
        assert!(svg.contains(">Album 3</text>"));
        assert!(!svg.contains(">Album 4</text>"));
    }
}

#[tokio::test]
async fn test_ranks_follow_snapshot_order() {
    let request = RenderRequest::of(Section::Artists, Some(TimeRange::LongTerm));
    let svg = renderer(Profile::Detailed).render(&snapshot(), &request).await;

    let positions: Vec<usize> = (1..=5)
        .map(|rank| svg.find(&rank_marker(rank)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let names: Vec<usize> = (1..=5)
        .map(|i| svg.find(&format!(">Artist {}</text>", i)).unwrap())
        .collect();
    assert!(names.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_long_labels_are_truncated() {
    let mut snapshot = StatsSnapshot::default();
    snapshot.top_artists.insert(
        TimeRange::ShortTerm,
        vec![Item::artist(
            "Red Hot Chili Peppers",
            Some("alternative rock"),
            None,
        )],
    );
    let request = RenderRequest::of(Section::Artists, Some(TimeRange::ShortTerm));

    let svg = renderer(Profile::Detailed).render(&snapshot, &request).await;
    assert!(svg.contains(">Red Hot Chil...</text>"));
    assert!(svg.contains(">alternative ...</text>"));
    assert!(!svg.contains("Red Hot Chili Peppers"));

    let svg = renderer(Profile::Compact).render(&snapshot, &request).await;
    assert!(svg.contains(">Red Hot C...</text>"));
}

#[tokio::test]
async fn test_text_is_escaped() {
    let mut snapshot = StatsSnapshot::default();
    snapshot.last_albums = vec![Item::album("Rock & Roll", "<Band>")];
    let request = RenderRequest::new("albums", None).unwrap();

    let svg = renderer(Profile::Detailed).render(&snapshot, &request).await;
    assert!(svg.contains(">Rock &amp; Roll</text>"));
    assert!(svg.contains(">&lt;Band&gt;</text>"));
}

#[test]
fn test_unknown_section_is_rejected() {
    assert_eq!(
        RenderRequest::new("playlists", None),
        Err(RenderError::UnknownSection("playlists".to_string()))
    );
    assert_eq!(
        RenderRequest::new("artists", Some("yesterday")),
        Err(RenderError::UnknownTimeRange("yesterday".to_string()))
    );
}

#[tokio::test]
async fn test_render_is_idempotent() {
    let snapshot = snapshot();
    for profile in [Profile::Detailed, Profile::Compact] {
        let renderer = renderer(profile);
        for request in RenderRequest::all() {
            let first = renderer.render(&snapshot, &request).await;
            let second = renderer.render(&snapshot, &request).await;
            assert_eq!(first, second);
        }
    }
}

#[tokio::test]
async fn test_canvas_dimensions() {
    let snapshot = snapshot();
    let cases = [
        (Profile::Detailed, "artists", r#"width="1000" height="380""#),
        (Profile::Detailed, "albums", r#"width="910" height="450""#),
        (Profile::Compact, "songs", r#"width="830" height="316""#),
        (Profile::Compact, "albums", r#"width="716" height="376""#),
    ];

    for (profile, section, expected) in cases {
        let request = RenderRequest::new(section, None).unwrap();
        let svg = renderer(profile).render(&snapshot, &request).await;
        assert!(
            svg.starts_with(&format!("<svg {}", expected)),
            "{} {}",
            profile,
            section
        );
    }
}

#[test]
fn test_cards_fit_the_canvas() {
    for profile in [Profile::Detailed, Profile::Compact] {
        let metrics = profile.metrics();
        for section in Section::ALL {
            let layout = SectionLayout::for_section(profile, section);
            let (width, _) = layout.canvas(&metrics);
            let last = layout.card_x(&metrics, layout.item_count - 1);
            assert_eq!(last + layout.card_width + metrics.padding, width);

            // Two text lines below the image stay inside the card
            let text_bottom = metrics.image_top
                + layout.image_size(&metrics)
                + metrics.text_gap
                + metrics.line_gap;
            assert!(text_bottom < layout.card_height, "{} {}", profile, section);
        }
    }
}

#[tokio::test]
async fn test_albums_ignore_time_range() {
    let snapshot = snapshot();
    let renderer = renderer(Profile::Detailed);

    let plain = renderer
        .render(&snapshot, &RenderRequest::new("albums", None).unwrap())
        .await;
    let ranged = renderer
        .render(&snapshot, &RenderRequest::new("albums", Some("long_term")).unwrap())
        .await;

    assert_eq!(plain, ranged);
    assert!(plain.contains("My Recently Saved Albums"));
    assert!(plain.contains("Latest additions"));
}

#[tokio::test]
async fn test_non_recent_window_shows_all_time() {
    let snapshot = snapshot();
    let renderer = renderer(Profile::Detailed);

    let medium = renderer
        .render(&snapshot, &RenderRequest::new("songs", Some("medium_term")).unwrap())
        .await;
    let long = renderer
        .render(&snapshot, &RenderRequest::new("songs", Some("long_term")).unwrap())
        .await;

    assert_eq!(medium, long);
    assert!(long.contains("My All-Time Top Songs"));
    assert!(long.contains("All time favorites"));
    assert!(long.contains(">Old Song</text>"));
    assert!(!long.contains("Recent Song"));
}

#[tokio::test]
async fn test_empty_snapshot_renders_frame_only() {
    let snapshot = StatsSnapshot::default();
    for request in RenderRequest::all() {
        let svg = renderer(Profile::Compact).render(&snapshot, &request).await;
        assert_eq!(count_cards(&svg), 0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
    }
}

#[tokio::test]
async fn test_groups_are_balanced() {
    let snapshot = snapshot();
    for profile in [Profile::Detailed, Profile::Compact] {
        for (request, svg) in renderer(profile).render_all(&snapshot).await {
            assert_eq!(
                svg.matches("<g ").count(),
                svg.matches("</g>").count(),
                "{}",
                request.file_stem()
            );
        }
    }
}

#[test]
fn test_render_all_requests() {
    let stems: Vec<String> = RenderRequest::all().iter().map(|r| r.file_stem()).collect();
    assert_eq!(
        stems,
        vec![
            "artists_short_term",
            "artists_long_term",
            "songs_short_term",
            "songs_long_term",
            "albums",
        ]
    );
}
