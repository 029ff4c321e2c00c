//! Image materializer tests: de-duplication, proxy rewriting, canvas
//! rasterization, and failure tagging.

mod common;

use std::time::Duration;

use collection_report::config;
use collection_report::images::{materialize_images, unique_sources, CachedImage, HttpImageSource};

// ---------------------------------------------------------------------------
// unique_sources
// ---------------------------------------------------------------------------

#[test]
fn unique_sources_dedupes_on_card_src_not_code() {
    let cards = vec![
        common::sample_card("ST01-001", "Luffy", "https://img/a.png", 2, Some(15.0)),
        common::sample_card("ST01-001b", "Luffy (alt)", "https://img/a.png", 1, Some(40.0)),
        common::sample_card("ST01-013", "Law", "https://img/b.png", 1, Some(8.5)),
    ];
    assert_eq!(
        unique_sources(&cards),
        vec!["https://img/a.png", "https://img/b.png"]
    );
}

#[test]
fn unique_sources_skips_cards_without_a_source() {
    let cards = vec![
        common::sample_card("ST01-001", "Luffy", "", 2, Some(15.0)),
        common::sample_card("ST01-013", "Law", "https://img/b.png", 1, Some(8.5)),
    ];
    assert_eq!(unique_sources(&cards), vec!["https://img/b.png"]);
}

// ---------------------------------------------------------------------------
// materialize_images
// ---------------------------------------------------------------------------

#[test]
fn shared_card_src_is_loaded_exactly_once() {
    let source = common::CountingImageSource::new();
    let cards = vec![
        common::sample_card("ST01-001", "Luffy", "https://img/a.png", 2, Some(15.0)),
        common::sample_card("ST01-001b", "Luffy (alt)", "https://img/a.png", 1, Some(40.0)),
    ];

    let cache = materialize_images(&cards, &source, &mut |_, _| {});

    assert_eq!(source.request_count(), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache["https://img/a.png"].is_ready());
}

#[test]
fn progress_is_reported_per_unique_url() {
    let source = common::CountingImageSource::new();
    let cards = vec![
        common::sample_card("ST01-001", "Luffy", "https://img/a.png", 2, Some(15.0)),
        common::sample_card("ST01-001b", "Luffy (alt)", "https://img/a.png", 1, Some(40.0)),
        common::sample_card("ST01-013", "Law", "https://img/b.png", 1, Some(8.5)),
    ];

    let mut reported = Vec::new();
    materialize_images(&cards, &source, &mut |current, total| {
        reported.push((current, total));
    });

    assert_eq!(reported, vec![(1, 2), (2, 2)]);
}

#[test]
fn failed_load_is_tagged_not_fatal() {
    let cards = vec![
        common::sample_card("ST01-001", "Luffy", "https://img/a.png", 2, Some(15.0)),
        common::sample_card("ST01-013", "Law", "https://img/b.png", 1, Some(8.5)),
    ];

    let cache = materialize_images(&cards, &common::FailingImageSource, &mut |_, _| {});

    assert_eq!(cache.len(), 2);
    assert_eq!(cache["https://img/a.png"], CachedImage::Failed);
    assert_eq!(cache["https://img/b.png"], CachedImage::Failed);
}

#[test]
fn materialized_image_is_rasterized_onto_the_card_canvas() {
    let source = common::CountingImageSource::new();
    let cards = vec![common::sample_card(
        "ST01-001",
        "Luffy",
        "https://img/a.png",
        1,
        Some(15.0),
    )];

    let cache = materialize_images(&cards, &source, &mut |_, _| {});
    let CachedImage::Ready(encoded) = &cache["https://img/a.png"] else {
        panic!("expected a ready image");
    };

    assert_eq!(encoded.width, config::CARD_CANVAS_WIDTH);
    assert_eq!(encoded.height, config::CARD_CANVAS_HEIGHT);

    let decoded = image::load_from_memory(&encoded.data).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (744, 1044));
    // The wide source is letterboxed: white background at the top,
    // image content at the center.
    let corner = decoded.get_pixel(0, 0);
    assert!(corner[0] > 235 && corner[1] > 235 && corner[2] > 235);
    let center = decoded.get_pixel(372, 522);
    assert!(center[0] > 100 && center[1] < 100);
}

// ---------------------------------------------------------------------------
// Proxy rewriting
// ---------------------------------------------------------------------------

#[test]
fn allow_listed_hosts_require_proxy() {
    assert!(config::requires_image_proxy(
        "https://images.sfo2.digitaloceanspaces.com/cards/st01-001.png"
    ));
    assert!(config::requires_image_proxy(
        "https://en.onepiece-cardgame.com/images/cardlist/card/ST01-001.png"
    ));
    assert!(config::requires_image_proxy("https://dotgg.gg/op/a.png"));
    assert!(config::requires_image_proxy("https://i.pinimg.com/x/y.jpg"));
}

#[test]
fn other_hosts_load_directly() {
    assert!(!config::requires_image_proxy("https://example.com/card.png"));
    // Suffix matching must not catch lookalike registrable domains.
    assert!(!config::requires_image_proxy("https://baddotgg.gg/card.png"));
    assert!(!config::requires_image_proxy("not a url"));
}

#[test]
fn resolve_url_rewrites_only_allow_listed_hosts() {
    let source = HttpImageSource::new("https://cards.example.com", Duration::from_secs(15));

    let proxied = source.resolve_url("https://dotgg.gg/op/st01-001.png");
    assert_eq!(
        proxied,
        "https://cards.example.com/api/proxy-image?url=https%3A%2F%2Fdotgg.gg%2Fop%2Fst01-001.png"
    );

    let direct = source.resolve_url("https://example.com/card.png");
    assert_eq!(direct, "https://example.com/card.png");
}
