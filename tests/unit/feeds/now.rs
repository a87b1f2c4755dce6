use super::*;
use serde_json::json;

fn all_mounts() -> MountSet {
    MountSet::new(NowSection::ALL.map(NowSection::mount_id))
}

fn feed(v: Value) -> NowFeed {
    parse_now_payload(&v.to_string()).unwrap()
}

#[test]
fn listening_album_year_and_artist_without_star() {
    let f = feed(json!({ "listening": { "album": "X", "artist": "Y", "year": 2020 } }));
    let html = render_listening(&f.listening[0]);
    assert!(html.contains(r#"<p class="title">X (2020)</p>"#));
    assert!(html.contains(r#"<p class="sub">Y</p>"#));
    assert!(!html.contains("fav-inline"));
    assert!(!html.contains("★"));
    assert!(html.starts_with(r#"<figure class="now-card" aria-label="X — Y">"#));
}

#[test]
fn listening_favorite_track_and_artist_title() {
    let f = feed(json!({ "listening": {
        "artist": "  Band  ", "favoriteSong": "Song & Dance", "year": "1999",
        "cover": "/c.jpg", "url": "https://example.com/a"
    } }));
    let html = render_listening(&f.listening[0]);
    assert!(html.contains(r#"<p class="title">Band (1999)</p>"#));
    assert!(html.contains(concat!(
        r#"<p class="sub">Band<span class="fav-inline" aria-label="Favorite track">"#,
        r#"<span class="star" aria-hidden="true">★</span> Song &amp; Dance</span></p>"#
    )));
    assert!(html.contains(concat!(
        r#"<a class="now-link" href="https://example.com/a" target="_blank" rel="noopener">"#,
        r#"<img src="/c.jpg" alt="Band — Song &amp; Dance" loading="lazy" decoding="async" class="now-img">"#,
        r#"<span class="sr-only">Band — Song &amp; Dance</span></a>"#
    )));
}

#[test]
fn listening_keeps_cover_next_to_embed() {
    let f = feed(json!({ "listening": {
        "album": "A", "cover": "/a.jpg", "embed": { "type": "youtube", "id": "abc" }
    } }));
    let html = render_listening(&f.listening[0]);
    assert!(html.contains(r#"<img src="/a.jpg""#));
    assert!(html.contains("https://www.youtube.com/embed/abc?modestbranding=1&amp;rel=0&amp;playsinline=1"));
    // No artist: no subline.
    assert!(!html.contains(r#"class="sub""#));
}

#[test]
fn empty_listening_entry_uses_generic_labels() {
    let f = feed(json!({ "listening": { "cover": "/x.jpg", "year": 0 } }));
    let html = render_listening(&f.listening[0]);
    assert!(html.contains(r#"aria-label="Listening item""#));
    assert!(html.contains(r#"alt="cover""#));
    assert!(html.contains(r#"<p class="title"></p>"#));
}

#[test]
fn reading_hides_cover_when_embedded() {
    let f = feed(json!({ "reading": {
        "title": "Book <1>", "author": "Someone", "year": 1965, "cover": "/b.jpg",
        "description": "Good so far"
    } }));
    let html = render_reading(&f.reading[0]);
    assert!(html.contains(r#"<p class="title">Book &lt;1&gt; (1965)</p>"#));
    assert!(html.contains(r#"<p class="sub">Someone</p>"#));
    assert!(html.contains(r#"<img src="/b.jpg" alt="Book &lt;1&gt; — Someone""#));
    assert!(html.ends_with(r#"<p class="now-desc">Good so far</p>"#));

    let f = feed(json!({ "reading": {
        "title": "Book", "cover": "/b.jpg", "embed": { "type": "mystery" }
    } }));
    let html = render_reading(&f.reading[0]);
    assert!(!html.contains("<img"));
    assert!(!html.contains("<iframe"));
}

#[test]
fn playing_title_only() {
    let f = feed(json!({ "playing": { "title": "Game", "year": 2017, "author": "ignored", "cover": "/g.png" } }));
    let html = render_playing(&f.playing[0]);
    assert!(html.contains(r#"aria-label="Game cover""#));
    assert!(html.contains(r#"<p class="title">Game (2017)</p>"#));
    assert!(!html.contains("ignored"));
    assert!(html.contains(r#"alt="Game cover""#));
}

#[test]
fn current_shape_accepts_arrays_and_singles() {
    let f = feed(json!({
        "current": {
            "listening": [{ "album": "One" }, { "album": "Two" }],
            "reading": { "title": "Solo" },
            "playing": null
        },
        "archive": []
    }));
    assert_eq!(f.listening.len(), 2);
    assert_eq!(f.reading.len(), 1);
    assert!(f.playing.is_empty());

    // A falsy `current` falls back to the flat shape.
    let f = feed(json!({ "current": null, "playing": { "title": "P" } }));
    assert_eq!(f.playing.len(), 1);
    assert!(f.listening.is_empty());
}

#[test]
fn wrongly_typed_fields_are_ignored() {
    let f = feed(json!({ "listening": { "album": 5, "artist": "Y", "year": true } }));
    let e = &f.listening[0];
    assert_eq!(e.album, None);
    assert_eq!(e.year, None);
    assert_eq!(e.artist.as_deref(), Some("Y"));
}

#[test]
fn html_body_is_detected_with_preview() {
    let body = format!("  \n<!DOCTYPE html><html>{}</html>", "x".repeat(1000));
    let err = parse_now_payload(&body).unwrap_err();
    let WavewalkError::Feed(msg) = err else {
        panic!("expected feed error");
    };
    assert!(msg.contains("HTML"));
    assert!(msg.len() < 400);

    assert_eq!(
        render_now_or_fallback(&body, &all_mounts()),
        NowOutcome::Fallback(FALLBACK_HTML.to_owned())
    );
}

#[test]
fn invalid_json_and_bad_status_fall_back() {
    assert!(matches!(parse_now_payload("{nope"), Err(WavewalkError::Feed(_))));
    assert!(matches!(
        render_now_or_fallback("{nope", &all_mounts()),
        NowOutcome::Fallback(_)
    ));
    assert!(parse_now_response(404, "{}").is_err());
    assert!(parse_now_response(200, "{}").unwrap().is_empty());
}

#[test]
fn bandcamp_embed_defaults_and_strips_hash() {
    let e = Embed::from_value(&json!({ "type": "bandcamp", "trackId": 12345, "linkcol": "#0687f5" })).unwrap();
    let html = e.to_html().unwrap();
    assert!(html.contains(
        "https://bandcamp.com/EmbeddedPlayer/track=12345/size=small/bgcol=ffffff/linkcol=0687f5/transparent=true/"
    ));
    assert!(html.contains("now-embed--bc"));
}

#[test]
fn soundcloud_embed_query_and_variant() {
    let e = Embed::from_value(&json!({
        "type": "soundcloud", "url": "https://soundcloud.com/a/b", "show_user": false, "visual": true
    }))
    .unwrap();
    let html = e.to_html().unwrap();
    assert!(html.contains(concat!(
        "https://w.soundcloud.com/player/?url=https%3A%2F%2Fsoundcloud.com%2Fa%2Fb",
        "&amp;color=%23ff7700&amp;auto_play=false&amp;hide_related=false&amp;show_comments=true",
        "&amp;show_user=false&amp;show_reposts=false&amp;show_teaser=true&amp;visual=false"
    )));
    assert!(html.contains(r#"class="now-embed now-embed--sc-visual""#));
}

#[test]
fn raw_iframe_passthrough_and_rejections() {
    let e = Embed::from_value(&json!({
        "type": "bandcamp_iframe",
        "html": "<p>hi</p><IFRAME style=\"border:0\" src=\"https://bandcamp.com/x\"></IFRAME><iframe></iframe>"
    }))
    .unwrap();
    assert_eq!(
        e.to_html().unwrap(),
        "<IFRAME style=\"border:0\" src=\"https://bandcamp.com/x\"></IFRAME>"
    );

    let none = Embed::from_value(&json!({ "type": "bandcamp_iframe", "html": "<p>no player</p>" })).unwrap();
    assert_eq!(none.to_html(), None);

    assert_eq!(Embed::from_value(&json!({ "type": "youtube" })), None);
    assert_eq!(Embed::from_value(&json!({ "type": "youtube", "id": "" })), None);
    assert_eq!(Embed::from_value(&json!({ "type": "vimeo", "id": "1" })), None);
    assert_eq!(Embed::from_value(&json!("youtube")), None);
}

#[test]
fn sections_render_only_where_mounted() {
    let f = feed(json!({
        "listening": { "album": "A" },
        "reading": { "title": "B" }
    }));
    let out = render_now(&f, &MountSet::new(["now-reading", "now-playing"]));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].section, NowSection::Reading);
    assert!(out[0].html.contains(r#"<p class="title">B</p>"#));

    let out = render_now(&f, &all_mounts());
    let sections: Vec<_> = out.iter().map(|s| s.section).collect();
    assert_eq!(sections, [NowSection::Listening, NowSection::Reading]);
}
