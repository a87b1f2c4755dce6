use super::*;

fn gallery() -> Gallery {
    Gallery::new(vec![
        Photo::new("mexico4023", "Beach", &["nature", "film"]),
        Photo::new("dig-dad", "Dad", &["people"]),
        Photo::new("roll2026", "Liberty Place", &["film"]),
        Photo::new("maybw057", "Stairs", &["people", "bw"]),
    ])
    .unwrap()
}

fn shown(g: &Gallery) -> Option<usize> {
    g.current().map(|v| v.photo)
}

#[test]
fn everything_visible_at_first() {
    let g = gallery();
    assert_eq!(g.visible(), &[0, 1, 2, 3]);
    assert_eq!(g.current_filter(), "*");
    assert!(!g.is_open());
}

#[test]
fn empty_src_is_rejected() {
    assert!(Gallery::new(vec![Photo::new(" ", "x", &[])]).is_err());
}

#[test]
fn filter_updates_active_set() {
    let mut g = gallery();
    g.filter("people");
    assert_eq!(g.visible(), &[1, 3]);
    assert!(!g.is_visible(0));
    g.filter("*");
    assert_eq!(g.visible().len(), 4);
}

#[test]
fn open_only_visible_photos() {
    let mut g = gallery();
    g.filter("film");
    assert!(!g.open(1));
    assert!(!g.open(99));
    assert!(!g.is_open());
    assert!(g.open(2));
    let view = g.current().unwrap();
    assert_eq!(view.src, "assets/images/photo/roll2026.jpg");
    assert_eq!(view.caption, "Liberty Place");
}

#[test]
fn navigation_wraps_within_active_set() {
    let mut g = gallery();
    g.filter("people");
    g.open(3);
    g.next();
    assert_eq!(shown(&g), Some(1));
    g.prev();
    g.prev();
    assert_eq!(shown(&g), Some(1));
}

#[test]
fn keyboard_controls() {
    let mut g = gallery();
    g.on_key(Key::ArrowRight);
    assert!(!g.is_open());

    g.open(0);
    g.on_key(Key::from_dom("ArrowRight"));
    assert_eq!(shown(&g), Some(1));
    g.on_key(Key::from_dom("ArrowLeft"));
    g.on_key(Key::ArrowLeft);
    assert_eq!(shown(&g), Some(3));
    g.on_key(Key::from_dom("Enter"));
    assert_eq!(shown(&g), Some(3));
    g.on_key(Key::Escape);
    assert!(!g.is_open());
    assert_eq!(g.current(), None);
}

#[test]
fn refilter_while_open_jumps_or_closes() {
    let mut g = gallery();
    g.open(3);
    g.filter("film");
    assert_eq!(shown(&g), Some(0));

    g.filter("astro");
    assert!(!g.is_open());

    // Filtering while closed never opens.
    g.filter("*");
    assert!(!g.is_open());
}
