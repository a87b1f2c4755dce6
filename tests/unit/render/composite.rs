use super::*;

fn image(w: u32, h: u32, px: impl Fn(u32, u32) -> [u8; 4]) -> PreparedImage {
    let mut rgba = Vec::new();
    for y in 0..h {
        for x in 0..w {
            rgba.extend_from_slice(&px(x, y));
        }
    }
    PreparedImage::from_rgba8_straight(w, h, rgba).unwrap()
}

#[test]
fn over_opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255], 1.0), [1, 2, 3, 255]);
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255], 0.0), [10, 20, 30, 255]);
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0], 1.0), [10, 20, 30, 255]);
}

#[test]
fn draw_image_respects_transparency_and_clipping() {
    let mut frame = FrameRGBA::new(4, 4, Rgba8Premul::opaque(0, 0, 0));
    let img = image(2, 2, |x, _| if x == 0 { [255, 0, 0, 255] } else { [0, 0, 0, 0] });
    draw_image(&mut frame, &img, Rect::new(-1.0, 0.0, 3.0, 4.0), false);

    // Left half (x in [-1, 1)) is red, right half stays black.
    assert_eq!(frame.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(frame.pixel(1, 2), [0, 0, 0, 255]);
    assert_eq!(frame.pixel(3, 3), [0, 0, 0, 255]);
}

#[test]
fn draw_image_mirrors_horizontally() {
    let mut frame = FrameRGBA::new(2, 1, Rgba8Premul::opaque(0, 0, 0));
    let img = image(2, 1, |x, _| if x == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] });
    draw_image(&mut frame, &img, Rect::new(0.0, 0.0, 2.0, 1.0), true);
    assert_eq!(frame.pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(frame.pixel(1, 0), [255, 0, 0, 255]);
}

#[test]
fn fill_rect_over_blends_inside_rect_only() {
    let mut frame = FrameRGBA::new(3, 1, Rgba8Premul::opaque(0, 0, 0));
    fill_rect_over(
        &mut frame,
        Rect::new(1.0, 0.0, 2.0, 1.0),
        Rgba8Premul::opaque(255, 255, 255),
        0.5,
    );
    assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(frame.pixel(1, 0), [128, 128, 128, 255]);
    assert_eq!(frame.pixel(2, 0), [0, 0, 0, 255]);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let mut frame = FrameRGBA::new(1, 1, Rgba8Premul::transparent());
    frame.set_pixel(0, 0, [64, 0, 0, 128]);
    assert_eq!(frame.to_straight_rgba8(), vec![128, 0, 0, 128]);
}
