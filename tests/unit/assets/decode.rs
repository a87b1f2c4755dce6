use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100, 50, 200, 128]);
    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn resized_decode_produces_requested_size() {
    let buf = png_bytes(2, 2, vec![255; 16]);
    let img = decode_image_resized(&buf, 4, 4).unwrap();
    assert_eq!((img.width, img.height), (4, 4));
    assert_eq!(img.rgba8_premul.len(), 4 * 4 * 4);
    assert_eq!(img.texel(3, 3), [255, 255, 255, 255]);
}

#[test]
fn still_images_decode_as_one_frame() {
    let buf = png_bytes(1, 1, vec![1, 2, 3, 255]);
    let frames = decode_frames(&buf).unwrap();
    assert_eq!(frames.len(), 1);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"not an image").is_err());
    assert!(decode_frames(b"GIF89a-truncated").is_err());
}

#[test]
fn buffer_length_is_validated() {
    assert!(PreparedImage::from_rgba8_straight(2, 2, vec![0; 3]).is_err());
}
