use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::foundation::math::mul_div255_u8;
use crate::render::frame::FrameRGBA;

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Integer pixel bounds of `rect` clipped to the frame, as `(x0, y0, x1, y1)` half-open.
fn clip_to_frame(frame: &FrameRGBA, rect: Rect) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.x0.floor().max(0.0);
    let y0 = rect.y0.floor().max(0.0);
    let x1 = rect.x1.ceil().min(f64::from(frame.width));
    let y1 = rect.y1.ceil().min(f64::from(frame.height));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

/// Draw `img` scaled into `dst` (device pixels) with nearest sampling, source-over.
///
/// `mirror_x` flips the image horizontally inside its box.
pub fn draw_image(frame: &mut FrameRGBA, img: &PreparedImage, dst: Rect, mirror_x: bool) {
    if img.width == 0 || img.height == 0 || dst.width() <= 0.0 || dst.height() <= 0.0 {
        return;
    }
    let Some((x0, y0, x1, y1)) = clip_to_frame(frame, dst) else {
        return;
    };

    let sx = f64::from(img.width) / dst.width();
    let sy = f64::from(img.height) / dst.height();
    for y in y0..y1 {
        let v = ((f64::from(y) + 0.5 - dst.y0) * sy).floor();
        if v < 0.0 || v >= f64::from(img.height) {
            continue;
        }
        for x in x0..x1 {
            let u = ((f64::from(x) + 0.5 - dst.x0) * sx).floor();
            if u < 0.0 || u >= f64::from(img.width) {
                continue;
            }
            let mut u = u as u32;
            if mirror_x {
                u = img.width - 1 - u;
            }
            let src = img.texel(u, v as u32);
            if src[3] == 0 {
                continue;
            }
            let out = over(frame.pixel(x, y), src, 1.0);
            frame.set_pixel(x, y, out);
        }
    }
}

/// Blend a solid color over `rect` with the given opacity.
pub fn fill_rect_over(frame: &mut FrameRGBA, rect: Rect, color: Rgba8Premul, opacity: f32) {
    let Some((x0, y0, x1, y1)) = clip_to_frame(frame, rect) else {
        return;
    };
    let src = color.to_array();
    for y in y0..y1 {
        for x in x0..x1 {
            let out = over(frame.pixel(x, y), src, opacity);
            frame.set_pixel(x, y, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
