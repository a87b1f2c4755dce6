use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;
use image::AnimationDecoder;

use crate::foundation::error::{WavewalkError, WavewalkResult};

/// Raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    pub fn from_rgba8_straight(width: u32, height: u32, mut rgba: Vec<u8>) -> WavewalkResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| WavewalkError::validation("image buffer size overflow"))?;
        if rgba.len() != expected {
            return Err(WavewalkError::validation(format!(
                "image buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Premultiplied texel at `(x, y)`; callers keep coordinates in range.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

pub fn decode_image(bytes: &[u8]) -> WavewalkResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_rgba8_straight(width, height, rgba.into_raw())
}

/// Decode an image and scale it to exactly `width x height`.
pub fn decode_image_resized(bytes: &[u8], width: u32, height: u32) -> WavewalkResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = if dyn_img.width() == width && dyn_img.height() == height {
        dyn_img.to_rgba8()
    } else {
        image::imageops::resize(
            &dyn_img.to_rgba8(),
            width,
            height,
            image::imageops::FilterType::Triangle,
        )
    };
    PreparedImage::from_rgba8_straight(width, height, rgba.into_raw())
}

/// Decode every frame of an animated GIF; any other format decodes as a single frame.
pub fn decode_frames(bytes: &[u8]) -> WavewalkResult<Vec<PreparedImage>> {
    if !bytes.starts_with(b"GIF8") {
        return Ok(vec![decode_image(bytes)?]);
    }

    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .context("open gif decoder")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("decode gif frames")?;
    if frames.is_empty() {
        return Err(WavewalkError::asset("gif contains no frames"));
    }

    frames
        .into_iter()
        .map(|f| {
            let buf = f.into_buffer();
            let (w, h) = buf.dimensions();
            PreparedImage::from_rgba8_straight(w, h, buf.into_raw())
        })
        .collect()
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
