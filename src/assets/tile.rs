//! Repeating tile source for wave backgrounds.
//!
//! Tile images declare their square side length in the file name (`water_64.png`), which is
//! what the sampler is sized from; the decoded pixels are scaled into that square.

use std::path::Path;

use crate::assets::decode::{PreparedImage, decode_image_resized};
use crate::foundation::error::{WavewalkError, WavewalkResult};
use crate::foundation::math::wrap_i64;

const TILE_EXTENSIONS: [&str; 5] = ["png", "webp", "jpg", "jpeg", "avif"];

/// Parse the square tile side from a `_<N>.<ext>` suffix, ignoring any `?query`.
pub fn parse_tile_side(source: &str) -> WavewalkResult<u32> {
    let bad = || WavewalkError::validation(format!("could not parse tile size from '{source}'"));

    let path = source.split_once('?').map_or(source, |(p, _)| p);
    let (stem, ext) = path.rsplit_once('.').ok_or_else(bad)?;
    if !TILE_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(ext))
    {
        return Err(bad());
    }

    let (_, digits) = stem.rsplit_once('_').ok_or_else(bad)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let side: u32 = digits.parse().map_err(|_| bad())?;
    if side == 0 {
        return Err(WavewalkError::validation(format!(
            "tile size in '{source}' must be > 0"
        )));
    }
    Ok(side)
}

/// Immutable square tile, sampled with repeat wrapping.
#[derive(Clone, Debug)]
pub struct Tile {
    image: PreparedImage,
}

impl Tile {
    /// Load a tile from disk. The side length comes from the file name.
    #[tracing::instrument]
    pub fn load(path: &Path) -> WavewalkResult<Self> {
        let name = path.to_string_lossy();
        let side = parse_tile_side(&name)?;
        let bytes = std::fs::read(path).map_err(|e| {
            WavewalkError::asset(format!("read tile '{}': {e}", path.display()))
        })?;
        let tile = Self::decode(side, &bytes)?;
        tracing::debug!(side, "tile loaded");
        Ok(tile)
    }

    /// Decode encoded image bytes into a `side x side` tile.
    pub fn decode(side: u32, bytes: &[u8]) -> WavewalkResult<Self> {
        let image = decode_image_resized(bytes, side, side)
            .map_err(|e| WavewalkError::asset(format!("decode tile: {e:#}")))?;
        Ok(Self { image })
    }

    /// Build a tile from straight-alpha RGBA8 pixels.
    pub fn from_rgba8(side: u32, rgba: Vec<u8>) -> WavewalkResult<Self> {
        if side == 0 {
            return Err(WavewalkError::validation("tile side must be > 0"));
        }
        Ok(Self {
            image: PreparedImage::from_rgba8_straight(side, side, rgba)?,
        })
    }

    pub fn side(&self) -> u32 {
        self.image.width
    }

    /// Premultiplied texel with repeat wrapping on both axes.
    pub fn sample(&self, x: i64, y: i64) -> [u8; 4] {
        let side = self.image.width;
        self.image.texel(wrap_i64(x, side), wrap_i64(y, side))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/tile.rs"]
mod tests;
