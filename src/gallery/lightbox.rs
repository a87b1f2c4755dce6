//! Filter state and lightbox navigation over a fixed photo list.
//!
//! The set of visible photos is kept explicitly and updated on every filter change, so
//! navigation never has to ask what is on screen.

use crate::foundation::error::{WavewalkError, WavewalkResult};
use crate::gallery::photo::{Photo, full_size_src};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// What the lightbox shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightboxView {
    /// Index into the gallery's photo list.
    pub photo: usize,
    pub src: String,
    pub caption: String,
}

#[derive(Clone, Debug)]
pub struct Gallery {
    photos: Vec<Photo>,
    filter: String,
    /// Indices of photos matching `filter`, in list order.
    active: Vec<usize>,
    /// Position within `active` while the lightbox is open.
    open_at: Option<usize>,
}

impl Gallery {
    pub fn new(photos: Vec<Photo>) -> WavewalkResult<Self> {
        if let Some(p) = photos.iter().find(|p| p.src.trim().is_empty()) {
            return Err(WavewalkError::validation(format!(
                "photo '{}' has an empty src",
                p.alt
            )));
        }
        let active = (0..photos.len()).collect();
        Ok(Self {
            photos,
            filter: "*".to_owned(),
            active,
            open_at: None,
        })
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn current_filter(&self) -> &str {
        &self.filter
    }

    /// Show only photos carrying `tag` (`*` for all). An open lightbox jumps to the first
    /// visible photo, or closes when nothing is left.
    pub fn filter(&mut self, tag: &str) {
        self.filter = tag.to_owned();
        self.active = self
            .photos
            .iter()
            .enumerate()
            .filter(|(_, p)| p.matches(tag))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(tag, visible = self.active.len(), "gallery filtered");

        if self.is_open() {
            self.open_at = if self.active.is_empty() { None } else { Some(0) };
        }
    }

    /// Indices of visible photos, in list order.
    pub fn visible(&self) -> &[usize] {
        &self.active
    }

    pub fn is_visible(&self, photo: usize) -> bool {
        self.active.contains(&photo)
    }

    pub fn is_open(&self) -> bool {
        self.open_at.is_some()
    }

    /// Open the lightbox on `photo`. Hidden or unknown photos are ignored.
    pub fn open(&mut self, photo: usize) -> bool {
        match self.active.iter().position(|&i| i == photo) {
            Some(pos) => {
                self.open_at = Some(pos);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open_at = None;
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, by: isize) {
        let n = self.active.len();
        if let Some(pos) = self.open_at
            && n > 0
        {
            let n = n as isize;
            self.open_at = Some((pos as isize + by).rem_euclid(n) as usize);
        }
    }

    /// Keyboard handling while open; keys are ignored when the lightbox is closed.
    pub fn on_key(&mut self, key: Key) {
        if !self.is_open() {
            return;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other => {}
        }
    }

    pub fn current(&self) -> Option<LightboxView> {
        let idx = *self.active.get(self.open_at?)?;
        let photo = self.photos.get(idx)?;
        Some(LightboxView {
            photo: idx,
            src: full_size_src(&photo.thumb_path()),
            caption: photo.alt.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/lightbox.rs"]
mod tests;
