use serde::{Deserialize, Serialize};

use crate::feeds::html::esc;

pub const PHOTO_DIR: &str = "assets/images/photo/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// File stem under [`PHOTO_DIR`].
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Photo {
    pub fn new(src: &str, alt: &str, tags: &[&str]) -> Self {
        Self {
            src: src.to_owned(),
            alt: alt.to_owned(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    pub fn thumb_path(&self) -> String {
        format!("{PHOTO_DIR}{}-thb.jpg", self.src)
    }

    pub fn full_path(&self) -> String {
        full_size_src(&self.thumb_path())
    }

    /// `*` matches every photo.
    pub fn matches(&self, tag: &str) -> bool {
        tag == "*" || self.tags.iter().any(|t| t == tag)
    }

    /// Thumbnail button markup for the gallery grid.
    pub fn thumb_html(&self) -> String {
        format!(
            r#"<figure><button class="thumb" type="button" data-tags="{}"><img class="thumb" src="{}" alt="{}"></button></figure>"#,
            esc(&self.tags.join(" ")),
            esc(&self.thumb_path()),
            esc(&self.alt)
        )
    }
}

/// Full-size image for a thumbnail: a trailing `-thb.jpg` or `_thb.jpg` (any case) becomes
/// `.jpg`. Other paths are returned unchanged.
pub fn full_size_src(thumb: &str) -> String {
    const SUFFIX: &str = "thb.jpg";
    let n = SUFFIX.len() + 1;
    if thumb.len() >= n && thumb.is_char_boundary(thumb.len() - n) {
        let (stem, tail) = thumb.split_at(thumb.len() - n);
        let sep = tail.as_bytes()[0];
        if (sep == b'-' || sep == b'_') && tail[1..].eq_ignore_ascii_case(SUFFIX) {
            return format!("{stem}.jpg");
        }
    }
    thumb.to_owned()
}

pub fn gallery_html(photos: &[Photo]) -> String {
    photos.iter().map(Photo::thumb_html).collect()
}
