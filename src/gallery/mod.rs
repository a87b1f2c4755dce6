//! Photo gallery with tag filtering and a lightbox.

pub mod lightbox;
pub mod photo;
