//! Static-site feeds rendered to HTML fragments.

pub mod articles;
pub mod html;
pub mod now;
