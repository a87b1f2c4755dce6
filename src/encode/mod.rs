//! Frame sinks consumed by [`crate::scene::stage::Stage::render_range`].

/// Generic frame sink trait and built-in sinks.
pub mod sink;
