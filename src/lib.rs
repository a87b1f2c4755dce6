//! Wavewalk renders the decorations of a small personal site without a browser.
//!
//! - A tiled background displaced by travelling sine waves ([`WaveRenderer`])
//! - Photographers walking across the page, pausing to take a flash photo ([`Choreographer`])
//! - Both composited on one canvas by a [`Stage`], frame by frame or into a [`FrameSink`]
//! - HTML fragments for the article cards, the "now" sidebar and the photo gallery
//!
//! All time is supplied by the caller as host milliseconds, so renders are reproducible.
#![forbid(unsafe_code)]

pub mod assets;
pub mod encode;
pub mod feeds;
pub mod foundation;
pub mod gallery;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod sprite;
pub mod wave;

pub use crate::assets::sprite_sheet::SpriteSheet;
pub use crate::assets::tile::{Tile, parse_tile_side};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::foundation::core::{CanvasSize, Fps, FrameIndex, Point, Rect, Rgba8Premul, Viewport};
pub use crate::foundation::error::{WavewalkError, WavewalkResult};
pub use crate::render::frame::FrameRGBA;
pub use crate::runtime::frame_loop::FrameLoop;
pub use crate::scene::model::{StageDef, WaveSpec};
pub use crate::scene::stage::Stage;
pub use crate::sprite::choreographer::Choreographer;
pub use crate::sprite::config::{ChoreoConfig, SpriteDef};
pub use crate::wave::config::{AxisCompose, WaveConfig, WavePreset};
pub use crate::wave::renderer::{WaveRenderer, WaveState};
