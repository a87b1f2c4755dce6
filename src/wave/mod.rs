pub mod config;
pub mod phase;
pub mod renderer;
pub mod shape;
pub mod tuning;
