pub mod choreographer;
pub mod config;
pub mod timers;
pub mod walker;
