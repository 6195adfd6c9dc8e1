//! Core types shared by the glyphfall crates.
//!
//! Holds the animation configuration (full and partial forms), the color
//! type used for glyphs and background fills, the default character set
//! and the error types raised while setting an animation up.

mod chars;
mod color;
mod config;
mod error;

pub use chars::DEFAULT_CHARS;
pub use color::Rgba;
pub use config::{AnimationConfig, AnimationOptions, SecondsRange};
pub use error::{ConfigError, SetupError};
