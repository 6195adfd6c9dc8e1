//! Drawing surface abstraction.
//!
//! Modeled on a 2-D canvas: a host resolves string identifiers to surfaces,
//! a surface reports its pixel size and hands out a drawing context, and the
//! context carries fill style, global alpha and font state between calls.

use glyphfall_core::Rgba;

/// The environment that owns drawing surfaces.
pub trait Host {
    type Surface: Surface;

    /// Look up a surface by identifier.
    fn surface_by_id(&self, id: &str) -> Option<Self::Surface>;
}

/// A drawable area measured in pixels.
pub trait Surface {
    type Context: DrawingContext;

    /// Current width in pixels.
    fn width(&self) -> u32;

    /// Current height in pixels.
    fn height(&self) -> u32;

    /// Obtain a 2-D drawing context, if the surface supports one.
    fn context_2d(&self) -> Option<Self::Context>;
}

/// Immediate-mode 2-D drawing operations.
pub trait DrawingContext {
    /// Set the color used by [`fill_rect`](Self::fill_rect) and
    /// [`fill_text`](Self::fill_text).
    fn set_fill_style(&mut self, color: Rgba);

    /// Set the transparency applied to every subsequent fill, in `[0, 1]`.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Set the font used by [`fill_text`](Self::fill_text).
    fn set_font(&mut self, family: &str, size_px: u32);

    /// Fill a rectangle with the current fill style.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw text with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
