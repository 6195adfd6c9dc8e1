//! Grid animator: setup and the per-frame render tick.

use std::fmt;

use glyphfall_core::{AnimationConfig, AnimationOptions, SetupError};
use rand::Rng;
use tracing::{debug, error, trace};

use crate::cell::Step;
use crate::grid::Grid;
use crate::surface::{DrawingContext, Host, Surface};

/// A running falling-code animation bound to one surface.
///
/// Each animator owns its grid, configuration and random source, so any
/// number of them can run side by side without interacting.
pub struct Animator<S: Surface, R> {
    config: AnimationConfig,
    grid: Grid,
    surface: S,
    context: S::Context,
    rng: R,
    /// Timestamp of the previous frame in milliseconds. Starts at zero, so
    /// the first frame's delta is measured from the host's time origin.
    last_time_ms: f64,
}

/// Start an animation on the surface named `surface_id`.
///
/// On failure a single diagnostic is logged and `None` is returned; nothing
/// is drawn and no error reaches the caller.
pub fn begin<H, R>(
    host: &H,
    surface_id: &str,
    options: &AnimationOptions,
    rng: R,
) -> Option<Animator<H::Surface, R>>
where
    H: Host,
    R: Rng,
{
    match try_begin(host, surface_id, options, rng) {
        Ok(animator) => Some(animator),
        Err(err) => {
            error!(surface_id, "{err}");
            None
        }
    }
}

/// Like [`begin`], but returns the failure instead of logging it.
pub fn try_begin<H, R>(
    host: &H,
    surface_id: &str,
    options: &AnimationOptions,
    mut rng: R,
) -> Result<Animator<H::Surface, R>, SetupError>
where
    H: Host,
    R: Rng,
{
    let surface = host
        .surface_by_id(surface_id)
        .ok_or_else(|| SetupError::SurfaceNotFound {
            id: surface_id.to_string(),
        })?;
    let context = surface
        .context_2d()
        .ok_or_else(|| SetupError::ContextUnavailable {
            id: surface_id.to_string(),
        })?;
    let config = AnimationConfig::from_options(options)?;

    let grid = Grid::for_surface(surface.width(), surface.height(), &config, &mut rng);
    debug!(
        surface_id,
        width = surface.width(),
        height = surface.height(),
        columns = grid.columns(),
        rows = grid.rows(),
        "animation started"
    );

    Ok(Animator {
        config,
        grid,
        surface,
        context,
        rng,
        last_time_ms: 0.0,
    })
}

impl<S: Surface, R> fmt::Debug for Animator<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("config", &self.config)
            .field("columns", &self.grid.columns())
            .field("rows", &self.grid.rows())
            .field("last_time_ms", &self.last_time_ms)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, R: Rng> Animator<S, R> {
    /// Render one frame for the host timestamp `time_ms` (milliseconds,
    /// monotonically increasing).
    pub fn frame(&mut self, time_ms: f64) {
        let elapsed = (time_ms - self.last_time_ms) / 1000.0;
        self.last_time_ms = time_ms;
        trace!(time_ms, elapsed, "frame");
        self.tick(elapsed);
    }

    /// Advance every cell by `elapsed` seconds and redraw the surface.
    pub fn tick(&mut self, elapsed: f64) {
        let width = self.surface.width() as f64;
        let height = self.surface.height() as f64;
        let ctx = &mut self.context;

        // Translucent fill clears the surface and leaves a trail.
        ctx.set_fill_style(self.config.background_color);
        ctx.set_global_alpha(1.0);
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_font(&self.config.font, self.config.font_size);
        ctx.set_fill_style(self.config.color);

        let columns = self.grid.columns().max(1) as usize;
        let cell_size = self.config.cell_size as f64;
        let baseline = self.config.font_size as f64;
        let mut buf = [0u8; 4];

        for (index, cell) in self.grid.cells_mut().iter_mut().enumerate() {
            if cell.advance(elapsed, &self.config, &mut self.rng) == Step::Waiting {
                continue;
            }

            if cell.is_visible() {
                let x = (index % columns) as f64 * cell_size;
                let y = (index / columns) as f64 * cell_size + baseline;
                ctx.set_global_alpha(cell.opacity);
                ctx.fill_text(cell.symbol.encode_utf8(&mut buf), x, y);
            }
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid for seeding cell state in tests. Writes
    /// here bypass the checks setup performs.
    #[doc(hidden)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn context(&self) -> &S::Context {
        &self.context
    }
}
