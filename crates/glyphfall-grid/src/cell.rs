//! Per-cell animation state.

use glyphfall_core::AnimationConfig;
use rand::Rng;

use crate::random;

/// Opacity a cell must exceed before it is worth a draw call.
pub const VISIBILITY_THRESHOLD: f64 = 0.01;

/// Direction of a cell's current fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    In,
    Out,
}

/// What happened to a cell during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cell was still waiting out its delay.
    Waiting,
    /// The cell's opacity moved.
    Fading,
    /// The cell finished fading out and picked a new symbol, delay and duration.
    Recycled,
}

/// Animation state for one grid position.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Symbol currently shown.
    pub symbol: char,
    /// Current opacity. Fading in may overshoot 1.0 by at most one update.
    pub opacity: f64,
    /// Seconds left before the cell starts fading. `<= 0` means not delayed.
    pub delay_remaining: f64,
    /// Current fade direction.
    pub fade: Fade,
    /// Seconds one full fade takes in the current cycle. Always positive.
    pub fade_duration: f64,
}

impl Cell {
    /// Create a cell in its initial state.
    ///
    /// With probability `initial_density` the cell starts partially visible
    /// and undelayed, otherwise it starts invisible with a drawn delay.
    pub(crate) fn spawn<R: Rng>(config: &AnimationConfig, rng: &mut R) -> Self {
        let (opacity, delay_remaining) = if random::unit(rng) < config.initial_density {
            (random::unit(rng), 0.0)
        } else {
            (0.0, random::seconds(config.delay_duration_range, rng))
        };

        Self {
            symbol: random::symbol(&config.chars, rng),
            opacity,
            delay_remaining,
            fade: Fade::In,
            fade_duration: random::seconds(config.fade_duration_range, rng),
        }
    }

    /// Whether the cell sits out the current update.
    pub fn is_delayed(&self) -> bool {
        self.delay_remaining > 0.0
    }

    /// Whether the cell is opaque enough to draw.
    pub fn is_visible(&self) -> bool {
        self.opacity > VISIBILITY_THRESHOLD
    }

    /// Advance the cell by `elapsed` seconds.
    pub(crate) fn advance<R: Rng>(
        &mut self,
        elapsed: f64,
        config: &AnimationConfig,
        rng: &mut R,
    ) -> Step {
        if self.is_delayed() {
            self.delay_remaining -= elapsed;
            return Step::Waiting;
        }

        let fade_speed = 1.0 / self.fade_duration;
        match self.fade {
            Fade::In => {
                self.opacity += fade_speed * elapsed;
                if self.opacity >= 1.0 {
                    self.fade = Fade::Out;
                }
                Step::Fading
            }
            Fade::Out => {
                self.opacity -= fade_speed * elapsed;
                if self.opacity <= 0.0 {
                    self.recycle(config, rng);
                    return Step::Recycled;
                }
                Step::Fading
            }
        }
    }

    /// Reset after a completed fade-out.
    fn recycle<R: Rng>(&mut self, config: &AnimationConfig, rng: &mut R) {
        self.symbol = random::symbol(&config.chars, rng);
        self.opacity = 0.0;
        self.fade = Fade::In;
        self.delay_remaining = random::seconds(config.delay_duration_range, rng);
        self.fade_duration = random::seconds(config.fade_duration_range, rng);
    }
}
