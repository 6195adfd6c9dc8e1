//! Falling-code grid animation.
//!
//! A grid of cells fades glyphs in and out on a 2-D drawing surface. Each
//! cell holds its own symbol, opacity, delay and fade duration; once a cell
//! fades out it recycles with a fresh random symbol, delay and duration.
//!
//! The animator is independent of any particular drawing backend: hosts
//! implement [`Host`], [`Surface`] and [`DrawingContext`], start an
//! animation with [`begin`] and drive it with [`run_frames`] or by calling
//! [`Animator::frame`] from their own loop.

mod animator;
mod cell;
mod frame_loop;
mod grid;
mod random;
mod surface;

pub use animator::{Animator, begin, try_begin};
pub use cell::{Cell, Fade, Step, VISIBILITY_THRESHOLD};
pub use frame_loop::{CancelHandle, FrameScheduler, TimestampScheduler, run_frames};
pub use grid::Grid;
pub use surface::{DrawingContext, Host, Surface};

pub use glyphfall_core::{AnimationConfig, AnimationOptions, SetupError};
