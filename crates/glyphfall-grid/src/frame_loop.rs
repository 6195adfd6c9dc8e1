//! Frame scheduling.
//!
//! The animator never schedules itself. A [`FrameScheduler`] supplied by
//! the host decides when the next frame happens, and [`run_frames`] keeps
//! requesting frames until the scheduler stops or the loop is cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use tracing::debug;

use crate::animator::Animator;
use crate::surface::Surface;

/// Source of frame timestamps.
pub trait FrameScheduler {
    /// Wait for the next frame and return its timestamp in milliseconds.
    ///
    /// Timestamps must not decrease. `None` means the host is tearing down
    /// and no further frames will be requested.
    fn request_frame(&mut self) -> Option<f64>;
}

/// Stops a running frame loop from outside.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop before its next frame.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Scheduler that replays a fixed sequence of timestamps.
#[derive(Debug, Clone)]
pub struct TimestampScheduler<I> {
    timestamps: I,
}

impl<I: Iterator<Item = f64>> TimestampScheduler<I> {
    pub fn new(timestamps: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            timestamps: timestamps.into_iter(),
        }
    }
}

impl<I: Iterator<Item = f64>> FrameScheduler for TimestampScheduler<I> {
    fn request_frame(&mut self) -> Option<f64> {
        self.timestamps.next()
    }
}

/// Drive `animator` until `scheduler` runs out of frames or `cancel` fires.
///
/// Returns the number of frames rendered.
pub fn run_frames<S, R, F>(
    animator: &mut Animator<S, R>,
    scheduler: &mut F,
    cancel: &CancelHandle,
) -> u64
where
    S: Surface,
    R: Rng,
    F: FrameScheduler + ?Sized,
{
    let mut frames = 0;
    while !cancel.is_cancelled() {
        let Some(time_ms) = scheduler.request_frame() else {
            break;
        };
        // The handle may have fired while the scheduler was waiting.
        if cancel.is_cancelled() {
            break;
        }
        animator.frame(time_ms);
        frames += 1;
    }
    debug!(frames, cancelled = cancel.is_cancelled(), "frame loop stopped");
    frames
}
