//! Recording host and diagnostic counter shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glyphfall_core::Rgba;
use glyphfall_grid::{DrawingContext, Host, Surface};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// One call made against a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillStyle(Rgba),
    GlobalAlpha(f64),
    Font(String, u32),
    FillRect(f64, f64, f64, f64),
    FillText(String, f64, f64),
}

pub type DrawLog = Rc<RefCell<Vec<DrawCall>>>;

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    supports_2d: bool,
    log: DrawLog,
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn context_2d(&self) -> Option<RecordingContext> {
        self.supports_2d.then(|| RecordingContext {
            log: Rc::clone(&self.log),
        })
    }
}

#[derive(Debug)]
pub struct RecordingContext {
    log: DrawLog,
}

impl RecordingContext {
    fn push(&self, call: DrawCall) {
        self.log.borrow_mut().push(call);
    }
}

impl DrawingContext for RecordingContext {
    fn set_fill_style(&mut self, color: Rgba) {
        self.push(DrawCall::FillStyle(color));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCall::GlobalAlpha(alpha));
    }

    fn set_font(&mut self, family: &str, size_px: u32) {
        self.push(DrawCall::Font(family.to_string(), size_px));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCall::FillRect(x, y, width, height));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.push(DrawCall::FillText(text.to_string(), x, y));
    }
}

/// A host whose surfaces log every drawing call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    surfaces: HashMap<String, RecordingSurface>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface(self, id: &str, width: u32, height: u32) -> Self {
        self.insert(id, width, height, true)
    }

    /// Register a surface that refuses to hand out a 2-D context.
    pub fn with_contextless_surface(self, id: &str, width: u32, height: u32) -> Self {
        self.insert(id, width, height, false)
    }

    fn insert(mut self, id: &str, width: u32, height: u32, supports_2d: bool) -> Self {
        self.surfaces.insert(
            id.to_string(),
            RecordingSurface {
                width,
                height,
                supports_2d,
                log: DrawLog::default(),
            },
        );
        self
    }

    /// Calls recorded on the surface `id`.
    pub fn calls(&self, id: &str) -> Vec<DrawCall> {
        self.surfaces
            .get(id)
            .map(|s| s.log.borrow().clone())
            .unwrap_or_default()
    }

    /// Calls recorded across every surface.
    pub fn total_calls(&self) -> usize {
        self.surfaces.values().map(|s| s.log.borrow().len()).sum()
    }

    pub fn clear(&self) {
        for surface in self.surfaces.values() {
            surface.log.borrow_mut().clear();
        }
    }
}

impl Host for RecordingHost {
    type Surface = RecordingSurface;

    fn surface_by_id(&self, id: &str) -> Option<RecordingSurface> {
        self.surfaces.get(id).cloned()
    }
}

/// Counts `ERROR` events.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCounter {
    count: Arc<AtomicUsize>,
}

impl DiagnosticCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for DiagnosticCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a subscriber that counts error diagnostics.
pub fn count_diagnostics<T>(f: impl FnOnce() -> T) -> (T, usize) {
    use tracing_subscriber::layer::SubscriberExt;

    let counter = DiagnosticCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, counter.count())
}

/// Text draws in call order.
pub fn texts(calls: &[DrawCall]) -> Vec<(String, f64, f64)> {
    calls
        .iter()
        .filter_map(|call| match call {
            DrawCall::FillText(text, x, y) => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect()
}
