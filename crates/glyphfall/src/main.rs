use std::cell::RefCell;
use std::rc::Rc;

use glyphfall_config::Settings;
use glyphfall_grid::{CancelHandle, FrameScheduler, begin, run_frames};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::DefaultTerminal;
use tracing::info;

mod canvas;
mod logging;
mod scheduler;

use canvas::{Screen, TerminalCanvas};
use scheduler::{Exit, TerminalScheduler};

/// Identifier of the full-screen background canvas.
const SURFACE_ID: &str = "background";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();
    let settings = glyphfall_config::load()?;
    info!(log = ?log_path, fps = settings.runtime.fps, "starting");

    let terminal = ratatui::init();
    let result = App::new(settings).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the settings and drives the animation.
#[derive(Debug)]
pub struct App {
    settings: Settings,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run animations until the user quits, starting a fresh one whenever
    /// the terminal is resized.
    pub fn run(self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.run_animation(&mut terminal)? == Exit::Resize {
            info!("restarting animation after resize");
        }
        Ok(())
    }

    /// Set up one animation sized to the current terminal and run it.
    fn run_animation(&self, terminal: &mut DefaultTerminal) -> color_eyre::Result<Exit> {
        let size = terminal.size()?;
        let canvas = Rc::new(RefCell::new(TerminalCanvas::new(size.width, size.height)));
        let mut screen = Screen::new();
        screen.register(SURFACE_ID, Rc::clone(&canvas));

        let mut scheduler = TerminalScheduler::new(terminal, canvas, self.settings.runtime.fps);
        match begin(&screen, SURFACE_ID, &self.settings.animation, self.rng()) {
            Some(mut animator) => {
                run_frames(&mut animator, &mut scheduler, &CancelHandle::new());
            }
            // Setup already logged why; keep the screen up until the user leaves.
            None => while scheduler.request_frame().is_some() {},
        }
        Ok(scheduler.finish()?)
    }

    fn rng(&self) -> SmallRng {
        match self.settings.runtime.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}
