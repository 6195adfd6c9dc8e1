//! Frame pacing against a real terminal.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphfall_grid::FrameScheduler;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::canvas::TerminalCanvas;

/// Why the terminal stopped handing out frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user asked to quit.
    Quit,
    /// The terminal changed size; the animation must be set up again.
    Resize,
}

/// Presents the canvas once per frame and waits out the frame budget while
/// watching for quit keys and resizes.
pub struct TerminalScheduler<'a> {
    terminal: &'a mut DefaultTerminal,
    canvas: Rc<RefCell<TerminalCanvas>>,
    /// Time origin for frame timestamps.
    origin: Instant,
    frame_budget: Duration,
    exit: Option<Exit>,
    error: Option<io::Error>,
}

impl<'a> TerminalScheduler<'a> {
    pub fn new(
        terminal: &'a mut DefaultTerminal,
        canvas: Rc<RefCell<TerminalCanvas>>,
        fps: u32,
    ) -> Self {
        Self {
            terminal,
            canvas,
            origin: Instant::now(),
            frame_budget: Duration::from_secs(1) / fps.max(1),
            exit: None,
            error: None,
        }
    }

    /// Consume the scheduler, reporting why it stopped.
    pub fn finish(self) -> io::Result<Exit> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.exit.unwrap_or(Exit::Quit)),
        }
    }

    /// Draw the canvas to the terminal.
    fn present(&mut self) -> io::Result<()> {
        let canvas = self.canvas.borrow();
        self.terminal
            .draw(|frame| frame.render_widget(&*canvas, frame.area()))?;
        Ok(())
    }

    /// Handle input until `deadline` or until an exit is requested.
    fn wait_until(&mut self, deadline: Instant) -> io::Result<()> {
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            if !event::poll(deadline - now)? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(key) => {
                    self.exit = Some(Exit::Quit);
                    return Ok(());
                }
                Event::Resize(columns, rows) => {
                    debug!(columns, rows, "terminal resized");
                    self.exit = Some(Exit::Resize);
                    return Ok(());
                }
                _ => {}
            }
        }
    }
}

impl FrameScheduler for TerminalScheduler<'_> {
    fn request_frame(&mut self) -> Option<f64> {
        if self.exit.is_some() || self.error.is_some() {
            return None;
        }

        let deadline = Instant::now() + self.frame_budget;
        if let Err(err) = self.present().and_then(|()| self.wait_until(deadline)) {
            self.error = Some(err);
            return None;
        }
        if self.exit.is_some() {
            return None;
        }
        Some(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Keys that end the program.
fn is_quit(key: KeyEvent) -> bool {
    matches!(
        (key.modifiers, key.code),
        (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C'))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(is_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('t'))));
    }
}
