//! Verification Screen - Composition and the event/render loop
//!
//! Wires the controller to its collaborators and owns the terminal for
//! the lifetime of the session:
//!
//! - keystrokes land in the capture buffer, whose full text re-enters
//!   the controller on every change
//! - a render effect subscribes to the controller's signals and marks
//!   the frame dirty; animation keeps rendering until everything
//!   settles, then the loop goes quiet
//! - the controller's tick drives the delayed reset; when it fires the
//!   capture buffer is cleared
//! - teardown cancels any pending reset and restores the terminal even
//!   on an early error return
//!
//! # Example
//!
//! ```ignore
//! use pinpad_tui::{CodeEntryController, VerificationScreen};
//!
//! let controller = CodeEntryController::new(1234)
//!     .on_correct(|| {})
//!     .on_wrong(|| {});
//! VerificationScreen::new(controller).run()?;
//! ```

use std::cell::Cell as FlagCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{cursor, execute, terminal};
use spark_signals::effect;

use crate::controller::CodeEntryController;
use crate::input::{EntryEvent, InputEvent, poll_event};
use crate::renderer::{
    BOX_HEIGHT, DigitBoxes, FrameBuffer, MASCOT_HEIGHT, MASCOT_WIDTH, Mascot, OutputBuffer,
    StatefulCellRenderer,
};
use crate::state::{CaptureBuffer, Shake};
use crate::theme::{active_theme, theme_signal};
use crate::types::Attr;

/// Frame polling interval, roughly 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Rows between the mascot block and the digit row.
const MASCOT_MARGIN: u16 = 3;

const HINT: &str = "type the code · backspace deletes · esc leaves";

// =============================================================================
// TERMINAL SESSION
// =============================================================================

/// RAII guard for raw mode and the alternate screen.
///
/// Dropping it restores the terminal, so an error anywhere in the loop
/// cannot leave the shell unusable.
struct TerminalSession;

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// =============================================================================
// VERIFICATION SCREEN
// =============================================================================

/// The composed entry screen: controller, capture buffer, and renderers.
pub struct VerificationScreen {
    controller: CodeEntryController,
    capture: CaptureBuffer,
    shake: Shake,
    boxes: DigitBoxes,
    mascot: Mascot,
    seen_wrong: u32,
}

impl VerificationScreen {
    pub fn new(controller: CodeEntryController) -> Self {
        let now = Instant::now();
        let theme = active_theme();
        let boxes = DigitBoxes::new(controller.max_length(), &theme, now);
        Self {
            controller,
            capture: CaptureBuffer::new(),
            shake: Shake::new(),
            boxes,
            mascot: Mascot::new(now),
            seen_wrong: 0,
        }
    }

    /// Take over the terminal and run until the user leaves.
    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::enter()?;

        // Render-dirty effect: every controller or theme write lands
        // here, and the next loop turn repaints.
        let dirty = Rc::new(FlagCell::new(true));
        let stop_render_effect = {
            let dirty = dirty.clone();
            let code = self.controller.code();
            let status = self.controller.status();
            let expression = self.controller.expression();
            let attempts = self.controller.wrong_attempts();
            let theme = theme_signal();
            effect(move || {
                code.get();
                status.get();
                expression.get();
                attempts.get();
                theme.get();
                dirty.set(true);
            })
        };

        let result = self.event_loop(&dirty);

        stop_render_effect();
        self.controller.cancel_pending_reset();
        drop(session);
        result
    }

    fn event_loop(&mut self, dirty: &Rc<FlagCell<bool>>) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let mut frame = FrameBuffer::new(width, height);
        let mut prev: Option<FrameBuffer> = None;
        let mut out = OutputBuffer::new();
        let mut cells = StatefulCellRenderer::new();

        loop {
            let event = poll_event(FRAME_INTERVAL)?;
            let now = Instant::now();

            match event {
                Some(InputEvent::Entry(EntryEvent::Digit(digit))) => {
                    self.capture.push(char::from(b'0' + digit));
                    self.controller.on_text_changed(self.capture.as_str(), now);
                }
                Some(InputEvent::Entry(EntryEvent::Backspace)) => {
                    if self.capture.backspace() {
                        self.controller.on_text_changed(self.capture.as_str(), now);
                    }
                }
                Some(InputEvent::Entry(EntryEvent::Quit)) => return Ok(()),
                Some(InputEvent::Resize(w, h)) => {
                    frame = FrameBuffer::new(w, h);
                    prev = None;
                    cells.invalidate();
                    dirty.set(true);
                }
                Some(InputEvent::None) | None => {}
            }

            if self.controller.tick(now) {
                self.capture.clear();
            }

            // A new wrong attempt kicks the shake.
            let attempts = self.controller.wrong_attempts().get();
            if attempts != self.seen_wrong {
                self.seen_wrong = attempts;
                self.shake.trigger(now);
            }

            if dirty.replace(false) || self.is_animating(now) {
                self.render_into(&mut frame, now);
                cells.render_frame(prev.as_ref(), &frame, &mut out)?;
                out.flush_to(&mut io::stdout())?;
                prev = Some(frame.clone());
            }
        }
    }

    /// Check if any collaborator still has a transition in flight.
    fn is_animating(&self, now: Instant) -> bool {
        self.shake.is_active(now)
            || self.boxes.is_animating(now)
            || self.mascot.is_animating(now)
    }

    /// Compose one frame into the given buffer.
    ///
    /// Public so embedders (and tests) can render the screen into their
    /// own surface without handing over the terminal.
    pub fn render_into(&mut self, frame: &mut FrameBuffer, now: Instant) {
        let theme = active_theme();
        frame.fill(theme.background.resolve());

        let width = frame.width() as i32;
        let height = frame.height() as i32;
        let digits = self.controller.digits();
        let status = self.controller.status().get();
        let expression = self.controller.expression().get();
        let max_length = self.controller.max_length();

        let content_height = (MASCOT_HEIGHT + MASCOT_MARGIN + BOX_HEIGHT) as i32;
        let top = ((height - content_height) / 2).max(0);

        let mascot_x = (width - MASCOT_WIDTH as i32) / 2;
        self.mascot.draw(
            frame,
            mascot_x,
            top,
            expression,
            digits.len(),
            max_length,
            &theme,
            now,
        );

        let row_width = DigitBoxes::row_width(max_length) as i32;
        let boxes_y = top + (MASCOT_HEIGHT + MASCOT_MARGIN) as i32;
        let boxes_x = (width - row_width) / 2 + i32::from(self.shake.offset(now));
        self.boxes
            .draw(frame, boxes_x, boxes_y, &digits, status, &theme, now);

        if height > boxes_y + BOX_HEIGHT as i32 + 1 {
            frame.draw_text_centered(
                height - 2,
                HINT,
                theme.text_muted.resolve(),
                theme.background.resolve(),
                Attr::NONE,
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::BOX_WIDTH;
    use crate::theme::reset_theme_state;
    use crate::types::Status;

    fn screen(code: u32) -> VerificationScreen {
        reset_theme_state();
        VerificationScreen::new(CodeEntryController::new(code))
    }

    #[test]
    fn test_render_into_paints_scene() {
        let mut screen = screen(1234);
        let mut frame = FrameBuffer::new(80, 24);
        let now = Instant::now();
        screen.render_into(&mut frame, now);

        let theme = active_theme();
        // Background fill.
        assert_eq!(frame.get(0, 0).unwrap().bg, theme.background.resolve());

        // Four digit boxes: their fill color appears on the box row.
        let surface = theme.surface.resolve();
        let box_cells = (0..80)
            .filter(|&x| {
                (0..24).any(|y| frame.get(x, y).map(|c| c.bg) == Some(surface))
            })
            .count();
        assert!(box_cells >= 4 * BOX_WIDTH as usize, "boxes missing");

        // Hint line near the bottom.
        let hint_row: String = (0..80)
            .filter_map(|x| frame.get(x, 22).map(|c| c.ch))
            .collect();
        assert!(hint_row.contains("type the code"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let mut screen = screen(123456789);
        let mut frame = FrameBuffer::new(10, 4);
        screen.render_into(&mut frame, Instant::now());
    }

    #[test]
    fn test_wrong_entry_shakes_row() {
        let mut screen = screen(12);
        let now = Instant::now();
        screen.controller.on_text_changed("34", now);
        assert_eq!(screen.controller.status().get(), Status::Wrong);

        // The screen loop reacts to the bumped counter; emulate one turn.
        let attempts = screen.controller.wrong_attempts().get();
        assert_ne!(attempts, screen.seen_wrong);
        screen.seen_wrong = attempts;
        screen.shake.trigger(now);
        assert!(screen.is_animating(now));
    }
}
