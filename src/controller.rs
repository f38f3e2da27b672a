//! Code Entry Controller - The verification state machine
//!
//! Owns everything the visual collaborators observe: the entered digits,
//! the verification [`Status`], the mascot [`Expression`], and the
//! wrong-attempt counter. The controller is the *sole writer* of these
//! signals; renderers hold read-only clones and never mutate.
//!
//! Three states, two edges: keystroke evaluation moves `InProgress` into
//! `Correct` or `Wrong`, and only the delayed reset moves a terminal
//! state back to `InProgress`. The reset is a stored deadline checked by
//! [`CodeEntryController::tick`] — scheduling overwrites any previous
//! deadline and teardown cancels it, so at most one reset is ever
//! pending.
//!
//! Time is passed in by the caller: the event loop hands over
//! `Instant::now()`, tests hand over synthetic instants.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use pinpad_tui::controller::CodeEntryController;
//! use pinpad_tui::types::Status;
//!
//! let now = Instant::now();
//! let mut entry = CodeEntryController::new(1234);
//!
//! entry.on_text_changed("1234", now);
//! assert_eq!(entry.status().get(), Status::Correct);
//!
//! // One second later the delayed reset restores the idle state.
//! assert!(entry.tick(now + Duration::from_millis(1000)));
//! assert_eq!(entry.status().get(), Status::InProgress);
//! assert!(entry.digits().is_empty());
//! ```

use std::time::{Duration, Instant};

use spark_signals::{Signal, signal};

use crate::types::{Expression, Status};

/// Delay between a terminal status and the automatic reset.
pub const RESET_DELAY: Duration = Duration::from_millis(1000);

/// Completion callback, invoked exactly once per finished attempt.
pub type AttemptCallback = Box<dyn FnMut()>;

// =============================================================================
// CODE ENTRY CONTROLLER
// =============================================================================

/// State machine for one verification session.
pub struct CodeEntryController {
    /// Decimal form of the target code, fixed at construction.
    target: String,
    /// Number of digit slots, `target.len()`.
    max_length: usize,
    code: Signal<Vec<u8>>,
    status: Signal<Status>,
    expression: Signal<Expression>,
    wrong_attempts: Signal<u32>,
    pending_reset: Option<Instant>,
    on_correct: Option<AttemptCallback>,
    on_wrong: Option<AttemptCallback>,
}

impl CodeEntryController {
    /// Create a controller for the given target code.
    ///
    /// The decimal digit count of `correct_code` determines how many
    /// slots the screen shows and when an attempt is committed.
    pub fn new(correct_code: u32) -> Self {
        let target = correct_code.to_string();
        let max_length = target.len();
        Self {
            target,
            max_length,
            code: signal(Vec::new()),
            status: signal(Status::InProgress),
            expression: signal(Expression::Neutral),
            wrong_attempts: signal(0u32),
            pending_reset: None,
            on_correct: None,
            on_wrong: None,
        }
    }

    /// Register the callback fired when the correct code is entered.
    pub fn on_correct(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_correct = Some(Box::new(callback));
        self
    }

    /// Register the callback fired when a wrong code is committed.
    pub fn on_wrong(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_wrong = Some(Box::new(callback));
        self
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Number of digit slots.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The entered digits signal (read-only by convention).
    pub fn code(&self) -> Signal<Vec<u8>> {
        self.code.clone()
    }

    /// The verification status signal (read-only by convention).
    pub fn status(&self) -> Signal<Status> {
        self.status.clone()
    }

    /// The mascot expression signal (read-only by convention).
    pub fn expression(&self) -> Signal<Expression> {
        self.expression.clone()
    }

    /// Monotonic wrong-attempt counter. Each increment is a shake
    /// trigger; the screen watches for changes.
    pub fn wrong_attempts(&self) -> Signal<u32> {
        self.wrong_attempts.clone()
    }

    /// Snapshot of the entered digits.
    pub fn digits(&self) -> Vec<u8> {
        self.code.get()
    }

    /// Check if a delayed reset is scheduled.
    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset.is_some()
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Evaluate a change of the raw capture-buffer text.
    ///
    /// Non-digit characters are stripped before parsing, so a paste of
    /// `"1a2b"` behaves exactly like `"12"`. The entered code is
    /// re-derived from the whole text on every call — deletions shorten
    /// it, and a buffer that grew past the slot count re-enters
    /// evaluation as soon as it fits again.
    ///
    /// No-op cases, leaving all state untouched:
    /// - a terminal status is showing (the one-second feedback window
    ///   ignores input until the reset runs);
    /// - the parsed digits exceed the slot count.
    pub fn on_text_changed(&mut self, raw: &str, now: Instant) {
        if self.status.get().is_terminal() {
            return;
        }

        let digits: Vec<u8> = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .map(|c| c as u8 - b'0')
            .collect();

        if digits.len() > self.max_length {
            return;
        }

        let entered: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
        self.code.set(digits.clone());

        if entered == self.target {
            self.mark_correct(now);
        } else if digits.len() == self.max_length {
            self.mark_wrong(now);
        } else {
            self.status.set(Status::InProgress);
        }
    }

    // =========================================================================
    // TERMINAL TRANSITIONS
    // =========================================================================

    fn mark_correct(&mut self, now: Instant) {
        self.status.set(Status::Correct);
        self.expression.set(Expression::Happy);
        self.schedule_reset(now);
        if let Some(callback) = self.on_correct.as_mut() {
            callback();
        }
    }

    fn mark_wrong(&mut self, now: Instant) {
        self.status.set(Status::Wrong);
        self.expression.set(Expression::Sad);
        self.wrong_attempts.set(self.wrong_attempts.get() + 1);
        self.schedule_reset(now);
        if let Some(callback) = self.on_wrong.as_mut() {
            callback();
        }
    }

    /// Cancel-and-replace: a new schedule overwrites any pending one.
    fn schedule_reset(&mut self, now: Instant) {
        self.pending_reset = Some(now + RESET_DELAY);
    }

    // =========================================================================
    // RESET
    // =========================================================================

    /// Advance the controller's clock.
    ///
    /// Returns true when the delayed reset fired this tick; the owner
    /// must then clear the capture buffer so the next raw text starts
    /// from empty.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_reset {
            Some(due) if now >= due => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Drop any scheduled reset. Called on screen teardown so no state
    /// mutates after disposal.
    pub fn cancel_pending_reset(&mut self) {
        self.pending_reset = None;
    }

    fn reset(&mut self) {
        self.pending_reset = None;
        self.code.set(Vec::new());
        self.status.set(Status::InProgress);
        self.expression.set(Expression::Neutral);
    }
}

// =============================================================================
// TESTS
// =============================================================================
