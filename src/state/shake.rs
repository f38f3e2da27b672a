//! Shake Effect - Damped horizontal oscillation
//!
//! Fired when a wrong code is committed: the digit row swings left and
//! right a few cells and settles within half a second. Like the tweens,
//! the shake is sampled against the frame clock rather than driven by a
//! timer, so the offset is a pure function of elapsed time.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use pinpad_tui::state::Shake;
//!
//! let now = Instant::now();
//! let mut shake = Shake::new();
//! assert_eq!(shake.offset(now), 0);
//!
//! shake.trigger(now);
//! assert!(shake.is_active(now));
//! assert_eq!(shake.offset(now + Duration::from_millis(500)), 0);
//! ```

use std::time::{Duration, Instant};

/// Total lifetime of one shake.
const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Peak swing in cells.
const SHAKE_AMPLITUDE: f32 = 3.0;

/// Oscillation frequency in Hz.
const SHAKE_FREQUENCY: f32 = 8.0;

/// Exponential decay rate (per second) of the swing envelope.
const SHAKE_DECAY: f32 = 6.0;

// =============================================================================
// SHAKE
// =============================================================================

/// Transient horizontal shake, at most one in flight.
///
/// Re-triggering restarts the oscillation from zero phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shake {
    started: Option<Instant>,
}

impl Shake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the shake.
    pub fn trigger(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Check if the shake is still playing at the given time.
    pub fn is_active(&self, now: Instant) -> bool {
        match self.started {
            Some(start) => now.saturating_duration_since(start) < SHAKE_DURATION,
            None => false,
        }
    }

    /// Horizontal offset in cells at the given time.
    ///
    /// Zero before the first trigger and after the effect ends.
    pub fn offset(&self, now: Instant) -> i16 {
        let Some(start) = self.started else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= SHAKE_DURATION {
            return 0;
        }
        let t = elapsed.as_secs_f32();
        let envelope = SHAKE_AMPLITUDE * (-SHAKE_DECAY * t).exp();
        let phase = std::f32::consts::TAU * SHAKE_FREQUENCY * t;
        (envelope * phase.sin()).round() as i16
    }
}

// =============================================================================
// TESTS
// =============================================================================
