//! Tween - Timed scalar interpolation
//!
//! The animated collaborators (border colors, mascot expression, pupil
//! gaze, digit reveal) all move through scalar values that glide toward a
//! target over a fixed duration. A `Tween` holds the endpoints and start
//! time and is *sampled* against the frame loop's clock at draw time, so
//! no timer threads exist and tests can drive it with synthetic instants.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use pinpad_tui::state::{Easing, Tween};
//!
//! let start = Instant::now();
//! let mut t = Tween::new(0.0, start);
//! t.retarget(1.0, Duration::from_millis(300), Easing::InOut, start);
//!
//! assert_eq!(t.sample(start), 0.0);
//! assert_eq!(t.sample(start + Duration::from_millis(300)), 1.0);
//! ```

use std::time::{Duration, Instant};

// =============================================================================
// EASING
// =============================================================================

/// Easing curve applied to the normalized time of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Smoothstep: slow in, slow out.
    #[default]
    InOut,
}

impl Easing {
    /// Map normalized time (0..=1) to eased progress (0..=1).
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// A scalar gliding from one value to another over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a settled tween resting at `value`.
    pub fn new(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            start: now,
            duration: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    /// Start moving toward `to`, departing from the *currently sampled*
    /// value so a retarget mid-flight never jumps.
    pub fn retarget(&mut self, to: f32, duration: Duration, easing: Easing, now: Instant) {
        let current = self.sample(now);
        self.from = current;
        self.to = to;
        self.start = now;
        self.duration = duration;
        self.easing = easing;
    }

    /// Sample the tween at the given time.
    pub fn sample(&self, now: Instant) -> f32 {
        if self.duration.is_zero() || self.from == self.to {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// The value this tween is heading for.
    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Check if the tween has reached its target at the given time.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.from == self.to
            || self.duration.is_zero()
            || now.saturating_duration_since(self.start) >= self.duration
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_new_is_settled() {
        let now = base();
        let t = Tween::new(0.5, now);
        assert!(t.is_settled(now));
        assert_eq!(t.sample(now), 0.5);
        assert_eq!(t.target(), 0.5);
    }

    #[test]
    fn test_linear_midpoint() {
        let now = base();
        let mut t = Tween::new(0.0, now);
        t.retarget(2.0, Duration::from_millis(100), Easing::Linear, now);

        assert_eq!(t.sample(now + Duration::from_millis(50)), 1.0);
    }

    #[test]
    fn test_exact_at_endpoints() {
        let now = base();
        let mut t = Tween::new(1.0, now);
        t.retarget(3.0, Duration::from_millis(300), Easing::InOut, now);

        assert_eq!(t.sample(now), 1.0);
        assert_eq!(t.sample(now + Duration::from_millis(300)), 3.0);
        assert_eq!(t.sample(now + Duration::from_millis(900)), 3.0);
    }

    #[test]
    fn test_sample_before_start_clamps() {
        let now = base();
        let later = now + Duration::from_millis(50);
        let mut t = Tween::new(0.0, later);
        t.retarget(1.0, Duration::from_millis(100), Easing::Linear, later);

        // Sampling before the start must not underflow or extrapolate.
        assert_eq!(t.sample(now), 0.0);
    }

    #[test]
    fn test_retarget_departs_from_current_value() {
        let now = base();
        let mut t = Tween::new(0.0, now);
        t.retarget(1.0, Duration::from_millis(100), Easing::Linear, now);

        // Halfway there, turn around.
        let mid = now + Duration::from_millis(50);
        t.retarget(0.0, Duration::from_millis(100), Easing::Linear, mid);
        assert_eq!(t.sample(mid), 0.5);

        // And it heads back down from 0.5, not from 1.0.
        let v = t.sample(mid + Duration::from_millis(50));
        assert!((v - 0.25).abs() < 1e-6, "v = {}", v);
    }

    #[test]
    fn test_is_settled_after_duration() {
        let now = base();
        let mut t = Tween::new(0.0, now);
        t.retarget(1.0, Duration::from_millis(100), Easing::InOut, now);

        assert!(!t.is_settled(now + Duration::from_millis(50)));
        assert!(t.is_settled(now + Duration::from_millis(100)));
    }

    #[test]
    fn test_easing_inout_shape() {
        // Smoothstep is symmetric and slower than linear near the ends.
        assert_eq!(Easing::InOut.apply(0.0), 0.0);
        assert_eq!(Easing::InOut.apply(1.0), 1.0);
        assert_eq!(Easing::InOut.apply(0.5), 0.5);
        assert!(Easing::InOut.apply(0.1) < 0.1);
        assert!(Easing::InOut.apply(0.9) > 0.9);
    }
}
