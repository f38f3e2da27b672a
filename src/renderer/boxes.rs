//! Digit Boxes - The per-slot status display
//!
//! One bordered box per expected digit, in a centered row. The border
//! carries the verification feedback:
//!
//! - the slot the next digit lands in is highlighted in the in-progress
//!   color and drawn with heavy border glyphs
//! - while typing, the other borders stay invisible (drawn in the box
//!   fill color)
//! - on a terminal status every border glides to the correct/wrong color
//!
//! Border colors tween over 300 ms and newly entered digits fade in over
//! 250 ms, both sampled against the frame clock.

use std::time::{Duration, Instant};

use crate::state::{Easing, Tween};
use crate::theme::Theme;
use crate::types::{Attr, BorderStyle, Rgba, Status};

use super::buffer::FrameBuffer;

/// Cell footprint of one digit box.
pub const BOX_WIDTH: u16 = 7;
pub const BOX_HEIGHT: u16 = 5;

/// Columns between adjacent boxes.
pub const BOX_GAP: u16 = 2;

/// Border color transition time.
const BORDER_FADE: Duration = Duration::from_millis(300);

/// Fade-in time for a newly entered digit.
const DIGIT_REVEAL: Duration = Duration::from_millis(250);

// =============================================================================
// COLOR GLIDE
// =============================================================================

/// A color gliding toward a target, retargeting from the mixed color.
#[derive(Debug, Clone, Copy)]
struct ColorGlide {
    from: Rgba,
    to: Rgba,
    progress: Tween,
}

impl ColorGlide {
    fn new(color: Rgba, now: Instant) -> Self {
        Self {
            from: color,
            to: color,
            progress: Tween::new(1.0, now),
        }
    }

    /// Head toward a new color; a no-op if already on the way there.
    fn set_target(&mut self, color: Rgba, now: Instant) {
        if color == self.to {
            return;
        }
        self.from = self.sample(now);
        self.to = color;
        let mut progress = Tween::new(0.0, now);
        progress.retarget(1.0, BORDER_FADE, Easing::InOut, now);
        self.progress = progress;
    }

    fn sample(&self, now: Instant) -> Rgba {
        Rgba::lerp(self.from, self.to, self.progress.sample(now))
    }

    fn is_settled(&self, now: Instant) -> bool {
        self.progress.is_settled(now)
    }
}

// =============================================================================
// DIGIT BOXES
// =============================================================================

/// Renderer state for the digit slot row.
pub struct DigitBoxes {
    borders: Vec<ColorGlide>,
    entered_at: Vec<Option<Instant>>,
    prev_len: usize,
}

impl DigitBoxes {
    pub fn new(max_length: usize, theme: &Theme, now: Instant) -> Self {
        let surface = theme.surface.resolve();
        Self {
            borders: vec![ColorGlide::new(surface, now); max_length],
            entered_at: vec![None; max_length],
            prev_len: 0,
        }
    }

    /// Total row width in cells for the given slot count.
    pub fn row_width(max_length: usize) -> u16 {
        let n = max_length as u16;
        n * BOX_WIDTH + n.saturating_sub(1) * BOX_GAP
    }

    /// Draw the row with its top-left corner at (x, y).
    ///
    /// The caller applies the shake offset to `x`; cells pushed off the
    /// edge are clipped by the frame buffer.
    pub fn draw(
        &mut self,
        fb: &mut FrameBuffer,
        x: i32,
        y: i32,
        digits: &[u8],
        status: Status,
        theme: &Theme,
        now: Instant,
    ) {
        self.track_reveals(digits.len(), now);

        let surface = theme.surface.resolve();
        let text = theme.text.resolve();

        for slot in 0..self.borders.len() {
            let highlighted = slot == digits.len();
            let target = if highlighted {
                theme.in_progress.resolve()
            } else {
                match status {
                    Status::InProgress => surface,
                    Status::Correct | Status::Wrong => theme.status_color(status),
                }
            };
            self.borders[slot].set_target(target, now);

            let box_x = x + slot as i32 * (BOX_WIDTH + BOX_GAP) as i32;
            let style = if highlighted {
                BorderStyle::Heavy
            } else {
                BorderStyle::Rounded
            };

            fb.fill_rect(box_x, y, BOX_WIDTH, BOX_HEIGHT, surface);
            fb.draw_border(
                box_x,
                y,
                BOX_WIDTH,
                BOX_HEIGHT,
                style,
                self.borders[slot].sample(now),
                surface,
            );

            if let Some(&digit) = digits.get(slot) {
                let reveal = self.reveal_progress(slot, now);
                let fg = Rgba::lerp(surface, text, reveal);
                fb.draw_char(
                    box_x + BOX_WIDTH as i32 / 2,
                    y + BOX_HEIGHT as i32 / 2,
                    char::from(b'0' + digit),
                    fg,
                    surface,
                    Attr::BOLD,
                );
            }
        }
    }

    /// Check if any border glide or digit reveal is still moving.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.borders.iter().any(|glide| !glide.is_settled(now))
            || self.entered_at.iter().flatten().any(|&entered| {
                now.saturating_duration_since(entered) < DIGIT_REVEAL
            })
    }

    /// Record when slots were filled so their digits can fade in, and
    /// forget stamps for slots emptied by deletion or reset.
    fn track_reveals(&mut self, len: usize, now: Instant) {
        if len > self.prev_len {
            for slot in self.prev_len..len.min(self.entered_at.len()) {
                self.entered_at[slot] = Some(now);
            }
        } else if len < self.prev_len {
            for slot in len..self.prev_len.min(self.entered_at.len()) {
                self.entered_at[slot] = None;
            }
        }
        self.prev_len = len;
    }

    fn reveal_progress(&self, slot: usize, now: Instant) -> f32 {
        match self.entered_at.get(slot).copied().flatten() {
            Some(entered) => {
                let elapsed = now.saturating_duration_since(entered);
                Easing::InOut.apply(elapsed.as_secs_f32() / DIGIT_REVEAL.as_secs_f32())
            }
            None => 1.0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
