//! Mascot - The reacting face above the digit row
//!
//! Eyebrows and mouth are quadratic Bézier curves rasterized onto a
//! braille-dot canvas (2x4 dots per cell), which is what lets the
//! expression *morph* instead of snapping: all three expressions share
//! the same curve family, differing only in the control point, so
//! interpolating one scalar interpolates the whole path.
//!
//! Expression progress runs on the scale happy = 0, neutral = 1,
//! sad = 2 and tweens over 300 ms. The mouth control point slides down
//! that scale while the eyebrows use the mirrored family, so brows and
//! mouth counter-rotate.
//!
//! The pupils track entry progress: `entered / max_length`, tweened over
//! 500 ms, sweeps the pupil across the sclera, drifts the whole face a
//! cell sideways, and pulls the brows closer to the eyes.

use std::time::{Duration, Instant};

use crate::state::{Easing, Tween};
use crate::theme::Theme;
use crate::types::{Attr, Cell, Expression, Rgba};

use super::buffer::FrameBuffer;

/// Cell footprint of the face block.
pub const MASCOT_WIDTH: u16 = 22;
pub const MASCOT_HEIGHT: u16 = 8;

/// Expression morph time.
const EXPRESSION_SHIFT: Duration = Duration::from_millis(300);

/// Gaze tracking time.
const GAZE_SHIFT: Duration = Duration::from_millis(500);

// Face geometry, in cells relative to the block origin.
const EYE_ROW: i32 = 3;
const EYE_WIDTH: i32 = 4;
const LEFT_EYE_X: i32 = 5;
const RIGHT_EYE_X: i32 = 13;

// Mouth geometry, in braille dots.
const MOUTH_LEFT: f32 = 10.0;
const MOUTH_RIGHT: f32 = 34.0;
const MOUTH_END_Y: f32 = 25.0;
const MOUTH_CURVE: f32 = 6.0;

// Brow geometry, in braille dots. Brows sit one cell above the eyes,
// separated by the progress-driven gap.
const BROW_SPAN: f32 = 8.0;
const BROW_CURVE: f32 = 2.0;

// =============================================================================
// BRAILLE CANVAS
// =============================================================================

/// Dot bit for a (column, row) position inside one braille cell.
const DOT_BITS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// A plot surface with 2x4 dots per terminal cell.
#[derive(Debug, Clone)]
pub struct BrailleCanvas {
    width: u16,
    height: u16,
    dots: Vec<u8>,
}

impl BrailleCanvas {
    /// Create a canvas covering `width` x `height` cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            dots: vec![0; width as usize * height as usize],
        }
    }

    /// Horizontal dot resolution.
    pub fn dot_width(&self) -> i32 {
        self.width as i32 * 2
    }

    /// Vertical dot resolution.
    pub fn dot_height(&self) -> i32 {
        self.height as i32 * 4
    }

    /// Erase all dots.
    pub fn clear(&mut self) {
        self.dots.fill(0);
    }

    /// Set one dot; out-of-bounds coordinates are dropped.
    pub fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.dot_width() || y >= self.dot_height() {
            return;
        }
        let cell = (y / 4) as usize * self.width as usize + (x / 2) as usize;
        self.dots[cell] |= DOT_BITS[(x % 2) as usize][(y % 4) as usize];
    }

    /// Dot bits of one cell (for tests and blitting).
    pub fn cell_bits(&self, cell_x: u16, cell_y: u16) -> u8 {
        if cell_x >= self.width || cell_y >= self.height {
            return 0;
        }
        self.dots[cell_y as usize * self.width as usize + cell_x as usize]
    }

    /// Copy non-empty cells into the frame buffer, keeping the
    /// background already painted there.
    pub fn blit(&self, fb: &mut FrameBuffer, origin_x: i32, origin_y: i32, fg: Rgba) {
        for cell_y in 0..self.height {
            for cell_x in 0..self.width {
                let bits = self.cell_bits(cell_x, cell_y);
                if bits == 0 {
                    continue;
                }
                let x = origin_x + cell_x as i32;
                let y = origin_y + cell_y as i32;
                let bg = fb
                    .get(x, y)
                    .map(|cell| cell.bg)
                    .unwrap_or(Rgba::TERMINAL_DEFAULT);
                let ch = char::from_u32(0x2800 + u32::from(bits)).unwrap_or(' ');
                fb.set(
                    x,
                    y,
                    Cell {
                        ch,
                        fg,
                        bg,
                        attrs: Attr::NONE,
                    },
                );
            }
        }
    }
}

/// Rasterize a quadratic Bézier onto the canvas.
fn stroke_quad(canvas: &mut BrailleCanvas, start: (f32, f32), ctrl: (f32, f32), end: (f32, f32)) {
    // Two samples per dot of horizontal span keeps the stroke gap-free.
    let steps = (((end.0 - start.0).abs() * 2.0) as i32).max(8);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let inv = 1.0 - t;
        let x = inv * inv * start.0 + 2.0 * inv * t * ctrl.0 + t * t * end.0;
        let y = inv * inv * start.1 + 2.0 * inv * t * ctrl.1 + t * t * end.1;
        canvas.plot(x.round() as i32, y.round() as i32);
    }
}

// =============================================================================
// MASCOT
// =============================================================================

/// Renderer state for the face block.
pub struct Mascot {
    expression: Tween,
    gaze: Tween,
    canvas: BrailleCanvas,
}

impl Mascot {
    pub fn new(now: Instant) -> Self {
        Self {
            expression: Tween::new(Expression::Neutral.progress(), now),
            gaze: Tween::new(0.0, now),
            canvas: BrailleCanvas::new(MASCOT_WIDTH, MASCOT_HEIGHT),
        }
    }

    /// Draw the face with its top-left corner at (x, y).
    pub fn draw(
        &mut self,
        fb: &mut FrameBuffer,
        x: i32,
        y: i32,
        expression: Expression,
        entered: usize,
        max_length: usize,
        theme: &Theme,
        now: Instant,
    ) {
        if expression.progress() != self.expression.target() {
            self.expression
                .retarget(expression.progress(), EXPRESSION_SHIFT, Easing::InOut, now);
        }
        let gaze_target = if max_length == 0 {
            0.0
        } else {
            (entered as f32 / max_length as f32).clamp(0.0, 1.0)
        };
        if gaze_target != self.gaze.target() {
            self.gaze.retarget(gaze_target, GAZE_SHIFT, Easing::InOut, now);
        }

        let p = self.expression.sample(now);
        let g = self.gaze.sample(now);

        // The whole face drifts a cell toward where the pupils look.
        let x = x + (g * 2.0 - 1.0).round() as i32;

        self.canvas.clear();
        self.stroke_brows(p, g);
        self.stroke_mouth(p);

        // Eyes first: the canvas blit keeps their sclera background.
        let sclera = theme.sclera.resolve();
        let pupil_col = (g * (EYE_WIDTH - 1) as f32).round() as i32;
        for eye_x in [LEFT_EYE_X, RIGHT_EYE_X] {
            fb.fill_rect(x + eye_x, y + EYE_ROW, EYE_WIDTH as u16, 1, sclera);
            fb.draw_char(
                x + eye_x + pupil_col,
                y + EYE_ROW,
                '●',
                theme.pupil.resolve(),
                sclera,
                Attr::NONE,
            );
        }

        self.canvas.blit(fb, x, y, theme.face.resolve());
    }

    /// Check if the face is still morphing or tracking.
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.expression.is_settled(now) || !self.gaze.is_settled(now)
    }

    /// Eyebrows use the mirrored curve family: raised (bulge up) when
    /// happy, drooping when sad. The brow row closes in on the eyes as
    /// entry progress grows.
    fn stroke_brows(&mut self, p: f32, g: f32) {
        let gap = 2 - g.round() as i32;
        let row = EYE_ROW - 1 - gap;
        let base = (row * 4) as f32;
        let end_y = base + 2.0;
        let ctrl_y = base + BROW_CURVE * p;

        for eye_x in [LEFT_EYE_X, RIGHT_EYE_X] {
            let left = (eye_x * 2) as f32;
            stroke_quad(
                &mut self.canvas,
                (left, end_y),
                (left + BROW_SPAN / 2.0, ctrl_y),
                (left + BROW_SPAN, end_y),
            );
        }
    }

    /// Mouth control point slides along the expression scale: below the
    /// endpoints for a smile, above them for a frown.
    fn stroke_mouth(&mut self, p: f32) {
        let ctrl_y = MOUTH_END_Y + MOUTH_CURVE * (1.0 - p);
        stroke_quad(
            &mut self.canvas,
            (MOUTH_LEFT, MOUTH_END_Y),
            ((MOUTH_LEFT + MOUTH_RIGHT) / 2.0, ctrl_y),
            (MOUTH_RIGHT, MOUTH_END_Y),
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================
