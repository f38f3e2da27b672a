//! Core types for pinpad-tui.
//!
//! Everything the entry screen draws or tracks is built from these:
//! colors, cells, border glyphs, and the two state enums (entry status
//! and mascot expression) that flow through the reactive signals.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Integer channels for exact comparison. Alpha 255 = opaque.
/// Special value: r=-1 means "terminal default" (let terminal pick),
/// r=-2 means an ANSI palette index stored in g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an ANSI palette color (0-255).
    ///
    /// Marker encoding: r=-2, g=palette_index.
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if this is an ANSI palette color.
    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    /// Linear interpolation between two colors.
    ///
    /// Special colors (terminal default, ANSI) cannot be mixed; `t` snaps
    /// to whichever endpoint is nearer instead.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        if a.is_terminal_default() || a.is_ansi() || b.is_terminal_default() || b.is_ansi() {
            return if t < 0.5 { a } else { b };
        }
        let inv_t = 1.0 - t;
        Self {
            r: ((a.r as f32 * inv_t) + (b.r as f32 * t)) as i16,
            g: ((a.g as f32 * inv_t) + (b.g as f32 * t)) as i16,
            b: ((a.b as f32 * inv_t) + (b.b as f32 * t)) as i16,
            a: ((a.a as f32 * inv_t) + (b.a as f32 * t)) as i16,
        }
    }

    /// Create from 0xRRGGBB integer format.
    ///
    /// # Examples
    ///
    /// ```
    /// use pinpad_tui::types::Rgba;
    ///
    /// let amber = Rgba::from_rgb_int(0xf99417);
    /// assert_eq!(amber, Rgba::rgb(249, 148, 23));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::DIM`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// The renderers compute a grid of these; the output stage emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border glyph sets used by the digit boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 2,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Heavy = 3,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Heavy => ('━', '┃', '┏', '┓', '┛', '┗'),
        }
    }
}

// =============================================================================
// Entry Status
// =============================================================================

/// Verification status of the entered code.
///
/// Exactly one value holds at any time. Transitions are driven solely by
/// comparing the entered digits against the target code; the two terminal
/// states return to `InProgress` only through the delayed reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Fewer digits than the target, none of them disqualifying yet.
    #[default]
    InProgress,
    /// Entered digits equal the target code.
    Correct,
    /// All slots filled and the digits do not match.
    Wrong,
}

impl Status {
    /// Check if this is a terminal state (a reset is on its way).
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Correct | Self::Wrong)
    }
}

// =============================================================================
// Mascot Expression
// =============================================================================

/// Display variant for the mascot face, passed down to the renderer as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    Happy,
    #[default]
    Neutral,
    Sad,
}

impl Expression {
    /// Position of this expression on the interpolation scale.
    ///
    /// The face tweens along happy = 0, neutral = 1, sad = 2, so any pair
    /// of expressions interpolates through a single scalar.
    pub const fn progress(&self) -> f32 {
        match self {
            Self::Happy => 0.0,
            Self::Neutral => 1.0,
            Self::Sad => 2.0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_rgb_int() {
        assert_eq!(Rgba::from_rgb_int(0xff0000), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_rgb_int(0x16c47f), Rgba::rgb(22, 196, 127));
        assert_eq!(Rgba::from_rgb_int(0x000000), Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::from_rgb_int(0xffffff), Rgba::rgb(255, 255, 255));
    }

    #[test]
    fn test_rgba_lerp_endpoints() {
        let a = Rgba::rgb(0, 0, 0);
        let b = Rgba::rgb(255, 255, 255);
        assert_eq!(Rgba::lerp(a, b, 0.0), a);
        assert_eq!(Rgba::lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_rgba_lerp_midpoint() {
        let a = Rgba::rgb(0, 100, 200);
        let b = Rgba::rgb(200, 100, 0);
        let mid = Rgba::lerp(a, b, 0.5);
        assert_eq!(mid.r, 100);
        assert_eq!(mid.g, 100);
        assert_eq!(mid.b, 100);
    }

    #[test]
    fn test_rgba_lerp_clamps_t() {
        let a = Rgba::rgb(10, 10, 10);
        let b = Rgba::rgb(20, 20, 20);
        assert_eq!(Rgba::lerp(a, b, -1.0), a);
        assert_eq!(Rgba::lerp(a, b, 2.0), b);
    }

    #[test]
    fn test_rgba_lerp_special_colors_snap() {
        let a = Rgba::TERMINAL_DEFAULT;
        let b = Rgba::rgb(50, 50, 50);
        assert_eq!(Rgba::lerp(a, b, 0.2), a);
        assert_eq!(Rgba::lerp(a, b, 0.8), b);

        let ansi = Rgba::ansi(3);
        assert_eq!(Rgba::lerp(ansi, b, 0.4), ansi);
    }

    #[test]
    fn test_rgba_special_markers() {
        assert!(Rgba::TERMINAL_DEFAULT.is_terminal_default());
        assert!(!Rgba::TERMINAL_DEFAULT.is_ansi());

        let ansi = Rgba::ansi(196);
        assert!(ansi.is_ansi());
        assert!(!ansi.is_terminal_default());
        assert_eq!(ansi.ansi_index(), 196);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!Status::InProgress.is_terminal());
        assert!(Status::Correct.is_terminal());
        assert!(Status::Wrong.is_terminal());
        assert_eq!(Status::default(), Status::InProgress);
    }

    #[test]
    fn test_expression_progress_scale() {
        assert_eq!(Expression::Happy.progress(), 0.0);
        assert_eq!(Expression::Neutral.progress(), 1.0);
        assert_eq!(Expression::Sad.progress(), 2.0);
        assert_eq!(Expression::default(), Expression::Neutral);
    }

    #[test]
    fn test_border_style_chars() {
        let (h, v, tl, tr, br, bl) = BorderStyle::Rounded.chars();
        assert_eq!((h, v), ('─', '│'));
        assert_eq!((tl, tr), ('╭', '╮'));
        assert_eq!((br, bl), ('╯', '╰'));

        let (h, ..) = BorderStyle::Heavy.chars();
        assert_eq!(h, '━');
    }

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert!(cell.fg.is_terminal_default());
        assert!(cell.bg.is_terminal_default());
        assert_eq!(cell.attrs, Attr::NONE);
    }
}
