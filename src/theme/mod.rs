//! Theme System for pinpad-tui.
//!
//! Semantic colors for the entry screen with support for ANSI and RGB
//! values. The active theme lives in a thread-local signal so every
//! renderer picks up a theme switch on the next frame.
//!
//! # Example
//!
//! ```
//! use pinpad_tui::theme::{active_theme, set_theme, status_color};
//! use pinpad_tui::types::Status;
//!
//! // The default preset is the dark `midnight` palette.
//! let theme = active_theme();
//! assert_eq!(status_color(Status::InProgress), theme.in_progress.resolve());
//!
//! // Switch to the ANSI preset (respects the user's terminal scheme).
//! assert!(set_theme("terminal"));
//! pinpad_tui::theme::reset_theme_state();
//! ```

use spark_signals::{Derived, Signal, derived, signal};

use crate::types::{Rgba, Status};

pub mod presets;

pub use presets::{get_preset, preset_names};

// =============================================================================
// ThemeColor - A color that can be terminal default, ANSI, or RGB
// =============================================================================

/// Theme color can be:
/// - `Default`: Terminal's default color
/// - `Ansi(n)`: ANSI palette index (0-255)
/// - `Rgb(rgba)`: Explicit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    /// Use terminal's default color.
    Default,
    /// ANSI palette index (0-255).
    Ansi(u8),
    /// Explicit RGB color.
    Rgb(Rgba),
}

impl ThemeColor {
    /// Resolve to Rgba.
    pub const fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
        }
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::Default
    }
}

impl From<Rgba> for ThemeColor {
    fn from(color: Rgba) -> Self {
        Self::Rgb(color)
    }
}

impl From<u8> for ThemeColor {
    fn from(index: u8) -> Self {
        Self::Ansi(index)
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Semantic colors for the verification screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Screen fill behind everything.
    pub background: ThemeColor,
    /// Digit box fill.
    pub surface: ThemeColor,
    /// Digit glyphs.
    pub text: ThemeColor,
    /// Hint line.
    pub text_muted: ThemeColor,
    /// Mascot strokes (brows, mouth).
    pub face: ThemeColor,
    /// Eye white.
    pub sclera: ThemeColor,
    /// Eye pupil.
    pub pupil: ThemeColor,
    /// Border while typing / on the active slot.
    pub in_progress: ThemeColor,
    /// Border when the code matched.
    pub correct: ThemeColor,
    /// Border when the attempt failed.
    pub wrong: ThemeColor,
}

impl Theme {
    /// Border color carried by a verification status.
    pub const fn status_color(&self, status: Status) -> Rgba {
        match status {
            Status::InProgress => self.in_progress.resolve(),
            Status::Correct => self.correct.resolve(),
            Status::Wrong => self.wrong.resolve(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        presets::midnight()
    }
}

// =============================================================================
// Reactive active theme
// =============================================================================

thread_local! {
    static ACTIVE_THEME: Signal<Theme> = signal(presets::midnight());
}

/// Get the current theme.
pub fn active_theme() -> Theme {
    ACTIVE_THEME.with(|s| s.get())
}

/// Get the active theme signal for reactive tracking.
pub fn theme_signal() -> Signal<Theme> {
    ACTIVE_THEME.with(|s| s.clone())
}

/// Switch to a named preset. Returns false for an unknown name.
pub fn set_theme(name: &str) -> bool {
    match get_preset(name) {
        Some(theme) => {
            set_custom_theme(theme);
            true
        }
        None => false,
    }
}

/// Install a caller-built theme.
pub fn set_custom_theme(theme: Theme) {
    ACTIVE_THEME.with(|s| s.set(theme));
}

/// Restore the default preset (for testing).
pub fn reset_theme_state() {
    set_custom_theme(presets::midnight());
}

/// Border color for a status under the active theme.
pub fn status_color(status: Status) -> Rgba {
    active_theme().status_color(status)
}

/// Reactive status color that recalculates when the theme changes.
///
/// Returns a Derived; use `.get()` to read the current color.
pub fn status_style(status: Status) -> Derived<Rgba> {
    derived(move || status_color(status))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_resolve() {
        assert!(ThemeColor::Default.resolve().is_terminal_default());
        assert_eq!(ThemeColor::Ansi(208).resolve().ansi_index(), 208);
        let c = Rgba::rgb(1, 2, 3);
        assert_eq!(ThemeColor::Rgb(c).resolve(), c);
    }

    #[test]
    fn test_status_colors_distinct() {
        let theme = presets::midnight();
        let a = theme.status_color(Status::InProgress);
        let b = theme.status_color(Status::Correct);
        let c = theme.status_color(Status::Wrong);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_set_theme_by_name() {
        reset_theme_state();
        assert!(set_theme("terminal"));
        assert!(active_theme().background.resolve().is_terminal_default());

        assert!(!set_theme("no-such-theme"));
        // Unknown names leave the active theme alone.
        assert!(active_theme().background.resolve().is_terminal_default());
        reset_theme_state();
    }

    #[test]
    fn test_custom_theme_roundtrip() {
        reset_theme_state();
        let mut theme = presets::midnight();
        theme.wrong = ThemeColor::Rgb(Rgba::rgb(9, 9, 9));
        set_custom_theme(theme);
        assert_eq!(status_color(Status::Wrong), Rgba::rgb(9, 9, 9));
        reset_theme_state();
    }

    #[test]
    fn test_default_is_midnight() {
        assert_eq!(Theme::default(), presets::midnight());
    }

    #[test]
    fn test_status_style_reactive() {
        reset_theme_state();
        let style = status_style(Status::Wrong);
        let initial = style.get();

        set_theme("terminal");
        let after = style.get();

        assert_ne!(initial, after, "style should change when theme changes");
        reset_theme_state();
    }
}
