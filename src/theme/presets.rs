//! Built-in theme presets.
//!
//! `midnight` is the default: a dark charcoal backdrop, off-white digit
//! boxes, and the amber / green / red status trio. `terminal` maps
//! everything onto the ANSI palette so the user's own scheme shows
//! through.

use crate::types::Rgba;

use super::{Theme, ThemeColor};

/// The default dark preset.
pub fn midnight() -> Theme {
    Theme {
        background: ThemeColor::Rgb(Rgba::from_rgb_int(0x323232)),
        surface: ThemeColor::Rgb(Rgba::from_rgb_int(0xededed)),
        text: ThemeColor::Rgb(Rgba::BLACK),
        text_muted: ThemeColor::Rgb(Rgba::from_rgb_int(0x8a8a8a)),
        face: ThemeColor::Rgb(Rgba::WHITE),
        sclera: ThemeColor::Rgb(Rgba::WHITE),
        pupil: ThemeColor::Rgb(Rgba::BLACK),
        in_progress: ThemeColor::Rgb(Rgba::from_rgb_int(0xf99417)),
        correct: ThemeColor::Rgb(Rgba::from_rgb_int(0x16c47f)),
        wrong: ThemeColor::Rgb(Rgba::from_rgb_int(0xff1e56)),
    }
}

/// ANSI palette preset. Respects the terminal's color scheme.
pub fn terminal() -> Theme {
    Theme {
        background: ThemeColor::Default,
        surface: ThemeColor::Ansi(254),
        text: ThemeColor::Ansi(0),
        text_muted: ThemeColor::Ansi(8),
        face: ThemeColor::Ansi(15),
        sclera: ThemeColor::Ansi(15),
        pupil: ThemeColor::Ansi(0),
        in_progress: ThemeColor::Ansi(208),
        correct: ThemeColor::Ansi(41),
        wrong: ThemeColor::Ansi(197),
    }
}

/// Look up a preset by name (case-insensitive).
pub fn get_preset(name: &str) -> Option<Theme> {
    match name.to_lowercase().as_str() {
        "midnight" => Some(midnight()),
        "terminal" => Some(terminal()),
        _ => None,
    }
}

/// Names accepted by [`get_preset`].
pub const fn preset_names() -> &'static [&'static str] {
    &["midnight", "terminal"]
}
