//! # pinpad-tui
//!
//! Animated verification-code entry screen for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: the entry controller is the sole writer of a
//! handful of signals (entered digits, status, mascot expression) that the
//! renderers observe read-only.
//!
//! ## Architecture
//!
//! ```text
//! keystrokes → CaptureBuffer → CodeEntryController → signals
//!                                                      ↓
//!                       DigitBoxes / Mascot / Shake → FrameBuffer → diff → stdout
//! ```
//!
//! The status machine has three states, `inProgress`, `correct`, and
//! `wrong`; a terminal state shows its feedback (border colors, a happy or
//! sad face, a shake on failure) for one second, then a delayed reset
//! returns the screen to an empty in-progress entry.
//!
//! ## Modules
//!
//! - [`controller`] - the entry state machine and its signals
//! - [`state`] - tweens, the shake effect, the capture buffer
//! - [`input`] - crossterm event conversion and polling
//! - [`renderer`] - digit boxes, mascot face, cell buffer, ANSI output
//! - [`theme`] - semantic colors and presets
//! - [`screen`] - composition and the event/render loop

pub mod controller;
pub mod input;
pub mod renderer;
pub mod screen;
pub mod state;
pub mod theme;
pub mod types;

// Re-export the surface most callers need.
pub use controller::{CodeEntryController, RESET_DELAY};
pub use screen::VerificationScreen;
pub use theme::{Theme, active_theme, set_theme};
pub use types::{Expression, Status};
