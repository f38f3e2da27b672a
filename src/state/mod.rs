//! State Module - Animation and input-capture state
//!
//! The non-reactive half of the screen's state: values that are pure
//! functions of elapsed time, sampled by the renderers each frame.
//!
//! - **Tween** - timed scalar interpolation with retarget-from-current
//! - **Shake** - damped horizontal oscillation on a wrong attempt
//! - **Capture** - the raw-keystroke buffer feeding the controller

mod capture;
mod shake;
mod tween;

pub use capture::*;
pub use shake::*;
pub use tween::*;
