//! Renderer Module - From signals to terminal cells
//!
//! The pipeline is small and strictly one-directional:
//!
//! ```text
//! controller signals → DigitBoxes/Mascot → FrameBuffer → diff → OutputBuffer → stdout
//! ```
//!
//! - [`buffer`] - the cell grid and drawing primitives
//! - [`boxes`] - the per-digit status boxes
//! - [`mascot`] - the reacting face (braille curves)
//! - [`output`] - batched, state-tracked ANSI emission

pub mod boxes;
pub mod buffer;
pub mod mascot;
pub mod output;

pub use boxes::{BOX_GAP, BOX_HEIGHT, BOX_WIDTH, DigitBoxes};
pub use buffer::FrameBuffer;
pub use mascot::{BrailleCanvas, MASCOT_HEIGHT, MASCOT_WIDTH, Mascot};
pub use output::{OutputBuffer, StatefulCellRenderer};
