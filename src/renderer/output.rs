//! Output buffering and stateful cell rendering.
//!
//! Turns a [`FrameBuffer`] into the fewest bytes the terminal needs:
//! - writes are batched into a single flush per frame
//! - cells identical to the previous frame are skipped entirely
//! - cursor moves and SGR codes are only emitted when state changes

use std::io::{self, Write};

use crate::types::{Attr, Rgba};

use super::buffer::FrameBuffer;

// =============================================================================
// OUTPUT BUFFER
// =============================================================================

/// A buffer that accumulates output for batch writing.
///
/// Instead of many small writes to stdout, everything accumulates here
/// and flushes once per frame.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a buffer with specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_ch(&mut self, c: char) {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Flush accumulated bytes to a writer and clear.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }

    /// The accumulated data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// ANSI HELPERS
// =============================================================================

/// Move cursor to absolute position (0-indexed in, 1-indexed on the wire).
#[inline]
fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

#[inline]
fn set_fg<W: Write>(w: &mut W, color: Rgba) -> io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[39m")
    } else if color.is_ansi() {
        write!(w, "\x1b[38;5;{}m", color.ansi_index())
    } else {
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

#[inline]
fn set_bg<W: Write>(w: &mut W, color: Rgba) -> io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[49m")
    } else if color.is_ansi() {
        write!(w, "\x1b[48;5;{}m", color.ansi_index())
    } else {
        write!(w, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Reset all attributes, then re-enable the requested ones.
fn set_attrs<W: Write>(w: &mut W, attrs: Attr) -> io::Result<()> {
    write!(w, "\x1b[0m")?;
    if attrs.contains(Attr::BOLD) {
        write!(w, "\x1b[1m")?;
    }
    if attrs.contains(Attr::DIM) {
        write!(w, "\x1b[2m")?;
    }
    if attrs.contains(Attr::UNDERLINE) {
        write!(w, "\x1b[4m")?;
    }
    if attrs.contains(Attr::INVERSE) {
        write!(w, "\x1b[7m")?;
    }
    Ok(())
}

// =============================================================================
// STATEFUL CELL RENDERER
// =============================================================================

/// Renders frames while tracking terminal state to minimize output.
///
/// Tracks the last cursor position, colors, and attributes, and only
/// emits escape codes for what changed. With the previous frame
/// supplied, unchanged cells produce zero bytes.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Option<Attr>,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: None,
        }
    }

    /// Forget tracked terminal state (after resize or full clear).
    pub fn invalidate(&mut self) {
        *self = Self::new();
    }

    /// Emit the difference between `prev` and `frame` into `out`.
    ///
    /// Pass `prev = None` to force a full repaint (first frame, resize).
    pub fn render_frame(
        &mut self,
        prev: Option<&FrameBuffer>,
        frame: &FrameBuffer,
        out: &mut OutputBuffer,
    ) -> io::Result<()> {
        // A stale previous frame of another size cannot be diffed against.
        let prev = prev.filter(|p| p.width() == frame.width() && p.height() == frame.height());

        for y in 0..frame.height() as i32 {
            for x in 0..frame.width() as i32 {
                let cell = frame.get(x, y).copied().unwrap_or_default();

                if let Some(prev) = prev {
                    if prev.get(x, y) == Some(&cell) {
                        continue;
                    }
                }

                if self.last_x != x || self.last_y != y {
                    cursor_to(out, x as u16, y as u16)?;
                }

                if self.last_attrs != Some(cell.attrs) {
                    set_attrs(out, cell.attrs)?;
                    // SGR reset also dropped the colors.
                    self.last_fg = None;
                    self.last_bg = None;
                    self.last_attrs = Some(cell.attrs);
                }
                if self.last_fg != Some(cell.fg) {
                    set_fg(out, cell.fg)?;
                    self.last_fg = Some(cell.fg);
                }
                if self.last_bg != Some(cell.bg) {
                    set_bg(out, cell.bg)?;
                    self.last_bg = Some(cell.bg);
                }

                out.write_ch(cell.ch);
                self.last_x = x + 1;
                self.last_y = y;
            }
        }
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn rendered(prev: Option<&FrameBuffer>, frame: &FrameBuffer) -> String {
        let mut renderer = StatefulCellRenderer::new();
        let mut out = OutputBuffer::new();
        renderer.render_frame(prev, frame, &mut out).unwrap();
        String::from_utf8_lossy(out.as_bytes()).into_owned()
    }

    #[test]
    fn test_output_buffer_accumulates_and_flushes() {
        let mut out = OutputBuffer::new();
        out.write_str("ab");
        out.write_ch('c');
        assert_eq!(out.as_bytes(), b"abc");
        assert_eq!(out.len(), 3);

        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"abc");
        assert!(out.is_empty());
    }

    #[test]
    fn test_full_repaint_contains_cells() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.set(
            0,
            0,
            Cell {
                ch: 'h',
                fg: Rgba::rgb(1, 2, 3),
                bg: Rgba::TERMINAL_DEFAULT,
                attrs: Attr::NONE,
            },
        );

        let text = rendered(None, &fb);
        assert!(text.contains("\x1b[1;1H"), "missing home move: {:?}", text);
        assert!(text.contains("\x1b[38;2;1;2;3m"), "missing fg: {:?}", text);
        assert!(text.contains('h'));
    }

    #[test]
    fn test_identical_frames_emit_nothing() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.draw_text(0, 0, "ab", Rgba::WHITE, Rgba::BLACK, Attr::NONE);
        let text = rendered(Some(&fb.clone()), &fb);
        assert!(text.is_empty(), "expected empty diff, got {:?}", text);
    }

    #[test]
    fn test_diff_emits_only_changed_cell() {
        let mut prev = FrameBuffer::new(3, 1);
        prev.draw_text(0, 0, "abc", Rgba::WHITE, Rgba::BLACK, Attr::NONE);
        let mut next = prev.clone();
        next.draw_char(1, 0, 'X', Rgba::WHITE, Rgba::BLACK, Attr::NONE);

        let text = rendered(Some(&prev), &next);
        assert!(text.contains('X'));
        assert!(!text.contains('a'));
        assert!(!text.contains('c'));
        // Cursor jumps straight to column 2.
        assert!(text.contains("\x1b[1;2H"));
    }

    #[test]
    fn test_size_mismatch_forces_repaint() {
        let prev = FrameBuffer::new(2, 2);
        let mut next = FrameBuffer::new(3, 2);
        next.draw_char(2, 1, 'z', Rgba::WHITE, Rgba::BLACK, Attr::NONE);

        let text = rendered(Some(&prev), &next);
        // All six cells were painted, not just the 'z'.
        assert!(text.matches(' ').count() >= 5, "got {:?}", text);
        assert!(text.contains('z'));
    }

    #[test]
    fn test_redundant_sgr_elided() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.draw_text(0, 0, "aaaa", Rgba::rgb(5, 5, 5), Rgba::BLACK, Attr::NONE);

        let text = rendered(None, &fb);
        assert_eq!(text.matches("\x1b[38;2;5;5;5m").count(), 1);
        assert_eq!(text.matches("\x1b[48;2;0;0;0m").count(), 1);
    }

    #[test]
    fn test_ansi_and_default_colors() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.set(
            0,
            0,
            Cell {
                ch: 'x',
                fg: Rgba::ansi(208),
                bg: Rgba::TERMINAL_DEFAULT,
                attrs: Attr::BOLD,
            },
        );
        let text = rendered(None, &fb);
        assert!(text.contains("\x1b[38;5;208m"));
        assert!(text.contains("\x1b[49m"));
        assert!(text.contains("\x1b[1m"));
    }
}
