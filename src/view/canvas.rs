use std::io::{self, Write};

use termion::{clear, cursor};

use crate::{pos, Pos};

/// a text frame composed in memory, one string per terminal row.
pub struct Canvas {
    lines: Vec<String>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let lines = (0..height).map(|_| " ".repeat(width)).collect();
        Self {
            lines,
            width,
            height,
        }
    }

    /// paints `f` over the frame; returning `None` keeps whatever an
    /// earlier layer left at that position.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(char) = f(pos!(x as i32, y as i32)) {
                    let line = &mut self.lines[y];
                    // lines hold exactly `width` chars, so `nth` cannot miss
                    let range = line
                        .char_indices()
                        .nth(x)
                        .map(|(start, ch)| start..start + ch.len_utf8())
                        .unwrap();
                    line.replace_range(range, &format!("{char}"));
                }
            }
        }
    }

    /// clears the terminal and writes the frame, one positioned line at a
    /// time. flushing is left to the caller.
    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", clear::All)?;
        for (index, line) in self.lines.iter().enumerate() {
            write!(out, "{}{line}", cursor::Goto(1, index as u16 + 1))?;
        }
        Ok(())
    }
}

#[test]
fn test_layer_replaces_single_cells() {
    let mut canvas = Canvas::new(4, 2);
    canvas.layer(|pos| (pos == pos!(2, 1)).then_some('#'));
    assert_eq!(canvas.lines[0], "    ");
    assert_eq!(canvas.lines[1], "  # ");
}
