use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use termion::raw::{IntoRawMode, RawTerminal};
use termion::{clear, cursor, style};

use crate::{Pos, World};

pub use canvas::Canvas;
mod canvas;

const ALIVE_CELL: char = '#';
const DEAD_CELL: char = '.';

/// scoped raw-terminal handle. acquiring it enters raw mode, hides the
/// cursor and clears the screen; dropping it restores the terminal again
/// on every exit path, panics and errors included.
pub struct Screen {
    out: RawTerminal<Stdout>,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        let mut out = stdout().into_raw_mode()?;
        write!(out, "{}{}", cursor::Hide, clear::All)?;
        out.flush()?;
        Ok(Self { out })
    }
}

impl Write for Screen {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = write!(
            self.out,
            "{}{}{}{}",
            clear::All,
            style::Reset,
            cursor::Goto(1, 1),
            cursor::Show
        );
        let _ = self.out.flush();
    }
}

/// per-frame session state the renderer needs besides the world itself.
pub struct Status {
    pub paused: bool,
    pub cursor: Pos,
    pub step_interval: Duration,
}

/// paints one full frame: the visible part of the board, a status line, a
/// key help line and, while paused, the cursor cell in inverted video.
pub fn draw(screen: &mut Screen, world: &World, status: &Status) -> io::Result<()> {
    let (term_width, term_height) = termion::terminal_size()?;
    // the bottom two rows hold the status and help lines
    let view_width = world.width().min(term_width as i32);
    let view_height = world.height().min(term_height.saturating_sub(2) as i32);

    let mut canvas = Canvas::new(view_width as usize, view_height as usize);
    canvas.layer(|pos| Some(if world.is_alive(pos) { ALIVE_CELL } else { DEAD_CELL }));
    canvas.display(screen)?;

    let summary = format!(
        "gen {}  pop {}  edge {}  {}ms/step  {}",
        world.generation(),
        world.population(),
        world.edge_policy().label(),
        status.step_interval.as_millis(),
        if status.paused { "paused" } else { "running" }
    );
    let help = if status.paused {
        "arrows move  enter toggle  1-5 stamp  s step  r random  c clear  e edge  space run  q quit"
    } else {
        "space pause  +/- speed  e edge  c clear  q quit"
    };
    write!(
        screen,
        "{}{}{}{}",
        cursor::Goto(1, view_height as u16 + 1),
        truncated(&summary, term_width as usize),
        cursor::Goto(1, view_height as u16 + 2),
        truncated(help, term_width as usize)
    )?;

    if status.paused && status.cursor.x < view_width && status.cursor.y < view_height {
        let cell = if world.is_alive(status.cursor) {
            ALIVE_CELL
        } else {
            DEAD_CELL
        };
        write!(
            screen,
            "{}{}{cell}{}",
            cursor::Goto(status.cursor.x as u16 + 1, status.cursor.y as u16 + 1),
            style::Invert,
            style::NoInvert
        )?;
    }
    screen.flush()
}

fn truncated(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}
