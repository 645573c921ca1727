//! the interactive loop tying input, the world and the renderer together.

use std::hash::Hasher;
use std::io::{self, stdin};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use metrohash::MetroHash64;
use termion::event::Key;
use termion::input::TermRead;

use crate::{pattern, pos, view, Pos, World};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(100);
const MIN_STEP_INTERVAL: Duration = Duration::from_millis(20);
const MAX_STEP_INTERVAL: Duration = Duration::from_secs(2);

/// how many recent board hashes the cycle detector remembers.
const CYCLE_HISTORY: usize = 10;

#[derive(Debug, Clone, Copy)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    fn delta(self) -> Pos {
        match self {
            Self::Up => pos!(0, -1),
            Self::Down => pos!(0, 1),
            Self::Left => pos!(-1, 0),
            Self::Right => pos!(1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum InputCmd {
    Exit,
    TogglePause,
    Step,
    Clear,
    Move(Dir),
    ToggleCell,
    ToggleEdge,
    Stamp(usize),
    Randomize,
    Accelerate,
    Decelerate,
}

/// decodes keys into commands on a dedicated thread. pause gating happens
/// in [`Session::apply`], never here.
fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        // a failed read is simply no input this tick
        let Ok(key) = key else { continue };
        let command = match key {
            Key::Char('q') | Key::Esc => InputCmd::Exit,
            Key::Char(' ') => InputCmd::TogglePause,
            Key::Char('s') => InputCmd::Step,
            Key::Char('c') => InputCmd::Clear,
            Key::Char('\n') => InputCmd::ToggleCell,
            Key::Char('e') => InputCmd::ToggleEdge,
            Key::Char('r') => InputCmd::Randomize,
            Key::Char('+') | Key::Char('=') => InputCmd::Accelerate,
            Key::Char('-') => InputCmd::Decelerate,
            Key::Char(digit @ '1'..='5') => InputCmd::Stamp(digit as usize - '1' as usize),
            Key::Up => InputCmd::Move(Dir::Up),
            Key::Down => InputCmd::Move(Dir::Down),
            Key::Left => InputCmd::Move(Dir::Left),
            Key::Right => InputCmd::Move(Dir::Right),
            _ => continue,
        };
        if sender.send(command).is_err() {
            break; // session hung up
        }
    }
}

/// knobs the CLI sets before the loop starts.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub start_paused: bool,
    pub step_interval: Duration,
    pub halt_on_cycle: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            start_paused: false,
            step_interval: DEFAULT_STEP_INTERVAL,
            halt_on_cycle: false,
        }
    }
}

/// owns the world and runs the interactive loop on the calling thread.
pub struct Session {
    world: World,
    paused: bool,
    cursor: Pos,
    step_interval: Duration,
    halt_on_cycle: bool,
    board_history: Vec<u64>,
    quit: bool,
    dirty: bool,
}

impl Session {
    pub fn new(world: World, options: SessionOptions) -> Self {
        let mut session = Self {
            world,
            paused: options.start_paused,
            cursor: pos!(0, 0),
            step_interval: options
                .step_interval
                .clamp(MIN_STEP_INTERVAL, MAX_STEP_INTERVAL),
            halt_on_cycle: options.halt_on_cycle,
            board_history: Vec::with_capacity(CYCLE_HISTORY),
            quit: false,
            dirty: true,
        };
        session.reset_history();
        session
    }

    /// runs until quit. the terminal guard lives on this stack frame, so
    /// any early return restores the terminal.
    pub fn run(mut self) -> io::Result<()> {
        let mut screen = view::Screen::new()?;
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || input_loop(sender));

        let mut last_step = Instant::now();
        loop {
            while let Ok(command) = receiver.try_recv() {
                self.apply(command);
            }
            if self.quit {
                break;
            }
            if !self.paused && last_step.elapsed() >= self.step_interval {
                self.advance_world();
                last_step = Instant::now();
            }
            if self.dirty {
                let status = view::Status {
                    paused: self.paused,
                    cursor: self.cursor,
                    step_interval: self.step_interval,
                };
                view::draw(&mut screen, &self.world, &status)?;
                self.dirty = false;
            }
            thread::sleep(INPUT_POLL_INTERVAL);
        }
        Ok(())
    }

    fn apply(&mut self, command: InputCmd) {
        debug!("applying {command:?}");
        match command {
            InputCmd::Exit => self.quit = true,
            InputCmd::TogglePause => self.paused = !self.paused,
            InputCmd::Step => {
                if self.paused {
                    self.advance_world();
                }
            }
            InputCmd::Clear => {
                self.world.clear();
                self.reset_history();
            }
            InputCmd::Move(direction) => {
                self.cursor = (self.cursor + direction.delta())
                    .clamped(self.world.width(), self.world.height());
            }
            InputCmd::ToggleCell => {
                if self.paused {
                    self.world.toggle(self.cursor);
                    self.reset_history();
                }
            }
            InputCmd::ToggleEdge => {
                let policy = self.world.edge_policy().toggled();
                self.world.set_edge_policy(policy);
                self.reset_history();
            }
            InputCmd::Stamp(index) => {
                if self.paused {
                    if let Some(pattern) = pattern::CATALOG.get(index) {
                        pattern.stamp(&mut self.world, self.cursor);
                        self.reset_history();
                    }
                }
            }
            InputCmd::Randomize => {
                if self.paused {
                    self.world.clear();
                    pattern::scatter(
                        &mut self.world,
                        &mut rand::thread_rng(),
                        pattern::SCATTER_DENSITY,
                    );
                    self.reset_history();
                }
            }
            InputCmd::Accelerate => {
                self.step_interval = (self.step_interval / 2).max(MIN_STEP_INTERVAL);
            }
            InputCmd::Decelerate => {
                self.step_interval = (self.step_interval * 2).min(MAX_STEP_INTERVAL);
            }
        }
        self.dirty = true;
    }

    /// advances one generation and, when enabled, pauses on a repeated
    /// board state.
    fn advance_world(&mut self) {
        self.world.advance();
        self.dirty = true;
        if !self.halt_on_cycle {
            return;
        }
        let hash = board_hash(&self.world);
        if self.board_history.contains(&hash) {
            info!(
                "board repeated at generation {}, pausing",
                self.world.generation()
            );
            self.paused = true;
            self.reset_history();
        } else {
            self.remember(hash);
        }
    }

    /// restarts cycle detection from the current board. every edit gets a
    /// fresh baseline, and a detected cycle runs one full period again
    /// after resuming.
    fn reset_history(&mut self) {
        if !self.halt_on_cycle {
            return;
        }
        self.board_history.clear();
        self.remember(board_hash(&self.world));
    }

    fn remember(&mut self, hash: u64) {
        if self.board_history.len() == CYCLE_HISTORY {
            self.board_history.remove(0);
        }
        self.board_history.push(hash);
    }
}

fn board_hash(world: &World) -> u64 {
    let mut hasher = MetroHash64::default();
    for y in 0..world.height() {
        for x in 0..world.width() {
            hasher.write_u8(world.is_alive(pos!(x, y)) as u8);
        }
    }
    hasher.finish()
}
