//! the grid evolution engine.

use std::mem;

use thiserror::Error;

use crate::{pos, Pos};

/// rule for handling neighbor lookups at the grid boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// the grid is a torus, coordinates wrap modulo the dimensions.
    Wrap,
    /// positions outside the grid are excluded from neighbor counts.
    Clip,
}

impl EdgePolicy {
    pub fn toggled(self) -> Self {
        match self {
            Self::Wrap => Self::Clip,
            Self::Clip => Self::Wrap,
        }
    }

    /// short name for status displays.
    pub fn label(self) -> &'static str {
        match self {
            Self::Wrap => "wrap",
            Self::Clip => "clip",
        }
    }
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },
}

/// a fixed-size life board holding the current generation plus the scratch
/// buffer the next one is computed into.
///
/// cells live in a flat buffer indexed `y * width + x`. out-of-bounds
/// coordinates always read as dead and ignore writes, under either edge
/// policy; the policy only decides how neighbors are counted during an
/// advance.
#[derive(Debug, Clone)]
pub struct World {
    width: i32,
    height: i32,
    cells: Vec<u8>,
    scratch: Vec<u8>,
    edge_policy: EdgePolicy,
    generation: u64,
}

impl World {
    /// creates an all-dead board. the torus is the default policy.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![0; len],
            scratch: vec![0; len],
            edge_policy: EdgePolicy::Wrap,
            generation: 0,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// switches the edge policy, effective from the next advance.
    pub fn set_edge_policy(&mut self, policy: EdgePolicy) {
        self.edge_policy = policy;
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos));
        pos.y as usize * self.width as usize + pos.x as usize
    }

    pub fn is_alive(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.cells[self.index(pos)] == 1
    }

    /// out of bounds is a silent no-op, so pattern stamps and cursor edits
    /// near the border never need their own checks.
    pub fn set_alive(&mut self, pos: Pos, alive: bool) {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.cells[index] = alive as u8;
        }
    }

    /// flips a cell between alive and dead; out of bounds is a no-op.
    pub fn toggle(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.cells[index] ^= 1;
        }
    }

    /// kills every cell and resets the generation counter. dimensions and
    /// edge policy stay as they are.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.generation = 0;
    }

    /// counts the alive cells. linear in the board area and recomputed on
    /// every call, so per-frame callers should read it once.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 1).count()
    }

    fn live_neighbors(&self, pos: Pos) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let neighbor = pos + pos!(dx, dy);
                let alive = match self.edge_policy {
                    EdgePolicy::Wrap => {
                        let wrapped = pos!(
                            neighbor.x.rem_euclid(self.width),
                            neighbor.y.rem_euclid(self.height)
                        );
                        self.cells[self.index(wrapped)] == 1
                    }
                    EdgePolicy::Clip => self.is_alive(neighbor),
                };
                count += alive as u8;
            }
        }
        count
    }

    /// steps the board one generation.
    ///
    /// every next state is computed from the frozen current buffer and
    /// written into scratch; only once the pass is complete do the buffers
    /// swap roles. the old generation becomes the next scratch and is
    /// overwritten wholesale on the following advance.
    pub fn advance(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = pos!(x, y);
                let index = self.index(pos);
                let alive = self.cells[index] == 1;
                self.scratch[index] = match (alive, self.live_neighbors(pos)) {
                    (true, 2) | (true, 3) => 1,
                    (false, 3) => 1,
                    _ => 0,
                };
            }
        }
        mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }
}
