//! Square board recording the order in which a knight visits each cell.
//!
//! A cell holds `0` while unvisited and `k` once the knight reached it on
//! step `k` (1-based). The search engine sets a cell when it advances onto it
//! and clears it again when it backtracks.

use std::fmt;

use crate::error::TourError;
use crate::moves::is_knight_move;

/// A cell on the board as `(x, y)`.
pub type Square = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub size: usize,
    cells: Vec<u32>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Visit step at `(x, y)`, or `None` off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.cells[self.idx(x, y)])
    }

    /// True if `(x, y)` lies on the board and has not been visited.
    #[inline]
    pub fn is_free(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        matches!(self.get(x as usize, y as usize), Some(0))
    }

    #[inline]
    pub fn mark(&mut self, x: usize, y: usize, step: u32) {
        let i = self.idx(x, y);
        self.cells[i] = step;
    }

    #[inline]
    pub fn clear(&mut self, x: usize, y: usize) {
        let i = self.idx(x, y);
        self.cells[i] = 0;
    }

    /// Number of visited cells.
    pub fn visited(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Check that the board holds a complete tour and return its path.
    ///
    /// Every step `1..=N²` must appear on the board, and consecutive steps
    /// must be a knight move apart.
    pub fn verify_tour(&self) -> Result<Vec<Square>, TourError> {
        let area = self.area();
        let mut path: Vec<Option<Square>> = vec![None; area];
        for y in 0..self.size {
            for x in 0..self.size {
                let step = self.cells[self.idx(x, y)] as usize;
                if step >= 1 && step <= area {
                    path[step - 1] = Some((x, y));
                }
            }
        }

        let mut squares = Vec::with_capacity(area);
        for (i, sq) in path.into_iter().enumerate() {
            let sq = sq.ok_or(TourError::MissingStep { step: i as u32 + 1 })?;
            if let Some(&prev) = squares.last() {
                if !is_knight_move(prev, sq) {
                    return Err(TourError::BrokenPath { step: i as u32 + 1 });
                }
            }
            squares.push(sq);
        }
        Ok(squares)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                write!(f, "{:2} ", self.cells[self.idx(x, y)])?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
