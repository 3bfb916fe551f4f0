//! Knight move offsets and the orderings in which they are tried.
//!
//! A search explores the eight knight moves in a fixed order. Different
//! orders lead the backtracking search down very different paths, so the
//! orchestrator runs many of them. An order is selected by a combination
//! index `n`: starting from [`KNIGHT_MOVES`], perform `n` adjacent swaps,
//! the `i`-th swap exchanging positions `i mod 8` and `(i + 1) mod 8`.
//!
//! The walk is deterministic but not a bijection onto all 8! orderings.
//! Distinct indices may produce the same order. Recorded "best combination
//! index" results depend on this exact walk.

use crate::board::Square;
use crate::constants::MOVES_COUNT;

/// A knight move as signed deltas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveOffset {
    pub dx: i8,
    pub dy: i8,
}

impl MoveOffset {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// Apply this offset to `(x, y)`. May leave the board.
    #[inline]
    pub fn apply(self, x: usize, y: usize) -> (isize, isize) {
        (x as isize + self.dx as isize, y as isize + self.dy as isize)
    }
}

/// An ordering of the eight knight moves.
pub type MoveOrder = [MoveOffset; MOVES_COUNT];

/// The canonical move order, used as the start of every permutation walk.
pub const KNIGHT_MOVES: MoveOrder = [
    MoveOffset::new(-2, 1),
    MoveOffset::new(-1, 2),
    MoveOffset::new(1, 2),
    MoveOffset::new(2, 1),
    MoveOffset::new(2, -1),
    MoveOffset::new(1, -2),
    MoveOffset::new(-1, -2),
    MoveOffset::new(-2, -1),
];

/// Permute `items` in place by `n` steps of the adjacent-swap walk.
pub fn change_combination<T>(items: &mut [T], n: u32) {
    let len = items.len();
    if len == 0 {
        return;
    }
    for i in 0..n as usize {
        items.swap(i % len, (i + 1) % len);
    }
}

/// Move order selected by combination index `comb_idx`.
pub fn move_order(comb_idx: u32) -> MoveOrder {
    let mut order = KNIGHT_MOVES;
    change_combination(&mut order, comb_idx);
    order
}

/// True if `a` and `b` are one knight move apart.
pub fn is_knight_move(a: Square, b: Square) -> bool {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
}
