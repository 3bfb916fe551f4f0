//! Backtracking search for a knight's tour.
//!
//! [`knight_tour`] is the engine used by the orchestrator. It keeps an
//! explicit stack of [`SearchFrame`]s instead of recursing, so work is
//! bounded by the try budget and depth never touches the thread stack.
//!
//! Every move attempt counts as one try, including attempts that land off
//! the board or on a visited cell. A search ends in one of three states:
//!
//! - [`SearchStatus::Solved`]: the stack holds all N² cells.
//! - [`SearchStatus::Dead`]: the stack emptied, no tour exists from this
//!   start with this move order.
//! - [`SearchStatus::BudgetExceeded`]: `tries` reached the budget first.
//!   A tour may still exist.

use crate::board::{Board, Square};
use crate::constants::MAX_TRIES;
use crate::moves::{MoveOrder, move_order};

/// Budget for a single search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Search stops once this many move attempts have been made.
    pub max_tries: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_tries: MAX_TRIES,
        }
    }
}

impl SearchLimits {
    pub fn with_max_tries(max_tries: u64) -> Self {
        Self { max_tries }
    }
}

/// How a search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Solved,
    Dead,
    BudgetExceeded,
}

/// Outcome of one search.
#[derive(Clone, Debug)]
pub struct TourResult {
    pub status: SearchStatus,
    /// Move attempts made, legal or not.
    pub tries: u64,
    /// Board as it stood when the search stopped.
    pub board: Board,
}

impl TourResult {
    #[inline]
    pub fn found(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// One committed position on the path.
#[derive(Copy, Clone, Debug)]
struct SearchFrame {
    x: usize,
    y: usize,
    /// Index into the move order of the next move to try from here.
    next_move: usize,
}

impl SearchFrame {
    fn new(x: usize, y: usize) -> Self {
        Self { x, y, next_move: 0 }
    }
}

/// Search for a tour of a `size`x`size` board from `start`, trying moves in
/// `order` at every step.
///
/// # Panics
///
/// Panics if `start` is not on the board.
pub fn knight_tour(
    size: usize,
    start: Square,
    order: &MoveOrder,
    limits: &SearchLimits,
) -> TourResult {
    let mut board = Board::new(size);
    let (x, y) = start;
    assert!(
        board.contains(x, y),
        "start [{x}, {y}] is off the {size}x{size} board"
    );

    let area = board.area();
    let mut stack: Vec<SearchFrame> = Vec::with_capacity(area + 1);
    let mut tries = 0u64;

    stack.push(SearchFrame::new(x, y));
    board.mark(x, y, 1);

    while !stack.is_empty() && stack.len() < area {
        let top = stack.len() - 1;
        let frame = stack[top];
        let mut advanced = false;

        for (i, mv) in order.iter().enumerate().skip(frame.next_move) {
            let (nx, ny) = mv.apply(frame.x, frame.y);

            tries += 1;
            if tries >= limits.max_tries {
                return TourResult {
                    status: SearchStatus::BudgetExceeded,
                    tries,
                    board,
                };
            }

            if board.is_free(nx, ny) {
                stack[top].next_move = i + 1;
                stack.push(SearchFrame::new(nx as usize, ny as usize));
                board.mark(nx as usize, ny as usize, stack.len() as u32);
                advanced = true;
                break;
            }
        }

        // Every move from this frame failed: free the cell and fall back to
        // the parent's next move.
        if !advanced {
            board.clear(frame.x, frame.y);
            stack.pop();
        }
    }

    let status = if stack.is_empty() {
        SearchStatus::Dead
    } else {
        SearchStatus::Solved
    };
    TourResult {
        status,
        tries,
        board,
    }
}

/// Search using the move order selected by `comb_idx`.
pub fn knight_tour_with_combination(
    size: usize,
    start: Square,
    comb_idx: u32,
    limits: &SearchLimits,
) -> TourResult {
    knight_tour(size, start, &move_order(comb_idx), limits)
}

/// Recursive depth-first search over the same tree as [`knight_tour`].
///
/// Kept as a reference implementation: it visits boards in the same order
/// and finds the same tour, but counts tries per call rather than per move
/// attempt. Recursion depth is N², so it is only suitable for small boards.
///
/// # Panics
///
/// Panics if `start` is not on the board.
pub fn knight_tour_recursive(
    size: usize,
    start: Square,
    order: &MoveOrder,
    limits: &SearchLimits,
) -> TourResult {
    let board = Board::new(size);
    let (x, y) = start;
    assert!(
        board.contains(x, y),
        "start [{x}, {y}] is off the {size}x{size} board"
    );

    let mut search = RecursiveSearch {
        board,
        order,
        tries: 0,
        max_tries: limits.max_tries,
        exhausted: false,
    };
    let found = search.visit(x as isize, y as isize, 1);

    let status = if found {
        SearchStatus::Solved
    } else if search.exhausted {
        SearchStatus::BudgetExceeded
    } else {
        SearchStatus::Dead
    };
    TourResult {
        status,
        tries: search.tries,
        board: search.board,
    }
}

struct RecursiveSearch<'a> {
    board: Board,
    order: &'a MoveOrder,
    tries: u64,
    max_tries: u64,
    exhausted: bool,
}

impl RecursiveSearch<'_> {
    fn visit(&mut self, x: isize, y: isize, step: u32) -> bool {
        if step as usize > self.board.area() {
            return true;
        }

        self.tries += 1;
        if self.tries >= self.max_tries {
            self.exhausted = true;
            return false;
        }

        if self.board.is_free(x, y) {
            let (ux, uy) = (x as usize, y as usize);
            self.board.mark(ux, uy, step);

            let order = self.order;
            for mv in order {
                let (nx, ny) = mv.apply(ux, uy);
                if self.visit(nx, ny, step + 1) {
                    return true;
                }
                if self.exhausted {
                    return false;
                }
            }

            self.board.clear(ux, uy);
        }

        false
    }
}
