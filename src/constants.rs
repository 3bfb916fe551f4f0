//! Constants for board dimensions, search budgets, and worker limits.
//!
//! These are the defaults used by the library and the CLI. Every value here
//! can be overridden at runtime through [`crate::search::SearchLimits`] or
//! [`crate::explore::ExploreConfig`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). The standard chessboard is 8x8.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Number of distinct knight moves from any square.
pub const MOVES_COUNT: usize = 8;

// =============================================================================
// Search Parameters
// =============================================================================

/// Maximum number of move attempts a single search may spend.
pub const MAX_TRIES: u64 = 1_000_000_000;

/// Maximum number of searches running at the same time.
pub const MAX_WORKERS: usize = 8;

/// Default number of combination indices tried per starting square.
pub const DEFAULT_COMBINATIONS: u32 = 64;

/// Number of orderings of the knight moves (8!).
pub const COMBINATIONS: u32 = factorial(MOVES_COUNT as u32);

/// Compute `x!` at compile time.
pub const fn factorial(mut x: u32) -> u32 {
    let mut r = 1;
    while x > 1 {
        r *= x;
        x -= 1;
    }
    r
}
