//! Knight-Tour: a backtracking knight's tour search with parallel move-order
//! exploration.
//!
//! The search engine walks the board depth-first with an explicit stack and
//! a try budget. How quickly it finds a tour depends heavily on the order in
//! which the eight knight moves are tried, so the explorer runs many orders
//! at once and keeps the one that needed the fewest tries.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, try budget and worker defaults
//! - [`board`] - Board recording visit order, rendering and tour checks
//! - [`moves`] - Knight move offsets and combination-index orderings
//! - [`search`] - Iterative backtracking engine (plus a recursive reference)
//! - [`tracker`] - Best result shared between workers
//! - [`explore`] - Bounded worker pool running a batch of move orders
//! - [`error`] - Validation errors
//!
//! ## Example
//!
//! ```
//! use knight_tour::explore::{ExploreConfig, explore_starting_cell};
//! use knight_tour::search::SearchLimits;
//!
//! let config = ExploreConfig {
//!     board_size: 5,
//!     max_workers: 2,
//!     limits: SearchLimits::with_max_tries(100_000),
//!     seed: Some(1),
//! };
//! let report = explore_starting_cell((0, 0), 4, &config).unwrap();
//! println!("{report}");
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod explore;
pub mod moves;
pub mod search;
pub mod tracker;
