//! Error types for configuration and input validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("board size must be at least 1")]
    InvalidBoardSize,

    #[error("at least one worker is required")]
    NoWorkers,

    #[error("try budget must be positive")]
    ZeroBudget,

    #[error("starting cell [{x}, {y}] is outside the {size}x{size} board")]
    StartOutOfBounds { x: usize, y: usize, size: usize },

    #[error("step {step} is missing from the board")]
    MissingStep { step: u32 },

    #[error("step {step} is not a knight move from the previous cell")]
    BrokenPath { step: u32 },
}
