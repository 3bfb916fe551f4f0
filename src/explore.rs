//! Concurrent exploration of move orders from a starting cell.
//!
//! A batch runs one search per combination index `0..combinations`. The
//! indices are shuffled and fed through a bounded channel to a fixed pool
//! of at most `max_workers` scoped threads, so no more than that many
//! searches ever run at once. Each worker searches on its own fresh board
//! and reports to the batch's [`BestScoreTracker`]. The batch returns once
//! every dispatched search has finished.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded};

use crate::board::Square;
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_WORKERS};
use crate::error::TourError;
use crate::search::{SearchLimits, SearchStatus, knight_tour_with_combination};
use crate::tracker::{BestScore, BestScoreTracker};

/// Settings for a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExploreConfig {
    pub board_size: usize,
    /// Upper bound on searches running at the same time.
    pub max_workers: usize,
    pub limits: SearchLimits,
    /// Seed for the dispatch order. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            max_workers: MAX_WORKERS,
            limits: SearchLimits::default(),
            seed: None,
        }
    }
}

impl ExploreConfig {
    pub fn validate(&self) -> Result<(), TourError> {
        if self.board_size == 0 {
            return Err(TourError::InvalidBoardSize);
        }
        if self.max_workers == 0 {
            return Err(TourError::NoWorkers);
        }
        if self.limits.max_tries == 0 {
            return Err(TourError::ZeroBudget);
        }
        Ok(())
    }

    fn check_start(&self, (x, y): Square) -> Result<(), TourError> {
        if x >= self.board_size || y >= self.board_size {
            return Err(TourError::StartOutOfBounds {
                x,
                y,
                size: self.board_size,
            });
        }
        Ok(())
    }
}

/// One finished search within a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub start: Square,
    pub comb_idx: u32,
    pub status: SearchStatus,
    pub tries: u64,
    pub elapsed: Duration,
}

impl Attempt {
    pub fn found(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}, {:5}]: {} tries in {} ms",
            u8::from(self.found()),
            self.start.0,
            self.start.1,
            self.comb_idx,
            self.tries,
            self.elapsed.as_millis()
        )
    }
}

/// Result of a batch.
#[derive(Clone, Debug)]
pub struct BatchReport {
    pub start: Square,
    pub best: BestScore,
    /// Every search of the batch, in completion order.
    pub attempts: Vec<Attempt>,
    /// Most searches observed running at the same time.
    pub peak_workers: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bestScore [{}, {}]: {}", self.start.0, self.start.1, self.best)
    }
}

/// Indices `0..count` in random order.
pub fn combination_indices(count: u32, rng: &mut fastrand::Rng) -> Vec<u32> {
    let mut indices: Vec<u32> = (0..count).collect();
    rng.shuffle(&mut indices);
    indices
}

/// Run one search per combination index from `start` and keep the best.
pub fn explore_starting_cell(
    start: Square,
    combinations: u32,
    config: &ExploreConfig,
) -> Result<BatchReport, TourError> {
    config.validate()?;
    config.check_start(start)?;

    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let indices = combination_indices(combinations, &mut rng);
    let workers = config.max_workers.min(indices.len());

    log::debug!(
        "exploring [{}, {}]: {} combinations on {} workers",
        start.0,
        start.1,
        combinations,
        workers
    );

    let tracker = BestScoreTracker::new();
    let running = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    let (job_tx, job_rx) = bounded::<u32>(workers.max(1));
    let (result_tx, result_rx) = unbounded::<Attempt>();

    thread::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let (tracker, running, peak) = (&tracker, &running, &peak);

            s.spawn(move || {
                for comb_idx in job_rx {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);

                    let attempt = run_attempt(start, comb_idx, config);
                    tracker.record(attempt.found(), attempt.tries, comb_idx);

                    running.fetch_sub(1, Ordering::SeqCst);
                    // The receiver outlives the scope.
                    let _ = result_tx.send(attempt);
                }
            });
        }
        drop(job_rx);
        drop(result_tx);

        // Blocks while every worker is busy and the queue is full.
        for comb_idx in indices {
            if job_tx.send(comb_idx).is_err() {
                break;
            }
        }
        drop(job_tx);
    });

    let attempts: Vec<Attempt> = result_rx.iter().collect();
    let report = BatchReport {
        start,
        best: tracker.into_best(),
        attempts,
        peak_workers: peak.into_inner(),
    };
    log::debug!("{report} ({} searches)", report.attempts.len());
    Ok(report)
}

/// Explore every cell of the board, row by row of `x`.
pub fn explore_board(
    combinations: u32,
    config: &ExploreConfig,
) -> Result<Vec<BatchReport>, TourError> {
    config.validate()?;

    let size = config.board_size;
    let mut reports = Vec::with_capacity(size * size);
    for x in 0..size {
        for y in 0..size {
            let cell_config = ExploreConfig {
                seed: config.seed.map(|s| s.wrapping_add((x * size + y) as u64)),
                ..config.clone()
            };
            reports.push(explore_starting_cell((x, y), combinations, &cell_config)?);
        }
    }
    Ok(reports)
}

fn run_attempt(start: Square, comb_idx: u32, config: &ExploreConfig) -> Attempt {
    let started = Instant::now();
    let result =
        knight_tour_with_combination(config.board_size, start, comb_idx, &config.limits);
    let attempt = Attempt {
        start,
        comb_idx,
        status: result.status,
        tries: result.tries,
        elapsed: started.elapsed(),
    };
    log::info!("{attempt}");
    attempt
}
