//! Integration tests for knight-tour
//!
//! The try counts used here were recorded from the engine on boards small
//! enough to search quickly, plus one 8x8 run known to solve in under a
//! million tries.

use std::sync::Arc;
use std::thread;

use knight_tour::board::Board;
use knight_tour::explore::{ExploreConfig, explore_board, explore_starting_cell};
use knight_tour::moves::{KNIGHT_MOVES, is_knight_move, move_order};
use knight_tour::search::{
    SearchLimits, SearchStatus, knight_tour, knight_tour_recursive, knight_tour_with_combination,
};
use knight_tour::tracker::{BestScore, BestScoreTracker};

// =============================================================================
// Helper functions
// =============================================================================

fn config(board_size: usize, max_workers: usize, max_tries: u64) -> ExploreConfig {
    ExploreConfig {
        board_size,
        max_workers,
        limits: SearchLimits::with_max_tries(max_tries),
        seed: Some(2024),
    }
}

/// Rebuild the path from the board and check every step by hand.
fn assert_valid_tour(board: &Board) {
    let area = board.area();
    let mut seen = vec![None; area];
    for y in 0..board.size {
        for x in 0..board.size {
            let step = board.get(x, y).unwrap() as usize;
            assert!(step >= 1 && step <= area, "cell [{x}, {y}] holds {step}");
            assert!(seen[step - 1].is_none(), "step {step} appears twice");
            seen[step - 1] = Some((x, y));
        }
    }
    let path: Vec<_> = seen.into_iter().map(Option::unwrap).collect();
    for pair in path.windows(2) {
        assert!(is_knight_move(pair[0], pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
    }
}

// =============================================================================
// Search engine
// =============================================================================

#[test]
fn test_standard_board_corner_combination_13() {
    let limits = SearchLimits::default();
    let first = knight_tour_with_combination(8, (0, 7), 13, &limits);
    let second = knight_tour_with_combination(8, (0, 7), 13, &limits);

    assert!(first.found());
    assert_eq!(first.tries, 550_520);
    assert_eq!(first.tries, second.tries);
    assert_eq!(first.board, second.board);
    assert_valid_tour(&first.board);
    assert_eq!(first.board.get(0, 7), Some(1));
}

#[test]
fn test_found_tours_are_valid() {
    let limits = SearchLimits::with_max_tries(2_000_000);
    for (size, start) in [(5, (0, 0)), (5, (2, 2)), (6, (0, 0))] {
        for comb in 0..4 {
            let result = knight_tour_with_combination(size, start, comb, &limits);
            match result.status {
                SearchStatus::Solved => {
                    assert_eq!(result.board.visited(), size * size);
                    assert_valid_tour(&result.board);
                    assert_eq!(result.board.verify_tour().unwrap()[0], start);
                }
                SearchStatus::BudgetExceeded => assert_eq!(result.tries, limits.max_tries),
                SearchStatus::Dead => assert!(result.tries < limits.max_tries),
            }
        }
    }
}

#[test]
fn test_dead_search_leaves_board_empty() {
    let result = knight_tour(4, (0, 0), &KNIGHT_MOVES, &SearchLimits::default());
    assert_eq!(result.status, SearchStatus::Dead);
    assert!(result.tries < SearchLimits::default().max_tries);
    assert_eq!(result.board.visited(), 0);
}

#[test]
fn test_budget_distinguishes_inconclusive_from_dead() {
    // The same search is dead with room to spare and inconclusive when cut short.
    let full_limits = SearchLimits::with_max_tries(1_000_000);
    let full = knight_tour(4, (0, 0), &KNIGHT_MOVES, &full_limits);
    let cut_limits = SearchLimits::with_max_tries(full.tries);
    let cut = knight_tour(4, (0, 0), &KNIGHT_MOVES, &cut_limits);
    assert_eq!(full.status, SearchStatus::Dead);
    assert_eq!(cut.status, SearchStatus::BudgetExceeded);
    assert_eq!(cut.tries, full.tries);
}

#[test]
fn test_recursive_agrees_with_iterative() {
    let order = move_order(5);
    let limits = SearchLimits::default();
    let iterative = knight_tour(5, (0, 0), &order, &limits);
    let recursive = knight_tour_recursive(5, (0, 0), &order, &limits);
    assert_eq!(iterative.status, recursive.status);
    assert_eq!(iterative.board, recursive.board);
}

#[test]
fn test_board_rendering() {
    let result = knight_tour(5, (0, 0), &KNIGHT_MOVES, &SearchLimits::default());
    let rendered = result.board.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with(" 1 "));
    assert!(lines[5].is_empty());
    for line in &lines[..5] {
        assert_eq!(line.len(), 15);
    }
}

// =============================================================================
// Best-result tracker
// =============================================================================

#[test]
fn test_tracker_tie_keeps_first_report() {
    let tracker = BestScoreTracker::new();
    assert!(tracker.record(true, 1000, 21));
    assert!(!tracker.record(true, 1000, 4));
    assert_eq!(
        tracker.into_best(),
        BestScore {
            tries: 1000,
            comb_idx: 21
        }
    );
}

#[test]
fn test_tracker_concurrent_minimum() {
    let tracker = Arc::new(BestScoreTracker::new());
    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for i in 0..100u32 {
                    let comb = t * 100 + i;
                    let tries = 10_000 - u64::from(comb % 977);
                    tracker.record(comb % 3 != 0, tries, comb);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (0..800u32)
        .filter(|c| c % 3 != 0)
        .map(|c| 10_000 - u64::from(c % 977))
        .min()
        .unwrap();
    assert_eq!(tracker.best().tries, expected);
}

// =============================================================================
// Orchestrator
// =============================================================================

#[test]
fn test_worker_cap_is_respected() {
    for combinations in [1, 2, 3, 4, 9] {
        let report = explore_starting_cell((0, 0), combinations, &config(5, 3, 50_000)).unwrap();
        assert!(report.peak_workers <= 3, "peak {} with {combinations}", report.peak_workers);
        assert!(report.peak_workers >= 1);
        assert_eq!(report.attempts.len(), combinations as usize);
    }
}

#[test]
fn test_every_index_runs_exactly_once() {
    let report = explore_starting_cell((2, 2), 20, &config(5, 4, 100_000)).unwrap();
    let mut indices: Vec<u32> = report.attempts.iter().map(|a| a.comb_idx).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_batch_best_matches_attempts() {
    let report = explore_starting_cell((0, 0), 16, &config(5, 4, 100_000)).unwrap();

    let best_tries = report
        .attempts
        .iter()
        .filter(|a| a.found())
        .map(|a| a.tries)
        .min();
    match best_tries {
        Some(tries) => {
            assert_eq!(report.best.tries, tries);
            let winner = report
                .attempts
                .iter()
                .find(|a| a.comb_idx == report.best.comb_idx)
                .unwrap();
            assert!(winner.found());
            assert_eq!(winner.tries, tries);
        }
        None => assert_eq!(report.best, BestScore::NONE),
    }

    // Every attempt is reproducible on its own.
    for attempt in &report.attempts {
        let limits = SearchLimits::with_max_tries(100_000);
        let rerun = knight_tour_with_combination(5, (0, 0), attempt.comb_idx, &limits);
        assert_eq!(rerun.tries, attempt.tries);
        assert_eq!(rerun.status, attempt.status);
    }
}

#[test]
fn test_unsolvable_board_reports_sentinel() {
    let report = explore_starting_cell((0, 0), 6, &config(3, 2, 10_000)).unwrap();
    assert_eq!(report.best, BestScore::NONE);
    assert!(report.attempts.iter().all(|a| a.status == SearchStatus::Dead));
    assert!(report.to_string().contains("not found"));
}

#[test]
fn test_sweep_covers_every_cell() {
    let reports = explore_board(2, &config(3, 2, 10_000)).unwrap();
    assert_eq!(reports.len(), 9);
    assert_eq!(reports[0].start, (0, 0));
    assert_eq!(reports[1].start, (0, 1));
    assert_eq!(reports[8].start, (2, 2));
    // The centre of a 3x3 board has no knight moves at all.
    assert!(reports.iter().all(|r| !r.best.is_found()));
}

#[test]
fn test_sweep_rejects_invalid_config() {
    assert!(explore_board(1, &config(3, 0, 10)).is_err());
}
