//! Spawn-position search for new tasks.
//!
//! New cards are laid out on a staggered diagonal. Starting from the origin,
//! each occupied candidate steps right and down; a step that would run off
//! the right edge wraps to the origin column one row lower. A board too narrow
//! for even one card fills down the origin column. If the rows run out the
//! search gives up and returns a fixed fallback.

use crate::types::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on candidates tried, independent of the row limit
const MAX_CANDIDATES: usize = 10_000;

/// Layout of the spawn search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// First candidate
    pub origin: Point,
    /// Offset between candidates on one diagonal
    pub step: Point,
    /// Vertical offset between rows
    pub row_height: f64,
    /// A candidate closer than this to an existing task counts as occupied
    pub min_distance: f64,
    /// Row origins below this give up the search
    pub max_row_y: f64,
    /// Returned when the search gives up
    pub fallback: Point,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(10.0, 25.0),
            step: Point::new(60.0, 10.0),
            row_height: 80.0,
            min_distance: 5.0,
            max_row_y: 800.0,
            fallback: Point::new(25.0, 25.0),
        }
    }
}

/// Find where a new card should appear.
///
/// `existing` are the positions of tasks already on the board. A candidate is
/// free when no existing position lies within `min_distance` of it. Always
/// returns: either the first free candidate or `spawn.fallback`.
pub fn compute_spawn_position(
    existing: &[Point],
    viewport_width: f64,
    card_width: f64,
    spawn: &SpawnConfig,
) -> Point {
    let occupied = |candidate: &Point| {
        existing
            .iter()
            .any(|p| p.distance(candidate) < spawn.min_distance)
    };

    let mut row = spawn.origin;
    let mut candidate = spawn.origin;

    for _ in 0..MAX_CANDIDATES {
        if !occupied(&candidate) {
            return candidate;
        }
        candidate.x += spawn.step.x;
        candidate.y += spawn.step.y;
        // Row starts are tried even when a card there would overflow
        if candidate.x + card_width > viewport_width {
            row.y += spawn.row_height;
            if row.y > spawn.max_row_y {
                break;
            }
            candidate = row;
        }
    }

    debug!(
        "No free spawn position among {} task(s), using fallback",
        existing.len()
    );
    spawn.fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_uses_origin() {
        let spawn = SpawnConfig::default();
        assert_eq!(
            compute_spawn_position(&[], 1200.0, 300.0, &spawn),
            Point::new(10.0, 25.0)
        );
    }

    #[test]
    fn test_steps_past_occupied_candidates() {
        let spawn = SpawnConfig::default();
        let existing = [Point::new(10.0, 25.0), Point::new(72.0, 36.0)];
        assert_eq!(
            compute_spawn_position(&existing, 1200.0, 300.0, &spawn),
            Point::new(130.0, 45.0)
        );
    }

    #[test]
    fn test_nearby_but_not_close_is_free() {
        let spawn = SpawnConfig::default();
        let existing = [Point::new(15.0, 25.0)];
        assert_eq!(
            compute_spawn_position(&existing, 1200.0, 300.0, &spawn),
            Point::new(10.0, 25.0)
        );
    }

    #[test]
    fn test_wraps_to_next_row() {
        let spawn = SpawnConfig::default();
        // Only two candidates fit per row: x=10 and x=70 (70 + 300 <= 400)
        let existing = [Point::new(10.0, 25.0), Point::new(70.0, 35.0)];
        assert_eq!(
            compute_spawn_position(&existing, 400.0, 300.0, &spawn),
            Point::new(10.0, 105.0)
        );
    }

    #[test]
    fn test_narrow_viewport_fills_origin_column() {
        let spawn = SpawnConfig::default();
        assert_eq!(
            compute_spawn_position(&[], 200.0, 300.0, &spawn),
            Point::new(10.0, 25.0)
        );
        assert_eq!(
            compute_spawn_position(&[Point::new(10.0, 25.0)], 200.0, 300.0, &spawn),
            Point::new(10.0, 105.0)
        );
        assert_eq!(
            compute_spawn_position(
                &[Point::new(10.0, 25.0), Point::new(10.0, 105.0)],
                200.0,
                300.0,
                &spawn
            ),
            Point::new(10.0, 185.0)
        );
    }

    #[test]
    fn test_narrow_viewport_full_column_falls_back() {
        let spawn = SpawnConfig::default();
        let existing: Vec<Point> = (0..10)
            .map(|row| Point::new(10.0, 25.0 + 80.0 * f64::from(row)))
            .collect();
        assert_eq!(
            compute_spawn_position(&existing, 200.0, 300.0, &spawn),
            spawn.fallback
        );
    }

    #[test]
    fn test_full_board_falls_back() {
        let spawn = SpawnConfig::default();
        let mut existing = Vec::new();
        let mut row = spawn.origin;
        while row.y <= spawn.max_row_y {
            let mut candidate = row;
            while candidate.x + 300.0 <= 1000.0 {
                existing.push(candidate);
                candidate.x += spawn.step.x;
                candidate.y += spawn.step.y;
            }
            row.y += spawn.row_height;
        }

        assert_eq!(
            compute_spawn_position(&existing, 1000.0, 300.0, &spawn),
            spawn.fallback
        );
    }

    #[test]
    fn test_degenerate_step_terminates() {
        let spawn = SpawnConfig {
            step: Point::new(0.0, 0.0),
            ..SpawnConfig::default()
        };
        let existing = [spawn.origin];
        assert_eq!(
            compute_spawn_position(&existing, 1200.0, 300.0, &spawn),
            spawn.fallback
        );
    }
}
