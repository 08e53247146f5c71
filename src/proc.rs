//! Generation stepping (B3/S23) and the lazy run sequence.

use tracing::{debug, info};

use crate::{
    error::Result,
    grid::{Cell, Grid},
};

/// Live cells among the up to eight neighbours of `(x, y)`, clipped at the
/// grid edges. `(x, y)` must be in bounds.
pub fn neighbor_count(grid: &Grid, x: usize, y: usize) -> usize {
    debug_assert!(x < grid.width() && y < grid.height());

    let min_x = x.saturating_sub(1);
    let min_y = y.saturating_sub(1);
    let max_x = (x + 1).min(grid.width() - 1);
    let max_y = (y + 1).min(grid.height() - 1);

    let mut n = 0;
    for i in min_x..=max_x {
        for j in min_y..=max_y {
            if (i, j) != (x, y) && grid.is_live(i, j) {
                n += 1;
            }
        }
    }
    n
}

/// The B3/S23 transition for a cell with `neighbors` live neighbours.
#[inline]
pub fn produce_value(current: Cell, neighbors: usize) -> Cell {
    match (current, neighbors) {
        (Cell::Live, 2) | (Cell::Live, 3) => Cell::Live,
        (Cell::Dead, 3) => Cell::Live,
        _ => Cell::Dead,
    }
}

pub fn next_state(grid: &Grid, x: usize, y: usize) -> Cell {
    let current = Cell::from(grid.is_live(x, y));
    produce_value(current, neighbor_count(grid, x, y))
}

/// Computes the following generation into a fresh grid. Every cell is
/// evaluated against `grid` alone, never against partial output.
pub fn step(grid: &Grid) -> Result<Grid> {
    let mut next = Grid::new(grid.width(), grid.height())?;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            next.put(x, y, next_state(grid, x, y));
        }
    }
    Ok(next)
}

/// One emitted generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    generation: u64,
    grid: Grid,
}

impl GridSnapshot {
    /// 0 for the seeded grid.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Lazy sequence of snapshots returned by [`run`].
///
/// Generation `k + 1` is only computed when snapshot `k + 1` is requested, so
/// a consumer finishes with `k` before any more work happens. Dropping the
/// iterator cancels the run. After the turn limit or an error the iterator
/// only yields `None`.
#[derive(Debug)]
pub struct Life {
    current: Option<Grid>,
    generation: u64,
    max_turns: u64,
    started: bool,
}

impl Life {
    /// Index of the next snapshot to be produced.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 0 means unlimited.
    #[inline]
    pub fn max_turns(&self) -> u64 {
        self.max_turns
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current.is_none() || (self.max_turns != 0 && self.generation >= self.max_turns)
    }

    fn advance(&mut self) -> Result<Option<GridSnapshot>> {
        if self.is_finished() {
            self.current = None;
            return Ok(None);
        }
        let Some(current) = self.current.as_ref() else {
            return Ok(None);
        };

        let grid = if self.started {
            let next = step(current)?;
            self.current = Some(next.try_clone()?);
            next
        } else {
            self.started = true;
            current.try_clone()?
        };

        let generation = self.generation;
        self.generation += 1;
        debug!(generation, population = grid.live_count(), "generation ready");
        Ok(Some(GridSnapshot { generation, grid }))
    }
}

impl Iterator for Life {
    type Item = Result<GridSnapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(snapshot) => snapshot.map(Ok),
            Err(e) => {
                self.current = None;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Life {}

/// Starts a run from a private copy of `initial`. `max_turns == 0` never ends
/// on its own; otherwise exactly `max_turns` snapshots are produced.
pub fn run(initial: &Grid, max_turns: u64) -> Result<Life> {
    info!(
        width = initial.width(),
        height = initial.height(),
        max_turns,
        population = initial.live_count(),
        "starting run"
    );
    Ok(Life {
        current: Some(initial.try_clone()?),
        generation: 0,
        max_turns,
        started: false,
    })
}
