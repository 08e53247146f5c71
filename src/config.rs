//! Run configuration: dimensions, turn limit and seed points.

use std::str::FromStr;

use tracing::debug;

use crate::{
    error::{LifeError, Result},
    grid::Grid,
};

pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_HEIGHT: usize = 20;
pub const DEFAULT_MAX_TURNS: u64 = 1;
/// `max_turns` value meaning "never stop".
pub const UNLIMITED_TURNS: u64 = 0;

/// A seed coordinate. Signed so that negative input reaches the bounds check
/// and is reported as [`LifeError::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point { x, y }
    }
}

impl FromStr for Point {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LifeError::InvalidPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Point { x, y })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub width: usize,
    pub height: usize,
    /// 0 means unlimited.
    pub max_turns: u64,
    pub initial_live_cells: Vec<Point>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_MAX_TURNS)
    }
}

impl Configuration {
    #[inline]
    pub fn new(width: usize, height: usize, max_turns: u64) -> Self {
        Configuration {
            width,
            height,
            max_turns,
            initial_live_cells: Vec::new(),
        }
    }

    pub fn with_cells<I, P>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        self.initial_live_cells
            .extend(cells.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.max_turns == UNLIMITED_TURNS
    }

    /// Builds the generation-0 grid. The first seed point outside the grid
    /// aborts with [`LifeError::OutOfBounds`].
    pub fn seed(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.width, self.height)?;
        for p in &self.initial_live_cells {
            grid.set_live(p.x, p.y)?;
        }
        debug!(
            seeds = self.initial_live_cells.len(),
            population = grid.live_count(),
            "grid seeded"
        );
        Ok(grid)
    }

    /// Reads a text plot. Each line holding at least one cell is one x index
    /// and each cell character one y index, the same layout [`Grid::render`]
    /// prints, so rendered output can be fed back in. `|` separators are
    /// skipped; a line of spaces is an all-dead row.
    pub fn from_plot(s: &str, max_turns: u64) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = 0usize;
        let mut height: Option<usize> = None;

        for (n, line) in s.lines().enumerate() {
            let mut y = 0usize;
            for c in line.chars().filter(|&c| c != '|') {
                let live = match c {
                    'x' | 'X' | '#' | 'O' | 'o' | '*' | '1' => true,
                    '-' | '.' | '0' | ' ' => false,
                    other => {
                        return Err(LifeError::InvalidPattern {
                            line: n + 1,
                            reason: format!("unexpected character {other:?}"),
                        })
                    }
                };
                if live {
                    cells.push(Point::new(width as i64, y as i64));
                }
                y += 1;
            }
            if y == 0 {
                continue;
            }

            match height {
                None => height = Some(y),
                Some(h) if h != y => {
                    return Err(LifeError::InvalidPattern {
                        line: n + 1,
                        reason: format!("expected {h} cells, found {y}"),
                    })
                }
                Some(_) => {}
            }
            width += 1;
        }

        let height = height.ok_or(LifeError::InvalidPattern {
            line: 0,
            reason: "pattern is empty".into(),
        })?;

        Ok(Configuration::new(width, height, max_turns).with_cells(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_program() {
        let c = Configuration::default();
        assert_eq!((c.width, c.height, c.max_turns), (20, 20, 1));
        assert!(c.initial_live_cells.is_empty());
        assert!(!c.is_unlimited());
    }

    #[test]
    fn parse_points() {
        assert_eq!("3,4".parse::<Point>().unwrap(), Point::new(3, 4));
        assert_eq!(" 3 , -4 ".parse::<Point>().unwrap(), Point::new(3, -4));
        assert!(matches!(
            "3".parse::<Point>(),
            Err(LifeError::InvalidPoint(_))
        ));
        assert!(matches!(
            "a,b".parse::<Point>(),
            Err(LifeError::InvalidPoint(_))
        ));
    }

    #[test]
    fn seed_sets_every_point() {
        let grid = Configuration::new(5, 5, 2)
            .with_cells([(1i64, 2i64), (2, 2), (3, 2)])
            .seed()
            .unwrap();
        assert_eq!(grid.live_count(), 3);
        assert!(grid.is_live(2, 2));
    }

    #[test]
    fn seed_fails_fast_on_out_of_bounds_point() {
        let err = Configuration::new(3, 3, 1)
            .with_cells([(0i64, 0i64), (5, 0), (1, 1)])
            .seed()
            .unwrap_err();
        assert!(matches!(err, LifeError::OutOfBounds { x: 5, y: 0, .. }));
    }

    #[test]
    fn seed_rejects_bad_dimensions() {
        assert!(matches!(
            Configuration::new(0, 3, 1).seed(),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn plot_round_trips_render() {
        let grid = Configuration::new(3, 4, 1)
            .with_cells([(0i64, 1i64), (2, 3), (1, 0)])
            .seed()
            .unwrap();
        let back = Configuration::from_plot(&grid.render(), 1)
            .unwrap()
            .seed()
            .unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn plot_accepts_loose_markers() {
        let c = Configuration::from_plot(".#.\n\n#..\n", 0).unwrap();
        assert_eq!((c.width, c.height), (2, 3));
        assert!(c.is_unlimited());
        assert_eq!(
            c.initial_live_cells,
            vec![Point::new(0, 1), Point::new(1, 0)]
        );
    }

    #[test]
    fn blank_looking_rows_are_dead_rows() {
        let c = Configuration::from_plot("x..\n   \n..x\n", 1).unwrap();
        assert_eq!((c.width, c.height), (3, 3));
        assert_eq!(
            c.initial_live_cells,
            vec![Point::new(0, 0), Point::new(2, 2)]
        );

        let c = Configuration::from_plot("|x|-|\n|\n| | |\n", 1).unwrap();
        assert_eq!((c.width, c.height), (2, 2));
        assert_eq!(c.initial_live_cells, vec![Point::new(0, 0)]);
    }

    #[test]
    fn plot_rejects_ragged_lines() {
        let err = Configuration::from_plot("..\n...\n", 1).unwrap_err();
        assert!(matches!(err, LifeError::InvalidPattern { line: 2, .. }));
    }

    #[test]
    fn plot_rejects_unknown_markers_and_empty_input() {
        assert!(matches!(
            Configuration::from_plot("..?\n", 1),
            Err(LifeError::InvalidPattern { line: 1, .. })
        ));
        assert!(matches!(
            Configuration::from_plot("\n\n", 1),
            Err(LifeError::InvalidPattern { .. })
        ));
    }
}
