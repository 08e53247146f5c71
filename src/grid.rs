//! Fixed-size grid of binary cells.
//!
//! Storage is a single owned, column-major `Vec<Cell>`: cell `(x, y)` lives at
//! index `x * height + y`. Columns are contiguous, which matches the order in
//! which [`Grid::render`] walks the grid.

use std::fmt;

use crate::error::{LifeError, Result};

/// State of a single cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Live,
}

impl Cell {
    #[inline]
    pub fn is_live(self) -> bool {
        self == Cell::Live
    }

    /// Marker used by [`Grid::render`].
    #[inline]
    pub fn marker(self) -> char {
        match self {
            Cell::Live => 'x',
            Cell::Dead => '-',
        }
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(live: bool) -> Self {
        if live {
            Cell::Live
        } else {
            Cell::Dead
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `width` x `height` grid with every cell dead.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(LifeError::Allocation { cells: usize::MAX })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LifeError::Allocation { cells: len })?;
        cells.resize(len, Cell::Dead);

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Converts signed coordinates into an in-bounds index pair.
    fn checked(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Marks `(x, y)` live. Out-of-range coordinates are rejected and the grid
    /// is left untouched.
    pub fn set_live(&mut self, x: i64, y: i64) -> Result<()> {
        let (cx, cy) = self.checked(x, y).ok_or(LifeError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        let i = self.index(cx, cy);
        self.cells[i] = Cell::Live;
        Ok(())
    }

    /// Reads `(x, y)`. The coordinate must be in bounds; use [`Grid::get`]
    /// when it might not be.
    #[inline]
    pub fn is_live(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.cells[self.index(x, y)].is_live()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Writes a cell during generation assembly. Callers own the bounds.
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let i = self.index(x, y);
        self.cells[i] = cell;
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(self.cells.len())
            .map_err(|_| LifeError::Allocation {
                cells: self.cells.len(),
            })?;
        cells.extend_from_slice(&self.cells);

        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
        })
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_live()).count()
    }

    /// Iterates the live coordinates in storage order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let h = self.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_live())
            .map(move |(i, _)| (i / h, i % h))
    }

    /// One line per x index, each holding one `|`-prefixed marker per y index
    /// and a closing `|`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.width * (2 * self.height + 2));
        for column in self.cells.chunks(self.height) {
            for cell in column {
                out.push('|');
                out.push(cell.marker());
            }
            out.push_str("|\n");
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
