//! Conway's Game of Life on a fixed, bounded grid.
//!
//! A [`Configuration`] seeds a [`Grid`]; [`proc::run`] turns it into a lazy,
//! strictly ordered sequence of [`GridSnapshot`]s, one per generation.
//!
//! ```
//! use gridlife::{proc, Configuration};
//!
//! let config = Configuration::new(5, 5, 3).with_cells([(1i64, 2i64), (2, 2), (3, 2)]);
//! let grid = config.seed()?;
//! for snapshot in proc::run(&grid, config.max_turns)? {
//!     let snapshot = snapshot?;
//!     print!("{}", snapshot.grid());
//! }
//! # Ok::<(), gridlife::LifeError>(())
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod proc;

pub use config::{Configuration, Point};
pub use error::{LifeError, Result};
pub use grid::{Cell, Grid};
pub use proc::{GridSnapshot, Life};
