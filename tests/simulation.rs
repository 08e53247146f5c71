//! End-to-end runs through the public API.

use gridlife::{proc, Configuration, Grid, LifeError};

fn seeded(width: usize, height: usize, cells: &[(i64, i64)]) -> Grid {
    Configuration::new(width, height, 1)
        .with_cells(cells.iter().copied())
        .seed()
        .expect("seed")
}

#[test]
fn block_is_a_still_life() {
    let block = seeded(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
    let next = proc::step(&block).unwrap();
    assert_eq!(next, block);

    let bigger = seeded(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
    let mut g = bigger.clone();
    for _ in 0..5 {
        g = proc::step(&g).unwrap();
    }
    assert_eq!(g, bigger);
}

#[test]
fn blinker_oscillates() {
    let horizontal = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let vertical = seeded(5, 5, &[(2, 1), (2, 2), (2, 3)]);

    let once = proc::step(&horizontal).unwrap();
    assert_eq!(once, vertical);
    assert_eq!(proc::step(&once).unwrap(), horizontal);
}

#[test]
fn run_reproduces_blinker_at_generation_two() {
    let horizontal = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let vertical = seeded(5, 5, &[(2, 1), (2, 2), (2, 3)]);

    let snaps: Vec<_> = proc::run(&horizontal, 3)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(snaps.len(), 3);
    assert_eq!(snaps[0].grid(), &horizontal);
    assert_eq!(snaps[1].grid(), &vertical);
    assert_eq!(snaps[2].generation(), 2);
    assert_eq!(snaps[2].grid(), &horizontal);
}

#[test]
fn limited_run_yields_exactly_max_turns() {
    let g = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    assert_eq!(proc::run(&g, 5).unwrap().count(), 5);
    assert_eq!(proc::run(&g, 1).unwrap().count(), 1);
}

#[test]
fn unlimited_run_keeps_going() {
    let g = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let mut life = proc::run(&g, 0).unwrap();
    let taken: Vec<u64> = life
        .by_ref()
        .take(250)
        .map(|s| s.unwrap().generation())
        .collect();
    assert_eq!(taken.len(), 250);
    assert_eq!(taken.last(), Some(&249));
    assert!(!life.is_finished());
    assert_eq!(life.generation(), 250);
}

#[test]
fn dimensions_are_conserved() {
    let glider = seeded(8, 5, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    for snap in proc::run(&glider, 20).unwrap() {
        let grid = snap.unwrap().into_grid();
        assert_eq!((grid.width(), grid.height()), (8, 5));
    }
}

#[test]
fn glider_dies_against_the_wall() {
    // No wraparound: a glider that reaches the edge settles into a block.
    let glider = seeded(6, 6, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    let last = proc::run(&glider, 40)
        .unwrap()
        .last()
        .unwrap()
        .unwrap();
    assert_eq!(last.grid(), &seeded(6, 6, &[(4, 4), (4, 5), (5, 4), (5, 5)]));
}

#[test]
fn seeding_rejects_out_of_bounds() {
    let err = Configuration::new(3, 3, 1)
        .with_cells([(5i64, 0i64)])
        .seed()
        .unwrap_err();
    assert!(matches!(err, LifeError::OutOfBounds { x: 5, y: 0, width: 3, height: 3 }));

    let mut g = Grid::new(3, 3).unwrap();
    assert!(g.set_live(5, 0).is_err());
    assert_eq!(g.live_count(), 0);
}
