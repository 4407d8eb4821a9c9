//! Seeded generation of solvable puzzles with a known solution
//!
//! A random colour is chosen for every shared side of the board, border colours
//! along the outer ring and interior colours everywhere else. Cutting the
//! board into tiles, rotating them randomly and shuffling them within each
//! category yields a tile set that is guaranteed to have at least one solution.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::io::configuration::{LAST_INDEX, NUM_CELLS};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::geometry::{Compass, Orientation};
use crate::spatial::grid::{self, Cell};
use crate::spatial::tiles::{Category, GREY, PlacedTile, RAW_GREY, RawTile};

/// A generated tile set and the solution it was cut from
#[derive(Debug, Clone)]
pub struct PlantedPuzzle {
    /// Tiles in input order: corners, then edges, then mids
    pub tiles: Vec<RawTile>,
    /// Placed tile for each row-major cell index, ids numbered in input order
    solution: Vec<PlacedTile>,
}

impl PlantedPuzzle {
    /// Generate a puzzle from a seed and the number of colours in each family
    ///
    /// # Errors
    ///
    /// Returns an error if either colour count is zero or the total does not
    /// fit the dense colour range
    pub fn generate(seed: u64, border_colours: usize, interior_colours: usize) -> Result<Self> {
        if border_colours == 0 {
            return Err(invalid_parameter(
                "border_colours",
                &border_colours,
                &"at least one border colour is required",
            ));
        }
        if interior_colours == 0 {
            return Err(invalid_parameter(
                "interior_colours",
                &interior_colours,
                &"at least one interior colour is required",
            ));
        }
        if border_colours + interior_colours >= usize::from(GREY) {
            return Err(invalid_parameter(
                "interior_colours",
                &interior_colours,
                &"too many colours in total",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let border_code = |rng: &mut StdRng| rng.random_range(1..=border_colours) as u32;
        let interior_code =
            |rng: &mut StdRng| (border_colours + rng.random_range(1..=interior_colours)) as u32;

        // Colour of the side facing East / South for each cell
        let mut east = vec![RAW_GREY; NUM_CELLS];
        let mut south = vec![RAW_GREY; NUM_CELLS];
        for cell in grid::cells() {
            if let Some(slot) = east.get_mut(cell.index()) {
                if cell.col < LAST_INDEX {
                    *slot = if cell.is_border_side(Compass::East) {
                        border_code(&mut rng)
                    } else {
                        interior_code(&mut rng)
                    };
                }
            }
            if let Some(slot) = south.get_mut(cell.index()) {
                if cell.row < LAST_INDEX {
                    *slot = if cell.is_border_side(Compass::South) {
                        border_code(&mut rng)
                    } else {
                        interior_code(&mut rng)
                    };
                }
            }
        }

        let facing = |cell: Cell, compass: Compass| -> u32 {
            let lookup = |table: &[u32], other: Option<Cell>| {
                other
                    .and_then(|other| table.get(other.index()).copied())
                    .unwrap_or(RAW_GREY)
            };
            match compass {
                Compass::North => lookup(&south, cell.neighbour(Compass::North)),
                Compass::East => lookup(&east, Some(cell).filter(|c| c.col < LAST_INDEX)),
                Compass::South => lookup(&south, Some(cell).filter(|c| c.row < LAST_INDEX)),
                Compass::West => lookup(&east, cell.neighbour(Compass::West)),
            }
        };

        // (cell, orientation on the board, raw sides as emitted)
        let mut pieces: [Vec<(Cell, Orientation, RawTile)>; 3] =
            [Vec::new(), Vec::new(), Vec::new()];
        for cell in grid::cells() {
            let orientation = cell
                .border_orientation()
                .unwrap_or_else(|| Orientation::from_index(rng.random_range(0..4)));
            // At orientation o, compass c shows side (o + c) mod 4
            let sides = [0, 1, 2, 3].map(|side| {
                let compass = Compass::ALL
                    .into_iter()
                    .find(|compass| (orientation.index() + compass.index()) % 4 == side)
                    .unwrap_or(Compass::North);
                facing(cell, compass)
            });
            if let Some(list) = pieces.get_mut(cell.category() as usize) {
                list.push((cell, orientation, RawTile::new(sides)));
            }
        }

        let mut tiles = Vec::with_capacity(NUM_CELLS);
        let mut solution = vec![PlacedTile::new(Category::Mid, 0, Orientation::Base); NUM_CELLS];
        for (category, list) in Category::ALL.into_iter().zip(pieces.iter_mut()) {
            list.shuffle(&mut rng);
            for (id, (cell, orientation, raw)) in list.iter().enumerate() {
                // Border tiles are re-rotated on load, so scramble their input rotation
                let emitted = if category == Category::Mid {
                    *raw
                } else {
                    let turn = rng.random_range(0..4);
                    RawTile::new([0, 1, 2, 3].map(|side| {
                        raw.sides.get((side + turn) % 4).copied().unwrap_or(RAW_GREY)
                    }))
                };
                tiles.push(emitted);
                if let Some(slot) = solution.get_mut(cell.index()) {
                    *slot = PlacedTile::new(category, id, *orientation);
                }
            }
        }

        log::debug!(
            "Generated puzzle with seed {seed}: {border_colours} border colours, {interior_colours} interior colours"
        );

        Ok(Self { tiles, solution })
    }

    /// Tile and orientation placed at a cell in the planted solution
    pub fn solution_at(&self, cell: Cell) -> Option<PlacedTile> {
        self.solution.get(cell.index()).copied()
    }

    /// Planted solution for every row-major cell index
    pub fn solution(&self) -> &[PlacedTile] {
        &self.solution
    }
}
