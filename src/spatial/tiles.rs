//! Tile catalog: classification, canonical rotation and dense colour remapping
//!
//! Raw tiles arrive as four colour codes in North, East, South, West order with
//! code 0 meaning grey. Each tile is classified by its grey sides and rotated so
//! its greys sit at canonical sides South (edges) or South and West (corners).
//! Border and interior colours are then renumbered densely from 0, each in
//! ascending order of their raw codes.

use std::collections::BTreeSet;
use std::fmt;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::io::configuration::{NUM_CORNERS, NUM_EDGES, NUM_MIDS, NUM_TILES};
use crate::io::error::{Result, invalid_catalog};
use crate::spatial::geometry::{Compass, Orientation, to_side};

/// A dense colour index
pub type Colour = u8;

/// Raw colour code marking a side that faces off the board
pub const RAW_GREY: u32 = 0;

/// Reserved colour for sides that face off the board
pub const GREY: Colour = u8::MAX - 1;

/// Reserved colour meaning "any interior colour", used for absent neighbours
pub const WILDCARD: Colour = u8::MAX;

/// Tile category, fixed by the number of grey sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Two adjacent grey sides
    Corner,
    /// One grey side
    Edge,
    /// No grey sides
    Mid,
}

impl Category {
    /// All categories in catalog order
    pub const ALL: [Self; 3] = [Self::Corner, Self::Edge, Self::Mid];

    /// Number of tiles of this category in a complete set
    pub const fn count(self) -> usize {
        match self {
            Self::Corner => NUM_CORNERS,
            Self::Edge => NUM_EDGES,
            Self::Mid => NUM_MIDS,
        }
    }

    /// Parse a category name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "c" | "corner" => Some(Self::Corner),
            "e" | "edge" => Some(Self::Edge),
            "m" | "mid" => Some(Self::Mid),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Corner => "corner",
            Self::Edge => "edge",
            Self::Mid => "mid",
        };
        f.write_str(name)
    }
}

/// A tile identified by category and dense id within the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileRef {
    /// Tile category
    pub category: Category,
    /// Dense id within the category
    pub id: usize,
}

impl TileRef {
    /// Create a tile reference
    pub const fn new(category: Category, id: usize) -> Self {
        Self { category, id }
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.id)
    }
}

/// A tile together with the orientation it is placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    /// The tile
    pub tile: TileRef,
    /// Orientation on the board
    pub orientation: Orientation,
}

impl PlacedTile {
    /// Create a placed tile
    pub const fn new(category: Category, id: usize, orientation: Orientation) -> Self {
        Self {
            tile: TileRef::new(category, id),
            orientation,
        }
    }
}

/// A tile as read from input: raw colour codes in North, East, South, West order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawTile {
    /// Raw colour codes, 0 is grey
    pub sides: [u32; 4],
}

impl RawTile {
    /// Create a raw tile from its four side codes
    pub const fn new(sides: [u32; 4]) -> Self {
        Self { sides }
    }

    fn grey_count(&self) -> usize {
        self.sides.iter().filter(|&&code| code == RAW_GREY).count()
    }
}

/// Canonical side colours for every tile of one category
#[derive(Debug, Clone, Default)]
pub struct CategoryTiles {
    /// `sides[side][id]` in canonical orientation
    sides: [Vec<Colour>; 4],
    /// Rotation applied on load to reach canonical form
    rotations: Vec<Orientation>,
    /// Position of each tile in the input list
    source_indices: Vec<usize>,
}

impl CategoryTiles {
    fn push(&mut self, sides: [Colour; 4], rotation: Orientation, source_index: usize) {
        for (column, colour) in self.sides.iter_mut().zip(sides) {
            column.push(colour);
        }
        self.rotations.push(rotation);
        self.source_indices.push(source_index);
    }

    /// Number of tiles held
    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    /// Whether no tiles are held
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Canonical colour of `side` for tile `id`
    pub fn side(&self, side: usize, id: usize) -> Colour {
        self.sides
            .get(side)
            .and_then(|column| column.get(id))
            .copied()
            .unwrap_or(GREY)
    }

    fn permuted(&self, order: &[usize]) -> Self {
        let mut permuted = Self::default();
        for &old in order {
            let sides = [0, 1, 2, 3].map(|side| self.side(side, old));
            let rotation = self
                .rotations
                .get(old)
                .copied()
                .unwrap_or(Orientation::Base);
            let source = self.source_indices.get(old).copied().unwrap_or(old);
            permuted.push(sides, rotation, source);
        }
        permuted
    }
}

/// The complete, immutable tile set in canonical form
#[derive(Debug, Clone)]
pub struct TileCatalog {
    corners: CategoryTiles,
    edges: CategoryTiles,
    mids: CategoryTiles,
    /// Raw code of each dense border colour
    border_codes: Vec<u32>,
    /// Raw code of each dense interior colour
    interior_codes: Vec<u32>,
}

impl TileCatalog {
    /// Build a catalog from raw tiles in input order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A tile has more than two grey sides, or two grey sides that are not adjacent
    /// - The category counts are not 4 corners, 56 edges and 196 mids
    /// - A colour appears both on a border-facing side and an interior-facing side
    /// - There are more colours than fit the dense colour type
    pub fn from_raw(raw_tiles: &[RawTile]) -> Result<Self> {
        if raw_tiles.len() != NUM_TILES {
            return Err(invalid_catalog(&format!(
                "expected {NUM_TILES} tiles, found {}",
                raw_tiles.len()
            )));
        }

        // Canonical raw sides, rotation and input position per category
        let mut canonical: [Vec<([u32; 4], Orientation, usize)>; 3] =
            [Vec::new(), Vec::new(), Vec::new()];

        for (index, tile) in raw_tiles.iter().enumerate() {
            let (category, rotation) = classify(tile).ok_or_else(|| {
                invalid_catalog(&format!(
                    "tile {index} has an impossible grey layout {:?}",
                    tile.sides
                ))
            })?;
            let sides = rotate_raw(tile, rotation);
            if let Some(list) = canonical.get_mut(category as usize) {
                list.push((sides, rotation, index));
            }
        }

        for category in Category::ALL {
            let found = canonical.get(category as usize).map_or(0, Vec::len);
            if found != category.count() {
                return Err(invalid_catalog(&format!(
                    "expected {} {category} tiles, found {found}",
                    category.count()
                )));
            }
        }

        let [corner_list, edge_list, mid_list] = &canonical;

        let mut border_set = BTreeSet::new();
        let mut interior_set = BTreeSet::new();
        for (sides, _, _) in corner_list {
            border_set.extend([sides[0], sides[1]]);
        }
        for (sides, _, _) in edge_list {
            border_set.extend([sides[1], sides[3]]);
            interior_set.insert(sides[0]);
        }
        for (sides, _, _) in mid_list {
            interior_set.extend(sides.iter().copied());
        }

        if let Some(shared) = border_set.intersection(&interior_set).next() {
            return Err(invalid_catalog(&format!(
                "colour {shared} appears on both border and interior sides"
            )));
        }
        if border_set.len() >= usize::from(GREY) || interior_set.len() >= usize::from(GREY) {
            return Err(invalid_catalog(&"too many distinct colours"));
        }

        let border_codes: Vec<u32> = border_set.into_iter().collect();
        let interior_codes: Vec<u32> = interior_set.into_iter().collect();

        let dense = |code: u32| -> Colour {
            if code == RAW_GREY {
                return GREY;
            }
            border_codes
                .binary_search(&code)
                .or_else(|_| interior_codes.binary_search(&code))
                .map_or(GREY, |position| position as Colour)
        };

        let build = |list: &[([u32; 4], Orientation, usize)]| {
            let mut tiles = CategoryTiles::default();
            for &(sides, rotation, index) in list {
                tiles.push(sides.map(dense), rotation, index);
            }
            tiles
        };

        let catalog = Self {
            corners: build(corner_list),
            edges: build(edge_list),
            mids: build(mid_list),
            border_codes,
            interior_codes,
        };

        log::debug!(
            "Catalog built: {} border colours, {} interior colours",
            catalog.num_border_colours(),
            catalog.num_interior_colours()
        );

        Ok(catalog)
    }

    /// Copy of the catalog with ids shuffled within each category
    ///
    /// Source indices travel with the tiles, so exports still name the
    /// tiles by their input position.
    #[must_use]
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order_for = |len: usize| {
            let mut order: Vec<usize> = (0..len).collect();
            order.shuffle(&mut rng);
            order
        };
        let corner_order = order_for(self.corners.len());
        let edge_order = order_for(self.edges.len());
        let mid_order = order_for(self.mids.len());

        Self {
            corners: self.corners.permuted(&corner_order),
            edges: self.edges.permuted(&edge_order),
            mids: self.mids.permuted(&mid_order),
            border_codes: self.border_codes.clone(),
            interior_codes: self.interior_codes.clone(),
        }
    }

    /// Tiles of one category
    pub const fn tiles(&self, category: Category) -> &CategoryTiles {
        match category {
            Category::Corner => &self.corners,
            Category::Edge => &self.edges,
            Category::Mid => &self.mids,
        }
    }

    /// Number of tiles in a category
    pub fn count(&self, category: Category) -> usize {
        self.tiles(category).len()
    }

    /// Canonical colour of `side` for a tile
    pub fn side(&self, category: Category, id: usize, side: usize) -> Colour {
        self.tiles(category).side(side, id)
    }

    /// Colour facing `compass` when the tile sits at `orientation`
    pub fn colour(
        &self,
        category: Category,
        id: usize,
        orientation: Orientation,
        compass: Compass,
    ) -> Colour {
        self.side(category, id, to_side(orientation, compass))
    }

    /// Colours facing North, East, South and West at `orientation`
    pub fn colours_at(
        &self,
        category: Category,
        id: usize,
        orientation: Orientation,
    ) -> [Colour; 4] {
        Compass::ALL.map(|compass| self.colour(category, id, orientation, compass))
    }

    /// Number of distinct border colours
    pub fn num_border_colours(&self) -> usize {
        self.border_codes.len()
    }

    /// Number of distinct interior colours
    pub fn num_interior_colours(&self) -> usize {
        self.interior_codes.len()
    }

    /// Raw code of a dense colour, given which family it belongs to
    pub fn raw_code(&self, colour: Colour, border: bool) -> u32 {
        if colour == GREY {
            return RAW_GREY;
        }
        let codes = if border {
            &self.border_codes
        } else {
            &self.interior_codes
        };
        codes.get(usize::from(colour)).copied().unwrap_or(RAW_GREY)
    }

    /// Position of a tile in the input list
    pub fn source_index(&self, category: Category, id: usize) -> usize {
        self.tiles(category)
            .source_indices
            .get(id)
            .copied()
            .unwrap_or(id)
    }

    /// Id of the `rank`-th tile of a category in input order
    ///
    /// Equal to `rank` unless the catalog was shuffled.
    pub fn id_for_input_rank(&self, category: Category, rank: usize) -> Option<usize> {
        let sources = &self.tiles(category).source_indices;
        let mut sorted = sources.clone();
        sorted.sort_unstable();
        let wanted = sorted.get(rank)?;
        sources.iter().position(|index| index == wanted)
    }

    /// Orientation of a placed tile expressed relative to its input sides
    pub fn input_orientation(
        &self,
        category: Category,
        id: usize,
        orientation: Orientation,
    ) -> Orientation {
        let rotation = self
            .tiles(category)
            .rotations
            .get(id)
            .copied()
            .unwrap_or(Orientation::Base);
        Orientation::from_index(orientation.index() + rotation.index())
    }
}

/// Category of a raw tile and the rotation that brings it to canonical form
fn classify(tile: &RawTile) -> Option<(Category, Orientation)> {
    let grey_at = |side: usize| tile.sides.get(side % 4) == Some(&RAW_GREY);
    match tile.grey_count() {
        0 => Some((Category::Mid, Orientation::Base)),
        1 => {
            let grey = (0..4).find(|&side| grey_at(side))?;
            Some((Category::Edge, Orientation::from_index(grey + 2)))
        }
        2 => {
            let first = (0..4).find(|&side| grey_at(side) && grey_at(side + 1))?;
            Some((Category::Corner, Orientation::from_index(first + 2)))
        }
        _ => None,
    }
}

/// Raw sides after rotation: canonical side `k` is input side `k + rotation`
fn rotate_raw(tile: &RawTile, rotation: Orientation) -> [u32; 4] {
    [0, 1, 2, 3].map(|side| {
        tile.sides
            .get((side + rotation.index()) % 4)
            .copied()
            .unwrap_or(RAW_GREY)
    })
}
