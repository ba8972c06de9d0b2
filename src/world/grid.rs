//! Fixed-size tile grid
//!
//! The only place tiles are read or written. Indexing is row-major
//! (`y * size + x`), which is also the scan order of every nearest-tile search.

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::Position;

/// Surface state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tile {
    Water,
    Sand,
    Grass,
    Forest,
    WoodenFloor,
    WoodenWall,
    Bed,
    Chest,
}

impl Tile {
    pub const ALL: [Tile; 8] = [
        Tile::Water,
        Tile::Sand,
        Tile::Grass,
        Tile::Forest,
        Tile::WoodenFloor,
        Tile::WoodenWall,
        Tile::Bed,
        Tile::Chest,
    ];

    /// Water and walls block every mobile entity
    pub fn is_passable(&self) -> bool {
        !matches!(self, Tile::Water | Tile::WoodenWall)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tile::Water => "WATER",
            Tile::Sand => "SAND",
            Tile::Grass => "GRASS",
            Tile::Forest => "FOREST",
            Tile::WoodenFloor => "WOODEN_FLOOR",
            Tile::WoodenWall => "WOODEN_WALL",
            Tile::Bed => "BED",
            Tile::Chest => "CHEST",
        }
    }
}

/// Square tile matrix whose size never changes after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(size: usize, fill: Tile) -> Self {
        Self {
            size,
            tiles: vec![fill; size * size],
        }
    }

    /// Build from explicit rows. Every row must be as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(ColonyError::InvalidConfig(format!(
                "grid row {bad} has {} cells, expected {size}",
                rows[bad].len()
            )));
        }
        Ok(Self {
            size,
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.size + pos.x as usize)
    }

    /// Bounds-checked tile lookup
    pub fn tile_at(&self, pos: Position) -> Result<Tile> {
        self.get(pos).ok_or(ColonyError::OutOfBounds(pos))
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> Result<()> {
        let i = self.index(pos).ok_or(ColonyError::OutOfBounds(pos))?;
        self.tiles[i] = tile;
        Ok(())
    }

    /// Tile exists and is neither water nor wall
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|t| t.is_passable())
    }

    /// True when `pos` holds one of `kinds`
    pub fn is_any(&self, pos: Position, kinds: &[Tile]) -> bool {
        self.get(pos).is_some_and(|t| kinds.contains(&t))
    }

    /// All cells in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Cells paired with their tile, row-major
    pub fn cells(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.positions().zip(self.tiles.iter().copied())
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size.max(1))
    }
}
