//! Ship positions and hit tracking.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::coordinate::Coordinate;

/// Orientation of a straight ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Coordinate `offset` cells from `origin` along this orientation.
    pub fn step(&self, origin: Coordinate, offset: usize) -> Coordinate {
        match self {
            Orientation::Horizontal => Coordinate::new(origin.row(), origin.col() + offset),
            Orientation::Vertical => Coordinate::new(origin.row() + offset, origin.col()),
        }
    }
}

/// A placed ship: its fixed positions and the subset already hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    positions: Vec<Coordinate>,
    hits: BTreeSet<Coordinate>,
}

impl Ship {
    /// Build a ship from distinct positions. Positions never change later.
    pub fn new(positions: Vec<Coordinate>) -> Self {
        debug_assert!(!positions.is_empty(), "ship needs at least one position");
        debug_assert!(
            positions.iter().collect::<BTreeSet<_>>().len() == positions.len(),
            "ship positions must be unique"
        );
        Ship {
            positions,
            hits: BTreeSet::new(),
        }
    }

    /// A straight ship of `length` cells starting at `origin`.
    pub fn straight(origin: Coordinate, orientation: Orientation, length: usize) -> Self {
        Ship::new(
            (0..length)
                .map(|i| orientation.step(origin, i))
                .collect(),
        )
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.positions.contains(&coord)
    }

    /// Record a hit. Coordinates outside the ship and repeats are ignored.
    pub fn register_hit(&mut self, coord: Coordinate) {
        if self.contains(coord) {
            self.hits.insert(coord);
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.positions.len()
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    /// Number of distinct positions hit so far.
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn is_hit_at(&self, coord: Coordinate) -> bool {
        self.hits.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
