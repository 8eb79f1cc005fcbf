//! Game board: cell grid, ship arena and shot resolution.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{BoardError, ConfigError, GuessResult};
use crate::config::validate_fleet;
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, Ship};

/// Random anchors tried for one ship before the fleet is laid out again.
const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;
/// Full fleet layouts tried before giving up.
const MAX_FLEET_ATTEMPTS: usize = 64;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// No ship, not shot.
    #[default]
    Empty,
    /// Ship present, not shot.
    Occupied,
    /// Ship present, shot.
    Hit,
    /// No ship, shot.
    Miss,
}

impl CellState {
    /// `Hit` and `Miss` are terminal.
    pub fn is_shot(&self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// One side's grid plus the ships placed on it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
    /// Index into `ships` for every cell a ship covers.
    owners: Vec<Option<usize>>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty `size`×`size` board (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![CellState::Empty; size * size],
            owners: vec![None; size * size],
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// `OutOfBounds` unless `coord` lies on this board.
    pub fn check_bounds(&self, coord: Coordinate) -> Result<(), BoardError> {
        if coord.in_bounds(self.size) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                row: coord.row(),
                col: coord.col(),
            })
        }
    }

    fn index(&self, coord: Coordinate) -> Result<usize, BoardError> {
        self.check_bounds(coord)?;
        Ok(coord.row() * self.size + coord.col())
    }

    /// True state of a cell.
    pub fn cell(&self, coord: Coordinate) -> Result<CellState, BoardError> {
        Ok(self.cells[self.index(coord)?])
    }

    /// Cell state as shown to a viewer; unrevealed ships read as `Empty`.
    pub fn visible_cell(&self, coord: Coordinate, reveal: bool) -> Result<CellState, BoardError> {
        let state = self.cell(coord)?;
        Ok(match state {
            CellState::Occupied if !reveal => CellState::Empty,
            other => other,
        })
    }

    /// The ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        let idx = self.index(coord).ok()?;
        self.owners[idx].map(|ship| &self.ships[ship])
    }

    /// Number of cells still holding an untouched ship segment.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == CellState::Occupied)
            .count()
    }

    /// Every coordinate on the board in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let size = self.size;
        (0..size * size).map(move |i| Coordinate::new(i / size, i % size))
    }

    /// Coordinates not yet shot at, row-major.
    pub fn unshot(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.coordinates()
            .filter(move |c| !self.cells[c.row() * self.size + c.col()].is_shot())
    }

    /// Place a straight ship of `length` cells starting at `origin`.
    pub fn place_ship(
        &mut self,
        origin: Coordinate,
        orientation: Orientation,
        length: usize,
    ) -> Result<(), BoardError> {
        if length == 0 {
            return Err(ConfigError::ZeroLengthShip.into());
        }
        self.check_bounds(origin)?;
        self.check_bounds(orientation.step(origin, length - 1))?;
        let ship = Ship::straight(origin, orientation, length);
        if ship
            .positions()
            .iter()
            .any(|&c| self.cells[c.row() * self.size + c.col()] != CellState::Empty)
        {
            return Err(BoardError::ShipOverlaps);
        }
        let id = self.ships.len();
        for &c in ship.positions() {
            let idx = c.row() * self.size + c.col();
            self.cells[idx] = CellState::Occupied;
            self.owners[idx] = Some(id);
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random non-overlapping (origin, orientation) for a ship of
    /// `length`, or `None` once the attempt budget runs out.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Option<(Coordinate, Orientation)> {
        if length == 0 || length > self.size {
            return None;
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.size - 1, self.size - length),
                Orientation::Vertical => (self.size - length, self.size - 1),
            };
            let origin = Coordinate::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            let free = (0..length).all(|i| {
                let c = orient.step(origin, i);
                self.cells[c.row() * self.size + c.col()] == CellState::Empty
            });
            if free {
                return Some((origin, orient));
            }
        }
        None
    }

    /// Lay out the whole fleet at random, in the order given, replacing any
    /// ships already on the board.
    ///
    /// Fails fast with a configuration error when the fleet cannot fit. A
    /// layout that paints itself into a corner is discarded and retried
    /// from an empty board.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        fleet: &[usize],
        rng: &mut R,
    ) -> Result<(), BoardError> {
        validate_fleet(self.size, fleet)?;
        for attempt in 0..MAX_FLEET_ATTEMPTS {
            if attempt > 0 {
                log::debug!("fleet layout attempt {} failed, clearing board", attempt);
            }
            *self = Board::new(self.size);
            let mut complete = true;
            for &length in fleet {
                match self.random_placement(rng, length) {
                    Some((origin, orient)) => self.place_ship(origin, orient, length)?,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete {
                log::debug!("placed fleet {:?} on {}x{} board", fleet, self.size, self.size);
                return Ok(());
            }
        }
        *self = Board::new(self.size);
        Err(BoardError::UnableToPlaceShip)
    }

    /// Returns `true` if `coord` was already resolved as a hit or a miss.
    /// Off-board coordinates are never "already shot".
    pub fn already_shot(&self, coord: Coordinate) -> bool {
        self.cell(coord).map(|c| c.is_shot()).unwrap_or(false)
    }

    /// Bounds and repeat checks a target must pass before [`Board::shoot`].
    pub fn check_target(&self, coord: Coordinate) -> Result<(), BoardError> {
        if self.cell(coord)?.is_shot() {
            return Err(BoardError::AlreadyTargeted);
        }
        Ok(())
    }

    /// Process a shot at `coord`, marking the hit or miss and reporting the
    /// result. Repeat shots are rejected before anything changes.
    pub fn shoot(&mut self, coord: Coordinate) -> Result<GuessResult, BoardError> {
        let idx = self.index(coord)?;
        match self.cells[idx] {
            CellState::Hit | CellState::Miss => Err(BoardError::AlreadyTargeted),
            CellState::Empty => {
                self.cells[idx] = CellState::Miss;
                Ok(GuessResult::Miss)
            }
            CellState::Occupied => {
                self.cells[idx] = CellState::Hit;
                let owner = self.owners[idx].and_then(|id| self.ships.get_mut(id));
                debug_assert!(owner.is_some(), "occupied cell without an owning ship");
                match owner {
                    Some(ship) => {
                        ship.register_hit(coord);
                        if ship.is_sunk() {
                            Ok(GuessResult::Sink(ship.len()))
                        } else {
                            Ok(GuessResult::Hit)
                        }
                    }
                    None => Ok(GuessResult::Hit),
                }
            }
        }
    }

    /// Returns `true` when every ship is sunk. An empty board has not lost.
    pub fn all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {:?}", self.size, self.ships)?;
        for row in self.cells.chunks(self.size.max(1)) {
            write!(f, "  ")?;
            for cell in row {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::Occupied => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'M',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
