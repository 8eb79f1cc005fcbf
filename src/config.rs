use alloc::vec::Vec;

use crate::common::ConfigError;
use crate::coordinate::MAX_ROW_INDEX;

pub const BOARD_SIZE: usize = 10;
pub const FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Largest side length whose rows can all be written as a letter.
pub const MAX_BOARD_SIZE: usize = MAX_ROW_INDEX + 1;

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Board dimension and fleet for one battleship match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub board_size: usize,
    /// Ship lengths, placed in this order.
    pub fleet: Vec<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn new(board_size: usize, fleet: Vec<usize>) -> Self {
        Self { board_size, fleet }
    }

    /// Number of cells the whole fleet occupies.
    pub fn fleet_cells(&self) -> usize {
        self.fleet.iter().sum()
    }

    /// Reject fleets that cannot fit on the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fleet(self.board_size, &self.fleet)
    }
}

/// Checks a fleet against an `size`×`size` board.
pub fn validate_fleet(size: usize, fleet: &[usize]) -> Result<(), ConfigError> {
    if size == 0 {
        return Err(ConfigError::EmptyBoard);
    }
    if size > MAX_BOARD_SIZE {
        return Err(ConfigError::BoardTooLarge { size, max: MAX_BOARD_SIZE });
    }
    if fleet.is_empty() {
        return Err(ConfigError::EmptyFleet);
    }
    for &length in fleet {
        if length == 0 {
            return Err(ConfigError::ZeroLengthShip);
        }
        if length > size {
            return Err(ConfigError::ShipTooLong { length, size });
        }
    }
    let cells: usize = fleet.iter().sum();
    let area = size * size;
    if cells > area {
        return Err(ConfigError::FleetTooLarge { cells, area });
    }
    Ok(())
}
