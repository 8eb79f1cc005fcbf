//! Common types for the grid games: board errors and shot results.

/// Result of a shot at a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot landed in open water.
    Miss,
    /// Shot sank a ship, carrying its length.
    Sink(usize),
}

impl GuessResult {
    /// `true` for any shot that struck a ship.
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Reasons a [`GameConfig`](crate::GameConfig) cannot be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board side length is zero.
    EmptyBoard,
    /// Board has rows that no coordinate letter can name.
    BoardTooLarge { size: usize, max: usize },
    /// Fleet contains no ships.
    EmptyFleet,
    /// A ship of length zero was requested.
    ZeroLengthShip,
    /// A ship does not fit along either axis.
    ShipTooLong { length: usize, size: usize },
    /// The fleet covers more cells than the board has.
    FleetTooLarge { cells: usize, area: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyBoard => write!(f, "board size must be at least 1"),
            ConfigError::BoardTooLarge { size, max } => {
                write!(f, "board size {} exceeds the maximum of {}", size, max)
            }
            ConfigError::EmptyFleet => write!(f, "fleet must contain at least one ship"),
            ConfigError::ZeroLengthShip => write!(f, "ship lengths must be at least 1"),
            ConfigError::ShipTooLong { length, size } => {
                write!(f, "ship of length {} does not fit on a {}x{} board", length, size, size)
            }
            ConfigError::FleetTooLarge { cells, area } => {
                write!(f, "fleet needs {} cells but the board only has {}", cells, area)
            }
        }
    }
}

/// Errors returned by board and grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Text could not be parsed as a coordinate or move.
    InvalidFormat,
    /// Coordinate lies outside the target grid.
    OutOfBounds { row: usize, col: usize },
    /// Cell was already shot at (or, for marks, already taken).
    AlreadyTargeted,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Random placement kept colliding and gave up.
    UnableToPlaceShip,
    /// The board/fleet configuration is unplayable.
    Configuration(ConfigError),
}

impl From<ConfigError> for BoardError {
    fn from(err: ConfigError) -> Self {
        BoardError::Configuration(err)
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::InvalidFormat => write!(f, "Invalid coordinate format"),
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate out of bounds: row={}, col={}", row, col)
            }
            BoardError::AlreadyTargeted => write!(f, "That cell was already targeted"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
