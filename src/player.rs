use rand::rngs::SmallRng;

use crate::{
    board::{Board, CellState},
    common::{BoardError, GuessResult},
    coordinate::Coordinate,
};

/// Fog-of-war view of the board a player is firing at.
#[derive(Clone, Copy)]
pub struct OpponentView<'a> {
    board: &'a Board,
}

impl<'a> OpponentView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn already_shot(&self, coord: Coordinate) -> bool {
        self.board.already_shot(coord)
    }

    /// Cell as the shooter sees it: untouched ships read as `Empty`.
    pub fn cell(&self, coord: Coordinate) -> Result<CellState, BoardError> {
        self.board.visible_cell(coord, false)
    }

    /// Coordinates still open to a shot, row-major.
    pub fn unshot(&self) -> impl Iterator<Item = Coordinate> + 'a {
        self.board.unshot()
    }
}

/// Interface implemented by different player types.
pub trait Player {
    /// Place the fleet onto the provided board. Random by default.
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[usize],
    ) -> Result<(), BoardError> {
        board.place_fleet_randomly(fleet, rng)
    }

    /// Choose the next target. `None` means the player has withdrawn.
    fn select_target(&mut self, rng: &mut SmallRng, opponent: &OpponentView<'_>)
        -> Option<Coordinate>;

    /// The last target was refused; another will be requested.
    fn target_rejected(&mut self, _coord: Coordinate, _error: &BoardError) {}

    /// Inform the player of the result of its last shot.
    fn handle_guess_result(&mut self, _coord: Coordinate, _result: GuessResult) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_opponent_guess(&mut self, _coord: Coordinate, _result: GuessResult) {}
}
