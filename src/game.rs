//! Turn controller for a battleship match between two players.

use alloc::boxed::Box;
use core::fmt;
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::{BoardError, GuessResult},
    config::GameConfig,
    coordinate::Coordinate,
    player::{OpponentView, Player},
};

/// Consecutive refused targets tolerated from one player in a single turn.
pub const MAX_REJECTED_TARGETS: usize = 1_000;

/// One of the two sides of a match. `One` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Errors that end or prevent a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Board-level failure, including unplayable configurations.
    Board(BoardError),
    /// `play_turn` was called before `setup`.
    NotSetUp,
    /// The match already has a winner.
    Finished(Side),
    /// A player stopped supplying targets.
    Withdrawn(Side),
    /// A player kept choosing refused targets.
    TargetingExhausted(Side),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Board(e) => write!(f, "{}", e),
            MatchError::NotSetUp => write!(f, "Fleets have not been placed yet"),
            MatchError::Finished(side) => write!(f, "Match already won by {:?}", side),
            MatchError::Withdrawn(side) => write!(f, "Player {:?} withdrew", side),
            MatchError::TargetingExhausted(side) => {
                write!(f, "Player {:?} gave no acceptable target", side)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// What happened during a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub side: Side,
    pub target: Coordinate,
    pub result: GuessResult,
    /// The opponent's fleet is now fully sunk.
    pub fleet_destroyed: bool,
}

/// Final result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct MatchOutcome {
    pub winner: Side,
    /// Turns taken by both sides together.
    pub turns: usize,
    /// Shots fired by side `One` and side `Two`.
    pub shots: [usize; 2],
}

/// Two boards, two players and whose turn it is.
pub struct BattleshipMatch {
    config: GameConfig,
    /// `boards[i]` holds side `i`'s own fleet.
    boards: [Board; 2],
    players: [Box<dyn Player>; 2],
    to_move: Side,
    shots: [usize; 2],
    winner: Option<Side>,
    ready: bool,
}

impl BattleshipMatch {
    /// Boards stay empty (size 0) until [`setup`](Self::setup) accepts the config.
    pub fn new(config: GameConfig, one: Box<dyn Player>, two: Box<dyn Player>) -> Self {
        Self {
            config,
            boards: [Board::new(0), Board::new(0)],
            players: [one, two],
            to_move: Side::One,
            shots: [0, 0],
            winner: None,
            ready: false,
        }
    }

    /// Validate the configuration and let both players place their fleets.
    pub fn setup(&mut self, rng: &mut SmallRng) -> Result<(), MatchError> {
        self.config.validate().map_err(BoardError::from)?;
        let expected = self.config.fleet_cells();
        for side in [Side::One, Side::Two] {
            let i = side.index();
            self.boards[i] = Board::new(self.config.board_size);
            self.players[i].place_ships(rng, &mut self.boards[i], &self.config.fleet)?;
            if self.boards[i].occupied_count() != expected {
                return Err(BoardError::UnableToPlaceShip.into());
            }
            log::debug!("{:?} fleet placed: {:?}", side, self.boards[i]);
        }
        self.to_move = Side::One;
        self.shots = [0, 0];
        self.winner = None;
        self.ready = true;
        log::info!(
            "match ready on {}x{} board with fleet {:?}",
            self.config.board_size,
            self.config.board_size,
            self.config.fleet
        );
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board holding `side`'s own fleet.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Shots fired so far by `side`.
    pub fn shots(&self, side: Side) -> usize {
        self.shots[side.index()]
    }

    /// Ask `side` for targets until one is on the board and unshot.
    fn next_target(&mut self, rng: &mut SmallRng, side: Side) -> Result<Coordinate, MatchError> {
        let board = &self.boards[side.opponent().index()];
        let player = &mut self.players[side.index()];
        for _ in 0..MAX_REJECTED_TARGETS {
            let coord = player
                .select_target(rng, &OpponentView::new(board))
                .ok_or(MatchError::Withdrawn(side))?;
            match board.check_target(coord) {
                Ok(()) => return Ok(coord),
                Err(e) => {
                    log::debug!("{:?} target {} refused: {}", side, coord, e);
                    player.target_rejected(coord, &e);
                }
            }
        }
        log::warn!("{:?} exceeded {} refused targets", side, MAX_REJECTED_TARGETS);
        Err(MatchError::TargetingExhausted(side))
    }

    /// Play one turn for the side to move.
    pub fn play_turn(&mut self, rng: &mut SmallRng) -> Result<TurnReport, MatchError> {
        if !self.ready {
            return Err(MatchError::NotSetUp);
        }
        if let Some(side) = self.winner {
            return Err(MatchError::Finished(side));
        }
        let side = self.to_move;
        let opponent = side.opponent();
        let target = self.next_target(rng, side)?;
        let result = self.boards[opponent.index()].shoot(target)?;
        self.shots[side.index()] += 1;
        log::debug!("{:?} fired at {} -> {:?}", side, target, result);

        self.players[side.index()].handle_guess_result(target, result);
        self.players[opponent.index()].handle_opponent_guess(target, result);

        let fleet_destroyed = self.boards[opponent.index()].all_ships_sunk();
        if fleet_destroyed {
            log::info!("{:?} wins after {} shots", side, self.shots[side.index()]);
            self.winner = Some(side);
        } else {
            self.to_move = opponent;
        }
        Ok(TurnReport {
            side,
            target,
            result,
            fleet_destroyed,
        })
    }

    /// Play turns until one fleet is sunk.
    pub fn play(&mut self, rng: &mut SmallRng) -> Result<MatchOutcome, MatchError> {
        loop {
            let report = self.play_turn(rng)?;
            if report.fleet_destroyed {
                return Ok(MatchOutcome {
                    winner: report.side,
                    turns: self.shots[0] + self.shots[1],
                    shots: self.shots,
                });
            }
        }
    }
}
