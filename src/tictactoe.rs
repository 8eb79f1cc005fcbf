//! Tic-tac-toe grid and its depth-1 heuristic opponent.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use rand::{rngs::SmallRng, seq::IndexedRandom, Rng};

use crate::common::BoardError;
use crate::game::{MatchError, Side, MAX_REJECTED_TARGETS};

pub const GRID_SIZE: usize = 3;

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// 3×3 grid of marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Option<Mark>; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from three rows of `X`, `O` and `_`/space/`.` for empty.
    pub fn from_rows(rows: [&str; GRID_SIZE]) -> Result<Self, BoardError> {
        let mut grid = Grid::new();
        for (r, row) in rows.iter().enumerate() {
            let marks: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if marks.len() != GRID_SIZE {
                return Err(BoardError::InvalidFormat);
            }
            for (c, ch) in marks.into_iter().enumerate() {
                grid.cells[r][c] = match ch {
                    'X' | 'x' => Some(Mark::X),
                    'O' | 'o' => Some(Mark::O),
                    '_' | '.' => None,
                    _ => return Err(BoardError::InvalidFormat),
                };
            }
        }
        Ok(grid)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Put `mark` on an empty cell.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), BoardError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(BoardError::OutOfBounds { row, col });
        }
        if self.cells[row][col].is_some() {
            return Err(BoardError::AlreadyTargeted);
        }
        self.cells[row][col] = Some(mark);
        Ok(())
    }

    /// Whether `mark` holds a full row, column or diagonal.
    pub fn is_win_for(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == Some(mark)))
    }

    pub fn winner(&self) -> Option<Mark> {
        [Mark::X, Mark::O].into_iter().find(|&m| self.is_win_for(m))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GRID_SIZE * GRID_SIZE)
            .map(|i| (i / GRID_SIZE, i % GRID_SIZE))
            .filter(move |&(r, c)| self.cells[r][c].is_none())
    }

    /// First empty cell (row-major) where `mark` would complete a line.
    fn completing_cell(&self, mark: Mark) -> Option<(usize, usize)> {
        self.empty_cells().find(|&(r, c)| {
            let mut trial = *self;
            trial.cells[r][c] = Some(mark);
            trial.is_win_for(mark)
        })
    }
}

/// Why the heuristic chose its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Win,
    Block,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicMove {
    pub row: usize,
    pub col: usize,
    pub kind: MoveKind,
}

/// Pick a move for `mark`: win now, else block, else any empty cell.
///
/// Only one ply is examined, so a double threat cannot be defended.
/// Returns `None` on a full grid.
pub fn choose_move<R: Rng + ?Sized>(grid: &Grid, mark: Mark, rng: &mut R) -> Option<HeuristicMove> {
    if let Some((row, col)) = grid.completing_cell(mark) {
        return Some(HeuristicMove { row, col, kind: MoveKind::Win });
    }
    if let Some((row, col)) = grid.completing_cell(mark.opponent()) {
        return Some(HeuristicMove { row, col, kind: MoveKind::Block });
    }
    let empties: Vec<(usize, usize)> = grid.empty_cells().collect();
    empties
        .choose(rng)
        .map(|&(row, col)| HeuristicMove { row, col, kind: MoveKind::Random })
}

/// Parse a 1-based move as `"r c"` or `"rc"` into a 0-based cell.
pub fn parse_move(text: &str) -> Result<(usize, usize), BoardError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (r, c) = match parts.as_slice() {
        [r, c] => (
            r.parse::<usize>().map_err(|_| BoardError::InvalidFormat)?,
            c.parse::<usize>().map_err(|_| BoardError::InvalidFormat)?,
        ),
        [rc] if rc.len() == 2 && rc.bytes().all(|b| b.is_ascii_digit()) => {
            let b = rc.as_bytes();
            ((b[0] - b'0') as usize, (b[1] - b'0') as usize)
        }
        _ => return Err(BoardError::InvalidFormat),
    };
    if r == 0 || c == 0 {
        return Err(BoardError::InvalidFormat);
    }
    Ok((r - 1, c - 1))
}

/// Source of moves for one mark.
pub trait MarkPlayer {
    /// Choose an empty cell. `None` means the player has withdrawn.
    fn choose(&mut self, rng: &mut SmallRng, grid: &Grid, mark: Mark) -> Option<(usize, usize)>;

    /// The last move was refused; another will be requested.
    fn move_rejected(&mut self, _cell: (usize, usize), _error: &BoardError) {}

    /// Why the most recent move was chosen, for players that can say.
    fn last_kind(&self) -> Option<MoveKind> {
        None
    }

    /// A move was committed by either side. `reason` comes from the mover.
    fn handle_move(
        &mut self,
        _grid: &Grid,
        _mark: Mark,
        _cell: (usize, usize),
        _reason: Option<MoveKind>,
    ) {
    }
}

/// Computer player driven by [`choose_move`].
#[derive(Debug, Default)]
pub struct HeuristicPlayer {
    last_kind: Option<MoveKind>,
}

impl HeuristicPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkPlayer for HeuristicPlayer {
    fn choose(&mut self, rng: &mut SmallRng, grid: &Grid, mark: Mark) -> Option<(usize, usize)> {
        let mv = choose_move(grid, mark, rng)?;
        log::debug!("{} plays {},{} ({:?})", mark, mv.row + 1, mv.col + 1, mv.kind);
        self.last_kind = Some(mv.kind);
        Some((mv.row, mv.col))
    }

    fn last_kind(&self) -> Option<MoveKind> {
        self.last_kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicTacToeOutcome {
    Win(Mark),
    Draw,
}

/// Alternating match; `X` moves first.
pub struct TicTacToeMatch {
    grid: Grid,
    players: [Box<dyn MarkPlayer>; 2],
    to_move: Mark,
    moves: usize,
}

impl TicTacToeMatch {
    pub fn new(x: Box<dyn MarkPlayer>, o: Box<dyn MarkPlayer>) -> Self {
        Self {
            grid: Grid::new(),
            players: [x, o],
            to_move: Mark::X,
            moves: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    fn player_index(mark: Mark) -> usize {
        match mark {
            Mark::X => 0,
            Mark::O => 1,
        }
    }

    /// Play one move. Returns the outcome once the game has ended.
    pub fn play_turn(&mut self, rng: &mut SmallRng) -> Result<Option<TicTacToeOutcome>, MatchError> {
        if let Some(mark) = self.grid.winner() {
            return Ok(Some(TicTacToeOutcome::Win(mark)));
        }
        if self.grid.is_full() {
            return Ok(Some(TicTacToeOutcome::Draw));
        }
        let mark = self.to_move;
        let side = match mark {
            Mark::X => Side::One,
            Mark::O => Side::Two,
        };
        let player = &mut self.players[Self::player_index(mark)];
        let mut placed = None;
        for _ in 0..MAX_REJECTED_TARGETS {
            let (row, col) = player
                .choose(rng, &self.grid, mark)
                .ok_or(MatchError::Withdrawn(side))?;
            match self.grid.place(row, col, mark) {
                Ok(()) => {
                    placed = Some((row, col));
                    break;
                }
                Err(e) => player.move_rejected((row, col), &e),
            }
        }
        let cell = placed.ok_or(MatchError::TargetingExhausted(side))?;
        self.moves += 1;
        let reason = player.last_kind();
        for p in self.players.iter_mut() {
            p.handle_move(&self.grid, mark, cell, reason);
        }

        if self.grid.is_win_for(mark) {
            log::info!("{} wins after {} moves", mark, self.moves);
            return Ok(Some(TicTacToeOutcome::Win(mark)));
        }
        if self.grid.is_full() {
            log::info!("draw after {} moves", self.moves);
            return Ok(Some(TicTacToeOutcome::Draw));
        }
        self.to_move = mark.opponent();
        Ok(None)
    }

    /// Play until someone wins or the grid fills.
    pub fn play(&mut self, rng: &mut SmallRng) -> Result<TicTacToeOutcome, MatchError> {
        loop {
            if let Some(outcome) = self.play_turn(rng)? {
                return Ok(outcome);
            }
        }
    }
}
