#![cfg(feature = "std")]

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::string::String;

use crate::{
    common::{BoardError, GuessResult},
    coordinate::Coordinate,
    player::{OpponentView, Player},
    tictactoe::{parse_move, Grid, Mark, MarkPlayer, MoveKind, GRID_SIZE},
};
use rand::rngs::SmallRng;

/// Human player reading moves line by line from `input`.
pub struct CliPlayer<R, W> {
    input: R,
    output: W,
}

impl CliPlayer<StdinLock<'static>, Stdout> {
    /// Player bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show `prompt` and read one trimmed line. `None` on end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::warn!("failed to read input: {}", e);
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }
}

fn rejection_message(error: &BoardError) -> &'static str {
    match error {
        BoardError::AlreadyTargeted => "You already shot here, try another.",
        BoardError::OutOfBounds { .. } => "That coordinate is off the board, try again.",
        _ => "Invalid coordinate! Please try again.",
    }
}

fn describe(result: GuessResult) -> String {
    match result {
        GuessResult::Hit => "Hit!".to_string(),
        GuessResult::Miss => "Miss!".to_string(),
        GuessResult::Sink(len) => format!("Hit! Ship of length {} sunk!", len),
    }
}

impl<R: BufRead, W: Write> Player for CliPlayer<R, W> {
    fn select_target(
        &mut self,
        _rng: &mut SmallRng,
        opponent: &OpponentView<'_>,
    ) -> Option<Coordinate> {
        loop {
            let line = self.read_line("Enter your shot (e.g. C5): ")?;
            let checked = Coordinate::parse(&line).and_then(|coord| {
                if !coord.in_bounds(opponent.size()) {
                    Err(BoardError::OutOfBounds {
                        row: coord.row(),
                        col: coord.col(),
                    })
                } else if opponent.already_shot(coord) {
                    Err(BoardError::AlreadyTargeted)
                } else {
                    Ok(coord)
                }
            });
            match checked {
                Ok(coord) => return Some(coord),
                Err(e) => self.say(rejection_message(&e)),
            }
        }
    }

    fn target_rejected(&mut self, _coord: Coordinate, error: &BoardError) {
        self.say(rejection_message(error));
    }

    fn handle_guess_result(&mut self, _coord: Coordinate, result: GuessResult) {
        self.say(&describe(result));
    }

    fn handle_opponent_guess(&mut self, coord: Coordinate, result: GuessResult) {
        let text = format!("AI shot at {}: {}", coord, describe(result));
        self.say(&text);
    }
}

impl<R: BufRead, W: Write> MarkPlayer for CliPlayer<R, W> {
    fn choose(&mut self, _rng: &mut SmallRng, grid: &Grid, _mark: Mark) -> Option<(usize, usize)> {
        loop {
            let line = self.read_line("Enter your move (row col): ")?;
            match parse_move(&line) {
                Ok((r, c)) if r < GRID_SIZE && c < GRID_SIZE && grid.get(r, c).is_none() => {
                    return Some((r, c))
                }
                Ok(_) | Err(BoardError::OutOfBounds { .. }) => {
                    self.say("Cell occupied or off the grid, please try again.")
                }
                Err(_) => self.say("Invalid format, please try again."),
            }
        }
    }

    fn move_rejected(&mut self, _cell: (usize, usize), _error: &BoardError) {
        self.say("Cell occupied or off the grid, please try again.");
    }

    fn handle_move(
        &mut self,
        _grid: &Grid,
        mark: Mark,
        cell: (usize, usize),
        reason: Option<MoveKind>,
    ) {
        let why = match reason {
            Some(MoveKind::Win) => " to win",
            Some(MoveKind::Block) => " to block",
            _ => "",
        };
        let text = format!("{} plays at {},{}{}", mark, cell.0 + 1, cell.1 + 1, why);
        self.say(&text);
    }
}
