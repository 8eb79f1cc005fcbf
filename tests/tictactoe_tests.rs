use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use grid_games::tictactoe::{
    choose_move, Grid, HeuristicPlayer, Mark, MarkPlayer, MoveKind, TicTacToeMatch,
    TicTacToeOutcome,
};
use grid_games::{BoardError, MatchError, Side};
use rand::rngs::SmallRng;
use rand::SeedableRng;

struct ScriptedMarks(VecDeque<(usize, usize)>);

impl MarkPlayer for ScriptedMarks {
    fn choose(&mut self, _rng: &mut SmallRng, _grid: &Grid, _mark: Mark) -> Option<(usize, usize)> {
        self.0.pop_front()
    }
}

fn script(moves: &[(usize, usize)]) -> Box<ScriptedMarks> {
    Box::new(ScriptedMarks(moves.iter().copied().collect()))
}

#[test]
fn test_heuristic_prefers_win_over_block() {
    let grid = Grid::from_rows(["X _ X", "O O _", "_ _ _"]).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mv = choose_move(&grid, Mark::O, &mut rng).unwrap();
    assert_eq!((mv.row, mv.col), (1, 2));
    assert_eq!(mv.kind, MoveKind::Win);
}

#[test]
fn test_heuristic_blocks_when_it_cannot_win() {
    let grid = Grid::from_rows(["X _ X", "O _ _", "_ _ _"]).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mv = choose_move(&grid, Mark::O, &mut rng).unwrap();
    assert_eq!((mv.row, mv.col), (0, 1));
    assert_eq!(mv.kind, MoveKind::Block);
}

#[test]
fn test_heuristic_takes_first_win_in_scan_order() {
    let grid = Grid::from_rows(["O O _", "_ _ _", "O _ O"]).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mv = choose_move(&grid, Mark::O, &mut rng).unwrap();
    assert_eq!((mv.row, mv.col), (0, 2));
}

#[test]
fn test_heuristic_random_move_lands_on_empty_cell() {
    let grid = Grid::from_rows(["X _ _", "_ O _", "_ _ _"]).unwrap();
    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mv = choose_move(&grid, Mark::O, &mut rng).unwrap();
        assert_eq!(mv.kind, MoveKind::Random);
        assert_eq!(grid.get(mv.row, mv.col), None);
    }
}

#[test]
fn test_full_grid_has_no_move() {
    let grid = Grid::from_rows(["X O X", "X O O", "O X X"]).unwrap();
    assert!(grid.is_full());
    assert_eq!(grid.winner(), None);
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(choose_move(&grid, Mark::O, &mut rng), None);
}

#[test]
fn test_place_rejects_taken_and_off_grid_cells() {
    let mut grid = Grid::new();
    grid.place(1, 1, Mark::X).unwrap();
    assert_eq!(grid.place(1, 1, Mark::O), Err(BoardError::AlreadyTargeted));
    assert_eq!(
        grid.place(3, 0, Mark::O),
        Err(BoardError::OutOfBounds { row: 3, col: 0 })
    );
    assert_eq!(grid.empty_cells().count(), 8);
}

#[test]
fn test_scripted_diagonal_win() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = TicTacToeMatch::new(
        script(&[(0, 0), (1, 1), (2, 2)]),
        script(&[(0, 1), (0, 2)]),
    );
    assert_eq!(game.play(&mut rng), Ok(TicTacToeOutcome::Win(Mark::X)));
    assert_eq!(game.moves(), 5);
}

#[test]
fn test_scripted_draw() {
    let mut rng = SmallRng::seed_from_u64(0);
    // X O X / X O O / O X X
    let mut game = TicTacToeMatch::new(
        script(&[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)]),
        script(&[(0, 1), (1, 1), (1, 2), (2, 0)]),
    );
    assert_eq!(game.play(&mut rng), Ok(TicTacToeOutcome::Draw));
    assert_eq!(game.moves(), 9);
}

#[test]
fn test_taken_cell_is_asked_again() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = TicTacToeMatch::new(
        script(&[(1, 1), (1, 1), (0, 0)]),
        script(&[(2, 2)]),
    );
    assert_eq!(game.play_turn(&mut rng), Ok(None));
    assert_eq!(game.play_turn(&mut rng), Ok(None));
    assert_eq!(game.play_turn(&mut rng), Ok(None));
    assert_eq!(game.grid().get(0, 0), Some(Mark::X));
    assert_eq!(game.play_turn(&mut rng), Err(MatchError::Withdrawn(Side::Two)));
}

#[test]
fn test_double_threat_cannot_be_defended() {
    // X threatens both (0,2) and (2,0); O blocks the first one found.
    let mut grid = Grid::from_rows(["X X _", "X O _", "_ _ O"]).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mv = choose_move(&grid, Mark::O, &mut rng).unwrap();
    assert_eq!(mv.kind, MoveKind::Block);
    assert_eq!((mv.row, mv.col), (0, 2));
    grid.place(mv.row, mv.col, Mark::O).unwrap();
    let reply = choose_move(&grid, Mark::X, &mut rng).unwrap();
    assert_eq!((reply.row, reply.col, reply.kind), (2, 0, MoveKind::Win));
}

#[test]
fn test_heuristic_player_reports_move_kind() {
    let grid = Grid::from_rows(["X _ X", "O O _", "_ _ _"]).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut o = HeuristicPlayer::new();
    assert_eq!(o.last_kind(), None);
    assert_eq!(o.choose(&mut rng, &grid, Mark::O), Some((1, 2)));
    assert_eq!(o.last_kind(), Some(MoveKind::Win));
}

#[test]
fn test_heuristic_self_play_always_ends() {
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = TicTacToeMatch::new(
            Box::new(HeuristicPlayer::new()),
            Box::new(HeuristicPlayer::new()),
        );
        let outcome = game.play(&mut rng).unwrap();
        match outcome {
            TicTacToeOutcome::Win(mark) => assert!(game.grid().is_win_for(mark)),
            TicTacToeOutcome::Draw => {
                assert!(game.grid().is_full());
                assert_eq!(game.grid().winner(), None);
            }
        }
        assert!(game.moves() <= 9);
    }
}

/// Takes the first empty cell in row-major order and records every move it is told about.
struct Watcher {
    seen: Rc<RefCell<Vec<(Mark, (usize, usize), Option<MoveKind>)>>>,
}

impl MarkPlayer for Watcher {
    fn choose(&mut self, _rng: &mut SmallRng, grid: &Grid, _mark: Mark) -> Option<(usize, usize)> {
        grid.empty_cells().next()
    }

    fn handle_move(
        &mut self,
        _grid: &Grid,
        mark: Mark,
        cell: (usize, usize),
        reason: Option<MoveKind>,
    ) {
        self.seen.borrow_mut().push((mark, cell, reason));
    }
}

#[test]
fn test_match_passes_heuristic_reason_to_observers() {
    for seed in 0..20 {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let x = Watcher { seen: seen.clone() };
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = TicTacToeMatch::new(Box::new(x), Box::new(HeuristicPlayer::new()));
        game.play(&mut rng).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), game.moves());
        assert_eq!(seen[0], (Mark::X, (0, 0), None));
        for &(mark, _, reason) in seen.iter() {
            match mark {
                Mark::X => assert_eq!(reason, None),
                Mark::O => assert!(reason.is_some()),
            }
        }
        // The first reply has nothing to win or block.
        assert_eq!(seen[1].2, Some(MoveKind::Random));
    }
}
