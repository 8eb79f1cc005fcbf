use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use grid_games::{
    AiPlayer, BattleshipMatch, BoardError, ConfigError, Coordinate, GameConfig, GuessResult,
    MatchError, OpponentView, Player, Side, FLEET, MAX_BOARD_SIZE, MAX_REJECTED_TARGETS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Fires at queued coordinates and records what the controller tells it.
#[derive(Default)]
struct Script {
    targets: VecDeque<Coordinate>,
    rejected: Vec<(Coordinate, BoardError)>,
    results: Vec<GuessResult>,
    incoming: usize,
}

struct ScriptedPlayer(Rc<RefCell<Script>>);

impl Player for ScriptedPlayer {
    fn select_target(
        &mut self,
        _rng: &mut SmallRng,
        _opponent: &OpponentView<'_>,
    ) -> Option<Coordinate> {
        self.0.borrow_mut().targets.pop_front()
    }

    fn target_rejected(&mut self, coord: Coordinate, error: &BoardError) {
        self.0.borrow_mut().rejected.push((coord, error.clone()));
    }

    fn handle_guess_result(&mut self, _coord: Coordinate, result: GuessResult) {
        self.0.borrow_mut().results.push(result);
    }

    fn handle_opponent_guess(&mut self, _coord: Coordinate, _result: GuessResult) {
        self.0.borrow_mut().incoming += 1;
    }
}

fn scripted_match(seed: u64) -> (BattleshipMatch, Rc<RefCell<Script>>, SmallRng) {
    let script = Rc::new(RefCell::new(Script::default()));
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = BattleshipMatch::new(
        GameConfig::default(),
        Box::new(ScriptedPlayer(script.clone())),
        Box::new(AiPlayer::new()),
    );
    game.setup(&mut rng).unwrap();
    (game, script, rng)
}

fn fleet_cells(game: &BattleshipMatch, side: Side) -> Vec<Coordinate> {
    game.board(side)
        .ships()
        .iter()
        .flat_map(|s| s.positions().to_vec())
        .collect()
}

#[test]
fn test_scripted_side_sinks_fleet_and_wins() {
    let (mut game, script, mut rng) = scripted_match(2024);
    let targets = fleet_cells(&game, Side::Two);
    assert_eq!(targets.len(), 17);
    script.borrow_mut().targets.extend(targets);

    let outcome = game.play(&mut rng).unwrap();
    assert_eq!(outcome.winner, Side::One);
    assert_eq!(game.winner(), Some(Side::One));
    assert_eq!(outcome.shots[0], 17);
    assert_eq!(game.shots(Side::One), 17);
    // side Two answered every shot but the last
    assert_eq!(outcome.shots[1], 16);
    assert_eq!(outcome.turns, 33);

    let script = script.borrow();
    assert!(script.results.iter().all(GuessResult::is_hit));
    assert_eq!(
        script.results.iter().filter(|r| matches!(r, GuessResult::Sink(_))).count(),
        5
    );
    assert_eq!(script.incoming, 16);
    assert!(script.rejected.is_empty());
    assert!(game.board(Side::Two).all_ships_sunk());
    assert!(!game.board(Side::One).all_ships_sunk());
}

#[test]
fn test_repeat_and_off_board_targets_are_refused() {
    let (mut game, script, mut rng) = scripted_match(3);
    let first = Coordinate::new(0, 0);
    script.borrow_mut().targets.push_back(first);

    let report = game.play_turn(&mut rng).unwrap();
    assert_eq!(report.side, Side::One);
    assert_eq!(report.target, first);
    assert!(!report.fleet_destroyed);
    assert_eq!(game.to_move(), Side::Two);
    game.play_turn(&mut rng).unwrap();

    script
        .borrow_mut()
        .targets
        .extend([first, Coordinate::new(10, 3), Coordinate::new(0, 1)]);
    let report = game.play_turn(&mut rng).unwrap();
    assert_eq!(report.target, Coordinate::new(0, 1));
    assert_eq!(
        script.borrow().rejected,
        vec![
            (first, BoardError::AlreadyTargeted),
            (Coordinate::new(10, 3), BoardError::OutOfBounds { row: 10, col: 3 }),
        ]
    );
    assert_eq!(game.shots(Side::One), 2);
}

#[test]
fn test_player_without_targets_withdraws() {
    let (mut game, _script, mut rng) = scripted_match(11);
    assert_eq!(game.play_turn(&mut rng), Err(MatchError::Withdrawn(Side::One)));
    assert_eq!(game.shots(Side::One), 0);
}

#[test]
fn test_endless_rejections_are_bounded() {
    let (mut game, script, mut rng) = scripted_match(12);
    let off = Coordinate::new(20, 20);
    script
        .borrow_mut()
        .targets
        .extend(std::iter::repeat(off).take(MAX_REJECTED_TARGETS + 5));
    assert_eq!(
        game.play_turn(&mut rng),
        Err(MatchError::TargetingExhausted(Side::One))
    );
    assert_eq!(script.borrow().rejected.len(), MAX_REJECTED_TARGETS);
}

#[test]
fn test_turn_before_setup_is_an_error() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = BattleshipMatch::new(
        GameConfig::default(),
        Box::new(AiPlayer::new()),
        Box::new(AiPlayer::new()),
    );
    assert_eq!(game.play_turn(&mut rng), Err(MatchError::NotSetUp));
}

#[test]
fn test_oversized_fleet_fails_setup() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = BattleshipMatch::new(
        GameConfig::new(4, vec![4, 4, 4, 4, 2]),
        Box::new(AiPlayer::new()),
        Box::new(AiPlayer::new()),
    );
    assert_eq!(
        game.setup(&mut rng),
        Err(MatchError::Board(BoardError::Configuration(
            ConfigError::FleetTooLarge { cells: 18, area: 16 }
        )))
    );
    assert_eq!(game.play_turn(&mut rng), Err(MatchError::NotSetUp));
}

#[test]
fn test_board_larger_than_letter_rows_is_rejected() {
    assert_eq!(GameConfig::new(MAX_BOARD_SIZE, FLEET.to_vec()).validate(), Ok(()));
    assert_eq!(
        GameConfig::new(30, FLEET.to_vec()).validate(),
        Err(ConfigError::BoardTooLarge { size: 30, max: 26 })
    );
}

#[test]
fn test_huge_board_fails_setup_without_allocating() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = BattleshipMatch::new(
        GameConfig::new(1 << 33, vec![2]),
        Box::new(AiPlayer::new()),
        Box::new(AiPlayer::new()),
    );
    assert_eq!(
        game.setup(&mut rng),
        Err(MatchError::Board(BoardError::Configuration(
            ConfigError::BoardTooLarge { size: 1 << 33, max: MAX_BOARD_SIZE }
        )))
    );
    assert_eq!(game.board(Side::One).size(), 0);
}

#[test]
fn test_ai_vs_ai_game_terminates() {
    let mut rng = SmallRng::seed_from_u64(123);
    let mut game = BattleshipMatch::new(
        GameConfig::default(),
        Box::new(AiPlayer::new()),
        Box::new(AiPlayer::new()),
    );
    game.setup(&mut rng).unwrap();
    let outcome = game.play(&mut rng).unwrap();

    let winner = outcome.winner;
    assert!(game.board(winner.opponent()).all_ships_sunk());
    assert!(!game.board(winner).all_ships_sunk());
    assert!(outcome.shots[0] <= 100 && outcome.shots[1] <= 100);
    assert!(outcome.shots[0] >= 17 || outcome.shots[1] >= 17);
    assert_eq!(
        game.play_turn(&mut rng),
        Err(MatchError::Finished(winner))
    );
}

#[test]
fn test_seeded_matches_are_reproducible() {
    let run = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = BattleshipMatch::new(
            GameConfig::new(6, vec![3, 2]),
            Box::new(AiPlayer::new()),
            Box::new(AiPlayer::new()),
        );
        game.setup(&mut rng).unwrap();
        game.play(&mut rng).unwrap()
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_single_cell_match() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut game = BattleshipMatch::new(
        GameConfig::new(1, vec![1]),
        Box::new(AiPlayer::new()),
        Box::new(AiPlayer::new()),
    );
    game.setup(&mut rng).unwrap();
    let report = game.play_turn(&mut rng).unwrap();
    assert_eq!(report.result, GuessResult::Sink(1));
    assert!(report.fleet_destroyed);
    assert_eq!(game.winner(), Some(Side::One));
}
