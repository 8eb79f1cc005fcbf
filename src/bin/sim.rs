use grid_games::{AiPlayer, BattleshipMatch, GameConfig, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    grid_games::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let config = GameConfig::default();
    let mut game = BattleshipMatch::new(
        config.clone(),
        Box::new(AiPlayer::new()),
        Box::new(AiPlayer::new()),
    );
    game.setup(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
    let outcome = game.play(&mut rng).map_err(|e| anyhow::anyhow!(e))?;

    let winner = match outcome.winner {
        Side::One => "player1",
        Side::Two => "player2",
    };
    let result = json!({
        "seed": seed,
        "config": config,
        "player1": {"shots": outcome.shots[0]},
        "player2": {"shots": outcome.shots[1]},
        "turns": outcome.turns,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
