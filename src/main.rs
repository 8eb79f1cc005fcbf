use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use grid_games::{
    init_logging,
    tictactoe::{HeuristicPlayer, TicTacToeMatch, TicTacToeOutcome},
    ui::{render_grid, render_player_view},
    AiPlayer, BattleshipMatch, CliPlayer, GameConfig, MatchError, Player, Side, BOARD_SIZE,
    FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Console battleship and tic-tac-toe against the computer", long_about = None)]
struct Cli {
    /// Game to play; asks interactively when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sink the computer's fleet before it sinks yours.
    Battleship(BattleshipArgs),
    /// Three in a row against the computer.
    Tictactoe(TicTacToeArgs),
}

#[derive(Args, Clone, Debug)]
struct BattleshipArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = BOARD_SIZE)]
    board_size: usize,
    /// Ship lengths, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = FLEET)]
    fleet: Vec<usize>,
    /// Pause after each shot, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Let the computer play your side too.
    #[arg(long)]
    autoplay: bool,
}

impl Default for BattleshipArgs {
    fn default() -> Self {
        Self {
            seed: None,
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
            delay_ms: 0,
            autoplay: false,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct TicTacToeArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Pause after the computer's move, in milliseconds.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        thread::sleep(Duration::from_millis(delay_ms));
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => match choose_game()? {
            Some(command) => command,
            None => return Ok(()),
        },
    };
    match command {
        Commands::Battleship(args) => run_battleship(args),
        Commands::Tictactoe(args) => run_tictactoe(args),
    }
}

fn choose_game() -> anyhow::Result<Option<Commands>> {
    println!("Select a game to play:");
    println!("1) Battleship");
    println!("2) Tic-Tac-Toe");
    print!("Your choice: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(match line.trim() {
        "" => {
            println!("No choice entered. Exiting.");
            None
        }
        "1" => Some(Commands::Battleship(BattleshipArgs::default())),
        "2" => Some(Commands::Tictactoe(TicTacToeArgs {
            seed: None,
            delay_ms: 500,
        })),
        _ => {
            println!("Invalid choice. Exiting.");
            None
        }
    })
}

fn run_battleship(args: BattleshipArgs) -> anyhow::Result<()> {
    let config = GameConfig::new(args.board_size, args.fleet.clone());
    let mut rng = make_rng(args.seed);
    let human: Box<dyn Player> = if args.autoplay {
        Box::new(AiPlayer::new())
    } else {
        Box::new(CliPlayer::stdio())
    };
    let mut game = BattleshipMatch::new(config, human, Box::new(AiPlayer::new()));

    println!("Placing fleets...\n");
    game.setup(&mut rng).map_err(|e| anyhow!(e))?;

    loop {
        match game.to_move() {
            Side::One => println!(
                "{}",
                render_player_view(game.board(Side::One), game.board(Side::Two))
            ),
            Side::Two => println!("AI is taking its turn..."),
        }
        let report = match game.play_turn(&mut rng) {
            Ok(report) => report,
            Err(MatchError::Withdrawn(_)) => {
                println!("\nInput closed, leaving the game.");
                return Ok(());
            }
            Err(e) => return Err(anyhow!(e)),
        };
        if args.autoplay {
            println!("{:?} fired at {}: {:?}", report.side, report.target, report.result);
        }
        pause(args.delay_ms);
        if report.fleet_destroyed {
            break;
        }
    }

    println!("{}", render_player_view(game.board(Side::One), game.board(Side::Two)));
    match game.winner() {
        Some(Side::One) => println!("Congratulations! You won!"),
        _ => println!("Game over. The AI won."),
    }
    Ok(())
}

fn run_tictactoe(args: TicTacToeArgs) -> anyhow::Result<()> {
    let mut rng = make_rng(args.seed);
    let mut game = TicTacToeMatch::new(
        Box::new(CliPlayer::stdio()),
        Box::new(HeuristicPlayer::new()),
    );
    let outcome = loop {
        println!("{}", render_grid(game.grid()));
        let before = game.moves();
        match game.play_turn(&mut rng) {
            Ok(Some(outcome)) => break outcome,
            Ok(None) => {}
            Err(MatchError::Withdrawn(_)) => {
                println!("\nInput closed, leaving the game.");
                return Ok(());
            }
            Err(e) => return Err(anyhow!(e)),
        }
        // O moves on even counts.
        if game.moves() > before && game.moves() % 2 == 0 {
            pause(args.delay_ms);
        }
    };

    println!("{}", render_grid(game.grid()));
    match outcome {
        TicTacToeOutcome::Win(mark) => println!("Player {} wins!", mark),
        TicTacToeOutcome::Draw => println!("It's a draw!"),
    }
    Ok(())
}
