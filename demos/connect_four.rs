use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four_mcts::board::{GameOutcome, Player};
use connect_four_mcts::boards::connect_four::{ConnectFourBoard, DEFAULT_COLS, DEFAULT_ROWS};
use connect_four_mcts::mcts::{DEFAULT_EXPLORATION, MonteCarloTreeSearch, SearchBudget};
use connect_four_mcts::random::SeededRandomGenerator;

/// Play Connect-Four against a Monte Carlo tree search opponent.
#[derive(Parser, Debug)]
#[command(name = "connect_four", about = "Play Connect-Four against MCTS")]
struct Cli {
    /// Number of rows on the board
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Thinking time per engine move, in milliseconds
    #[arg(long, default_value_t = 1000, conflicts_with = "rollouts")]
    time_ms: u64,

    /// Fixed number of rollouts per engine move instead of a time limit
    #[arg(long)]
    rollouts: Option<u32>,

    /// Seed for the engine's random generator
    #[arg(long)]
    seed: Option<u64>,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
    exploration: f64,

    /// Let the engine make the first move
    #[arg(long)]
    ai_first: bool,
}

enum Input {
    Column(usize),
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let budget = match cli.rollouts {
        Some(n) => SearchBudget::Rollouts(n),
        None => SearchBudget::Time(Duration::from_millis(cli.time_ms)),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);

    let mut state = ConnectFourBoard::new(cli.rows, cli.cols);
    let mut mcts = MonteCarloTreeSearch::builder(state.clone())
        .with_random_generator(SeededRandomGenerator::new(seed))
        .with_exploration_constant(cli.exploration)
        .build();

    let human = if cli.ai_first { Player::Two } else { Player::One };
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.is_terminal() {
        println!("Current state:\n{state}");

        let column = if state.side_to_move() == human {
            match read_move(&mut lines, &state.legal_moves())? {
                Input::Column(column) => column,
                Input::Quit => {
                    println!("Quitting...");
                    return Ok(());
                }
            }
        } else {
            println!("Thinking...");
            let stats = mcts.search(budget);
            println!(
                "Statistics: {} rollouts in {} milliseconds",
                stats.rollouts,
                stats.elapsed.as_millis()
            );
            let column = mcts.best_move().context("engine found no move")?;
            println!("MCTS chose move: {column}");
            column
        };

        state
            .apply_move(column)
            .with_context(|| format!("applying move {column}"))?;
        mcts.advance(column)
            .with_context(|| format!("advancing search tree by {column}"))?;
    }

    println!("{state}");
    match state.outcome() {
        GameOutcome::Draw => println!("The game ends in a draw!"),
        GameOutcome::Win(player) if player == human => println!("Congratulations! You win!"),
        GameOutcome::Win(_) => println!("MCTS wins! Better luck next time."),
        GameOutcome::InProgress => {}
    }
    Ok(())
}

/// Prompts until the user enters a legal column or `quit`. End of input counts as quitting.
fn read_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    legal: &[usize],
) -> Result<Input> {
    loop {
        print!("Enter a move (or 'quit' to end the game): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(Input::Quit);
        };
        let line = line.context("reading move from stdin")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            return Ok(Input::Quit);
        }

        match input.parse::<usize>() {
            Ok(column) if legal.contains(&column) => return Ok(Input::Column(column)),
            Ok(column) => println!("Column {column} is not playable, legal moves: {legal:?}"),
            Err(_) => println!("'{input}' is not a column number"),
        }
    }
}
