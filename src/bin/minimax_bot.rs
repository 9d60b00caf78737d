use std::io::{self, Read};
use std::time::Duration;

use clap::Parser;

use lockitdown::search;
use lockitdown::time_man::Limits;
use lockitdown::transport;

/// Reads a transport-JSON game state from stdin, searches for the best
/// move for the player on turn, and writes the chosen move as
/// transport-JSON to stdout.
#[derive(Parser)]
struct Cli {
    #[arg(long, default_value_t = 4)]
    depth: u32,

    #[arg(long)]
    time_ms: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    let mut input = String::new();
    io::stdin().read_to_string(&mut input).expect("failed to read state from stdin");
    let wire: transport::WireState = serde_json::from_str(&input).expect("invalid transport state");
    let mut game = transport::from_wire(wire).expect("state failed validation");

    let mut limits = Limits::new().depth(cli.depth);
    if let Some(ms) = cli.time_ms {
        limits = limits.time(Duration::from_millis(ms));
    }
    let deadline = limits.start_now();

    let searcher = game.player_turn;
    let (result, stats) = search::alpha_beta(&mut game, searcher, cli.depth, &deadline);

    eprintln!("{searcher} searched {} nodes to depth {}, score {}", stats.nodes, stats.depth, result.value);

    let mv = result.best_move.expect("no legal moves for the player on turn");
    let wire_move = transport::move_to_wire(mv);
    println!("{}", serde_json::to_string(&wire_move).unwrap());
}
