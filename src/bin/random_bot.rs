use std::io::{self, Read};

use rand::seq::IteratorRandom;

use lockitdown::movegen::MoveGen;
use lockitdown::transport;

/// Reads a transport-JSON game state from stdin, picks a uniformly
/// random legal move for the player on turn, and writes it as
/// transport-JSON to stdout.
fn main() {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).expect("failed to read state from stdin");
    let wire: transport::WireState = serde_json::from_str(&input).expect("invalid transport state");
    let game = transport::from_wire(wire).expect("state failed validation");

    let mut rng = rand::thread_rng();
    let mv = MoveGen::new(&game)
        .choose(&mut rng)
        .expect("no legal moves for the player on turn");

    let wire_move = transport::move_to_wire(mv);
    println!("{}", serde_json::to_string(&wire_move).unwrap());
}
