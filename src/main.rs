use std::io::{self, BufRead, Write};

use clap::Parser;

use lockitdown::game::{GameDef, GameState};
use lockitdown::transport;

/// Interactive driver over the core engine: reads one command per line
/// from stdin and prints the result to stdout.
///
/// Commands:
///   state            print the current position as transport JSON
///   undo             undo the last successful move
///   quit             exit
///   <transport move> a JSON object `{"pos": {...}, "action": ...}`,
///                    applied on behalf of the player whose turn it is
#[derive(Parser)]
struct Cli {
    #[arg(long, default_value_t = 2)]
    players: u8,

    #[arg(long, default_value_t = 4)]
    radius: i32,
}

fn main() {
    let cli = Cli::parse();
    let mut def = GameDef::canonical(cli.players);
    def.arena_radius = cli.radius;
    let mut game = GameState::new(def);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "state" => print_state(&mut out, &game),
            "undo" => {
                if game.can_undo() {
                    game.undo_last();
                } else {
                    writeln!(out, "nothing to undo").ok();
                }
            }
            _ => handle_move(&mut out, &mut game, line),
        }
    }
}

fn handle_move(out: &mut impl Write, game: &mut GameState, line: &str) {
    let wire: transport::WireMove = match serde_json::from_str(line) {
        Ok(wire) => wire,
        Err(e) => {
            writeln!(out, "error: invalid move json: {e}").ok();
            return;
        }
    };
    let mv = match transport::move_from_wire(&wire) {
        Ok(mv) => mv,
        Err(e) => {
            writeln!(out, "error: {e}").ok();
            return;
        }
    };
    match game.apply_move(mv, game.player_turn) {
        Ok(outcome) => {
            writeln!(out, "ok: {outcome:?}").ok();
            print_state(out, game);
        }
        Err(e) => {
            writeln!(out, "error: {e}").ok();
        }
    }
}

fn print_state(out: &mut impl Write, game: &GameState) {
    let wire = transport::to_wire(game);
    match serde_json::to_string(&wire) {
        Ok(json) => {
            writeln!(out, "{json}").ok();
        }
        Err(e) => {
            writeln!(out, "error: failed to serialize state: {e}").ok();
        }
    }
}
