//! JSON wire format for game state and moves, matching the shape used by
//! the hosted service this engine talks to: nested `gameDef`, 1-based
//! player indices, robots as `[position, fields]` pairs, and a `status`
//! field that is either `"OnGoing"` or the winner's index as a string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GameError;
use crate::game::{GameDef, GameState, Player, Robot, WinCondition};
use crate::moves::Move;
use lockitdown_types::{Direction, Hex, PlayerId, Side};

#[derive(Debug, Serialize, Deserialize)]
struct WireHexaBoard {
    #[serde(rename = "arenaRadius")]
    arena_radius: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireBoard {
    #[serde(rename = "hexaBoard")]
    hexa_board: WireHexaBoard,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireGameDef {
    board: WireBoard,
    #[serde(rename = "numOfPlayers")]
    num_of_players: u8,
    #[serde(rename = "movesPerTurn")]
    moves_per_turn: u32,
    #[serde(rename = "robotsPerPlayer")]
    robots_per_player: u32,
    #[serde(rename = "winCondition")]
    win_condition: String,
}

impl From<&GameDef> for WireGameDef {
    fn from(def: &GameDef) -> Self {
        WireGameDef {
            board: WireBoard { hexa_board: WireHexaBoard { arena_radius: def.arena_radius } },
            num_of_players: def.num_players,
            moves_per_turn: def.moves_per_turn,
            robots_per_player: def.robots_per_player,
            win_condition: match def.win_condition {
                WinCondition::Elimination => "Elimination".to_owned(),
            },
        }
    }
}

impl TryFrom<WireGameDef> for GameDef {
    type Error = GameError;

    fn try_from(wire: WireGameDef) -> Result<Self, GameError> {
        let win_condition = match wire.win_condition.as_str() {
            "Elimination" => WinCondition::Elimination,
            _ => {
                return Err(GameError::InvalidPlacement { reason: "unknown win condition" });
            }
        };
        Ok(GameDef {
            arena_radius: wire.board.hexa_board.arena_radius,
            num_players: wire.num_of_players,
            moves_per_turn: wire.moves_per_turn,
            robots_per_player: wire.robots_per_player,
            win_condition,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePlayer {
    points: i32,
    #[serde(rename = "placedRobots")]
    placed_robots: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireRobot {
    player: u8,
    dir: Hex,
    #[serde(rename = "isLocked")]
    is_locked: bool,
    #[serde(rename = "isBeamEnabled")]
    is_beam_enabled: bool,
}

fn direction_from_unit_hex(hex: Hex) -> Result<Direction, GameError> {
    Direction::ALL
        .into_iter()
        .find(|d| d.to_hex() == hex)
        .ok_or(GameError::OutOfBounds(hex))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireState {
    #[serde(rename = "gameDef")]
    game_def: WireGameDef,
    players: Vec<WirePlayer>,
    robots: Vec<(Hex, WireRobot)>,
    #[serde(rename = "playerTurn")]
    player_turn: u8,
    status: String,
    #[serde(rename = "movesThisTurn")]
    moves_this_turn: u32,
    #[serde(rename = "requiresTieBreak")]
    requires_tie_break: bool,
}

/// Converts the live game state into its wire representation.
#[must_use]
pub fn to_wire(state: &GameState) -> WireState {
    let robots = state
        .robots
        .iter()
        .map(|r| {
            (
                r.position,
                WireRobot {
                    player: r.player.0 + 1,
                    dir: r.direction.to_hex(),
                    is_locked: r.is_locked_down,
                    is_beam_enabled: r.is_beam_enabled,
                },
            )
        })
        .collect();

    let status = match state.winner {
        None => "OnGoing".to_owned(),
        Some(winner) => winner.0.to_string(),
    };

    WireState {
        game_def: WireGameDef::from(&state.def),
        players: state.players.iter().map(|p| WirePlayer { points: p.points, placed_robots: p.placed_robots }).collect(),
        robots,
        player_turn: state.player_turn.0 + 1,
        status,
        moves_this_turn: state.def.moves_per_turn - state.moves_this_turn,
        requires_tie_break: state.requires_tie_break,
    }
}

/// Rebuilds a `GameState` from its wire representation. Errors if a
/// robot's `dir` field isn't one of the six unit vectors or the win
/// condition is unrecognized.
pub fn from_wire(wire: WireState) -> Result<GameState, GameError> {
    let def = GameDef::try_from(wire.game_def)?;

    let mut robots = Vec::with_capacity(wire.robots.len());
    for (position, r) in wire.robots {
        robots.push(Robot {
            position,
            direction: direction_from_unit_hex(r.dir)?,
            is_beam_enabled: r.is_beam_enabled,
            is_locked_down: r.is_locked,
            player: PlayerId(r.player - 1),
        });
    }

    let winner = if wire.status == "OnGoing" {
        None
    } else {
        Some(PlayerId(wire.status.parse().map_err(|_| GameError::InvalidPlacement {
            reason: "status must be \"OnGoing\" or a player index",
        })?))
    };

    let moves_this_turn = def.moves_per_turn - wire.moves_this_turn;
    let mut state = GameState::new(def);
    state.players = wire.players.into_iter().map(|p| Player { points: p.points, placed_robots: p.placed_robots }).collect();
    state.robots = robots;
    state.player_turn = PlayerId(wire.player_turn - 1);
    state.moves_this_turn = moves_this_turn;
    state.requires_tie_break = wire.requires_tie_break;
    state.winner = winner;
    Ok(state)
}

/// Wire shape for a single move: a target position plus a loosely-typed
/// `action` payload (`"Advance"`, `{"Turn":{"side":...}}`, or
/// `{"PlaceRobot":{"dir":...}}`), matching the hosted service's format.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireMove {
    pub pos: Hex,
    pub action: Value,
}

#[must_use]
pub fn move_to_wire(mv: Move) -> WireMove {
    match mv {
        Move::Advance { robot } => WireMove { pos: robot, action: Value::String("Advance".to_owned()) },
        Move::Turn { robot, side } => {
            let side = match side {
                Side::Left => "Left",
                Side::Right => "Right",
            };
            WireMove {
                pos: robot,
                action: serde_json::json!({ "Turn": { "side": side } }),
            }
        }
        Move::Place { hex, direction } => WireMove {
            pos: hex,
            action: serde_json::json!({ "PlaceRobot": { "dir": direction.to_hex() } }),
        },
    }
}

pub fn move_from_wire(wire: &WireMove) -> Result<Move, GameError> {
    if wire.action == Value::String("Advance".to_owned()) {
        return Ok(Move::Advance { robot: wire.pos });
    }
    if let Some(turn) = wire.action.get("Turn") {
        let side = match turn.get("side").and_then(Value::as_str) {
            Some("Left") => Side::Left,
            Some("Right") => Side::Right,
            _ => return Err(GameError::InvalidPlacement { reason: "Turn.side must be Left or Right" }),
        };
        return Ok(Move::Turn { robot: wire.pos, side });
    }
    if let Some(place) = wire.action.get("PlaceRobot") {
        let dir = place
            .get("dir")
            .cloned()
            .ok_or(GameError::InvalidPlacement { reason: "PlaceRobot.dir is required" })?;
        let hex: Hex = serde_json::from_value(dir)
            .map_err(|_| GameError::InvalidPlacement { reason: "PlaceRobot.dir must be a {q,r} pair" })?;
        return Ok(Move::Place { hex: wire.pos, direction: direction_from_unit_hex(hex)? });
    }
    Err(GameError::InvalidPlacement { reason: "unrecognized move action" })
}
