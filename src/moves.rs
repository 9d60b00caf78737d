use lockitdown_types::{Direction, Hex, PlayerId, Side};
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::GameState;

/// A single turn-action. Tagged by variant rather than bit-packed: unlike
/// a chess move, these don't need to be cheap enough to fill a
/// transposition table entry, and the variants don't share a uniform
/// shape the way start/end squares do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Advance { robot: Hex },
    Turn { robot: Hex, side: Side },
    Place { hex: Hex, direction: Direction },
}

/// Validates and mutates `state` in place. Undo is handled by the
/// caller's save-stack, not by this function, so on error nothing here
/// may have mutated `state` yet.
pub fn apply(state: &mut GameState, mv: Move, player: PlayerId) -> Result<(), GameError> {
    match mv {
        Move::Advance { robot } => advance(state, robot, player),
        Move::Turn { robot, side } => turn(state, robot, side, player),
        Move::Place { hex, direction } => place(state, hex, direction, player),
    }
}

fn owned_active_robot<'a>(
    state: &'a GameState,
    hex: Hex,
    player: PlayerId,
) -> Result<&'a super::game::Robot, GameError> {
    let robot = state.robot_at(hex).ok_or(GameError::NoRobot(hex))?;
    if robot.player != player {
        return Err(GameError::NotOwner(hex, robot.player));
    }
    if robot.is_locked_down {
        return Err(GameError::LockedDown(hex));
    }
    Ok(robot)
}

fn advance(state: &mut GameState, robot_hex: Hex, player: PlayerId) -> Result<(), GameError> {
    let robot = owned_active_robot(state, robot_hex, player)?;
    let target = robot.position.neighbor(robot.direction);

    if !state.arena.in_playable(target) {
        return Err(GameError::OutOfBounds(target));
    }
    if state.robot_at(target).is_some() {
        return Err(GameError::Blocked(target));
    }

    let robot = state.robot_at_mut(robot_hex).expect("checked above");
    robot.position = target;
    state.moves_this_turn -= 1;
    Ok(())
}

fn turn(state: &mut GameState, robot_hex: Hex, side: Side, player: PlayerId) -> Result<(), GameError> {
    owned_active_robot(state, robot_hex, player)?;

    let robot = state.robot_at_mut(robot_hex).expect("checked above");
    robot.is_beam_enabled = false;
    robot.direction = robot.direction.rotate(side);
    state.active_hex = Some(robot_hex);
    state.moves_this_turn -= 1;
    Ok(())
}

fn place(state: &mut GameState, hex: Hex, direction: Direction, player: PlayerId) -> Result<(), GameError> {
    if state.moves_this_turn != state.def.moves_per_turn {
        return Err(GameError::InvalidPlacement {
            reason: "placement must be the first action of a turn",
        });
    }
    if !state.arena.in_corridor(hex) {
        return Err(GameError::InvalidPlacement {
            reason: "robots are placed in the corridor",
        });
    }
    if state.robots_in_corridor(player) > 1 {
        return Err(GameError::InvalidPlacement {
            reason: "at most two of a player's robots may sit in the corridor at once",
        });
    }
    if state.robot_at(hex).is_some() {
        return Err(GameError::Blocked(hex));
    }

    state.robots.push(super::game::Robot {
        position: hex,
        direction,
        is_beam_enabled: true,
        is_locked_down: false,
        player,
    });
    state.moves_this_turn = 0;
    state.players[player.index()].placed_robots += 1;
    Ok(())
}
