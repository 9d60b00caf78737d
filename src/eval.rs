use lockitdown_types::{Direction, Hex, PlayerId};

use crate::game::GameState;

/// Heuristic score of `state` from `searcher`'s perspective: the
/// searcher's own robots contribute positively, every other robot
/// negatively, plus a bonus for the points the player on turn has
/// already banked (a push toward finishing shutdowns rather than
/// stalling).
#[must_use]
pub fn score(state: &GameState, searcher: PlayerId) -> i32 {
    let mut total = 0;
    for robot in &state.robots {
        let robot_score = score_robot(state, robot);
        if robot.player == searcher {
            total += robot_score;
        } else {
            total -= robot_score;
        }
    }

    total += 30 * state.players[state.player_turn.index()].points;
    total
}

fn score_robot(state: &GameState, robot: &super::game::Robot) -> i32 {
    let mut score = 0;

    if robot.is_locked_down {
        score -= 100;
    }

    score += score_position(state, robot);
    score
}

fn score_position(state: &GameState, robot: &super::game::Robot) -> i32 {
    let mut score = 0;
    let pos = robot.position;

    if pos.q == 0 || pos.r == 0 || pos.s() == 0 {
        score += 10;
    }

    if !state.arena.in_corridor(pos) {
        let attackable = Direction::ALL
            .iter()
            .filter(|&&d| !state.arena.in_corridor(pos.neighbor(d)))
            .count();
        score -= attackable as i32;
    }

    for enemy in &state.robots {
        if enemy.player != robot.player && forward_axis_hits(robot.direction, pos, enemy.position) {
            score += 20;
        }
    }

    score
}

/// Whether `to` lies on the half-line extending from `from` in
/// `direction` — the same test the resolver uses to trace a beam, but
/// without stopping at the first obstruction, since this is only a
/// heuristic "is an enemy roughly in my sights" signal.
fn forward_axis_hits(direction: Direction, from: Hex, to: Hex) -> bool {
    match direction {
        Direction::W => from.r == to.r && from.q > to.q,
        Direction::NW => from.q == to.q && from.r > to.r,
        Direction::NE => from.s() == to.s() && from.r > to.r,
        Direction::E => from.r == to.r && from.q < to.q,
        Direction::SE => from.q == to.q && from.r < to.r,
        Direction::SW => from.s() == to.s() && from.q > to.q,
    }
}
