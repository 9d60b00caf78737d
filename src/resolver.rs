use std::collections::HashMap;

use lockitdown_types::Hex;

use crate::game::GameState;

/// Maps a targeted hex to the positions of every robot whose beam is
/// currently resting on it.
type TargetMap = HashMap<Hex, Vec<Hex>>;

/// Resolves the beam lattice to a fixed point: robots hit by exactly two
/// beams are locked down, robots hit by three or more are shut down (and
/// removed, awarding a point to each attacker), and everything is
/// recomputed from scratch after every shutdown since removing a robot
/// can change who else is being targeted. Returns `true` if a tiebreak
/// cycle was detected, in which case `state.requires_tie_break` is also
/// set and the lattice is left exactly as it was before this call.
pub fn resolve(state: &mut GameState) -> bool {
    loop {
        let targeted = targeted_robots(state);

        if has_tiebreak_cycle(&targeted) {
            state.requires_tie_break = true;
            return true;
        }

        let arena = state.arena;
        let active_hex = state.active_hex;
        for robot in &mut state.robots {
            robot.is_locked_down = false;
            // The robot mid-`Turn` keeps its beam disabled for this whole
            // resolve: its freshly rotated facing must not help resolve
            // its own move. `apply_move` restores it once resolution ends.
            robot.is_beam_enabled =
                Some(robot.position) != active_hex && !arena.in_corridor(robot.position);
        }

        let mut shutdowns = Vec::new();
        for (&hex, attackers) in &targeted {
            match attackers.len() {
                0 | 1 => {}
                2 => {
                    if let Some(robot) = state.robot_at_mut(hex) {
                        robot.is_locked_down = true;
                        robot.is_beam_enabled = false;
                    }
                }
                _ => shutdowns.push(hex),
            }
        }

        if shutdowns.is_empty() {
            return false;
        }

        for hex in shutdowns {
            for attacker_hex in &targeted[&hex] {
                if let Some(player_index) = state.robot_at(*attacker_hex).map(|attacker| attacker.player.index()) {
                    state.players[player_index].points += 1;
                }
            }
            state.robots.retain(|r| r.position != hex);
        }
    }
}

/// For every active, beam-enabled robot outside the corridor, walks its
/// facing until it either exits into the corridor (no target) or hits
/// another robot. A beam that hits a teammate stops without targeting
/// anything; beams never reach into the corridor.
fn targeted_robots(state: &GameState) -> TargetMap {
    let mut targeted = TargetMap::new();

    for attacker in &state.robots {
        if !attacker.is_beam_enabled || attacker.is_locked_down || state.arena.in_corridor(attacker.position) {
            continue;
        }

        let mut cursor = attacker.position.neighbor(attacker.direction);
        while !state.arena.in_corridor(cursor) {
            if let Some(target) = state.robot_at(cursor) {
                if target.player != attacker.player {
                    targeted.entry(cursor).or_default().push(attacker.position);
                }
                break;
            }
            cursor = cursor.neighbor(attacker.direction);
        }
    }

    targeted
}

/// A tiebreak cycle exists when a doomed robot (two or more attackers) is
/// itself being attacked by another doomed robot: resolving one first
/// would change whether the other is still doomed, so there's no
/// well-defined processing order.
fn has_tiebreak_cycle(targeted: &TargetMap) -> bool {
    for attackers in targeted.values() {
        if attackers.len() <= 1 {
            continue;
        }
        for attacker_hex in attackers {
            if targeted.get(attacker_hex).is_some_and(|a| a.len() > 1) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameDef, Robot};
    use lockitdown_types::{Direction, PlayerId};

    fn robot(position: Hex, direction: Direction, player: u8) -> Robot {
        Robot {
            position,
            direction,
            is_beam_enabled: true,
            is_locked_down: false,
            player: PlayerId(player),
        }
    }

    #[test]
    fn two_attackers_lock_down_the_target() {
        let mut game = GameState::new(GameDef::canonical(3));
        game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
        game.robots.push(robot(Hex::new(2, 0), Direction::W, 1));
        game.robots.push(robot(Hex::new(0, -2), Direction::SE, 2));
        game.robots.push(robot(Hex::ORIGIN, Direction::E, 2));

        resolve(&mut game);

        assert!(game.robot_at(Hex::ORIGIN).unwrap().is_locked_down);
        assert_eq!(game.robots.len(), 4);
    }

    #[test]
    fn three_attackers_shut_down_and_award_points() {
        let mut game = GameState::new(GameDef::canonical(4));
        game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
        game.robots.push(robot(Hex::new(2, 0), Direction::W, 1));
        game.robots.push(robot(Hex::new(0, -2), Direction::SE, 2));
        game.robots.push(robot(Hex::new(0, 2), Direction::NW, 3));
        game.robots.push(robot(Hex::ORIGIN, Direction::E, 3));

        resolve(&mut game);

        assert!(game.robot_at(Hex::ORIGIN).is_none());
        assert_eq!(game.players[0].points, 1);
        assert_eq!(game.players[1].points, 1);
        assert_eq!(game.players[2].points, 1);
    }

    #[test]
    fn beams_stop_at_a_teammate_without_targeting_it() {
        let mut game = GameState::new(GameDef::canonical(2));
        game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
        game.robots.push(robot(Hex::ORIGIN, Direction::E, 0));

        resolve(&mut game);

        assert!(!game.robot_at(Hex::ORIGIN).unwrap().is_locked_down);
    }

    #[test]
    fn removing_an_attacker_unlocks_its_former_target_on_the_next_resolve() {
        let mut game = GameState::new(GameDef::canonical(3));
        game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
        game.robots.push(robot(Hex::new(2, 0), Direction::W, 1));
        game.robots.push(robot(Hex::ORIGIN, Direction::E, 2));

        resolve(&mut game);
        assert!(game.robot_at(Hex::ORIGIN).unwrap().is_locked_down);

        game.robots.retain(|r| r.position != Hex::new(2, 0));
        resolve(&mut game);
        assert!(!game.robot_at(Hex::ORIGIN).unwrap().is_locked_down);
    }
}
