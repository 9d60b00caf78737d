use smallvec::SmallVec;
use std::sync::Arc;

use lockitdown_geometry::EdgePlacement;
use lockitdown_types::Side;

use crate::game::GameState;
use crate::moves::Move;

/// Lazily enumerates every legal move for the player to act. Each robot
/// contributes at most three candidate moves (advance, turn left, turn
/// right), buffered into a small fixed-size queue one robot at a time so
/// generating moves for a position never allocates more than the
/// corridor-edge list it borrows.
pub struct MoveGen<'a> {
    state: &'a GameState,
    robot_cursor: usize,
    buffer: SmallVec<[Move; 3]>,
    buffer_pos: usize,
    edges: Option<Arc<Vec<EdgePlacement>>>,
    edge_cursor: usize,
}

impl<'a> MoveGen<'a> {
    #[must_use]
    pub fn new(state: &'a GameState) -> Self {
        MoveGen {
            state,
            robot_cursor: 0,
            buffer: SmallVec::new(),
            buffer_pos: 0,
            edges: None,
            edge_cursor: 0,
        }
    }

    fn fill_buffer_for_next_robot(&mut self) -> bool {
        while self.robot_cursor < self.state.robots.len() {
            let robot = self.state.robots[self.robot_cursor];
            self.robot_cursor += 1;

            if robot.player != self.state.player_turn || robot.is_locked_down {
                continue;
            }

            self.buffer.clear();
            self.buffer_pos = 0;

            let advance_target = robot.position.neighbor(robot.direction);
            if self.state.arena.in_playable(advance_target) && self.state.robot_at(advance_target).is_none() {
                self.buffer.push(Move::Advance { robot: robot.position });
            }

            for side in [Side::Left, Side::Right] {
                let facing = robot.position.neighbor(robot.direction.rotate(side));
                if self.state.arena.in_playable(facing) {
                    self.buffer.push(Move::Turn { robot: robot.position, side });
                }
            }

            if !self.buffer.is_empty() {
                return true;
            }
        }
        false
    }

    fn next_placement(&mut self) -> Option<Move> {
        if self.state.moves_this_turn != self.state.def.moves_per_turn
            || self.state.robots_in_corridor(self.state.player_turn) > 1
        {
            return None;
        }

        let edges = self
            .edges
            .get_or_insert_with(|| self.state.arena.edges())
            .clone();

        while self.edge_cursor < edges.len() {
            let edge = edges[self.edge_cursor];
            self.edge_cursor += 1;
            if self.state.robot_at(edge.position).is_none() {
                return Some(Move::Place { hex: edge.position, direction: edge.direction });
            }
        }
        None
    }
}

impl<'a> Iterator for MoveGen<'a> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            if self.buffer_pos < self.buffer.len() {
                let mv = self.buffer[self.buffer_pos];
                self.buffer_pos += 1;
                return Some(mv);
            }

            if self.fill_buffer_for_next_robot() {
                continue;
            }

            return self.next_placement();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameDef;
    use crate::moves;
    use lockitdown_types::PlayerId;

    #[test]
    fn fresh_game_only_offers_placements() {
        let game = GameState::new(GameDef::canonical(2));
        let moves: Vec<_> = MoveGen::new(&game).collect();
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| matches!(m, Move::Place { .. })));
    }

    #[test]
    fn a_placed_robot_offers_advance_and_both_turns_when_unobstructed() {
        let mut game = GameState::new(GameDef::canonical(2));
        let edge = game.arena.edges()[3];
        moves::apply(&mut game, Move::Place { hex: edge.position, direction: edge.direction }, PlayerId(0)).unwrap();

        let gen_moves: Vec<_> = MoveGen::new(&game).collect();
        let has_advance = gen_moves.iter().any(|m| matches!(m, Move::Advance { .. }));
        let turns = gen_moves.iter().filter(|m| matches!(m, Move::Turn { .. })).count();
        assert!(has_advance);
        assert_eq!(turns, 2);
    }

    #[test]
    fn locked_down_robots_generate_no_moves() {
        let mut game = GameState::new(GameDef::canonical(2));
        let edge = game.arena.edges()[0];
        moves::apply(&mut game, Move::Place { hex: edge.position, direction: edge.direction }, PlayerId(0)).unwrap();
        game.robots[0].is_locked_down = true;

        let gen_moves: Vec<_> = MoveGen::new(&game).collect();
        assert!(gen_moves.iter().all(|m| matches!(m, Move::Place { .. })));
    }
}
