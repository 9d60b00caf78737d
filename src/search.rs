use lockitdown_types::PlayerId;

use crate::eval;
use crate::game::{GameState, MoveOutcome};
use crate::movegen::MoveGen;
use crate::moves::Move;
use crate::time_man::Deadline;

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub depth: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub value: i32,
}

/// Plain minimax: maximizes on `searcher`'s turn, minimizes otherwise,
/// walking the tree in place with move/undo. A branch whose move resolves
/// to a tiebreak is skipped — there's no well-defined continuation for it
/// without an external tiebreak policy.
#[must_use]
pub fn minimax(state: &mut GameState, searcher: PlayerId, depth: u32) -> SearchResult {
    let mut stats = SearchStats::default();
    minimax_inner(state, searcher, depth, &mut stats)
}

fn minimax_inner(state: &mut GameState, searcher: PlayerId, depth: u32, stats: &mut SearchStats) -> SearchResult {
    stats.nodes += 1;

    let moves: Vec<Move> = MoveGen::new(state).collect();
    if depth == 0 || moves.is_empty() || state.winner.is_some() {
        return SearchResult { best_move: None, value: eval::score(state, searcher) };
    }

    let maximize = state.player_turn == searcher;
    let mut best_value = if maximize { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in moves {
        let player = state.player_turn;
        match state.apply_move(mv, player) {
            Ok(MoveOutcome::Tiebreak) => {
                state.undo_last();
                continue;
            }
            Ok(_) => {}
            Err(_) => continue,
        }

        let child = minimax_inner(state, searcher, depth - 1, stats);
        state.undo_last();

        let improves = best_move.is_none()
            || (maximize && child.value > best_value)
            || (!maximize && child.value < best_value);
        if improves {
            best_value = child.value;
            best_move = Some(mv);
        }
    }

    SearchResult { best_move, value: best_value }
}

/// Alpha-beta search with cooperative cancellation via `deadline`. On
/// cancellation the current node returns immediately with whatever best
/// child it has found so far (or a leaf evaluation, if it hadn't started
/// exploring children yet).
#[must_use]
pub fn alpha_beta(state: &mut GameState, searcher: PlayerId, depth: u32, deadline: &Deadline) -> (SearchResult, SearchStats) {
    let mut stats = SearchStats::default();
    let result = alpha_beta_inner(state, searcher, depth, 0, i32::MIN, i32::MAX, deadline, &mut stats);
    (result, stats)
}

#[allow(clippy::too_many_arguments)]
fn alpha_beta_inner(
    state: &mut GameState,
    searcher: PlayerId,
    depth: u32,
    ply: u32,
    mut alpha: i32,
    mut beta: i32,
    deadline: &Deadline,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;
    stats.depth = stats.depth.max(ply);

    if deadline.fired(stats) {
        return SearchResult { best_move: None, value: eval::score(state, searcher) };
    }

    let moves: Vec<Move> = MoveGen::new(state).collect();
    if depth == 0 || moves.is_empty() || state.winner.is_some() {
        return SearchResult { best_move: None, value: eval::score(state, searcher) };
    }

    let maximize = state.player_turn == searcher;
    let mut best_value = if maximize { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in moves {
        if deadline.fired(stats) {
            break;
        }

        let player = state.player_turn;
        match state.apply_move(mv, player) {
            Ok(MoveOutcome::Tiebreak) => {
                state.undo_last();
                continue;
            }
            Ok(_) => {}
            Err(_) => continue,
        }

        let child = alpha_beta_inner(state, searcher, depth - 1, ply + 1, alpha, beta, deadline, stats);
        state.undo_last();

        if maximize {
            if best_move.is_none() || child.value > best_value {
                best_value = child.value;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_value);
        } else {
            if best_move.is_none() || child.value < best_value {
                best_value = child.value;
                best_move = Some(mv);
            }
            beta = beta.min(best_value);
        }

        if alpha >= beta {
            break;
        }
    }

    SearchResult { best_move, value: best_value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameDef;

    #[test]
    fn minimax_and_alpha_beta_agree_on_value_for_a_shallow_tree() {
        let mut game = GameState::new(GameDef::canonical(2));
        let edge = game.arena.edges()[0];
        state_place(&mut game, edge.position, edge.direction);

        let mut game_for_ab = game.clone();

        let mm = minimax(&mut game, PlayerId(0), 2);
        let (ab, _) = alpha_beta(&mut game_for_ab, PlayerId(0), 2, &crate::time_man::Deadline::unbounded());

        assert_eq!(mm.value, ab.value);
    }

    #[test]
    fn zero_depth_search_just_evaluates_the_leaf() {
        let mut game = GameState::new(GameDef::canonical(2));
        let result = minimax(&mut game, PlayerId(0), 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, eval::score(&game, PlayerId(0)));
    }

    #[test]
    fn a_fired_deadline_returns_promptly_with_a_leaf_evaluation() {
        let mut game = GameState::new(GameDef::canonical(2));
        let deadline = crate::time_man::Deadline::unbounded();
        deadline.force_stop();

        let (result, stats) = alpha_beta(&mut game, PlayerId(0), 5, &deadline);
        assert_eq!(result.best_move, None);
        assert_eq!(stats.nodes, 1);
    }

    fn state_place(game: &mut GameState, hex: lockitdown_types::Hex, direction: lockitdown_types::Direction) {
        crate::moves::apply(game, Move::Place { hex, direction }, PlayerId(0)).unwrap();
    }
}
