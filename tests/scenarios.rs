use lockitdown::game::{GameDef, GameState, MoveOutcome, Robot};
use lockitdown::movegen::MoveGen;
use lockitdown::moves::{self, Move};
use lockitdown::resolver;
use lockitdown::transport;
use lockitdown_types::{Direction, Hex, PlayerId, Side};

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
fn place_on_corridor_ends_the_turn_and_passes_to_the_next_player() {
    let mut game = GameState::new(GameDef::canonical(2));

    let outcome = game
        .apply_move(Move::Place { hex: Hex::new(0, 5), direction: Direction::NW }, PlayerId(0))
        .unwrap();

    assert_eq!(outcome, MoveOutcome::Continue);
    let placed = game.robot_at(Hex::new(0, 5)).unwrap();
    assert!(placed.is_beam_enabled);
    assert_eq!(game.moves_this_turn, 0);
    assert_eq!(game.player_turn, PlayerId(1));
}

#[test]
fn two_opposing_beams_lock_the_robot_caught_between_them_without_scoring() {
    let mut game = GameState::new(GameDef::canonical(3));
    game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
    game.robots.push(robot(Hex::new(2, 0), Direction::W, 1));
    game.robots.push(robot(Hex::ORIGIN, Direction::E, 2));

    resolver::resolve(&mut game);

    let victim = game.robot_at(Hex::ORIGIN).unwrap();
    assert!(victim.is_locked_down);
    assert!(!victim.is_beam_enabled);
    assert!(game.players.iter().all(|p| p.points == 0));
}

#[test]
fn three_beams_shut_the_target_down_and_pay_every_attacker() {
    let mut game = GameState::new(GameDef::canonical(4));
    game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
    game.robots.push(robot(Hex::new(2, 0), Direction::W, 1));
    game.robots.push(robot(Hex::new(0, -2), Direction::SE, 2));
    game.robots.push(robot(Hex::new(0, 2), Direction::NW, 3));
    game.robots.push(robot(Hex::ORIGIN, Direction::E, 3));

    resolver::resolve(&mut game);

    assert!(game.robot_at(Hex::ORIGIN).is_none());
    for owner in 0..3 {
        assert_eq!(game.players[owner].points, 1);
    }
}

#[test]
fn a_robot_advancing_into_the_line_of_fire_breaks_an_existing_lockdown() {
    let mut game = GameState::new(GameDef::canonical(3));
    // Two attackers lock the victim at the origin.
    game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
    game.robots.push(robot(Hex::new(2, 0), Direction::W, 1));
    game.robots.push(robot(Hex::ORIGIN, Direction::E, 2));
    resolver::resolve(&mut game);
    assert!(game.robot_at(Hex::ORIGIN).unwrap().is_locked_down);

    // A third robot, owned by the victim's player, advances onto the
    // western attacker's line of fire, shielding the victim.
    game.robots.push(robot(Hex::new(-1, -1), Direction::SE, 2));
    moves::apply(&mut game, Move::Advance { robot: Hex::new(-1, -1) }, PlayerId(2)).unwrap();
    resolver::resolve(&mut game);

    let victim = game.robot_at(Hex::ORIGIN).unwrap();
    assert!(!victim.is_locked_down);
    assert!(victim.is_beam_enabled);
}

#[test]
fn turning_to_face_an_enemy_does_not_lock_it_down_in_the_same_move() {
    let mut game = GameState::new(GameDef::canonical(2));
    game.robots.push(robot(Hex::new(-2, 0), Direction::E, 0));
    game.robots.push(robot(Hex::ORIGIN, Direction::E, 1));
    game.robots.push(robot(Hex::new(2, 0), Direction::NW, 0));

    let player = game.player_turn;
    let outcome = game
        .apply_move(Move::Turn { robot: Hex::new(2, 0), side: Side::Left }, player)
        .unwrap();

    let turned = game.robot_at(Hex::new(2, 0)).unwrap();
    assert_eq!(turned.direction, Direction::W);
    assert!(turned.is_beam_enabled);

    let enemy = game.robot_at(Hex::ORIGIN).unwrap();
    assert!(!enemy.is_locked_down);
    assert_eq!(outcome, MoveOutcome::Continue);
}

#[test]
fn eliminating_every_player_but_one_ends_the_game() {
    let mut game = GameState::new(GameDef::canonical(2));

    game.robots.push(robot(Hex::new(1, 0), Direction::E, 0));
    game.players[0].placed_robots = 1;
    game.players[1].placed_robots = game.def.robots_per_player;

    let result = game.apply_move(Move::Turn { robot: Hex::new(1, 0), side: Side::Left }, PlayerId(0));
    match result {
        Ok(MoveOutcome::GameOver { winner }) => assert_eq!(winner, PlayerId(0)),
        other => panic!("expected a game-over outcome, got {other:?}"),
    }
}

fn undo_stress_at_depth(game: &mut GameState, depth: u32) {
    if depth == 0 {
        return;
    }

    let moves: Vec<Move> = MoveGen::new(game).collect();
    for mv in moves {
        let before = serde_json::to_string(&transport::to_wire(game)).unwrap();
        let player = game.player_turn;

        if game.apply_move(mv, player).is_err() {
            continue;
        }

        undo_stress_at_depth(game, depth - 1);

        game.undo_last();
        let after = serde_json::to_string(&transport::to_wire(game)).unwrap();
        assert_eq!(before, after, "undo did not restore the pre-move snapshot for {mv:?}");
    }
}

#[test]
fn every_move_to_depth_three_from_a_fresh_game_undoes_cleanly() {
    let mut game = GameState::new(GameDef::canonical(2));
    undo_stress_at_depth(&mut game, 3);
}
