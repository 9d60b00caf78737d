use lockitdown_geometry::Arena;
use lockitdown_types::{Direction, Hex, PlayerId};
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::moves::Move;
use crate::resolver;

/// Static configuration for a game: arena size, player count, and the
/// rules every `GameState` built from it obeys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDef {
    pub arena_radius: i32,
    pub num_players: u8,
    pub moves_per_turn: u32,
    pub robots_per_player: u32,
    pub win_condition: WinCondition,
}

impl GameDef {
    /// The rules used for a standard game with `num_players` players.
    #[must_use]
    pub fn canonical(num_players: u8) -> Self {
        GameDef {
            arena_radius: 4,
            num_players,
            moves_per_turn: 3,
            robots_per_player: 6,
            win_condition: WinCondition::Elimination,
        }
    }

    #[must_use]
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCondition {
    Elimination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Player {
    pub points: i32,
    pub placed_robots: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub position: Hex,
    pub direction: Direction,
    pub is_beam_enabled: bool,
    pub is_locked_down: bool,
    pub player: PlayerId,
}

/// Outcome of a move that didn't fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    /// The beam resolution reached a cycle rather than a fixed point; an
    /// external tiebreak policy must pick a resolution.
    Tiebreak,
    GameOver { winner: PlayerId },
}

/// Full snapshot of everything a move can change, used to undo it. A
/// single resolved move can remove an unbounded number of robots, so a
/// diff isn't worth maintaining over just keeping a second copy around.
#[derive(Debug, Clone)]
struct SaveState {
    robots: Vec<Robot>,
    players: Vec<Player>,
    player_turn: PlayerId,
    moves_this_turn: u32,
    requires_tie_break: bool,
    winner: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub def: GameDef,
    pub arena: Arena,
    pub players: Vec<Player>,
    pub robots: Vec<Robot>,
    pub player_turn: PlayerId,
    pub moves_this_turn: u32,
    pub requires_tie_break: bool,
    pub winner: Option<PlayerId>,
    /// Position of the robot currently mid-`Turn`, if any. Excluded from
    /// the resolver's generic beam reset for the duration of the resolve
    /// it triggers, per the "active robot" rule: a robot can't have its
    /// freshly rotated beam help resolve its own move.
    pub(crate) active_hex: Option<Hex>,
    history: Vec<SaveState>,
}

impl GameState {
    #[must_use]
    pub fn new(def: GameDef) -> Self {
        let arena = def.arena();
        let players = vec![Player::default(); def.num_players as usize];
        GameState {
            moves_this_turn: def.moves_per_turn,
            arena,
            def,
            players,
            robots: Vec::new(),
            player_turn: PlayerId(0),
            requires_tie_break: false,
            winner: None,
            active_hex: None,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn robot_at(&self, hex: Hex) -> Option<&Robot> {
        self.robots.iter().find(|r| r.position == hex)
    }

    #[must_use]
    pub fn robot_at_mut(&mut self, hex: Hex) -> Option<&mut Robot> {
        self.robots.iter_mut().find(|r| r.position == hex)
    }

    #[must_use]
    pub fn robots_in_corridor(&self, player: PlayerId) -> usize {
        self.robots
            .iter()
            .filter(|r| r.player == player && self.arena.in_corridor(r.position))
            .count()
    }

    fn snapshot(&self) -> SaveState {
        SaveState {
            robots: self.robots.clone(),
            players: self.players.clone(),
            player_turn: self.player_turn,
            moves_this_turn: self.moves_this_turn,
            requires_tie_break: self.requires_tie_break,
            winner: self.winner,
        }
    }

    fn restore(&mut self, save: SaveState) {
        self.robots = save.robots;
        self.players = save.players;
        self.player_turn = save.player_turn;
        self.moves_this_turn = save.moves_this_turn;
        self.requires_tie_break = save.requires_tie_break;
        self.winner = save.winner;
    }

    /// Validates and applies `mv` on behalf of `player`, resolves the
    /// beam lattice, advances the turn if the player is out of moves, and
    /// checks for game end. On success the move is recorded on the undo
    /// stack so `undo_last` can unwind it.
    pub fn apply_move(&mut self, mv: Move, player: PlayerId) -> Result<MoveOutcome, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        if player != self.player_turn {
            return Err(GameError::WrongPlayer {
                expected: self.player_turn,
                got: player,
            });
        }

        let snapshot = self.snapshot();
        crate::moves::apply(self, mv, player)?;
        self.history.push(snapshot);

        let tiebreak = resolver::resolve(self);

        if let Some(hex) = self.active_hex.take() {
            if let Some(robot) = self.robot_at_mut(hex) {
                robot.is_beam_enabled = !robot.is_locked_down;
            }
        }

        if self.moves_this_turn == 0 {
            self.player_turn = PlayerId(((self.player_turn.index() + 1) % self.players.len()) as u8);
            self.moves_this_turn = self.def.moves_per_turn;
        }

        if tiebreak {
            return Ok(MoveOutcome::Tiebreak);
        }

        if let Some(winner) = self.check_winner() {
            self.winner = Some(winner);
            return Ok(MoveOutcome::GameOver { winner });
        }

        Ok(MoveOutcome::Continue)
    }

    /// Unwinds the most recent successful move. Panics if there is
    /// nothing to undo, matching the invariant that callers only undo
    /// moves they just made.
    pub fn undo_last(&mut self) {
        let save = self
            .history
            .pop()
            .expect("undo_last called with empty history");
        self.restore(save);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// A player is eliminated once their remaining robots to place plus
    /// their live robots on the board drop to 2 or fewer: with at most one
    /// spare and one on the board they can no longer mount a comeback.
    fn is_eliminated(&self, player: PlayerId) -> bool {
        let p = &self.players[player.index()];
        let on_board = self.robots.iter().filter(|r| r.player == player).count() as u32;
        let remaining_to_place = self.def.robots_per_player - p.placed_robots;
        remaining_to_place + on_board <= 2
    }

    /// Elimination win condition: if every player but one is eliminated,
    /// the survivor wins.
    fn check_winner(&self) -> Option<PlayerId> {
        if self.def.win_condition != WinCondition::Elimination {
            return None;
        }

        let mut survivor: Option<PlayerId> = None;
        for p in 0..self.players.len() {
            let pid = PlayerId(p as u8);
            if !self.is_eliminated(pid) {
                if survivor.is_some() {
                    return None;
                }
                survivor = Some(pid);
            }
        }
        survivor
    }
}
