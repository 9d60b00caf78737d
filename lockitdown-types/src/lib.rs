#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::must_use_candidate)]

use std::{
    fmt::Display,
    ops::{Add, AddAssign, Index, IndexMut, Neg, Sub, SubAssign},
};

pub use num_enum::{IntoPrimitive, TryFromPrimitive, UnsafeFromPrimitive};
use serde::{Deserialize, Serialize};

/// Lets a `[T; $len]` be indexed directly by `Direction`, so a
/// per-direction table (beam costs, neighbor offsets, ...) reads as
/// `table[direction]` instead of `table[usize::from(direction)]`.
macro_rules! impl_direction_array_indexing {
    ($len:expr) => {
        impl From<Direction> for usize {
            fn from(value: Direction) -> usize {
                u8::from(value) as usize
            }
        }

        impl<T> Index<Direction> for [T; $len] {
            type Output = T;

            fn index(&self, index: Direction) -> &Self::Output {
                &self[usize::from(index)]
            }
        }

        impl<T> IndexMut<Direction> for [T; $len] {
            fn index_mut(&mut self, index: Direction) -> &mut Self::Output {
                &mut self[usize::from(index)]
            }
        }
    };
}

/// Axial hex coordinate. `s` (the third cube coordinate) is derived as
/// `-q - r` rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    #[must_use]
    pub fn new(q: i32, r: i32) -> Self {
        Hex { q, r }
    }

    #[must_use]
    pub fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Hex (grid) distance from the origin.
    #[must_use]
    pub fn distance(self) -> i32 {
        (self.q.abs() + self.r.abs() + self.s().abs()) / 2
    }

    /// Hex distance between two cells.
    #[must_use]
    pub fn distance_to(self, other: Hex) -> i32 {
        (self - other).distance()
    }

    #[must_use]
    pub fn neighbor(self, dir: Direction) -> Hex {
        self + dir.to_hex()
    }
}

impl Add for Hex {
    type Output = Hex;
    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl AddAssign for Hex {
    fn add_assign(&mut self, rhs: Hex) {
        *self = *self + rhs;
    }
}

impl Sub for Hex {
    type Output = Hex;
    fn sub(self, rhs: Hex) -> Hex {
        Hex::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl SubAssign for Hex {
    fn sub_assign(&mut self, rhs: Hex) {
        *self = *self - rhs;
    }
}

impl Neg for Hex {
    type Output = Hex;
    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

impl Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// One of the six cardinal directions a robot can face or move along.
///
/// Order is the cycle `E, SE, SW, W, NW, NE`: rotating a robot `Left` or
/// `Right` is a plain +1/-1 shift through this cycle, matching the hex
/// rotation identities (`rotate` negates and swaps two of the three cube
/// coordinates per 60 degree step).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    UnsafeFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    E = 0,
    SE = 1,
    SW = 2,
    W = 3,
    NW = 4,
    NE = 5,
}

impl_direction_array_indexing!(6);

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
        Direction::NE,
    ];

    #[must_use]
    pub fn to_hex(self) -> Hex {
        match self {
            Direction::E => Hex::new(1, 0),
            Direction::SE => Hex::new(0, 1),
            Direction::SW => Hex::new(-1, 1),
            Direction::W => Hex::new(-1, 0),
            Direction::NW => Hex::new(0, -1),
            Direction::NE => Hex::new(1, -1),
        }
    }

    #[must_use]
    pub fn rotate(self, side: Side) -> Direction {
        match side {
            Side::Left => self.rotate_left(),
            Side::Right => self.rotate_right(),
        }
    }

    #[must_use]
    pub fn rotate_left(self) -> Direction {
        let idx: u8 = self.into();
        // Safety: `(idx + 5) % 6` is always in 0..6, a valid discriminant.
        unsafe { Direction::unchecked_transmute_from((idx + 5) % 6) }
    }

    #[must_use]
    pub fn rotate_right(self) -> Direction {
        let idx: u8 = self.into();
        // Safety: `(idx + 1) % 6` is always in 0..6, a valid discriminant.
        unsafe { Direction::unchecked_transmute_from((idx + 1) % 6) }
    }
}

/// Which way a `TurnRobot` move rotates the acting robot's facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite rotation; applying it undoes this one.
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Index of a player within a game's player list. Zero-based internally;
/// the wire format adds one (see the engine crate's transport module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for PlayerId {
    fn from(value: usize) -> Self {
        PlayerId(value as u8)
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_distance_matches_cube_identity() {
        assert_eq!(Hex::new(0, 0).distance(), 0);
        assert_eq!(Hex::new(2, -1).distance(), 2);
        assert_eq!(Hex::new(3, 3).distance(), 6);
    }

    #[test]
    fn neighbors_are_unit_distance() {
        for dir in Direction::ALL {
            assert_eq!(Hex::ORIGIN.neighbor(dir).distance(), 1);
        }
    }

    #[test]
    fn rotation_cycles_through_all_six_directions() {
        let mut dir = Direction::E;
        for _ in 0..6 {
            dir = dir.rotate_right();
        }
        assert_eq!(dir, Direction::E);
    }

    #[test]
    fn rotate_left_and_right_are_inverses() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotate_left().rotate_right(), dir);
            assert_eq!(dir.rotate(Side::Left).rotate(Side::Right), dir);
        }
    }

    #[test]
    fn opposite_sides_undo_a_turn_move() {
        for dir in Direction::ALL {
            for side in [Side::Left, Side::Right] {
                assert_eq!(dir.rotate(side).rotate(side.opposite()), dir);
            }
        }
    }
}
