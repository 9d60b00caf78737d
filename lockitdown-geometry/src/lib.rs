#![warn(clippy::missing_safety_doc)]
#![warn(clippy::must_use_candidate)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use lockitdown_types::{Direction, Hex};

/// A hex arena: everything within `radius` of the origin is interior
/// (playable board), the single ring at `radius + 1` is the corridor
/// robots are placed from, and nothing beyond that is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub radius: i32,
}

impl Arena {
    #[must_use]
    pub fn new(radius: i32) -> Self {
        Arena { radius }
    }

    #[must_use]
    pub fn corridor_distance(self) -> i32 {
        self.radius + 1
    }

    #[must_use]
    pub fn in_interior(self, hex: Hex) -> bool {
        hex.distance() <= self.radius
    }

    #[must_use]
    pub fn in_corridor(self, hex: Hex) -> bool {
        hex.distance() == self.corridor_distance()
    }

    #[must_use]
    pub fn in_playable(self, hex: Hex) -> bool {
        hex.distance() <= self.corridor_distance()
    }

    /// The corridor placements available for this arena: every corridor
    /// cell paired with every facing that points back into the playable
    /// board.
    #[must_use]
    pub fn edges(self) -> Arc<Vec<EdgePlacement>> {
        edges(self.corridor_distance())
    }
}

/// A corridor cell and a facing a newly-placed robot there could take,
/// such that the robot ends up pointed into the playable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePlacement {
    pub position: Hex,
    pub direction: Direction,
}

lazy_static! {
    static ref EDGE_CACHE: Mutex<HashMap<i32, Arc<Vec<EdgePlacement>>>> =
        Mutex::new(HashMap::new());
}

/// All corridor placements for a corridor at `ring_size` (the distance of
/// the corridor ring from the origin, i.e. `arena.radius + 1`), memoized
/// process-wide since a given arena radius is reused across every game and
/// every search node that shares it.
#[must_use]
pub fn edges(ring_size: i32) -> Arc<Vec<EdgePlacement>> {
    let mut cache = EDGE_CACHE.lock().unwrap();
    if let Some(cached) = cache.get(&ring_size) {
        return Arc::clone(cached);
    }

    let mut placements = Vec::with_capacity((3 * 6 + 6 * 4 * (ring_size - 1).max(0)) as usize);

    let mut cursor = Hex::new(0, -ring_size);
    for dir in Direction::ALL {
        for _ in 0..ring_size {
            cursor += dir.to_hex();
            for place_dir in Direction::ALL {
                let position = cursor + place_dir.to_hex();
                if position.distance() <= ring_size {
                    placements.push(EdgePlacement {
                        position: cursor,
                        direction: place_dir,
                    });
                }
            }
        }
    }

    placements.sort_by_key(|p| corner_key(p.position));

    let placements = Arc::new(placements);
    cache.insert(ring_size, Arc::clone(&placements));
    placements
}

fn corner_key(hex: Hex) -> i32 {
    hex.q.abs().min(hex.r.abs()).min(hex.s().abs())
}
