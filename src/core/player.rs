//! Sides and per-side storage.
//!
//! ## Player
//!
//! The game is strictly two-sided. Each side owns one `GameModel` holding
//! its own belief about the battlefield.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`, with `pair_mut` to borrow
//! one side and its opponent at the same time.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    /// Both sides, in turn order.
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// 0-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    /// Localisation key for this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Player::Player1 => "Player1",
            Player::Player2 => "Player2",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use ace_fighter::core::{Player, PlayerMap};
///
/// let mut pieces_left: PlayerMap<u32> = PlayerMap::with_value(4);
/// pieces_left[Player::Player2] -= 1;
///
/// let (mine, theirs) = pieces_left.pair_mut(Player::Player2);
/// assert_eq!((*mine, *theirs), (3, 4));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create with values from a factory function.
    pub fn new(mut factory: impl FnMut(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Player1), factory(Player::Player2)],
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Borrow `player`'s entry and its opponent's entry mutably.
    pub fn pair_mut(&mut self, player: Player) -> (&mut T, &mut T) {
        let (first, second) = self.data.split_at_mut(1);
        match player {
            Player::Player1 => (&mut first[0], &mut second[0]),
            Player::Player2 => (&mut second[0], &mut first[0]),
        }
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_basics() {
        assert_eq!(Player::Player1.opponent(), Player::Player2);
        assert_eq!(Player::Player2.opponent(), Player::Player1);
        assert_eq!(Player::Player2.index(), 1);
        assert_eq!(format!("{}", Player::Player1), "Player 1");
        assert_eq!(Player::Player2.as_str(), "Player2");
    }

    #[test]
    fn test_player_map_new() {
        let map = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[Player::Player1], 0);
        assert_eq!(map[Player::Player2], 10);
    }

    #[test]
    fn test_pair_mut() {
        let mut map = PlayerMap::new(|p| p.index());

        let (me, other) = map.pair_mut(Player::Player1);
        assert_eq!((*me, *other), (0, 1));
        *me = 7;

        let (me, other) = map.pair_mut(Player::Player2);
        assert_eq!((*me, *other), (1, 7));
    }

    #[test]
    fn test_player_map_iter() {
        let map = PlayerMap::with_value('a');
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Player::Player1, &'a'), (Player::Player2, &'a')]);
    }

    #[test]
    fn test_player_serialization() {
        let json = serde_json::to_string(&Player::Player2).unwrap();
        assert_eq!(json, r#""Player2""#);
        let map = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
