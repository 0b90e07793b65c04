//! Structured game log.
//!
//! Entries carry a localisation key and flat named parameters, never
//! formatted text; turning them into sentences is the view's job.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::{Direction, Player, Position};
use crate::pieces::PieceType;

/// Kind of journal entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LogKind {
    Deploy,
    GameStart,
    Move,
    Fire,
    StandBy,
    ShotDown,
    State,
    Lose,
}

impl LogKind {
    /// Localisation key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogKind::Deploy => "deploy",
            LogKind::GameStart => "gameStart",
            LogKind::Move => "move",
            LogKind::Fire => "fire",
            LogKind::StandBy => "standby",
            LogKind::ShotDown => "shotDown",
            LogKind::State => "state",
            LogKind::Lose => "lose",
        }
    }
}

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Int(i32),
    Text(String),
    Player(Player),
    Piece(PieceType),
    Direction(Direction),
}

impl From<i32> for LogValue {
    fn from(v: i32) -> Self {
        LogValue::Int(v)
    }
}

impl From<String> for LogValue {
    fn from(v: String) -> Self {
        LogValue::Text(v)
    }
}

impl From<&str> for LogValue {
    fn from(v: &str) -> Self {
        LogValue::Text(v.to_owned())
    }
}

impl From<Player> for LogValue {
    fn from(v: Player) -> Self {
        LogValue::Player(v)
    }
}

impl From<PieceType> for LogValue {
    fn from(v: PieceType) -> Self {
        LogValue::Piece(v)
    }
}

impl From<Direction> for LogValue {
    fn from(v: Direction) -> Self {
        LogValue::Direction(v)
    }
}

impl std::fmt::Display for LogValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogValue::Int(v) => write!(f, "{v}"),
            LogValue::Text(v) => f.write_str(v),
            LogValue::Player(v) => f.write_str(v.as_str()),
            LogValue::Piece(v) => f.write_str(v.as_str()),
            LogValue::Direction(v) => write!(f, "{v:?}"),
        }
    }
}

pub type LogParams = FxHashMap<&'static str, LogValue>;

/// One journal line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub params: LogParams,
}

impl LogEntry {
    #[must_use]
    pub fn new(kind: LogKind) -> Self {
        Self {
            kind,
            params: FxHashMap::default(),
        }
    }

    /// Add a named parameter.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<LogValue>) -> Self {
        self.params.insert(name, value.into());
        self
    }

    /// Add the coordinates of `p` under the two given names.
    #[must_use]
    pub fn with_position(self, x: &'static str, y: &'static str, p: Position) -> Self {
        self.with(x, p.x).with(y, p.y)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LogValue> {
        self.params.get(name)
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.as_str())?;
        let mut names: Vec<_> = self.params.keys().copied().collect();
        names.sort_unstable();
        for name in names {
            write!(f, " {name}={}", self.params[name])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display_is_sorted() {
        let entry = LogEntry::new(LogKind::ShotDown)
            .with_position("x", "y", Position::new(3, 4))
            .with("piece", PieceType::Aew);
        assert_eq!(entry.to_string(), "shotDown piece=AEW x=3 y=4");
    }

    #[test]
    fn test_entry_json() {
        let entry = LogEntry::new(LogKind::Deploy).with("player", Player::Player2);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "Deploy");
        assert_eq!(json["params"]["player"], "Player2");
    }
}
