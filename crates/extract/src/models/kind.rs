use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// The five object lists published by the documentation site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Item,
    Recipe,
    Prefab,
    Piece,
    Character,
}
impl RecordKind {
    /// Every kind, in refresh order.
    pub const ALL: [RecordKind; 5] = [Self::Item, Self::Recipe, Self::Prefab, Self::Piece, Self::Character];

    /// Returns the display string for the record kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Item => "item",
            RecordKind::Recipe => "recipe",
            RecordKind::Prefab => "prefab",
            RecordKind::Piece => "piece",
            RecordKind::Character => "character",
        }
    }
}
impl FromStr for RecordKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "item" | "items" => Self::Item,
            "recipe" | "recipes" => Self::Recipe,
            "prefab" | "prefabs" => Self::Prefab,
            "piece" | "pieces" => Self::Piece,
            "character" | "characters" | "creature" | "creatures" => Self::Character,
            _ => exn::bail!(ErrorKind::UnknownKind(s.to_string())),
        })
    }
}
impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
