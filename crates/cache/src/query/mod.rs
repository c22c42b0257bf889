//! Case-insensitive lookups over a [`Snapshot`].
//!
//! Searches return records in snapshot order, at most [`MAX_RESULTS`] of
//! them; suggestions return ranked display strings for autocompletion.

mod suggest;

use jotunn_extract::models::{Character, Item, Piece, Prefab, Recipe};

use crate::snapshot::Snapshot;
pub use crate::query::suggest::{DEFAULT_SUGGESTIONS, rank};

/// Upper bound for any `limit` or `max` argument.
pub const MAX_RESULTS: usize = 50;

/// Clamps a caller-supplied limit to `1..=MAX_RESULTS`.
pub fn clamp(limit: usize) -> usize {
    limit.clamp(1, MAX_RESULTS)
}

/// A trimmed, lowercased query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Needle(String);
impl Needle {
    pub(crate) fn new(query: &str) -> Self {
        Self(query.trim().to_lowercase())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn matches(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.0)
    }

    fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        fields.into_iter().any(|field| self.matches(field))
    }
}

fn search<'a, T>(records: &'a [T], query: &str, limit: usize, fields: impl Fn(&Needle, &T) -> bool) -> Vec<&'a T> {
    let needle = Needle::new(query);
    records.iter().filter(|record| fields(&needle, record)).take(clamp(limit)).collect()
}

impl Snapshot {
    /// Items whose name, label, token, asset id or type contains `query`.
    pub fn find_items(&self, query: &str, limit: usize) -> Vec<&Item> {
        search(&self.items, query, limit, |needle, item: &Item| {
            needle.matches_any([
                item.name.as_str(),
                item.label.as_str(),
                item.token.as_str(),
                item.asset_id.as_str(),
                item.item_type.as_str(),
            ])
        })
    }

    /// Recipes producing something whose name contains `query`.
    pub fn find_recipes_for(&self, query: &str, limit: usize) -> Vec<&Recipe> {
        search(&self.recipes, query, limit, |needle, recipe: &Recipe| needle.matches(&recipe.result))
    }

    /// Recipes whose normalized requirements mention `query`.
    pub fn find_recipes_by_ingredient(&self, query: &str, limit: usize) -> Vec<&Recipe> {
        search(&self.recipes, query, limit, |needle, recipe: &Recipe| needle.matches(&recipe.requirements))
    }

    pub fn find_prefabs(&self, query: &str, limit: usize) -> Vec<&Prefab> {
        search(&self.prefabs, query, limit, |needle, prefab: &Prefab| {
            needle.matches_any([
                prefab.name.as_str(),
                prefab.asset_id.as_str(),
                prefab.token.as_str(),
                prefab.localized_name.as_str(),
            ])
        })
    }

    pub fn find_pieces(&self, query: &str, limit: usize) -> Vec<&Piece> {
        search(&self.pieces, query, limit, |needle, piece: &Piece| {
            needle.matches_any([
                piece.name.as_str(),
                piece.asset_id.as_str(),
                piece.token.as_str(),
                piece.localized_name.as_str(),
            ]) || piece.material.as_deref().is_some_and(|material| needle.matches(material))
        })
    }

    /// Characters whose name or asset id, or any of whose components, contain `query`.
    pub fn find_characters(&self, query: &str, limit: usize) -> Vec<&Character> {
        search(&self.characters, query, limit, |needle, character: &Character| {
            needle.matches_any([character.name.as_str(), character.asset_id.as_str()])
                || needle.matches_any(character.components.iter().map(String::as_str))
        })
    }
}
