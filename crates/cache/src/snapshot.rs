use std::sync::Arc;

use jotunn_extract::Records;
use jotunn_extract::models::{Character, Item, Piece, Prefab, Recipe};
use time::UtcDateTime;

/// Every extracted record collection at a point in time.
///
/// Snapshots are never mutated: a refresh round builds a new one (sharing
/// the collections it didn't replace with its predecessor) and swaps it in
/// whole. Readers holding an `Arc<Snapshot>` keep a consistent view for as
/// long as they like.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub(crate) items: Arc<[Item]>,
    pub(crate) recipes: Arc<[Recipe]>,
    pub(crate) prefabs: Arc<[Prefab]>,
    pub(crate) pieces: Arc<[Piece]>,
    pub(crate) characters: Arc<[Character]>,
    refreshed_at: Option<UtcDateTime>,
}

impl Snapshot {
    /// An empty snapshot; what the cache starts with.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn prefabs(&self) -> &[Prefab] {
        &self.prefabs
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// When the last round with at least one reachable source completed.
    pub fn refreshed_at(&self) -> Option<UtcDateTime> {
        self.refreshed_at
    }

    /// `true` once any of the core lists (items, recipes, prefabs) has records.
    pub fn has_data(&self) -> bool {
        !self.items.is_empty() || !self.recipes.is_empty() || !self.prefabs.is_empty()
    }
}

/// Starts from a previous snapshot and replaces collections one kind at a time.
#[derive(Debug)]
pub(crate) struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub(crate) fn from_previous(previous: &Snapshot) -> Self {
        Self { snapshot: previous.clone() }
    }

    pub(crate) fn replace(&mut self, records: Records) -> &mut Self {
        match records {
            Records::Items(items) => self.snapshot.items = items.into(),
            Records::Recipes(recipes) => self.snapshot.recipes = recipes.into(),
            Records::Prefabs(prefabs) => self.snapshot.prefabs = prefabs.into(),
            Records::Pieces(pieces) => self.snapshot.pieces = pieces.into(),
            Records::Characters(characters) => self.snapshot.characters = characters.into(),
        }
        self
    }

    pub(crate) fn refreshed_at(&mut self, at: UtcDateTime) -> &mut Self {
        self.snapshot.refreshed_at = Some(at);
        self
    }

    pub(crate) fn build(self) -> Snapshot {
        self.snapshot
    }
}
