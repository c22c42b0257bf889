use std::collections::HashSet;

use crate::query::{Needle, clamp};
use crate::snapshot::Snapshot;

/// Suggestions returned when the caller does not ask for a specific amount.
pub const DEFAULT_SUGGESTIONS: usize = 25;

/// Ranks `pool` for autocompletion of `query`.
///
/// The pool is deduplicated case-insensitively (first spelling wins) and
/// blank candidates are dropped. Only candidates containing the query
/// survive; they are ordered prefix matches first, then by where the query
/// first occurs, then case-insensitively by the candidate itself. An empty
/// query therefore returns the whole pool sorted alphabetically.
///
/// ```
/// use jotunn_cache::rank;
///
/// assert_eq!(rank(["Bronze", "Iron", "Root"], "ro", 5), ["Root", "Bronze", "Iron"]);
/// assert_eq!(rank(["Bronze", "bronze", "Wood"], "", 5), ["Bronze", "Wood"]);
/// ```
pub fn rank<'a>(pool: impl IntoIterator<Item = &'a str>, query: &str, max: usize) -> Vec<String> {
    let needle = Needle::new(query);
    let mut seen = HashSet::new();
    let mut ranked: Vec<(usize, String, &str)> = pool
        .into_iter()
        .filter(|candidate| !candidate.trim().is_empty())
        .filter_map(|candidate| {
            let lower = candidate.to_lowercase();
            if !seen.insert(lower.clone()) {
                return None;
            }
            let index = lower.find(needle.as_str())?;
            Some((index, lower, candidate))
        })
        .collect();
    ranked.sort_by(|(a_index, a_lower, a), (b_index, b_lower, b)| {
        (*a_index > 0, a_index, a_lower, a).cmp(&(*b_index > 0, b_index, b_lower, b))
    });
    ranked.into_iter().take(clamp(max)).map(|(_, _, candidate)| candidate.to_string()).collect()
}

impl Snapshot {
    pub fn suggest_items(&self, query: &str, max: usize) -> Vec<String> {
        rank(self.items.iter().map(|item| item.name.as_str()), query, max)
    }

    pub fn suggest_prefabs(&self, query: &str, max: usize) -> Vec<String> {
        rank(self.prefabs.iter().map(|prefab| prefab.name.as_str()), query, max)
    }

    pub fn suggest_pieces(&self, query: &str, max: usize) -> Vec<String> {
        rank(self.pieces.iter().map(|piece| piece.name.as_str()), query, max)
    }

    pub fn suggest_characters(&self, query: &str, max: usize) -> Vec<String> {
        rank(self.characters.iter().map(|character| character.name.as_str()), query, max)
    }

    pub fn suggest_recipe_results(&self, query: &str, max: usize) -> Vec<String> {
        rank(self.recipes.iter().map(|recipe| recipe.result.as_str()), query, max)
    }

    /// Suggests requirement lines (`Wood x5`) across every recipe. Every
    /// non-empty rendered line is a candidate, level headers included.
    pub fn suggest_recipe_ingredients(&self, query: &str, max: usize) -> Vec<String> {
        let pool = self
            .recipes
            .iter()
            .flat_map(|recipe| recipe.requirements.lines())
            .map(|line| {
                let line = line.trim();
                line.strip_prefix("• ").unwrap_or(line).trim()
            })
            .filter(|line| !line.is_empty());
        rank(pool, query, max)
    }
}
