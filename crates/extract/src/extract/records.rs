//! Column mappings for each object list.

use super::{Record, Row};
use crate::models::{Character, Item, Piece, Prefab, Recipe, RecordKind};
use crate::requirements::Requirements;

/// Blank localized names fall back to the localization token.
fn localized_or_token(localized: String, token: &str) -> String {
    if localized.is_empty() { token.to_string() } else { localized }
}

/// Parses a result amount; anything unparsable or zero counts as one.
fn amount(text: &str) -> u32 {
    text.trim().parse::<u32>().ok().filter(|amount| *amount > 0).unwrap_or(1)
}

impl Record for Item {
    const KIND: RecordKind = RecordKind::Item;
    const MIN_CELLS: usize = 6;

    fn from_row(row: &Row<'_>) -> Self {
        let token = row.text(2);
        Self {
            label: row.text(0),
            asset_id: row.text(1),
            name: localized_or_token(row.text(3), &token),
            token,
            item_type: row.text(4),
            description: row.text(5),
            image_url: row.image_url(),
        }
    }
}

impl Record for Recipe {
    const KIND: RecordKind = RecordKind::Recipe;
    const MIN_CELLS: usize = 5;

    fn from_row(row: &Row<'_>) -> Self {
        Self {
            name: row.text(0),
            asset_id: row.text(1),
            result: row.text(2),
            amount: amount(&row.text(3)),
            requirements: Requirements::parse(&row.inner_html(4)).to_string(),
        }
    }
}

impl Record for Prefab {
    const KIND: RecordKind = RecordKind::Prefab;
    const MIN_CELLS: usize = 6;

    fn from_row(row: &Row<'_>) -> Self {
        let token = row.text(2);
        Self {
            name: row.text(0),
            asset_id: row.text(1),
            localized_name: localized_or_token(row.text(3), &token),
            token,
            components: row.list(4),
            children: row.list(5),
        }
    }
}

impl Record for Piece {
    const KIND: RecordKind = RecordKind::Piece;
    const MIN_CELLS: usize = 7;

    fn from_row(row: &Row<'_>) -> Self {
        let token = row.text(2);
        Self {
            name: row.text(0),
            asset_id: row.text(1),
            localized_name: localized_or_token(row.text(3), &token),
            token,
            description: row.optional_text(4),
            resources: row.list(5),
            material: row.optional_text(6),
            image_url: row.image_url(),
        }
    }
}

impl Record for Character {
    const KIND: RecordKind = RecordKind::Character;
    const MIN_CELLS: usize = 6;

    fn from_row(row: &Row<'_>) -> Self {
        Self {
            name: row.text(0),
            asset_id: row.text(1),
            components: row.list(2),
            damage_modifiers: row.list(3),
            items: row.list(4),
            drops: row.list(5),
            image_url: row.image_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", 3)]
    #[case(" 20 ", 20)]
    #[case("0", 1)]
    #[case("", 1)]
    #[case("x2", 1)]
    #[case("-4", 1)]
    fn test_amount(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(amount(input), expected);
    }

    #[rstest]
    #[case("Wood", "$item_wood", "Wood")]
    #[case("", "$item_wood", "$item_wood")]
    fn test_localized_or_token(#[case] localized: &str, #[case] token: &str, #[case] expected: &str) {
        assert_eq!(localized_or_token(localized.to_string(), token), expected);
    }
}
