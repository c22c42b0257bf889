//! Table-walking extraction for the documentation object lists.
//!
//! Every list page has the same shape: one table, one record per body row,
//! one field per cell. The walk is shared; each record kind only supplies
//! its minimum cell count and its column mapping through [`Record`].

mod records;
pub(crate) mod row;

pub use self::row::Row;
use crate::document::Document;
use crate::models::{Character, Item, Piece, Prefab, Recipe, RecordKind};
use tracing::instrument;
use url::Url;

/// A record kind that can be read from one table row.
pub trait Record: Sized {
    const KIND: RecordKind;
    /// Rows with fewer cells than this are skipped.
    const MIN_CELLS: usize;

    /// Maps a row (already known to have at least [`MIN_CELLS`](Self::MIN_CELLS)
    /// cells) to a record.
    fn from_row(row: &Row<'_>) -> Self;
}

#[derive(Debug)]
pub struct Extractor {
    document: Document,
}
impl Extractor {
    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn from_html(html: &str, base: Url) -> Self {
        Self::from_document(Document::from_html(html, base))
    }

    /// Extracts every well-formed row of the primary table as `R`, in
    /// document order. Short rows are dropped silently.
    #[instrument(level = "debug", skip(self), fields(kind = %R::KIND, base = %self.document.base()))]
    pub fn records<R: Record>(&self) -> Vec<R> {
        let Some(table) = self.document.primary_table() else {
            tracing::debug!("No table found in document");
            return Vec::new();
        };
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for tbody in row::children_named(table, "tbody") {
            for tr in row::children_named(tbody, "tr") {
                let row = Row::new(tr, &self.document);
                if row.len() < R::MIN_CELLS {
                    skipped += 1;
                    continue;
                }
                records.push(R::from_row(&row));
            }
        }
        tracing::debug!(extracted = records.len(), skipped, "Extracted records from table");
        records
    }

    /// Extracts the records for a kind chosen at runtime.
    pub fn extract(&self, kind: RecordKind) -> Records {
        match kind {
            RecordKind::Item => Records::Items(self.records()),
            RecordKind::Recipe => Records::Recipes(self.records()),
            RecordKind::Prefab => Records::Prefabs(self.records()),
            RecordKind::Piece => Records::Pieces(self.records()),
            RecordKind::Character => Records::Characters(self.records()),
        }
    }

    pub fn items(&self) -> Vec<Item> {
        self.records()
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.records()
    }

    pub fn prefabs(&self) -> Vec<Prefab> {
        self.records()
    }

    pub fn pieces(&self) -> Vec<Piece> {
        self.records()
    }

    pub fn characters(&self) -> Vec<Character> {
        self.records()
    }
}

/// The extracted contents of one list page, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Records {
    Items(Vec<Item>),
    Recipes(Vec<Recipe>),
    Prefabs(Vec<Prefab>),
    Pieces(Vec<Piece>),
    Characters(Vec<Character>),
}
impl Records {
    pub fn kind(&self) -> RecordKind {
        match self {
            Records::Items(_) => RecordKind::Item,
            Records::Recipes(_) => RecordKind::Recipe,
            Records::Prefabs(_) => RecordKind::Prefab,
            Records::Pieces(_) => RecordKind::Piece,
            Records::Characters(_) => RecordKind::Character,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Items(records) => records.len(),
            Records::Recipes(records) => records.len(),
            Records::Prefabs(records) => records.len(),
            Records::Pieces(records) => records.len(),
            Records::Characters(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "https://valheim-modding.github.io/Jotunn/data/objects/item-list.html";

    fn extractor(rows: &str) -> Extractor {
        let html = format!(
            "<html><body><h1>List</h1><table>\
             <thead><tr><th>Name</th><th>Id</th></tr></thead>\
             <tbody>{rows}</tbody></table></body></html>"
        );
        Extractor::from_html(&html, Url::parse(BASE).unwrap())
    }

    fn cells(values: &[&str]) -> String {
        let cells: String = values.iter().map(|value| format!("<td>{value}</td>")).collect();
        format!("<tr>{cells}</tr>")
    }

    #[test]
    fn test_items() {
        let rows = [
            cells(&["<img src='../../images/data/wood.png'>Wood", "Wood", "$item_wood", "Wood", "Material", "Fine&nbsp;timber"]),
            cells(&["Mystery", "Mystery", "$item_mystery", "", "Misc", ""]),
        ]
        .concat();
        let items = extractor(&rows).items();
        assert_eq!(
            items,
            vec![
                Item {
                    label: "Wood".to_string(),
                    asset_id: "Wood".to_string(),
                    token: "$item_wood".to_string(),
                    name: "Wood".to_string(),
                    item_type: "Material".to_string(),
                    description: "Fine timber".to_string(),
                    image_url: Some("https://valheim-modding.github.io/Jotunn/images/data/wood.png".to_string()),
                },
                Item {
                    label: "Mystery".to_string(),
                    asset_id: "Mystery".to_string(),
                    token: "$item_mystery".to_string(),
                    name: "$item_mystery".to_string(),
                    item_type: "Misc".to_string(),
                    description: String::new(),
                    image_url: None,
                },
            ]
        );
    }

    #[test]
    fn test_recipes() {
        let requirements = "<ul><li>Wood x2</li><li>Resin x1</li></ul>";
        let rows = [
            cells(&["Recipe_Torch", "Recipe_Torch", "Torch", "1", requirements]),
            cells(&["Recipe_Arrow", "Recipe_ArrowWood", "ArrowWood", "twenty", "<ul><li>Wood</li></ul>"]),
        ]
        .concat();
        let recipes = extractor(&rows).recipes();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].result, "Torch");
        assert_eq!(recipes[0].amount, 1);
        assert_eq!(recipes[0].requirements, "**Level 1:**\n• Wood x2\n• Resin x1");
        assert_eq!(recipes[1].amount, 1);
    }

    #[test]
    fn test_prefabs() {
        let rows = cells(&[
            "Beech1",
            "Beech1",
            "$prop_beech",
            "Beech",
            "<ul><li>ZNetView</li><li>TreeBase</li></ul>",
            "MeshRenderer\nLODGroup",
        ]);
        let prefabs = extractor(&rows).prefabs();
        assert_eq!(
            prefabs,
            vec![Prefab {
                name: "Beech1".to_string(),
                asset_id: "Beech1".to_string(),
                token: "$prop_beech".to_string(),
                localized_name: "Beech".to_string(),
                components: vec!["ZNetView".to_string(), "TreeBase".to_string()],
                children: vec!["MeshRenderer".to_string(), "LODGroup".to_string()],
            }]
        );
    }

    #[test]
    fn test_pieces() {
        let rows = cells(&[
            "<img src='/icons/wood_wall.png'>wood_wall",
            "wood_wall",
            "$piece_woodwall",
            "Wood wall",
            "",
            "<ul><li>Wood: 2</li></ul>",
            "Wood",
        ]);
        let pieces = extractor(&rows).pieces();
        assert_eq!(
            pieces,
            vec![Piece {
                name: "wood_wall".to_string(),
                asset_id: "wood_wall".to_string(),
                token: "$piece_woodwall".to_string(),
                localized_name: "Wood wall".to_string(),
                description: None,
                resources: vec!["Wood: 2".to_string()],
                material: Some("Wood".to_string()),
                image_url: Some("https://valheim-modding.github.io/icons/wood_wall.png".to_string()),
            }]
        );
    }

    #[test]
    fn test_characters() {
        let rows = cells(&[
            "Boar",
            "Boar",
            "<ul><li>Character</li><li>MonsterAI</li><li>Tameable</li></ul>",
            "<ul><li>Fire: Weak</li></ul>",
            "<ul><li>boar_base_attack</li></ul>",
            "<ul><li>RawMeat</li><li>LeatherScraps</li></ul>",
        ]);
        let characters = extractor(&rows).characters();
        assert_eq!(characters.len(), 1);
        let boar = &characters[0];
        assert_eq!(boar.components, vec!["Character", "MonsterAI", "Tameable"]);
        assert_eq!(boar.damage_modifiers, vec!["Fire: Weak"]);
        assert_eq!(boar.items, vec!["boar_base_attack"]);
        assert_eq!(boar.drops, vec!["RawMeat", "LeatherScraps"]);
        assert_eq!(boar.image_url, None);
    }

    #[rstest]
    #[case(RecordKind::Item, 6)]
    #[case(RecordKind::Recipe, 5)]
    #[case(RecordKind::Prefab, 6)]
    #[case(RecordKind::Piece, 7)]
    #[case(RecordKind::Character, 6)]
    fn test_short_rows_are_dropped(#[case] kind: RecordKind, #[case] min: usize) {
        let full: Vec<String> = (0..min).map(|i| format!("c{i}")).collect();
        let full: Vec<&str> = full.iter().map(String::as_str).collect();
        let baseline = extractor(&cells(&full)).extract(kind);
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline.kind(), kind);
        // Adding a short row never changes the output.
        let with_short = extractor(&[cells(&full), cells(&full[..min - 1])].concat()).extract(kind);
        assert_eq!(with_short, baseline);
    }

    #[test]
    fn test_header_rows_and_missing_tables() {
        // `th` cells don't count towards the minimum.
        let rows = "<tr><th>a</th><th>b</th><th>c</th><th>d</th><th>e</th><th>f</th></tr>";
        assert!(extractor(rows).items().is_empty());
        let extractor = Extractor::from_html("<p>No table here</p>", Url::parse(BASE).unwrap());
        assert!(extractor.extract(RecordKind::Prefab).is_empty());
    }
}
