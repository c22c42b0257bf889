use scraper::{ElementRef, Node};

use crate::consts;
use crate::document::Document;

/// One `tr` of a document's primary table, with its `td` cells.
///
/// Accessors never fail: an out-of-range cell reads as empty. Extractors
/// only see rows that already passed their minimum cell count.
#[derive(Debug)]
pub struct Row<'a> {
    element: ElementRef<'a>,
    cells: Vec<ElementRef<'a>>,
    document: &'a Document,
}

impl<'a> Row<'a> {
    pub(crate) fn new(element: ElementRef<'a>, document: &'a Document) -> Self {
        let cells = children_named(element, "td").collect();
        Self { element, cells, document }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Trimmed text of a cell, non-breaking spaces normalised.
    pub fn text(&self, index: usize) -> String {
        self.cells.get(index).map(|cell| clean(&cell.text().collect::<String>())).unwrap_or_default()
    }

    /// Like [`text`](Self::text), but blank cells read as `None`.
    pub fn optional_text(&self, index: usize) -> Option<String> {
        Some(self.text(index)).filter(|text| !text.is_empty())
    }

    /// List-valued cell: one entry per `li`, or one entry per non-empty line
    /// when the cell has no list markup.
    pub fn list(&self, index: usize) -> Vec<String> {
        let Some(cell) = self.cells.get(index) else {
            return Vec::new();
        };
        let items: Vec<String> = cell
            .select(&consts::LIST_ITEM_SELECTOR)
            .map(|li| collapse(&li.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();
        if !items.is_empty() {
            return items;
        }
        cell.text().collect::<String>().lines().map(clean).filter(|line| !line.is_empty()).collect()
    }

    /// Raw markup of a cell, for cells that need their own parse.
    pub fn inner_html(&self, index: usize) -> String {
        self.cells.get(index).map(|cell| cell.inner_html()).unwrap_or_default()
    }

    /// Absolute URL of the first image in the row.
    pub fn image_url(&self) -> Option<String> {
        self.element
            .select(&consts::IMAGE_SELECTOR)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| self.document.resolve(src))
    }
}

/// Child elements of `parent` with the given tag name (direct children only,
/// so tables nested inside a cell never leak rows or cells upwards).
pub(crate) fn children_named<'a>(parent: ElementRef<'a>, name: &'static str) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter(move |child| matches!(child.value(), Node::Element(element) if element.name() == name))
        .filter_map(ElementRef::wrap)
}

/// Trims text and replaces non-breaking spaces with regular spaces.
pub(crate) fn clean(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}

/// Like [`clean`], but also collapses internal whitespace runs (markup
/// indentation inside list items) into single spaces.
pub(crate) fn collapse(text: &str) -> String {
    text.replace('\u{a0}', " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn with_row<T>(cells: &str, f: impl FnOnce(&Row<'_>) -> T) -> T {
        let html = format!("<table><tbody><tr>{cells}</tr></tbody></table>");
        let document = Document::parse(&html, "https://example.org/data/list.html").unwrap();
        let table = document.primary_table().unwrap();
        let tbody = children_named(table, "tbody").next().unwrap();
        let tr = children_named(tbody, "tr").next().unwrap();
        f(&Row::new(tr, &document))
    }

    #[rstest]
    #[case("<td>  Wood  </td>", "Wood")]
    #[case("<td>Fine&nbsp;wood</td>", "Fine wood")]
    #[case("<td>&nbsp;</td>", "")]
    #[case("<td><b>Bronze</b> bar</td>", "Bronze bar")]
    fn test_text(#[case] cells: &str, #[case] expected: &str) {
        assert_eq!(with_row(cells, |row| row.text(0)), expected);
    }

    #[test]
    fn test_out_of_range_cells_are_empty() {
        with_row("<td>a</td>", |row| {
            assert_eq!(row.len(), 1);
            assert_eq!(row.text(5), "");
            assert_eq!(row.optional_text(5), None);
            assert!(row.list(5).is_empty());
            assert_eq!(row.inner_html(5), "");
        });
    }

    #[rstest]
    #[case("<td><ul><li>Humanoid</li><li> MonsterAI </li></ul></td>", vec!["Humanoid", "MonsterAI"])]
    #[case("<td><ul><li>Wood\n    x2</li><li></li></ul></td>", vec!["Wood x2"])]
    #[case("<td>Humanoid\nMonsterAI\n\n  Tameable  </td>", vec!["Humanoid", "MonsterAI", "Tameable"])]
    #[case("<td>   </td>", vec![])]
    fn test_list(#[case] cells: &str, #[case] expected: Vec<&str>) {
        assert_eq!(with_row(cells, |row| row.list(0)), expected);
    }

    #[rstest]
    #[case("<td><img src='../icons/wood.png'>Wood</td>", Some("https://example.org/icons/wood.png"))]
    #[case("<td>Wood</td><td><img src='https://cdn.example.net/w.png'></td>", Some("https://cdn.example.net/w.png"))]
    #[case("<td><img alt='no source'>Wood</td>", None)]
    #[case("<td><img src=''>Wood</td>", None)]
    #[case("<td>Wood</td>", None)]
    fn test_image_url(#[case] cells: &str, #[case] expected: Option<&str>) {
        assert_eq!(with_row(cells, |row| row.image_url()).as_deref(), expected);
    }

    #[test]
    fn test_nested_tables_do_not_add_cells() {
        let count = with_row("<td>a</td><td><table><tr><td>x</td><td>y</td></tr></table></td>", |row| row.len());
        assert_eq!(count, 2);
    }
}
