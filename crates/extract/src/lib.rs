mod consts;
mod document;
pub mod error;
mod extract;
pub mod models;
mod requirements;

use tracing::instrument;

pub use crate::document::Document;
use crate::error::Result;
pub use crate::extract::{Extractor, Record, Records, Row};
use crate::models::RecordKind;
pub use crate::requirements::{LevelGroup, Requirements, normalize_requirements};

/// Easy, top-level entrypoint for the extraction of one object list page.
///
/// Parses `html` as served from `base` (used to resolve relative image
/// links) and extracts the records of the given kind from its table.
///
/// # Examples
///
/// ```rust
/// use jotunn_extract::{Records, extract};
/// use jotunn_extract::models::RecordKind;
///
/// let html = r#"
///     <table><tbody>
///         <tr><td>Recipe_Torch</td><td>Recipe_Torch</td><td>Torch</td><td>1</td>
///             <td><ul><li>Wood x1</li><li>Resin x1</li></ul></td></tr>
///     </tbody></table>
/// "#;
/// let records = extract(RecordKind::Recipe, html, "https://example.org/recipes.html").unwrap();
/// let Records::Recipes(recipes) = records else { unreachable!() };
/// assert_eq!(recipes[0].requirements, "**Level 1:**\n• Wood x1\n• Resin x1");
/// ```
#[instrument(skip(html), fields(html_size = html.len()))]
pub fn extract(kind: RecordKind, html: &str, base: &str) -> Result<Records> {
    let document = Document::parse(html, base)?;
    Ok(Extractor::from_document(document).extract(kind))
}
