use std::fmt::{Display, Formatter, Result as FmtResult};

/// An entry from the building piece list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub name: String,
    pub asset_id: String,
    pub token: String,
    /// English name; the token when the page leaves it blank
    pub localized_name: String,
    pub description: Option<String>,
    /// Build costs (e.g., "Wood: 2")
    pub resources: Vec<String>,
    /// Structural material (e.g., "Wood", "Stone")
    pub material: Option<String>,
    pub image_url: Option<String>,
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.localized_name, self.asset_id)?;
        if let Some(material) = &self.material {
            write!(f, " [{material}]")?;
        }
        if !self.resources.is_empty() {
            write!(f, ": {}", self.resources.join(", "))?;
        }
        Ok(())
    }
}
