use std::fmt::{Display, Formatter, Result as FmtResult};

/// An entry from the item list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    /// Label shown in the first column of the list
    pub label: String,
    /// Prefab/asset identifier (e.g., "Wood")
    pub asset_id: String,
    /// Localization token (e.g., "$item_wood")
    pub token: String,
    /// English name; the token when the page leaves it blank
    pub name: String,
    /// Item type (e.g., "Material", "OneHandedWeapon")
    pub item_type: String,
    pub description: String,
    /// Absolute URL of the item's icon
    pub image_url: Option<String>,
}
impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({}, {})", self.name, self.asset_id, self.item_type)?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}
