use std::fmt::{Display, Formatter, Result as FmtResult};

/// An entry from the prefab list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefab {
    pub name: String,
    pub asset_id: String,
    pub token: String,
    /// English name; the token when the page leaves it blank
    pub localized_name: String,
    /// Unity components attached to the prefab root
    pub components: Vec<String>,
    /// Components found on child objects
    pub children: Vec<String>,
}
impl Display for Prefab {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.asset_id)?;
        if !self.components.is_empty() {
            write!(f, " [{}]", self.components.join(", "))?;
        }
        Ok(())
    }
}
