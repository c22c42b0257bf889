use std::fmt::{Display, Formatter, Result as FmtResult};

/// An entry from the character (creature) list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Character {
    pub name: String,
    pub asset_id: String,
    pub components: Vec<String>,
    /// Damage type resistances and weaknesses (e.g., "Fire: Weak")
    pub damage_modifiers: Vec<String>,
    /// Equipment the character spawns with
    pub items: Vec<String>,
    /// Loot dropped on death
    pub drops: Vec<String>,
    pub image_url: Option<String>,
}
impl Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.name, self.asset_id)?;
        if !self.drops.is_empty() {
            write!(f, " drops: {}", self.drops.join(", "))?;
        }
        Ok(())
    }
}
