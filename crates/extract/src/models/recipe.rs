use std::fmt::{Display, Formatter, Result as FmtResult};

/// An entry from the recipe list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
    /// Recipe name (e.g., "Recipe_Club")
    pub name: String,
    pub asset_id: String,
    /// Name of the crafted item
    pub result: String,
    /// How many of the result one craft produces, never zero
    pub amount: u32,
    /// Rendered requirement summary, see [`Requirements`](crate::Requirements)
    pub requirements: String,
}
impl Display for Recipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{} x{} ({})", self.result, self.amount, self.name)?;
        write!(f, "{}", self.requirements)
    }
}
