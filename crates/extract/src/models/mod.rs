mod character;
mod item;
mod kind;
mod piece;
mod prefab;
mod recipe;

pub use self::character::Character;
pub use self::item::Item;
pub use self::kind::RecordKind;
pub use self::piece::Piece;
pub use self::prefab::Prefab;
pub use self::recipe::Recipe;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('/', "").replace('-', "").replace('_', "").replace(' ', "")
}
