use crate::assignment::index::TableSet;
use crate::core::model::Restaurant;

/// Whether one more table in `restaurant` fits: the waiter's current tables there must number
/// strictly fewer than `capacity`. No tracked tables always fits.
pub fn within_capacity(
    tables: Option<&TableSet>,
    restaurant: &Restaurant,
    capacity: usize,
) -> bool {
    match tables {
        None => true,
        Some(tables) => {
            tables
                .iter()
                .filter(|t| t.restaurant() == restaurant)
                .count()
                < capacity
        }
    }
}
