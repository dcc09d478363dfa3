use crate::assignment::constraint::within_capacity;
use crate::assignment::index::AssignmentIndex;
use crate::core::model::{Restaurant, Waiter};
use rustc_hash::FxHashSet;

/// Every known waiter other than `rejected` who could still take a table in `restaurant`.
/// May be empty.
pub fn suggest_waiters<'a>(
    waiters: impl IntoIterator<Item = &'a Waiter>,
    rejected: &Waiter,
    restaurant: &Restaurant,
    index: &AssignmentIndex,
    capacity: usize,
) -> FxHashSet<Waiter> {
    waiters
        .into_iter()
        .filter(|w| !w.same_instance(rejected))
        .filter(|w| within_capacity(index.tables_of(w), restaurant, capacity))
        .cloned()
        .collect()
}
