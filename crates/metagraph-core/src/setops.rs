//! Set and multiset equality helpers shared by the value types whose
//! equality is defined structurally over sets rather than by identity.

use crate::element::{Element, ElementSet};

pub(crate) fn set_eq<X: Element>(a: &ElementSet<X>, b: &ElementSet<X>) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}

pub(crate) fn option_set_eq<X: Element>(a: &Option<ElementSet<X>>, b: &Option<ElementSet<X>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => set_eq(a, b),
        _ => false,
    }
}

/// `true` iff `a` and `b` contain the same elements the same number of
/// times, up to `eq`. Used for edge lists, where equality is "equal as
/// unordered multisets of edges under edge-equality" (see `Triple`).
pub(crate) fn multiset_eq_by<T>(a: &[T], b: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    for item_a in a {
        let Some(slot) = b
            .iter()
            .enumerate()
            .find(|(i, item_b)| !matched[*i] && eq(item_a, item_b))
            .map(|(i, _)| i)
        else {
            return false;
        };
        matched[slot] = true;
    }
    true
}

/// Returns the empty-set-as-`None` normalisation used throughout the triple
/// algebra: `Option<ElementSet<X>>` always means "absent" for `None`, never
/// for an empty set (see `DESIGN NOTES`: "do not use a sentinel empty set to
/// mean absent").
pub(crate) fn normalize<X: Element>(set: ElementSet<X>) -> Option<ElementSet<X>> {
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}
