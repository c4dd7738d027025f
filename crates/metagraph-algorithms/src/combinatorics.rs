//! Shared subset enumeration used by metapath search and cutset search.

use itertools::Itertools;

/// Every non-empty subset of `items`, smallest first, as the original
/// implementation's brute-force search over edge power sets requires.
pub(crate) fn non_empty_subsets<T: Clone>(items: &[T]) -> impl Iterator<Item = Vec<T>> + '_ {
    (1..=items.len()).flat_map(move |k| items.iter().cloned().combinations(k))
}

/// Every non-empty, proper subset of `items` — i.e. every subset but the
/// empty one and the whole set — used by metagraph-level dominance to range
/// over "non-trivial" `(S, T)` pairs.
pub(crate) fn non_trivial_subsets<T: Clone>(items: &[T]) -> impl Iterator<Item = Vec<T>> + '_ {
    let upper = items.len().saturating_sub(1);
    (1..=upper).flat_map(move |k| items.iter().cloned().combinations(k))
}
