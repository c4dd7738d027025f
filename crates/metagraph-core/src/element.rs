//! The element universe a metagraph is built over.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Anything usable as a metagraph element: opaque, hashable, and totally
/// comparable for equality.
///
/// Blanket-implemented for every type that already satisfies the bound —
/// metagraphs never require anything more from their generating-set elements
/// than this (see `DATA MODEL`: "opaque identity (hashable, total-equality)").
pub trait Element: Clone + Eq + Hash + Debug {}

impl<T> Element for T where T: Clone + Eq + Hash + Debug {}

/// A set of elements. `IndexSet` keeps insertion order, which is what fixes
/// the row/column order of every matrix built over a generating set.
pub type ElementSet<X> = IndexSet<X, FxBuildHasher>;

/// Builds an [`ElementSet`] from an iterator, the way `set(...)` does in the
/// original implementation.
pub fn element_set<X: Element>(iter: impl IntoIterator<Item = X>) -> ElementSet<X> {
    iter.into_iter().collect()
}
