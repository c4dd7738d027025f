use std::fmt;

use crate::edge::{edge_in_list, Edge};
use crate::element::{Element, ElementSet};
use crate::setops::{multiset_eq_by, normalize, option_set_eq};

/// A single adjacency-matrix cell value: the coinputs/cooutputs/edge-label
/// triple the original implementation's `Triple` class carries.
///
/// `coinputs` and `cooutputs` are `None` to mean "absent", never an empty
/// set (see `setops::normalize`) — an empty-but-present set and "no
/// coinputs at all" are different states in the algebra below.
#[derive(Debug, Clone)]
pub struct Triple<X: Element> {
    coinputs: Option<ElementSet<X>>,
    cooutputs: Option<ElementSet<X>>,
    edges: Vec<Edge<X>>,
}

// ensure that all traits have been implemented
// see: https://rust-lang.github.io/api-guidelines/interoperability.html
#[cfg(test)]
static_assertions::assert_impl_all!(Triple<i32>: std::fmt::Debug, Clone, PartialEq, Eq, Send, Sync);

impl<X: Element> Triple<X> {
    pub fn new(
        coinputs: Option<ElementSet<X>>,
        cooutputs: Option<ElementSet<X>>,
        edges: Vec<Edge<X>>,
    ) -> Self {
        Self {
            coinputs: coinputs.and_then(normalize),
            cooutputs: cooutputs.and_then(normalize),
            edges,
        }
    }

    /// A triple carrying a single edge and no coinputs/cooutputs, the value
    /// an adjacency matrix cell starts out as when built directly from an
    /// edge's incidence.
    pub fn from_edge(edge: Edge<X>) -> Self {
        Self {
            coinputs: None,
            cooutputs: None,
            edges: vec![edge],
        }
    }

    pub fn coinputs(&self) -> Option<&ElementSet<X>> {
        self.coinputs.as_ref()
    }

    pub fn cooutputs(&self) -> Option<&ElementSet<X>> {
        self.cooutputs.as_ref()
    }

    pub fn edges(&self) -> &[Edge<X>] {
        &self.edges
    }

    /// The triple composition rule: combines `self` (the `x_i -> x_j` leg)
    /// with `other` (the `x_j -> x_k` leg) through the shared intermediate
    /// element `x_j`, producing the `x_i -> x_k` triple.
    ///
    /// Ported branch-for-branch from the original `multiply_triples`: the
    /// coinput side only ever drops `x_i` (and, if present, `self`'s own
    /// cooutputs) from the union, while the cooutput side always ends up
    /// `Some`, since it unconditionally adds `x_k` and drops `x_j`.
    pub fn multiply(&self, other: &Self, x_i: &X, x_j: &X, x_k: &X) -> Self {
        let mut alpha = other.coinputs.clone();
        if other.coinputs.is_none() {
            alpha = self.coinputs.clone();
        } else if let Some(self_coinputs) = &self.coinputs {
            let mut union = other.coinputs.clone().unwrap();
            union.extend(self_coinputs.iter().cloned());
            alpha = Some(union);
        }
        alpha = alpha.map(|mut set| {
            set.shift_remove(x_i);
            if let Some(self_cooutputs) = &self.cooutputs {
                for element in self_cooutputs {
                    set.shift_remove(element);
                }
            }
            set
        });

        let mut beta = other.cooutputs.clone();
        if other.cooutputs.is_none() {
            beta = self.cooutputs.clone();
        } else if let Some(self_cooutputs) = &self.cooutputs {
            let mut union = other.cooutputs.clone().unwrap();
            union.extend(self_cooutputs.iter().cloned());
            beta = Some(union);
        }
        let mut beta = beta.unwrap_or_default();
        beta.insert(x_k.clone());
        beta.shift_remove(x_j);

        let mut edges = self.edges.clone();
        for edge in &other.edges {
            if !edge_in_list(&edges, edge) {
                edges.push(edge.clone());
            }
        }

        Self::new(alpha, Some(beta), edges)
    }
}

impl<X: Element> PartialEq for Triple<X> {
    fn eq(&self, other: &Self) -> bool {
        option_set_eq(&self.coinputs, &other.coinputs)
            && option_set_eq(&self.cooutputs, &other.cooutputs)
            && multiset_eq_by(&self.edges, &other.edges, |a, b| a == b)
    }
}

impl<X: Element> Eq for Triple<X> {}

impl<X: Element> fmt::Display for Triple<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triple(coinputs=")?;
        match &self.coinputs {
            Some(set) => write!(f, "{{{}}}", format_set(set))?,
            None => write!(f, "None")?,
        }
        write!(f, ", cooutputs=")?;
        match &self.cooutputs {
            Some(set) => write!(f, "{{{}}}", format_set(set))?,
            None => write!(f, "None")?,
        }
        write!(f, ", edges=[")?;
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{edge}")?;
        }
        write!(f, "])")
    }
}

fn format_set<X: Element>(set: &ElementSet<X>) -> String {
    set.iter()
        .map(|x| format!("{x:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `true` iff `haystack` already contains a triple equal to `triple`.
pub fn triple_in_list<X: Element>(haystack: &[Triple<X>], triple: &Triple<X>) -> bool {
    haystack.iter().any(|candidate| candidate == triple)
}

/// The adjacency-matrix "addition" of two matrix-cell triple sets: the
/// union of the two sets of triples, de-duplicated by triple equality.
pub fn union_triples<X: Element>(a: &[Triple<X>], b: &[Triple<X>]) -> Vec<Triple<X>> {
    let mut result = a.to_vec();
    for triple in b {
        if !triple_in_list(&result, triple) {
            result.push(triple.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::edge::Edge;
    use crate::element::element_set;

    use super::*;

    #[test]
    fn new_normalizes_empty_sets_to_none() {
        let edge = Edge::new(element_set([1]), element_set([2])).unwrap();
        let triple = Triple::new(Some(element_set([])), None, vec![edge]);
        assert!(triple.coinputs().is_none());
        assert!(triple.cooutputs().is_none());
    }

    #[test]
    fn union_triples_deduplicates_by_equality() {
        let edge = Edge::new(element_set([1]), element_set([2])).unwrap();
        let a = Triple::from_edge(edge.clone());
        let b = Triple::from_edge(edge);
        let unioned = union_triples(&[a], &[b]);
        assert_eq!(unioned.len(), 1);
    }

    #[test]
    fn multiply_unions_coinputs_and_always_produces_some_cooutputs() {
        let e1 = Edge::new(element_set([1]), element_set([2])).unwrap();
        let e2 = Edge::new(element_set([2]), element_set([3])).unwrap();
        let left = Triple::from_edge(e1);
        let right = Triple::from_edge(e2);
        let product = left.multiply(&right, &1, &3, &2);
        assert!(product.coinputs().is_none());
        assert_eq!(product.cooutputs().unwrap().len(), 1);
        assert_eq!(product.edges().len(), 2);
    }
}
