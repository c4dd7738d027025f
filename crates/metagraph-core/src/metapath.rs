use std::fmt;

use crate::edge::{edge_in_list, Edge};
use crate::element::{Element, ElementSet};
use crate::error::{fail, MessageKey, MetagraphError, Result};
use crate::setops::set_eq;

/// A metapath: a non-empty sequence of edges connecting a `source` element
/// set to a `target` element set, as produced by metapath search rather
/// than constructed directly by a caller in most cases.
#[derive(Debug, Clone)]
pub struct Metapath<X: Element> {
    source: ElementSet<X>,
    target: ElementSet<X>,
    edges: Vec<Edge<X>>,
}

impl<X: Element> Metapath<X> {
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if `source`, `target`, or
    /// `edges` is empty.
    pub fn new(source: ElementSet<X>, target: ElementSet<X>, edges: Vec<Edge<X>>) -> Result<Self> {
        if source.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "source",
                MessageKey::ValueNull,
            ));
        }
        if target.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "target",
                MessageKey::ValueNull,
            ));
        }
        if edges.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "edges",
                MessageKey::ValueNull,
            ));
        }
        Ok(Self {
            source,
            target,
            edges,
        })
    }

    pub fn source(&self) -> &ElementSet<X> {
        &self.source
    }

    pub fn target(&self) -> &ElementSet<X> {
        &self.target
    }

    pub fn edges(&self) -> &[Edge<X>] {
        &self.edges
    }
}

impl<X: Element> PartialEq for Metapath<X> {
    fn eq(&self, other: &Self) -> bool {
        set_eq(&self.source, &other.source)
            && set_eq(&self.target, &other.target)
            && self.edges.len() == other.edges.len()
            && self.edges.iter().all(|edge| edge_in_list(&other.edges, edge))
    }
}

impl<X: Element> Eq for Metapath<X> {}

impl<X: Element> fmt::Display for Metapath<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metapath(source={{")?;
        for (i, element) in self.source.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element:?}")?;
        }
        write!(f, "}}, target={{")?;
        for (i, element) in self.target.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element:?}")?;
        }
        write!(f, "}}, edges=[")?;
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{edge}")?;
        }
        write!(f, "])")
    }
}
