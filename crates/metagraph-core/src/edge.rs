use std::fmt;

use crate::element::{Element, ElementSet};
use crate::error::{fail, MessageKey, MetagraphError, Result};
use crate::setops::set_eq;

/// A metagraph edge: a non-empty `invertex` set pointing at a non-empty
/// `outvertex` set, plus an optional label distinguishing parallel edges
/// between the same two vertex sets.
///
/// Attributes supplied at construction are folded into the invertex (an
/// attribute is treated as an additional input), matching the original
/// implementation's treatment of an edge's "attributes" as extra invertex
/// elements. The attribute set itself is also kept around separately so
/// later predicates can still tell which invertex elements were attributes.
#[derive(Debug, Clone)]
pub struct Edge<X: Element> {
    invertex: ElementSet<X>,
    outvertex: ElementSet<X>,
    attributes: Option<ElementSet<X>>,
    label: Option<String>,
}

// ensure that all traits have been implemented
// see: https://rust-lang.github.io/api-guidelines/interoperability.html
#[cfg(test)]
static_assertions::assert_impl_all!(Edge<i32>: std::fmt::Debug, Clone, PartialEq, Eq, Send, Sync);

impl<X: Element> Edge<X> {
    /// Builds an edge from a non-empty invertex and a non-empty outvertex.
    ///
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if either set is empty.
    pub fn new(invertex: ElementSet<X>, outvertex: ElementSet<X>) -> Result<Self> {
        Self::with_label(invertex, outvertex, None)
    }

    /// Like [`Edge::new`], but distinguishes this edge from parallel edges
    /// sharing the same invertex/outvertex by `label`.
    pub fn with_label(
        invertex: ElementSet<X>,
        outvertex: ElementSet<X>,
        label: Option<String>,
    ) -> Result<Self> {
        if invertex.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "invertex",
                MessageKey::ValueNull,
            ));
        }
        if outvertex.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "outvertex",
                MessageKey::ValueNull,
            ));
        }
        Ok(Self {
            invertex,
            outvertex,
            attributes: None,
            label,
        })
    }

    /// Folds `attributes` into the invertex, the way the original
    /// implementation treats an edge's attribute set, while keeping the
    /// attribute set itself accessible via [`Edge::attributes`].
    pub fn with_attributes(
        mut invertex: ElementSet<X>,
        attributes: ElementSet<X>,
        outvertex: ElementSet<X>,
    ) -> Result<Self> {
        for attribute in &attributes {
            invertex.insert(attribute.clone());
        }
        let mut edge = Self::new(invertex, outvertex)?;
        if !attributes.is_empty() {
            edge.attributes = Some(attributes);
        }
        Ok(edge)
    }

    pub fn invertex(&self) -> &ElementSet<X> {
        &self.invertex
    }

    pub fn outvertex(&self) -> &ElementSet<X> {
        &self.outvertex
    }

    pub fn attributes(&self) -> Option<&ElementSet<X>> {
        self.attributes.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// `true` iff `element` appears in either the invertex or the outvertex.
    pub fn contains_element(&self, element: &X) -> bool {
        self.invertex.contains(element) || self.outvertex.contains(element)
    }

    /// `true` iff `element` appears in the invertex.
    pub fn has_invertex_element(&self, element: &X) -> bool {
        self.invertex.contains(element)
    }

    /// `true` iff `element` appears in the outvertex.
    pub fn has_outvertex_element(&self, element: &X) -> bool {
        self.outvertex.contains(element)
    }
}

impl<X: Element> PartialEq for Edge<X> {
    fn eq(&self, other: &Self) -> bool {
        if self.label != other.label || !set_eq(&self.invertex, &other.invertex) || !set_eq(&self.outvertex, &other.outvertex) {
            return false;
        }
        if self.attributes.is_none() && other.attributes.is_none() {
            return true;
        }
        let empty = ElementSet::default();
        let mine = self.attributes.as_ref().unwrap_or(&empty);
        let theirs = other.attributes.as_ref().unwrap_or(&empty);
        set_eq(mine, theirs)
    }
}

impl<X: Element> Eq for Edge<X> {}

impl<X: Element> fmt::Display for Edge<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({{")?;
        for (i, element) in self.invertex.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element:?}")?;
        }
        write!(f, "}}, {{")?;
        for (i, element) in self.outvertex.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element:?}")?;
        }
        write!(f, "}})")?;
        if let Some(label) = &self.label {
            write!(f, " [{label}]")?;
        }
        Ok(())
    }
}

/// Linear containment check for edges, mirroring the original
/// `is_edge_in_list`: edges compare by set equality, not hash, so a list
/// scan is how membership is tested rather than a hashed collection.
pub fn edge_in_list<X: Element>(edges: &[Edge<X>], edge: &Edge<X>) -> bool {
    edges.iter().any(|candidate| candidate == edge)
}
