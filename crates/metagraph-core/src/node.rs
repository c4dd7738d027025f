use std::fmt;

use crate::element::{Element, ElementSet};
use crate::error::{fail, MessageKey, MetagraphError, Result};
use crate::setops::set_eq;

/// A metagraph node: a non-empty set of elements.
///
/// Node equality is set equality of the element set, not identity.
#[derive(Debug, Clone)]
pub struct Node<X: Element> {
    elements: ElementSet<X>,
}

impl<X: Element> Node<X> {
    /// Builds a node from a non-empty element set.
    ///
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if `elements` is empty.
    pub fn new(elements: ElementSet<X>) -> Result<Self> {
        if elements.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "elements",
                MessageKey::ValueNull,
            ));
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &ElementSet<X> {
        &self.elements
    }
}

impl<X: Element> PartialEq for Node<X> {
    fn eq(&self, other: &Self) -> bool {
        set_eq(&self.elements, &other.elements)
    }
}

impl<X: Element> Eq for Node<X> {}

impl<X: Element> fmt::Display for Node<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({{")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element:?}")?;
        }
        write!(f, "}})")
    }
}
