use std::cell::RefCell;

use crate::edge::Edge;
use crate::element::{Element, ElementSet};
use crate::error::{fail, MessageKey, MetagraphError, Result};
use crate::matrix::{AdjacencyMatrix, IncidenceMatrix};
use crate::node::Node;
use crate::setops::set_eq;

/// A metagraph: a generating set of elements, a set of nodes over that
/// generating set, and a set of edges connecting subsets of it.
///
/// The adjacency matrix (and its transitive closure) is derived data and is
/// cached lazily; any mutating method invalidates the cache.
#[derive(Debug)]
pub struct Metagraph<X: Element> {
    generating_set: ElementSet<X>,
    nodes: Vec<Node<X>>,
    edges: Vec<Edge<X>>,
    closure: RefCell<Option<AdjacencyMatrix<X>>>,
}

// ensure that all traits have been implemented
// see: https://rust-lang.github.io/api-guidelines/interoperability.html
// not Sync: the lazily-cached closure is a RefCell.
#[cfg(test)]
static_assertions::assert_impl_all!(Metagraph<i32>: std::fmt::Debug, Send);

impl<X: Element> Metagraph<X> {
    pub fn new(generating_set: ElementSet<X>) -> Result<Self> {
        if generating_set.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "generating_set",
                MessageKey::ValueNull,
            ));
        }
        Ok(Self {
            generating_set,
            nodes: Vec::new(),
            edges: Vec::new(),
            closure: RefCell::new(None),
        })
    }

    pub fn generating_set(&self) -> &ElementSet<X> {
        &self.generating_set
    }

    pub fn nodes(&self) -> &[Node<X>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<X>] {
        &self.edges
    }

    fn require_subset(&self, elements: &ElementSet<X>, argument: &str) -> Result<()> {
        if elements.iter().all(|x| self.generating_set.contains(x)) {
            Ok(())
        } else {
            fail(MetagraphError::range_violation(
                argument,
                MessageKey::NotInGeneratingSet,
            ))
        }
    }

    fn invalidate_closure(&self) {
        self.closure.borrow_mut().take();
    }

    pub fn add_node(&mut self, node: Node<X>) -> Result<()> {
        self.require_subset(node.elements(), "node")?;
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
            self.invalidate_closure();
        }
        Ok(())
    }

    pub fn add_nodes_from(&mut self, nodes: impl IntoIterator<Item = Node<X>>) -> Result<()> {
        for node in nodes {
            self.add_node(node)?;
        }
        Ok(())
    }

    pub fn remove_node(&mut self, node: &Node<X>) -> Result<()> {
        let Some(position) = self.nodes.iter().position(|n| n == node) else {
            return fail(MetagraphError::not_found("node", MessageKey::ValueNotFound));
        };
        self.nodes.remove(position);
        self.invalidate_closure();
        Ok(())
    }

    pub fn remove_nodes_from(&mut self, nodes: &[Node<X>]) -> Result<()> {
        for node in nodes {
            self.remove_node(node)?;
        }
        Ok(())
    }

    /// Adds `edge` and, as a side effect, the two nodes it implies —
    /// `Node(invertex)` and `Node(outvertex)` — if they aren't already
    /// present. This is how the node list stays "auto-maintained" (see
    /// `DATA MODEL`): nodes are never added directly from edges by a
    /// caller, only derived.
    pub fn add_edge(&mut self, edge: Edge<X>) -> Result<()> {
        self.require_subset(edge.invertex(), "edge.invertex")?;
        self.require_subset(edge.outvertex(), "edge.outvertex")?;
        let invertex_node = Node::new(edge.invertex().clone())?;
        let outvertex_node = Node::new(edge.outvertex().clone())?;
        if !self.nodes.contains(&invertex_node) {
            self.nodes.push(invertex_node);
        }
        if !self.nodes.contains(&outvertex_node) {
            self.nodes.push(outvertex_node);
        }
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
            self.invalidate_closure();
        }
        Ok(())
    }

    pub fn add_edges_from(&mut self, edges: impl IntoIterator<Item = Edge<X>>) -> Result<()> {
        for edge in edges {
            self.add_edge(edge)?;
        }
        Ok(())
    }

    pub fn remove_edge(&mut self, edge: &Edge<X>) -> Result<()> {
        let Some(position) = self.edges.iter().position(|e| e == edge) else {
            return fail(MetagraphError::not_found("edge", MessageKey::ValueNotFound));
        };
        self.edges.remove(position);
        self.invalidate_closure();
        Ok(())
    }

    pub fn remove_edges_from(&mut self, edges: &[Edge<X>]) -> Result<()> {
        for edge in edges {
            self.remove_edge(edge)?;
        }
        Ok(())
    }

    /// Every edge whose invertex contains `invertex_element` and whose
    /// outvertex contains `outvertex_element` — membership in the element
    /// sets, not equality of the whole vertex set, is what "between two
    /// elements" means here.
    pub fn get_edges(&self, invertex_element: &X, outvertex_element: &X) -> Vec<&Edge<X>> {
        self.edges
            .iter()
            .filter(|edge| {
                edge.has_invertex_element(invertex_element)
                    && edge.has_outvertex_element(outvertex_element)
            })
            .collect()
    }

    fn element_order(&self) -> Vec<X> {
        self.generating_set.iter().cloned().collect()
    }

    pub fn adjacency_matrix(&self) -> AdjacencyMatrix<X> {
        AdjacencyMatrix::from_edges(self.element_order(), &self.edges)
    }

    pub fn incidence_matrix(&self) -> IncidenceMatrix<X> {
        IncidenceMatrix::build(self.element_order(), self.edges.clone())
    }

    /// The cached transitive closure of the adjacency matrix, rebuilt the
    /// first time it's asked for after a mutation.
    pub fn closure(&self) -> AdjacencyMatrix<X> {
        if let Some(closure) = self.closure.borrow().as_ref() {
            return closure.clone();
        }
        let closure = self.adjacency_matrix().closure();
        *self.closure.borrow_mut() = Some(closure.clone());
        closure
    }

    /// Combines `self` with `other` into a metagraph over the union of
    /// their generating sets and the union of their edge sets.
    ///
    /// # Errors
    /// Returns [`MetagraphError::Inconsistency`] if the two generating sets
    /// do not overlap at all.
    pub fn add_metagraph(&self, other: &Self) -> Result<Self> {
        if self.generating_set.is_disjoint(&other.generating_set) {
            return fail(MetagraphError::inconsistency(
                "other.generating_set",
                MessageKey::NoOverlap,
            ));
        }
        let mut generating_set = self.generating_set.clone();
        generating_set.extend(other.generating_set.iter().cloned());

        let mut result = Self::new(generating_set)?;
        result.add_nodes_from(self.nodes.iter().cloned())?;
        result.add_nodes_from(other.nodes.iter().cloned())?;
        result.add_edges_from(self.edges.iter().cloned())?;
        result.add_edges_from(other.edges.iter().cloned())?;
        Ok(result)
    }

    /// Combines `self` with `other` through the triple algebra: builds the
    /// matrix product of their adjacency matrices and collects every edge
    /// that survives into at least one resulting cell.
    ///
    /// # Errors
    /// Returns [`MetagraphError::Inconsistency`] if the two metagraphs do
    /// not share an identical generating set.
    pub fn multiply_metagraph(&self, other: &Self) -> Result<Self> {
        if !set_eq(&self.generating_set, &other.generating_set) {
            return fail(MetagraphError::inconsistency(
                "other.generating_set",
                MessageKey::NotIdentical,
            ));
        }
        let product = self.adjacency_matrix().multiply(&other.adjacency_matrix());

        let mut result = Self::new(self.generating_set.clone())?;
        result.add_nodes_from(self.nodes.iter().cloned())?;
        result.add_nodes_from(other.nodes.iter().cloned())?;

        let n = product.dimension();
        for i in 0..n {
            for j in 0..n {
                for triple in product.cell(i, j) {
                    for edge in triple.edges() {
                        if !result.edges.contains(edge) {
                            result.edges.push(edge.clone());
                        }
                    }
                }
            }
        }
        result.invalidate_closure();
        Ok(result)
    }

    /// `true` iff `self` and `other` are identical as data: same generating
    /// set and same edge set. This is a much stronger condition than the
    /// metapath-based `equivalent` of the metagraph-level algorithms layer,
    /// which asks only whether the two metagraphs connect the same pairs —
    /// keep that distinction in mind before reaching for this method.
    pub fn same_structure_as(&self, other: &Self) -> bool {
        set_eq(&self.generating_set, &other.generating_set)
            && self.edges.len() == other.edges.len()
            && self.edges.iter().all(|edge| other.edges.contains(edge))
    }
}

impl<X: Element> Clone for Metagraph<X> {
    fn clone(&self) -> Self {
        Self {
            generating_set: self.generating_set.clone(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            closure: RefCell::new(self.closure.borrow().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::element::element_set;

    use super::*;

    fn seed_metagraph() -> Metagraph<i32> {
        let mut mg = Metagraph::new(element_set(1..=7)).unwrap();
        mg.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
        mg.add_edge(Edge::new(element_set([1, 4]), element_set([5])).unwrap()).unwrap();
        mg.add_edge(Edge::new(element_set([3]), element_set([6, 7])).unwrap()).unwrap();
        mg
    }

    #[test]
    fn seed_metagraph_has_three_edges_and_six_nodes() {
        let mg = seed_metagraph();
        assert_eq!(mg.edges().len(), 3);
        assert_eq!(mg.nodes().len(), 6);
    }

    #[test]
    fn adjacency_and_incidence_matrices_have_expected_dimensions() {
        let mg = seed_metagraph();
        assert_eq!(mg.adjacency_matrix().dimension(), 7);
        let incidence = mg.incidence_matrix();
        assert_eq!(incidence.elements().len(), 7);
        assert_eq!(incidence.edges().len(), 3);
        assert_eq!(mg.closure().dimension(), 7);
    }

    #[test]
    fn add_edge_auto_derives_nodes_and_add_node_is_idempotent() {
        let mut mg = Metagraph::new(element_set([1, 2])).unwrap();
        mg.add_edge(Edge::new(element_set([1]), element_set([2])).unwrap()).unwrap();
        assert_eq!(mg.nodes().len(), 2);
        mg.add_node(Node::new(element_set([1])).unwrap()).unwrap();
        assert_eq!(mg.nodes().len(), 2);
    }

    #[test]
    fn remove_node_not_found_is_an_error() {
        let mut mg = Metagraph::new(element_set([1, 2])).unwrap();
        assert!(mg.remove_node(&Node::new(element_set([1])).unwrap()).is_err());
    }

    #[test]
    fn get_edges_uses_element_membership_not_full_vertex_equality() {
        let mg = seed_metagraph();
        let found = mg.get_edges(&1, &3);
        assert_eq!(found.len(), 1);
        assert!(found[0].invertex().contains(&1) && found[0].outvertex().contains(&3));
    }

    #[test]
    fn add_metagraph_requires_overlapping_generating_sets() {
        let a = Metagraph::new(element_set([1, 2])).unwrap();
        let b = Metagraph::new(element_set([3, 4])).unwrap();
        assert!(a.add_metagraph(&b).is_err());
    }

    #[test]
    fn add_metagraph_unions_generating_sets_and_edges() {
        let mut a = Metagraph::new(element_set([1, 2])).unwrap();
        a.add_edge(Edge::new(element_set([1]), element_set([2])).unwrap()).unwrap();
        let mut b = Metagraph::new(element_set([2, 3])).unwrap();
        b.add_edge(Edge::new(element_set([2]), element_set([3])).unwrap()).unwrap();
        let combined = a.add_metagraph(&b).unwrap();
        assert_eq!(combined.generating_set().len(), 3);
        assert_eq!(combined.edges().len(), 2);
    }

    #[test]
    fn multiply_metagraph_requires_identical_generating_sets() {
        let a = Metagraph::new(element_set([1, 2])).unwrap();
        let b = Metagraph::new(element_set([1, 2, 3])).unwrap();
        assert!(a.multiply_metagraph(&b).is_err());
    }

    #[test]
    fn same_structure_as_is_stronger_than_structural_equivalence() {
        let a = seed_metagraph();
        let b = seed_metagraph();
        assert!(a.same_structure_as(&b));

        let mut c = Metagraph::new(element_set(1..=7)).unwrap();
        c.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
        assert!(!a.same_structure_as(&c));
    }
}
