//! The core metagraph data model: elements, nodes, edges, the triple
//! algebra, and the adjacency/incidence matrices built over them.
//!
//! Higher-level algorithms (metapath search, cuts, projection, element
//! flow) live in `metagraph-algorithms`; the variables/propositions layer
//! lives in `metagraph-conditional`. This crate only knows about a single,
//! unconditioned metagraph.

mod edge;
mod element;
mod error;
mod matrix;
mod metagraph;
mod metapath;
mod node;
mod setops;
mod triple;

pub use edge::{edge_in_list, Edge};
pub use element::{element_set, Element, ElementSet};
pub use error::{fail, MessageKey, MetagraphError, Result};
pub use matrix::{custom_multiply, transpose_rows, AdjacencyMatrix, Cell, FlowWitness, Incidence, IncidenceMatrix};
pub use metagraph::Metagraph;
pub use metapath::Metapath;
pub use node::Node;
pub use triple::{triple_in_list, union_triples, Triple};
