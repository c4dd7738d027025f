//! `metagraph`: directed hypergraphs whose edges connect sets of elements
//! rather than single vertices, with reachability (metapaths), dominance,
//! cut-sets, projection, inverse, and element-flow algorithms defined over
//! them.
//!
//! The core data model — [`Edge`], [`Node`], [`Metagraph`], [`Metapath`],
//! the triple algebra, and the adjacency/incidence matrices — lives here at
//! the crate root, re-exported from `metagraph-core`. Structural algorithms
//! (metapath search, dominance, cuts, projection, inverse, element-flow)
//! are under [`algo`], re-exported from `metagraph-algorithms`. The
//! variables/propositions layer is under [`conditional`], re-exported from
//! `metagraph-conditional`. [`prelude`] gathers the commonly used subset of
//! all three in one glob import.
//!
//! ```
//! use metagraph::{element_set, Edge, Metagraph};
//!
//! let mut mg = Metagraph::new(element_set([1, 2, 3])).unwrap();
//! mg.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
//! assert_eq!(mg.edges().len(), 1);
//! ```

pub use metagraph_core::{
    custom_multiply, edge_in_list, element_set, fail, transpose_rows, triple_in_list, union_triples,
    AdjacencyMatrix, Cell, Edge, Element, ElementSet, FlowWitness, Incidence,
    IncidenceMatrix, MessageKey, Metagraph, MetagraphError, Metapath, Node, Result, Triple,
};

/// Structural algorithms over an unconditioned [`Metagraph`]: metapath
/// search and dominance, cut-sets, projection, the inverse metagraph, and
/// the element-flow metagraph.
pub use metagraph_algorithms as algo;

/// The variables/propositions layer: [`conditional::ConditionalMetagraph`]
/// and its context, connectivity, and redundancy predicates.
pub use metagraph_conditional as conditional;

/// Commonly used items, re-exported from the crate root and [`algo`].
///
/// ```
/// use metagraph::prelude::*;
/// ```
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{element_set, Edge, Element, ElementSet, Metagraph, MetagraphError, Metapath, Node, Result};
    #[doc(no_inline)]
    pub use crate::algo::{
        dominates, get_all_metapaths_from, get_projection, is_dominant_metapath, is_metapath, MetapathCap,
    };
}
