//! Structural algorithms over an unconditioned [`metagraph_core::Metagraph`]:
//! metapath enumeration and dominance, cut-sets, projection, the inverse
//! metagraph, and the element-flow metagraph.
//!
//! These are free functions rather than inherent methods, since Rust does
//! not allow adding inherent impls to a type defined in another crate.

mod combinatorics;
mod cuts;
mod dominance;
mod element_flow;
mod inverse;
mod metapaths;
mod projection;

pub use cuts::{get_minimal_cutset, is_bridge, is_cutset, is_redundant_edge, metagraph_without_edges};
pub use dominance::{dominates as metagraph_dominates, equivalent as metagraph_equivalent};
pub use element_flow::{format_label, get_efm, parse_label};
pub use inverse::{get_inverse, InverseElement};
pub use metapaths::{
    dominates, edges_contain, get_all_metapaths_from, is_dominant_metapath, is_edge_dominant_metapath,
    is_input_dominant_metapath, is_metapath, MetapathCap,
};
pub use projection::{get_projection, get_projection_capped, ProjectionCap};
