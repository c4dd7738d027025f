//! Property tests over the data model's structural invariants: matrix
//! dimensions and the closure fixed-point bound.

use metagraph_core::{element_set, Edge, Metagraph};
use proptest::collection::vec;
use proptest::prelude::*;

/// A small metagraph over `{0..n}` built from a list of `(invertex,
/// outvertex)` index pairs, each non-empty and drawn from `0..n`.
fn arb_metagraph(n: usize) -> impl Strategy<Value = Metagraph<u32>> {
    let generating_set: Vec<u32> = (0..n as u32).collect();
    vec(
        (vec(0..n as u32, 1..=3), vec(0..n as u32, 1..=3)),
        0..6,
    )
    .prop_map(move |pairs| {
        let mut mg = Metagraph::new(element_set(generating_set.clone())).unwrap();
        for (invertex, outvertex) in pairs {
            let invertex = element_set(invertex);
            let outvertex = element_set(outvertex);
            if invertex.is_empty() || outvertex.is_empty() {
                continue;
            }
            let _ = mg.add_edge(Edge::new(invertex, outvertex).unwrap());
        }
        mg
    })
}

proptest! {
    #[test]
    fn adjacency_matrix_is_square_of_generating_set_size(mg in arb_metagraph(6)) {
        let n = mg.generating_set().len();
        let matrix = mg.adjacency_matrix();
        prop_assert_eq!(matrix.dimension(), n);
    }

    #[test]
    fn incidence_matrix_has_one_row_per_element_and_one_column_per_edge(mg in arb_metagraph(6)) {
        let incidence = mg.incidence_matrix();
        prop_assert_eq!(incidence.elements().len(), mg.generating_set().len());
        prop_assert_eq!(incidence.edges().len(), mg.edges().len());
    }

    #[test]
    fn closure_reaches_a_fixed_point_within_generating_set_size_iterations(mg in arb_metagraph(6)) {
        let matrix = mg.adjacency_matrix();
        let closure = mg.closure();
        prop_assert_eq!(closure.add(&closure.multiply(&matrix)), closure);
    }

    #[test]
    fn every_edge_stays_within_the_generating_set(mg in arb_metagraph(6)) {
        for edge in mg.edges() {
            prop_assert!(edge.invertex().iter().all(|x| mg.generating_set().contains(x)));
            prop_assert!(edge.outvertex().iter().all(|x| mg.generating_set().contains(x)));
        }
    }
}
