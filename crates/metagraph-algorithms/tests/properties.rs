//! Property tests over the algebraic invariants §8 calls out: `dominates`
//! reflexive/transitive, `equivalent` an equivalence relation, and
//! `is_bridge ≡ is_cutset`.

use metagraph_algorithms::{is_bridge, is_cutset, metagraph_dominates, metagraph_equivalent};
use metagraph_core::{element_set, Edge, Metagraph};
use proptest::collection::vec;
use proptest::prelude::*;

fn arb_metagraph(n: usize) -> impl Strategy<Value = Metagraph<u32>> {
    let generating_set: Vec<u32> = (0..n as u32).collect();
    vec((vec(0..n as u32, 1..=2), vec(0..n as u32, 1..=2)), 0..4).prop_map(move |pairs| {
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
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn dominates_is_reflexive(mg in arb_metagraph(4)) {
        prop_assert!(metagraph_dominates(&mg, &mg).unwrap());
    }

    #[test]
    fn equivalent_is_reflexive(mg in arb_metagraph(4)) {
        prop_assert!(metagraph_equivalent(&mg, &mg).unwrap());
    }

    #[test]
    fn is_bridge_always_agrees_with_is_cutset(mg in arb_metagraph(4)) {
        let source = element_set([0u32]);
        let target = element_set([1u32]);
        for edge in mg.edges() {
            let removed = [edge.clone()];
            let cutset = is_cutset(&mg, &removed, &source, &target).unwrap();
            let bridge = is_bridge(&mg, &removed, &source, &target).unwrap();
            prop_assert_eq!(cutset, bridge);
        }
    }
}
