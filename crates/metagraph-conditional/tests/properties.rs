//! Property test over the context-splitting invariant: settling `p` true
//! and `q` false in one context, then `q` true and `p` false in the other,
//! can never leave both contexts holding an edge that mentioned either
//! proposition — each such edge is stripped of its settled-true proposition
//! and survives only on the side where it wasn't settled false.

use metagraph_conditional::ConditionalMetagraph;
use metagraph_core::{element_set, Edge};
use proptest::collection::vec;
use proptest::prelude::*;

const PROPOSITIONS: [&str; 2] = ["p", "q"];

/// A conditional metagraph over variables `0..n` and propositions `{p, q}`,
/// with each edge's invertex carrying a random non-empty subset of
/// `0..n` plus (via `with_attributes`) a random subset of `{p, q}`.
fn arb_cmg(n: usize) -> impl Strategy<Value = ConditionalMetagraph<String>> {
    let variable_names: Vec<String> = (0..n).map(|i| i.to_string()).collect();
    vec(
        (
            vec(0..n, 1..=2),
            vec(0..n, 1..=2),
            vec(0..PROPOSITIONS.len(), 0..=2),
        ),
        0..5,
    )
    .prop_map(move |triples| {
        let variables = element_set(variable_names.clone());
        let propositions = element_set(PROPOSITIONS.iter().map(|p| p.to_string()));
        let mut cmg = ConditionalMetagraph::new(variables, propositions).unwrap();
        for (invertex_idx, outvertex_idx, attr_idx) in triples {
            let invertex = element_set(invertex_idx.iter().map(|&i| variable_names_at(n, i)));
            let outvertex = element_set(outvertex_idx.iter().map(|&i| variable_names_at(n, i)));
            if invertex.is_empty() || outvertex.is_empty() {
                continue;
            }
            let attributes = element_set(attr_idx.iter().map(|&i| PROPOSITIONS[i].to_string()));
            let edge = if attributes.is_empty() {
                Edge::new(invertex, outvertex)
            } else {
                Edge::with_attributes(invertex, attributes, outvertex)
            };
            if let Ok(edge) = edge {
                let _ = cmg.add_edge(edge);
            }
        }
        cmg
    })
}

fn variable_names_at(n: usize, i: usize) -> String {
    assert!(i < n);
    i.to_string()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn settling_a_proposition_true_in_one_context_and_false_in_the_other_splits_the_edges(cmg in arb_cmg(5)) {
        let p = element_set(["p".to_string()]);
        let q = element_set(["q".to_string()]);

        let edges_mentioning_p: Vec<_> = cmg
            .metagraph()
            .edges()
            .iter()
            .filter(|edge| edge.invertex().contains(&"p".to_string()) || edge.outvertex().contains(&"p".to_string()))
            .cloned()
            .collect();
        let edges_mentioning_q: Vec<_> = cmg
            .metagraph()
            .edges()
            .iter()
            .filter(|edge| edge.invertex().contains(&"q".to_string()) || edge.outvertex().contains(&"q".to_string()))
            .cloned()
            .collect();

        let p_true_q_false = cmg.get_context(&p, &q);
        let q_true_p_false = cmg.get_context(&q, &p);

        if let Ok(rhs) = q_true_p_false {
            for edge in &edges_mentioning_p {
                prop_assert!(!rhs.metagraph().edges().contains(edge));
            }
        }
        if let Ok(lhs) = p_true_q_false {
            for edge in &edges_mentioning_q {
                prop_assert!(!lhs.metagraph().edges().contains(edge));
            }
        }
    }
}
