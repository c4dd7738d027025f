use std::fmt::Write as _;

use metagraph_core::{edge_in_list, fail, triple_in_list, Edge, Element, ElementSet, MessageKey, Metagraph, MetagraphError, Result, Triple};

use crate::combinatorics::non_empty_subsets;

/// Bounds how many combinations of distinct closure-cell triples
/// [`get_projection`] will examine while looking for multi-triple candidate
/// edge-collections (§4.6 step 2's "combined coinputs minus cooutputs").
#[derive(Debug, Clone, Copy)]
pub struct ProjectionCap(pub usize);

impl Default for ProjectionCap {
    fn default() -> Self {
        Self(4096)
    }
}

/// Reduces `metagraph` to the sub-vocabulary `target_set`, a subset of its
/// generating set, using the default [`ProjectionCap`].
///
/// # Errors
/// Returns [`MetagraphError::InvalidArgument`] if `target_set` is empty, or
/// [`MetagraphError::RangeViolation`] if it isn't a subset of `metagraph`'s
/// generating set.
pub fn get_projection<X: Element>(metagraph: &Metagraph<X>, target_set: &ElementSet<X>) -> Result<Option<Metagraph<X>>> {
    get_projection_capped(metagraph, target_set, ProjectionCap::default())
}

/// Like [`get_projection`], with an explicit cap on the number of
/// multi-triple combinations examined.
pub fn get_projection_capped<X: Element>(
    metagraph: &Metagraph<X>,
    target_set: &ElementSet<X>,
    cap: ProjectionCap,
) -> Result<Option<Metagraph<X>>> {
    if target_set.is_empty() {
        return fail(MetagraphError::invalid_argument("target_set", MessageKey::ValueNull));
    }
    if !target_set.iter().all(|x| metagraph.generating_set().contains(x)) {
        return fail(MetagraphError::range_violation("target_set", MessageKey::NotASubset));
    }

    let closure = metagraph.closure();
    let indices: Vec<usize> = target_set.iter().filter_map(|x| closure.index_of(x)).collect();

    // Step 1 (restriction) + step 2 (single-edge seeds): walk the closure
    // cells indexed by target_set, remembering every distinct triple seen
    // and seeding one candidate edge-collection per edge whose invertex
    // already sits entirely inside target_set.
    let mut distinct_triples: Vec<Triple<X>> = Vec::new();
    let mut candidates: Vec<Vec<Edge<X>>> = Vec::new();

    for &i in &indices {
        for &j in &indices {
            for triple in closure.cell(i, j) {
                if !triple_in_list(&distinct_triples, triple) {
                    distinct_triples.push(triple.clone());
                }
                for edge in triple.edges() {
                    if edge.invertex().iter().all(|x| target_set.contains(x)) {
                        push_candidate(&mut candidates, vec![edge.clone()]);
                    }
                }
            }
        }
    }

    // Step 2 (multi-triple combinations): any non-empty combination of the
    // distinct triples whose combined coinputs minus cooutputs lands inside
    // target_set contributes its edges as one more candidate collection.
    for (examined, combo) in non_empty_subsets(&distinct_triples).enumerate() {
        if examined >= cap.0 {
            break;
        }
        let mut combined_in: ElementSet<X> = ElementSet::default();
        let mut combined_out: ElementSet<X> = ElementSet::default();
        for triple in &combo {
            if let Some(coinputs) = triple.coinputs() {
                combined_in.extend(coinputs.iter().cloned());
            }
            if let Some(cooutputs) = triple.cooutputs() {
                combined_out.extend(cooutputs.iter().cloned());
            }
        }
        let stays_inside = combined_in.iter().filter(|x| !combined_out.contains(*x)).all(|x| target_set.contains(x));
        if !stays_inside {
            continue;
        }
        let mut edges: Vec<Edge<X>> = Vec::new();
        for triple in &combo {
            for edge in triple.edges() {
                if !edge_in_list(&edges, edge) {
                    edges.push(edge.clone());
                }
            }
        }
        push_candidate(&mut candidates, edges);
    }

    if candidates.is_empty() {
        return Ok(None);
    }

    // Step 3: net inputs/outputs per candidate edge-collection, forming one
    // triple `(net_inputs, net_outputs, edges)` per candidate.
    let mut l0: Vec<Triple<X>> = Vec::new();
    for edges in &candidates {
        let mut all_in: ElementSet<X> = ElementSet::default();
        let mut all_out: ElementSet<X> = ElementSet::default();
        for edge in edges {
            all_in.extend(edge.invertex().iter().cloned());
            all_out.extend(edge.outvertex().iter().cloned());
        }
        let net_in: ElementSet<X> = all_in.iter().filter(|x| !all_out.contains(*x)).cloned().collect();
        let triple = Triple::new(non_empty(net_in), non_empty(all_out), edges.clone());
        if !triple_in_list(&l0, &triple) {
            l0.push(triple);
        }
    }

    // Step 4: subsumption pruning. Triple `i` is dropped if some other
    // triple `j`'s edges are a subset of `i`'s, and `j`'s cooutputs
    // restricted to target_set cover `i`'s restricted the same way.
    let mut eliminated = vec![false; l0.len()];
    for i in 0..l0.len() {
        for j in 0..l0.len() {
            if i == j {
                continue;
            }
            if !edges_subset(l0[j].edges(), l0[i].edges()) {
                continue;
            }
            let i_out = restrict(l0[i].cooutputs(), target_set);
            let j_out = restrict(l0[j].cooutputs(), target_set);
            if i_out.iter().all(|x| j_out.contains(x)) {
                eliminated[i] = true;
                break;
            }
        }
    }
    let l0: Vec<Triple<X>> = l0
        .into_iter()
        .zip(eliminated)
        .filter_map(|(triple, gone)| if gone { None } else { Some(triple) })
        .collect();

    // Step 5: output trimming. For a pair `i != j` where `j`'s coinputs and
    // cooutputs are both subsets of `i`'s, strip `j`'s cooutputs out of
    // `i`'s; drop `i` entirely if that empties it.
    let mut trimmed_outputs: Vec<Option<ElementSet<X>>> = l0.iter().map(|t| t.cooutputs().cloned()).collect();
    for i in 0..l0.len() {
        let mut out_i = trimmed_outputs[i].clone().unwrap_or_default();
        let in_i = l0[i].coinputs().cloned().unwrap_or_default();
        for j in 0..l0.len() {
            if i == j {
                continue;
            }
            let in_j = l0[j].coinputs().cloned().unwrap_or_default();
            let out_j = l0[j].cooutputs().cloned().unwrap_or_default();
            if in_j.iter().all(|x| in_i.contains(x)) && out_j.iter().all(|x| out_i.contains(x)) {
                out_i = out_i.into_iter().filter(|x| !out_j.contains(x)).collect();
            }
        }
        trimmed_outputs[i] = non_empty(out_i);
    }
    let l0: Vec<Triple<X>> = l0
        .into_iter()
        .zip(trimmed_outputs)
        .filter_map(|(triple, cooutputs)| cooutputs.map(|co| Triple::new(triple.coinputs().cloned(), Some(co), triple.edges().to_vec())))
        .collect();

    // Step 6: merge triples sharing both coinputs and cooutputs (union their
    // edges), then merge what remains by coinputs alone (union cooutputs
    // and edges).
    let l0 = merge_by(l0, |a, b| {
        option_set_eq(a.coinputs(), b.coinputs()) && option_set_eq(a.cooutputs(), b.cooutputs())
    }, false);
    let l0 = merge_by(l0, |a, b| option_set_eq(a.coinputs(), b.coinputs()), true);

    // Step 7: restrict every survivor's coinputs/cooutputs to target_set,
    // drop any that become empty on either side, and emit one edge per
    // survivor, labelled with its edge-collection.
    let mut projected_edges: Vec<Edge<X>> = Vec::new();
    for triple in &l0 {
        let coinputs = restrict(triple.coinputs(), target_set);
        let cooutputs = restrict(triple.cooutputs(), target_set);
        if coinputs.is_empty() || cooutputs.is_empty() {
            continue;
        }
        let label = describe_edges(triple.edges());
        let edge = Edge::with_label(coinputs, cooutputs, Some(label))?;
        if !edge_in_list(&projected_edges, &edge) {
            projected_edges.push(edge);
        }
    }

    if projected_edges.is_empty() {
        return Ok(None);
    }

    let mut projected = Metagraph::new(target_set.clone())?;
    projected.add_edges_from(projected_edges)?;
    Ok(Some(projected))
}

fn non_empty<X: Element>(set: ElementSet<X>) -> Option<ElementSet<X>> {
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

fn restrict<X: Element>(source: Option<&ElementSet<X>>, target_set: &ElementSet<X>) -> ElementSet<X> {
    match source {
        None => ElementSet::default(),
        Some(set) => set.iter().filter(|x| target_set.contains(*x)).cloned().collect(),
    }
}

fn edges_subset<X: Element>(smaller: &[Edge<X>], larger: &[Edge<X>]) -> bool {
    smaller.iter().all(|edge| edge_in_list(larger, edge))
}

fn option_set_eq<X: Element>(a: Option<&ElementSet<X>>, b: Option<&ElementSet<X>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.len() == b.len() && a.iter().all(|x| b.contains(x)),
        _ => false,
    }
}

fn push_candidate<X: Element>(candidates: &mut Vec<Vec<Edge<X>>>, edges: Vec<Edge<X>>) {
    if !candidates.iter().any(|existing| edges_equal_as_set(existing, &edges)) {
        candidates.push(edges);
    }
}

fn edges_equal_as_set<X: Element>(a: &[Edge<X>], b: &[Edge<X>]) -> bool {
    a.len() == b.len() && a.iter().all(|edge| edge_in_list(b, edge))
}

fn describe_edges<X: Element>(edges: &[Edge<X>]) -> String {
    let mut out = String::new();
    for (i, edge) in edges.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{edge}");
    }
    out
}

/// Groups `triples` into equivalence classes under `same_group` (assumed
/// transitive — membership is always tested against the class's first
/// member), merging each class's edges and, when `union_cooutputs` is set,
/// its cooutputs too.
fn merge_by<X: Element>(triples: Vec<Triple<X>>, same_group: impl Fn(&Triple<X>, &Triple<X>) -> bool, union_cooutputs: bool) -> Vec<Triple<X>> {
    let mut remaining = triples;
    let mut merged = Vec::new();
    while let Some(first) = remaining.pop() {
        let mut group_edges = first.edges().to_vec();
        let mut group_cooutputs = first.cooutputs().cloned();
        let coinputs = first.coinputs().cloned();
        let mut i = 0;
        while i < remaining.len() {
            if same_group(&first, &remaining[i]) {
                let other = remaining.remove(i);
                for edge in other.edges() {
                    if !edge_in_list(&group_edges, edge) {
                        group_edges.push(edge.clone());
                    }
                }
                if union_cooutputs {
                    let mut union = group_cooutputs.clone().unwrap_or_default();
                    if let Some(other_cooutputs) = other.cooutputs() {
                        union.extend(other_cooutputs.iter().cloned());
                    }
                    group_cooutputs = non_empty(union);
                }
            } else {
                i += 1;
            }
        }
        merged.push(Triple::new(coinputs, group_cooutputs, group_edges));
    }
    merged
}
