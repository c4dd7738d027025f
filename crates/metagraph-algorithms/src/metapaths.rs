use metagraph_core::{
    edge_in_list, fail, Edge, Element, ElementSet, MessageKey, Metagraph, MetagraphError, Metapath, Result,
};

use crate::combinatorics::non_empty_subsets;

/// Bounds how many candidate edge subsets [`get_all_metapaths_from`] will
/// examine before giving up, since the search space is the edge power set.
/// Metagraphs with more than a handful of edges need a caller-supplied cap
/// well below `2^edges`.
#[derive(Debug, Clone, Copy)]
pub struct MetapathCap(pub usize);

impl Default for MetapathCap {
    fn default() -> Self {
        Self(10_000)
    }
}

impl MetapathCap {
    /// The cap `ConditionalMetagraph::get_all_metapaths` uses when a caller
    /// just wants "a reasonable sample" of an all-pairs enumeration rather
    /// than the general-purpose [`MetapathCap::default`], since an all-pairs
    /// search multiplies the single-pair search space by every node-pair
    /// combination.
    pub fn conditional_default() -> Self {
        Self(10)
    }
}

/// `true` iff `candidate` is a metapath over `metagraph`: every edge it
/// carries must appear in some triple of `A*[i][j]` for `(i, j)` ranging
/// over source×target indices, the net inputs (union of invertices minus
/// union of outvertices, across exactly the candidate's own edges) must
/// fall inside `candidate.source`, and `candidate.target` must be covered
/// by the union of outvertices.
pub fn is_metapath<X: Element>(metagraph: &Metagraph<X>, candidate: &Metapath<X>) -> bool {
    let closure = metagraph.closure();
    let input_rows: Vec<usize> = candidate.source().iter().filter_map(|x| closure.index_of(x)).collect();
    let output_cols: Vec<usize> = candidate.target().iter().filter_map(|x| closure.index_of(x)).collect();

    let mut validated: Vec<Edge<X>> = Vec::new();
    let mut all_inputs: ElementSet<X> = ElementSet::default();
    let mut all_outputs: ElementSet<X> = ElementSet::default();

    for &i in &input_rows {
        for &j in &output_cols {
            let cell = closure.cell(i, j);
            if cell.is_empty() {
                continue;
            }
            for edge in candidate.edges() {
                if !edge_in_list(&validated, edge) && cell.iter().any(|triple| edge_in_list(triple.edges(), edge)) {
                    validated.push(edge.clone());
                }
                all_inputs.extend(edge.invertex().iter().cloned());
                all_outputs.extend(edge.outvertex().iter().cloned());
            }
        }
    }

    if candidate.edges().iter().any(|edge| !edge_in_list(&validated, edge)) {
        return false;
    }

    let net_in: ElementSet<X> = all_inputs.iter().filter(|x| !all_outputs.contains(*x)).cloned().collect();
    net_in.iter().all(|x| candidate.source().contains(x)) && candidate.target().iter().all(|x| all_outputs.contains(x))
}

/// Every metapath from `source` to `target` over `metagraph`, up to
/// `cap.0` candidate edge subsets examined, smallest subsets first.
///
/// # Errors
/// Returns [`MetagraphError::InvalidArgument`] if `source` or `target` is
/// empty, or [`MetagraphError::RangeViolation`] if either isn't a subset of
/// `metagraph`'s generating set.
pub fn get_all_metapaths_from<X: Element>(
    metagraph: &Metagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
    cap: MetapathCap,
) -> Result<Vec<Metapath<X>>> {
    if source.is_empty() {
        return fail(MetagraphError::invalid_argument("source", MessageKey::ValueNull));
    }
    if target.is_empty() {
        return fail(MetagraphError::invalid_argument("target", MessageKey::ValueNull));
    }
    if !source.iter().all(|x| metagraph.generating_set().contains(x)) {
        return fail(MetagraphError::range_violation("source", MessageKey::NotASubset));
    }
    if !target.iter().all(|x| metagraph.generating_set().contains(x)) {
        return fail(MetagraphError::range_violation("target", MessageKey::NotASubset));
    }

    let closure = metagraph.closure();
    let mut e_s: Vec<Edge<X>> = Vec::new();

    for x_i in source {
        let Some(i) = closure.index_of(x_i) else {
            return Ok(Vec::new());
        };
        let mut reaches_any = false;
        for x_j in target {
            let Some(j) = closure.index_of(x_j) else {
                continue;
            };
            let cell = closure.cell(i, j);
            if cell.is_empty() {
                continue;
            }
            reaches_any = true;
            for triple in cell {
                for edge in triple.edges() {
                    if !edge_in_list(&e_s, edge) {
                        e_s.push(edge.clone());
                    }
                }
            }
        }
        if !reaches_any {
            return Ok(Vec::new());
        }
    }

    let union_outvertex: ElementSet<X> = e_s.iter().flat_map(|e| e.outvertex().iter().cloned()).collect();
    if !target.iter().all(|x| union_outvertex.contains(x)) {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for (examined, candidate) in non_empty_subsets(&e_s).enumerate() {
        if examined >= cap.0 {
            break;
        }
        if let Ok(mp) = Metapath::new(source.clone(), target.clone(), candidate) {
            if is_metapath(metagraph, &mp) {
                found.push(mp);
            }
        }
    }
    Ok(found)
}

/// `true` iff `mp_a` dominates `mp_b`: `mp_a`'s source is a subset of
/// `mp_b`'s, and `mp_b`'s target is a subset of `mp_a`'s.
pub fn dominates<X: Element>(mp_a: &Metapath<X>, mp_b: &Metapath<X>) -> bool {
    mp_a.source().iter().all(|x| mp_b.source().contains(x)) && mp_b.target().iter().all(|x| mp_a.target().contains(x))
}

/// `true` iff `mp` is a metapath and no proper subset of its edges forms a
/// metapath with the same source and target.
pub fn is_edge_dominant_metapath<X: Element>(metagraph: &Metagraph<X>, mp: &Metapath<X>) -> bool {
    if !is_metapath(metagraph, mp) {
        return false;
    }
    let edges = mp.edges();
    for candidate in non_empty_subsets(edges) {
        if candidate.len() >= edges.len() {
            continue;
        }
        if let Ok(candidate_mp) = Metapath::new(mp.source().clone(), mp.target().clone(), candidate) {
            if is_metapath(metagraph, &candidate_mp) {
                return false;
            }
        }
    }
    true
}

/// `true` iff no proper subset of `mp.source` supports a non-empty
/// metapath set to `mp.target`.
pub fn is_input_dominant_metapath<X: Element>(metagraph: &Metagraph<X>, mp: &Metapath<X>) -> bool {
    if !is_metapath(metagraph, mp) {
        return false;
    }
    let source: Vec<X> = mp.source().iter().cloned().collect();
    for subset in non_empty_subsets(&source) {
        if subset.len() >= source.len() {
            continue;
        }
        let subset_set: ElementSet<X> = subset.into_iter().collect();
        if let Ok(metapaths) = get_all_metapaths_from(metagraph, &subset_set, mp.target(), MetapathCap::default()) {
            if !metapaths.is_empty() {
                return false;
            }
        }
    }
    true
}

/// `true` iff `mp` is both edge-dominant and input-dominant.
pub fn is_dominant_metapath<X: Element>(metagraph: &Metagraph<X>, mp: &Metapath<X>) -> bool {
    is_edge_dominant_metapath(metagraph, mp) && is_input_dominant_metapath(metagraph, mp)
}

/// Re-exported so callers working purely with edge lists (rather than an
/// already-built [`Metapath`]) can check containment without a core import.
pub fn edges_contain<X: Element>(edges: &[Edge<X>], edge: &Edge<X>) -> bool {
    edge_in_list(edges, edge)
}
