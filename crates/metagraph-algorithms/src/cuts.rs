use metagraph_core::{edge_in_list, fail, Edge, Element, ElementSet, MessageKey, Metagraph, MetagraphError, Metapath, Result};

use crate::combinatorics::non_empty_subsets;
use crate::metapaths::{get_all_metapaths_from, is_metapath, MetapathCap};

/// Edges compare by `(invertex, outvertex)` alone for removal purposes, per
/// §4.5 — a label or attribute difference doesn't stop an edge from being
/// "the same edge" when a caller asks to cut it out.
fn same_vertex_pair<X: Element>(a: &Edge<X>, b: &Edge<X>) -> bool {
    elementset_eq(a.invertex(), b.invertex()) && elementset_eq(a.outvertex(), b.outvertex())
}

fn elementset_eq<X: Element>(a: &ElementSet<X>, b: &ElementSet<X>) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}

fn remove_by_vertex_pair<X: Element>(from: &[Edge<X>], removed: &[Edge<X>]) -> Vec<Edge<X>> {
    from.iter()
        .filter(|edge| !removed.iter().any(|r| same_vertex_pair(edge, r)))
        .cloned()
        .collect()
}

fn without_edges<X: Element>(metagraph: &Metagraph<X>, removed: &[Edge<X>]) -> Result<Metagraph<X>> {
    let remaining = remove_by_vertex_pair(metagraph.edges(), removed);
    let mut scratch = Metagraph::new(metagraph.generating_set().clone())?;
    scratch.add_nodes_from(metagraph.nodes().iter().cloned())?;
    scratch.add_edges_from(remaining)?;
    Ok(scratch)
}

/// `true` iff `edge` is redundant for `mp` from `source` to `target`:
/// removing it still leaves at least one metapath from `source` to some
/// proper subset of `target` that didn't rely on `edge` in the first place.
///
/// # Errors
/// Returns [`MetagraphError::InvalidArgument`] if `mp` is not a metapath
/// over `metagraph`.
pub fn is_redundant_edge<X: Element>(
    metagraph: &Metagraph<X>,
    edge: &Edge<X>,
    mp: &Metapath<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
) -> Result<bool> {
    if !is_metapath(metagraph, mp) {
        return fail(MetagraphError::invalid_argument("mp", MessageKey::ArgumentsInvalid));
    }

    let targets: Vec<X> = target.iter().cloned().collect();
    for subset in non_empty_subsets(&targets) {
        if subset.len() >= targets.len() {
            continue;
        }
        let proper_target: ElementSet<X> = subset.into_iter().collect();
        let metapaths = get_all_metapaths_from(metagraph, source, &proper_target, MetapathCap::default())?;
        for candidate in &metapaths {
            if !edge_in_list(candidate.edges(), edge) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// `true` iff removing exactly `edges` (compared by invertex/outvertex,
/// ignoring label) from `metagraph` yields a metagraph with no metapath
/// from `source` to `target`.
pub fn is_cutset<X: Element>(
    metagraph: &Metagraph<X>,
    edges: &[Edge<X>],
    source: &ElementSet<X>,
    target: &ElementSet<X>,
) -> Result<bool> {
    let scratch = without_edges(metagraph, edges)?;
    let metapaths = get_all_metapaths_from(&scratch, source, target, MetapathCap::default())?;
    Ok(metapaths.is_empty())
}

/// The smallest edge subset, drawn from the edges of any metapath from
/// `source` to `target`, that forms a cutset; ties are broken by
/// enumeration order. `None` if `source` and `target` aren't connected by
/// any metapath in the first place.
pub fn get_minimal_cutset<X: Element>(
    metagraph: &Metagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
    cap: MetapathCap,
) -> Result<Option<Vec<Edge<X>>>> {
    let metapaths = get_all_metapaths_from(metagraph, source, target, cap)?;
    if metapaths.is_empty() {
        return Ok(None);
    }

    let mut best: Option<Vec<Edge<X>>> = None;
    for mp in &metapaths {
        for candidate in non_empty_subsets(mp.edges()) {
            if is_cutset(metagraph, &candidate, source, target)? {
                let better = match &best {
                    None => true,
                    Some(current) => candidate.len() < current.len(),
                };
                if better {
                    best = Some(candidate);
                }
            }
        }
    }
    Ok(best)
}

/// Alias of [`is_cutset`]: a bridge is just a cutset from the caller's
/// point of view, there's no structurally distinct notion of "bridge" here.
pub fn is_bridge<X: Element>(
    metagraph: &Metagraph<X>,
    edges: &[Edge<X>],
    source: &ElementSet<X>,
    target: &ElementSet<X>,
) -> Result<bool> {
    is_cutset(metagraph, edges, source, target)
}

/// Rebuilds a candidate metagraph missing `removed`, used by callers that
/// need the resulting metagraph rather than a yes/no answer.
pub fn metagraph_without_edges<X: Element>(metagraph: &Metagraph<X>, removed: &[Edge<X>]) -> Option<Metagraph<X>> {
    without_edges(metagraph, removed).ok()
}
