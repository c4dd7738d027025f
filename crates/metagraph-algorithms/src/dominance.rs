use metagraph_core::{Element, ElementSet, Metagraph, Metapath, Result};

use crate::combinatorics::non_trivial_subsets;
use crate::metapaths::{dominates as dominates_metapath, get_all_metapaths_from, MetapathCap};

fn metapaths_or_empty<X: Element>(
    metagraph: &Metagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
) -> Vec<Metapath<X>> {
    get_all_metapaths_from(metagraph, source, target, MetapathCap::default()).unwrap_or_default()
}

fn elementset_eq<X: Element>(a: &ElementSet<X>, b: &ElementSet<X>) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}

/// `true` iff, for every non-trivial `(S, T)` drawn from `dominated`'s
/// generating set with `S ≠ T`, every metapath `dominated` has from `S` to
/// `T` is dominated by some metapath `dominant` has from `S` to `T`.
///
/// `S`/`T` pairs that aren't subsets of `dominant`'s own generating set
/// simply contribute no metapaths on the `dominant` side, rather than
/// raising — the two metagraphs are not required to share a vocabulary.
pub fn dominates<X: Element>(dominant: &Metagraph<X>, dominated: &Metagraph<X>) -> Result<bool> {
    let elements: Vec<X> = dominated.generating_set().iter().cloned().collect();
    let subsets: Vec<ElementSet<X>> = non_trivial_subsets(&elements).map(|s| s.into_iter().collect()).collect();

    for source in &subsets {
        for target in &subsets {
            if elementset_eq(source, target) {
                continue;
            }
            let dominated_paths = metapaths_or_empty(dominated, source, target);
            if dominated_paths.is_empty() {
                continue;
            }
            let dominant_paths = metapaths_or_empty(dominant, source, target);
            for mp2 in &dominated_paths {
                if !dominant_paths.iter().any(|mp1| dominates_metapath(mp1, mp2)) {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// `true` iff `a` dominates `b` and `b` dominates `a`.
pub fn equivalent<X: Element>(a: &Metagraph<X>, b: &Metagraph<X>) -> Result<bool> {
    Ok(dominates(a, b)? && dominates(b, a)?)
}

#[cfg(test)]
mod tests {
    use metagraph_core::{element_set, Edge};

    use super::*;

    fn seed_metagraph() -> Metagraph<i32> {
        let mut mg = Metagraph::new(element_set(1..=7)).unwrap();
        mg.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
        mg.add_edge(Edge::new(element_set([1, 4]), element_set([5])).unwrap()).unwrap();
        mg.add_edge(Edge::new(element_set([3]), element_set([6, 7])).unwrap()).unwrap();
        mg
    }

    #[test]
    fn dominates_is_reflexive() {
        let mg = seed_metagraph();
        assert!(dominates(&mg, &mg).unwrap());
    }

    #[test]
    fn equivalent_is_reflexive() {
        let mg = seed_metagraph();
        assert!(equivalent(&mg, &mg).unwrap());
    }

    #[test]
    fn a_richer_metagraph_dominates_a_sparser_one_sharing_its_edges() {
        let rich = seed_metagraph();
        let mut sparse = Metagraph::new(element_set(1..=7)).unwrap();
        sparse.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
        assert!(dominates(&rich, &sparse).unwrap());
    }

    #[test]
    fn dominates_is_transitive_over_a_chain_of_three() {
        let mut smallest = Metagraph::new(element_set(1..=7)).unwrap();
        smallest.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();

        let mut middle = Metagraph::new(element_set(1..=7)).unwrap();
        middle.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
        middle.add_edge(Edge::new(element_set([3]), element_set([6, 7])).unwrap()).unwrap();

        let largest = seed_metagraph();

        assert!(dominates(&middle, &smallest).unwrap());
        assert!(dominates(&largest, &middle).unwrap());
        assert!(dominates(&largest, &smallest).unwrap());
    }
}
