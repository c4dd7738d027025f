use metagraph_algorithms::{get_all_metapaths_from, get_projection, is_dominant_metapath, is_metapath, MetapathCap};
use metagraph_core::{fail, Edge, Element, ElementSet, MessageKey, Metagraph, MetagraphError, Metapath, Result};

/// A metagraph whose generating set is partitioned into `variables` (the
/// elements reachability is actually asked about) and `propositions` (truth
/// values that gate which edges are active). An edge whose outvertex
/// contains a proposition must consist of that single proposition and
/// nothing else — propositions are asserted, never produced alongside a
/// variable.
#[derive(Debug, Clone)]
pub struct ConditionalMetagraph<X: Element> {
    variables: ElementSet<X>,
    propositions: ElementSet<X>,
    metagraph: Metagraph<X>,
}

impl<X: Element> ConditionalMetagraph<X> {
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if `variables` and
    /// `propositions` overlap.
    pub fn new(variables: ElementSet<X>, propositions: ElementSet<X>) -> Result<Self> {
        if variables.iter().any(|x| propositions.contains(x)) {
            return fail(MetagraphError::invalid_argument(
                "propositions",
                MessageKey::PartitionInvalid,
            ));
        }
        let mut generating_set = variables.clone();
        generating_set.extend(propositions.iter().cloned());
        let metagraph = Metagraph::new(generating_set)?;
        Ok(Self {
            variables,
            propositions,
            metagraph,
        })
    }

    pub fn variables(&self) -> &ElementSet<X> {
        &self.variables
    }

    pub fn propositions(&self) -> &ElementSet<X> {
        &self.propositions
    }

    pub fn metagraph(&self) -> &Metagraph<X> {
        &self.metagraph
    }

    fn outvertex_is_single_proposition(&self, outvertex: &ElementSet<X>) -> bool {
        outvertex.len() == 1 && outvertex.iter().all(|x| self.propositions.contains(x))
    }

    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if `edge`'s outvertex
    /// mixes a proposition with any other element.
    pub fn add_edge(&mut self, edge: Edge<X>) -> Result<()> {
        let outvertex = edge.outvertex();
        let has_proposition = outvertex.iter().any(|x| self.propositions.contains(x));
        if has_proposition && !self.outvertex_is_single_proposition(outvertex) {
            return fail(MetagraphError::invalid_argument(
                "edge.outvertex",
                MessageKey::ArgumentsInvalid,
            ));
        }
        self.metagraph.add_edge(edge)
    }

    pub fn add_edges_from(&mut self, edges: impl IntoIterator<Item = Edge<X>>) -> Result<()> {
        for edge in edges {
            self.add_edge(edge)?;
        }
        Ok(())
    }

    /// The conditional metagraph describing the context in which every
    /// proposition in `true_propositions` holds and every proposition in
    /// `false_propositions` does not.
    ///
    /// Every edge has `true_propositions` removed from both its invertex
    /// and its outvertex (a proposition, once settled true, is consumed
    /// rather than left dangling as an input); an edge whose invertex or
    /// outvertex becomes empty this way is dropped. Any edge mentioning a
    /// proposition in `false_propositions` anywhere is dropped outright,
    /// since that proposition never holds in this context.
    ///
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if either set is empty,
    /// or [`MetagraphError::RangeViolation`] if either contains an element
    /// that isn't one of this metagraph's propositions.
    pub fn get_context(&self, true_propositions: &ElementSet<X>, false_propositions: &ElementSet<X>) -> Result<Self> {
        if true_propositions.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "true_propositions",
                MessageKey::ValueNull,
            ));
        }
        if false_propositions.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "false_propositions",
                MessageKey::ValueNull,
            ));
        }
        if !true_propositions.iter().all(|x| self.propositions.contains(x)) {
            return fail(MetagraphError::range_violation(
                "true_propositions",
                MessageKey::NotASubset,
            ));
        }
        if !false_propositions.iter().all(|x| self.propositions.contains(x)) {
            return fail(MetagraphError::range_violation(
                "false_propositions",
                MessageKey::NotASubset,
            ));
        }

        let mut context = Self::new(self.variables.clone(), self.propositions.clone())?;
        for edge in self.metagraph.edges() {
            let mentions_false = false_propositions
                .iter()
                .any(|p| edge.invertex().contains(p) || edge.outvertex().contains(p));
            if mentions_false {
                continue;
            }

            let invertex: ElementSet<X> = edge
                .invertex()
                .iter()
                .filter(|x| !true_propositions.contains(*x))
                .cloned()
                .collect();
            let outvertex: ElementSet<X> = edge
                .outvertex()
                .iter()
                .filter(|x| !true_propositions.contains(*x))
                .cloned()
                .collect();
            if invertex.is_empty() || outvertex.is_empty() {
                continue;
            }

            let new_edge = Edge::with_label(invertex, outvertex, edge.label().map(str::to_owned))?;
            if !context.metagraph.edges().contains(&new_edge) {
                context.add_edge(new_edge)?;
            }
        }
        Ok(context)
    }

    /// The projection of this metagraph's full generating set onto
    /// `variables_subset ∪ propositions`, using the base-metagraph
    /// projection algorithm.
    ///
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if `variables_subset` is
    /// empty.
    pub fn get_projection(&self, variables_subset: &ElementSet<X>) -> Result<Option<Metagraph<X>>> {
        if variables_subset.is_empty() {
            return fail(MetagraphError::invalid_argument(
                "variables_subset",
                MessageKey::ValueNull,
            ));
        }
        let mut target_set = variables_subset.clone();
        target_set.extend(self.propositions.iter().cloned());
        get_projection(&self.metagraph, &target_set)
    }

    /// Every metapath from `source` to `target` over the raw, unconditioned
    /// edge set (propositions included exactly as stored — call
    /// [`ConditionalMetagraph::get_context`] first to resolve them).
    pub fn get_all_metapaths_from(
        &self,
        source: &ElementSet<X>,
        target: &ElementSet<X>,
        cap: MetapathCap,
    ) -> Result<Vec<Metapath<X>>> {
        get_all_metapaths_from(&self.metagraph, source, target, cap)
    }

    /// Every metapath between every pair of distinct, non-overlapping nodes
    /// in this metagraph, capped at `cap` metapaths total.
    pub fn get_all_metapaths(&self, cap: MetapathCap) -> Result<Vec<Metapath<X>>> {
        let mut found = Vec::new();
        for source_node in self.metagraph.nodes() {
            for target_node in self.metagraph.nodes() {
                if source_node == target_node {
                    continue;
                }
                let source = source_node.elements();
                let target = target_node.elements();
                if source.iter().any(|x| target.contains(x)) {
                    continue;
                }
                let remaining = cap.0.saturating_sub(found.len());
                if remaining == 0 {
                    return Ok(found);
                }
                if let Ok(metapaths) = get_all_metapaths_from(&self.metagraph, source, target, MetapathCap(remaining)) {
                    for mp in metapaths {
                        if !found.contains(&mp) {
                            found.push(mp);
                        }
                    }
                }
                if found.len() >= cap.0 {
                    return Ok(found);
                }
            }
        }
        Ok(found)
    }

    /// `true` iff the propositions appearing in the union of invertices of
    /// `mp`'s edges collectively carry more than one distinct action value,
    /// as extracted from a proposition by `action_of` (e.g. stripping an
    /// `action=` prefix). Propositions `action_of` maps to `None` carry no
    /// action and don't contribute to the conflict count.
    pub fn has_conflicts(&self, mp: &Metapath<X>, action_of: impl Fn(&X) -> Option<String>) -> bool {
        let mut invertices: ElementSet<X> = ElementSet::default();
        for edge in mp.edges() {
            invertices.extend(edge.invertex().iter().cloned());
        }

        let mut actions: Vec<String> = Vec::new();
        for proposition in invertices.iter().filter(|x| self.propositions.contains(*x)) {
            if let Some(action) = action_of(proposition) {
                if !actions.contains(&action) {
                    actions.push(action);
                }
            }
        }
        actions.len() > 1
    }

    /// `true` iff `mp` is not a dominant metapath of the underlying
    /// metagraph.
    ///
    /// # Errors
    /// Returns [`MetagraphError::InvalidArgument`] if `mp` is not a
    /// metapath of the underlying metagraph.
    pub fn has_redundancies(&self, mp: &Metapath<X>) -> Result<bool> {
        if !is_metapath(&self.metagraph, mp) {
            return fail(MetagraphError::invalid_argument("mp", MessageKey::ArgumentsInvalid));
        }
        Ok(!is_dominant_metapath(&self.metagraph, mp))
    }
}

#[cfg(test)]
mod tests {
    use metagraph_core::element_set;

    use super::*;

    fn seed_cmg() -> ConditionalMetagraph<String> {
        let variables = element_set((1..=7).map(|n: i32| n.to_string()));
        let propositions = element_set(["p1".to_string(), "p2".to_string()]);
        let mut cmg = ConditionalMetagraph::new(variables, propositions).unwrap();
        cmg.add_edge(
            Edge::with_attributes(element_set(["1".into(), "2".into()]), element_set(["p1".into()]), element_set(["3".into(), "4".into()]))
                .unwrap(),
        )
        .unwrap();
        cmg.add_edge(
            Edge::with_attributes(element_set(["2".into()]), element_set(["p2".into()]), element_set(["4".into(), "6".into()])).unwrap(),
        )
        .unwrap();
        cmg.add_edge(
            Edge::with_attributes(
                element_set(["3".into(), "4".into()]),
                element_set(["p1".into(), "p2".into()]),
                element_set(["5".into()]),
            )
            .unwrap(),
        )
        .unwrap();
        cmg.add_edge(
            Edge::with_attributes(element_set(["4".into(), "6".into()]), element_set(["p1".into()]), element_set(["5".into(), "7".into()]))
                .unwrap(),
        )
        .unwrap();
        cmg
    }

    #[test]
    fn seed_cmg_has_four_edges_and_eight_nodes() {
        let cmg = seed_cmg();
        assert_eq!(cmg.metagraph().edges().len(), 4);
        assert_eq!(cmg.metagraph().nodes().len(), 8);
    }

    #[test]
    fn add_edge_rejects_outvertex_mixing_a_proposition_with_a_variable() {
        let variables = element_set(["x".to_string()]);
        let propositions = element_set(["p".to_string()]);
        let mut cmg = ConditionalMetagraph::new(variables, propositions).unwrap();
        let bad = Edge::new(element_set(["x".to_string()]), element_set(["x".to_string(), "p".to_string()])).unwrap();
        assert!(cmg.add_edge(bad).is_err());
    }

    #[test]
    fn get_context_on_true_p1_false_p2_yields_two_edges_and_four_nodes() {
        let cmg = seed_cmg();
        let true_props = element_set(["p1".to_string()]);
        let false_props = element_set(["p2".to_string()]);
        let context = cmg.get_context(&true_props, &false_props).unwrap();
        assert_eq!(context.metagraph().edges().len(), 2);
        assert_eq!(context.metagraph().nodes().len(), 4);
    }

    #[test]
    fn get_context_requires_non_empty_and_known_propositions() {
        let cmg = seed_cmg();
        assert!(cmg
            .get_context(&element_set::<String>([]), &element_set(["p2".to_string()]))
            .is_err());
        assert!(cmg
            .get_context(&element_set(["not-a-proposition".to_string()]), &element_set(["p2".to_string()]))
            .is_err());
    }

    #[test]
    fn has_conflicts_counts_distinct_actions_from_invertex_propositions() {
        let variables = element_set(["x".to_string(), "y".to_string()]);
        let propositions = element_set(["action=a".to_string(), "action=b".to_string()]);
        let mut cmg = ConditionalMetagraph::new(variables, propositions).unwrap();
        let edge = Edge::new(
            element_set(["x".to_string(), "action=a".to_string(), "action=b".to_string()]),
            element_set(["y".to_string()]),
        )
        .unwrap();
        cmg.add_edge(edge.clone()).unwrap();
        let mp = Metapath::new(element_set(["x".to_string()]), element_set(["y".to_string()]), vec![edge]).unwrap();

        let action_of = |p: &String| p.strip_prefix("action=").map(str::to_owned);
        assert!(cmg.has_conflicts(&mp, action_of));
    }

    #[test]
    fn get_all_metapaths_finds_every_direct_edge_and_respects_its_cap() {
        let cmg = seed_cmg();
        let metapaths = cmg.get_all_metapaths(MetapathCap::conditional_default()).unwrap();
        assert!(!metapaths.is_empty());
        assert!(metapaths.len() <= MetapathCap::conditional_default().0);

        let tiny = cmg.get_all_metapaths(MetapathCap(1)).unwrap();
        assert_eq!(tiny.len(), 1);
    }
}
