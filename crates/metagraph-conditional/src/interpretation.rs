use itertools::Itertools;
use metagraph_core::{fail, Element, ElementSet, MessageKey, MetagraphError, Result};

use crate::conditional::ConditionalMetagraph;
use crate::expression::validate_expression;

/// An ordered list of `(proposition, truth)` pairs partitioning a
/// conditional metagraph's propositions into true and false sets. Later
/// entries for a proposition already recorded true are ignored, matching
/// how a single assignment is built up one pair at a time.
pub type Interpretation<X> = Vec<(X, bool)>;

/// Every interpretation assigning a concrete truth value to every
/// proposition in `propositions`, the empty (all-false) assignment first.
/// A convenience for callers who want exhaustive coverage; the connectivity
/// predicates below take their interpretations explicitly rather than
/// calling this themselves.
pub fn all_interpretations<X: Element>(propositions: &ElementSet<X>) -> Vec<Interpretation<X>> {
    propositions
        .iter()
        .cloned()
        .map(|p| vec![(p, false), (p, true)])
        .multi_cartesian_product()
        .map(|assignment| assignment.into_iter().collect())
        .collect()
}

fn partition<X: Element>(
    propositions: &ElementSet<X>,
    interpretation: &Interpretation<X>,
) -> Result<(ElementSet<X>, ElementSet<X>)> {
    let mut true_propositions = ElementSet::default();
    let mut false_propositions = ElementSet::default();
    for (proposition, truth) in interpretation {
        if !propositions.contains(proposition) {
            return fail(MetagraphError::invalid_argument(
                "interpretations",
                MessageKey::ArgumentsInvalid,
            ));
        }
        if *truth {
            true_propositions.insert(proposition.clone());
        } else if !true_propositions.contains(proposition) {
            false_propositions.insert(proposition.clone());
        }
    }
    Ok((true_propositions, false_propositions))
}

fn validate_expressions<X>(propositions: &ElementSet<X>, expressions: &[String]) -> Result<()>
where
    X: Element + ToString,
{
    if expressions.is_empty() {
        return fail(MetagraphError::invalid_argument(
            "logical_expressions",
            MessageKey::ValueNull,
        ));
    }
    for expression in expressions {
        validate_expression(expression, propositions)?;
    }
    Ok(())
}

fn check_common<X>(
    cm: &ConditionalMetagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
    expressions: &[String],
    interpretations: &[Interpretation<X>],
) -> Result<()>
where
    X: Element + ToString,
{
    if source.is_empty() {
        return fail(MetagraphError::invalid_argument("source", MessageKey::ValueNull));
    }
    if target.is_empty() {
        return fail(MetagraphError::invalid_argument("target", MessageKey::ValueNull));
    }
    if !source.iter().all(|x| cm.variables().contains(x)) {
        return fail(MetagraphError::range_violation("source", MessageKey::NotASubset));
    }
    if !target.iter().all(|x| cm.variables().contains(x)) {
        return fail(MetagraphError::range_violation("target", MessageKey::NotASubset));
    }
    if interpretations.is_empty() {
        return fail(MetagraphError::invalid_argument(
            "interpretations",
            MessageKey::ValueNull,
        ));
    }
    validate_expressions(cm.propositions(), expressions)
}

/// `true` iff, for at least one of `interpretations`, the resulting context
/// has at least one metapath from `source` to `target`.
///
/// `expressions` are validated (every token must name a proposition) but
/// never evaluated — only `interpretations` actually gates which context is
/// built, matching the source this was distilled from.
pub fn is_connected<X>(
    cm: &ConditionalMetagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
    expressions: &[String],
    interpretations: &[Interpretation<X>],
) -> Result<bool>
where
    X: Element + ToString,
{
    check_common(cm, source, target, expressions, interpretations)?;
    for interpretation in interpretations {
        let (true_propositions, false_propositions) = partition(cm.propositions(), interpretation)?;
        let context = cm.get_context(&true_propositions, &false_propositions)?;
        let metapaths = context.get_all_metapaths_from(source, target, Default::default())?;
        if !metapaths.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// `true` iff every one of `interpretations` yields at least one metapath
/// from `source` to `target`.
pub fn is_fully_connected<X>(
    cm: &ConditionalMetagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
    expressions: &[String],
    interpretations: &[Interpretation<X>],
) -> Result<bool>
where
    X: Element + ToString,
{
    check_common(cm, source, target, expressions, interpretations)?;
    for interpretation in interpretations {
        let (true_propositions, false_propositions) = partition(cm.propositions(), interpretation)?;
        let context = cm.get_context(&true_propositions, &false_propositions)?;
        let metapaths = context.get_all_metapaths_from(source, target, Default::default())?;
        if metapaths.is_empty() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `true` iff every one of `interpretations` yields at most one metapath
/// from `source` to `target`.
///
/// Despite the name, "redundantly connected" here means the opposite of
/// what it sounds like: finding *more than one* metapath under some
/// interpretation is what makes the connection redundant, so that case
/// returns `false`. Kept as-is rather than inverted, matching the
/// connectivity predicate this was distilled from.
pub fn is_redundantly_connected<X>(
    cm: &ConditionalMetagraph<X>,
    source: &ElementSet<X>,
    target: &ElementSet<X>,
    expressions: &[String],
    interpretations: &[Interpretation<X>],
) -> Result<bool>
where
    X: Element + ToString,
{
    check_common(cm, source, target, expressions, interpretations)?;
    for interpretation in interpretations {
        let (true_propositions, false_propositions) = partition(cm.propositions(), interpretation)?;
        let context = cm.get_context(&true_propositions, &false_propositions)?;
        let metapaths = context.get_all_metapaths_from(source, target, Default::default())?;
        if metapaths.len() > 1 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `true` iff, for every one of `interpretations` and every variable `x`,
/// at most one edge of the induced context has `x` in its outvertex.
///
/// A structural check over the context's edges, not a metapath count: a
/// variable produced by two distinct edges under the same interpretation is
/// an ambiguity regardless of whether either edge participates in a
/// metapath.
pub fn is_non_redundant<X>(
    cm: &ConditionalMetagraph<X>,
    expressions: &[String],
    interpretations: &[Interpretation<X>],
) -> Result<bool>
where
    X: Element + ToString,
{
    if interpretations.is_empty() {
        return fail(MetagraphError::invalid_argument(
            "interpretations",
            MessageKey::ValueNull,
        ));
    }
    validate_expressions(cm.propositions(), expressions)?;

    for interpretation in interpretations {
        let (true_propositions, false_propositions) = partition(cm.propositions(), interpretation)?;
        let context = cm.get_context(&true_propositions, &false_propositions)?;
        for x in cm.variables() {
            let producers = context
                .metagraph()
                .edges()
                .iter()
                .filter(|edge| edge.outvertex().contains(x))
                .count();
            if producers > 1 {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Convenience: the interpretation assigning every proposition in
/// `true_propositions` true and every other proposition in `propositions`
/// false.
pub fn interpretation_from<X: Element>(
    propositions: &ElementSet<X>,
    true_propositions: &ElementSet<X>,
) -> Interpretation<X> {
    propositions
        .iter()
        .map(|p| (p.clone(), true_propositions.contains(p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use metagraph_core::{element_set, Edge};

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

    fn seed_interpretation() -> Vec<Interpretation<String>> {
        vec![vec![("p1".to_string(), true), ("p2".to_string(), false)]]
    }

    #[test]
    fn seed_scenario_matches_every_connectivity_predicate() {
        let cmg = seed_cmg();
        let source = element_set(["1".to_string(), "3".to_string()]);
        let target = element_set(["4".to_string()]);
        let expressions = vec!["p1 | p2".to_string()];
        let interpretations = seed_interpretation();

        assert_eq!(is_connected(&cmg, &source, &target, &expressions, &interpretations).unwrap(), false);
        assert_eq!(is_fully_connected(&cmg, &source, &target, &expressions, &interpretations).unwrap(), false);
        assert_eq!(
            is_redundantly_connected(&cmg, &source, &target, &expressions, &interpretations).unwrap(),
            true
        );
        assert_eq!(is_non_redundant(&cmg, &expressions, &interpretations).unwrap(), true);
    }

    #[test]
    fn unknown_token_in_expression_is_rejected() {
        let cmg = seed_cmg();
        let source = element_set(["1".to_string()]);
        let target = element_set(["4".to_string()]);
        let expressions = vec!["p1 | p3".to_string()];
        let interpretations = seed_interpretation();
        assert!(is_connected(&cmg, &source, &target, &expressions, &interpretations).is_err());
    }

    #[test]
    fn empty_interpretations_is_rejected() {
        let cmg = seed_cmg();
        let source = element_set(["1".to_string()]);
        let target = element_set(["4".to_string()]);
        let expressions = vec!["p1".to_string()];
        assert!(is_connected(&cmg, &source, &target, &expressions, &[]).is_err());
    }

    #[test]
    fn all_interpretations_enumerates_every_truth_assignment() {
        let propositions = element_set(["p1".to_string(), "p2".to_string()]);
        let all = all_interpretations(&propositions);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn interpretation_from_marks_only_the_given_propositions_true() {
        let propositions = element_set(["p1".to_string(), "p2".to_string()]);
        let true_props = element_set(["p1".to_string()]);
        let interpretation = interpretation_from(&propositions, &true_props);
        assert!(interpretation.contains(&("p1".to_string(), true)));
        assert!(interpretation.contains(&("p2".to_string(), false)));
    }
}
