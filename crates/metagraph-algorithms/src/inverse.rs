use std::fmt;

use metagraph_core::{element_set, Edge, Element, Incidence, Metagraph};

/// The vocabulary of an inverse metagraph: every element of the original
/// metagraph's edge set becomes a node here, plus two sentinels marking
/// "no predecessor" (`Alpha`) and "no successor" (`Beta`) so every edge of
/// the inverse still has a non-empty invertex and outvertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InverseElement {
    Alpha,
    Beta,
    /// An original edge, identified by its position in `metagraph.edges()`.
    Edge(usize),
}

impl fmt::Display for InverseElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha => write!(f, "alpha"),
            Self::Beta => write!(f, "beta"),
            Self::Edge(index) => write!(f, "e{index}"),
        }
    }
}

/// Builds the inverse metagraph (§4.6): elements of the inverse are the
/// original metagraph's edges.
///
/// For every edge `j` (a column of the incidence matrix) and every element
/// `r` it consumes (`incidence[r][j] = -1`), if `r` is also produced by at
/// least one edge `k` (`incidence[r][k] = +1`), that `k` becomes one of
/// `j`'s predecessors. The synthesised (pre-compression) edge is
/// `{predecessors of j} -> {j}`, labelled with every `(r, predecessor)`
/// pair that contributed. Edges sharing both invertex and label are then
/// compressed into one, unioning their outvertices.
///
/// Elements that are only ever consumed (never produced) get an edge from
/// [`InverseElement::Alpha`] for each edge consuming them; elements only
/// ever produced get an edge to [`InverseElement::Beta`] for each edge
/// producing them.
pub fn get_inverse<X: Element>(metagraph: &Metagraph<X>) -> Metagraph<InverseElement> {
    let incidence = metagraph.incidence_matrix();
    let edges = incidence.edges();
    let elements = incidence.elements();
    let edge_count = edges.len();
    let element_count = elements.len();

    struct Raw {
        invertex: Vec<usize>,
        outvertex: usize,
        label: String,
    }
    let mut raw = Vec::new();

    for j in 0..edge_count {
        let mut invertex = Vec::new();
        let mut label_parts = Vec::new();
        for r in 0..element_count {
            if incidence.cell(r, j) != Some(Incidence::Minus) {
                continue;
            }
            let predecessors: Vec<usize> = (0..edge_count)
                .filter(|&k| incidence.cell(r, k) == Some(Incidence::Plus))
                .collect();
            if predecessors.is_empty() {
                continue;
            }
            for k in predecessors {
                if !invertex.contains(&k) {
                    invertex.push(k);
                }
                label_parts.push(format!("<{:?}, {}>", elements[r], edges[k]));
            }
        }
        if !invertex.is_empty() {
            raw.push(Raw {
                invertex,
                outvertex: j,
                label: label_parts.join(", "),
            });
        }
    }

    // Compress: edges sharing invertex and label merge, unioning outvertex.
    let mut compressed: Vec<(Vec<usize>, Vec<usize>, String)> = Vec::new();
    for item in raw {
        if let Some(existing) = compressed
            .iter_mut()
            .find(|(invertex, _, label)| *invertex == item.invertex && *label == item.label)
        {
            if !existing.1.contains(&item.outvertex) {
                existing.1.push(item.outvertex);
            }
        } else {
            compressed.push((item.invertex, vec![item.outvertex], item.label));
        }
    }

    // alpha/beta links for elements that are only ever consumed or produced.
    let mut alpha_links: Vec<(usize, String)> = Vec::new();
    let mut beta_links: Vec<(usize, String)> = Vec::new();
    for r in 0..element_count {
        let has_minus = (0..edge_count).any(|j| incidence.cell(r, j) == Some(Incidence::Minus));
        let has_plus = (0..edge_count).any(|j| incidence.cell(r, j) == Some(Incidence::Plus));
        if has_minus && !has_plus {
            for j in 0..edge_count {
                if incidence.cell(r, j) == Some(Incidence::Minus) {
                    alpha_links.push((j, format!("<{:?}, alpha>", elements[r])));
                }
            }
        } else if has_plus && !has_minus {
            for j in 0..edge_count {
                if incidence.cell(r, j) == Some(Incidence::Plus) {
                    beta_links.push((j, format!("<{:?}, {}>", elements[r], edges[j])));
                }
            }
        }
    }

    let mut generating_set = element_set([InverseElement::Alpha, InverseElement::Beta]);
    for index in 0..edge_count {
        generating_set.insert(InverseElement::Edge(index));
    }
    let mut inverse = Metagraph::new(generating_set).expect("non-empty by construction");

    for (invertex, outvertex, label) in compressed {
        let invertex = invertex.into_iter().map(InverseElement::Edge).collect();
        let outvertex = outvertex.into_iter().map(InverseElement::Edge).collect();
        let edge =
            Edge::with_label(invertex, outvertex, Some(label)).expect("edge endpoints are non-empty by construction");
        if !inverse.edges().contains(&edge) {
            inverse.add_edge(edge).expect("elements are in the generating set");
        }
    }
    for (j, label) in alpha_links {
        let edge = Edge::with_label(
            element_set([InverseElement::Alpha]),
            element_set([InverseElement::Edge(j)]),
            Some(label),
        )
        .expect("singleton sets are non-empty");
        if !inverse.edges().contains(&edge) {
            inverse.add_edge(edge).expect("elements are in the generating set");
        }
    }
    for (j, label) in beta_links {
        let edge = Edge::with_label(
            element_set([InverseElement::Edge(j)]),
            element_set([InverseElement::Beta]),
            Some(label),
        )
        .expect("singleton sets are non-empty");
        if !inverse.edges().contains(&edge) {
            inverse.add_edge(edge).expect("elements are in the generating set");
        }
    }

    inverse
}
