use metagraph_core::{
    custom_multiply, fail, transpose_rows, Edge, Element, ElementSet, Incidence, MessageKey, Metagraph,
    MetagraphError, Result,
};

/// Renders a flow edge's label from its three independently-unionable
/// components: the excluded elements the flow passed through, the labels
/// of the edges that fed its invertex, and the labels of the edges that
/// fed its outvertex. Inverse of [`parse_label`].
pub fn format_label(excluded: &[String], via_in: &[String], via_out: &[String]) -> String {
    format!("{{{}}} <{}; {}>", excluded.join(","), via_in.join(","), via_out.join(","))
}

/// Recovers the three components of a label produced by [`format_label`].
/// `None` if `label` isn't in that shape.
pub fn parse_label(label: &str) -> Option<(Vec<String>, Vec<String>, Vec<String>)> {
    let lt = label.find('<')?;
    let gt = label.rfind('>')?;
    if gt < lt {
        return None;
    }
    let excluded_part = label[..lt].trim().trim_start_matches('{').trim_end_matches('}').trim();
    let between = &label[lt + 1..gt];
    let semi = between.find(';')?;
    let via_in = &between[..semi];
    let via_out = &between[semi + 1..];

    let split_list = |s: &str| -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(ToString::to_string)
            .collect()
    };
    Some((split_list(excluded_part), split_list(via_in), split_list(via_out)))
}

fn union_unique(a: &[String], b: &[String]) -> Vec<String> {
    let mut result = a.to_vec();
    for item in b {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    result
}

/// Builds the element-flow metagraph over `target_set`, per §4.6:
/// partitions the incidence matrix into `G1` (rows for `target_set`) and
/// `G2` (rows for the complement), computes `M = G2 · G1ᵀ` through
/// [`metagraph_core::custom_multiply`], and for each row (an excluded
/// element) groups columns that witness the same edge with the same sign
/// into a shared invertex (sign `Plus`) or outvertex (sign `Minus`),
/// synthesizing one edge per invertex/outvertex pairing. Edges that end up
/// with identical invertex and outvertex are merged, unioning their label
/// components rather than being kept as duplicates.
///
/// # Errors
/// Returns [`MetagraphError::InvalidArgument`] if `target_set` is empty, or
/// [`MetagraphError::RangeViolation`] if it isn't a subset of `metagraph`'s
/// generating set.
pub fn get_efm<X: Element>(metagraph: &Metagraph<X>, target_set: &ElementSet<X>) -> Result<Option<Metagraph<X>>> {
    if target_set.is_empty() {
        return fail(MetagraphError::invalid_argument(
            "target_set",
            MessageKey::ValueNull,
        ));
    }
    if !target_set.iter().all(|x| metagraph.generating_set().contains(x)) {
        return fail(MetagraphError::range_violation(
            "target_set",
            MessageKey::NotASubset,
        ));
    }

    let incidence = metagraph.incidence_matrix();
    let excluded: Vec<X> = metagraph
        .generating_set()
        .iter()
        .filter(|x| !target_set.contains(*x))
        .cloned()
        .collect();
    let included: Vec<X> = target_set.iter().cloned().collect();

    if excluded.is_empty() {
        return Ok(None);
    }

    let g1 = incidence.rows_for(included.iter());
    let g2 = incidence.rows_for(excluded.iter());
    let g1_t_owned = transpose_rows(&g1);
    let g1_t_refs: Vec<&[Option<Incidence>]> = g1_t_owned.iter().map(Vec::as_slice).collect();

    let product = custom_multiply(&g2, &g1_t_refs, incidence.edges());

    let mut edges: Vec<Edge<X>> = Vec::new();
    for (row_index, row) in product.iter().enumerate() {
        let excluded_element = format!("{:?}", excluded[row_index]);

        let mut plus_witnesses: Vec<&Edge<X>> = Vec::new();
        let mut minus_witnesses: Vec<&Edge<X>> = Vec::new();
        for cell in row {
            for (sign, edge) in cell {
                let bucket = match sign {
                    Incidence::Plus => &mut plus_witnesses,
                    Incidence::Minus => &mut minus_witnesses,
                };
                if !bucket.iter().any(|e| *e == edge) {
                    bucket.push(edge);
                }
            }
        }

        let mut invertices: Vec<(ElementSet<X>, String)> = Vec::new();
        for witness in &plus_witnesses {
            let mut set = ElementSet::default();
            for (col, cell) in row.iter().enumerate() {
                if cell.iter().any(|(sign, edge)| *sign == Incidence::Plus && edge == *witness) {
                    set.insert(included[col].clone());
                }
            }
            if !set.is_empty() {
                invertices.push((set, format!("{witness}")));
            }
        }

        let mut outvertices: Vec<(ElementSet<X>, String)> = Vec::new();
        for witness in &minus_witnesses {
            let mut set = ElementSet::default();
            for (col, cell) in row.iter().enumerate() {
                if cell.iter().any(|(sign, edge)| *sign == Incidence::Minus && edge == *witness) {
                    set.insert(included[col].clone());
                }
            }
            if !set.is_empty() {
                outvertices.push((set, format!("{witness}")));
            }
        }

        for (invertex, in_label) in &invertices {
            for (outvertex, out_label) in &outvertices {
                let label = format_label(
                    std::slice::from_ref(&excluded_element),
                    std::slice::from_ref(in_label),
                    std::slice::from_ref(out_label),
                );
                let edge = Edge::with_label(invertex.clone(), outvertex.clone(), Some(label))?;
                if !edges.iter().any(|e| e == &edge) {
                    edges.push(edge);
                }
            }
        }
    }

    // Merge edges sharing invertex and outvertex, unioning their label
    // components instead of keeping them as separate parallel edges.
    let mut merged: Vec<Edge<X>> = Vec::new();
    for edge in edges {
        let existing = merged
            .iter()
            .position(|e| e.invertex() == edge.invertex() && e.outvertex() == edge.outvertex());
        match existing {
            None => merged.push(edge),
            Some(index) => {
                let current = &merged[index];
                let (mut excl, mut via_in, mut via_out) = parse_label(current.label().unwrap_or_default())
                    .unwrap_or_default();
                if let Some((new_excl, new_in, new_out)) = parse_label(edge.label().unwrap_or_default()) {
                    excl = union_unique(&excl, &new_excl);
                    via_in = union_unique(&via_in, &new_in);
                    via_out = union_unique(&via_out, &new_out);
                }
                let label = format_label(&excl, &via_in, &via_out);
                merged[index] = Edge::with_label(current.invertex().clone(), current.outvertex().clone(), Some(label))?;
            }
        }
    }

    if merged.is_empty() {
        return Ok(None);
    }

    let mut generating_set: ElementSet<X> = ElementSet::default();
    for edge in &merged {
        generating_set.extend(edge.invertex().iter().cloned());
        generating_set.extend(edge.outvertex().iter().cloned());
    }
    let mut flow = Metagraph::new(generating_set)?;
    flow.add_edges_from(merged)?;
    Ok(Some(flow))
}
