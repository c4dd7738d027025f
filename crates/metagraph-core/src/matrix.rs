use crate::edge::Edge;
use crate::element::{Element, ElementSet};
use crate::setops::multiset_eq_by;
use crate::triple::{union_triples, Triple};

/// A cell of an adjacency matrix: the set of triples witnessing every way
/// `x_i` reaches `x_j` recorded so far.
pub type Cell<X> = Vec<Triple<X>>;

/// The triple-valued adjacency matrix of a metagraph over a fixed element
/// order. Row/column `i` is `order[i]`.
///
/// Multiplication and addition are the two triple-algebra operations this
/// matrix is built for: `add` is cellwise triple-set union, `multiply` is
/// the usual matrix product with `+` replaced by triple-set union and `*`
/// replaced by [`Triple::multiply`].
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix<X: Element> {
    order: Vec<X>,
    cells: Vec<Vec<Cell<X>>>,
}

impl<X: Element> AdjacencyMatrix<X> {
    /// An all-empty matrix over `order`.
    pub fn empty(order: Vec<X>) -> Self {
        let n = order.len();
        Self {
            cells: vec![vec![Vec::new(); n]; n],
            order,
        }
    }

    /// Builds the matrix directly from a metagraph's edge set: for every
    /// edge and every `(x_i, x_j)` pair with `x_i` in its invertex and `x_j`
    /// in its outvertex, deposits a triple at `(i, j)` whose coinputs are
    /// the rest of the invertex and whose cooutputs are the rest of the
    /// outvertex (both `None` if that leaves nothing).
    pub fn from_edges(order: Vec<X>, edges: &[Edge<X>]) -> Self {
        let mut matrix = Self::empty(order);
        for edge in edges {
            for x_i in edge.invertex() {
                let Some(i) = matrix.index_of(x_i) else {
                    continue;
                };
                let mut coinputs: ElementSet<X> = edge.invertex().clone();
                coinputs.shift_remove(x_i);
                let coinputs = if coinputs.is_empty() {
                    None
                } else {
                    Some(coinputs)
                };
                for x_j in edge.outvertex() {
                    let Some(j) = matrix.index_of(x_j) else {
                        continue;
                    };
                    let mut cooutputs: ElementSet<X> = edge.outvertex().clone();
                    cooutputs.shift_remove(x_j);
                    let cooutputs = if cooutputs.is_empty() {
                        None
                    } else {
                        Some(cooutputs)
                    };
                    let triple = Triple::new(coinputs.clone(), cooutputs, vec![edge.clone()]);
                    matrix.cells[i][j] = union_triples(&matrix.cells[i][j], &[triple]);
                }
            }
        }
        matrix
    }

    pub fn order(&self) -> &[X] {
        &self.order
    }

    pub fn dimension(&self) -> usize {
        self.order.len()
    }

    pub fn index_of(&self, element: &X) -> Option<usize> {
        self.order.iter().position(|x| x == element)
    }

    pub fn cell(&self, i: usize, j: usize) -> &Cell<X> {
        &self.cells[i][j]
    }

    pub fn get(&self, x_i: &X, x_j: &X) -> Option<&Cell<X>> {
        let i = self.index_of(x_i)?;
        let j = self.index_of(x_j)?;
        Some(&self.cells[i][j])
    }

    /// Cellwise triple-set union. Both matrices must share the same order.
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.order, other.order, "adjacency matrices must share an element order to be added");
        let n = self.dimension();
        let mut cells = vec![vec![Vec::new(); n]; n];
        for i in 0..n {
            for j in 0..n {
                cells[i][j] = union_triples(&self.cells[i][j], &other.cells[i][j]);
            }
        }
        Self {
            order: self.order.clone(),
            cells,
        }
    }

    /// The triple-algebra matrix product: `(self * other)[i][j]` is the
    /// union, over every intermediate `x_k`, of every pairwise
    /// [`Triple::multiply`] between a triple in `self[i][k]` and a triple
    /// in `other[k][j]`.
    pub fn multiply(&self, other: &Self) -> Self {
        debug_assert_eq!(self.order, other.order, "adjacency matrices must share an element order to be multiplied");
        let n = self.dimension();
        let mut cells = vec![vec![Vec::new(); n]; n];
        for i in 0..n {
            for j in 0..n {
                let mut cell = Vec::new();
                for k in 0..n {
                    if self.cells[i][k].is_empty() || other.cells[k][j].is_empty() {
                        continue;
                    }
                    let x_i = &self.order[i];
                    let x_j = &self.order[j];
                    let x_k = &self.order[k];
                    let mut products = Vec::new();
                    for left in &self.cells[i][k] {
                        for right in &other.cells[k][j] {
                            products.push(left.multiply(right, x_i, x_j, x_k));
                        }
                    }
                    cell = union_triples(&cell, &products);
                }
                cells[i][j] = cell;
            }
        }
        Self {
            order: self.order.clone(),
            cells,
        }
    }

    /// Swaps rows and columns and, within each surviving triple, swaps
    /// coinputs and cooutputs — the transpose reverses every edge, so what
    /// used to flow in now flows out.
    pub fn transpose(&self) -> Self {
        let n = self.dimension();
        let mut cells = vec![vec![Vec::new(); n]; n];
        for i in 0..n {
            for j in 0..n {
                cells[j][i] = self.cells[i][j]
                    .iter()
                    .map(|triple| {
                        Triple::new(
                            triple.cooutputs().cloned(),
                            triple.coinputs().cloned(),
                            triple.edges().to_vec(),
                        )
                    })
                    .collect();
            }
        }
        Self {
            order: self.order.clone(),
            cells,
        }
    }

    /// The reflexive-transitive closure `A*`, computed by repeated
    /// self-multiplication and union until a fixed point, bounded by the
    /// number of elements (a path cannot usefully revisit every element
    /// more than once before it has either closed a cycle or exhausted the
    /// generating set).
    pub fn closure(&self) -> Self {
        let mut closure = self.clone();
        for _ in 0..self.dimension().max(1) {
            let next = closure.add(&closure.multiply(self));
            if next == closure {
                return next;
            }
            closure = next;
        }
        closure
    }
}

impl<X: Element> PartialEq for AdjacencyMatrix<X> {
    fn eq(&self, other: &Self) -> bool {
        if self.order != other.order {
            return false;
        }
        let n = self.dimension();
        for i in 0..n {
            for j in 0..n {
                if !multiset_eq_by(&self.cells[i][j], &other.cells[i][j], |a, b| a == b) {
                    return false;
                }
            }
        }
        true
    }
}

impl<X: Element> Eq for AdjacencyMatrix<X> {}

/// The sign of an element's participation in an edge: `Minus` if the
/// element is one of the edge's inputs, `Plus` if it is one of the edge's
/// outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incidence {
    Plus,
    Minus,
}

/// The signed incidence matrix of a metagraph: rows are elements, columns
/// are edges, and a cell is `Some(Incidence::Minus)` if the element is an
/// input to the edge, `Some(Incidence::Plus)` if it is an output, or `None`
/// if the element does not participate in the edge at all.
#[derive(Debug, Clone)]
pub struct IncidenceMatrix<X: Element> {
    elements: Vec<X>,
    edges: Vec<Edge<X>>,
    cells: Vec<Vec<Option<Incidence>>>,
}

impl<X: Element> IncidenceMatrix<X> {
    pub fn build(elements: Vec<X>, edges: Vec<Edge<X>>) -> Self {
        let mut cells = vec![vec![None; edges.len()]; elements.len()];
        for (i, element) in elements.iter().enumerate() {
            for (j, edge) in edges.iter().enumerate() {
                cells[i][j] = if edge.has_outvertex_element(element) {
                    Some(Incidence::Plus)
                } else if edge.has_invertex_element(element) {
                    Some(Incidence::Minus)
                } else {
                    None
                };
            }
        }
        Self {
            elements,
            edges,
            cells,
        }
    }

    pub fn elements(&self) -> &[X] {
        &self.elements
    }

    pub fn edges(&self) -> &[Edge<X>] {
        &self.edges
    }

    pub fn cell(&self, element_index: usize, edge_index: usize) -> Option<Incidence> {
        self.cells[element_index][edge_index]
    }

    /// The rows belonging to `subset`, in `subset`'s iteration order — the
    /// `G1`/`G2` split `get_efm` makes between a sub-vocabulary and its
    /// complement.
    pub fn rows_for<'a>(&'a self, subset: impl IntoIterator<Item = &'a X>) -> Vec<&'a [Option<Incidence>]> {
        subset
            .into_iter()
            .filter_map(|x| self.elements.iter().position(|e| e == x))
            .map(|i| self.cells[i].as_slice())
            .collect()
    }
}

/// A signed witness produced by [`custom_multiply`]: the edge `k` through
/// which the flow passed, tagged with the sign the original implementation
/// stores as `+1`/`-1` in the cell of the product matrix.
pub type FlowWitness<X> = (Incidence, Edge<X>);

/// The custom signed multiplication of §4.3: `rows` is an `m x |E|` grid
/// (e.g. `G2`, restricted incidence rows), `cols` is `|E| x n` (e.g. `G1ᵀ`,
/// the transpose of another restricted incidence), and `edges` is the
/// shared edge list both are indexed against.
///
/// Cell `(i, j)` of the result is the set of every `(sign, edge)` witness
/// for which `rows[i][k] = Plus` and `cols[k][j] = Minus` (sign `Plus`), or
/// `rows[i][k] = Minus` and `cols[k][j] = Minus` (sign `Minus`), for some
/// `k`. Any other combination of incidences contributes nothing, matching
/// the original's `custom_add_matrix_elements`.
pub fn custom_multiply<X: Element>(
    rows: &[&[Option<Incidence>]],
    cols: &[&[Option<Incidence>]],
    edges: &[Edge<X>],
) -> Vec<Vec<Vec<FlowWitness<X>>>> {
    let m = rows.len();
    let k_dim = cols.len();
    let n = cols.first().map_or(0, |first_row| first_row.len());
    let mut result = vec![vec![Vec::new(); n]; m];
    for i in 0..m {
        for j in 0..n {
            for k in 0..k_dim {
                let a_ik = rows[i].get(k).copied().flatten();
                let b_kj = cols[k].get(j).copied().flatten();
                let witness = match (a_ik, b_kj) {
                    (Some(Incidence::Plus), Some(Incidence::Minus)) => Some(Incidence::Plus),
                    (Some(Incidence::Minus), Some(Incidence::Minus)) => Some(Incidence::Minus),
                    _ => None,
                };
                if let Some(sign) = witness {
                    if let Some(edge) = edges.get(k) {
                        result[i][j].push((sign, edge.clone()));
                    }
                }
            }
        }
    }
    result
}

/// Transposes an `m x n` grid of incidences into an `n x m` one — used to
/// build `G1ᵀ` from `G1` before feeding it to [`custom_multiply`].
pub fn transpose_rows(rows: &[&[Option<Incidence>]]) -> Vec<Vec<Option<Incidence>>> {
    let n = rows.first().map_or(0, |first_row| first_row.len());
    let mut transposed = vec![vec![None; rows.len()]; n];
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            transposed[j][i] = *cell;
        }
    }
    transposed
}

#[cfg(test)]
mod tests {
    use crate::element::element_set;

    use super::*;

    fn seed_edges() -> Vec<Edge<i32>> {
        vec![
            Edge::new(element_set([1]), element_set([2, 3])).unwrap(),
            Edge::new(element_set([1, 4]), element_set([5])).unwrap(),
            Edge::new(element_set([3]), element_set([6, 7])).unwrap(),
        ]
    }

    #[test]
    fn closure_reaches_a_fixed_point_within_dimension_iterations() {
        let order: Vec<i32> = (1..=7).collect();
        let matrix = AdjacencyMatrix::from_edges(order, &seed_edges());
        let closure = matrix.closure();
        assert_eq!(closure.add(&closure.multiply(&matrix)), closure);
    }

    #[test]
    fn closure_witnesses_the_one_to_seven_reachability() {
        let order: Vec<i32> = (1..=7).collect();
        let matrix = AdjacencyMatrix::from_edges(order, &seed_edges());
        let closure = matrix.closure();
        let i = closure.index_of(&1).unwrap();
        let j = closure.index_of(&7).unwrap();
        assert!(!closure.cell(i, j).is_empty());
    }

    #[test]
    fn transpose_swaps_coinputs_and_cooutputs() {
        let order: Vec<i32> = (1..=7).collect();
        let matrix = AdjacencyMatrix::from_edges(order, &seed_edges());
        let transposed = matrix.transpose();
        let i = matrix.index_of(&1).unwrap();
        let j = matrix.index_of(&3).unwrap();
        let original_cell = matrix.cell(i, j);
        let transposed_cell = transposed.cell(j, i);
        assert_eq!(original_cell.len(), transposed_cell.len());
    }

    #[test]
    fn incidence_matrix_has_correct_dimensions() {
        let elements: Vec<i32> = (1..=7).collect();
        let edges = seed_edges();
        let incidence = IncidenceMatrix::build(elements, edges);
        assert_eq!(incidence.elements().len(), 7);
        assert_eq!(incidence.edges().len(), 3);
        let one = incidence.elements().iter().position(|x| *x == 1).unwrap();
        assert_eq!(incidence.cell(one, 0), Some(Incidence::Minus));
    }
}
