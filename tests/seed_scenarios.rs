//! End-to-end coverage of the seed scenarios through the public facade:
//! build a metagraph purely via `metagraph::prelude`, run the structural
//! algorithms, and check the same shapes the lower-level crates' unit
//! tests check in isolation.

use metagraph::prelude::*;

fn seed_metagraph() -> Metagraph<i32> {
    let mut mg = Metagraph::new(element_set(1..=7)).unwrap();
    mg.add_edge(Edge::new(element_set([1]), element_set([2, 3])).unwrap()).unwrap();
    mg.add_edge(Edge::new(element_set([1, 4]), element_set([5])).unwrap()).unwrap();
    mg.add_edge(Edge::new(element_set([3]), element_set([6, 7])).unwrap()).unwrap();
    mg
}

#[test]
fn seed_metagraph_shape_matches_the_worked_example() {
    let mg = seed_metagraph();
    assert_eq!(mg.edges().len(), 3);
    assert_eq!(mg.nodes().len(), 6);
}

#[test]
fn the_one_to_seven_metapath_is_found_through_the_facade() {
    let mg = seed_metagraph();
    let source = element_set([1]);
    let target = element_set([7]);
    let metapaths = get_all_metapaths_from(&mg, &source, &target, MetapathCap::default()).unwrap();
    assert_eq!(metapaths.len(), 1);
    assert!(is_metapath(&mg, &metapaths[0]));
    assert!(is_dominant_metapath(&mg, &metapaths[0]));
}

#[test]
fn projection_onto_a_sub_vocabulary_through_the_facade() {
    let mut mg = Metagraph::new(element_set(1..=8)).unwrap();
    mg.add_edge(Edge::new(element_set([1]), element_set([3, 4])).unwrap()).unwrap();
    mg.add_edge(Edge::new(element_set([3]), element_set([6])).unwrap()).unwrap();
    mg.add_edge(Edge::new(element_set([2]), element_set([5])).unwrap()).unwrap();
    mg.add_edge(Edge::new(element_set([4, 5]), element_set([7])).unwrap()).unwrap();
    mg.add_edge(Edge::new(element_set([6, 7]), element_set([8])).unwrap()).unwrap();

    let target = element_set([1, 2, 6, 7, 8]);
    let projected = get_projection(&mg, &target).unwrap().expect("projection exists");
    assert_eq!(projected.edges().len(), 4);
    assert_eq!(projected.nodes().len(), 7);
}

#[test]
fn conditional_metagraph_round_trips_through_the_facade() {
    let variables = element_set((1..=7).map(|n: i32| n.to_string()));
    let propositions = element_set(["p1".to_string(), "p2".to_string()]);
    let mut cmg = metagraph::conditional::ConditionalMetagraph::new(variables, propositions).unwrap();
    cmg.add_edge(
        Edge::with_attributes(element_set(["1".into(), "2".into()]), element_set(["p1".into()]), element_set(["3".into(), "4".into()]))
            .unwrap(),
    )
    .unwrap();
    cmg.add_edge(
        Edge::with_attributes(element_set(["2".into()]), element_set(["p2".into()]), element_set(["4".into(), "6".into()])).unwrap(),
    )
    .unwrap();

    let true_props = element_set(["p1".to_string()]);
    let false_props = element_set(["p2".to_string()]);
    let context = cmg.get_context(&true_props, &false_props).unwrap();
    assert_eq!(context.metagraph().edges().len(), 1);
}
