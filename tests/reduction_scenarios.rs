mod util;

use morse_homology::prelude::*;
use util::Gen;

fn g(id: u32, inner: i32) -> Gen {
    Graded::new(id, 0, inner)
}

fn survivors<Gr: ChainGraph<Generator = Gen>>(graph: &Gr) -> Vec<u32> {
    graph.vertices_sorted().into_iter().map(|x| x.id).collect()
}

#[test]
fn two_sources_one_target() {
    let (a, b, c) = (g(1, 1), g(2, 1), g(3, 0));
    let d = BoundaryTable::from_pairs([(a.clone(), c.clone()), (b.clone(), c.clone())]);
    let (graph, _) =
        reduced_graph::<ArenaGraph<Gen>, _, _>([a, b, c], &d, PivotStrategy::Min).unwrap();
    assert_eq!(survivors(&graph), vec![2]);
    assert_eq!(survivor_counts(&graph, 0), vec![RankEntry::new(1, 0, 1)]);
}

#[test]
fn full_cancellation_of_a_square() {
    // a -> {c, d}, b -> {c, d}: the zigzag toggle deletes b -> d
    let (a, b, c, dd) = (g(1, 1), g(2, 1), g(3, 0), g(4, 0));
    let d = BoundaryTable::from_pairs([
        (a.clone(), c.clone()),
        (a.clone(), dd.clone()),
        (b.clone(), c.clone()),
        (b.clone(), dd.clone()),
    ]);
    let (graph, stats) =
        reduced_graph::<InMemoryGraph<Gen>, _, _>([a, b, c, dd], &d, PivotStrategy::Min).unwrap();
    assert_eq!(survivors(&graph), vec![2, 4]);
    assert_eq!(stats.edges_toggled_off, 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn three_degree_chain_with_boundary() {
    // a 2-simplex: face f, edges e1..e3, vertices v1..v3
    let f = g(10, 2);
    let e: Vec<Gen> = (20..23).map(|i| g(i, 1)).collect();
    let v: Vec<Gen> = (30..33).map(|i| g(i, 0)).collect();
    let mut d = BoundaryTable::new();
    d.insert(f.clone(), e.clone());
    d.insert(e[0].clone(), [v[0].clone(), v[1].clone()]);
    d.insert(e[1].clone(), [v[1].clone(), v[2].clone()]);
    d.insert(e[2].clone(), [v[0].clone(), v[2].clone()]);

    let gens: Vec<Gen> = std::iter::once(f).chain(e).chain(v).collect();
    for pivot in [
        PivotStrategy::Min,
        PivotStrategy::Max,
        PivotStrategy::Scrambled { seed: 3 },
    ] {
        let (graph, _) = reduced_graph::<ArenaGraph<Gen>, _, _>(gens.clone(), &d, pivot).unwrap();
        // contractible: one vertex survives
        assert_eq!(survivor_counts(&graph, 0), vec![RankEntry::new(0, 0, 1)], "{pivot:?}");
    }
}

#[test]
fn mod2_oracle_drops_even_coefficients() {
    // d(a) = 2c + d: only a -> d is an edge
    let (a, c, dd) = (g(1, 1), g(3, 0), g(4, 0));
    let (c2, d2) = (c.clone(), dd.clone());
    let oracle = Mod2::new(move |x: &Gen| {
        if x.id == 1 {
            vec![(c2.clone(), 2i32), (d2.clone(), 1)]
        } else {
            vec![]
        }
    });
    let (graph, stats) =
        reduced_graph::<ArenaGraph<Gen>, _, _>([a, c, dd], &oracle, PivotStrategy::Min).unwrap();
    assert_eq!(survivors(&graph), vec![3]);
    assert_eq!(stats.edges_built, 1);
}

#[test]
fn reduce_slice_into_a_caller_owned_graph() {
    let (a, b) = (g(1, 1), g(2, 0));
    let d = BoundaryTable::from_pairs([(a.clone(), b.clone())]);
    let mut graph = ArenaGraph::with_capacity(2);
    let stats = reduce_slice(&mut graph, [a.clone(), b.clone()], &d, PivotStrategy::Min).unwrap();
    assert_eq!(stats.pairs_cancelled, 1);
    assert!(graph.is_empty());
    // tombstoned slots stay allocated, identities are gone
    assert_eq!(graph.slot_count(), 2);
    assert!(graph.index(&a).is_none());
    graph.validate_invariants().unwrap();
}

#[test]
fn custom_generator_type() {
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct State {
        perm: [u8; 3],
        alexander: i32,
        maslov: i32,
    }
    impl Bigraded for State {
        fn alexander_degree(&self) -> i32 {
            self.alexander
        }
        fn maslov_degree(&self) -> i32 {
            self.maslov
        }
    }
    let s = |perm, maslov| State {
        perm,
        alexander: 0,
        maslov,
    };
    let (x, y, z) = (s([0, 1, 2], 1), s([1, 0, 2], 0), s([2, 1, 0], 0));
    let (y2, z2) = (y.clone(), z.clone());
    let d = move |st: &State| {
        if st.maslov == 1 {
            vec![y2.clone(), z2.clone()]
        } else {
            vec![]
        }
    };
    let table = compute_rank_table([x, y, z], &d, &ReductionConfig::default()).unwrap();
    assert_eq!(table.into_triples(), vec![(0, 0, 1)]);
}
