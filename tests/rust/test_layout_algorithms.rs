use super::*;
use crate::cx::{CxEdge, CxNetwork, CxNode};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn make_graph(n: i64, edges: &[(i64, i64)]) -> LayoutGraph {
    let net = CxNetwork {
        nodes: (0..n).map(CxNode::new).collect(),
        edges: edges
            .iter()
            .enumerate()
            .map(|(i, &(s, t))| CxEdge::new(i as i64, s, t))
            .collect(),
        visual_properties: None,
    };
    LayoutGraph::from_cx(&net)
}

fn path_graph(n: i64) -> LayoutGraph {
    let edges: Vec<(i64, i64)> = (1..n).map(|i| (i - 1, i)).collect();
    make_graph(n, &edges)
}

/// 0-1, 0-2, 1-3, 1-4, 2-5: node 1 has the highest degree.
fn small_tree() -> LayoutGraph {
    make_graph(6, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5)])
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn assert_well_formed(layout: &Layout, n: usize) {
    assert_eq!(layout.len(), n);
    for p in &layout.coords {
        assert!(p.x.is_finite() && p.y.is_finite(), "non-finite point {p:?}");
    }
}

// ── Algorithm names ───────────────────────────────────────────────────────

#[test]
fn test_algorithm_names_round_trip() {
    for algo in LayoutAlgorithm::ALL {
        assert_eq!(algo.as_str().parse::<LayoutAlgorithm>().unwrap(), algo);
        assert_eq!(algo.to_string(), algo.as_str());
    }
    assert_eq!(LayoutAlgorithm::default(), LayoutAlgorithm::Auto);
}

#[test]
fn test_unknown_algorithm_name() {
    let err = "spring".parse::<LayoutAlgorithm>().unwrap_err();
    assert!(matches!(err, LayoutError::UnknownAlgorithm(ref s) if s == "spring"));
}

#[test]
fn test_rt_circular_uses_underscore() {
    assert_eq!("rt_circular".parse::<LayoutAlgorithm>().unwrap(), LayoutAlgorithm::RtCircular);
    assert!("rt-circular".parse::<LayoutAlgorithm>().is_err());
}

// ── auto ──────────────────────────────────────────────────────────────────

#[test]
fn test_auto_small_connected_is_kk() {
    assert_eq!(LayoutAlgorithm::Auto.resolve(&path_graph(10)), LayoutAlgorithm::Kk);
    assert_eq!(LayoutAlgorithm::Auto.resolve(&path_graph(100)), LayoutAlgorithm::Kk);
}

#[test]
fn test_auto_disconnected_is_fr() {
    assert_eq!(LayoutAlgorithm::Auto.resolve(&make_graph(3, &[(0, 1)])), LayoutAlgorithm::Fr);
}

#[test]
fn test_auto_medium_is_fr() {
    assert_eq!(LayoutAlgorithm::Auto.resolve(&path_graph(101)), LayoutAlgorithm::Fr);
    assert_eq!(LayoutAlgorithm::Auto.resolve(&make_graph(1000, &[])), LayoutAlgorithm::Fr);
}

#[test]
fn test_auto_large_is_drl() {
    assert_eq!(LayoutAlgorithm::Auto.resolve(&make_graph(1001, &[])), LayoutAlgorithm::Drl);
}

#[test]
fn test_explicit_algorithm_not_resolved() {
    assert_eq!(LayoutAlgorithm::Circle.resolve(&path_graph(5)), LayoutAlgorithm::Circle);
}

// ── Every algorithm ───────────────────────────────────────────────────────

#[test]
fn test_every_algorithm_on_empty_graph() {
    let g = LayoutGraph::new();
    for algo in LayoutAlgorithm::ALL {
        assert!(compute(&g, algo, &mut rng()).is_empty(), "{algo}");
    }
}

#[test]
fn test_every_algorithm_on_single_node() {
    let g = make_graph(1, &[]);
    for algo in LayoutAlgorithm::ALL {
        assert_well_formed(&compute(&g, algo, &mut rng()), 1);
    }
}

#[test]
fn test_every_algorithm_on_small_network() {
    let g = make_graph(5, &[(3, 4), (2, 3), (1, 2), (0, 1), (0, 2)]);
    for algo in LayoutAlgorithm::ALL {
        assert_well_formed(&compute(&g, algo, &mut rng()), 5);
    }
}

#[test]
fn test_every_algorithm_on_disconnected_graph_with_self_loop() {
    let g = make_graph(7, &[(0, 1), (1, 2), (2, 0), (3, 4), (5, 5)]);
    for algo in LayoutAlgorithm::ALL {
        assert_well_formed(&compute(&g, algo, &mut rng()), 7);
    }
}

#[test]
fn test_seeded_layouts_are_reproducible() {
    let g = small_tree();
    for algo in [LayoutAlgorithm::Random, LayoutAlgorithm::Fr, LayoutAlgorithm::Drl, LayoutAlgorithm::Lgl] {
        let a = compute(&g, algo, &mut StdRng::seed_from_u64(42));
        let b = compute(&g, algo, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b, "{algo}");
    }
}

// ── circle / random ───────────────────────────────────────────────────────

#[test]
fn test_circle_points_on_unit_circle() {
    let layout = basic::circle(&make_graph(4, &[]));
    let expected = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
    for (p, (ex, ey)) in layout.coords.iter().zip(expected) {
        assert!((p.x - ex).abs() < 1e-9 && (p.y - ey).abs() < 1e-9, "{p:?}");
    }
}

#[test]
fn test_random_within_unit_square() {
    let layout = basic::random(&make_graph(50, &[]), &mut rng());
    let bbox = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
    assert!(layout.coords.iter().all(|p| bbox.contains(p, 0.0)));
}

// ── force-directed ────────────────────────────────────────────────────────

#[test]
fn test_fr_separates_nodes() {
    let layout = fr::fruchterman_reingold(&path_graph(6), &mut rng());
    for i in 0..6 {
        for j in (i + 1)..6 {
            assert!(layout.coords[i].distance(&layout.coords[j]) > 1e-3);
        }
    }
}

#[test]
fn test_fr_neighbors_closer_than_path_ends() {
    let layout = fr::fruchterman_reingold(&path_graph(8), &mut rng());
    let c = &layout.coords;
    assert!(c[0].distance(&c[1]) < c[0].distance(&c[7]));
}

#[test]
fn test_kk_path_distances_follow_hops() {
    let layout = kk::kamada_kawai(&path_graph(4));
    let c = &layout.coords;
    let d01 = c[0].distance(&c[1]);
    let d03 = c[0].distance(&c[3]);
    assert!((d01 - 1.0).abs() < 0.5, "d01 = {d01}");
    assert!(d03 > d01, "d03 = {d03}");
}

#[test]
fn test_kk_is_deterministic() {
    let g = small_tree();
    assert_eq!(kk::kamada_kawai(&g), kk::kamada_kawai(&g));
}

#[test]
fn test_drl_custom_schedule() {
    let schedule = [drl::Stage {
        name: "quick",
        iterations: 5,
        temperature: 100.0,
        attraction: 1.0,
        damping: 0.5,
    }];
    let layout = drl::drl_with_schedule(&small_tree(), &schedule, &mut rng());
    assert_well_formed(&layout, 6);
}

#[test]
fn test_lgl_components_side_by_side() {
    let g = make_graph(4, &[(0, 1), (2, 3)]);
    let layout = lgl::lgl(&g, &mut rng());
    let left = layout.coords[0].x.max(layout.coords[1].x);
    let right = layout.coords[2].x.min(layout.coords[3].x);
    assert!(right > left);
}

// ── tree layouts ──────────────────────────────────────────────────────────

#[test]
fn test_tree_roots_pick_max_degree() {
    assert_eq!(tree::tree_roots(&small_tree()), vec![1]);
    assert_eq!(tree::tree_roots(&make_graph(3, &[])), vec![0, 1, 2]);
}

#[test]
fn test_rt_depths_and_separation() {
    let g = make_graph(6, &[(0, 1), (0, 2), (0, 3), (1, 4), (3, 5)]);
    let layout = tree::reingold_tilford(&g);
    let c = &layout.coords;
    // root 0 has degree 3
    assert_eq!(c[0].y, 0.0);
    for i in 1..=3 {
        assert_eq!(c[i].y, 1.0);
    }
    assert_eq!(c[4].y, 2.0);
    assert_eq!(c[5].y, 2.0);

    // siblings ordered and at least one unit apart
    assert!(c[2].x - c[1].x >= 1.0 - 1e-9);
    assert!(c[3].x - c[2].x >= 1.0 - 1e-9);
    // parent centred over first and last child
    assert!((c[0].x - (c[1].x + c[3].x) / 2.0).abs() < 1e-9);
    // grandchildren do not collide
    assert!(c[5].x - c[4].x >= 1.0 - 1e-9);
}

#[test]
fn test_rt_nodes_on_same_level_never_overlap() {
    let g = make_graph(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]);
    let c = tree::reingold_tilford(&g).coords;
    for i in 0..c.len() {
        for j in (i + 1)..c.len() {
            if c[i].y == c[j].y {
                assert!((c[i].x - c[j].x).abs() >= 1.0 - 1e-9, "{i} and {j} overlap: {c:?}");
            }
        }
    }
}

#[test]
fn test_rt_forest_side_by_side() {
    let g = make_graph(4, &[(0, 1), (2, 3)]);
    let c = tree::reingold_tilford(&g).coords;
    assert_eq!(c[0].y, 0.0);
    assert_eq!(c[2].y, 0.0);
    assert!((c[2].x - c[0].x).abs() >= 1.0 - 1e-9);
}

#[test]
fn test_rt_circular_radius_is_depth() {
    let g = small_tree();
    let flat = tree::reingold_tilford(&g);
    let round = tree::reingold_tilford_circular(&g);
    for (f, r) in flat.coords.iter().zip(&round.coords) {
        let radius = r.x.hypot(r.y);
        assert!((radius - f.y).abs() < 1e-9);
    }
}

#[test]
fn test_rt_circular_leftmost_at_angle_zero() {
    let g = path_graph(3);
    let c = tree::reingold_tilford_circular(&g).coords;
    // root is node 1 (degree 2): centre of the circle
    assert!(c[1].x.abs() < 1e-9 && c[1].y.abs() < 1e-9);
    assert!((c[0].x - 1.0).abs() < 1e-9 && c[0].y.abs() < 1e-9);
}

#[test]
fn test_drl_crowded_start_stays_fast() {
    use rand::Rng;
    use std::time::{Duration, Instant};

    // A random graph with 2n edges; the fully damped stage pulls every
    // node onto its neighbours' centroid.
    let n = 4000;
    let mut edge_rng = StdRng::seed_from_u64(1);
    let edges: Vec<(i64, i64)> = (0..2 * n)
        .map(|_| (edge_rng.gen_range(0..n), edge_rng.gen_range(0..n)))
        .collect();
    let g = make_graph(n, &edges);
    let schedule = [
        drl::Stage {
            name: "liquid",
            iterations: 20,
            temperature: 2000.0,
            attraction: 10.0,
            damping: 1.0,
        },
        drl::Stage {
            name: "simmer",
            iterations: 5,
            temperature: 250.0,
            attraction: 0.5,
            damping: 0.0,
        },
    ];

    let start = Instant::now();
    let layout = drl::drl_with_schedule(&g, &schedule, &mut rng());
    let elapsed = start.elapsed();
    assert_well_formed(&layout, n as usize);
    assert!(elapsed < Duration::from_secs(20), "drl took {elapsed:?}");
}

#[test]
fn test_drl_start_spread_grows_with_node_count() {
    let schedule: [drl::Stage; 0] = [];
    let small = drl::drl_with_schedule(&make_graph(4, &[]), &schedule, &mut rng());
    let large = drl::drl_with_schedule(&make_graph(10_000, &[]), &schedule, &mut rng());
    let half = |l: &Layout| {
        l.coords
            .iter()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0, f64::max)
    };
    assert!(half(&small) <= drl::INITIAL_SPREAD * 2.0);
    assert!(half(&large) > drl::INITIAL_SPREAD * 50.0);
}
