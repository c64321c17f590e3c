use std::sync::Arc;
use std::thread;

use dynroute::{BestRoute, Graph, NodeId, RouteError, Router};

// Eight intersections joined by two-way roads.
fn city() -> Router {
    let mut graph = Graph::new();
    for (a, b, w) in [
        (1, 2, 5.0),
        (1, 3, 9.0),
        (2, 4, 3.0),
        (3, 5, 4.0),
        (4, 5, 1.0),
        (4, 6, 7.0),
        (5, 7, 2.0),
        (6, 8, 3.0),
        (7, 8, 6.0),
    ] {
        graph.add_road(a, b, w).unwrap();
    }
    Router::new(graph)
}

const HOSPITALS: [NodeId; 2] = [7, 8];

#[test]
fn normal_traffic_picks_hospital_7() {
    let router = city();
    let best = router.query_best_route(1, &HOSPITALS).unwrap();
    assert_eq!(
        best,
        BestRoute {
            best_node: 7,
            total_distance: 11.0,
            route: vec![1, 2, 4, 5, 7],
        }
    );

    let report = router.query_report(1, &HOSPITALS).unwrap();
    assert_eq!(report.candidates[0].distance, 11.0);
    assert_eq!(report.candidates[1].distance, 17.0);
}

#[test]
fn congestion_on_5_to_7_reroutes_to_hospital_8() {
    let router = city();
    let before = router.query_best_route(1, &HOSPITALS).unwrap();

    router.update_edge_weight(5, 7, 20.0).unwrap();
    let after = router.query_best_route(1, &HOSPITALS).unwrap();

    assert_eq!(after.best_node, 8);
    assert_eq!(after.total_distance, 18.0);
    assert_eq!(after.route, vec![1, 2, 4, 6, 8]);
    assert_ne!(before.route, after.route);

    let report = router.query_report(1, &HOSPITALS).unwrap();
    assert_eq!(report.revision, 1);
    assert_eq!(report.candidates[0].distance, 24.0);
}

#[test]
fn unreachable_candidate_is_skipped() {
    let router = city();
    // 9 only has an outgoing road, so nothing reaches it.
    let mut graph = (*router.snapshot().0).clone();
    graph.add_edge(9, 1, 1.0).unwrap();
    let router = Router::new(graph);

    let best = router.query_best_route(1, &[9, 8]).unwrap();
    assert_eq!(best.best_node, 8);
    assert_eq!(best.total_distance, 17.0);

    assert_eq!(
        router.query_best_route(1, &[9]),
        Err(RouteError::NoReachableDestination {
            start: 1,
            candidates: vec![9],
        })
    );
}

#[test]
fn update_on_missing_edge_fails_and_keeps_graph() {
    let router = city();
    let (before, _) = router.snapshot();

    assert_eq!(
        router.update_edge_weight(1, 8, 2.0),
        Err(RouteError::EdgeNotFound { from: 1, to: 8 })
    );

    let (after, revision) = router.snapshot();
    assert_eq!(revision, 0);
    assert_eq!(after.edge_count(), before.edge_count());
    assert_eq!(after.weight(1, 8), None);
    assert_eq!(
        router.query_best_route(1, &HOSPITALS).unwrap().best_node,
        7
    );
}

#[test]
fn error_messages_name_the_edge() {
    let router = city();
    let err = router.update_edge_weight(1, 8, 2.0).unwrap_err();
    assert_eq!(err.to_string(), "no edge 1 -> 8 in the graph");

    let err = router.update_edge_weight(5, 7, -2.0).unwrap_err();
    assert!(err.to_string().contains("5 -> 7"));
}

#[test]
fn concurrent_queries_see_whole_snapshots() {
    let router = Arc::new(city());
    let normal = router.query_best_route(1, &HOSPITALS).unwrap();

    let writer = {
        let router = Arc::clone(&router);
        thread::spawn(move || {
            for i in 0..200 {
                let w = if i % 2 == 0 { 20.0 } else { 2.0 };
                router.update_edge_weight(5, 7, w).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                let mut answers = Vec::new();
                for _ in 0..200 {
                    answers.push(router.query_best_route(1, &HOSPITALS).unwrap());
                }
                answers
            })
        })
        .collect();

    writer.join().unwrap();
    let congested = BestRoute {
        best_node: 8,
        total_distance: 18.0,
        route: vec![1, 2, 4, 6, 8],
    };
    for reader in readers {
        for answer in reader.join().unwrap() {
            assert!(answer == normal || answer == congested, "{:?}", answer);
        }
    }
    assert_eq!(router.revision(), 200);
}
