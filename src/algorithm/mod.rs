//! 图算法模块
//!
//! 包含最短路径（Dijkstra、Bellman-Ford、A*、Floyd-Warshall）和最大流算法

mod aggregate;
mod astar;
mod bellman_ford;
mod dijkstra;
mod floyd_warshall;
mod max_flow;
mod residual;
mod shortest_path;

pub use aggregate::{edge_flow, path_totals, utilization, PathTotals};
pub use astar::heuristic;
pub use max_flow::{
    max_flow, validate_flow_network, AugmentingPath, EdgeFlow, EdmondsKarp, FlowResult,
};
pub use shortest_path::{
    all_pairs_shortest_paths, shortest_path, shortest_paths_from, Algorithm, AllPairs,
    PathFinder, PathRequest, PathResult, PathTree,
};

#[cfg(test)]
mod tests {
    //! 跨算法性质：在随机图上互相印证

    use super::*;
    use crate::error::Error;
    use crate::graph::{EdgeAttrs, Graph};
    use crate::types::Coordinate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn random_road_graph(seed: u64, nodes: usize, edges: usize) -> Graph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::undirected();
        for i in 0..nodes {
            graph.add_node(format!("N{}", i));
        }
        for _ in 0..edges {
            let u = rng.gen_range(0..nodes);
            let v = rng.gen_range(0..nodes);
            let distance = rng.gen_range(1.0..50.0);
            let eta = rng.gen_range(1.0..60.0);
            graph.add_edge(&format!("N{}", u), &format!("N{}", v), EdgeAttrs::new(distance, eta));
        }
        graph
    }

    /// 坐标取在单位网格上，道路距离 = 直线距离 × (1 + 随机绕行)，保证启发可采纳
    fn random_geo_graph(seed: u64, nodes: usize, edges: usize) -> Graph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::undirected();
        let mut coords = Vec::with_capacity(nodes);
        for i in 0..nodes {
            let label = format!("G{}", i);
            graph.add_node(label.clone());
            let c = Coordinate::new(rng.gen_range(9.0..11.0), rng.gen_range(-76.0..-74.0));
            graph.set_coordinate(&label, c).unwrap();
            coords.push(c);
        }
        for _ in 0..edges {
            let u = rng.gen_range(0..nodes);
            let v = rng.gen_range(0..nodes);
            let straight = coords[u].approx_km(&coords[v]);
            let distance = straight * rng.gen_range(1.0..1.6) + 0.5;
            graph.add_edge(
                &format!("G{}", u),
                &format!("G{}", v),
                EdgeAttrs::new(distance, rng.gen_range(1.0..60.0)),
            );
        }
        graph
    }

    fn labels(graph: &Graph) -> Vec<String> {
        graph.nodes().iter().map(|n| n.label().to_string()).collect()
    }

    #[test]
    fn test_dijkstra_agrees_with_floyd_warshall() {
        for seed in 0..8 {
            let graph = random_road_graph(seed, 14, 24);
            let all = all_pairs_shortest_paths(&graph).unwrap();
            let names = labels(&graph);

            for origin in &names {
                let tree = shortest_paths_from(&graph, origin, Algorithm::Dijkstra).unwrap();
                for destination in &names {
                    let fw = all.distance(origin, destination);
                    let dj = tree.distance(destination);
                    if fw.is_finite() || dj.is_finite() {
                        assert!(
                            (fw - dj).abs() < EPS,
                            "seed {} {}->{}: floyd {} dijkstra {}",
                            seed,
                            origin,
                            destination,
                            fw,
                            dj
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_bellman_ford_agrees_with_dijkstra() {
        for seed in 10..18 {
            let graph = random_road_graph(seed, 16, 30);
            let names = labels(&graph);
            let origin = &names[0];

            let dj = shortest_paths_from(&graph, origin, Algorithm::Dijkstra).unwrap();
            let bf = shortest_paths_from(&graph, origin, Algorithm::BellmanFord).unwrap();

            assert_eq!(dj.len(), bf.len());
            for (destination, path) in dj.iter() {
                assert!((bf.distance(destination) - path.distance).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_astar_agrees_with_dijkstra() {
        for seed in 20..28 {
            let graph = random_geo_graph(seed, 15, 30);
            let names = labels(&graph);

            for destination in &names {
                let dj = shortest_path(&graph, &names[0], destination, Algorithm::Dijkstra).unwrap();
                let astar = shortest_path(&graph, &names[0], destination, Algorithm::AStar).unwrap();
                assert_eq!(dj.is_found(), astar.is_found());
                if dj.is_found() {
                    assert!((dj.distance - astar.distance).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_astar_without_coordinates_is_dijkstra() {
        for seed in 30..36 {
            let graph = random_road_graph(seed, 12, 20);
            let names = labels(&graph);
            for destination in &names {
                let dj = shortest_path(&graph, &names[1], destination, Algorithm::Dijkstra).unwrap();
                let astar = shortest_path(&graph, &names[1], destination, Algorithm::AStar).unwrap();
                assert_eq!(dj.nodes, astar.nodes);
                assert_eq!(dj.distance, astar.distance);
                assert_eq!(dj.eta, astar.eta);
            }
        }
    }

    #[test]
    fn test_negative_cycle_yields_no_partial_results() {
        let mut graph = random_road_graph(40, 10, 18);
        graph.add_edge("N0", "Loop", EdgeAttrs::new(1.0, 1.0));
        // 无向负权边本身就是负环
        graph.add_edge("Loop", "Loop2", EdgeAttrs::new(-4.0, 1.0));

        let err = shortest_paths_from(&graph, "N0", Algorithm::BellmanFord).unwrap_err();
        assert!(matches!(err, Error::NegativeCycle { .. }));

        let err = shortest_path(&graph, "N0", "N1", Algorithm::BellmanFord).unwrap_err();
        assert!(matches!(err, Error::NegativeCycle { .. }));
    }

    #[test]
    fn test_idempotent() {
        let graph = random_geo_graph(50, 12, 24);
        let names = labels(&graph);
        for algorithm in Algorithm::ALL {
            let first = shortest_path(&graph, &names[0], &names[5], algorithm).unwrap();
            let second = shortest_path(&graph, &names[0], &names[5], algorithm).unwrap();
            assert_eq!(first, second);
        }
    }

    /// 枚举所有源侧集合求最小割，与最大流比较
    fn brute_force_min_cut(graph: &Graph, source: usize, sink: usize) -> f64 {
        let n = graph.node_count();
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << n) {
            let contains = |i: usize| mask & (1 << i) != 0;
            if !contains(source) || contains(sink) {
                continue;
            }
            let cut: f64 = graph
                .edges()
                .iter()
                .filter(|e| contains(e.src().index()) && !contains(e.dst().index()))
                .map(|e| e.capacity())
                .sum();
            best = best.min(cut);
        }
        best
    }

    #[test]
    fn test_max_flow_equals_min_cut() {
        for seed in 60..70 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut graph = Graph::directed();
            let n = 7;
            for i in 0..n {
                graph.add_node(format!("V{}", i));
            }
            for _ in 0..16 {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                if u != v {
                    let capacity = rng.gen_range(1..20) as f64;
                    graph.add_edge(
                        &format!("V{}", u),
                        &format!("V{}", v),
                        EdgeAttrs::with_capacity_only(capacity),
                    );
                }
            }

            let result = max_flow(&graph, "V0", &format!("V{}", n - 1)).unwrap();

            let expected = brute_force_min_cut(&graph, 0, n - 1);
            assert!((result.value - expected).abs() < EPS, "seed {}", seed);
            assert!((result.min_cut_capacity() - result.value).abs() < EPS);

            let bottlenecks: f64 = result.augmenting_paths.iter().map(|p| p.flow).sum();
            assert!((bottlenecks - result.value).abs() < EPS);

            for flow in &result.edge_flows {
                assert!(flow.flow >= 0.0);
                assert!(flow.flow <= flow.capacity + EPS);
                assert!(flow.utilization <= 100.0 + EPS);
            }
        }
    }

    #[test]
    fn test_graph_is_not_mutated() {
        let graph = random_road_graph(80, 10, 15);
        let before: Vec<_> = graph.edges().iter().map(|e| *e.attrs()).collect();

        let _ = all_pairs_shortest_paths(&graph).unwrap();
        let _ = max_flow(&graph, "N0", "N9");

        let after: Vec<_> = graph.edges().iter().map(|e| *e.attrs()).collect();
        assert_eq!(before, after);
    }
}
