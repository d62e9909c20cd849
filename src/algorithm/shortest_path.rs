//! 最短路径引擎
//!
//! 四种可互换的算法共享同一结果约定：
//! Dijkstra、Bellman-Ford、A*、Floyd-Warshall

use super::aggregate::path_totals;
use super::astar::astar;
use super::bellman_ford::bellman_ford;
use super::dijkstra::dijkstra;
use super::floyd_warshall::floyd_warshall;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// 最短路径算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    BellmanFord,
    AStar,
    FloydWarshall,
}

impl Algorithm {
    /// 全部算法
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
        Algorithm::AStar,
        Algorithm::FloydWarshall,
    ];

    /// 展示用名称
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::AStar => "A* (A-Star)",
            Algorithm::FloydWarshall => "Floyd-Warshall",
        }
    }

    /// 是否要求非负距离
    pub fn requires_non_negative(&self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    /// 单对最短路径
    pub fn compute(&self, graph: &Graph, request: &PathRequest) -> Result<PathResult> {
        let origin = graph.require_node(&request.origin)?;
        let destination = graph.require_node(&request.destination)?;
        if self.requires_non_negative() {
            graph.ensure_non_negative()?;
        }

        let path = match self {
            Algorithm::Dijkstra => dijkstra(graph, origin, Some(destination)).path_to(destination),
            Algorithm::AStar => astar(graph, origin, destination),
            Algorithm::BellmanFord => bellman_ford(graph, origin)?.path_to(destination),
            Algorithm::FloydWarshall => floyd_warshall(graph)?.path(origin, destination),
        };

        let result = match path {
            Some(path) => PathResult::found(graph, &path, *self),
            None => {
                debug!(
                    algorithm = self.name(),
                    origin = %request.origin,
                    destination = %request.destination,
                    "目标不可达"
                );
                PathResult::no_path(&request.origin, &request.destination, *self)
            }
        };

        Ok(result)
    }

    /// 单源到所有可达节点的最短路径
    pub fn compute_from(&self, graph: &Graph, origin: &str) -> Result<PathTree> {
        let source = graph.require_node(origin)?;
        let mut tree = PathTree::new(origin, *self);
        if self.requires_non_negative() {
            graph.ensure_non_negative()?;
        }

        match self {
            Algorithm::Dijkstra => {
                let search = dijkstra(graph, source, None);
                tree.collect(graph, |target| search.path_to(target));
            }
            Algorithm::BellmanFord => {
                let search = bellman_ford(graph, source)?;
                tree.collect(graph, |target| search.path_to(target));
            }
            Algorithm::AStar => {
                tree.collect(graph, |target| astar(graph, source, target));
            }
            Algorithm::FloydWarshall => {
                let matrix = floyd_warshall(graph)?;
                tree.collect(graph, |target| matrix.path(source, target));
            }
        }

        info!(
            algorithm = self.name(),
            origin,
            reachable = tree.len(),
            "单源最短路径计算完成"
        );
        Ok(tree)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bellman-ford" | "bellman_ford" | "bellmanford" | "bellman" => Ok(Algorithm::BellmanFord),
            "astar" | "a*" | "a-star" | "a_star" => Ok(Algorithm::AStar),
            "floyd-warshall" | "floyd_warshall" | "floydwarshall" | "floyd" => {
                Ok(Algorithm::FloydWarshall)
            }
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// 单对路径请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub origin: String,
    pub destination: String,
}

impl PathRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// 路径结果
///
/// 不可达时 `nodes` 为空，距离与时间为无穷大。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// 起点
    pub origin: String,
    /// 终点
    pub destination: String,
    /// 起点到终点的节点序列（含两端）
    pub nodes: Vec<String>,
    /// 总距离（公里）
    pub distance: f64,
    /// 总通行时间（分钟）
    pub eta: f64,
    /// 使用的算法
    pub algorithm: Algorithm,
}

impl PathResult {
    pub(crate) fn found(graph: &Graph, path: &[NodeId], algorithm: Algorithm) -> Self {
        let totals = path_totals(graph, path);
        let nodes = graph.labels(path);
        Self {
            origin: nodes.first().cloned().unwrap_or_default(),
            destination: nodes.last().cloned().unwrap_or_default(),
            nodes,
            distance: totals.distance,
            eta: totals.eta,
            algorithm,
        }
    }

    /// “无路径”结果
    pub fn no_path(origin: &str, destination: &str, algorithm: Algorithm) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            nodes: Vec::new(),
            distance: f64::INFINITY,
            eta: f64::INFINITY,
            algorithm,
        }
    }

    /// 是否找到路径
    pub fn is_found(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// 路径经过的边数
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// 把“无路径”转换回 `Error::NoPath`
    pub fn into_result(self) -> Result<Self> {
        if self.is_found() {
            Ok(self)
        } else {
            Err(Error::NoPath {
                origin: self.origin,
                destination: self.destination,
            })
        }
    }
}

/// 单源结果：目标地名 -> 路径（只含可达目标，按节点插入顺序）
#[derive(Debug, Clone, Serialize)]
pub struct PathTree {
    pub origin: String,
    pub algorithm: Algorithm,
    pub paths: IndexMap<String, PathResult>,
}

impl PathTree {
    fn new(origin: &str, algorithm: Algorithm) -> Self {
        Self {
            origin: origin.to_string(),
            algorithm,
            paths: IndexMap::new(),
        }
    }

    fn collect<F>(&mut self, graph: &Graph, mut path_to: F)
    where
        F: FnMut(NodeId) -> Option<Vec<NodeId>>,
    {
        for target in graph.node_ids() {
            if let Some(path) = path_to(target) {
                self.paths.insert(
                    graph.label(target).to_string(),
                    PathResult::found(graph, &path, self.algorithm),
                );
            }
        }
    }

    /// 获取到某个目标的路径
    pub fn get(&self, destination: &str) -> Option<&PathResult> {
        self.paths.get(destination)
    }

    /// 到某个目标的距离，不可达为无穷大
    pub fn distance(&self, destination: &str) -> f64 {
        self.get(destination)
            .map(|p| p.distance)
            .unwrap_or(f64::INFINITY)
    }

    /// 可达目标数（含起点）
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathResult)> {
        self.paths.iter()
    }
}

/// 全源结果：起点 -> 终点 -> 路径；不连通的点对没有条目
#[derive(Debug, Clone, Serialize)]
pub struct AllPairs {
    pub paths: IndexMap<String, IndexMap<String, PathResult>>,
}

impl AllPairs {
    /// 获取点对路径
    pub fn get(&self, origin: &str, destination: &str) -> Option<&PathResult> {
        self.paths.get(origin).and_then(|row| row.get(destination))
    }

    /// 点对距离，不连通为无穷大
    pub fn distance(&self, origin: &str, destination: &str) -> f64 {
        self.get(origin, destination)
            .map(|p| p.distance)
            .unwrap_or(f64::INFINITY)
    }

    /// 有路径的点对数量（含自身）
    pub fn pair_count(&self) -> usize {
        self.paths.values().map(|row| row.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathResult> {
        self.paths.values().flat_map(|row| row.values())
    }
}

/// 路径查找器
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 单对最短路径
    pub fn shortest_path(
        &self,
        origin: &str,
        destination: &str,
        algorithm: Algorithm,
    ) -> Result<PathResult> {
        algorithm.compute(self.graph, &PathRequest::new(origin, destination))
    }

    /// 单源最短路径
    pub fn shortest_paths_from(&self, origin: &str, algorithm: Algorithm) -> Result<PathTree> {
        algorithm.compute_from(self.graph, origin)
    }

    /// 全源最短路径（Floyd-Warshall）
    pub fn all_pairs(&self) -> Result<AllPairs> {
        let graph = self.graph;
        let matrix = floyd_warshall(graph)?;

        let mut paths = IndexMap::new();
        for origin in graph.node_ids() {
            let mut row = IndexMap::new();
            for destination in graph.node_ids() {
                if let Some(path) = matrix.path(origin, destination) {
                    row.insert(
                        graph.label(destination).to_string(),
                        PathResult::found(graph, &path, Algorithm::FloydWarshall),
                    );
                }
            }
            paths.insert(graph.label(origin).to_string(), row);
        }

        let all = AllPairs { paths };
        info!(
            nodes = graph.node_count(),
            pairs = all.pair_count(),
            "全源最短路径计算完成"
        );
        Ok(all)
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, origin: &str, destination: &str) -> Result<bool> {
        let from = self.graph.require_node(origin)?;
        let to = self.graph.require_node(destination)?;
        Ok(self.graph.is_reachable(from, to))
    }
}

/// 单对最短路径
pub fn shortest_path(
    graph: &Graph,
    origin: &str,
    destination: &str,
    algorithm: Algorithm,
) -> Result<PathResult> {
    PathFinder::new(graph).shortest_path(origin, destination, algorithm)
}

/// 单源最短路径
pub fn shortest_paths_from(graph: &Graph, origin: &str, algorithm: Algorithm) -> Result<PathTree> {
    PathFinder::new(graph).shortest_paths_from(origin, algorithm)
}

/// 全源最短路径（Floyd-Warshall）
pub fn all_pairs_shortest_paths(graph: &Graph) -> Result<AllPairs> {
    PathFinder::new(graph).all_pairs()
}

/// 单源搜索的中间结果：距离表与前驱表
#[derive(Debug, Clone)]
pub(crate) struct SearchTree {
    source: NodeId,
    dist: Vec<f64>,
    parent: Vec<Option<NodeId>>,
}

impl SearchTree {
    pub(crate) fn new(node_count: usize, source: NodeId) -> Self {
        let mut dist = vec![f64::INFINITY; node_count];
        dist[source.index()] = 0.0;
        Self {
            source,
            dist,
            parent: vec![None; node_count],
        }
    }

    pub(crate) fn distance(&self, node: NodeId) -> f64 {
        self.dist[node.index()]
    }

    /// 松弛：候选距离更短时更新距离和前驱
    pub(crate) fn relax(&mut self, from: NodeId, to: NodeId, candidate: f64) -> bool {
        if candidate < self.dist[to.index()] {
            self.dist[to.index()] = candidate;
            self.parent[to.index()] = Some(from);
            true
        } else {
            false
        }
    }

    /// 沿前驱表重建路径
    pub(crate) fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.dist[target.index()].is_finite() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.parent[current.index()]?;
            path.push(current);
            if path.len() > self.dist.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeAttrs;

    /// A-B(10, 5), B-C(5, 3), A-C(20, 10)，外加孤立的 D-E
    fn triangle() -> Graph {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", EdgeAttrs::new(10.0, 5.0));
        graph.add_edge("B", "C", EdgeAttrs::new(5.0, 3.0));
        graph.add_edge("A", "C", EdgeAttrs::new(20.0, 10.0));
        graph.add_edge("D", "E", EdgeAttrs::new(1.0, 1.0));
        graph
    }

    #[test]
    fn test_dijkstra_prefers_two_hop_route() {
        let graph = triangle();
        let result = shortest_path(&graph, "A", "C", Algorithm::Dijkstra).unwrap();

        assert_eq!(result.nodes, vec!["A", "B", "C"]);
        assert_eq!(result.distance, 15.0);
        assert_eq!(result.eta, 8.0);
        assert_eq!(result.algorithm, Algorithm::Dijkstra);
        assert_eq!(result.hops(), 2);
    }

    #[test]
    fn test_every_algorithm_on_triangle() {
        let graph = triangle();
        for algorithm in Algorithm::ALL {
            let result = shortest_path(&graph, "A", "C", algorithm).unwrap();
            assert_eq!(result.nodes, vec!["A", "B", "C"], "{}", algorithm);
            assert_eq!(result.distance, 15.0, "{}", algorithm);
            assert_eq!(result.eta, 8.0, "{}", algorithm);
        }
    }

    #[test]
    fn test_disconnected_is_no_path() {
        let graph = triangle();
        for algorithm in Algorithm::ALL {
            let result = shortest_path(&graph, "A", "E", algorithm).unwrap();
            assert!(!result.is_found());
            assert!(result.nodes.is_empty());
            assert_eq!(result.distance, f64::INFINITY);
            assert_eq!(result.eta, f64::INFINITY);
            assert!(matches!(result.into_result(), Err(Error::NoPath { .. })));
        }
    }

    #[test]
    fn test_same_origin_and_destination() {
        let graph = triangle();
        for algorithm in Algorithm::ALL {
            let result = shortest_path(&graph, "B", "B", algorithm).unwrap();
            assert_eq!(result.nodes, vec!["B"]);
            assert_eq!(result.distance, 0.0);
            assert_eq!(result.eta, 0.0);
        }
    }

    #[test]
    fn test_unknown_node() {
        let graph = triangle();
        let err = shortest_path(&graph, "A", "Z", Algorithm::Dijkstra).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(ref l) if l == "Z"));
    }

    #[test]
    fn test_negative_weight_rejected_by_dijkstra() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", EdgeAttrs::new(4.0, 1.0));
        graph.add_edge("B", "C", EdgeAttrs::new(-2.0, 1.0));

        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
            let err = shortest_path(&graph, "A", "C", algorithm).unwrap_err();
            assert!(matches!(err, Error::NegativeWeight { .. }));
        }

        // Bellman-Ford 与 Floyd-Warshall 能处理无负环的负权边
        for algorithm in [Algorithm::BellmanFord, Algorithm::FloydWarshall] {
            let result = shortest_path(&graph, "A", "C", algorithm).unwrap();
            assert_eq!(result.distance, 2.0);
        }

        for algorithm in Algorithm::ALL {
            let tree = shortest_paths_from(&graph, "A", algorithm);
            assert_eq!(tree.is_err(), algorithm.requires_non_negative(), "{}", algorithm);
        }
    }

    #[test]
    fn test_paths_from_source() {
        let graph = triangle();
        for algorithm in Algorithm::ALL {
            let tree = shortest_paths_from(&graph, "A", algorithm).unwrap();
            assert_eq!(tree.len(), 3, "{}", algorithm);
            assert_eq!(tree.get("A").unwrap().nodes, vec!["A"]);
            assert_eq!(tree.distance("B"), 10.0);
            assert_eq!(tree.distance("C"), 15.0);
            assert_eq!(tree.get("C").unwrap().eta, 8.0);
            assert!(tree.get("D").is_none());
            assert_eq!(tree.distance("E"), f64::INFINITY);
        }
    }

    #[test]
    fn test_paths_from_keeps_node_order() {
        let graph = triangle();
        let tree = shortest_paths_from(&graph, "C", Algorithm::Dijkstra).unwrap();
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_all_pairs() {
        let graph = triangle();
        let all = all_pairs_shortest_paths(&graph).unwrap();

        assert_eq!(all.distance("A", "C"), 15.0);
        assert_eq!(all.distance("C", "A"), 15.0);
        assert_eq!(all.get("C", "A").unwrap().nodes, vec!["C", "B", "A"]);
        assert_eq!(all.get("D", "D").unwrap().nodes, vec!["D"]);
        assert!(all.get("A", "D").is_none());
        // 3x3 + 2x2
        assert_eq!(all.pair_count(), 13);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("Bellman-Ford".parse::<Algorithm>().unwrap(), Algorithm::BellmanFord);
        assert_eq!("a*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("floyd".parse::<Algorithm>().unwrap(), Algorithm::FloydWarshall);
        assert!(matches!(
            "bfs".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_search_tree_path() {
        let mut tree = SearchTree::new(3, NodeId::new(0));
        assert!(tree.relax(NodeId::new(0), NodeId::new(1), 2.0));
        assert!(!tree.relax(NodeId::new(0), NodeId::new(1), 3.0));
        assert!(tree.relax(NodeId::new(1), NodeId::new(2), 5.0));

        assert_eq!(tree.distance(NodeId::new(2)), 5.0);
        assert_eq!(
            tree.path_to(NodeId::new(2)),
            Some(vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)])
        );
        assert_eq!(tree.path_to(NodeId::new(0)), Some(vec![NodeId::new(0)]));
    }

    #[test]
    fn test_path_finder_reachability() {
        let graph = triangle();
        let finder = PathFinder::new(&graph);
        assert!(finder.is_reachable("A", "C").unwrap());
        assert!(!finder.is_reachable("A", "D").unwrap());
        assert!(finder.is_reachable("A", "Q").is_err());
    }
}
