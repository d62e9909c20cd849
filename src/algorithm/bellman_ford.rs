//! Bellman-Ford 单源最短路径
//!
//! 允许负权边。最多松弛 |V|-1 轮，第 |V| 轮仍可松弛即存在从源点可达的负权环，
//! 此时整体失败，不返回部分结果。

use super::shortest_path::SearchTree;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use tracing::{debug, warn};

/// 从 source 出发的 Bellman-Ford 搜索
pub(crate) fn bellman_ford(graph: &Graph, source: NodeId) -> Result<SearchTree> {
    let n = graph.node_count();
    let mut tree = SearchTree::new(n, source);

    let arcs: Vec<(NodeId, NodeId, f64)> = graph
        .arcs()
        .map(|(from, to, edge)| (from, to, edge.distance()))
        .collect();

    let mut passes = 0;
    for _ in 0..n.saturating_sub(1) {
        passes += 1;
        let mut updated = false;

        for &(from, to, weight) in &arcs {
            let base = tree.distance(from);
            if base.is_finite() && tree.relax(from, to, base + weight) {
                updated = true;
            }
        }

        if !updated {
            break;
        }
    }

    // 第 |V| 轮：负权环检测
    for &(from, to, weight) in &arcs {
        let base = tree.distance(from);
        if base.is_finite() && base + weight < tree.distance(to) {
            let origin = graph.label(source).to_string();
            warn!(origin = %origin, "检测到负权环");
            return Err(Error::NegativeCycle { origin });
        }
    }

    debug!(passes, arcs = arcs.len(), "Bellman-Ford 收敛");
    Ok(tree)
}
