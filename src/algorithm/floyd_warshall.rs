//! Floyd-Warshall 全源最短路径
//!
//! 一次 O(|V|^3) 动态规划得到距离矩阵和前驱矩阵，再沿前驱重建路径。

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use tracing::{debug, warn};

/// 距离矩阵与前驱矩阵
///
/// `pred[i][j]` 为 i 到 j 最短路径上 j 的前驱。
#[derive(Debug, Clone)]
pub(crate) struct DistanceMatrix {
    dist: Vec<Vec<f64>>,
    pred: Vec<Vec<Option<NodeId>>>,
}

impl DistanceMatrix {
    pub(crate) fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.dist[from.index()][to.index()]
    }

    /// 重建 from 到 to 的路径，不连通返回 None
    pub(crate) fn path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if from == to {
            return Some(vec![from]);
        }
        if !self.distance(from, to).is_finite() {
            return None;
        }

        let row = &self.pred[from.index()];
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = row[current.index()]?;
            path.push(current);
            if path.len() > row.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

/// 计算全源最短路径
pub(crate) fn floyd_warshall(graph: &Graph) -> Result<DistanceMatrix> {
    let n = graph.node_count();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    let mut pred: Vec<Vec<Option<NodeId>>> = vec![vec![None; n]; n];

    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }

    for (from, to, edge) in graph.arcs() {
        let (i, j) = (from.index(), to.index());
        if edge.distance() < dist[i][j] {
            dist[i][j] = edge.distance();
            pred[i][j] = Some(from);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let via = dist[i][k];
            if !via.is_finite() {
                continue;
            }
            for j in 0..n {
                let candidate = via + dist[k][j];
                if candidate < dist[i][j] {
                    dist[i][j] = candidate;
                    pred[i][j] = pred[k][j];
                }
            }
        }
    }

    if let Some(i) = (0..n).find(|&i| dist[i][i] < 0.0) {
        let origin = graph.label(NodeId::new(i)).to_string();
        warn!(origin = %origin, "Floyd-Warshall 检测到负权环");
        return Err(Error::NegativeCycle { origin });
    }

    debug!(nodes = n, "Floyd-Warshall 完成");
    Ok(DistanceMatrix { dist, pred })
}
