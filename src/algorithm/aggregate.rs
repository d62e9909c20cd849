//! 结果汇总
//!
//! 沿路径累加距离与通行时间，计算边的流量利用率

use crate::graph::{Graph, NodeId};
use serde::Serialize;

/// 路径合计
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PathTotals {
    /// 总距离（公里）
    pub distance: f64,
    /// 总通行时间（分钟）
    pub eta: f64,
}

/// 沿路径相邻节点之间的边累加距离和通行时间
///
/// 通行时间从不参与选路，这里独立求和。
pub fn path_totals(graph: &Graph, path: &[NodeId]) -> PathTotals {
    path.windows(2)
        .filter_map(|pair| graph.edge_between(pair[0], pair[1]))
        .fold(PathTotals::default(), |acc, edge| PathTotals {
            distance: acc.distance + edge.distance(),
            eta: acc.eta + edge.eta(),
        })
}

/// 利用率（百分比），容量为 0 时为 0
pub fn utilization(flow: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        flow / capacity * 100.0
    } else {
        0.0
    }
}

/// 由原始容量与最终残量求边上的流量，结果不小于 0
pub fn edge_flow(capacity: f64, residual: f64) -> f64 {
    (capacity - residual).max(0.0)
}
