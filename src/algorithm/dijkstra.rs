//! Dijkstra 最短路径
//!
//! 要求距离非负。使用支持 decrease-key 的优先队列，
//! 优先级为 (暂定距离, 节点句柄)，同距离时句柄小者先出，结果可复现。

use super::shortest_path::SearchTree;
use crate::graph::{Graph, NodeId};
use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};

/// 可全序比较的距离
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cost(pub f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// 最小优先：`PriorityQueue` 先弹出最大优先级
pub(crate) type Priority = Reverse<(Cost, NodeId)>;

pub(crate) fn priority(cost: f64, node: NodeId) -> Priority {
    Reverse((Cost(cost), node))
}

/// 从 source 出发的 Dijkstra 搜索
///
/// 给定 target 时在其出队后提前结束。
pub(crate) fn dijkstra(graph: &Graph, source: NodeId, target: Option<NodeId>) -> SearchTree {
    let mut tree = SearchTree::new(graph.node_count(), source);
    let mut settled = vec![false; graph.node_count()];
    let mut queue: PriorityQueue<NodeId, Priority> = PriorityQueue::new();
    queue.push(source, priority(0.0, source));

    while let Some((current, _)) = queue.pop() {
        settled[current.index()] = true;
        if Some(current) == target {
            break;
        }

        let base = tree.distance(current);
        for neighbor in graph.neighbors(current) {
            let next = neighbor.node;
            if settled[next.index()] {
                continue;
            }
            let Some(edge) = graph.edge(neighbor.edge) else {
                continue;
            };

            let candidate = base + edge.distance();
            if tree.relax(current, next, candidate) {
                queue.push_increase(next, priority(candidate, next));
            }
        }
    }

    tree
}
