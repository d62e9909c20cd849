//! A* 启发式最短路径
//!
//! 与 Dijkstra 约定相同，按 g + h 出队。h 为两点坐标的直线距离近似，
//! 任一端缺坐标时为 0（退化为 Dijkstra）。
//!
//! 坐标错误时 h 可能高估剩余距离，此时不再保证最短；这是调用方的责任。

use super::dijkstra::{priority, Priority};
use crate::graph::{Graph, NodeId};
use priority_queue::PriorityQueue;

/// 启发函数：节点到目标的直线距离（公里）
pub fn heuristic(graph: &Graph, node: NodeId, goal: NodeId) -> f64 {
    match (graph.coordinate(node), graph.coordinate(goal)) {
        (Some(a), Some(b)) => a.approx_km(&b),
        _ => 0.0,
    }
}

/// 从 source 到 target 的 A* 搜索，不可达返回 None
pub(crate) fn astar(graph: &Graph, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
    let n = graph.node_count();
    let mut g_score = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut queue: PriorityQueue<NodeId, Priority> = PriorityQueue::new();

    g_score[source.index()] = 0.0;
    queue.push(source, priority(heuristic(graph, source, target), source));

    while let Some((current, _)) = queue.pop() {
        if current == target {
            return Some(reconstruct(&parent, source, target));
        }
        closed[current.index()] = true;

        let g_current = g_score[current.index()];
        for neighbor in graph.neighbors(current) {
            let next = neighbor.node;
            if closed[next.index()] {
                continue;
            }
            let Some(edge) = graph.edge(neighbor.edge) else {
                continue;
            };

            let tentative = g_current + edge.distance();
            if tentative < g_score[next.index()] {
                g_score[next.index()] = tentative;
                parent[next.index()] = Some(current);
                let f = tentative + heuristic(graph, next, target);
                queue.push_increase(next, priority(f, next));
            }
        }
    }

    None
}

fn reconstruct(parent: &[Option<NodeId>], source: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match parent[current.index()] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
