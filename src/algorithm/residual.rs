//! 残量图
//!
//! 最大流的唯一内部表示：按节点句柄索引的邻接表，弧成对存储，
//! 第 2k 条为原边 k 的正向弧，第 2k+1 条为其反向弧（`arc ^ 1` 互为反向）。

use crate::graph::{EdgeId, Graph, NodeId};
use smallvec::SmallVec;
use std::collections::VecDeque;

type ArcList = SmallVec<[usize; 4]>;

/// 残量图
#[derive(Debug, Clone)]
pub(crate) struct ResidualGraph {
    /// 弧 -> 终点
    heads: Vec<NodeId>,
    /// 弧 -> 剩余容量
    residual: Vec<f64>,
    /// 节点 -> 出弧（插入顺序）
    adjacency: Vec<ArcList>,
}

/// 一条增广路径：弧序列与瓶颈
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Augmentation {
    pub arcs: Vec<usize>,
    pub bottleneck: f64,
}

impl ResidualGraph {
    /// 按原图的边顺序构建：正向残量 = 容量，反向残量 = 0
    pub(crate) fn from_graph(graph: &Graph) -> Self {
        let mut residual_graph = Self {
            heads: Vec::with_capacity(graph.edge_count() * 2),
            residual: Vec::with_capacity(graph.edge_count() * 2),
            adjacency: vec![ArcList::new(); graph.node_count()],
        };

        for edge in graph.edges() {
            residual_graph.add_arc_pair(edge.src(), edge.dst(), edge.capacity());
        }

        residual_graph
    }

    fn add_arc_pair(&mut self, from: NodeId, to: NodeId, capacity: f64) -> usize {
        let forward = self.heads.len();

        self.heads.push(to);
        self.residual.push(capacity);
        self.adjacency[from.index()].push(forward);

        self.heads.push(from);
        self.residual.push(0.0);
        self.adjacency[to.index()].push(forward + 1);

        forward
    }

    /// 原边对应的正向弧
    pub(crate) fn forward_arc(edge: EdgeId) -> usize {
        edge.index() * 2
    }

    /// 弧的起点
    pub(crate) fn tail(&self, arc: usize) -> NodeId {
        self.heads[arc ^ 1]
    }

    /// 弧的终点
    pub(crate) fn head(&self, arc: usize) -> NodeId {
        self.heads[arc]
    }

    /// 弧的剩余容量
    pub(crate) fn residual(&self, arc: usize) -> f64 {
        self.residual[arc]
    }

    /// BFS 沿剩余容量为正的弧寻找最短增广路径
    pub(crate) fn find_augmenting_path(&self, source: NodeId, sink: NodeId) -> Option<Augmentation> {
        let mut parent_arc: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        let mut visited = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::new();

        visited[source.index()] = true;
        queue.push_back(source);

        'search: while let Some(u) = queue.pop_front() {
            for &arc in &self.adjacency[u.index()] {
                let v = self.heads[arc];
                if !visited[v.index()] && self.residual[arc] > 0.0 {
                    visited[v.index()] = true;
                    parent_arc[v.index()] = Some(arc);
                    if v == sink {
                        break 'search;
                    }
                    queue.push_back(v);
                }
            }
        }

        if !visited[sink.index()] || source == sink {
            return None;
        }

        // 重构路径并计算瓶颈
        let mut arcs = Vec::new();
        let mut current = sink;
        while current != source {
            let arc = parent_arc[current.index()]?;
            arcs.push(arc);
            current = self.tail(arc);
        }
        arcs.reverse();

        let bottleneck = arcs
            .iter()
            .map(|&arc| self.residual[arc])
            .fold(f64::INFINITY, f64::min);

        Some(Augmentation { arcs, bottleneck })
    }

    /// 沿路径推送流量：正向残量减少，反向残量增加
    pub(crate) fn augment(&mut self, arcs: &[usize], amount: f64) {
        for &arc in arcs {
            self.residual[arc] -= amount;
            self.residual[arc ^ 1] += amount;
        }
    }

    /// 从 source 沿正残量可达的节点（最小割的源侧）
    pub(crate) fn reachable_from(&self, source: NodeId) -> Vec<bool> {
        let mut visited = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::new();

        visited[source.index()] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &arc in &self.adjacency[u.index()] {
                let v = self.heads[arc];
                if !visited[v.index()] && self.residual[arc] > 0.0 {
                    visited[v.index()] = true;
                    queue.push_back(v);
                }
            }
        }

        visited
    }

    /// 增广路径上的节点序列
    pub(crate) fn path_nodes(&self, arcs: &[usize]) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(arcs.len() + 1);
        if let Some(&first) = arcs.first() {
            nodes.push(self.tail(first));
        }
        nodes.extend(arcs.iter().map(|&arc| self.head(arc)));
        nodes
    }
}
