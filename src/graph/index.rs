//! 图索引
//!
//! 地名到节点句柄的映射，以及邻接表

use crate::graph::edge::EdgeId;
use crate::graph::node::NodeId;
use indexmap::IndexMap;
use std::collections::HashMap;

/// 节点索引（保持插入顺序）
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    /// 地名到节点句柄的映射
    label_to_id: IndexMap<String, NodeId>,
}

impl NodeIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加地名索引
    pub fn insert(&mut self, label: String, node_id: NodeId) {
        self.label_to_id.insert(label, node_id);
    }

    /// 通过地名查找节点
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.label_to_id.get(label).copied()
    }

    /// 获取节点数量
    pub fn len(&self) -> usize {
        self.label_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label_to_id.is_empty()
    }
}

/// 邻接项：经由 `edge` 可到达 `node`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub node: NodeId,
    pub edge: EdgeId,
}

/// 边索引
#[derive(Debug, Clone)]
pub struct EdgeIndex {
    /// 是否有向
    directed: bool,
    /// 每个节点可通行的邻接项（插入顺序）
    adjacency: Vec<Vec<Neighbor>>,
    /// 点对到边 ID 的映射（无向图使用规范化点对）
    pair_to_edge: HashMap<(NodeId, NodeId), EdgeId>,
}

impl EdgeIndex {
    /// 创建新索引
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            adjacency: Vec::new(),
            pair_to_edge: HashMap::new(),
        }
    }

    /// 为新节点预留邻接表
    pub fn add_node(&mut self) {
        self.adjacency.push(Vec::new());
    }

    fn key(&self, src: NodeId, dst: NodeId) -> (NodeId, NodeId) {
        if self.directed || src <= dst {
            (src, dst)
        } else {
            (dst, src)
        }
    }

    /// 添加边
    pub fn add_edge(&mut self, edge_id: EdgeId, src: NodeId, dst: NodeId) {
        self.adjacency[src.index()].push(Neighbor {
            node: dst,
            edge: edge_id,
        });
        // 无向图双向可通行，自环只记一次
        if !self.directed && src != dst {
            self.adjacency[dst.index()].push(Neighbor {
                node: src,
                edge: edge_id,
            });
        }

        let key = self.key(src, dst);
        self.pair_to_edge.insert(key, edge_id);
    }

    /// 获取两点之间的边
    pub fn edge_between(&self, src: NodeId, dst: NodeId) -> Option<EdgeId> {
        self.pair_to_edge.get(&self.key(src, dst)).copied()
    }

    /// 获取节点的邻接项
    pub fn neighbors(&self, node_id: NodeId) -> &[Neighbor] {
        self.adjacency
            .get(node_id.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 获取节点的度（有向图为出度）
    pub fn degree(&self, node_id: NodeId) -> usize {
        self.neighbors(node_id).len()
    }
}
