//! 图数据结构
//!
//! 内存中的加权路网。构建完成后对算法只读。

use super::edge::{Edge, EdgeAttrs, EdgeId};
use super::index::{EdgeIndex, Neighbor, NodeIndex};
use super::node::{Node, NodeId};
use crate::error::{Error, Result};
use crate::types::{Coordinate, CoordinateTable, GraphKind};
use std::collections::VecDeque;

/// 路网图
#[derive(Debug, Clone)]
pub struct Graph {
    /// 方向性
    kind: GraphKind,
    /// 节点（下标即 NodeId）
    nodes: Vec<Node>,
    /// 边（下标即 EdgeId）
    edges: Vec<Edge>,
    /// 节点索引
    node_index: NodeIndex,
    /// 边索引
    edge_index: EdgeIndex,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl Graph {
    /// 创建空图
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: NodeIndex::new(),
            edge_index: EdgeIndex::new(kind.is_directed()),
        }
    }

    /// 创建无向图
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// 创建有向图
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// 获取方向性
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    // ==================== 节点操作 ====================

    /// 添加节点，已存在时返回原句柄
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(existing_id) = self.node_index.get(&label) {
            return existing_id;
        }

        let id = NodeId::new(self.nodes.len());
        self.node_index.insert(label.clone(), id);
        self.edge_index.add_node();
        self.nodes.push(Node::new(id, label));

        id
    }

    /// 通过地名查找节点句柄
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.node_index.get(label)
    }

    /// 通过地名查找节点句柄，不存在时报错
    pub fn require_node(&self, label: &str) -> Result<NodeId> {
        self.node_id(label)
            .ok_or_else(|| Error::NodeNotFound(label.to_string()))
    }

    /// 是否包含节点
    pub fn contains(&self, label: &str) -> bool {
        self.node_index.get(label).is_some()
    }

    /// 获取节点
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// 获取节点地名
    ///
    /// 句柄必须来自本图。
    pub fn label(&self, id: NodeId) -> &str {
        self.nodes[id.index()].label()
    }

    /// 将句柄序列转换为地名序列
    pub fn labels(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| self.label(id).to_string()).collect()
    }

    /// 所有节点（插入顺序）
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// 所有节点句柄
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// 获取节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== 坐标 ====================

    /// 设置单个节点坐标
    pub fn set_coordinate(&mut self, label: &str, coordinate: Coordinate) -> Result<()> {
        let id = self.require_node(label)?;
        self.nodes[id.index()].set_coordinate(coordinate);
        Ok(())
    }

    /// 按坐标表为节点附加坐标，返回匹配到的节点数
    ///
    /// 表中不存在于图内的地名被忽略。
    pub fn assign_coordinates(&mut self, table: &CoordinateTable) -> usize {
        let mut assigned = 0;
        for (label, coordinate) in table {
            if let Some(id) = self.node_index.get(label) {
                self.nodes[id.index()].set_coordinate(*coordinate);
                assigned += 1;
            }
        }
        assigned
    }

    /// 获取节点坐标（缺失或哨兵值返回 None）
    pub fn coordinate(&self, id: NodeId) -> Option<Coordinate> {
        self.node(id).and_then(|n| n.coordinate())
    }

    // ==================== 边操作 ====================

    /// 添加边，端点不存在时自动创建
    ///
    /// 同一对节点之间已有边时覆盖其属性，不产生平行边。
    pub fn add_edge(&mut self, src: &str, dst: &str, attrs: EdgeAttrs) -> EdgeId {
        let src = self.add_node(src);
        let dst = self.add_node(dst);
        self.connect(src, dst, attrs)
    }

    /// 通过句柄添加边
    pub fn add_edge_between(&mut self, src: NodeId, dst: NodeId, attrs: EdgeAttrs) -> Result<EdgeId> {
        if src.index() >= self.nodes.len() {
            return Err(Error::NodeNotFound(src.to_string()));
        }
        if dst.index() >= self.nodes.len() {
            return Err(Error::NodeNotFound(dst.to_string()));
        }
        Ok(self.connect(src, dst, attrs))
    }

    fn connect(&mut self, src: NodeId, dst: NodeId, attrs: EdgeAttrs) -> EdgeId {
        if let Some(existing) = self.edge_index.edge_between(src, dst) {
            self.edges[existing.index()].set_attrs(attrs);
            return existing;
        }

        let id = EdgeId::new(self.edges.len());
        self.edge_index.add_edge(id, src, dst);
        self.edges.push(Edge::new(id, src, dst, attrs));
        id
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// 所有边（插入顺序）
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 获取两点之间的边（无向图不区分方向）
    pub fn edge_between(&self, src: NodeId, dst: NodeId) -> Option<&Edge> {
        self.edge_index
            .edge_between(src, dst)
            .and_then(|id| self.edge(id))
    }

    /// 所有可通行方向的弧 (from, to, edge)
    ///
    /// 无向图的每条边产生两个方向（自环一个）。
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, NodeId, &Edge)> + '_ {
        let directed = self.is_directed();
        self.edges.iter().flat_map(move |e| {
            let forward = Some((e.src(), e.dst(), e));
            let backward = (!directed && e.src() != e.dst()).then(|| (e.dst(), e.src(), e));
            forward.into_iter().chain(backward)
        })
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 第一条距离为负的边
    pub fn first_negative_edge(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.distance() < 0.0)
    }

    /// 距离为负的边报告为错误（供要求非负权的算法使用）
    pub fn ensure_non_negative(&self) -> Result<()> {
        match self.first_negative_edge() {
            Some(edge) => Err(Error::NegativeWeight {
                src: self.label(edge.src()).to_string(),
                dst: self.label(edge.dst()).to_string(),
                distance: edge.distance(),
            }),
            None => Ok(()),
        }
    }

    // ==================== 邻居查询 ====================

    /// 获取节点的邻接项（插入顺序）
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        self.edge_index.neighbors(id)
    }

    /// 获取节点的度（有向图为出度）
    pub fn degree(&self, id: NodeId) -> usize {
        self.edge_index.degree(id)
    }

    /// 判断两点是否连通（沿可通行方向）
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> bool {
        if from == to {
            return true;
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        visited[from.index()] = true;
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                let next = neighbor.node;
                if next == to {
                    return true;
                }
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        false
    }
}
