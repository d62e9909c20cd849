//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）
//! 用于分析路网从源点到汇点的最大通行能力

use super::aggregate::{edge_flow, utilization};
use super::residual::ResidualGraph;
use crate::error::{Error, Result, ValidationError};
use crate::graph::{Graph, NodeId};
use serde::Serialize;
use tracing::{debug, info, warn};

/// 判定“满载”的容差
const SATURATION_EPSILON: f64 = 1e-9;

/// 一条增广路径记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentingPath {
    /// 源点到汇点的节点序列
    pub path: Vec<String>,
    /// 本次推送的流量（瓶颈）
    pub flow: f64,
    /// 截至本次的累计流量
    pub total_flow: f64,
}

/// 原图中一条边的流量分配
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeFlow {
    pub src: String,
    pub dst: String,
    pub flow: f64,
    pub capacity: f64,
    /// 利用率（百分比）
    pub utilization: f64,
}

impl EdgeFlow {
    /// 流量是否达到容量
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0.0 && (self.capacity - self.flow).abs() < SATURATION_EPSILON
    }
}

/// 最大流结果
#[derive(Debug, Clone, Serialize)]
pub struct FlowResult {
    pub source: String,
    pub sink: String,
    /// 最大流量值
    pub value: f64,
    /// 按发现顺序排列的增广路径
    pub augmenting_paths: Vec<AugmentingPath>,
    /// 每条原始边的流量（原图边顺序）
    pub edge_flows: Vec<EdgeFlow>,
    /// 最小割的源侧节点
    pub source_side: Vec<String>,
    /// 最小割上的边 (src, dst)
    pub min_cut: Vec<(String, String)>,
}

impl FlowResult {
    /// 查找某条原始边的流量（按存储方向）
    pub fn edge_flow(&self, src: &str, dst: &str) -> Option<&EdgeFlow> {
        self.edge_flows
            .iter()
            .find(|f| f.src == src && f.dst == dst)
    }

    /// 最小割容量，按最大流最小割定理应等于 `value`
    pub fn min_cut_capacity(&self) -> f64 {
        self.min_cut
            .iter()
            .filter_map(|(src, dst)| self.edge_flow(src, dst))
            .map(|f| f.capacity)
            .sum()
    }

    /// 满载的边（限制流量的瓶颈边）
    pub fn saturated_edges(&self) -> impl Iterator<Item = &EdgeFlow> {
        self.edge_flows.iter().filter(|f| f.is_saturated())
    }

    /// 有流量经过的边
    pub fn used_edges(&self) -> impl Iterator<Item = &EdgeFlow> {
        self.edge_flows.iter().filter(|f| f.flow > 0.0)
    }
}

/// 最大流前置校验
///
/// 返回全部问题；`NoRoute` 只是提示，其余会阻止计算。
pub fn validate_flow_network(graph: &Graph, source: &str, sink: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let source_id = graph.node_id(source);
    let sink_id = graph.node_id(sink);

    if source_id.is_none() {
        errors.push(ValidationError::SourceMissing(source.to_string()));
    }
    if sink_id.is_none() {
        errors.push(ValidationError::SinkMissing(sink.to_string()));
    }
    if source == sink {
        errors.push(ValidationError::SourceIsSink(source.to_string()));
    }

    if let (Some(s), Some(t)) = (source_id, sink_id) {
        if s != t && !graph.is_reachable(s, t) {
            errors.push(ValidationError::NoRoute {
                from: source.to_string(),
                to: sink.to_string(),
            });
        }
    }

    for edge in graph.edges() {
        let capacity = edge.capacity();
        if !(capacity > 0.0 && capacity.is_finite()) {
            errors.push(ValidationError::InvalidCapacity {
                src: graph.label(edge.src()).to_string(),
                dst: graph.label(edge.dst()).to_string(),
                capacity,
            });
        }
    }

    errors
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp<'g> {
    graph: &'g Graph,
}

impl<'g> EdmondsKarp<'g> {
    /// 创建算法实例
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 前置校验
    pub fn validate(&self, source: &str, sink: &str) -> Vec<ValidationError> {
        validate_flow_network(self.graph, source, sink)
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: &str, sink: &str) -> Result<FlowResult> {
        let (fatal, advisory): (Vec<_>, Vec<_>) = self
            .validate(source, sink)
            .into_iter()
            .partition(|e| e.is_fatal());

        if !fatal.is_empty() {
            return Err(Error::Validation(fatal));
        }
        for note in &advisory {
            warn!("{}", note);
        }

        let graph = self.graph;
        let source_id = graph.require_node(source)?;
        let sink_id = graph.require_node(sink)?;

        info!(source, sink, edges = graph.edge_count(), "开始计算最大流");

        let mut residual = ResidualGraph::from_graph(graph);
        let mut value = 0.0;
        let mut augmenting_paths = Vec::new();

        // Edmonds-Karp: 重复 BFS 找增广路径
        while let Some(aug) = residual.find_augmenting_path(source_id, sink_id) {
            residual.augment(&aug.arcs, aug.bottleneck);
            value += aug.bottleneck;

            let path = graph.labels(&residual.path_nodes(&aug.arcs));
            debug!(path = ?path, bottleneck = aug.bottleneck, total = value, "增广");

            augmenting_paths.push(AugmentingPath {
                path,
                flow: aug.bottleneck,
                total_flow: value,
            });
        }

        let edge_flows = graph
            .edges()
            .iter()
            .map(|edge| {
                let capacity = edge.capacity();
                let arc = ResidualGraph::forward_arc(edge.id());
                let flow = edge_flow(capacity, residual.residual(arc));
                EdgeFlow {
                    src: graph.label(edge.src()).to_string(),
                    dst: graph.label(edge.dst()).to_string(),
                    flow,
                    capacity,
                    utilization: utilization(flow, capacity),
                }
            })
            .collect();

        // 找最小割（BFS 从源点出发，能到达的节点属于源侧）
        let side = residual.reachable_from(source_id);
        let in_side = |id: NodeId| side[id.index()];
        let source_side = graph
            .node_ids()
            .filter(|&id| in_side(id))
            .map(|id| graph.label(id).to_string())
            .collect();
        let min_cut = graph
            .edges()
            .iter()
            .filter(|e| in_side(e.src()) && !in_side(e.dst()))
            .map(|e| {
                (
                    graph.label(e.src()).to_string(),
                    graph.label(e.dst()).to_string(),
                )
            })
            .collect();

        info!(
            value,
            paths = augmenting_paths.len(),
            "最大流计算完成"
        );

        Ok(FlowResult {
            source: source.to_string(),
            sink: sink.to_string(),
            value,
            augmenting_paths,
            edge_flows,
            source_side,
            min_cut,
        })
    }
}

/// 计算最大流
pub fn max_flow(graph: &Graph, source: &str, sink: &str) -> Result<FlowResult> {
    EdmondsKarp::new(graph).max_flow(source, sink)
}
