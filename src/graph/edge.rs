//! 边定义
//!
//! 道路：距离、通行时间、容量三个独立属性

use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};

/// 输入数据缺少容量时使用的默认值
pub const DEFAULT_CAPACITY: f64 = 1.0;

/// 边 ID（按插入顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// 边属性
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    /// 距离（公里），最短路径的权重
    pub distance: f64,
    /// 预计通行时间（分钟），只沿路径累加
    pub eta: f64,
    /// 容量（流量单位）
    pub capacity: f64,
}

impl EdgeAttrs {
    /// 使用默认容量创建
    pub fn new(distance: f64, eta: f64) -> Self {
        Self {
            distance,
            eta,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// 只关心容量的流网络边
    pub fn with_capacity_only(capacity: f64) -> Self {
        Self {
            distance: 1.0,
            eta: 0.0,
            capacity,
        }
    }

    /// 设置容量
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }
}

/// 边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源节点
    src: NodeId,
    /// 目标节点
    dst: NodeId,
    /// 属性
    attrs: EdgeAttrs,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, src: NodeId, dst: NodeId, attrs: EdgeAttrs) -> Self {
        Self {
            id,
            src,
            dst,
            attrs,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源节点
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// 获取目标节点
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    pub fn distance(&self) -> f64 {
        self.attrs.distance
    }

    pub fn eta(&self) -> f64 {
        self.attrs.eta
    }

    pub fn capacity(&self) -> f64 {
        self.attrs.capacity
    }

    /// 获取全部属性
    pub fn attrs(&self) -> &EdgeAttrs {
        &self.attrs
    }

    /// 覆盖属性（重复添加同一对节点之间的边时使用）
    pub(crate) fn set_attrs(&mut self, attrs: EdgeAttrs) {
        self.attrs = attrs;
    }
}
