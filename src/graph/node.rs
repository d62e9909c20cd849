//! 节点定义
//!
//! 路网中的地点：标签 + 可选坐标

use crate::types::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点句柄（按插入顺序分配的稳定整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// 节点句柄
    id: NodeId,
    /// 地名（由构图方规范化）
    label: String,
    /// 坐标，仅供 A* 启发函数使用
    coordinate: Option<Coordinate>,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, label: String) -> Self {
        Self {
            id,
            label,
            coordinate: None,
        }
    }

    /// 获取节点句柄
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// 获取地名
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 获取坐标
    ///
    /// (0, 0) 哨兵值视为缺失。
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate.filter(|c| !c.is_unset())
    }

    /// 设置坐标
    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
    }
}
