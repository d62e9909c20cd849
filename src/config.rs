//! 导入配置

use crate::graph::DEFAULT_CAPACITY;
use crate::types::GraphKind;
use serde::{Deserialize, Serialize};

/// 路网加载配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 字段分隔符
    pub delimiter: u8,
    /// 缺少容量列时使用的容量
    pub default_capacity: f64,
    /// 是否按有向图加载
    pub directed: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            default_capacity: DEFAULT_CAPACITY,
            directed: false,
        }
    }
}

impl LoaderConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_default_capacity(mut self, capacity: f64) -> Self {
        self.default_capacity = capacity;
        self
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// 对应的图类型
    pub fn graph_kind(&self) -> GraphKind {
        if self.directed {
            GraphKind::Directed
        } else {
            GraphKind::Undirected
        }
    }
}
