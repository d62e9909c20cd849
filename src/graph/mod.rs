//! 图核心模块
//!
//! 定义节点、边和图的核心数据结构

mod edge;
mod graph;
mod index;
mod node;

pub use edge::{Edge, EdgeAttrs, EdgeId, DEFAULT_CAPACITY};
pub use graph::Graph;
pub use index::{EdgeIndex, Neighbor, NodeIndex};
pub use node::{Node, NodeId};
