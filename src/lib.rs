//! RoadGraph - 道路网络最短路径与最大流引擎
//!
//! 在带权道路图上提供：
//! - 点到点、单源、全源最短路径（Dijkstra、Bellman-Ford、A*、Floyd-Warshall）
//! - Edmonds-Karp 最大流、增广路径分解与最小割
//! - 路径距离/时间汇总与边利用率
//! - CSV 路网与坐标表导入

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    Algorithm, AllPairs, EdmondsKarp, FlowResult, PathFinder, PathRequest, PathResult, PathTree,
};
pub use config::LoaderConfig;
pub use error::{Error, Result, ValidationError};
pub use graph::{Edge, EdgeAttrs, EdgeId, Graph, Node, NodeId, DEFAULT_CAPACITY};
pub use import::{load_coordinates, GraphLoader};
pub use types::{Coordinate, CoordinateTable, GraphKind};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
