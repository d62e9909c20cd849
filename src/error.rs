//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("不存在从 {origin} 到 {destination} 的路径")]
    NoPath { origin: String, destination: String },

    #[error("从 {origin} 可达的负权环")]
    NegativeCycle { origin: String },

    #[error("边 {src} -> {dst} 的距离为负: {distance}")]
    NegativeWeight {
        src: String,
        dst: String,
        distance: f64,
    },

    #[error("最大流前置校验失败: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("未知算法: {0}")]
    UnknownAlgorithm(String),

    #[error("图数据格式错误: {0}")]
    MalformedGraph(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}

/// 最大流前置校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("源点 '{0}' 不存在")]
    SourceMissing(String),

    #[error("汇点 '{0}' 不存在")]
    SinkMissing(String),

    #[error("源点与汇点不能相同: '{0}'")]
    SourceIsSink(String),

    #[error("边 {src}-{dst} 的容量无效: {capacity}")]
    InvalidCapacity {
        src: String,
        dst: String,
        capacity: f64,
    },

    #[error("'{from}' 与 '{to}' 之间不存在路径")]
    NoRoute { from: String, to: String },
}

impl ValidationError {
    /// 是否阻止计算开始
    ///
    /// `NoRoute` 只是提示：计算仍可进行，结果为零流。
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ValidationError::NoRoute { .. })
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
