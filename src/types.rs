//! 通用类型定义

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 纬度/经度 1 度对应的近似公里数
pub const KM_PER_DEGREE: f64 = 111.0;

/// 地理坐标（纬度, 经度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// 历史数据用 (0, 0) 表示“未知坐标”
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }

    /// 欧氏距离近似（单位：公里）
    ///
    /// 对区域尺度的路网足够，直线距离不会超过道路距离。
    pub fn approx_km(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt() * KM_PER_DEGREE
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// 调用方提供的“地名 -> 坐标”映射
pub type CoordinateTable = IndexMap<String, Coordinate>;

/// 图的方向性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    /// 无向图（路网默认）
    Undirected,
    /// 有向图（流网络）
    Directed,
}

impl Default for GraphKind {
    fn default() -> Self {
        GraphKind::Undirected
    }
}

impl GraphKind {
    pub fn is_directed(&self) -> bool {
        matches!(self, GraphKind::Directed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_km() {
        let a = Coordinate::new(10.0, -75.0);
        let b = Coordinate::new(10.3, -75.4);
        // sqrt(0.09 + 0.16) = 0.5 度
        assert!((a.approx_km(&b) - 55.5).abs() < 1e-9);
        assert_eq!(a.approx_km(&a), 0.0);
    }

    #[test]
    fn test_unset_sentinel() {
        assert!(Coordinate::new(0.0, 0.0).is_unset());
        assert!(!Coordinate::new(0.0, -75.5).is_unset());
    }
}
