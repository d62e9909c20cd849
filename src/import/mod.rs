//! 数据导入模块
//!
//! 从分隔符文本（默认 `;`）批量导入路网与坐标表

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::graph::{EdgeAttrs, Graph};
use crate::types::{Coordinate, CoordinateTable};
use csv::{ByteRecord, Reader, ReaderBuilder, Trim};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const ORIGIN_COLUMNS: &[&str] = &["origen", "origin"];
const DESTINATION_COLUMNS: &[&str] = &["destino", "destination"];
const DISTANCE_COLUMNS: &[&str] = &["distancia(km)", "distancia", "distance"];
const ETA_COLUMNS: &[&str] = &["eta(min)", "eta"];
const CAPACITY_COLUMNS: &[&str] = &["flujo", "capacidad", "capacity"];

const NAME_COLUMNS: &[&str] = &["nombre", "name"];
const LAT_COLUMNS: &[&str] = &["lat", "latitud", "latitude"];
const LON_COLUMNS: &[&str] = &["lon", "longitud", "longitude"];

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub records: usize,
    pub nodes: usize,
    pub edges: usize,
    pub duration_ms: u64,
}

/// 路网加载器
#[derive(Debug, Clone, Default)]
pub struct GraphLoader {
    config: LoaderConfig,
}

impl GraphLoader {
    /// 创建加载器
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// 从文件加载路网
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Graph> {
        self.load_with_stats(path).map(|(graph, _)| graph)
    }

    /// 从文件加载路网并返回统计
    pub fn load_with_stats<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let path = path.as_ref();
        debug!(path = %path.display(), "打开路网文件");
        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// 从任意输入流加载路网
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<(Graph, ImportStats)> {
        let start = std::time::Instant::now();
        let mut reader = open_reader(reader, &self.config);

        let headers = reader.byte_headers()?.clone();
        let origin = require_column(&headers, ORIGIN_COLUMNS)?;
        let destination = require_column(&headers, DESTINATION_COLUMNS)?;
        let distance = require_column(&headers, DISTANCE_COLUMNS)?;
        let eta = require_column(&headers, ETA_COLUMNS)?;
        let capacity = find_column(&headers, CAPACITY_COLUMNS);

        let mut graph = Graph::new(self.config.graph_kind());
        let mut stats = ImportStats::default();

        for (i, record) in reader.byte_records().enumerate() {
            let record = record?;
            let line = record_line(&record, i);

            let src = label_field(&record, origin, line)?;
            let dst = label_field(&record, destination, line)?;
            let mut attrs = EdgeAttrs::new(
                number_field(&record, distance, line)?,
                number_field(&record, eta, line)?,
            )
            .with_capacity(self.config.default_capacity);

            if let Some(column) = capacity {
                if record.get(column).map_or(false, |v| !v.is_empty()) {
                    attrs = attrs.with_capacity(number_field(&record, column, line)?);
                }
            }

            graph.add_edge(&src, &dst, attrs);
            stats.records += 1;
        }

        stats.nodes = graph.node_count();
        stats.edges = graph.edge_count();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            records = stats.records,
            nodes = stats.nodes,
            edges = stats.edges,
            "路网加载完成"
        );
        Ok((graph, stats))
    }
}

/// 从坐标文件读取“地名 -> 坐标”表
///
/// 地名按与路网相同的规则规范化，便于直接匹配节点。
pub fn load_coordinates<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<CoordinateTable> {
    let file = File::open(path.as_ref())?;
    read_coordinates(file, config)
}

/// 从输入流读取坐标表
pub fn read_coordinates<R: Read>(reader: R, config: &LoaderConfig) -> Result<CoordinateTable> {
    let mut reader = open_reader(reader, config);

    let headers = reader.byte_headers()?.clone();
    let name = require_column(&headers, NAME_COLUMNS)?;
    let lat = require_column(&headers, LAT_COLUMNS)?;
    let lon = require_column(&headers, LON_COLUMNS)?;

    let mut table = CoordinateTable::new();
    for (i, record) in reader.byte_records().enumerate() {
        let record = record?;
        let line = record_line(&record, i);
        let label = label_field(&record, name, line)?;
        let coordinate = Coordinate::new(
            raw_number(&record, lat, line)?,
            raw_number(&record, lon, line)?,
        );
        table.insert(label, coordinate);
    }

    debug!(entries = table.len(), "坐标表加载完成");
    Ok(table)
}

/// 地名规范化：去除首尾空白，每个单词首字母大写
pub fn normalize_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

/// 字段数不一致的行交给字段访问报告，以便指明行号
fn open_reader<R: Read>(reader: R, config: &LoaderConfig) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// 记录所在的行号（表头占第 1 行）
fn record_line(record: &ByteRecord, index: usize) -> u64 {
    record
        .position()
        .map_or(index as u64 + 2, |pos| pos.line())
}

/// 字段解码：合法 UTF-8 原样使用，否则按 Latin-1 逐字节映射
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

fn find_column(headers: &ByteRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| decode(h).eq_ignore_ascii_case(n)))
}

fn require_column(headers: &ByteRecord, names: &[&str]) -> Result<usize> {
    find_column(headers, names).ok_or_else(|| {
        Error::MalformedGraph(format!("缺少列: {}", names.join(" / ")))
    })
}

fn field(record: &ByteRecord, column: usize, line: u64) -> Result<Cow<'_, str>> {
    record.get(column).map(decode).ok_or_else(|| {
        Error::MalformedGraph(format!("第 {} 行: 缺少字段 (第 {} 列)", line, column + 1))
    })
}

fn label_field(record: &ByteRecord, column: usize, line: u64) -> Result<String> {
    let label = normalize_label(&field(record, column, line)?);
    if label.is_empty() {
        return Err(Error::MalformedGraph(format!("第 {} 行: 地名为空", line)));
    }
    Ok(label)
}

fn raw_number(record: &ByteRecord, column: usize, line: u64) -> Result<f64> {
    let raw = field(record, column, line)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::MalformedGraph(format!("第 {} 行: 无法解析数值 '{}'", line, raw)))
}

/// 边属性数值：必须可解析且非负
fn number_field(record: &ByteRecord, column: usize, line: u64) -> Result<f64> {
    let value = raw_number(record, column, line)?;
    if value < 0.0 {
        return Err(Error::MalformedGraph(format!(
            "第 {} 行: 数值不能为负 ({})",
            line, value
        )));
    }
    Ok(value)
}
