//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::{AllPairs, FlowResult, PathResult, PathTree};
use crate::graph::Graph;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 通用结果集输出
    pub fn print_result(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        if columns.is_empty() || rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{} row(s) in set\n", output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 点到点路径
    pub fn print_path(&self, result: &PathResult) -> String {
        if !result.is_found() {
            return format!(
                "未找到从 {} 到 {} 的路径 ({})\n",
                result.origin, result.destination, result.algorithm
            );
        }

        let rows = vec![vec![
            result.algorithm.to_string(),
            format_route(&result.nodes),
            format_number(result.distance),
            format_number(result.eta),
            result.hops().to_string(),
        ]];
        self.print_result(&["算法", "路线", "距离(km)", "时间(min)", "边数"], &rows)
    }

    /// 单源路径树
    pub fn print_tree(&self, tree: &PathTree) -> String {
        let rows: Vec<Vec<String>> = tree
            .iter()
            .map(|(destination, path)| {
                vec![
                    destination.clone(),
                    format_number(path.distance),
                    format_number(path.eta),
                    format_route(&path.nodes),
                ]
            })
            .collect();

        format!(
            "从 {} 出发 ({})\n{}",
            tree.origin,
            tree.algorithm,
            self.print_result(&["目的地", "距离(km)", "时间(min)", "路线"], &rows)
        )
    }

    /// 全源最短路径
    pub fn print_all_pairs(&self, all: &AllPairs) -> String {
        let rows: Vec<Vec<String>> = all
            .iter()
            .filter(|p| p.origin != p.destination)
            .map(|p| {
                vec![
                    p.origin.clone(),
                    p.destination.clone(),
                    format_number(p.distance),
                    format_number(p.eta),
                    format_route(&p.nodes),
                ]
            })
            .collect();

        self.print_result(&["起点", "终点", "距离(km)", "时间(min)", "路线"], &rows)
    }

    /// 最大流结果：增广路径、边流量与最小割
    pub fn print_flow(&self, result: &FlowResult) -> String {
        let mut output = format!(
            "最大流 {} -> {}: {}\n\n",
            result.source,
            result.sink,
            format_number(result.value)
        );

        let paths: Vec<Vec<String>> = result
            .augmenting_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                vec![
                    (i + 1).to_string(),
                    format_route(&p.path),
                    format_number(p.flow),
                    format_number(p.total_flow),
                ]
            })
            .collect();
        output.push_str("增广路径:\n");
        output.push_str(&self.print_result(&["#", "路径", "流量", "累计"], &paths));

        let flows: Vec<Vec<String>> = result
            .used_edges()
            .map(|e| {
                vec![
                    format!("{} -> {}", e.src, e.dst),
                    format!("{}/{}", format_number(e.flow), format_number(e.capacity)),
                    format!("{:.1}%", e.utilization),
                    if e.is_saturated() { "是" } else { "否" }.to_string(),
                ]
            })
            .collect();
        output.push_str("\n边流量:\n");
        output.push_str(&self.print_result(&["边", "流量/容量", "利用率", "饱和"], &flows));

        let cut: Vec<String> = result
            .min_cut
            .iter()
            .map(|(src, dst)| format!("{} -> {}", src, dst))
            .collect();
        output.push_str(&format!(
            "\n最小割 (容量 {}): {}\n",
            format_number(result.min_cut_capacity()),
            cut.join(", ")
        ));

        output
    }

    /// 节点概览：度与邻居
    pub fn print_nodes(&self, graph: &Graph) -> String {
        let rows: Vec<Vec<String>> = graph
            .nodes()
            .iter()
            .map(|node| {
                let neighbors: Vec<&str> = graph
                    .neighbors(node.id())
                    .iter()
                    .map(|n| graph.label(n.node))
                    .collect();
                vec![
                    node.label().to_string(),
                    graph.degree(node.id()).to_string(),
                    neighbors.join(", "),
                    node.coordinate()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        self.print_result(&["节点", "度", "邻居", "坐标"], &rows)
    }

    /// 打印统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let kind = if graph.is_directed() { "directed" } else { "undirected" };
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Kind", kind]);
        table.add_row(row!["Node Count", graph.node_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.to_string()
    }
}

/// 数值格式化，无穷大显示为 ∞
pub fn format_number(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "∞".to_string()
    }
}

fn format_route(nodes: &[String]) -> String {
    nodes.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{max_flow, shortest_path, Algorithm};
    use crate::graph::EdgeAttrs;

    fn triangle() -> Graph {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", EdgeAttrs::new(10.0, 5.0));
        graph.add_edge("B", "C", EdgeAttrs::new(5.0, 3.0));
        graph.add_edge("A", "C", EdgeAttrs::new(20.0, 10.0));
        graph.add_node("Z");
        graph
    }

    #[test]
    fn test_print_path() {
        let graph = triangle();
        let printer = Printer::default();

        let found = shortest_path(&graph, "A", "C", Algorithm::Dijkstra).unwrap();
        let output = printer.print_path(&found);
        assert!(output.contains("A -> B -> C"));
        assert!(output.contains("15.00"));

        let missing = shortest_path(&graph, "A", "Z", Algorithm::Dijkstra).unwrap();
        let output = printer.print_path(&missing);
        assert!(output.starts_with("未找到"));
    }

    #[test]
    fn test_print_flow() {
        let mut graph = Graph::directed();
        graph.add_edge("S", "A", EdgeAttrs::with_capacity_only(10.0));
        graph.add_edge("A", "T", EdgeAttrs::with_capacity_only(5.0));
        graph.add_edge("S", "T", EdgeAttrs::with_capacity_only(3.0));

        let result = max_flow(&graph, "S", "T").unwrap();
        let output = Printer::default().print_flow(&result);
        assert!(output.contains("8.00"));
        assert!(output.contains("S -> A -> T"));
        assert!(output.contains("最小割"));
    }

    #[test]
    fn test_print_nodes_vertical() {
        let graph = triangle();
        let printer = Printer::new(PrintMode::Vertical);
        let output = printer.print_nodes(&graph);
        assert!(output.contains("1. row"));
        assert!(output.contains("4 row(s) in set"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.5), "2.50");
        assert_eq!(format_number(f64::INFINITY), "∞");
    }
}
