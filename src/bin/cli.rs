//! RoadGraph CLI 工具
//!
//! 加载路网 CSV，运行最短路径或最大流并打印结果

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use roadgraph::algorithm::{Algorithm, EdmondsKarp, PathFinder};
use roadgraph::cli::{PrintMode, Printer};
use roadgraph::import::{load_coordinates, GraphLoader};
use roadgraph::LoaderConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roadgraph")]
#[command(about = "RoadGraph 路网最短路径与最大流工具", version)]
struct Args {
    /// 路网文件（origen;destino;distancia(km);ETA(min)[;flujo]）
    #[arg(short, long)]
    edges: PathBuf,

    /// 坐标文件（nombre;lat;lon），供 A* 使用
    #[arg(short, long)]
    coords: Option<PathBuf>,

    /// 按有向图加载
    #[arg(long)]
    directed: bool,

    /// 字段分隔符
    #[arg(long, default_value = ";")]
    delimiter: char,

    /// 缺少容量列时的默认容量
    #[arg(long, default_value = "1.0")]
    default_capacity: f64,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 逐行垂直显示表格结果
    #[arg(short = 'G', long, conflicts_with = "json")]
    vertical: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出节点、度与邻居
    Nodes,

    /// 点到点最短路径
    Path {
        from: String,
        to: String,
        /// dijkstra, bellman-ford, astar, floyd-warshall
        #[arg(short, long, default_value = "dijkstra")]
        algorithm: Algorithm,
    },

    /// 单源最短路径
    From {
        origin: String,
        #[arg(short, long, default_value = "dijkstra")]
        algorithm: Algorithm,
    },

    /// 全源最短路径（Floyd-Warshall）
    AllPairs,

    /// Edmonds-Karp 最大流
    Flow { source: String, sink: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roadgraph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.delimiter.is_ascii() {
        bail!("分隔符必须是单个 ASCII 字符: {:?}", args.delimiter);
    }

    let config = LoaderConfig::default()
        .with_delimiter(args.delimiter as u8)
        .with_default_capacity(args.default_capacity)
        .with_directed(args.directed);

    let mut graph = GraphLoader::new(config)
        .load_path(&args.edges)
        .with_context(|| format!("无法加载路网: {}", args.edges.display()))?;

    if let Some(path) = &args.coords {
        let table = load_coordinates(path, &config)
            .with_context(|| format!("无法加载坐标: {}", path.display()))?;
        let assigned = graph.assign_coordinates(&table);
        info!(assigned, entries = table.len(), "坐标已附加");
    }

    let printer = Printer::new(if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    });
    let finder = PathFinder::new(&graph);

    let output = match args.command {
        Command::Nodes => {
            if args.json {
                serde_json::to_string_pretty(graph.nodes())?
            } else {
                format!("{}\n{}", printer.print_stats(&graph), printer.print_nodes(&graph))
            }
        }
        Command::Path { from, to, algorithm } => {
            let result = finder.shortest_path(&from, &to, algorithm)?;
            if args.json {
                serde_json::to_string_pretty(&result)?
            } else {
                printer.print_path(&result)
            }
        }
        Command::From { origin, algorithm } => {
            let tree = finder.shortest_paths_from(&origin, algorithm)?;
            if args.json {
                serde_json::to_string_pretty(&tree)?
            } else {
                printer.print_tree(&tree)
            }
        }
        Command::AllPairs => {
            let all = finder.all_pairs()?;
            if args.json {
                serde_json::to_string_pretty(&all)?
            } else {
                printer.print_all_pairs(&all)
            }
        }
        Command::Flow { source, sink } => {
            let result = EdmondsKarp::new(&graph).max_flow(&source, &sink)?;
            if args.json {
                serde_json::to_string_pretty(&result)?
            } else {
                printer.print_flow(&result)
            }
        }
    };

    println!("{}", output);
    Ok(())
}
