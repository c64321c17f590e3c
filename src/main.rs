use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, Writer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dynroute::{
    compute_shortest_paths_with, Cancellation, Cost, NodeId, QueryOptions, QueryReport, Router,
    TieBreak,
};

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Pick the nearest of several destinations over a road graph, then re-route after traffic updates.", long_about = None)]
struct Cli {
    /// Edge list CSV with a `source,target,weight` header
    #[arg(short, long, required_unless_present = "demo")]
    edges: Option<String>,

    /// Use the built-in 8-intersection road network instead of a CSV
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Treat every CSV row as a two-way road
    #[arg(long, default_value_t = false)]
    two_way: bool,

    /// Start node
    #[arg(short, long, default_value_t = 1)]
    start: NodeId,

    /// Candidate destinations, in tie-break order
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![7, 8])]
    candidates: Vec<NodeId>,

    /// Traffic update `source:target:weight`, applied after the first query
    #[arg(short, long)]
    update: Vec<String>,

    #[arg(long, default_value_t = String::from("fifo"))]
    tie_break: String,

    /// Abort a search that runs longer than this
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Output CSV (node_id, distance) for the final query's start node
    #[arg(short, long)]
    out: Option<String>,

    /// Include unreachable nodes in output with infinite distance
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn tie_break_from(string: &str) -> Result<TieBreak> {
    match string {
        "fifo" => Ok(TieBreak::Fifo),
        "lifo" => Ok(TieBreak::Lifo),
        _ => bail!(
            "tie-break not found for input string: {}, possible options are: (\"fifo\", \"lifo\")",
            string
        ),
    }
}

// Two-way roads between eight intersections, travel time in minutes.
const DEMO_ROADS: [(NodeId, NodeId, Cost); 9] = [
    (1, 2, 5.0),
    (1, 3, 9.0),
    (2, 4, 3.0),
    (3, 5, 4.0),
    (4, 5, 1.0),
    (4, 6, 7.0),
    (5, 7, 2.0),
    (6, 8, 3.0),
    (7, 8, 6.0),
];

fn parse_edges_csv(path: &str, two_way: bool) -> Result<Vec<(NodeId, NodeId, Cost)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut edges = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |i: usize| {
            record
                .get(i)
                .with_context(|| format!("{}: row {} has fewer than 3 fields", path, line + 1))
        };
        let u: NodeId = field(0)?.trim().parse()?;
        let v: NodeId = field(1)?.trim().parse()?;
        let w: Cost = field(2)?.trim().parse()?;
        edges.push((u, v, w));
        if two_way {
            edges.push((v, u, w));
        }
    }
    Ok(edges)
}

fn parse_update(arg: &str) -> Result<(NodeId, NodeId, Cost)> {
    let parts: Vec<&str> = arg.split(':').collect();
    if parts.len() != 3 {
        bail!("update must look like source:target:weight, got {}", arg);
    }
    let u = parts[0].parse().with_context(|| format!("bad source in {}", arg))?;
    let v = parts[1].parse().with_context(|| format!("bad target in {}", arg))?;
    let w = parts[2].parse().with_context(|| format!("bad weight in {}", arg))?;
    Ok((u, v, w))
}

fn format_cost(cost: Cost) -> String {
    if cost.is_finite() {
        format!("{:.2}", cost)
    } else {
        String::from("inf")
    }
}

fn print_report(report: &QueryReport) {
    println!("Graph revision {}", report.revision);
    for c in &report.candidates {
        println!("  to {}: {}", c.node, format_cost(c.distance));
    }
    println!(
        "Nearest: {} at {}, route {:?}",
        report.best.best_node,
        format_cost(report.best.total_distance),
        report.best.route
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let edges = match &cli.edges {
        Some(path) if !cli.demo => parse_edges_csv(path, cli.two_way)?,
        _ => DEMO_ROADS
            .iter()
            .flat_map(|&(a, b, w)| [(a, b, w), (b, a, w)])
            .collect(),
    };
    let updates = cli
        .update
        .iter()
        .map(|s| parse_update(s))
        .collect::<Result<Vec<_>>>()?;

    let router = Router::build(edges)?;
    let (graph, _) = router.snapshot();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let tie_break = tie_break_from(&cli.tie_break)?;
    let options = || QueryOptions {
        tie_break,
        cancellation: cli.timeout_ms.map(|ms| {
            Cancellation::default().with_deadline(Instant::now() + Duration::from_millis(ms))
        }),
    };

    let now = Instant::now();
    let report = router.query_report_with(cli.start, &cli.candidates, &options())?;
    info!(elapsed_ms = now.elapsed().as_secs_f64() * 1000.0, "query done");
    print_report(&report);

    if !updates.is_empty() {
        for &(u, v, w) in &updates {
            router
                .update_edge_weight(u, v, w)
                .with_context(|| format!("applying update {}:{}:{}", u, v, w))?;
        }
        println!();
        println!("After {} traffic update(s):", updates.len());
        let report = router.query_report_with(cli.start, &cli.candidates, &options())?;
        print_report(&report);
    }

    if let Some(out_path) = &cli.out {
        let (graph, _) = router.snapshot();
        let paths = compute_shortest_paths_with(&graph, cli.start, &options())?;
        let mut wtr =
            Writer::from_path(out_path).with_context(|| format!("creating CSV {}", out_path))?;
        wtr.write_record(["node_id", "distance"])?;
        let mut dist: Vec<(NodeId, Cost)> = paths.distances.iter().collect();
        dist.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        for (node, d) in &dist {
            if d.is_finite() || cli.include_unreachable {
                let val = if d.is_finite() {
                    format!("{:.6}", d)
                } else {
                    String::from("inf")
                };
                wtr.write_record(&[node.to_string(), val])?;
            }
        }
        wtr.flush()?;
        println!("Wrote distances for {} nodes to {}", dist.len(), out_path);
    }

    Ok(())
}
