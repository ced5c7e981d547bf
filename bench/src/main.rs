mod workload;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use heavyhood_core::{Graph, GraphConfig, NeighborhoodTracker, NodeId, ReferenceGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use workload::{Workload, TOPOLOGIES};

#[derive(Parser, Debug)]
#[command(name = "heavyhood-bench", about = "Measure and compare heaviest-neighborhood trackers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time both trackers over generated topologies.
    Run {
        /// tree, scalefree, smallworld, random, barbell, dla or all
        #[arg(default_value = "all")]
        topology: String,
        #[arg(long, default_value_t = 200_000)]
        nodes: u64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Emit a JSON report instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Maximum degree of random graphs with n nodes and n edges, n = 2^i.
    Measure {
        #[arg(long, default_value_t = 6)]
        min_exp: u32,
        #[arg(long, default_value_t = 21)]
        max_exp: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        json: bool,
    },

    /// Drive both trackers with one random workload and check they agree.
    Compare {
        #[arg(long, default_value_t = 5_000)]
        nodes: usize,
        #[arg(long, default_value_t = 50_000)]
        edges: usize,
        #[arg(long, default_value_t = 2_500)]
        deletes: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Graph configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Reports go to stdout; keep logs off it so `--json` output stays parseable.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { topology, nodes, seed, json } => cmd_run(&topology, nodes, seed, json),
        Commands::Measure { min_exp, max_exp, seed, json } => cmd_measure(min_exp, max_exp, seed, json),
        Commands::Compare { nodes, edges, deletes, seed, config } => {
            cmd_compare(nodes, edges, deletes, seed, config)
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PhaseTimes {
    construct_ms: f64,
    add_edges_ms: f64,
    max_queries_ms: f64,
    delete_ms: f64,
}

#[derive(Debug, Serialize)]
struct RunReport {
    topology: String,
    nodes: usize,
    edges: usize,
    deleted: usize,
    max_weight: Option<i64>,
    memory_bytes: usize,
    graph: PhaseTimes,
    reference: PhaseTimes,
}

fn cmd_run(topology: &str, node_count: u64, seed: u64, json: bool) -> anyhow::Result<()> {
    let selected: Vec<_> = TOPOLOGIES
        .iter()
        .filter(|(key, _, _)| topology == "all" || *key == topology)
        .collect();
    if selected.is_empty() {
        bail!("unknown topology '{}'", topology);
    }

    if !json {
        println!("heavyhood-bench");
        println!("===============");
        println!();
    }

    let mut reports = Vec::with_capacity(selected.len());
    for &(key, name, generator) in selected {
        let mut rng = StdRng::seed_from_u64(seed);
        let t = Instant::now();
        let workload = generator(node_count, &mut rng);
        info!(topology = key, elapsed_ms = ms(t.elapsed()), "workload generated");

        let report = run_workload(key, &workload)?;
        if !json {
            print_run(name, &report);
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

/// Every tenth node id, in order.
fn victims(workload: &Workload) -> Vec<NodeId> {
    workload.nodes.iter().map(|n| n.id()).step_by(10).collect()
}

fn time_tracker<T: NeighborhoodTracker>(workload: &Workload, victims: &[NodeId]) -> (T, PhaseTimes) {
    let t = Instant::now();
    let mut tracker = T::from_nodes(&workload.nodes);
    let construct = t.elapsed();

    let t = Instant::now();
    for &(a, b) in &workload.edges {
        tracker.add_edge(a, b);
    }
    let add_edges = t.elapsed();

    let t = Instant::now();
    let mut checksum = 0i64;
    for _ in 0..1_000 {
        if let Some(node) = tracker.max_neighborhood_weight() {
            checksum = checksum.wrapping_add(node.id());
        }
    }
    let max_queries = t.elapsed();
    std::hint::black_box(checksum);

    let t = Instant::now();
    for &id in victims {
        tracker.delete_node(id);
    }
    let delete = t.elapsed();

    (
        tracker,
        PhaseTimes {
            construct_ms: ms(construct),
            add_edges_ms: ms(add_edges),
            max_queries_ms: ms(max_queries),
            delete_ms: ms(delete),
        },
    )
}

fn run_workload(key: &str, workload: &Workload) -> anyhow::Result<RunReport> {
    let victims = victims(workload);
    let (graph, graph_times) = time_tracker::<Graph>(workload, &victims);
    let (reference, reference_times) = time_tracker::<ReferenceGraph>(workload, &victims);

    let max_weight = graph
        .max_neighborhood_weight()
        .map(|n| graph.neighborhood_weight(n.id()));
    let reference_max = reference
        .max_neighborhood_weight()
        .map(|n| reference.neighborhood_weight(n.id()));
    if max_weight != reference_max || graph.num_edges() != reference.num_edges() {
        bail!(
            "{}: trackers disagree (max {:?} vs {:?}, edges {} vs {})",
            key,
            max_weight,
            reference_max,
            graph.num_edges(),
            reference.num_edges()
        );
    }

    Ok(RunReport {
        topology: key.to_string(),
        nodes: workload.nodes.len(),
        edges: workload.edges.len(),
        deleted: victims.len(),
        max_weight,
        memory_bytes: graph.memory_usage(),
        graph: graph_times,
        reference: reference_times,
    })
}

fn print_run(name: &str, report: &RunReport) {
    println!("--- {} ---", name);
    println!(
        "{} nodes, {} edges, {} deletions, ~{:.1}MB, final max weight {:?}",
        report.nodes,
        report.edges,
        report.deleted,
        report.memory_bytes as f64 / 1_048_576.0,
        report.max_weight
    );
    println!();
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12}",
        "tracker", "construct", "add_edge", "1k max", "delete"
    );
    println!("{:->10} {:->12} {:->12} {:->12} {:->12}", "", "", "", "", "");
    for (label, times) in [("graph", &report.graph), ("reference", &report.reference)] {
        println!(
            "{:>10} {:>10.1}ms {:>10.1}ms {:>10.3}ms {:>10.1}ms",
            label, times.construct_ms, times.add_edges_ms, times.max_queries_ms, times.delete_ms
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// measure
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct MeasureRow {
    exponent: u32,
    nodes: u64,
    max_rank: i64,
    elapsed_ms: f64,
}

fn cmd_measure(min_exp: u32, max_exp: u32, seed: u64, json: bool) -> anyhow::Result<()> {
    if min_exp < 2 || max_exp > 30 || min_exp > max_exp {
        bail!("exponents must satisfy 2 <= min_exp <= max_exp <= 30");
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for exponent in min_exp..=max_exp {
        let n = 1u64 << exponent;
        let t = Instant::now();
        let mut graph = Graph::new(&workload::unit_nodes(n));
        for (a, b) in workload::random_edges(n, n as usize, &mut rng) {
            graph.add_edge(a, b);
        }
        let max = graph
            .max_neighborhood_weight()
            .context("graph built from a non-empty node set has a maximum")?;
        // Unit weights: neighborhood weight is degree + 1.
        let max_rank = graph.neighborhood_weight(max.id()) - 1;
        let row = MeasureRow {
            exponent,
            nodes: n,
            max_rank,
            elapsed_ms: ms(t.elapsed()),
        };
        if !json {
            println!(
                "i = {:>2}, n = {:>8}, max_rank = {:>3}  ({:.1}ms)",
                row.exponent, row.nodes, row.max_rank, row.elapsed_ms
            );
        }
        rows.push(row);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

fn cmd_compare(
    node_count: usize,
    edge_count: usize,
    deletes: usize,
    seed: u64,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            GraphConfig::from_json(&text)?
        }
        None => GraphConfig::seeded(seed),
    };
    let max_pairs = node_count.saturating_mul(node_count.saturating_sub(1)) / 2;
    if edge_count > max_pairs {
        bail!("{} edges do not fit in a simple graph on {} nodes", edge_count, node_count);
    }
    let deletes = deletes.min(node_count);

    let mut rng = StdRng::seed_from_u64(seed);
    let nodes = workload::sparse_nodes(node_count, 1_000_000_000, &mut rng);
    let ids: Vec<NodeId> = nodes.iter().map(|n| n.id()).collect();

    let t = Instant::now();
    let mut graph = Graph::with_config(&nodes, &config)?;
    let mut reference = ReferenceGraph::new(&nodes);
    check_agreement("construct", &graph, &reference, &ids)?;
    info!(
        nodes = node_count,
        buckets = graph.bucket_count(),
        max_chain = graph.max_bucket_chain(),
        "constructed"
    );

    let mut added = 0usize;
    let mut seen = std::collections::HashSet::with_capacity(edge_count);
    while added < edge_count {
        let a = ids[rng.gen_range(0..ids.len())];
        let b = ids[rng.gen_range(0..ids.len())];
        if a == b || !seen.insert((a.min(b), a.max(b))) {
            continue;
        }
        let (ga, ra) = (graph.add_edge(a, b), reference.add_edge(a, b));
        if ga != ra {
            bail!("add_edge({}, {}) returned {} vs {}", a, b, ga, ra);
        }
        added += 1;
    }
    check_agreement("add_edge", &graph, &reference, &ids)?;
    info!(edges = graph.num_edges(), "edges added");

    let mut order = ids.clone();
    for i in 0..deletes {
        let j = rng.gen_range(i..order.len());
        order.swap(i, j);
    }
    for &id in &order[..deletes] {
        let (gd, rd) = (graph.delete_node(id), reference.delete_node(id));
        if gd != rd {
            bail!("delete_node({}) returned {} vs {}", id, gd, rd);
        }
    }
    check_agreement("delete_node", &graph, &reference, &ids)?;

    println!(
        "OK: {} nodes, {} edges after {} deletions; max weight {:?}; {:.1}ms",
        graph.num_nodes(),
        graph.num_edges(),
        deletes,
        graph
            .max_neighborhood_weight()
            .map(|n| graph.neighborhood_weight(n.id())),
        ms(t.elapsed())
    );
    Ok(())
}

fn check_agreement(
    phase: &str,
    graph: &Graph,
    reference: &ReferenceGraph,
    ids: &[NodeId],
) -> anyhow::Result<()> {
    if graph.num_nodes() != reference.num_nodes() || graph.num_edges() != reference.num_edges() {
        bail!(
            "{}: counts differ: nodes {} vs {}, edges {} vs {}",
            phase,
            graph.num_nodes(),
            reference.num_nodes(),
            graph.num_edges(),
            reference.num_edges()
        );
    }
    for &id in ids {
        let (g, r) = (graph.neighborhood_weight(id), reference.neighborhood_weight(id));
        if g != r {
            bail!("{}: node {} weight {} vs {}", phase, id, g, r);
        }
    }
    let gmax = graph.max_neighborhood_weight().map(|n| graph.neighborhood_weight(n.id()));
    let rmax = reference
        .max_neighborhood_weight()
        .map(|n| reference.neighborhood_weight(n.id()));
    if gmax != rmax {
        bail!("{}: max weight {:?} vs {:?}", phase, gmax, rmax);
    }
    graph.verify().with_context(|| format!("{}: consistency audit", phase))?;
    info!(phase, "trackers agree");
    Ok(())
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
