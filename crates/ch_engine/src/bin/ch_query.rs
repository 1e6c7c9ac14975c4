use std::time::Instant;

use anyhow::Context;
use ch_engine::{
    graph::ChGraph,
    node_contraction::NodeContractor,
    persist,
    prelude::{ContractionStrategy, GraphStore},
    search::{ch_search::CHSearch, dijkstra::Dijkstra},
    statistics::GraphStats,
    util::cli,
};
use indicatif::ProgressBar;
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse();

    let g = ChGraph::from_csv(&cfg.edges_file)
        .with_context(|| format!("Failed to read edges from {:?}", cfg.edges_file))?;
    println!("Input:\t\t{}", GraphStats::new(&g));

    let num_nodes = g.vertex_count();
    if num_nodes == 0 {
        warn!("Graph has no vertices, nothing to do");
        return Ok(());
    }

    let now = Instant::now();
    let overlay_graph = NodeContractor::new_with_params(g.clone(), cfg.params)
        .run_with_strategy(ContractionStrategy::LazyUpdate(cfg.update_strategy))
        .context("Contraction failed")?;
    println!("Contracted in {:?}", now.elapsed());
    println!("Hierarchy:\t{}", overlay_graph.stats());

    if let Some(output) = &cfg.output {
        persist::save(&overlay_graph, output)
            .with_context(|| format!("Failed to write hierarchy to {:?}", output))?;
    }

    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let mut ch = CHSearch::new(&overlay_graph);
    let mut dijkstra = Dijkstra::new(&g);

    let mut time_ch = 0;
    let mut time_dijkstra = 0;
    let mut mismatches = 0;

    let pb = ProgressBar::new(cfg.queries as u64);

    for _ in 0..cfg.queries {
        let source = rng.gen_range(1..=num_nodes) as u32;
        let target = rng.gen_range(1..=num_nodes) as u32;

        let expected = dijkstra.search(source, target)?.map(|sp| sp.weight);
        time_dijkstra += dijkstra.stats.duration.map_or(0, |d| d.as_micros());

        let actual = ch.search(source, target)?.map(|sp| sp.weight);
        time_ch += ch.stats.duration.map_or(0, |d| d.as_micros());

        let equal = match (expected, actual) {
            (Some(expected), Some(actual)) => (expected - actual).abs() <= 1e-3 * expected.max(1.0),
            (expected, actual) => expected == actual,
        };
        if !equal {
            mismatches += 1;
            warn!(
                "Query {} -> {}: dijkstra {:?}, ch {:?}",
                source, target, expected, actual
            );
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    if cfg.queries > 0 {
        println!(
            "Avg. query time: ch {} μs, dijkstra {} μs",
            time_ch / cfg.queries as u128,
            time_dijkstra / cfg.queries as u128
        );
    }
    info!("{} of {} queries differ from dijkstra", mismatches, cfg.queries);

    if mismatches > 0 {
        anyhow::bail!("{} queries returned a wrong weight", mismatches);
    }

    Ok(())
}
