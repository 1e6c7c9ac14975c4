use std::path::PathBuf;

use clap::Parser;

use crate::{
    contraction_params::{ContractionParams, PriorityParams},
    contraction_strategy::UpdateStrategy,
};

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct Cli {
    /// Path to a csv file with the columns source,target,weight,forward,backward[,tags]
    edges_file: PathBuf,

    /// Store the contracted hierarchy in this file
    #[arg(short, long, value_name = "file")]
    output: Option<PathBuf>,

    /// Number of random queries to run
    #[arg(short, long, default_value_t = 100)]
    queries: usize,

    /// Seed for the random queries
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Set the coefficient for the edge difference term
    #[arg(short, long, value_name = "coeff")]
    ed: Option<i32>,

    /// Set the coefficient for the contracted neighbors term
    #[arg(short, long, value_name = "coeff")]
    cn: Option<i32>,

    /// Set the coefficient for the search space depth term
    #[arg(short, long, value_name = "coeff")]
    ss: Option<i32>,

    /// Set the lazy update strategy. Possible values are "jit", "local" and "combined"
    #[arg(long, value_name = "strategy")]
    strat: Option<String>,

    /// Evaluate priorities on a single thread
    #[arg(long)]
    sequential: bool,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub edges_file: PathBuf,
    pub output: Option<PathBuf>,
    pub queries: usize,
    pub seed: u64,
    pub params: ContractionParams,
    pub update_strategy: UpdateStrategy,
}

pub fn parse() -> Cfg {
    let cli = Cli::parse();

    let mut priority_params = PriorityParams::default();

    if let Some(ed) = cli.ed {
        priority_params = priority_params.edge_difference_coeff(ed);
    }
    if let Some(cn) = cli.cn {
        priority_params = priority_params.contracted_neighbors_coeff(cn);
    }
    if let Some(ss) = cli.ss {
        priority_params = priority_params.search_space_coeff(ss);
    }

    let mut update_strategy = UpdateStrategy::default();

    match cli.strat.as_deref() {
        Some("jit") => {
            update_strategy = update_strategy.set_update_local(false);
        }
        Some("local") => {
            update_strategy = update_strategy.set_update_jit(false).set_update_local(true);
        }
        _ => {}
    };

    Cfg {
        edges_file: cli.edges_file,
        output: cli.output,
        queries: cli.queries,
        seed: cli.seed,
        params: ContractionParams::new()
            .priority_params(priority_params)
            .parallel_ordering(!cli.sequential),
        update_strategy,
    }
}
