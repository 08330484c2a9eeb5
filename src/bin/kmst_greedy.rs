use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use serde_json::json;

use kmst::error::KmstError;
use kmst::search::edge_catalog::EdgeCatalog;
use kmst::search::greedy_prim::greedy_all_roots;
use kmst::search::solution_sink::BestSolution;
use kmst::util::{init_logging, read_params, read_instance, export_results};


/** builds the greedy tree of every root of a k-MST instance, keeps the best one */
pub fn main() {
    init_logging();
    // parse arguments
    let yaml = load_yaml!("kmst_greedy.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), KmstError> {
    let params = read_params(main_args)?;
    let instance = read_instance(&params)?;
    // solve it
    let t_start = Instant::now();
    let mut sink = BestSolution::new();
    let catalog = EdgeCatalog::new(&instance);
    let ranking = greedy_all_roots(&instance, &catalog, &mut sink)?;
    let duration = t_start.elapsed().as_secs_f32();
    let solution = sink.into_solution()
        .ok_or(KmstError::NoFeasibleSolution { k: instance.k() })?;
    println!("greedy took {:.3} seconds. weight: {}", duration, solution.weight);
    let stats = json!({
        "primal_list": vec![solution.weight],
        "nb_roots_ranked": ranking.len(),
        "time_searched": duration,
        "inst_name": params.inst_filename,
        "k": instance.k(),
    });

    // export results
    export_results(
        &instance,
        &solution,
        &stats,
        params.perf_file.as_deref(),
        params.sol_file.as_deref(),
    )
}
