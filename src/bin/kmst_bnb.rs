use clap::{App, ArgMatches, load_yaml};
use serde_json::json;

use kmst::error::KmstError;
use kmst::search::branch_and_bound::kmst_bnb;
use kmst::search::solution_sink::BestSolution;
use kmst::search::stopping::TimeStoppingCriterion;
use kmst::util::{init_logging, read_params, read_instance, export_results};


/** solves a k-MST instance: greedy trees from every root, then branch and bound */
pub fn main() {
    init_logging();
    // parse arguments
    let yaml = load_yaml!("kmst_bnb.yml");
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
    let mut sink = BestSolution::new();
    let stats = kmst_bnb(&instance, &mut sink, TimeStoppingCriterion::new(params.time))?;
    let solution = sink.into_solution()
        .ok_or(KmstError::NoFeasibleSolution { k: instance.k() })?;
    println!(
        "branch and bound took {:.3} seconds. weight: {} (greedy: {}, lower bound: {}, proven optimal: {})",
        stats.time_searched, solution.weight, stats.greedy_weight, stats.lower_bound, stats.completed
    );
    let mut stats_json = serde_json::to_value(&stats)?;
    stats_json["inst_name"] = json!(params.inst_filename);
    stats_json["k"] = json!(instance.k());

    // export results
    export_results(
        &instance,
        &solution,
        &stats_json,
        params.perf_file.as_deref(),
        params.sol_file.as_deref(),
    )
}
