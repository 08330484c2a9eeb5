use clap::ArgMatches;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    error::KmstError,
    json_format::JsonInstance,
    kmst::{Instance, Solution, checker},
    text_format,
};

/** parameters shared by the solver executables */
#[derive(Debug, Clone)]
pub struct Params {
    /// instance filename
    pub inst_filename: String,
    /// instance format ("text" or "json")
    pub instance_type: String,
    /// number of nodes of the tree
    pub k: usize,
    /// time limit (seconds)
    pub time: f32,
    /// where to write the best tree
    pub sol_file: Option<String>,
    /// where to write the statistics
    pub perf_file: Option<String>,
}

/// installs the log subscriber (level read from RUST_LOG, info by default)
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/** reads command line input */
pub fn read_params(main_args:&ArgMatches) -> Result<Params, KmstError> {
    let inst_filename = required(main_args, "instance")?;
    let instance_type = main_args.value_of("type").unwrap_or("text").to_string();
    let k = required(main_args, "k")?.parse::<usize>()
        .map_err(|e| KmstError::InvalidInput(format!("unable to parse k: {}", e)))?;
    let time = match main_args.value_of("time") {
        None => f32::INFINITY,
        Some(t) => t.parse::<f32>()
            .map_err(|e| KmstError::InvalidInput(format!("unable to parse the time given: {}", e)))?,
    };
    // read value of the solution filename
    let sol_file = main_args.value_of("solution").map(|e| {
        println!("printing solutions in: {}", e);
        e.to_string()
    });
    // read value of the performance logs filename
    let perf_file = main_args.value_of("perf").map(|e| {
        println!("printing perfs in: {}\n", e);
        e.to_string()
    });
    Ok(Params { inst_filename, instance_type, k, time, sol_file, perf_file })
}

fn required(main_args:&ArgMatches, name:&str) -> Result<String, KmstError> {
    main_args.value_of(name)
        .map(|s| s.to_string())
        .ok_or_else(|| KmstError::InvalidInput(format!("missing argument '{}'", name)))
}

/** reads the instance described by the parameters */
pub fn read_instance(params:&Params) -> Result<Instance, KmstError> {
    info!(filename = params.inst_filename.as_str(), format = params.instance_type.as_str(), "reading instance");
    let instance = match params.instance_type.as_str() {
        "text" => {
            let (n, edges) = text_format::read_from_file(&params.inst_filename)?;
            Instance::new(n, params.k, edges)?
        },
        "json" => {
            JsonInstance::from_file(&params.inst_filename)?.to_kmst_instance(params.k)?
        },
        _ => return Err(KmstError::InvalidInput(
            format!("instance type unknown {} (valid: 'text', 'json')", params.instance_type)
        )),
    };
    instance.display_statistics();
    println!("=======================");
    Ok(instance)
}

/// exports search results to files
pub fn export_results(
    instance:&Instance,
    solution:&Solution,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<(), KmstError> {
    // export statistics
    if let Some(filename) = perf_file {
        std::fs::write(filename, serde_json::to_string(stats)?)
            .map_err(|source| KmstError::Io { filename: filename.to_string(), source })?;
    }
    // export solution
    if let Some(filename) = sol_file {
        if let Err(reason) = checker(instance, solution) {
            warn!(reason = reason.as_str(), "invalid solution");
        }
        solution.write_to_file(filename)?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use clap::{App, Arg};
    use serde_json::json;

    fn matches(args:&[&str]) -> ArgMatches<'static> {
        App::new("test")
            .arg(Arg::with_name("instance").required(true))
            .arg(Arg::with_name("type").short("y").takes_value(true))
            .arg(Arg::with_name("k").short("k").takes_value(true))
            .arg(Arg::with_name("time").short("t").takes_value(true))
            .arg(Arg::with_name("solution").short("s").takes_value(true))
            .arg(Arg::with_name("perf").short("p").takes_value(true))
            .get_matches_from(args.iter().copied())
    }

    #[test]
    fn test_read_params() {
        let params = read_params(&matches(&["test", "insts/path4.txt", "-k", "3", "-t", "2.5"])).unwrap();
        assert_eq!(params.inst_filename, "insts/path4.txt");
        assert_eq!(params.instance_type, "text");
        assert_eq!(params.k, 3);
        assert_eq!(params.time, 2.5);
        assert!(params.sol_file.is_none());
        let inst = read_instance(&params).unwrap();
        assert_eq!(inst.m(), 4);
    }

    #[test]
    fn test_read_params_errors() {
        assert!(read_params(&matches(&["test", "insts/path4.txt"])).is_err());
        assert!(read_params(&matches(&["test", "insts/path4.txt", "-k", "three"])).is_err());
        let params = read_params(&matches(&["test", "insts/path4.txt", "-k", "3", "-y", "xml"])).unwrap();
        assert!(matches!(read_instance(&params), Err(KmstError::InvalidInput(_))));
        let params = read_params(&matches(&["test", "insts/missing.txt", "-k", "3"])).unwrap();
        assert!(matches!(read_instance(&params), Err(KmstError::Io { .. })));
    }

    #[test]
    fn test_read_json() {
        let params = read_params(&matches(&["test", "insts/path4.json", "-k", "4", "-y", "json"])).unwrap();
        assert_eq!(read_instance(&params).unwrap().k(), 4);
    }

    #[test]
    fn test_export() {
        let params = read_params(&matches(&["test", "insts/path4.txt", "-k", "3"])).unwrap();
        let inst = read_instance(&params).unwrap();
        let sol = Solution { weight: 3, edges: inst.edges()[..2].to_vec() };
        let dir = std::env::temp_dir();
        let sol_file = dir.join("kmst_test_export.sol");
        let perf_file = dir.join("kmst_test_export.json");
        export_results(
            &inst, &sol, &json!({"best_weight": 3}),
            perf_file.to_str(), sol_file.to_str(),
        ).unwrap();
        assert_eq!(std::fs::read_to_string(&sol_file).unwrap(), "3\n0 1 1\n1 2 2\n");
        let stats:Value = serde_json::from_str(&std::fs::read_to_string(&perf_file).unwrap()).unwrap();
        assert_eq!(stats["best_weight"], 3);
    }
}
