use clap::{App, ArgMatches, load_yaml};

use kmst::error::KmstError;
use kmst::generator::{random_connected_graph, random_graph};
use kmst::json_format::JsonInstance;
use kmst::kmst::Weight;
use kmst::text_format;
use kmst::util::init_logging;


/** writes a random k-MST instance */
pub fn main() {
    init_logging();
    // parse arguments
    let yaml = load_yaml!("kmst_generate.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn parse<T:std::str::FromStr>(main_args:&ArgMatches, name:&str) -> Result<T, KmstError> {
    main_args.value_of(name)
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| KmstError::InvalidInput(format!("unable to parse '{}'", name)))
}

fn run(main_args:&ArgMatches) -> Result<(), KmstError> {
    let output:String = parse(main_args, "output")?;
    let n:usize = parse(main_args, "nodes")?;
    let m:usize = parse(main_args, "edges")?;
    let max_weight:Weight = parse(main_args, "max_weight")?;
    let seed:u64 = parse(main_args, "seed")?;
    let edges = if main_args.is_present("disconnected") {
        random_graph(n, m, max_weight, seed)?
    } else {
        random_connected_graph(n, m, max_weight, seed)?
    };
    match main_args.value_of("type").unwrap_or("text") {
        "json" => JsonInstance { n, edges }.write_to_file(&output)?,
        _ => text_format::write_to_file(&output, n, &edges)?,
    }
    println!("instance written in: {} ({} nodes, {} edges)", output, n, m);
    Ok(())
}
