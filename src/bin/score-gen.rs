use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::*;

use quiztree::render;
use quiztree::Scenario;

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut args = env::args();

    // Read first argument as a path to a scenario json file.
    args.next();
    let scenario_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: score-gen <scenario.json> [output-basename]");
            process::exit(2);
        }
    };

    let basename = args
        .next()
        .unwrap_or_else(|| render::DEFAULT_BASENAME.to_string());

    let scenario = Scenario::from_path(&scenario_path)?;
    info!("Loaded {} nodes from {}", scenario.len(), scenario_path.display());

    for warning in scenario.lint() {
        warn!("{}", warning);
    }

    let graph = quiztree::build_graph(&scenario);
    let output = render::render(&graph, &basename, render::DEFAULT_FORMAT)?;

    println!("Tree saved as: {}", output.display());

    Ok(())
}
