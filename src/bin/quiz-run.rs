use std::env;
use std::error::Error;
use std::io;
use std::process;
use std::thread;
use std::time::Duration;

use log::*;

use quiztree::*;

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut args = env::args();

    // Read first argument as a path to a scenario json file.
    args.next();
    let scenario_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: quiz-run <scenario.json> [start-node]");
            process::exit(2);
        }
    };

    let start_node = args.next().unwrap_or_else(|| START_NODE_KEY.to_string());

    let scenario = Scenario::from_path(&scenario_path)?;
    for warning in scenario.lint() {
        warn!("{}", warning);
    }

    // Walk the tree!
    let mut walker = TreeWalker::new(scenario);
    walker.set_node(&start_node)?;

    loop {
        match walker.continue_walk()? {
            SuspendReason::Node { question, subheader, delay_ms, .. } => {
                if delay_ms > 0 {
                    thread::sleep(Duration::from_millis(delay_ms));
                }
                if let Some(question) = question {
                    println!("{}", question);
                }
                if let Some(subheader) = subheader {
                    println!("{}", subheader);
                }
            }
            SuspendReason::Options(options) => {
                println!("== Choose option ==");
                for opt in &options {
                    println!("{}: {}", opt.id, opt.text.as_deref().unwrap_or(""));
                }

                // Block to accept input from the player.
                let mut selection = String::new();
                io::stdin().read_line(&mut selection)?;
                let selection: u32 = selection.trim().parse()?;
                walker.set_selected_option(selection)?;
            }
            SuspendReason::Cue(cue) => match cue {
                AudioCue::StartLoop(file) => println!("== Start loop: {} ==", file),
                AudioCue::StopLoop(file) => println!("== Stop loop: {} ==", file),
                AudioCue::Refresh => println!("== Restarting from the top =="),
            },
            SuspendReason::Complete(last_node) => {
                println!("== Node end: {} ==", last_node);
                break;
            }
        }
    }

    Ok(())
}
