use anyhow::{bail, Context, Result};
use bayesnet::common::setup::{parse_configuration_options, CommandLineOptions};
use bayesnet::display;
use bayesnet::inference::{ask, ask_traced, Distribution, WriterSink};
use bayesnet::loader;
use bayesnet::network::Network;
use bayesnet::{print_blue, print_green, print_red, print_yellow};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    let options = parse_configuration_options();

    match options.query.clone() {
        Some(query) => run_single_query(&options, &query),
        None => run_menu(&options),
    }
}

fn run_single_query(options: &CommandLineOptions, query: &str) -> Result<()> {
    let (Some(structure), Some(cpts)) = (&options.structure_file, &options.cpt_file) else {
        bail!("--query requires both --structure and --cpts");
    };
    let network = loader::load_files(Path::new(structure), Path::new(cpts))?;
    let evidence: HashMap<String, String> = options.evidence.iter().cloned().collect();

    let distribution = run_query(&network, query, &evidence, options.trace)?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
    } else {
        display::print_result(query, &evidence, &distribution);
    }
    Ok(())
}

fn run_query(
    network: &Network,
    query: &str,
    evidence: &HashMap<String, String>,
    trace: bool,
) -> Result<Distribution> {
    let distribution = if trace {
        let mut sink = WriterSink::new(io::stdout());
        ask_traced(network, query, evidence, &mut sink)?
    } else {
        ask(network, query, evidence)?
    };
    Ok(distribution)
}

fn run_menu(options: &CommandLineOptions) -> Result<()> {
    println!("Welcome to the enumeration inference engine");
    println!("Answers exact probability queries over discrete Bayesian networks");

    // Files given on the command line are loaded up front.
    let mut network: Option<Network> = None;
    if let (Some(structure), Some(cpts)) = (&options.structure_file, &options.cpt_file) {
        match loader::load_files(Path::new(structure), Path::new(cpts)) {
            Ok(net) => {
                print_green!("Network loaded and validated.");
                network = Some(net);
            }
            Err(err) => print_red!("Failed to load the network: {:#}", err),
        }
    }

    loop {
        print_menu();
        match prompt("Select an option (1-5): ")?.as_str() {
            "1" => match load_interactive() {
                Ok(net) => {
                    print_green!("Network loaded and validated.");
                    display::print_structure(&net)?;
                    display::print_cpts(&net)?;
                    network = Some(net);
                }
                Err(err) => {
                    print_red!("Failed to load the network: {:#}", err);
                    network = None;
                }
            },
            "2" => match &network {
                Some(net) => display::print_structure(net)?,
                None => print_yellow!("Load a network first (option 1)."),
            },
            "3" => match &network {
                Some(net) => display::print_cpts(net)?,
                None => print_yellow!("Load a network first (option 1)."),
            },
            "4" => match &network {
                Some(net) => {
                    if let Err(err) = query_interactive(net) {
                        print_red!("Inference failed: {:#}", err);
                    }
                }
                None => print_yellow!("Load a network first (option 1)."),
            },
            "5" => {
                println!("Goodbye.");
                return Ok(());
            }
            other => print_yellow!("'{}' is not an option; choose 1-5.", other),
        }
    }
}

fn print_menu() {
    println!("\n{}", "=".repeat(60));
    print_blue!("ENUMERATION INFERENCE - BAYESIAN NETWORKS");
    println!("{}", "=".repeat(60));
    println!("1. Load network from files");
    println!("2. Show network structure");
    println!("3. Show probability tables (CPT)");
    println!("4. Run an inference query");
    println!("5. Quit");
    println!("{}", "-".repeat(60));
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn prompt_existing_file(message: &str) -> Result<String> {
    loop {
        let path = prompt(message)?;
        if path.is_empty() {
            print_yellow!("A file path is required.");
            continue;
        }
        if !Path::new(&path).exists() {
            print_yellow!("The file '{}' does not exist; try again.", path);
            continue;
        }
        return Ok(path);
    }
}

fn load_interactive() -> Result<Network> {
    println!("\n--- LOAD NETWORK ---");
    let structure =
        prompt_existing_file("Structure file path (e.g. networks/alarm_structure.txt): ")?;
    let cpts = prompt_existing_file("CPT file path (e.g. networks/alarm_cpts.txt): ")?;
    loader::load_files(Path::new(&structure), Path::new(&cpts))
}

fn query_interactive(network: &Network) -> Result<()> {
    println!("\n--- INFERENCE QUERY ---");
    println!("Variables in the network:");
    for name in network.topological_order()? {
        let node = network.node(&name)?;
        println!("  {} ({})", name, node.values.join(", "));
    }

    let query = loop {
        let name = prompt("\nVariable to query: ")?;
        if network.contains(&name) {
            break name;
        }
        print_yellow!("'{}' is not in the network; try again.", name);
    };

    let evidence = select_evidence(network, &query)?;
    let trace = prompt("Show the enumeration trace? (y/n): ")?.eq_ignore_ascii_case("y");

    println!(
        "\nComputing P({} | {})...",
        query,
        display::format_evidence(&evidence)
    );
    let distribution = run_query(network, &query, &evidence, trace)?;
    display::print_result(&query, &evidence, &distribution);
    Ok(())
}

fn select_evidence(network: &Network, query: &str) -> Result<HashMap<String, String>> {
    let mut evidence = HashMap::new();
    println!("\nSet evidence one variable at a time; leave the name empty to finish.");

    loop {
        let name = prompt("Evidence variable (empty to finish): ")?;
        if name.is_empty() {
            return Ok(evidence);
        }
        if name == query {
            print_yellow!("'{}' is the query variable itself.", name);
            continue;
        }
        let Ok(node) = network.node(&name) else {
            print_yellow!("'{}' is not in the network; try again.", name);
            continue;
        };
        let values = node.values.clone();

        let value = loop {
            let value = prompt(&format!("Value for {} ({}): ", name, values.join(", ")))?;
            if values.iter().any(|v| *v == value) {
                break value;
            }
            print_yellow!("'{}' is not a value of {}; try again.", value, name);
        };
        println!("Evidence set: {} = {}", name, value);
        evidence.insert(name, value);
    }
}
