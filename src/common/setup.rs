use clap::{Arg, Command};
use env_logger::{Builder, Env};
use serde::Deserialize;
use std::io::Write;

/// These options define the inputs from the user.
/// Nothing is owned by basic data types so this struct can be passed
/// around freely.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub structure_file: Option<String>,
    pub cpt_file: Option<String>,
    pub query: Option<String>,
    pub evidence: Vec<(String, String)>,
    pub trace: bool,
    pub json: bool,
}

pub fn parse_configuration_options() -> CommandLineOptions {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .init();
    let matches = Command::new("BAYESNET")
        .version("1.0")
        .about("Exact inference by enumeration over discrete Bayesian networks.")
        .arg(
            Arg::new("structure")
                .long("structure")
                .value_name("FILE")
                .help("Structure file with 'Parent -> Child' lines"),
        )
        .arg(
            Arg::new("cpts")
                .long("cpts")
                .value_name("FILE")
                .help("CPT file with NODE/VALUES/PARENTS/TABLE blocks"),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("VARIABLE")
                .help("Run a single query for this variable and exit (omit for the interactive menu)"),
        )
        .arg(
            Arg::new("evidence")
                .long("evidence")
                .value_name("VAR=VALUE")
                .action(clap::ArgAction::Append)
                .help("Observed evidence, repeatable"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Print the enumeration trace while computing the query")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the query result as JSON instead of a table")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let structure_file = matches.get_one::<String>("structure").map(|s| s.to_string());
    let cpt_file = matches.get_one::<String>("cpts").map(|s| s.to_string());
    let query = matches.get_one::<String>("query").map(|s| s.to_string());
    let evidence: Vec<(String, String)> = matches
        .get_many::<String>("evidence")
        .unwrap_or_default()
        .map(|entry| {
            let (var, value) = entry
                .split_once('=')
                .expect("evidence must be given as VAR=VALUE");
            (var.trim().to_string(), value.trim().to_string())
        })
        .collect();
    let trace = matches.get_flag("trace");
    let json = matches.get_flag("json");

    CommandLineOptions {
        structure_file,
        cpt_file,
        query,
        evidence,
        trace,
        json,
    }
}
