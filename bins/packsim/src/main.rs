extern crate serde_json;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate packsim;

use packsim::catalog::Catalog;
use packsim::interface::{self, Input, Output};
use std::env;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

const USAGE: &str = "usage: packsim <preset|input.json> [--runs N] [--seed S] [--max-packs N] [--epic-once] [--json]
       packsim --list";

#[derive(Debug)]
enum Error {
    Usage(String),
    Json(serde_json::Error),
    Io(std::io::Error),
    Simulation(interface::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(msg) => write!(f, "{}\n{}", msg, USAGE),
            Error::Json(e) => write!(f, "invalid input file: {}", e),
            Error::Io(e) => write!(f, "{}", e),
            Error::Simulation(e) => write!(f, "{}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<interface::Error> for Error {
    fn from(error: interface::Error) -> Self {
        Self::Simulation(error)
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Simulate { input: Input, json: bool },
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, Error> {
    let value = value.ok_or_else(|| Error::Usage(format!("{} needs a value", flag)))?;
    value
        .parse()
        .map_err(|_| Error::Usage(format!("bad value for {}: {}", flag, value)))
}

fn load_input(path: &Path) -> Result<Input, Error> {
    info!("Loading input @ {}", path.display());
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    Ok(serde_json::from_str(&contents)?)
}

fn parse_args(args: &[String]) -> Result<Command, Error> {
    let target = args
        .get(0)
        .ok_or_else(|| Error::Usage("expected a preset name or input file".to_string()))?;
    if target == "--list" {
        return Ok(Command::List);
    }
    let mut input = if target.ends_with(".json") {
        load_input(Path::new(target))?
    } else {
        Input::for_preset(target)
    };
    let mut json = false;
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--runs" => input.runs = parse_value(flag, rest.next())?,
            "--seed" => input.seed = Some(parse_value(flag, rest.next())?),
            "--max-packs" => input.max_packs = parse_value(flag, rest.next())?,
            "--epic-once" => input.epic_once = true,
            "--json" => json = true,
            other => return Err(Error::Usage(format!("unknown argument {}", other))),
        }
    }
    Ok(Command::Simulate { input, json })
}

fn print_report(output: &Output) {
    let s = &output.summary;
    println!(
        "{} ({} items: {} common, {} uncommon, {} rare, {} epic)",
        output.catalog,
        output.catalog_size,
        output.tier_counts.common,
        output.tier_counts.uncommon,
        output.tier_counts.rare,
        output.tier_counts.epic
    );
    println!("runs: {}  seed: {}", s.runs, output.seed);
    println!("average packs needed: {:.3}", s.mean);
    println!("min packs needed: {}", s.min);
    println!("max packs needed: {}", s.max);
    println!("guaranteed epics per run: {:.2}", output.mean_guarantees);
    println!(
        "expected cost: {} purchases of {} packs, about {:.2} (worst run {:.2})",
        output.mean_units,
        output.purchase.packs_per_unit,
        output.mean_price,
        output.max_price
    );
}

fn main() -> Result<(), Error> {
    let _ = env_logger::try_init();
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Command::List) => {
            for name in Catalog::preset_names() {
                println!("{}", name);
            }
        }
        Ok(Command::Simulate { input, json }) => {
            info!(
                "Simulating {} runs of {}",
                input.runs,
                input.preset.as_deref().unwrap_or("custom catalog")
            );
            let output = interface::run(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&output);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let cmd = parse_args(&args(&[
            "legends_rise",
            "--runs",
            "200",
            "--seed",
            "5",
            "--epic-once",
            "--json",
        ]))
        .unwrap();
        let mut expected = Input::for_preset("legends_rise");
        expected.runs = 200;
        expected.seed = Some(5);
        expected.epic_once = true;
        assert_eq!(
            cmd,
            Command::Simulate {
                input: expected,
                json: true
            }
        );
    }

    #[test]
    fn list_command() {
        assert_eq!(parse_args(&args(&["--list"])).unwrap(), Command::List);
    }

    #[test]
    fn usage_errors() {
        match parse_args(&args(&[])) {
            Err(Error::Usage(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_args(&args(&["legends_rise", "--runs"])) {
            Err(Error::Usage(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_args(&args(&["legends_rise", "--runs", "many"])) {
            Err(Error::Usage(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse_args(&args(&["legends_rise", "--bogus"])) {
            Err(Error::Usage(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
