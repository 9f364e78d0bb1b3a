//! Command-line interface for conf
//! This binary parses conf files and prints the parsed document in different formats.
//!
//! Usage:
//!   conf `<path>` [--format `<format>`]              - Parse a file ("-" reads stdin)
//!   conf `<path>` --settings `<file>`                - Use runes from a settings file
//!   conf `<path>` --assign : --sections "<>"         - Override runes from the command line

use clap::{Arg, ArgAction, ArgMatches, Command};
use conf::conf::formats::{self, Format};
use conf::conf::loader::Loader;
use conf::{Error, Parsed};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let matches = Command::new("conf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse conf files and print the parsed sections and values")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the conf file, or - for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(Format::NAMES)
                .default_value("json"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .help("TOML settings file layered over the default runes"),
        )
        .arg(
            Arg::new("assign")
                .long("assign")
                .help("Assignment rune (repeatable; replaces the configured set)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("quote")
                .long("quote")
                .help("Quote rune (repeatable; replaces the configured set)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("sections")
                .long("sections")
                .help("Section open and close runes, e.g. \"[]\""),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");

    let output = run(&matches, path, format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    print!("{}", output);
}

fn run(matches: &ArgMatches, path: &str, format: &str) -> Result<String, String> {
    let format: Format = format.parse().map_err(|e| format!("{}", e))?;
    let doc = load_document(matches, path).map_err(|e| e.to_string())?;
    let mut output = formats::serialize(&doc, format).map_err(|e| e.to_string())?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn load_document(matches: &ArgMatches, path: &str) -> Result<Parsed, Error> {
    let mut loader = Loader::new();
    if let Some(settings) = matches.get_one::<String>("settings") {
        loader = loader.with_file(settings);
    }
    if let Some(runes) = matches.get_many::<String>("assign") {
        loader = loader.set_override("runes.assign", runes.cloned().collect::<Vec<_>>())?;
    }
    if let Some(runes) = matches.get_many::<String>("quote") {
        loader = loader.set_override("runes.quote", runes.cloned().collect::<Vec<_>>())?;
    }
    if let Some(pair) = matches.get_one::<String>("sections") {
        let runes: Vec<char> = pair.chars().collect();
        let &[open, close] = runes.as_slice() else {
            return Err(Error::Settings(config::ConfigError::Message(format!(
                "--sections expects exactly two runes, got {:?}",
                pair
            ))));
        };
        loader = loader
            .set_override("runes.section_open", open.to_string())?
            .set_override("runes.section_close", close.to_string())?;
    }
    let parser = loader.build()?.parser()?;
    tracing::debug!(path, "parsing");
    if path == "-" {
        parser.parse_reader(io::stdin().lock())
    } else {
        parser.parse_file(path)
    }
}
