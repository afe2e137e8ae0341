use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use log::LevelFilter;

use routegraph::{
    config::{Config, Mode},
    graph::MalformedRowPolicy,
    route::RouteSpec,
    Error,
};

/// Shortest routes over a weighted undirected graph read from delimited rows
/// of (source, destination, weight).
#[derive(Parser, Debug)]
#[command(name = "routegraph", version)]
struct Cli {
    /// TOML file with the run configuration.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Input file with one (source, destination, weight) row per line.
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Source vertex for the "all", "summary" and "dot" modes.
    #[arg(long, short)]
    source: Option<String>,

    #[arg(long, short, value_enum)]
    mode: Option<Mode>,

    /// Route as FROM:TO. Can be repeated, replaces the routes of the
    /// configuration file.
    #[arg(long, short, action = clap::ArgAction::Append)]
    route: Vec<RouteSpec>,

    /// Skip rows that cannot be parsed instead of failing.
    #[arg(long)]
    skip_malformed: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(input) = self.input {
            config.input = Some(input);
        }

        if let Some(source) = self.source {
            config.source = Some(source);
        }

        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        if !self.route.is_empty() {
            config.routes = self.route;
        }

        if self.skip_malformed {
            config.malformed_rows = MalformedRowPolicy::Skip;
        }

        Ok(config)
    }
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG, if set, takes precedence over the verbosity flags.
    env_logger::Builder::new()
        .filter_level(level(cli.verbose))
        .parse_default_env()
        .init();

    let result = cli
        .config()
        .and_then(|config| config.execute(io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
