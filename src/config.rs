//! Configuration of a run.
//!
//! A run is described by a TOML file, all fields are optional:
//!
//! ```toml
//! input = "cities.csv"
//! delimiter = ","
//! has_headers = false
//! malformed_rows = "abort"   # or "skip"
//! source = "Chicago"
//! mode = "routes"            # or "all", "summary", "dot"
//!
//! routes = [
//!     { from = "Grand Forks", to = "Seattle" },
//!     { from = "Seattle", to = "Los Angeles" },
//! ]
//!
//! adjacency = [
//!     { a = "Chicago", b = "Milwaukee" },
//! ]
//! ```
//!
//! A relative `input` is resolved against the directory of the configuration
//! file.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::info;
use serde::Deserialize;

use crate::{
    core::Error,
    graph::{BuildStats, Graph, GraphBuilder, MalformedRowPolicy},
    infra::export::{Dot, Export},
    report::{AdjacencyProbe, GraphSummary, Report, TextReport},
    route::{RoutePlan, RouteSpec},
    source::DelimitedRows,
};

/// What a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Shortest path of every configured route and their total.
    #[default]
    Routes,
    /// Shortest paths from the source to all vertices.
    All,
    /// Vertex and edge counts, degree of the source and adjacency probes.
    Summary,
    /// The graph in DOT format, with the shortest-path tree of the source if
    /// there is one.
    Dot,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub delimiter: char,
    pub has_headers: bool,
    pub malformed_rows: MalformedRowPolicy,
    pub source: Option<String>,
    pub mode: Mode,
    pub routes: Vec<RouteSpec>,
    pub adjacency: Vec<AdjacencyProbe>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            delimiter: ',',
            has_headers: false,
            malformed_rows: MalformedRowPolicy::default(),
            source: None,
            mode: Mode::default(),
            routes: Vec::new(),
            adjacency: Vec::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;

        if let (Some(input), Some(dir)) = (&config.input, path.parent()) {
            if input.is_relative() {
                config.input = Some(dir.join(input));
            }
        }

        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(text)?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// Checks that the configuration is complete for its mode.
    pub fn validate(&self) -> Result<(), Error> {
        self.delimiter_byte()?;

        if self.input.is_none() {
            return Err(Error::Config("no input file given".into()));
        }

        match self.mode {
            Mode::Routes if self.routes.is_empty() => {
                Err(Error::Config("mode \"routes\" needs at least one route".into()))
            }
            Mode::All | Mode::Summary if self.source.is_none() => Err(Error::Config(format!(
                "mode {:?} needs a source vertex",
                self.mode_name()
            ))),
            _ => Ok(()),
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8, Error> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::Config(format!(
                    "delimiter {:?} is not a single ASCII character",
                    self.delimiter
                ))
            })
    }

    pub fn plan(&self) -> RoutePlan {
        self.routes.iter().cloned().collect()
    }

    /// Reads the input file into a graph.
    pub fn load_graph(&self) -> Result<(Graph, BuildStats), Error> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| Error::Config("no input file given".into()))?;

        let rows = DelimitedRows::from_path(input, self.delimiter_byte()?, self.has_headers)?;
        let builder = GraphBuilder::from_rows(rows, self.malformed_rows)?;
        let stats = builder.stats();
        let graph = builder.build();

        info!(
            "read {} rows from {} ({} skipped), graph has {} vertices and {} edges",
            stats.rows,
            input.display(),
            stats.skipped_rows,
            graph.vertex_count(),
            graph.edge_count()
        );

        Ok((graph, stats))
    }

    /// Loads the graph and writes the report of the configured mode.
    pub fn execute<W: Write>(&self, out: W) -> Result<(), Error> {
        self.validate()?;
        let (graph, _) = self.load_graph()?;
        self.report(&graph, out)
    }

    /// Writes the report of the configured mode for an already built graph.
    pub fn report<W: Write>(&self, graph: &Graph, mut out: W) -> Result<(), Error> {
        match self.mode {
            Mode::Routes => {
                let summary = self.plan().run(graph)?;
                TextReport::new(out).routes(graph, &summary)?;
            }
            Mode::All => {
                let paths = graph.shortest_path_to_all(self.required_source()?)?;
                TextReport::new(out).fan_out(&paths)?;
            }
            Mode::Summary => {
                let summary =
                    GraphSummary::collect(graph, self.required_source()?, &self.adjacency)?;
                TextReport::new(out).summary(&summary)?;
            }
            Mode::Dot => match &self.source {
                Some(source) => {
                    let paths = graph.shortest_path_to_all(source)?;
                    Dot::new(None).highlight(&paths).export(graph, &mut out)?;
                }
                None => Dot::new(None).export(graph, &mut out)?,
            },
        }

        Ok(())
    }

    fn required_source(&self) -> Result<&str, Error> {
        self.source
            .as_deref()
            .ok_or_else(|| Error::Config(format!("mode {:?} needs a source vertex", self.mode_name())))
    }

    fn mode_name(&self) -> &'static str {
        match self.mode {
            Mode::Routes => "routes",
            Mode::All => "all",
            Mode::Summary => "summary",
            Mode::Dot => "dot",
        }
    }
}
