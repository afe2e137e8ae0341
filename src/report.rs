//! Rendering of search results.
//!
//! The core never prints anything. Everything that ends up in front of a user
//! goes through a [`Report`], [`TextReport`] is the plain text one.

use std::io::{self, Write};

use serde::Deserialize;

use crate::{
    algo::{Path, ShortestPaths},
    core::{Distance, Error, VertexId},
    graph::Graph,
    route::{Leg, RouteSummary},
};

/// A pair of vertex names whose adjacency is reported in the graph summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct AdjacencyProbe {
    pub a: String,
    pub b: String,
}

impl AdjacencyProbe {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// Basic facts about a graph and one of its vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub source: String,
    pub source_degree: usize,
    pub adjacency: Vec<(AdjacencyProbe, bool)>,
}

impl GraphSummary {
    /// Fails if the source or any probed name is not in the graph.
    pub fn collect(graph: &Graph, source: &str, probes: &[AdjacencyProbe]) -> Result<Self, Error> {
        let adjacency = probes
            .iter()
            .map(|probe| {
                graph
                    .are_adjacent(&probe.a, &probe.b)
                    .map(|adjacent| (probe.clone(), adjacent))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            source: source.to_string(),
            source_degree: graph.degree(source)?,
            adjacency,
        })
    }
}

pub trait Report {
    /// Reports one route of a plan. The index is zero-based.
    fn route(&mut self, graph: &Graph, index: usize, leg: &Leg) -> io::Result<()>;

    /// Reports the grand total of a plan with given number of routes.
    fn total(&mut self, routes: usize, total: Distance) -> io::Result<()>;

    /// Reports the path from the source of a search to one of its vertices.
    fn destination(&mut self, graph: &Graph, source: VertexId, path: &Path) -> io::Result<()>;

    fn summary(&mut self, summary: &GraphSummary) -> io::Result<()>;

    fn routes(&mut self, graph: &Graph, summary: &RouteSummary) -> io::Result<()> {
        for (index, leg) in summary.legs().iter().enumerate() {
            self.route(graph, index, leg)?;
        }

        self.total(summary.legs().len(), summary.total())
    }

    /// Reports the paths to all vertices in the order they were settled.
    fn fan_out(&mut self, paths: &ShortestPaths<'_>) -> Result<(), Error> {
        for v in paths.cloud() {
            let path = paths.path(*v)?;
            self.destination(paths.graph(), paths.source(), &path)?;
        }

        Ok(())
    }
}

/// Plain text report.
///
/// Every vertex of a path is printed as `-Name-Distance-`, followed by a line
/// with the distance of the whole path.
#[derive(Debug)]
pub struct TextReport<W> {
    out: W,
}

const RULE: &str = "--------------------------------------------------------------------------";

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn path(&mut self, graph: &Graph, path: &Path) -> io::Result<()> {
        for hop in path.hops() {
            write!(self.out, "-{}-{}-", &graph[hop.vertex], hop.distance)?;
        }
        writeln!(self.out)?;
        writeln!(
            self.out,
            "----------------Route SubTotal:{}------------------------",
            path.distance()
        )
    }
}

impl<W: Write> Report for TextReport<W> {
    fn route(&mut self, graph: &Graph, index: usize, leg: &Leg) -> io::Result<()> {
        writeln!(
            self.out,
            "------------------------Route {}-------------------------",
            index + 1
        )?;
        self.path(graph, &leg.path)?;
        writeln!(self.out)
    }

    fn total(&mut self, routes: usize, total: Distance) -> io::Result<()> {
        writeln!(self.out, "Total Distance Over The {routes} Routes: {total}")
    }

    fn destination(&mut self, graph: &Graph, source: VertexId, path: &Path) -> io::Result<()> {
        let destination = path.destination().unwrap_or(source);

        writeln!(self.out, "{RULE}")?;
        writeln!(
            self.out,
            "Shortest Distance To {} From {}",
            &graph[destination], &graph[source]
        )?;
        writeln!(self.out, "{RULE}")?;
        self.path(graph, path)
    }

    fn summary(&mut self, summary: &GraphSummary) -> io::Result<()> {
        writeln!(self.out, "---------PRINTING RELEVANT GRAPH INFO-----------")?;
        writeln!(self.out, "No. Vertices: {}", summary.vertex_count)?;
        writeln!(self.out, "No. Edges: {}", summary.edge_count)?;
        writeln!(
            self.out,
            "Degree of {}: {}",
            summary.source, summary.source_degree
        )?;

        for (probe, adjacent) in &summary.adjacency {
            writeln!(
                self.out,
                "Are {} and {} Adjacent? {}",
                probe.a, probe.b, adjacent
            )?;
        }

        Ok(())
    }
}
