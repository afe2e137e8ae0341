//! Shortest routes over weighted undirected graphs built from tabular
//! (source, destination, weight) rows.
//!
//! A [`Graph`] is built once from rows by a [`GraphBuilder`](graph::GraphBuilder)
//! and then answers any number of shortest-path queries. Each query returns
//! [`ShortestPaths`] with the distances and predecessors of its own, so the
//! graph is never mutated by a search.
//!
//! # Examples
//!
//! ```
//! use routegraph::{source::DelimitedRows, graph::{GraphBuilder, MalformedRowPolicy}};
//!
//! let rows = "Grand Forks,Fargo,79\nFargo,Minneapolis,234\nGrand Forks,Minneapolis,318\n";
//! let graph = GraphBuilder::from_rows(
//!     DelimitedRows::from_reader(rows.as_bytes()),
//!     MalformedRowPolicy::Abort,
//! )
//! .unwrap()
//! .build();
//!
//! let paths = graph.shortest_path("Grand Forks", "Minneapolis").unwrap();
//! let minneapolis = graph.find("Minneapolis").unwrap();
//! let route = paths
//!     .path(minneapolis)
//!     .unwrap()
//!     .vertices()
//!     .map(|v| &graph[v])
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(route, vec!["Grand Forks", "Fargo", "Minneapolis"]);
//! assert_eq!(paths[minneapolis].get(), Some(313));
//! ```

pub mod algo;
pub mod config;
pub mod core;
pub mod graph;
pub mod infra;
pub mod report;
pub mod route;
pub mod source;

pub use crate::{
    algo::ShortestPaths,
    core::{Distance, Error, VertexId, Weight},
    graph::Graph,
};
