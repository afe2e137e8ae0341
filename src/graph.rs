//! Undirected weighted graph with named vertices.
//!
//! The graph is an adjacency list. Vertices and edges are stored in two arenas
//! and addressed by [`VertexId`] and [`EdgeId`]. Every vertex keeps the ids of
//! its outgoing edge records in insertion order. An undirected connection
//! between two distinct vertices is represented by two edge records, one for
//! each direction.
//!
//! Graphs are created by [`GraphBuilder`] and are immutable afterwards.
//!
//! # Examples
//!
//! ```
//! use routegraph::Graph;
//!
//! let graph = Graph::from_triples([("A", "B", 5), ("B", "C", 3)]).unwrap();
//!
//! assert!(graph.are_adjacent("A", "B").unwrap());
//! assert!(!graph.are_adjacent("A", "C").unwrap());
//! assert_eq!(graph.degree("B").unwrap(), 2);
//! ```

mod builder;

use std::{ops::Index, slice};

use rustc_hash::FxHashMap;

use crate::{
    algo::ShortestPaths,
    core::{Distance, EdgeId, Error, IdType, VertexId, Weight},
    source::Triple,
};

pub use builder::{BuildStats, GraphBuilder, MalformedRowPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    name: String,
    edges: Vec<EdgeId>,
}

impl Vertex {
    fn new(name: String) -> Self {
        Self {
            name,
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing edge records in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// A directed edge record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: VertexId,
    destination: VertexId,
    weight: Weight,
}

impl Edge {
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn destination(&self) -> VertexId {
        self.destination
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    names: FxHashMap<String, VertexId>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Builds a graph from typed triples.
    ///
    /// Fails only if a triple contains an empty name.
    pub fn from_triples<I, T>(triples: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Triple>,
    {
        let mut builder = GraphBuilder::new();
        builder.extend(triples)?;
        Ok(builder.build())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edge records. A connection between two distinct
    /// vertices counts twice, a self-loop once.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in the order their names were first seen.
    pub fn vertices(&self) -> VerticesIter<'_> {
        VerticesIter {
            inner: self.vertices.iter().enumerate(),
        }
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_count()).map(VertexId::from_usize)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.as_usize())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_usize())
    }

    /// Resolves a vertex name.
    pub fn find(&self, name: &str) -> Result<VertexId, Error> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Outgoing edge records of a vertex in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the vertex does not belong to this graph.
    pub fn edges_from(&self, id: VertexId) -> EdgesIter<'_> {
        EdgesIter {
            ids: self.vertices[id.as_usize()].edges.iter(),
            edges: &self.edges,
        }
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.vertex(from).map_or(false, |_| {
            self.edges_from(from).any(|edge| edge.destination == to)
        })
    }

    pub fn incident_edges(&self, name: &str) -> Result<EdgesIter<'_>, Error> {
        self.find(name).map(|id| self.edges_from(id))
    }

    pub fn neighbors(&self, name: &str) -> Result<NeighborsIter<'_>, Error> {
        self.incident_edges(name)
            .map(|edges| NeighborsIter { inner: edges })
    }

    /// Number of edge records incident on the vertex.
    pub fn degree(&self, name: &str) -> Result<usize, Error> {
        self.find(name).map(|id| self.vertices[id.as_usize()].degree())
    }

    /// Returns `true` if an edge record from `a` targets `b`.
    pub fn are_adjacent(&self, a: &str, b: &str) -> Result<bool, Error> {
        let a = self.find(a)?;
        let b = self.find(b)?;
        Ok(self.has_edge(a, b))
    }

    /// Runs the shortest-path search between two named vertices. The search
    /// stops as soon as the destination is settled.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<ShortestPaths<'_>, Error> {
        let source = self.find(from)?;
        let goal = self.find(to)?;
        Ok(ShortestPaths::on(self).goal(goal).run(source))
    }

    /// Runs the shortest-path search from a named vertex to all vertices.
    pub fn shortest_path_to_all(&self, from: &str) -> Result<ShortestPaths<'_>, Error> {
        let source = self.find(from)?;
        Ok(ShortestPaths::on(self).run(source))
    }

    /// Sum of the weights of edges along consecutive vertices, or `None` if
    /// some consecutive pair is not adjacent.
    pub fn walk_weight<I>(&self, vertices: I) -> Option<Distance>
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut vertices = vertices.into_iter();
        let mut prev = vertices.next()?;
        let mut total = Distance::ZERO;

        for next in vertices {
            let edge = self.edges_from(prev).find(|edge| edge.destination == next)?;
            total = total + edge.weight;
            prev = next;
        }

        Some(total)
    }
}

impl Index<VertexId> for Graph {
    type Output = str;

    fn index(&self, id: VertexId) -> &Self::Output {
        &self.vertices[id.as_usize()].name
    }
}

#[derive(Debug)]
pub struct VerticesIter<'a> {
    inner: std::iter::Enumerate<slice::Iter<'a, Vertex>>,
}

impl<'a> Iterator for VerticesIter<'a> {
    type Item = (VertexId, &'a Vertex);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, vertex)| (VertexId::from_usize(index), vertex))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for VerticesIter<'_> {}

#[derive(Debug)]
pub struct EdgesIter<'a> {
    ids: slice::Iter<'a, EdgeId>,
    edges: &'a [Edge],
}

impl<'a> Iterator for EdgesIter<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| &self.edges[id.as_usize()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for EdgesIter<'_> {}

#[derive(Debug)]
pub struct NeighborsIter<'a> {
    inner: EdgesIter<'a>,
}

impl Iterator for NeighborsIter<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Edge::destination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NeighborsIter<'_> {}
