use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    algo::ShortestPaths,
    core::{Distance, VertexId},
    graph::{Graph, GraphBuilder},
    infra::export::Dot,
};

pub fn create_path(vertex_count: usize, weight: u64) -> Graph {
    let mut builder = GraphBuilder::new();

    for i in 0..vertex_count {
        builder.add_vertex(&format!("v{i}"));
    }

    for i in 1..vertex_count {
        builder
            .add_edge(&format!("v{}", i - 1), &format!("v{i}"), weight)
            .unwrap();
    }

    builder.build()
}

pub fn create_complete(vertex_count: usize, weight: u64) -> Graph {
    let mut builder = GraphBuilder::new();

    for i in 0..vertex_count {
        builder.add_vertex(&format!("v{i}"));
    }

    for i in 0..vertex_count {
        for j in (i + 1)..vertex_count {
            builder
                .add_edge(&format!("v{i}"), &format!("v{j}"), weight)
                .unwrap();
        }
    }

    builder.build()
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("vertices iterator count ({0}) is not equal to vertex count ({1})")]
    VerticesVertexCountMismatch(usize, usize),
    #[error("name of vertex {0} resolves to a different vertex")]
    NameNotResolved(VertexId),
    #[error("edge record in the list of vertex {0} starts elsewhere")]
    EdgeSourceMismatch(VertexId),
    #[error("edge {0} -> {1} is stored more than once")]
    DuplicateEdge(VertexId, VertexId),
    #[error("edge {0} -> {1} has no mirror with the same weight")]
    MissingMirror(VertexId, VertexId),
    #[error("sum of degrees ({0}) is not equal to edge record count ({1})")]
    HandshakingLemma(usize, usize),
    #[error("source {0} has distance {1} or a predecessor")]
    SourceInvalid(VertexId, Distance),
    #[error("predecessor chain of {0} is broken")]
    ChainBroken(VertexId),
    #[error("vertex {0} has a predecessor that is not its neighbor")]
    PredecessorNotNeighbor(VertexId),
    #[error("vertex {0} is settled more than once")]
    SettledTwice(VertexId),
    #[error("path weight of {0} is not equal to its distance {1}")]
    PathWeightMismatch(VertexId, Distance),
}

pub fn check_consistency(graph: &Graph) -> Result<(), ConsistencyCheckError> {
    let vertex_count = graph.vertex_count();
    let edge_count = graph.edge_count();

    let actual = graph.vertices().count();
    if actual != vertex_count {
        return Err(ConsistencyCheckError::VerticesVertexCountMismatch(
            actual,
            vertex_count,
        ));
    }

    let mut pairs = FxHashSet::default();
    let mut deg_sum = 0;

    for (id, vertex) in graph.vertices() {
        if graph.find(vertex.name()).ok() != Some(id) {
            return Err(ConsistencyCheckError::NameNotResolved(id));
        }

        deg_sum += vertex.degree();

        for edge in graph.edges_from(id) {
            let (u, v) = (edge.source(), edge.destination());

            if u != id {
                return Err(ConsistencyCheckError::EdgeSourceMismatch(id));
            }

            if !pairs.insert((u, v)) {
                return Err(ConsistencyCheckError::DuplicateEdge(u, v));
            }

            let mirrored = graph
                .edges_from(v)
                .any(|back| back.destination() == u && back.weight() == edge.weight());

            if !mirrored {
                return Err(ConsistencyCheckError::MissingMirror(u, v));
            }
        }
    }

    if deg_sum != edge_count {
        return Err(ConsistencyCheckError::HandshakingLemma(deg_sum, edge_count));
    }

    Ok(())
}

/// Checks that the predecessor links of a search form a tree rooted at the
/// source over real edges, that every path weighs exactly its distance and
/// that every vertex was settled at most once.
pub fn check_shortest_paths(paths: &ShortestPaths<'_>) -> Result<(), ConsistencyCheckError> {
    let graph = paths.graph();
    let source = paths.source();

    if paths.dist(source) != Distance::ZERO || paths.pred(source).is_some() {
        return Err(ConsistencyCheckError::SourceInvalid(
            source,
            paths.dist(source),
        ));
    }

    let mut settled = FxHashSet::default();
    for v in paths.cloud() {
        if !settled.insert(*v) {
            return Err(ConsistencyCheckError::SettledTwice(*v));
        }
    }

    for v in graph.vertex_ids() {
        if let Some(u) = paths.pred(v) {
            if !graph.has_edge(u, v) {
                return Err(ConsistencyCheckError::PredecessorNotNeighbor(v));
            }
        }

        let path = paths
            .path(v)
            .map_err(|_| ConsistencyCheckError::ChainBroken(v))?;

        let dist = paths.dist(v);
        if dist.is_finite() && graph.walk_weight(path.vertices()) != Some(dist) {
            return Err(ConsistencyCheckError::PathWeightMismatch(v, dist));
        }
    }

    Ok(())
}

/// Renders the graph in DOT format, for debug output of failing tests.
pub fn debug_dot(graph: &Graph) -> String {
    Dot::new(None).to_string(graph)
}
