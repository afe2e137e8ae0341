use crate::{core::VertexId, graph::Graph};

use super::{dijkstra::dijkstra, ShortestPaths};

pub struct ShortestPathsBuilder<'a> {
    graph: &'a Graph,
    goal: Option<VertexId>,
}

impl<'a> ShortestPaths<'a> {
    pub fn on(graph: &'a Graph) -> ShortestPathsBuilder<'a> {
        ShortestPathsBuilder { graph, goal: None }
    }
}

impl<'a> ShortestPathsBuilder<'a> {
    /// Stops the search as soon as the goal vertex is settled.
    pub fn goal(self, goal: VertexId) -> Self {
        Self {
            goal: Some(goal),
            ..self
        }
    }

    /// Runs the search from the source vertex.
    ///
    /// # Panics
    ///
    /// Panics if the source vertex does not belong to the graph.
    pub fn run(self, source: VertexId) -> ShortestPaths<'a> {
        let ShortestPathsBuilder { graph, goal } = self;
        dijkstra(graph, source, goal)
    }
}
