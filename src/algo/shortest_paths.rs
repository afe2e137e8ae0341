//! Find shortest paths and their distances from a single source vertex.
//!
//! The search is a variant of [Dijkstra's algorithm] over non-negative integer
//! weights. The fringe of not yet settled vertices is a plain sequence that is
//! stably re-sorted by distance before each step. When a vertex is taken from
//! the fringe, it pulls its own distance down through neighbors that already
//! have a finite distance, and gives a first distance to neighbors that have
//! none yet. A neighbor that already has a distance is never lowered from the
//! dequeued vertex. As a consequence, the distances are not always the minimal
//! ones, but every finite distance is the weight of an actual walk from the
//! source and the predecessor links always form a tree rooted at the source.
//! On equal distances, a vertex only takes an already settled neighbor as its
//! predecessor, so the weights along the path of a settled vertex always sum
//! up to its distance.
//!
//! The search either settles every vertex or, with a
//! [goal](ShortestPathsBuilder::goal), stops as soon as the goal is settled.
//!
//! [Dijkstra's algorithm]: https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
//!
//! # Examples
//!
//! ```
//! use routegraph::{algo::ShortestPaths, Graph};
//!
//! let graph = Graph::from_triples([
//!     ("Prague", "Bratislava", 328),
//!     ("Prague", "Nuremberg", 297),
//!     ("Prague", "Vienna", 293),
//!     ("Bratislava", "Vienna", 79),
//!     ("Nuremberg", "Munich", 170),
//!     ("Vienna", "Munich", 402),
//!     ("Vienna", "Florence", 863),
//!     ("Munich", "Florence", 646),
//!     ("Florence", "Rome", 278),
//! ])
//! .unwrap();
//!
//! let rome = graph.find("Rome").unwrap();
//! let prague = graph.find("Prague").unwrap();
//!
//! let shortest_paths = ShortestPaths::on(&graph).goal(prague).run(rome);
//! let distance = shortest_paths[prague];
//! let path = shortest_paths
//!     .path(prague)
//!     .unwrap()
//!     .vertices()
//!     .map(|v| &graph[v])
//!     .collect::<Vec<_>>()
//!     .join(" - ");
//!
//! println!("{distance} km from Rome through {path}");
//! ```

use std::ops::Index;

use crate::{
    core::{Distance, Error, IdType, VertexId},
    graph::Graph,
};

mod builder;
mod dijkstra;

pub use builder::ShortestPathsBuilder;

/// Distances and predecessors from a single source vertex.
///
/// The result of one search. It borrows the graph it was computed on, the
/// graph itself is never modified, so any number of searches can run over one
/// graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'a> {
    graph: &'a Graph,
    source: VertexId,
    goal: Option<VertexId>,
    dist: Vec<Distance>,
    pred: Vec<Option<VertexId>>,
    cloud: Vec<VertexId>,
    goal_reached: bool,
}

impl<'a> ShortestPaths<'a> {
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Source vertex where the search was started.
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn goal(&self) -> Option<VertexId> {
        self.goal
    }

    /// Returns `true` if the search stopped because it settled the goal with a
    /// finite distance. Always `false` when there is no goal.
    pub fn is_goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// Returns the distance of the vertex from the source.
    ///
    /// Vertices that are not connected to the source have infinite distance.
    /// With a goal, the distances of vertices that were not settled before the
    /// search stopped are only provisional.
    pub fn dist(&self, v: VertexId) -> Distance {
        self.dist
            .get(v.as_usize())
            .copied()
            .unwrap_or(Distance::INFINITY)
    }

    /// Returns the vertex preceding `v` on its path from the source, or `None`
    /// for the source itself and for vertices that were not reached.
    pub fn pred(&self, v: VertexId) -> Option<VertexId> {
        self.pred.get(v.as_usize()).copied().flatten()
    }

    /// Settled vertices in the order they were settled.
    pub fn cloud(&self) -> &[VertexId] {
        &self.cloud
    }

    /// Returns an iterator over the vertices on the path from the given vertex
    /// to the source, in this order, starting with the vertex itself.
    ///
    /// For a vertex that was not reached, the iterator yields only the vertex.
    pub fn reconstruct(&self, v: VertexId) -> PathReconstruction<'_> {
        PathReconstruction {
            curr: Some(v),
            pred: &self.pred,
            remaining: self.pred.len().max(1),
        }
    }

    /// Returns the path from the source to the given vertex, source first.
    ///
    /// Each hop carries the distance of its vertex. For a vertex that was not
    /// reached, the path consists of the vertex alone at infinite distance.
    ///
    /// Fails with [`Error::InvariantViolation`] if the vertex has a finite
    /// distance, but its predecessor chain does not lead to the source.
    pub fn path(&self, v: VertexId) -> Result<Path, Error> {
        let mut vertices = self.reconstruct(v).collect::<Vec<_>>();

        if self.dist(v).is_finite() {
            let complete = vertices.last() == Some(&self.source)
                && self.pred(self.source).is_none()
                && self.pred.get(v.as_usize()).is_some();

            if !complete {
                return Err(Error::InvariantViolation(v));
            }
        }

        vertices.reverse();

        let hops = vertices
            .into_iter()
            .map(|vertex| Hop {
                vertex,
                distance: self.dist(vertex),
            })
            .collect();

        Ok(Path { hops })
    }
}

impl Index<VertexId> for ShortestPaths<'_> {
    type Output = Distance;

    fn index(&self, index: VertexId) -> &Self::Output {
        &self.dist[index.as_usize()]
    }
}

/// Runs a search from the source that stops as soon as the destination is
/// settled.
///
/// # Panics
///
/// Panics if either vertex does not belong to the graph.
pub fn shortest_path(graph: &Graph, source: VertexId, destination: VertexId) -> ShortestPaths<'_> {
    ShortestPaths::on(graph).goal(destination).run(source)
}

/// Runs a search from the source that settles every vertex.
///
/// # Panics
///
/// Panics if the source does not belong to the graph.
pub fn shortest_path_to_all(graph: &Graph, source: VertexId) -> ShortestPaths<'_> {
    ShortestPaths::on(graph).run(source)
}

/// Iterator over the vertices on the path from a vertex to the source vertex.
///
/// Returned by [`ShortestPaths::reconstruct`].
pub struct PathReconstruction<'a> {
    curr: Option<VertexId>,
    pred: &'a [Option<VertexId>],
    remaining: usize,
}

impl Iterator for PathReconstruction<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        // No valid chain is longer than the vertex count.
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let curr = self.curr?;
        self.curr = self.pred.get(curr.as_usize()).copied().flatten();
        Some(curr)
    }
}

/// A vertex on a [`Path`] together with its distance from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pub vertex: VertexId,
    pub distance: Distance,
}

/// Vertices from the source to a destination, in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    hops: Vec<Hop>,
}

impl Path {
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.hops.iter().map(|hop| hop.vertex)
    }

    /// Number of vertices on the path.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn source(&self) -> Option<VertexId> {
        self.hops.first().map(|hop| hop.vertex)
    }

    pub fn destination(&self) -> Option<VertexId> {
        self.hops.last().map(|hop| hop.vertex)
    }

    /// Distance of the destination from the source.
    pub fn distance(&self) -> Distance {
        self.hops
            .last()
            .map_or(Distance::INFINITY, |hop| hop.distance)
    }

    /// Returns `true` if the destination was reached from the source.
    pub fn is_reachable(&self) -> bool {
        self.distance().is_finite()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use crate::{graph::GraphBuilder, infra::proptest::triples, source::Triple};

    use super::*;

    fn create_basic_graph() -> Graph {
        Graph::from_triples([("A", "B", 1), ("B", "C", 1), ("A", "C", 5)]).unwrap()
    }

    // Textbook Dijkstra settles u at 4 (s - p - v - u). Here u is settled
    // before v gets its final distance, and u never pulls through v again.
    fn create_pull_graph() -> Graph {
        Graph::from_triples([
            ("s", "p", 2),
            ("s", "v", 10),
            ("p", "v", 1),
            ("u", "v", 1),
            ("s", "u", 8),
        ])
        .unwrap()
    }

    fn names<'g>(graph: &'g Graph, path: &Path) -> Vec<&'g str> {
        path.vertices().map(|v| &graph[v]).collect()
    }

    fn find(graph: &Graph, name: &str) -> VertexId {
        graph.find(name).unwrap()
    }

    #[test]
    fn basic_route() {
        let graph = create_basic_graph();
        let paths = graph.shortest_path("A", "C").unwrap();
        let c = find(&graph, "C");

        assert!(paths.is_goal_reached());
        assert_eq!(paths[c], Distance::new(2));

        let path = paths.path(c).unwrap();
        assert_eq!(names(&graph, &path), vec!["A", "B", "C"]);
        assert_eq!(
            path.hops().iter().map(|hop| hop.distance).collect::<Vec<_>>(),
            vec![Distance::ZERO, Distance::new(1), Distance::new(2)]
        );
        assert_eq!(path.distance(), Distance::new(2));
    }

    #[test]
    fn reverse_route() {
        let graph = create_basic_graph();
        let paths = graph.shortest_path("C", "B").unwrap();
        let b = find(&graph, "B");

        let path = paths.path(b).unwrap();
        assert_eq!(names(&graph, &path), vec!["C", "B"]);
        assert_eq!(path.distance(), Distance::new(1));
    }

    #[test]
    fn reconstruct_is_destination_first() {
        let graph = create_basic_graph();
        let [a, b, c] = ["A", "B", "C"].map(|name| find(&graph, name));
        let paths = shortest_path_to_all(&graph, a);

        assert_eq!(paths.reconstruct(c).collect::<Vec<_>>(), vec![c, b, a]);
        assert_eq!(paths.reconstruct(a).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn source_has_zero_distance_and_no_pred() {
        let graph = create_pull_graph();

        for source in graph.vertex_ids() {
            let paths = shortest_path_to_all(&graph, source);
            assert_eq!(paths.dist(source), Distance::ZERO);
            assert_eq!(paths.pred(source), None);
            assert_eq!(paths.cloud()[0], source);
        }
    }

    #[test]
    fn pull_relaxation() {
        let graph = create_pull_graph();
        let [s, p, v, u] = ["s", "p", "v", "u"].map(|name| find(&graph, name));
        let paths = shortest_path_to_all(&graph, s);

        assert_eq!(paths.dist(p), Distance::new(2));
        assert_eq!(paths.dist(u), Distance::new(8));
        assert_eq!(paths.dist(v), Distance::new(3));

        assert_eq!(paths.pred(p), Some(s));
        assert_eq!(paths.pred(u), Some(s));
        assert_eq!(paths.pred(v), Some(p));

        assert_eq!(paths.cloud(), &[s, p, u, v]);
        assert!(!paths.is_goal_reached());
    }

    #[test]
    fn pull_relaxation_single_destination() {
        let graph = create_pull_graph();
        let paths = graph.shortest_path("s", "u").unwrap();
        let u = find(&graph, "u");

        let path = paths.path(u).unwrap();
        assert_eq!(names(&graph, &path), vec!["s", "u"]);
        assert_eq!(path.distance(), Distance::new(8));
    }

    #[test]
    fn early_termination() {
        let graph = create_pull_graph();
        let [s, p] = ["s", "p"].map(|name| find(&graph, name));
        let paths = shortest_path(&graph, s, p);

        assert!(paths.is_goal_reached());
        assert_eq!(paths.goal(), Some(p));
        assert_eq!(paths.cloud(), &[s, p]);
    }

    #[test]
    fn goal_is_source() {
        let graph = create_basic_graph();
        let paths = graph.shortest_path("B", "B").unwrap();
        let b = find(&graph, "B");

        assert!(paths.is_goal_reached());
        assert_eq!(paths.cloud(), &[b]);
        assert_eq!(paths.path(b).unwrap().len(), 1);
    }

    #[test]
    fn zero_weight_tie_keeps_tree() {
        let graph = Graph::from_triples([("s", "a", 1), ("s", "b", 1), ("a", "b", 0)]).unwrap();
        let [s, a, b] = ["s", "a", "b"].map(|name| find(&graph, name));
        let paths = shortest_path_to_all(&graph, s);

        assert_eq!(paths.pred(a), Some(s));
        assert_eq!(paths.pred(b), Some(a));
        assert_eq!(paths.pred(s), None);

        assert_eq!(names(&graph, &paths.path(b).unwrap()), vec!["s", "a", "b"]);
        assert_eq!(paths.dist(b), Distance::new(1));
    }

    #[test]
    fn equal_distances_settle_in_previous_order() {
        let graph = Graph::from_triples([("s", "c", 1), ("s", "a", 1), ("s", "b", 1), ("c", "b", 0)])
            .unwrap();
        let [s, c, a, b] = ["s", "c", "a", "b"].map(|name| find(&graph, name));
        let paths = shortest_path_to_all(&graph, s);

        assert_eq!(paths.cloud(), &[s, c, a, b]);
        assert!([c, a, b].iter().all(|v| paths.dist(*v) == Distance::new(1)));

        // c ties through b while b is still in the fringe and keeps s. Later
        // b ties through the settled c and takes it.
        assert_eq!(paths.pred(c), Some(s));
        assert_eq!(paths.pred(a), Some(s));
        assert_eq!(paths.pred(b), Some(c));
    }

    #[test]
    fn zero_weight_path_sum_equals_distance() {
        let graph = Graph::from_triples([
            ("v3", "v0", 2),
            ("v1", "v2", 2),
            ("v3", "v2", 0),
            ("v2", "v0", 2),
            ("v3", "v1", 0),
            ("v1", "v0", 0),
        ])
        .unwrap();
        let [v0, v1, v2] = ["v0", "v1", "v2"].map(|name| find(&graph, name));
        let paths = shortest_path_to_all(&graph, v2);

        assert_eq!(paths.dist(v1), Distance::ZERO);
        assert_eq!(paths.dist(v0), Distance::new(2));
        assert_eq!(names(&graph, &paths.path(v0).unwrap()), vec!["v2", "v0"]);

        for v in graph.vertex_ids() {
            let path = paths.path(v).unwrap();
            assert_eq!(graph.walk_weight(path.vertices()), Some(paths.dist(v)));
        }
    }

    #[test]
    fn zero_weight_self_loop() {
        let graph = Graph::from_triples([("s", "s", 0), ("s", "a", 0), ("a", "a", 0)]).unwrap();
        let [s, a] = ["s", "a"].map(|name| find(&graph, name));
        let paths = shortest_path_to_all(&graph, s);

        assert_eq!(paths.pred(s), None);
        assert_eq!(paths.pred(a), Some(s));
        assert_eq!(paths.dist(a), Distance::ZERO);
        assert_eq!(paths.cloud().len(), 2);
    }

    #[test]
    fn isolated_vertex() {
        let mut builder = GraphBuilder::new();
        builder.extend([("A", "B", 3), ("B", "C", 4)]).unwrap();
        let d = builder.add_vertex("D");
        let graph = builder.build();
        let a = find(&graph, "A");

        let paths = shortest_path_to_all(&graph, a);

        assert_eq!(paths.dist(d), Distance::INFINITY);
        assert_eq!(paths.pred(d), None);
        assert_eq!(paths.cloud().last(), Some(&d));

        let path = paths.path(d).unwrap();
        assert_eq!(path.vertices().collect::<Vec<_>>(), vec![d]);
        assert!(!path.is_reachable());
    }

    #[test]
    fn goal_not_reached() {
        let graph = Graph::from_triples([("A", "B", 3), ("C", "D", 4)]).unwrap();
        let paths = graph.shortest_path("A", "D").unwrap();
        let d = find(&graph, "D");

        assert!(!paths.is_goal_reached());
        assert_eq!(paths.cloud().len(), graph.vertex_count());
        assert_eq!(paths[d], Distance::INFINITY);
        assert_eq!(paths.path(d).unwrap().distance(), Distance::INFINITY);
    }

    #[test]
    fn repeated_queries_agree() {
        let graph = create_pull_graph();
        let s = find(&graph, "s");

        let first = shortest_path_to_all(&graph, s);
        let second = shortest_path_to_all(&graph, s);

        for v in graph.vertex_ids() {
            assert_eq!(first.dist(v), second.dist(v));
            assert_eq!(first.path(v).unwrap(), second.path(v).unwrap());
        }
    }

    #[test]
    fn broken_chain_detected() {
        let graph = create_basic_graph();
        let [a, b, c] = ["A", "B", "C"].map(|name| find(&graph, name));
        let mut paths = shortest_path_to_all(&graph, a);

        paths.pred[c.as_usize()] = Some(b);
        paths.pred[b.as_usize()] = Some(c);

        assert!(matches!(paths.path(c), Err(Error::InvariantViolation(v)) if v == c));
    }

    fn petgraph_distances(graph: &Graph, source: VertexId) -> HashMap<VertexId, u64> {
        let mut pg = petgraph::graph::UnGraph::<(), u64>::with_capacity(
            graph.vertex_count(),
            graph.edge_count(),
        );

        let nodes = graph.vertex_ids().map(|_| pg.add_node(())).collect::<Vec<_>>();

        for v in graph.vertex_ids() {
            for edge in graph.edges_from(v) {
                if edge.source() <= edge.destination() {
                    pg.add_edge(
                        nodes[edge.source().as_usize()],
                        nodes[edge.destination().as_usize()],
                        edge.weight(),
                    );
                }
            }
        }

        let dist = petgraph::algo::dijkstra(&pg, nodes[source.as_usize()], None, |e| *e.weight());

        graph
            .vertex_ids()
            .filter_map(|v| dist.get(&nodes[v.as_usize()]).map(|d| (v, *d)))
            .collect()
    }

    fn source_of(graph: &Graph, source: usize) -> VertexId {
        VertexId::from_usize(source % graph.vertex_count())
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_source_invariant(triples in triples().allow_loops(), source: usize) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let paths = shortest_path_to_all(&graph, source);

            prop_assert_eq!(paths.dist(source), Distance::ZERO);
            prop_assert_eq!(paths.pred(source), None);
            prop_assert_eq!(paths.cloud().len(), graph.vertex_count());
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_reachability_matches_petgraph(triples in triples().allow_loops(), source: usize) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let paths = shortest_path_to_all(&graph, source);
            let expected = petgraph_distances(&graph, source);

            for v in graph.vertex_ids() {
                prop_assert_eq!(paths.dist(v).is_finite(), expected.contains_key(&v));
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_never_below_petgraph(triples in triples().allow_loops(), source: usize) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let paths = shortest_path_to_all(&graph, source);
            let expected = petgraph_distances(&graph, source);

            for (v, d) in expected {
                prop_assert!(paths.dist(v) >= Distance::new(d));
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_predecessors_form_tree(triples in triples().allow_loops(), source: usize) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let paths = shortest_path_to_all(&graph, source);

            for v in graph.vertex_ids() {
                let path = paths.path(v);
                prop_assert!(path.is_ok(), "{:?}", path);

                if paths.dist(v).is_finite() {
                    prop_assert_eq!(path.unwrap().source(), Some(source));
                }
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_positive_path_sum_equals_distance(triples in triples().positive().connected(), source: usize) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let paths = shortest_path_to_all(&graph, source);

            for v in graph.vertex_ids() {
                let path = paths.path(v).unwrap();
                prop_assert_eq!(graph.walk_weight(path.vertices()), Some(paths.dist(v)));

                let distances = path.hops().iter().map(|hop| hop.distance).collect::<Vec<_>>();
                prop_assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_zero_weight_path_sum_equals_distance(
            triples in triples().max_vertices(8).max_weight(2).allow_loops(),
            source: usize,
        ) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let paths = shortest_path_to_all(&graph, source);

            for v in graph.vertex_ids().filter(|v| paths.dist(*v).is_finite()) {
                let path = paths.path(v).unwrap();
                prop_assert_eq!(graph.walk_weight(path.vertices()), Some(paths.dist(v)));
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_goal_agrees_with_full_search(triples in triples().positive(), source: usize, goal: usize) {
            let graph = Graph::from_triples(triples.iter().cloned()).unwrap();
            prop_assume!(!graph.is_empty());

            let source = source_of(&graph, source);
            let goal = source_of(&graph, goal);

            let single = shortest_path(&graph, source, goal);
            let all = shortest_path_to_all(&graph, source);

            // The settlement order does not depend on the goal, so the first
            // part of the full search is exactly the single-destination one.
            prop_assert_eq!(single.cloud(), &all.cloud()[..single.cloud().len()]);
            prop_assert_eq!(single.dist(goal), all.dist(goal));
            prop_assert_eq!(single.is_goal_reached(), all.dist(goal).is_finite());
        }
    }

    #[test]
    fn triple_conversion() {
        let graph = Graph::from_triples(vec![Triple::new("x", "y", 1)]).unwrap();
        let x = find(&graph, "x");
        assert_eq!(shortest_path_to_all(&graph, x).cloud().len(), 2);
    }
}
