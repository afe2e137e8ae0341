use proptest::{
    collection::vec,
    strategy::{BoxedStrategy, Just, NewTree, Strategy},
    test_runner::TestRunner,
};

use crate::{core::Weight, source::Triple};

pub fn triples() -> TriplesStrategy {
    TriplesStrategy::new()
}

/// Name of the vertex generated for given index.
pub fn vertex_name(index: usize) -> String {
    format!("v{index}")
}

/// Strategy generating input triples over vertices named `v0`, `v1`, ...
///
/// Shrinking is delegated to the composed proptest strategies, so a failing
/// case shrinks towards fewer vertices, fewer triples and smaller weights.
#[derive(Debug, Clone)]
pub struct TriplesStrategy {
    params: StrategyParams,
}

impl TriplesStrategy {
    pub fn new() -> Self {
        Self::with_params(StrategyParams::default())
    }

    pub fn with_params(params: StrategyParams) -> Self {
        Self { params }
    }

    // Builder pattern on the strategy itself to allow usage as in
    // `triples().max_vertices(8).positive().connected()`.
    pub fn max_vertices(self, max_vertices: usize) -> Self {
        Self::with_params(self.params.max_vertices(max_vertices))
    }

    pub fn max_edges(self, max_edges: usize) -> Self {
        Self::with_params(self.params.max_edges(max_edges))
    }

    pub fn max_weight(self, max_weight: Weight) -> Self {
        Self::with_params(self.params.max_weight(max_weight))
    }

    pub fn positive(self) -> Self {
        Self::with_params(self.params.positive())
    }

    pub fn allow_loops(self) -> Self {
        Self::with_params(self.params.allow_loops())
    }

    pub fn connected(self) -> Self {
        Self::with_params(self.params.connected())
    }

    fn compose(&self) -> BoxedStrategy<Vec<Triple>> {
        let StrategyParams {
            max_vertices,
            max_edges,
            min_weight,
            max_weight,
            allow_loops,
            connected,
        } = self.params;

        (1..=max_vertices.max(1))
            .prop_flat_map(move |n| {
                let weight = min_weight..=max_weight;

                // Connecting every vertex to one of the preceding ones gives a
                // random spanning tree.
                let spine = if connected {
                    (1..n)
                        .map(|i| (0..i, Just(i), weight.clone()))
                        .collect::<Vec<_>>()
                } else {
                    Vec::new()
                };

                let extra = vec((0..n, 0..n, weight), 0..=max_edges);

                (spine, extra)
            })
            .prop_map(move |(spine, extra)| {
                spine
                    .into_iter()
                    .chain(extra)
                    .filter(|(u, v, _)| allow_loops || u != v)
                    .map(|(u, v, w)| Triple::new(vertex_name(u), vertex_name(v), w))
                    .collect()
            })
            .boxed()
    }
}

impl Default for TriplesStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for TriplesStrategy {
    type Tree = <BoxedStrategy<Vec<Triple>> as Strategy>::Tree;
    type Value = Vec<Triple>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        self.compose().new_tree(runner)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    max_vertices: usize,
    max_edges: usize,
    min_weight: Weight,
    max_weight: Weight,
    allow_loops: bool,
    connected: bool,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_vertices: 32,
            max_edges: 96,
            min_weight: 0,
            max_weight: u16::MAX as Weight,
            allow_loops: false,
            connected: false,
        }
    }
}

impl StrategyParams {
    pub fn max_vertices(self, max_vertices: usize) -> Self {
        Self {
            max_vertices,
            ..self
        }
    }

    pub fn max_edges(self, max_edges: usize) -> Self {
        Self { max_edges, ..self }
    }

    pub fn max_weight(self, max_weight: Weight) -> Self {
        Self {
            max_weight: max_weight.max(self.min_weight),
            ..self
        }
    }

    /// Generates only weights greater than zero.
    pub fn positive(self) -> Self {
        Self {
            min_weight: 1,
            max_weight: self.max_weight.max(1),
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }

    /// Every generated vertex is reachable from every other one.
    pub fn connected(self) -> Self {
        Self {
            connected: true,
            ..self
        }
    }
}
