#![allow(dead_code)]

use fastrand::Rng;
use petgraph::prelude::*;
use routegraph::{graph::GraphBuilder, Graph};

pub const RANDOM_SEED: u64 = 0xef6f79ed30ba75a;

/// Geometric skipping over the pairs `(v, w)` with `w < v`, each pair
/// included with probability `p`.
pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_bound: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_bound,
            p,
        }
    }

    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        let Self { v, w, .. } = self;
        let n = self.n;
        let p = self.p;

        if *v >= n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

        while *w >= *v && *v < n {
            *w -= *v;
            *v += 1;
        }

        if *v < n { Some((*v, *w)) } else { None }
    }
}

/// Random (source, destination, weight) triples over the names `v0..vN`.
pub fn random_triples(vertex_count: usize, density: f32, rng: &mut Rng) -> Vec<(String, String, u64)> {
    let mut edges = RandomEdges::new(vertex_count, density);
    let mut triples = Vec::new();

    while let Some((u, v)) = edges.next_edge(rng) {
        triples.push((format!("v{u}"), format!("v{v}"), rng.u64(1..1000)));
    }

    triples
}

pub fn routegraph_random(vertex_count: usize, density: f32, rng: &mut Rng) -> Graph {
    let mut builder = GraphBuilder::new();

    for i in 0..vertex_count {
        builder.add_vertex(&format!("v{i}"));
    }

    for (source, destination, weight) in random_triples(vertex_count, density, rng) {
        builder.add_edge(&source, &destination, weight).unwrap();
    }

    builder.build()
}

pub fn petgraph_random(vertex_count: usize, density: f32, rng: &mut Rng) -> UnGraph<(), u64> {
    let mut graph = UnGraph::with_capacity(vertex_count, 0);

    for _ in 0..vertex_count {
        graph.add_node(());
    }

    for (source, destination, weight) in random_triples(vertex_count, density, rng) {
        let u = source[1..].parse::<usize>().unwrap();
        let v = destination[1..].parse::<usize>().unwrap();
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), weight);
    }

    graph
}
