use fixedbitset::FixedBitSet;
use log::{debug, trace};

use crate::{
    core::{Distance, IdType, VertexId},
    graph::Graph,
};

use super::ShortestPaths;

pub fn dijkstra(graph: &Graph, source: VertexId, goal: Option<VertexId>) -> ShortestPaths<'_> {
    let n = graph.vertex_count();
    assert!(
        source.as_usize() < n,
        "source vertex {source} does not belong to the graph"
    );

    let mut dist = vec![Distance::INFINITY; n];
    let mut pred = vec![None; n];
    let mut cloud = Vec::with_capacity(n);
    let mut settled = FixedBitSet::with_capacity(n);
    let mut goal_reached = false;

    // The fringe starts with every vertex in graph order. It is re-sorted
    // before each step instead of being kept in a heap, and the sort is stable,
    // so vertices with equal distance are settled in the order they had in the
    // previous step.
    let mut fringe = graph.vertex_ids().collect::<Vec<_>>();

    dist[source.as_usize()] = Distance::ZERO;

    debug!(
        "searching shortest paths from {:?} over {} vertices{}",
        &graph[source],
        n,
        goal.and_then(|goal| graph.vertex(goal))
            .map(|goal| format!(" to {:?}", goal.name()))
            .unwrap_or_default()
    );

    while !fringe.is_empty() {
        fringe.sort_by_key(|v| dist[v.as_usize()]);
        let u = fringe.remove(0);
        let ui = u.as_usize();

        // Once the front of the fringe is at infinity, so is everything
        // behind it, and nothing can be relaxed anymore.
        if dist[ui].is_finite() {
            for edge in graph.edges_from(u) {
                let v = edge.destination();
                let vi = v.as_usize();

                if !dist[vi].is_finite() {
                    let next = dist[ui] + edge.weight();
                    if next.is_finite() {
                        dist[vi] = next;
                        pred[vi] = Some(u);
                    }
                    continue;
                }

                // The dequeued vertex pulls its own distance down through an
                // already discovered neighbor. Neighbors are not relaxed from
                // it.
                let through = dist[vi] + edge.weight();
                let current = dist[ui];

                if through < current {
                    dist[ui] = through;
                    pred[ui] = Some(v);
                } else if through == current && settled.contains(vi) {
                    // Settled neighbors only. An unsettled one can still drop
                    // over a zero-weight edge.
                    pred[ui] = Some(v);
                }
            }
        }

        trace!("settled {:?} at distance {}", &graph[u], dist[ui]);
        settled.insert(ui);
        cloud.push(u);

        if goal == Some(u) && dist[ui].is_finite() {
            goal_reached = true;
            break;
        }
    }

    debug!(
        "settled {} of {} vertices{}",
        cloud.len(),
        n,
        match goal {
            Some(_) if goal_reached => ", goal reached",
            Some(_) => ", goal not reached",
            None => "",
        }
    );

    ShortestPaths {
        graph,
        source,
        goal,
        dist,
        pred,
        cloud,
        goal_reached,
    }
}
