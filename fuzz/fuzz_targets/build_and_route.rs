#![no_main]

use libfuzzer_sys::fuzz_target;

use routegraph::{
    algo::ShortestPaths,
    core::id::{IdType, VertexId},
    graph::{GraphBuilder, MalformedRowPolicy},
    infra::{
        arbitrary::BuildOpsSeq,
        testing::{check_consistency, check_shortest_paths},
    },
};

fuzz_target!(|ops: BuildOpsSeq| {
    let mut builder = GraphBuilder::new().policy(MalformedRowPolicy::Skip);

    for op in ops {
        op.apply(&mut builder)
            .map_err(|error| error.to_string())
            .unwrap();
    }

    let graph = builder.build();
    check_consistency(&graph)
        .as_ref()
        .map_err(ToString::to_string)
        .unwrap();

    if graph.is_empty() {
        return;
    }

    let paths = ShortestPaths::on(&graph).run(VertexId::from_usize(0));
    check_shortest_paths(&paths)
        .as_ref()
        .map_err(ToString::to_string)
        .unwrap();
});
