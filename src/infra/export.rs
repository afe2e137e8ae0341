//! Export of graphs to the [DOT] language.
//!
//! [DOT]: https://graphviz.org/doc/info/lang.html

use std::io::{self, Cursor, Write};

use crate::{
    algo::ShortestPaths,
    core::{IdType, VertexId},
    graph::Graph,
};

pub trait Export<G> {
    fn export<W: Write>(&self, graph: &G, out: &mut W) -> io::Result<()>;
}

/// DOT exporter of a [`Graph`].
///
/// Every vertex becomes a node labeled by its name and every undirected
/// connection becomes a single line labeled by its weight. If the result of a
/// search is attached, the edges of its predecessor tree are drawn bold.
///
/// # Examples
///
/// ```
/// use routegraph::{infra::export::Dot, Graph};
///
/// let graph = Graph::from_triples([("A", "B", 5)]).unwrap();
/// let dot = Dot::new(None).to_string(&graph);
///
/// assert_eq!(
///     dot,
///     "graph G {\n    v0 [label=\"A\"];\n    v1 [label=\"B\"];\n    v0 -- v1 [label=\"5\"];\n}\n"
/// );
/// ```
pub struct Dot<'p> {
    name: String,
    tree: Option<&'p ShortestPaths<'p>>,
}

impl<'p> Dot<'p> {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            tree: None,
        }
    }

    /// Emphasizes the edges of the predecessor tree of a search.
    pub fn highlight(self, paths: &'p ShortestPaths<'p>) -> Self {
        Self {
            tree: Some(paths),
            ..self
        }
    }

    pub fn to_string(&self, graph: &Graph) -> String {
        let mut cursor = Cursor::new(Vec::new());
        self.export(graph, &mut cursor)
            .expect("writing to vec in cursor does not fail");

        String::from_utf8(cursor.into_inner()).expect("dot format is text format")
    }

    fn in_tree(&self, u: VertexId, v: VertexId) -> bool {
        self.tree
            .is_some_and(|paths| paths.pred(v) == Some(u) || paths.pred(u) == Some(v))
    }
}

impl Export<Graph> for Dot<'_> {
    fn export<W: Write>(&self, graph: &Graph, out: &mut W) -> io::Result<()> {
        writeln!(out, "graph {} {{", self.name)?;

        for (id, vertex) in graph.vertices() {
            writeln!(out, "    v{} [label={:?}];", id.as_usize(), vertex.name())?;
        }

        for u in graph.vertex_ids() {
            for edge in graph.edges_from(u) {
                let v = edge.destination();

                // Both directions of a connection are stored, only one of them
                // is drawn.
                if v < u {
                    continue;
                }

                let style = if self.in_tree(u, v) { ", penwidth=2" } else { "" };

                writeln!(
                    out,
                    "    v{} -- v{} [label=\"{}\"{}];",
                    u.as_usize(),
                    v.as_usize(),
                    edge.weight(),
                    style
                )?;
            }
        }

        writeln!(out, "}}")?;

        Ok(())
    }
}
