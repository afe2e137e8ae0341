use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    core::{EdgeId, Error, Field, IdType, ParseError, ParseErrorKind, VertexId, Weight},
    source::{Row, Triple},
};

use super::{Edge, Graph, Vertex};

/// What to do with a row that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Stop building and return the parse error.
    #[default]
    Abort,
    /// Drop the row, log a warning and count it in [`BuildStats`].
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BuildStats {
    /// Rows and triples offered to the builder, including skipped ones.
    pub rows: usize,
    pub skipped_rows: usize,
    /// Edge records not inserted because the ordered pair was already
    /// connected.
    pub duplicate_edges: usize,
}

/// Incremental construction of a [`Graph`] from (source, destination, weight)
/// triples.
///
/// Each distinct name becomes exactly one vertex. Each triple connects its two
/// vertices in both directions; an ordered pair that is already connected is
/// left untouched, so the first weight seen for it wins.
///
/// # Examples
///
/// ```
/// use routegraph::{graph::GraphBuilder, source::Row};
///
/// let mut builder = GraphBuilder::new();
/// builder.add_edge("Chicago", "Milwaukee", 92).unwrap();
/// builder.add_row(&Row::new(2, "Milwaukee", "Chicago", "92")).unwrap();
///
/// let graph = builder.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    names: FxHashMap<String, VertexId>,
    policy: MalformedRowPolicy,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(self, policy: MalformedRowPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Returns the vertex with given name, registering it first if the name is
    /// new. The vertex gets no edges, so this can be used for isolated
    /// vertices.
    pub fn add_vertex(&mut self, name: &str) -> VertexId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }

        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(Vertex::new(name.to_string()));
        self.names.insert(name.to_string(), id);
        id
    }

    /// Connects two named vertices in both directions.
    ///
    /// Fails if either name is empty.
    pub fn add_edge(
        &mut self,
        source: &str,
        destination: &str,
        weight: Weight,
    ) -> Result<(), Error> {
        self.stats.rows += 1;
        let row = self.stats.rows;

        let result = check_name(row, source, Field::Source)
            .and_then(|_| check_name(row, destination, Field::Destination));

        match result {
            Ok(()) => {
                self.connect(source, destination, weight);
                Ok(())
            }
            Err(error) => self.malformed(error),
        }
    }

    pub fn add_triple(&mut self, triple: &Triple) -> Result<(), Error> {
        self.add_edge(&triple.source, &triple.destination, triple.weight)
    }

    /// Parses a raw row and connects its vertices.
    ///
    /// A row with an empty name or a weight that is not a non-negative integer
    /// is handled according to the [policy](MalformedRowPolicy).
    pub fn add_row(&mut self, row: &Row) -> Result<(), Error> {
        match row.triple() {
            Ok(triple) => self.add_triple(&triple),
            Err(error) => {
                self.stats.rows += 1;
                self.malformed(error)
            }
        }
    }

    pub fn extend<I, T>(&mut self, triples: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Triple>,
    {
        for triple in triples {
            self.add_triple(&triple.into())?;
        }

        Ok(())
    }

    /// Consumes rows until the input ends or an error aborts the build.
    ///
    /// Parse errors reported by the row source itself (e.g., a missing field)
    /// are subject to the policy as well. Any other error of the source aborts.
    pub fn extend_rows<I>(&mut self, rows: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Result<Row, Error>>,
    {
        for row in rows {
            match row {
                Ok(row) => self.add_row(&row)?,
                Err(Error::Parse(error)) => {
                    self.stats.rows += 1;
                    self.malformed(error)?;
                }
                Err(error) => return Err(error),
            }
        }

        Ok(())
    }

    /// Creates a builder with given policy and feeds it all rows.
    ///
    /// The builder is returned instead of the graph so that the caller can
    /// inspect [`stats`](GraphBuilder::stats) or add more vertices.
    pub fn from_rows<I>(rows: I, policy: MalformedRowPolicy) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Result<Row, Error>>,
    {
        let mut builder = Self::new().policy(policy);
        builder.extend_rows(rows)?;
        Ok(builder)
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn build(self) -> Graph {
        debug!(
            "built graph with {} vertices and {} edge records from {} rows ({} skipped, {} duplicate edges)",
            self.vertices.len(),
            self.edges.len(),
            self.stats.rows,
            self.stats.skipped_rows,
            self.stats.duplicate_edges
        );

        Graph {
            vertices: self.vertices,
            edges: self.edges,
            names: self.names,
        }
    }

    fn connect(&mut self, source: &str, destination: &str, weight: Weight) {
        // Both names are resolved before any edge is created, so a name seen
        // for the first time in this triple still maps to a single vertex.
        let u = self.add_vertex(source);
        let v = self.add_vertex(destination);

        self.insert_edge(u, v, weight);
        self.insert_edge(v, u, weight);
    }

    fn insert_edge(&mut self, source: VertexId, destination: VertexId, weight: Weight) {
        let exists = self.vertices[source.as_usize()]
            .edges
            .iter()
            .any(|id| self.edges[id.as_usize()].destination == destination);

        if exists {
            self.stats.duplicate_edges += 1;
            return;
        }

        let id = EdgeId::from_usize(self.edges.len());
        self.edges.push(Edge {
            source,
            destination,
            weight,
        });
        self.vertices[source.as_usize()].edges.push(id);
    }

    fn malformed(&mut self, error: ParseError) -> Result<(), Error> {
        match self.policy {
            MalformedRowPolicy::Abort => Err(error.into()),
            MalformedRowPolicy::Skip => {
                warn!("skipping malformed {error}");
                self.stats.skipped_rows += 1;
                Ok(())
            }
        }
    }
}

fn check_name(row: usize, name: &str, field: Field) -> Result<(), ParseError> {
    if name.is_empty() {
        Err(ParseError::new(row, ParseErrorKind::EmptyName(field)))
    } else {
        Ok(())
    }
}
