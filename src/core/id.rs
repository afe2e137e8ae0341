//! Identifiers of vertices and edges in a [`Graph`](crate::Graph).
//!
//! Vertices and edges live in contiguous arenas inside the graph and are
//! referred to by their position in the arena. The position is assigned once
//! when the graph is built (vertices in the order their names are first seen,
//! edges in the order they are inserted) and never changes afterwards, because
//! the graph is not mutated after construction.
//!
//! The name of a vertex is only a display attribute. Two vertices are the same
//! vertex if and only if they have the same [`VertexId`].

use std::{fmt, hash::Hash};

/// An integer identification of a vertex or edge in a graph.
///
/// All integer values from zero up to the number of vertices (edges) are valid
/// IDs and there is no discontinuity, so the algorithms can treat the ID as
/// `usize` and index into a contiguous array.
pub trait IdType: Copy + Ord + Hash + fmt::Debug {
    /// Converts an `usize` into the corresponding ID.
    fn from_usize(index: usize) -> Self;

    /// Converts an ID into the corresponding `usize`.
    fn as_usize(&self) -> usize;
}

/// Position of a vertex in the vertex arena of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u64);

/// Position of an edge record in the edge arena of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u64);

macro_rules! impl_id_type {
    ($id_ty:ident, $prefix:literal) => {
        impl IdType for $id_ty {
            fn from_usize(index: usize) -> Self {
                Self(index as u64)
            }

            fn as_usize(&self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $id_ty {
            fn from(index: usize) -> Self {
                Self::from_usize(index)
            }
        }

        impl From<$id_ty> for usize {
            fn from(id: $id_ty) -> Self {
                id.as_usize()
            }
        }

        impl fmt::Display for $id_ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

impl_id_type!(VertexId, "v");
impl_id_type!(EdgeId, "e");
