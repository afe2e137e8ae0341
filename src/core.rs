pub mod error;
pub mod id;
pub mod weight;

pub use error::{Error, Field, ParseError, ParseErrorKind};
pub use id::{EdgeId, IdType, VertexId};
pub use weight::{Distance, Weight};
