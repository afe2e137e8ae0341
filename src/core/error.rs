use std::{fmt, io};

use thiserror::Error;

use super::id::VertexId;

/// A row of input that could not be turned into a triple.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("row {row}: {kind}")]
pub struct ParseError {
    /// One-based position of the row in the input.
    pub row: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(row: usize, kind: ParseErrorKind) -> Self {
        Self { row, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The weight is not a non-negative integer. Holds the original text.
    InvalidWeight(String),
    EmptyName(Field),
    MissingField(Field),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::InvalidWeight(text) => {
                write!(f, "weight {text:?} is not a non-negative integer")
            }
            ParseErrorKind::EmptyName(field) => write!(f, "{field} name is empty"),
            ParseErrorKind::MissingField(field) => write!(f, "{field} field is missing"),
        }
    }
}

/// Column of a (source, destination, weight) row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Source,
    Destination,
    Weight,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Source => "source",
            Field::Destination => "destination",
            Field::Weight => "weight",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// No vertex with the given name exists in the graph.
    #[error("vertex {0:?} not found")]
    NotFound(String),

    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The predecessor chain of a vertex with finite distance does not lead
    /// back to the source.
    ///
    /// This error should not happen in normal circumstances. If it does, it
    /// indicates a bug in the relaxation.
    #[error("predecessor chain of vertex {0} does not reach the source")]
    InvariantViolation(VertexId),

    #[error("reading rows failed: {0}")]
    Source(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message() {
        let error = ParseError::new(4, ParseErrorKind::InvalidWeight("12a".into()));
        assert_eq!(
            error.to_string(),
            "row 4: weight \"12a\" is not a non-negative integer"
        );

        let error = ParseError::new(1, ParseErrorKind::MissingField(Field::Weight));
        assert_eq!(error.to_string(), "row 1: weight field is missing");
    }

    #[test]
    fn not_found_message() {
        assert_eq!(
            Error::NotFound("Grand Forks".into()).to_string(),
            "vertex \"Grand Forks\" not found"
        );
    }
}
