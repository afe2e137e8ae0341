//! Input rows of (source, destination, weight).
//!
//! The graph builder does not care where its rows come from. Anything that
//! yields [`Triple`]s (already typed) or [`Row`]s (raw text, weight not parsed
//! yet) can feed it. [`DelimitedRows`] is the provided reader for CSV/TSV-like
//! text.
//!
//! # Examples
//!
//! ```
//! use routegraph::source::DelimitedRows;
//!
//! let text = "Chicago,Milwaukee,92\nChicago,Detroit,283\n";
//! let rows = DelimitedRows::from_reader(text.as_bytes())
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].destination, "Detroit");
//! assert_eq!(rows[1].triple().unwrap().weight, 283);
//! ```

use std::{fs::File, io::Read, path::Path};

use crate::core::{Error, Field, ParseError, ParseErrorKind, Weight};

/// A typed (source, destination, weight) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub source: String,
    pub destination: String,
    pub weight: Weight,
}

impl Triple {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, weight: Weight) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            weight,
        }
    }
}

impl<S, D> From<(S, D, Weight)> for Triple
where
    S: Into<String>,
    D: Into<String>,
{
    fn from((source, destination, weight): (S, D, Weight)) -> Self {
        Self::new(source, destination, weight)
    }
}

/// A raw row as read from the input, with the weight still in text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    /// One-based position of the row in the input, used in error messages.
    pub line: usize,
    pub source: String,
    pub destination: String,
    pub weight: String,
}

impl Row {
    pub fn new(
        line: usize,
        source: impl Into<String>,
        destination: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            line,
            source: source.into(),
            destination: destination.into(),
            weight: weight.into(),
        }
    }

    /// Parses the row into a triple.
    ///
    /// Fails if either name is empty or if the weight is not a non-negative
    /// integer. An unparsable weight is never read as zero, because zero is a
    /// valid weight.
    pub fn triple(&self) -> Result<Triple, ParseError> {
        if self.source.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyName(Field::Source)));
        }

        if self.destination.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyName(Field::Destination)));
        }

        let weight = self
            .weight
            .parse::<Weight>()
            .map_err(|_| self.error(ParseErrorKind::InvalidWeight(self.weight.clone())))?;

        Ok(Triple::new(
            self.source.clone(),
            self.destination.clone(),
            weight,
        ))
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.line, kind)
    }
}

/// Reader of delimited text rows.
///
/// Every record must have at least three fields: source name, destination
/// name and weight. Additional fields are ignored. Fields are trimmed, empty
/// lines and lines starting with `#` are skipped.
pub struct DelimitedRows<R> {
    records: csv::StringRecordsIntoIter<R>,
    count: usize,
}

impl<R: Read> DelimitedRows<R> {
    /// Comma separated rows without a header.
    pub fn from_reader(reader: R) -> Self {
        Self::with_options(reader, b',', false)
    }

    pub fn with_options(reader: R, delimiter: u8, has_headers: bool) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_headers)
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(reader);

        Self {
            records: reader.into_records(),
            count: 0,
        }
    }
}

impl DelimitedRows<File> {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
        has_headers: bool,
    ) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::with_options(file, delimiter, has_headers))
    }
}

impl<R: Read> Iterator for DelimitedRows<R> {
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(error) => return Some(Err(error.into())),
        };

        self.count += 1;
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(self.count);

        let field = |index: usize, field: Field| {
            record
                .get(index)
                .ok_or_else(|| ParseError::new(line, ParseErrorKind::MissingField(field)))
        };

        let row = field(0, Field::Source).and_then(|source| {
            let destination = field(1, Field::Destination)?;
            let weight = field(2, Field::Weight)?;
            Ok(Row::new(line, source, destination, weight))
        });

        Some(row.map_err(Error::from))
    }
}
