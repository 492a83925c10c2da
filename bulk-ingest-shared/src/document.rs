//! Decoded bulk input.
//!
//! A bulk request carries its documents either as a JSON object keyed by
//! document identifier or as a JSON array whose identifiers are derived from
//! each element's position.

use serde_json::{map, Map, Value};
use std::fmt;
use std::iter::Enumerate;
use std::vec;

/// The two accepted shapes of bulk input.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// Explicit string identifiers mapped to documents. Order is not significant.
    Keyed(Map<String, Value>),
    /// Ordered documents. The identifier of each is its 0-based position in
    /// decimal form (`"0"`, `"1"`, ...).
    Positional(Vec<Value>),
}

/// Which shape a [`DocumentSource`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Keyed,
    Positional,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Keyed => write!(f, "keyed"),
            SourceKind::Positional => write!(f, "positional"),
        }
    }
}

impl DocumentSource {
    /// Number of documents in the source.
    pub fn len(&self) -> usize {
        match self {
            DocumentSource::Keyed(docs) => docs.len(),
            DocumentSource::Positional(docs) => docs.len(),
        }
    }

    /// Whether the source holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shape this source was built from.
    pub fn kind(&self) -> SourceKind {
        match self {
            DocumentSource::Keyed(_) => SourceKind::Keyed,
            DocumentSource::Positional(_) => SourceKind::Positional,
        }
    }

    /// Consume the source, yielding `(id, document)` pairs in iteration order.
    ///
    /// Positional identifiers are synthesized here and nowhere else, so two
    /// calls on equal sources yield equal sequences.
    pub fn into_documents(self) -> Documents {
        match self {
            DocumentSource::Keyed(docs) => Documents::Keyed(docs.into_iter()),
            DocumentSource::Positional(docs) => {
                Documents::Positional(docs.into_iter().enumerate())
            }
        }
    }
}

impl From<Map<String, Value>> for DocumentSource {
    fn from(docs: Map<String, Value>) -> Self {
        DocumentSource::Keyed(docs)
    }
}

impl From<Vec<Value>> for DocumentSource {
    fn from(docs: Vec<Value>) -> Self {
        DocumentSource::Positional(docs)
    }
}

impl IntoIterator for DocumentSource {
    type Item = (String, Value);
    type IntoIter = Documents;

    fn into_iter(self) -> Self::IntoIter {
        self.into_documents()
    }
}

/// Iterator over the `(id, document)` pairs of a [`DocumentSource`].
pub enum Documents {
    Keyed(map::IntoIter),
    Positional(Enumerate<vec::IntoIter<Value>>),
}

impl Iterator for Documents {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Documents::Keyed(iter) => iter.next(),
            Documents::Positional(iter) => iter
                .next()
                .map(|(position, doc)| (position.to_string(), doc)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Documents::Keyed(iter) => iter.size_hint(),
            Documents::Positional(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Documents {}
