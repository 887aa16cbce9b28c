//! Bidirectional mapping between external node identifiers and dense indices.
//!
//! Indices are assigned in first-seen order, so a registry built from the
//! node table in row order maps row `i` to index `i`. Every graph view and
//! every score column is aligned against that assignment.

use std::collections::HashMap;

use tracing::instrument;

use crate::error::GraphError;

/// Identifier ↔ index map over one node table.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    identifiers: Vec<String>,
    indices: HashMap<String, usize>,
}

impl IdentifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from node-table identifiers in row order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateIdentifier`] if an identifier repeats;
    /// rows are numbered from zero.
    #[instrument(skip(identifiers))]
    pub fn from_identifiers<I, S>(identifiers: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for (row, identifier) in identifiers.into_iter().enumerate() {
            let identifier = identifier.as_ref();
            if let Some(&first_row) = registry.indices.get(identifier) {
                return Err(GraphError::DuplicateIdentifier {
                    identifier: identifier.to_string(),
                    first_row,
                    row,
                });
            }
            registry.register(identifier);
        }
        tracing::debug!(nodes = registry.len(), "identifier registry built");
        Ok(registry)
    }

    /// Return the index for `identifier`, assigning the next free one on
    /// first sight.
    pub fn register(&mut self, identifier: &str) -> usize {
        if let Some(&index) = self.indices.get(identifier) {
            return index;
        }
        let index = self.identifiers.len();
        self.identifiers.push(identifier.to_string());
        self.indices.insert(identifier.to_string(), index);
        index
    }

    /// Look up a registered identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnregisteredIdentifier`] if `identifier` was
    /// never registered.
    pub fn index_of(&self, identifier: &str) -> Result<usize, GraphError> {
        self.indices
            .get(identifier)
            .copied()
            .ok_or_else(|| GraphError::UnregisteredIdentifier(identifier.to_string()))
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[must_use]
    pub fn identifier_of(&self, index: usize) -> Option<&str> {
        self.identifiers.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Identifiers in index order.
    pub fn identifiers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }
}
