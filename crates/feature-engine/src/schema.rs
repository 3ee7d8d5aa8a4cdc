//! Reference Column Schema
//!
//! The ordered column list frozen when the classifier was trained. Every
//! encoded row is projected onto it before scaling and scoring.

use crate::FeatureError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Ordered, duplicate-free list of model input columns
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceColumns {
    /// Column names in model input order
    columns: Arc<[String]>,
    /// Name to position lookup
    index: HashMap<String, usize>,
}

impl ReferenceColumns {
    /// Build a schema, rejecting empty lists and duplicate names
    pub fn new(columns: Vec<String>) -> Result<Self, FeatureError> {
        if columns.is_empty() {
            return Err(FeatureError::InvalidSchema("reference column list is empty".to_string()));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(FeatureError::InvalidSchema(format!("duplicate column '{}'", name)));
            }
        }

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self {
            columns: columns.into(),
            index,
        })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the schema contains a column
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub(crate) fn shared_columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }
}
