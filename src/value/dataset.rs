//! Tabular values exchanged through the variable table

use serde::Serialize;

use super::Value;

/// Column name carrying vertex ids in frontier and neighbor datasets
pub const COL_VID: &str = "_vid";

/// Prefix of the column carrying edge triples in neighbor datasets.
/// The full name encodes the traversed edge, e.g.
/// `_edge:+like:_type:_dst:_rank`; the operators match on the prefix only.
pub const COL_EDGE_PREFIX: &str = "_edge:";

/// Named columns plus rows of values
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DataSet {
    pub col_names: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    pub fn new<I, S>(col_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataSet {
            col_names: col_names.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; its arity must match the header
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.col_names.len());
        self.rows.push(row);
    }

    /// Index of the column with exactly this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.col_names.iter().position(|c| c == name)
    }

    /// Index of the first column whose name starts with `prefix`
    pub fn column_index_by_prefix(&self, prefix: &str) -> Option<usize> {
        self.col_names.iter().position(|c| c.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
