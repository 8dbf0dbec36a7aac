//! Value model shared by the executor operators
//!
//! Provides the scalar/composite values that flow through the variable
//! table:
//! - `Value` for dataset cells and operator outputs
//! - `Vid` vertex ids, `Vertex`, `Step`, `Path` for reconstructed paths
//! - `DataSet` for tabular inputs and outputs
//!
//! Everything is totally ordered and hashable (no floats), so vertex ids
//! can key frontier maps and emitted paths deduplicate through a set.

mod dataset;

pub use dataset::{DataSet, COL_EDGE_PREFIX, COL_VID};

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{PathloomError, Result};

/// A value in the query's variable scope
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Path(Path),
    DataSet(DataSet),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dataset(&self) -> Option<&DataSet> {
        match self {
            Value::DataSet(ds) => Some(ds),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vid> for Value {
    fn from(vid: Vid) -> Self {
        match vid {
            Vid::Int(i) => Value::Int(i),
            Vid::Str(s) => Value::Str(s),
        }
    }
}

impl From<Path> for Value {
    fn from(path: Path) -> Self {
        Value::Path(path)
    }
}

impl From<DataSet> for Value {
    fn from(ds: DataSet) -> Self {
        Value::DataSet(ds)
    }
}

/// Vertex id: an opaque comparable, hashable scalar
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Vid {
    Int(i64),
    Str(String),
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vid::Int(i) => write!(f, "{i}"),
            Vid::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<&str> for Vid {
    fn from(s: &str) -> Self {
        Vid::Str(s.to_string())
    }
}

impl From<i64> for Vid {
    fn from(i: i64) -> Self {
        Vid::Int(i)
    }
}

impl TryFrom<&Value> for Vid {
    type Error = PathloomError;

    fn try_from(value: &Value) -> Result<Vid> {
        match value {
            Value::Int(i) => Ok(Vid::Int(*i)),
            Value::Str(s) => Ok(Vid::Str(s.clone())),
            other => Err(PathloomError::invalid_vid(other)),
        }
    }
}

/// A vertex on a reconstructed path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Vertex {
    pub vid: Vid,
    pub props: BTreeMap<String, Value>,
}

impl Vertex {
    pub fn new(vid: Vid) -> Self {
        Vertex {
            vid,
            props: BTreeMap::new(),
        }
    }
}

/// One hop of a path: the destination vertex plus the edge walked to it.
/// Edge types on reconstructed steps are always positive (forward).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Step {
    pub dst: Vertex,
    pub edge_type: i64,
    pub name: String,
    pub rank: i64,
    pub props: BTreeMap<String, Value>,
}

/// A source vertex plus ordered steps; a path of k edges has k steps
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Path {
    pub src: Vertex,
    pub steps: Vec<Step>,
}

impl Path {
    pub fn new(src: Vertex) -> Self {
        Path {
            src,
            steps: Vec::new(),
        }
    }

    /// Number of edges on the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
