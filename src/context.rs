//! Query-scoped variable table
//!
//! The variable table is the only channel between operators: upstream
//! stages write result variables, downstream stages read them on their next
//! tick. Mutation discipline is single-writer per tick, so a plain map is
//! enough.

use std::collections::HashMap;

use crate::error::{PathloomError, Result};
use crate::value::Value;

/// Variable scope for one query
#[derive(Debug, Default)]
pub struct ExecutionContext {
    vars: HashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Read a variable an operator cannot run without
    pub fn get_required(&self, name: &str) -> Result<&Value> {
        self.vars
            .get(name)
            .ok_or_else(|| PathloomError::missing_variable(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}
