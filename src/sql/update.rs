//! SET clause for partial updates, shared by every entity.

use crate::error::AppError;
use crate::sql::{quoted, Field, FieldNameMap, Placeholders, SqlValue, UpdateRequest};

/// `"col"=$1, "col2"=$2` plus the values in placeholder order.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialUpdate {
    pub set_clause: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder index following the SET values (used for the WHERE key).
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the assignment list for an UPDATE from the supplied fields only.
///
/// Placeholder `$i` always binds `values[i - 1]`. An empty request is a
/// validation error, never a no-op update.
pub fn sql_for_partial_update<F: Field>(
    data: &UpdateRequest<F>,
    columns: &FieldNameMap<F>,
) -> Result<PartialUpdate, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("no data supplied".into()));
    }
    let mut placeholders = Placeholders::new();
    let mut sets = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (field, value) in data.iter() {
        sets.push(format!("{}={}", quoted(columns.column(*field)), placeholders.next()));
        values.push(value.clone());
    }
    Ok(PartialUpdate {
        set_clause: sets.join(", "),
        values,
    })
}
