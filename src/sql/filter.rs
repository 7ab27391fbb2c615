//! WHERE clause assembly for list filters.
//!
//! Filters are collected as [`Predicate`] values first and rendered in one
//! pass, so placeholder numbering comes from a single counter regardless of
//! which predicates take a parameter.

use crate::error::AppError;
use crate::sql::{quoted, Placeholders, SqlValue};

/// Optional list filters, as understood by every entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring of the entity's text column.
    pub text_match: Option<String>,
    pub min_bound: Option<i64>,
    pub max_bound: Option<i64>,
    /// When true, keep only rows whose presence column is greater than zero.
    pub presence: Option<bool>,
}

/// Which columns an entity's filters target. `None` means the filter is not
/// supported for that entity.
#[derive(Clone, Copy, Debug)]
pub struct FilterColumns {
    pub text: Option<&'static str>,
    pub min: Option<&'static str>,
    pub max: Option<&'static str>,
    pub presence: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Contains { column: &'static str, needle: String },
    AtLeast { column: &'static str, bound: i64 },
    AtMost { column: &'static str, bound: i64 },
    Positive { column: &'static str },
}

impl Predicate {
    fn render(&self, placeholders: &mut Placeholders, values: &mut Vec<SqlValue>) -> String {
        match self {
            Predicate::Contains { column, needle } => {
                values.push(SqlValue::from(format!("%{}%", escape_like(needle))));
                format!("{} ILIKE {}", quoted(column), placeholders.next())
            }
            Predicate::AtLeast { column, bound } => {
                values.push(SqlValue::from(*bound));
                format!("{} >= {}", quoted(column), placeholders.next())
            }
            Predicate::AtMost { column, bound } => {
                values.push(SqlValue::from(*bound));
                format!("{} <= {}", quoted(column), placeholders.next())
            }
            Predicate::Positive { column } => format!("{} > 0", quoted(column)),
        }
    }
}

/// Escape LIKE metacharacters with a backslash so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Conjunction of predicates without the `WHERE` keyword; empty when no filter is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Turn a `FilterSpec` into predicates, in the fixed order text, lower bound,
/// upper bound, presence.
pub fn predicates(spec: &FilterSpec, columns: &FilterColumns) -> Result<Vec<Predicate>, AppError> {
    if let (Some(min), Some(max)) = (spec.min_bound, spec.max_bound) {
        if min > max {
            return Err(AppError::Validation(format!(
                "minimum bound {} cannot be greater than maximum bound {}",
                min, max
            )));
        }
    }
    let unsupported = |what: &str| AppError::Validation(format!("{} filter is not supported here", what));

    let mut out = Vec::new();
    if let Some(needle) = &spec.text_match {
        let column = columns.text.ok_or_else(|| unsupported("text"))?;
        out.push(Predicate::Contains { column, needle: needle.clone() });
    }
    if let Some(bound) = spec.min_bound {
        let column = columns.min.ok_or_else(|| unsupported("minimum"))?;
        out.push(Predicate::AtLeast { column, bound });
    }
    if let Some(bound) = spec.max_bound {
        let column = columns.max.ok_or_else(|| unsupported("maximum"))?;
        out.push(Predicate::AtMost { column, bound });
    }
    if let Some(flag) = spec.presence {
        let column = columns.presence.ok_or_else(|| unsupported("presence"))?;
        if flag {
            out.push(Predicate::Positive { column });
        }
    }
    Ok(out)
}

/// Render predicates into a WHERE fragment continuing from `placeholders`.
pub fn render_where(preds: &[Predicate], placeholders: &mut Placeholders) -> WhereClause {
    let mut values = Vec::new();
    let parts: Vec<String> = preds.iter().map(|p| p.render(placeholders, &mut values)).collect();
    WhereClause {
        sql: parts.join(" AND "),
        values,
    }
}

/// Validate the filters and build their WHERE fragment, numbering from `$1`.
pub fn build_where(spec: &FilterSpec, columns: &FilterColumns) -> Result<WhereClause, AppError> {
    let preds = predicates(spec, columns)?;
    Ok(render_where(&preds, &mut Placeholders::new()))
}
