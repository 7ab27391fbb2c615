//! Typed field identifiers and their mapping onto storage columns.

use crate::error::AppError;
use crate::sql::SqlValue;
use rust_decimal::Decimal;
use serde_json::Value;

/// How a JSON value for a field is coerced before binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// INTEGER column; values outside the 32-bit range are rejected here.
    Integer,
    /// NUMERIC column; accepts a decimal string or a JSON number, bound exactly.
    Decimal,
}

impl ColumnKind {
    pub fn coerce(self, field: &str, v: &Value) -> Result<SqlValue, AppError> {
        let invalid = |expected: &str| AppError::Validation(format!("{} must be {}", field, expected));
        match (self, v) {
            (ColumnKind::Text, Value::Null) => Ok(SqlValue::Text(None)),
            (ColumnKind::Integer, Value::Null) => Ok(SqlValue::Int(None)),
            (ColumnKind::Decimal, Value::Null) => Ok(SqlValue::Decimal(None)),
            (ColumnKind::Text, Value::String(s)) => Ok(SqlValue::Text(Some(s.clone()))),
            (ColumnKind::Integer, Value::Number(n)) => {
                let n = n.as_i64().ok_or_else(|| invalid("an integer"))?;
                i32::try_from(n)
                    .map(|_| SqlValue::from(n))
                    .map_err(|_| AppError::Validation(format!("{} is out of range", field)))
            }
            (ColumnKind::Decimal, Value::Number(n)) => parse_decimal(&n.to_string())
                .map(|d| SqlValue::Decimal(Some(d)))
                .ok_or_else(|| invalid("a number")),
            (ColumnKind::Decimal, Value::String(s)) => parse_decimal(s.trim())
                .map(|d| SqlValue::Decimal(Some(d)))
                .ok_or_else(|| invalid("a decimal number")),
            (ColumnKind::Text, _) => Err(invalid("a string")),
            (ColumnKind::Integer, _) => Err(invalid("an integer")),
            (ColumnKind::Decimal, _) => Err(invalid("a decimal number")),
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// A field of an entity, named in the API vocabulary.
pub trait Field: Copy + PartialEq + 'static {
    /// Every field accepted in an update, in declaration order.
    const ALL: &'static [Self];

    /// Name as it appears in request bodies.
    fn name(self) -> &'static str;

    fn kind(self) -> ColumnKind;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Field to column table. Fields not listed map to a column of the same name.
#[derive(Clone, Copy, Debug)]
pub struct FieldNameMap<F: 'static> {
    entries: &'static [(F, &'static str)],
}

impl<F: Field> FieldNameMap<F> {
    pub const fn new(entries: &'static [(F, &'static str)]) -> Self {
        FieldNameMap { entries }
    }

    pub fn column(&self, field: F) -> &'static str {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, col)| *col)
            .unwrap_or_else(|| field.name())
    }
}

/// Sparse set of field values for a partial update, in request order.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateRequest<F> {
    entries: Vec<(F, SqlValue)>,
}

impl<F: Field> UpdateRequest<F> {
    pub fn new() -> Self {
        UpdateRequest { entries: Vec::new() }
    }

    pub fn push(&mut self, field: F, value: impl Into<SqlValue>) {
        self.entries.push((field, value.into()));
    }

    pub fn with(mut self, field: F, value: impl Into<SqlValue>) -> Self {
        self.push(field, value);
        self
    }

    /// Parse a JSON object body. Unknown keys and mistyped values are validation errors.
    pub fn from_json(body: &serde_json::Map<String, Value>) -> Result<Self, AppError> {
        let mut req = UpdateRequest::new();
        for (key, v) in body {
            let field = F::from_name(key)
                .ok_or_else(|| AppError::Validation(format!("{} is not an updatable field", key)))?;
            req.push(field, field.kind().coerce(key, v)?);
        }
        Ok(req)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(F, SqlValue)> {
        self.entries.iter()
    }
}

impl<F: Field> Default for UpdateRequest<F> {
    fn default() -> Self {
        Self::new()
    }
}
