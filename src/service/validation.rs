//! Request body validation from per-field rules.

use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};

/// Expected JSON type of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
}

#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub kind: ValueKind,
    pub required: bool,
    pub nullable: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub pattern: Option<&'static str>,
    pub format: Option<&'static str>,
}

impl ValidationRule {
    pub const fn string() -> Self {
        Self::of(ValueKind::String)
    }

    pub const fn integer() -> Self {
        Self::of(ValueKind::Integer)
    }

    const fn of(kind: ValueKind) -> Self {
        ValidationRule {
            kind,
            required: false,
            nullable: false,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            pattern: None,
            format: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn length(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_length = Some(min);
        self.max_length = max;
        self
    }

    pub const fn minimum(mut self, min: i64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub const fn maximum(mut self, max: i64) -> Self {
        self.maximum = Some(max);
        self
    }

    /// Range of a PostgreSQL INTEGER column that may not go negative.
    pub const fn non_negative_int4(self) -> Self {
        self.minimum(0).maximum(i32::MAX as i64)
    }

    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub const fn format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }
}

/// Field name to rule, in the API vocabulary.
pub type Rules = &'static [(&'static str, ValidationRule)];

const EQUITY_PATTERN: &str = r"^(0(\.\d+)?|1(\.0+)?)$";
const HANDLE_PATTERN: &str = r"^[a-z0-9_-]+$";

pub const COMPANY_NEW: Rules = &[
    ("handle", ValidationRule::string().required().length(1, Some(25)).pattern(HANDLE_PATTERN)),
    ("name", ValidationRule::string().required().length(1, None)),
    ("description", ValidationRule::string().required()),
    ("numEmployees", ValidationRule::integer().nullable().non_negative_int4()),
    ("logoUrl", ValidationRule::string().nullable().format("url")),
];

pub const COMPANY_UPDATE: Rules = &[
    ("name", ValidationRule::string().length(1, None)),
    ("description", ValidationRule::string()),
    ("numEmployees", ValidationRule::integer().nullable().non_negative_int4()),
    ("logoUrl", ValidationRule::string().nullable().format("url")),
];

pub const JOB_NEW: Rules = &[
    ("title", ValidationRule::string().required().length(1, None)),
    ("salary", ValidationRule::integer().nullable().non_negative_int4()),
    ("equity", ValidationRule::string().nullable().pattern(EQUITY_PATTERN)),
    ("companyHandle", ValidationRule::string().required().length(1, Some(25))),
];

pub const JOB_UPDATE: Rules = &[
    ("title", ValidationRule::string().length(1, None)),
    ("salary", ValidationRule::integer().nullable().non_negative_int4()),
    ("equity", ValidationRule::string().nullable().pattern(EQUITY_PATTERN)),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full body: required fields present, no unknown fields.
    pub fn validate(body: &Map<String, Value>, rules: Rules) -> Result<(), AppError> {
        for (field, rule) in rules {
            if rule.required && body.get(*field).map_or(true, Value::is_null) {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }
        Self::validate_partial(body, rules)
    }

    /// Validate only the fields present (for PATCH). Unknown fields are still rejected.
    pub fn validate_partial(body: &Map<String, Value>, rules: Rules) -> Result<(), AppError> {
        for (field, v) in body {
            let rule = rules
                .iter()
                .find(|(name, _)| *name == field.as_str())
                .map(|(_, r)| r)
                .ok_or_else(|| AppError::Validation(format!("{} is not allowed", field)))?;
            validate_field(field, v, rule)?;
        }
        Ok(())
    }
}

/// Require a JSON object body.
pub fn body_object(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn validate_field(field: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        if rule.nullable {
            return Ok(());
        }
        return Err(AppError::Validation(format!("{} cannot be null", field)));
    }
    match rule.kind {
        ValueKind::String => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::Validation(format!("{} must be a string", field)))?;
            validate_string(field, s, rule)
        }
        ValueKind::Integer => {
            let n = v
                .as_i64()
                .ok_or_else(|| AppError::Validation(format!("{} must be an integer", field)))?;
            if let Some(min) = rule.minimum {
                if n < min {
                    return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
                }
            }
            if let Some(max) = rule.maximum {
                if n > max {
                    return Err(AppError::Validation(format!("{} must be at most {}", field, max)));
                }
            }
            Ok(())
        }
    }
}

fn validate_string(field: &str, s: &str, rule: &ValidationRule) -> Result<(), AppError> {
    let len = s.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                field, min
            )));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    if let Some(pattern) = rule.pattern {
        let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
        if !re.is_match(s) {
            return Err(AppError::Validation(format!("{} does not match required pattern", field)));
        }
    }
    if let Some(format) = rule.format {
        validate_format(field, s, format)?;
    }
    Ok(())
}

fn validate_format(field: &str, s: &str, format: &str) -> Result<(), AppError> {
    match format {
        "url" => {
            let rest = s
                .strip_prefix("https://")
                .or_else(|| s.strip_prefix("http://"));
            match rest {
                Some(host) if !host.is_empty() && !host.starts_with('/') && !s.contains(char::is_whitespace) => Ok(()),
                _ => Err(AppError::Validation(format!("{} must be a valid URL", field))),
            }
        }
        _ => Ok(()),
    }
}
