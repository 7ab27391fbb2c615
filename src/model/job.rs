use crate::model::Company;
use crate::sql::{Column, ColumnKind, Field, FieldNameMap, FilterColumns, SqlValue, Table};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const JOBS: Table = Table {
    name: "jobs",
    pk: "id",
    columns: &[
        Column::plain("id"),
        Column::plain("title"),
        Column::plain("salary"),
        Column::text("equity"),
        Column::plain("company_handle"),
    ],
    order_by: "title",
};

/// `title`, `minSalary`, `hasEquity`.
pub const JOB_FILTERS: FilterColumns = FilterColumns {
    text: Some("title"),
    min: Some("salary"),
    max: None,
    presence: Some("equity"),
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// NUMERIC rendered as text, e.g. `"0.05"`.
    pub equity: Option<String>,
    pub company_handle: String,
}

/// A job with the company that posted it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company: Company,
}

impl JobDetail {
    pub fn new(job: Job, company: Company) -> Self {
        JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i64>,
    /// Decimal string between 0 and 1.
    #[serde(default)]
    pub equity: Option<String>,
    pub company_handle: String,
}

impl NewJob {
    pub(crate) fn into_columns(self) -> Result<Vec<(&'static str, SqlValue)>, crate::error::AppError> {
        let equity = match &self.equity {
            Some(s) => ColumnKind::Decimal.coerce("equity", &serde_json::Value::String(s.clone()))?,
            None => SqlValue::Decimal(None),
        };
        Ok(vec![
            ("title", self.title.into()),
            ("salary", self.salary.into()),
            ("equity", equity),
            ("company_handle", self.company_handle.into()),
        ])
    }
}

/// Job fields that may be changed after creation. Id and company are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobField {
    Title,
    Salary,
    Equity,
}

impl Field for JobField {
    const ALL: &'static [Self] = &[JobField::Title, JobField::Salary, JobField::Equity];

    fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Salary => "salary",
            JobField::Equity => "equity",
        }
    }

    fn kind(self) -> ColumnKind {
        match self {
            JobField::Title => ColumnKind::Text,
            JobField::Salary => ColumnKind::Integer,
            JobField::Equity => ColumnKind::Decimal,
        }
    }
}

/// Job field names already match their columns.
pub const JOB_COLUMNS: FieldNameMap<JobField> = FieldNameMap::new(&[]);
