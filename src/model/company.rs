use crate::model::Job;
use crate::sql::{Column, ColumnKind, Field, FieldNameMap, FilterColumns, SqlValue, Table};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const COMPANIES: Table = Table {
    name: "companies",
    pk: "handle",
    columns: &[
        Column::plain("handle"),
        Column::plain("name"),
        Column::plain("description"),
        Column::plain("num_employees"),
        Column::plain("logo_url"),
    ],
    order_by: "name",
};

/// `nameLike`, `minEmployees`, `maxEmployees`. Companies have no presence filter.
pub const COMPANY_FILTERS: FilterColumns = FilterColumns {
    text: Some("name"),
    min: Some("num_employees"),
    max: Some("num_employees"),
    presence: None,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company with its jobs, as returned by a single-company fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub(crate) fn into_columns(self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("handle", self.handle.into()),
            ("name", self.name.into()),
            ("description", self.description.into()),
            ("num_employees", self.num_employees.into()),
            ("logo_url", self.logo_url.into()),
        ]
    }
}

/// Company fields that may be changed after creation. The handle is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
    NumEmployees,
    LogoUrl,
}

impl Field for CompanyField {
    const ALL: &'static [Self] = &[
        CompanyField::Name,
        CompanyField::Description,
        CompanyField::NumEmployees,
        CompanyField::LogoUrl,
    ];

    fn name(self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Description => "description",
            CompanyField::NumEmployees => "numEmployees",
            CompanyField::LogoUrl => "logoUrl",
        }
    }

    fn kind(self) -> ColumnKind {
        match self {
            CompanyField::NumEmployees => ColumnKind::Integer,
            _ => ColumnKind::Text,
        }
    }
}

pub const COMPANY_COLUMNS: FieldNameMap<CompanyField> = FieldNameMap::new(&[
    (CompanyField::NumEmployees, "num_employees"),
    (CompanyField::LogoUrl, "logo_url"),
]);
