//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a static table descriptor.

use crate::sql::{quoted, PartialUpdate, Placeholders, SqlValue, WhereClause};

/// One selectable column of a table.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    /// Select as `col::text` (NUMERIC, so the row decodes into a String).
    pub as_text: bool,
}

impl Column {
    pub const fn plain(name: &'static str) -> Self {
        Column { name, as_text: false }
    }

    pub const fn text(name: &'static str) -> Self {
        Column { name, as_text: true }
    }
}

/// Static description of an entity table. Identifiers only ever come from here.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub name: &'static str,
    pub pk: &'static str,
    pub columns: &'static [Column],
    /// Default ordering for lists.
    pub order_by: &'static str,
}

/// SQL text plus its values in placeholder order.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf { sql, params: Vec::new() }
    }
}

fn select_column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| {
            let q = quoted(c.name);
            if c.as_text {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key. Caller adds the key as sole param.
pub fn select_by_pk(table: &Table, pk: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(table),
        quoted(table.name),
        quoted(table.pk)
    ));
    q.params.push(pk);
    q
}

/// SELECT rows narrowed by `filter` (placeholders numbered from `$1`), ordered by the table's display column.
pub fn select_list(table: &Table, filter: WhereClause) -> QueryBuf {
    let where_clause = if filter.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", filter.sql)
    };
    QueryBuf {
        sql: format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            select_column_list(table),
            quoted(table.name),
            where_clause,
            quoted(table.order_by)
        ),
        params: filter.values,
    }
}

/// SELECT rows where `column = $1`, ordered by primary key. Used for related collections.
pub fn select_by_column(table: &Table, column: &'static str, value: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(column),
        quoted(table.pk)
    ));
    q.params.push(value);
    q
}

/// INSERT the given (column, value) pairs, returning the full row.
pub fn insert(table: &Table, values: Vec<(&'static str, SqlValue)>) -> QueryBuf {
    let mut placeholders = Placeholders::new();
    let mut cols = Vec::with_capacity(values.len());
    let mut phs = Vec::with_capacity(values.len());
    let mut params = Vec::with_capacity(values.len());
    for (col, v) in values {
        cols.push(quoted(col));
        phs.push(placeholders.next());
        params.push(v);
    }
    QueryBuf {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(table.name),
            cols.join(", "),
            phs.join(", "),
            select_column_list(table)
        ),
        params,
    }
}

/// UPDATE by primary key using a prepared SET clause. The key binds to the
/// placeholder after the SET values.
pub fn update(table: &Table, set: PartialUpdate, pk: SqlValue) -> QueryBuf {
    let pk_param = set.next_placeholder();
    let mut params = set.values;
    params.push(pk);
    QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            quoted(table.name),
            set.set_clause,
            quoted(table.pk),
            pk_param,
            select_column_list(table)
        ),
        params,
    }
}

/// DELETE by primary key, returning the key so a miss is detectable.
pub fn delete(table: &Table, pk: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        quoted(table.name),
        quoted(table.pk),
        quoted(table.pk)
    ));
    q.params.push(pk);
    q
}
