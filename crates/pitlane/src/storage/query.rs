//! Named-field list queries.
//!
//! Each table publishes a fixed map of field names to SQL column expressions.
//! A [`ListQuery`] only ever names fields, so user input reaches the database
//! as bound parameters and never as SQL text.

use rusqlite::types::Value;
use serde::Serialize;

use crate::error::{Error, Result};

/// A queryable table: its joined select list and the fields it exposes.
#[derive(Debug)]
pub struct Table {
    /// Resource name used in errors.
    pub name: &'static str,
    /// Column list of the row select, in row-mapper order.
    pub select: &'static str,
    /// `FROM` clause including joins.
    pub from: &'static str,
    /// Primary key column expression.
    pub key: &'static str,
    /// Field name to column expression.
    pub fields: &'static [(&'static str, &'static str)],
}

impl Table {
    /// Resolve a field name to its column expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the table has no such field.
    pub fn column(&self, field: &str) -> Result<&'static str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
            .ok_or_else(|| Error::UnknownField {
                table: self.name,
                field: field.to_string(),
            })
    }

    /// `SELECT ... FROM ...` without any clauses.
    #[must_use]
    pub fn select_sql(&self) -> String {
        format!("SELECT {} FROM {}", self.select, self.from)
    }
}

/// A single row condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value exactly.
    Equals(&'static str, Value),
    /// Field contains the text, ignoring case.
    Contains(&'static str, String),
    /// Field is null (`true`) or not null (`false`).
    IsNull(&'static str, bool),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// One ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to sort on.
    pub field: &'static str,
    /// Sort direction.
    pub direction: Direction,
}

/// A limit/offset slice of the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Maximum number of rows.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u64,
}

/// Free-text search: every term must match at least one field.
#[derive(Debug, Clone, PartialEq)]
struct Search {
    fields: Vec<&'static str>,
    terms: Vec<String>,
}

/// Filters, search, ordering and window for a list operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    predicates: Vec<Predicate>,
    search: Option<Search>,
    ordering: Vec<OrderBy>,
    window: Option<Window>,
}

/// One page of rows plus the size of the unwindowed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Number of rows matching the filters.
    pub count: u64,
    /// Rows inside the requested window.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Transform every row, keeping the count.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// SQL fragments produced from a [`ListQuery`] for one table.
#[derive(Debug)]
pub(crate) struct CompiledQuery {
    pub where_sql: String,
    pub params: Vec<Value>,
    pub order_sql: String,
    pub window_sql: String,
}

impl ListQuery {
    /// An unfiltered, unordered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Match whitespace-separated terms in `text` against `fields`.
    ///
    /// Blank text leaves the query unchanged.
    #[must_use]
    pub fn search(mut self, fields: &[&'static str], text: &str) -> Self {
        let terms: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if !terms.is_empty() && !fields.is_empty() {
            self.search = Some(Search {
                fields: fields.to_vec(),
                terms,
            });
        }
        self
    }

    /// Append an ordering key.
    #[must_use]
    pub fn order_by(mut self, field: &'static str, direction: Direction) -> Self {
        self.ordering.push(OrderBy { field, direction });
        self
    }

    /// Restrict results to a window.
    #[must_use]
    pub fn window(mut self, limit: u32, offset: u64) -> Self {
        self.window = Some(Window { limit, offset });
        self
    }

    /// The predicates added so far.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The ordering keys added so far.
    #[must_use]
    pub fn ordering(&self) -> &[OrderBy] {
        &self.ordering
    }

    /// The requested window, if any.
    #[must_use]
    pub fn window_bounds(&self) -> Option<Window> {
        self.window
    }

    /// Render the query against a table.
    ///
    /// The primary key is always the last ordering key so windows are stable.
    pub(crate) fn compile(&self, table: &Table) -> Result<CompiledQuery> {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        for predicate in &self.predicates {
            match predicate {
                Predicate::Equals(field, value) => {
                    clauses.push(format!("{} = ?", table.column(field)?));
                    params.push(value.clone());
                }
                Predicate::Contains(field, text) => {
                    clauses.push(contains_clause(table.column(field)?));
                    params.push(Value::Text(like_pattern(text)));
                }
                Predicate::IsNull(field, true) => {
                    clauses.push(format!("{} IS NULL", table.column(field)?));
                }
                Predicate::IsNull(field, false) => {
                    clauses.push(format!("{} IS NOT NULL", table.column(field)?));
                }
            }
        }

        if let Some(search) = &self.search {
            let columns = search
                .fields
                .iter()
                .map(|field| table.column(field))
                .collect::<Result<Vec<_>>>()?;
            for term in &search.terms {
                let any = columns
                    .iter()
                    .map(|column| contains_clause(column))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                clauses.push(format!("({any})"));
                params.extend(columns.iter().map(|_| Value::Text(like_pattern(term))));
            }
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let mut keys = Vec::with_capacity(self.ordering.len() + 1);
        for order in &self.ordering {
            let column = table.column(order.field)?;
            keys.push(match order.direction {
                Direction::Ascending => format!("{column} ASC"),
                Direction::Descending => format!("{column} DESC"),
            });
        }
        keys.push(format!("{} ASC", table.key));
        let order_sql = format!(" ORDER BY {}", keys.join(", "));

        let window_sql = self
            .window
            .map(|window| format!(" LIMIT {} OFFSET {}", window.limit, window.offset))
            .unwrap_or_default();

        Ok(CompiledQuery {
            where_sql,
            params,
            order_sql,
            window_sql,
        })
    }
}

fn contains_clause(column: &str) -> String {
    format!(r"lower({column}) LIKE lower(?) ESCAPE '\'")
}

/// Wrap text in `%` wildcards, escaping LIKE metacharacters it contains.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `?, ?, ?` for an `IN (...)` list of `n` parameters.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
