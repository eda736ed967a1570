//! Query string parsing for list endpoints.
//!
//! Parameters are validated before any query runs. Empty values and
//! parameters the resource does not define are ignored.

use std::collections::HashMap;

use rusqlite::types::Value;

use super::resources::{FilterKind, Resource};
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::storage::{Direction, ListQuery, Predicate};

/// Decoded query string.
pub(crate) type QueryParams = HashMap<String, String>;

const PAGE: &str = "page";
const PAGE_SIZE: &str = "page_size";
const ORDERING: &str = "ordering";
const SEARCH: &str = "search";

/// Requested page number and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    /// 1-based page number.
    pub number: u32,
    /// Rows per page, already capped.
    pub size: u32,
}

impl PageRequest {
    /// Read `page` and `page_size`, falling back to the configured defaults.
    pub fn parse(params: &QueryParams, config: &PaginationConfig) -> Result<Self> {
        let number = match value(params, PAGE) {
            Some(raw) => positive(PAGE, raw)?,
            None => 1,
        };
        let size = match value(params, PAGE_SIZE) {
            Some(raw) => positive(PAGE_SIZE, raw)?.min(config.max_page_size),
            None => config.page_size,
        };
        Ok(Self { number, size })
    }

    /// Rows to skip before this page.
    pub fn offset(self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

/// Build the filters, search and ordering a request asks for.
pub(crate) fn list_query(resource: &Resource, params: &QueryParams) -> Result<ListQuery> {
    let mut query = ListQuery::new();

    for filter in resource.filters {
        let Some(raw) = value(params, filter.param) else {
            continue;
        };
        let predicate = match filter.kind {
            FilterKind::Integer => {
                Predicate::Equals(filter.field, Value::Integer(integer(filter.param, raw)?))
            }
            FilterKind::Text => Predicate::Equals(filter.field, Value::Text(raw.to_string())),
            FilterKind::Contains => Predicate::Contains(filter.field, raw.to_string()),
            FilterKind::Boolean => Predicate::Equals(
                filter.field,
                Value::Integer(i64::from(boolean(filter.param, raw)?)),
            ),
            FilterKind::NullWhenTrue => {
                Predicate::IsNull(filter.field, boolean(filter.param, raw)?)
            }
            FilterKind::SetWhenTrue => {
                Predicate::IsNull(filter.field, !boolean(filter.param, raw)?)
            }
        };
        query = query.filter(predicate);
    }

    if let Some(text) = value(params, SEARCH) {
        query = query.search(resource.search, text);
    }

    if let Some(raw) = value(params, ORDERING) {
        for key in raw.split(',').map(str::trim).filter(|key| !key.is_empty()) {
            let (name, direction) = match key.strip_prefix('-') {
                Some(name) => (name, Direction::Descending),
                None => (key, Direction::Ascending),
            };
            let field = resource.ordering_field(name).ok_or_else(|| {
                Error::validation(format!("cannot order by '{name}'"))
            })?;
            query = query.order_by(field, direction);
        }
    }

    Ok(query)
}

/// Link to another page of the current request.
///
/// Keeps every other query parameter as sent. Page 1 is linked without a
/// `page` parameter.
pub(crate) fn page_link(path: &str, raw_query: Option<&str>, page: u32) -> String {
    let mut pairs: Vec<String> = raw_query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some(PAGE))
        .map(str::to_string)
        .collect();
    if page > 1 {
        pairs.push(format!("{PAGE}={page}"));
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", pairs.join("&"))
    }
}

fn value<'a>(params: &'a QueryParams, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|raw| !raw.is_empty())
}

fn positive(name: &str, raw: &str) -> Result<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            Error::validation(format!("'{name}' must be a positive integer, got '{raw}'"))
        })
}

fn integer(name: &str, raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::validation(format!("'{name}' must be an integer, got '{raw}'")))
}

fn boolean(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Error::validation(format!(
            "'{name}' must be true or false, got '{raw}'"
        ))),
    }
}
