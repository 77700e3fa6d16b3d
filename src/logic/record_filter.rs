use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use crate::model::{FilterValue, Page, PageMeta, QueryParams};

/// Filter value that disables a filter instead of matching literally
pub const MATCH_ALL: &str = "all";

/// Free text a record exposes to the `search` parameter
pub trait Searchable {
    fn search_text(&self) -> String;
}

/// Run a table query over in-memory records: filters, search, sort, then
/// the requested page.
pub fn apply_query<T>(records: &[T], query: &QueryParams) -> Page<T>
where
    T: Serialize + Searchable + Clone,
{
    let needle = query
        .search
        .as_ref()
        .map(|search| search.to_lowercase())
        .filter(|search| !search.is_empty());

    let matching = records
        .iter()
        .map(|record| (record, serde_json::to_value(record).unwrap_or(Value::Null)))
        .filter(|(_, json)| {
            query
                .filters
                .iter()
                .all(|(key, expected)| field_matches(json.get(key), expected))
        })
        .filter(|(record, _)| match &needle {
            Some(needle) => record.search_text().to_lowercase().contains(needle),
            None => true,
        });

    let sorted: Vec<(&T, Value)> = match query.sort.as_deref().and_then(parse_sort) {
        Some((field, descending)) => matching
            .sorted_by(|(_, a), (_, b)| compare_fields(a.get(field), b.get(field), descending))
            .collect(),
        None => matching.collect(),
    };

    let total = sorted.len();
    let data = sorted
        .into_iter()
        .skip(query.offset())
        .take(query.limit as usize)
        .map(|(record, _)| record.clone())
        .collect();

    Page {
        data,
        meta: PageMeta::new(query.page, query.limit, total),
    }
}

/// `-field` sorts descending; a bare `-` or empty token means no sort
fn parse_sort(token: &str) -> Option<(&str, bool)> {
    let (field, descending) = match token.strip_prefix('-') {
        Some(field) => (field, true),
        None => (token, false),
    };
    (!field.is_empty()).then_some((field, descending))
}

fn field_matches(actual: Option<&Value>, expected: &FilterValue) -> bool {
    if expected.as_str() == Some(MATCH_ALL) {
        return true;
    }

    match (actual, expected) {
        (None, _) => false,
        (Some(Value::Bool(actual)), FilterValue::Bool(expected)) => actual == expected,
        (Some(Value::Number(actual)), FilterValue::Number(expected)) => {
            actual.as_f64() == Some(*expected)
        }
        (Some(Value::String(actual)), FilterValue::Text(expected)) => actual == expected,
        (Some(actual), expected) => scalar_text(actual) == Some(expected.to_string()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(FilterValue::Number(number.as_f64()?).to_string()),
        _ => None,
    }
}

/// Missing fields sort last in either direction
fn compare_fields(a: Option<&Value>, b: Option<&Value>, descending: bool) -> Ordering {
    let ordering = match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        _ => Ordering::Equal,
    };
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}
