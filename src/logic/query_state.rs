use std::collections::BTreeMap;

use crate::model::{
    FilterValue, QueryDefaults, QueryParams, QueryUpdate, LIMIT_KEY, PAGE_KEY, RESERVED_KEYS,
    SEARCH_KEY, SORT_KEY,
};
use crate::store::traits::History;

/// Two-way mapping between a table view's query state and the URL.
///
/// Holds no state of its own: every read goes to the history, every write
/// is a single `replace_query`.
#[derive(Debug)]
pub struct QueryStateStore<H: History> {
    history: H,
    defaults: QueryDefaults,
}

impl<H: History> QueryStateStore<H> {
    pub fn new(history: H, defaults: QueryDefaults) -> Self {
        Self { history, defaults }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    pub fn query_params(&self) -> QueryParams {
        let pairs = self.history.query();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(existing, _)| existing == key)
                .map(|(_, value)| value.as_str())
        };

        let mut filters = BTreeMap::new();
        for (key, value) in &pairs {
            if RESERVED_KEYS.contains(&key.as_str()) || filters.contains_key(key) {
                continue;
            }
            filters.insert(key.clone(), FilterValue::coerce(value));
        }
        for (key, value) in &self.defaults.filters {
            filters
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        QueryParams {
            page: parse_positive(get(PAGE_KEY)).unwrap_or(self.defaults.page),
            limit: parse_positive(get(LIMIT_KEY)).unwrap_or(self.defaults.limit),
            filters,
            sort: get(SORT_KEY)
                .filter(|sort| !sort.is_empty())
                .map(str::to_string)
                .or_else(|| self.defaults.sort.clone()),
            search: get(SEARCH_KEY)
                .filter(|search| !search.is_empty())
                .map(str::to_string),
        }
    }

    /// Apply a batch of writes. Any batch without an explicit `page` sends
    /// the view back to page 1.
    pub fn update_query(&self, update: QueryUpdate) {
        if update.is_empty() {
            return;
        }

        let mut pairs = self.history.query();
        for (key, value) in update.entries() {
            match value {
                Some(value) if !value.is_blank() => set_pair(&mut pairs, key, value.to_string()),
                _ => pairs.retain(|(existing, _)| existing != key),
            }
        }
        if !update.contains_key(PAGE_KEY) {
            set_pair(&mut pairs, PAGE_KEY, "1".to_string());
        }

        log::debug!("query update: {:?}", pairs);
        self.history.replace_query(pairs);
    }

    /// Discard everything but the configured defaults
    pub fn reset_query(&self) {
        let mut pairs = vec![
            (PAGE_KEY.to_string(), self.defaults.page.to_string()),
            (LIMIT_KEY.to_string(), self.defaults.limit.to_string()),
        ];
        if let Some(sort) = &self.defaults.sort {
            pairs.push((SORT_KEY.to_string(), sort.clone()));
        }
        pairs.extend(
            self.defaults
                .filters
                .iter()
                .map(|(key, value)| (key.clone(), value.to_string())),
        );

        self.history.replace_query(pairs);
    }

    pub fn set_page(&self, page: u32) {
        self.update_query(QueryUpdate::new().set(PAGE_KEY, page));
    }

    pub fn set_search(&self, search: &str) {
        self.update_query(QueryUpdate::new().entry(SEARCH_KEY, non_empty(search)));
    }

    pub fn set_sort(&self, sort: &str) {
        self.update_query(QueryUpdate::new().entry(SORT_KEY, non_empty(sort)));
    }

    pub fn set_filter(&self, key: &str, value: impl Into<FilterValue>) {
        self.update_query(QueryUpdate::new().set(key, value));
    }

    pub fn remove_filter(&self, key: &str) {
        self.update_query(QueryUpdate::new().remove(key));
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

fn non_empty(value: &str) -> Option<FilterValue> {
    (!value.is_empty()).then(|| FilterValue::Text(value.to_string()))
}

/// Overwrite the first occurrence of `key` in place, drop later duplicates,
/// append when absent.
fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter().position(|(existing, _)| existing == key) {
        Some(index) => {
            pairs[index].1 = value;
            let mut seen = 0;
            pairs.retain(|(existing, _)| {
                if existing != key {
                    return true;
                }
                seen += 1;
                seen == 1
            });
        }
        None => pairs.push((key.to_string(), value)),
    }
}
