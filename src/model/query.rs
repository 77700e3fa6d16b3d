use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";
pub const SEARCH_KEY: &str = "search";
pub const SORT_KEY: &str = "sort";

/// Keys with a dedicated meaning; everything else is a filter
pub const RESERVED_KEYS: [&str; 4] = [PAGE_KEY, LIMIT_KEY, SEARCH_KEY, SORT_KEY];

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Value of a table filter as read back from the URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Turn a raw query string value into its natural type.
    ///
    /// `"true"`/`"false"` become booleans, anything that fully parses as a
    /// finite number becomes a number, the rest stays text.
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return FilterValue::Bool(true),
            "false" => return FilterValue::Bool(false),
            _ => {}
        }

        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            if let Ok(number) = trimmed.parse::<f64>() {
                if number.is_finite() {
                    return FilterValue::Number(number);
                }
            }
        }

        FilterValue::Text(raw.to_string())
    }

    /// Empty text is treated as "no value" by writers
    pub fn is_blank(&self) -> bool {
        matches!(self, FilterValue::Text(text) if text.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(value) => write!(f, "{}", value),
            FilterValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            FilterValue::Number(value) => write!(f, "{}", value),
            FilterValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(f64::from(value))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

/// Defaults a table view falls back to when the URL omits a key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    pub page: u32,
    pub limit: u32,
    pub sort: Option<String>,
    pub filters: BTreeMap<String, FilterValue>,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: None,
            filters: BTreeMap::new(),
        }
    }
}

impl QueryDefaults {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Logical pagination/search/sort/filter state of one table view.
///
/// Field order is the canonical encoding order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParams {
    pub page: u32,
    pub limit: u32,
    #[serde(flatten)]
    pub filters: BTreeMap<String, FilterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl QueryParams {
    pub fn filter(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    /// Zero-based offset of the first row on the current page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (PAGE_KEY.to_string(), self.page.to_string()),
            (LIMIT_KEY.to_string(), self.limit.to_string()),
        ];
        pairs.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.clone(), value.to_string())),
        );
        if let Some(sort) = &self.sort {
            pairs.push((SORT_KEY.to_string(), sort.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push((SEARCH_KEY.to_string(), search.clone()));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_pairs())
    }
}

/// A batch of URL writes applied together. `None` removes the key.
///
/// Serialized as a JSON object; entries keep the order they were written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryUpdate {
    entries: Vec<(String, Option<FilterValue>)>,
}

impl QueryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.entries.push((key.into(), Some(value.into())));
        self
    }

    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.entries.push((key.into(), None));
        self
    }

    pub fn entry(mut self, key: impl Into<String>, value: Option<FilterValue>) -> Self {
        self.entries.push((key.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    pub fn entries(&self) -> &[(String, Option<FilterValue>)] {
        &self.entries
    }
}

impl FromIterator<(String, Option<FilterValue>)> for QueryUpdate {
    fn from_iter<I: IntoIterator<Item = (String, Option<FilterValue>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for QueryUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct QueryUpdateVisitor;

impl<'de> Visitor<'de> for QueryUpdateVisitor {
    type Value = QueryUpdate;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of query keys to values or null")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Option<FilterValue>>()? {
            entries.push((key, value));
        }
        Ok(QueryUpdate { entries })
    }
}

impl<'de> Deserialize<'de> for QueryUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(QueryUpdateVisitor)
    }
}

/// Decode a raw query string, tolerating a leading `?` and malformed input
pub fn decode_query_string(raw: &str) -> Vec<(String, String)> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    serde_urlencoded::from_str::<Vec<(String, String)>>(raw).unwrap_or_default()
}

pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}
