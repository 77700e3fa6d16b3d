use parking_lot::RwLock;

use crate::model::{decode_query_string, encode_pairs};
use crate::store::traits::History;

#[derive(Debug, Default)]
struct Location {
    path: String,
    query: Vec<(String, String)>,
    revision: u64,
}

/// In-memory location used by request handlers and tests
#[derive(Debug, Default)]
pub struct MemoryHistory {
    location: RwLock<Location>,
}

impl MemoryHistory {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            location: RwLock::new(Location {
                path: path.into(),
                ..Location::default()
            }),
        }
    }

    pub fn from_query_string(raw: &str) -> Self {
        Self {
            location: RwLock::new(Location {
                query: decode_query_string(raw),
                ..Location::default()
            }),
        }
    }

    pub fn path(&self) -> String {
        self.location.read().path.clone()
    }

    pub fn query_string(&self) -> String {
        encode_pairs(&self.location.read().query)
    }

    /// Full location, `path?query` or just `path` when the query is empty
    pub fn href(&self) -> String {
        let location = self.location.read();
        if location.query.is_empty() {
            location.path.clone()
        } else {
            format!("{}?{}", location.path, encode_pairs(&location.query))
        }
    }

    /// Number of committed replacements
    pub fn revision(&self) -> u64 {
        self.location.read().revision
    }
}

impl History for MemoryHistory {
    fn query(&self) -> Vec<(String, String)> {
        self.location.read().query.clone()
    }

    fn replace_query(&self, pairs: Vec<(String, String)>) {
        let mut location = self.location.write();
        location.query = pairs;
        location.revision += 1;
        log::debug!(
            "history replaced query on '{}' (revision {})",
            location.path,
            location.revision
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_bumps_revision_once() {
        let history = MemoryHistory::new("/admin/users");
        assert_eq!(history.revision(), 0);

        history.replace_query(vec![
            ("page".to_string(), "2".to_string()),
            ("role".to_string(), "admin".to_string()),
        ]);

        assert_eq!(history.revision(), 1);
        assert_eq!(history.href(), "/admin/users?page=2&role=admin");
    }

    #[test]
    fn test_from_query_string() {
        let history = MemoryHistory::from_query_string("?search=bob+smith&page=3");
        assert_eq!(history.query()[0], ("search".to_string(), "bob smith".to_string()));
        assert_eq!(history.query_string(), "search=bob+smith&page=3");
    }
}
