use std::collections::BTreeMap;
use std::iter::FromIterator;

/// Query-string filters of a request, e.g. `state=opened`.
///
/// Keys are unique and kept sorted, so two queries with the same pairs encode
/// to the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    /// Builder style [`Query::insert`].
    pub fn with<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, returning the previous value.
    pub fn insert<K: Into<String>, V: ToString>(&mut self, key: K, value: V) -> Option<String> {
        self.params.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes as `application/x-www-form-urlencoded`, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}

/// Returns a copy of `original` pointing at `page`, `per_page` items per page.
pub fn merge_query(original: &Query, page: u32, per_page: u32) -> Query {
    original
        .clone()
        .with("page", page)
        .with("per_page", per_page)
}
