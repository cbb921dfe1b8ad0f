/// Ordered query parameters that only ever hold values the caller set
///
/// Empty strings, `None` and zero are skipped at insertion, so an unset
/// filter never shows up in the encoded query string as `key=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string parameter unless it is empty
    pub fn push_str(&mut self, key: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Add an optional string parameter unless it is absent or empty
    pub fn push_opt(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.push_str(key, value);
        }
        self
    }

    /// Add a numeric parameter unless it is zero
    pub fn push_nonzero(&mut self, key: &'static str, value: u64) -> &mut Self {
        if value != 0 {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, String)> {
        self.pairs.iter()
    }
}
