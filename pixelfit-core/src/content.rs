use std::fmt;

/// Ordered key/value view of a viewport meta content string.
///
/// The content attribute is a comma separated list of `key=value` pairs.
/// Whitespace is ignored wherever it appears, a segment without a `=` is
/// kept as a valueless entry so its position survives rewrites, and a later
/// duplicate key overwrites the earlier value without moving the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportProperties {
    entries: Vec<(String, Option<String>)>,
}

impl ViewportProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a content attribute value. Parsing never fails: empty
    /// segments are dropped and malformed ones read as valueless.
    pub fn parse(content: &str) -> Self {
        let mut props = Self::new();
        for segment in content.split(',') {
            let segment: String = segment.chars().filter(|c| !c.is_whitespace()).collect();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((key, value)) => props.insert(key, Some(value.to_owned())),
                None => props.insert(&segment, None),
            }
        }
        props
    }

    /// Looks up a value. Valueless entries read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.insert(key, Some(value.to_owned()));
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(name, _)| name != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    fn insert(&mut self, key: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|(name, _)| name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_owned(), value)),
        }
    }
}

/// Serializes back to `key=value` pairs joined by `", "`. Valueless
/// entries are skipped.
impl fmt::Display for ViewportProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.entries {
            let Some(value) = value else { continue };
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}
