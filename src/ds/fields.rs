use super::*;
use std::fmt;

/// An insertion-ordered map of `String` keys to [`Conf`] nodes.
///
/// Configuration objects remember the order their keys were declared in, and that order is
/// observable when decoding maps and when encoding records, so a sorted map will not do. `Fields`
/// is a thin vector of pairs: linear lookup, ordered iteration. Configuration objects are small
/// and read-mostly, which is the trade this representation makes.
///
/// Inserting an already-present key replaces the value _in place_, keeping the key's original
/// position.
///
/// # Example
/// ```rust
/// # use conftree::*;
/// let mut fields = Fields::new();
/// fields.insert("b".to_string(), Conf::new_num(1));
/// fields.insert("a".to_string(), Conf::new_num(2));
/// fields.insert("b".to_string(), Conf::new_num(3));
///
/// let keys: Vec<&str> = fields.keys().collect();
/// assert_eq!(keys, vec!["b", "a"]);
/// assert_eq!(fields.get("b"), Some(&Conf::new_num(3)));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Fields {
    inner: Vec<(String, Conf)>,
}

impl Fields {
    /// An empty set of fields.
    pub fn new() -> Self {
        Fields { inner: Vec::new() }
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// There are no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Insert a key-value pair. An existing key has its value replaced, keeping its position.
    /// Returns the previous value if there was one.
    pub fn insert(&mut self, key: String, value: Conf) -> Option<Conf> {
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.inner.push((key, value));
                None
            }
        }
    }

    /// Get the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Conf> {
        self.inner.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate `(key, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Conf)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Conf)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Conf)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, Conf);
    type IntoIter = std::vec::IntoIter<(String, Conf)>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_kept() {
        let fields: Fields = vec![
            ("z".to_string(), Conf::new_num(0)),
            ("a".to_string(), Conf::new_num(1)),
            ("m".to_string(), Conf::new_num(2)),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = fields.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut fields = Fields::new();
        fields.insert("one".to_string(), Conf::new_num(1));
        fields.insert("two".to_string(), Conf::new_num(2));
        let prev = fields.insert("one".to_string(), Conf::new_num(10));

        assert_eq!(prev, Some(Conf::new_num(1)));
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.keys().next(), Some("one"));
        assert_eq!(fields.get("one"), Some(&Conf::new_num(10)));
    }

    #[test]
    fn lookup_misses() {
        let fields = Fields::new();
        assert_eq!(fields.get("nothing"), None);
        assert!(!fields.contains_key("nothing"));
        assert!(fields.is_empty());
    }
}
