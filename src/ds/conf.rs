use super::*;
use std::fmt;

/// A configuration tree node.
///
/// `Conf` is an immutable-by-convention hierarchical document: a node is either a scalar
/// (boolean, [`Number`], string), a list of nodes, or an object — an ordered mapping of `String`
/// keys to nodes backed by [`Fields`].
///
/// Nodes are addressed with dot-separated paths (`"server.port"`). The empty path addresses the
/// node itself. Only objects can be descended into; a path segment applied to a scalar or list
/// resolves to nothing.
///
/// # Examples
/// Use the constructors to build trees, and the accessor methods to read leaves without pattern
/// matching.
/// ```rust
/// # use conftree::*;
/// let tree = Conf::new_obj(vec![
///     ("server", Conf::new_obj(vec![
///         ("port", Conf::new_num(8080)),
///         ("host", Conf::new_str("localhost")),
///     ])),
/// ]);
///
/// assert_eq!(tree.exists("server.port"), true);
/// assert_eq!(tree.at("server.port").and_then(Conf::int), Some(8080));
/// assert_eq!(tree.at("server.host").and_then(Conf::str), Some("localhost"));
/// assert_eq!(tree.exists("server.scheme"), false);
/// ```
#[derive(Clone, PartialEq)]
pub enum Conf {
    /// A boolean leaf.
    Bool(bool),
    /// A numerical leaf. See [`Number`].
    Num(Number),
    /// A string leaf.
    Str(String),
    /// A list of nodes.
    List(Vec<Conf>),
    /// An object: ordered `String` keyed nodes. See [`Fields`].
    Obj(Fields),
}

/// Constructors.
impl Conf {
    /// A new boolean leaf.
    pub fn new_bool(value: bool) -> Self {
        Conf::Bool(value)
    }

    /// A new numerical leaf. [`Number`] implements `From` for all Rust primitive numbers so
    /// literals can be used.
    ///
    /// # Example
    /// ```rust
    /// # use conftree::*;
    /// let conf = Conf::new_num(123456);
    /// assert_eq!(conf.uint(), Some(123456));
    /// let conf = Conf::new_num(3.14);
    /// assert_eq!(conf.float(), Some(3.14));
    /// ```
    pub fn new_num<T: Into<Number>>(value: T) -> Self {
        Conf::Num(value.into())
    }

    /// A new string leaf, copying the borrowed string.
    pub fn new_str(string: &str) -> Self {
        Conf::Str(string.to_string())
    }

    /// A new string leaf, taking ownership.
    pub fn new_string(string: String) -> Self {
        Conf::Str(string)
    }

    /// A new list node.
    pub fn new_list<I: IntoIterator<Item = Conf>>(iter: I) -> Self {
        Conf::List(iter.into_iter().collect())
    }

    /// A new object node from key-value pairs, keeping declaration order.
    ///
    /// # Example
    /// ```rust
    /// # use conftree::*;
    /// let conf = Conf::new_obj(vec![("a", Conf::new_num(0)), ("b", Conf::new_num(1))]);
    /// let keys: Vec<&str> = conf.obj().unwrap().keys().collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn new_obj<I, S>(iter: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Conf)>,
    {
        Conf::Obj(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Leaf and node accessors.
impl Conf {
    /// The boolean value, if a boolean leaf.
    pub fn bool(&self) -> Option<bool> {
        match self {
            Conf::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numerical value, if a numerical leaf.
    pub fn num(&self) -> Option<Number> {
        match self {
            Conf::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as an unsigned integer, if a numerical leaf in range.
    pub fn uint(&self) -> Option<u128> {
        self.num().and_then(|n| n.as_u128().ok())
    }

    /// The value as a signed integer, if a numerical leaf in range.
    pub fn int(&self) -> Option<i128> {
        self.num().and_then(|n| n.as_i128().ok())
    }

    /// The value as a float, if a numerical leaf.
    pub fn float(&self) -> Option<f64> {
        self.num().map(|n| n.as_f64())
    }

    /// The string value, if a string leaf.
    pub fn str(&self) -> Option<&str> {
        match self {
            Conf::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The child nodes, if a list.
    pub fn list(&self) -> Option<&[Conf]> {
        match self {
            Conf::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// The fields, if an object.
    pub fn obj(&self) -> Option<&Fields> {
        match self {
            Conf::Obj(f) => Some(f),
            _ => None,
        }
    }

    /// The name of this node's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Conf::Bool(_) => "boolean",
            Conf::Num(_) => "number",
            Conf::Str(_) => "string",
            Conf::List(_) => "list",
            Conf::Obj(_) => "object",
        }
    }
}

/// The path-addressed store surface.
impl Conf {
    /// The node at a dot-separated `path`. The empty path is the node itself.
    ///
    /// # Example
    /// ```rust
    /// # use conftree::*;
    /// let tree = Conf::new_obj(vec![("a", Conf::new_obj(vec![("b", Conf::new_num(1))]))]);
    /// assert_eq!(tree.at("a.b"), Some(&Conf::new_num(1)));
    /// assert_eq!(tree.at(""), Some(&tree));
    /// assert_eq!(tree.at("a.c"), None);
    /// ```
    pub fn at(&self, path: &str) -> Option<&Conf> {
        if path.is_empty() {
            return Some(self);
        }
        let mut node = self;
        for segment in path.split('.') {
            node = node.obj()?.get(segment)?;
        }
        Some(node)
    }

    /// A node exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.at(path).is_some()
    }

    /// The ordered key set of the object at `path`.
    pub fn keys_at(&self, path: &str) -> Option<Vec<&str>> {
        self.at(path).and_then(Conf::obj).map(|f| f.keys().collect())
    }

    /// The child nodes of the list at `path`.
    pub fn list_at(&self, path: &str) -> Option<&[Conf]> {
        self.at(path).and_then(Conf::list)
    }
}

impl fmt::Debug for Conf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Conf::Bool(b) => write!(f, "Bool({:?})", b),
            Conf::Num(n) => write!(f, "Num({})", n),
            Conf::Str(s) => write!(f, "Str({:?})", s),
            Conf::List(v) => f.debug_list().entries(v.iter()).finish(),
            Conf::Obj(fields) => fmt::Debug::fmt(fields, f),
        }
    }
}

/// Join a parent path and a child segment, eliding the dot at the root.
pub(crate) fn join_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        let mut joined = String::with_capacity(path.len() + 1 + segment.len());
        joined.push_str(path);
        joined.push('.');
        joined.push_str(segment);
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Conf {
        Conf::new_obj(vec![
            ("flag", Conf::new_bool(true)),
            (
                "nested",
                Conf::new_obj(vec![
                    ("word", Conf::new_str("hi")),
                    ("xs", Conf::new_list(vec![Conf::new_num(1), Conf::new_num(2)])),
                ]),
            ),
        ])
    }

    #[test]
    fn path_traversal() {
        let tree = sample();
        assert_eq!(tree.at("flag").and_then(Conf::bool), Some(true));
        assert_eq!(tree.at("nested.word").and_then(Conf::str), Some("hi"));
        assert_eq!(tree.at("nested.missing"), None);
        assert_eq!(tree.at("flag.into"), None); // scalars cannot be descended into
        assert!(tree.exists("nested.xs"));
        assert!(!tree.exists("nested.xs.0")); // lists are not path addressed
    }

    #[test]
    fn empty_path_is_the_node() {
        let tree = sample();
        assert_eq!(tree.at(""), Some(&tree));
        assert!(tree.exists(""));
    }

    #[test]
    fn keys_and_lists() {
        let tree = sample();
        assert_eq!(tree.keys_at("nested"), Some(vec!["word", "xs"]));
        assert_eq!(tree.keys_at("flag"), None);
        assert_eq!(
            tree.list_at("nested.xs"),
            Some([Conf::new_num(1), Conf::new_num(2)].as_ref())
        );
    }

    #[test]
    fn join_path_elides_root_dot() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "b"), "a.b");
    }
}
