use crate::descriptor::{Classification, Detail, TypeDescriptor};
use crate::ds::join_path;
use crate::{Conf, Error};
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// The outcome of applying a decoder: a value, or a well-defined absence.
///
/// Absence is distinct from "the value is `None`" and distinct from an error: it signals "no
/// node at this path" and is a legal terminal outcome only for optional decoders and root
/// extraction. Every other context converts it into a
/// [`MissingField`](Error::MissingField)/[`BadPath`](Error::BadPath) failure — absence never
/// silently becomes a default zero-value.
pub enum Decoded {
    /// A decoded value, boxed as the requested type.
    Value(Box<dyn Any>),
    /// The path does not exist in the tree.
    Absent,
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Decoded::Value(_) => write!(f, "Value(..)"),
            Decoded::Absent => write!(f, "Absent"),
        }
    }
}

/// A concrete decoding function: `(tree, path) -> value | absent | failure`.
pub type Decoder = Box<dyn Fn(&Conf, &str) -> Result<Decoded, Error> + Send + Sync>;

/// Builds a [`Decoder`] for a descriptor, resolving component decoders through the registry.
pub type DecoderBuilder =
    Box<dyn Fn(&TypeDescriptor, &Registry) -> Result<Decoder, Error> + Send + Sync>;

/// The reader registry: classification-keyed (and identity-keyed) decoder builders.
///
/// [`Registry::default`] carries a builder for every built-in [`Classification`]. Additional
/// builders can be registered for a concrete type ([`register_for`](Registry::register_for)) or
/// a classification ([`register_class`](Registry::register_class)) during an initialization
/// phase; lookups afterwards are read-only and safe to share across threads.
///
/// Resolution order for a descriptor:
/// 1. the descriptor's argument count is checked against its classification's arity
///    ([`Error::UnresolvableType`] on mismatch);
/// 2. an exact match on the raw type identity;
/// 3. a match on the classification alone;
/// 4. otherwise [`Error::UnsupportedType`].
///
/// # Example
/// Overriding decoding for one concrete type while everything else keeps the built-ins:
/// ```rust
/// # use conftree::*;
/// let mut registry = Registry::default();
/// registry.register_for::<u16>(Box::new(|_, _| {
///     Ok(Box::new(|_: &Conf, _: &str| Ok(Decoded::Value(Box::new(7u16)))) as Decoder)
/// }));
///
/// let tree = Conf::new_obj(vec![("port", Conf::new_num(8080))]);
/// assert_eq!(tree.extract_with::<u16>(&registry, "port").unwrap(), 7);
/// assert_eq!(tree.extract_with::<u32>(&registry, "port").unwrap(), 8080);
/// ```
pub struct Registry {
    by_id: HashMap<TypeId, DecoderBuilder>,
    by_class: HashMap<Classification, DecoderBuilder>,
}

static GLOBAL: OnceCell<Registry> = OnceCell::new();

impl Registry {
    /// An empty registry with no builders at all. Useful only as a base for fully custom
    /// dispatch; prefer [`Registry::default`].
    pub fn empty() -> Self {
        Registry {
            by_id: HashMap::new(),
            by_class: HashMap::new(),
        }
    }

    /// The process-wide registry used by [`Conf::extract`](Conf::extract) and
    /// [`Conf::extract_at`](Conf::extract_at). Lazily initialized to [`Registry::default`] on
    /// first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::default)
    }

    /// Install a customized registry as the process-wide one.
    ///
    /// Must happen before the first [`Registry::global`] access; the registry is handed back in
    /// `Err` if the global was already initialized. Installing after concurrent extraction has
    /// begun is unsupported — call this during process start-up.
    pub fn install(registry: Registry) -> Result<(), Registry> {
        GLOBAL.set(registry)
    }

    /// Register a builder for the concrete type `T`, taking precedence over the
    /// classification-level builders.
    pub fn register_for<T: Any>(&mut self, builder: DecoderBuilder) {
        self.by_id.insert(TypeId::of::<T>(), builder);
    }

    /// Register a builder for a whole classification.
    pub fn register_class(&mut self, classification: Classification, builder: DecoderBuilder) {
        self.by_class.insert(classification, builder);
    }

    /// Resolve the decoder for `desc`.
    ///
    /// Resolution is pure: equal descriptors resolve to behaviorally identical decoders.
    pub fn resolve(&self, desc: &TypeDescriptor) -> Result<Decoder, Error> {
        if desc.args().len() != desc.classification().arity() {
            return Err(Error::UnresolvableType(desc.raw().name()));
        }
        if let Some(builder) = self.by_id.get(&desc.raw().type_id()) {
            return builder(desc, self);
        }
        if let Some(builder) = self.by_class.get(&desc.classification()) {
            return builder(desc, self);
        }
        Err(Error::UnsupportedType(desc.raw().name()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Registry::empty();
        registry.register_class(Classification::Primitive, Box::new(scalar_builder));
        registry.register_class(Classification::Str, Box::new(scalar_builder));
        registry.register_class(Classification::Enum, Box::new(enum_builder));
        registry.register_class(Classification::List, Box::new(seq_builder));
        registry.register_class(Classification::Set, Box::new(seq_builder));
        registry.register_class(Classification::Map, Box::new(map_builder));
        registry.register_class(Classification::Optional, Box::new(optional_builder));
        registry.register_class(Classification::Record, Box::new(record_builder));
        registry.register_class(Classification::Singleton, Box::new(singleton_builder));
        registry.register_class(Classification::RawTree, Box::new(raw_tree_builder));
        registry
    }
}

// ********************* BUILT-IN BUILDERS ************************************

fn detail_mismatch(desc: &TypeDescriptor) -> Error {
    Error::UnsupportedType(desc.raw().name())
}

fn scalar_builder(desc: &TypeDescriptor, _: &Registry) -> Result<Decoder, Error> {
    let from_scalar = match desc.detail() {
        Detail::Scalar { from_scalar } => *from_scalar,
        _ => return Err(detail_mismatch(desc)),
    };
    Ok(Box::new(move |conf, path| match conf.at(path) {
        None => Ok(Decoded::Absent),
        Some(node) => from_scalar(node).map(Decoded::Value).map_err(|m| {
            Error::WrongType {
                path: path.to_string(),
                expected: m.expected,
                found: m.found,
            }
        }),
    }))
}

fn enum_builder(desc: &TypeDescriptor, _: &Registry) -> Result<Decoder, Error> {
    let (constants, select) = match desc.detail() {
        Detail::Enum { constants, select } => (*constants, *select),
        _ => return Err(detail_mismatch(desc)),
    };
    Ok(Box::new(move |conf, path| {
        let node = match conf.at(path) {
            None => return Ok(Decoded::Absent),
            Some(node) => node,
        };
        let name = node.str().ok_or_else(|| Error::WrongType {
            path: path.to_string(),
            expected: "string",
            found: node.kind(),
        })?;
        match select(name) {
            Some(value) => Ok(Decoded::Value(value)),
            None => Err(Error::InvalidEnumValue {
                value: name.to_string(),
                allowed: constants,
            }),
        }
    }))
}

// Lists and sets share a builder: both walk the native list children in index order and invoke
// the element decoder directly against each child node. An element yielding absence is a
// structural error, since list children are positional, not path-addressed.
fn seq_builder(desc: &TypeDescriptor, registry: &Registry) -> Result<Decoder, Error> {
    let collect = match desc.detail() {
        Detail::Seq { collect } => *collect,
        _ => return Err(detail_mismatch(desc)),
    };
    let elem = registry.resolve(&desc.args()[0])?;
    Ok(Box::new(move |conf, path| {
        let node = match conf.at(path) {
            None => return Ok(Decoded::Absent),
            Some(node) => node,
        };
        let children = node.list().ok_or_else(|| Error::WrongType {
            path: path.to_string(),
            expected: "list",
            found: node.kind(),
        })?;
        let mut parts = Vec::with_capacity(children.len());
        for child in children {
            match elem(child, "")? {
                Decoded::Value(v) => parts.push(v),
                Decoded::Absent => return Err(Error::BadPath(path.to_string())),
            }
        }
        collect(parts)
            .map(Decoded::Value)
            .ok_or_else(|| Error::BadPath(path.to_string()))
    }))
}

// Keys are used verbatim as the map's `String` keys and the value decoder runs directly against
// each entry's node, so keys containing path separators still round-trip.
fn map_builder(desc: &TypeDescriptor, registry: &Registry) -> Result<Decoder, Error> {
    let collect = match desc.detail() {
        Detail::Map { collect } => *collect,
        _ => return Err(detail_mismatch(desc)),
    };
    let value = registry.resolve(&desc.args()[1])?;
    Ok(Box::new(move |conf, path| {
        let node = match conf.at(path) {
            None => return Ok(Decoded::Absent),
            Some(node) => node,
        };
        let fields = node.obj().ok_or_else(|| Error::WrongType {
            path: path.to_string(),
            expected: "object",
            found: node.kind(),
        })?;
        let mut entries = Vec::with_capacity(fields.len());
        for (key, child) in fields.iter() {
            match value(child, "")? {
                Decoded::Value(v) => entries.push((key.to_string(), v)),
                Decoded::Absent => return Err(Error::BadPath(join_path(path, key))),
            }
        }
        collect(entries)
            .map(Decoded::Value)
            .ok_or_else(|| Error::BadPath(path.to_string()))
    }))
}

// The one classification where "path absent" is the intended value, not an error.
fn optional_builder(desc: &TypeDescriptor, registry: &Registry) -> Result<Decoder, Error> {
    let wrap = match desc.detail() {
        Detail::Optional { wrap } => *wrap,
        _ => return Err(detail_mismatch(desc)),
    };
    let inner = registry.resolve(&desc.args()[0])?;
    Ok(Box::new(move |conf, path| {
        let decoded = if conf.exists(path) {
            match inner(conf, path)? {
                Decoded::Value(v) => Some(v),
                Decoded::Absent => None,
            }
        } else {
            None
        };
        wrap(decoded)
            .map(Decoded::Value)
            .ok_or_else(|| Error::BadPath(path.to_string()))
    }))
}

fn record_builder(desc: &TypeDescriptor, registry: &Registry) -> Result<Decoder, Error> {
    let (fields, construct) = match desc.detail() {
        Detail::Record { fields, construct } => (fields, *construct),
        _ => return Err(detail_mismatch(desc)),
    };
    let mut field_decoders = Vec::with_capacity(fields.len());
    for field in fields {
        field_decoders.push((
            field.name,
            registry.resolve(&field.ty)?,
            field.default,
        ));
    }
    Ok(Box::new(move |conf, path| {
        let node = match conf.at(path) {
            None => return Ok(Decoded::Absent),
            Some(node) => node,
        };
        if node.obj().is_none() {
            return Err(Error::WrongType {
                path: path.to_string(),
                expected: "object",
                found: node.kind(),
            });
        }
        let mut parts = Vec::with_capacity(field_decoders.len());
        for (name, decoder, default) in &field_decoders {
            let field_path = join_path(path, name);
            match decoder(conf, &field_path)? {
                Decoded::Value(v) => parts.push(v),
                Decoded::Absent => match default {
                    Some(default) => parts.push(default()),
                    None => return Err(Error::MissingField(field_path)),
                },
            }
        }
        construct(parts)
            .map(Decoded::Value)
            .ok_or_else(|| Error::BadPath(path.to_string()))
    }))
}

// A record with no fields needs no leaves: the tree is ignored entirely.
fn singleton_builder(desc: &TypeDescriptor, _: &Registry) -> Result<Decoder, Error> {
    let instance = match desc.detail() {
        Detail::Singleton { instance } => *instance,
        _ => return Err(detail_mismatch(desc)),
    };
    Ok(Box::new(move |_, _| Ok(Decoded::Value(instance()))))
}

fn raw_tree_builder(desc: &TypeDescriptor, _: &Registry) -> Result<Decoder, Error> {
    match desc.detail() {
        Detail::RawTree => {}
        _ => return Err(detail_mismatch(desc)),
    }
    Ok(Box::new(|conf, path| match conf.at(path) {
        None => Ok(Decoded::Absent),
        Some(node) => Ok(Decoded::Value(Box::new(node.clone()))),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FromConf;

    fn sample() -> Conf {
        Conf::new_obj(vec![
            ("n", Conf::new_num(42)),
            ("s", Conf::new_str("word")),
        ])
    }

    #[test]
    fn identity_beats_classification() {
        let mut registry = Registry::default();
        registry.register_for::<i64>(Box::new(|_, _| {
            Ok(Box::new(|_: &Conf, _: &str| Ok(Decoded::Value(Box::new(-1i64)))) as Decoder)
        }));

        let tree = sample();
        let decoder = registry.resolve(&i64::descriptor()).unwrap();
        match decoder(&tree, "n").unwrap() {
            Decoded::Value(v) => assert_eq!(*v.downcast::<i64>().unwrap(), -1),
            Decoded::Absent => panic!("expected a value"),
        }
        // u64 still goes through the classification builder
        let decoder = registry.resolve(&u64::descriptor()).unwrap();
        match decoder(&tree, "n").unwrap() {
            Decoded::Value(v) => assert_eq!(*v.downcast::<u64>().unwrap(), 42),
            Decoded::Absent => panic!("expected a value"),
        }
    }

    #[test]
    fn no_builder_is_unsupported() {
        let registry = Registry::empty();
        assert_eq!(
            registry.resolve(&i64::descriptor()).err(),
            Some(Error::UnsupportedType(std::any::type_name::<i64>()))
        );
    }

    #[test]
    fn malformed_descriptor_is_unresolvable() {
        let registry = Registry::default();
        let desc = TypeDescriptor::malformed_for_test::<Vec<i64>>(Classification::List);
        assert_eq!(
            registry.resolve(&desc).err(),
            Some(Error::UnresolvableType(std::any::type_name::<Vec<i64>>()))
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = Registry::default();
        let tree = sample();
        let a = registry.resolve(&String::descriptor()).unwrap();
        let b = registry.resolve(&String::descriptor()).unwrap();
        let ra = match a(&tree, "s").unwrap() {
            Decoded::Value(v) => *v.downcast::<String>().unwrap(),
            Decoded::Absent => panic!(),
        };
        let rb = match b(&tree, "s").unwrap() {
            Decoded::Value(v) => *v.downcast::<String>().unwrap(),
            Decoded::Absent => panic!(),
        };
        assert_eq!(ra, rb);
    }

    #[test]
    fn absent_scalar_propagates_absence() {
        let registry = Registry::default();
        let tree = sample();
        let decoder = registry.resolve(&i64::descriptor()).unwrap();
        assert!(matches!(decoder(&tree, "missing").unwrap(), Decoded::Absent));
    }
}
