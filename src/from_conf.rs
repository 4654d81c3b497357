//! The descriptor service: how a static type describes itself to the dispatch engine.
//!
//! The reflection a runtime-introspected implementation would use is substituted here by the
//! [`FromConf`] trait: every extractable type produces its own [`TypeDescriptor`], generic
//! arguments resolved transitively by the compiler (`Vec<Option<R>>` yields a list descriptor
//! holding an optional descriptor holding `R`'s).
//!
//! Primitives, strings, and the std containers are implemented here. Composite user types are
//! wired up with the [`conf_record!`], [`conf_enum!`], and [`conf_singleton!`] macros, which
//! generate both the descriptor and the matching [`ToConf`](crate::ToConf) encoding so that
//! encode-then-decode round-trips.

use crate::descriptor::{Classification, Mismatch, TypeDescriptor};
use crate::Conf;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// _Describe_ a type to the reader dispatch engine.
///
/// Implementations are static: `descriptor()` captures the type's classification, erased
/// identity, component descriptors, and construction contract. Prefer the macros over manual
/// implementations.
///
/// # Example
/// ```rust
/// use conftree::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// conf_record! {
///     Endpoint {
///         host: String,
///         port: u16 = 80,
///     }
/// }
///
/// let tree = Conf::new_obj(vec![("host", Conf::new_str("example.org"))]);
/// let ep: Endpoint = tree.extract().unwrap();
/// assert_eq!(ep, Endpoint { host: "example.org".to_string(), port: 80 });
/// ```
pub trait FromConf: Any + Sized {
    /// The resolved descriptor for this type.
    fn descriptor() -> TypeDescriptor;
}

// ********************* SCALARS **********************************************

macro_rules! uint_from_conf {
    ( $( $t:ty ) * ) => {
        $(
            impl FromConf for $t {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar::<$t>(Classification::Primitive, |conf| {
                        let n = conf.num().ok_or(Mismatch {
                            expected: stringify!($t),
                            found: conf.kind(),
                        })?;
                        n.as_u128()
                            .ok()
                            .and_then(|v| <$t>::try_from(v).ok())
                            .map(|v| Box::new(v) as Box<dyn Any>)
                            .ok_or(Mismatch {
                                expected: stringify!($t),
                                found: "out-of-range number",
                            })
                    })
                }
            }
        )*
    };
}

macro_rules! int_from_conf {
    ( $( $t:ty ) * ) => {
        $(
            impl FromConf for $t {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar::<$t>(Classification::Primitive, |conf| {
                        let n = conf.num().ok_or(Mismatch {
                            expected: stringify!($t),
                            found: conf.kind(),
                        })?;
                        n.as_i128()
                            .ok()
                            .and_then(|v| <$t>::try_from(v).ok())
                            .map(|v| Box::new(v) as Box<dyn Any>)
                            .ok_or(Mismatch {
                                expected: stringify!($t),
                                found: "out-of-range number",
                            })
                    })
                }
            }
        )*
    };
}

uint_from_conf!(usize u8 u16 u32 u64 u128);
int_from_conf!(isize i8 i16 i32 i64 i128);

impl FromConf for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<f64>(Classification::Primitive, |conf| {
            conf.num()
                .map(|n| Box::new(n.as_f64()) as Box<dyn Any>)
                .ok_or(Mismatch {
                    expected: "f64",
                    found: conf.kind(),
                })
        })
    }
}

impl FromConf for f32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<f32>(Classification::Primitive, |conf| {
            conf.num()
                .map(|n| Box::new(n.as_f64() as f32) as Box<dyn Any>)
                .ok_or(Mismatch {
                    expected: "f32",
                    found: conf.kind(),
                })
        })
    }
}

impl FromConf for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<bool>(Classification::Primitive, |conf| {
            conf.bool()
                .map(|b| Box::new(b) as Box<dyn Any>)
                .ok_or(Mismatch {
                    expected: "boolean",
                    found: conf.kind(),
                })
        })
    }
}

impl FromConf for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar::<String>(Classification::Str, |conf| {
            conf.str()
                .map(|s| Box::new(s.to_string()) as Box<dyn Any>)
                .ok_or(Mismatch {
                    expected: "string",
                    found: conf.kind(),
                })
        })
    }
}

// ********************* CONTAINERS *******************************************

impl<T: FromConf> FromConf for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list::<Vec<T>>(T::descriptor(), |elems| {
            let mut v = Vec::with_capacity(elems.len());
            for e in elems {
                v.push(*e.downcast::<T>().ok()?);
            }
            Some(Box::new(v))
        })
    }
}

impl<T: FromConf + Eq + Hash> FromConf for HashSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set::<HashSet<T>>(T::descriptor(), |elems| {
            let mut set = HashSet::with_capacity(elems.len());
            for e in elems {
                set.insert(*e.downcast::<T>().ok()?);
            }
            Some(Box::new(set))
        })
    }
}

impl<T: FromConf + Ord> FromConf for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set::<BTreeSet<T>>(T::descriptor(), |elems| {
            let mut set = BTreeSet::new();
            for e in elems {
                set.insert(*e.downcast::<T>().ok()?);
            }
            Some(Box::new(set))
        })
    }
}

impl<T: FromConf> FromConf for HashMap<String, T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map::<HashMap<String, T>>(T::descriptor(), |entries| {
            let mut map = HashMap::with_capacity(entries.len());
            for (k, v) in entries {
                map.insert(k, *v.downcast::<T>().ok()?);
            }
            Some(Box::new(map))
        })
    }
}

impl<T: FromConf> FromConf for BTreeMap<String, T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map::<BTreeMap<String, T>>(T::descriptor(), |entries| {
            let mut map = BTreeMap::new();
            for (k, v) in entries {
                map.insert(k, *v.downcast::<T>().ok()?);
            }
            Some(Box::new(map))
        })
    }
}

impl<T: FromConf> FromConf for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional::<Option<T>>(T::descriptor(), |inner| match inner {
            None => Some(Box::new(Option::<T>::None)),
            Some(v) => v
                .downcast::<T>()
                .ok()
                .map(|b| Box::new(Some(*b)) as Box<dyn Any>),
        })
    }
}

/// The escape hatch: extract the subtree itself, untyped.
impl FromConf for Conf {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::raw_tree::<Conf>()
    }
}

// ********************* COMPOSITE TYPE MACROS ********************************

/// Implement [`FromConf`] and [`ToConf`](crate::ToConf) for a struct with named fields.
///
/// Field order in the invocation is the constructor-argument order. A field may carry a default
/// expression, substituted when the field's path is absent from the tree. Fields of `Option`
/// type decode absent paths to `None` and are omitted when encoding `None`.
///
/// # Example
/// ```rust
/// use conftree::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Retry {
///     attempts: u32,
///     backoff: f64,
/// }
///
/// conf_record! {
///     Retry {
///         attempts: u32,
///         backoff: f64 = 1.5,
///     }
/// }
///
/// let tree = Conf::new_obj(vec![("attempts", Conf::new_num(3))]);
/// assert_eq!(tree.extract::<Retry>().unwrap(), Retry { attempts: 3, backoff: 1.5 });
/// ```
#[macro_export]
macro_rules! conf_record {
    ($ty:ident { $( $field:ident : $fty:ty $(= $default:expr)? ),* $(,)? }) => {
        impl $crate::FromConf for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::record::<$ty>(
                    vec![ $( $crate::conf_record!(@field $field : $fty $(= $default)?) ),* ],
                    |parts| {
                        #[allow(unused_mut, unused_variables)]
                        let mut parts = parts.into_iter();
                        Some(Box::new($ty {
                            $( $field: *parts.next()?.downcast::<$fty>().ok()?, )*
                        }) as Box<dyn ::std::any::Any>)
                    },
                )
            }
        }
        impl $crate::ToConf for $ty {
            fn into_conf(self) -> Result<$crate::Conf, $crate::Error> {
                #[allow(unused_mut)]
                let mut fields = $crate::Fields::new();
                $(
                    if !$crate::ToConf::is_absent(&self.$field) {
                        fields.insert(
                            stringify!($field).to_string(),
                            $crate::ToConf::into_conf(self.$field)?,
                        );
                    }
                )*
                Ok($crate::Conf::Obj(fields))
            }
        }
    };
    (@field $field:ident : $fty:ty) => {
        $crate::FieldSpec::required::<$fty>(stringify!($field))
    };
    (@field $field:ident : $fty:ty = $default:expr) => {
        $crate::FieldSpec::with_default::<$fty>(stringify!($field), || {
            let value: $fty = $default;
            Box::new(value)
        })
    };
}

/// Implement [`FromConf`] and [`ToConf`](crate::ToConf) for an enum of unit variants.
///
/// A string leaf is matched case-sensitively against the variant identifiers; anything else
/// fails with [`Error::InvalidEnumValue`](crate::Error::InvalidEnumValue) naming the allowed
/// constants. Encoding produces the constant name, not an ordinal.
///
/// # Example
/// ```rust
/// use conftree::*;
///
/// #[derive(Debug, PartialEq)]
/// enum Level { Debug, Info, Warn }
///
/// conf_enum! { Level { Debug, Info, Warn } }
///
/// let tree = Conf::new_obj(vec![("level", Conf::new_str("Info"))]);
/// assert_eq!(tree.extract_at::<Level>("level").unwrap(), Level::Info);
/// ```
#[macro_export]
macro_rules! conf_enum {
    ($ty:ident { $( $variant:ident ),* $(,)? }) => {
        impl $crate::FromConf for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::enumeration::<$ty>(
                    &[ $( stringify!($variant) ),* ],
                    |name| match name {
                        $(
                            stringify!($variant) => {
                                Some(Box::new($ty::$variant) as Box<dyn ::std::any::Any>)
                            }
                        )*
                        _ => None,
                    },
                )
            }
        }
        impl $crate::ToConf for $ty {
            fn into_conf(self) -> Result<$crate::Conf, $crate::Error> {
                let name = match self {
                    $( $ty::$variant => stringify!($variant), )*
                };
                Ok($crate::Conf::Str(name.to_string()))
            }
        }
    };
}

/// Implement [`FromConf`] and [`ToConf`](crate::ToConf) for a fieldless unit struct.
///
/// Decoding ignores the tree entirely and yields the instance; encoding produces an empty
/// object.
///
/// # Example
/// ```rust
/// use conftree::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Enabled;
///
/// conf_singleton!(Enabled);
///
/// let tree = Conf::new_obj(Vec::<(&str, Conf)>::new());
/// assert_eq!(tree.extract::<Enabled>().unwrap(), Enabled);
/// ```
#[macro_export]
macro_rules! conf_singleton {
    ($ty:ident) => {
        impl $crate::FromConf for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::singleton::<$ty>(|| {
                    Box::new($ty) as Box<dyn ::std::any::Any>
                })
            }
        }
        impl $crate::ToConf for $ty {
            fn into_conf(self) -> Result<$crate::Conf, $crate::Error> {
                Ok($crate::Conf::Obj($crate::Fields::new()))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: i64,
        right: String,
    }

    conf_record! {
        Pair {
            left: i64,
            right: String = "dee".to_string(),
        }
    }

    #[derive(Debug, PartialEq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    conf_enum! { Color { Red, Green, Blue } }

    #[test]
    fn record_descriptor_shape() {
        let d = Pair::descriptor();
        assert_eq!(d.classification(), Classification::Record);
        assert_eq!(d.args().len(), 0);
        assert_eq!(d.raw(), crate::RawId::of::<Pair>());
    }

    #[test]
    fn enum_descriptor_shape() {
        let d = Color::descriptor();
        assert_eq!(d.classification(), Classification::Enum);
        assert_eq!(d.args().len(), 0);
    }

    #[test]
    fn container_descriptors() {
        assert_eq!(
            Vec::<Pair>::descriptor().args()[0],
            Pair::descriptor(),
            "element descriptor is the record's"
        );
        assert_eq!(
            Option::<bool>::descriptor().classification(),
            Classification::Optional
        );
        assert_eq!(
            HashSet::<i64>::descriptor().classification(),
            Classification::Set
        );
        assert_eq!(Conf::descriptor().classification(), Classification::RawTree);
    }
}
