//! Type descriptors: the resolved, generics-aware description of a target type consumed by the
//! reader dispatch engine.

use crate::{Conf, FromConf};
use std::any::{Any, TypeId};
use std::fmt;

/// The shape category of a type, driving decoder selection.
///
/// Classification alone is not enough to pick element or field decoders — a `Vec<i64>` and a
/// `Vec<Foo>` dispatch the same outer decoder but need different inner ones — which is why a
/// [`TypeDescriptor`] also carries component descriptors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Booleans and numbers.
    Primitive,
    /// Strings.
    Str,
    /// A closed set of named constants.
    Enum,
    /// A homogeneous ordered sequence.
    List,
    /// A homogeneous collection where equality, not order, defines membership.
    Set,
    /// A `String` keyed homogeneous mapping.
    Map,
    /// A value that may legitimately be missing from the tree.
    Optional,
    /// A composite with a fixed, named, ordered set of typed fields.
    Record,
    /// A named fieldless instance, decoded with no leaves required.
    Singleton,
    /// The escape hatch: the subtree itself, untyped.
    RawTree,
}

impl Classification {
    /// The number of component descriptors this classification requires.
    pub(crate) fn arity(self) -> usize {
        match self {
            Classification::List
            | Classification::Set
            | Classification::Optional => 1,
            Classification::Map => 2,
            _ => 0,
        }
    }
}

/// The erased identity of a type: its `TypeId` plus a human-readable name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawId {
    type_id: TypeId,
    name: &'static str,
}

impl RawId {
    /// The identity of `T`.
    pub fn of<T: Any>() -> Self {
        RawId {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A scalar leaf did not convert: the expected/found kind pair for a
/// [`WrongType`](crate::Error::WrongType) error, minus the path which the decoder fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// The kind the conversion wanted.
    pub expected: &'static str,
    /// The kind (or range problem) it found.
    pub found: &'static str,
}

/// One field of a record: its name, component descriptor, and optional default.
pub struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) ty: TypeDescriptor,
    pub(crate) default: Option<fn() -> Box<dyn Any>>,
}

impl FieldSpec {
    /// A field with no default: absence is an error unless the field type is optional.
    pub fn required<F: FromConf>(name: &'static str) -> Self {
        FieldSpec {
            name,
            ty: F::descriptor(),
            default: None,
        }
    }

    /// A field whose absence is substituted by `default`.
    ///
    /// The produced box must hold an `F`, which the macros guarantee.
    pub fn with_default<F: FromConf>(name: &'static str, default: fn() -> Box<dyn Any>) -> Self {
        FieldSpec {
            name,
            ty: F::descriptor(),
            default: Some(default),
        }
    }
}

/// The construction contract attached to a descriptor by the descriptor service. Carries function
/// values, so it is excluded from descriptor equality.
pub(crate) enum Detail {
    Scalar {
        from_scalar: fn(&Conf) -> Result<Box<dyn Any>, Mismatch>,
    },
    Enum {
        constants: &'static [&'static str],
        select: fn(&str) -> Option<Box<dyn Any>>,
    },
    Seq {
        collect: fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    },
    Map {
        collect: fn(Vec<(String, Box<dyn Any>)>) -> Option<Box<dyn Any>>,
    },
    Optional {
        wrap: fn(Option<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    },
    Record {
        fields: Vec<FieldSpec>,
        construct: fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    },
    Singleton {
        instance: fn() -> Box<dyn Any>,
    },
    RawTree,
}

/// The resolved description of a target type.
///
/// Structurally `{classification, raw identity, component descriptors}` plus the construction
/// contract the decoding machinery needs. Two descriptors are equal iff classification, raw
/// identity, and component descriptors are pairwise equal — the construction contract is
/// ignored, much as a config object's representation details are ignored by value equality.
///
/// Descriptors are produced by [`FromConf::descriptor`]; the constructors here are the surface
/// the `conf_record!`/`conf_enum!`/`conf_singleton!` macros and manual implementations build on.
pub struct TypeDescriptor {
    classification: Classification,
    raw: RawId,
    args: Vec<TypeDescriptor>,
    detail: Detail,
}

impl TypeDescriptor {
    /// The shape category.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The erased identity.
    pub fn raw(&self) -> RawId {
        self.raw
    }

    /// The component descriptors: element type for list/set, key and value types for map, inner
    /// type for optional.
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    pub(crate) fn detail(&self) -> &Detail {
        &self.detail
    }

    /// A scalar leaf type. `from_scalar` converts the leaf node, reporting kind mismatches.
    pub fn scalar<T: Any>(
        classification: Classification,
        from_scalar: fn(&Conf) -> Result<Box<dyn Any>, Mismatch>,
    ) -> Self {
        TypeDescriptor {
            classification,
            raw: RawId::of::<T>(),
            args: Vec::new(),
            detail: Detail::Scalar { from_scalar },
        }
    }

    /// An enum of named constants. `select` maps a matched constant name to its value.
    pub fn enumeration<T: Any>(
        constants: &'static [&'static str],
        select: fn(&str) -> Option<Box<dyn Any>>,
    ) -> Self {
        TypeDescriptor {
            classification: Classification::Enum,
            raw: RawId::of::<T>(),
            args: Vec::new(),
            detail: Detail::Enum { constants, select },
        }
    }

    /// An ordered sequence of `elem`. `collect` assembles the decoded elements into the target
    /// container, or yields `None` if a box holds the wrong type.
    pub fn list<T: Any>(
        elem: TypeDescriptor,
        collect: fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    ) -> Self {
        TypeDescriptor {
            classification: Classification::List,
            raw: RawId::of::<T>(),
            args: vec![elem],
            detail: Detail::Seq { collect },
        }
    }

    /// A set of `elem`. Decoding order is first occurrence; deduplication by equality happens in
    /// `collect`, and the final iteration order belongs to the target container.
    pub fn set<T: Any>(
        elem: TypeDescriptor,
        collect: fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    ) -> Self {
        TypeDescriptor {
            classification: Classification::Set,
            raw: RawId::of::<T>(),
            args: vec![elem],
            detail: Detail::Seq { collect },
        }
    }

    /// A `String` keyed mapping of `value`. Keys are taken verbatim from the tree; `collect`
    /// receives entries in tree-declared order.
    pub fn map<T: Any>(
        value: TypeDescriptor,
        collect: fn(Vec<(String, Box<dyn Any>)>) -> Option<Box<dyn Any>>,
    ) -> Self {
        TypeDescriptor {
            classification: Classification::Map,
            raw: RawId::of::<T>(),
            args: vec![String::descriptor(), value],
            detail: Detail::Map { collect },
        }
    }

    /// An optional `inner`. `wrap` lifts a decoded inner value (or its absence) into the target
    /// optional type.
    pub fn optional<T: Any>(
        inner: TypeDescriptor,
        wrap: fn(Option<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    ) -> Self {
        TypeDescriptor {
            classification: Classification::Optional,
            raw: RawId::of::<T>(),
            args: vec![inner],
            detail: Detail::Optional { wrap },
        }
    }

    /// A record of named, ordered `fields`. `construct` receives one value per field, in field
    /// order, and builds the record; `None` signals a box of the wrong type.
    pub fn record<T: Any>(
        fields: Vec<FieldSpec>,
        construct: fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    ) -> Self {
        TypeDescriptor {
            classification: Classification::Record,
            raw: RawId::of::<T>(),
            args: Vec::new(),
            detail: Detail::Record { fields, construct },
        }
    }

    /// A named fieldless instance: decoding ignores the tree entirely.
    pub fn singleton<T: Any>(instance: fn() -> Box<dyn Any>) -> Self {
        TypeDescriptor {
            classification: Classification::Singleton,
            raw: RawId::of::<T>(),
            args: Vec::new(),
            detail: Detail::Singleton { instance },
        }
    }

    /// The untyped escape hatch: the subtree itself.
    pub fn raw_tree<T: Any>() -> Self {
        TypeDescriptor {
            classification: Classification::RawTree,
            raw: RawId::of::<T>(),
            args: Vec::new(),
            detail: Detail::RawTree,
        }
    }

    #[cfg(test)]
    pub(crate) fn malformed_for_test<T: Any>(classification: Classification) -> Self {
        // deliberately wrong arity, only resolvable into an UnresolvableType error
        TypeDescriptor {
            classification,
            raw: RawId::of::<T>(),
            args: Vec::new(),
            detail: Detail::RawTree,
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        // the construction contract is behavior, not identity
        self.classification == other.classification
            && self.raw == other.raw
            && self.args == other.args
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("classification", &self.classification)
            .field("raw", &self.raw.name)
            .field("args", &self.args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FromConf;

    #[test]
    fn equality_ignores_the_contract() {
        assert_eq!(i64::descriptor(), i64::descriptor());
        assert_ne!(i64::descriptor(), u64::descriptor());
        assert_ne!(
            Vec::<i64>::descriptor(),
            Vec::<String>::descriptor(),
            "same classification, different component types"
        );
        assert_eq!(Vec::<i64>::descriptor(), Vec::<i64>::descriptor());
    }

    #[test]
    fn classification_arity() {
        assert_eq!(Classification::Map.arity(), 2);
        assert_eq!(Classification::List.arity(), 1);
        assert_eq!(Classification::Optional.arity(), 1);
        assert_eq!(Classification::Record.arity(), 0);
    }

    #[test]
    fn descriptors_resolve_generics_transitively() {
        let d = Vec::<Option<Vec<String>>>::descriptor();
        assert_eq!(d.classification(), Classification::List);
        let opt = &d.args()[0];
        assert_eq!(opt.classification(), Classification::Optional);
        let inner = &opt.args()[0];
        assert_eq!(inner.classification(), Classification::List);
        assert_eq!(inner.args()[0].classification(), Classification::Str);
    }

    #[test]
    fn map_key_is_string_typed() {
        let d = std::collections::HashMap::<String, bool>::descriptor();
        assert_eq!(d.classification(), Classification::Map);
        assert_eq!(d.args()[0], String::descriptor());
    }
}
