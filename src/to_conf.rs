use crate::{Conf, Error, Fields};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// _Convert_ something into a configuration tree.
///
/// The object is consumed, so strings and collections are moved rather than copied. The
/// conversion mirrors decoding classification for classification, so that for supported shapes
/// encode-then-decode is the identity: primitives and strings become leaf scalars, enums become
/// their constant name, sequences become lists, string-keyed maps and records become objects,
/// and singletons become empty objects.
///
/// The `conf_record!`, `conf_enum!`, and `conf_singleton!` macros generate this trait alongside
/// [`FromConf`](crate::FromConf). A manual implementation looks like this:
///
/// ```rust
/// use conftree::*;
///
/// struct Interval {
///     secs: u64,
/// }
///
/// impl ToConf for Interval {
///     fn into_conf(self) -> Result<Conf, Error> {
///         Ok(Conf::new_num(self.secs))
///     }
/// }
///
/// let conf = Interval { secs: 30 }.into_conf_named("poll").unwrap();
/// assert_eq!(conf.at("poll").and_then(Conf::uint), Some(30));
/// ```
pub trait ToConf {
    /// Consume the object and convert it into a [`Conf`] tree.
    fn into_conf(self) -> Result<Conf, Error>;

    /// Convert into a single-entry object under `name`.
    fn into_conf_named(self, name: &str) -> Result<Conf, Error>
    where
        Self: Sized,
    {
        let mut fields = Fields::new();
        fields.insert(name.to_string(), self.into_conf()?);
        Ok(Conf::Obj(fields))
    }

    /// The value has no tree representation and its slot should be omitted entirely when
    /// encoding a record. Only `Option::None` reports `true`.
    fn is_absent(&self) -> bool {
        false
    }
}

impl ToConf for Conf {
    fn into_conf(self) -> Result<Conf, Error> {
        Ok(self)
    }
}

// ********************* SCALARS **********************************************

macro_rules! number {
    ( $( $x:ty ) * ) => {
        $(
            impl ToConf for $x {
                fn into_conf(self) -> Result<Conf, Error> {
                    Ok(Conf::new_num(self))
                }
            }
        )*
    };
}

number!(
    usize u8 u16 u32 u64 u128
    isize i8 i16 i32 i64 i128
    f32 f64
);

impl ToConf for bool {
    fn into_conf(self) -> Result<Conf, Error> {
        Ok(Conf::new_bool(self))
    }
}

impl ToConf for String {
    fn into_conf(self) -> Result<Conf, Error> {
        Ok(Conf::new_string(self))
    }
}

impl ToConf for &str {
    fn into_conf(self) -> Result<Conf, Error> {
        Ok(Conf::new_str(self))
    }
}

// ********************* SEQUENCES, SETS, AND MAPS ****************************

impl<T: ToConf> ToConf for Vec<T> {
    fn into_conf(self) -> Result<Conf, Error> {
        let mut list = Vec::with_capacity(self.len());
        for item in self {
            list.push(item.into_conf()?);
        }
        Ok(Conf::List(list))
    }
}

impl<T: ToConf> ToConf for HashSet<T> {
    fn into_conf(self) -> Result<Conf, Error> {
        self.into_iter().collect::<Vec<_>>().into_conf()
    }
}

impl<T: ToConf> ToConf for BTreeSet<T> {
    fn into_conf(self) -> Result<Conf, Error> {
        self.into_iter().collect::<Vec<_>>().into_conf()
    }
}

// Map keys must encode to string leaves; any other key shape has no object representation.
fn map_into_conf<K: ToConf, V: ToConf, I: IntoIterator<Item = (K, V)>>(
    iter: I,
) -> Result<Conf, Error> {
    let mut fields = Fields::new();
    for (key, value) in iter {
        let key = match key.into_conf()? {
            Conf::Str(s) => s,
            _ => return Err(Error::UnsupportedType(std::any::type_name::<K>())),
        };
        fields.insert(key, value.into_conf()?);
    }
    Ok(Conf::Obj(fields))
}

impl<K: ToConf, V: ToConf> ToConf for HashMap<K, V> {
    fn into_conf(self) -> Result<Conf, Error> {
        map_into_conf(self)
    }
}

impl<K: ToConf, V: ToConf> ToConf for BTreeMap<K, V> {
    fn into_conf(self) -> Result<Conf, Error> {
        map_into_conf(self)
    }
}

// ********************* BLANKET IMPLEMENTATIONS ******************************

impl<T: ToConf> ToConf for Box<T> {
    fn into_conf(self) -> Result<Conf, Error> {
        (*self).into_conf()
    }
}

/// `Some` encodes to the inner value. A bare `None` has no tree representation — inside a record
/// the field is omitted instead (see [`ToConf::is_absent`]), so `None` only errors when encoded
/// on its own.
impl<T: ToConf> ToConf for Option<T> {
    fn into_conf(self) -> Result<Conf, Error> {
        match self {
            Some(value) => value.into_conf(),
            None => Err(Error::UnsupportedType("Option::None")),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}
