//! Typed extraction from a configuration tree.
//!
//! Extraction is driven by the [`Registry`]: the requested type's [`TypeDescriptor`] is resolved
//! to a [`Decoder`] which walks the tree, recursively invoking component decoders for element,
//! value, and field types. The entry points here are thin glue over that dispatch.
//!
//! # Examples
//! Extract at a named path.
//! ```rust
//! # use conftree::*;
//! let tree = Conf::new_obj(vec![
//!     ("retries", Conf::new_num(3)),
//!     ("hosts", Conf::new_list(vec![Conf::new_str("a"), Conf::new_str("b")])),
//! ]);
//!
//! assert_eq!(tree.extract_at::<u32>("retries"), Ok(3));
//! assert_eq!(
//!     tree.extract_at::<Vec<String>>("hosts"),
//!     Ok(vec!["a".to_string(), "b".to_string()])
//! );
//! ```
//!
//! Extract a whole record from the tree root.
//! ```rust
//! # use conftree::*;
//! #[derive(Debug, PartialEq)]
//! struct Limits {
//!     cpus: u8,
//!     memory: Option<u64>,
//! }
//!
//! conf_record! {
//!     Limits {
//!         cpus: u8,
//!         memory: Option<u64>,
//!     }
//! }
//!
//! let tree = Conf::new_obj(vec![("cpus", Conf::new_num(4))]);
//! assert_eq!(tree.extract(), Ok(Limits { cpus: 4, memory: None }));
//! ```
//!
//! [`TypeDescriptor`]: crate::TypeDescriptor

use crate::{Conf, Error, FromConf};

mod registry;

pub use registry::{Decoded, Decoder, DecoderBuilder, Registry};

impl Conf {
    /// Decode a `T` starting at the tree root.
    ///
    /// This is the only entry point that decodes at an empty path; named extraction rejects
    /// empty paths — see [`extract_at`](Conf::extract_at). Fails with [`Error::BadPath`] if the
    /// root cannot produce a value of the requested type.
    pub fn extract<T: FromConf>(&self) -> Result<T, Error> {
        self.do_extract("", Registry::global())
    }

    /// Decode a `T` starting at `path`.
    ///
    /// `path` must be non-empty; a violating call fails with [`Error::EmptyPath`] before any
    /// tree access occurs. Decoding the root is a separate, explicit call —
    /// [`extract`](Conf::extract).
    ///
    /// # Example
    /// ```rust
    /// # use conftree::*;
    /// let tree = Conf::new_obj(vec![("timeout", Conf::new_num(30))]);
    /// assert_eq!(tree.extract_at::<u64>("timeout"), Ok(30));
    /// assert_eq!(tree.extract_at::<u64>(""), Err(Error::EmptyPath));
    /// ```
    pub fn extract_at<T: FromConf>(&self, path: &str) -> Result<T, Error> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        self.do_extract(path, Registry::global())
    }

    /// Decode a `T` at `path` using an explicit registry instead of the process-wide one. An
    /// empty `path` decodes at the root.
    pub fn extract_with<T: FromConf>(&self, registry: &Registry, path: &str) -> Result<T, Error> {
        self.do_extract(path, registry)
    }

    fn do_extract<T: FromConf>(&self, path: &str, registry: &Registry) -> Result<T, Error> {
        let decoder = registry.resolve(&T::descriptor())?;
        match decoder(self, path)? {
            Decoded::Value(value) => value
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| Error::BadPath(path.to_string())),
            Decoded::Absent => Err(Error::BadPath(path.to_string())),
        }
    }
}
