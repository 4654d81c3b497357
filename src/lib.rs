//! Typed extraction from, and encoding to, configuration trees.
//!
//! A configuration tree ([`Conf`]) is a hierarchical document of scalars, lists, and key-ordered
//! objects. `conftree` maps such trees onto strongly-typed values — primitives, enums,
//! collections, string-keyed maps, nested records, optionals — and maps arbitrary values back
//! into equivalent trees.
//!
//! The core is a type-directed reader dispatch engine: every extractable type describes itself
//! through [`FromConf`] as a [`TypeDescriptor`], and the [`Registry`] resolves descriptors to
//! decoding functions, recursively resolving component types. The registry is built once at
//! process start and read-only afterwards; decoding and encoding are pure tree-walking
//! recursions with no I/O.
//!
//! # Quick start
//! ```rust
//! use conftree::*;
//! use std::collections::BTreeMap;
//!
//! #[derive(Debug, PartialEq)]
//! enum Mode { Active, Passive }
//! conf_enum! { Mode { Active, Passive } }
//!
//! #[derive(Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     mode: Mode,
//!     labels: BTreeMap<String, String>,
//!     motd: Option<String>,
//! }
//! conf_record! {
//!     Server {
//!         host: String,
//!         port: u16 = 8080,
//!         mode: Mode,
//!         labels: BTreeMap<String, String>,
//!         motd: Option<String>,
//!     }
//! }
//!
//! let tree = Conf::new_obj(vec![
//!     ("server", Conf::new_obj(vec![
//!         ("host", Conf::new_str("example.org")),
//!         ("mode", Conf::new_str("Active")),
//!         ("labels", Conf::new_obj(vec![("tier", Conf::new_str("edge"))])),
//!     ])),
//! ]);
//!
//! let server: Server = tree.extract_at("server").unwrap();
//! assert_eq!(server.port, 8080); // defaulted
//! assert_eq!(server.motd, None); // optional, absent
//! assert_eq!(server.mode, Mode::Active);
//!
//! // and back again
//! let encoded = server.into_conf_named("server").unwrap();
//! assert_eq!(encoded.at("server.host").and_then(Conf::str), Some("example.org"));
//! ```
//!
//! # Errors and absence
//! Decoders distinguish three outcomes: a value, a well-defined absence ("no node at this
//! path"), and a failure. Absence is the intended value only for `Option` fields and surfaces
//! nowhere else: a required field whose path is missing fails with
//! [`Error::MissingField`], and extraction that produces nothing fails with
//! [`Error::BadPath`]. See [`Error`] for the full taxonomy.
//!
//! # What is out of scope
//! Parsing textual configuration syntax into a [`Conf`] tree is not this crate's job; trees are
//! built programmatically or by an external parser. There is no wire format — this is an
//! in-process type-adaptation layer.

#![warn(missing_docs)]

mod descriptor;
mod from_conf;
mod ds;
mod err;
mod read;
mod to_conf;

pub use crate::descriptor::{Classification, FieldSpec, Mismatch, RawId, TypeDescriptor};
pub use crate::ds::{Conf, Fields, IntoIntError, Number};
pub use crate::err::Error;
pub use crate::from_conf::FromConf;
pub use crate::read::{Decoded, Decoder, DecoderBuilder, Registry};
pub use crate::to_conf::ToConf;
