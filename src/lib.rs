//! Flat query parameters for typed records
//!
//! This crate converts between a record, a flat struct of scalar and list
//! fields, and [`Values`], a multi-map from string keys to an ordered list
//! of string values. It is meant for building the query string of an
//! outgoing request from typed parameters, and for reading the query string
//! of an incoming request back into the same type.
//!
//! ## Keys
//!
//! Each field maps to one key. Fields declared through [`query_record!`]
//! can carry a tag of the form `"<name>[,omitzero]"`:
//!
//! * a non-empty name is used verbatim as the key;
//! * the name `-` excludes the field in both directions;
//! * `omitzero` leaves the field out of the encoded output while it holds
//!   its zero value (empty string, `0`, `false`, empty list, Unix epoch).
//!
//! Untagged fields derive their key from the field name, see
//! [`DefaultNaming`] for the exact rules.
//!
//! ## Supported Types
//!
//! Scalars are strings, integers, floats, booleans, `char` and
//! `chrono::DateTime` timestamps. A list field is a `Vec` of scalars and
//! maps to one value per element, in order. Any other type can take part
//! by implementing [`Marshaler`] and [`Unmarshaler`].
//!
//! Nested records and map-valued fields are not supported.
//!
//! ## Usage
//!
//! ```
//! serde_qp::query_record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     struct QueryParams {
//!         id: u8,
//!         name: String => "name",
//!         phone: u32 => "phone,omitzero",
//!         user_ids: Vec<u8> => "user_id",
//!         session: String => "-",
//!     }
//! }
//!
//! let params = QueryParams {
//!     id: 42,
//!     name: "Acme".to_string(),
//!     phone: 0,
//!     user_ids: vec![1, 2, 3, 4],
//!     session: "secret".to_string(),
//! };
//!
//! let query = serde_qp::to_string(&params).unwrap();
//! assert_eq!(query, "id=42&name=Acme&user_id=1&user_id=2&user_id=3&user_id=4");
//!
//! let mut rec_params = QueryParams::default();
//! serde_qp::from_str(&query, &mut rec_params).unwrap();
//! assert_eq!(rec_params, QueryParams { session: String::new(), ..params });
//! ```
//!
//! Types deriving `serde::Serialize` and `serde::Deserialize` go through
//! [`to_values`] and [`from_values`] with the same key and value rules.
//! Their shape is only known at run time, so unsupported field types are
//! reported as [`Error::UnsupportedType`] rather than rejected by the
//! compiler.

mod config;
mod de;
mod error;
pub mod field;
mod map;
mod record;
mod ser;
mod value;

pub use config::{Config, DefaultNaming};
#[doc(inline)]
pub use de::{Decoder, ValuesDeserializer, decode, from_str, from_values};
pub use error::{BoxError, Error, InvalidSyntax, OutOfRange, Result};
pub use field::{Direction, FieldDef, FieldDescriptor};
pub use map::Values;
pub use record::Record;
#[doc(inline)]
pub use ser::{Encoder, ValuesSerializer, encode, to_string, to_values};
pub use value::{Kind, Marshaler, QueryField, QueryScalar, Unmarshaler};
