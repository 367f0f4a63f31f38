//! Decoding of query parameters into records.
//!
//! Records registered through [`Record`] are filled in place: every field
//! whose key is present overwrites the current value, every other field is
//! left untouched. Decoding stops at the first failure, fields decoded
//! before it keep their new values.
//!
//! Types implementing `serde::Deserialize` are built through
//! [`from_values`] instead, which applies the same key and scalar rules.

pub(crate) mod decode;
mod deserializer;
mod string_parser;

pub use deserializer::ValuesDeserializer;

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::Result;
use crate::field::{self, Direction};
use crate::map::Values;
use crate::record::Record;
use crate::value::QueryField;

/// Decodes a multi-map into an existing record.
///
/// ```
/// use serde_qp::Values;
///
/// serde_qp::query_record! {
///     #[derive(Debug, Default, PartialEq)]
///     struct Query {
///         name: String => "name",
///         ids: Vec<u32>,
///     }
/// }
///
/// let values = Values::from([("name", "x"), ("ids", "3"), ("ids", "1"), ("zzz", "?")]);
/// let mut query = Query::default();
/// serde_qp::decode(&values, &mut query).unwrap();
/// assert_eq!(query, Query { name: "x".to_owned(), ids: vec![3, 1] });
/// ```
pub fn decode<R: Record>(values: &Values, record: &mut R) -> Result<()> {
    Config::default().decode(values, record)
}

/// Parses a query string and decodes it into an existing record.
///
/// ```
/// serde_qp::query_record! {
///     #[derive(Debug, Default, PartialEq)]
///     struct Query {
///         name: String,
///         age: u8,
///         occupation: String,
///     }
/// }
///
/// let mut q = Query::default();
/// serde_qp::from_str("name=Alice&age=24&occupation=Student", &mut q).unwrap();
/// assert_eq!(
///     q,
///     Query {
///         name: "Alice".to_owned(),
///         age: 24,
///         occupation: "Student".to_owned(),
///     }
/// );
/// ```
pub fn from_str<R: Record>(input: &str, record: &mut R) -> Result<()> {
    Config::default().deserialize_str(input, record)
}

/// Builds a deserializable struct from a multi-map.
///
/// Missing keys are left to serde, so they need `#[serde(default)]` or an
/// `Option` field.
///
/// ```
/// use serde::Deserialize;
/// use serde_qp::Values;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Query {
///     name: String,
///     #[serde(default)]
///     ids: Vec<u8>,
///     page: Option<u32>,
/// }
///
/// let values = Values::from([("name", "Acme"), ("ids", "3"), ("ids", "1")]);
/// let q: Query = serde_qp::from_values(&values).unwrap();
/// assert_eq!(q, Query { name: "Acme".to_owned(), ids: vec![3, 1], page: None });
/// ```
pub fn from_values<T: DeserializeOwned>(values: &Values) -> Result<T> {
    Config::default().from_values(values)
}

pub(crate) fn deserialize_from<T: DeserializeOwned>(values: &Values, config: Config) -> Result<T> {
    T::deserialize(ValuesDeserializer::new(values, config))
}

fn trace_unknown_keys(values: &Values, known: &[Cow<'_, str>]) {
    for key in values.keys() {
        if !known.iter().any(|k| k == key) {
            tracing::trace!(key, "ignoring unknown key");
        }
    }
}

/// Reads the fields of records from a multi-map.
#[derive(Debug)]
pub struct Decoder<'a> {
    values: &'a Values,
    config: Config,
    decoded: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(values: &'a Values, config: Config) -> Self {
        Self {
            values,
            config,
            decoded: 0,
        }
    }

    /// Reads every field of `record`, stopping at the first failure.
    pub fn decode<R: Record>(&mut self, record: &mut R) -> Result<()> {
        self.decoded = 0;
        if tracing::enabled!(tracing::Level::TRACE) {
            let naming = self.config.naming();
            let known: Vec<_> = R::fields()
                .iter()
                .filter_map(|def| field::resolve(def.name, def.tag, Direction::Decode, naming))
                .map(|field| field.key)
                .collect();
            trace_unknown_keys(self.values, &known);
        }
        record.decode_fields(self)?;
        tracing::debug!(
            fields = self.decoded,
            keys = self.values.len(),
            "decoded query values into record"
        );
        Ok(())
    }

    /// Resolves one field and overwrites it when its key holds values.
    pub fn field<T: QueryField + ?Sized>(
        &mut self,
        name: &str,
        tag: Option<&str>,
        value: &mut T,
    ) -> Result<()> {
        let Some(field) = field::resolve(name, tag, Direction::Decode, self.config.naming()) else {
            tracing::trace!(field = name, "skipping excluded field");
            return Ok(());
        };
        let raw = self.values.get_all(&field.key);
        if raw.is_empty() {
            return Ok(());
        }
        value
            .decode_field(raw)
            .map_err(|e| e.with_key(field.key.as_ref()))?;
        self.decoded += 1;
        Ok(())
    }

    /// Number of fields overwritten by the last call to [`decode`](Self::decode).
    pub fn decoded(&self) -> usize {
        self.decoded
    }
}
