//! Encoding of records into query parameters.

pub(crate) mod encode;
mod serializer;

pub use serializer::ValuesSerializer;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::field::{self, Direction};
use crate::map::Values;
use crate::record::Record;
use crate::value::QueryField;

/// Encodes a record into a multi-map.
///
/// ```
/// serde_qp::query_record! {
///     struct Query {
///         name: String => "name",
///         count: i32 => "count,omitzero",
///     }
/// }
///
/// let q = Query { name: "x".to_owned(), count: 0 };
/// let values = serde_qp::encode(&q).unwrap();
/// assert_eq!(values.get_all("name"), ["x"]);
/// assert!(!values.contains_key("count"));
/// ```
pub fn encode<R: Record>(record: &R) -> Result<Values> {
    Config::default().encode(record)
}

/// Encodes a record into a query string.
///
/// ```
/// serde_qp::query_record! {
///     struct Query {
///         age: u8,
///         name: String,
///         occupation: String,
///     }
/// }
///
/// let q = Query {
///     age: 24,
///     name: "Alice".to_owned(),
///     occupation: "Student".to_owned(),
/// };
///
/// assert_eq!(
///     serde_qp::to_string(&q).unwrap(),
///     "age=24&name=Alice&occupation=Student");
/// ```
pub fn to_string<R: Record>(record: &R) -> Result<String> {
    Config::default().serialize_string(record)
}

/// Converts a serializable struct into a multi-map.
///
/// Keys are the serialized field names, lower-cased. Fields must hold
/// scalars, sequences of scalars or options of either; anything else
/// fails with [`Error::UnsupportedType`](crate::Error::UnsupportedType).
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Query {
///     #[serde(rename = "Name")]
///     name: String,
///     ids: Vec<u8>,
///     page: Option<u32>,
/// }
///
/// let q = Query { name: "Acme".to_owned(), ids: vec![3, 1], page: None };
/// let values = serde_qp::to_values(&q).unwrap();
/// assert_eq!(values.get("name"), Some("Acme"));
/// assert_eq!(values.get_all("ids"), ["3", "1"]);
/// assert!(!values.contains_key("page"));
/// ```
pub fn to_values<T: Serialize + ?Sized>(input: &T) -> Result<Values> {
    Config::default().to_values(input)
}

pub(crate) fn serialize_into<T: Serialize + ?Sized>(
    input: &T,
    values: &mut Values,
    config: Config,
) -> Result<()> {
    input.serialize(&mut ValuesSerializer::new(values, config))
}

/// Builds a multi-map from records.
///
/// Fields are written as they are visited, so after a failed
/// [`encode`](Encoder::encode) the values of every field before the
/// failing one remain available.
///
/// ```
/// use serde_qp::{Config, Encoder, Marshaler, Unmarshaler};
///
/// #[derive(Default)]
/// struct Secret;
///
/// impl Marshaler for Secret {
///     type Error = std::fmt::Error;
///
///     fn marshal_query_param(&self) -> Result<String, Self::Error> {
///         Err(std::fmt::Error)
///     }
/// }
///
/// impl Unmarshaler for Secret {
///     type Error = std::fmt::Error;
///
///     fn unmarshal_query_param(&mut self, _: &str) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
///
/// serde_qp::query_record! {
///     struct Login {
///         user: String,
///         secret: Secret,
///     }
/// }
///
/// let mut encoder = Encoder::new(Config::default());
/// let login = Login { user: "ana".to_owned(), secret: Secret };
/// assert!(encoder.encode(&login).is_err());
/// assert_eq!(encoder.values().get("user"), Some("ana"));
/// ```
#[derive(Debug, Default)]
pub struct Encoder {
    values: Values,
    config: Config,
}

impl Encoder {
    pub fn new(config: Config) -> Self {
        Self {
            values: Values::new(),
            config,
        }
    }

    /// Writes every field of `record`, stopping at the first failure.
    pub fn encode<R: Record>(&mut self, record: &R) -> Result<()> {
        let before = self.values.len();
        record.encode_fields(self)?;
        tracing::debug!(
            keys = self.values.len() - before,
            "encoded record into query values"
        );
        Ok(())
    }

    /// Resolves one field and writes its value.
    pub fn field<T: QueryField + ?Sized>(
        &mut self,
        name: &str,
        tag: Option<&str>,
        value: &T,
    ) -> Result<()> {
        let Some(field) = field::resolve(name, tag, Direction::Encode, self.config.naming()) else {
            tracing::trace!(field = name, "skipping excluded field");
            return Ok(());
        };
        if field.omit_zero && value.is_zero_value() {
            tracing::trace!(field = name, key = %field.key, "omitting zero value");
            return Ok(());
        }
        value.encode_field(&field.key, &mut self.values)
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn into_values(self) -> Values {
        self.values
    }
}
