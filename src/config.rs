use serde::{Serialize, de::DeserializeOwned};

use crate::de::Decoder;
use crate::error::Result;
use crate::map::Values;
use crate::record::Record;
use crate::ser::Encoder;

/// Configuration for encoding and decoding behavior.
///
/// ```
/// use serde_qp::{Config, DefaultNaming};
///
/// serde_qp::query_record! {
///     #[derive(Debug, Default, PartialEq)]
///     #[allow(non_snake_case)]
///     struct Query {
///         UserID: u32,
///     }
/// }
///
/// let query = Query { UserID: 7 };
///
/// // untagged keys are lower-cased on encode, but only their first
/// // character is lower-cased on decode
/// let values = serde_qp::encode(&query).unwrap();
/// assert_eq!(values.get("userid"), Some("7"));
///
/// let mut decoded = Query::default();
/// serde_qp::decode(&values, &mut decoded).unwrap();
/// assert_eq!(decoded.UserID, 0);
///
/// // `DefaultNaming::Lowercase` uses the same key in both directions
/// let config = Config::new().default_naming(DefaultNaming::Lowercase);
/// config.decode(&values, &mut decoded).unwrap();
/// assert_eq!(decoded, query);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    use_form_encoding: bool,
    default_naming: DefaultNaming,
}

/// How keys are derived for fields without an explicit tag name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultNaming {
    /// Encode lower-cases the whole declared name, decode lower-cases
    /// only its first character.
    #[default]
    Compat,
    /// Both directions lower-case the whole declared name.
    Lowercase,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
            default_naming: DefaultNaming::Compat,
        }
    }

    /// By default, query strings are written with the minimal WHATWG
    /// query percent-encode set and spaces as `+`.
    ///
    /// Set this to `true` to percent-encode everything outside of the
    /// `application/x-www-form-urlencoded` safe set instead.
    /// Alternatively, use the `default_to_form_encoding` Cargo feature.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Specifies how keys of untagged fields are derived.
    pub const fn default_naming(mut self, default_naming: DefaultNaming) -> Self {
        self.default_naming = default_naming;
        self
    }

    pub const fn form_encoding(&self) -> bool {
        self.use_form_encoding
    }

    pub const fn naming(&self) -> DefaultNaming {
        self.default_naming
    }

    /// Encodes a record into a multi-map using this `Config`.
    pub fn encode<R: Record>(self, record: &R) -> Result<Values> {
        let mut encoder = Encoder::new(self);
        encoder.encode(record)?;
        Ok(encoder.into_values())
    }

    /// Decodes a multi-map into an existing record using this `Config`.
    pub fn decode<R: Record>(self, values: &Values, record: &mut R) -> Result<()> {
        Decoder::new(values, self).decode(record)
    }

    /// Encodes a record into a query string using this `Config`.
    pub fn serialize_string<R: Record>(self, record: &R) -> Result<String> {
        let values = self.encode(record)?;
        Ok(values.to_query_string(self.use_form_encoding))
    }

    /// Parses a query string and decodes it into a record using this `Config`.
    pub fn deserialize_str<R: Record>(self, input: &str, record: &mut R) -> Result<()> {
        let values = Values::parse(input)?;
        self.decode(&values, record)
    }

    /// Converts any serializable struct into a multi-map using this `Config`.
    pub fn to_values<T: Serialize + ?Sized>(self, input: &T) -> Result<Values> {
        let mut values = Values::new();
        crate::ser::serialize_into(input, &mut values, self)?;
        Ok(values)
    }

    /// Builds a deserializable struct from a multi-map using this `Config`.
    pub fn from_values<T: DeserializeOwned>(self, values: &Values) -> Result<T> {
        crate::de::deserialize_from(values, self)
    }
}
