//! Conversion of single field values to and from their string form.
//!
//! Every supported field type converts through one of two routes, chosen
//! at compile time:
//!
//! 1. the type implements [`Marshaler`] and [`Unmarshaler`], and takes over
//!    its own conversion;
//! 2. otherwise it is one of the built-in kinds (see [`Kind`]) and uses the
//!    conversion implemented here.
//!
//! A field is either a scalar, which maps to a single value, or a `Vec` of
//! scalars, which maps to one value per element.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::{Error, InvalidSyntax, Result};
use crate::map::Values;

pub(crate) mod float;
mod time;

/// The built-in kinds of scalar values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    Char,
    Time,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::Time => "time",
        })
    }
}

/// Implemented by types that encode themselves to a single query value.
///
/// ```
/// use serde_qp::{Marshaler, Unmarshaler};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point(i32, i32);
///
/// impl Marshaler for Point {
///     type Error = std::convert::Infallible;
///
///     fn marshal_query_param(&self) -> Result<String, Self::Error> {
///         Ok(format!("{}:{}", self.0, self.1))
///     }
/// }
///
/// impl Unmarshaler for Point {
///     type Error = std::num::ParseIntError;
///
///     fn unmarshal_query_param(&mut self, raw: &str) -> Result<(), Self::Error> {
///         let (x, y) = raw.split_once(':').unwrap_or((raw, ""));
///         *self = Point(x.parse()?, y.parse()?);
///         Ok(())
///     }
/// }
///
/// serde_qp::query_record! {
///     #[derive(Debug, Default, PartialEq)]
///     struct Query {
///         at: Point,
///         path: Vec<Point> => "p",
///     }
/// }
///
/// let query = Query { at: Point(1, 2), path: vec![Point(0, 0), Point(3, 4)] };
/// let s = serde_qp::to_string(&query).unwrap();
/// assert_eq!(s, "at=1:2&p=0:0&p=3:4");
///
/// let mut decoded = Query::default();
/// serde_qp::from_str(&s, &mut decoded).unwrap();
/// assert_eq!(decoded, query);
/// ```
pub trait Marshaler {
    type Error: std::error::Error + Send + Sync + 'static;

    fn marshal_query_param(&self) -> Result<String, Self::Error>;

    /// Whether `omitzero` should leave this value out.
    fn is_zero_query_param(&self) -> bool {
        false
    }
}

/// Implemented by types that parse themselves from a single query value.
pub trait Unmarshaler {
    type Error: std::error::Error + Send + Sync + 'static;

    fn unmarshal_query_param(&mut self, raw: &str) -> Result<(), Self::Error>;
}

/// A single value convertible to and from its query string form.
pub trait QueryScalar: Sized {
    /// The kind's zero value, used by `omitzero`.
    fn is_zero(&self) -> bool;

    fn to_query_param(&self) -> Result<String>;

    fn from_query_param(raw: &str) -> Result<Self>;
}

/// A record field: either a scalar or a list of scalars.
pub trait QueryField {
    fn is_zero_value(&self) -> bool;

    /// Writes the field under `key`. Scalars replace any value already
    /// stored under `key`, lists append one value per element.
    fn encode_field(&self, key: &str, values: &mut Values) -> Result<()>;

    /// Reads the field from the non-empty list of values stored under its key.
    fn decode_field(&mut self, raw: &[String]) -> Result<()>;
}

pub(crate) fn parse_signed<T>(raw: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse().map_err(|e| Error::parse(Kind::Int, raw, e))
}

pub(crate) fn parse_unsigned<T>(raw: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    // `FromStr` accepts a leading `+`, unsigned text never carries a sign
    if raw.starts_with('+') {
        return Err(Error::parse(Kind::Uint, raw, InvalidSyntax));
    }
    raw.parse().map_err(|e| Error::parse(Kind::Uint, raw, e))
}

pub(crate) fn parse_bool(raw: &str) -> Result<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::parse(Kind::Bool, raw, InvalidSyntax)),
    }
}

pub(crate) fn parse_char(raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::parse(Kind::Char, raw, InvalidSyntax)),
    }
}

macro_rules! scalar_itoa {
    (
        $($ty:ty => $parse:ident,)*) => {
        $(
            impl QueryScalar for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn to_query_param(&self) -> Result<String> {
                    let mut buffer = itoa::Buffer::new();
                    Ok(buffer.format(*self).to_owned())
                }

                fn from_query_param(raw: &str) -> Result<Self> {
                    $parse(raw)
                }
            }
        )*
    };
}

macro_rules! scalar_ryu {
    (
        $($ty:ty,)*) => {
        $(
            impl QueryScalar for $ty {
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }

                fn to_query_param(&self) -> Result<String> {
                    Ok(float::format(f64::from(*self)))
                }

                fn from_query_param(raw: &str) -> Result<Self> {
                    float::parse(raw)
                }
            }
        )*
    };
}

scalar_itoa! {
    i8 => parse_signed,
    i16 => parse_signed,
    i32 => parse_signed,
    i64 => parse_signed,
    i128 => parse_signed,
    isize => parse_signed,
    u8 => parse_unsigned,
    u16 => parse_unsigned,
    u32 => parse_unsigned,
    u64 => parse_unsigned,
    u128 => parse_unsigned,
    usize => parse_unsigned,
}

scalar_ryu! {
    f32,
    f64,
}

impl QueryScalar for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_query_param(&self) -> Result<String> {
        Ok(self.clone())
    }

    fn from_query_param(raw: &str) -> Result<Self> {
        Ok(raw.to_owned())
    }
}

impl QueryScalar for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn to_query_param(&self) -> Result<String> {
        Ok(if *self { "true" } else { "false" }.to_owned())
    }

    fn from_query_param(raw: &str) -> Result<Self> {
        parse_bool(raw)
    }
}

impl QueryScalar for char {
    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn to_query_param(&self) -> Result<String> {
        Ok(self.to_string())
    }

    fn from_query_param(raw: &str) -> Result<Self> {
        parse_char(raw)
    }
}

impl<T> QueryScalar for T
where
    T: Marshaler + Unmarshaler + Default,
{
    fn is_zero(&self) -> bool {
        self.is_zero_query_param()
    }

    fn to_query_param(&self) -> Result<String> {
        self.marshal_query_param().map_err(Error::capability)
    }

    fn from_query_param(raw: &str) -> Result<Self> {
        let mut value = T::default();
        value.unmarshal_query_param(raw).map_err(Error::capability)?;
        Ok(value)
    }
}

macro_rules! scalar_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryField for $ty {
                fn is_zero_value(&self) -> bool {
                    QueryScalar::is_zero(self)
                }

                fn encode_field(&self, key: &str, values: &mut Values) -> Result<()> {
                    values.set(key, self.to_query_param()?);
                    Ok(())
                }

                fn decode_field(&mut self, raw: &[String]) -> Result<()> {
                    if let Some(first) = raw.first() {
                        *self = <$ty as QueryScalar>::from_query_param(first)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

scalar_field! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String, bool, char,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
}

impl<T> QueryField for T
where
    T: Marshaler + Unmarshaler,
{
    fn is_zero_value(&self) -> bool {
        self.is_zero_query_param()
    }

    fn encode_field(&self, key: &str, values: &mut Values) -> Result<()> {
        let value = self.marshal_query_param().map_err(Error::capability)?;
        values.set(key, value);
        Ok(())
    }

    fn decode_field(&mut self, raw: &[String]) -> Result<()> {
        match raw.first() {
            Some(first) => self
                .unmarshal_query_param(first)
                .map_err(Error::capability),
            None => Ok(()),
        }
    }
}

impl<T: QueryScalar> QueryField for Vec<T> {
    fn is_zero_value(&self) -> bool {
        self.is_empty()
    }

    fn encode_field(&self, key: &str, values: &mut Values) -> Result<()> {
        for item in self {
            values.add(key, item.to_query_param()?);
        }
        Ok(())
    }

    fn decode_field(&mut self, raw: &[String]) -> Result<()> {
        // the field is replaced only once every element parsed
        *self = raw
            .iter()
            .map(|s| T::from_query_param(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }
}
