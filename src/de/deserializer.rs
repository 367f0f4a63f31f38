use std::borrow::Cow;
use std::slice;

use serde::de::{self, IntoDeserializer};

use super::string_parser::StringParsingDeserializer;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::field::{self, Direction};
use crate::map::Values;

/// A deserializer reading the fields of a struct from [`Values`].
///
/// Supported top-level outputs are structs and newtypes around them. Every
/// other shape fails with [`Error::Type`].
pub struct ValuesDeserializer<'a> {
    values: &'a Values,
    config: Config,
}

impl<'a> ValuesDeserializer<'a> {
    pub fn new(values: &'a Values, config: Config) -> Self {
        Self { values, config }
    }
}

macro_rules! reject_top_level {
    ($($method:ident => $found:literal,)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(Error::top_level($found))
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValuesDeserializer<'_> {
    type Error = Error;

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let access = FieldsAccess::new(self.values, fields, self.config);
        access.trace_unknown_keys();
        visitor.visit_map(access)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::top_level("unit struct"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::top_level("tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::top_level("tuple struct"))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::top_level("enum"))
    }

    reject_top_level! {
        deserialize_any => "primitive",
        deserialize_bool => "bool",
        deserialize_i8 => "i8",
        deserialize_i16 => "i16",
        deserialize_i32 => "i32",
        deserialize_i64 => "i64",
        deserialize_i128 => "i128",
        deserialize_u8 => "u8",
        deserialize_u16 => "u16",
        deserialize_u32 => "u32",
        deserialize_u64 => "u64",
        deserialize_u128 => "u128",
        deserialize_f32 => "f32",
        deserialize_f64 => "f64",
        deserialize_char => "char",
        deserialize_str => "str",
        deserialize_string => "string",
        deserialize_bytes => "bytes",
        deserialize_byte_buf => "bytes",
        deserialize_option => "option",
        deserialize_unit => "unit",
        deserialize_seq => "sequence",
        deserialize_map => "map",
        deserialize_identifier => "identifier",
        deserialize_ignored_any => "primitive",
    }
}

/// Walks the declared fields of a struct, yielding those whose key holds
/// at least one value.
struct FieldsAccess<'a> {
    values: &'a Values,
    fields: slice::Iter<'static, &'static str>,
    config: Config,
    pending: Option<(Cow<'static, str>, &'a [String])>,
}

impl<'a> FieldsAccess<'a> {
    fn new(values: &'a Values, fields: &'static [&'static str], config: Config) -> Self {
        Self {
            values,
            fields: fields.iter(),
            config,
            pending: None,
        }
    }

    fn key(&self, name: &'static str) -> Cow<'static, str> {
        field::default_key(name, Direction::Decode, self.config.naming())
    }

    fn trace_unknown_keys(&self) {
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        let known: Vec<_> = self.fields.clone().map(|&name| self.key(name)).collect();
        super::trace_unknown_keys(self.values, &known);
    }
}

impl<'de> de::MapAccess<'de> for FieldsAccess<'_> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        while let Some(&name) = self.fields.next() {
            let key = self.key(name);
            let raw = self.values.get_all(&key);
            if raw.is_empty() {
                continue;
            }
            self.pending = Some((key, raw));
            let name: de::value::StrDeserializer<'_, Error> = name.into_deserializer();
            return seed.deserialize(name).map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let Some((key, raw)) = self.pending.take() else {
            return Err(de::Error::custom("value requested before key"));
        };
        seed.deserialize(FieldDeserializer { key: &key, raw })
            .map_err(|e| e.with_key(key.as_ref()))
    }
}

/// Deserializes one struct field from the non-empty list of values stored
/// under its key.
struct FieldDeserializer<'a> {
    key: &'a str,
    raw: &'a [String],
}

impl<'a> FieldDeserializer<'a> {
    fn first(&self) -> StringParsingDeserializer<'a> {
        let value = self.raw.first().map(String::as_str).unwrap_or_default();
        StringParsingDeserializer::new(self.key, value)
    }

    fn list(&self) -> ListAccess<'a> {
        ListAccess {
            key: self.key,
            iter: self.raw.iter(),
        }
    }
}

macro_rules! forward_to_first {
    ($($method:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(self.first(), visitor)
            }
        )*
    };
}

macro_rules! field_unsupported {
    ($($method:ident => $kind:literal,)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(Error::unsupported(self.key, $kind))
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldDeserializer<'_> {
    type Error = Error;

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(self.list())
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(self.list())
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(self.list())
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_enum(self.first(), name, variants, visitor)
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported(self.key, "unit struct"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported(self.key, "struct"))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_first! {
        deserialize_any,
        deserialize_bool,
        deserialize_i8,
        deserialize_i16,
        deserialize_i32,
        deserialize_i64,
        deserialize_i128,
        deserialize_u8,
        deserialize_u16,
        deserialize_u32,
        deserialize_u64,
        deserialize_u128,
        deserialize_f32,
        deserialize_f64,
        deserialize_char,
        deserialize_str,
        deserialize_string,
        deserialize_identifier,
    }

    field_unsupported! {
        deserialize_bytes => "bytes",
        deserialize_byte_buf => "bytes",
        deserialize_unit => "unit",
        deserialize_map => "map",
    }
}

/// Yields each value of a list field in order.
struct ListAccess<'a> {
    key: &'a str,
    iter: slice::Iter<'a, String>,
}

impl<'de> de::SeqAccess<'de> for ListAccess<'_> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(StringParsingDeserializer::new(self.key, value))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}
