//! Resolution of a field's public key from its declared name and tag.
//!
//! A tag has the form `"<name>"` or `"<name>,<option>[,<option>...]"`.
//!
//! * `name == "-"` excludes the field from both encoding and decoding.
//! * an empty name (or no tag at all) derives the key from the declared
//!   field name, see [`DefaultNaming`].
//! * the `omitzero` option omits the field from encoded output while it
//!   holds its zero value. Unknown options are ignored.

use std::borrow::Cow;

use crate::config::DefaultNaming;

/// Option which omits zero values on encode.
pub const OMIT_ZERO: &str = "omitzero";

/// Tag name which excludes a field.
pub const SKIP: &str = "-";

/// Static description of one declared record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// The declared field name.
    pub name: &'static str,
    /// The raw tag, e.g. `"count,omitzero"`.
    pub tag: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(name: &'static str, tag: Option<&'static str>) -> Self {
        Self { name, tag }
    }
}

/// Which pipeline a key is being resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// The parsed form of a tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub omit_zero: bool,
}

impl<'a> Tag<'a> {
    pub fn parse(tag: &'a str) -> Self {
        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default();
        let omit_zero = parts.any(|option| option == OMIT_ZERO);
        Tag { name, omit_zero }
    }
}

/// Resolved key and omit policy for one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    pub key: Cow<'a, str>,
    pub omit_zero: bool,
}

/// Resolves one field, returning `None` when the field is excluded.
///
/// `omit_zero` is reported for both directions, the decoder ignores it.
pub fn resolve<'a>(
    name: &'a str,
    tag: Option<&'a str>,
    direction: Direction,
    naming: DefaultNaming,
) -> Option<FieldDescriptor<'a>> {
    let tag = tag.map(Tag::parse).unwrap_or_default();
    if tag.name == SKIP {
        return None;
    }

    let key = if tag.name.is_empty() {
        default_key(name, direction, naming)
    } else {
        Cow::Borrowed(tag.name)
    };

    Some(FieldDescriptor {
        key,
        omit_zero: tag.omit_zero,
    })
}

/// Derives the key of an untagged field.
///
/// With [`DefaultNaming::Compat`], encoding lower-cases the whole name
/// while decoding lower-cases only its first character, so `UserID`
/// encodes as `userid` but decodes from `userID`. A raw identifier
/// prefix (`r#type`) is not part of the key.
pub fn default_key(name: &str, direction: Direction, naming: DefaultNaming) -> Cow<'_, str> {
    let name = name.strip_prefix("r#").unwrap_or(name);
    match (direction, naming) {
        (Direction::Decode, DefaultNaming::Compat) => lowercase_first(name),
        _ => lowercase(name),
    }
}

fn lowercase(name: &str) -> Cow<'_, str> {
    if name.chars().any(char::is_uppercase) {
        Cow::Owned(name.to_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

fn lowercase_first(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            Cow::Owned(first.to_lowercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(name),
    }
}
