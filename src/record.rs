use crate::de::Decoder;
use crate::error::Result;
use crate::field::FieldDef;
use crate::ser::Encoder;

/// A flat struct whose fields map to query parameters.
///
/// Usually implemented through [`query_record!`](crate::query_record), but
/// a manual implementation only has to hand each field, in declaration
/// order, to the encoder or decoder:
///
/// ```
/// use serde_qp::{Decoder, Encoder, FieldDef, Record, Result};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Page {
///     number: u32,
///     size: u32,
///     cursor: String,
/// }
///
/// impl Record for Page {
///     fn fields() -> &'static [FieldDef] {
///         const FIELDS: &[FieldDef] = &[
///             FieldDef::new("number", Some("page")),
///             FieldDef::new("size", Some("size,omitzero")),
///             FieldDef::new("cursor", Some("-")),
///         ];
///         FIELDS
///     }
///
///     fn encode_fields(&self, encoder: &mut Encoder) -> Result<()> {
///         encoder.field("number", Some("page"), &self.number)?;
///         encoder.field("size", Some("size,omitzero"), &self.size)?;
///         encoder.field("cursor", Some("-"), &self.cursor)
///     }
///
///     fn decode_fields(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
///         decoder.field("number", Some("page"), &mut self.number)?;
///         decoder.field("size", Some("size,omitzero"), &mut self.size)?;
///         decoder.field("cursor", Some("-"), &mut self.cursor)
///     }
/// }
///
/// let page = Page { number: 2, size: 0, cursor: "abc".to_owned() };
/// assert_eq!(serde_qp::to_string(&page).unwrap(), "page=2");
/// ```
pub trait Record {
    /// The declared fields, in declaration order.
    fn fields() -> &'static [FieldDef];

    /// Passes every field to [`Encoder::field`], in declaration order.
    fn encode_fields(&self, encoder: &mut Encoder) -> Result<()>;

    /// Passes every field to [`Decoder::field`], in declaration order.
    fn decode_fields(&mut self, decoder: &mut Decoder<'_>) -> Result<()>;
}

/// Declares a struct and implements [`Record`] for it.
///
/// Each field may be followed by `=> "tag"`, where the tag is
/// `"<name>[,omitzero]"` or `"-"`. Untagged fields derive their key from
/// the field name.
///
/// ```
/// serde_qp::query_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Search {
///         pub count: i64 => "count,omitzero",
///         pub name: String => "name",
///         pub tags: Vec<String>,
///         secret: String => "-",
///     }
/// }
///
/// let search = Search { name: "x".to_owned(), ..Default::default() };
/// assert_eq!(serde_qp::to_string(&search).unwrap(), "name=x");
///
/// let search = Search { count: 5, tags: vec!["a".into(), "b".into()], ..search };
/// assert_eq!(serde_qp::to_string(&search).unwrap(), "count=5&name=x&tags=a&tags=b");
/// ```
#[macro_export]
macro_rules! query_record {
    (@tag) => {
        ::core::option::Option::None
    };
    (@tag $tag:literal) => {
        ::core::option::Option::Some($tag)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn fields() -> &'static [$crate::FieldDef] {
                const FIELDS: &[$crate::FieldDef] = &[
                    $(
                        $crate::FieldDef::new(
                            ::core::stringify!($field),
                            $crate::query_record!(@tag $($tag)?),
                        ),
                    )*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn encode_fields(&self, encoder: &mut $crate::Encoder) -> $crate::Result<()> {
                $(
                    encoder.field(
                        ::core::stringify!($field),
                        $crate::query_record!(@tag $($tag)?),
                        &self.$field,
                    )?;
                )*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn decode_fields(&mut self, decoder: &mut $crate::Decoder<'_>) -> $crate::Result<()> {
                $(
                    decoder.field(
                        ::core::stringify!($field),
                        $crate::query_record!(@tag $($tag)?),
                        &mut self.$field,
                    )?;
                )*
                ::core::result::Result::Ok(())
            }
        }
    };
}
