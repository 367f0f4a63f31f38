use std::borrow::Cow;

use percent_encoding::AsciiSet;

/// As defined in https://url.spec.whatwg.org/#query-percent-encode-set
///
/// The set of characters that need to be encoded in a _query_ string
/// are:
/// - CONTROL characters
/// - SPACE (but we'll separately encode it as `+`)
/// - U+0022 ("), U+0023 (#), U+003C (<), and U+003E (>).
///
/// Keys and values are encoded separately, so the characters which
/// delimit them must be encoded as well.
const MINIMAL_QS_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    // `+` is used to represent a space in query strings
    .add(b'+')
    // escape character itself
    .add(b'%')
    // key, value separator
    .add(b'=')
    // denote key-value pairs
    .add(b'&');

/// As defined in https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set
///
/// The application/x-www-form-urlencoded percent-encode set contains all code points, except the ASCII alphanumeric,
/// U+002A (*), U+002D (-), U+002E (.), and U+005F (_).
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Encodes a key or value for use in a querystring.
///
/// ## Query-String Encoding (default)
/// Uses the minimal WHATWG query percent-encode set.
/// Spaces are encoded as `+` for better readability.
///
/// ## Form Encoding
/// Uses the stricter `application/x-www-form-urlencoded` set.
/// Spaces are percent-encoded as `%20`.
///
/// The function returns an iterator to avoid allocations when no encoding is needed.
pub fn encode(s: &str, use_form_encoding: bool) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        MINIMAL_QS_SET
    };
    percent_encoding::utf8_percent_encode(s, set).map(move |chunk| {
        // form encoding has already turned spaces into `%20`
        if !use_form_encoding && chunk.contains(' ') {
            Cow::Owned(chunk.replace(' ', "+"))
        } else {
            Cow::Borrowed(chunk)
        }
    })
}
