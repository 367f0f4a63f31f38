use std::borrow::Cow;
use std::str::Utf8Error;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u32> {
    char::from(c).to_digit(16)
}

/// Decodes one key or value of a query string:
/// - Replaces `+` with a space
/// - Decodes percent-encoded characters
///
/// Malformed percent escapes are kept verbatim.
pub fn decode(input: &[u8]) -> Cow<'_, [u8]> {
    if !input.iter().any(|&b| b == b'+' || b == b'%') {
        return Cow::Borrowed(input);
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut idx = 0;

    while idx < input.len() {
        match input[idx] {
            b'+' => {
                decoded.push(b' ');
                idx += 1;
            }
            b'%' => {
                let escaped = input
                    .get(idx + 1)
                    .and_then(|h| char_to_digit(*h))
                    .zip(input.get(idx + 2).and_then(|l| char_to_digit(*l)));
                match escaped {
                    Some((h, l)) => {
                        decoded.push((h * 0x10 + l) as u8);
                        idx += 3;
                    }
                    None => {
                        decoded.push(b'%');
                        idx += 1;
                    }
                }
            }
            b => {
                decoded.push(b);
                idx += 1;
            }
        }
    }

    Cow::Owned(decoded)
}

pub fn decode_utf8(value: Cow<'_, [u8]>) -> Result<Cow<'_, str>, Utf8Error> {
    Ok(match value {
        Cow::Borrowed(bytes) => Cow::Borrowed(std::str::from_utf8(bytes)?),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8(bytes).map_err(|e| e.utf8_error())?),
    })
}
