//! Float text conversion.
//!
//! Floats are written with the shortest digits that round-trip at 64-bit
//! precision, always in positional notation.

use std::num::ParseFloatError;
use std::str::FromStr;

use crate::error::{Error, OutOfRange, Result};
use crate::value::Kind;

pub fn format(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }
    let mut buffer = ryu::Buffer::new();
    positional(buffer.format_finite(v))
}

pub fn parse<T>(raw: &str) -> Result<T>
where
    T: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let parsed: T = raw.parse().map_err(|e| Error::parse(Kind::Float, raw, e))?;
    if parsed.into().is_infinite() && !is_infinity(raw) {
        return Err(Error::parse(Kind::Float, raw, OutOfRange));
    }
    Ok(parsed)
}

fn is_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Rewrites `ryu` output without an exponent or a trailing `.0`.
fn positional(formatted: &str) -> String {
    let (negative, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, formatted),
    };
    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);

    // position of the decimal point within `digits`
    let point = int_part.len() as i32 + exponent;

    let mut out = String::with_capacity(digits.len() + 4);
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', point as usize - digits.len()));
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        out.push_str(whole);
        out.push('.');
        out.push_str(fraction);
    }

    // `1.0` and `1.50` never need their trailing zeros
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    out
}
