use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::value::{Kind, QueryScalar};

/// RFC 3339 with `Z` for a zero offset and sub-second digits only when
/// the timestamp carries them.
fn format<Tz>(v: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    v.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| Error::parse(Kind::Time, raw, e))
}

fn is_epoch<Tz: TimeZone>(v: &DateTime<Tz>) -> bool {
    v.timestamp() == 0 && v.timestamp_subsec_nanos() == 0
}

impl QueryScalar for DateTime<Utc> {
    fn is_zero(&self) -> bool {
        is_epoch(self)
    }

    fn to_query_param(&self) -> Result<String> {
        Ok(format(self))
    }

    fn from_query_param(raw: &str) -> Result<Self> {
        Ok(parse(raw)?.with_timezone(&Utc))
    }
}

impl QueryScalar for DateTime<FixedOffset> {
    fn is_zero(&self) -> bool {
        is_epoch(self)
    }

    fn to_query_param(&self) -> Result<String> {
        Ok(format(self))
    }

    fn from_query_param(raw: &str) -> Result<Self> {
        parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn utc(h: u32, nanos: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_nano_opt(h, 4, 5, nanos))
            .unwrap()
            .and_utc()
    }

    #[test]
    fn utc_uses_z() {
        assert_eq!(utc(15, 0).to_query_param().unwrap(), "2024-01-02T15:04:05Z");
    }

    #[test]
    fn keeps_sub_seconds() {
        assert_eq!(
            utc(15, 123_000_000).to_query_param().unwrap(),
            "2024-01-02T15:04:05.123Z"
        );
        let parsed = DateTime::<Utc>::from_query_param("2024-01-02T15:04:05.123Z").unwrap();
        assert_eq!(parsed, utc(15, 123_000_000));
    }

    #[test]
    fn keeps_offset() {
        let raw = "2024-01-02T15:04:05+09:00";
        let parsed = DateTime::<FixedOffset>::from_query_param(raw).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(parsed.to_query_param().unwrap(), raw);

        let as_utc = DateTime::<Utc>::from_query_param(raw).unwrap();
        assert_eq!(as_utc, utc(6, 0));
    }

    #[test]
    fn strict_rfc3339() {
        for raw in ["2024-01-02", "2024-01-02T15:04:05", "2024-01-02 15:04", "yesterday"] {
            let err = DateTime::<Utc>::from_query_param(raw).unwrap_err();
            assert!(err.is_parse(), "{raw}: {err}");
        }
    }

    #[test]
    fn epoch_is_zero() {
        assert!(DateTime::<Utc>::default().is_zero());
        assert!(DateTime::<FixedOffset>::default().is_zero());
        assert!(!utc(15, 0).is_zero());
    }
}
