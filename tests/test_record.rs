use std::fmt;

use pretty_assertions::assert_eq;
use serde_qp::{Config, DefaultNaming, Encoder, Error, Marshaler, Unmarshaler, Values};

serde_qp::query_record! {
    #[derive(Clone, Debug, Default, PartialEq)]
    struct Params {
        name: String => "name",
        count: i64 => "count,omitzero",
        ratio: f64,
        enabled: bool,
        port: u16 => "port",
        ids: Vec<u32> => "id",
        labels: Vec<String>,
        secret: String => "-",
    }
}

fn sample() -> Params {
    Params {
        name: "Carrot City".to_owned(),
        count: -3,
        ratio: 0.25,
        enabled: true,
        port: 8080,
        ids: vec![3, 1, 2],
        labels: vec!["a&b".to_owned(), "c=d".to_owned()],
        secret: "hunter2".to_owned(),
    }
}

#[test]
fn encode_record() {
    let values = serde_qp::encode(&sample()).unwrap();
    insta::assert_debug_snapshot!(values, @r#"
    {
        "count": [
            "-3",
        ],
        "enabled": [
            "true",
        ],
        "id": [
            "3",
            "1",
            "2",
        ],
        "labels": [
            "a&b",
            "c=d",
        ],
        "name": [
            "Carrot City",
        ],
        "port": [
            "8080",
        ],
        "ratio": [
            "0.25",
        ],
    }
    "#);
}

#[test]
fn round_trip_restores_every_included_field() {
    let params = sample();
    let values = serde_qp::encode(&params).unwrap();

    let mut decoded = Params::default();
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(
        decoded,
        Params {
            secret: String::new(),
            ..params
        }
    );
}

#[test]
fn encoding_is_idempotent() {
    let values = serde_qp::encode(&sample()).unwrap();
    let mut decoded = Params::default();
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(serde_qp::encode(&decoded).unwrap(), values);
}

#[test]
fn query_string_round_trip() {
    for form_encoding in [false, true] {
        let config = Config::new().use_form_encoding(form_encoding);
        let query = config.serialize_string(&sample()).unwrap();

        let mut decoded = Params::default();
        config.deserialize_str(&query, &mut decoded).unwrap();
        assert_eq!(decoded.labels, ["a&b", "c=d"], "{query}");
        assert_eq!(decoded.name, "Carrot City", "{query}");
    }
}

#[test]
fn query_string_encodings() {
    serde_qp::query_record! {
        struct Query {
            name: String,
            note: String,
        }
    }

    let query = Query {
        name: "Carrot City".to_owned(),
        note: "50% off/[all]".to_owned(),
    };
    insta::assert_snapshot!(
        serde_qp::to_string(&query).unwrap(),
        @"name=Carrot+City&note=50%25+off/[all]"
    );
    insta::assert_snapshot!(
        Config::new().use_form_encoding(true).serialize_string(&query).unwrap(),
        @"name=Carrot%20City&note=50%25%20off%2F%5Ball%5D"
    );
}

#[test]
fn skipped_field_is_never_touched() {
    let values = serde_qp::encode(&sample()).unwrap();
    assert!(!values.contains_key("secret"));
    assert!(!values.contains_key("-"));

    let mut decoded = Params {
        secret: "keep".to_owned(),
        ..Params::default()
    };
    let values = Values::from([("secret", "x"), ("-", "y")]);
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(decoded.secret, "keep");
}

#[test]
fn omitzero() {
    serde_qp::query_record! {
        #[derive(Debug, Default, PartialEq)]
        struct Query {
            name: String => "name",
            count: i64 => "count,omitzero",
        }
    }

    let values = serde_qp::encode(&Query {
        name: "x".to_owned(),
        count: 0,
    })
    .unwrap();
    assert_eq!(values, Values::from([("name", "x")]));

    let values = serde_qp::encode(&Query {
        name: "x".to_owned(),
        count: 5,
    })
    .unwrap();
    assert_eq!(values, Values::from([("name", "x"), ("count", "5")]));
}

#[test]
fn zero_without_omitzero_is_written() {
    let values = serde_qp::encode(&Params::default()).unwrap();
    assert_eq!(values.get("name"), Some(""));
    assert_eq!(values.get("ratio"), Some("0"));
    assert_eq!(values.get("enabled"), Some("false"));
    assert!(!values.contains_key("count"));
    assert!(!values.contains_key("id"));
}

#[test]
fn list_keeps_element_order() {
    let values = serde_qp::encode(&sample()).unwrap();
    assert_eq!(values.get_all("id"), ["3", "1", "2"]);

    let mut decoded = Params {
        ids: vec![9; 8],
        ..Params::default()
    };
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(decoded.ids, [3, 1, 2]);
}

#[test]
fn scalar_reads_first_value() {
    let values = Values::from([("name", "first"), ("name", "second")]);
    let mut decoded = Params::default();
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(decoded.name, "first");
}

#[test]
fn parse_error_names_key_without_rollback() {
    serde_qp::query_record! {
        #[derive(Debug, Default)]
        struct Query {
            a: String,
            b: i32 => "b",
            c: String,
        }
    }

    let values = Values::from([("a", "x"), ("b", "notnum"), ("c", "y")]);
    let mut decoded = Query::default();
    let err = serde_qp::decode(&values, &mut decoded).unwrap_err();

    assert_eq!(err.key(), Some("b"));
    assert!(err.is_parse());
    assert_eq!(
        err.to_string(),
        "field \"b\": cannot parse \"notnum\" as int: invalid digit found in string"
    );
    assert_eq!(decoded.a, "x");
    assert_eq!(decoded.b, 0);
    assert_eq!(decoded.c, "");
}

#[test]
fn unknown_keys_are_ignored() {
    let mut decoded = Params::default();
    serde_qp::decode(&Values::from([("zzz", "1")]), &mut decoded).unwrap();
    assert_eq!(decoded, Params::default());

    let values = Values::from([("zzz", "1"), ("name", "x")]);
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(
        decoded,
        Params {
            name: "x".to_owned(),
            ..Params::default()
        }
    );
}

#[test]
fn missing_keys_leave_fields_untouched() {
    let mut decoded = sample();
    serde_qp::decode(&Values::new(), &mut decoded).unwrap();
    assert_eq!(decoded, sample());
}

#[test]
fn colliding_keys_last_field_wins() {
    serde_qp::query_record! {
        struct Query {
            first: String => "k",
            second: String => "k",
        }
    }

    let values = serde_qp::encode(&Query {
        first: "1".to_owned(),
        second: "2".to_owned(),
    })
    .unwrap();
    assert_eq!(values.get_all("k"), ["2"]);
}

#[test]
fn default_naming() {
    serde_qp::query_record! {
        #[derive(Debug, Default, PartialEq)]
        #[allow(non_snake_case)]
        struct Query {
            UserID: u32,
        }
    }

    let values = serde_qp::encode(&Query { UserID: 7 }).unwrap();
    assert_eq!(values, Values::from([("userid", "7")]));

    // decoding reads `userID`, so the encoded key is not found
    let mut decoded = Query::default();
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(decoded.UserID, 0);

    serde_qp::decode(&Values::from([("userID", "7")]), &mut decoded).unwrap();
    assert_eq!(decoded.UserID, 7);

    let config = Config::new().default_naming(DefaultNaming::Lowercase);
    let mut decoded = Query::default();
    config.decode(&values, &mut decoded).unwrap();
    assert_eq!(decoded.UserID, 7);
}

#[test]
fn raw_identifier_fields_use_plain_key() {
    serde_qp::query_record! {
        #[derive(Debug, Default, PartialEq)]
        struct Event {
            r#type: String,
            name: String,
        }
    }

    let event = Event {
        r#type: "click".to_owned(),
        name: "x".to_owned(),
    };
    let values = serde_qp::encode(&event).unwrap();
    assert_eq!(values, Values::from([("type", "click"), ("name", "x")]));
    assert!(!values.contains_key("r#type"));

    let mut decoded = Event::default();
    serde_qp::decode(&Values::from([("type", "b")]), &mut decoded).unwrap();
    assert_eq!(decoded.r#type, "b");

    let mut decoded = Event::default();
    serde_qp::from_str(&serde_qp::to_string(&event).unwrap(), &mut decoded).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn scalar_conversions() {
    serde_qp::query_record! {
        #[derive(Debug, Default)]
        struct Query {
            small: f32,
            large: f64,
            flag: bool,
            unsigned: u8,
            letter: char,
        }
    }

    let values = serde_qp::encode(&Query {
        small: 0.1,
        large: 1e21,
        flag: false,
        unsigned: 255,
        letter: 'é',
    })
    .unwrap();
    insta::assert_snapshot!(
        values.to_string(),
        @"flag=false&large=1000000000000000000000&letter=%C3%A9&small=0.10000000149011612&unsigned=255"
    );

    let mut decoded = Query::default();
    let values = Values::from([("flag", "T"), ("unsigned", "7"), ("letter", "x")]);
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert!(decoded.flag);
    assert_eq!(decoded.unsigned, 7);
    assert_eq!(decoded.letter, 'x');

    for (key, raw) in [
        ("flag", "yes"),
        ("unsigned", "+1"),
        ("unsigned", "256"),
        ("small", "1e40"),
        ("letter", "xy"),
    ] {
        let err = serde_qp::decode(&Values::from([(key, raw)]), &mut decoded).unwrap_err();
        assert_eq!(err.key(), Some(key));
        assert!(err.is_parse(), "{key}={raw}: {err}");
    }
}

/// A comma separated pair, with an empty string as its zero value.
#[derive(Debug, Default, PartialEq)]
struct Pair(String, String);

#[derive(Debug)]
struct PairError;

impl fmt::Display for PairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected two comma separated parts")
    }
}

impl std::error::Error for PairError {}

impl Marshaler for Pair {
    type Error = PairError;

    fn marshal_query_param(&self) -> Result<String, Self::Error> {
        if self.0.contains(',') {
            return Err(PairError);
        }
        Ok(format!("{},{}", self.0, self.1))
    }

    fn is_zero_query_param(&self) -> bool {
        self.0.is_empty() && self.1.is_empty()
    }
}

impl Unmarshaler for Pair {
    type Error = PairError;

    fn unmarshal_query_param(&mut self, raw: &str) -> Result<(), Self::Error> {
        let (a, b) = raw.split_once(',').ok_or(PairError)?;
        *self = Pair(a.to_owned(), b.to_owned());
        Ok(())
    }
}

serde_qp::query_record! {
    #[derive(Debug, Default, PartialEq)]
    struct Ranges {
        name: String,
        span: Pair => "span,omitzero",
        history: Vec<Pair> => "h",
    }
}

#[test]
fn capability_types() {
    let ranges = Ranges {
        name: "r".to_owned(),
        span: Pair("1".to_owned(), "5".to_owned()),
        history: vec![Pair("a".to_owned(), "b".to_owned())],
    };
    let values = serde_qp::encode(&ranges).unwrap();
    assert_eq!(
        values,
        Values::from([("name", "r"), ("span", "1,5"), ("h", "a,b")])
    );

    let mut decoded = Ranges::default();
    serde_qp::decode(&values, &mut decoded).unwrap();
    assert_eq!(decoded, ranges);

    let values = serde_qp::encode(&Ranges::default()).unwrap();
    assert!(!values.contains_key("span"));
}

#[test]
fn capability_errors_propagate() {
    let ranges = Ranges {
        name: "r".to_owned(),
        span: Pair("1,2".to_owned(), "3".to_owned()),
        history: vec![],
    };
    let err = serde_qp::encode(&ranges).unwrap_err();
    assert!(matches!(err, Error::Capability(_)));
    assert_eq!(err.to_string(), "expected two comma separated parts");

    let mut decoded = Ranges::default();
    let values = Values::from([("name", "r"), ("h", "a,b"), ("h", "oops")]);
    let err = serde_qp::decode(&values, &mut decoded).unwrap_err();
    assert_eq!(err.key(), Some("h"));
    assert!(matches!(err.root(), Error::Capability(_)));
    assert_eq!(
        err.to_string(),
        "field \"h\": expected two comma separated parts"
    );
    assert_eq!(decoded.name, "r");
    assert!(decoded.history.is_empty());
}

#[test]
fn encoder_keeps_partial_output() {
    let ranges = Ranges {
        name: "r".to_owned(),
        span: Pair("1,2".to_owned(), "3".to_owned()),
        history: vec![Pair("a".to_owned(), "b".to_owned())],
    };
    let mut encoder = Encoder::new(Config::default());
    assert!(encoder.encode(&ranges).is_err());
    assert_eq!(encoder.into_values(), Values::from([("name", "r")]));
}
