use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_qp::{Config, Values};

/// Round trips `data` through a query string with both encodings and
/// returns the query-string form.
fn roundtrip<T>(data: &T) -> String
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let mut queries = Vec::new();

    for form_encoding in [false, true] {
        let config = Config::new().use_form_encoding(form_encoding);

        let values = config.to_values(data).expect("serialize");
        let serialized = values.to_query_string(form_encoding);

        let parsed = Values::parse(&serialized).expect("parse");
        pretty_assertions::assert_eq!(values, parsed);

        let deserialized: T = config.from_values(&parsed).expect("deserialize");
        // check we get the same data back
        pretty_assertions::assert_eq!(data, &deserialized);
        queries.push(serialized);
    }
    queries.swap_remove(0)
}

// ========== BASIC STRUCTS ==========

#[derive(Debug, PartialEq, Deserialize, Serialize)]
struct FlatStruct {
    a: u8,
    b: u8,
}

#[test]
fn flat_struct() {
    let query = roundtrip(&FlatStruct { a: 1, b: 2 });
    insta::assert_snapshot!(query, @"a=1&b=2");
}

// ========== PRIMITIVE TYPES ==========

#[derive(Debug, PartialEq, Deserialize, Serialize)]
struct PrimitiveTypes {
    bool_val: bool,
    i8_val: i8,
    i16_val: i16,
    i32_val: i32,
    i64_val: i64,
    i128_val: i128,
    u8_val: u8,
    u16_val: u16,
    u32_val: u32,
    u64_val: u64,
    u128_val: u128,
    f32_val: f32,
    f64_val: f64,
    char_val: char,
    string_val: String,
}

#[test]
fn primitive_types() {
    let query = roundtrip(&PrimitiveTypes {
        bool_val: true,
        i8_val: -128,
        i16_val: -32768,
        i32_val: -2147483648,
        i64_val: -9223372036854775808,
        i128_val: -1,
        u8_val: 255,
        u16_val: 65535,
        u32_val: 4294967295,
        u64_val: 18446744073709551615,
        u128_val: 1,
        f32_val: 1.5,
        f64_val: -0.125,
        char_val: 'x',
        string_val: "hello world".to_string(),
    });
    insta::assert_snapshot!(query, @"bool_val=true&char_val=x&f32_val=1.5&f64_val=-0.125&i128_val=-1&i16_val=-32768&i32_val=-2147483648&i64_val=-9223372036854775808&i8_val=-128&string_val=hello+world&u128_val=1&u16_val=65535&u32_val=4294967295&u64_val=18446744073709551615&u8_val=255");
}

// ========== SPECIAL CHARACTERS ==========

#[derive(Debug, PartialEq, Deserialize, Serialize)]
struct SpecialChars {
    spaces: String,
    symbols: String,
    unicode: String,
    empty: String,
}

#[test]
fn special_characters() {
    let query = roundtrip(&SpecialChars {
        spaces: "a b  c".to_string(),
        symbols: "&=+%#?/".to_string(),
        unicode: "你好".to_string(),
        empty: String::new(),
    });
    insta::assert_snapshot!(query, @"empty=&spaces=a+b++c&symbols=%26%3D%2B%25%23?/&unicode=%E4%BD%A0%E5%A5%BD");
}

// ========== SEQUENCES AND OPTIONS ==========

#[derive(Debug, PartialEq, Deserialize, Serialize)]
struct Lists {
    ids: Vec<u32>,
    #[serde(default)]
    words: Vec<String>,
    maybe: Option<i32>,
    pair: (u8, u8),
}

#[test]
fn lists_and_options() {
    let query = roundtrip(&Lists {
        ids: vec![3, 1, 2],
        words: vec!["x y".to_string(), String::new()],
        maybe: Some(-1),
        pair: (7, 8),
    });
    insta::assert_snapshot!(query, @"ids=3&ids=1&ids=2&maybe=-1&pair=7&pair=8&words=x+y&words=");

    let query = roundtrip(&Lists {
        ids: vec![1],
        words: vec![],
        maybe: None,
        pair: (0, 0),
    });
    insta::assert_snapshot!(query, @"ids=1&pair=0&pair=0");
}

// ========== SERDE ATTRIBUTES ==========

#[derive(Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Renamed {
    first_name: String,
    #[serde(rename = "n")]
    count: u8,
}

#[test]
fn renamed_fields() {
    use pretty_assertions::assert_eq;

    // `firstName` encodes as `firstname` but decodes from `firstName`
    let data = Renamed {
        first_name: "Ann".to_string(),
        count: 1,
    };
    let values = serde_qp::to_values(&data).unwrap();
    assert_eq!(values, Values::from([("firstname", "Ann"), ("n", "1")]));
    assert!(serde_qp::from_values::<Renamed>(&values).is_err());

    let config = Config::new().default_naming(serde_qp::DefaultNaming::Lowercase);
    let values = config.to_values(&data).unwrap();
    assert_eq!(config.from_values::<Renamed>(&values).unwrap(), data);
}

// ========== RECORDS ==========

serde_qp::query_record! {
    #[derive(Debug, Default, PartialEq)]
    struct Record {
        name: String => "n",
        tags: Vec<String> => "t,omitzero",
        score: f64,
        hidden: bool => "-",
    }
}

#[test]
fn record_through_query_string() {
    let record = Record {
        name: "a+b c".to_string(),
        tags: vec!["x".to_string(), "%".to_string()],
        score: 0.5,
        hidden: false,
    };

    for form_encoding in [false, true] {
        let config = Config::new().use_form_encoding(form_encoding);
        let serialized = config.serialize_string(&record).unwrap();

        let mut decoded = Record::default();
        config.deserialize_str(&serialized, &mut decoded).unwrap();
        pretty_assertions::assert_eq!(record, decoded);
    }

    insta::assert_snapshot!(serde_qp::to_string(&record).unwrap(), @"n=a%2Bb+c&score=0.5&t=x&t=%25");
}
