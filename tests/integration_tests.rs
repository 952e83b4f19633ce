use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tomldoc::{
    from_str, to_string, to_string_pretty, to_string_with_options, to_value, Array, DateTime,
    DateTimeKind, Document, Error, Table, TomlOptions, Value, ValueType,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Database {
    host: String,
    port: u16,
    replicas: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Service {
    name: String,
    enabled: bool,
    ratio: f64,
    database: Database,
    plugins: Vec<Plugin>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Plugin {
    id: u32,
    label: String,
}

fn sample_service() -> Service {
    Service {
        name: "billing".to_string(),
        enabled: true,
        ratio: 0.25,
        database: Database {
            host: "db.internal".to_string(),
            port: 5432,
            replicas: vec!["r1".to_string(), "r2".to_string()],
        },
        plugins: vec![
            Plugin {
                id: 1,
                label: "audit".to_string(),
            },
            Plugin {
                id: 2,
                label: "cache".to_string(),
            },
        ],
    }
}

#[test]
fn test_table_section_round_trip() {
    let input = "[a]\nb = 1\nc = \"x\"\n";
    let doc = Document::from_toml(input).unwrap();

    assert!(doc.is_table());
    assert_eq!(doc["a"]["b"], Value::Integer(1));
    assert_eq!(doc["a"]["c"], Value::String("x".to_string()));

    let output = doc.to_toml().unwrap();
    assert_eq!(output, input);
    assert_eq!(Document::from_toml(&output).unwrap(), doc);
}

#[test]
fn test_mixed_array() {
    let doc = Document::from_toml("a = [1, \"two\", true]").unwrap();
    let arr = doc["a"].to_array();

    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0].value_type(), ValueType::Integer);
    assert_eq!(arr[1].value_type(), ValueType::String);
    assert_eq!(arr[2].value_type(), ValueType::Bool);
    assert_eq!(doc.to_toml().unwrap(), "a = [1, \"two\", true]\n");
}

#[test]
fn test_syntax_error_position() {
    let mut doc = Document::new();
    let err = doc.parse("a = ").unwrap_err();

    assert!(matches!(err, Error::Syntax { .. }));
    assert_eq!(err.line(), 1);
    assert!(err.column() > 0);
    assert!(!err.message().is_empty());
    assert!(doc.is_empty());
    assert_eq!(doc.to_toml().unwrap(), "");
}

#[test]
fn test_syntax_error_on_later_line() {
    let err = Document::from_toml("a = 1\nb = 2\nc = ]\n").unwrap_err();
    assert_eq!(err.line(), 3);
    assert!(err.column() >= 5);
}

#[test]
fn test_local_date_round_trip() {
    let doc = Document::from_toml("d = 2024-01-02").unwrap();
    let date = doc["d"].as_date_time().copied().unwrap();

    assert_eq!(date.kind(), DateTimeKind::LocalDate);
    assert!(date.time().is_none());
    assert!(date.offset().is_none());
    assert_eq!(doc.to_toml().unwrap(), "d = 2024-01-02\n");
}

#[test]
fn test_all_datetime_shapes_survive() {
    let input = "odt = 1979-05-27T07:32:00Z\n\
                 odt2 = 1979-05-27T00:32:00.999999-07:00\n\
                 ldt = 1979-05-27T07:32:00\n\
                 ld = 1979-05-27\n\
                 lt = 07:32:00\n";
    let doc = Document::from_toml(input).unwrap();

    let fallback: DateTime = "00:00:00".parse().unwrap();
    assert_eq!(
        doc["odt"].to_date_time_or(fallback).kind(),
        DateTimeKind::OffsetDateTime
    );
    assert_eq!(doc["missing"].to_date_time_or(fallback), fallback);
    assert_eq!(
        doc["ldt"].as_date_time().unwrap().kind(),
        DateTimeKind::LocalDateTime
    );
    assert_eq!(doc["ld"].as_date_time().unwrap().kind(), DateTimeKind::LocalDate);
    assert_eq!(doc["lt"].as_date_time().unwrap().kind(), DateTimeKind::LocalTime);
    assert_eq!(doc.to_toml().unwrap(), input);
}

#[test]
fn test_special_floats_round_trip() {
    let doc = Document::from_toml("a = nan\nb = inf\nc = -inf\nd = [nan, 1.5]\n").unwrap();
    assert!(doc["a"].to_double().is_nan());
    assert_eq!(doc["c"].to_double(), f64::NEG_INFINITY);

    let text = doc.to_toml().unwrap();
    assert_eq!(text, "a = nan\nb = inf\nc = -inf\nd = [nan, 1.5]\n");
    assert_eq!(Document::from_toml(&text).unwrap(), doc);
}

#[test]
fn test_missing_lookups_are_undefined() {
    let doc = Document::from_toml("[server]\nport = 80\n").unwrap();

    assert!(doc["nope"].is_undefined());
    assert!(doc["server"]["nope"]["deeper"].is_undefined());
    assert!(doc["server"][3].is_undefined());
    assert_eq!(doc["server"]["host"].to_str_or("localhost"), "localhost");
    assert_eq!(doc["server"]["port"].to_str_or("none"), "none");
    assert_eq!(doc["server"]["port"].to_integer_or(0), 80);
}

#[test]
fn test_copy_on_write_through_document() {
    let doc = Document::from_toml("[a]\nb = 1\n").unwrap();
    let original = doc.clone();

    let mut root = doc.table();
    let mut section = root["a"].to_table();
    section.insert("b", 2);
    section.insert("c", "new");
    root.insert("a", section);

    let mut edited = Document::new();
    edited.set_table(root);

    assert_eq!(doc, original);
    assert_eq!(doc["a"]["b"], Value::Integer(1));
    assert!(doc["a"]["c"].is_undefined());
    assert_eq!(edited["a"]["b"], Value::Integer(2));
    assert_eq!(edited.to_toml().unwrap(), "[a]\nb = 2\nc = \"new\"\n");
}

#[test]
fn test_arrays_of_tables() {
    let input = "[[fruit]]\nname = \"apple\"\n\n[[fruit]]\nname = \"banana\"\n";
    let doc = Document::from_toml(input).unwrap();

    let fruit = doc["fruit"].to_array();
    assert_eq!(fruit.len(), 2);
    assert_eq!(fruit[1]["name"].to_str(), "banana");
    assert_eq!(doc.to_toml().unwrap(), input);
}

#[test]
fn test_inline_tables_option() {
    let doc = Document::from_toml("[owner]\nname = \"Tom\"\n").unwrap();
    let options = TomlOptions::new().with_inline_tables(true);

    let output = doc.to_toml_with_options(&options).unwrap();
    assert_eq!(output, "owner = { name = \"Tom\" }\n");
    assert_eq!(Document::from_toml(&output).unwrap(), doc);
}

#[test]
fn test_array_of_tables_option_disabled() {
    let doc = Document::from_toml("[[p]]\nx = 1\n").unwrap();
    let options = TomlOptions::new().with_array_of_tables(false);

    let output = doc.to_toml_with_options(&options).unwrap();
    assert_eq!(output, "p = [{ x = 1 }]\n");
    assert_eq!(Document::from_toml(&output).unwrap(), doc);
}

#[test]
fn test_indent_option() {
    let doc = Document::from_toml("[a]\nx = 1\n\n[a.b]\ny = 2\n").unwrap();
    let output = doc
        .to_toml_with_options(&TomlOptions::new().with_indent(4))
        .unwrap();

    assert_eq!(output, "[a]\n    x = 1\n\n    [a.b]\n        y = 2\n");
    assert_eq!(Document::from_toml(&output).unwrap(), doc);
}

#[test]
fn test_quoted_keys_and_escapes() {
    let mut table = Table::new();
    table.insert("plain_key", "tab\there");
    table.insert("needs quotes", "say \"hi\"");
    let doc = Document::from_table(table);

    let output = doc.to_toml().unwrap();
    assert_eq!(
        output,
        "plain_key = \"tab\\there\"\n\"needs quotes\" = \"say \\\"hi\\\"\"\n"
    );
    assert_eq!(Document::from_toml(&output).unwrap(), doc);
}

#[test]
fn test_null_in_array_is_rejected() {
    let mut table = Table::new();
    table.insert("a", vec![Value::from(1), Value::Null]);
    let err = Document::from_table(table).to_toml().unwrap_err();
    assert!(matches!(err, Error::UnsupportedValue(_)));
}

#[test]
fn test_serde_struct_round_trip() {
    let service = sample_service();
    let text = to_string(&service).unwrap();

    assert!(text.starts_with("name = \"billing\"\nenabled = true\nratio = 0.25\n"));
    assert!(text.contains("\n[database]\n"));
    assert!(text.contains("\n[[plugins]]\nid = 1\n"));

    let back: Service = from_str(&text).unwrap();
    assert_eq!(back, service);
}

#[test]
fn test_serde_pretty_and_options_agree() {
    let service = sample_service();
    let pretty = to_string_pretty(&service).unwrap();
    let same = to_string_with_options(&service, &TomlOptions::pretty()).unwrap();

    assert_eq!(pretty, same);
    assert!(pretty.contains("[database]\n  host = \"db.internal\"\n"));
    let back: Service = from_str(&pretty).unwrap();
    assert_eq!(back, service);
}

#[test]
fn test_serde_map_root() {
    let mut map = HashMap::new();
    map.insert("alpha".to_string(), 1);
    let text = to_string(&map).unwrap();
    assert_eq!(text, "alpha = 1\n");
}

#[test]
fn test_type_mismatch_error() {
    let result: Result<Database, Error> = from_str("host = 1\nport = 2\nreplicas = []\n");
    assert!(result.is_err());
}

#[test]
fn test_value_json_interop() {
    let doc = Document::from_toml("name = \"x\"\nsizes = [1, 2]\n[nested]\nflag = false\n").unwrap();
    let json = serde_json::to_value(doc.root()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "name": "x",
            "sizes": [1, 2],
            "nested": { "flag": false }
        })
    );

    let back: Value = serde_json::from_value(json).unwrap();
    assert_eq!(&back, doc.root());
}

#[test]
fn test_to_value_then_document() {
    let value = to_value(&sample_service()).unwrap();
    assert!(value["plugins"].is_array());
    assert_eq!(value["database"]["port"].to_integer(), 5432);

    let doc = Document::from_value(value).unwrap();
    let back: Service = from_str(&doc.to_toml().unwrap()).unwrap();
    assert_eq!(back, sample_service());
}

#[test]
fn test_array_root_document() {
    let arr: Array = (1..=3).map(Value::from).collect();
    let doc = Document::from(arr);

    assert!(doc.is_array());
    assert_eq!(doc[2], Value::Integer(3));
    assert!(doc[3].is_undefined());
    assert!(doc.to_toml().is_err());
}
