use serde::Serialize;
use tomldoc::{toml, Array, Document, Table, Value};

#[test]
fn test_toml_macro_null() {
    let value = toml!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_toml_macro_booleans() {
    assert_eq!(toml!(true), Value::Bool(true));
    assert_eq!(toml!(false), Value::Bool(false));
}

#[test]
fn test_toml_macro_numbers() {
    assert_eq!(toml!(42), Value::Integer(42));
    assert_eq!(toml!(3.5), Value::Double(3.5));
    assert_eq!(toml!(-123), Value::Integer(-123));
}

#[test]
fn test_toml_macro_strings() {
    assert_eq!(toml!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(toml!(""), Value::String(String::new()));
}

#[test]
fn test_toml_macro_arrays() {
    assert_eq!(toml!([]), Value::Array(Array::new()));

    let numbers = toml!([1, 2, 3]);
    let expected: Array = vec![Value::from(1), Value::from(2), Value::from(3)].into();
    assert_eq!(numbers, Value::Array(expected));

    let mixed = toml!([1, "hello", true, null]);
    assert_eq!(mixed.to_array().len(), 4);
    assert!(mixed[3].is_null());
}

#[test]
fn test_toml_macro_tables() {
    assert_eq!(toml!({}), Value::Table(Table::new()));

    let person = toml!({
        "name": "Alice",
        "age": 30,
        "active": true,
    });

    let table = person.to_table();
    assert_eq!(table.len(), 3);
    assert_eq!(table["name"], Value::from("Alice"));
    assert_eq!(table["age"], Value::from(30));
    assert_eq!(table["active"], Value::from(true));
}

#[test]
fn test_toml_macro_nested() {
    let config = toml!({
        "server": {
            "host": "localhost",
            "ports": [8080, 8081]
        },
        "features": ["auth", "logging"]
    });

    assert_eq!(config["server"]["host"].to_str(), "localhost");
    assert_eq!(config["server"]["ports"][1].to_integer(), 8081);
    assert_eq!(config["features"][0].to_str(), "auth");

    let doc = Document::from_value(config).unwrap();
    assert_eq!(
        doc.to_toml().unwrap(),
        "features = [\"auth\", \"logging\"]\n\n[server]\nhost = \"localhost\"\nports = [8080, 8081]\n"
    );
}

#[test]
fn test_toml_macro_with_expressions() {
    #[derive(Serialize)]
    struct Limits {
        max: u32,
    }

    let name = "worker".to_string();
    let value = toml!({
        "name": (name.clone()),
        "limits": (Limits { max: 8 })
    });

    assert_eq!(value["name"].to_str(), "worker");
    assert_eq!(value["limits"]["max"].to_integer(), 8);
}

#[test]
fn test_toml_macro_key_order() {
    let value = toml!({ "z": 1, "a": 2, "m": 3 });
    let table = value.to_table();
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_toml_macro_unserializable_expression_is_null() {
    use std::collections::BTreeMap;

    let mut grid = BTreeMap::new();
    grid.insert((0, 1), "cell");

    assert!(tomldoc::to_value(&grid).is_err());
    let value = toml!({ "grid": (grid.clone()) });
    assert!(value["grid"].is_null());
}
