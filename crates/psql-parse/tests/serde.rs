//! Tests for the JSON form of the AST.
#![cfg(feature = "serde")]

mod common;
use common::*;

use psql_parse::visit::validate;

#[test]
fn statement_serializes_to_json() {
    let statement = parse("SELECT a AS x FROM t WHERE a > 1");
    let value = serde_json::to_value(&statement).unwrap();
    let body = &value["Select"]["query"]["body"]["Select"];
    assert!(body.is_object(), "{value:#}");
    assert_eq!(body["from"][0]["Table"]["name"]["name"], "t");
}

#[test]
fn spans_are_serialized() {
    let statement = parse("DELETE FROM t");
    let value = serde_json::to_value(&statement).unwrap();
    assert_eq!(value["Delete"]["span"]["start"]["line"], 1);
    assert_eq!(value["Delete"]["span"]["start"]["column"], 1);
}

#[test]
fn violations_serialize() {
    let violations = validate(&parse("SELECT 1 + *"));
    let value = serde_json::to_value(&violations).unwrap();
    assert_eq!(value[0]["kind"], "MisplacedAsterisk");
}
