//! Plain-mapping filters handed to loaders
//!
//! A [`Filter`] is a JSON object. Loaders decide what it means; the helpers here
//! implement the conventions used by the in-memory loader:
//!
//! - Exact match: `{"field": value}`
//! - Comparison by key suffix: `{"field>": v, "field<": v, "field>=": v, "field<=": v, "field!=": v}`
//! - Comparison by operator object: `{"field": {"_eq": v, "_gt": v, "_in": [..]}}`
//! - Logical: `{"_and": [filter, ..]}`, `{"_or": [filter, ..]}`
//!
//! Conditions whose value is `null` do not constrain anything, matching input
//! objects where unset members come through as nulls.

use async_graphql::Value as GqlValue;
use async_graphql::dynamic::InputObject;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A filter as a plain mapping
pub type Filter = Map<String, Value>;

/// A GraphQL input object type used as the `where` argument of paged fields
pub trait WhereFilter: Send + Sync + 'static {
    /// The input object type name (e.g. "GroupWhereFilter")
    fn type_name() -> &'static str;

    /// The input object definition to register in the schema
    fn input_object() -> InputObject;
}

/// Convert a GraphQL input value into a plain mapping.
///
/// `null` (or anything that is not an object) yields `None`. Top-level members
/// that are `null` are dropped: loaders never see a null member, so an unset
/// input field is indistinguishable from one the input type does not declare.
pub fn from_gql(value: &GqlValue) -> Option<Filter> {
    match value.clone().into_json().ok()? {
        Value::Object(mut map) => {
            map.retain(|_, condition| !condition.is_null());
            Some(map)
        }
        _ => None,
    }
}

/// Single-key filter, as used for foreign-key constraints
pub fn eq(field: &str, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(field.to_string(), value.into());
    filter
}

/// Combine a caller filter with fixed constraints; both must match
pub fn merge(where_: Option<Filter>, extended: Option<Filter>) -> Option<Filter> {
    match (where_, extended) {
        (Some(where_), Some(extended)) => {
            let mut merged = Filter::new();
            merged.insert(
                "_and".to_string(),
                Value::Array(vec![Value::Object(where_), Value::Object(extended)]),
            );
            Some(merged)
        }
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// Check a filter against an attribute lookup.
///
/// `lookup` returns the JSON value of an attribute, or `None` if the entity
/// has no such attribute (which never matches a non-null condition).
pub fn matches<F>(filter: &Filter, lookup: &F) -> bool
where
    F: Fn(&str) -> Option<Value>,
{
    filter.iter().all(|(key, condition)| match key.as_str() {
        "_and" => sub_filters(condition).iter().all(|f| matches(f, lookup)),
        "_or" => {
            let subs = sub_filters(condition);
            subs.is_empty() || subs.iter().any(|f| matches(f, lookup))
        }
        _ if condition.is_null() => true,
        _ => {
            let (field, op) = split_key(key);
            match condition {
                Value::Object(ops) if op == "_eq" => ops
                    .iter()
                    .all(|(op, operand)| check(lookup(field).as_ref(), op, operand)),
                _ => check(lookup(field).as_ref(), op, condition),
            }
        }
    })
}

fn sub_filters(value: &Value) -> Vec<Filter> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        Value::Object(map) => vec![map.clone()],
        _ => Vec::new(),
    }
}

fn split_key(key: &str) -> (&str, &'static str) {
    for (suffix, op) in [
        (">=", "_ge"),
        ("<=", "_le"),
        ("!=", "_ne"),
        (">", "_gt"),
        ("<", "_lt"),
    ] {
        if let Some(field) = key.strip_suffix(suffix) {
            return (field, op);
        }
    }
    (key, "_eq")
}

fn check(actual: Option<&Value>, op: &str, operand: &Value) -> bool {
    if operand.is_null() {
        return true;
    }
    let Some(actual) = actual else {
        return false;
    };

    match op {
        "_eq" => compare(actual, operand) == Some(Ordering::Equal),
        "_ne" => compare(actual, operand) != Some(Ordering::Equal),
        "_gt" => compare(actual, operand) == Some(Ordering::Greater),
        "_lt" => compare(actual, operand) == Some(Ordering::Less),
        "_ge" => matches!(
            compare(actual, operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        "_le" => matches!(
            compare(actual, operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        "_in" => operand
            .as_array()
            .is_some_and(|items| items.iter().any(|v| compare(actual, v) == Some(Ordering::Equal))),
        "_like" | "_ilike" => match (actual.as_str(), operand.as_str()) {
            (Some(a), Some(pattern)) => like(a, pattern, op == "_ilike"),
            _ => false,
        },
        _ => false,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// SQL-style pattern match where `%` stands for any run of characters
fn like(value: &str, pattern: &str, case_insensitive: bool) -> bool {
    let (value, pattern) = if case_insensitive {
        (value.to_lowercase(), pattern.to_lowercase())
    } else {
        (value.to_string(), pattern.to_string())
    };

    let parts: Vec<&str> = pattern.split('%').collect();
    if parts.len() == 1 {
        return value == pattern;
    }

    let mut rest = value.as_str();
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}
