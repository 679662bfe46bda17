//! Folding one field into a record along its header path.
//!
//! Arrays are append-only. A terminal `key[N]` always pushes the value onto
//! the array. An intermediate `key[N]` reuses element `N` when it already
//! exists, otherwise it pushes exactly one new object and descends into it.
//! `N` therefore only identifies an element created earlier in the same row;
//! with sparse or out-of-order indices the resulting position can differ
//! from `N` (`a[3].x` on an empty array lands at position 0).

use crate::core::coerce::coerce;
use crate::domain::model::{HeaderPath, Segment};
use crate::utils::error::{ConvertError, Result};
use serde_json::{Map, Value};

pub fn place(record: &mut Map<String, Value>, path: &HeaderPath, raw: &str) -> Result<()> {
    let Some((last, parents)) = path.segments.split_last() else {
        return Ok(());
    };

    let mut current = record;
    for segment in parents {
        current = descend(current, segment, &path.header)?;
    }

    match last.index {
        Some(_) => {
            array_at(current, &last.key, &path.header)?.push(coerce(raw));
        }
        None => {
            if let Some(existing) = current.get(&last.key) {
                if existing.is_object() || existing.is_array() {
                    return Err(conflict(&path.header, &last.key, "a value", existing));
                }
            }
            current.insert(last.key.clone(), coerce(raw));
        }
    }
    Ok(())
}

fn descend<'a>(
    current: &'a mut Map<String, Value>,
    segment: &Segment,
    header: &str,
) -> Result<&'a mut Map<String, Value>> {
    match segment.index {
        Some(index) => {
            let array = array_at(current, &segment.key, header)?;
            let position = if index < array.len() {
                index
            } else {
                array.push(Value::Object(Map::new()));
                array.len() - 1
            };
            match &mut array[position] {
                Value::Object(map) => Ok(map),
                other => Err(conflict(header, &segment.key, "an array of objects", other)),
            }
        }
        None => {
            let value = current
                .entry(segment.key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            match value {
                Value::Object(map) => Ok(map),
                other => Err(conflict(header, &segment.key, "an object", other)),
            }
        }
    }
}

fn array_at<'a>(
    current: &'a mut Map<String, Value>,
    key: &str,
    header: &str,
) -> Result<&'a mut Vec<Value>> {
    let value = current
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    match value {
        Value::Array(array) => Ok(array),
        other => Err(conflict(header, key, "an array", other)),
    }
}

fn conflict(header: &str, key: &str, expected: &'static str, found: &Value) -> ConvertError {
    ConvertError::TypeConflict {
        header: header.to_string(),
        key: key.to_string(),
        expected,
        found: kind_of(found),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "an object",
        Value::Array(_) => "an array",
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
    }
}

/// Reads the value a header path points at. Array indices are used as
/// positions, which matches what `place` produced whenever the indices of a
/// row were dense and in order.
pub fn read_path<'a>(record: &'a Map<String, Value>, path: &HeaderPath) -> Option<&'a Value> {
    let (last, parents) = path.segments.split_last()?;

    let mut current = record;
    for segment in parents {
        let value = current.get(&segment.key)?;
        let value = match segment.index {
            Some(index) => value.as_array()?.get(index)?,
            None => value,
        };
        current = value.as_object()?;
    }

    let value = current.get(&last.key)?;
    match last.index {
        Some(index) => value.as_array()?.get(index),
        None => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::parse_header;
    use serde_json::json;

    fn build(fields: &[(&str, &str)]) -> Result<Value> {
        let mut record = Map::new();
        for (header, raw) in fields {
            place(&mut record, &parse_header(header)?, raw)?;
        }
        Ok(Value::Object(record))
    }

    #[test]
    fn test_top_level_scalar() {
        assert_eq!(build(&[("name", "Alice")]).unwrap(), json!({"name": "Alice"}));
    }

    #[test]
    fn test_nested_object() {
        assert_eq!(build(&[("a.b", "x")]).unwrap(), json!({"a": {"b": "x"}}));
    }

    #[test]
    fn test_siblings_share_parent() {
        assert_eq!(
            build(&[("user.name", "Bob"), ("user.age", "30"), ("user.admin", "false")]).unwrap(),
            json!({"user": {"name": "Bob", "age": 30, "admin": false}})
        );
    }

    #[test]
    fn test_terminal_array_appends() {
        assert_eq!(
            build(&[("tags[0]", "red"), ("tags[1]", "blue")]).unwrap(),
            json!({"tags": ["red", "blue"]})
        );
    }

    #[test]
    fn test_terminal_array_index_is_not_a_slot() {
        assert_eq!(
            build(&[("tags[1]", "first"), ("tags[0]", "second")]).unwrap(),
            json!({"tags": ["first", "second"]})
        );
        assert_eq!(build(&[("tags[5]", "x")]).unwrap(), json!({"tags": ["x"]}));
    }

    #[test]
    fn test_same_index_coalesces_into_one_element() {
        assert_eq!(
            build(&[("a[0].b", "1"), ("a[0].c", "2")]).unwrap(),
            json!({"a": [{"b": 1, "c": 2}]})
        );
    }

    #[test]
    fn test_dense_indices_build_separate_elements() {
        assert_eq!(
            build(&[
                ("items[0].sku", "A1"),
                ("items[0].qty", "2"),
                ("items[1].sku", "B2"),
                ("items[1].qty", "5"),
            ])
            .unwrap(),
            json!({"items": [{"sku": "A1", "qty": 2}, {"sku": "B2", "qty": 5}]})
        );
    }

    #[test]
    fn test_sparse_index_appends_at_end() {
        assert_eq!(
            build(&[("a[3].x", "1")]).unwrap(),
            json!({"a": [{"x": 1}]})
        );
    }

    #[test]
    fn test_out_of_order_indices_follow_append_order() {
        // a[1] appends element 0; a[0] then finds that same element.
        assert_eq!(
            build(&[("a[1].x", "1"), ("a[0].y", "2")]).unwrap(),
            json!({"a": [{"x": 1, "y": 2}]})
        );
    }

    #[test]
    fn test_deep_mixed_path() {
        assert_eq!(
            build(&[("order.lines[0].product.name", "Pen"), ("order.lines[0].tags[0]", "office")])
                .unwrap(),
            json!({"order": {"lines": [{"product": {"name": "Pen"}, "tags": ["office"]}]}})
        );
    }

    #[test]
    fn test_duplicate_scalar_path_overwrites_in_field_order() {
        assert_eq!(
            build(&[("a.b", "first"), ("a.b", "second")]).unwrap(),
            json!({"a": {"b": "second"}})
        );
    }

    #[test]
    fn test_repeated_terminal_array_header_appends() {
        assert_eq!(
            build(&[("a[0]", "1"), ("a[0]", "2")]).unwrap(),
            json!({"a": [1, 2]})
        );
    }

    #[test]
    fn test_array_then_object_conflict() {
        let err = build(&[("a[0]", "x"), ("a.b", "y")]).unwrap_err();
        match err {
            ConvertError::TypeConflict {
                header,
                key,
                expected,
                found,
            } => {
                assert_eq!(header, "a.b");
                assert_eq!(key, "a");
                assert_eq!(expected, "an object");
                assert_eq!(found, "an array");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_object_then_array_conflict() {
        let err = build(&[("a.b", "y"), ("a[0]", "x")]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::TypeConflict { expected: "an array", found: "an object", .. }
        ));
    }

    #[test]
    fn test_scalar_then_object_conflict() {
        let err = build(&[("a", "1"), ("a.b", "2")]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::TypeConflict { expected: "an object", found: "a number", .. }
        ));
    }

    #[test]
    fn test_object_then_scalar_conflict() {
        let err = build(&[("a.b", "1"), ("a", "2")]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::TypeConflict { expected: "a value", found: "an object", .. }
        ));
    }

    #[test]
    fn test_scalar_element_then_object_element_conflict() {
        let err = build(&[("a[0]", "x"), ("a[0].b", "y")]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::TypeConflict { expected: "an array of objects", found: "a string", .. }
        ));
    }

    #[test]
    fn test_read_path_round_trip() {
        let fields = [
            ("id", "007"),
            ("user.name", "Alice"),
            ("user.active", "true"),
            ("orders[0].total", "3.14"),
            ("orders[0].tags[0]", "gift"),
            ("orders[1].total", "12"),
        ];
        let record = build(&fields).unwrap();
        let record = record.as_object().unwrap();

        for (header, raw) in fields {
            let path = parse_header(header).unwrap();
            assert_eq!(read_path(record, &path), Some(&coerce(raw)), "header {}", header);
        }
    }

    #[test]
    fn test_read_path_missing() {
        let record = build(&[("a.b", "x")]).unwrap();
        let record = record.as_object().unwrap();
        assert_eq!(read_path(record, &parse_header("a.c").unwrap()), None);
        assert_eq!(read_path(record, &parse_header("a.b[0]").unwrap()), None);
        assert_eq!(read_path(record, &parse_header("z").unwrap()), None);
    }
}
