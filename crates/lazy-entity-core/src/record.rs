// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static records and declared field decoding.
//!
//! A [`Record`] is an immutable value built from a payload mapping whose keys
//! are already snake_case. Field types decode through [`Decode`], which is
//! implemented for primitives, `Option<T>`, `Vec<T>` and every derived record,
//! so nested records are built recursively.
//!
//! # Coercion
//!
//! | Declared | Accepts |
//! |----------|---------|
//! | `String` | string; number or bool rendered as text |
//! | integers | integer number; numeric string |
//! | `f64`/`f32` | any number; numeric string |
//! | `bool` | bool |
//! | `Option<T>` | missing or `null` as `None`, else `T` |
//! | `Vec<T>` | array of `T` |
//! | records | object |

use serde_json::{Map, Value};

use crate::{error::Mismatch, rename::Renamed};

/// Schema-typed value with no fetch behavior.
///
/// Usually derived with `#[derive(Record)]`.
pub trait Record: Sized + Send + Sync + 'static {
    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Wire/declared renames local to this record.
    fn renamed() -> Renamed {
        Renamed::default()
    }

    /// Build the record from a snake_case mapping.
    fn from_payload(map: &Map<String, Value>) -> Result<Self, Mismatch>;

    /// Declared view of a snake_case mapping.
    ///
    /// Keeps declared fields only, keyed by declared name, with nested
    /// records projected the same way. Absent fields stay absent.
    fn project_fields(map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .filter(|(key, _)| Self::declares(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Check if a field is declared.
    fn declares(field: &str) -> bool {
        Self::FIELDS.contains(&field)
    }
}

/// Decoding of one declared field value.
///
/// `None` means the key was absent from the payload.
pub trait Decode: Sized {
    /// Decode a present or absent value.
    fn decode(value: Option<&Value>) -> Result<Self, Mismatch>;

    /// Declared view of a present value.
    ///
    /// Scalars pass through; records rename and filter their keys.
    fn project(value: &Value) -> Value {
        value.clone()
    }
}

/// Short type description used in mismatch reports.
pub fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "bool",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object"
    }
}

/// Decode a record nested inside another payload.
///
/// Used by derived `Decode` impls.
pub fn decode_record<R: Record>(value: Option<&Value>) -> Result<R, Mismatch> {
    match value {
        Some(Value::Object(map)) => R::from_payload(map),
        other => Err(Mismatch::new("object", kind_of(other)))
    }
}

/// Project a record nested inside another payload.
///
/// Used by derived `Decode` impls.
pub fn project_record<R: Record>(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(R::project_fields(map)),
        other => other.clone()
    }
}

impl Decode for String {
    fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
        match value {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            other => Err(Mismatch::new("string", kind_of(other)))
        }
    }
}

impl Decode for bool {
    fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
        match value {
            Some(Value::Bool(b)) => Ok(*b),
            other => Err(Mismatch::new("bool", kind_of(other)))
        }
    }
}

macro_rules! decode_int {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
                    let wide = match value {
                        Some(Value::Number(n)) => n
                            .as_i64()
                            .map(i128::from)
                            .or_else(|| n.as_u64().map(i128::from)),
                        Some(Value::String(s)) => s.trim().parse::<i128>().ok(),
                        _ => None
                    };
                    wide.and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| Mismatch::new(stringify!($ty), kind_of(value)))
                }
            }
        )*
    };
}

decode_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! decode_float {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                #[allow(clippy::cast_possible_truncation)]
                fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
                    let wide = match value {
                        Some(Value::Number(n)) => n.as_f64(),
                        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
                        _ => None
                    };
                    wide.map(|n| n as $ty)
                        .ok_or_else(|| Mismatch::new(stringify!($ty), kind_of(value)))
                }
            }
        )*
    };
}

decode_float!(f32, f64);

impl<T: Decode> Decode for Option<T> {
    fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
        match value {
            None | Some(Value::Null) => Ok(None),
            some => T::decode(some).map(Some)
        }
    }

    fn project(value: &Value) -> Value {
        match value {
            Value::Null => Value::Null,
            other => T::project(other)
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
        match value {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::decode(Some(item)).map_err(|e| e.at_index(i)))
                .collect(),
            other => Err(Mismatch::new("array", kind_of(other)))
        }
    }

    fn project(value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(T::project).collect()),
            other => other.clone()
        }
    }
}

impl Decode for Value {
    fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
        Ok(value.cloned().unwrap_or(Value::Null))
    }
}

/// Record-like data shaped as an ordered sequence of entries.
///
/// Gives list-shaped entities length, indexed access and iteration.
pub trait Listing {
    /// Entry type.
    type Item;

    /// All entries in payload order.
    fn entries(&self) -> &[Self::Item];

    /// Number of entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Check if there are no entries.
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Entry at `index`.
    fn get(&self, index: usize) -> Option<&Self::Item> {
        self.entries().get(index)
    }

    /// Iterate entries in payload order.
    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.entries().iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Series {
        target: i32,
        wins:   i32
    }

    impl Record for Series {
        const FIELDS: &'static [&'static str] = &["target", "wins"];

        fn from_payload(map: &Map<String, Value>) -> Result<Self, Mismatch> {
            Ok(Self {
                target: Decode::decode(map.get("target")).map_err(|e: Mismatch| e.at("target"))?,
                wins:   Decode::decode(map.get("wins")).map_err(|e: Mismatch| e.at("wins"))?
            })
        }
    }

    impl Decode for Series {
        fn decode(value: Option<&Value>) -> Result<Self, Mismatch> {
            decode_record(value)
        }

        fn project(value: &Value) -> Value {
            project_record::<Self>(value)
        }
    }

    #[test]
    fn primitives_coerce() {
        assert_eq!(i64::decode(Some(&json!(42))).unwrap(), 42);
        assert_eq!(i32::decode(Some(&json!("17"))).unwrap(), 17);
        assert_eq!(String::decode(Some(&json!(5))).unwrap(), "5");
        assert!(bool::decode(Some(&json!(true))).unwrap());
        assert!((f64::decode(Some(&json!(3))).unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn integer_overflow_is_a_mismatch() {
        let err = u8::decode(Some(&json!(300))).unwrap_err();
        assert_eq!(err.expected(), "u8");
        assert_eq!(err.found(), "number");
    }

    #[test]
    fn missing_required_field_is_a_mismatch() {
        let err = String::decode(None).unwrap_err();
        assert_eq!(err.found(), "missing");
    }

    #[test]
    fn option_accepts_missing_and_null() {
        assert_eq!(Option::<i32>::decode(None).unwrap(), None);
        assert_eq!(Option::<i32>::decode(Some(&Value::Null)).unwrap(), None);
        assert_eq!(Option::<i32>::decode(Some(&json!(1))).unwrap(), Some(1));
    }

    #[test]
    fn nested_records_decode_recursively() {
        let value = json!([{"target": 3, "wins": 1}, {"target": 5, "wins": 2}]);
        let series = Vec::<Series>::decode(Some(&value)).unwrap();
        assert_eq!(
            series,
            [
                Series {
                    target: 3,
                    wins:   1
                },
                Series {
                    target: 5,
                    wins:   2
                }
            ]
        );
    }

    #[test]
    fn nested_mismatch_carries_path() {
        let value = json!([{"target": 3, "wins": 1}, {"target": 5, "wins": "two"}]);
        let err = Vec::<Series>::decode(Some(&value)).unwrap_err();
        assert_eq!(err.path(), "[1].wins");
        assert_eq!(err.expected(), "i32");
    }

    #[test]
    fn record_from_non_object_fails() {
        let err = Series::decode(Some(&json!([1, 2]))).unwrap_err();
        assert_eq!(err.expected(), "object");
        assert_eq!(err.found(), "array");
    }

    #[test]
    fn projection_drops_undeclared_keys_in_nested_records() {
        let value = json!([{"target": 3, "wins": 1, "progress": "WL"}, null]);
        assert_eq!(
            Vec::<Option<Series>>::project(&value),
            json!([{"target": 3, "wins": 1}, null])
        );
        assert_eq!(i32::project(&json!("7")), json!("7"));
    }

    #[test]
    fn declares_checks_field_list() {
        assert!(Series::declares("wins"));
        assert!(!Series::declares("losses"));
    }
}
