//! Setting values and the equality used to compare them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// The value of a single zone setting.
///
/// Most settings are scalars. A handful (`minify`, `security_header`, ...)
/// are objects, and some come back as `null`; those are kept verbatim so a
/// download can be uploaded again unchanged.
#[derive(Debug, Clone)]
pub enum SettingValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Object or array value.
    Structured(Value),
}

impl SettingValue {
    /// Convert into the plain JSON representation.
    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Null => Value::Null,
            SettingValue::Bool(b) => Value::Bool(*b),
            SettingValue::Number(n) => Value::Number(n.clone()),
            SettingValue::String(s) => Value::String(s.clone()),
            SettingValue::Structured(v) => v.clone(),
        }
    }
}

/// Structural equality.
///
/// Numbers compare by value, so `1` and `1.0` are equal. Values of different
/// kinds never are: `"1"` is not `1`.
impl PartialEq for SettingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SettingValue::Null, SettingValue::Null) => true,
            (SettingValue::Bool(a), SettingValue::Bool(b)) => a == b,
            (SettingValue::Number(a), SettingValue::Number(b)) => numbers_equal(a, b),
            (SettingValue::String(a), SettingValue::String(b)) => a == b,
            (SettingValue::Structured(a), SettingValue::Structured(b)) => json_equal(a, b),
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integral(a), integral(b)) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.as_f64() == b.as_f64(),
        _ => false,
    }
}

/// The exact integer a number denotes, if it denotes one. Integral floats
/// are included so `1 == 1.0` holds without going through `f64`.
fn integral(n: &Number) -> Option<i128> {
    if let Some(v) = n.as_i64() {
        return Some(v.into());
    }
    if let Some(v) = n.as_u64() {
        return Some(v.into());
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() < i128::MAX as f64).then_some(f as i128)
}

fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| json_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, l)| y.get(key).is_some_and(|r| json_equal(l, r)))
        }
        _ => a == b,
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SettingValue::Null,
            Value::Bool(b) => SettingValue::Bool(b),
            Value::Number(n) => SettingValue::Number(n),
            Value::String(s) => SettingValue::String(s),
            structured @ (Value::Array(_) | Value::Object(_)) => {
                SettingValue::Structured(structured)
            }
        }
    }
}

impl From<SettingValue> for Value {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Null => Value::Null,
            SettingValue::Bool(b) => Value::Bool(b),
            SettingValue::Number(n) => Value::Number(n),
            SettingValue::String(s) => Value::String(s),
            SettingValue::Structured(v) => v,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Number(n.into())
    }
}

impl From<u64> for SettingValue {
    fn from(n: u64) -> Self {
        SettingValue::Number(n.into())
    }
}

impl From<f64> for SettingValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(SettingValue::Null, SettingValue::Number)
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SettingValue::Null => serializer.serialize_unit(),
            SettingValue::Bool(b) => serializer.serialize_bool(*b),
            SettingValue::Number(n) => n.serialize(serializer),
            SettingValue::String(s) => serializer.serialize_str(s),
            SettingValue::Structured(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(SettingValue::from)
    }
}

/// Renders the compact JSON form, e.g. `"on"`, `14400`, `true`.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_compare_by_value() {
        let int: SettingValue = serde_json::from_str("14400").unwrap();
        let float: SettingValue = serde_json::from_str("14400.0").unwrap();
        assert_eq!(int, float);
        assert_ne!(int, SettingValue::from(14401i64));
        assert_eq!(SettingValue::from(-3i64), SettingValue::from(-3.0f64));
        assert_ne!(SettingValue::from(1i64), SettingValue::from(1.5f64));
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let int: SettingValue = serde_json::from_str("9007199254740993").unwrap();
        let float: SettingValue = serde_json::from_str("9007199254740992.0").unwrap();
        assert_ne!(int, float);
        assert_eq!(
            SettingValue::from(9007199254740992u64),
            SettingValue::from(9007199254740992.0f64)
        );
        assert_ne!(SettingValue::from(u64::MAX), SettingValue::from(-1i64));
    }

    #[test]
    fn test_kinds_never_equal_across_variants() {
        assert_ne!(SettingValue::from("1"), SettingValue::from(1i64));
        assert_ne!(SettingValue::from(true), SettingValue::from("true"));
        assert_ne!(SettingValue::Null, SettingValue::from(""));
    }

    #[test]
    fn test_structured_equality_is_deep() {
        let a = SettingValue::from(json!({"css": "on", "js": "off", "ttl": 1}));
        let b = SettingValue::from(json!({"js": "off", "ttl": 1.0, "css": "on"}));
        let c = SettingValue::from(json!({"css": "on", "js": "on", "ttl": 1}));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(matches!(a, SettingValue::Structured(_)));
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let values = vec![
            SettingValue::from("off"),
            SettingValue::from(14400u64),
            SettingValue::from(false),
            SettingValue::Null,
        ];
        let rendered = serde_json::to_string(&values).unwrap();
        assert_eq!(rendered, r#"["off",14400,false,null]"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(SettingValue::from("on").to_string(), "\"on\"");
        assert_eq!(SettingValue::from(30u64).to_string(), "30");
        assert_eq!(SettingValue::from(f64::NAN), SettingValue::Null);
    }
}
