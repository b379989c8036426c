use std::fmt;

/// The primitive type an environment variable is decoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// A resolved value stored in a [`Namespace`](crate::Namespace)
///
/// `Absent` marks an optional variable that was neither set nor given a default.
///
/// With the `serde` feature, `Absent` serializes as `null`. JSON has no
/// representation for NaN or infinity either, so `serde_json` also writes
/// non-finite floats as `null`, and those read back as `Absent`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Absent,
}

impl Value {
    /// The type of this value, `None` for [`Value::Absent`]
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::String(_) => Some(ValueType::String),
            Self::Integer(_) => Some(ValueType::Integer),
            Self::Float(_) => Some(ValueType::Float),
            Self::Boolean(_) => Some(ValueType::Boolean),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Absent => write!(f, "-"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Rust types that a resolved [`Value`] can be extracted into
pub trait EnvValue: Sized {
    /// The registration type matching `Self`
    const VALUE_TYPE: ValueType;

    /// Borrow-convert a value, `None` if the variant does not match
    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl EnvValue for String {
    const VALUE_TYPE: ValueType = ValueType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl EnvValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl EnvValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl EnvValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}
