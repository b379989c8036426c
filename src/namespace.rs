use crate::{
    error::ConfigError,
    value::{EnvValue, Value},
};
use std::collections::{BTreeMap, btree_map};

/// The result of evaluating a [`ConfigLoader`](crate::ConfigLoader)
///
/// Maps each registered destination to its resolved [`Value`]. Optional
/// variables that were neither set nor defaulted hold [`Value::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Namespace {
    values: BTreeMap<String, Value>,
}

impl Namespace {
    pub(crate) fn insert(&mut self, dest: &str, value: Value) {
        self.values.insert(dest.to_string(), value);
    }

    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.values.get(dest)
    }

    pub fn contains(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(dest, value)` pairs in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    fn lookup(&self, dest: &str) -> Result<&Value, ConfigError> {
        self.values.get(dest).ok_or_else(|| ConfigError::UnknownField {
            dest: dest.to_string(),
        })
    }

    /// Fetch a field that must hold a value of type `T`
    ///
    /// Fails with [`ConfigError::UnknownField`] if nothing is stored under
    /// `dest` and with [`ConfigError::FieldType`] if the value is absent or
    /// of another type.
    pub fn get_as<T: EnvValue>(&self, dest: &str) -> Result<T, ConfigError> {
        let value = self.lookup(dest)?;
        T::from_value(value).ok_or_else(|| ConfigError::FieldType {
            dest: dest.to_string(),
            expected: T::VALUE_TYPE,
            found: value.value_type(),
        })
    }

    /// Like [`get_as`](Self::get_as), but an absent value yields `None`
    pub fn get_optional<T: EnvValue>(&self, dest: &str) -> Result<Option<T>, ConfigError> {
        match self.lookup(dest)? {
            Value::Absent => Ok(None),
            _ => self.get_as(dest).map(Some),
        }
    }

    pub fn get_str(&self, dest: &str) -> Result<&str, ConfigError> {
        match self.lookup(dest)? {
            Value::String(s) => Ok(s),
            other => Err(ConfigError::FieldType {
                dest: dest.to_string(),
                expected: String::VALUE_TYPE,
                found: other.value_type(),
            }),
        }
    }

    pub fn get_int(&self, dest: &str) -> Result<i64, ConfigError> {
        self.get_as(dest)
    }

    pub fn get_float(&self, dest: &str) -> Result<f64, ConfigError> {
        self.get_as(dest)
    }

    pub fn get_bool(&self, dest: &str) -> Result<bool, ConfigError> {
        self.get_as(dest)
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
