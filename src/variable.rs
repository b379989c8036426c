use crate::{
    error::ConfigError,
    value::{Value, ValueType},
};
use std::fmt;

/// Strings decoded as `true` for boolean variables
pub const TRUTHY: [&str; 3] = ["true", "True", "1"];
/// Strings decoded as `false` for boolean variables
pub const FALSY: [&str; 3] = ["false", "False", "0"];

/// A request to register an environment variable with a [`ConfigLoader`](crate::ConfigLoader)
///
/// Starts out as a required string variable without default whose destination
/// is the lower-cased name.
///
/// # Example
/// ```rust
/// use envargs::{Variable, ValueType};
///
/// let var = Variable::new("PORT")
///     .value_type(ValueType::Integer)
///     .required(false)
///     .default_value(8080);
/// ```
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    value_type: ValueType,
    required: bool,
    default: Option<Value>,
    dest: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::String,
            required: true,
            default: None,
            dest: None,
        }
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Value used when the variable is not set, must match the declared type
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Key under which the resolved value is stored
    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }
}

/// A validated, immutable description of one expected environment variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    name: String,
    value_type: ValueType,
    required: bool,
    default: Option<Value>,
    dest: String,
}

impl TryFrom<Variable> for VariableSpec {
    type Error = ConfigError;

    fn try_from(var: Variable) -> Result<Self, Self::Error> {
        if let Some(default) = &var.default {
            let found = default.value_type();
            if found != Some(var.value_type) {
                return Err(ConfigError::TypeMismatch {
                    key: var.name,
                    expected: var.value_type,
                    found,
                });
            }
        }

        let dest = var.dest.unwrap_or_else(|| var.name.to_lowercase());

        Ok(Self {
            name: var.name,
            value_type: var.value_type,
            required: var.required,
            default: var.default,
            dest,
        })
    }
}

impl VariableSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    /// Decode a raw environment string into the declared type
    pub fn decode(&self, raw: &str) -> Result<Value, ConfigError> {
        let decoded = match self.value_type {
            ValueType::String => Some(Value::String(raw.to_string())),
            ValueType::Boolean => {
                if TRUTHY.contains(&raw) {
                    Some(Value::Boolean(true))
                } else if FALSY.contains(&raw) {
                    Some(Value::Boolean(false))
                } else {
                    None
                }
            }
            // Numbers tolerate surrounding whitespace, booleans and strings do not
            ValueType::Integer => raw.trim().parse().ok().map(Value::Integer),
            ValueType::Float => raw.trim().parse().ok().map(Value::Float),
        };

        decoded.ok_or_else(|| self.decode_failure(raw))
    }

    pub(crate) fn decode_failure(&self, raw: &str) -> ConfigError {
        ConfigError::DecodeFailure {
            key: self.name.clone(),
            value_type: self.value_type,
            value: raw.to_string(),
        }
    }
}

impl fmt::Display for VariableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default = self
            .default
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} (type: {}, required: {}, default: {}, dest: {})",
            self.name, self.value_type, self.required, default, self.dest
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, value_type: ValueType) -> VariableSpec {
        VariableSpec::try_from(Variable::new(name).value_type(value_type)).unwrap()
    }

    #[test]
    fn test_defaults_of_a_new_variable() {
        let spec = VariableSpec::try_from(Variable::new("DATABASE_URL")).unwrap();

        assert_eq!(spec.name(), "DATABASE_URL");
        assert_eq!(spec.value_type(), ValueType::String);
        assert!(spec.is_required());
        assert_eq!(spec.default(), None);
        assert_eq!(spec.dest(), "database_url");
    }

    #[test]
    fn test_explicit_dest_is_kept_verbatim() {
        let spec = VariableSpec::try_from(Variable::new("STR").dest("sTr")).unwrap();
        assert_eq!(spec.dest(), "sTr");
    }

    #[test]
    fn test_default_type_mismatch() {
        let cases: Vec<(ValueType, Value)> = vec![
            (ValueType::String, Value::Integer(123)),
            (ValueType::Integer, Value::String("123".into())),
            (ValueType::Integer, Value::Float(1.0)),
            (ValueType::Float, Value::Integer(1)),
            (ValueType::Float, Value::Boolean(false)),
            (ValueType::Boolean, Value::String("true".into())),
            (ValueType::Boolean, Value::Integer(0)),
        ];

        for (value_type, default) in cases {
            let found = default.value_type();
            let result = VariableSpec::try_from(
                Variable::new("VAR").value_type(value_type).default_value(default),
            );
            assert_eq!(
                result,
                Err(ConfigError::TypeMismatch {
                    key: "VAR".to_string(),
                    expected: value_type,
                    found,
                })
            );
        }
    }

    #[test]
    fn test_absent_default_is_a_mismatch() {
        let result = VariableSpec::try_from(Variable::new("VAR").default_value(Value::Absent));
        assert!(matches!(
            result,
            Err(ConfigError::TypeMismatch { found: None, .. })
        ));
    }

    #[test]
    fn test_matching_default_is_accepted() {
        let spec = VariableSpec::try_from(
            Variable::new("BOOL")
                .value_type(ValueType::Boolean)
                .default_value(false),
        )
        .unwrap();

        assert_eq!(spec.default(), Some(&Value::Boolean(false)));
    }

    #[test]
    fn test_decode_string_is_identity() {
        let spec = spec("STR", ValueType::String);

        for raw in ["", "STR-val", " padded ", "ünïcode", "123"] {
            assert_eq!(spec.decode(raw), Ok(Value::String(raw.to_string())));
        }
    }

    #[test]
    fn test_decode_boolean_table() {
        let spec = spec("BOOL", ValueType::Boolean);

        for raw in TRUTHY {
            assert_eq!(spec.decode(raw), Ok(Value::Boolean(true)));
        }
        for raw in FALSY {
            assert_eq!(spec.decode(raw), Ok(Value::Boolean(false)));
        }
        for raw in ["yes", "no", "TRUE", "FALSE", "2", "", " true"] {
            assert_eq!(
                spec.decode(raw),
                Err(ConfigError::DecodeFailure {
                    key: "BOOL".to_string(),
                    value_type: ValueType::Boolean,
                    value: raw.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_decode_integer() {
        let spec = spec("INT", ValueType::Integer);

        assert_eq!(spec.decode("123"), Ok(Value::Integer(123)));
        assert_eq!(spec.decode("-7"), Ok(Value::Integer(-7)));
        assert_eq!(
            spec.decode("abc"),
            Err(ConfigError::DecodeFailure {
                key: "INT".to_string(),
                value_type: ValueType::Integer,
                value: "abc".to_string(),
            })
        );
        assert!(spec.decode("1.5").is_err());
        assert!(spec.decode("").is_err());
        assert!(spec.decode("  ").is_err());
    }

    #[test]
    fn test_decode_numbers_ignore_surrounding_whitespace() {
        let int = spec("INT", ValueType::Integer);
        let float = spec("FLOAT", ValueType::Float);

        assert_eq!(int.decode(" 42\n"), Ok(Value::Integer(42)));
        assert_eq!(int.decode("\t-7 "), Ok(Value::Integer(-7)));
        assert_eq!(float.decode(" 1.5 "), Ok(Value::Float(1.5)));
        assert!(int.decode("4 2").is_err());
    }

    #[test]
    fn test_decode_bool_and_string_keep_whitespace() {
        let boolean = spec("BOOL", ValueType::Boolean);
        let string = spec("STR", ValueType::String);

        assert_eq!(
            boolean.decode(" true"),
            Err(ConfigError::DecodeFailure {
                key: "BOOL".to_string(),
                value_type: ValueType::Boolean,
                value: " true".to_string(),
            })
        );
        assert_eq!(string.decode(" 42\n"), Ok(Value::String(" 42\n".to_string())));
    }

    #[test]
    fn test_decode_float_accepts_non_finite_values() {
        let spec = spec("FLOAT", ValueType::Float);

        assert!(matches!(spec.decode("nan"), Ok(Value::Float(x)) if x.is_nan()));
        assert_eq!(spec.decode("inf"), Ok(Value::Float(f64::INFINITY)));
    }

    #[test]
    fn test_decode_float() {
        let spec = spec("FLOAT", ValueType::Float);

        assert_eq!(spec.decode("123.123"), Ok(Value::Float(123.123)));
        assert_eq!(spec.decode("3"), Ok(Value::Float(3.0)));
        assert!(spec.decode("1.2.3").is_err());
        assert!(spec.decode("abc").is_err());
    }

    #[test]
    fn test_display() {
        let spec = VariableSpec::try_from(
            Variable::new("PORT")
                .value_type(ValueType::Integer)
                .required(false)
                .default_value(8080),
        )
        .unwrap();

        assert_eq!(
            spec.to_string(),
            "PORT (type: integer, required: false, default: 8080, dest: port)"
        );
    }
}
