use crate::value::ValueType;
use colored::Colorize;
use std::fmt;

/// Errors raised while registering, evaluating or reading environment variables
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A default value does not match the declared variable type
    TypeMismatch {
        key: String,
        expected: ValueType,
        found: Option<ValueType>,
    },
    /// Two variables were registered with the same destination
    DuplicateDestination { key: String, dest: String },
    /// A required environment variable without default is missing
    MissingRequired { key: String },
    /// An environment variable is set but cannot be decoded into its type
    DecodeFailure {
        key: String,
        value_type: ValueType,
        value: String,
    },
    /// No field with this destination exists in the namespace
    UnknownField { dest: String },
    /// A namespace field holds a value of another type than requested
    FieldType {
        dest: String,
        expected: ValueType,
        found: Option<ValueType>,
    },
}

impl ConfigError {
    /// The environment variable or destination the error refers to
    pub fn key(&self) -> &str {
        match self {
            ConfigError::TypeMismatch { key, .. }
            | ConfigError::DuplicateDestination { key, .. }
            | ConfigError::MissingRequired { key }
            | ConfigError::DecodeFailure { key, .. } => key,
            ConfigError::UnknownField { dest } | ConfigError::FieldType { dest, .. } => dest,
        }
    }
}

fn type_name(value_type: Option<ValueType>) -> String {
    value_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "absent".to_string())
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "{}: Cannot register variable, default of type {} does not match declared type {}",
                key.magenta().bold(),
                type_name(*found).red(),
                expected.to_string().cyan()
            ),
            ConfigError::DuplicateDestination { key, dest } => write!(
                f,
                "{}: Cannot register variable, destination {} is already taken",
                key.magenta().bold(),
                format!("'{}'", dest).red()
            ),
            ConfigError::MissingRequired { key } => write!(
                f,
                "{}: Is missing from environment and is required",
                key.magenta().bold()
            ),
            ConfigError::DecodeFailure {
                key,
                value_type,
                value,
            } => write!(
                f,
                "{}: Invalid value {} for type {}",
                key.magenta().bold(),
                format!("'{}'", value).red(),
                value_type.to_string().cyan()
            ),
            ConfigError::UnknownField { dest } => {
                write!(f, "{}: No such field", dest.magenta().bold())
            }
            ConfigError::FieldType {
                dest,
                expected,
                found,
            } => write!(
                f,
                "{}: Expected a value of type {}, found {}",
                dest.magenta().bold(),
                expected.to_string().cyan(),
                type_name(*found).red()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
