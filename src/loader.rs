use crate::{
    error::ConfigError,
    namespace::Namespace,
    source::{EnvSource, ProcessEnv},
    value::{Value, ValueType},
    variable::{Variable, VariableSpec},
};
use std::{env, fmt, fs, path::Path};

/// An ordered set of expected environment variables
///
/// Variables are registered up front and resolved together by
/// [`evaluate`](Self::evaluate). Evaluation stops at the first variable that
/// is missing or cannot be decoded.
///
/// # Example
/// ```rust
/// use envargs::{ConfigLoader, ValueType};
///
/// let mut loader = ConfigLoader::new();
/// loader.or_default("DEMO_DEBUG", false)?;
/// loader.optional("DEMO_NAME", ValueType::String)?;
///
/// let ns = loader.evaluate()?;
/// assert!(ns.contains("demo_debug"));
/// # Ok::<(), envargs::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    description: String,
    specs: Vec<VariableSpec>,
}

impl ConfigLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Free text shown at the top of [`describe`](Self::describe)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registered variables in registration order
    pub fn specs(&self) -> &[VariableSpec] {
        &self.specs
    }

    /// Validate and append a variable
    ///
    /// Fails with [`ConfigError::TypeMismatch`] if the default does not match
    /// the declared type, and with [`ConfigError::DuplicateDestination`] if
    /// another variable already resolves into the same destination. The loader
    /// is left untouched on error.
    pub fn register(&mut self, var: Variable) -> Result<&mut Self, ConfigError> {
        let spec = VariableSpec::try_from(var)?;

        if self.specs.iter().any(|s| s.dest() == spec.dest()) {
            return Err(ConfigError::DuplicateDestination {
                key: spec.name().to_string(),
                dest: spec.dest().to_string(),
            });
        }

        self.specs.push(spec);
        Ok(self)
    }

    /// Register a required variable without default
    pub fn required(
        &mut self,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Result<&mut Self, ConfigError> {
        self.register(Variable::new(name).value_type(value_type))
    }

    /// Register a variable that resolves to [`Value::Absent`] when unset
    pub fn optional(
        &mut self,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Result<&mut Self, ConfigError> {
        self.register(Variable::new(name).value_type(value_type).required(false))
    }

    /// Register a variable that falls back to `default` when unset
    ///
    /// The variable type is taken from the default.
    pub fn or_default(
        &mut self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Result<&mut Self, ConfigError> {
        let default = default.into();
        let value_type = default.value_type().unwrap_or_default();
        self.register(
            Variable::new(name)
                .value_type(value_type)
                .required(false)
                .default_value(default),
        )
    }

    /// Resolve every registered variable against the process environment
    pub fn evaluate(&self) -> Result<Namespace, ConfigError> {
        self.evaluate_with(&ProcessEnv)
    }

    /// Resolve every registered variable against `source`
    pub fn evaluate_with<E: EnvSource + ?Sized>(&self, source: &E) -> Result<Namespace, ConfigError> {
        let mut ns = Namespace::default();

        for spec in &self.specs {
            let value = resolve(spec, source)?;
            ns.insert(spec.dest(), value);
        }

        tracing::debug!(variables = ns.len(), "environment evaluated");
        Ok(ns)
    }

    /// Human-readable summary of all registered variables
    pub fn describe(&self) -> String {
        let mut out = String::new();

        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push_str("\n\n");
        }
        out.push_str("Environment variables:\n");
        for spec in &self.specs {
            out.push_str(&format!("  {}\n", spec));
        }

        out
    }

    /// Write a markdown summary of all registered variables
    ///
    /// # Example
    /// ```no_run
    /// use envargs::{ConfigLoader, ValueType};
    ///
    /// let mut loader = ConfigLoader::new();
    /// loader.required("PORT", ValueType::Integer).unwrap();
    /// loader.write_docs("CONFIG.md").unwrap();
    /// ```
    pub fn write_docs(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut md = String::new();

        md.push_str("## Environment Variables Summary\n\n");
        if !self.description.is_empty() {
            md.push_str(&self.description);
            md.push_str("\n\n");
        }
        md.push_str("| Variable | Type | Required | Default | Destination |\n");
        md.push_str("|----------|------|----------|---------|-------------|\n");
        for spec in &self.specs {
            let required_str = if spec.is_required() { "Yes" } else { "No" };
            let default_display = spec
                .default()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                spec.name(),
                spec.value_type(),
                required_str,
                default_display,
                spec.dest()
            ));
        }

        fs::write(path, md)
    }
}

impl fmt::Display for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn resolve<E: EnvSource + ?Sized>(spec: &VariableSpec, source: &E) -> Result<Value, ConfigError> {
    match source.var(spec.name()) {
        Ok(raw) => {
            tracing::trace!(key = spec.name(), dest = spec.dest(), "decoding from environment");
            spec.decode(&raw)
        }
        Err(env::VarError::NotUnicode(raw)) => {
            Err(spec.decode_failure(&raw.to_string_lossy()))
        }
        Err(env::VarError::NotPresent) => match spec.default() {
            Some(default) => {
                tracing::trace!(key = spec.name(), dest = spec.dest(), "using default");
                Ok(default.clone())
            }
            None if spec.is_required() => {
                tracing::debug!(key = spec.name(), "required variable not set");
                Err(ConfigError::MissingRequired {
                    key: spec.name().to_string(),
                })
            }
            None => {
                tracing::trace!(key = spec.name(), dest = spec.dest(), "optional variable not set");
                Ok(Value::Absent)
            }
        },
    }
}
