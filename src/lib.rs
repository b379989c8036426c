pub mod error;
pub mod loader;
pub mod namespace;
pub mod source;
pub mod value;
pub mod variable;

// Re-export main types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use namespace::Namespace;
pub use source::{EnvSource, ProcessEnv};
pub use value::{EnvValue, Value, ValueType};
pub use variable::{Variable, VariableSpec};

// Re-export macro
pub use envargs_macros::define_env;

/// Trait for structs whose fields are loaded from environment variables
///
/// Usually implemented through [`define_env!`].
pub trait FromEnv: Sized {
    /// Build the loader describing every field
    fn loader() -> Result<ConfigLoader, ConfigError>;

    /// Extract the typed fields from an evaluated namespace
    fn from_namespace(ns: &Namespace) -> Result<Self, ConfigError>;

    /// Load from the process environment, returning the first error
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&ProcessEnv)
    }

    /// Load from an arbitrary environment source
    fn from_env_with<E: EnvSource + ?Sized>(source: &E) -> Result<Self, ConfigError> {
        let ns = Self::loader()?.evaluate_with(source)?;
        Self::from_namespace(&ns)
    }

    /// Load from the process environment, panicking on errors
    fn load() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(e) => panic!("Configuration failed: {}", e),
        }
    }
}
