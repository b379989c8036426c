//! Where variable lookups go during evaluation.
//!
//! [`ProcessEnv`] reads the live process environment. Maps implement
//! [`EnvSource`] too, which lets callers evaluate against a fixed set of
//! variables without touching global state.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    env,
    hash::{BuildHasher, Hash},
};

/// Read-only lookup of environment variables by exact-case name
pub trait EnvSource {
    /// Same contract as [`std::env::var`]: `NotPresent` when unset,
    /// `NotUnicode` when set to bytes that are not valid UTF-8.
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

impl<K, V, S> EnvSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.get(key)
            .map(|v| v.as_ref().to_string())
            .ok_or(env::VarError::NotPresent)
    }
}

impl<K, V> EnvSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.get(key)
            .map(|v| v.as_ref().to_string())
            .ok_or(env::VarError::NotPresent)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        (**self).var(key)
    }
}
