//! Namespace-scoped protocol messages.
//!
//! A message is a flat map of string arguments partitioned by namespace.
//! Transport and HTTP concerns live elsewhere; this is the in-memory view
//! the signing layer works against.

use std::collections::BTreeMap;

/// Namespace for the core protocol arguments.
pub const PROTOCOL_NS: &str = "pact/1.0";

/// A protocol message: namespaced key-value arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    args: BTreeMap<String, BTreeMap<String, String>>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an argument in a namespace, replacing any existing value.
    pub fn set_arg(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.args
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Builder form of [`set_arg`](Self::set_arg).
    pub fn with_arg(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_arg(namespace, key, value);
        self
    }

    /// Look up one argument.
    pub fn get_arg(&self, namespace: &str, key: &str) -> Option<&str> {
        self.args
            .get(namespace)
            .and_then(|ns| ns.get(key))
            .map(String::as_str)
    }

    /// All arguments in a namespace, or an empty map.
    pub fn get_args(&self, namespace: &str) -> BTreeMap<String, String> {
        self.args.get(namespace).cloned().unwrap_or_default()
    }

    /// Whether an argument is present.
    pub fn has_arg(&self, namespace: &str, key: &str) -> bool {
        self.get_arg(namespace, key).is_some()
    }
}
