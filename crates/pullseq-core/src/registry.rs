//! Explicit capability registry.
//!
//! Call sites decide whether to install the built-in capabilities. An
//! installed capability is never replaced: whoever registers a name first keeps it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Which sequence flavour a capability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Namespace {
    Iterator,
    AsyncIterator,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iterator => write!(f, "Iterator"),
            Self::AsyncIterator => write!(f, "AsyncIterator"),
        }
    }
}

/// Names of the built-in capabilities, in installation order.
pub const BUILTIN_NAMES: [&str; 12] = [
    "from",
    "map",
    "filter",
    "take",
    "drop",
    "as_indexed_pairs",
    "flat_map",
    "reduce",
    "to_vec",
    "for_each",
    "some",
    "every",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum Provider {
    Builtin,
    External(String),
}

/// A named operation installed on a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub namespace: Namespace,
    pub name: String,
    pub provider: Provider,
}

impl Capability {
    pub fn builtin(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            provider: Provider::Builtin,
        }
    }

    pub fn external(
        namespace: Namespace,
        name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            namespace,
            name: name.into(),
            provider: Provider::External(provider.into()),
        }
    }
}

/// Every built-in capability for `namespace`.
pub fn builtin_capabilities(namespace: Namespace) -> Vec<Capability> {
    BUILTIN_NAMES
        .iter()
        .map(|name| Capability::builtin(namespace, *name))
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: BTreeMap<(Namespace, String), Capability>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, namespace: Namespace, name: &str) -> Option<&Capability> {
        self.entries.get(&(namespace, name.to_string()))
    }

    /// Like [`Registry::get`], but a missing name is an error.
    pub fn require(&self, namespace: Namespace, name: &str) -> Result<&Capability> {
        self.get(namespace, name).ok_or_else(|| {
            RegistryError::UnknownCapability {
                namespace,
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn contains(&self, namespace: Namespace, name: &str) -> bool {
        self.get(namespace, name).is_some()
    }

    /// Install `capability` unless its name is already taken on its namespace.
    ///
    /// Returns whether the capability was installed.
    pub fn install_if_absent(&mut self, capability: Capability) -> bool {
        let key = (capability.namespace, capability.name.clone());
        if let Some(existing) = self.entries.get(&key) {
            tracing::debug!(
                namespace = %capability.namespace,
                name = %capability.name,
                existing = ?existing.provider,
                "capability already installed, skipping"
            );
            return false;
        }
        tracing::trace!(namespace = %capability.namespace, name = %capability.name, "installing capability");
        self.entries.insert(key, capability);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.entries.values()
    }
}

/// Install the built-in capabilities on both namespaces.
///
/// Returns the number of capabilities that were newly installed.
pub fn register_builtins(registry: &mut Registry) -> usize {
    [Namespace::Iterator, Namespace::AsyncIterator]
        .into_iter()
        .flat_map(builtin_capabilities)
        .filter(|capability| registry.install_if_absent(capability.clone()))
        .count()
}
