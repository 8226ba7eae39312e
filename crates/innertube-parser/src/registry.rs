//! Class name to constructor registry.
//!
//! The full map is seeded from the static class table at first access;
//! the stub generator appends runtime entries during parsing. Both maps are
//! process-wide and effectively read-only apart from that single append
//! path, so a plain `RwLock` singleton is sufficient.

use std::sync::{Arc, LazyLock, RwLock};

use innertube_node::{Map, Node};
use serde_json::Value;

use crate::classes;
use crate::context::ParseContext;
use crate::stub::KeyInfo;

/// A node constructor: turns a raw class body into a typed node, recursing
/// through the context for nested fields.
pub type Constructor =
    Arc<dyn Fn(&mut ParseContext, &Value) -> Result<Node, ClassError> + Send + Sync>;

/// Failure inside a constructor. Never escapes the item parser; it is
/// captured as a `parse` event and the item slot becomes empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassError {
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),

    #[error(transparent)]
    Shape(#[from] crate::context::ShapeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("module not found: {0}")]
    ModuleNotFound(String),
}

struct RuntimeEntry {
    constructor: Constructor,
    shape: Arc<RwLock<Vec<KeyInfo>>>,
}

#[derive(Default)]
pub struct Registry {
    map: Map<String, Constructor>,
    runtime: Map<String, RuntimeEntry>,
}

impl Registry {
    fn with_builtin() -> Self {
        let mut registry = Registry::default();
        for (name, constructor) in classes::builtin() {
            registry.map.insert(name.to_string(), constructor);
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.map.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn add_runtime(
        &mut self,
        name: &str,
        constructor: Constructor,
        shape: Arc<RwLock<Vec<KeyInfo>>>,
    ) {
        self.map.insert(name.to_string(), constructor.clone());
        self.runtime
            .insert(name.to_string(), RuntimeEntry { constructor, shape });
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::with_builtin()));

/// Look up a class by name. A miss is the hard `ModuleNotFound` condition;
/// tolerant parsing paths use [`get`] and fall back to stub synthesis.
pub fn lookup(name: &str) -> Result<Constructor, RegistryError> {
    get(name).ok_or_else(|| RegistryError::ModuleNotFound(name.to_string()))
}

pub fn get(name: &str) -> Option<Constructor> {
    REGISTRY
        .read()
        .expect("registry lock poisoned")
        .get(name)
}

pub fn contains(name: &str) -> bool {
    REGISTRY
        .read()
        .expect("registry lock poisoned")
        .contains(name)
}

/// Append a runtime-synthesized entry. Statically known classes are never
/// overwritten through this path.
pub fn add_runtime(name: &str, constructor: Constructor, shape: Arc<RwLock<Vec<KeyInfo>>>) {
    let mut registry = REGISTRY.write().expect("registry lock poisoned");
    if !registry.map.contains_key(name) || registry.runtime.contains_key(name) {
        registry.add_runtime(name, constructor, shape);
    }
}

/// Snapshot of every dynamically registered class and its current key
/// shape, so tooling can persist stubs as real class definitions.
pub fn runtime_entries() -> Vec<(String, Vec<KeyInfo>)> {
    let registry = REGISTRY.read().expect("registry lock poisoned");
    registry
        .runtime
        .iter()
        .map(|(name, entry)| {
            let shape = entry.shape.read().expect("shape lock poisoned").clone();
            (name.clone(), shape)
        })
        .collect()
}
