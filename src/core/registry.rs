use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::core::errors::ModelError;
use crate::core::types::{TypeKey, TypeNode};

/// Serialized form of a set of type declarations. Model files on disk are
/// JSON documents with this shape; several files may be merged into one
/// registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeModel {
    #[serde(default)]
    pub types: Vec<TypeNode>,
}

/// Known-type index for one generation run.
///
/// Built once before extraction begins and read-only afterwards. Iteration
/// follows registration order, which keeps generation output deterministic.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    order: Vec<TypeKey>,
    types: HashMap<TypeKey, TypeNode>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type. Identities are unique per run.
    pub fn insert(&mut self, node: TypeNode) -> Result<(), ModelError> {
        if self.types.contains_key(&node.key) {
            return Err(ModelError::DuplicateType {
                key: node.key.clone(),
            });
        }
        self.order.push(node.key.clone());
        self.types.insert(node.key.clone(), node);
        Ok(())
    }

    pub fn extend(
        &mut self,
        nodes: impl IntoIterator<Item = TypeNode>,
    ) -> Result<(), ModelError> {
        for node in nodes {
            self.insert(node)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &TypeKey) -> Option<&TypeNode> {
        self.types.get(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.types.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeNode> {
        self.order.iter().filter_map(|key| self.types.get(key))
    }

    /// Whether a declaration with the given path and arity exists. Used by
    /// the arity-collision converter to probe sibling declarations.
    pub fn contains_arity(&self, path: &str, arity: usize) -> bool {
        self.types.contains_key(&TypeKey::new(path, arity))
    }

    /// Export-marked, non-ignored types, in registration order.
    pub fn generation_set(&self) -> Vec<&TypeNode> {
        self.iter()
            .filter(|node| node.is_exported() && !node.directives.ignored)
            .collect()
    }

    /// Identities of the generation set; this is the known set consulted by
    /// strict-mode validation.
    pub fn generation_keys(&self) -> HashSet<TypeKey> {
        self.generation_set()
            .into_iter()
            .map(|node| node.key.clone())
            .collect()
    }

    /// Builds a registry from in-memory models.
    pub fn from_models(models: impl IntoIterator<Item = TypeModel>) -> Result<Self, ModelError> {
        let mut registry = Self::new();
        for model in models {
            registry.extend(model.types)?;
        }
        Ok(registry)
    }

    /// Loads and merges every model file matching the given glob patterns.
    /// A pattern matching no files is treated as a configuration mistake.
    pub fn load_patterns(patterns: &[String]) -> Result<Self, ModelError> {
        let mut registry = Self::new();
        for pattern in patterns {
            let paths = glob::glob(pattern).map_err(|source| ModelError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            let mut matched = false;
            for path in paths.flatten() {
                matched = true;
                registry.merge_file(&path)?;
            }
            if !matched {
                return Err(ModelError::NoModelFiles {
                    pattern: pattern.clone(),
                });
            }
        }
        Ok(registry)
    }

    /// Parses one JSON model file into the registry. Returns the number of
    /// types it contributed.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let model: TypeModel = serde_json::from_str(&raw).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let count = model.types.len();
        self.extend(model.types)?;
        debug!("Loaded {} types from {}", count, path.display());
        Ok(count)
    }
}
