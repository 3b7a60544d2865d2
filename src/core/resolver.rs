//! Import resolution for dependency edges.
//!
//! Turns a [`DependencyEdge`] into the import statement data the emitters
//! need: converted display name, module path and default-export flag. Paths
//! come from one of two places: a [`CustomDependencyMap`] entry for
//! dependencies maintained outside the generation run, or a relative path
//! between output directories for dependencies generated alongside the
//! requesting type.

use std::collections::HashSet;

use crate::core::errors::{ConfigError, GeneratorError};
use crate::core::options::GeneratorOptions;
use crate::core::provider::MetadataProvider;
use crate::core::types::{DependencyEdge, ResolvedImport, TypeKey};
use crate::naming::TypeContext;

/// One hand-maintained dependency target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Module path the import statement should reference.
    pub path: String,
    /// All types under the mapped namespace live in one module; remaining
    /// namespace segments are not appended to the path.
    pub flat: bool,
    /// The mapped module default-exports its type. Only honored for exact
    /// matches; namespace matches always use named exports.
    pub default_export: bool,
}

impl MappingEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            flat: false,
            default_export: false,
        }
    }

    pub fn flat(mut self) -> Self {
        self.flat = true;
        self
    }

    pub fn default_export(mut self) -> Self {
        self.default_export = true;
        self
    }
}

/// Import path and export form chosen for a mapped dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedImport {
    pub path: String,
    pub default_export: bool,
}

/// Redirects dependencies to modules that already exist outside the run.
///
/// Keys are qualifiers: either a full type qualifier (see
/// [`TypeKey::qualifier`]) for an exact match, or a dotted namespace prefix
/// covering every type beneath it. Exact matches win; namespace matches are
/// searched from the most specific prefix outward.
#[derive(Debug, Clone, Default)]
pub struct CustomDependencyMap {
    entries: std::collections::HashMap<String, MappingEntry>,
}

impl CustomDependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping under a qualifier or namespace prefix. A second
    /// entry for the same key is a configuration error, not a silent
    /// override.
    pub fn insert(
        &mut self,
        qualifier: impl Into<String>,
        entry: MappingEntry,
    ) -> Result<(), ConfigError> {
        let qualifier = qualifier.into();
        if self.entries.contains_key(&qualifier) {
            return Err(ConfigError::DuplicateMapping { qualifier });
        }
        self.entries.insert(qualifier, entry);
        Ok(())
    }

    /// Register an exact mapping for a single type.
    pub fn insert_type(&mut self, key: &TypeKey, entry: MappingEntry) -> Result<(), ConfigError> {
        self.insert(key.qualifier(), entry)
    }

    pub fn contains(&self, qualifier: &str) -> bool {
        self.entries.contains_key(qualifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the mapping for a type: exact qualifier first, then namespace
    /// prefixes from the innermost outward. For a non-flat namespace match
    /// the segments between the matched prefix and the type's namespace are
    /// appended to the entry's path, so one entry can fan out over a whole
    /// package tree.
    pub fn lookup(&self, key: &TypeKey) -> Option<MappedImport> {
        if let Some(entry) = self.entries.get(&key.qualifier()) {
            return Some(MappedImport {
                path: entry.path.clone(),
                default_export: entry.default_export,
            });
        }

        let mut namespace = key.namespace();
        let mut dropped: Vec<&str> = Vec::new();
        while !namespace.is_empty() {
            if let Some(entry) = self.entries.get(namespace) {
                let path = if entry.flat || dropped.is_empty() {
                    entry.path.clone()
                } else {
                    let mut path = entry.path.clone();
                    for segment in dropped.iter().rev() {
                        path.push('/');
                        path.push_str(segment);
                    }
                    path
                };
                return Some(MappedImport {
                    path,
                    default_export: false,
                });
            }
            match namespace.rsplit_once('.') {
                Some((rest, tail)) => {
                    dropped.push(tail);
                    namespace = rest;
                }
                None => break,
            }
        }
        None
    }
}

/// Relative path from one output directory to another, in segments joined
/// with `/`. Empty when the directories are the same.
pub fn relative_dir_diff(from: &str, to: &str) -> String {
    let from_segments = dir_segments(from);
    let to_segments = dir_segments(to);

    let common = from_segments
        .iter()
        .zip(&to_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_segments.len() {
        parts.push("..");
    }
    parts.extend(&to_segments[common..]);
    parts.join("/")
}

fn dir_segments(dir: &str) -> Vec<&str> {
    dir.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Resolves dependency edges into import statements for one generation run.
pub struct ImportResolver<'a> {
    provider: &'a dyn MetadataProvider,
    options: &'a GeneratorOptions,
    /// Types the run will emit; strict mode requires every unmapped
    /// dependency to be in here.
    known: &'a HashSet<TypeKey>,
}

impl<'a> ImportResolver<'a> {
    pub fn new(
        provider: &'a dyn MetadataProvider,
        options: &'a GeneratorOptions,
        known: &'a HashSet<TypeKey>,
    ) -> Self {
        Self {
            provider,
            options,
            known,
        }
    }

    /// Resolve one edge for a type emitted into `requesting_dir` (relative
    /// to the output root). Fails only in strict mode, when the target is
    /// neither part of the run nor custom-mapped.
    pub fn resolve(
        &self,
        requesting: &TypeKey,
        requesting_dir: &str,
        edge: &DependencyEdge,
    ) -> Result<ResolvedImport, GeneratorError> {
        let target = &edge.target;
        let ctx = TypeContext {
            key: target,
            provider: self.provider,
        };
        let name = self.options.type_names.convert(target.base_name(), &ctx);

        if let Some(mapped) = self.options.custom_dependencies.lookup(target) {
            return Ok(ResolvedImport {
                name,
                alias: None,
                path: mapped.path,
                default_export: mapped.default_export,
            });
        }

        if self.options.strict_dependencies && !self.known.contains(target) {
            return Err(GeneratorError::missing(requesting.clone(), target.clone()));
        }

        let target_dir = self.dependency_output_dir(edge, requesting_dir);
        let diff = relative_dir_diff(requesting_dir, &target_dir);
        let mut path = if diff.starts_with("..") {
            diff
        } else {
            format!("./{diff}")
        };
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(&self.options.file_names.convert(target.base_name(), &ctx));

        Ok(ResolvedImport {
            name,
            alias: None,
            path,
            default_export: self.default_export_for(target),
        })
    }

    /// Directory a dependency's module lands in. Exported targets own their
    /// directory; bare targets follow the originating member's default
    /// output directory, falling back to the requesting type's directory.
    fn dependency_output_dir(&self, edge: &DependencyEdge, requesting_dir: &str) -> String {
        match self.provider.lookup(&edge.target) {
            Some(node) if node.is_exported() => node.output_dir().unwrap_or("").to_string(),
            _ => edge
                .member_output_dir
                .clone()
                .unwrap_or_else(|| requesting_dir.to_string()),
        }
    }

    fn default_export_for(&self, target: &TypeKey) -> bool {
        self.provider
            .lookup(target)
            .and_then(|node| node.directives.default_export)
            .unwrap_or(self.options.use_default_export)
    }
}
