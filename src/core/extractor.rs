//! Walks a type's generic constraints, base, interfaces and members to
//! produce the deduplicated set of types it depends on.

use std::collections::HashSet;
use tracing::debug;

use crate::core::provider::MetadataProvider;
use crate::core::types::{DependencyEdge, EdgeKind, IgnoredBases, TypeKey, TypeNode, TypeRef};

/// Unwraps nullable wrappers and array layers down to the underlying type.
fn canonical(ty: &TypeRef) -> &TypeRef {
    match ty {
        TypeRef::Array(inner) | TypeRef::Nullable(inner) => canonical(inner),
        _ => ty,
    }
}

/// Extracts dependency edges for one type at a time. Pure and total: any
/// well-formed [`TypeNode`] yields a result, never an error.
pub struct DependencyExtractor<'a> {
    provider: &'a dyn MetadataProvider,
    include_explicit: bool,
    custom_dictionary: Option<TypeKey>,
}

impl<'a> DependencyExtractor<'a> {
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self {
            provider,
            include_explicit: false,
            custom_dictionary: None,
        }
    }

    /// Whether contract-origin members contribute edges.
    pub fn include_explicit_members(mut self, enabled: bool) -> Self {
        self.include_explicit = enabled;
        self
    }

    /// Synthetic target added whenever a dictionary with a non-index key
    /// type is encountered; its import must come from the custom map.
    pub fn with_custom_dictionary(mut self, key: Option<TypeKey>) -> Self {
        self.custom_dictionary = key;
        self
    }

    /// Every type `node` structurally depends on, in discovery order,
    /// deduplicated by target, with self-references removed.
    pub fn dependencies_of(&self, node: &TypeNode) -> Vec<DependencyEdge> {
        let mut edges = Vec::new();
        self.constraint_edges(node, &mut edges);
        self.base_edge(node, &mut edges);
        self.interface_edges(node, &mut edges);
        self.member_edges(node, &mut edges);

        let mut seen = HashSet::new();
        edges.retain(|edge| edge.target != node.key && seen.insert(edge.target.clone()));

        debug!("Extracted {} dependencies for {}", edges.len(), node.key);
        edges
    }

    /// The base clause to render, after the same ignore rules the edge walk
    /// applies. A custom-base override is the emitter's concern, not ours.
    pub fn base_of<'b>(&self, node: &'b TypeNode) -> Option<&'b TypeRef> {
        if matches!(node.directives.ignored_bases, IgnoredBases::All) {
            return None;
        }
        let base = node.base.as_ref()?;
        if self.heritage_hidden(node, base) {
            return None;
        }
        Some(base)
    }

    /// Interface clauses to render, after ignore rules.
    pub fn interfaces_of<'b>(&self, node: &'b TypeNode) -> Vec<&'b TypeRef> {
        if matches!(node.directives.ignored_bases, IgnoredBases::All) {
            return Vec::new();
        }
        node.interfaces
            .iter()
            .filter(|interface| !self.heritage_hidden(node, interface))
            .collect()
    }

    fn heritage_hidden(&self, node: &TypeNode, clause: &TypeRef) -> bool {
        let Some(target) = canonical(clause).target() else {
            return false;
        };
        ignored_base_list(node).contains(target) || self.provider.is_ignored(target)
    }

    fn constraint_edges(&self, node: &TypeNode, out: &mut Vec<DependencyEdge>) {
        for param in &node.generic_params {
            for constraint in &param.constraints {
                let flat = canonical(constraint);
                if flat.is_primitive() {
                    continue;
                }
                self.flat_edges(flat, EdgeKind::GenericConstraint, None, out);
            }
        }
    }

    fn base_edge(&self, node: &TypeNode, out: &mut Vec<DependencyEdge>) {
        if matches!(node.directives.ignored_bases, IgnoredBases::All) {
            return;
        }
        let Some(base) = &node.base else {
            return;
        };
        let ignored = ignored_base_list(node);

        let flat = canonical(base);
        if let Some(target) = flat.target() {
            if ignored.contains(target) {
                return;
            }
        }

        let mut collected = Vec::new();
        self.flat_edges(flat, EdgeKind::Base, None, &mut collected);
        collected
            .retain(|edge| !ignored.contains(&edge.target) && !self.provider.is_ignored(&edge.target));
        out.append(&mut collected);
    }

    fn interface_edges(&self, node: &TypeNode, out: &mut Vec<DependencyEdge>) {
        if matches!(node.directives.ignored_bases, IgnoredBases::All) {
            return;
        }
        let ignored = ignored_base_list(node);

        for interface in &node.interfaces {
            let flat = canonical(interface);
            if let Some(target) = flat.target() {
                if ignored.contains(target) {
                    continue;
                }
            }

            let mut collected = Vec::new();
            self.flat_edges(flat, EdgeKind::Interface, None, &mut collected);
            collected.retain(|edge| {
                !ignored.contains(&edge.target) && !self.provider.is_ignored(&edge.target)
            });
            out.append(&mut collected);
        }
    }

    fn member_edges(&self, node: &TypeNode, out: &mut Vec<DependencyEdge>) {
        for member in self.provider.exportable_members(node, self.include_explicit) {
            // Members with a hand-written replacement type import through
            // the override, not through a dependency edge.
            if member.directives.type_override.is_some() {
                continue;
            }

            let flat = canonical(&member.ty);
            if flat.target() == Some(&node.key) {
                continue;
            }

            self.flat_edges(
                flat,
                EdgeKind::Member,
                member.directives.default_output_dir.as_deref(),
                out,
            );
        }
    }

    /// Expands one already-flattened reference into edges: nothing for
    /// primitives, parameters and ignored targets; the open definition plus
    /// recursively flattened arguments for closed generics; key/value
    /// expansion without a definition edge for dictionaries.
    fn flat_edges(
        &self,
        flat: &TypeRef,
        kind: EdgeKind,
        member_dir: Option<&str>,
        out: &mut Vec<DependencyEdge>,
    ) {
        let mut targets = Vec::new();
        match flat {
            TypeRef::Primitive(_) | TypeRef::Param(_) => return,
            TypeRef::Named { key, args } => {
                if self.provider.is_ignored(key) {
                    return;
                }
                if args.is_empty() {
                    targets.push(key.clone());
                } else {
                    self.closed_generic_targets(key, args, &mut targets);
                }
            }
            TypeRef::Dictionary { key, value } => {
                self.dictionary_targets(key, value, &mut targets);
            }
            TypeRef::Array(_) | TypeRef::Nullable(_) => return,
        }

        out.extend(targets.into_iter().map(|target| {
            DependencyEdge::new(target, kind).with_member_output_dir(member_dir.map(str::to_owned))
        }));
    }

    fn closed_generic_targets(&self, key: &TypeKey, args: &[TypeRef], out: &mut Vec<TypeKey>) {
        out.push(key.clone());
        self.argument_targets(args, out);
    }

    fn argument_targets<'b>(
        &self,
        args: impl IntoIterator<Item = &'b TypeRef>,
        out: &mut Vec<TypeKey>,
    ) {
        for arg in args {
            match canonical(arg) {
                TypeRef::Primitive(_) | TypeRef::Param(_) => {}
                TypeRef::Named { key, args } => {
                    if args.is_empty() {
                        out.push(key.clone());
                    } else {
                        self.closed_generic_targets(key, args, out);
                    }
                }
                TypeRef::Dictionary { key, value } => self.dictionary_targets(key, value, out),
                TypeRef::Array(_) | TypeRef::Nullable(_) => {}
            }
        }
    }

    /// Dictionaries never contribute their own definition. A non-index key
    /// type pulls in the configured custom dictionary type, if any.
    fn dictionary_targets(&self, key: &TypeRef, value: &TypeRef, out: &mut Vec<TypeKey>) {
        if let Some(custom) = &self.custom_dictionary {
            if !key.is_index_key() {
                out.push(custom.clone());
            }
        }
        self.argument_targets([key, value], out);
    }
}

fn ignored_base_list(node: &TypeNode) -> &[TypeKey] {
    match &node.directives.ignored_bases {
        IgnoredBases::Listed(listed) => listed.as_slice(),
        _ => &[],
    }
}
