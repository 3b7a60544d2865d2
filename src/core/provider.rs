//! Seam between the engine and the host type system.

use crate::core::registry::TypeRegistry;
use crate::core::types::{MemberNode, MemberOrigin, TypeKey, TypeNode};

/// Read-only access to the type graph under generation.
///
/// The concrete implementation in this crate is [`TypeRegistry`]; any other
/// host type system can supply an adapter. Implementations must be safe for
/// concurrent reads, since independent types are rendered in parallel.
pub trait MetadataProvider: Send + Sync {
    /// Looks up a declaration by identity.
    fn lookup(&self, key: &TypeKey) -> Option<&TypeNode>;

    /// Whether a declaration with the given path and arity exists.
    fn has_declaration(&self, path: &str, arity: usize) -> bool {
        self.lookup(&TypeKey::new(path, arity)).is_some()
    }

    /// Whether the type is globally excluded from generation.
    fn is_ignored(&self, key: &TypeKey) -> bool {
        self.lookup(key).map_or(false, |node| node.directives.ignored)
    }

    /// Members of `node` that participate in generation: not individually
    /// ignored, and contract-origin members only when `include_explicit` is
    /// set and the declaring contract is not itself ignored.
    fn exportable_members<'a>(
        &self,
        node: &'a TypeNode,
        include_explicit: bool,
    ) -> Vec<&'a MemberNode> {
        node.members
            .iter()
            .filter(|member| {
                if member.directives.ignored {
                    return false;
                }
                match &member.origin {
                    MemberOrigin::Own => true,
                    MemberOrigin::Contract { contract } => {
                        include_explicit && !self.is_ignored(contract)
                    }
                }
            })
            .collect()
    }
}

impl MetadataProvider for TypeRegistry {
    fn lookup(&self, key: &TypeKey) -> Option<&TypeNode> {
        self.get(key)
    }

    fn has_declaration(&self, path: &str, arity: usize) -> bool {
        self.contains_arity(path, arity)
    }
}
