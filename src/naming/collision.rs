use once_cell::sync::Lazy;
use regex::Regex;

use super::{TypeContext, TypeNameConverter};

/// Names that look like they already carry an arity suffix.
static ARITY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_[0-9]+$").unwrap());

/// Appends `_<arity>` when declarations sharing a name differ only in
/// generic parameter count, which flat output cannot express.
///
/// A generic type is suffixed when a declaration with the same name and a
/// lower arity (or no generics at all) exists in the known-type index. A
/// non-generic type whose name already matches the suffix pattern gets a
/// `_0` marker so it cannot collide with a suffixed sibling.
pub struct GenericCollisionConverter;

impl TypeNameConverter for GenericCollisionConverter {
    fn convert(&self, name: &str, ctx: &TypeContext<'_>) -> String {
        let arity = ctx.key.arity;

        if arity == 0 {
            if ARITY_SUFFIX.is_match(name) {
                return format!("{}_0", name);
            }
            return name.to_string();
        }

        let namespace = ctx.key.namespace();
        let probe_path = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", namespace, name)
        };

        // Look for a same-named declaration with fewer type arguments.
        let mut lower = arity;
        let found_generic = loop {
            lower -= 1;
            if lower == 0 {
                break false;
            }
            if ctx.provider.has_declaration(&probe_path, lower) {
                break true;
            }
        };

        if !found_generic && !ctx.provider.has_declaration(&probe_path, 0) {
            return name.to_string();
        }

        format!("{}_{}", name, arity)
    }
}
