//! Renders type references as TypeScript type text.

use crate::core::errors::GeneratorError;
use crate::core::options::{DictionaryMode, GeneratorOptions, NullableMode};
use crate::core::provider::MetadataProvider;
use crate::core::types::{MemberNode, TypeKey, TypeRef};
use crate::naming::TypeContext;

/// Formats [`TypeRef`]s for member declarations, heritage clauses and
/// generic constraint positions. Conversion of named types goes through the
/// configured type-name chain, so the text always matches the import names
/// the resolver produces.
pub struct TypeFormatter<'a> {
    provider: &'a dyn MetadataProvider,
    options: &'a GeneratorOptions,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, options: &'a GeneratorOptions) -> Self {
        Self { provider, options }
    }

    /// Display name of a type after the type-name converter chain.
    pub fn display_name(&self, key: &TypeKey) -> String {
        let ctx = TypeContext {
            key,
            provider: self.provider,
        };
        self.options.type_names.convert(key.base_name(), &ctx)
    }

    /// Text for a member's declared type. A hand-written override wins and
    /// is emitted verbatim.
    pub fn member_type(
        &self,
        declaring: &TypeKey,
        member: &MemberNode,
    ) -> Result<String, GeneratorError> {
        if let Some(over) = &member.directives.type_override {
            return Ok(over.ts_type.clone());
        }
        self.render(&member.ty, declaring, &member.name)
    }

    /// Text for non-member positions: bases, interfaces, constraints.
    pub fn type_text(&self, ty: &TypeRef, declaring: &TypeKey) -> Result<String, GeneratorError> {
        self.render(ty, declaring, "")
    }

    fn render(
        &self,
        ty: &TypeRef,
        declaring: &TypeKey,
        member: &str,
    ) -> Result<String, GeneratorError> {
        match ty {
            TypeRef::Primitive(primitive) => Ok(primitive.ts_name().to_string()),
            TypeRef::Param(name) => Ok(name.clone()),
            TypeRef::Array(element) => {
                let inner = self.render(element, declaring, member)?;
                // Union elements need grouping to bind the array suffix.
                if inner.contains(" | ") {
                    Ok(format!("({inner})[]"))
                } else {
                    Ok(format!("{inner}[]"))
                }
            }
            TypeRef::Nullable(inner) => {
                let text = self.render(inner, declaring, member)?;
                Ok(match self.options.nullable_mode {
                    NullableMode::Strip => text,
                    NullableMode::Null => format!("{text} | null"),
                    NullableMode::Undefined => format!("{text} | undefined"),
                })
            }
            TypeRef::Named { key, args } => {
                let name = self.display_name(key);
                if args.is_empty() {
                    return Ok(name);
                }
                let args = args
                    .iter()
                    .map(|arg| self.render(arg, declaring, member))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{name}<{}>", args.join(", ")))
            }
            TypeRef::Dictionary { key, value } => {
                self.render_dictionary(key, value, declaring, member)
            }
        }
    }

    fn render_dictionary(
        &self,
        key: &TypeRef,
        value: &TypeRef,
        declaring: &TypeKey,
        member: &str,
    ) -> Result<String, GeneratorError> {
        let value_text = self.render(value, declaring, member)?;

        if key.is_index_key() {
            // Index signatures reject union keys, so the nullable wrapper
            // never reaches the rendered key.
            let key_text = self.render(key.without_nullable(), declaring, member)?;
            return Ok(format!("{{ [key: {key_text}]: {value_text} }}"));
        }

        let key_text = self.render(key, declaring, member)?;
        match self.options.dictionary_mode {
            DictionaryMode::Basic => Err(GeneratorError::ComplexDictionaryKey {
                type_key: declaring.clone(),
                member: member.to_string(),
            }),
            DictionaryMode::KeyValueArray => {
                Ok(format!("{{ key: {key_text}; value: {value_text} }}[]"))
            }
            DictionaryMode::Custom => match &self.options.custom_dictionary_type {
                Some(custom) => Ok(format!(
                    "{}<{key_text}, {value_text}>",
                    self.display_name(custom)
                )),
                // Config validation requires the custom type for this mode;
                // options built by hand degrade to the array form.
                None => Ok(format!("{{ key: {key_text}; value: {value_text} }}[]")),
            },
        }
    }
}
