//! Runtime options for a generation run.
//!
//! This consolidates every knob the generator, resolver and emitters read
//! into a single structure. The configuration layer deserializes a
//! `GeneratorConfig` from TOML and lowers it into `GeneratorOptions`;
//! library callers can also build one directly.

use serde::{Deserialize, Serialize};

use crate::core::resolver::CustomDependencyMap;
use crate::core::types::TypeKey;
use crate::naming::{MemberNameConverters, TypeNameConverters, ValueNameConverters};

/// How nullable member types are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullableMode {
    /// Drop the nullable wrapper entirely and emit the inner type.
    Strip,
    /// Emit `T | null`.
    Null,
    /// Emit `T | undefined`.
    Undefined,
}

impl Default for NullableMode {
    fn default() -> Self {
        NullableMode::Strip
    }
}

/// How dictionary-shaped types are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DictionaryMode {
    /// Only string/number keys are allowed; `{ [key: K]: V }`. A complex
    /// key type fails the run.
    Basic,
    /// Complex keys degrade to `{ key: K; value: V }[]`.
    KeyValueArray,
    /// Complex-keyed dictionaries become `<CustomType><K, V>`; the custom
    /// type must have an entry in the custom dependency map to be imported.
    Custom,
}

impl Default for DictionaryMode {
    fn default() -> Self {
        DictionaryMode::KeyValueArray
    }
}

/// Options consumed by the generation pipeline.
///
/// Not serializable: the converter chains hold trait objects. See the
/// config module for the TOML-facing mirror of this structure.
pub struct GeneratorOptions {
    /// Fail the run when a dependency is neither generated nor mapped.
    pub strict_dependencies: bool,

    /// Include contract members declared with an explicit qualifier.
    pub include_explicit_members: bool,

    /// Emit `export default` declarations (per-type overrides win).
    pub use_default_export: bool,

    /// Use single quotes in import statements.
    pub single_quotes: bool,

    /// Extension appended to generated file names.
    pub file_extension: String,

    /// Spaces per indentation level.
    pub tab_length: usize,

    /// Write a barrel `index.ts` re-exporting every generated module.
    pub create_index_file: bool,

    /// Rendering of nullable member types.
    pub nullable_mode: NullableMode,

    /// Rendering of dictionary-shaped member types.
    pub dictionary_mode: DictionaryMode,

    /// Target type for [`DictionaryMode::Custom`], e.g. `Collections.StrictMap`.
    pub custom_dictionary_type: Option<TypeKey>,

    /// Mappings for dependencies that live outside the generation run.
    pub custom_dependencies: CustomDependencyMap,

    /// Converter chain applied to type display names.
    pub type_names: TypeNameConverters,

    /// Converter chain applied to member names.
    pub member_names: MemberNameConverters,

    /// Converter chain applied to file name stems.
    pub file_names: TypeNameConverters,

    /// Converter chain applied to enum value names.
    pub value_names: ValueNameConverters,
}

impl std::fmt::Debug for GeneratorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorOptions")
            .field("strict_dependencies", &self.strict_dependencies)
            .field("include_explicit_members", &self.include_explicit_members)
            .field("use_default_export", &self.use_default_export)
            .field("single_quotes", &self.single_quotes)
            .field("file_extension", &self.file_extension)
            .field("tab_length", &self.tab_length)
            .field("create_index_file", &self.create_index_file)
            .field("nullable_mode", &self.nullable_mode)
            .field("dictionary_mode", &self.dictionary_mode)
            .field("custom_dictionary_type", &self.custom_dictionary_type)
            .field("custom_dependencies", &self.custom_dependencies)
            .finish_non_exhaustive()
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        use crate::naming::{
            ContractPostfixConverter, GenericCollisionConverter, PascalToCamelCase,
            PascalToKebabCase,
        };

        Self {
            strict_dependencies: false,
            include_explicit_members: false,
            use_default_export: false,
            single_quotes: false,
            file_extension: "ts".to_string(),
            tab_length: 4,
            create_index_file: false,
            nullable_mode: NullableMode::default(),
            dictionary_mode: DictionaryMode::default(),
            custom_dictionary_type: None,
            custom_dependencies: CustomDependencyMap::new(),
            type_names: TypeNameConverters::new(vec![Box::new(GenericCollisionConverter)]),
            member_names: MemberNameConverters::new(vec![
                Box::new(PascalToCamelCase),
                Box::new(ContractPostfixConverter),
            ]),
            file_names: TypeNameConverters::new(vec![Box::new(PascalToKebabCase)]),
            value_names: ValueNameConverters::default(),
        }
    }
}

impl GeneratorOptions {
    /// Create options with the default converter chains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote character for emitted import paths.
    pub fn quote(&self) -> char {
        if self.single_quotes {
            '\''
        } else {
            '"'
        }
    }

    /// One level of indentation.
    pub fn indent(&self) -> String {
        " ".repeat(self.tab_length)
    }
}
