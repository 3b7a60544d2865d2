//! TOML-facing configuration for generation runs.
//!
//! `GeneratorConfig` mirrors [`GeneratorOptions`](crate::core::GeneratorOptions)
//! in serializable form: converter chains become name lists and the custom
//! dependency map becomes a table of entries. Missing sections and fields
//! fall back to defaults, so a config file only states what it overrides.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::ConfigError;
use crate::core::options::{DictionaryMode, GeneratorOptions, NullableMode};
use crate::core::resolver::{CustomDependencyMap, MappingEntry};
use crate::core::types::TypeKey;
use crate::naming::{
    CaseConverter, ContractPostfixConverter, GenericCollisionConverter, MemberNameConverter,
    MemberNameConverters, PascalToCamelCase, PascalToKebabCase, SnakeToCamelCase,
    SnakeToPascalCase, TypeNameConverter, TypeNameConverters, ValueNameConverters,
};

/// Commented starting point written by `typebridge init`. Every value shown
/// is the default.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# typebridge configuration.
# Every value below is the default; delete anything you do not override.

[output]
# Directory generated modules are written into.
path = "generated"
file_extension = "ts"
single_quotes = false
tab_length = 4
create_index_file = false

[generation]
strict_dependencies = false
include_explicit_members = false
use_default_export = false
# strip | null | undefined
nullable_mode = "strip"
# basic | key-value-array | custom
dictionary_mode = "key-value-array"
# Required when dictionary_mode is "custom", e.g. "Collections.StrictMap".
# custom_dictionary_type = ""

[models]
# Glob patterns for JSON model files, merged in order.
patterns = ["models/**/*.json"]

[naming]
# Converters run left to right, each output feeding the next.
# Case converters (any axis): pascal-to-camel, pascal-to-kebab,
# snake-to-camel, snake-to-pascal.
# Type and file axes also accept generic-collision; the member axis also
# accepts explicit-postfix.
type_converters = ["generic-collision"]
member_converters = ["pascal-to-camel", "explicit-postfix"]
file_converters = ["pascal-to-kebab"]
value_converters = []

# Map types outside the generation set onto existing modules. Keys are full
# type paths or namespace prefixes; longest prefix wins.
#
# [dependencies."External.Guid"]
# path = "util/guid"
# flat = false
# default_export = false
"#;

/// Output location and formatting of generated files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for generated modules.
    pub path: PathBuf,
    /// Extension appended to generated file names, without the dot.
    pub file_extension: String,
    pub single_quotes: bool,
    pub tab_length: usize,
    /// Write a barrel `index` file re-exporting every module.
    pub create_index_file: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("generated"),
            file_extension: "ts".to_string(),
            single_quotes: false,
            tab_length: 4,
            create_index_file: false,
        }
    }
}

/// Semantics of the generation run itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fail when a dependency is neither generated nor mapped.
    pub strict_dependencies: bool,
    /// Include contract members declared with an explicit qualifier.
    pub include_explicit_members: bool,
    /// Emit `export default` declarations unless a type overrides it.
    pub use_default_export: bool,
    pub nullable_mode: NullableMode,
    pub dictionary_mode: DictionaryMode,
    /// Full path of the dictionary type used when `dictionary_mode` is
    /// `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_dictionary_type: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            strict_dependencies: false,
            include_explicit_members: false,
            use_default_export: false,
            nullable_mode: NullableMode::default(),
            dictionary_mode: DictionaryMode::default(),
            custom_dictionary_type: None,
        }
    }
}

/// Where type declarations are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Glob patterns for JSON model files, merged in order.
    pub patterns: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["models/**/*.json".to_string()],
        }
    }
}

/// Converter name lists, one per naming axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub type_converters: Vec<String>,
    pub member_converters: Vec<String>,
    pub file_converters: Vec<String>,
    pub value_converters: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            type_converters: vec!["generic-collision".to_string()],
            member_converters: vec![
                "pascal-to-camel".to_string(),
                "explicit-postfix".to_string(),
            ],
            file_converters: vec!["pascal-to-kebab".to_string()],
            value_converters: Vec::new(),
        }
    }
}

/// One custom dependency mapping in the config file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyEntry {
    /// Import path of the existing module.
    pub path: String,
    /// Namespace matches reuse `path` as-is instead of appending the
    /// remaining segments.
    pub flat: bool,
    /// Import the type as a default export (exact matches only).
    pub default_export: bool,
}

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub output: OutputConfig,
    pub generation: GenerationConfig,
    pub models: ModelConfig,
    pub naming: NamingConfig,
    pub dependencies: BTreeMap<String, DependencyEntry>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path).await
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Loads and validates a TOML configuration file.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validates structural constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.tab_length == 0 || self.output.tab_length > 16 {
            return Err(ConfigError::InvalidValue {
                field: "output.tab_length".to_string(),
                value: self.output.tab_length.to_string(),
                reason: "must be between 1 and 16".to_string(),
            });
        }

        let extension = &self.output.file_extension;
        if extension.is_empty() || extension.starts_with('.') {
            return Err(ConfigError::InvalidValue {
                field: "output.file_extension".to_string(),
                value: extension.clone(),
                reason: "must be a bare extension without the dot".to_string(),
            });
        }

        if self.generation.dictionary_mode == DictionaryMode::Custom {
            let named = self
                .generation
                .custom_dictionary_type
                .as_deref()
                .map_or(false, |name| !name.trim().is_empty());
            if !named {
                return Err(ConfigError::InvalidValue {
                    field: "generation.custom_dictionary_type".to_string(),
                    value: String::new(),
                    reason: "required when dictionary_mode is \"custom\"".to_string(),
                });
            }
        }

        for (qualifier, entry) in &self.dependencies {
            if entry.path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("dependencies.{qualifier}.path"),
                    value: entry.path.clone(),
                    reason: "import path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Lowers the document into runtime options, building converter chains
    /// and the custom dependency map.
    pub fn to_options(&self) -> Result<GeneratorOptions, ConfigError> {
        self.validate()?;

        let mut custom_dependencies = CustomDependencyMap::new();
        for (qualifier, entry) in &self.dependencies {
            let mut mapping = MappingEntry::new(&entry.path);
            if entry.flat {
                mapping = mapping.flat();
            }
            if entry.default_export {
                mapping = mapping.default_export();
            }
            custom_dependencies.insert(qualifier.clone(), mapping)?;
        }

        let custom_dictionary_type = self
            .generation
            .custom_dictionary_type
            .as_deref()
            .map(TypeKey::plain);

        Ok(GeneratorOptions {
            strict_dependencies: self.generation.strict_dependencies,
            include_explicit_members: self.generation.include_explicit_members,
            use_default_export: self.generation.use_default_export,
            single_quotes: self.output.single_quotes,
            file_extension: self.output.file_extension.clone(),
            tab_length: self.output.tab_length,
            create_index_file: self.output.create_index_file,
            nullable_mode: self.generation.nullable_mode,
            dictionary_mode: self.generation.dictionary_mode,
            custom_dictionary_type,
            custom_dependencies,
            type_names: type_chain(&self.naming.type_converters, "type")?,
            member_names: member_chain(&self.naming.member_converters)?,
            file_names: type_chain(&self.naming.file_converters, "file")?,
            value_names: value_chain(&self.naming.value_converters)?,
        })
    }
}

fn case_converter(name: &str) -> Option<Box<dyn CaseConverter>> {
    match name {
        "pascal-to-camel" => Some(Box::new(PascalToCamelCase)),
        "pascal-to-kebab" => Some(Box::new(PascalToKebabCase)),
        "snake-to-camel" => Some(Box::new(SnakeToCamelCase)),
        "snake-to-pascal" => Some(Box::new(SnakeToPascalCase)),
        _ => None,
    }
}

fn type_chain(names: &[String], axis: &str) -> Result<TypeNameConverters, ConfigError> {
    let mut converters: Vec<Box<dyn TypeNameConverter>> = Vec::with_capacity(names.len());
    for name in names {
        let converter: Box<dyn TypeNameConverter> = match name.as_str() {
            "generic-collision" => Box::new(GenericCollisionConverter),
            other => match case_converter(other) {
                Some(case) => case_to_type(case),
                None => {
                    return Err(ConfigError::UnknownConverter {
                        axis: axis.to_string(),
                        name: name.clone(),
                    })
                }
            },
        };
        converters.push(converter);
    }
    Ok(TypeNameConverters::new(converters))
}

fn member_chain(names: &[String]) -> Result<MemberNameConverters, ConfigError> {
    let mut converters: Vec<Box<dyn MemberNameConverter>> = Vec::with_capacity(names.len());
    for name in names {
        let converter: Box<dyn MemberNameConverter> = match name.as_str() {
            "explicit-postfix" => Box::new(ContractPostfixConverter),
            other => match case_converter(other) {
                Some(case) => case_to_member(case),
                None => {
                    return Err(ConfigError::UnknownConverter {
                        axis: "member".to_string(),
                        name: name.clone(),
                    })
                }
            },
        };
        converters.push(converter);
    }
    Ok(MemberNameConverters::new(converters))
}

fn value_chain(names: &[String]) -> Result<ValueNameConverters, ConfigError> {
    let mut converters = Vec::with_capacity(names.len());
    for name in names {
        let converter = case_converter(name).ok_or_else(|| ConfigError::UnknownConverter {
            axis: "value".to_string(),
            name: name.clone(),
        })?;
        converters.push(converter);
    }
    Ok(ValueNameConverters::new(converters))
}

// Boxed trait objects miss the blanket impls for sized case converters, so
// the chain builders wrap them under the axis trait by hand.
fn case_to_type(case: Box<dyn CaseConverter>) -> Box<dyn TypeNameConverter> {
    struct Adapter(Box<dyn CaseConverter>);
    impl TypeNameConverter for Adapter {
        fn convert(&self, name: &str, _ctx: &crate::naming::TypeContext<'_>) -> String {
            self.0.convert(name)
        }
    }
    Box::new(Adapter(case))
}

fn case_to_member(case: Box<dyn CaseConverter>) -> Box<dyn MemberNameConverter> {
    struct Adapter(Box<dyn CaseConverter>);
    impl MemberNameConverter for Adapter {
        fn convert(&self, name: &str, _ctx: &crate::naming::MemberContext<'_>) -> String {
            self.0.convert(name)
        }
    }
    Box::new(Adapter(case))
}
