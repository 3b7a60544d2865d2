pub mod errors;
pub mod extractor;
pub mod options;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod types;

pub use errors::{ConfigError, GeneratorError, ModelError, TypeBridgeError};
pub use extractor::DependencyExtractor;
pub use options::{DictionaryMode, GeneratorOptions, NullableMode};
pub use provider::MetadataProvider;
pub use registry::{TypeModel, TypeRegistry};
pub use resolver::{
    relative_dir_diff, CustomDependencyMap, ImportResolver, MappedImport, MappingEntry,
};
pub use types::*;
