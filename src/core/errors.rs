//! Structured error types for generation, configuration and model loading.
//!
//! Library code returns these directly; the CLI layer wraps them with
//! anyhow context before display.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::TypeKey;

/// Main error type for typebridge operations
#[derive(Error, Debug)]
pub enum TypeBridgeError {
    #[error("Generation failed")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error")]
    Config(#[from] ConfigError),

    #[error("Model loading failed")]
    Model(#[from] ModelError),
}

/// Errors raised while resolving and rendering modules
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Dependency {required} not found. Needed to generate {requesting}. Make sure you either ignore the type, include it in the generation set or provide a custom dependency mapping for it.")]
    MissingDependency {
        requesting: TypeKey,
        required: TypeKey,
    },

    #[error("Dictionary key of {type_key}.{member} is not a string or number; set dictionary_mode to \"key-value-array\" or \"custom\" to generate it")]
    ComplexDictionaryKey { type_key: TypeKey, member: String },
}

impl GeneratorError {
    pub fn missing(requesting: TypeKey, required: TypeKey) -> Self {
        GeneratorError::MissingDependency {
            requesting,
            required,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read config file {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TOML parsing failed in {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate dependency mapping for qualifier: {qualifier}")]
    DuplicateMapping { qualifier: String },

    #[error("Unknown {axis} converter: {name}")]
    UnknownConverter { axis: String, name: String },
}

/// Errors raised while building the known-type index
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Duplicate type registration: {key}")]
    DuplicateType { key: TypeKey },

    #[error("Failed to read model file {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON parsing failed in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model file pattern: {pattern}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No model files match pattern: {pattern}")]
    NoModelFiles { pattern: String },
}
