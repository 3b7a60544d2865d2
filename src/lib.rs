//! # typebridge
//!
//! Generates TypeScript model modules from annotated type graphs.
//!
//! typebridge loads type declarations (classes, interfaces, enums and
//! structs) from JSON model files, extracts the dependency edges each
//! exported type needs, resolves every edge to a relative import or a
//! mapped external module, and renders one TypeScript module per type.
//!
//! ## Core Features
//!
//! - **Dependency extraction**: base types, implemented interfaces, generic
//!   constraints and member types, deduplicated per declaration
//! - **Import resolution**: relative paths between output directories, plus
//!   custom mappings for types that live outside the generation run
//! - **Naming pipeline**: ordered converter chains for type, member, file
//!   and enum-value names
//! - **Strict validation**: fail a run when a dependency is neither
//!   generated nor mapped
//! - **Module emission**: classes, interfaces and enums with imports,
//!   heritage clauses, optional markers and initializers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use type_bridge::config::GeneratorConfig;
//! use type_bridge::core::registry::TypeRegistry;
//! use type_bridge::emit::{ModuleGenerator, ModuleWriter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::load_or_default(Path::new("typebridge.toml")).await?;
//!     let options = config.to_options()?;
//!     let registry = TypeRegistry::load_patterns(&config.models.patterns)?;
//!     let modules = ModuleGenerator::new(&registry, &options).generate()?;
//!     ModuleWriter::new(&config.output.path).write_all(&modules).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`core`] - Type model, registry, dependency extraction, import
//!   resolution and runtime options
//! - [`naming`] - Pluggable name converter chains
//! - [`emit`] - Module rendering and file writing
//! - [`config`] - TOML configuration and the converter-name registry
//! - [`cli`] - Command-line interface

/// Command-line interface and argument parsing
pub mod cli;
/// TOML configuration loading and lowering to runtime options
pub mod config;
/// Core type model, registry, extraction and resolution
pub mod core;
/// Module rendering and file output
pub mod emit;
/// Name converter chains for types, members, files and enum values
pub mod naming;

// Re-export core functionality for easy access
pub use crate::core::*;
pub use crate::emit::{ModuleGenerator, ModuleWriter};
