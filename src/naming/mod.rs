//! Ordered, pluggable name transforms for types, members, files and enum
//! values. Converters run left-to-right, each output feeding the next, so
//! chain order is part of the configuration contract.

mod case;
mod collision;
mod explicit;

pub use case::{PascalToCamelCase, PascalToKebabCase, SnakeToCamelCase, SnakeToPascalCase};
pub use collision::GenericCollisionConverter;
pub use explicit::ContractPostfixConverter;

use crate::core::provider::MetadataProvider;
use crate::core::types::{MemberNode, TypeKey};

/// Context handed to type-name converters: the identity being named and the
/// known-type index for collision probes.
pub struct TypeContext<'a> {
    pub key: &'a TypeKey,
    pub provider: &'a dyn MetadataProvider,
}

/// Context handed to member-name converters.
pub struct MemberContext<'a> {
    pub member: &'a MemberNode,
    pub declaring: &'a TypeKey,
}

/// Converts type names (also used for file names derived from them).
pub trait TypeNameConverter: Send + Sync {
    fn convert(&self, name: &str, ctx: &TypeContext<'_>) -> String;
}

/// Converts member names.
pub trait MemberNameConverter: Send + Sync {
    fn convert(&self, name: &str, ctx: &MemberContext<'_>) -> String;
}

/// Plain string transform with no context, usable on any axis.
pub trait CaseConverter: Send + Sync {
    fn convert(&self, name: &str) -> String;
}

impl<C: CaseConverter> TypeNameConverter for C {
    fn convert(&self, name: &str, _ctx: &TypeContext<'_>) -> String {
        CaseConverter::convert(self, name)
    }
}

impl<C: CaseConverter> MemberNameConverter for C {
    fn convert(&self, name: &str, _ctx: &MemberContext<'_>) -> String {
        CaseConverter::convert(self, name)
    }
}

/// Ordered chain for the type-name and file-name axes.
#[derive(Default)]
pub struct TypeNameConverters {
    converters: Vec<Box<dyn TypeNameConverter>>,
}

impl TypeNameConverters {
    pub fn new(converters: Vec<Box<dyn TypeNameConverter>>) -> Self {
        Self { converters }
    }

    pub fn push(&mut self, converter: Box<dyn TypeNameConverter>) {
        self.converters.push(converter);
    }

    pub fn convert(&self, name: &str, ctx: &TypeContext<'_>) -> String {
        self.converters
            .iter()
            .fold(name.to_string(), |acc, converter| converter.convert(&acc, ctx))
    }
}

/// Ordered chain for the member-name axis.
#[derive(Default)]
pub struct MemberNameConverters {
    converters: Vec<Box<dyn MemberNameConverter>>,
}

impl MemberNameConverters {
    pub fn new(converters: Vec<Box<dyn MemberNameConverter>>) -> Self {
        Self { converters }
    }

    pub fn push(&mut self, converter: Box<dyn MemberNameConverter>) {
        self.converters.push(converter);
    }

    pub fn convert(&self, name: &str, ctx: &MemberContext<'_>) -> String {
        self.converters
            .iter()
            .fold(name.to_string(), |acc, converter| converter.convert(&acc, ctx))
    }
}

/// Ordered chain for the enum-value axis.
#[derive(Default)]
pub struct ValueNameConverters {
    converters: Vec<Box<dyn CaseConverter>>,
}

impl ValueNameConverters {
    pub fn new(converters: Vec<Box<dyn CaseConverter>>) -> Self {
        Self { converters }
    }

    pub fn convert(&self, name: &str) -> String {
        self.converters
            .iter()
            .fold(name.to_string(), |acc, converter| converter.convert(&acc))
    }
}
