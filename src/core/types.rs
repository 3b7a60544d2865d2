use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Identity of a declared type: dotted namespace path plus generic arity.
///
/// Two declarations may share a path as long as their arity differs, so the
/// arity is part of the identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey {
    pub path: String,
    #[serde(default)]
    pub arity: usize,
}

impl TypeKey {
    pub fn new(path: impl Into<String>, arity: usize) -> Self {
        Self {
            path: path.into(),
            arity,
        }
    }

    pub fn plain(path: impl Into<String>) -> Self {
        Self::new(path, 0)
    }

    /// Namespace portion of the path, empty for top-level types.
    pub fn namespace(&self) -> &str {
        self.path.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
    }

    /// Last path segment, without the namespace.
    pub fn base_name(&self) -> &str {
        self.path.rsplit_once('.').map(|(_, n)| n).unwrap_or(&self.path)
    }

    /// Canonical qualifier string used as the exact-match key in a custom
    /// dependency map. Non-generic types qualify by their bare path, which
    /// keeps the key writable in config files; generics carry an arity
    /// marker so they never collide with a namespace prefix.
    pub fn qualifier(&self) -> String {
        if self.arity == 0 {
            self.path.clone()
        } else {
            format!("{}<{}>", self.path, self.arity)
        }
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.arity == 0 {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}<{}>", self.path, self.arity)
        }
    }
}

/// Built-in types that render inline and never become dependencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Date,
    Any,
    Void,
    Object,
}

impl Primitive {
    pub fn ts_name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Date => "Date",
            Primitive::Any => "any",
            Primitive::Void => "void",
            Primitive::Object => "object",
        }
    }
}

/// A type as it appears in a member declaration, base-type position,
/// interface list or generic argument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(Primitive),
    Named {
        key: TypeKey,
        #[serde(default)]
        args: Vec<TypeRef>,
    },
    /// Generic parameter of the declaring type.
    Param(String),
    Array(Box<TypeRef>),
    Nullable(Box<TypeRef>),
    Dictionary {
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },
}

impl TypeRef {
    pub fn string() -> Self {
        TypeRef::Primitive(Primitive::String)
    }

    pub fn number() -> Self {
        TypeRef::Primitive(Primitive::Number)
    }

    pub fn boolean() -> Self {
        TypeRef::Primitive(Primitive::Boolean)
    }

    pub fn date() -> Self {
        TypeRef::Primitive(Primitive::Date)
    }

    pub fn any() -> Self {
        TypeRef::Primitive(Primitive::Any)
    }

    pub fn object() -> Self {
        TypeRef::Primitive(Primitive::Object)
    }

    /// Non-generic named type.
    pub fn named(path: impl Into<String>) -> Self {
        TypeRef::Named {
            key: TypeKey::plain(path),
            args: Vec::new(),
        }
    }

    /// Closed generic instantiation; arity is taken from the argument count.
    pub fn generic(path: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            key: TypeKey::new(path, args.len()),
            args,
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        TypeRef::Param(name.into())
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    pub fn dictionary(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Unwraps array layers down to the element type.
    pub fn flattened(&self) -> &TypeRef {
        match self {
            TypeRef::Array(element) => element.flattened(),
            _ => self,
        }
    }

    /// Unwraps nullable layers down to the underlying type.
    pub fn without_nullable(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable(inner) => inner.without_nullable(),
            _ => self,
        }
    }

    /// The named target of this reference, if it has one.
    pub fn target(&self) -> Option<&TypeKey> {
        match self {
            TypeRef::Named { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, TypeRef::Dictionary { .. })
    }

    /// Whether this type can serve as a TypeScript index-signature key.
    pub fn is_index_key(&self) -> bool {
        matches!(
            self.without_nullable(),
            TypeRef::Primitive(Primitive::String) | TypeRef::Primitive(Primitive::Number)
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Struct,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Struct => write!(f, "struct"),
        }
    }
}

/// Generic parameter declared on a type, with its type constraints.
/// Marker constraints with no type identity are not represented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenericParam {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<TypeRef>,
}

impl GenericParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }
}

/// A single value of an enum type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub value: Option<EnumLiteral>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EnumLiteral {
    Int(i64),
    Str(String),
}

/// Marks a type for generation, optionally into a specific output directory
/// (relative to the configured output root).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportDirective {
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Which declared bases and interfaces are suppressed for a type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum IgnoredBases {
    #[default]
    None,
    All,
    Listed(Vec<TypeKey>),
}

/// Replaces the declared base clause with a hand-written one, optionally
/// importing it from a given path under an alias.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomBase {
    pub name: String,
    #[serde(default)]
    pub import_path: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub default_export: bool,
}

/// Per-type generation directives, resolved once when the type is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDirectives {
    #[serde(default)]
    pub export: Option<ExportDirective>,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub ignored_bases: IgnoredBases,
    #[serde(default)]
    pub custom_base: Option<CustomBase>,
    /// Overrides the global default-export policy for this type.
    #[serde(default)]
    pub default_export: Option<bool>,
}

/// Where a member comes from: declared on the type itself, or implementing
/// a contract whose name must be disambiguated in flat output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MemberOrigin {
    Own,
    Contract { contract: TypeKey },
}

impl MemberOrigin {
    fn own() -> Self {
        MemberOrigin::Own
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, MemberOrigin::Contract { .. })
    }
}

/// Hand-written replacement for a member's declared type, optionally
/// imported from a given path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeOverride {
    pub ts_type: String,
    #[serde(default)]
    pub import_path: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub default_export: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemberDirectives {
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub type_override: Option<TypeOverride>,
    /// Output directory for the member's target type when that type is bare
    /// (reached transitively, with no export directive of its own).
    #[serde(default)]
    pub default_output_dir: Option<String>,
}

/// A field or property belonging to a [`TypeNode`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberNode {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default = "MemberOrigin::own")]
    pub origin: MemberOrigin,
    #[serde(default)]
    pub directives: MemberDirectives,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
}

impl MemberNode {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            origin: MemberOrigin::Own,
            directives: MemberDirectives::default(),
            default_value: None,
        }
    }

    /// Member implementing a contract's declaration; the contract identity
    /// feeds the explicit-member name disambiguation.
    pub fn from_contract(name: impl Into<String>, ty: TypeRef, contract: TypeKey) -> Self {
        Self {
            name: name.into(),
            ty,
            origin: MemberOrigin::Contract { contract },
            directives: MemberDirectives::default(),
            default_value: None,
        }
    }

    pub fn ignored(mut self) -> Self {
        self.directives.ignored = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.directives.optional = true;
        self
    }

    pub fn with_type_override(mut self, over: TypeOverride) -> Self {
        self.directives.type_override = Some(over);
        self
    }

    pub fn with_default_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.directives.default_output_dir = Some(dir.into());
        self
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// A discovered type and its structural shape. Immutable for the duration
/// of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeNode {
    pub key: TypeKey,
    pub kind: TypeKind,
    #[serde(default)]
    pub generic_params: Vec<GenericParam>,
    #[serde(default)]
    pub base: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<MemberNode>,
    #[serde(default)]
    pub enum_values: Vec<EnumValue>,
    #[serde(default)]
    pub directives: TypeDirectives,
}

impl TypeNode {
    pub fn new(key: TypeKey, kind: TypeKind) -> Self {
        Self {
            key,
            kind,
            generic_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            enum_values: Vec::new(),
            directives: TypeDirectives::default(),
        }
    }

    pub fn class(path: impl Into<String>) -> Self {
        Self::new(TypeKey::plain(path), TypeKind::Class)
    }

    pub fn interface(path: impl Into<String>) -> Self {
        Self::new(TypeKey::plain(path), TypeKind::Interface)
    }

    pub fn enumeration(path: impl Into<String>) -> Self {
        Self::new(TypeKey::plain(path), TypeKind::Enum)
    }

    pub fn structure(path: impl Into<String>) -> Self {
        Self::new(TypeKey::plain(path), TypeKind::Struct)
    }

    pub fn generic_class(path: impl Into<String>, params: &[&str]) -> Self {
        Self::generic(path, TypeKind::Class, params)
    }

    pub fn generic_interface(path: impl Into<String>, params: &[&str]) -> Self {
        Self::generic(path, TypeKind::Interface, params)
    }

    fn generic(path: impl Into<String>, kind: TypeKind, params: &[&str]) -> Self {
        let mut node = Self::new(TypeKey::new(path, params.len()), kind);
        node.generic_params = params.iter().map(|p| GenericParam::new(*p)).collect();
        node
    }

    /// Marks the type for generation into `output_dir`.
    pub fn exported(mut self, output_dir: impl Into<String>) -> Self {
        self.directives.export = Some(ExportDirective {
            output_dir: Some(output_dir.into()),
        });
        self
    }

    /// Marks the type for generation into the output root.
    pub fn exported_root(mut self) -> Self {
        self.directives.export = Some(ExportDirective::default());
        self
    }

    pub fn ignored(mut self) -> Self {
        self.directives.ignored = true;
        self
    }

    pub fn ignore_all_bases(mut self) -> Self {
        self.directives.ignored_bases = IgnoredBases::All;
        self
    }

    pub fn ignore_base(mut self, key: TypeKey) -> Self {
        match &mut self.directives.ignored_bases {
            IgnoredBases::Listed(listed) => listed.push(key),
            slot => *slot = IgnoredBases::Listed(vec![key]),
        }
        self
    }

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_custom_base(mut self, custom: CustomBase) -> Self {
        self.directives.custom_base = Some(custom);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn member(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.with_member(MemberNode::new(name, ty))
    }

    pub fn with_member(mut self, member: MemberNode) -> Self {
        self.members.push(member);
        self
    }

    pub fn value(mut self, name: impl Into<String>) -> Self {
        self.enum_values.push(EnumValue {
            name: name.into(),
            value: None,
        });
        self
    }

    pub fn value_of(mut self, name: impl Into<String>, literal: EnumLiteral) -> Self {
        self.enum_values.push(EnumValue {
            name: name.into(),
            value: Some(literal),
        });
        self
    }

    /// Adds a type constraint to the named generic parameter.
    pub fn constrain(mut self, param: &str, constraint: TypeRef) -> Self {
        if let Some(p) = self.generic_params.iter_mut().find(|p| p.name == param) {
            p.constraints.push(constraint);
        }
        self
    }

    pub fn default_export(mut self, enabled: bool) -> Self {
        self.directives.default_export = Some(enabled);
        self
    }

    pub fn is_exported(&self) -> bool {
        self.directives.export.is_some()
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.directives
            .export
            .as_ref()
            .and_then(|e| e.output_dir.as_deref())
    }
}

/// Why a dependency edge exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    GenericConstraint,
    Base,
    Interface,
    Member,
}

/// A directed "requires" relationship between two types.
///
/// Equality and hashing use the target identity only, so duplicate edges
/// from different causes collapse to one when deduplicated.
#[derive(Debug, Clone)]
pub struct DependencyEdge {
    pub target: TypeKey,
    pub kind: EdgeKind,
    pub is_base: bool,
    /// Default output directory carried over from the originating member.
    pub member_output_dir: Option<String>,
}

impl DependencyEdge {
    pub fn new(target: TypeKey, kind: EdgeKind) -> Self {
        let is_base = matches!(kind, EdgeKind::Base | EdgeKind::Interface);
        Self {
            target,
            kind,
            is_base,
            member_output_dir: None,
        }
    }

    pub fn with_member_output_dir(mut self, dir: Option<String>) -> Self {
        self.member_output_dir = dir;
        self
    }
}

impl PartialEq for DependencyEdge {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for DependencyEdge {}

impl Hash for DependencyEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
    }
}

/// One rendered import statement, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedImport {
    pub name: String,
    pub alias: Option<String>,
    pub path: String,
    pub default_export: bool,
}

impl ResolvedImport {
    pub fn named(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            path: path.into(),
            default_export: false,
        }
    }
}

/// A fully rendered output module, ready for the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    pub key: TypeKey,
    /// Path relative to the output root, with the converted file name.
    pub path: PathBuf,
    pub content: String,
}
