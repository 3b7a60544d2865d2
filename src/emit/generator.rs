//! Turns the generation set into rendered TypeScript modules.
//!
//! Rendering runs in two phases. Exported types are independent of each
//! other, so they render in parallel. Unexported registry types referenced
//! by rendered modules are then rendered sequentially from a worklist,
//! exactly once per run, into the directory chosen by the first edge that
//! reached them.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::errors::GeneratorError;
use crate::core::extractor::DependencyExtractor;
use crate::core::options::{DictionaryMode, GeneratorOptions};
use crate::core::provider::MetadataProvider;
use crate::core::registry::TypeRegistry;
use crate::core::resolver::ImportResolver;
use crate::core::types::{
    DependencyEdge, GeneratedModule, ResolvedImport, TypeKey, TypeKind, TypeNode,
};
use crate::emit::format::TypeFormatter;
use crate::emit::templates;
use crate::naming::{MemberContext, TypeContext};

pub struct ModuleGenerator<'a> {
    registry: &'a TypeRegistry,
    options: &'a GeneratorOptions,
    known: HashSet<TypeKey>,
}

struct RenderedModule {
    module: GeneratedModule,
    /// Unexported registry types this module references, with the directory
    /// their module should land in.
    bare_targets: Vec<(TypeKey, String)>,
}

impl<'a> ModuleGenerator<'a> {
    pub fn new(registry: &'a TypeRegistry, options: &'a GeneratorOptions) -> Self {
        let known = registry.generation_keys();
        Self {
            registry,
            options,
            known,
        }
    }

    /// Render every exported type, then every bare dependency reachable
    /// from them. Output order follows registration order, with bare
    /// dependencies appended in discovery order.
    pub fn generate(&self) -> Result<Vec<GeneratedModule>, GeneratorError> {
        let roots = self.registry.generation_set();
        info!("Rendering {} exported types", roots.len());

        let rendered: Vec<Result<RenderedModule, GeneratorError>> = roots
            .par_iter()
            .map(|node| self.render_module(node, node.output_dir().unwrap_or("")))
            .collect();

        let mut modules = Vec::new();
        let mut claimed = self.known.clone();
        let mut queue: VecDeque<(TypeKey, String)> = VecDeque::new();

        for result in rendered {
            let rendered = result?;
            for (key, dir) in rendered.bare_targets {
                if claimed.insert(key.clone()) {
                    queue.push_back((key, dir));
                }
            }
            modules.push(rendered.module);
        }

        while let Some((key, dir)) = queue.pop_front() {
            let Some(node) = self.registry.get(&key) else {
                continue;
            };
            debug!("Rendering bare dependency {} into \"{}\"", key, dir);
            let rendered = self.render_module(node, &dir)?;
            for (next, next_dir) in rendered.bare_targets {
                if claimed.insert(next.clone()) {
                    queue.push_back((next, next_dir));
                }
            }
            modules.push(rendered.module);
        }

        let mut modules = dedup_paths(modules);
        if self.options.create_index_file {
            modules.push(self.index_module(&modules));
        }
        info!("Generated {} modules", modules.len());
        Ok(modules)
    }

    fn extractor(&self) -> DependencyExtractor<'_> {
        let custom_dictionary = match self.options.dictionary_mode {
            DictionaryMode::Custom => self.options.custom_dictionary_type.clone(),
            _ => None,
        };
        DependencyExtractor::new(self.registry)
            .include_explicit_members(self.options.include_explicit_members)
            .with_custom_dictionary(custom_dictionary)
    }

    fn render_module(&self, node: &TypeNode, dir: &str) -> Result<RenderedModule, GeneratorError> {
        let extractor = self.extractor();
        let mut edges = extractor.dependencies_of(node);

        // A custom base replaces the declared clause, so its dependency
        // imports are replaced by the custom import as well.
        if node.directives.custom_base.is_some() {
            edges.retain(|edge| !edge.is_base);
        }
        self.filter_unmapped_dictionary(node, &mut edges);

        let resolver = ImportResolver::new(self.registry, self.options, &self.known);
        let mut imports = Vec::new();
        let mut bare_targets = Vec::new();
        for edge in &edges {
            imports.push(resolver.resolve(&node.key, dir, edge)?);
            self.note_bare_target(node, edge, dir, &mut bare_targets);
        }
        imports.extend(self.custom_base_import(node));
        imports.extend(self.member_override_imports(node));

        let mut seen = HashSet::new();
        imports.retain(|import| seen.insert(import.clone()));

        let formatter = TypeFormatter::new(self.registry, self.options);
        let quote = self.options.quote();
        let mut lines: Vec<String> = imports
            .iter()
            .map(|import| templates::import_line(import, quote))
            .collect();
        if !lines.is_empty() {
            lines.push(String::new());
        }

        let default_export = node
            .directives
            .default_export
            .unwrap_or(self.options.use_default_export);
        match node.kind {
            TypeKind::Enum => self.enum_lines(node, &formatter, default_export, &mut lines),
            TypeKind::Interface => {
                self.interface_lines(node, &formatter, default_export, &mut lines)?
            }
            TypeKind::Class | TypeKind::Struct => {
                self.class_lines(node, &formatter, default_export, &mut lines)?
            }
        }
        if default_export {
            lines.push(format!(
                "export default {};",
                formatter.display_name(&node.key)
            ));
        }

        Ok(RenderedModule {
            module: GeneratedModule {
                key: node.key.clone(),
                path: self.module_path(node, dir),
                content: lines.join("\n") + "\n",
            },
            bare_targets,
        })
    }

    /// Record a target the run knows about but does not export. Targets
    /// missing from the registry get an import line pointing at the path
    /// their module would occupy, and a warning instead of a module.
    fn note_bare_target(
        &self,
        node: &TypeNode,
        edge: &DependencyEdge,
        requesting_dir: &str,
        out: &mut Vec<(TypeKey, String)>,
    ) {
        if self.known.contains(&edge.target)
            || self.options.custom_dependencies.lookup(&edge.target).is_some()
        {
            return;
        }
        match self.registry.get(&edge.target) {
            Some(_) => {
                let target_dir = edge
                    .member_output_dir
                    .clone()
                    .unwrap_or_else(|| requesting_dir.to_string());
                out.push((edge.target.clone(), target_dir));
            }
            None => warn!(
                "{} imports {} which is not part of the run; no module will be generated for it",
                node.key, edge.target
            ),
        }
    }

    /// Drop the synthetic custom-dictionary edge when no mapping provides
    /// its module.
    fn filter_unmapped_dictionary(&self, node: &TypeNode, edges: &mut Vec<DependencyEdge>) {
        let Some(custom) = &self.options.custom_dictionary_type else {
            return;
        };
        if self.options.custom_dependencies.contains(&custom.qualifier()) {
            return;
        }
        let before = edges.len();
        edges.retain(|edge| &edge.target != custom);
        if edges.len() != before {
            warn!(
                "No custom dependency mapping for dictionary type {}; dropping its import from {}",
                custom, node.key
            );
        }
    }

    fn custom_base_import(&self, node: &TypeNode) -> Option<ResolvedImport> {
        let custom = node.directives.custom_base.as_ref()?;
        let path = custom.import_path.as_deref()?;
        Some(symbol_import(
            &custom.name,
            custom.original_name.as_deref(),
            path,
            custom.default_export,
        ))
    }

    fn member_override_imports(&self, node: &TypeNode) -> Vec<ResolvedImport> {
        let mut imports = Vec::new();
        for member in self
            .registry
            .exportable_members(node, self.options.include_explicit_members)
        {
            let Some(over) = &member.directives.type_override else {
                continue;
            };
            let Some(path) = &over.import_path else {
                continue;
            };
            imports.push(symbol_import(
                &over.ts_type,
                over.original_name.as_deref(),
                path,
                over.default_export,
            ));
        }
        imports
    }

    fn declaration_name(
        &self,
        node: &TypeNode,
        formatter: &TypeFormatter<'_>,
    ) -> Result<String, GeneratorError> {
        let display = formatter.display_name(&node.key);
        if node.generic_params.is_empty() {
            return Ok(display);
        }
        let mut params = Vec::new();
        for param in &node.generic_params {
            if param.constraints.is_empty() {
                params.push(param.name.clone());
                continue;
            }
            let constraints = param
                .constraints
                .iter()
                .map(|constraint| formatter.type_text(constraint, &node.key))
                .collect::<Result<Vec<_>, _>>()?;
            params.push(format!("{} extends {}", param.name, constraints.join(" & ")));
        }
        Ok(format!("{display}<{}>", params.join(", ")))
    }

    fn class_lines(
        &self,
        node: &TypeNode,
        formatter: &TypeFormatter<'_>,
        default_export: bool,
        lines: &mut Vec<String>,
    ) -> Result<(), GeneratorError> {
        let extractor = self.extractor();
        let extends = match &node.directives.custom_base {
            Some(custom) => vec![custom.name.clone()],
            None => match extractor.base_of(node) {
                Some(base) => vec![formatter.type_text(base, &node.key)?],
                None => Vec::new(),
            },
        };
        let implements = extractor
            .interfaces_of(node)
            .into_iter()
            .map(|interface| formatter.type_text(interface, &node.key))
            .collect::<Result<Vec<_>, _>>()?;

        let export = if default_export { "" } else { "export " };
        lines.push(format!(
            "{export}class {}{} {{",
            self.declaration_name(node, formatter)?,
            templates::heritage_clause(&extends, &implements)
        ));
        self.member_lines(node, formatter, true, lines)?;
        lines.push("}".to_string());
        Ok(())
    }

    fn interface_lines(
        &self,
        node: &TypeNode,
        formatter: &TypeFormatter<'_>,
        default_export: bool,
        lines: &mut Vec<String>,
    ) -> Result<(), GeneratorError> {
        let extractor = self.extractor();
        // Interfaces have no implements clause; everything extends.
        let mut extends = match &node.directives.custom_base {
            Some(custom) => vec![custom.name.clone()],
            None => match extractor.base_of(node) {
                Some(base) => vec![formatter.type_text(base, &node.key)?],
                None => Vec::new(),
            },
        };
        for interface in extractor.interfaces_of(node) {
            extends.push(formatter.type_text(interface, &node.key)?);
        }

        let export = if default_export { "" } else { "export " };
        lines.push(format!(
            "{export}interface {}{} {{",
            self.declaration_name(node, formatter)?,
            templates::heritage_clause(&extends, &[])
        ));
        self.member_lines(node, formatter, false, lines)?;
        lines.push("}".to_string());
        Ok(())
    }

    fn enum_lines(
        &self,
        node: &TypeNode,
        formatter: &TypeFormatter<'_>,
        default_export: bool,
        lines: &mut Vec<String>,
    ) {
        let export = if default_export { "" } else { "export " };
        let indent = self.options.indent();
        let quote = self.options.quote();
        lines.push(format!(
            "{export}enum {} {{",
            formatter.display_name(&node.key)
        ));
        for value in &node.enum_values {
            let name = self.options.value_names.convert(&value.name);
            lines.push(templates::enum_value_line(value, &name, &indent, quote));
        }
        lines.push("}".to_string());
    }

    fn member_lines(
        &self,
        node: &TypeNode,
        formatter: &TypeFormatter<'_>,
        with_initializers: bool,
        lines: &mut Vec<String>,
    ) -> Result<(), GeneratorError> {
        let indent = self.options.indent();
        let quote = self.options.quote();
        for member in self
            .registry
            .exportable_members(node, self.options.include_explicit_members)
        {
            let ctx = MemberContext {
                member,
                declaring: &node.key,
            };
            let name = self.options.member_names.convert(&member.name, &ctx);
            let ty = formatter.member_type(&node.key, member)?;
            let optional = if member.directives.optional { "?" } else { "" };
            let initializer = if with_initializers {
                member
                    .default_value
                    .as_ref()
                    .map(|value| format!(" = {}", templates::value_literal(value, quote)))
                    .unwrap_or_default()
            } else {
                String::new()
            };
            lines.push(format!("{indent}{name}{optional}: {ty}{initializer};"));
        }
        Ok(())
    }

    fn module_path(&self, node: &TypeNode, dir: &str) -> PathBuf {
        let ctx = TypeContext {
            key: &node.key,
            provider: self.registry,
        };
        let stem = self.options.file_names.convert(node.key.base_name(), &ctx);
        let file = format!("{stem}.{}", self.options.file_extension);
        let dir = dir.replace('\\', "/");
        let dir = dir.trim_matches('/');
        if dir.is_empty() {
            PathBuf::from(file)
        } else {
            PathBuf::from(format!("{dir}/{file}"))
        }
    }

    fn index_module(&self, modules: &[GeneratedModule]) -> GeneratedModule {
        let quote = self.options.quote();
        let suffix = format!(".{}", self.options.file_extension);
        let mut stems: Vec<String> = modules
            .iter()
            .map(|module| {
                let text = module.path.to_string_lossy().replace('\\', "/");
                text.strip_suffix(&suffix)
                    .map(str::to_owned)
                    .unwrap_or(text)
            })
            .collect();
        stems.sort();

        let lines: Vec<String> = stems
            .iter()
            .map(|stem| templates::index_export_line(stem, quote))
            .collect();
        GeneratedModule {
            key: TypeKey::plain("index"),
            path: PathBuf::from(format!("index.{}", self.options.file_extension)),
            content: lines.join("\n") + "\n",
        }
    }
}

/// Imported symbol for a hand-written type name, which may carry generic
/// arguments the import statement must not repeat.
fn base_symbol(name: &str) -> &str {
    match name.find('<') {
        Some(idx) => name[..idx].trim_end(),
        None => name,
    }
}

fn symbol_import(
    declared: &str,
    original: Option<&str>,
    path: &str,
    default_export: bool,
) -> ResolvedImport {
    let declared = base_symbol(declared);
    if default_export {
        return ResolvedImport {
            name: declared.to_string(),
            alias: None,
            path: path.to_string(),
            default_export: true,
        };
    }
    match original {
        Some(original) if original != declared => ResolvedImport {
            name: original.to_string(),
            alias: Some(declared.to_string()),
            path: path.to_string(),
            default_export: false,
        },
        _ => ResolvedImport::named(declared, path),
    }
}

/// First module wins when two types map to the same output file.
fn dedup_paths(modules: Vec<GeneratedModule>) -> Vec<GeneratedModule> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for module in modules {
        if seen.insert(module.path.clone()) {
            out.push(module);
        } else {
            warn!(
                "Duplicate output path {}; keeping the first module",
                module.path.display()
            );
        }
    }
    out
}
