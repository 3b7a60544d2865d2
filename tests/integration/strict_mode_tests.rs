//! Strict dependency validation over whole generation runs.
//!
//! In strict mode every edge must land on an exported type or a custom
//! mapping. The error names both parties: the type being rendered and
//! the dependency it could not satisfy.

use type_bridge::core::errors::GeneratorError;
use type_bridge::core::options::{DictionaryMode, GeneratorOptions};
use type_bridge::core::registry::TypeRegistry;
use type_bridge::core::resolver::MappingEntry;
use type_bridge::core::types::{TypeKey, TypeNode, TypeRef};
use type_bridge::emit::ModuleGenerator;

use super::{shop_registry, shop_registry_with_bare_detail};

fn strict() -> GeneratorOptions {
    let mut options = GeneratorOptions::default();
    options.strict_dependencies = true;
    options
}

fn generate_err(registry: &TypeRegistry, options: &GeneratorOptions) -> GeneratorError {
    ModuleGenerator::new(registry, options)
        .generate()
        .expect_err("strict mode should reject the graph")
}

fn assert_missing(err: GeneratorError, requesting: &str, required: &str) {
    match err {
        GeneratorError::MissingDependency {
            requesting: got_requesting,
            required: got_required,
        } => {
            assert_eq!(got_requesting, TypeKey::plain(requesting));
            assert_eq!(got_required, TypeKey::plain(required));
        }
        other => panic!("expected MissingDependency, got {other:?}"),
    }
}

#[test]
fn test_fully_exported_graph_passes() {
    let registry = shop_registry();
    let modules = ModuleGenerator::new(&registry, &strict()).generate().unwrap();
    assert_eq!(modules.len(), registry.generation_set().len());
}

#[test]
fn test_absent_target_names_both_parties() {
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("Shop.Order")
                .exported_root()
                .member("Ghost", TypeRef::named("Shop.Ghost")),
        )
        .unwrap();

    let err = generate_err(&registry, &strict());
    assert_missing(err, "Shop.Order", "Shop.Ghost");
}

#[test]
fn test_unexported_registry_type_is_rejected() {
    // Without strict mode the unexported detail gets a fallback module;
    // with it the run fails instead.
    let registry = shop_registry_with_bare_detail();

    let relaxed = ModuleGenerator::new(&registry, &GeneratorOptions::default())
        .generate()
        .unwrap();
    assert!(relaxed
        .iter()
        .any(|module| module.key == TypeKey::plain("Shop.Orders.ShipmentDetail")));

    let err = generate_err(&registry, &strict());
    assert_missing(err, "Shop.Orders.Shipment", "Shop.Orders.ShipmentDetail");
}

#[test]
fn test_failure_names_the_type_holding_the_edge() {
    // Report -> Section -> Ghost: the error points at Section, the type
    // whose module actually carries the unsatisfied import.
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("App.Report")
                .exported_root()
                .member("Body", TypeRef::named("App.Section")),
        )
        .unwrap();
    registry
        .insert(
            TypeNode::class("App.Section")
                .exported_root()
                .member("Chart", TypeRef::named("App.Ghost")),
        )
        .unwrap();

    let err = generate_err(&registry, &strict());
    assert_missing(err, "App.Section", "App.Ghost");
}

#[test]
fn test_wrapped_targets_are_still_validated() {
    // The missing type hides behind nullable, array and generic-argument
    // wrappers; extraction flattens all of them.
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("App.Holder").exported_root().member(
                "Values",
                TypeRef::nullable(TypeRef::array(TypeRef::generic(
                    "App.Wrapper",
                    vec![TypeRef::named("App.Ghost")],
                ))),
            ),
        )
        .unwrap();
    registry
        .insert(
            TypeNode::generic_class("App.Wrapper", &["T"]).exported_root(),
        )
        .unwrap();

    let err = generate_err(&registry, &strict());
    assert_missing(err, "App.Holder", "App.Ghost");
}

#[test]
fn test_exact_mapping_satisfies_strict_mode() {
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("Shop.Order")
                .exported_root()
                .member("Id", TypeRef::named("External.Guid")),
        )
        .unwrap();

    let mut options = strict();
    options
        .custom_dependencies
        .insert("External.Guid", MappingEntry::new("util/guid"))
        .unwrap();

    let modules = ModuleGenerator::new(&registry, &options).generate().unwrap();
    assert_eq!(modules.len(), 1);
    assert!(modules[0]
        .content
        .contains("import { Guid } from \"util/guid\";"));
}

#[test]
fn test_namespace_mapping_satisfies_strict_mode() {
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("Shop.Order")
                .exported_root()
                .member("Widget", TypeRef::named("Vendor.Controls.Widget")),
        )
        .unwrap();

    let mut options = strict();
    options
        .custom_dependencies
        .insert("Vendor", MappingEntry::new("vendor"))
        .unwrap();

    let modules = ModuleGenerator::new(&registry, &options).generate().unwrap();
    assert!(modules[0]
        .content
        .contains("import { Widget } from \"vendor/Controls\";"));
}

#[test]
fn test_ignored_dependency_is_exempt() {
    // Edges to ignored types are dropped during extraction, so strict
    // mode never sees them.
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("Shop.Order")
                .exported_root()
                .member("Internal", TypeRef::named("Shop.Internal")),
        )
        .unwrap();
    registry
        .insert(TypeNode::class("Shop.Internal").ignored())
        .unwrap();

    let modules = ModuleGenerator::new(&registry, &strict()).generate().unwrap();
    assert_eq!(modules.len(), 1);
    assert!(!modules[0].content.contains("import"));
}

#[test]
fn test_unmapped_custom_dictionary_does_not_trip_strict() {
    // The synthetic dictionary-type edge is dropped before validation when
    // no mapping provides its module; only the import is lost.
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("Shop.Lookup").exported_root().member(
                "ByKey",
                TypeRef::dictionary(TypeRef::named("Shop.CompositeKey"), TypeRef::string()),
            ),
        )
        .unwrap();
    registry
        .insert(TypeNode::class("Shop.CompositeKey").exported_root())
        .unwrap();

    let mut options = strict();
    options.dictionary_mode = DictionaryMode::Custom;
    options.custom_dictionary_type = Some(TypeKey::plain("Maps.StrictMap"));

    let modules = ModuleGenerator::new(&registry, &options).generate().unwrap();
    let lookup = modules
        .iter()
        .find(|module| module.key == TypeKey::plain("Shop.Lookup"))
        .unwrap();
    assert!(lookup.content.contains("byKey: StrictMap<CompositeKey, string>;"));
    assert!(!lookup.content.contains("import { StrictMap }"));
}

#[test]
fn test_error_message_lists_the_remedies() {
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("Shop.Order")
                .exported_root()
                .member("Ghost", TypeRef::named("Shop.Ghost")),
        )
        .unwrap();

    let message = generate_err(&registry, &strict()).to_string();
    assert!(message.contains("Shop.Ghost"));
    assert!(message.contains("Shop.Order"));
    assert!(message.contains("ignore the type"));
    assert!(message.contains("include it in the generation set"));
    assert!(message.contains("custom dependency mapping"));
}
