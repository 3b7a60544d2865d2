//! End-to-end module generation over the shop fixture.
//!
//! Asserts whole module contents rather than fragments: import blocks,
//! heritage clauses, member lists and the on-disk tree the writer leaves
//! behind.

use std::collections::BTreeSet;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use type_bridge::core::options::{GeneratorOptions, NullableMode};
use type_bridge::core::registry::TypeRegistry;
use type_bridge::core::types::{MemberNode, TypeKey, TypeNode, TypeRef};
use type_bridge::emit::{ModuleGenerator, ModuleWriter};

use super::{shop_registry, shop_registry_with_bare_detail};

fn generate(registry: &TypeRegistry, options: &GeneratorOptions) -> Vec<type_bridge::core::types::GeneratedModule> {
    ModuleGenerator::new(registry, options).generate().unwrap()
}

fn content_of(modules: &[type_bridge::core::types::GeneratedModule], path: &str) -> String {
    modules
        .iter()
        .find(|module| module.path == PathBuf::from(path))
        .map(|module| module.content.clone())
        .unwrap_or_else(|| panic!("no module generated at {path}"))
}

#[test]
fn test_shop_produces_one_module_per_exported_type() {
    let registry = shop_registry();
    let modules = generate(&registry, &GeneratorOptions::default());

    let paths: BTreeSet<String> = modules
        .iter()
        .map(|module| module.path.to_string_lossy().into_owned())
        .collect();
    let expected: BTreeSet<String> = [
        "common/i-entity.ts",
        "common/i-audited.ts",
        "customers/address.ts",
        "customers/customer.ts",
        "orders/order-status.ts",
        "orders/order-line.ts",
        "orders/order.ts",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();
    assert_eq!(paths, expected);
}

#[test]
fn test_customer_module_content() {
    let registry = shop_registry();
    let modules = generate(&registry, &GeneratorOptions::default());

    assert_eq!(
        content_of(&modules, "customers/customer.ts"),
        "import { IEntity } from \"../common/i-entity\";\n\
         import { Address } from \"./address\";\n\
         \n\
         export class Customer implements IEntity {\n\
         \x20   name: string;\n\
         \x20   email: string;\n\
         \x20   homeAddress: Address;\n\
         \x20   tags: string[];\n\
         }\n"
    );
}

#[test]
fn test_order_module_pulls_from_every_directory() {
    let registry = shop_registry();
    let modules = generate(&registry, &GeneratorOptions::default());

    assert_eq!(
        content_of(&modules, "orders/order.ts"),
        "import { IEntity } from \"../common/i-entity\";\n\
         import { IAudited } from \"../common/i-audited\";\n\
         import { Customer } from \"../customers/customer\";\n\
         import { OrderLine } from \"./order-line\";\n\
         import { OrderStatus } from \"./order-status\";\n\
         \n\
         export class Order implements IEntity, IAudited {\n\
         \x20   number: number;\n\
         \x20   placedAt: Date;\n\
         \x20   customer: Customer;\n\
         \x20   lines: OrderLine[];\n\
         \x20   status: OrderStatus;\n\
         }\n"
    );
}

#[test]
fn test_interface_and_enum_modules() {
    let registry = shop_registry();
    let modules = generate(&registry, &GeneratorOptions::default());

    assert_eq!(
        content_of(&modules, "common/i-entity.ts"),
        "export interface IEntity {\n    id: number;\n}\n"
    );
    assert_eq!(
        content_of(&modules, "orders/order-status.ts"),
        "export enum OrderStatus {\n\
         \x20   Pending = 0,\n\
         \x20   Shipped = 1,\n\
         \x20   Delivered = 2,\n\
         }\n"
    );
}

#[test]
fn test_bare_detail_lands_beside_its_consumer() {
    let registry = shop_registry_with_bare_detail();
    let modules = generate(&registry, &GeneratorOptions::default());

    assert_eq!(
        content_of(&modules, "orders/shipment.ts"),
        "import { ShipmentDetail } from \"./shipment-detail\";\n\
         \n\
         export class Shipment {\n\
         \x20   detail: ShipmentDetail;\n\
         }\n"
    );
    assert_eq!(
        content_of(&modules, "orders/shipment-detail.ts"),
        "export class ShipmentDetail {\n\
         \x20   carrier: string;\n\
         \x20   trackingCode: string;\n\
         }\n"
    );
    let detail_count = modules
        .iter()
        .filter(|module| module.key == TypeKey::plain("Shop.Orders.ShipmentDetail"))
        .count();
    assert_eq!(detail_count, 1);
}

#[test]
fn test_nullable_mode_reshapes_member_types() {
    let registry = shop_registry();
    let mut options = GeneratorOptions::default();

    options.nullable_mode = NullableMode::Null;
    let modules = generate(&registry, &options);
    assert!(content_of(&modules, "customers/customer.ts").contains("email: string | null;"));

    options.nullable_mode = NullableMode::Undefined;
    let modules = generate(&registry, &options);
    assert!(content_of(&modules, "customers/customer.ts").contains("email: string | undefined;"));
}

#[test]
fn test_contract_members_are_excluded_by_default() {
    let mut registry = TypeRegistry::new();
    registry
        .insert(
            TypeNode::class("App.Widget")
                .exported_root()
                .member("Label", TypeRef::string())
                .with_member(MemberNode::from_contract(
                    "Value",
                    TypeRef::number(),
                    TypeKey::plain("App.IValued"),
                )),
        )
        .unwrap();

    let modules = generate(&registry, &GeneratorOptions::default());
    let content = content_of(&modules, "widget.ts");
    assert!(content.contains("label: string;"));
    assert!(!content.contains("value"));

    let mut options = GeneratorOptions::default();
    options.include_explicit_members = true;
    let modules = generate(&registry, &options);
    let content = content_of(&modules, "widget.ts");
    assert!(content.contains("label: string;"));
    // Contract members come back postfixed with the contract hash.
    assert!(content.contains("value"));
}

#[test]
fn test_index_file_covers_every_module() {
    let registry = shop_registry();
    let mut options = GeneratorOptions::default();
    options.create_index_file = true;
    let modules = generate(&registry, &options);

    assert_eq!(
        content_of(&modules, "index.ts"),
        "export * from \"./common/i-audited\";\n\
         export * from \"./common/i-entity\";\n\
         export * from \"./customers/address\";\n\
         export * from \"./customers/customer\";\n\
         export * from \"./orders/order\";\n\
         export * from \"./orders/order-line\";\n\
         export * from \"./orders/order-status\";\n"
    );
}

#[test]
fn test_config_document_drives_generation() {
    let config: type_bridge::config::GeneratorConfig = toml::from_str(
        r#"
        [output]
        single_quotes = true
        tab_length = 2
        "#,
    )
    .unwrap();
    let options = config.to_options().unwrap();

    let registry = shop_registry();
    let modules = generate(&registry, &options);
    let content = content_of(&modules, "customers/customer.ts");
    assert!(content.contains("import { IEntity } from '../common/i-entity';"));
    assert!(content.contains("\n  name: string;\n"));
}

#[tokio::test]
async fn test_written_tree_matches_generated_modules() {
    let registry = shop_registry();
    let modules = generate(&registry, &GeneratorOptions::default());

    let dir = tempfile::tempdir().unwrap();
    let writer = ModuleWriter::new(dir.path());
    let written = writer.write_all(&modules).await.unwrap();
    assert_eq!(written.len(), modules.len());

    for module in &modules {
        let on_disk = tokio::fs::read_to_string(dir.path().join(&module.path))
            .await
            .unwrap();
        assert_eq!(on_disk, module.content, "mismatch at {}", module.path.display());
    }
}
