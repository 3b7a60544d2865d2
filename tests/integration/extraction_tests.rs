//! Dependency extraction over whole type graphs.
//!
//! Exercises edge discovery, deduplication, self-edge removal and the
//! ignore rules against the shared shop fixture and property-generated
//! graphs.

use std::collections::HashSet;

use proptest::prelude::*;
use type_bridge::core::extractor::DependencyExtractor;
use type_bridge::core::registry::TypeRegistry;
use type_bridge::core::types::{MemberNode, TypeKey, TypeNode, TypeRef};

use super::shop_registry;

#[test]
fn test_primitive_only_type_has_no_dependencies() {
    let registry = shop_registry();
    let extractor = DependencyExtractor::new(&registry);
    let line = registry
        .get(&TypeKey::plain("Shop.Orders.OrderLine"))
        .unwrap();
    assert!(extractor.dependencies_of(line).is_empty());
}

#[test]
fn test_order_edges_cover_heritage_and_members_in_discovery_order() {
    let registry = shop_registry();
    let extractor = DependencyExtractor::new(&registry);
    let order = registry.get(&TypeKey::plain("Shop.Orders.Order")).unwrap();

    let targets: Vec<String> = extractor
        .dependencies_of(order)
        .into_iter()
        .map(|edge| edge.target.path)
        .collect();
    assert_eq!(
        targets,
        vec![
            "Shop.Common.IEntity",
            "Shop.Common.IAudited",
            "Shop.Customers.Customer",
            "Shop.Orders.OrderLine",
            "Shop.Orders.OrderStatus",
        ]
    );
}

#[test]
fn test_duplicate_targets_collapse_to_one_edge() {
    let registry = shop_registry();
    let extractor = DependencyExtractor::new(&registry);
    let node = TypeNode::class("Shop.Orders.Invoice")
        .member("BillTo", TypeRef::named("Shop.Customers.Address"))
        .member("ShipTo", TypeRef::named("Shop.Customers.Address"));

    let edges = extractor.dependencies_of(&node);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, TypeKey::plain("Shop.Customers.Address"));
}

#[test]
fn test_generic_self_reference_is_excluded() {
    let registry = TypeRegistry::new();
    let extractor = DependencyExtractor::new(&registry);
    let node = TypeNode::generic_class("Graph.TreeNode", &["T"])
        .member("Value", TypeRef::parameter("T"))
        .member(
            "Children",
            TypeRef::array(TypeRef::generic(
                "Graph.TreeNode",
                vec![TypeRef::parameter("T")],
            )),
        );

    assert!(extractor.dependencies_of(&node).is_empty());
}

#[test]
fn test_ignore_all_bases_suppresses_every_heritage_edge() {
    let registry = shop_registry();
    let extractor = DependencyExtractor::new(&registry);
    let node = TypeNode::class("Shop.Orders.Draft")
        .with_base(TypeRef::named("Shop.Orders.Order"))
        .implements(TypeRef::named("Shop.Common.IEntity"))
        .implements(TypeRef::named("Shop.Common.IAudited"))
        .ignore_all_bases()
        .member("Note", TypeRef::string());

    assert!(extractor.dependencies_of(&node).is_empty());
}

#[test]
fn test_ignored_members_contribute_nothing() {
    let registry = shop_registry();
    let extractor = DependencyExtractor::new(&registry);
    let node = TypeNode::class("Shop.Orders.Draft").with_member(
        MemberNode::new("Customer", TypeRef::named("Shop.Customers.Customer")).ignored(),
    );

    assert!(extractor.dependencies_of(&node).is_empty());
}

#[test]
fn test_contract_members_gated_by_explicit_flag() {
    let registry = shop_registry();
    let node = TypeNode::class("Shop.Orders.Draft").with_member(MemberNode::from_contract(
        "Owner",
        TypeRef::named("Shop.Customers.Customer"),
        TypeKey::plain("Shop.Common.IOwned"),
    ));

    let without = DependencyExtractor::new(&registry);
    assert!(without.dependencies_of(&node).is_empty());

    let with = DependencyExtractor::new(&registry).include_explicit_members(true);
    let edges = with.dependencies_of(&node);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, TypeKey::plain("Shop.Customers.Customer"));
}

fn member_type_strategy() -> impl Strategy<Value = TypeRef> {
    prop_oneof![
        Just(TypeRef::string()),
        Just(TypeRef::number()),
        Just(TypeRef::boolean()),
        Just(TypeRef::named("Prop.Subject")),
        Just(TypeRef::named("Prop.Other")),
        Just(TypeRef::named("Prop.Third")),
        Just(TypeRef::array(TypeRef::named("Prop.Other"))),
        Just(TypeRef::nullable(TypeRef::named("Prop.Subject"))),
        Just(TypeRef::array(TypeRef::nullable(TypeRef::named(
            "Prop.Third"
        )))),
    ]
}

proptest! {
    /// Extraction is pure: two walks over the same node agree, and no
    /// edge ever targets the node itself, however the self-reference is
    /// wrapped.
    #[test]
    fn prop_extraction_is_idempotent_and_self_free(
        member_types in proptest::collection::vec(member_type_strategy(), 0..8)
    ) {
        let mut node = TypeNode::class("Prop.Subject");
        for (index, ty) in member_types.into_iter().enumerate() {
            node = node.member(format!("Field{}", index), ty);
        }

        let registry = TypeRegistry::new();
        let extractor = DependencyExtractor::new(&registry);
        let first: HashSet<TypeKey> = extractor
            .dependencies_of(&node)
            .into_iter()
            .map(|edge| edge.target)
            .collect();
        let second: HashSet<TypeKey> = extractor
            .dependencies_of(&node)
            .into_iter()
            .map(|edge| edge.target)
            .collect();

        prop_assert_eq!(&first, &second);
        prop_assert!(!first.contains(&node.key));
    }
}
