pub mod extraction_tests;
pub mod generation_tests;
pub mod strict_mode_tests;

// Shared model fixtures
use type_bridge::core::registry::TypeRegistry;
use type_bridge::core::types::{EnumLiteral, MemberNode, TypeNode, TypeRef};

/// A small shop domain spanning three output directories. Exercises
/// cross-directory imports, interface heritage, enums, arrays and
/// nullable members.
pub fn shop_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();

    registry
        .extend([
            TypeNode::interface("Shop.Common.IEntity")
                .exported("common")
                .member("Id", TypeRef::number()),
            TypeNode::interface("Shop.Common.IAudited")
                .exported("common")
                .member("CreatedAt", TypeRef::date()),
            TypeNode::class("Shop.Customers.Address")
                .exported("customers")
                .member("Street", TypeRef::string())
                .member("City", TypeRef::string())
                .member("Zip", TypeRef::string()),
            TypeNode::class("Shop.Customers.Customer")
                .exported("customers")
                .implements(TypeRef::named("Shop.Common.IEntity"))
                .member("Name", TypeRef::string())
                .with_member(MemberNode::new(
                    "Email",
                    TypeRef::nullable(TypeRef::string()),
                ))
                .member("HomeAddress", TypeRef::named("Shop.Customers.Address"))
                .member("Tags", TypeRef::array(TypeRef::string())),
            TypeNode::enumeration("Shop.Orders.OrderStatus")
                .exported("orders")
                .value_of("Pending", EnumLiteral::Int(0))
                .value_of("Shipped", EnumLiteral::Int(1))
                .value_of("Delivered", EnumLiteral::Int(2)),
            TypeNode::class("Shop.Orders.OrderLine")
                .exported("orders")
                .member("Sku", TypeRef::string())
                .member("Quantity", TypeRef::number())
                .member("UnitPrice", TypeRef::number()),
            TypeNode::class("Shop.Orders.Order")
                .exported("orders")
                .implements(TypeRef::named("Shop.Common.IEntity"))
                .implements(TypeRef::named("Shop.Common.IAudited"))
                .member("Number", TypeRef::number())
                .member("PlacedAt", TypeRef::date())
                .member("Customer", TypeRef::named("Shop.Customers.Customer"))
                .member("Lines", TypeRef::array(TypeRef::named("Shop.Orders.OrderLine")))
                .member("Status", TypeRef::named("Shop.Orders.OrderStatus")),
        ])
        .expect("fixture types are unique");

    registry
}

/// Extends the shop fixture with a type that pulls in an unexported
/// registry type, for fallback-generation scenarios.
pub fn shop_registry_with_bare_detail() -> TypeRegistry {
    let mut registry = shop_registry();
    registry
        .extend([
            TypeNode::class("Shop.Orders.ShipmentDetail")
                .member("Carrier", TypeRef::string())
                .member("TrackingCode", TypeRef::string()),
            TypeNode::class("Shop.Orders.Shipment")
                .exported("orders")
                .member("Detail", TypeRef::named("Shop.Orders.ShipmentDetail")),
        ])
        .expect("fixture types are unique");
    registry
}
