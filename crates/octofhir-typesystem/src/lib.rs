//! # octofhir-typesystem
//!
//! GraphQL runtime type system core.
//!
//! Applications declare interfaces, objects and the other GraphQL type
//! kinds together with the behaviors that resolve their fields. Finalizing
//! the registry produces an immutable schema that:
//!
//! - composes each object's effective fields and behaviors from the
//!   interfaces it implements, with the object's own declarations winning
//! - checks every object against its interface contracts
//! - resolves the concrete object type of interface and union values
//! - keeps only the types reachable from the root operations and the
//!   declared orphan types
//!
//! ## Example
//!
//! ```
//! use octofhir_typesystem::{
//!     FieldBehavior, FieldDefinition, InterfaceDefinition, ObjectDefinition, ResolveContext,
//!     ResolveTypeBehavior, SchemaRegistry, TypeRef,
//! };
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::build("Query", None, None);
//! registry
//!     .interface(
//!         InterfaceDefinition::new("Node")
//!             .field(FieldDefinition::new("id", TypeRef::named_nn("ID")))
//!             .resolve_type(ResolveTypeBehavior::discriminator("kind"))
//!             .orphan_type("Comment"),
//!     )
//!     .object(
//!         ObjectDefinition::new("Comment")
//!             .implements("Node")
//!             .field(FieldDefinition::new("id", TypeRef::named_nn("ID")))
//!             .field(FieldDefinition::new("body", "String")),
//!     )
//!     .object(
//!         ObjectDefinition::new("Query")
//!             .field(FieldDefinition::new("node", "Node"))
//!             .behavior(
//!                 "node",
//!                 FieldBehavior::constant(json!({"kind": "Comment", "id": "1"})),
//!             ),
//!     );
//!
//! let schema = registry.finalize().unwrap();
//! let ctx = ResolveContext::new();
//! let node = schema
//!     .resolve_field("Query", "node", &json!({}), &Default::default(), &ctx)
//!     .unwrap();
//! assert_eq!(schema.resolve_type(&node, "Node", &ctx).unwrap().name, "Comment");
//! ```
//!
//! ## Configuration
//!
//! Add to `octofhir.toml`:
//!
//! ```toml
//! [typesystem]
//! introspection = true
//! max_depth = 15
//! max_complexity = 500
//! warn_unreachable = false
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Type references, field and type definitions, behaviors
//! - [`schema`] - Registry, composition, reachability and the frozen schema
//! - [`dynamic`] - Lowering into an executable `async-graphql` schema
//! - [`config`] - Configuration options
//! - [`error`] - Error types

pub mod config;
pub mod dynamic;
pub mod error;
pub mod schema;
pub mod types;

// Re-export main types
pub use config::SchemaConfig;
pub use dynamic::DynamicSchemaBuilder;
pub use error::{BuildError, FieldError, SchemaError, TypeSystemError};
pub use schema::{FrozenSchema, RootOperations, SchemaRegistry};
pub use types::{
    ArgumentDefinition, Arguments, EnumDefinition, FieldBehavior, FieldDefinition,
    InputObjectDefinition, InstanceChecks, InterfaceDefinition, ObjectDefinition, ResolveContext,
    ResolveTypeBehavior, ScalarDefinition, TypeDefinition, TypeKind, TypeRef, UnionDefinition,
};

/// Result type for type system operations.
pub type Result<T> = std::result::Result<T, TypeSystemError>;
