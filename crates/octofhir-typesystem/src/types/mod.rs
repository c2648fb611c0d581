//! Type system building blocks.
//!
//! - [`TypeRef`] - named, list and non-null type references
//! - [`FieldDefinition`] / [`ArgumentDefinition`] - fields and their arguments
//! - [`TypeDefinition`] and the per-kind definitions
//! - [`FieldBehavior`] / [`ResolveTypeBehavior`] - application behaviors

mod behavior;
mod definition;
mod field;
mod type_ref;

pub use behavior::{Arguments, FieldBehavior, InstanceChecks, ResolveContext, ResolveTypeBehavior};
pub use definition::{
    EnumDefinition, InputObjectDefinition, InterfaceDefinition, ObjectDefinition, ScalarDefinition,
    TypeDefinition, TypeKind, UnionDefinition,
};
pub use field::{ArgumentDefinition, FieldDefinition};
pub use type_ref::{BOOLEAN, BUILTIN_SCALARS, FLOAT, ID, INT, STRING, TypeRef};

pub(crate) use type_ref::is_valid_graphql_name;
